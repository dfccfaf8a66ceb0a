//! Request record and lifecycle states.
//!
//! A request is created in `Requested` and moves through the lifecycle in place;
//! it is never removed from the ledger, so cancelled and released requests stay
//! available for analytics and audit.

use serde::{Deserialize, Serialize};

use crate::domain::zone::ZoneId;

/// Caller-supplied abstract time unit. Not tied to wall-clock time.
pub type TimeUnit = i64;

/// Unique identifier for a request, assigned by the ledger starting at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(pub u64);

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for RequestId {
    fn from(id: u64) -> Self {
        RequestId(id)
    }
}

/// Lifecycle state of a request.
///
/// ```text
/// Requested ──allocate──> Allocated ──occupy──> Occupied ──release──> Released
///     │                       │
///     └──cancel──> Cancelled <┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestState {
    Requested,
    Allocated,
    Occupied,
    Released,
    Cancelled,
}

impl RequestState {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestState::Requested => "requested",
            RequestState::Allocated => "allocated",
            RequestState::Occupied => "occupied",
            RequestState::Released => "released",
            RequestState::Cancelled => "cancelled",
        }
    }

    /// Released and Cancelled have no outgoing transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(self, RequestState::Released | RequestState::Cancelled)
    }
}

impl std::fmt::Display for RequestState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for RequestState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "requested" => Ok(RequestState::Requested),
            "allocated" => Ok(RequestState::Allocated),
            "occupied" => Ok(RequestState::Occupied),
            "released" => Ok(RequestState::Released),
            "cancelled" => Ok(RequestState::Cancelled),
            _ => Err(format!("Invalid request state: {}", s)),
        }
    }
}

/// Operations that move a request between states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleOp {
    Allocate,
    Occupy,
    Cancel,
    Release,
    /// Undo an allocation that has not been occupied yet.
    RollbackAllocation,
}

impl LifecycleOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            LifecycleOp::Allocate => "allocate",
            LifecycleOp::Occupy => "occupy",
            LifecycleOp::Cancel => "cancel",
            LifecycleOp::Release => "release",
            LifecycleOp::RollbackAllocation => "roll back allocation",
        }
    }
}

impl std::fmt::Display for LifecycleOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a request was placed.
///
/// The slot number is nominal: it is derived from the zone's occupancy at
/// decision time and is not reserved, so two back-to-back allocations into the
/// same zone can share a slot number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Allocation {
    pub zone: ZoneId,
    pub slot: u32,
    pub cross_zone: bool,
}

/// A parking request and everything the engine has recorded about it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Request {
    pub id: RequestId,
    /// Caller-supplied vehicle identifier, not checked for uniqueness
    pub vehicle_id: String,
    /// Zone the caller asked for
    pub requested_zone: ZoneId,
    pub request_time: TimeUnit,
    pub state: RequestState,
    /// Set by allocation; zone and slot are always present together
    pub allocation: Option<Allocation>,
    /// Engine event sequence number at the moment the slot was occupied
    pub occupied_at: Option<u64>,
    pub release_time: Option<TimeUnit>,
    /// Zero until the request is released
    pub cost: f64,
}

impl Request {
    pub(crate) fn new(
        id: RequestId,
        vehicle_id: String,
        requested_zone: ZoneId,
        request_time: TimeUnit,
    ) -> Self {
        Self {
            id,
            vehicle_id,
            requested_zone,
            request_time,
            state: RequestState::Requested,
            allocation: None,
            occupied_at: None,
            release_time: None,
            cost: 0.0,
        }
    }

    pub fn allocated_zone(&self) -> Option<ZoneId> {
        self.allocation.map(|a| a.zone)
    }

    pub fn allocated_slot(&self) -> Option<u32> {
        self.allocation.map(|a| a.slot)
    }

    pub fn is_cross_zone(&self) -> bool {
        self.allocation.is_some_and(|a| a.cross_zone)
    }

    /// `release_time - request_time` once released. May be negative when the
    /// caller released before the request time.
    pub fn duration(&self) -> Option<TimeUnit> {
        match (self.state, self.release_time) {
            (RequestState::Released, Some(release_time)) => Some(release_time - self.request_time),
            _ => None,
        }
    }
}
