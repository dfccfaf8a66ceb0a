//! State transitions for parking requests.
//!
//! Requests live in the ledger as a single record whose `state` is a closed
//! enum. Every transition goes through one table, [`RequestState::after`].
//!
//! ```text
//! Requested ──allocate()──> Allocated ──occupy()──> Occupied ──release()──> Released
//!     │                         │  │
//!     │                         │  └──rollback_allocation()──> Requested
//!     └──cancel()──> Cancelled <┘
//! ```
//!
//! # Guards
//!
//! Each `mark_*` method checks the transition table before touching any field.
//! An illegal transition returns [`ParkadeError::IllegalTransition`] and leaves
//! the record untouched. Zone occupancy and analytics are updated by the engine
//! only after the guard has passed, so a rejected call mutates nothing at all.
//!
//! # State Lifecycle
//!
//! ## 1. Requested → Allocated
//!
//! Records zone, nominal slot, and whether the allocation crossed zones.
//!
//! ## 2. Allocated → Occupied
//!
//! Records the engine event sequence number. This is the only point at which a
//! zone's occupied counter goes up.
//!
//! ## 3. Occupied → Released
//!
//! Records release time and cost. The zone's occupied counter goes down.
//!
//! ## 4. Requested / Allocated → Cancelled
//!
//! A parked vehicle cannot be cancelled; it has to be released.

use crate::error::{ParkadeError, Result};

use super::state::{Allocation, LifecycleOp, Request, RequestState, TimeUnit};

impl RequestState {
    /// Target state of `op` applied in this state, or `None` if illegal.
    pub fn after(self, op: LifecycleOp) -> Option<RequestState> {
        use LifecycleOp as Op;
        use RequestState as S;

        match (self, op) {
            (S::Requested, Op::Allocate) => Some(S::Allocated),
            (S::Requested, Op::Cancel) => Some(S::Cancelled),
            (S::Allocated, Op::Occupy) => Some(S::Occupied),
            (S::Allocated, Op::Cancel) => Some(S::Cancelled),
            (S::Allocated, Op::RollbackAllocation) => Some(S::Requested),
            (S::Occupied, Op::Release) => Some(S::Released),
            (S::Requested, Op::Occupy | Op::Release | Op::RollbackAllocation)
            | (S::Allocated, Op::Allocate | Op::Release)
            | (S::Occupied, Op::Allocate | Op::Occupy | Op::Cancel | Op::RollbackAllocation)
            | (S::Released | S::Cancelled, _) => None,
        }
    }
}

/// Whether `op` is legal for the request's current state.
pub fn can_transition(request: &Request, op: LifecycleOp) -> bool {
    request.state.after(op).is_some()
}

impl Request {
    /// Return the target state for `op` or the error that rejects it.
    pub fn ensure_transition(&self, op: LifecycleOp) -> Result<RequestState> {
        self.state
            .after(op)
            .ok_or(ParkadeError::IllegalTransition {
                id: self.id,
                state: self.state,
                op,
            })
    }

    pub(crate) fn mark_allocated(&mut self, allocation: Allocation) -> Result<()> {
        let next = self.ensure_transition(LifecycleOp::Allocate)?;
        self.state = next;
        self.allocation = Some(allocation);
        Ok(())
    }

    pub(crate) fn mark_occupied(&mut self, event_seq: u64) -> Result<()> {
        let next = self.ensure_transition(LifecycleOp::Occupy)?;
        self.state = next;
        self.occupied_at = Some(event_seq);
        Ok(())
    }

    pub(crate) fn mark_cancelled(&mut self) -> Result<RequestState> {
        let next = self.ensure_transition(LifecycleOp::Cancel)?;
        let previous = self.state;
        self.state = next;
        Ok(previous)
    }

    pub(crate) fn mark_released(&mut self, release_time: TimeUnit, cost: f64) -> Result<()> {
        let next = self.ensure_transition(LifecycleOp::Release)?;
        self.state = next;
        self.release_time = Some(release_time);
        self.cost = cost;
        Ok(())
    }

    /// Back to `Requested` with the allocation cleared. Returns the allocation
    /// that was undone.
    pub(crate) fn revert_allocation(&mut self) -> Result<Allocation> {
        let next = self.ensure_transition(LifecycleOp::RollbackAllocation)?;
        let allocation = self.allocation.take().ok_or_else(|| {
            ParkadeError::InvalidState(format!(
                "request {} is allocated but has no allocation recorded",
                self.id
            ))
        })?;
        self.state = next;
        self.occupied_at = None;
        Ok(allocation)
    }
}
