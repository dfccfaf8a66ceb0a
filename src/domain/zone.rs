//! Zones and the zone registry.
//!
//! A zone is a capacity-bounded parking area. The roster is fixed when the
//! registry is built; only the occupied counters change afterwards.

use serde::{Deserialize, Serialize};

use crate::error::{ParkadeError, Result};

/// Stable identifier of a zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ZoneId(pub u32);

impl std::fmt::Display for ZoneId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for ZoneId {
    fn from(id: u32) -> Self {
        ZoneId(id)
    }
}

/// Roster entry used to build a registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneSpec {
    pub id: ZoneId,
    pub name: String,
    pub capacity: u32,
}

impl ZoneSpec {
    pub fn new(id: u32, name: impl Into<String>, capacity: u32) -> Self {
        Self {
            id: ZoneId(id),
            name: name.into(),
            capacity,
        }
    }
}

/// A capacity-bounded parking area.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Zone {
    id: ZoneId,
    name: String,
    capacity: u32,
    occupied: u32,
}

impl Zone {
    pub fn id(&self) -> ZoneId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn occupied(&self) -> u32 {
        self.occupied
    }

    pub fn available(&self) -> u32 {
        self.capacity - self.occupied
    }

    pub fn has_capacity(&self) -> bool {
        self.occupied < self.capacity
    }

    /// Occupied share of the zone as a percentage in `[0, 100]`.
    pub fn utilization_percent(&self) -> f64 {
        f64::from(self.occupied) / f64::from(self.capacity) * 100.0
    }
}

/// Fixed, ordered set of zones with their live occupancy.
#[derive(Debug, Clone, Serialize)]
pub struct ZoneRegistry {
    zones: Vec<Zone>,
}

impl ZoneRegistry {
    /// Build a registry from a roster, preserving roster order.
    ///
    /// # Errors
    /// `InvalidArgument` if the roster is empty, repeats an id, or contains a
    /// zone with zero capacity or a blank name.
    pub fn new(roster: &[ZoneSpec]) -> Result<Self> {
        if roster.is_empty() {
            return Err(ParkadeError::InvalidArgument(
                "zone roster must not be empty".to_string(),
            ));
        }

        let mut zones: Vec<Zone> = Vec::with_capacity(roster.len());
        for spec in roster {
            if spec.capacity == 0 {
                return Err(ParkadeError::InvalidArgument(format!(
                    "zone {} must have a positive capacity",
                    spec.id
                )));
            }
            if spec.name.trim().is_empty() {
                return Err(ParkadeError::InvalidArgument(format!(
                    "zone {} must have a name",
                    spec.id
                )));
            }
            if zones.iter().any(|z| z.id == spec.id) {
                return Err(ParkadeError::InvalidArgument(format!(
                    "duplicate zone id {}",
                    spec.id
                )));
            }
            zones.push(Zone {
                id: spec.id,
                name: spec.name.clone(),
                capacity: spec.capacity,
                occupied: 0,
            });
        }

        Ok(Self { zones })
    }

    /// Zones in registration order.
    pub fn list_zones(&self) -> &[Zone] {
        &self.zones
    }

    pub fn contains(&self, id: ZoneId) -> bool {
        self.zones.iter().any(|z| z.id == id)
    }

    pub fn find_zone(&self, id: ZoneId) -> Result<&Zone> {
        self.zones
            .iter()
            .find(|z| z.id == id)
            .ok_or(ParkadeError::ZoneNotFound(id))
    }

    fn find_zone_mut(&mut self, id: ZoneId) -> Result<&mut Zone> {
        self.zones
            .iter_mut()
            .find(|z| z.id == id)
            .ok_or(ParkadeError::ZoneNotFound(id))
    }

    /// Unknown zones have no capacity.
    pub fn has_capacity(&self, id: ZoneId) -> bool {
        self.find_zone(id).map(Zone::has_capacity).unwrap_or(false)
    }

    /// First zone in registration order with a free slot.
    pub fn first_with_capacity(&self) -> Option<&Zone> {
        self.zones.iter().find(|z| z.has_capacity())
    }

    /// Take one slot in the zone.
    ///
    /// # Errors
    /// `ZoneNotFound` for an unknown zone, `InvalidState` if the zone is full.
    pub fn increment_occupancy(&mut self, id: ZoneId) -> Result<u32> {
        let zone = self.find_zone_mut(id)?;
        if !zone.has_capacity() {
            return Err(ParkadeError::InvalidState(format!(
                "zone {} is at capacity ({}/{})",
                zone.id, zone.occupied, zone.capacity
            )));
        }
        zone.occupied += 1;
        Ok(zone.occupied)
    }

    /// Give back one slot. Clamped at zero.
    pub fn decrement_occupancy(&mut self, id: ZoneId) -> Result<u32> {
        let zone = self.find_zone_mut(id)?;
        if zone.occupied == 0 {
            tracing::warn!(zone_id = %id, "Occupancy decrement on empty zone ignored");
        }
        zone.occupied = zone.occupied.saturating_sub(1);
        Ok(zone.occupied)
    }

    /// Zone with the strictly highest occupancy; ties go to the first
    /// registered. `None` when every zone is empty.
    pub fn peak_zone(&self) -> Option<&Zone> {
        let mut peak: Option<&Zone> = None;
        for zone in &self.zones {
            if zone.occupied == 0 {
                continue;
            }
            match peak {
                Some(best) if best.occupied >= zone.occupied => {}
                _ => peak = Some(zone),
            }
        }
        peak
    }

    pub fn total_capacity(&self) -> u32 {
        self.zones.iter().map(|z| z.capacity).sum()
    }

    pub fn total_occupied(&self) -> u32 {
        self.zones.iter().map(|z| z.occupied).sum()
    }
}
