//! Zone selection for allocation.
//!
//! The requested zone is tried first. When it is full the roster is scanned in
//! registration order and the first zone with room wins, which marks the
//! allocation as cross-zone. Nothing here reserves capacity: the slot number is
//! `occupied + 1` at decision time and occupancy only moves on occupy.

use serde::Serialize;

use crate::domain::request::Allocation;
use crate::domain::zone::{ZoneId, ZoneRegistry};

/// Outcome of a successful allocation, as returned to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AllocationResult {
    pub zone: ZoneId,
    pub slot: u32,
    pub cross_zone: bool,
}

impl From<Allocation> for AllocationResult {
    fn from(a: Allocation) -> Self {
        AllocationResult {
            zone: a.zone,
            slot: a.slot,
            cross_zone: a.cross_zone,
        }
    }
}

/// Pick a zone and nominal slot for a request, or `None` if every zone is full.
pub fn plan_allocation(zones: &ZoneRegistry, requested: ZoneId) -> Option<Allocation> {
    if let Ok(zone) = zones.find_zone(requested)
        && zone.has_capacity()
    {
        return Some(Allocation {
            zone: zone.id(),
            slot: zone.occupied() + 1,
            cross_zone: false,
        });
    }

    zones.first_with_capacity().map(|zone| Allocation {
        zone: zone.id(),
        slot: zone.occupied() + 1,
        cross_zone: true,
    })
}
