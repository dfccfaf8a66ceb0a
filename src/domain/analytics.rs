//! Running statistics and the read-only snapshot handed to display layers.

use serde::Serialize;

use crate::domain::request::TimeUnit;
use crate::domain::zone::{ZoneId, ZoneRegistry};

/// Running counters maintained by the engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Analytics {
    /// Total requests ever submitted
    pub total_requests: u64,
    /// Requests that reached `Released`
    pub completed_requests: u64,
    pub cancelled_requests: u64,
    /// Cross-zone allocations made, minus those rolled back
    pub cross_zone_allocations: u64,
    /// Sum of all release costs
    pub total_revenue: f64,
    /// Mean `release_time - request_time` over all released requests
    pub average_duration: f64,
}

impl Analytics {
    pub(crate) fn record_submitted(&mut self) {
        self.total_requests += 1;
    }

    pub(crate) fn record_cross_zone(&mut self) {
        self.cross_zone_allocations += 1;
    }

    pub(crate) fn undo_cross_zone(&mut self) {
        self.cross_zone_allocations = self.cross_zone_allocations.saturating_sub(1);
    }

    pub(crate) fn record_cancelled(&mut self) {
        self.cancelled_requests += 1;
    }

    /// Account for one release. The average is recomputed from every released
    /// duration rather than updated incrementally, so it cannot drift.
    pub(crate) fn record_release<I>(&mut self, cost: f64, released_durations: I)
    where
        I: IntoIterator<Item = TimeUnit>,
    {
        self.completed_requests += 1;
        self.total_revenue += cost;

        let (sum, count) = released_durations
            .into_iter()
            .fold((0i128, 0u64), |(sum, count), d| (sum + i128::from(d), count + 1));
        self.average_duration = if count == 0 {
            0.0
        } else {
            sum as f64 / count as f64
        };
    }
}

/// Per-zone view for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZoneView {
    pub id: ZoneId,
    pub name: String,
    pub capacity: u32,
    pub occupied: u32,
    pub available: u32,
    pub utilization_percent: f64,
}

/// Point-in-time copy of zones and analytics. Taking one never mutates the
/// engine.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EngineSnapshot {
    pub zones: Vec<ZoneView>,
    pub analytics: Analytics,
    pub total_slots: u32,
    pub occupied_slots: u32,
    pub available_slots: u32,
    /// Occupied share of all slots, as a percentage
    pub utilization_percent: f64,
    pub peak_zone: Option<ZoneId>,
}

impl EngineSnapshot {
    pub(crate) fn capture(zones: &ZoneRegistry, analytics: &Analytics) -> Self {
        let total_slots = zones.total_capacity();
        let occupied_slots = zones.total_occupied();
        let utilization_percent = if total_slots == 0 {
            0.0
        } else {
            f64::from(occupied_slots) / f64::from(total_slots) * 100.0
        };

        Self {
            zones: zones
                .list_zones()
                .iter()
                .map(|z| ZoneView {
                    id: z.id(),
                    name: z.name().to_string(),
                    capacity: z.capacity(),
                    occupied: z.occupied(),
                    available: z.available(),
                    utilization_percent: z.utilization_percent(),
                })
                .collect(),
            analytics: analytics.clone(),
            total_slots,
            occupied_slots,
            available_slots: total_slots - occupied_slots,
            utilization_percent,
            peak_zone: zones.peak_zone().map(|z| z.id()),
        }
    }

    pub fn zone(&self, id: ZoneId) -> Option<&ZoneView> {
        self.zones.iter().find(|z| z.id == id)
    }
}
