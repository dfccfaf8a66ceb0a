//! Parking engine: the single owner of zones, requests and analytics.
//!
//! Every operation is a synchronous state transformer. An operation either
//! validates, then applies all of its effects, or fails and applies none. The
//! guard always runs before the first mutation.
use metrics::{counter, gauge};

#[cfg(feature = "metrics")]
use std::sync::Arc;

use crate::domain::analytics::{Analytics, EngineSnapshot};
use crate::domain::pricing::PricingPolicy;
use crate::domain::request::{LifecycleOp, Request, RequestId, RequestState, TimeUnit};
use crate::domain::zone::{ZoneId, ZoneRegistry};
use crate::error::{ParkadeError, Result};
use crate::ledger::RequestLedger;
#[cfg(feature = "metrics")]
use crate::metrics::ParkadeMetrics;

pub mod allocation;
pub mod config;
pub mod journal;
pub mod shared;

pub use allocation::{AllocationResult, plan_allocation};
pub use config::{DEFAULT_JOURNAL_CAPACITY, EngineConfig};
pub use journal::{AllocationJournal, JournalEntry};
pub use shared::SharedEngine;

/// Duration and price of a released request.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct ReleaseReceipt {
    pub duration: TimeUnit,
    pub cost: f64,
}

/// Log and count a rejected operation, then hand the error back.
fn rejected(operation: &'static str, id: Option<RequestId>, err: ParkadeError) -> ParkadeError {
    counter!(
        "parkade_operations_rejected_total",
        "operation" => operation,
        "reason" => err.metric_label()
    )
    .increment(1);
    match id {
        Some(id) => tracing::warn!(request_id = %id, operation, error = %err, "Operation rejected"),
        None => tracing::warn!(operation, error = %err, "Operation rejected"),
    }
    err
}

/// Parking-slot allocation and lifecycle engine.
///
/// Owns all mutable state; there are no globals, so independent engines never
/// interfere with each other. Wrap in [`SharedEngine`] to share between
/// threads.
#[derive(Debug)]
pub struct ParkingEngine {
    zones: ZoneRegistry,
    ledger: RequestLedger,
    analytics: Analytics,
    journal: AllocationJournal,
    pricing: PricingPolicy,
    reject_negative_duration: bool,
    /// Bumped on every successful mutation; stamps occupy events
    event_seq: u64,
    #[cfg(feature = "metrics")]
    prometheus: Option<Arc<ParkadeMetrics>>,
}

impl ParkingEngine {
    /// Create an engine from a validated configuration.
    ///
    /// # Errors
    /// `InvalidArgument` if the roster or pricing is malformed.
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        let zones = ZoneRegistry::new(&config.zones)?;

        tracing::info!(
            zones = zones.list_zones().len(),
            total_slots = zones.total_capacity(),
            per_unit_rate = config.pricing.per_unit_rate,
            cross_zone_penalty = config.pricing.cross_zone_penalty,
            "Parking engine initialized"
        );

        Ok(Self {
            zones,
            ledger: RequestLedger::new(),
            analytics: Analytics::default(),
            journal: AllocationJournal::new(config.journal_capacity),
            pricing: config.pricing,
            reject_negative_duration: config.reject_negative_duration,
            event_seq: 0,
            #[cfg(feature = "metrics")]
            prometheus: None,
        })
    }

    /// Mirror engine events into a Prometheus registry.
    #[cfg(feature = "metrics")]
    pub fn with_metrics(mut self, metrics: Arc<ParkadeMetrics>) -> Self {
        for zone in self.zones.list_zones() {
            metrics.set_zone_occupied(&zone.id().to_string(), zone.occupied());
        }
        self.prometheus = Some(metrics);
        self
    }

    fn record_event(&mut self, status: &'static str) {
        self.event_seq += 1;
        #[cfg(feature = "metrics")]
        if let Some(m) = &self.prometheus {
            m.record_request(status);
        }
        counter!("parkade_requests_total", "status" => status).increment(1);
    }

    fn publish_zone(&self, zone: ZoneId, occupied: u32) {
        #[cfg(feature = "metrics")]
        if let Some(m) = &self.prometheus {
            m.set_zone_occupied(&zone.to_string(), occupied);
        }
        gauge!("parkade_zone_occupied", "zone" => zone.to_string()).set(f64::from(occupied));
    }

    /// Submit a new parking request in state `Requested`.
    ///
    /// # Errors
    /// `InvalidArgument` for a blank vehicle id, unknown zone or negative time.
    #[tracing::instrument(skip(self))]
    pub fn submit_request(
        &mut self,
        vehicle_id: &str,
        zone_id: ZoneId,
        request_time: TimeUnit,
    ) -> Result<RequestId> {
        let id = self
            .ledger
            .create(&self.zones, vehicle_id, zone_id, request_time)
            .map_err(|e| rejected("submit", None, e))?
            .id;

        self.analytics.record_submitted();
        self.record_event("submitted");
        tracing::info!(
            request_id = %id,
            vehicle_id = %vehicle_id.trim(),
            zone_id = %zone_id,
            request_time,
            "Request created"
        );
        Ok(id)
    }

    /// Assign a zone and nominal slot to a `Requested` request.
    ///
    /// Occupancy is not touched here; it only moves when the slot is occupied.
    ///
    /// # Errors
    /// `RequestNotFound`, `IllegalTransition` if not `Requested`, `NoCapacity`
    /// if every zone is full (the request stays `Requested` and can be retried).
    #[tracing::instrument(skip(self, id), fields(request_id = %id))]
    pub fn allocate(&mut self, id: RequestId) -> Result<AllocationResult> {
        let request = self
            .ledger
            .get(id)
            .map_err(|e| rejected("allocate", Some(id), e))?;
        request
            .ensure_transition(LifecycleOp::Allocate)
            .map_err(|e| rejected("allocate", Some(id), e))?;

        let Some(allocation) = plan_allocation(&self.zones, request.requested_zone) else {
            return Err(rejected("allocate", Some(id), ParkadeError::NoCapacity(id)));
        };
        let requested_zone = request.requested_zone;
        let vehicle_id = request.vehicle_id.clone();

        self.ledger.get_mut(id)?.mark_allocated(allocation)?;
        if allocation.cross_zone {
            self.analytics.record_cross_zone();
        }
        self.journal.push(journal::JournalEntry {
            request_id: id,
            vehicle_id,
            allocation,
        });

        if allocation.cross_zone {
            counter!("parkade_allocations_total", "kind" => "cross_zone").increment(1);
            tracing::info!(
                request_id = %id,
                requested_zone = %requested_zone,
                zone = %allocation.zone,
                slot = allocation.slot,
                penalty = self.pricing.cross_zone_penalty,
                "Request cross-allocated"
            );
        } else {
            counter!("parkade_allocations_total", "kind" => "same_zone").increment(1);
            tracing::info!(
                request_id = %id,
                zone = %allocation.zone,
                slot = allocation.slot,
                "Request allocated"
            );
        }
        self.record_event("allocated");

        Ok(allocation.into())
    }

    /// Park the vehicle: `Allocated` → `Occupied`, taking one slot in the
    /// allocated zone.
    ///
    /// # Errors
    /// `RequestNotFound`, `IllegalTransition` if not `Allocated`, `InvalidState`
    /// if the allocated zone filled up since allocation.
    #[tracing::instrument(skip(self, id), fields(request_id = %id))]
    pub fn occupy(&mut self, id: RequestId) -> Result<()> {
        let request = self
            .ledger
            .get(id)
            .map_err(|e| rejected("occupy", Some(id), e))?;
        request
            .ensure_transition(LifecycleOp::Occupy)
            .map_err(|e| rejected("occupy", Some(id), e))?;

        let zone_id = match request.allocated_zone() {
            Some(zone) => zone,
            None => {
                return Err(rejected(
                    "occupy",
                    Some(id),
                    ParkadeError::InvalidState(format!(
                        "request {} is allocated without a zone",
                        id
                    )),
                ));
            }
        };
        let vehicle_id = request.vehicle_id.clone();

        let occupied = self
            .zones
            .increment_occupancy(zone_id)
            .map_err(|e| rejected("occupy", Some(id), e))?;
        self.record_event("occupied");
        let seq = self.event_seq;
        self.ledger.get_mut(id)?.mark_occupied(seq)?;
        self.publish_zone(zone_id, occupied);

        tracing::info!(
            request_id = %id,
            vehicle_id = %vehicle_id,
            zone = %zone_id,
            occupied,
            "Slot occupied"
        );
        Ok(())
    }

    /// Cancel a request that has not been parked yet.
    ///
    /// # Errors
    /// `RequestNotFound`, `IllegalTransition` from `Occupied`, `Released` or
    /// `Cancelled`.
    #[tracing::instrument(skip(self, id), fields(request_id = %id))]
    pub fn cancel(&mut self, id: RequestId) -> Result<()> {
        let request = self
            .ledger
            .get_mut(id)
            .map_err(|e| rejected("cancel", Some(id), e))?;
        let previous = request
            .mark_cancelled()
            .map_err(|e| rejected("cancel", Some(id), e))?;
        let vehicle_id = request.vehicle_id.clone();

        self.analytics.record_cancelled();
        self.record_event("cancelled");
        tracing::info!(
            request_id = %id,
            vehicle_id = %vehicle_id,
            was = %previous,
            "Request cancelled"
        );
        Ok(())
    }

    /// Release an occupied slot and price the stay.
    ///
    /// Duration is `release_time - request_time`; cost is
    /// `duration * per_unit_rate` plus the cross-zone penalty when applicable.
    ///
    /// # Errors
    /// `InvalidArgument` if `release_time` is missing or negative (or before the
    /// request time when negative durations are rejected), `RequestNotFound`,
    /// `IllegalTransition` if not `Occupied`.
    #[tracing::instrument(skip(self, id), fields(request_id = %id))]
    pub fn release(
        &mut self,
        id: RequestId,
        release_time: Option<TimeUnit>,
    ) -> Result<ReleaseReceipt> {
        let release_time = match release_time {
            Some(t) if t >= 0 => t,
            Some(t) => {
                return Err(rejected(
                    "release",
                    Some(id),
                    ParkadeError::InvalidArgument(format!(
                        "release time must be non-negative, got {}",
                        t
                    )),
                ));
            }
            None => {
                return Err(rejected(
                    "release",
                    Some(id),
                    ParkadeError::InvalidArgument("release time is required".to_string()),
                ));
            }
        };

        let request = self
            .ledger
            .get(id)
            .map_err(|e| rejected("release", Some(id), e))?;
        request
            .ensure_transition(LifecycleOp::Release)
            .map_err(|e| rejected("release", Some(id), e))?;

        let Some(allocation) = request.allocation else {
            return Err(rejected(
                "release",
                Some(id),
                ParkadeError::InvalidState(format!("request {} is occupied without a zone", id)),
            ));
        };

        let duration = release_time - request.request_time;
        if duration < 0 {
            if self.reject_negative_duration {
                return Err(rejected(
                    "release",
                    Some(id),
                    ParkadeError::InvalidArgument(format!(
                        "release time {} is before request time {}",
                        release_time, request.request_time
                    )),
                ));
            }
            tracing::warn!(
                request_id = %id,
                release_time,
                request_time = request.request_time,
                "Release before request time, pricing negative duration"
            );
        }
        let cost = self.pricing.cost(duration, allocation.cross_zone);
        let vehicle_id = request.vehicle_id.clone();

        let occupied = self.zones.decrement_occupancy(allocation.zone)?;
        self.ledger.get_mut(id)?.mark_released(release_time, cost)?;
        self.analytics
            .record_release(cost, self.ledger.released_durations());
        self.record_event("released");
        self.publish_zone(allocation.zone, occupied);
        #[cfg(feature = "metrics")]
        if let Some(m) = &self.prometheus {
            m.record_release(duration, cost);
        }

        tracing::info!(
            request_id = %id,
            vehicle_id = %vehicle_id,
            zone = %allocation.zone,
            duration,
            cost,
            cross_zone = allocation.cross_zone,
            "Slot released"
        );
        Ok(ReleaseReceipt { duration, cost })
    }

    /// Undo the most recent allocation that is still undoable.
    ///
    /// Journal entries whose request has since been occupied, released or
    /// cancelled are discarded on the way down. The rolled-back request returns
    /// to `Requested` and can be allocated again.
    #[tracing::instrument(skip(self))]
    pub fn rollback_last_allocation(&mut self) -> Result<Option<RequestId>> {
        while let Some(entry) = self.journal.pop() {
            let request = self.ledger.get_mut(entry.request_id)?;
            if request.state != RequestState::Allocated
                || request.allocation != Some(entry.allocation)
            {
                tracing::debug!(
                    request_id = %entry.request_id,
                    state = %request.state,
                    "Discarding stale journal entry"
                );
                continue;
            }

            let undone = request.revert_allocation()?;
            if undone.cross_zone {
                self.analytics.undo_cross_zone();
            }
            self.record_event("rolled_back");
            tracing::info!(
                request_id = %entry.request_id,
                vehicle_id = %entry.vehicle_id,
                zone = %undone.zone,
                slot = undone.slot,
                "Allocation rolled back"
            );
            return Ok(Some(entry.request_id));
        }

        tracing::debug!("No allocation left to roll back");
        Ok(None)
    }

    /// Roll back up to `k` allocations, most recent first. Stops early when the
    /// journal runs out.
    pub fn rollback_last_allocations(&mut self, k: usize) -> Result<Vec<RequestId>> {
        let mut rolled_back = Vec::new();
        for _ in 0..k {
            match self.rollback_last_allocation()? {
                Some(id) => rolled_back.push(id),
                None => break,
            }
        }
        Ok(rolled_back)
    }

    /// Read-only view for display layers.
    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot::capture(&self.zones, &self.analytics)
    }

    pub fn request(&self, id: RequestId) -> Result<&Request> {
        self.ledger.get(id)
    }

    /// All requests in id order.
    pub fn requests(&self) -> impl Iterator<Item = &Request> {
        self.ledger.iter()
    }

    pub fn requests_in_state(&self, state: RequestState) -> impl Iterator<Item = &Request> {
        self.ledger.filter_by_state(state)
    }

    pub fn zones(&self) -> &ZoneRegistry {
        &self.zones
    }

    pub fn analytics(&self) -> &Analytics {
        &self.analytics
    }

    pub fn pricing(&self) -> &PricingPolicy {
        &self.pricing
    }

    pub fn journal(&self) -> &AllocationJournal {
        &self.journal
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::zone::ZoneSpec;

    fn engine(capacities: &[u32]) -> ParkingEngine {
        let roster = capacities
            .iter()
            .enumerate()
            .map(|(i, &cap)| ZoneSpec::new(i as u32 + 1, format!("Zone {}", i + 1), cap))
            .collect();
        ParkingEngine::new(EngineConfig::with_zones(roster)).unwrap()
    }

    fn parked(engine: &mut ParkingEngine, zone: u32, request_time: TimeUnit) -> RequestId {
        let id = engine
            .submit_request("CAR", ZoneId(zone), request_time)
            .unwrap();
        engine.allocate(id).unwrap();
        engine.occupy(id).unwrap();
        id
    }

    #[test]
    fn test_new_rejects_bad_config() {
        assert!(ParkingEngine::new(EngineConfig::with_zones(vec![])).is_err());
        assert!(
            ParkingEngine::new(
                EngineConfig::default().pricing(PricingPolicy::new(f64::NAN, 0.0))
            )
            .is_err()
        );
    }

    #[test_log::test]
    fn test_allocation_does_not_touch_occupancy() {
        let mut engine = engine(&[2]);
        let id = engine.submit_request("CAR-1", ZoneId(1), 0).unwrap();
        let result = engine.allocate(id).unwrap();

        assert_eq!(result.zone, ZoneId(1));
        assert_eq!(result.slot, 1);
        assert_eq!(engine.zones().find_zone(ZoneId(1)).unwrap().occupied(), 0);

        engine.occupy(id).unwrap();
        assert_eq!(engine.zones().find_zone(ZoneId(1)).unwrap().occupied(), 1);
        assert_eq!(engine.request(id).unwrap().occupied_at, Some(3));
    }

    #[test]
    fn test_no_capacity_leaves_request_retryable() {
        let mut engine = engine(&[1]);
        parked(&mut engine, 1, 0);

        let waiting = engine.submit_request("CAR-2", ZoneId(1), 1).unwrap();
        assert!(matches!(
            engine.allocate(waiting),
            Err(ParkadeError::NoCapacity(id)) if id == waiting
        ));
        assert_eq!(engine.request(waiting).unwrap().state, RequestState::Requested);
        assert_eq!(engine.request(waiting).unwrap().allocation, None);

        engine.release(RequestId(1), Some(4)).unwrap();
        let result = engine.allocate(waiting).unwrap();
        assert!(!result.cross_zone);
    }

    #[test]
    fn test_occupy_full_zone_is_rejected_without_mutation() {
        // Two allocations into a one-slot zone share the nominal slot number.
        let mut engine = engine(&[1]);
        let first = engine.submit_request("A", ZoneId(1), 0).unwrap();
        let second = engine.submit_request("B", ZoneId(1), 0).unwrap();
        assert_eq!(engine.allocate(first).unwrap().slot, 1);
        assert_eq!(engine.allocate(second).unwrap().slot, 1);

        engine.occupy(first).unwrap();
        assert!(matches!(
            engine.occupy(second),
            Err(ParkadeError::InvalidState(_))
        ));
        assert_eq!(engine.request(second).unwrap().state, RequestState::Allocated);
        assert_eq!(engine.zones().find_zone(ZoneId(1)).unwrap().occupied(), 1);
    }

    #[test]
    fn test_release_requires_time() {
        let mut engine = engine(&[1]);
        let id = parked(&mut engine, 1, 0);
        assert!(matches!(
            engine.release(id, None),
            Err(ParkadeError::InvalidArgument(_))
        ));
        assert!(matches!(
            engine.release(id, Some(-1)),
            Err(ParkadeError::InvalidArgument(_))
        ));
        assert_eq!(engine.request(id).unwrap().state, RequestState::Occupied);
        assert_eq!(engine.analytics().completed_requests, 0);
    }

    #[test_log::test]
    fn test_negative_duration_is_priced_by_default() {
        let mut engine = engine(&[1]);
        let id = parked(&mut engine, 1, 10);
        let receipt = engine.release(id, Some(7)).unwrap();
        assert_eq!(receipt.duration, -3);
        assert_eq!(receipt.cost, -30.0);
        assert_eq!(engine.analytics().average_duration, -3.0);
    }

    #[test]
    fn test_negative_duration_can_be_rejected() {
        let config = EngineConfig {
            reject_negative_duration: true,
            ..EngineConfig::with_zones(vec![ZoneSpec::new(1, "A", 1)])
        };
        let mut engine = ParkingEngine::new(config).unwrap();
        let id = parked(&mut engine, 1, 10);

        assert!(matches!(
            engine.release(id, Some(7)),
            Err(ParkadeError::InvalidArgument(_))
        ));
        assert_eq!(engine.zones().find_zone(ZoneId(1)).unwrap().occupied(), 1);
        assert_eq!(engine.request(id).unwrap().state, RequestState::Occupied);
    }

    #[test]
    fn test_cancel_allocated_frees_nothing() {
        let mut engine = engine(&[1]);
        let id = engine.submit_request("A", ZoneId(1), 0).unwrap();
        engine.allocate(id).unwrap();
        engine.cancel(id).unwrap();

        assert_eq!(engine.request(id).unwrap().state, RequestState::Cancelled);
        assert_eq!(engine.zones().find_zone(ZoneId(1)).unwrap().occupied(), 0);
        assert_eq!(engine.analytics().cancelled_requests, 1);
        // Allocation details are kept for audit.
        assert_eq!(engine.request(id).unwrap().allocated_slot(), Some(1));
    }

    #[test_log::test]
    fn test_rollback_restores_requested_and_cross_zone_count() {
        let mut engine = engine(&[1, 1]);
        parked(&mut engine, 1, 0);
        let spill = engine.submit_request("B", ZoneId(1), 0).unwrap();
        assert!(engine.allocate(spill).unwrap().cross_zone);
        assert_eq!(engine.analytics().cross_zone_allocations, 1);

        assert_eq!(engine.rollback_last_allocation().unwrap(), Some(spill));
        let request = engine.request(spill).unwrap();
        assert_eq!(request.state, RequestState::Requested);
        assert_eq!(request.allocation, None);
        assert_eq!(engine.analytics().cross_zone_allocations, 0);

        // The first request was occupied, so its entry is stale.
        assert_eq!(engine.rollback_last_allocation().unwrap(), None);
        assert!(engine.journal().is_empty());
    }

    #[test]
    fn test_cancelled_cross_zone_allocation_stays_counted() {
        let mut engine = engine(&[1, 1]);
        parked(&mut engine, 1, 0);
        let spill = engine.submit_request("B", ZoneId(1), 0).unwrap();
        assert!(engine.allocate(spill).unwrap().cross_zone);

        engine.cancel(spill).unwrap();
        assert_eq!(engine.analytics().cross_zone_allocations, 1);
        // Cancelled requests are stale for rollback, so nothing is undone.
        assert_eq!(engine.rollback_last_allocation().unwrap(), None);
        assert_eq!(engine.analytics().cross_zone_allocations, 1);
    }

    #[test]
    fn test_rollback_last_k() {
        let mut engine = engine(&[5]);
        let ids: Vec<RequestId> = (0..3)
            .map(|i| {
                let id = engine.submit_request("CAR", ZoneId(1), i).unwrap();
                engine.allocate(id).unwrap();
                id
            })
            .collect();
        engine.cancel(ids[1]).unwrap();

        let undone = engine.rollback_last_allocations(5).unwrap();
        assert_eq!(undone, vec![ids[2], ids[0]]);
        assert_eq!(engine.requests_in_state(RequestState::Requested).count(), 2);
        assert_eq!(engine.requests_in_state(RequestState::Cancelled).count(), 1);
    }

    #[test]
    fn test_journal_capacity_bounds_rollback() {
        let config = EngineConfig {
            journal_capacity: 1,
            ..EngineConfig::with_zones(vec![ZoneSpec::new(1, "A", 5)])
        };
        let mut engine = ParkingEngine::new(config).unwrap();
        let a = engine.submit_request("A", ZoneId(1), 0).unwrap();
        let b = engine.submit_request("B", ZoneId(1), 0).unwrap();
        engine.allocate(a).unwrap();
        engine.allocate(b).unwrap();

        assert_eq!(engine.rollback_last_allocations(2).unwrap(), vec![b]);
        assert_eq!(engine.request(a).unwrap().state, RequestState::Allocated);
    }

    #[test]
    fn test_snapshot_does_not_mutate() {
        let mut engine = engine(&[2, 2]);
        parked(&mut engine, 2, 0);
        let before = engine.snapshot();
        let again = engine.snapshot();
        assert_eq!(before, again);
        assert_eq!(before.peak_zone, Some(ZoneId(2)));
        assert_eq!(before.occupied_slots, 1);
        assert_eq!(before.analytics.total_requests, 1);
    }
}

#[cfg(all(test, feature = "metrics"))]
mod prometheus_tests {
    use super::*;
    use crate::domain::zone::ZoneSpec;
    use prometheus::Registry;
    use prometheus::proto::MetricFamily;

    fn family<'a>(families: &'a [MetricFamily], name: &str) -> &'a MetricFamily {
        families
            .iter()
            .find(|f| f.get_name() == name)
            .unwrap_or_else(|| panic!("{} metric not found", name))
    }

    fn labelled(registry: &Registry, name: &str, label: &str, value: &str) -> f64 {
        let families = registry.gather();
        let metric = family(&families, name)
            .get_metric()
            .iter()
            .find(|m| {
                m.get_label()
                    .iter()
                    .any(|l| l.get_name() == label && l.get_value() == value)
            })
            .unwrap_or_else(|| panic!("{}{{{}={}}} not found", name, label, value))
            .clone();
        if metric.has_counter() {
            metric.get_counter().get_value()
        } else {
            metric.get_gauge().get_value()
        }
    }

    #[test_log::test]
    fn test_lifecycle_mirrored_into_registry() {
        let registry = Registry::new();
        let metrics = Arc::new(ParkadeMetrics::new(registry.clone()).unwrap());
        let mut engine =
            ParkingEngine::new(EngineConfig::with_zones(vec![ZoneSpec::new(1, "A", 2)]))
                .unwrap()
                .with_metrics(metrics);
        assert_eq!(labelled(&registry, "parkade_zone_occupied", "zone", "1"), 0.0);

        let id = engine.submit_request("CAR", ZoneId(1), 0).unwrap();
        engine.allocate(id).unwrap();
        engine.occupy(id).unwrap();
        assert_eq!(labelled(&registry, "parkade_zone_occupied", "zone", "1"), 1.0);

        engine.release(id, Some(5)).unwrap();
        assert_eq!(labelled(&registry, "parkade_zone_occupied", "zone", "1"), 0.0);

        for status in ["submitted", "allocated", "occupied", "released"] {
            assert_eq!(
                labelled(&registry, "parkade_requests_total", "status", status),
                1.0,
                "status {}",
                status
            );
        }

        let families = registry.gather();
        let revenue = family(&families, "parkade_revenue");
        assert_eq!(revenue.get_metric()[0].get_gauge().get_value(), 50.0);
        let durations = family(&families, "parkade_parking_duration_units");
        assert_eq!(
            durations.get_metric()[0].get_histogram().get_sample_count(),
            1
        );
    }
}
