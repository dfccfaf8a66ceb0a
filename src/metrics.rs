//! Prometheus metrics for parking engine monitoring.
//!
//! The engine always emits lightweight counters through the `metrics` facade.
//! This module adds an optional Prometheus registry for deployments that scrape
//! the engine directly:
//! - **Gauges**: point-in-time state (occupied slots per zone, revenue)
//! - **Counters**: cumulative totals (requests by lifecycle status)
//! - **Histograms**: distributions (parking duration in time units)

#[cfg(feature = "metrics")]
use prometheus::{CounterVec, Gauge, GaugeVec, Histogram, HistogramOpts, Opts, Registry};

#[cfg(feature = "metrics")]
use crate::error::Result;

/// Prometheus metrics registry for the parking engine.
#[cfg(feature = "metrics")]
#[derive(Clone, Debug)]
pub struct ParkadeMetrics {
    registry: Registry,

    // Gauges (point-in-time state)
    zone_occupied: GaugeVec,
    revenue: Gauge,

    // Counters (cumulative totals)
    requests_total: CounterVec,

    // Histograms (distributions)
    parking_duration_units: Histogram,
}

#[cfg(feature = "metrics")]
impl ParkadeMetrics {
    /// Create a new ParkadeMetrics instance with the given registry.
    ///
    /// # Errors
    ///
    /// Returns an error if metrics fail to register (e.g., duplicate registration).
    pub fn new(registry: Registry) -> Result<Self> {
        let zone_occupied = GaugeVec::new(
            Opts::new(
                "parkade_zone_occupied",
                "Number of occupied slots per zone",
            ),
            &["zone"],
        )
        .map_err(|e| anyhow::anyhow!("Failed to create zone_occupied gauge: {}", e))?;

        // Gauge rather than counter: a release before the request time prices negative.
        let revenue = Gauge::with_opts(Opts::new(
            "parkade_revenue",
            "Cumulative revenue from released requests",
        ))
        .map_err(|e| anyhow::anyhow!("Failed to create revenue gauge: {}", e))?;

        let requests_total = CounterVec::new(
            Opts::new(
                "parkade_requests_total",
                "Total number of request lifecycle events by status",
            ),
            &["status"],
        )
        .map_err(|e| anyhow::anyhow!("Failed to create requests_total counter: {}", e))?;

        let parking_duration_units = Histogram::with_opts(
            HistogramOpts::new(
                "parkade_parking_duration_units",
                "Parking duration of released requests in time units",
            )
            .buckets(vec![1.0, 2.0, 5.0, 10.0, 20.0, 50.0, 100.0, 200.0, 500.0]),
        )
        .map_err(|e| anyhow::anyhow!("Failed to create parking_duration histogram: {}", e))?;

        registry
            .register(Box::new(zone_occupied.clone()))
            .map_err(|e| anyhow::anyhow!("Failed to register zone_occupied: {}", e))?;
        registry
            .register(Box::new(revenue.clone()))
            .map_err(|e| anyhow::anyhow!("Failed to register revenue: {}", e))?;
        registry
            .register(Box::new(requests_total.clone()))
            .map_err(|e| anyhow::anyhow!("Failed to register requests_total: {}", e))?;
        registry
            .register(Box::new(parking_duration_units.clone()))
            .map_err(|e| anyhow::anyhow!("Failed to register parking_duration_units: {}", e))?;

        Ok(Self {
            registry,
            zone_occupied,
            revenue,
            requests_total,
            parking_duration_units,
        })
    }

    /// Get the underlying Prometheus registry.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Count a lifecycle event. `status` should be a low-cardinality value
    /// such as "submitted", "allocated" or "rejected".
    pub fn record_request(&self, status: &str) {
        self.requests_total.with_label_values(&[status]).inc();
    }

    pub fn set_zone_occupied(&self, zone: &str, occupied: u32) {
        self.zone_occupied
            .with_label_values(&[zone])
            .set(f64::from(occupied));
    }

    /// Record a release: duration histogram and revenue. The status counter is
    /// bumped separately through [`record_request`](Self::record_request).
    pub fn record_release(&self, duration: i64, cost: f64) {
        self.parking_duration_units.observe(duration as f64);
        self.revenue.add(cost);
    }
}
