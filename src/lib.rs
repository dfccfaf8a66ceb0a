//! Parking-slot allocation and lifecycle engine.
//!
//! This crate tracks parking requests through a strict lifecycle
//! (requested, allocated, occupied, released or cancelled), assigns slots
//! across a fixed roster of zones with cross-zone spillover when the requested
//! zone is full, prices completed stays and keeps running utilization and
//! revenue analytics.
//!
//! All state lives in a [`ParkingEngine`]; wrap it in a [`SharedEngine`] to use
//! it from several threads.

pub mod domain;
pub mod engine;
pub mod error;
pub mod ledger;
pub mod metrics;
pub mod request;

// Re-export commonly used types
pub use domain::analytics::{Analytics, EngineSnapshot, ZoneView};
pub use domain::pricing::PricingPolicy;
pub use domain::zone::{Zone, ZoneId, ZoneRegistry, ZoneSpec};
pub use engine::{
    AllocationResult, EngineConfig, ParkingEngine, ReleaseReceipt, SharedEngine,
};
pub use error::{ErrorKind, ParkadeError, Result};
pub use request::*;

#[cfg(feature = "metrics")]
pub use crate::metrics::ParkadeMetrics;
