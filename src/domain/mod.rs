//! Core domain types for the parkade engine.
//!
//! This module contains pure domain types with no engine wiring:
//! - Zones and the zone registry
//! - Request record and lifecycle state machine
//! - Pricing policy
//! - Analytics counters and snapshots

pub mod analytics;
pub mod pricing;
pub mod request;
pub mod zone;
