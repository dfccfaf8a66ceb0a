//! Engine configuration.

use serde::{Deserialize, Serialize};

use crate::domain::pricing::PricingPolicy;
use crate::domain::zone::ZoneSpec;
use crate::error::{ParkadeError, Result};

/// Default number of allocations kept for rollback.
pub const DEFAULT_JOURNAL_CAPACITY: usize = 1000;

/// Configuration for a [`ParkingEngine`](super::ParkingEngine).
///
/// Missing fields fall back to [`EngineConfig::default`], so a document that
/// only overrides pricing keeps the default zone roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Zone roster, in allocation scan order
    pub zones: Vec<ZoneSpec>,

    /// Pricing applied at release; fixed for the life of the engine
    pub pricing: PricingPolicy,

    /// Maximum number of allocations remembered for rollback. The oldest entry
    /// is dropped when the journal is full. Zero disables rollback.
    pub journal_capacity: usize,

    /// Reject releases whose time is before the request time instead of
    /// pricing the negative duration
    pub reject_negative_duration: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            zones: vec![
                ZoneSpec::new(1, "Zone 1", 10),
                ZoneSpec::new(2, "Zone 2", 8),
                ZoneSpec::new(3, "Zone 3", 6),
            ],
            pricing: PricingPolicy::default(),
            journal_capacity: DEFAULT_JOURNAL_CAPACITY,
            reject_negative_duration: false,
        }
    }
}

impl EngineConfig {
    /// Config with the given roster and default everything else.
    pub fn with_zones(zones: Vec<ZoneSpec>) -> Self {
        Self {
            zones,
            ..Default::default()
        }
    }

    pub fn pricing(mut self, pricing: PricingPolicy) -> Self {
        self.pricing = pricing;
        self
    }

    /// Parse a JSON document.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: EngineConfig = serde_json::from_str(json)?;
        Ok(config)
    }

    pub(crate) fn validate(&self) -> Result<()> {
        self.pricing.validate()?;
        if self.zones.is_empty() {
            return Err(ParkadeError::InvalidArgument(
                "config must declare at least one zone".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_roster() {
        let config = EngineConfig::default();
        let capacities: Vec<u32> = config.zones.iter().map(|z| z.capacity).collect();
        assert_eq!(capacities, vec![10, 8, 6]);
        assert_eq!(config.pricing.per_unit_rate, 10.0);
        assert_eq!(config.pricing.cross_zone_penalty, 50.0);
        assert_eq!(config.journal_capacity, DEFAULT_JOURNAL_CAPACITY);
        assert!(!config.reject_negative_duration);
    }

    #[test]
    fn test_from_json_partial_document() {
        let config = EngineConfig::from_json(
            r#"{
                "zones": [{"id": 1, "name": "A", "capacity": 1}, {"id": 2, "name": "B", "capacity": 1}],
                "pricing": {"per_unit_rate": 10, "cross_zone_penalty": 50}
            }"#,
        )
        .unwrap();
        assert_eq!(config.zones.len(), 2);
        assert_eq!(config.zones[1].name, "B");
        assert_eq!(config.journal_capacity, DEFAULT_JOURNAL_CAPACITY);
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(matches!(
            EngineConfig::from_json("zones: 3"),
            Err(ParkadeError::Serialization(_))
        ));
    }

    #[test]
    fn test_validate_empty_roster() {
        assert!(EngineConfig::with_zones(vec![]).validate().is_err());
    }
}
