//! Pricing policy.

use serde::{Deserialize, Serialize};

use crate::domain::request::TimeUnit;
use crate::error::{ParkadeError, Result};

/// Immutable pricing applied when a request is released.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingPolicy {
    /// Cost per time unit parked
    pub per_unit_rate: f64,
    /// Flat surcharge applied once when the allocation crossed zones
    pub cross_zone_penalty: f64,
}

impl Default for PricingPolicy {
    fn default() -> Self {
        Self {
            per_unit_rate: 10.0,
            cross_zone_penalty: 50.0,
        }
    }
}

impl PricingPolicy {
    pub fn new(per_unit_rate: f64, cross_zone_penalty: f64) -> Self {
        Self {
            per_unit_rate,
            cross_zone_penalty,
        }
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if !self.per_unit_rate.is_finite() || !self.cross_zone_penalty.is_finite() {
            return Err(ParkadeError::InvalidArgument(
                "pricing values must be finite".to_string(),
            ));
        }
        Ok(())
    }

    /// `duration * per_unit_rate`, plus the penalty for cross-zone allocations.
    /// Negative durations are priced as-is.
    pub fn cost(&self, duration: TimeUnit, cross_zone: bool) -> f64 {
        let base = duration as f64 * self.per_unit_rate;
        if cross_zone {
            base + self.cross_zone_penalty
        } else {
            base
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cross_zone_penalty_applied_once() {
        let pricing = PricingPolicy::new(10.0, 50.0);
        assert_eq!(pricing.cost(5, true), 100.0);
        assert_eq!(pricing.cost(5, false), 50.0);
        assert_eq!(pricing.cost(0, true), 50.0);
    }

    #[test]
    fn test_negative_duration_is_not_clamped() {
        let pricing = PricingPolicy::default();
        assert_eq!(pricing.cost(-2, false), -20.0);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let pricing: PricingPolicy = serde_json::from_str(r#"{"per_unit_rate": 2.5}"#).unwrap();
        assert_eq!(pricing.per_unit_rate, 2.5);
        assert_eq!(pricing.cross_zone_penalty, 50.0);
    }

    #[test]
    fn test_non_finite_rates_rejected() {
        assert!(PricingPolicy::new(f64::NAN, 0.0).validate().is_err());
        assert!(PricingPolicy::new(1.0, f64::INFINITY).validate().is_err());
        assert!(PricingPolicy::default().validate().is_ok());
    }
}
