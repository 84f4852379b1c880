//! Planner configuration.
//!
//! Defaults match field usage (100 m check-in radius, overrides allowed
//! after confirmation). Values can come from TOML or the environment.

use std::env;

use serde::{Deserialize, Serialize};

use crate::error::{PlannerError, Result};
use crate::geo::DistanceUnit;
use crate::proximity::DEFAULT_CHECK_IN_RADIUS_M;
use crate::visit::OverridePolicy;

const ENV_CHECK_IN_RADIUS: &str = "FIELD_PLANNER_CHECK_IN_RADIUS_M";
const ENV_OVERRIDE_POLICY: &str = "FIELD_PLANNER_OVERRIDE_POLICY";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Geofence radius for check-in, in meters.
    pub check_in_radius_m: f64,
    pub override_policy: OverridePolicy,
    /// Unit for route summary display.
    pub summary_unit: DistanceUnit,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            check_in_radius_m: DEFAULT_CHECK_IN_RADIUS_M,
            override_policy: OverridePolicy::default(),
            summary_unit: DistanceUnit::Kilometers,
        }
    }
}

impl PlannerConfig {
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(source).map_err(|err| PlannerError::Config(err.message().to_string()))?;
        config.validate()
    }

    /// Defaults overridden by `FIELD_PLANNER_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_CHECK_IN_RADIUS) {
            config.check_in_radius_m = raw.trim().parse().map_err(|_| {
                PlannerError::Config(format!("{ENV_CHECK_IN_RADIUS}: not a number: {raw:?}"))
            })?;
        }

        if let Some(raw) = lookup(ENV_OVERRIDE_POLICY) {
            config.override_policy = match raw.trim().to_ascii_lowercase().as_str() {
                "allow" | "allow_with_confirmation" => OverridePolicy::AllowWithConfirmation,
                "deny" => OverridePolicy::Deny,
                _ => {
                    return Err(PlannerError::Config(format!(
                        "{ENV_OVERRIDE_POLICY}: unknown policy {raw:?}"
                    )));
                }
            };
        }

        config.validate()
    }

    fn validate(self) -> Result<Self> {
        if !self.check_in_radius_m.is_finite() || self.check_in_radius_m < 0.0 {
            return Err(PlannerError::Config(format!(
                "check_in_radius_m must be a non-negative number, got {}",
                self.check_in_radius_m
            )));
        }
        Ok(self)
    }
}
