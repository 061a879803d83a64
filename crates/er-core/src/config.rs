//! Engine configuration.

use std::time::Duration;

use crate::{CoreError, CoreResult};

/// Every tunable of a dispatch run.
///
/// Built by the application (the console binary fills it from CLI flags) and
/// validated once before the engine is constructed.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DispatchConfig {
    /// Root seed for traffic randomness.  The same seed and incident list
    /// always produce identical traffic factors.
    pub seed: u64,

    /// Upper bound on one routing call, in milliseconds.  Expiry is reported
    /// as "no route available".
    pub route_timeout_ms: u64,

    /// Inclusive lower bound of the per-step traffic multiplier.
    pub traffic_min: f64,

    /// Inclusive upper bound of the per-step traffic multiplier.
    pub traffic_max: f64,

    /// Radius of the resource proximity index, in kilometres.
    pub proximity_threshold_km: f64,

    /// Base URL of the OSRM routing server.
    pub osrm_base_url: String,

    /// OSRM routing profile (`driving`, `cycling`, …).
    pub osrm_profile: String,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            seed:                   42,
            route_timeout_ms:       10_000,
            traffic_min:            0.8,
            traffic_max:            1.2,
            proximity_threshold_km: 20.0,
            osrm_base_url:          "http://router.project-osrm.org".to_owned(),
            osrm_profile:           "driving".to_owned(),
        }
    }
}

impl DispatchConfig {
    #[inline]
    pub fn route_timeout(&self) -> Duration {
        Duration::from_millis(self.route_timeout_ms)
    }

    /// Reject values the engine cannot run with.
    pub fn validate(&self) -> CoreResult<()> {
        if self.route_timeout_ms == 0 {
            return Err(CoreError::Config("route_timeout_ms must be positive".into()));
        }
        if !(self.traffic_min > 0.0 && self.traffic_min <= self.traffic_max) {
            return Err(CoreError::Config(format!(
                "traffic range [{}, {}] must be positive and non-empty",
                self.traffic_min, self.traffic_max
            )));
        }
        if !(self.proximity_threshold_km > 0.0) {
            return Err(CoreError::Config("proximity_threshold_km must be positive".into()));
        }
        Ok(())
    }
}
