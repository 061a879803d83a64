//! Traffic models: per-step duration multipliers.

use er_core::{DispatchConfig, DispatchRng};

use crate::RouteStep;

/// Supplies one multiplicative congestion factor per route step.
///
/// Randomness comes from the caller's `DispatchRng` so results are
/// reproducible for a given seed; deterministic models simply ignore it.
pub trait TrafficModel: Send + Sync {
    fn factor_for(&self, step: &RouteStep, rng: &mut DispatchRng) -> f64;
}

/// Mock congestion: factors drawn uniformly from `[min, max]`.
#[derive(Clone, Copy, Debug)]
pub struct UniformTraffic {
    pub min: f64,
    pub max: f64,
}

impl UniformTraffic {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn from_config(config: &DispatchConfig) -> Self {
        Self::new(config.traffic_min, config.traffic_max)
    }
}

impl Default for UniformTraffic {
    fn default() -> Self {
        Self::new(0.8, 1.2)
    }
}

impl TrafficModel for UniformTraffic {
    fn factor_for(&self, _step: &RouteStep, rng: &mut DispatchRng) -> f64 {
        rng.gen_range(self.min..=self.max)
    }
}

/// The same factor for every step.  `ConstantTraffic(1.0)` means free flow.
#[derive(Clone, Copy, Debug)]
pub struct ConstantTraffic(pub f64);

impl TrafficModel for ConstantTraffic {
    fn factor_for(&self, _step: &RouteStep, _rng: &mut DispatchRng) -> f64 {
        self.0
    }
}
