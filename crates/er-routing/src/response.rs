//! Route response model.
//!
//! Mirrors the subset of the OSRM `route` response the engine reads:
//!
//! ```text
//! { "routes": [ { "legs": [ { "steps": [
//!     { "maneuver": { "instruction": "..." }, "distance": 120.5, "duration": 14.2 }
//! ] } ] } ] }
//! ```
//!
//! Every field is optional on the wire.  Missing nested fields decode to their
//! defaults instead of failing the whole response.

use serde::{Deserialize, Serialize};

use crate::RoutingResult;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RouteResponse {
    #[serde(default)]
    pub routes: Vec<Route>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Route {
    #[serde(default)]
    pub legs: Vec<Leg>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Leg {
    #[serde(default)]
    pub steps: Vec<RawStep>,
}

/// One step exactly as the routing service sent it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RawStep {
    #[serde(default)]
    pub maneuver: Option<Maneuver>,
    #[serde(default)]
    pub distance: Option<f64>,
    #[serde(default)]
    pub duration: Option<f64>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Maneuver {
    #[serde(default)]
    pub instruction: Option<String>,
}

impl RouteResponse {
    /// Decode a JSON body.
    pub fn from_json(body: &str) -> RoutingResult<Self> {
        Ok(serde_json::from_str(body)?)
    }

    /// A response holding one route with one leg made of `steps`.
    pub fn single_leg(steps: Vec<RawStep>) -> Self {
        Self { routes: vec![Route { legs: vec![Leg { steps }] }] }
    }
}

// ── RouteStep ─────────────────────────────────────────────────────────────────

/// A route step with defaults applied: empty instruction, zero distance and
/// zero duration when the service left them out.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RouteStep {
    pub instruction: String,
    /// Metres.
    pub distance_m:  f64,
    /// Seconds.
    pub duration_s:  f64,
}

impl RouteStep {
    pub fn new(instruction: impl Into<String>, distance_m: f64, duration_s: f64) -> Self {
        Self { instruction: instruction.into(), distance_m, duration_s }
    }
}

impl From<RawStep> for RouteStep {
    fn from(raw: RawStep) -> Self {
        Self {
            instruction: raw.maneuver.and_then(|m| m.instruction).unwrap_or_default(),
            distance_m:  raw.distance.unwrap_or(0.0),
            duration_s:  raw.duration.unwrap_or(0.0),
        }
    }
}

impl From<RouteStep> for RawStep {
    fn from(step: RouteStep) -> Self {
        Self {
            maneuver: Some(Maneuver { instruction: Some(step.instruction) }),
            distance: Some(step.distance_m),
            duration: Some(step.duration_s),
        }
    }
}
