//! Routing and annotation error types.

use std::time::Duration;

use thiserror::Error;

/// Failure of a single routing-service call.
#[derive(Debug, Error)]
pub enum RoutingError {
    #[error("routing call exceeded {0:?}")]
    Timeout(Duration),

    #[error("routing transport error: {0}")]
    Transport(String),

    #[error("routing service answered HTTP {0}")]
    Status(u16),

    #[error("malformed routing response: {0}")]
    Decode(#[from] serde_json::Error),
}

pub type RoutingResult<T> = Result<T, RoutingError>;

/// Why a matched resource ended up without an itinerary.
#[derive(Debug, Error)]
pub enum NoRouteReason {
    #[error("no routes available in the response")]
    NoRoutes,

    #[error("no legs available in the route")]
    NoLegs,

    #[error("no steps available in the route leg")]
    NoSteps,

    #[error(transparent)]
    Service(#[from] RoutingError),
}

/// Errors produced while turning a route into an itinerary.
#[derive(Debug, Error)]
pub enum AnnotateError {
    /// Recoverable: the resource is still dispatched, just without a path.
    #[error("no route available: {0}")]
    NoRoute(#[from] NoRouteReason),

    /// Internal consistency failure: one factor is required per step.
    #[error("traffic factor count {factors} does not match route step count {steps}")]
    FactorMismatch { steps: usize, factors: usize },

    /// A traffic model produced a factor that cannot scale a duration.
    #[error("traffic factor {factor} for step {step} is not a positive finite number")]
    InvalidFactor { step: usize, factor: f64 },
}

pub type AnnotateResult<T> = Result<T, AnnotateError>;
