//! Turn a routing answer into a traffic-adjusted itinerary.

use er_core::{DispatchRng, GeoPoint};

use crate::{
    AnnotateError, AnnotateResult, AnnotatedStep, Itinerary, NoRouteReason, RouteResponse,
    RouteStep, RoutingService, TrafficModel,
};

/// Requests a route and applies a traffic model to it.
///
/// Stateless apart from its two collaborators, so one annotator can serve
/// many concurrent dispatches.
pub struct RouteAnnotator<S, T> {
    service: S,
    traffic: T,
}

impl<S: RoutingService, T: TrafficModel> RouteAnnotator<S, T> {
    pub fn new(service: S, traffic: T) -> Self {
        Self { service, traffic }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn traffic(&self) -> &T {
        &self.traffic
    }

    /// Route from `origin` to `destination` and annotate every step.
    ///
    /// Any routing failure, and any response without a first route, leg or
    /// step, is reported as [`AnnotateError::NoRoute`].
    pub fn annotate(
        &self,
        origin:      GeoPoint,
        destination: GeoPoint,
        rng:         &mut DispatchRng,
    ) -> AnnotateResult<Itinerary> {
        let response = self
            .service
            .get_route(origin, destination)
            .map_err(NoRouteReason::from)?;
        let steps = first_leg_steps(response)?;

        let factors: Vec<f64> = steps
            .iter()
            .map(|s| self.traffic.factor_for(s, rng))
            .collect();

        let itinerary = annotate_steps(steps, &factors)?;
        tracing::debug!(
            steps = itinerary.len(),
            distance_m = itinerary.distance_m(),
            original_s = itinerary.original_duration_s,
            adjusted_s = itinerary.adjusted_duration_s,
            "route annotated"
        );
        Ok(itinerary)
    }
}

/// Steps of `routes[0].legs[0]`, with field defaults applied.
fn first_leg_steps(response: RouteResponse) -> Result<Vec<RouteStep>, NoRouteReason> {
    let route = response.routes.into_iter().next().ok_or(NoRouteReason::NoRoutes)?;
    let leg = route.legs.into_iter().next().ok_or(NoRouteReason::NoLegs)?;
    if leg.steps.is_empty() {
        return Err(NoRouteReason::NoSteps);
    }
    Ok(leg.steps.into_iter().map(RouteStep::from).collect())
}

/// Pair each step with its factor and aggregate durations.
///
/// Fails with [`AnnotateError::FactorMismatch`] unless there is exactly one
/// factor per step, and with [`AnnotateError::InvalidFactor`] for a factor
/// that is not positive and finite.
pub fn annotate_steps(steps: Vec<RouteStep>, factors: &[f64]) -> AnnotateResult<Itinerary> {
    if steps.len() != factors.len() {
        return Err(AnnotateError::FactorMismatch { steps: steps.len(), factors: factors.len() });
    }
    if let Some((step, &factor)) = factors
        .iter()
        .enumerate()
        .find(|&(_, f)| !(f.is_finite() && *f > 0.0))
    {
        return Err(AnnotateError::InvalidFactor { step, factor });
    }

    let mut original_duration_s = 0.0;
    let mut adjusted_duration_s = 0.0;
    let steps: Vec<AnnotatedStep> = steps
        .into_iter()
        .zip(factors)
        .map(|(step, &traffic_factor)| {
            let adjusted = step.duration_s * traffic_factor;
            original_duration_s += step.duration_s;
            adjusted_duration_s += adjusted;
            AnnotatedStep { step, traffic_factor, adjusted_duration_s: adjusted }
        })
        .collect();

    Ok(Itinerary { steps, original_duration_s, adjusted_duration_s })
}
