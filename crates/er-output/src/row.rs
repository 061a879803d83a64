//! Plain data rows written by output backends.

use er_dispatch::{DispatchOutcome, DispatchReport};

/// One row per handled incident.
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchRow {
    pub incident_id: u64,
    pub place:       String,
    pub severity:    &'static str,
    /// `dispatched`, `no_resource`, `no_route` or `failed`.
    pub outcome:     &'static str,
    /// Empty when no resource was assigned.
    pub resource:    String,
    pub distance_km: Option<f64>,
    pub steps:       usize,
    pub original_s:  Option<f64>,
    pub adjusted_s:  Option<f64>,
    /// Reason or error text for non-dispatched outcomes.
    pub detail:      String,
}

impl DispatchRow {
    pub fn from_report(report: &DispatchReport) -> Self {
        let outcome = &report.outcome;
        let itinerary = outcome.itinerary();
        let distance_km = match outcome {
            DispatchOutcome::Dispatched(r) => Some(r.distance_km),
            other => other.assignment().map(|a| a.distance_km),
        };
        let detail = match outcome {
            DispatchOutcome::Dispatched(_) => String::new(),
            DispatchOutcome::NoResourceAvailable { category } => format!("no available {category}"),
            DispatchOutcome::NoRouteAvailable { reason, .. } => reason.to_string(),
            DispatchOutcome::Failed { error, .. } => error.to_string(),
        };
        Self {
            incident_id: report.incident_id.0,
            place:       report.incident.place.clone(),
            severity:    report.incident.severity.as_str(),
            outcome:     outcome.kind(),
            resource:    outcome.resource_name().unwrap_or_default().to_owned(),
            distance_km,
            steps:       itinerary.map_or(0, |i| i.len()),
            original_s:  itinerary.map(|i| i.original_duration_s),
            adjusted_s:  itinerary.map(|i| i.adjusted_duration_s),
            detail,
        }
    }
}

/// One row per annotated route step.
#[derive(Debug, Clone, PartialEq)]
pub struct StepRow {
    pub incident_id:    u64,
    /// 1-based.
    pub step:           usize,
    pub instruction:    String,
    pub distance_m:     f64,
    pub duration_s:     f64,
    pub traffic_factor: f64,
    pub adjusted_s:     f64,
}

impl StepRow {
    /// Rows for every step of the report's itinerary; empty if it has none.
    pub fn from_report(report: &DispatchReport) -> Vec<Self> {
        let Some(itinerary) = report.outcome.itinerary() else {
            return Vec::new();
        };
        itinerary
            .steps
            .iter()
            .enumerate()
            .map(|(i, s)| StepRow {
                incident_id:    report.incident_id.0,
                step:           i + 1,
                instruction:    s.step.instruction.clone(),
                distance_m:     s.step.distance_m,
                duration_s:     s.step.duration_s,
                traffic_factor: s.traffic_factor,
                adjusted_s:     s.adjusted_duration_s,
            })
            .collect()
    }
}
