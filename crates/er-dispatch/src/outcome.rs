//! What a dispatch run produces.

use er_core::{Incident, IncidentId, ResourceCategory, ResourceId};
use er_registry::ResourceNode;
use er_routing::{Eta, Itinerary, NoRouteReason};

use crate::DispatchError;

/// A resource claimed for an incident.
#[derive(Clone, Debug, PartialEq)]
pub struct Assignment {
    /// Snapshot of the resource at claim time (already flagged unavailable).
    pub resource:    ResourceNode,
    /// Straight-line distance to the incident, km.
    pub distance_km: f64,
}

/// A successful match with its traffic-annotated route.
#[derive(Clone, Debug, PartialEq)]
pub struct DispatchResult {
    pub resource_id:   ResourceId,
    pub resource_name: String,
    pub place:         String,
    pub distance_km:   f64,
    pub itinerary:     Itinerary,
}

impl DispatchResult {
    pub fn original_eta(&self) -> Eta {
        self.itinerary.original_eta()
    }

    pub fn adjusted_eta(&self) -> Eta {
        self.itinerary.adjusted_eta()
    }
}

/// How one incident was handled.
#[derive(Debug)]
pub enum DispatchOutcome {
    /// Resource assigned and route annotated.
    Dispatched(DispatchResult),

    /// Nothing of the required category was free.  The incident is dropped,
    /// not requeued.
    NoResourceAvailable { category: ResourceCategory },

    /// Resource assigned, but the routing service gave no usable route.
    /// The resource stays assigned.
    NoRouteAvailable { assignment: Assignment, reason: NoRouteReason },

    /// Internal error for this incident only; the run continues.
    Failed { assignment: Option<Assignment>, error: DispatchError },
}

impl DispatchOutcome {
    /// The resource this incident consumed, if any.
    pub fn assignment(&self) -> Option<&Assignment> {
        match self {
            DispatchOutcome::Dispatched(_) | DispatchOutcome::NoResourceAvailable { .. } => None,
            DispatchOutcome::NoRouteAvailable { assignment, .. } => Some(assignment),
            DispatchOutcome::Failed { assignment, .. } => assignment.as_ref(),
        }
    }

    pub fn resource_name(&self) -> Option<&str> {
        match self {
            DispatchOutcome::Dispatched(r) => Some(&r.resource_name),
            other => other.assignment().map(|a| a.resource.name.as_str()),
        }
    }

    pub fn itinerary(&self) -> Option<&Itinerary> {
        match self {
            DispatchOutcome::Dispatched(r) => Some(&r.itinerary),
            _ => None,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, DispatchOutcome::Failed { .. })
    }

    /// Short label used in logs and CSV output.
    pub fn kind(&self) -> &'static str {
        match self {
            DispatchOutcome::Dispatched(_)               => "dispatched",
            DispatchOutcome::NoResourceAvailable { .. } => "no_resource",
            DispatchOutcome::NoRouteAvailable { .. }    => "no_route",
            DispatchOutcome::Failed { .. }              => "failed",
        }
    }
}

/// One incident's outcome, in dispatch order.
#[derive(Debug)]
pub struct DispatchReport {
    pub incident_id: IncidentId,
    pub incident:    Incident,
    pub outcome:     DispatchOutcome,
}

/// Outcome counts for a run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub dispatched:  usize,
    pub no_resource: usize,
    pub no_route:    usize,
    pub failed:      usize,
}

impl RunSummary {
    pub fn record(&mut self, outcome: &DispatchOutcome) {
        match outcome {
            DispatchOutcome::Dispatched(_)               => self.dispatched += 1,
            DispatchOutcome::NoResourceAvailable { .. } => self.no_resource += 1,
            DispatchOutcome::NoRouteAvailable { .. }    => self.no_route += 1,
            DispatchOutcome::Failed { .. }              => self.failed += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.dispatched + self.no_resource + self.no_route + self.failed
    }
}

/// Everything `dispatch_all` produced.
#[derive(Debug, Default)]
pub struct DispatchRun {
    pub reports: Vec<DispatchReport>,
    pub summary: RunSummary,
}
