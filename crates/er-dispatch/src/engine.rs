//! The `DispatchEngine` and its run loop.

use er_core::{DispatchConfig, DispatchRng, Incident, IncidentId, ResourceId};
use er_queue::{IncidentQueue, QueuedIncident};
use er_registry::{RegistryResult, ResourceRegistry};
use er_routing::{AnnotateError, RouteAnnotator, RoutingService, TrafficModel};

use crate::{
    Assignment, DispatchError, DispatchMatcher, DispatchObserver, DispatchOutcome,
    DispatchReport, DispatchResult, DispatchRun, EngineResult,
};

/// Where the engine is in its run loop.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum EngineState {
    #[default]
    Idle,
    Draining,
    Matching,
    Annotating,
    Reporting,
}

/// A claimed (or unclaimable) incident waiting for its route.
struct Matched {
    queued: QueuedIncident,
    claim:  Result<Option<Assignment>, DispatchError>,
    rng:    DispatchRng,
}

/// Single-operator dispatch engine.
///
/// Owns the resource registry and the incident queue.  Resource state
/// persists across runs: a resource assigned in one `dispatch_all` stays
/// unavailable in the next unless [`release`](Self::release)d.
pub struct DispatchEngine<S, T> {
    config:    DispatchConfig,
    registry:  ResourceRegistry,
    queue:     IncidentQueue,
    matcher:   DispatchMatcher,
    annotator: RouteAnnotator<S, T>,
    /// Root of the per-incident traffic streams.
    rng:       DispatchRng,
    state:     EngineState,
}

impl<S: RoutingService, T: TrafficModel> DispatchEngine<S, T> {
    /// Validate `config` and build an idle engine.
    pub fn new(
        config:    DispatchConfig,
        registry:  ResourceRegistry,
        annotator: RouteAnnotator<S, T>,
    ) -> EngineResult<Self> {
        config.validate()?;
        Ok(Self {
            rng: DispatchRng::new(config.seed),
            config,
            registry,
            queue: IncidentQueue::new(),
            matcher: DispatchMatcher::new(),
            annotator,
            state: EngineState::Idle,
        })
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    pub fn registry(&self) -> &ResourceRegistry {
        &self.registry
    }

    pub fn annotator(&self) -> &RouteAnnotator<S, T> {
        &self.annotator
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    // ── Commands ──────────────────────────────────────────────────────────

    /// Queue an incident for the next `dispatch_all`.
    pub fn add_incident(&mut self, incident: Incident) -> IncidentId {
        tracing::debug!(place = %incident.place, severity = %incident.severity, "incident queued");
        self.queue.push(incident)
    }

    /// Return a resource to the pool.  `dispatch_all` never calls this.
    pub fn release(&mut self, resource: ResourceId) -> RegistryResult<()> {
        self.registry.mark_available(resource)?;
        tracing::info!(%resource, "resource released");
        Ok(())
    }

    /// Drain the queue, most severe first, reporting every outcome.
    ///
    /// Incidents are matched strictly in queue order and each claim is
    /// complete before the next incident is considered.  With the `parallel`
    /// feature the routing calls for the drained batch are then issued on
    /// Rayon; reports are still delivered in queue order.
    pub fn dispatch_all<O: DispatchObserver>(&mut self, observer: &mut O) -> DispatchRun {
        self.state = EngineState::Draining;
        observer.on_run_start(self.queue.len());
        tracing::info!(pending = self.queue.len(), "dispatch run started");

        let run = self.drain(observer);

        self.state = EngineState::Idle;
        tracing::info!(
            dispatched = run.summary.dispatched,
            no_resource = run.summary.no_resource,
            no_route = run.summary.no_route,
            failed = run.summary.failed,
            "dispatch run finished"
        );
        observer.on_run_end(&run.summary);
        run
    }

    // ── Run loop ──────────────────────────────────────────────────────────

    #[cfg(not(feature = "parallel"))]
    fn drain<O: DispatchObserver>(&mut self, observer: &mut O) -> DispatchRun {
        let mut run = DispatchRun::default();
        while let Some(queued) = self.queue.pop() {
            let matched = self.match_one(queued, observer);
            self.state = EngineState::Annotating;
            let report = self.annotate_one(matched);
            self.report(report, observer, &mut run);
        }
        run
    }

    #[cfg(feature = "parallel")]
    fn drain<O: DispatchObserver>(&mut self, observer: &mut O) -> DispatchRun {
        use rayon::prelude::*;

        // Sequential: every claim sees the registry as left by the previous one.
        let batch: Vec<Matched> = self
            .queue
            .drain_ordered()
            .into_iter()
            .map(|queued| self.match_one(queued, observer))
            .collect();

        self.state = EngineState::Annotating;
        let this = &*self;
        let reports: Vec<DispatchReport> = batch
            .into_par_iter()
            .map(|matched| this.annotate_one(matched))
            .collect();

        let mut run = DispatchRun::default();
        for report in reports {
            self.report(report, observer, &mut run);
        }
        run
    }

    /// Matching phase for one incident: select, claim, and derive its RNG.
    fn match_one<O: DispatchObserver>(&mut self, queued: QueuedIncident, observer: &mut O) -> Matched {
        self.state = EngineState::Matching;
        let incident = &queued.incident;
        let claim = self
            .matcher
            .claim(&mut self.registry, incident)
            .map_err(DispatchError::from);

        match &claim {
            Ok(Some(assignment)) => {
                tracing::info!(
                    resource = %assignment.resource.name,
                    place = %incident.place,
                    severity = %incident.severity,
                    distance_km = assignment.distance_km,
                    "dispatching resource"
                );
                observer.on_assigned(incident, assignment);
            }
            Ok(None) => tracing::warn!(
                place = %incident.place,
                category = %incident.severity.required_category(),
                "no available resources for incident"
            ),
            Err(e) => tracing::error!(place = %incident.place, error = %e, "resource claim failed"),
        }

        // Derived in dispatch order so traffic draws are identical with and
        // without the `parallel` feature.
        let rng = self.rng.child(queued.id.0);
        Matched { queued, claim, rng }
    }

    /// Annotating phase.  Touches no engine state besides the annotator.
    fn annotate_one(&self, matched: Matched) -> DispatchReport {
        let Matched { queued, claim, mut rng } = matched;
        let QueuedIncident { id, incident } = queued;

        let outcome = match claim {
            Err(error) => DispatchOutcome::Failed { assignment: None, error },
            Ok(None) => DispatchOutcome::NoResourceAvailable {
                category: incident.severity.required_category(),
            },
            Ok(Some(assignment)) => {
                match self.annotator.annotate(assignment.resource.location, incident.location, &mut rng) {
                    Ok(itinerary) => DispatchOutcome::Dispatched(DispatchResult {
                        resource_id:   assignment.resource.id,
                        resource_name: assignment.resource.name,
                        place:         incident.place.clone(),
                        distance_km:   assignment.distance_km,
                        itinerary,
                    }),
                    Err(AnnotateError::NoRoute(reason)) => {
                        tracing::warn!(
                            resource = %assignment.resource.name,
                            place = %incident.place,
                            %reason,
                            "no route available"
                        );
                        DispatchOutcome::NoRouteAvailable { assignment, reason }
                    }
                    // Unusable traffic factors; the resource stays assigned.
                    Err(e) => {
                        tracing::error!(place = %incident.place, error = %e, "annotation failed");
                        DispatchOutcome::Failed { assignment: Some(assignment), error: e.into() }
                    }
                }
            }
        };

        DispatchReport { incident_id: id, incident, outcome }
    }

    /// Reporting phase.
    fn report<O: DispatchObserver>(&mut self, report: DispatchReport, observer: &mut O, run: &mut DispatchRun) {
        self.state = EngineState::Reporting;
        run.summary.record(&report.outcome);
        observer.on_report(&report);
        run.reports.push(report);
    }
}
