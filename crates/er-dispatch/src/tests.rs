//! Integration tests for er-dispatch.

use std::sync::Mutex;

use er_core::{DispatchConfig, GeoPoint, Incident, ResourceCategory, Severity};
use er_registry::{ResourceRegistry, ResourceRegistryBuilder};
use er_routing::{
    ConstantTraffic, RawStep, RouteAnnotator, RouteResponse, RouteStep, RoutingError,
    RoutingResult, RoutingService, TrafficModel, UniformTraffic,
};

use crate::{Assignment, DispatchEngine, DispatchObserver, DispatchReport, RunSummary};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Answers every request with the same response and records the endpoints.
struct CannedRouting {
    response: RouteResponse,
    calls:    Mutex<Vec<(GeoPoint, GeoPoint)>>,
}

impl CannedRouting {
    fn new(response: RouteResponse) -> Self {
        Self { response, calls: Mutex::new(Vec::new()) }
    }
}

impl RoutingService for CannedRouting {
    fn get_route(&self, origin: GeoPoint, destination: GeoPoint) -> RoutingResult<RouteResponse> {
        self.calls.lock().unwrap().push((origin, destination));
        Ok(self.response.clone())
    }
}

struct DownRouting;

impl RoutingService for DownRouting {
    fn get_route(&self, _o: GeoPoint, _d: GeoPoint) -> RoutingResult<RouteResponse> {
        Err(RoutingError::Transport("connection refused".into()))
    }
}

/// Well-formed 3-step route: 60 s + 120 s + 30 s.
fn three_step_route() -> RouteResponse {
    RouteResponse::single_leg(vec![
        RawStep::from(RouteStep::new("Head north", 500.0, 60.0)),
        RawStep::from(RouteStep::new("Turn right", 1_200.0, 120.0)),
        RawStep::from(RouteStep::new("Arrive", 250.0, 30.0)),
    ])
}

fn test_config() -> DispatchConfig {
    DispatchConfig { seed: 7, ..DispatchConfig::default() }
}

fn engine<S: RoutingService, T: TrafficModel>(
    registry: ResourceRegistry,
    service:  S,
    traffic:  T,
) -> DispatchEngine<S, T> {
    DispatchEngine::new(test_config(), registry, RouteAnnotator::new(service, traffic)).unwrap()
}

/// Incident site used by most tests.
fn site() -> GeoPoint {
    GeoPoint::new(28.60, 77.20)
}

/// Point roughly `km` north of `site()`.
fn north_of_site(km: f64) -> GeoPoint {
    GeoPoint::new(28.60 + km / 111.195, 77.20)
}

/// Records every observer callback as a short string.
#[derive(Default)]
struct EventLog {
    events: Vec<String>,
}

impl DispatchObserver for EventLog {
    fn on_run_start(&mut self, pending: usize) {
        self.events.push(format!("start:{pending}"));
    }

    fn on_assigned(&mut self, incident: &Incident, assignment: &Assignment) {
        self.events.push(format!("assigned:{}:{}", incident.place, assignment.resource.name));
    }

    fn on_report(&mut self, report: &DispatchReport) {
        self.events.push(format!("report:{}:{}", report.incident.place, report.outcome.kind()));
    }

    fn on_run_end(&mut self, summary: &RunSummary) {
        self.events.push(format!("end:{}", summary.total()));
    }
}

// ── Matcher ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod matcher_tests {
    use super::*;
    use crate::DispatchMatcher;

    #[test]
    fn skips_nearer_unavailable_resource() {
        let mut b = ResourceRegistryBuilder::new();
        b.add("R1", north_of_site(2.0), ResourceCategory::Ambulance);
        b.add_unavailable("R2", north_of_site(1.0), ResourceCategory::Ambulance);
        let mut reg = b.build().unwrap();

        let incident = Incident::new("x", Severity::Medical, site());
        let a = DispatchMatcher::new().claim(&mut reg, &incident).unwrap().unwrap();
        assert_eq!(a.resource.name, "R1");
        assert!((a.distance_km - 2.0).abs() < 0.01, "got {}", a.distance_km);
        assert!(!reg.find_by_name("R1").unwrap().available);
    }

    #[test]
    fn picks_nearest_of_required_category() {
        let mut b = ResourceRegistryBuilder::new();
        b.add("Fire_Near", north_of_site(0.5), ResourceCategory::FireBrigade);
        b.add("Police_Far", north_of_site(3.0), ResourceCategory::PoliceVan);
        b.add("Police_Near", north_of_site(1.0), ResourceCategory::PoliceVan);
        let reg = b.build().unwrap();

        let incident = Incident::new("x", Severity::Crime, site());
        let (node, _) = DispatchMatcher::new().select(&reg, &incident).unwrap();
        assert_eq!(node.name, "Police_Near");
    }

    #[test]
    fn other_severity_uses_police() {
        let mut b = ResourceRegistryBuilder::new();
        b.add("Amb", site(), ResourceCategory::Ambulance);
        b.add("Police", north_of_site(5.0), ResourceCategory::PoliceVan);
        let reg = b.build().unwrap();

        let incident = Incident::new("x", Severity::Other, site());
        let (node, _) = DispatchMatcher::new().select(&reg, &incident).unwrap();
        assert_eq!(node.name, "Police");
    }

    #[test]
    fn equidistant_tie_goes_to_first_registered() {
        let mut b = ResourceRegistryBuilder::new();
        b.add("First", north_of_site(1.0), ResourceCategory::PoliceVan);
        b.add("Second", north_of_site(1.0), ResourceCategory::PoliceVan);
        let reg = b.build().unwrap();

        let incident = Incident::new("x", Severity::Crime, site());
        let (node, _) = DispatchMatcher::new().select(&reg, &incident).unwrap();
        assert_eq!(node.name, "First");
    }

    #[test]
    fn none_when_category_exhausted() {
        let mut b = ResourceRegistryBuilder::new();
        b.add_unavailable("Busy", site(), ResourceCategory::FireBrigade);
        b.add("Amb", site(), ResourceCategory::Ambulance);
        let mut reg = b.build().unwrap();

        let incident = Incident::new("x", Severity::Fire, site());
        assert!(DispatchMatcher::new().claim(&mut reg, &incident).unwrap().is_none());
        // Nothing else was touched.
        assert_eq!(reg.available_count(ResourceCategory::Ambulance), 1);
    }
}

// ── Engine ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod engine_tests {
    use super::*;
    use crate::{DispatchOutcome, EngineState, NoopObserver};
    use er_routing::{AnnotateError, NoRouteReason};

    #[test]
    fn invalid_config_rejected() {
        let cfg = DispatchConfig { traffic_min: 2.0, ..DispatchConfig::default() };
        let reg = ResourceRegistryBuilder::new().build().unwrap();
        let ann = RouteAnnotator::new(DownRouting, ConstantTraffic(1.0));
        assert!(DispatchEngine::new(cfg, reg, ann).is_err());
    }

    #[test]
    fn dispatch_order_follows_severity() {
        let mut b = ResourceRegistryBuilder::new();
        b.add("Fire", north_of_site(1.0), ResourceCategory::FireBrigade);
        b.add("Amb", north_of_site(1.0), ResourceCategory::Ambulance);
        b.add("Police", north_of_site(1.0), ResourceCategory::PoliceVan);
        let mut e = engine(b.build().unwrap(), CannedRouting::new(three_step_route()), ConstantTraffic(1.0));

        e.add_incident(Incident::new("crime", Severity::Crime, site()));
        e.add_incident(Incident::new("fire", Severity::Fire, site()));
        e.add_incident(Incident::new("medical", Severity::Medical, site()));

        let run = e.dispatch_all(&mut NoopObserver);
        let order: Vec<_> = run.reports.iter().map(|r| r.incident.severity).collect();
        assert_eq!(order, [Severity::Fire, Severity::Medical, Severity::Crime]);
        assert_eq!(run.summary.dispatched, 3);
        assert_eq!(e.pending(), 0);
    }

    #[test]
    fn end_to_end_fire_and_crime() {
        let mut b = ResourceRegistryBuilder::new();
        b.add_unavailable("Fire_Busy", north_of_site(0.2), ResourceCategory::FireBrigade);
        b.add("Fire_Only", north_of_site(4.0), ResourceCategory::FireBrigade);
        b.add("Police_Far", GeoPoint::new(28.70, 77.30), ResourceCategory::PoliceVan);
        b.add("Police_Near", GeoPoint::new(28.65, 77.25), ResourceCategory::PoliceVan);
        let mut e = engine(b.build().unwrap(), CannedRouting::new(three_step_route()), UniformTraffic::default());

        e.add_incident(Incident::new("Place A", Severity::Fire, site()));
        e.add_incident(Incident::new("Place B", Severity::Crime, GeoPoint::new(28.64, 77.24)));

        let run = e.dispatch_all(&mut NoopObserver);
        assert_eq!(run.reports.len(), 2);
        assert!(run.reports.iter().all(|r| !r.outcome.is_failure()));

        let a = &run.reports[0];
        assert_eq!(a.incident.place, "Place A");
        assert_eq!(a.outcome.resource_name(), Some("Fire_Only"));
        assert_eq!(a.outcome.itinerary().unwrap().len(), 3);

        let b = &run.reports[1];
        assert_eq!(b.incident.place, "Place B");
        assert_eq!(b.outcome.resource_name(), Some("Police_Near"));
        match &b.outcome {
            DispatchOutcome::Dispatched(r) => {
                assert_eq!(r.place, "Place B");
                assert_eq!(r.original_eta().to_string(), "3 minutes and 30 seconds");
                let secs = r.itinerary.adjusted_duration_s;
                assert!((168.0 - 1e-9..=252.0 + 1e-9).contains(&secs), "adjusted {secs}");
            }
            other => panic!("expected dispatch, got {other:?}"),
        }
    }

    #[test]
    fn route_requested_from_resource_to_incident() {
        let mut b = ResourceRegistryBuilder::new();
        let base = north_of_site(1.0);
        b.add("Amb", base, ResourceCategory::Ambulance);
        let mut e = engine(b.build().unwrap(), CannedRouting::new(three_step_route()), ConstantTraffic(1.0));
        e.add_incident(Incident::new("x", Severity::Medical, site()));
        e.dispatch_all(&mut NoopObserver);

        let calls = e.annotator_calls();
        assert_eq!(calls, [(base, site())]);
    }

    #[test]
    fn no_double_assignment() {
        let mut b = ResourceRegistryBuilder::new();
        b.add("Fire_1", north_of_site(1.0), ResourceCategory::FireBrigade);
        b.add("Fire_2", north_of_site(2.0), ResourceCategory::FireBrigade);
        let mut e = engine(b.build().unwrap(), CannedRouting::new(three_step_route()), UniformTraffic::default());

        for i in 0..4 {
            e.add_incident(Incident::new(format!("fire-{i}"), Severity::Fire, site()));
        }
        let run = e.dispatch_all(&mut NoopObserver);

        let names: Vec<_> = run.reports.iter().filter_map(|r| r.outcome.resource_name()).collect();
        assert_eq!(names, ["Fire_1", "Fire_2"]);
        assert_eq!(run.summary, RunSummary { dispatched: 2, no_resource: 2, no_route: 0, failed: 0 });
        assert!(matches!(
            run.reports[3].outcome,
            DispatchOutcome::NoResourceAvailable { category: ResourceCategory::FireBrigade }
        ));
    }

    #[test]
    fn assignments_persist_across_runs_until_released() {
        let mut b = ResourceRegistryBuilder::new();
        let id = b.add("Amb", site(), ResourceCategory::Ambulance);
        let mut e = engine(b.build().unwrap(), CannedRouting::new(three_step_route()), ConstantTraffic(1.0));

        e.add_incident(Incident::new("first", Severity::Medical, site()));
        assert_eq!(e.dispatch_all(&mut NoopObserver).summary.dispatched, 1);

        e.add_incident(Incident::new("second", Severity::Medical, site()));
        assert_eq!(e.dispatch_all(&mut NoopObserver).summary.no_resource, 1);

        e.release(id).unwrap();
        e.add_incident(Incident::new("third", Severity::Medical, site()));
        assert_eq!(e.dispatch_all(&mut NoopObserver).summary.dispatched, 1);
    }

    #[test]
    fn zero_routes_reports_no_route_and_keeps_assignment() {
        let mut b = ResourceRegistryBuilder::new();
        b.add("Police", site(), ResourceCategory::PoliceVan);
        let mut e = engine(b.build().unwrap(), CannedRouting::new(RouteResponse::default()), ConstantTraffic(1.0));

        e.add_incident(Incident::new("x", Severity::Crime, site()));
        let run = e.dispatch_all(&mut NoopObserver);

        let report = &run.reports[0];
        assert!(report.outcome.itinerary().is_none());
        assert!(matches!(
            report.outcome,
            DispatchOutcome::NoRouteAvailable { reason: NoRouteReason::NoRoutes, .. }
        ));
        assert_eq!(report.outcome.resource_name(), Some("Police"));
        assert_eq!(e.registry().available_count(ResourceCategory::PoliceVan), 0);
        assert_eq!(run.summary.no_route, 1);
    }

    #[test]
    fn routing_failure_does_not_abort_run() {
        let mut b = ResourceRegistryBuilder::new();
        b.add("Fire", site(), ResourceCategory::FireBrigade);
        b.add("Police", site(), ResourceCategory::PoliceVan);
        let mut e = engine(b.build().unwrap(), DownRouting, ConstantTraffic(1.0));

        e.add_incident(Incident::new("a", Severity::Fire, site()));
        e.add_incident(Incident::new("b", Severity::Crime, site()));
        let run = e.dispatch_all(&mut NoopObserver);

        assert_eq!(run.summary.no_route, 2);
        assert!(run.reports.iter().all(|r| matches!(
            r.outcome,
            DispatchOutcome::NoRouteAvailable { reason: NoRouteReason::Service(_), .. }
        )));
    }

    #[test]
    fn invalid_traffic_factor_fails_only_that_incident() {
        let mut b = ResourceRegistryBuilder::new();
        b.add("Fire", site(), ResourceCategory::FireBrigade);
        b.add("Amb", site(), ResourceCategory::Ambulance);
        let mut e = engine(b.build().unwrap(), CannedRouting::new(three_step_route()), ConstantTraffic(f64::NAN));

        e.add_incident(Incident::new("a", Severity::Fire, site()));
        e.add_incident(Incident::new("b", Severity::Medical, site()));
        e.add_incident(Incident::new("c", Severity::Medical, site()));
        let run = e.dispatch_all(&mut NoopObserver);

        assert_eq!(run.summary, RunSummary { dispatched: 0, no_resource: 1, no_route: 0, failed: 2 });
        match &run.reports[0].outcome {
            DispatchOutcome::Failed { assignment: Some(a), error } => {
                assert_eq!(a.resource.name, "Fire");
                assert!(matches!(
                    error,
                    crate::DispatchError::Annotate(AnnotateError::InvalidFactor { step: 0, .. })
                ));
            }
            other => panic!("expected failure, got {other:?}"),
        }
        assert_eq!(run.reports[1].outcome.resource_name(), Some("Amb"));
        assert!(run.reports[1].outcome.is_failure());
        // Failed incidents keep their resources.
        assert_eq!(e.registry().available_count(ResourceCategory::FireBrigade), 0);
        assert_eq!(e.registry().available_count(ResourceCategory::Ambulance), 0);
    }

    #[test]
    fn observer_sees_every_phase_and_engine_returns_idle() {
        let mut b = ResourceRegistryBuilder::new();
        b.add("Fire", site(), ResourceCategory::FireBrigade);
        let mut e = engine(b.build().unwrap(), CannedRouting::new(three_step_route()), ConstantTraffic(1.0));
        assert_eq!(e.state(), EngineState::Idle);

        e.add_incident(Incident::new("crime", Severity::Crime, site()));
        e.add_incident(Incident::new("fire", Severity::Fire, site()));
        let mut log = EventLog::default();
        e.dispatch_all(&mut log);

        assert_eq!(e.state(), EngineState::Idle);
        assert_eq!(log.events.first().map(String::as_str), Some("start:2"));
        assert_eq!(log.events.last().map(String::as_str), Some("end:2"));
        assert!(log.events.contains(&"assigned:fire:Fire".to_owned()));
        let reports: Vec<_> = log.events.iter().filter(|e| e.starts_with("report:")).collect();
        assert_eq!(reports, ["report:fire:dispatched", "report:crime:no_resource"]);
    }

    #[test]
    fn same_seed_same_traffic() {
        let build = || {
            let mut b = ResourceRegistryBuilder::new();
            b.add("Fire", site(), ResourceCategory::FireBrigade);
            b.add("Amb", site(), ResourceCategory::Ambulance);
            let mut e = engine(b.build().unwrap(), CannedRouting::new(three_step_route()), UniformTraffic::default());
            e.add_incident(Incident::new("a", Severity::Fire, site()));
            e.add_incident(Incident::new("b", Severity::Medical, site()));
            e.dispatch_all(&mut NoopObserver)
        };
        let x = build();
        let y = build();
        let durations = |run: &crate::DispatchRun| -> Vec<f64> {
            run.reports
                .iter()
                .filter_map(|r| r.outcome.itinerary())
                .map(|i| i.adjusted_duration_s)
                .collect()
        };
        assert_eq!(durations(&x), durations(&y));
    }

    #[test]
    fn adjusted_eta_bounded_over_many_trials() {
        for seed in 0..50 {
            let mut b = ResourceRegistryBuilder::new();
            b.add("Amb", site(), ResourceCategory::Ambulance);
            let cfg = DispatchConfig { seed, ..DispatchConfig::default() };
            let ann = RouteAnnotator::new(CannedRouting::new(three_step_route()), UniformTraffic::default());
            let mut e = DispatchEngine::new(cfg, b.build().unwrap(), ann).unwrap();
            e.add_incident(Incident::new("x", Severity::Medical, site()));
            let run = e.dispatch_all(&mut NoopObserver);

            let it = run.reports[0].outcome.itinerary().unwrap();
            assert!(it.adjusted_duration_s >= it.original_duration_s * 0.8 - 1e-9);
            assert!(it.adjusted_duration_s <= it.original_duration_s * 1.2 + 1e-9);
        }
    }
}

// ── Parallel annotation ───────────────────────────────────────────────────────

#[cfg(all(test, feature = "parallel"))]
mod parallel_tests {
    use std::collections::HashSet;

    use super::*;
    use crate::{DispatchOutcome, DispatchRun, NoopObserver};

    fn busy_run(seed: u64) -> DispatchRun {
        let mut b = ResourceRegistryBuilder::new();
        for i in 0..5 {
            b.add(format!("Fire_{i}"), north_of_site(i as f64 + 1.0), ResourceCategory::FireBrigade);
            b.add(format!("Police_{i}"), north_of_site(i as f64 + 1.0), ResourceCategory::PoliceVan);
        }
        let cfg = DispatchConfig { seed, ..DispatchConfig::default() };
        let ann = RouteAnnotator::new(CannedRouting::new(three_step_route()), UniformTraffic::default());
        let mut e = DispatchEngine::new(cfg, b.build().unwrap(), ann).unwrap();
        for i in 0..40 {
            let severity = if i % 2 == 0 { Severity::Crime } else { Severity::Fire };
            e.add_incident(Incident::new(format!("incident-{i}"), severity, site()));
        }
        e.dispatch_all(&mut NoopObserver)
    }

    #[test]
    fn no_resource_assigned_twice() {
        let run = busy_run(3);
        let names: Vec<_> = run.reports.iter().filter_map(|r| r.outcome.resource_name()).collect();
        let unique: HashSet<_> = names.iter().collect();
        assert_eq!(names.len(), 10);
        assert_eq!(unique.len(), names.len());
        assert_eq!(run.summary.dispatched, 10);
        assert_eq!(run.summary.no_resource, 30);
    }

    #[test]
    fn reports_stay_in_queue_order() {
        let run = busy_run(3);
        let keys: Vec<_> = run.reports.iter().map(|r| (r.incident.severity, r.incident_id)).collect();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);
        // Nearest units go to the earliest incidents of each severity.
        assert_eq!(run.reports[0].outcome.resource_name(), Some("Fire_0"));
        assert!(matches!(run.reports[0].outcome, DispatchOutcome::Dispatched(_)));
    }

    #[test]
    fn traffic_is_reproducible() {
        let durations = |run: &DispatchRun| -> Vec<f64> {
            run.reports
                .iter()
                .filter_map(|r| r.outcome.itinerary())
                .map(|i| i.adjusted_duration_s)
                .collect()
        };
        assert_eq!(durations(&busy_run(11)), durations(&busy_run(11)));
    }
}

// Test-only accessor for the canned service's call log.
impl<T: TrafficModel> DispatchEngine<CannedRouting, T> {
    fn annotator_calls(&self) -> Vec<(GeoPoint, GeoPoint)> {
        self.annotator().service().calls.lock().unwrap().clone()
    }
}
