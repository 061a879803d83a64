//! Observer trait for presentation and data collection.

use er_core::Incident;

use crate::{Assignment, DispatchReport, RunSummary};

/// Callbacks invoked by [`DispatchEngine::dispatch_all`][crate::DispatchEngine::dispatch_all].
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example — console printer
///
/// ```rust,ignore
/// struct Printer;
///
/// impl DispatchObserver for Printer {
///     fn on_report(&mut self, report: &DispatchReport) {
///         println!("{} → {}", report.incident.place, report.outcome.kind());
///     }
/// }
/// ```
pub trait DispatchObserver {
    /// Called once before the first incident is popped.
    fn on_run_start(&mut self, _pending: usize) {}

    /// Called as soon as a resource is claimed, before its route is requested.
    fn on_assigned(&mut self, _incident: &Incident, _assignment: &Assignment) {}

    /// Called once per incident, in dispatch order.
    fn on_report(&mut self, _report: &DispatchReport) {}

    /// Called once after the queue is empty.
    fn on_run_end(&mut self, _summary: &RunSummary) {}
}

/// A [`DispatchObserver`] that does nothing.
pub struct NoopObserver;

impl DispatchObserver for NoopObserver {}
