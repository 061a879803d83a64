//! Console rendering of dispatch reports.

use std::io::{self, Write};

use er_dispatch::{DispatchOutcome, DispatchReport, RunSummary};
use er_routing::Itinerary;

const RULE: &str =
    "+--------+-----------------------------------------+---------------------+--------------+-------------------+";
const INSTRUCTION_WIDTH: usize = 39;
const DEFAULT_INSTRUCTION: &str = "Follow the road";

/// Renders reports as fixed-width tables.
#[derive(Clone, Copy, Debug, Default)]
pub struct TableRenderer;

impl TableRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Headline for one incident, followed by its route table if it has one.
    pub fn render_report<W: Write>(&self, out: &mut W, report: &DispatchReport) -> io::Result<()> {
        let place = &report.incident.place;
        match &report.outcome {
            DispatchOutcome::Dispatched(result) => {
                writeln!(out, "Dispatching resource {} to incident at {place}", result.resource_name)?;
                self.render_itinerary(out, &result.itinerary)
            }
            DispatchOutcome::NoResourceAvailable { .. } => {
                writeln!(out, "No available resources for incident at {place}")
            }
            DispatchOutcome::NoRouteAvailable { assignment, reason } => {
                writeln!(out, "Dispatching resource {} to incident at {place}", assignment.resource.name)?;
                writeln!(out, "No routes available: {reason}")
            }
            DispatchOutcome::Failed { error, .. } => {
                writeln!(out, "Dispatch failed for incident at {place}: {error}")
            }
        }
    }

    /// Step table with traffic factors, then original and adjusted ETAs.
    pub fn render_itinerary<W: Write>(&self, out: &mut W, itinerary: &Itinerary) -> io::Result<()> {
        writeln!(out)?;
        writeln!(out, "=============================== ROUTE DETAILS WITH TRAFFIC ===============================")?;
        writeln!(out, "{RULE}")?;
        writeln!(
            out,
            "| Step   | Instruction                             | Distance (meters)   | Duration (s) | Traffic Factor    |"
        )?;
        writeln!(out, "{RULE}")?;

        for (i, s) in itinerary.steps.iter().enumerate() {
            writeln!(
                out,
                "| {:>6} | {:>39} | {:>19.1} | {:>12.1} | {:>17.2} |",
                i + 1,
                instruction_cell(&s.step.instruction),
                s.step.distance_m,
                s.step.duration_s,
                s.traffic_factor,
            )?;
        }
        writeln!(out, "{RULE}")?;

        writeln!(out)?;
        writeln!(out, "============================= ESTIMATED TIME OF ARRIVAL =============================")?;
        writeln!(out, "| Original ETA: {}", itinerary.original_eta())?;
        writeln!(out, "| Traffic-Adjusted ETA: {}", itinerary.adjusted_eta())?;
        writeln!(out, "===================================================================================")?;
        writeln!(out)
    }

    pub fn render_summary<W: Write>(&self, out: &mut W, summary: &RunSummary) -> io::Result<()> {
        writeln!(
            out,
            "Dispatch complete: {} dispatched, {} without resource, {} without route, {} failed",
            summary.dispatched, summary.no_resource, summary.no_route, summary.failed,
        )
    }
}

/// Empty instructions show a generic hint; long ones are cut at 39 chars.
fn instruction_cell(instruction: &str) -> String {
    if instruction.is_empty() {
        return DEFAULT_INSTRUCTION.to_owned();
    }
    instruction.chars().take(INSTRUCTION_WIDTH).collect()
}
