//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `dispatches.csv`
//! - `route_steps.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{DispatchRow, OutputResult, StepRow};

pub struct CsvWriter {
    dispatches: Writer<File>,
    steps:      Writer<File>,
    finished:   bool,
}

impl CsvWriter {
    /// Create (or truncate) the two CSV files in `dir` and write the headers.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut dispatches = Writer::from_path(dir.join("dispatches.csv"))?;
        dispatches.write_record([
            "incident_id", "place", "severity", "outcome", "resource",
            "distance_km", "steps", "original_s", "adjusted_s", "detail",
        ])?;

        let mut steps = Writer::from_path(dir.join("route_steps.csv"))?;
        steps.write_record([
            "incident_id", "step", "instruction", "distance_m", "duration_s",
            "traffic_factor", "adjusted_s",
        ])?;

        Ok(Self { dispatches, steps, finished: false })
    }
}

fn opt(v: Option<f64>) -> String {
    v.map(|x| format!("{x:.3}")).unwrap_or_default()
}

impl OutputWriter for CsvWriter {
    fn write_dispatch(&mut self, row: &DispatchRow) -> OutputResult<()> {
        self.dispatches.write_record(&[
            row.incident_id.to_string(),
            row.place.clone(),
            row.severity.to_owned(),
            row.outcome.to_owned(),
            row.resource.clone(),
            opt(row.distance_km),
            row.steps.to_string(),
            opt(row.original_s),
            opt(row.adjusted_s),
            row.detail.clone(),
        ])?;
        Ok(())
    }

    fn write_steps(&mut self, rows: &[StepRow]) -> OutputResult<()> {
        for row in rows {
            self.steps.write_record(&[
                row.incident_id.to_string(),
                row.step.to_string(),
                row.instruction.clone(),
                format!("{:.1}", row.distance_m),
                format!("{:.1}", row.duration_s),
                format!("{:.3}", row.traffic_factor),
                format!("{:.1}", row.adjusted_s),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.dispatches.flush()?;
        self.steps.flush()?;
        Ok(())
    }
}
