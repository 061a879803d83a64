//! `DispatchObserver` adapters for console and file output.

use std::io::{self, Write};

use er_dispatch::{DispatchObserver, DispatchReport, RunSummary};

use crate::row::{DispatchRow, StepRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult, TableRenderer};

/// Writes dispatch and step rows to any [`OutputWriter`] backend.
///
/// Errors from the writer are stored internally because observer methods
/// have no return value.  After `dispatch_all` returns, check with
/// [`take_error`][Self::take_error].
pub struct ReportObserver<W: OutputWriter> {
    writer:     W,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> ReportObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, last_error: None }
    }

    /// Take the stored write error (if any).
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> DispatchObserver for ReportObserver<W> {
    fn on_report(&mut self, report: &DispatchReport) {
        let result = self.writer.write_dispatch(&DispatchRow::from_report(report));
        self.store_err(result);

        let steps = StepRow::from_report(report);
        if !steps.is_empty() {
            let result = self.writer.write_steps(&steps);
            self.store_err(result);
        }
    }

    fn on_run_end(&mut self, _summary: &RunSummary) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}

/// Renders every report as a console table.
pub struct TableObserver<W: Write> {
    out:        W,
    renderer:   TableRenderer,
    last_error: Option<io::Error>,
}

impl<W: Write> TableObserver<W> {
    pub fn new(out: W) -> Self {
        Self { out, renderer: TableRenderer::new(), last_error: None }
    }

    pub fn take_error(&mut self) -> Option<io::Error> {
        self.last_error.take()
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn store_err(&mut self, result: io::Result<()>) {
        if let Err(e) = result {
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: Write> DispatchObserver for TableObserver<W> {
    fn on_report(&mut self, report: &DispatchReport) {
        let result = self.renderer.render_report(&mut self.out, report);
        self.store_err(result);
    }

    fn on_run_end(&mut self, summary: &RunSummary) {
        let result = self
            .renderer
            .render_summary(&mut self.out, summary)
            .and_then(|()| self.out.flush());
        self.store_err(result);
    }
}
