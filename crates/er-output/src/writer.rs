//! The `OutputWriter` trait implemented by file backends.

use crate::{DispatchRow, OutputResult, StepRow};

pub trait OutputWriter {
    fn write_dispatch(&mut self, row: &DispatchRow) -> OutputResult<()>;

    fn write_steps(&mut self, rows: &[StepRow]) -> OutputResult<()>;

    /// Flush all underlying handles.  Idempotent.
    fn finish(&mut self) -> OutputResult<()>;
}
