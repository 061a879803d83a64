//! `er-output` — presentation collaborators for dispatch runs.
//!
//! | Type               | Output                                                  |
//! |--------------------|---------------------------------------------------------|
//! | [`TableRenderer`]  | Console route tables with traffic and ETA lines         |
//! | [`CsvWriter`]      | `dispatches.csv`, `route_steps.csv`                     |
//!
//! Both are driven through `er_dispatch::DispatchObserver` adapters:
//! [`TableObserver`] for any `io::Write`, and [`ReportObserver`] for any
//! [`OutputWriter`] backend.
//!
//! # Usage
//!
//! ```rust,ignore
//! use er_output::{CsvWriter, ReportObserver};
//!
//! let mut obs = ReportObserver::new(CsvWriter::new(Path::new("./out"))?);
//! engine.dispatch_all(&mut obs);
//! obs.take_error().map(|e| eprintln!("output error: {e}"));
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod table;
pub mod writer;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::{ReportObserver, TableObserver};
pub use row::{DispatchRow, StepRow};
pub use table::TableRenderer;
pub use writer::OutputWriter;
