//! `er-queue` — pending incidents, most urgent first.
//!
//! # Ordering
//!
//! Entries are keyed on `(Severity, IncidentId)`.  `Severity`'s derived order
//! puts `Fire` first; the `IncidentId` is a per-queue insertion counter, so
//! incidents of equal severity leave in the order they arrived (FIFO).  A
//! bare binary heap keyed on severity alone would make no such promise.

pub mod queue;


pub use queue::{IncidentQueue, QueuedIncident};
