//! `er-dispatch` — match incidents to resources and annotate their routes.
//!
//! # Run loop
//!
//! ```text
//! Idle → Draining → (Matching → Annotating → Reporting)* → Idle
//!
//! while let Some(incident) = queue.pop():       // most severe first, FIFO on ties
//!   ① Matching    — nearest available resource of the required category;
//!                   claimed (flagged unavailable) in the same &mut borrow.
//!   ② Annotating  — RoutingService route + TrafficModel factors → Itinerary.
//!   ③ Reporting   — DispatchReport handed to the DispatchObserver.
//! ```
//!
//! No single outcome aborts the run: "no resource", "no route" and internal
//! annotation errors are all reported and the loop moves on.
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                     |
//! |------------|------------------------------------------------------------|
//! | `parallel` | Matches the whole batch first, then annotates on Rayon.    |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use er_core::DispatchConfig;
//! use er_dispatch::{DispatchEngine, NoopObserver};
//! use er_registry::delhi_fleet;
//! use er_routing::{RouteAnnotator, StraightLineRouting, UniformTraffic};
//!
//! let annotator = RouteAnnotator::new(StraightLineRouting::default(), UniformTraffic::default());
//! let mut engine = DispatchEngine::new(DispatchConfig::default(), delhi_fleet()?, annotator)?;
//! engine.add_incident(incident);
//! let run = engine.dispatch_all(&mut NoopObserver);
//! ```

pub mod engine;
pub mod error;
pub mod matcher;
pub mod observer;
pub mod outcome;

#[cfg(test)]
mod tests;

pub use engine::{DispatchEngine, EngineState};
pub use error::{DispatchError, EngineResult};
pub use matcher::DispatchMatcher;
pub use observer::{DispatchObserver, NoopObserver};
pub use outcome::{Assignment, DispatchOutcome, DispatchReport, DispatchResult, DispatchRun, RunSummary};
