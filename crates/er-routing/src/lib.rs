//! `er-routing` — routing service seam, traffic model and itinerary
//! annotation.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                      |
//! |---------------|---------------------------------------------------------------|
//! | [`response`]  | OSRM-shaped `RouteResponse` model, `RouteStep`                |
//! | [`service`]   | `RoutingService` trait, `TimeoutRouting`, `StraightLineRouting` |
//! | [`traffic`]   | `TrafficModel` trait, `UniformTraffic`, `ConstantTraffic`     |
//! | [`itinerary`] | `Itinerary`, `AnnotatedStep`, `Eta`                           |
//! | [`annotate`]  | `RouteAnnotator`, `annotate_steps`                            |
//! | [`osrm`]      | `OsrmClient` (feature = `"osrm"` only)                        |
//! | [`error`]     | `RoutingError`, `AnnotateError`, `NoRouteReason`              |
//!
//! # Pluggability
//!
//! The engine only ever talks to a [`RoutingService`] and a [`TrafficModel`],
//! so tests swap in canned routes and fixed factors without touching the
//! network.
//!
//! # Feature flags
//!
//! | Flag   | Effect                                                        |
//! |--------|---------------------------------------------------------------|
//! | `osrm` | Enables the blocking `reqwest` client for an OSRM server.     |

pub mod annotate;
pub mod error;
pub mod itinerary;
pub mod response;
pub mod service;
pub mod traffic;

#[cfg(feature = "osrm")]
pub mod osrm;


pub use annotate::{RouteAnnotator, annotate_steps};
pub use error::{AnnotateError, AnnotateResult, NoRouteReason, RoutingError, RoutingResult};
pub use itinerary::{AnnotatedStep, Eta, Itinerary};
pub use response::{Leg, Maneuver, RawStep, Route, RouteResponse, RouteStep};
pub use service::{RoutingService, StraightLineRouting, TimeoutRouting};
pub use traffic::{ConstantTraffic, TrafficModel, UniformTraffic};

#[cfg(feature = "osrm")]
pub use osrm::OsrmClient;
