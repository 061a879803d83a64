//! `er-core` — foundational types for the emergency dispatch engine.
//!
//! This crate is a dependency of every other `er-*` crate.  It has no `er-*`
//! dependencies and minimal external ones (only `rand` and `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module        | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | [`ids`]       | `ResourceId`, `IncidentId`                                |
//! | [`geo`]       | `GeoPoint`, haversine distance in kilometres              |
//! | [`incident`]  | `Severity`, `ResourceCategory`, `Incident`                |
//! | [`rng`]       | `DispatchRng` (seedable traffic randomness)               |
//! | [`config`]    | `DispatchConfig`                                          |
//! | [`error`]     | `CoreError`, `CoreResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod incident;
pub mod rng;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::DispatchConfig;
pub use error::{CoreError, CoreResult};
pub use geo::{GeoPoint, haversine_km};
pub use ids::{IncidentId, ResourceId};
pub use incident::{Incident, ResourceCategory, Severity};
pub use rng::DispatchRng;
