//! `er-registry` — the fixed fleet of response resources.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | [`registry`]  | `ResourceNode`, `ResourceRegistry`, `ResourceRegistryBuilder` |
//! | [`seed`]      | `delhi_fleet()` — the nine built-in resources             |
//! | [`proximity`] | `ProximityIndex` (pairwise neighbours within a radius)    |
//! | [`error`]     | `RegistryError`, `RegistryResult<T>`                      |
//!
//! Availability is the only mutable state.  Nodes are never removed during a
//! run.

pub mod error;
pub mod proximity;
pub mod registry;
pub mod seed;


pub use error::{RegistryError, RegistryResult};
pub use proximity::ProximityIndex;
pub use registry::{ResourceNode, ResourceRegistry, ResourceRegistryBuilder};
pub use seed::delhi_fleet;
