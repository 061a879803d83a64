//! Nearest-available-resource selection.

use er_core::Incident;
use er_registry::{RegistryResult, ResourceNode, ResourceRegistry};

use crate::Assignment;

/// Picks the single best resource for an incident.
///
/// # Algorithm
///
/// Map the incident's severity to its required category, scan the available
/// resources of that category in registry order, and keep the one with the
/// smallest haversine distance to the incident.
///
/// # Tie-break
///
/// Comparison is strict (`<`), so among equidistant candidates the one that
/// appears first in the registry wins.  Registry order is insertion order,
/// which makes the choice deterministic for a given seed list.
#[derive(Clone, Copy, Debug, Default)]
pub struct DispatchMatcher;

impl DispatchMatcher {
    pub fn new() -> Self {
        Self
    }

    /// The best candidate and its distance in km, without claiming it.
    pub fn select<'r>(
        &self,
        registry: &'r ResourceRegistry,
        incident: &Incident,
    ) -> Option<(&'r ResourceNode, f64)> {
        let category = incident.severity.required_category();
        let mut best: Option<(&ResourceNode, f64)> = None;
        for node in registry.find_available(category) {
            let d = incident.location.distance_km(node.location);
            match best {
                Some((_, best_d)) if d >= best_d => {}
                _ => best = Some((node, d)),
            }
        }
        best
    }

    /// Select and claim in one step.
    ///
    /// The exclusive borrow of `registry` spans both the scan and the
    /// availability flip, so no other incident can observe the resource as
    /// available in between.  `Ok(None)` means no resource of the required
    /// category is free.
    pub fn claim(
        &self,
        registry: &mut ResourceRegistry,
        incident: &Incident,
    ) -> RegistryResult<Option<Assignment>> {
        let Some((node, distance_km)) = self.select(registry, incident) else {
            return Ok(None);
        };
        let id = node.id;
        let resource = registry.claim(id)?.clone();
        Ok(Some(Assignment { resource, distance_km }))
    }
}
