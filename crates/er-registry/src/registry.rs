//! Resource storage and availability bookkeeping.
//!
//! Resources are kept in insertion order.  `find_available` yields them in
//! that order, which is what makes the matcher's first-encountered tie-break
//! deterministic.

use std::collections::HashSet;

use er_core::{GeoPoint, ResourceCategory, ResourceId};

use crate::{RegistryError, RegistryResult};

// ── ResourceNode ──────────────────────────────────────────────────────────────

/// One response unit (fire engine, ambulance, police van) at a fixed base.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceNode {
    pub id:        ResourceId,
    /// Unique human-readable identifier, e.g. `"Police_Ashok"`.
    pub name:      String,
    pub location:  GeoPoint,
    pub category:  ResourceCategory,
    pub available: bool,
}

// ── ResourceRegistry ──────────────────────────────────────────────────────────

/// The full set of resources for a run.
///
/// Do not construct directly; use [`ResourceRegistryBuilder`] or
/// [`delhi_fleet`](crate::delhi_fleet).
#[derive(Clone, Debug)]
pub struct ResourceRegistry {
    nodes: Vec<ResourceNode>,
}

impl ResourceRegistry {
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All resources, available or not, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &ResourceNode> + '_ {
        self.nodes.iter()
    }

    pub fn get(&self, id: ResourceId) -> Option<&ResourceNode> {
        self.nodes.get(id.index())
    }

    /// Resolve a resource by its unique name.
    pub fn find_by_name(&self, name: &str) -> Option<&ResourceNode> {
        self.nodes.iter().find(|n| n.name == name)
    }

    /// Lazily iterate the available resources of `category`, in insertion
    /// order.
    pub fn find_available(
        &self,
        category: ResourceCategory,
    ) -> impl Iterator<Item = &ResourceNode> + '_ {
        self.nodes
            .iter()
            .filter(move |n| n.category == category && n.available)
    }

    /// Number of resources of `category` that can still be assigned.
    pub fn available_count(&self, category: ResourceCategory) -> usize {
        self.find_available(category).count()
    }

    /// Take an available resource out of the pool and return it.
    ///
    /// Unlike [`mark_unavailable`](Self::mark_unavailable) this refuses a
    /// resource that is already assigned, so a caller holding `&mut self`
    /// can never hand the same resource to two incidents.
    pub fn claim(&mut self, id: ResourceId) -> RegistryResult<&ResourceNode> {
        let node = self
            .nodes
            .get_mut(id.index())
            .ok_or(RegistryError::UnknownResource(id))?;
        if !node.available {
            return Err(RegistryError::AlreadyAssigned(id));
        }
        node.available = false;
        Ok(node)
    }

    /// Flag a resource as assigned.  Idempotent.
    pub fn mark_unavailable(&mut self, id: ResourceId) -> RegistryResult<()> {
        self.set_available(id, false)
    }

    /// Return a resource to the pool.  Idempotent.
    pub fn mark_available(&mut self, id: ResourceId) -> RegistryResult<()> {
        self.set_available(id, true)
    }

    fn set_available(&mut self, id: ResourceId, available: bool) -> RegistryResult<()> {
        let node = self
            .nodes
            .get_mut(id.index())
            .ok_or(RegistryError::UnknownResource(id))?;
        node.available = available;
        Ok(())
    }
}

// ── ResourceRegistryBuilder ───────────────────────────────────────────────────

/// Construct a [`ResourceRegistry`] incrementally, then call
/// [`build`](Self::build).
///
/// # Example
///
/// ```
/// use er_core::{GeoPoint, ResourceCategory};
/// use er_registry::ResourceRegistryBuilder;
///
/// let mut b = ResourceRegistryBuilder::new();
/// b.add("Fire_A", GeoPoint::new(28.63, 77.21), ResourceCategory::FireBrigade);
/// let reg = b.build().unwrap();
/// assert_eq!(reg.len(), 1);
/// ```
#[derive(Default)]
pub struct ResourceRegistryBuilder {
    nodes: Vec<ResourceNode>,
}

impl ResourceRegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an available resource and return its `ResourceId` (sequential
    /// from 0).
    pub fn add(
        &mut self,
        name:     impl Into<String>,
        location: GeoPoint,
        category: ResourceCategory,
    ) -> ResourceId {
        let id = ResourceId(self.nodes.len() as u32);
        self.nodes.push(ResourceNode {
            id,
            name: name.into(),
            location,
            category,
            available: true,
        });
        id
    }

    /// Add a resource that starts out already assigned.
    pub fn add_unavailable(
        &mut self,
        name:     impl Into<String>,
        location: GeoPoint,
        category: ResourceCategory,
    ) -> ResourceId {
        let id = self.add(name, location, category);
        self.nodes[id.index()].available = false;
        id
    }

    /// Consume the builder.  Fails if two resources share a name.
    pub fn build(self) -> RegistryResult<ResourceRegistry> {
        let mut seen = HashSet::with_capacity(self.nodes.len());
        for node in &self.nodes {
            if !seen.insert(node.name.as_str()) {
                return Err(RegistryError::DuplicateName(node.name.clone()));
            }
        }
        Ok(ResourceRegistry { nodes: self.nodes })
    }
}
