//! Pairwise resource neighbourhoods.
//!
//! Every pair of resources within `threshold_km` of each other (inclusive) is
//! linked in both directions with its haversine distance.  The matcher does
//! not consult this index; it exists for path-based routing extensions that
//! want to hop between nearby bases.
//!
//! # Spatial index
//!
//! An R-tree (via `rstar`) over `[lat, lon]` prunes candidates with
//! degree-space bounding boxes before the exact haversine test, so building
//! the index is O(N log N) rather than O(N²) for large fleets.  The boxes wrap
//! across the antimeridian and widen to every longitude near the poles.

use rstar::{AABB, RTree, RTreeObject};

use er_core::geo::EARTH_RADIUS_KM;
use er_core::{GeoPoint, ResourceId};

use crate::ResourceRegistry;

/// R-tree entry: a `[lat, lon]` point with the owning resource.
#[derive(Clone)]
struct ResourceEntry {
    point: [f64; 2],
    id:    ResourceId,
}

impl RTreeObject for ResourceEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

/// Symmetric adjacency list of resources within a fixed radius.
#[derive(Debug, Clone)]
pub struct ProximityIndex {
    threshold_km: f64,
    /// Neighbours of each resource, indexed by `ResourceId`, sorted by id.
    adjacency:    Vec<Vec<(ResourceId, f64)>>,
}

impl ProximityIndex {
    /// Link every pair of resources (available or not) at most
    /// `threshold_km` apart.
    pub fn build(registry: &ResourceRegistry, threshold_km: f64) -> Self {
        let entries: Vec<ResourceEntry> = registry
            .iter()
            .map(|n| ResourceEntry { point: [n.location.lat, n.location.lon], id: n.id })
            .collect();
        let tree = RTree::bulk_load(entries);

        let mut adjacency = vec![Vec::new(); registry.len()];
        for node in registry.iter() {
            let mut neighbours: Vec<(ResourceId, f64)> = search_boxes(node.location, threshold_km)
                .iter()
                .flat_map(|search| tree.locate_in_envelope(search))
                .filter(|e| e.id != node.id)
                .filter_map(|e| {
                    let d = node.location.distance_km(GeoPoint::new(e.point[0], e.point[1]));
                    (d <= threshold_km).then_some((e.id, d))
                })
                .collect();
            neighbours.sort_unstable_by_key(|&(id, _)| id);
            neighbours.dedup_by_key(|&mut (id, _)| id);
            adjacency[node.id.index()] = neighbours;
        }

        Self { threshold_km, adjacency }
    }

    pub fn threshold_km(&self) -> f64 {
        self.threshold_km
    }

    /// Resources within the threshold of `id`, with distances in km.
    /// Empty for unknown ids.
    pub fn neighbours(&self, id: ResourceId) -> &[(ResourceId, f64)] {
        self.adjacency.get(id.index()).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of undirected links.
    pub fn link_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum::<usize>() / 2
    }
}

/// Degree-space boxes that together contain every point within `radius_km`
/// of `center`.
///
/// The latitude span is exactly the angular radius.  The longitude span is
/// the widest a spherical cap gets, `asin(sin r / cos φ)`.  A cap that
/// reaches a pole covers every longitude; one that crosses the antimeridian
/// is split into two boxes.
fn search_boxes(center: GeoPoint, radius_km: f64) -> Vec<AABB<[f64; 2]>> {
    let r = radius_km / EARTH_RADIUS_KM;
    let d_lat = r.to_degrees();
    let lat_lo = center.lat - d_lat;
    let lat_hi = center.lat + d_lat;

    if lat_hi >= 90.0 || lat_lo <= -90.0 {
        return vec![AABB::from_corners(
            [lat_lo.max(-90.0), -180.0],
            [lat_hi.min(90.0), 180.0],
        )];
    }

    let ratio = (r.sin() / center.lat.to_radians().cos()).min(1.0);
    let d_lon = ratio.asin().to_degrees();
    let lon_lo = center.lon - d_lon;
    let lon_hi = center.lon + d_lon;

    let mut boxes = vec![AABB::from_corners(
        [lat_lo, lon_lo.max(-180.0)],
        [lat_hi, lon_hi.min(180.0)],
    )];
    if lon_lo < -180.0 {
        boxes.push(AABB::from_corners([lat_lo, lon_lo + 360.0], [lat_hi, 180.0]));
    }
    if lon_hi > 180.0 {
        boxes.push(AABB::from_corners([lat_lo, -180.0], [lat_hi, lon_hi - 360.0]));
    }
    boxes
}
