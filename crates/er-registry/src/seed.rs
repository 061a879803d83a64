//! Built-in resource fleet: three fire brigades, three ambulances and three
//! police vans around New Delhi.

use er_core::{GeoPoint, ResourceCategory};

use crate::{RegistryResult, ResourceRegistry, ResourceRegistryBuilder};

const FLEET: [(&str, f64, f64, ResourceCategory); 9] = [
    ("Fire_Connaught",    28.6304, 77.2177, ResourceCategory::FireBrigade),
    ("Fire_Karol",        28.6487, 77.1900, ResourceCategory::FireBrigade),
    ("Fire_Dwarka",       28.5595, 77.0553, ResourceCategory::FireBrigade),
    ("Ambulance_Moti",    28.5916, 77.2022, ResourceCategory::Ambulance),
    ("Ambulance_Sarai",   28.6478, 77.1945, ResourceCategory::Ambulance),
    ("Ambulance_Khichdi", 28.5398, 77.0146, ResourceCategory::Ambulance),
    ("Police_Kashmiri",   28.6253, 77.2192, ResourceCategory::PoliceVan),
    ("Police_Alaknanda",  28.5541, 77.2483, ResourceCategory::PoliceVan),
    ("Police_Ashok",      28.5839, 77.2189, ResourceCategory::PoliceVan),
];

/// The nine-resource seed fleet, all available.
pub fn delhi_fleet() -> RegistryResult<ResourceRegistry> {
    let mut b = ResourceRegistryBuilder::new();
    for (name, lat, lon, category) in FLEET {
        b.add(name, GeoPoint::new(lat, lon), category);
    }
    b.build()
}
