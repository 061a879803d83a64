//! Incident severity, responder categories and the `Incident` record.

use crate::{CoreError, CoreResult, GeoPoint};

// ── Severity ──────────────────────────────────────────────────────────────────

/// How urgent an incident is.
///
/// Variants are declared in dispatch order, so the derived `Ord` puts the
/// most urgent severity first: `Fire < Medical < Crime < Other`.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Severity {
    Fire,
    Medical,
    Crime,
    Other,
}

impl Severity {
    /// Every severity, most urgent first.
    pub const ALL: [Severity; 4] = [Severity::Fire, Severity::Medical, Severity::Crime, Severity::Other];

    /// Operator code (1–4).  Lower rank is dispatched first.
    #[inline]
    pub fn rank(self) -> u8 {
        match self {
            Severity::Fire    => 1,
            Severity::Medical => 2,
            Severity::Crime   => 3,
            Severity::Other   => 4,
        }
    }

    /// Parse an operator severity code.  Codes outside 1–4 are rejected.
    pub fn from_code(code: u8) -> CoreResult<Severity> {
        match code {
            1 => Ok(Severity::Fire),
            2 => Ok(Severity::Medical),
            3 => Ok(Severity::Crime),
            4 => Ok(Severity::Other),
            _ => Err(CoreError::InvalidSeverity(code)),
        }
    }

    /// The class of responder this severity calls for.
    ///
    /// `Other` falls back to police.
    #[inline]
    pub fn required_category(self) -> ResourceCategory {
        match self {
            Severity::Fire    => ResourceCategory::FireBrigade,
            Severity::Medical => ResourceCategory::Ambulance,
            Severity::Crime   => ResourceCategory::PoliceVan,
            Severity::Other   => ResourceCategory::PoliceVan,
        }
    }

    /// Name shown in the operator menu.
    pub fn label(self) -> &'static str {
        match self {
            Severity::Fire    => "Fire",
            Severity::Medical => "Medical",
            Severity::Crime   => "Crime",
            Severity::Other   => "Other",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Fire    => "fire",
            Severity::Medical => "medical",
            Severity::Crime   => "crime",
            Severity::Other   => "other",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── ResourceCategory ──────────────────────────────────────────────────────────

/// The class of responder a resource belongs to.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ResourceCategory {
    FireBrigade,
    Ambulance,
    PoliceVan,
}

impl ResourceCategory {
    /// Label used in CSV columns and log fields.
    pub fn as_str(self) -> &'static str {
        match self {
            ResourceCategory::FireBrigade => "fire_brigade",
            ResourceCategory::Ambulance   => "ambulance",
            ResourceCategory::PoliceVan   => "police_van",
        }
    }
}

impl std::fmt::Display for ResourceCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Incident ──────────────────────────────────────────────────────────────────

/// A reported emergency.  Never mutated once created.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Incident {
    /// Free-text place label entered by the operator.
    pub place:    String,
    pub severity: Severity,
    pub location: GeoPoint,
}

impl Incident {
    pub fn new(place: impl Into<String>, severity: Severity, location: GeoPoint) -> Self {
        Self { place: place.into(), severity, location }
    }
}
