#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Disaster incident record types, disaster taxonomy, and severity definitions.
//!
//! The upstream feed delivers [`RawIncident`] records with a flat,
//! enrichment-prefixed field layout. The normalizer turns each one into a
//! [`NormalizedIncident`], the view model every renderer in the workspace
//! consumes.

pub mod raw;

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

pub use raw::RawIncident;

/// Severity level for a disaster incident, from 1 (low) to 5 (severe).
///
/// Each level carries the display style used for stat cards, markers and
/// the legend.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum DisasterSeverity {
    /// Level 1
    Low = 1,
    /// Level 2
    Moderate = 2,
    /// Level 3
    High = 3,
    /// Level 4
    Critical = 4,
    /// Level 5
    Severe = 5,
}

impl DisasterSeverity {
    /// Returns the numeric value of this severity level.
    #[must_use]
    pub const fn value(self) -> u8 {
        self as u8
    }

    /// Creates a severity level from a numeric value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not in the range 1-5.
    pub const fn from_value(value: i64) -> Result<Self, InvalidSeverityError> {
        match value {
            1 => Ok(Self::Low),
            2 => Ok(Self::Moderate),
            3 => Ok(Self::High),
            4 => Ok(Self::Critical),
            5 => Ok(Self::Severe),
            _ => Err(InvalidSeverityError { value }),
        }
    }

    /// Resolves the style level for a stored severity value.
    ///
    /// Values outside 1-5 are stored verbatim on the incident but are
    /// styled, sized and counted as [`Self::Low`].
    #[must_use]
    pub const fn for_display(value: i64) -> Self {
        match Self::from_value(value) {
            Ok(severity) => severity,
            Err(_) => Self::Low,
        }
    }

    /// Human-readable label shown on stat cards and the legend.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Moderate => "Moderate",
            Self::High => "High",
            Self::Critical => "Critical",
            Self::Severe => "Severe",
        }
    }

    /// Primary hex color.
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Self::Low => "#10b981",
            Self::Moderate => "#22c55e",
            Self::High => "#f59e0b",
            Self::Critical => "#f97316",
            Self::Severe => "#ef4444",
        }
    }

    /// Translucent glow color used for drop shadows.
    #[must_use]
    pub const fn glow(self) -> &'static str {
        match self {
            Self::Low => "rgba(16, 185, 129, 0.4)",
            Self::Moderate => "rgba(34, 197, 94, 0.4)",
            Self::High => "rgba(245, 158, 11, 0.4)",
            Self::Critical => "rgba(249, 115, 22, 0.4)",
            Self::Severe => "rgba(239, 68, 68, 0.4)",
        }
    }

    /// Returns all variants of this enum, lowest level first.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Low,
            Self::Moderate,
            Self::High,
            Self::Critical,
            Self::Severe,
        ]
    }
}

/// Error returned when attempting to create a [`DisasterSeverity`] from an
/// invalid numeric value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidSeverityError {
    /// The invalid severity value that was provided.
    pub value: i64,
}

impl std::fmt::Display for InvalidSeverityError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid severity value {}: expected 1-5", self.value)
    }
}

impl std::error::Error for InvalidSeverityError {}

/// Disaster type label derived from an incident's description.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum DisasterType {
    /// Flooding or heavy rain
    Flood,
    Earthquake,
    Cyclone,
    Fire,
    Landslide,
    Drought,
    Tsunami,
    /// A description is present but names no known disaster
    Disaster,
    /// No description at all
    Unknown,
}

/// Kind of emergency asset precomputed upstream as "nearest" to an incident.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display,
)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Ambulance,
    Hospital,
    Food,
    Shelter,
    ResponseUnit,
}

impl ResourceKind {
    /// Field prefix of this resource's flattened triple in the raw feed.
    #[must_use]
    pub const fn source_prefix(self) -> &'static str {
        match self {
            Self::Ambulance => "nearest_resources_ambulances_0",
            Self::Hospital => "nearest_resources_hospitals_0",
            Self::Food => "nearest_resources_food_0",
            Self::Shelter => "nearest_resources_shelters_0",
            Self::ResponseUnit => "nearest_resources_response_units_0",
        }
    }

    /// Row label in the detail panel.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Ambulance => "Ambulance",
            Self::Hospital => "Hospital",
            Self::Food => "Food Supply",
            Self::Shelter => "Shelter",
            Self::ResponseUnit => "Response Unit",
        }
    }

    #[must_use]
    pub const fn icon(self) -> &'static str {
        match self {
            Self::Ambulance => "🚑",
            Self::Hospital => "🏥",
            Self::Food => "🍲",
            Self::Shelter => "🏠",
            Self::ResponseUnit => "🚨",
        }
    }

    /// Returns all variants in panel display order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Ambulance,
            Self::Hospital,
            Self::Food,
            Self::Shelter,
            Self::ResponseUnit,
        ]
    }
}

/// The closest known emergency asset of one [`ResourceKind`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceRef {
    /// Location label of the asset.
    pub location: String,
    /// Distance from the incident in kilometers.
    pub distance_km: Option<f64>,
    /// Upstream resource identifier.
    pub resource_id: Option<String>,
}

/// An incident flattened into the view model consumed by the dashboard.
///
/// Produced only by the normalizer. `severity` is stored exactly as the
/// feed delivered it (or `1` when the feed value was falsy), so it may lie
/// outside 1-5; use [`Self::display_severity`] for styling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedIncident {
    /// Upstream incident ID.
    pub incident_id: Option<String>,
    /// State name as written in the feed (e.g. `"TamilNadu"`).
    pub state: Option<String>,
    /// Severity score, `1` when absent.
    pub severity: i64,
    /// Cleaned description, or a fixed placeholder when absent.
    pub description: String,
    /// Type derived from the description keywords.
    pub disaster_type: DisasterType,
    /// Report timestamp as delivered.
    pub timestamp: Option<String>,
    /// Workflow status as delivered.
    pub status: Option<String>,
    pub est_people_affected: Option<f64>,
    /// Urgency in the range 0-1.
    pub urgency_score: Option<f64>,
    pub population_density: Option<f64>,
    pub disaster_risk_index: Option<f64>,
    pub nearest_ambulance: Option<ResourceRef>,
    pub nearest_hospital: Option<ResourceRef>,
    pub nearest_food: Option<ResourceRef>,
    pub nearest_shelter: Option<ResourceRef>,
    pub nearest_response_unit: Option<ResourceRef>,
}

impl NormalizedIncident {
    /// Severity level used for color, label, marker size and stat grouping.
    #[must_use]
    pub const fn display_severity(&self) -> DisasterSeverity {
        DisasterSeverity::for_display(self.severity)
    }

    /// Returns the nearest resource of the given kind, if the feed had one.
    #[must_use]
    pub const fn resource(&self, kind: ResourceKind) -> Option<&ResourceRef> {
        match kind {
            ResourceKind::Ambulance => self.nearest_ambulance.as_ref(),
            ResourceKind::Hospital => self.nearest_hospital.as_ref(),
            ResourceKind::Food => self.nearest_food.as_ref(),
            ResourceKind::Shelter => self.nearest_shelter.as_ref(),
            ResourceKind::ResponseUnit => self.nearest_response_unit.as_ref(),
        }
    }

    /// Sets (or clears) the nearest resource of the given kind.
    pub fn set_resource(&mut self, kind: ResourceKind, resource: Option<ResourceRef>) {
        let slot = match kind {
            ResourceKind::Ambulance => &mut self.nearest_ambulance,
            ResourceKind::Hospital => &mut self.nearest_hospital,
            ResourceKind::Food => &mut self.nearest_food,
            ResourceKind::Shelter => &mut self.nearest_shelter,
            ResourceKind::ResponseUnit => &mut self.nearest_response_unit,
        };
        *slot = resource;
    }

    /// Present resources in panel display order.
    pub fn resources(&self) -> impl Iterator<Item = (ResourceKind, &ResourceRef)> {
        ResourceKind::all()
            .iter()
            .filter_map(|kind| self.resource(*kind).map(|r| (*kind, r)))
    }

    /// Number of present resources (0-5).
    #[must_use]
    pub fn resource_count(&self) -> usize {
        self.resources().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_from_value_roundtrip() {
        for v in 1..=5i64 {
            let severity = DisasterSeverity::from_value(v).unwrap();
            assert_eq!(i64::from(severity.value()), v);
        }
        assert!(DisasterSeverity::from_value(0).is_err());
        assert!(DisasterSeverity::from_value(6).is_err());
    }

    #[test]
    fn out_of_range_severity_displays_as_low() {
        assert_eq!(DisasterSeverity::for_display(7), DisasterSeverity::Low);
        assert_eq!(DisasterSeverity::for_display(-2), DisasterSeverity::Low);
        assert_eq!(DisasterSeverity::for_display(4), DisasterSeverity::Critical);
    }

    #[test]
    fn severity_table_has_five_distinct_levels() {
        let all = DisasterSeverity::all();
        assert_eq!(all.len(), 5);
        for (idx, severity) in all.iter().enumerate() {
            assert_eq!(usize::from(severity.value()), idx + 1);
        }
        assert_eq!(DisasterSeverity::Severe.color(), "#ef4444");
        assert_eq!(DisasterSeverity::Moderate.label(), "Moderate");
    }

    #[test]
    fn disaster_type_displays_variant_name() {
        assert_eq!(DisasterType::Flood.to_string(), "Flood");
        assert_eq!(
            "Tsunami".parse::<DisasterType>().unwrap(),
            DisasterType::Tsunami
        );
    }

    #[test]
    fn resource_prefixes_are_unique() {
        let mut prefixes: Vec<&str> = ResourceKind::all()
            .iter()
            .map(|k| k.source_prefix())
            .collect();
        prefixes.sort_unstable();
        prefixes.dedup();
        assert_eq!(prefixes.len(), ResourceKind::all().len());
    }
}
