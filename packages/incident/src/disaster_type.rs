//! Disaster type derivation.
//!
//! The feed has no type field, so the type is guessed from the cleaned
//! description with case-insensitive keyword matching. Rules are checked in
//! order and the first hit wins, so a description mentioning both a flood
//! and an earthquake is a [`DisasterType::Flood`].

use disaster_map_incident_models::DisasterType;

/// Keyword groups in priority order.
const RULES: &[(&[&str], DisasterType)] = &[
    (&["flood", "rain"], DisasterType::Flood),
    (&["earthquake"], DisasterType::Earthquake),
    (&["cyclone"], DisasterType::Cyclone),
    (&["fire"], DisasterType::Fire),
    (&["landslide"], DisasterType::Landslide),
    (&["drought"], DisasterType::Drought),
    (&["tsunami"], DisasterType::Tsunami),
];

/// Derives the disaster type of an incident from its description.
///
/// Returns [`DisasterType::Unknown`] for a missing or empty description and
/// [`DisasterType::Disaster`] when no keyword matches.
#[must_use]
pub fn derive_disaster_type(description: Option<&str>) -> DisasterType {
    let Some(description) = description.filter(|d| !d.is_empty()) else {
        return DisasterType::Unknown;
    };

    let lower = description.to_lowercase();

    RULES
        .iter()
        .find(|(keywords, _)| contains_any(&lower, keywords))
        .map_or(DisasterType::Disaster, |(_, disaster_type)| *disaster_type)
}

/// Checks if `haystack` contains any of the given `needles`.
fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}
