#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Normalization of raw feed records into dashboard incidents.
//!
//! The read endpoint returns either one incident object or an array of
//! them. [`normalize_payload`] accepts both and produces one
//! [`NormalizedIncident`] per record, in feed order. Normalization is
//! best-effort: missing or malformed fields fall back to defaults and no
//! record is ever rejected.

pub mod disaster_type;

use disaster_map_incident_models::raw::fields;
use disaster_map_incident_models::{NormalizedIncident, RawIncident, ResourceKind, ResourceRef};

pub use disaster_type::derive_disaster_type;

/// Description used when the feed has none.
pub const DESCRIPTION_PLACEHOLDER: &str = "No description available";

/// Severity used when the feed value is falsy.
pub const DEFAULT_SEVERITY: i64 = 1;

/// Splits a read-endpoint response body into raw records.
///
/// A single object is treated as a one-element list. Array elements that
/// are not objects become empty records, and a scalar body yields no
/// records at all.
#[must_use]
pub fn split_payload(payload: serde_json::Value) -> Vec<RawIncident> {
    match payload {
        serde_json::Value::Array(items) => items.into_iter().map(RawIncident::from_value).collect(),
        serde_json::Value::Object(map) => vec![RawIncident::from(map)],
        other => {
            log::warn!("Ignoring non-object incident payload: {other}");
            Vec::new()
        }
    }
}

/// Normalizes a read-endpoint response body.
#[must_use]
pub fn normalize_payload(payload: serde_json::Value) -> Vec<NormalizedIncident> {
    normalize_all(&split_payload(payload))
}

/// Normalizes a list of raw records, preserving order.
#[must_use]
pub fn normalize_all(records: &[RawIncident]) -> Vec<NormalizedIncident> {
    records.iter().map(normalize).collect()
}

/// Normalizes a single raw record.
#[must_use]
pub fn normalize(record: &RawIncident) -> NormalizedIncident {
    let raw_description = record.text(fields::DESCRIPTION);

    // Integral scores are kept as-is, including values outside 1-5. Falsy
    // scores fall back, and so do truthy ones that are not integers.
    let severity = match record.truthy(fields::SEVERITY) {
        None => DEFAULT_SEVERITY,
        Some(raw) => match record.integer(fields::SEVERITY) {
            Some(s) if s != 0 => s,
            _ => {
                log::debug!("Severity score {raw} is not an integer, using {DEFAULT_SEVERITY}");
                DEFAULT_SEVERITY
            }
        },
    };

    let mut incident = NormalizedIncident {
        incident_id: record.text(fields::INCIDENT_ID),
        state: record.text(fields::STATE),
        severity,
        disaster_type: derive_disaster_type(raw_description.as_deref()),
        description: raw_description
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| DESCRIPTION_PLACEHOLDER.to_string()),
        timestamp: record.text(fields::TIMESTAMP),
        status: record.text(fields::STATUS),
        est_people_affected: record.number(fields::PEOPLE_AFFECTED),
        urgency_score: record.number(fields::URGENCY_SCORE),
        population_density: record.number(fields::POPULATION_DENSITY),
        disaster_risk_index: record.number(fields::DISASTER_RISK_INDEX),
        nearest_ambulance: None,
        nearest_hospital: None,
        nearest_food: None,
        nearest_shelter: None,
        nearest_response_unit: None,
    };

    for kind in ResourceKind::all() {
        incident.set_resource(*kind, extract_resource(record, *kind));
    }

    incident
}

/// Extracts one nearest-resource triple. The resource is present only when
/// its location field is truthy.
fn extract_resource(record: &RawIncident, kind: ResourceKind) -> Option<ResourceRef> {
    let prefix = kind.source_prefix();
    let location_field = format!("{prefix}_{}", fields::RESOURCE_LOCATION);

    record.truthy(&location_field)?;
    let location = record.text(&location_field)?;

    Some(ResourceRef {
        location,
        distance_km: record.number(&format!("{prefix}_{}", fields::RESOURCE_DISTANCE_KM)),
        resource_id: record.text(&format!("{prefix}_{}", fields::RESOURCE_ID)),
    })
}
