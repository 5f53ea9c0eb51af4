#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the disaster map server.
//!
//! These types are serialized to JSON for the REST API. They are separate
//! from the incident view model to allow independent evolution of the API
//! contract.

use disaster_map_incident_models::{DisasterType, NormalizedIncident, ResourceKind};
use serde::{Deserialize, Serialize};

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiHealth {
    pub healthy: bool,
    pub version: String,
}

/// One nearest resource of an incident.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResource {
    pub kind: ResourceKind,
    pub location: String,
    pub distance_km: Option<f64>,
    pub resource_id: Option<String>,
}

/// A normalized incident as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiIncident {
    pub incident_id: Option<String>,
    pub state: Option<String>,
    /// Stored severity, possibly outside 1-5.
    pub severity: i64,
    /// Severity level used for styling (1-5).
    pub display_severity: u8,
    pub disaster_type: DisasterType,
    pub description: String,
    pub timestamp: Option<String>,
    pub status: Option<String>,
    pub est_people_affected: Option<f64>,
    pub urgency_score: Option<f64>,
    pub population_density: Option<f64>,
    pub disaster_risk_index: Option<f64>,
    /// Present resources, in fixed kind order.
    pub resources: Vec<ApiResource>,
}

impl From<&NormalizedIncident> for ApiIncident {
    fn from(incident: &NormalizedIncident) -> Self {
        Self {
            incident_id: incident.incident_id.clone(),
            state: incident.state.clone(),
            severity: incident.severity,
            display_severity: incident.display_severity().value(),
            disaster_type: incident.disaster_type,
            description: incident.description.clone(),
            timestamp: incident.timestamp.clone(),
            status: incident.status.clone(),
            est_people_affected: incident.est_people_affected,
            urgency_score: incident.urgency_score,
            population_density: incident.population_density,
            disaster_risk_index: incident.disaster_risk_index,
            resources: incident
                .resources()
                .map(|(kind, resource)| ApiResource {
                    kind,
                    location: resource.location.clone(),
                    distance_km: resource.distance_km,
                    resource_id: resource.resource_id.clone(),
                })
                .collect(),
        }
    }
}

/// Incident count of one severity level.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiSeverityCount {
    pub level: u8,
    pub label: String,
    pub color: String,
    pub count: usize,
}

/// Per-level statistics over the current feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiStats {
    pub total: usize,
    /// Always five entries, level 1 first.
    pub levels: Vec<ApiSeverityCount>,
}

/// Query parameters of the dashboard page.
///
/// `selected` is the key of the selected incident; `resources=open` expands
/// its nearest-resources list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardQuery {
    pub selected: Option<String>,
    pub resources: Option<String>,
}

impl DashboardQuery {
    /// Value of `resources` that expands the resource list.
    pub const RESOURCES_OPEN: &str = "open";

    #[must_use]
    pub fn resources_open(&self) -> bool {
        self.resources.as_deref() == Some(Self::RESOURCES_OPEN)
    }
}
