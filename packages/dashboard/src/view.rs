//! Render-ready view models for map markers and the detail panel.

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone as _, Utc};
use disaster_map_geography_models::{LonLat, state_coords};
use disaster_map_incident_models::{DisasterSeverity, NormalizedIncident, ResourceKind};

use crate::state::{DashboardState, IncidentKey};

/// Panel height with resources collapsed and expanded.
const PANEL_HEIGHT_COLLAPSED: f64 = 450.0;
const PANEL_HEIGHT_EXPANDED: f64 = 550.0;

/// IST, the zone timestamps are shown in.
const IST_OFFSET_SECS: i32 = 5 * 3600 + 30 * 60;

/// One marker on the map.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerView {
    pub key: IncidentKey,
    pub coords: LonLat,
    pub severity: DisasterSeverity,
    pub outer_radius: f64,
    pub inner_radius: f64,
    pub glow_radius: f64,
    pub selected: bool,
    /// Tooltip, e.g. `"Flood · Kerala · Level 3"`.
    pub title: String,
}

/// Builds one marker per incident whose state has a reference point.
/// Incidents in unknown states are left off the map.
#[must_use]
pub fn markers(state: &DashboardState) -> Vec<MarkerView> {
    state
        .keyed_incidents()
        .filter_map(|(key, incident)| {
            let coords = incident.state.as_deref().and_then(state_coords)?;
            let severity = incident.display_severity();
            let level = f64::from(severity.value());
            Some(MarkerView {
                selected: state.is_selected(&key),
                key,
                coords,
                severity,
                outer_radius: 2.0f64.mul_add(level, 10.0),
                inner_radius: 5.0 + level,
                glow_radius: level * 2.0,
                title: format!(
                    "{} · {} · Level {}",
                    incident.disaster_type,
                    incident.state.as_deref().unwrap_or_default(),
                    incident.severity
                ),
            })
        })
        .collect()
}

/// One row of the nearest-resources list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceLine {
    pub kind: ResourceKind,
    pub location: String,
    /// `"2.4 km"`, or `"n/a"` when the feed had no distance.
    pub distance: String,
}

/// The detail panel of the selected incident.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailPanel {
    pub key: IncidentKey,
    /// Anchor of the panel; the selected marker's reference point.
    pub coords: LonLat,
    pub severity: DisasterSeverity,
    pub title: String,
    pub incident_id: String,
    /// `"Level N"` with the stored severity.
    pub level_label: String,
    pub description: String,
    pub people_affected: Option<String>,
    pub urgency: Option<String>,
    pub resource_count: usize,
    pub resources_expanded: bool,
    /// Present resources; shown only when expanded.
    pub resources: Vec<ResourceLine>,
    pub timestamp: Option<String>,
    pub height: f64,
}

/// Builds the panel for the selected incident. `None` when nothing is
/// selected or the selected incident cannot be placed on the map.
#[must_use]
pub fn detail_panel(state: &DashboardState) -> Option<DetailPanel> {
    let (selection, incident) = state.selected_incident()?;
    let coords = incident.state.as_deref().and_then(state_coords)?;

    Some(DetailPanel {
        key: selection.key.clone(),
        coords,
        severity: incident.display_severity(),
        title: incident.disaster_type.to_string(),
        incident_id: incident.incident_id.clone().unwrap_or_default(),
        level_label: format!("Level {}", incident.severity),
        description: incident.description.clone(),
        people_affected: incident
            .est_people_affected
            .filter(|n| *n != 0.0)
            .map(format_count),
        urgency: incident
            .urgency_score
            .filter(|n| *n != 0.0)
            .map(format_percent),
        resource_count: incident.resource_count(),
        resources_expanded: selection.resources_expanded,
        resources: resource_lines(incident),
        timestamp: incident
            .timestamp
            .as_deref()
            .filter(|t| !t.is_empty())
            .map(format_timestamp),
        height: if selection.resources_expanded {
            PANEL_HEIGHT_EXPANDED
        } else {
            PANEL_HEIGHT_COLLAPSED
        },
    })
}

fn resource_lines(incident: &NormalizedIncident) -> Vec<ResourceLine> {
    incident
        .resources()
        .map(|(kind, resource)| ResourceLine {
            kind,
            location: resource.location.clone(),
            distance: resource
                .distance_km
                .map_or_else(|| "n/a".to_string(), |d| format!("{d} km")),
        })
        .collect()
}

/// Formats a head count with Indian digit grouping (`12,34,567`).
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn format_count(n: f64) -> String {
    let rounded = n.round();
    let negative = rounded < 0.0;
    let digits = format!("{}", rounded.abs() as u64);

    let grouped = if digits.len() <= 3 {
        digits
    } else {
        let (head, tail) = digits.split_at(digits.len() - 3);
        let mut parts: Vec<&str> = Vec::new();
        let mut rest = head;
        while rest.len() > 2 {
            let (left, right) = rest.split_at(rest.len() - 2);
            parts.push(right);
            rest = left;
        }
        parts.push(rest);
        parts.reverse();
        format!("{},{tail}", parts.join(","))
    };

    if negative {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// Formats a 0-1 score as a whole percentage.
#[must_use]
pub fn format_percent(score: f64) -> String {
    format!("{}%", (score * 100.0).round())
}

/// Formats a feed timestamp as `d Mon YYYY, h:mm am` in IST.
///
/// Offset-qualified timestamps are converted; naive ones are taken as IST
/// already, and all-digit values as epoch milliseconds. Anything
/// unparseable is returned unchanged.
#[must_use]
pub fn format_timestamp(raw: &str) -> String {
    let Some(ist) = FixedOffset::east_opt(IST_OFFSET_SECS) else {
        return raw.to_string();
    };

    parse_timestamp(raw.trim(), &ist).map_or_else(
        || raw.to_string(),
        |dt| dt.format("%-d %b %Y, %-I:%M %P").to_string(),
    )
}

fn parse_timestamp(raw: &str, ist: &FixedOffset) -> Option<DateTime<FixedOffset>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(ist));
    }
    if !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit()) {
        let millis: i64 = raw.parse().ok()?;
        return DateTime::<Utc>::from_timestamp_millis(millis).map(|dt| dt.with_timezone(ist));
    }
    for format in [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S",
    ] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return ist.from_local_datetime(&naive).single();
        }
    }
    None
}
