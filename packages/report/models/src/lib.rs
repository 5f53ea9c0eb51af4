#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Incident report draft type, form fields, and option lists.
//!
//! An [`IncidentDraft`] is the report form's working copy. Every field is a
//! plain string, exactly as it is posted to the ingestion endpoint.

use disaster_map_incident_models::DisasterSeverity;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Disaster types offered by the report form.
pub const REPORT_DISASTER_TYPES: &[&str] = &[
    "Earthquake",
    "Flood",
    "Cyclone",
    "Landslide",
    "Drought",
    "Fire",
    "Tsunami",
    "Other",
];

/// A draft incident report.
///
/// Serializes to the ingestion endpoint's body: a JSON object whose seven
/// keys are all strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncidentDraft {
    #[serde(default)]
    pub incident_id: String,
    #[serde(default)]
    pub disaster_type: String,
    /// Severity level `"1"`-`"5"`.
    #[serde(default)]
    pub severity: String,
    #[serde(default)]
    pub description: String,
    /// Local date-time as entered (`YYYY-MM-DDTHH:MM`).
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub district: String,
}

/// One field of the report form.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumString, AsRefStr,
)]
#[strum(serialize_all = "snake_case")]
pub enum DraftField {
    IncidentId,
    DisasterType,
    Severity,
    State,
    District,
    Timestamp,
    Description,
}

impl DraftField {
    /// Returns all fields in form order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::IncidentId,
            Self::DisasterType,
            Self::Severity,
            Self::State,
            Self::District,
            Self::Timestamp,
            Self::Description,
        ]
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::IncidentId => "Incident ID",
            Self::DisasterType => "Disaster Type",
            Self::Severity => "Severity Level",
            Self::State => "State",
            Self::District => "District",
            Self::Timestamp => "Date & Time",
            Self::Description => "Description",
        }
    }

    #[must_use]
    pub const fn icon(self) -> &'static str {
        match self {
            Self::IncidentId => "🆔",
            Self::DisasterType => "⚠️",
            Self::Severity => "📊",
            Self::State => "📍",
            Self::District => "🏘️",
            Self::Timestamp => "🕒",
            Self::Description => "📄",
        }
    }

    /// Input placeholder for free-text fields.
    #[must_use]
    pub const fn placeholder(self) -> Option<&'static str> {
        match self {
            Self::IncidentId => Some("e.g., INC-2025-001"),
            Self::District => Some("Enter district name"),
            Self::Description => Some("Provide detailed information about the incident..."),
            Self::DisasterType | Self::Severity | Self::State | Self::Timestamp => None,
        }
    }

    /// The fixed `(value, label)` choices for select fields, `None` for
    /// free-text fields.
    #[must_use]
    pub fn options(self) -> Option<Vec<(String, String)>> {
        match self {
            Self::DisasterType => Some(
                REPORT_DISASTER_TYPES
                    .iter()
                    .map(|t| ((*t).to_string(), (*t).to_string()))
                    .collect(),
            ),
            Self::Severity => Some(severity_options()),
            Self::State => Some(
                disaster_map_geography_models::state_names()
                    .map(|s| (s.to_string(), s.to_string()))
                    .collect(),
            ),
            Self::IncidentId | Self::District | Self::Timestamp | Self::Description => None,
        }
    }

    /// Prompt shown as the empty first option of a select field.
    #[must_use]
    pub const fn select_prompt(self) -> Option<&'static str> {
        match self {
            Self::DisasterType => Some("Select disaster type"),
            Self::Severity => Some("Select severity"),
            Self::State => Some("Select state"),
            Self::IncidentId | Self::District | Self::Timestamp | Self::Description => None,
        }
    }
}

/// Severity choices, `("1", "Level 1 - Low")` through `("5", "Level 5 - Severe")`.
#[must_use]
pub fn severity_options() -> Vec<(String, String)> {
    DisasterSeverity::all()
        .iter()
        .map(|s| {
            (
                s.value().to_string(),
                format!("Level {} - {}", s.value(), s.label()),
            )
        })
        .collect()
}

impl IncidentDraft {
    #[must_use]
    pub fn get(&self, field: DraftField) -> &str {
        match field {
            DraftField::IncidentId => &self.incident_id,
            DraftField::DisasterType => &self.disaster_type,
            DraftField::Severity => &self.severity,
            DraftField::State => &self.state,
            DraftField::District => &self.district,
            DraftField::Timestamp => &self.timestamp,
            DraftField::Description => &self.description,
        }
    }

    pub fn set(&mut self, field: DraftField, value: impl Into<String>) {
        let slot = match field {
            DraftField::IncidentId => &mut self.incident_id,
            DraftField::DisasterType => &mut self.disaster_type,
            DraftField::Severity => &mut self.severity,
            DraftField::State => &mut self.state,
            DraftField::District => &mut self.district,
            DraftField::Timestamp => &mut self.timestamp,
            DraftField::Description => &mut self.description,
        };
        *slot = value.into();
    }

    /// Resets every field to the empty string.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        DraftField::all().iter().all(|f| self.get(*f).is_empty())
    }

    /// Checks that every field is filled in and that select fields hold one
    /// of their fixed options. No format checks beyond that.
    ///
    /// # Errors
    ///
    /// Returns a [`DraftValidationError`] listing every failing field.
    pub fn validate(&self) -> Result<(), DraftValidationError> {
        let mut issues = Vec::new();

        for field in DraftField::all() {
            let value = self.get(*field);
            if value.is_empty() {
                issues.push(DraftIssue::Missing(*field));
                continue;
            }
            let in_options = field
                .options()
                .is_none_or(|options| options.iter().any(|(v, _)| v == value));
            if !in_options {
                issues.push(DraftIssue::NotAnOption(*field));
            }
        }

        if issues.is_empty() {
            Ok(())
        } else {
            Err(DraftValidationError { issues })
        }
    }
}

/// A single reason a draft cannot be submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftIssue {
    /// The field is empty.
    Missing(DraftField),
    /// A select field holds a value outside its option list.
    NotAnOption(DraftField),
}

impl std::fmt::Display for DraftIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Missing(field) => write!(f, "{} is required", field.label()),
            Self::NotAnOption(field) => write!(f, "{} is not a valid choice", field.label()),
        }
    }
}

/// Error returned by [`IncidentDraft::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftValidationError {
    /// Every failing field, in form order.
    pub issues: Vec<DraftIssue>,
}

impl std::fmt::Display for DraftValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let messages: Vec<String> = self.issues.iter().map(ToString::to_string).collect();
        write!(f, "invalid incident draft: {}", messages.join(", "))
    }
}

impl std::error::Error for DraftValidationError {}
