//! The incident record exactly as the upstream feed delivers it.
//!
//! The feed is externally owned and its shape is not guaranteed, so the
//! record is kept as an untyped JSON object and read through lenient
//! accessors that never fail.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Field names of the upstream feed.
pub mod fields {
    pub const INCIDENT_ID: &str = "incident_id";
    pub const STATE: &str = "state";
    pub const SEVERITY: &str = "enriched_severity_score_1_5";
    pub const DESCRIPTION: &str = "enriched_clean_description";
    pub const TIMESTAMP: &str = "timestamp";
    pub const STATUS: &str = "status";
    pub const PEOPLE_AFFECTED: &str = "enriched_est_people_affected";
    pub const URGENCY_SCORE: &str = "enriched_urgency_score";
    pub const POPULATION_DENSITY: &str = "enriched_population_density";
    pub const DISASTER_RISK_INDEX: &str = "enriched_disaster_risk_index";

    /// Suffixes appended to a resource kind's prefix.
    pub const RESOURCE_LOCATION: &str = "location";
    pub const RESOURCE_DISTANCE_KM: &str = "distance_km";
    pub const RESOURCE_ID: &str = "resource_id";
}

/// A raw incident object from the read endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawIncident {
    fields: Map<String, Value>,
}

impl RawIncident {
    /// Wraps a JSON value. Anything that is not an object becomes an
    /// empty record.
    #[must_use]
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(fields) => Self { fields },
            _ => Self::default(),
        }
    }

    #[must_use]
    pub const fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Returns the field value when it is truthy.
    ///
    /// `null`, `false`, `0`, `NaN`-like numbers and the empty string count
    /// as absent.
    #[must_use]
    pub fn truthy(&self, field: &str) -> Option<&Value> {
        self.fields.get(field).filter(|v| is_truthy(v))
    }

    /// Reads a field as text. Strings pass through and numbers are
    /// rendered, other shapes are treated as absent.
    #[must_use]
    pub fn text(&self, field: &str) -> Option<String> {
        match self.fields.get(field)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    /// Reads a field as a number, accepting numeric strings.
    #[must_use]
    pub fn number(&self, field: &str) -> Option<f64> {
        let number = match self.fields.get(field)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        number.filter(|n| n.is_finite())
    }

    /// Reads a field as an integer, accepting integral floats and numeric
    /// strings. Fractional values are treated as absent.
    #[must_use]
    pub fn integer(&self, field: &str) -> Option<i64> {
        match self.fields.get(field)? {
            Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(integral)),
            Value::String(s) => {
                let s = s.trim();
                s.parse()
                    .ok()
                    .or_else(|| s.parse::<f64>().ok().and_then(integral))
            }
            _ => None,
        }
    }
}

impl From<Map<String, Value>> for RawIncident {
    fn from(fields: Map<String, Value>) -> Self {
        Self { fields }
    }
}

/// JSON truthiness as the feed's producers treat it.
#[must_use]
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[allow(clippy::cast_possible_truncation)]
fn integral(f: f64) -> Option<i64> {
    (f.is_finite() && f.fract() == 0.0 && f.abs() < 9.0e15).then(|| f as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(value: Value) -> RawIncident {
        RawIncident::from_value(value)
    }

    #[test]
    fn non_object_becomes_empty_record() {
        assert!(raw(serde_json::json!([1, 2])).fields().is_empty());
        assert!(raw(Value::Null).fields().is_empty());
    }

    #[test]
    fn truthiness_matches_feed_semantics() {
        let record = raw(serde_json::json!({
            "zero": 0,
            "empty": "",
            "null": null,
            "no": false,
            "yes": "x",
            "num": 2.5,
        }));
        assert!(record.truthy("zero").is_none());
        assert!(record.truthy("empty").is_none());
        assert!(record.truthy("null").is_none());
        assert!(record.truthy("no").is_none());
        assert!(record.truthy("missing").is_none());
        assert!(record.truthy("yes").is_some());
        assert!(record.truthy("num").is_some());
    }

    #[test]
    fn reads_numbers_from_strings() {
        let record = raw(serde_json::json!({"a": "12.5", "b": 3, "c": "abc", "d": "4"}));
        assert_eq!(record.number("a"), Some(12.5));
        assert_eq!(record.number("b"), Some(3.0));
        assert_eq!(record.number("c"), None);
        assert_eq!(record.integer("d"), Some(4));
    }

    #[test]
    fn integer_rejects_fractions() {
        let record = raw(serde_json::json!({"a": 3.0, "b": 3.7, "c": "5.0"}));
        assert_eq!(record.integer("a"), Some(3));
        assert_eq!(record.integer("b"), None);
        assert_eq!(record.integer("c"), Some(5));
    }

    #[test]
    fn numeric_ids_render_as_text() {
        let record = raw(serde_json::json!({"incident_id": 42}));
        assert_eq!(record.text(fields::INCIDENT_ID).as_deref(), Some("42"));
    }
}
