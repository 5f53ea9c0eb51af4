//! Per-severity incident counts for the stat cards.

use disaster_map_incident_models::{DisasterSeverity, NormalizedIncident};
use serde::Serialize;

/// Incident counts per severity level.
///
/// Always covers all five levels, including empty ones. Incidents whose
/// stored severity is outside 1-5 are counted under their display level,
/// so the counts always sum to the total.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeverityStats {
    counts: [usize; 5],
}

/// One stat card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeverityCount {
    pub level: u8,
    pub label: &'static str,
    pub color: &'static str,
    pub count: usize,
}

impl SeverityStats {
    /// Counts every incident, whether or not it can be placed on the map.
    #[must_use]
    pub fn from_incidents(incidents: &[NormalizedIncident]) -> Self {
        let mut counts = [0; 5];
        for incident in incidents {
            counts[usize::from(incident.display_severity().value()) - 1] += 1;
        }
        Self { counts }
    }

    #[must_use]
    pub const fn count(&self, severity: DisasterSeverity) -> usize {
        self.counts[severity.value() as usize - 1]
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Stat cards from level 1 to level 5.
    #[must_use]
    pub fn cards(&self) -> Vec<SeverityCount> {
        DisasterSeverity::all()
            .iter()
            .map(|severity| SeverityCount {
                level: severity.value(),
                label: severity.label(),
                color: severity.color(),
                count: self.count(*severity),
            })
            .collect()
    }
}

/// "Tracking N active incident(s) across India".
#[must_use]
pub fn tracking_subtitle(total: usize) -> String {
    let plural = if total == 1 { "" } else { "s" };
    format!("Tracking {total} active incident{plural} across India")
}

#[cfg(test)]
mod tests {
    use disaster_map_incident::normalize_payload;
    use serde_json::json;

    use super::*;

    #[test]
    fn counts_each_level_and_keeps_empty_cards() {
        let incidents = normalize_payload(json!([
            {"enriched_severity_score_1_5": 3, "state": "Kerala"},
            {"enriched_severity_score_1_5": 3, "state": "Atlantis"},
            {"enriched_severity_score_1_5": 5},
            {},
        ]));
        let stats = SeverityStats::from_incidents(&incidents);

        let counts: Vec<usize> = stats.cards().iter().map(|c| c.count).collect();
        assert_eq!(counts, [1, 0, 2, 0, 1]);
        assert_eq!(stats.total(), 4);
    }

    #[test]
    fn out_of_range_severity_counts_as_low() {
        let incidents = normalize_payload(json!([
            {"enriched_severity_score_1_5": 9},
            {"enriched_severity_score_1_5": -1},
        ]));
        let stats = SeverityStats::from_incidents(&incidents);
        assert_eq!(stats.count(DisasterSeverity::Low), 2);
        assert_eq!(stats.total(), incidents.len());
    }

    #[test]
    fn empty_list_has_five_zero_cards() {
        let cards = SeverityStats::from_incidents(&[]).cards();
        assert_eq!(cards.len(), 5);
        assert!(cards.iter().all(|c| c.count == 0));
        assert_eq!(cards[4].label, "Severe");
    }

    #[test]
    fn subtitle_pluralizes() {
        assert_eq!(tracking_subtitle(0), "Tracking 0 active incidents across India");
        assert_eq!(tracking_subtitle(1), "Tracking 1 active incident across India");
        assert_eq!(tracking_subtitle(12), "Tracking 12 active incidents across India");
    }
}
