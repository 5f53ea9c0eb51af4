//! `incidents`: fetch the feed once and print it.

use disaster_map_dashboard::{SeverityStats, tracking_subtitle};
use disaster_map_incident::normalize_all;
use disaster_map_incident_models::NormalizedIncident;
use disaster_map_source::{EndpointConfig, HttpFeed, IncidentReader as _};
use indicatif::MultiProgress;

use crate::progress::spinner;

const DESCRIPTION_WIDTH: usize = 48;

/// Fetches, normalizes and prints the current incidents, either as a
/// table with a per-level summary or as JSON.
///
/// # Errors
///
/// Returns an error if the feed cannot be fetched or the output cannot be
/// serialized.
pub async fn run(
    multi: &MultiProgress,
    endpoints: EndpointConfig,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let feed = HttpFeed::new(endpoints)?;

    let bar = spinner(multi, "Loading disaster data...");
    let records = feed.fetch_latest().await;
    bar.finish_and_clear();
    let incidents = normalize_all(&records?);

    if json {
        println!("{}", serde_json::to_string_pretty(&incidents)?);
        return Ok(());
    }

    println!("{}", tracking_subtitle(incidents.len()));
    println!();
    print_table(&incidents);
    println!();
    print_summary(&SeverityStats::from_incidents(&incidents));

    Ok(())
}

fn print_table(incidents: &[NormalizedIncident]) {
    println!(
        "{:<16} {:<12} {:<11} {:>5} {:>9}  Description",
        "ID", "State", "Type", "Level", "Resources"
    );
    for incident in incidents {
        println!(
            "{:<16} {:<12} {:<11} {:>5} {:>9}  {}",
            incident.incident_id.as_deref().unwrap_or("-"),
            incident.state.as_deref().unwrap_or("-"),
            incident.disaster_type.to_string(),
            incident.severity,
            incident.resource_count(),
            truncate(&incident.description, DESCRIPTION_WIDTH)
        );
    }
}

fn print_summary(stats: &SeverityStats) {
    for card in stats.cards() {
        println!("  Level {} - {:<9} {}", card.level, card.label, card.count);
    }
}

fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let mut out: String = s.chars().take(width.saturating_sub(3)).collect();
        out.push_str("...");
        out
    }
}
