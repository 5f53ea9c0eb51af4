//! `dashboard`: the incident dashboard in the terminal.

use std::sync::Arc;

use dialoguer::Select;
use disaster_map_dashboard::{
    DashboardEvent, DashboardMount, DashboardState, DetailPanel, IncidentKey, SeverityStats,
    detail_panel, markers, tracking_subtitle,
};
use disaster_map_source::{EndpointConfig, HttpFeed};
use indicatif::MultiProgress;

use crate::progress::spinner;

enum Action {
    Marker(IncidentKey),
    ToggleResources,
    Close,
    Quit,
}

/// Mounts the dashboard and lets the user pick incidents from the map
/// markers until they quit.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be built or a prompt fails.
pub async fn run(
    multi: &MultiProgress,
    endpoints: EndpointConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let feed = Arc::new(HttpFeed::new(endpoints)?);

    let bar = spinner(multi, "Loading disaster data...");
    let mount = DashboardMount::mount(feed);
    let mut state = mount.settled().await;
    bar.finish_and_clear();

    loop {
        print_overview(&state);
        let panel = detail_panel(&state);
        if let Some(panel) = &panel {
            print_panel(panel);
        }

        let mut actions = Vec::new();
        let mut labels = Vec::new();
        for marker in markers(&state) {
            let prefix = if marker.selected { "●" } else { "○" };
            labels.push(format!("{prefix} {}", marker.title));
            actions.push(Action::Marker(marker.key));
        }
        if let Some(panel) = &panel {
            let arrow = if panel.resources_expanded { "▼" } else { "▶" };
            labels.push(format!("{arrow} Nearest Resources ({})", panel.resource_count));
            actions.push(Action::ToggleResources);
            labels.push("✕ Close details".to_string());
            actions.push(Action::Close);
        }
        labels.push("Quit".to_string());
        actions.push(Action::Quit);

        let idx = Select::new()
            .with_prompt("Select an incident")
            .items(&labels)
            .default(0)
            .interact()?;

        let event = match actions.swap_remove(idx) {
            Action::Marker(key) => DashboardEvent::MarkerClicked(key),
            Action::ToggleResources => DashboardEvent::ResourcesToggled,
            Action::Close => DashboardEvent::CloseClicked,
            Action::Quit => break,
        };
        state = mount.dispatch(event);
    }

    Ok(())
}

fn print_overview(state: &DashboardState) {
    println!();
    println!("Real-Time Disaster Monitor");
    println!("{}", tracking_subtitle(state.incidents().len()));
    let cards: Vec<String> = SeverityStats::from_incidents(state.incidents())
        .cards()
        .iter()
        .map(|card| format!("{} {}", card.label, card.count))
        .collect();
    println!("{}", cards.join("  |  "));
    println!();
}

fn print_panel(panel: &DetailPanel) {
    println!("┌ {} {} ({})", panel.title, panel.incident_id, panel.level_label);
    println!("│ {}", panel.description);
    if let Some(people) = &panel.people_affected {
        println!("│ 👥 People Affected: {people}");
    }
    if let Some(urgency) = &panel.urgency {
        println!("│ ⚡ Urgency Score: {urgency}");
    }
    if panel.resources_expanded {
        for line in &panel.resources {
            println!(
                "│ {} {}: {} ({})",
                line.kind.icon(),
                line.kind.label(),
                line.location,
                line.distance
            );
        }
    }
    if let Some(timestamp) = &panel.timestamp {
        println!("│ 🕒 {timestamp}");
    }
    println!("└");
    println!();
}
