//! Server-rendered HTML pages.

use std::fmt::Write as _;

use disaster_map_dashboard::{
    DashboardEvent, DashboardState, DetailPanel, SeverityStats, detail_panel, markers,
    tracking_subtitle,
};
use disaster_map_incident_models::DisasterSeverity;
use disaster_map_map::{BoundaryLayer, MapAnnotation, MapMarker, Projection, SvgMap, escape};
use disaster_map_report::{ReportForm, SUCCESS_AUTO_HIDE, SubmitStatus};
use disaster_map_report_models::{DraftField, DraftIssue};

use crate::navigation::{Route, href_after};

const STYLE: &str = include_str!("../static/style.css");

/// Wraps `body` in the page shell with the nav bar.
fn layout(active: Route, title: &str, head: &str, body: &str) -> String {
    let mut out = String::with_capacity(STYLE.len() + body.len() + 1024);
    let _ = write!(
        out,
        r#"<!DOCTYPE html><html lang="en"><head><meta charset="utf-8"><meta name="viewport" content="width=device-width, initial-scale=1"><title>{}</title>{head}<style>{STYLE}</style></head><body>"#,
        escape(title)
    );

    out.push_str(r#"<nav class="navbar"><div class="navbar-container"><div class="navbar-brand"><span class="brand-icon">🚨</span><h1 class="brand-title">Disaster Dashboard</h1></div><div class="navbar-links">"#);
    for route in Route::ALL {
        let class = if *route == active {
            "nav-link active"
        } else {
            "nav-link"
        };
        let _ = write!(
            out,
            r#"<a href="{}" class="{class}"><span class="link-icon">{}</span>{}</a>"#,
            route.path(),
            route.icon(),
            route.label()
        );
    }
    out.push_str("</div></div></nav>");

    out.push_str(body);
    out.push_str("</body></html>");
    out
}

/// Renders the dashboard page for `state`.
#[must_use]
pub fn dashboard(state: &DashboardState, boundaries: &BoundaryLayer) -> String {
    let stats = SeverityStats::from_incidents(state.incidents());
    let mut body = String::new();

    let _ = write!(
        body,
        r#"<div class="dashboard-container"><div class="dashboard-header"><div class="header-content"><h1 class="dashboard-title"><span class="title-icon">🗺️</span>Real-Time Disaster Monitor</h1><div class="live-indicator"><span class="pulse-dot"></span><span class="live-text">Live</span></div></div><p class="dashboard-subtitle">{}</p></div>"#,
        tracking_subtitle(state.incidents().len())
    );

    body.push_str(r#"<div class="stats-grid">"#);
    for card in stats.cards() {
        let _ = write!(
            body,
            r#"<div class="stat-card" style="border-left-color: {color}"><div class="stat-header"><span class="stat-label">{label}</span><span class="stat-dot" style="background-color: {color}"></span></div><div class="stat-value">{count}</div></div>"#,
            color = card.color,
            label = card.label,
            count = card.count
        );
    }
    body.push_str("</div>");

    body.push_str(r#"<div class="map-section">"#);
    if state.is_loading() {
        body.push_str(r#"<div class="loading-container"><div class="loading-spinner"></div><p class="loading-text">Loading disaster data...</p></div>"#);
    } else {
        body.push_str(r#"<div class="map-container">"#);
        body.push_str(&map_svg(state, boundaries));
        body.push_str("</div>");
    }
    body.push_str(&legend());
    body.push_str("</div></div>");

    layout(Route::Dashboard, "Disaster Dashboard", "", &body)
}

fn map_svg(state: &DashboardState, boundaries: &BoundaryLayer) -> String {
    let mut map = SvgMap::new(Projection::INDIA, boundaries);

    map.markers = markers(state)
        .into_iter()
        .map(|marker| MapMarker {
            coords: marker.coords,
            outer_radius: marker.outer_radius,
            inner_radius: marker.inner_radius,
            color: marker.severity.color().to_string(),
            glow: marker.severity.glow().to_string(),
            glow_radius: marker.glow_radius,
            href: Some(href_after(state, DashboardEvent::MarkerClicked(marker.key))),
            title: Some(marker.title),
        })
        .collect();

    map.annotation = detail_panel(state).map(|panel| MapAnnotation {
        anchor: panel.coords,
        color: panel.severity.color().to_string(),
        height: panel.height,
        body_html: popup(state, &panel),
    });

    map.render()
}

/// XHTML body of the detail panel.
fn popup(state: &DashboardState, panel: &DetailPanel) -> String {
    let mut out = String::new();
    let close = href_after(state, DashboardEvent::CloseClicked);
    let toggle = href_after(state, DashboardEvent::ResourcesToggled);

    let _ = write!(
        out,
        r#"<div xmlns="http://www.w3.org/1999/xhtml" class="map-popup"><a class="popup-close-btn" href="{}">✕</a>"#,
        escape(&close)
    );
    let _ = write!(
        out,
        r#"<div class="map-popup-header" style="background-color: {}"><div class="popup-header-content"><span class="map-popup-title">{}</span><span class="map-popup-id">{}</span></div><span class="map-popup-severity">{}</span></div>"#,
        panel.severity.color(),
        escape(&panel.title),
        escape(&panel.incident_id),
        escape(&panel.level_label)
    );

    out.push_str(r#"<div class="map-popup-content">"#);
    let _ = write!(
        out,
        r#"<div class="map-popup-description">{}</div>"#,
        escape(&panel.description)
    );

    if panel.people_affected.is_some() || panel.urgency.is_some() {
        out.push_str(r#"<div class="map-popup-stats">"#);
        if let Some(people) = &panel.people_affected {
            let _ = write!(
                out,
                r#"<div class="map-popup-stat-item"><span class="stat-icon">👥</span><div><div class="stat-label">People Affected</div><div class="stat-value">{people}</div></div></div>"#
            );
        }
        if let Some(urgency) = &panel.urgency {
            let _ = write!(
                out,
                r#"<div class="map-popup-stat-item"><span class="stat-icon">⚡</span><div><div class="stat-label">Urgency Score</div><div class="stat-value">{urgency}</div></div></div>"#
            );
        }
        out.push_str("</div>");
    }

    let arrow = if panel.resources_expanded { "▼" } else { "▶" };
    let _ = write!(
        out,
        r#"<a class="resources-toggle-btn" href="{}">{arrow} Nearest Resources <span class="resource-count">({})</span></a>"#,
        escape(&toggle),
        panel.resource_count
    );

    if panel.resources_expanded {
        out.push_str(r#"<div class="resources-section">"#);
        for line in &panel.resources {
            let _ = write!(
                out,
                r#"<div class="map-popup-item"><span class="map-popup-icon">{}</span><div class="map-popup-text"><span class="map-popup-label">{}</span><span class="map-popup-value">{}<span class="map-popup-distance"> ({})</span></span></div></div>"#,
                line.kind.icon(),
                line.kind.label(),
                escape(&line.location),
                escape(&line.distance)
            );
        }
        out.push_str("</div>");
    }
    out.push_str("</div>");

    if let Some(timestamp) = &panel.timestamp {
        let _ = write!(
            out,
            r#"<div class="map-popup-footer"><span class="map-popup-time">🕒 {}</span></div>"#,
            escape(timestamp)
        );
    }
    out.push_str("</div>");
    out
}

fn legend() -> String {
    let mut out = String::from(
        r#"<div class="map-legend"><h3 class="legend-title">Severity Legend</h3><div class="legend-items">"#,
    );
    for severity in DisasterSeverity::all() {
        let _ = write!(
            out,
            r#"<div class="legend-item"><span class="legend-dot" style="background-color: {}"></span><span class="legend-label">Level {} - {}</span></div>"#,
            severity.color(),
            severity.value(),
            severity.label()
        );
    }
    out.push_str("</div></div>");
    out
}

/// Renders the report page. `issues` lists why the last submit was refused.
#[must_use]
pub fn report(form: &ReportForm, issues: &[DraftIssue]) -> String {
    let draft = form.draft();
    let mut body = String::from(
        r#"<div class="report-container"><div class="report-content"><div class="report-header"><div class="header-icon">📝</div><h1 class="report-title">Report New Incident</h1><p class="report-subtitle">Submit disaster information to help emergency response teams</p></div><form method="post" action="/report" class="report-form"><div class="form-grid">"#,
    );

    for field in DraftField::all() {
        if *field == DraftField::Description {
            body.push_str("</div>");
        }
        form_group(&mut body, *field, draft.get(*field));
    }

    let disabled = if form.is_submitting() { " disabled" } else { "" };
    let icon = if form.is_submitting() {
        r#"<span class="button-spinner"></span>"#
    } else {
        r#"<span class="button-icon">✓</span>"#
    };
    let _ = write!(
        body,
        r#"<button type="submit" class="submit-button"{disabled}>{icon}{}</button>"#,
        form.submit_label()
    );

    match (form.status(), form.status().message()) {
        (SubmitStatus::Success, Some(message)) => {
            let _ = write!(
                body,
                r#"<div class="alert alert-success"><span class="alert-icon">✓</span>{message}</div>"#
            );
        }
        (SubmitStatus::Error, Some(message)) => {
            let _ = write!(
                body,
                r#"<div class="alert alert-error"><span class="alert-icon">✕</span>{message}</div>"#
            );
        }
        _ => {}
    }

    if !issues.is_empty() {
        body.push_str(r#"<div class="alert alert-error"><span class="alert-icon">✕</span><ul class="alert-issues">"#);
        for issue in issues {
            let _ = write!(body, "<li>{}</li>", escape(&issue.to_string()));
        }
        body.push_str("</ul></div>");
    }

    body.push_str("</form></div></div>");

    // The success alert disappears with the reload.
    let head = if form.status() == SubmitStatus::Success {
        format!(
            r#"<meta http-equiv="refresh" content="{};url={}">"#,
            SUCCESS_AUTO_HIDE.as_secs(),
            Route::Report.path()
        )
    } else {
        String::new()
    };

    layout(Route::Report, "Report Incident", &head, &body)
}

fn form_group(out: &mut String, field: DraftField, value: &str) {
    let name = field.as_ref();
    let class = if field == DraftField::Description {
        "form-group form-group-full"
    } else {
        "form-group"
    };
    let _ = write!(
        out,
        r#"<div class="{class}"><label for="{name}" class="form-label"><span class="label-icon">{}</span>{}</label>"#,
        field.icon(),
        escape(field.label())
    );

    if let Some(options) = field.options() {
        let _ = write!(
            out,
            r#"<select id="{name}" name="{name}" class="form-input" required><option value="">{}</option>"#,
            field.select_prompt().unwrap_or_default()
        );
        for (option, label) in options {
            let selected = if option == value { " selected" } else { "" };
            let _ = write!(
                out,
                r#"<option value="{}"{selected}>{}</option>"#,
                escape(&option),
                escape(&label)
            );
        }
        out.push_str("</select>");
    } else if field == DraftField::Description {
        let _ = write!(
            out,
            r#"<textarea id="{name}" name="{name}" placeholder="{}" class="form-textarea" rows="5" required>{}</textarea>"#,
            escape(field.placeholder().unwrap_or_default()),
            escape(value)
        );
    } else {
        let input_type = if field == DraftField::Timestamp {
            "datetime-local"
        } else {
            "text"
        };
        let _ = write!(
            out,
            r#"<input id="{name}" name="{name}" type="{input_type}" placeholder="{}" value="{}" class="form-input" required>"#,
            escape(field.placeholder().unwrap_or_default()),
            escape(value)
        );
    }
    out.push_str("</div>");
}

#[cfg(test)]
mod tests {
    use disaster_map_incident::normalize_payload;
    use disaster_map_report_models::IncidentDraft;
    use serde_json::json;

    use super::*;
    use crate::navigation::restore;
    use disaster_map_server_models::DashboardQuery;

    fn loaded() -> DashboardState {
        DashboardState::loaded(normalize_payload(json!([
            {
                "incident_id": "I1",
                "state": "Kerala",
                "enriched_severity_score_1_5": 3,
                "enriched_clean_description": "Heavy flood <warning>",
                "nearest_resources_hospitals_0_location": "General Hospital",
                "nearest_resources_hospitals_0_distance_km": 3.2,
            },
            {"incident_id": "I2", "state": "Atlantis"},
        ])))
    }

    #[test]
    fn dashboard_shows_counts_for_every_level() {
        let html = dashboard(&loaded(), &BoundaryLayer::empty());
        assert!(html.contains("Tracking 2 active incidents across India"));
        assert_eq!(html.matches(r#"class="stat-card""#).count(), 5);
        assert_eq!(html.matches(r#"class="marker-group""#).count(), 1);
        assert!(html.contains(r#"href="/?selected=I1""#));
        assert!(!html.contains(r#"class="map-popup""#));
    }

    #[test]
    fn legend_lists_every_level_under_heading() {
        let html = dashboard(&loaded(), &BoundaryLayer::empty());
        assert!(html.contains(r#"<h3 class="legend-title">Severity Legend</h3>"#));
        assert!(html.contains("Level 1 - Low"));
        assert!(html.contains("Level 5 - Severe"));
    }

    #[test]
    fn selected_incident_renders_escaped_popup() {
        let state = restore(
            loaded(),
            &DashboardQuery {
                selected: Some("I1".to_string()),
                resources: Some("open".to_string()),
            },
        );
        let html = dashboard(&state, &BoundaryLayer::empty());
        assert!(html.contains("Heavy flood &lt;warning&gt;"));
        assert!(html.contains("Level 3"));
        assert!(html.contains("General Hospital"));
        assert!(html.contains("(3.2 km)"));
        assert!(html.contains(r#"href="/?selected=I1""#));
        assert!(html.contains(r#"class="popup-close-btn" href="/""#));
    }

    #[test]
    fn loading_state_shows_spinner() {
        let html = dashboard(&DashboardState::new(), &BoundaryLayer::empty());
        assert!(html.contains("Loading disaster data..."));
        assert!(!html.contains("<svg"));
    }

    #[test]
    fn report_marks_selected_options_and_keeps_values() {
        let form = ReportForm::with_draft(IncidentDraft {
            incident_id: "INC-1".to_string(),
            severity: "4".to_string(),
            state: "Odisha".to_string(),
            ..IncidentDraft::default()
        });
        let html = report(&form, &[DraftIssue::Missing(DraftField::District)]);
        assert!(html.contains(r#"value="INC-1""#));
        assert!(html.contains(r#"<option value="4" selected>Level 4 - Critical</option>"#));
        assert!(html.contains(r#"<option value="Odisha" selected>Odisha</option>"#));
        assert!(html.contains("District is required"));
        assert_eq!(html.matches(" required>").count(), 7);
        assert!(!html.contains("http-equiv"));
    }

    #[test]
    fn nav_marks_active_route() {
        let html = report(&ReportForm::new(), &[]);
        assert!(html.contains(r#"<a href="/report" class="nav-link active">"#));
        assert!(html.contains(r#"<a href="/" class="nav-link">"#));
    }
}
