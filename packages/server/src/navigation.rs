//! Routes, the nav bar, and dashboard state carried in the query string.

use std::fmt::Write as _;

use disaster_map_dashboard::{DashboardEvent, DashboardState};
use disaster_map_server_models::DashboardQuery;

/// Client-facing pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Dashboard,
    Report,
}

impl Route {
    pub const ALL: &[Self] = &[Self::Dashboard, Self::Report];

    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Dashboard => "/",
            Self::Report => "/report",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Report => "Report",
        }
    }

    #[must_use]
    pub const fn icon(self) -> &'static str {
        match self {
            Self::Dashboard => "📊",
            Self::Report => "📝",
        }
    }
}

/// Restores the selection encoded in `query` onto a freshly loaded state.
///
/// Keys that name no incident are ignored, as is `resources=open` without
/// a selection.
#[must_use]
pub fn restore(mut state: DashboardState, query: &DashboardQuery) -> DashboardState {
    if let Some(key) = query.selected.as_deref().filter(|k| !k.is_empty()) {
        state.apply(DashboardEvent::MarkerClicked(key.into()));
        if query.resources_open() {
            state.apply(DashboardEvent::ResourcesToggled);
        }
    }
    state
}

/// Encodes the selection of `state` as a dashboard URL.
#[must_use]
pub fn dashboard_href(state: &DashboardState) -> String {
    let mut href = Route::Dashboard.path().to_string();
    if let Some(selection) = state.selection() {
        let _ = write!(href, "?selected={}", encode_component(selection.key.as_str()));
        if selection.resources_expanded {
            let _ = write!(href, "&resources={}", DashboardQuery::RESOURCES_OPEN);
        }
    }
    href
}

/// Link target of a control that dispatches `event`.
#[must_use]
pub fn href_after(state: &DashboardState, event: DashboardEvent) -> String {
    dashboard_href(&state.after(event))
}

/// Percent-encodes everything but RFC 3986 unreserved characters.
fn encode_component(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for byte in s.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'_' | b'.' | b'~') {
            out.push(char::from(byte));
        } else {
            let _ = write!(out, "%{byte:02X}");
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use disaster_map_incident::normalize_payload;
    use serde_json::json;

    use super::*;

    fn loaded() -> DashboardState {
        DashboardState::loaded(normalize_payload(json!([
            {"incident_id": "I1", "state": "Kerala"},
            {"incident_id": "INC 2/3", "state": "Assam"},
        ])))
    }

    fn query(selected: &str, resources: Option<&str>) -> DashboardQuery {
        DashboardQuery {
            selected: Some(selected.to_string()),
            resources: resources.map(ToString::to_string),
        }
    }

    #[test]
    fn restores_selection_and_expansion() {
        let state = restore(loaded(), &query("I1", Some("open")));
        assert!(state.is_selected(&"I1".into()));
        assert!(state.resources_expanded());
    }

    #[test]
    fn unknown_selection_is_dropped() {
        let state = restore(loaded(), &query("I9", Some("open")));
        assert!(state.selection().is_none());
        assert_eq!(dashboard_href(&state), "/");
    }

    #[test]
    fn marker_link_toggles_selection() {
        let state = loaded();
        assert_eq!(
            href_after(&state, DashboardEvent::MarkerClicked("I1".into())),
            "/?selected=I1"
        );

        let state = restore(state, &query("I1", None));
        assert_eq!(
            href_after(&state, DashboardEvent::MarkerClicked("I1".into())),
            "/"
        );
    }

    #[test]
    fn toggle_and_close_links() {
        let state = restore(loaded(), &query("I1", None));
        assert_eq!(
            href_after(&state, DashboardEvent::ResourcesToggled),
            "/?selected=I1&resources=open"
        );
        assert_eq!(href_after(&state, DashboardEvent::CloseClicked), "/");
    }

    #[test]
    fn encodes_keys() {
        let state = restore(loaded(), &query("INC 2/3", None));
        assert_eq!(dashboard_href(&state), "/?selected=INC%202%2F3");
    }
}
