//! Dashboard view state machine.
//!
//! ```text
//! Loading ──(fetch settles)──▶ Loaded
//!                               ├─ none selected ⇄ incident selected
//!                               │                   └─ resources collapsed ⇄ expanded
//! ```
//!
//! All transitions go through [`DashboardState::apply`].

use disaster_map_incident_models::NormalizedIncident;

/// Identifies an incident within one incident list.
///
/// The upstream incident ID when present, otherwise `#<position>`. IDs
/// that themselves start with `#` get a second `#`, so a positional key
/// never equals an ID key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IncidentKey(String);

impl IncidentKey {
    /// Builds the key of the incident at `index`.
    #[must_use]
    pub fn of(index: usize, incident: &NormalizedIncident) -> Self {
        match incident.incident_id.as_deref().filter(|id| !id.is_empty()) {
            Some(id) if id.starts_with('#') => Self(format!("#{id}")),
            Some(id) => Self(id.to_string()),
            None => Self(format!("#{index}")),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for IncidentKey {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for IncidentKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl std::fmt::Display for IncidentKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Whether the initial fetch has settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPhase {
    Loading,
    Loaded,
}

/// The selected incident and its resource panel toggle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub key: IncidentKey,
    pub resources_expanded: bool,
}

/// User and fetch events driving the dashboard.
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardEvent {
    /// The fetch succeeded with a freshly normalized list.
    Loaded(Vec<NormalizedIncident>),
    /// The fetch failed; the current list is kept.
    LoadFailed,
    /// A map marker was clicked.
    MarkerClicked(IncidentKey),
    /// The detail panel's close control was clicked.
    CloseClicked,
    /// The "Nearest Resources" toggle was clicked.
    ResourcesToggled,
}

/// Client-local dashboard state.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardState {
    phase: LoadPhase,
    incidents: Vec<NormalizedIncident>,
    selection: Option<Selection>,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::new()
    }
}

impl DashboardState {
    /// Initial state: loading, no incidents, nothing selected.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            phase: LoadPhase::Loading,
            incidents: Vec::new(),
            selection: None,
        }
    }

    /// A loaded state holding `incidents`.
    #[must_use]
    pub fn loaded(incidents: Vec<NormalizedIncident>) -> Self {
        let mut state = Self::new();
        state.apply(DashboardEvent::Loaded(incidents));
        state
    }

    #[must_use]
    pub const fn phase(&self) -> LoadPhase {
        self.phase
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.phase == LoadPhase::Loading
    }

    #[must_use]
    pub fn incidents(&self) -> &[NormalizedIncident] {
        &self.incidents
    }

    #[must_use]
    pub const fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    /// Keyed incidents in list order.
    pub fn keyed_incidents(&self) -> impl Iterator<Item = (IncidentKey, &NormalizedIncident)> {
        self.incidents
            .iter()
            .enumerate()
            .map(|(idx, incident)| (IncidentKey::of(idx, incident), incident))
    }

    /// Finds an incident by key.
    #[must_use]
    pub fn find(&self, key: &IncidentKey) -> Option<&NormalizedIncident> {
        self.keyed_incidents()
            .find(|(k, _)| k == key)
            .map(|(_, incident)| incident)
    }

    /// The selected incident, if any.
    #[must_use]
    pub fn selected_incident(&self) -> Option<(&Selection, &NormalizedIncident)> {
        let selection = self.selection.as_ref()?;
        self.find(&selection.key).map(|incident| (selection, incident))
    }

    #[must_use]
    pub fn is_selected(&self, key: &IncidentKey) -> bool {
        self.selection.as_ref().is_some_and(|s| &s.key == key)
    }

    #[must_use]
    pub fn resources_expanded(&self) -> bool {
        self.selection.as_ref().is_some_and(|s| s.resources_expanded)
    }

    /// Applies one event.
    pub fn apply(&mut self, event: DashboardEvent) {
        match event {
            DashboardEvent::Loaded(incidents) => {
                self.incidents = incidents;
                self.selection = None;
                self.phase = LoadPhase::Loaded;
            }
            DashboardEvent::LoadFailed => {
                self.phase = LoadPhase::Loaded;
            }
            DashboardEvent::MarkerClicked(key) => {
                if self.is_selected(&key) {
                    self.selection = None;
                } else if self.find(&key).is_some() {
                    self.selection = Some(Selection {
                        key,
                        resources_expanded: false,
                    });
                }
            }
            DashboardEvent::CloseClicked => {
                self.selection = None;
            }
            DashboardEvent::ResourcesToggled => {
                if let Some(selection) = &mut self.selection {
                    selection.resources_expanded = !selection.resources_expanded;
                }
            }
        }
    }

    /// Returns the state that `event` would produce, leaving `self` as is.
    #[must_use]
    pub fn after(&self, event: DashboardEvent) -> Self {
        let mut next = self.clone();
        next.apply(event);
        next
    }
}
