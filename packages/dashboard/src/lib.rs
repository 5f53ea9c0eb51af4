#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! The incident dashboard.
//!
//! A [`DashboardMount`] fetches the feed once and keeps a
//! [`DashboardState`]: the incident list, the load phase and the current
//! selection. Renderers read it through the view models in [`view`] and
//! the per-level counts in [`stats`].

pub mod mount;
pub mod state;
pub mod stats;
pub mod view;

pub use mount::DashboardMount;
pub use state::{DashboardEvent, DashboardState, IncidentKey, LoadPhase, Selection};
pub use stats::{SeverityCount, SeverityStats, tracking_subtitle};
pub use view::{DetailPanel, MarkerView, ResourceLine, detail_panel, markers};
