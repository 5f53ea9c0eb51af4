#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! HTTP access to the incident feed, the ingestion endpoint, and map
//! boundaries.
//!
//! The dashboard reads through [`IncidentReader`] and the report form
//! writes through [`IncidentWriter`]. [`HttpFeed`] implements both against
//! the configured endpoints. Every call is a single round trip: no retry,
//! no pagination, no auth.

pub mod boundaries;
pub mod config;

use std::time::Duration;

use async_trait::async_trait;
use disaster_map_incident_models::RawIncident;
use disaster_map_report_models::IncidentDraft;

pub use config::EndpointConfig;

/// Per-request timeout for the shared HTTP client.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors that can occur while talking to the remote services.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// The server answered with a non-2xx status.
    #[error("{url} responded with HTTP {status}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Requested URL.
        url: String,
    },

    /// `GeoJSON` parsing failed.
    #[error("GeoJSON parse error: {0}")]
    GeoJson(#[from] Box<geojson::Error>),

    /// I/O error (configuration file read).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid endpoint configuration.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of what went wrong.
        message: String,
    },
}

/// Read side of the incident feed.
#[async_trait]
pub trait IncidentReader: Send + Sync {
    /// Fetches the latest incident records.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] on transport failure, a non-2xx status, or
    /// an undecodable body.
    async fn fetch_latest(&self) -> Result<Vec<RawIncident>, SourceError>;
}

/// Write side: the incident ingestion endpoint.
#[async_trait]
pub trait IncidentWriter: Send + Sync {
    /// Posts a draft as a JSON body. Any 2xx status is success.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Status`] for any non-2xx status (regardless
    /// of body) and [`SourceError::Http`] for transport failures.
    async fn submit(&self, draft: &IncidentDraft) -> Result<(), SourceError>;
}

/// Builds the shared HTTP client.
///
/// # Errors
///
/// Returns [`SourceError::Http`] if the TLS backend cannot be initialised.
pub fn build_client() -> Result<reqwest::Client, SourceError> {
    Ok(reqwest::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .user_agent(concat!("disaster-map/", env!("CARGO_PKG_VERSION")))
        .build()?)
}

/// [`IncidentReader`] and [`IncidentWriter`] over HTTP.
#[derive(Debug, Clone)]
pub struct HttpFeed {
    client: reqwest::Client,
    endpoints: EndpointConfig,
}

impl HttpFeed {
    /// Creates a feed with a fresh client.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Http`] if the client cannot be built.
    pub fn new(endpoints: EndpointConfig) -> Result<Self, SourceError> {
        Ok(Self::with_client(build_client()?, endpoints))
    }

    #[must_use]
    pub const fn with_client(client: reqwest::Client, endpoints: EndpointConfig) -> Self {
        Self { client, endpoints }
    }

    #[must_use]
    pub const fn client(&self) -> &reqwest::Client {
        &self.client
    }

    #[must_use]
    pub const fn endpoints(&self) -> &EndpointConfig {
        &self.endpoints
    }
}

#[async_trait]
impl IncidentReader for HttpFeed {
    async fn fetch_latest(&self) -> Result<Vec<RawIncident>, SourceError> {
        let url = &self.endpoints.read_url;
        log::debug!("Fetching latest incidents from {url}");

        let resp = self.client.get(url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(SourceError::Status {
                status: status.as_u16(),
                url: url.clone(),
            });
        }

        let body = resp.text().await?;
        let payload: serde_json::Value = serde_json::from_str(&body)?;
        let records = disaster_map_incident::split_payload(payload);

        log::info!("Fetched {} incident record(s)", records.len());
        Ok(records)
    }
}

#[async_trait]
impl IncidentWriter for HttpFeed {
    async fn submit(&self, draft: &IncidentDraft) -> Result<(), SourceError> {
        let url = &self.endpoints.write_url;
        log::debug!("Submitting incident {:?} to {url}", draft.incident_id);

        let resp = self.client.post(url).json(draft).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(SourceError::Status {
                status: status.as_u16(),
                url: url.clone(),
            });
        }

        log::info!(
            "Incident {:?} accepted with HTTP {}",
            draft.incident_id,
            status.as_u16()
        );
        Ok(())
    }
}
