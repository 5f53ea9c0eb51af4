//! Endpoint configuration.
//!
//! The default endpoints are embedded at compile time from
//! `endpoints.toml`. A TOML file with the same keys can replace them, and
//! individual URLs can be overridden from the environment:
//!
//! | Variable | Key |
//! |---|---|
//! | `DISASTER_MAP_READ_URL` | `read_url` |
//! | `DISASTER_MAP_WRITE_URL` | `write_url` |
//! | `DISASTER_MAP_BOUNDARIES_URL` | `boundaries_url` |

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::SourceError;

const EMBEDDED_ENDPOINTS: &str = include_str!("../endpoints.toml");

pub const READ_URL_ENV: &str = "DISASTER_MAP_READ_URL";
pub const WRITE_URL_ENV: &str = "DISASTER_MAP_WRITE_URL";
pub const BOUNDARIES_URL_ENV: &str = "DISASTER_MAP_BOUNDARIES_URL";

/// URLs of the three remote services.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointConfig {
    /// `GET` endpoint returning the latest incident(s).
    pub read_url: String,
    /// `POST` endpoint accepting new incident reports.
    pub write_url: String,
    /// Static India state-boundary `GeoJSON` document.
    pub boundaries_url: String,
}

impl EndpointConfig {
    /// Returns the compiled-in endpoints.
    ///
    /// # Panics
    ///
    /// Panics if the embedded TOML is malformed (a build-time guarantee
    /// since the file ships with the crate).
    #[must_use]
    pub fn embedded() -> Self {
        Self::from_toml_str(EMBEDDED_ENDPOINTS)
            .unwrap_or_else(|e| panic!("Failed to parse embedded endpoints.toml: {e}"))
    }

    /// Parses and validates endpoint configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Config`] if the TOML is malformed or a URL
    /// does not parse.
    pub fn from_toml_str(s: &str) -> Result<Self, SourceError> {
        let config: Self = toml::de::from_str(s).map_err(|e| SourceError::Config {
            message: format!("Invalid endpoint configuration: {e}"),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reads endpoint configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if the file cannot be read or is invalid.
    pub fn from_file(path: &Path) -> Result<Self, SourceError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Loads the configuration used by the binaries: the given file (or
    /// the embedded defaults) with environment overrides applied.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if the file is unreadable or any resulting
    /// URL is invalid.
    pub fn load(path: Option<&Path>) -> Result<Self, SourceError> {
        let base = match path {
            Some(path) => {
                log::info!("Loading endpoint configuration from {}", path.display());
                Self::from_file(path)?
            }
            None => Self::embedded(),
        };
        let config = base.with_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Applies overrides looked up by environment variable name.
    #[must_use]
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        for (key, slot) in [
            (READ_URL_ENV, &mut self.read_url),
            (WRITE_URL_ENV, &mut self.write_url),
            (BOUNDARIES_URL_ENV, &mut self.boundaries_url),
        ] {
            if let Some(value) = lookup(key).filter(|v| !v.trim().is_empty()) {
                log::debug!("{key} overrides {slot} with {value}");
                *slot = value.trim().to_string();
            }
        }
        self
    }

    fn validate(&self) -> Result<(), SourceError> {
        for (key, url) in [
            ("read_url", &self.read_url),
            ("write_url", &self.write_url),
            ("boundaries_url", &self.boundaries_url),
        ] {
            reqwest::Url::parse(url).map_err(|e| SourceError::Config {
                message: format!("{key} is not a valid URL ({url}): {e}"),
            })?;
        }
        Ok(())
    }
}
