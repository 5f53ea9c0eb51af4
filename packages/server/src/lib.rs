#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web server for the disaster map.
//!
//! Serves the two pages of the application, the dashboard at `/` and the
//! report form at `/report`, plus a small JSON API under `/api`. State
//! outlines are fetched once at startup; incidents are fetched on every
//! dashboard load.

mod handlers;
pub mod interactive;
pub mod navigation;
pub mod pages;

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware, web};
use disaster_map_map::{BoundaryLayer, Projection};
use disaster_map_source::{EndpointConfig, HttpFeed, IncidentReader, IncidentWriter, boundaries};

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8080;

/// Shared application state.
pub struct AppState {
    /// Read side of the incident feed.
    pub reader: Arc<dyn IncidentReader>,
    /// Incident ingestion endpoint.
    pub writer: Arc<dyn IncidentWriter>,
    /// Projected state outlines, empty if the boundary fetch failed.
    pub boundaries: Arc<BoundaryLayer>,
}

/// Registers every route.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(handlers::health))
            .route("/incidents", web::get().to(handlers::incidents))
            .route("/stats", web::get().to(handlers::stats)),
    )
    .route("/", web::get().to(handlers::dashboard))
    .route("/report", web::get().to(handlers::report_form))
    .route("/report", web::post().to(handlers::submit_report));
}

/// Fetches and projects the state outlines. Failures are logged and the
/// map is drawn without outlines.
pub async fn load_boundaries(feed: &HttpFeed) -> BoundaryLayer {
    let url = &feed.endpoints().boundaries_url;
    match boundaries::fetch(feed.client(), url).await {
        Ok(collection) => {
            let layer = BoundaryLayer::from_features(&collection, &Projection::INDIA);
            log::info!("Loaded {} state outlines", layer.outlines().len());
            layer
        }
        Err(e) => {
            log::warn!("Failed to load state boundaries from {url}: {e}");
            BoundaryLayer::empty()
        }
    }
}

/// Address the HTTP server listens on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindConfig {
    pub addr: String,
    pub port: u16,
}

impl Default for BindConfig {
    fn default() -> Self {
        Self {
            addr: DEFAULT_BIND_ADDR.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl BindConfig {
    /// Reads `BIND_ADDR` and `PORT`, falling back to `127.0.0.1:8080`.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`Self::from_env`], with variables looked up by `lookup`. A
    /// port that does not parse falls back to the default.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            addr: lookup("BIND_ADDR")
                .filter(|a| !a.trim().is_empty())
                .map_or(defaults.addr, |a| a.trim().to_string()),
            port: lookup("PORT")
                .and_then(|p| p.trim().parse().ok())
                .unwrap_or(defaults.port),
        }
    }
}

/// Starts the disaster map server.
///
/// Fetches the state outlines, then starts the Actix-Web HTTP server on
/// `bind`. This is a regular async function; the caller provides the
/// async runtime (e.g. via `#[actix_web::main]`) and the logger.
///
/// # Errors
///
/// Returns an `std::io::Result` error if the HTTP client cannot be built,
/// or if the HTTP server fails to bind or encounters a runtime error.
#[allow(clippy::future_not_send)]
pub async fn run_server(endpoints: EndpointConfig, bind: BindConfig) -> std::io::Result<()> {
    log::info!("Reading incidents from {}", endpoints.read_url);
    log::info!("Submitting reports to {}", endpoints.write_url);

    let feed = Arc::new(HttpFeed::new(endpoints).map_err(std::io::Error::other)?);

    log::info!("Loading state boundaries...");
    let boundaries = load_boundaries(&feed).await;

    let state = web::Data::new(AppState {
        reader: feed.clone(),
        writer: feed,
        boundaries: Arc::new(boundaries),
    });

    let BindConfig { addr, port } = bind;
    log::info!("Starting server on {addr}:{port}");

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(configure)
    })
    .bind((addr, port))?
    .run()
    .await
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use actix_web::http::StatusCode;
    use actix_web::test;
    use async_trait::async_trait;
    use disaster_map_incident_models::RawIncident;
    use disaster_map_report_models::IncidentDraft;
    use disaster_map_source::SourceError;
    use serde_json::json;

    use super::*;

    struct FixedFeed {
        records: Option<Vec<serde_json::Value>>,
        write_status: u16,
        submitted: Mutex<Vec<IncidentDraft>>,
        writes: AtomicUsize,
    }

    impl FixedFeed {
        fn new(records: Option<Vec<serde_json::Value>>, write_status: u16) -> Arc<Self> {
            Arc::new(Self {
                records,
                write_status,
                submitted: Mutex::new(Vec::new()),
                writes: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl IncidentReader for FixedFeed {
        async fn fetch_latest(&self) -> Result<Vec<RawIncident>, SourceError> {
            self.records.as_ref().map_or_else(
                || {
                    Err(SourceError::Status {
                        status: 500,
                        url: "http://feed.test/latest-incident".to_string(),
                    })
                },
                |records| Ok(records.iter().cloned().map(RawIncident::from_value).collect()),
            )
        }
    }

    #[async_trait]
    impl IncidentWriter for FixedFeed {
        async fn submit(&self, draft: &IncidentDraft) -> Result<(), SourceError> {
            self.writes.fetch_add(1, Ordering::SeqCst);
            self.submitted.lock().unwrap().push(draft.clone());
            if (200..300).contains(&self.write_status) {
                Ok(())
            } else {
                Err(SourceError::Status {
                    status: self.write_status,
                    url: "http://feed.test/incidents".to_string(),
                })
            }
        }
    }

    fn sample() -> Option<Vec<serde_json::Value>> {
        Some(vec![
            json!({
                "incident_id": "I1",
                "state": "Kerala",
                "enriched_severity_score_1_5": 3,
                "enriched_clean_description": "Heavy flood warning issued",
            }),
            json!({"incident_id": "I2", "state": "Bihar"}),
            json!({"incident_id": "I3", "state": "Atlantis", "enriched_severity_score_1_5": 5}),
        ])
    }

    fn app_state(feed: &Arc<FixedFeed>) -> web::Data<AppState> {
        web::Data::new(AppState {
            reader: feed.clone(),
            writer: feed.clone(),
            boundaries: Arc::new(BoundaryLayer::empty()),
        })
    }

    fn filled_draft() -> IncidentDraft {
        IncidentDraft {
            incident_id: "INC-2025-001".to_string(),
            disaster_type: "Flood".to_string(),
            severity: "3".to_string(),
            description: "River breached embankment".to_string(),
            timestamp: "2025-07-01T10:30".to_string(),
            state: "Assam".to_string(),
            district: "Kamrup".to_string(),
        }
    }

    async fn body_of(resp: actix_web::dev::ServiceResponse) -> String {
        String::from_utf8(test::read_body(resp).await.to_vec()).unwrap()
    }

    #[actix_web::test]
    async fn dashboard_renders_loaded_feed() {
        let feed = FixedFeed::new(sample(), 201);
        let app = test::init_service(App::new().app_data(app_state(&feed)).configure(configure)).await;

        let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_of(resp).await;
        assert!(body.contains("Tracking 3 active incidents across India"));
        assert_eq!(body.matches(r#"class="marker-group""#).count(), 2);
        assert!(!body.contains(r#"class="map-popup""#));
    }

    #[actix_web::test]
    async fn dashboard_applies_selection_from_query() {
        let feed = FixedFeed::new(sample(), 201);
        let app = test::init_service(App::new().app_data(app_state(&feed)).configure(configure)).await;

        let req = test::TestRequest::get()
            .uri("/?selected=I1&resources=open")
            .to_request();
        let body = body_of(test::call_service(&app, req).await).await;
        assert!(body.contains(r#"class="map-popup""#));
        assert!(body.contains("Heavy flood warning issued"));
        assert!(body.contains(r#"class="resources-section""#));
    }

    #[actix_web::test]
    async fn failed_feed_renders_zero_incidents() {
        let feed = FixedFeed::new(None, 201);
        let app = test::init_service(App::new().app_data(app_state(&feed)).configure(configure)).await;

        let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_of(resp).await;
        assert!(body.contains("Tracking 0 active incidents across India"));
    }

    #[actix_web::test]
    async fn accepted_report_clears_form_and_refreshes() {
        let feed = FixedFeed::new(sample(), 201);
        let app = test::init_service(App::new().app_data(app_state(&feed)).configure(configure)).await;

        let req = test::TestRequest::post()
            .uri("/report")
            .set_form(filled_draft())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_of(resp).await;
        assert!(body.contains("Incident reported successfully!"));
        assert!(body.contains(r#"http-equiv="refresh" content="3;url=/report""#));
        assert!(!body.contains(r#"value="INC-2025-001""#));
        assert_eq!(feed.submitted.lock().unwrap()[0], filled_draft());
    }

    #[actix_web::test]
    async fn rejected_report_keeps_values() {
        let feed = FixedFeed::new(sample(), 500);
        let app = test::init_service(App::new().app_data(app_state(&feed)).configure(configure)).await;

        let req = test::TestRequest::post()
            .uri("/report")
            .set_form(filled_draft())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
        let body = body_of(resp).await;
        assert!(body.contains("Failed to report incident. Please try again."));
        assert!(body.contains(r#"value="INC-2025-001""#));
        assert!(!body.contains("http-equiv"));
    }

    #[actix_web::test]
    async fn incomplete_report_is_not_forwarded() {
        let feed = FixedFeed::new(sample(), 201);
        let app = test::init_service(App::new().app_data(app_state(&feed)).configure(configure)).await;

        let draft = IncidentDraft {
            district: String::new(),
            ..filled_draft()
        };
        let req = test::TestRequest::post()
            .uri("/report")
            .set_form(draft)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body_of(resp).await.contains("District is required"));
        assert_eq!(feed.writes.load(Ordering::SeqCst), 0);
    }

    #[actix_web::test]
    async fn stats_cover_all_levels() {
        let feed = FixedFeed::new(sample(), 201);
        let app = test::init_service(App::new().app_data(app_state(&feed)).configure(configure)).await;

        let req = test::TestRequest::get().uri("/api/stats").to_request();
        let stats: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(stats["total"], 3);
        let counts: Vec<u64> = stats["levels"]
            .as_array()
            .unwrap()
            .iter()
            .map(|l| l["count"].as_u64().unwrap())
            .collect();
        assert_eq!(counts, [1, 0, 1, 0, 1]);
    }

    #[actix_web::test]
    async fn incidents_api_reports_feed_failure() {
        let feed = FixedFeed::new(None, 201);
        let app = test::init_service(App::new().app_data(app_state(&feed)).configure(configure)).await;

        let req = test::TestRequest::get().uri("/api/incidents").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
    }

    #[actix_web::test]
    async fn health_reports_version() {
        let app = test::init_service(App::new().configure(configure)).await;
        let req = test::TestRequest::get().uri("/api/health").to_request();
        let health: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(health["healthy"], true);
    }

    #[::core::prelude::v1::test]
    fn bind_config_reads_address_and_port() {
        let bind = BindConfig::from_lookup(|key| match key {
            "BIND_ADDR" => Some("0.0.0.0".to_string()),
            "PORT" => Some("9090".to_string()),
            _ => None,
        });
        assert_eq!(bind.addr, "0.0.0.0");
        assert_eq!(bind.port, 9090);
    }

    #[::core::prelude::v1::test]
    fn bind_config_falls_back_on_missing_or_bad_values() {
        assert_eq!(BindConfig::from_lookup(|_| None), BindConfig::default());

        let bind = BindConfig::from_lookup(|key| (key == "PORT").then(|| "http".to_string()));
        assert_eq!(bind.port, DEFAULT_PORT);
        assert_eq!(bind.addr, DEFAULT_BIND_ADDR);
    }
}
