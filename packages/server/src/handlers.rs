//! HTTP handler functions for the pages and the JSON API.

use actix_web::{HttpResponse, http::StatusCode, web};
use disaster_map_dashboard::{DashboardMount, SeverityStats};
use disaster_map_incident::normalize_all;
use disaster_map_incident_models::NormalizedIncident;
use disaster_map_report::{ReportForm, ReportSession, SubmitOutcome};
use disaster_map_report_models::IncidentDraft;
use disaster_map_server_models::{
    ApiHealth, ApiIncident, ApiSeverityCount, ApiStats, DashboardQuery,
};
use disaster_map_source::SourceError;

use crate::{AppState, navigation, pages};

fn html(status: StatusCode, body: String) -> HttpResponse {
    HttpResponse::build(status)
        .content_type("text/html; charset=utf-8")
        .body(body)
}

async fn fetch_incidents(state: &AppState) -> Result<Vec<NormalizedIncident>, SourceError> {
    let records = state.reader.fetch_latest().await?;
    Ok(normalize_all(&records))
}

/// `GET /`
///
/// Mounts a dashboard, waits for the feed, and renders it with the
/// selection from the query string applied. A failed fetch renders an
/// empty dashboard.
pub async fn dashboard(
    state: web::Data<AppState>,
    query: web::Query<DashboardQuery>,
) -> HttpResponse {
    let mount = DashboardMount::mount(state.reader.clone());
    let loaded = mount.settled().await;
    let view = navigation::restore(loaded, &query);

    html(StatusCode::OK, pages::dashboard(&view, &state.boundaries))
}

/// `GET /report`
pub async fn report_form() -> HttpResponse {
    html(StatusCode::OK, pages::report(&ReportForm::new(), &[]))
}

/// `POST /report`
///
/// Validates the posted draft and forwards it to the ingestion endpoint.
/// An incomplete draft is sent back with the missing fields listed.
pub async fn submit_report(
    state: web::Data<AppState>,
    draft: web::Form<IncidentDraft>,
) -> HttpResponse {
    let session = ReportSession::with_form(
        state.writer.clone(),
        ReportForm::with_draft(draft.into_inner()),
    );

    match session.submit().await {
        SubmitOutcome::Submitted => html(StatusCode::OK, pages::report(&session.snapshot(), &[])),
        SubmitOutcome::Failed => html(
            StatusCode::BAD_GATEWAY,
            pages::report(&session.snapshot(), &[]),
        ),
        SubmitOutcome::Invalid(e) => html(
            StatusCode::UNPROCESSABLE_ENTITY,
            pages::report(&session.snapshot(), &e.issues),
        ),
        SubmitOutcome::Busy => html(
            StatusCode::CONFLICT,
            pages::report(&session.snapshot(), &[]),
        ),
    }
}

/// `GET /api/health`
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `GET /api/incidents`
///
/// Returns the normalized feed.
pub async fn incidents(state: web::Data<AppState>) -> HttpResponse {
    match fetch_incidents(&state).await {
        Ok(incidents) => {
            let api_incidents: Vec<ApiIncident> = incidents.iter().map(ApiIncident::from).collect();
            HttpResponse::Ok().json(api_incidents)
        }
        Err(e) => {
            log::error!("Failed to fetch incidents: {e}");
            HttpResponse::BadGateway().json(serde_json::json!({
                "error": "Failed to fetch incidents"
            }))
        }
    }
}

/// `GET /api/stats`
///
/// Returns the incident count of each severity level.
pub async fn stats(state: web::Data<AppState>) -> HttpResponse {
    match fetch_incidents(&state).await {
        Ok(incidents) => {
            let stats = SeverityStats::from_incidents(&incidents);
            HttpResponse::Ok().json(ApiStats {
                total: incidents.len(),
                levels: stats
                    .cards()
                    .into_iter()
                    .map(|card| ApiSeverityCount {
                        level: card.level,
                        label: card.label.to_string(),
                        color: card.color.to_string(),
                        count: card.count,
                    })
                    .collect(),
            })
        }
        Err(e) => {
            log::error!("Failed to fetch incidents: {e}");
            HttpResponse::BadGateway().json(serde_json::json!({
                "error": "Failed to fetch incidents"
            }))
        }
    }
}
