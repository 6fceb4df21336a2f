use axum::{extract::Query, http::StatusCode, Json};
use chrono::Utc;
use contracts::dashboards::d400_license_alerts::LicenseAlertsResponse;
use serde::Deserialize;

use super::error_status;
use crate::dashboards::d400_license_alerts::service;
use crate::domain::a001_client;

#[derive(Debug, Default, Deserialize)]
pub struct LicenseAlertsQuery {
    pub client_id: Option<String>,
}

/// GET /api/d400/license_alerts[?client_id=...]
pub async fn get_license_alerts(
    Query(query): Query<LicenseAlertsQuery>,
) -> Result<Json<LicenseAlertsResponse>, StatusCode> {
    let client_id = match query.client_id.as_deref().filter(|s| !s.trim().is_empty()) {
        Some(raw) => Some(
            a001_client::service::parse_id(raw).map_err(|e| error_status("license alerts", e))?,
        ),
        None => None,
    };

    service::get_license_alerts(client_id, Utc::now())
        .await
        .map(Json)
        .map_err(|e| error_status("license alerts", e))
}
