use axum::{extract::Path, http::StatusCode, Json};
use chrono::Utc;
use contracts::dashboards::d400_license_alerts::LicenseStatusResponse;
use contracts::domain::a002_license::{License, LicenseDto};
use serde_json::json;

use super::error_status;
use crate::domain::{a001_client, a002_license};

/// GET /api/license
pub async fn list_all() -> Result<Json<Vec<License>>, StatusCode> {
    a002_license::service::list_all()
        .await
        .map(Json)
        .map_err(|e| error_status("list licenses", e))
}

/// GET /api/license/by-client/:client_id
pub async fn list_by_client(Path(client_id): Path<String>) -> Result<Json<Vec<License>>, StatusCode> {
    let uuid = a001_client::service::parse_id(&client_id)
        .map_err(|e| error_status("list client licenses", e))?;
    a002_license::service::list_by_client(uuid)
        .await
        .map(Json)
        .map_err(|e| error_status("list client licenses", e))
}

/// GET /api/license/:id
pub async fn get_by_id(Path(id): Path<String>) -> Result<Json<License>, StatusCode> {
    let uuid = a002_license::service::parse_id(&id).map_err(|e| error_status("get license", e))?;
    match a002_license::service::get_by_id(uuid).await {
        Ok(Some(v)) => Ok(Json(v)),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(e) => Err(error_status("get license", e)),
    }
}

/// GET /api/license/:id/status
pub async fn get_status(Path(id): Path<String>) -> Result<Json<LicenseStatusResponse>, StatusCode> {
    let uuid =
        a002_license::service::parse_id(&id).map_err(|e| error_status("license status", e))?;
    a002_license::service::get_status(uuid, Utc::now())
        .await
        .map(Json)
        .map_err(|e| error_status("license status", e))
}

/// POST /api/license
pub async fn upsert(Json(dto): Json<LicenseDto>) -> Result<Json<serde_json::Value>, StatusCode> {
    let result = if let Some(id) = dto.id.clone() {
        a002_license::service::update(dto).await.map(|_| id)
    } else {
        a002_license::service::create(dto)
            .await
            .map(|id| id.to_string())
    };

    match result {
        Ok(id) => Ok(Json(json!({"id": id}))),
        Err(e) => Err(error_status("upsert license", e)),
    }
}

/// DELETE /api/license/:id
pub async fn delete(Path(id): Path<String>) -> Result<(), StatusCode> {
    let uuid =
        a002_license::service::parse_id(&id).map_err(|e| error_status("delete license", e))?;
    match a002_license::service::delete(uuid).await {
        Ok(true) => Ok(()),
        Ok(false) => Err(StatusCode::NOT_FOUND),
        Err(e) => Err(error_status("delete license", e)),
    }
}

/// POST /api/license/testdata
pub async fn insert_test_data() -> Result<Json<serde_json::Value>, StatusCode> {
    a002_license::service::insert_test_data()
        .await
        .map(|inserted| Json(json!({"inserted": inserted})))
        .map_err(|e| error_status("insert license test data", e))
}
