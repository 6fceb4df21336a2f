use axum::{extract::Path, http::StatusCode, Json};
use contracts::domain::a001_client::{Client, ClientDto};
use serde_json::json;

use super::error_status;
use crate::domain::a001_client;

/// GET /api/client
pub async fn list_all() -> Result<Json<Vec<Client>>, StatusCode> {
    a001_client::service::list_all()
        .await
        .map(Json)
        .map_err(|e| error_status("list clients", e))
}

/// GET /api/client/:id
pub async fn get_by_id(Path(id): Path<String>) -> Result<Json<Client>, StatusCode> {
    let uuid = a001_client::service::parse_id(&id).map_err(|e| error_status("get client", e))?;
    match a001_client::service::get_by_id(uuid).await {
        Ok(Some(v)) => Ok(Json(v)),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(e) => Err(error_status("get client", e)),
    }
}

/// POST /api/client
pub async fn upsert(Json(dto): Json<ClientDto>) -> Result<Json<serde_json::Value>, StatusCode> {
    let result = if let Some(id) = dto.id.clone() {
        a001_client::service::update(dto).await.map(|_| id)
    } else {
        a001_client::service::create(dto)
            .await
            .map(|id| id.to_string())
    };

    match result {
        Ok(id) => Ok(Json(json!({"id": id}))),
        Err(e) => Err(error_status("upsert client", e)),
    }
}

/// DELETE /api/client/:id
pub async fn delete(Path(id): Path<String>) -> Result<(), StatusCode> {
    let uuid =
        a001_client::service::parse_id(&id).map_err(|e| error_status("delete client", e))?;
    match a001_client::service::delete(uuid).await {
        Ok(true) => Ok(()),
        Ok(false) => Err(StatusCode::NOT_FOUND),
        Err(e) => Err(error_status("delete client", e)),
    }
}
