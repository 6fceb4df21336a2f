use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers;

/// All application routes
pub fn configure_routes() -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        // ========================================
        // A001 CLIENTS
        // ========================================
        .route(
            "/api/client",
            get(handlers::a001_client::list_all).post(handlers::a001_client::upsert),
        )
        .route(
            "/api/client/:id",
            get(handlers::a001_client::get_by_id).delete(handlers::a001_client::delete),
        )
        // ========================================
        // A002 LICENSES
        // ========================================
        .route(
            "/api/license",
            get(handlers::a002_license::list_all).post(handlers::a002_license::upsert),
        )
        .route(
            "/api/license/testdata",
            post(handlers::a002_license::insert_test_data),
        )
        .route(
            "/api/license/by-client/:client_id",
            get(handlers::a002_license::list_by_client),
        )
        .route(
            "/api/license/:id",
            get(handlers::a002_license::get_by_id).delete(handlers::a002_license::delete),
        )
        .route(
            "/api/license/:id/status",
            get(handlers::a002_license::get_status),
        )
        // ========================================
        // D400 LICENSE ALERTS DASHBOARD
        // ========================================
        .route(
            "/api/d400/license_alerts",
            get(handlers::d400_license_alerts::get_license_alerts),
        )
}
