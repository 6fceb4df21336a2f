pub mod a001_client;
pub mod a002_license;
pub mod d400_license_alerts;

use axum::http::StatusCode;

use crate::shared::error::ServiceError;

/// Log a service error and turn it into its status code
pub(crate) fn error_status(context: &str, e: ServiceError) -> StatusCode {
    let status = e.status_code();
    if status.is_server_error() {
        tracing::error!("{}: {}", context, e);
    } else {
        tracing::warn!("{}: {}", context, e);
    }
    status
}
