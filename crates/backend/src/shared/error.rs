use axum::http::StatusCode;
use contracts::domain::common::AggregateRoot;
use thiserror::Error;

/// Errors of the domain services, mapped to HTTP status codes by handlers
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Invalid id: {0}")]
    InvalidId(String),

    #[error("Not found")]
    NotFound,

    #[error("Storage error: {0}")]
    Storage(#[from] anyhow::Error),
}

impl ServiceError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::Validation(_) | ServiceError::InvalidId(_) => StatusCode::BAD_REQUEST,
            ServiceError::NotFound => StatusCode::NOT_FOUND,
            ServiceError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<sea_orm::DbErr> for ServiceError {
    fn from(e: sea_orm::DbErr) -> Self {
        ServiceError::Storage(e.into())
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Fails when `existing`, the live record holding the same code, is not the
/// record being written (`current` is `None` on insert)
pub fn ensure_code_free<A: AggregateRoot>(
    existing: Option<&A>,
    current: Option<A::Id>,
) -> ServiceResult<()> {
    match existing {
        Some(other) if current.map_or(true, |id| other.id() != id) => {
            Err(ServiceError::Validation(format!(
                "{} com código {} já existe",
                A::element_name(),
                other.code()
            )))
        }
        _ => Ok(()),
    }
}
