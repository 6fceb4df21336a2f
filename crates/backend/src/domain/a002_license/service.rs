use chrono::{DateTime, Duration, Utc};
use contracts::dashboards::d400_license_alerts::LicenseStatusResponse;
use contracts::domain::a002_license::{License, LicenseDto, LicenseState, PaymentStatus};
use uuid::Uuid;

use super::repository;
use crate::domain::a001_client;
use crate::shared::error::{ensure_code_free, ServiceError, ServiceResult};

/// Create a new license
pub async fn create(dto: LicenseDto) -> ServiceResult<Uuid> {
    let mut aggregate = License::new_for_insert(&dto).map_err(ServiceError::Validation)?;
    aggregate.validate().map_err(ServiceError::Validation)?;
    ensure_client_exists(aggregate.client_id.value()).await?;

    ensure_code_free(repository::get_by_code(aggregate.numero_licenca()).await?.as_ref(), None)?;

    aggregate.before_write();
    let id = repository::insert(&aggregate).await?;
    tracing::info!(
        "License {} created for client {} (estado: {})",
        aggregate.numero_licenca(),
        aggregate.client_id,
        aggregate.estado
    );
    Ok(id)
}

/// Update an existing license
pub async fn update(dto: LicenseDto) -> ServiceResult<()> {
    let id = parse_id(dto.id.as_deref().unwrap_or_default())?;

    let mut aggregate = repository::get_by_id(id)
        .await?
        .ok_or(ServiceError::NotFound)?;

    aggregate.update(&dto).map_err(ServiceError::Validation)?;
    aggregate.validate().map_err(ServiceError::Validation)?;
    ensure_client_exists(aggregate.client_id.value()).await?;
    ensure_code_free(
        repository::get_by_code(aggregate.numero_licenca()).await?.as_ref(),
        Some(aggregate.base.id),
    )?;

    aggregate.before_write();
    repository::update(&aggregate).await?;
    tracing::info!(
        "License {} updated (estado: {}, conta: {})",
        aggregate.numero_licenca(),
        aggregate.estado,
        aggregate.conta_pago
    );
    Ok(())
}

async fn ensure_client_exists(client_id: Uuid) -> ServiceResult<()> {
    if a001_client::repository::get_by_id(client_id).await?.is_none() {
        return Err(ServiceError::Validation(format!(
            "Cliente não encontrado: {}",
            client_id
        )));
    }
    Ok(())
}

/// Soft delete
pub async fn delete(id: Uuid) -> ServiceResult<bool> {
    Ok(repository::soft_delete(id).await?)
}

pub async fn get_by_id(id: Uuid) -> ServiceResult<Option<License>> {
    Ok(repository::get_by_id(id).await?)
}

pub async fn list_all() -> ServiceResult<Vec<License>> {
    Ok(repository::list_all().await?)
}

pub async fn list_by_client(client_id: Uuid) -> ServiceResult<Vec<License>> {
    Ok(repository::list_by_client(client_id).await?)
}

/// Derived status and balance of one license at `now`
pub async fn get_status(id: Uuid, now: DateTime<Utc>) -> ServiceResult<LicenseStatusResponse> {
    let license = repository::get_by_id(id)
        .await?
        .ok_or(ServiceError::NotFound)?;
    Ok(LicenseStatusResponse::evaluate(license, now))
}

pub fn parse_id(raw: &str) -> ServiceResult<Uuid> {
    Uuid::parse_str(raw.trim()).map_err(|_| ServiceError::InvalidId(raw.to_string()))
}

/// Demo licenses covering every dashboard bucket, dated relative to `today`
pub fn test_data(client_ids: &[Uuid], today: DateTime<Utc>) -> Vec<LicenseDto> {
    let date = |days: i64| Some((today + Duration::days(days)).format("%Y-%m-%d").to_string());
    let client = |i: usize| {
        client_ids
            .get(i % client_ids.len().max(1))
            .map(|id| id.to_string())
            .unwrap_or_default()
    };

    let rows: Vec<(&str, LicenseState, Option<String>, PaymentStatus, Option<f64>, Option<f64>)> = vec![
        ("LIC-0001", LicenseState::Active, date(365), PaymentStatus::Paid, Some(1200.0), None),
        ("LIC-0002", LicenseState::Active, date(5), PaymentStatus::Paid, Some(800.0), None),
        ("LIC-0003", LicenseState::Active, date(20), PaymentStatus::Partial, Some(5000.0), Some(8000.0)),
        ("LIC-0004", LicenseState::Active, date(-3), PaymentStatus::Unpaid, None, None),
        ("LIC-0005", LicenseState::Expired, date(-60), PaymentStatus::Paid, Some(600.0), None),
        ("LIC-0006", LicenseState::Pending, date(100), PaymentStatus::Pending, None, None),
        ("LIC-0007", LicenseState::Suspended, date(45), PaymentStatus::Unpaid, None, None),
        ("LIC-0008", LicenseState::Active, None, PaymentStatus::Paid, Some(2400.0), None),
    ];

    rows.into_iter()
        .enumerate()
        .map(
            |(i, (numero, estado, data_expiracao, conta_pago, valor_pago, valor_total))| {
                LicenseDto {
                    id: None,
                    client_id: client(i),
                    numero_licenca: numero.into(),
                    description: Some(format!("Licença de software {}", numero)),
                    estado,
                    data_expiracao,
                    conta_pago,
                    valor_pago,
                    valor_total,
                    comment: None,
                }
            },
        )
        .collect()
}

/// Seed demo clients and licenses; existing license numbers are skipped
pub async fn insert_test_data() -> ServiceResult<usize> {
    let client_ids = a001_client::service::insert_test_data().await?;
    let mut inserted = 0;
    for dto in test_data(&client_ids, Utc::now()) {
        if repository::get_by_code(&dto.numero_licenca).await?.is_some() {
            continue;
        }
        create(dto).await?;
        inserted += 1;
    }
    tracing::info!("Inserted {} demo licenses", inserted);
    Ok(inserted)
}
