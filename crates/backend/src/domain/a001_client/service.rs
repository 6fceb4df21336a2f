use super::repository;
use crate::shared::error::{ensure_code_free, ServiceError, ServiceResult};
use contracts::domain::a001_client::{Client, ClientDto};
use uuid::Uuid;

/// Create a new client
pub async fn create(dto: ClientDto) -> ServiceResult<Uuid> {
    let code = dto
        .code
        .clone()
        .filter(|c| !c.trim().is_empty())
        .unwrap_or_else(|| format!("CLI-{}", &Uuid::new_v4().simple().to_string()[..8]));

    let mut aggregate = Client::new_for_insert(code, dto.name.clone());
    aggregate.update(&dto);
    aggregate.validate().map_err(ServiceError::Validation)?;

    ensure_code_free(repository::get_by_code(&aggregate.base.code).await?.as_ref(), None)?;

    aggregate.before_write();
    let id = repository::insert(&aggregate).await?;
    tracing::info!("Client {} created ({})", aggregate.base.code, id);
    Ok(id)
}

/// Update an existing client
pub async fn update(dto: ClientDto) -> ServiceResult<()> {
    let id = parse_id(dto.id.as_deref().unwrap_or_default())?;

    let mut aggregate = repository::get_by_id(id)
        .await?
        .ok_or(ServiceError::NotFound)?;

    aggregate.update(&dto);
    aggregate.validate().map_err(ServiceError::Validation)?;
    ensure_code_free(
        repository::get_by_code(&aggregate.base.code).await?.as_ref(),
        Some(aggregate.base.id),
    )?;

    aggregate.before_write();
    repository::update(&aggregate).await?;
    tracing::info!("Client {} updated", aggregate.base.code);
    Ok(())
}

/// Soft delete
pub async fn delete(id: Uuid) -> ServiceResult<bool> {
    Ok(repository::soft_delete(id).await?)
}

pub async fn get_by_id(id: Uuid) -> ServiceResult<Option<Client>> {
    Ok(repository::get_by_id(id).await?)
}

pub async fn list_all() -> ServiceResult<Vec<Client>> {
    Ok(repository::list_all().await?)
}

pub fn parse_id(raw: &str) -> ServiceResult<Uuid> {
    Uuid::parse_str(raw.trim()).map_err(|_| ServiceError::InvalidId(raw.to_string()))
}

/// Demo clients for a fresh database; returns the ids in insertion order
pub async fn insert_test_data() -> ServiceResult<Vec<Uuid>> {
    let data = vec![
        ClientDto {
            code: Some("CLI-001".into()),
            name: "Padaria Pão Quente Ltda".into(),
            document: "12.345.678/0001-90".into(),
            email: Some("financeiro@paoquente.com.br".into()),
            phone: Some("(11) 3456-7890".into()),
            ..Default::default()
        },
        ClientDto {
            code: Some("CLI-002".into()),
            name: "Clínica Bem Estar".into(),
            document: "98.765.432/0001-10".into(),
            email: Some("contato@bemestar.med.br".into()),
            ..Default::default()
        },
        ClientDto {
            code: Some("CLI-003".into()),
            name: "Mercadinho São João".into(),
            document: "11.222.333/0001-44".into(),
            comment: Some("Cliente desde 2019".into()),
            ..Default::default()
        },
    ];

    let mut ids = Vec::with_capacity(data.len());
    for dto in data {
        let id = match repository::get_by_code(dto.code.as_deref().unwrap_or_default()).await? {
            Some(existing) => existing.base.id.value(),
            None => create(dto).await?,
        };
        ids.push(id);
    }
    Ok(ids)
}
