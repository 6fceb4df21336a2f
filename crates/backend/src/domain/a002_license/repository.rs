use chrono::Utc;
use contracts::domain::a001_client::ClientId;
use contracts::domain::a002_license::{License, LicenseId, LicenseState, PaymentStatus};
use contracts::domain::common::{BaseAggregate, EntityMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a002_license")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// License number
    pub code: String,
    pub description: String,
    pub comment: Option<String>,
    pub client_id: String,
    pub estado: String,
    pub data_expiracao: Option<String>,
    pub conta_pago: String,
    pub valor_pago: Option<f64>,
    pub valor_total: Option<f64>,
    pub is_deleted: bool,
    pub is_posted: bool,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Rows are mapped as stored: states and dates are not repaired here,
/// classification deals with whatever is in the table.
impl From<Model> for License {
    fn from(m: Model) -> Self {
        let metadata = EntityMetadata {
            created_at: m.created_at.unwrap_or_else(Utc::now),
            updated_at: m.updated_at.unwrap_or_else(Utc::now),
            is_deleted: m.is_deleted,
            is_posted: m.is_posted,
            version: m.version,
        };
        let uuid = Uuid::parse_str(&m.id).unwrap_or_else(|_| {
            tracing::warn!("License row with non-UUID id {}, mapped to nil id", m.id);
            Uuid::nil()
        });
        let client_uuid = Uuid::parse_str(&m.client_id).unwrap_or_else(|_| {
            tracing::warn!("License {} has invalid client_id {}", m.code, m.client_id);
            Uuid::nil()
        });

        License {
            base: BaseAggregate::with_metadata(
                LicenseId(uuid),
                m.code,
                m.description,
                m.comment,
                metadata,
            ),
            client_id: ClientId(client_uuid),
            estado: LicenseState::parse(&m.estado),
            data_expiracao: m.data_expiracao,
            conta_pago: PaymentStatus::parse(&m.conta_pago),
            valor_pago: m.valor_pago,
            valor_total: m.valor_total,
        }
    }
}

fn to_active_model(aggregate: &License) -> ActiveModel {
    ActiveModel {
        id: Set(aggregate.base.id.value().to_string()),
        code: Set(aggregate.base.code.clone()),
        description: Set(aggregate.base.description.clone()),
        comment: Set(aggregate.base.comment.clone()),
        client_id: Set(aggregate.client_id.value().to_string()),
        estado: Set(aggregate.estado.as_str().to_string()),
        data_expiracao: Set(aggregate.data_expiracao.clone()),
        conta_pago: Set(aggregate.conta_pago.as_str().to_string()),
        valor_pago: Set(aggregate.valor_pago),
        valor_total: Set(aggregate.valor_total),
        is_deleted: Set(aggregate.base.metadata.is_deleted),
        is_posted: Set(aggregate.base.metadata.is_posted),
        created_at: Set(Some(aggregate.base.metadata.created_at)),
        updated_at: Set(Some(aggregate.base.metadata.updated_at)),
        version: Set(aggregate.base.metadata.version),
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

pub async fn list_all() -> anyhow::Result<Vec<License>> {
    let items = Entity::find()
        .filter(Column::IsDeleted.eq(false))
        .order_by_asc(Column::Code)
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

pub async fn list_by_client(client_id: Uuid) -> anyhow::Result<Vec<License>> {
    let items = Entity::find()
        .filter(Column::ClientId.eq(client_id.to_string()))
        .filter(Column::IsDeleted.eq(false))
        .order_by_asc(Column::Code)
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<License>> {
    let result = Entity::find_by_id(id.to_string())
        .filter(Column::IsDeleted.eq(false))
        .one(conn())
        .await?;
    Ok(result.map(Into::into))
}

pub async fn get_by_code(code: &str) -> anyhow::Result<Option<License>> {
    let result = Entity::find()
        .filter(Column::Code.eq(code))
        .filter(Column::IsDeleted.eq(false))
        .one(conn())
        .await?;
    Ok(result.map(Into::into))
}

pub async fn insert(aggregate: &License) -> anyhow::Result<Uuid> {
    to_active_model(aggregate).insert(conn()).await?;
    Ok(aggregate.base.id.value())
}

pub async fn update(aggregate: &License) -> anyhow::Result<()> {
    let mut active = to_active_model(aggregate);
    active.created_at = sea_orm::ActiveValue::NotSet;
    active.update(conn()).await?;
    Ok(())
}

pub async fn soft_delete(id: Uuid) -> anyhow::Result<bool> {
    use sea_orm::sea_query::Expr;
    let result = Entity::update_many()
        .col_expr(Column::IsDeleted, Expr::value(true))
        .col_expr(Column::UpdatedAt, Expr::value(Utc::now()))
        .filter(Column::Id.eq(id.to_string()))
        .filter(Column::IsDeleted.eq(false))
        .exec(conn())
        .await?;
    Ok(result.rows_affected > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::common::AggregateRoot;
    use sea_orm::EntityName;

    fn row(id: &str) -> Model {
        Model {
            id: id.into(),
            code: "LIC-LEGACY".into(),
            description: String::new(),
            comment: None,
            client_id: "not-a-uuid".into(),
            estado: "Ativa".into(),
            data_expiracao: Some("2024-06-20".into()),
            conta_pago: "Parcial".into(),
            valor_pago: Some(10.0),
            valor_total: Some(20.0),
            is_deleted: false,
            is_posted: false,
            created_at: None,
            updated_at: None,
            version: 3,
        }
    }

    #[test]
    fn test_table_name_matches_aggregate() {
        assert_eq!(Entity.table_name(), License::full_name());
    }

    #[test]
    fn test_model_mapping() {
        let id = Uuid::new_v4();
        let license = License::from(row(&id.to_string()));
        assert_eq!(license.base.id.value(), id);
        assert_eq!(license.estado, LicenseState::Active);
        assert_eq!(license.conta_pago, PaymentStatus::Partial);
        assert_eq!(license.base.metadata.version, 3);
        assert_eq!(license.client_id.value(), Uuid::nil());
    }

    #[test]
    fn test_non_uuid_id_maps_to_stable_nil() {
        let first = License::from(row("legacy-7"));
        let second = License::from(row("legacy-7"));
        assert_eq!(first.base.id.value(), Uuid::nil());
        assert_eq!(first.base.id, second.base.id);
    }
}
