use serde::{Deserialize, Serialize};

use super::expiry::parse_expiration;
use crate::domain::a001_client::ClientId;
use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate, EntityMetadata};
use crate::uuid_aggregate_id;

// ============================================================================
// ID Type
// ============================================================================

uuid_aggregate_id!(
    /// Unique license identifier
    LicenseId
);

// ============================================================================
// Enums
// ============================================================================

/// Persisted license state (`estado`).
///
/// Values outside the known set are kept verbatim in `Unknown` so that a
/// single odd record coming from storage never breaks decoding of a list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LicenseState {
    /// "ativa"
    Active,
    /// "expirada"
    Expired,
    /// "pendente"
    #[default]
    Pending,
    /// "cancelada"
    Cancelled,
    /// "suspensa"
    Suspended,
    Unknown(String),
}

impl LicenseState {
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "ativa" => LicenseState::Active,
            "expirada" => LicenseState::Expired,
            "pendente" => LicenseState::Pending,
            "cancelada" => LicenseState::Cancelled,
            "suspensa" => LicenseState::Suspended,
            _ => LicenseState::Unknown(value.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            LicenseState::Active => "ativa",
            LicenseState::Expired => "expirada",
            LicenseState::Pending => "pendente",
            LicenseState::Cancelled => "cancelada",
            LicenseState::Suspended => "suspensa",
            LicenseState::Unknown(raw) => raw,
        }
    }
}

impl From<String> for LicenseState {
    fn from(value: String) -> Self {
        LicenseState::parse(&value)
    }
}

impl From<LicenseState> for String {
    fn from(value: LicenseState) -> Self {
        value.as_str().to_string()
    }
}

impl std::fmt::Display for LicenseState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Payment status of the license term (`contaPago`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PaymentStatus {
    /// "Pago"
    Paid,
    /// "Não Pago"
    Unpaid,
    /// "Parcial"
    Partial,
    /// "Pendente"
    #[default]
    Pending,
    Unknown(String),
}

impl PaymentStatus {
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "pago" => PaymentStatus::Paid,
            "não pago" | "nao pago" => PaymentStatus::Unpaid,
            "parcial" => PaymentStatus::Partial,
            "pendente" => PaymentStatus::Pending,
            _ => PaymentStatus::Unknown(value.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            PaymentStatus::Paid => "Pago",
            PaymentStatus::Unpaid => "Não Pago",
            PaymentStatus::Partial => "Parcial",
            PaymentStatus::Pending => "Pendente",
            PaymentStatus::Unknown(raw) => raw,
        }
    }
}

impl From<String> for PaymentStatus {
    fn from(value: String) -> Self {
        PaymentStatus::parse(&value)
    }
}

impl From<PaymentStatus> for String {
    fn from(value: PaymentStatus) -> Self {
        value.as_str().to_string()
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// Client license term. `base.code` holds the license number.
///
/// Travels as a flat [`LicenseRecord`], so the number is `numeroLicenca`
/// on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "LicenseRecord", into = "LicenseRecord")]
pub struct License {
    pub base: BaseAggregate<LicenseId>,
    pub client_id: ClientId,
    pub estado: LicenseState,
    /// Expiration date as supplied; may be absent or unparseable
    pub data_expiracao: Option<String>,
    pub conta_pago: PaymentStatus,
    pub valor_pago: Option<f64>,
    /// Only meaningful when `conta_pago` is `Parcial`
    pub valor_total: Option<f64>,
}

/// Wire shape of a license as stored and listed
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LicenseRecord {
    pub id: LicenseId,
    pub client_id: ClientId,
    pub numero_licenca: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub comment: Option<String>,
    pub estado: LicenseState,
    #[serde(default)]
    pub data_expiracao: Option<String>,
    #[serde(default)]
    pub conta_pago: PaymentStatus,
    #[serde(default)]
    pub valor_pago: Option<f64>,
    #[serde(default)]
    pub valor_total: Option<f64>,
    /// Absent in records coming from outside; fresh metadata is used then
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<EntityMetadata>,
}

impl From<LicenseRecord> for License {
    fn from(r: LicenseRecord) -> Self {
        License {
            base: BaseAggregate::with_metadata(
                r.id,
                r.numero_licenca,
                r.description,
                r.comment,
                r.metadata.unwrap_or_default(),
            ),
            client_id: r.client_id,
            estado: r.estado,
            data_expiracao: r.data_expiracao,
            conta_pago: r.conta_pago,
            valor_pago: r.valor_pago,
            valor_total: r.valor_total,
        }
    }
}

impl From<License> for LicenseRecord {
    fn from(l: License) -> Self {
        LicenseRecord {
            id: l.base.id,
            client_id: l.client_id,
            numero_licenca: l.base.code,
            description: l.base.description,
            comment: l.base.comment,
            estado: l.estado,
            data_expiracao: l.data_expiracao,
            conta_pago: l.conta_pago,
            valor_pago: l.valor_pago,
            valor_total: l.valor_total,
            metadata: Some(l.base.metadata),
        }
    }
}

impl License {
    /// Build a new license from form data
    pub fn new_for_insert(dto: &LicenseDto) -> Result<Self, String> {
        let client_id = ClientId::from_string(dto.client_id.trim())?;
        let mut license = Self {
            base: BaseAggregate::new(LicenseId::new_v4(), String::new(), String::new()),
            client_id,
            estado: LicenseState::default(),
            data_expiracao: None,
            conta_pago: PaymentStatus::default(),
            valor_pago: None,
            valor_total: None,
        };
        license.update(dto)?;
        Ok(license)
    }

    pub fn to_string_id(&self) -> String {
        self.base.id.as_string()
    }

    pub fn numero_licenca(&self) -> &str {
        &self.base.code
    }

    pub fn is_partial_payment(&self) -> bool {
        self.conta_pago == PaymentStatus::Partial
    }

    /// Apply form data. Fails only when the client reference is not a UUID.
    pub fn update(&mut self, dto: &LicenseDto) -> Result<(), String> {
        self.client_id = ClientId::from_string(dto.client_id.trim())?;
        self.base.code = dto.numero_licenca.trim().to_string();
        self.base.description = dto
            .description
            .as_ref()
            .map(|d| d.trim().to_string())
            .unwrap_or_default();
        self.base.comment = dto.comment.clone();
        self.estado = dto.estado.clone();
        self.data_expiracao = dto
            .data_expiracao
            .as_ref()
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());
        self.conta_pago = dto.conta_pago.clone();
        self.valor_pago = dto.valor_pago;
        self.valor_total = dto.valor_total;
        Ok(())
    }

    /// Write-path validation. Classification never calls this: stored
    /// records are classified as they are.
    pub fn validate(&self) -> Result<(), String> {
        if self.base.code.trim().is_empty() {
            return Err("Número da licença não pode ser vazio".into());
        }

        if let Some(raw) = &self.data_expiracao {
            if parse_expiration(raw).is_none() {
                return Err(format!("Data de expiração inválida: {}", raw));
            }
        }

        for (name, value) in [("valorPago", self.valor_pago), ("valorTotal", self.valor_total)] {
            if let Some(v) = value {
                if !v.is_finite() || v < 0.0 {
                    return Err(format!("{} deve ser um valor não negativo", name));
                }
            }
        }

        if self.is_partial_payment() {
            let paid = self.valor_pago.unwrap_or(0.0);
            let total = self.valor_total.unwrap_or(0.0);
            if total <= 0.0 {
                return Err("Pagamento parcial exige valorTotal maior que zero".into());
            }
            if paid > total {
                return Err(format!(
                    "Valor pago ({:.2}) não pode exceder o valor total ({:.2})",
                    paid, total
                ));
            }
        }

        Ok(())
    }

    pub fn before_write(&mut self) {
        self.base.before_write();
    }
}

impl AggregateRoot for License {
    type Id = LicenseId;

    fn id(&self) -> Self::Id {
        self.base.id
    }

    fn code(&self) -> &str {
        &self.base.code
    }

    fn aggregate_index() -> &'static str {
        "a002"
    }

    fn collection_name() -> &'static str {
        "license"
    }

    fn element_name() -> &'static str {
        "Licença"
    }
}

// ============================================================================
// Forms / DTOs
// ============================================================================

/// Create/update form for a license, field names as the dashboard sends them
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LicenseDto {
    pub id: Option<String>,

    #[serde(rename = "clientId")]
    pub client_id: String,

    #[serde(rename = "numeroLicenca")]
    pub numero_licenca: String,

    pub description: Option<String>,

    #[serde(default)]
    pub estado: LicenseState,

    #[serde(rename = "dataExpiracao")]
    pub data_expiracao: Option<String>,

    #[serde(rename = "contaPago", default)]
    pub conta_pago: PaymentStatus,

    #[serde(rename = "valorPago")]
    pub valor_pago: Option<f64>,

    #[serde(rename = "valorTotal")]
    pub valor_total: Option<f64>,

    pub comment: Option<String>,
}
