//! Derived display status of a license.
//!
//! The status is a pure function of `(estado, dataExpiracao, now)`; it is
//! never stored and the license itself is never rewritten.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::aggregate::{License, LicenseState};
use super::expiry::{days_between, expired_at, parse_expiration};

/// Last day count (inclusive) that is still `critical`
pub const CRITICAL_DAYS: i64 = 7;
/// Last day count (inclusive) that is still `warning`
pub const WARNING_DAYS: i64 = 30;

/// Why a license is not in force
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InactiveReason {
    Pending,
    Cancelled,
    Suspended,
    /// State string not known to the system
    Other,
}

/// Coarse bucket driving badge color and alert grouping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "reason", rename_all = "lowercase")]
pub enum StatusCategory {
    Ok,
    Warning,
    Critical,
    Expired,
    Inactive(InactiveReason),
}

impl StatusCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusCategory::Ok => "ok",
            StatusCategory::Warning => "warning",
            StatusCategory::Critical => "critical",
            StatusCategory::Expired => "expired",
            StatusCategory::Inactive(_) => "inactive",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StatusCategory::Ok => "Normal",
            StatusCategory::Warning => "Atenção",
            StatusCategory::Critical => "Crítica",
            StatusCategory::Expired => "Expirada",
            StatusCategory::Inactive(InactiveReason::Pending) => "Pendente",
            StatusCategory::Inactive(InactiveReason::Cancelled) => "Cancelada",
            StatusCategory::Inactive(InactiveReason::Suspended) => "Suspensa",
            StatusCategory::Inactive(InactiveReason::Other) => "Inativa",
        }
    }

    pub fn inactive_reason(&self) -> Option<InactiveReason> {
        match self {
            StatusCategory::Inactive(reason) => Some(*reason),
            _ => None,
        }
    }

    /// Expiring soon (`warning` or `critical`)
    pub fn is_expiring(&self) -> bool {
        matches!(self, StatusCategory::Warning | StatusCategory::Critical)
    }
}

impl std::fmt::Display for StatusCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedStatus {
    pub category: StatusCategory,
    pub label: String,
    /// Effective state: `ativa` past its expiration shows as `expirada`
    pub display_estado: LicenseState,
    /// Negative once past expiration; `None` without a usable date
    pub days_remaining: Option<i64>,
}

/// State used for classification after the expiration auto-correction
pub fn effective_estado(
    estado: &LicenseState,
    data_expiracao: Option<&str>,
    now: DateTime<Utc>,
) -> LicenseState {
    effective_at(estado, data_expiracao.and_then(parse_expiration), now)
}

fn effective_at(
    estado: &LicenseState,
    expiration: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> LicenseState {
    if *estado == LicenseState::Active && expired_at(expiration, now) {
        LicenseState::Expired
    } else {
        estado.clone()
    }
}

/// Classify one license at `now`
pub fn classify(license: &License, now: DateTime<Utc>) -> DerivedStatus {
    classify_parts(&license.estado, license.data_expiracao.as_deref(), now)
}

/// Classify from the raw fields. First matching rule wins:
///
/// 1. `ativa` past expiration is treated as `expirada`;
/// 2. any non-`ativa` state maps straight to its category;
/// 3. `ativa` is graded by the remaining day count.
pub fn classify_parts(
    estado: &LicenseState,
    data_expiracao: Option<&str>,
    now: DateTime<Utc>,
) -> DerivedStatus {
    let expiration = data_expiracao.and_then(parse_expiration);
    let days_remaining = expiration.map(|e| days_between(e, now));
    let display_estado = effective_at(estado, expiration, now);

    let category = match &display_estado {
        LicenseState::Active => category_for_days(days_remaining),
        LicenseState::Expired => StatusCategory::Expired,
        LicenseState::Pending => StatusCategory::Inactive(InactiveReason::Pending),
        LicenseState::Cancelled => StatusCategory::Inactive(InactiveReason::Cancelled),
        LicenseState::Suspended => StatusCategory::Inactive(InactiveReason::Suspended),
        LicenseState::Unknown(_) => StatusCategory::Inactive(InactiveReason::Other),
    };

    DerivedStatus {
        category,
        label: category.label().to_string(),
        display_estado,
        days_remaining,
    }
}

/// Grade an active license. No expiration date means it never expires.
fn category_for_days(days_remaining: Option<i64>) -> StatusCategory {
    match days_remaining {
        None => StatusCategory::Ok,
        Some(days) if days < 0 => StatusCategory::Expired,
        Some(days) if days <= CRITICAL_DAYS => StatusCategory::Critical,
        Some(days) if days <= WARNING_DAYS => StatusCategory::Warning,
        Some(_) => StatusCategory::Ok,
    }
}
