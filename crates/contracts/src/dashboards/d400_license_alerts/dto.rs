use serde::{Deserialize, Serialize};

use chrono::{DateTime, Utc};

use crate::domain::a002_license::{
    classify, outstanding_balance, ClassifiedLicense, DerivedStatus, InactiveReason, License,
    LicenseBuckets, LicenseState,
};

/// Response of the license alerts dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LicenseAlertsResponse {
    /// Instant every license was judged against, RFC 3339
    pub evaluated_at: String,
    pub counts: LicenseAlertCounts,
    pub expiring: Vec<LicenseAlertRow>,
    pub expired: Vec<LicenseAlertRow>,
    pub active: Vec<LicenseAlertRow>,
    pub inactive: Vec<LicenseAlertRow>,
    pub partial_payment: Vec<LicenseAlertRow>,
}

/// Badge and tab counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LicenseAlertCounts {
    pub expiring: usize,
    pub expired: usize,
    pub active: usize,
    pub inactive: usize,
    pub partial_payment: usize,
    pub total_notifications: usize,
}

/// One license line in a dashboard tab
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LicenseAlertRow {
    pub id: String,
    pub client_id: String,
    pub numero_licenca: String,
    pub description: String,
    /// Persisted state
    pub estado: LicenseState,
    /// Effective state shown to the user
    pub display_estado: LicenseState,
    /// "ok" | "warning" | "critical" | "expired" | "inactive"
    pub category: String,
    pub inactive_reason: Option<InactiveReason>,
    pub label: String,
    pub days_remaining: Option<i64>,
    pub data_expiracao: Option<String>,
    /// Set only for partially paid licenses
    pub outstanding_balance: Option<f64>,
}

impl From<&ClassifiedLicense<'_>> for LicenseAlertRow {
    fn from(entry: &ClassifiedLicense<'_>) -> Self {
        let license = entry.license;
        let status = &entry.status;
        Self {
            id: license.to_string_id(),
            client_id: license.client_id.to_string(),
            numero_licenca: license.numero_licenca().to_string(),
            description: license.base.description.clone(),
            estado: license.estado.clone(),
            display_estado: status.display_estado.clone(),
            category: status.category.as_str().to_string(),
            inactive_reason: status.category.inactive_reason(),
            label: status.label.clone(),
            days_remaining: status.days_remaining,
            data_expiracao: license.data_expiracao.clone(),
            outstanding_balance: license
                .is_partial_payment()
                .then(|| outstanding_balance(license)),
        }
    }
}

impl From<&LicenseBuckets<'_>> for LicenseAlertsResponse {
    fn from(buckets: &LicenseBuckets<'_>) -> Self {
        Self {
            evaluated_at: buckets.evaluated_at.to_rfc3339(),
            counts: LicenseAlertCounts {
                expiring: buckets.expiring.len(),
                expired: buckets.expired.len(),
                active: buckets.active.len(),
                inactive: buckets.inactive.len(),
                partial_payment: buckets.partial_payment.len(),
                total_notifications: buckets.total_notification_count,
            },
            expiring: rows(&buckets.expiring),
            expired: rows(&buckets.expired),
            active: rows(&buckets.active),
            inactive: rows(&buckets.inactive),
            partial_payment: rows(&buckets.partial_payment),
        }
    }
}

/// Detail view of one license: stored record, derived status and balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LicenseStatusResponse {
    pub evaluated_at: String,
    pub license: License,
    pub status: DerivedStatus,
    /// Zero unless the license is partially paid
    pub outstanding_balance: f64,
}

impl LicenseStatusResponse {
    pub fn evaluate(license: License, now: DateTime<Utc>) -> Self {
        Self {
            evaluated_at: now.to_rfc3339(),
            status: classify(&license, now),
            outstanding_balance: outstanding_balance(&license),
            license,
        }
    }
}

fn rows(bucket: &[ClassifiedLicense<'_>]) -> Vec<LicenseAlertRow> {
    bucket.iter().map(LicenseAlertRow::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_client::ClientId;
    use crate::domain::a002_license::{aggregate, License, LicenseDto, PaymentStatus, StatusCategory};
    use chrono::{Duration, TimeZone, Utc};

    #[test]
    fn test_response_from_buckets() {
        let now = Utc.with_ymd_and_hms(2024, 6, 10, 12, 0, 0).unwrap();
        let dto = |numero: &str, estado: LicenseState, days: i64| LicenseDto {
            client_id: ClientId::new_v4().to_string(),
            numero_licenca: numero.into(),
            estado,
            data_expiracao: Some((now + Duration::days(days)).to_rfc3339()),
            conta_pago: PaymentStatus::Paid,
            ..Default::default()
        };

        let mut partial = License::new_for_insert(&dto("L1", LicenseState::Active, 3)).unwrap();
        partial.conta_pago = PaymentStatus::Partial;
        partial.valor_pago = Some(5000.0);
        partial.valor_total = Some(8000.0);
        let cancelled = License::new_for_insert(&dto("L2", LicenseState::Cancelled, 3)).unwrap();

        let licenses = vec![partial, cancelled];
        let response = LicenseAlertsResponse::from(&aggregate(&licenses, now));

        assert_eq!(response.counts.expiring, 1);
        assert_eq!(response.counts.inactive, 1);
        assert_eq!(response.counts.partial_payment, 1);
        assert_eq!(response.counts.total_notifications, 2);

        let row = &response.expiring[0];
        assert_eq!(row.category, "critical");
        assert_eq!(row.label, "Crítica");
        assert_eq!(row.days_remaining, Some(3));
        assert_eq!(row.outstanding_balance, Some(3000.0));

        let row = &response.inactive[0];
        assert_eq!(row.inactive_reason, Some(InactiveReason::Cancelled));
        assert_eq!(row.outstanding_balance, None);
        assert_eq!(response.evaluated_at, now.to_rfc3339());
    }

    #[test]
    fn test_status_response() {
        let now = Utc.with_ymd_and_hms(2024, 6, 10, 12, 0, 0).unwrap();
        let license = License::new_for_insert(&LicenseDto {
            client_id: ClientId::new_v4().to_string(),
            numero_licenca: "LIC-9".into(),
            estado: LicenseState::Active,
            data_expiracao: Some("2024-06-07".into()),
            conta_pago: PaymentStatus::Partial,
            valor_pago: Some(5000.0),
            valor_total: Some(8000.0),
            ..Default::default()
        })
        .unwrap();

        let response = LicenseStatusResponse::evaluate(license, now);
        assert_eq!(response.status.category, StatusCategory::Expired);
        assert_eq!(response.status.display_estado, LicenseState::Expired);
        assert_eq!(response.license.estado, LicenseState::Active);
        assert_eq!(response.status.days_remaining, Some(-3));
        assert_eq!(response.outstanding_balance, 3000.0);
    }
}
