use chrono::{DateTime, Utc};
use contracts::dashboards::d400_license_alerts::LicenseAlertsResponse;
use contracts::domain::a002_license::{aggregate, License};
use uuid::Uuid;

use crate::domain::a002_license;
use crate::shared::error::ServiceResult;
use crate::shared::format::format_brl;

/// License alerts for the whole portfolio, or for one client.
///
/// `now` is captured once by the caller so every license is judged against
/// the same instant.
pub async fn get_license_alerts(
    client_id: Option<Uuid>,
    now: DateTime<Utc>,
) -> ServiceResult<LicenseAlertsResponse> {
    let licenses = match client_id {
        Some(id) => a002_license::service::list_by_client(id).await?,
        None => a002_license::service::list_all().await?,
    };
    Ok(build_alerts(&licenses, now))
}

/// Pure part of the dashboard: bucket, count and log a summary
pub fn build_alerts(licenses: &[License], now: DateTime<Utc>) -> LicenseAlertsResponse {
    let buckets = aggregate(licenses, now);
    let response = LicenseAlertsResponse::from(&buckets);

    let outstanding: f64 = response
        .partial_payment
        .iter()
        .filter_map(|row| row.outstanding_balance)
        .sum();

    tracing::info!(
        "License alerts: {} licenses, {} expiring, {} expired, {} partial ({} outstanding), {} notifications",
        licenses.len(),
        response.counts.expiring,
        response.counts.expired,
        response.counts.partial_payment,
        format_brl(outstanding),
        response.counts.total_notifications
    );

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use contracts::domain::a001_client::ClientId;
    use contracts::domain::a002_license::{LicenseDto, LicenseState, PaymentStatus};

    fn license(numero: &str, estado: LicenseState, days: i64, now: DateTime<Utc>) -> License {
        License::new_for_insert(&LicenseDto {
            client_id: ClientId::new_v4().to_string(),
            numero_licenca: numero.into(),
            estado,
            data_expiracao: Some((now + Duration::days(days)).to_rfc3339()),
            conta_pago: PaymentStatus::Paid,
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_build_alerts_counts() {
        let now = Utc.with_ymd_and_hms(2024, 6, 10, 12, 0, 0).unwrap();
        let mut partial = license("L3", LicenseState::Active, 60, now);
        partial.conta_pago = PaymentStatus::Partial;
        partial.valor_pago = Some(1000.0);
        partial.valor_total = Some(1500.0);

        let licenses = vec![
            license("L1", LicenseState::Active, 2, now),
            license("L2", LicenseState::Active, -2, now),
            partial,
            license("L4", LicenseState::Pending, 10, now),
        ];

        let response = build_alerts(&licenses, now);
        assert_eq!(response.counts.expiring, 1);
        assert_eq!(response.counts.expired, 1);
        assert_eq!(response.counts.active, 1);
        assert_eq!(response.counts.inactive, 1);
        assert_eq!(response.counts.partial_payment, 1);
        assert_eq!(response.counts.total_notifications, 3);
        assert_eq!(response.partial_payment[0].outstanding_balance, Some(500.0));
        assert_eq!(response.expired[0].display_estado, LicenseState::Expired);
        assert_eq!(response.expired[0].estado, LicenseState::Active);
    }

    #[test]
    fn test_build_alerts_empty() {
        let now = Utc.with_ymd_and_hms(2024, 6, 10, 12, 0, 0).unwrap();
        let response = build_alerts(&[], now);
        assert_eq!(response.counts.total_notifications, 0);
        assert_eq!(response.counts.active + response.counts.inactive, 0);
        assert!(response.expiring.is_empty());
    }
}
