//! Bucketing of a license collection for the alert badge and dashboard tabs.

use chrono::{DateTime, Utc};

use super::aggregate::{License, LicenseState};
use super::payment::amount;
use super::status::{classify, DerivedStatus, StatusCategory};

/// A license paired with its status at the evaluation instant
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedLicense<'a> {
    pub license: &'a License,
    pub status: DerivedStatus,
}

/// Licenses partitioned at one instant.
///
/// `expiring`, `expired`, `active` and `inactive` never share a record.
/// `partial_payment` is orthogonal and may overlap with any of them.
/// Every bucket keeps the input order.
#[derive(Debug, Clone, PartialEq)]
pub struct LicenseBuckets<'a> {
    pub evaluated_at: DateTime<Utc>,
    /// `warning` or `critical`
    pub expiring: Vec<ClassifiedLicense<'a>>,
    pub expired: Vec<ClassifiedLicense<'a>>,
    /// `ok` and effectively `ativa`
    pub active: Vec<ClassifiedLicense<'a>>,
    /// Effectively `pendente`, `cancelada` or `suspensa`
    pub inactive: Vec<ClassifiedLicense<'a>>,
    /// `Parcial` with a positive total
    pub partial_payment: Vec<ClassifiedLicense<'a>>,
    /// expiring + expired + partial payment; inactive records are not alerts
    pub total_notification_count: usize,
}

impl<'a> LicenseBuckets<'a> {
    pub fn is_empty(&self) -> bool {
        self.total_notification_count == 0 && self.active.is_empty() && self.inactive.is_empty()
    }
}

/// Classify every license against the same `now` and bucket the results
pub fn aggregate(licenses: &[License], now: DateTime<Utc>) -> LicenseBuckets<'_> {
    let mut buckets = LicenseBuckets {
        evaluated_at: now,
        expiring: Vec::new(),
        expired: Vec::new(),
        active: Vec::new(),
        inactive: Vec::new(),
        partial_payment: Vec::new(),
        total_notification_count: 0,
    };

    for license in licenses {
        let entry = ClassifiedLicense {
            license,
            status: classify(license, now),
        };

        if license.is_partial_payment() && amount(license.valor_total) > 0.0 {
            buckets.partial_payment.push(entry.clone());
        }

        let category = entry.status.category;
        let effective = &entry.status.display_estado;
        let expired = category == StatusCategory::Expired || *effective == LicenseState::Expired;
        let active = category == StatusCategory::Ok && *effective == LicenseState::Active;
        let inactive = matches!(
            effective,
            LicenseState::Pending | LicenseState::Cancelled | LicenseState::Suspended
        );

        if category.is_expiring() {
            buckets.expiring.push(entry);
        } else if expired {
            buckets.expired.push(entry);
        } else if active {
            buckets.active.push(entry);
        } else if inactive {
            buckets.inactive.push(entry);
        }
    }

    buckets.total_notification_count =
        buckets.expiring.len() + buckets.expired.len() + buckets.partial_payment.len();
    buckets
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_client::ClientId;
    use crate::domain::a002_license::{LicenseDto, PaymentStatus};
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 10, 12, 0, 0).unwrap()
    }

    fn license(numero: &str, estado: &str, days: Option<i64>) -> License {
        License::new_for_insert(&LicenseDto {
            client_id: ClientId::new_v4().to_string(),
            numero_licenca: numero.into(),
            estado: LicenseState::parse(estado),
            data_expiracao: days.map(|d| (now() + Duration::days(d)).to_rfc3339()),
            conta_pago: PaymentStatus::Paid,
            ..Default::default()
        })
        .unwrap()
    }

    fn partial(mut l: License, pago: f64, total: f64) -> License {
        l.conta_pago = PaymentStatus::Partial;
        l.valor_pago = Some(pago);
        l.valor_total = Some(total);
        l
    }

    fn numbers(bucket: &[ClassifiedLicense<'_>]) -> Vec<String> {
        bucket
            .iter()
            .map(|e| e.license.numero_licenca().to_string())
            .collect()
    }

    /// 2 critical, 1 warning, 3 expired (1 persisted, 2 derived), 2 inactive,
    /// 2 fully paid active
    fn mixed_set() -> Vec<License> {
        vec![
            license("C1", "ativa", Some(2)),
            license("OK1", "ativa", Some(90)),
            license("X1", "expirada", Some(-40)),
            license("W1", "ativa", Some(20)),
            license("X2", "ativa", Some(-3)),
            license("P1", "pendente", Some(100)),
            license("C2", "ativa", Some(7)),
            license("S1", "suspensa", None),
            license("X3", "ativa", Some(-1)),
            license("OK2", "ativa", None),
        ]
    }

    #[test]
    fn test_mixed_set_buckets() {
        let licenses = mixed_set();
        let buckets = aggregate(&licenses, now());

        assert_eq!(numbers(&buckets.expiring), ["C1", "W1", "C2"]);
        assert_eq!(numbers(&buckets.expired), ["X1", "X2", "X3"]);
        assert_eq!(numbers(&buckets.active), ["OK1", "OK2"]);
        assert_eq!(numbers(&buckets.inactive), ["P1", "S1"]);
        assert!(buckets.partial_payment.is_empty());
        assert_eq!(buckets.total_notification_count, 2 + 1 + 3);
        assert_eq!(buckets.evaluated_at, now());
    }

    #[test]
    fn test_partial_payment_overlaps_other_buckets() {
        let mut licenses = mixed_set();
        licenses[0] = partial(licenses[0].clone(), 5000.0, 8000.0);
        licenses[1] = partial(licenses[1].clone(), 100.0, 200.0);

        let buckets = aggregate(&licenses, now());

        assert_eq!(numbers(&buckets.partial_payment), ["C1", "OK1"]);
        assert_eq!(numbers(&buckets.expiring), ["C1", "W1", "C2"]);
        assert_eq!(numbers(&buckets.active), ["OK1", "OK2"]);
        assert_eq!(buckets.total_notification_count, 3 + 3 + 2);
    }

    #[test]
    fn test_partial_payment_requires_positive_total() {
        let licenses = vec![
            partial(license("Z", "ativa", Some(90)), 0.0, 0.0),
            partial(license("N", "ativa", Some(90)), 10.0, -5.0),
        ];
        let buckets = aggregate(&licenses, now());
        assert!(buckets.partial_payment.is_empty());
        assert_eq!(buckets.total_notification_count, 0);
    }

    #[test]
    fn test_unknown_state_is_in_no_state_bucket() {
        let licenses = vec![license("U1", "arquivada", Some(10))];
        let buckets = aggregate(&licenses, now());
        assert!(buckets.expiring.is_empty());
        assert!(buckets.expired.is_empty());
        assert!(buckets.active.is_empty());
        assert!(buckets.inactive.is_empty());
        assert!(buckets.is_empty());
    }

    #[test]
    fn test_state_buckets_are_disjoint() {
        let licenses = mixed_set();
        let buckets = aggregate(&licenses, now());
        let mut all: Vec<String> = [
            &buckets.expiring,
            &buckets.expired,
            &buckets.active,
            &buckets.inactive,
        ]
        .iter()
        .flat_map(|b| numbers(b))
        .collect();
        all.sort();
        let before = all.len();
        all.dedup();
        assert_eq!(before, all.len());
        assert_eq!(before, licenses.len());
    }

    #[test]
    fn test_all_records_judged_against_same_instant() {
        let licenses = vec![license("A", "ativa", Some(8)), license("B", "ativa", Some(8))];
        let later = now() + Duration::days(1);
        let buckets = aggregate(&licenses, later);
        for entry in &buckets.expiring {
            assert_eq!(entry.status.days_remaining, Some(7));
            assert_eq!(entry.status.category, StatusCategory::Critical);
        }
        assert_eq!(buckets.expiring.len(), 2);
    }

    #[test]
    fn test_empty_collection() {
        let buckets = aggregate(&[], now());
        assert!(buckets.is_empty());
        assert_eq!(buckets.total_notification_count, 0);
    }

    #[test]
    fn test_aggregate_does_not_touch_records() {
        let licenses = mixed_set();
        let snapshot = licenses.clone();
        let _ = aggregate(&licenses, now());
        assert_eq!(licenses, snapshot);
        assert_eq!(licenses[4].estado, LicenseState::Active);
    }
}
