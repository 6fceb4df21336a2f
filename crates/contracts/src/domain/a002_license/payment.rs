use super::aggregate::License;

/// Amount still owed on a partially paid license.
///
/// `max(0, valorTotal - valorPago)` for `Parcial`, `0` for any other payment
/// status. Missing, negative or non-finite amounts count as zero.
pub fn outstanding_balance(license: &License) -> f64 {
    if !license.is_partial_payment() {
        return 0.0;
    }
    (amount(license.valor_total) - amount(license.valor_pago)).max(0.0)
}

pub(crate) fn amount(value: Option<f64>) -> f64 {
    value.filter(|v| v.is_finite() && *v > 0.0).unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_client::ClientId;
    use crate::domain::a002_license::{LicenseDto, PaymentStatus};

    fn license(conta_pago: PaymentStatus, pago: Option<f64>, total: Option<f64>) -> License {
        License::new_for_insert(&LicenseDto {
            client_id: ClientId::new_v4().to_string(),
            numero_licenca: "LIC-1".into(),
            conta_pago,
            valor_pago: pago,
            valor_total: total,
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_partial_balance() {
        let l = license(PaymentStatus::Partial, Some(5000.0), Some(8000.0));
        assert_eq!(outstanding_balance(&l), 3000.0);
    }

    #[test]
    fn test_paid_has_no_balance() {
        let l = license(PaymentStatus::Paid, Some(5000.0), Some(0.0));
        assert_eq!(outstanding_balance(&l), 0.0);

        let l = license(PaymentStatus::Unpaid, None, Some(8000.0));
        assert_eq!(outstanding_balance(&l), 0.0);
    }

    #[test]
    fn test_overpaid_partial_clamps_to_zero() {
        let l = license(PaymentStatus::Partial, Some(9000.0), Some(8000.0));
        assert_eq!(outstanding_balance(&l), 0.0);
    }

    #[test]
    fn test_missing_or_negative_amounts_count_as_zero() {
        let l = license(PaymentStatus::Partial, None, Some(8000.0));
        assert_eq!(outstanding_balance(&l), 8000.0);

        let l = license(PaymentStatus::Partial, Some(-100.0), Some(500.0));
        assert_eq!(outstanding_balance(&l), 500.0);

        let l = license(PaymentStatus::Partial, Some(100.0), None);
        assert_eq!(outstanding_balance(&l), 0.0);

        let l = license(PaymentStatus::Partial, Some(f64::NAN), Some(500.0));
        assert_eq!(outstanding_balance(&l), 500.0);
    }
}
