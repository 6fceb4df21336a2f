//! Expiration date evaluation.
//!
//! Dates arrive as free-form strings. Anything that does not parse is treated
//! exactly like a missing date: never expired, no day count.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

const MS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Naive datetime layouts accepted after RFC 3339; interpreted as UTC
const NAIVE_DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parse an expiration date.
///
/// Accepts RFC 3339 (`2025-01-31T12:00:00Z`, `2025-01-31T12:00:00-03:00`),
/// naive datetimes and plain dates (`2025-01-31`, midnight UTC).
pub fn parse_expiration(raw: &str) -> Option<DateTime<Utc>> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// `true` iff the date is present, parses, and lies strictly before `now`
pub fn is_expired(data_expiracao: Option<&str>, now: DateTime<Utc>) -> bool {
    expired_at(data_expiracao.and_then(parse_expiration), now)
}

/// Whole days until expiration, rounded up (`ceil`).
///
/// 0.2 days ahead gives 1, 0.2 days past gives 0, 1.2 days past gives -1.
/// `None` when the date is absent or unparseable.
pub fn days_until_expiration(data_expiracao: Option<&str>, now: DateTime<Utc>) -> Option<i64> {
    data_expiracao
        .and_then(parse_expiration)
        .map(|expiration| days_between(expiration, now))
}

pub(crate) fn expired_at(expiration: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
    matches!(expiration, Some(expiration) if expiration < now)
}

pub(crate) fn days_between(expiration: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    ceil_div(
        expiration.signed_duration_since(now).num_milliseconds(),
        MS_PER_DAY,
    )
}

fn ceil_div(value: i64, divisor: i64) -> i64 {
    let quotient = value.div_euclid(divisor);
    if value.rem_euclid(divisor) == 0 {
        quotient
    } else {
        quotient + 1
    }
}
