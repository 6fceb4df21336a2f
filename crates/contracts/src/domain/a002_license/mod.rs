//! Licenses and their lifecycle classification.
//!
//! `expiry` parses and compares expiration dates, `status` turns one license
//! into a [`DerivedStatus`], `notifications` buckets a whole collection for
//! the alert badge and tabs, `payment` computes partial-payment balances.

pub mod aggregate;
pub mod expiry;
pub mod notifications;
pub mod payment;
pub mod status;

pub use aggregate::{License, LicenseDto, LicenseId, LicenseRecord, LicenseState, PaymentStatus};
pub use notifications::{aggregate, ClassifiedLicense, LicenseBuckets};
pub use payment::outstanding_balance;
pub use status::{classify, DerivedStatus, InactiveReason, StatusCategory};
