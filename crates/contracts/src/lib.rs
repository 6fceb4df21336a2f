//! Shared types for the CRM backend and its clients.
//!
//! Everything in this crate is pure: no I/O, no clock reads. Time-dependent
//! logic takes the reference instant as an explicit argument.

pub mod dashboards;
pub mod domain;
