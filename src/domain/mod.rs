//! Shared data model layer (structs/constants only).
//!
//! ## Purpose
//! - Keep option/value/report types in one place.
//! - Avoid cyclic imports between text models and services.
//!
//! ## Files
//! - `models.rs`: option names, tri-state values, policy/doc entries, change records, reports.
//!
//! ## Rule of thumb
//! Domain types should be data-only: no filesystem side effects.

pub mod models;
