//! Service layer containing business logic and side-effect helpers.
//!
//! ## Service map
//! - `classify.rs`: subsystem categories and the vendor-specific marker test.
//! - `reconcile.rs`: tracks vs policy (MISSING/MISMATCH) and vendor divergence across tracks.
//! - `planner.rs`: `set`/`remove` change plans and gated apply.
//! - `review.rs`: categorized diff of two configs.
//! - `layout.rs`: where tracks, policy, README and dev copies live.
//! - `storage.rs`: optional reads and the plan writer seam.
//! - `output.rs`: path formatting for text reports.
//!
//! ## Conventions
//! - Prefer pure helpers where possible; text edits live in `crate::text`.
//! - Side effects should be explicit and localized (reads in loaders, writes through `PlanWriter`).
//! - Keep command handlers thin; delegate to services.

pub mod classify;
pub mod layout;
pub mod output;
pub mod planner;
pub mod reconcile;
pub mod review;
pub mod storage;
