//! Command handler layer.
//!
//! This module owns CLI-oriented orchestration and text output.
//!
//! ## Files
//! - `options.rs`: show/set/remove for a single option.
//! - `reconcile.rs`: reconcile and review reports.
//!
//! ## Principles
//! - Parse/match CLI inputs here.
//! - Delegate business logic to `services/*`.
//! - Nothing is written unless the user passed `--apply` or `--fix`.

pub mod options;
pub mod reconcile;

pub use options::handle_option_commands;
pub use reconcile::handle_reconcile_command;
