//! Text models for the three managed file formats.
//!
//! ## Files
//! - `lines.rs`: raw line splitting that keeps each line's terminator.
//! - `kconfig.rs`: kernel `.config` files (`CONFIG_X=v` / `# CONFIG_X is not set`).
//! - `policy_ini.rs`: sectioned `config-policy.ini`.
//! - `doc_table.rs`: markdown tables in the config README.
//!
//! ## Rules
//! - Every model is pure: `&str` in, `String` out. No filesystem access here.
//! - Lines an edit does not touch are emitted byte-for-byte as they were read.
//! - Edits report `changed`; an edit that cannot find its target is `false`, not an error.

pub mod doc_table;
pub mod kconfig;
pub mod lines;
pub mod policy_ini;

pub use doc_table::DocText;
pub use kconfig::ConfigText;
pub use policy_ini::PolicyText;
