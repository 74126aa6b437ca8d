use std::fmt;
use std::path::PathBuf;

pub const CONFIG_PREFIX: &str = "CONFIG_";

/// Bare kernel option name (`USB_UAS`), accepted with or without `CONFIG_`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OptionName(String);

impl OptionName {
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        Self(raw.strip_prefix(CONFIG_PREFIX).unwrap_or(raw).to_string())
    }

    pub fn bare(&self) -> &str {
        &self.0
    }

    /// Prefixed key as it appears in a `.config` file.
    pub fn key(&self) -> String {
        format!("{}{}", CONFIG_PREFIX, self.0)
    }

    /// Policy and documentation lookups ignore case.
    pub fn matches_ignore_case(&self, other: &str) -> bool {
        let other = other.trim();
        let other = other.strip_prefix(CONFIG_PREFIX).unwrap_or(other);
        self.0.eq_ignore_ascii_case(other)
    }
}

impl fmt::Display for OptionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Value of an option line that exists in a config file.
///
/// A missing line is modelled as `Option::<OptionValue>::None`, so "absent"
/// and "explicitly not set" never collapse into each other.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionValue {
    /// `CONFIG_X=<literal>`
    Set(String),
    /// `# CONFIG_X is not set`
    NotSet,
}

impl OptionValue {
    /// Value requested on the command line or by policy; `n` means the
    /// not-set comment form.
    pub fn from_literal(value: &str) -> Self {
        if value == "n" {
            OptionValue::NotSet
        } else {
            OptionValue::Set(value.to_string())
        }
    }

    /// Comparable literal; the not-set form compares as `n`.
    pub fn as_str(&self) -> &str {
        match self {
            OptionValue::Set(v) => v,
            OptionValue::NotSet => "n",
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.as_str() != "n"
    }

    pub fn render(&self, name: &OptionName) -> String {
        match self {
            OptionValue::Set(v) => format!("{}={}", name.key(), v),
            OptionValue::NotSet => format!("# {} is not set", name.key()),
        }
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyEntry {
    /// Key as written in the policy file.
    pub key: String,
    pub value: String,
    pub section: String,
}

impl PolicyEntry {
    pub fn option(&self) -> OptionName {
        OptionName::parse(&self.key.to_ascii_uppercase())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocRow {
    pub option: OptionName,
    pub kind: String,
    pub description: String,
    pub heading: String,
}

impl DocRow {
    pub fn render(&self) -> String {
        format!(
            "| `{}` | {} | {} |",
            self.option.bare(),
            self.kind,
            self.description
        )
    }
}

/// A pending full-file replacement. Nothing touches disk until applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeRecord {
    pub path: PathBuf,
    pub description: String,
    pub new_text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViolationKind {
    Missing,
    Mismatch { actual: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Prefixed key, e.g. `CONFIG_NET_FOO`.
    pub option: String,
    pub track: String,
    pub file: String,
    pub required: String,
    pub kind: ViolationKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixRecord {
    pub file: String,
    pub old: String,
    pub new: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackLoad {
    pub label: String,
    pub file: String,
    /// `None` when the track file does not exist.
    pub enabled: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VendorRow {
    pub option: String,
    /// `(track label, value or "-")` in track declaration order.
    pub values: Vec<(String, String)>,
    pub divergent: bool,
}

#[derive(Debug, Default)]
pub struct ReconcileReport {
    pub tracks: Vec<TrackLoad>,
    pub compared: bool,
    pub policy_found: bool,
    pub policy_size: usize,
    pub violations: Vec<Violation>,
    pub fixed: Vec<FixRecord>,
    /// Write failure that stopped fix mode; `fixed` holds what was written before it.
    pub fix_error: Option<crate::error::TrackError>,
    pub vendor_rows: Vec<VendorRow>,
    pub vendor_total: usize,
}

impl ReconcileReport {
    pub fn divergent_count(&self) -> usize {
        self.vendor_rows.iter().filter(|r| r.divergent).count()
    }

    pub fn unresolved(&self) -> usize {
        self.violations.len().saturating_sub(self.fixed.len())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryBucket {
    pub category: String,
    /// `(key, value)` pairs shown in the report.
    pub shown: Vec<(String, String)>,
    pub total: usize,
}

impl CategoryBucket {
    pub fn hidden(&self) -> usize {
        self.total - self.shown.len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangedOption {
    pub option: String,
    pub old: String,
    pub new: String,
    pub vendor: bool,
}

#[derive(Debug, Clone, Default)]
pub struct ReviewReport {
    pub old_name: String,
    pub new_name: String,
    pub old_enabled: usize,
    pub new_enabled: usize,
    pub added_total: usize,
    pub added: Vec<CategoryBucket>,
    pub removed_enabled: Vec<(String, String)>,
    pub removed_disabled: Vec<String>,
    pub changed: Vec<ChangedOption>,
}

impl ReviewReport {
    pub fn removed_total(&self) -> usize {
        self.removed_enabled.len() + self.removed_disabled.len()
    }

    pub fn has_changes(&self) -> bool {
        self.added_total > 0 || self.removed_total() > 0 || !self.changed.is_empty()
    }
}
