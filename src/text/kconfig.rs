//! Kernel `.config` line model.
//!
//! Each line is tagged as an enabled option (`CONFIG_X=value`), a disabled
//! option (`# CONFIG_X is not set`) or passthrough text. Edits swap the body
//! of exactly one tagged line; everything else is re-emitted verbatim.

use crate::domain::models::{OptionName, OptionValue, CONFIG_PREFIX};
use crate::text::lines::{join_lines, split_lines, RawLine};
use std::collections::BTreeMap;

const NOT_SET_SUFFIX: &str = " is not set";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigLineKind {
    Set { key: String, value: String },
    Unset { key: String },
    Other,
}

impl ConfigLineKind {
    fn classify(body: &str) -> Self {
        if body.starts_with(CONFIG_PREFIX) {
            if let Some((key, value)) = body.split_once('=') {
                return ConfigLineKind::Set {
                    key: key.to_string(),
                    value: value.to_string(),
                };
            }
        }
        if let Some(key) = body
            .strip_prefix("# ")
            .and_then(|rest| rest.strip_suffix(NOT_SET_SUFFIX))
        {
            if key.starts_with(CONFIG_PREFIX) && !key.contains(char::is_whitespace) {
                return ConfigLineKind::Unset {
                    key: key.to_string(),
                };
            }
        }
        ConfigLineKind::Other
    }

    fn key(&self) -> Option<&str> {
        match self {
            ConfigLineKind::Set { key, .. } | ConfigLineKind::Unset { key } => Some(key),
            ConfigLineKind::Other => None,
        }
    }

    fn value(&self) -> Option<OptionValue> {
        match self {
            ConfigLineKind::Set { value, .. } => Some(OptionValue::Set(value.clone())),
            ConfigLineKind::Unset { .. } => Some(OptionValue::NotSet),
            ConfigLineKind::Other => None,
        }
    }
}

#[derive(Debug, Clone)]
struct ConfigLine {
    raw: RawLine,
    kind: ConfigLineKind,
}

#[derive(Debug, Clone)]
pub struct ConfigText {
    lines: Vec<ConfigLine>,
}

impl ConfigText {
    pub fn parse(text: &str) -> Self {
        let lines = split_lines(text)
            .into_iter()
            .map(|raw| {
                let kind = ConfigLineKind::classify(&raw.body);
                ConfigLine { raw, kind }
            })
            .collect();
        Self { lines }
    }

    pub fn render(&self) -> String {
        join_lines(self.lines.iter().map(|l| &l.raw))
    }

    /// First line for `name` wins; options are expected to be unique per file.
    pub fn get(&self, name: &OptionName) -> Option<OptionValue> {
        let key = name.key();
        self.lines
            .iter()
            .find(|l| l.kind.key() == Some(key.as_str()))
            .and_then(|l| l.kind.value())
    }

    /// All options keyed by prefixed name (`CONFIG_X`), first occurrence wins.
    pub fn options(&self) -> BTreeMap<String, OptionValue> {
        let mut out = BTreeMap::new();
        for line in &self.lines {
            if let (Some(key), Some(value)) = (line.kind.key(), line.kind.value()) {
                out.entry(key.to_string()).or_insert(value);
            }
        }
        out
    }

    pub fn enabled_count(&self) -> usize {
        self.options().values().filter(|v| v.is_enabled()).count()
    }

    /// Rewrites the existing line for `name`. An enabled line is preferred
    /// over a disabled one. Returns `false` when the option has no line at all
    /// (unsupported by this kernel revision) or already has `value`.
    pub fn set(&mut self, name: &OptionName, value: &OptionValue) -> bool {
        let key = name.key();
        let idx = self
            .lines
            .iter()
            .position(|l| matches!(&l.kind, ConfigLineKind::Set { key: k, .. } if *k == key))
            .or_else(|| {
                self.lines
                    .iter()
                    .position(|l| matches!(&l.kind, ConfigLineKind::Unset { key: k } if *k == key))
            });
        let Some(idx) = idx else {
            return false;
        };

        let body = value.render(name);
        let line = &mut self.lines[idx];
        if line.raw.body == body {
            return false;
        }
        line.kind = ConfigLineKind::classify(&body);
        line.raw.body = body;
        true
    }
}
