//! Sectioned policy store (`config-policy.ini`).
//!
//! ```ini
//! [usb]
//! USB_UAS=m
//! ```
//!
//! Sections only group options for humans; enforcement is per option.
//! Keys match case-insensitively against the bare option name. When the
//! same key appears in several sections the first one wins.

use crate::domain::models::{OptionName, PolicyEntry};
use crate::text::lines::{ending_for_insert, join_lines, split_lines, RawLine};
use std::collections::BTreeMap;

const UNKNOWN_SECTION: &str = "unknown";

#[derive(Debug, Clone, PartialEq, Eq)]
enum PolicyLineKind {
    Header(String),
    Entry { key: String, value: String },
    Other,
}

impl PolicyLineKind {
    fn classify(body: &str) -> Self {
        let t = body.trim();
        if t.starts_with('[') && t.ends_with(']') && t.len() >= 2 {
            return PolicyLineKind::Header(t[1..t.len() - 1].trim().to_string());
        }
        if t.starts_with('#') || t.starts_with(';') {
            return PolicyLineKind::Other;
        }
        match t.split_once('=') {
            Some((key, value)) => PolicyLineKind::Entry {
                key: key.trim().to_string(),
                value: value.trim().to_string(),
            },
            None => PolicyLineKind::Other,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PolicyText {
    lines: Vec<RawLine>,
}

impl PolicyText {
    pub fn parse(text: &str) -> Self {
        Self {
            lines: split_lines(text),
        }
    }

    pub fn render(&self) -> String {
        join_lines(&self.lines)
    }

    fn kinds(&self) -> impl Iterator<Item = (usize, PolicyLineKind)> + '_ {
        self.lines
            .iter()
            .enumerate()
            .map(|(i, l)| (i, PolicyLineKind::classify(&l.body)))
    }

    /// Every entry in file order, duplicates included.
    pub fn entries(&self) -> Vec<PolicyEntry> {
        let mut section: Option<String> = None;
        let mut out = Vec::new();
        for (_, kind) in self.kinds() {
            match kind {
                PolicyLineKind::Header(name) => section = Some(name),
                PolicyLineKind::Entry { key, value } => out.push(PolicyEntry {
                    key,
                    value,
                    section: section
                        .clone()
                        .unwrap_or_else(|| UNKNOWN_SECTION.to_string()),
                }),
                PolicyLineKind::Other => {}
            }
        }
        out
    }

    pub fn lookup(&self, name: &OptionName) -> Option<PolicyEntry> {
        self.entries()
            .into_iter()
            .find(|e| name.matches_ignore_case(&e.key))
    }

    /// Required values keyed by prefixed, upper-cased option (`CONFIG_X`).
    /// A key repeated in a later section is shadowed by the first one.
    pub fn requirements(&self) -> BTreeMap<String, PolicyEntry> {
        let mut out = BTreeMap::new();
        for entry in self.entries() {
            let key = entry.option().key();
            if out.contains_key(&key) {
                tracing::debug!(option = %key, section = %entry.section, "duplicate policy key shadowed");
                continue;
            }
            out.insert(key, entry);
        }
        out
    }

    fn entry_index(&self, name: &OptionName) -> Option<usize> {
        self.kinds().find_map(|(i, kind)| match kind {
            PolicyLineKind::Entry { key, .. } if name.matches_ignore_case(&key) => Some(i),
            _ => None,
        })
    }

    /// Updates the option in place wherever it lives, otherwise appends it as
    /// the last entry of `section`, creating the section at end of file when
    /// it does not exist yet.
    pub fn set(&mut self, name: &OptionName, value: &str, section: &str) -> bool {
        let new_entry = format!("{}={}", name.bare().to_ascii_uppercase(), value);

        if let Some(idx) = self.entry_index(name) {
            if self.lines[idx].body.trim() == new_entry {
                return false;
            }
            self.lines[idx].body = new_entry;
            return true;
        }

        let header = self.kinds().find_map(|(i, kind)| match kind {
            PolicyLineKind::Header(h) if h == section => Some(i),
            _ => None,
        });

        match header {
            Some(h) => {
                let mut insert_at = h + 1;
                for (i, line) in self.lines.iter().enumerate().skip(h + 1) {
                    if line.is_blank()
                        || matches!(PolicyLineKind::classify(&line.body), PolicyLineKind::Header(_))
                    {
                        break;
                    }
                    insert_at = i + 1;
                }
                let ending = ending_for_insert(&mut self.lines, insert_at);
                self.lines.insert(
                    insert_at,
                    RawLine {
                        body: new_entry,
                        ending,
                    },
                );
            }
            None => {
                if let Some(last) = self.lines.last_mut() {
                    if last.ending.is_empty() {
                        last.ending = "\n".to_string();
                    }
                    if !last.is_blank() {
                        self.lines.push(RawLine::new(""));
                    }
                }
                self.lines.push(RawLine::new(format!("[{}]", section)));
                self.lines.push(RawLine::new(new_entry));
            }
        }
        true
    }

    /// Drops every entry for the option across all sections.
    pub fn remove(&mut self, name: &OptionName) -> bool {
        let before = self.lines.len();
        self.lines.retain(|l| {
            !matches!(
                PolicyLineKind::classify(&l.body),
                PolicyLineKind::Entry { ref key, .. } if name.matches_ignore_case(key)
            )
        });
        self.lines.len() != before
    }
}
