//! Multi-file change plans for `set` and `remove`.
//!
//! Planning reads every relevant file fresh and produces an ordered list of
//! [`ChangeRecord`]s plus per-file warnings. Nothing is written until
//! [`Plan::apply`] runs, and applying stops at the first failed write without
//! rolling back earlier ones.

use crate::domain::models::{ChangeRecord, DocRow, OptionName, OptionValue};
use crate::services::layout::Layout;
use crate::services::output::file_name;
use crate::services::storage::{read_optional, PlanWriter};
use crate::text::{ConfigText, DocText, PolicyText};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct DocSpec {
    pub heading: String,
    pub kind: String,
    pub description: String,
}

#[derive(Debug, Clone)]
pub struct SetRequest {
    pub option: OptionName,
    pub value: String,
    pub policy_section: Option<String>,
    pub doc: Option<DocSpec>,
}

#[derive(Debug, Clone)]
pub struct RemoveRequest {
    pub option: OptionName,
    pub from_policy: bool,
    pub from_doc: bool,
}

#[derive(Debug, Clone, Default)]
pub struct Plan {
    pub changes: Vec<ChangeRecord>,
    /// Non-fatal per-file notes, e.g. a track that lacks the option.
    pub warnings: Vec<String>,
}

#[derive(Debug)]
pub enum WriteOutcome {
    Written,
    Failed(crate::error::TrackError),
    NotAttempted,
}

#[derive(Debug)]
pub struct ApplyReport {
    pub outcomes: Vec<(PathBuf, WriteOutcome)>,
}

impl ApplyReport {
    pub fn written(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|(_, o)| matches!(o, WriteOutcome::Written))
            .count()
    }

    /// Consumes the report, yielding the write error if one occurred.
    pub fn into_result(self) -> Result<usize, crate::error::TrackError> {
        let written = self.written();
        for (_, outcome) in self.outcomes {
            if let WriteOutcome::Failed(e) = outcome {
                return Err(e);
            }
        }
        Ok(written)
    }
}

impl Plan {
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    fn record(&mut self, path: PathBuf, description: String, new_text: String) {
        self.changes.push(ChangeRecord {
            path,
            description,
            new_text,
        });
    }

    /// Writes records in order; after the first failure the rest are
    /// reported as not attempted.
    pub fn apply<W: PlanWriter>(&self, writer: &mut W) -> ApplyReport {
        let mut outcomes = Vec::with_capacity(self.changes.len());
        let mut failed = false;
        for change in &self.changes {
            let outcome = if failed {
                WriteOutcome::NotAttempted
            } else {
                match writer.write(&change.path, &change.new_text) {
                    Ok(()) => WriteOutcome::Written,
                    Err(e) => {
                        tracing::warn!(path = %change.path.display(), "write failed, stopping apply");
                        failed = true;
                        WriteOutcome::Failed(e)
                    }
                }
            };
            outcomes.push((change.path.clone(), outcome));
        }
        ApplyReport { outcomes }
    }
}

pub fn plan_set(layout: &Layout, req: &SetRequest) -> anyhow::Result<Plan> {
    let mut plan = Plan::default();
    let key = req.option.key();
    let value = OptionValue::from_literal(&req.value);
    let description = format!("set {}={}", key, req.value);

    for spec in &layout.tracks {
        let path = layout.track_path(spec);
        let Some(text) = read_optional(&path)? else {
            continue;
        };
        let mut model = ConfigText::parse(&text);
        if model.set(&req.option, &value) {
            plan.record(path, description.clone(), model.render());
        } else if model.get(&req.option).is_none() {
            plan.warnings.push(format!(
                "{} not found in {} (may not exist in this kernel version)",
                key,
                file_name(&path)
            ));
        }
    }

    for path in layout.dev_configs()? {
        let Some(text) = read_optional(&path)? else {
            continue;
        };
        let mut model = ConfigText::parse(&text);
        if model.set(&req.option, &value) {
            plan.record(path, description.clone(), model.render());
        } else if model.get(&req.option).is_none() {
            tracing::debug!(path = %path.display(), option = %key, "dev copy lacks option");
        }
    }

    if let Some(section) = &req.policy_section {
        let path = layout.policy_path();
        if let Some(text) = read_optional(&path)? {
            let mut model = PolicyText::parse(&text);
            let existing = model.lookup(&req.option);
            if model.set(&req.option, &req.value, section) {
                let bare = req.option.bare().to_ascii_uppercase();
                let desc = match existing {
                    Some(e) => format!("update {}={} in [{}]", bare, req.value, e.section),
                    None => format!("add {}={} to [{}]", bare, req.value, section),
                };
                plan.record(path, desc, model.render());
            }
        }
    }

    if let Some(doc) = &req.doc {
        let path = layout.readme_path();
        if let Some(text) = read_optional(&path)? {
            let mut model = DocText::parse(&text);
            let existed = model.find_row(&req.option).is_some();
            let row = DocRow {
                option: req.option.clone(),
                kind: doc.kind.clone(),
                description: doc.description.clone(),
                heading: doc.heading.clone(),
            };
            if model.add_row(&row) {
                let desc = if existed {
                    format!("update {} row", req.option)
                } else {
                    format!("add to '{}' table", doc.heading)
                };
                plan.record(path, desc, model.render());
            } else if !existed {
                plan.warnings.push(format!(
                    "no table found under '## {}' in {}",
                    doc.heading,
                    file_name(&path)
                ));
            }
        }
    }

    Ok(plan)
}

/// Only policy and documentation bookkeeping; track configs are never touched.
pub fn plan_remove(layout: &Layout, req: &RemoveRequest) -> anyhow::Result<Plan> {
    let mut plan = Plan::default();

    if req.from_policy {
        let path = layout.policy_path();
        if let Some(text) = read_optional(&path)? {
            let mut model = PolicyText::parse(&text);
            if model.remove(&req.option) {
                let desc = format!("remove {} from policy", req.option);
                plan.record(path, desc, model.render());
            }
        }
    }

    if req.from_doc {
        let path = layout.readme_path();
        if let Some(text) = read_optional(&path)? {
            let mut model = DocText::parse(&text);
            if model.remove_rows(&req.option) {
                let desc = format!("remove {} from README", req.option);
                plan.record(path, desc, model.render());
            }
        }
    }

    Ok(plan)
}
