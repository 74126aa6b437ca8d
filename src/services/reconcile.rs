//! Track-vs-policy and track-vs-track comparison.
//!
//! One pass per invocation: load tracks and policy, flag MISSING/MISMATCH
//! violations, tabulate vendor-specific options across tracks, and in fix
//! mode rewrite mismatched lines that already exist. Missing lines are never
//! created; which line to add is a human decision.

use crate::domain::models::{
    FixRecord, OptionName, OptionValue, PolicyEntry, ReconcileReport, TrackLoad, VendorRow,
    Violation, ViolationKind,
};
use crate::error::TrackError;
use crate::services::classify::is_vendor_specific;
use crate::services::layout::Layout;
use crate::services::output::file_name;
use crate::services::storage::{read_optional, PlanWriter};
use crate::text::{ConfigText, PolicyText};
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

/// Shown in the vendor table for a track that lacks the option entirely.
pub const ABSENT_PLACEHOLDER: &str = "-";

#[derive(Debug, Clone, Copy, Default)]
pub struct ReconcileOptions {
    pub fix: bool,
    pub verbose: bool,
}

#[derive(Debug, Clone)]
pub struct LoadedTrack {
    pub label: String,
    pub path: PathBuf,
    pub config: ConfigText,
    pub options: BTreeMap<String, OptionValue>,
}

impl LoadedTrack {
    pub fn from_text(label: &str, path: PathBuf, text: &str) -> Self {
        let config = ConfigText::parse(text);
        let options = config.options();
        Self {
            label: label.to_string(),
            path,
            config,
            options,
        }
    }

    pub fn file(&self) -> String {
        file_name(&self.path)
    }
}

/// Loads every declared track that exists, in declaration order.
pub fn load_tracks(layout: &Layout) -> anyhow::Result<(Vec<TrackLoad>, Vec<LoadedTrack>)> {
    let mut summary = Vec::new();
    let mut loaded = Vec::new();
    for spec in &layout.tracks {
        let path = layout.track_path(spec);
        let text = read_optional(&path)?;
        let track = text.map(|t| LoadedTrack::from_text(&spec.label, path.clone(), &t));
        summary.push(TrackLoad {
            label: spec.label.clone(),
            file: file_name(&path),
            enabled: track.as_ref().map(|t| t.config.enabled_count()),
        });
        loaded.extend(track);
    }
    Ok((summary, loaded))
}

/// `None` when the policy file does not exist.
pub fn load_policy(layout: &Layout) -> anyhow::Result<Option<BTreeMap<String, PolicyEntry>>> {
    Ok(read_optional(&layout.policy_path())?.map(|t| PolicyText::parse(&t).requirements()))
}

/// Ordered by option name, then by track declaration order.
pub fn check_policy(
    policy: &BTreeMap<String, PolicyEntry>,
    tracks: &[LoadedTrack],
) -> Vec<Violation> {
    let mut out = Vec::new();
    for (key, entry) in policy {
        for track in tracks {
            let kind = match track.options.get(key) {
                None => ViolationKind::Missing,
                Some(actual) if actual.as_str() != entry.value => ViolationKind::Mismatch {
                    actual: actual.as_str().to_string(),
                },
                Some(_) => continue,
            };
            out.push(Violation {
                option: key.clone(),
                track: track.label.clone(),
                file: track.file(),
                required: entry.value.clone(),
                kind,
            });
        }
    }
    out
}

/// Rows for vendor-specific options (divergent only, unless `verbose`)
/// plus the number of distinct vendor-specific options seen.
pub fn vendor_table(tracks: &[LoadedTrack], verbose: bool) -> (Vec<VendorRow>, usize) {
    let vendor: BTreeSet<&String> = tracks
        .iter()
        .flat_map(|t| t.options.keys())
        .filter(|k| is_vendor_specific(k))
        .collect();

    let mut rows = Vec::new();
    for key in &vendor {
        let values: Vec<(String, String)> = tracks
            .iter()
            .map(|t| {
                let v = t
                    .options
                    .get(*key)
                    .map(|v| v.as_str().to_string())
                    .unwrap_or_else(|| ABSENT_PLACEHOLDER.to_string());
                (t.label.clone(), v)
            })
            .collect();
        let distinct: BTreeSet<&str> = values.iter().map(|(_, v)| v.as_str()).collect();
        let divergent = distinct.len() > 1;
        if divergent || verbose {
            rows.push(VendorRow {
                option: (*key).clone(),
                values,
                divergent,
            });
        }
    }
    (rows, vendor.len())
}

/// Rewrites the existing line of every MISMATCH violation to the required
/// value and writes each touched track once.
///
/// A track's fixes land in `fixed` only after its write succeeded, so on a
/// write error `fixed` lists exactly the tracks already rewritten.
pub fn fix_mismatches<W: PlanWriter>(
    tracks: &mut [LoadedTrack],
    violations: &[Violation],
    writer: &mut W,
    fixed: &mut Vec<FixRecord>,
) -> Result<(), TrackError> {
    for track in tracks.iter_mut() {
        let mut pending = Vec::new();
        for v in violations.iter().filter(|v| v.track == track.label) {
            let ViolationKind::Mismatch { actual } = &v.kind else {
                continue;
            };
            let name = OptionName::parse(&v.option);
            let wanted = OptionValue::from_literal(&v.required);
            if track.config.set(&name, &wanted) {
                pending.push(FixRecord {
                    file: track.file(),
                    old: format!("{}={}", v.option, actual),
                    new: format!("{}={}", v.option, v.required),
                });
            }
        }
        if pending.is_empty() {
            continue;
        }
        tracing::debug!(path = %track.path.display(), "writing fixed track");
        writer.write(&track.path, &track.config.render())?;
        track.options = track.config.options();
        fixed.append(&mut pending);
    }
    Ok(())
}

pub fn reconcile<W: PlanWriter>(
    layout: &Layout,
    opts: ReconcileOptions,
    writer: &mut W,
) -> anyhow::Result<ReconcileReport> {
    let (summary, mut tracks) = load_tracks(layout)?;
    let mut report = ReconcileReport {
        tracks: summary,
        ..ReconcileReport::default()
    };
    if tracks.len() < 2 {
        return Ok(report);
    }
    report.compared = true;

    let policy = load_policy(layout)?;
    report.policy_found = policy.is_some();
    let policy = policy.unwrap_or_default();
    report.policy_size = policy.len();

    report.violations = check_policy(&policy, &tracks);
    if opts.fix && !report.violations.is_empty() {
        if let Err(e) = fix_mismatches(&mut tracks, &report.violations, writer, &mut report.fixed) {
            tracing::warn!(error = %e, fixed = report.fixed.len(), "fix stopped early");
            report.fix_error = Some(e);
        }
    }

    let (rows, total) = vendor_table(&tracks, opts.verbose);
    report.vendor_rows = rows;
    report.vendor_total = total;
    Ok(report)
}
