//! Before/after review of two configs (e.g. around `olddefconfig`).

use crate::domain::models::{CategoryBucket, ChangedOption, OptionValue, ReviewReport};
use crate::error::TrackError;
use crate::services::classify::{is_vendor_specific, review_category, DISPLAY_PRIORITY};
use crate::services::output::file_name;
use crate::text::ConfigText;
use regex::RegexSet;
use std::collections::BTreeMap;
use std::path::Path;

/// Toolchain/version options that churn on every rebuild.
const IGNORE_PATTERNS: &[&str] = &[
    r"^CONFIG_CC_VERSION_TEXT=",
    r"^CONFIG_GCC_VERSION=",
    r"^CONFIG_LD_VERSION=",
    r"^CONFIG_CLANG_VERSION=",
    r"^CONFIG_AS_VERSION=",
    r"^CONFIG_PAHOLE_VERSION=",
    r"^CONFIG_RUSTC_VERSION=",
    r"^CONFIG_BINDGEN_VERSION=",
    r"^CONFIG_KERNEL_VERSION_GENERATION=",
];

/// Buckets larger than this are truncated to [`TRUNCATED_SHOWN`] entries.
const BUCKET_LIMIT: usize = 10;
const TRUNCATED_SHOWN: usize = 5;

fn is_ignored(ignore: &RegexSet, key: &str, value: &OptionValue) -> bool {
    ignore.is_match(&format!("{}={}", key, value.as_str()))
}

fn bucket(category: &str, entries: Vec<(String, String)>) -> CategoryBucket {
    let total = entries.len();
    let shown = if total > BUCKET_LIMIT {
        entries.into_iter().take(TRUNCATED_SHOWN).collect()
    } else {
        entries
    };
    CategoryBucket {
        category: category.to_string(),
        shown,
        total,
    }
}

fn enabled(opts: &BTreeMap<String, OptionValue>) -> usize {
    opts.values().filter(|v| v.is_enabled()).count()
}

pub fn compare(
    old: &BTreeMap<String, OptionValue>,
    new: &BTreeMap<String, OptionValue>,
) -> anyhow::Result<ReviewReport> {
    let ignore = RegexSet::new(IGNORE_PATTERNS)?;
    let mut report = ReviewReport {
        old_enabled: enabled(old),
        new_enabled: enabled(new),
        ..ReviewReport::default()
    };

    let mut by_category: BTreeMap<&'static str, Vec<(String, String)>> = BTreeMap::new();
    for (key, value) in new {
        if old.contains_key(key) || is_ignored(&ignore, key, value) {
            continue;
        }
        report.added_total += 1;
        by_category
            .entry(review_category(key))
            .or_default()
            .push((key.clone(), value.as_str().to_string()));
    }
    for cat in DISPLAY_PRIORITY {
        if let Some(entries) = by_category.remove(cat) {
            report.added.push(bucket(cat, entries));
        }
    }
    for (cat, entries) in by_category {
        report.added.push(bucket(cat, entries));
    }

    for (key, value) in old {
        if new.contains_key(key) || is_ignored(&ignore, key, value) {
            continue;
        }
        if value.is_enabled() {
            report
                .removed_enabled
                .push((key.clone(), value.as_str().to_string()));
        } else {
            report.removed_disabled.push(key.clone());
        }
    }

    for (key, old_value) in old {
        let Some(new_value) = new.get(key) else {
            continue;
        };
        if old_value.as_str() == new_value.as_str() || is_ignored(&ignore, key, old_value) {
            continue;
        }
        report.changed.push(ChangedOption {
            option: key.clone(),
            old: old_value.as_str().to_string(),
            new: new_value.as_str().to_string(),
            vendor: is_vendor_specific(key),
        });
    }

    Ok(report)
}

/// Both inputs must exist; reviewing them is the command's whole job.
pub fn review_files(old_path: &Path, new_path: &Path) -> anyhow::Result<ReviewReport> {
    for p in [old_path, new_path] {
        if !p.exists() {
            return Err(TrackError::ReviewInputMissing(p.to_path_buf()).into());
        }
    }
    let old = ConfigText::parse(&std::fs::read_to_string(old_path)?).options();
    let new = ConfigText::parse(&std::fs::read_to_string(new_path)?).options();
    let mut report = compare(&old, &new)?;
    report.old_name = file_name(old_path);
    report.new_name = file_name(new_path);
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::compare;
    use crate::services::classify::VENDOR_CATEGORY;
    use crate::text::ConfigText;

    fn opts(text: &str) -> std::collections::BTreeMap<String, crate::domain::models::OptionValue> {
        ConfigText::parse(text).options()
    }

    #[test]
    fn vendor_display_option_lands_in_vendor_bucket_first() {
        let old = opts("CONFIG_A=y\n");
        let new = opts("CONFIG_A=y\nCONFIG_DRM_PANTHOR=y\nCONFIG_DRM_NOUVEAU=m\nCONFIG_EXT4_FS=y\n");
        let r = compare(&old, &new).expect("compare");
        let cats: Vec<_> = r.added.iter().map(|b| b.category.as_str()).collect();
        assert_eq!(cats, vec![VENDOR_CATEGORY, "Display/GPU", "Other"]);
        assert_eq!(r.added[0].shown, vec![("CONFIG_DRM_PANTHOR".to_string(), "y".to_string())]);
        assert_eq!(r.added_total, 3);
    }

    #[test]
    fn remaining_categories_sorted_alphabetically_after_priority() {
        let new = opts("CONFIG_SECURITY_X=y\nCONFIG_CRYPTO_X=y\nCONFIG_USB_X=y\nCONFIG_ARM64_X=y\n");
        let r = compare(&opts(""), &new).expect("compare");
        let cats: Vec<_> = r.added.iter().map(|b| b.category.as_str()).collect();
        assert_eq!(cats, vec!["USB", "ARM64", "Crypto", "Security"]);
    }

    #[test]
    fn large_buckets_are_truncated() {
        let text: String = (0..12).map(|i| format!("CONFIG_EXT_{:02}=y\n", i)).collect();
        let r = compare(&opts(""), &opts(&text)).expect("compare");
        assert_eq!(r.added[0].total, 12);
        assert_eq!(r.added[0].shown.len(), 5);
        assert_eq!(r.added[0].hidden(), 7);

        let ten: String = (0..10).map(|i| format!("CONFIG_EXT_{:02}=y\n", i)).collect();
        let r = compare(&opts(""), &opts(&ten)).expect("compare");
        assert_eq!(r.added[0].shown.len(), 10);
    }

    #[test]
    fn removed_split_by_previous_state() {
        let old = opts("CONFIG_A=y\nCONFIG_B=m\n# CONFIG_C is not set\nCONFIG_D=\"x\"\nCONFIG_KEEP=y\n");
        let new = opts("CONFIG_KEEP=y\n");
        let r = compare(&old, &new).expect("compare");
        let enabled: Vec<_> = r.removed_enabled.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(enabled, vec!["CONFIG_A", "CONFIG_B", "CONFIG_D"]);
        assert_eq!(r.removed_disabled, vec!["CONFIG_C".to_string()]);
        assert_eq!(r.removed_total(), 4);
    }

    #[test]
    fn changed_values_flag_vendor_options_and_skip_toolchain() {
        let old = opts("CONFIG_CC_VERSION_TEXT=\"gcc 13\"\nCONFIG_CIX_DSP=m\nCONFIG_USB_UAS=m\n# CONFIG_FOO is not set\n");
        let new = opts("CONFIG_CC_VERSION_TEXT=\"gcc 14\"\nCONFIG_CIX_DSP=y\nCONFIG_USB_UAS=y\n# CONFIG_FOO is not set\n");
        let r = compare(&old, &new).expect("compare");
        assert_eq!(r.changed.len(), 2);
        assert_eq!(r.changed[0].option, "CONFIG_CIX_DSP");
        assert!(r.changed[0].vendor);
        assert_eq!(r.changed[1].option, "CONFIG_USB_UAS");
        assert!(!r.changed[1].vendor);
        assert!(r.has_changes());
    }

    #[test]
    fn toolchain_options_ignored_when_added() {
        let r = compare(&opts(""), &opts("CONFIG_RUSTC_VERSION=108000\n")).expect("compare");
        assert_eq!(r.added_total, 0);
        assert!(!r.has_changes());
    }
}
