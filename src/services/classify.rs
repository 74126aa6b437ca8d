use crate::domain::models::CONFIG_PREFIX;

/// Category reported for board/vendor-contributed options.
pub const VENDOR_CATEGORY: &str = "Sky1";

pub const OTHER_CATEGORY: &str = "Other";

/// Ordered prefix table; the first matching prefix decides the category.
const SUBSYSTEM_PREFIXES: &[(&str, &str)] = &[
    ("DRM_", "Display/GPU"),
    ("SND_", "Audio"),
    ("NET_", "Network"),
    ("NFT_", "Network/Netfilter"),
    ("NF_", "Network/Netfilter"),
    ("CRYPTO_", "Crypto"),
    ("SECURITY_", "Security"),
    ("USB_", "USB"),
    ("PHY_", "PHY"),
    ("PCI_", "PCI"),
    ("ARM64_", "ARM64"),
    ("ARCH_", "Architecture"),
    ("CIX_", VENDOR_CATEGORY),
    ("SKY1_", VENDOR_CATEGORY),
    ("LINLON", VENDOR_CATEGORY),
    ("TRILIN", VENDOR_CATEGORY),
    ("PANTHOR", VENDOR_CATEGORY),
    ("ARMCHINA", VENDOR_CATEGORY),
    ("CDNSP_SKY1", VENDOR_CATEGORY),
];

/// Substrings that mark an option as vendor-specific anywhere in its name.
const VENDOR_MARKERS: &[&str] = &[
    "CIX",
    "SKY1",
    "LINLON",
    "TRILIN",
    "PANTHOR",
    "ARMCHINA",
    "CDNSP_SKY1",
];

/// Report order for new-option buckets; everything else follows alphabetically.
pub const DISPLAY_PRIORITY: &[&str] = &[
    VENDOR_CATEGORY,
    "Display/GPU",
    "Audio",
    "USB",
    "PCI",
    "PHY",
    "Network",
];

fn bare(option: &str) -> &str {
    option.strip_prefix(CONFIG_PREFIX).unwrap_or(option)
}

pub fn classify(option: &str) -> &'static str {
    let name = bare(option);
    SUBSYSTEM_PREFIXES
        .iter()
        .find(|(prefix, _)| name.starts_with(prefix))
        .map(|(_, category)| *category)
        .unwrap_or(OTHER_CATEGORY)
}

/// Substring test, deliberately broader than [`classify`]: `DRM_PANTHOR`
/// classifies as Display/GPU yet is vendor-specific.
pub fn is_vendor_specific(option: &str) -> bool {
    let name = bare(option);
    VENDOR_MARKERS.iter().any(|m| name.contains(m))
}

/// Bucket used by config review: the vendor test runs before prefix rules.
pub fn review_category(option: &str) -> &'static str {
    if is_vendor_specific(option) {
        VENDOR_CATEGORY
    } else {
        classify(option)
    }
}
