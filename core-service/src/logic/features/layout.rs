//! Column order of the encoded record
//!
//! The forest addresses features by position, so training rows and query
//! vectors both come from this one list. Bump `FEATURE_VERSION` whenever a
//! column is added, removed or moved; the version and hash are reported in
//! the engine status so a caller can tell which layout a model was fitted on.

use crc32fast::Hasher;
use serde::{Deserialize, Serialize};

pub const FEATURE_VERSION: u8 = 1;

pub const FEATURE_LAYOUT: &[&str] = &[
    "age",
    "bio_years",
    "mobile_years",
    "scanner_quality",
    "device_type_code",
    "auth_count",
    "recent_failures",
];

pub const FEATURE_COUNT: usize = 7;

/// Slot holding the encoded device modality
pub const DEVICE_FEATURE_INDEX: usize = 4;

/// CRC32 over the version byte and the NUL-separated column names
pub fn layout_hash() -> u32 {
    let mut hasher = Hasher::new();
    hasher.update(&[FEATURE_VERSION]);
    for name in FEATURE_LAYOUT {
        hasher.update(name.as_bytes());
        hasher.update(&[0]);
    }
    hasher.finalize()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutInfo {
    pub version: u8,
    pub hash: u32,
    pub feature_count: usize,
    pub feature_names: Vec<String>,
}

impl LayoutInfo {
    pub fn current() -> Self {
        Self {
            version: FEATURE_VERSION,
            hash: layout_hash(),
            feature_count: FEATURE_COUNT,
            feature_names: FEATURE_LAYOUT.iter().map(|s| s.to_string()).collect(),
        }
    }
}

pub fn feature_index(name: &str) -> Option<usize> {
    FEATURE_LAYOUT.iter().position(|&n| n == name)
}

pub fn feature_name(index: usize) -> Option<&'static str> {
    FEATURE_LAYOUT.get(index).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_count() {
        assert_eq!(FEATURE_LAYOUT.len(), FEATURE_COUNT);
        assert_eq!(FEATURE_LAYOUT[DEVICE_FEATURE_INDEX], "device_type_code");
    }

    #[test]
    fn test_layout_info_describes_current_layout() {
        let info = LayoutInfo::current();
        assert_eq!(info.version, FEATURE_VERSION);
        assert_eq!(info.hash, layout_hash());
        assert_ne!(info.hash, 0);
        assert_eq!(info.feature_count, FEATURE_COUNT);
        assert_eq!(info.feature_names, FEATURE_LAYOUT);
    }

    #[test]
    fn test_feature_index() {
        assert_eq!(feature_index("age"), Some(0));
        assert_eq!(feature_index("device_type_code"), Some(DEVICE_FEATURE_INDEX));
        assert_eq!(feature_index("recent_failures"), Some(6));
        assert_eq!(feature_index("cpu_percent"), None);
        assert_eq!(feature_name(6), Some("recent_failures"));
        assert_eq!(feature_name(7), None);
    }
}
