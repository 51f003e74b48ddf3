use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::layout::{feature_index, layout_hash, FEATURE_COUNT, FEATURE_LAYOUT, FEATURE_VERSION};

/// One encoded record, values in `FEATURE_LAYOUT` order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    pub values: [f64; FEATURE_COUNT],
}

impl FeatureVector {
    pub fn from_values(values: [f64; FEATURE_COUNT]) -> Self {
        Self { values }
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    pub fn get(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied()
    }

    pub fn get_by_name(&self, name: &str) -> Option<f64> {
        feature_index(name).and_then(|i| self.get(i))
    }

    /// Named values plus the layout they were encoded with, for trace logs
    pub fn to_log_entry(&self) -> serde_json::Value {
        let named: BTreeMap<&str, f64> = FEATURE_LAYOUT.iter().copied().zip(self.values).collect();
        serde_json::json!({
            "feature_version": FEATURE_VERSION,
            "layout_hash": layout_hash(),
            "named_values": named,
        })
    }
}

impl From<[f64; FEATURE_COUNT]> for FeatureVector {
    fn from(values: [f64; FEATURE_COUNT]) -> Self {
        Self::from_values(values)
    }
}
