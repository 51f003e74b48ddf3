//! Device Encoder - categorical → integer codes
//!
//! Fitted once from the training corpus, read-only afterwards. The same
//! instance encodes the training matrix and every query, so codes can never
//! drift between fit and inference.

use std::collections::{BTreeMap, BTreeSet};

use crc32fast::Hasher;
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

use super::layout::FEATURE_COUNT;
use super::vector::FeatureVector;
use crate::logic::dataset::{BiometricRecord, LabeledRecord};
use crate::logic::model::TrainingMatrix;

/// Code used for device strings never seen during fit
pub const UNKNOWN_DEVICE_CODE: u32 = 0;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceEncoder {
    /// Sorted by device string; codes are 0..k-1 in that order
    codes: BTreeMap<String, u32>,
}

impl DeviceEncoder {
    /// Assign codes to the distinct device strings in sorted order
    pub fn fit<'a, I>(device_types: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let distinct: BTreeSet<&str> = device_types.into_iter().collect();
        let codes = distinct
            .into_iter()
            .enumerate()
            .map(|(code, device)| (device.to_string(), code as u32))
            .collect();

        Self { codes }
    }

    pub fn fit_corpus(corpus: &[LabeledRecord]) -> Self {
        Self::fit(corpus.iter().map(|l| l.record.device_type.as_str()))
    }

    /// Code for a device string, falling back to `UNKNOWN_DEVICE_CODE`
    pub fn code_for(&self, device_type: &str) -> u32 {
        match self.codes.get(device_type) {
            Some(&code) => code,
            None => {
                log::debug!(
                    "Unknown device type {:?}, using code {}",
                    device_type,
                    UNKNOWN_DEVICE_CODE
                );
                UNKNOWN_DEVICE_CODE
            }
        }
    }

    pub fn is_known(&self, device_type: &str) -> bool {
        self.codes.contains_key(device_type)
    }

    /// Fitted categories in code order
    pub fn categories(&self) -> Vec<&str> {
        self.codes.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// CRC32 over the ordered category list
    pub fn fingerprint(&self) -> u32 {
        let mut hasher = Hasher::new();
        for (device, code) in &self.codes {
            hasher.update(device.as_bytes());
            hasher.update(&code.to_le_bytes());
            hasher.update(&[0]);
        }
        hasher.finalize()
    }

    pub fn encode(&self, record: &BiometricRecord) -> FeatureVector {
        FeatureVector::from_values([
            record.age as f64,
            record.bio_years as f64,
            record.mobile_years as f64,
            record.scanner_quality as f64,
            f64::from(self.code_for(&record.device_type)),
            record.auth_count as f64,
            record.recent_failures as f64,
        ])
    }

    /// Encode a whole corpus into the training matrix
    pub fn encode_corpus(&self, corpus: &[LabeledRecord]) -> TrainingMatrix {
        let rows: Vec<FeatureVector> = corpus.iter().map(|l| self.encode(&l.record)).collect();

        let features = Array2::from_shape_fn((rows.len(), FEATURE_COUNT), |(i, j)| rows[i].values[j]);
        let targets = Array1::from_iter(corpus.iter().map(LabeledRecord::target));

        TrainingMatrix::new(features, targets)
    }
}
