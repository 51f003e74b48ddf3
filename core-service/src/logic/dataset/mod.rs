//! Dataset Module - Training Corpus
//!
//! Synthesizes identity records, labels them with the ground-truth cascade,
//! and moves corpora to and from CSV.

pub mod csv_io;
pub mod generator;
pub mod labeler;
pub mod record;

#[cfg(test)]
mod tests;

use std::path::PathBuf;

use sha2::{Digest, Sha256};
use thiserror::Error;

pub use generator::{build_corpus, SyntheticGenerator};
pub use labeler::{label, label_with_noise, RiskCause, AT_RISK_THRESHOLD};
pub use record::{BiometricRecord, LabeledRecord};

/// Failures while reading or writing a corpus
#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("corpus file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("corpus I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed corpus: {0}")]
    Malformed(#[from] csv::Error),

    #[error("row {row}: target must be 0 or 1, got {value}")]
    InvalidTarget { row: usize, value: i64 },

    #[error("row {row}: risk score {risk_score} disagrees with target {target}")]
    InconsistentLabel { row: usize, risk_score: i64, target: i64 },

    #[error("corpus contains no records")]
    Empty,
}

/// SHA-256 over the training-relevant fields, hex encoded.
///
/// Identifies which corpus a model was fitted on.
pub fn corpus_digest(corpus: &[LabeledRecord]) -> String {
    let mut hasher = Sha256::new();

    for l in corpus {
        let r = &l.record;
        for value in [r.age, r.bio_years, r.mobile_years, r.scanner_quality] {
            hasher.update(value.to_le_bytes());
        }
        hasher.update(r.device_type.as_bytes());
        hasher.update([0u8]);
        for value in [r.auth_count, r.recent_failures] {
            hasher.update(value.to_le_bytes());
        }
        hasher.update([l.target()]);
    }

    hex::encode(hasher.finalize())
}
