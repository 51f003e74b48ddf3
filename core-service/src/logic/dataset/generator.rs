//! Synthetic Record Generator
//!
//! Independent draws from fixed distributions on a seeded ChaCha stream.
//! Same seed, same corpus.

use rand::distributions::{Distribution, WeightedIndex};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::labeler;
use super::record::{BiometricRecord, LabeledRecord};

/// Device vocabulary and draw weights
pub const DEVICE_MIX: [(&str, f64); 3] = [
    ("Fingerprint", 0.7),
    ("Iris", 0.2),
    ("OTP", 0.1),
];

// Half-open generation ranges
pub const AGE_RANGE: std::ops::Range<i64> = 5..95;
pub const BIO_YEARS_RANGE: std::ops::Range<i64> = 0..12;
pub const MOBILE_YEARS_RANGE: std::ops::Range<i64> = 0..10;
pub const SCANNER_QUALITY_RANGE: std::ops::Range<i64> = 30..100;
pub const AUTH_COUNT_RANGE: std::ops::Range<i64> = 10..1000;
pub const RECENT_FAILURES_RANGE: std::ops::Range<i64> = 0..5;

pub struct SyntheticGenerator {
    rng: ChaCha8Rng,
    devices: WeightedIndex<f64>,
}

impl SyntheticGenerator {
    pub fn new(seed: u64) -> Self {
        let devices = WeightedIndex::new(DEVICE_MIX.iter().map(|(_, w)| *w))
            .expect("DEVICE_MIX weights are positive constants");

        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            devices,
        }
    }

    /// Draw the next raw record
    pub fn next_record(&mut self) -> BiometricRecord {
        let age = self.rng.gen_range(AGE_RANGE);
        let bio_years = self.rng.gen_range(BIO_YEARS_RANGE);
        let mobile_years = self.rng.gen_range(MOBILE_YEARS_RANGE);
        let scanner_quality = self.rng.gen_range(SCANNER_QUALITY_RANGE);
        let device_type = DEVICE_MIX[self.devices.sample(&mut self.rng)].0;
        let auth_count = self.rng.gen_range(AUTH_COUNT_RANGE);
        let recent_failures = self.rng.gen_range(RECENT_FAILURES_RANGE);

        BiometricRecord::new(
            age,
            bio_years,
            mobile_years,
            scanner_quality,
            device_type,
            auth_count,
            recent_failures,
        )
    }

    /// Draw the next record and label it from the same stream
    pub fn next_labeled(&mut self) -> LabeledRecord {
        let record = self.next_record();
        labeler::label(record, &mut self.rng)
    }

    /// Exactly `n` raw records
    pub fn generate(&mut self, n: usize) -> Vec<BiometricRecord> {
        (0..n).map(|_| self.next_record()).collect()
    }
}

/// Build a labeled training corpus of `n` records.
pub fn build_corpus(n: usize, seed: u64) -> Vec<LabeledRecord> {
    log::info!("Generating {} synthetic records (seed {})", n, seed);

    let mut generator = SyntheticGenerator::new(seed);
    let corpus: Vec<LabeledRecord> = (0..n).map(|_| generator.next_labeled()).collect();

    let positives = corpus.iter().filter(|r| r.at_risk).count();
    log::debug!("Corpus ready: {} records, {} at risk", corpus.len(), positives);

    corpus
}
