//! Engine Commands - API for callers
//!
//! Thin wrappers over the process-wide engine. Every command fails with
//! `EngineError::NotInitialized` until `logic::engine::init` has succeeded.

use serde::{Deserialize, Serialize};

use super::engine_status::EngineStatus;
use crate::logic::dataset::BiometricRecord;
use crate::logic::engine::{self, EngineError};
use crate::logic::risk::RiskAssessment;

// ============================================================================
// DATA STRUCTURES
// ============================================================================

/// Caller-facing result of one scoring request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreOutput {
    /// "CRITICAL" | "MODERATE" | "SAFE"
    pub status: String,
    /// "<0-100>/100"
    pub score_display: String,
    pub advice: String,
}

impl From<&RiskAssessment> for ScoreOutput {
    fn from(assessment: &RiskAssessment) -> Self {
        Self {
            status: assessment.tier.as_str().to_string(),
            score_display: assessment.score_display(),
            advice: assessment.advice.clone(),
        }
    }
}

// ============================================================================
// COMMANDS
// ============================================================================

/// Score one identity record
pub fn score_record(
    age: i64,
    bio_years: i64,
    mobile_years: i64,
    scanner_quality: i64,
    device_type: &str,
    auth_count: i64,
    recent_failures: i64,
) -> Result<ScoreOutput, EngineError> {
    let record = BiometricRecord::new(
        age,
        bio_years,
        mobile_years,
        scanner_quality,
        device_type,
        auth_count,
        recent_failures,
    );
    score_biometric_record(&record)
}

pub fn score_biometric_record(record: &BiometricRecord) -> Result<ScoreOutput, EngineError> {
    let engine = engine::get()?;
    Ok(ScoreOutput::from(&engine.score(record)))
}

/// Status snapshot of the process-wide engine
pub fn get_engine_status() -> Result<EngineStatus, EngineError> {
    Ok(engine::get()?.status())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::config::EngineConfig;

    /// The only test touching the process-wide engine: lifecycle end to end
    #[test]
    fn test_engine_lifecycle() {
        assert!(matches!(
            score_record(65, 8, 2, 90, "Fingerprint", 150, 0),
            Err(EngineError::NotInitialized)
        ));
        assert!(matches!(get_engine_status(), Err(EngineError::NotInitialized)));

        let broken = EngineConfig::default()
            .with_corpus_file("/nonexistent/afews.csv")
            .with_trees(5);
        let err = engine::init(&broken).unwrap_err();
        assert!(err.is_initialization_failure());
        assert!(!engine::is_initialized());

        let config = EngineConfig::default().with_synthetic(1000).with_trees(50);
        let fitted = engine::init(&config).unwrap();
        assert!(engine::is_initialized());

        let output = score_record(65, 8, 2, 90, "Fingerprint", 150, 0).unwrap();
        assert_eq!(output.status, "CRITICAL");
        assert!(output.score_display.ends_with("/100"));
        assert_eq!(
            output.advice,
            "Reason: Aging Skin + Old Data. Action: Immediate Biometric Update Required."
        );

        // Second init does not refit
        let again = EngineConfig::default().with_synthetic(200).with_trees(3);
        assert!(matches!(engine::init(&again), Err(EngineError::AlreadyInitialized)));
        let current = engine::get().unwrap();
        assert!(std::ptr::eq(fitted, current));
        assert_eq!(current.metadata().n_trees, 50);

        let status = get_engine_status().unwrap();
        assert_eq!(status.model.trained_on_records, 1000);
    }

    #[test]
    fn test_output_from_assessment() {
        let record = BiometricRecord::new(16, 3, 1, 80, "Iris", 100, 0);
        let assessment = crate::logic::risk::interpret(0.75, &record);
        let output = ScoreOutput::from(&assessment);
        assert_eq!(output.status, "CRITICAL");
        assert_eq!(output.score_display, "75/100");
        assert_eq!(
            output.advice,
            "Reason: Missed Age-15 Update. Action: Immediate Biometric Update Required."
        );
    }
}
