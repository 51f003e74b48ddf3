//! Risk Interpreter
//!
//! Input: classifier probability + raw query record
//! Output: RiskAssessment

use super::rules::{
    ADOLESCENT_AGE_RANGE, CRITICAL_ACTION, FRICTION_MIN_FAILURES, MODERATE_ADVICE, SAFE_ADVICE,
    SENIOR_MIN_AGE,
};
use super::types::{RiskAssessment, RiskReason, RiskTier};
use crate::logic::dataset::BiometricRecord;

/// Interpret a probability for one query record
pub fn interpret(probability: f64, record: &BiometricRecord) -> RiskAssessment {
    assess(probability, score_from_probability(probability), record)
}

/// Interpret a forest vote count; the score is computed in integers
pub fn interpret_votes(positive: usize, total: usize, record: &BiometricRecord) -> RiskAssessment {
    let probability = if total == 0 { 0.0 } else { positive as f64 / total as f64 };
    assess(probability, score_from_votes(positive, total), record)
}

fn assess(probability: f64, score: u8, record: &BiometricRecord) -> RiskAssessment {
    let tier = RiskTier::from_score(score);

    let (reason, advice) = match tier {
        RiskTier::Critical => {
            let reason = select_reason(record);
            (Some(reason), format!("Reason: {}. Action: {}", reason, CRITICAL_ACTION))
        }
        RiskTier::Moderate => (None, MODERATE_ADVICE.to_string()),
        RiskTier::Safe => (None, SAFE_ADVICE.to_string()),
    };

    RiskAssessment {
        probability,
        score,
        tier,
        reason,
        advice,
    }
}

/// floor(p * 100), clamped to 0..=100; NaN maps to 0
pub fn score_from_probability(probability: f64) -> u8 {
    if probability.is_nan() {
        return 0;
    }
    (probability * 100.0).floor().clamp(0.0, 100.0) as u8
}

/// `positive * 100 / total` in integer division, clamped to 100; no votes maps to 0
pub fn score_from_votes(positive: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    (positive.min(total) * 100 / total) as u8
}

/// First matching explanation for a CRITICAL query
pub fn select_reason(record: &BiometricRecord) -> RiskReason {
    if record.age >= SENIOR_MIN_AGE {
        RiskReason::AgingDecay
    } else if ADOLESCENT_AGE_RANGE.contains(&record.age) {
        RiskReason::MissedAdolescentUpdate
    } else if record.recent_failures >= FRICTION_MIN_FAILURES {
        RiskReason::FrictionWear
    } else {
        RiskReason::MultipleFactors
    }
}
