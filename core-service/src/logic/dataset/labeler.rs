//! Ground-Truth Labeler
//!
//! Turns a raw record into `(risk_score, at_risk)` with an ordered cascade.
//! The first rule whose predicate matches sets the base score; later rules
//! are never consulted, even when they would also match.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::record::{BiometricRecord, LabeledRecord};
use crate::logic::risk::RiskTier;

// ============================================================================
// CONSTANTS
// ============================================================================

/// Labels at or above this score are positive
pub const AT_RISK_THRESHOLD: u8 = 50;

/// Noise is drawn uniformly from `NOISE_MIN..NOISE_MAX` (upper bound exclusive)
pub const NOISE_MIN: i64 = -5;
pub const NOISE_MAX: i64 = 5;

pub const MIN_RISK_SCORE: i64 = 0;
pub const MAX_RISK_SCORE: i64 = 100;

// ============================================================================
// CAUSES
// ============================================================================

/// Why the cascade assigned a base score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskCause {
    /// Elderly holder with stale biometrics
    SeniorDecay,
    /// Adolescent who missed the mandatory update
    ChildGrowth,
    /// Repeated recent failures
    FrictionWear,
    /// Mobile link not refreshed for years
    DigitalDormancy,
    /// Poor scanner hardware
    HardwareQuality,
}

impl RiskCause {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskCause::SeniorDecay => "Senior Decay",
            RiskCause::ChildGrowth => "Child Growth",
            RiskCause::FrictionWear => "Friction Wear",
            RiskCause::DigitalDormancy => "Digital Dormancy",
            RiskCause::HardwareQuality => "Hardware Quality",
        }
    }
}

impl std::fmt::Display for RiskCause {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// CASCADE
// ============================================================================

/// One entry of the priority list
#[derive(Debug, Clone, Copy)]
pub struct CascadeRule {
    pub priority: u8,
    pub cause: RiskCause,
    pub base_score: i64,
    pub applies: fn(&BiometricRecord) -> bool,
}

fn senior_decay(r: &BiometricRecord) -> bool {
    r.age >= 60 && r.bio_years >= 7
}

fn child_growth(r: &BiometricRecord) -> bool {
    (15..=18).contains(&r.age) && r.bio_years >= 2
}

fn friction_wear(r: &BiometricRecord) -> bool {
    r.recent_failures >= 3
}

fn digital_dormancy(r: &BiometricRecord) -> bool {
    r.mobile_years >= 5
}

fn hardware_quality(r: &BiometricRecord) -> bool {
    r.scanner_quality < 60
}

/// Ordered highest priority first.
pub const CASCADE: &[CascadeRule] = &[
    CascadeRule { priority: 1, cause: RiskCause::SeniorDecay, base_score: 85, applies: senior_decay },
    CascadeRule { priority: 2, cause: RiskCause::ChildGrowth, base_score: 90, applies: child_growth },
    CascadeRule { priority: 3, cause: RiskCause::FrictionWear, base_score: 80, applies: friction_wear },
    CascadeRule { priority: 4, cause: RiskCause::DigitalDormancy, base_score: 60, applies: digital_dormancy },
    CascadeRule { priority: 5, cause: RiskCause::HardwareQuality, base_score: 40, applies: hardware_quality },
];

/// First rule that matches, if any
pub fn matching_rule(record: &BiometricRecord) -> Option<&'static CascadeRule> {
    CASCADE.iter().find(|rule| (rule.applies)(record))
}

/// Base score before noise (0 when nothing matches)
pub fn base_score(record: &BiometricRecord) -> i64 {
    matching_rule(record).map_or(0, |rule| rule.base_score)
}

/// Deterministic labeling with an explicit noise value.
///
/// The noise is added as given; callers drawing it themselves should stay in
/// `NOISE_MIN..NOISE_MAX`.
pub fn label_with_noise(record: BiometricRecord, noise: i64) -> LabeledRecord {
    let rule = matching_rule(&record);
    let base = rule.map_or(0, |r| r.base_score);

    let risk_score = base
        .saturating_add(noise)
        .clamp(MIN_RISK_SCORE, MAX_RISK_SCORE) as u8;

    LabeledRecord {
        record,
        risk_score,
        at_risk: risk_score >= AT_RISK_THRESHOLD,
        cause: rule.map(|r| r.cause),
    }
}

/// Label with noise drawn from `rng`
pub fn label<R: Rng + ?Sized>(record: BiometricRecord, rng: &mut R) -> LabeledRecord {
    let noise = rng.gen_range(NOISE_MIN..NOISE_MAX);
    label_with_noise(record, noise)
}

/// Advisory text stored next to each generated record
pub fn advisory_label(risk_score: u8) -> &'static str {
    match RiskTier::from_score(risk_score) {
        RiskTier::Critical => "CRITICAL: Immediate Biometric Update Required",
        RiskTier::Moderate => "MODERATE: Advisory Sent. Check Mobile Link.",
        RiskTier::Safe => "SAFE: No Action Needed",
    }
}

// ============================================================================
// TESTS
// ============================================================================
