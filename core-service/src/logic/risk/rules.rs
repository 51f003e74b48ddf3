//! Risk Interpretation Rules
//!
//! Constants only; the interpret logic lives in `interpreter`.

// ============================================================================
// TIER THRESHOLDS (integer score, 0-100)
// ============================================================================

/// At or above this score = CRITICAL
pub const CRITICAL_MIN_SCORE: u8 = 75;

/// At or above this score (and below CRITICAL) = MODERATE
pub const MODERATE_MIN_SCORE: u8 = 50;

// ============================================================================
// EXPLANATION TRIGGERS (applied to the raw query record)
// ============================================================================

pub const SENIOR_MIN_AGE: i64 = 60;

/// Inclusive age window for the mandatory adolescent re-enrolment
pub const ADOLESCENT_AGE_RANGE: std::ops::RangeInclusive<i64> = 15..=18;

pub const FRICTION_MIN_FAILURES: i64 = 3;

// ============================================================================
// ADVICE TEXT
// ============================================================================

pub const CRITICAL_ACTION: &str = "Immediate Biometric Update Required.";

pub const MODERATE_ADVICE: &str =
    "Reason: Digital Dormancy / Hardware Risk. Action: Advisory Sent. Check Mobile Link.";

pub const SAFE_ADVICE: &str = "No Action Needed.";
