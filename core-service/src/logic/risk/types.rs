//! Risk Types
//!
//! Data structures only.

use serde::{Deserialize, Serialize};

use super::rules::{CRITICAL_MIN_SCORE, MODERATE_MIN_SCORE};

// ============================================================================
// RISK TIER
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskTier {
    /// Authentication likely fine
    Safe,
    /// Advisory only
    Moderate,
    /// Needs a biometric update now
    Critical,
}

impl RiskTier {
    pub fn from_score(score: u8) -> Self {
        if score >= CRITICAL_MIN_SCORE {
            RiskTier::Critical
        } else if score >= MODERATE_MIN_SCORE {
            RiskTier::Moderate
        } else {
            RiskTier::Safe
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskTier::Critical => "CRITICAL",
            RiskTier::Moderate => "MODERATE",
            RiskTier::Safe => "SAFE",
        }
    }
}

impl std::fmt::Display for RiskTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// RISK REASON (CRITICAL only)
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskReason {
    /// Senior citizen with ageing skin and stale biometrics
    AgingDecay,
    /// Child in the window for the age-15 re-enrolment
    MissedAdolescentUpdate,
    /// Repeated recent failures wearing the capture
    FrictionWear,
    MultipleFactors,
}

impl RiskReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskReason::AgingDecay => "Aging Skin + Old Data",
            RiskReason::MissedAdolescentUpdate => "Missed Age-15 Update",
            RiskReason::FrictionWear => "High Friction Wear",
            RiskReason::MultipleFactors => "Multiple Factors",
        }
    }
}

impl std::fmt::Display for RiskReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// ASSESSMENT
// ============================================================================

/// Result of interpreting one query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    /// Raw classifier output (0.0 - 1.0)
    pub probability: f64,
    /// floor(probability * 100)
    pub score: u8,
    pub tier: RiskTier,
    /// Set only for CRITICAL
    pub reason: Option<RiskReason>,
    pub advice: String,
}

impl RiskAssessment {
    /// "<score>/100"
    pub fn score_display(&self) -> String {
        format!("{}/100", self.score)
    }
}
