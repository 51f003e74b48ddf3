use serde::{Deserialize, Serialize};

use super::labeler::RiskCause;

/// Raw attributes of one enrolled identity.
///
/// Numeric fields are signed so that out-of-domain input (negative ages,
/// sliders past the generated range) is still representable and scorable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BiometricRecord {
    pub age: i64,
    /// Years since the last biometric update
    pub bio_years: i64,
    /// Years since the mobile number was linked or updated
    pub mobile_years: i64,
    /// Scanner quality score (0-100)
    pub scanner_quality: i64,
    /// Authentication modality, e.g. "Fingerprint", "Iris", "OTP"
    pub device_type: String,
    /// Historical authentication attempts
    pub auth_count: i64,
    pub recent_failures: i64,
}

impl BiometricRecord {
    pub fn new(
        age: i64,
        bio_years: i64,
        mobile_years: i64,
        scanner_quality: i64,
        device_type: impl Into<String>,
        auth_count: i64,
        recent_failures: i64,
    ) -> Self {
        Self {
            age,
            bio_years,
            mobile_years,
            scanner_quality,
            device_type: device_type.into(),
            auth_count,
            recent_failures,
        }
    }
}

/// A record with its ground-truth label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabeledRecord {
    pub record: BiometricRecord,
    /// Clamped to 0-100
    pub risk_score: u8,
    /// `risk_score >= AT_RISK_THRESHOLD`
    pub at_risk: bool,
    /// Cascade rule that produced the base score. Unknown for corpora loaded from disk.
    pub cause: Option<RiskCause>,
}

impl LabeledRecord {
    /// Binary target as stored in the corpus (1 = at risk)
    pub fn target(&self) -> u8 {
        u8::from(self.at_risk)
    }
}
