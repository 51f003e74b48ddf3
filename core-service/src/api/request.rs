//! Score Request
//!
//! Loosely typed input for `score_record`: numeric fields accept JSON
//! integers, floats (truncated toward zero) or numeric strings.

use serde::{de, Deserialize, Deserializer, Serialize};

use crate::logic::dataset::BiometricRecord;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRequest {
    #[serde(alias = "Age", deserialize_with = "coerce_int")]
    pub age: i64,
    #[serde(alias = "Bio_Years", deserialize_with = "coerce_int")]
    pub bio_years: i64,
    #[serde(alias = "Mobile_Years", deserialize_with = "coerce_int")]
    pub mobile_years: i64,
    #[serde(alias = "Scanner_Quality", deserialize_with = "coerce_int")]
    pub scanner_quality: i64,
    /// Any string; unknown devices are encoded with the fallback code
    #[serde(alias = "Device_Type")]
    pub device_type: String,
    #[serde(alias = "Auth_Count", deserialize_with = "coerce_int")]
    pub auth_count: i64,
    #[serde(alias = "Recent_Failures", deserialize_with = "coerce_int")]
    pub recent_failures: i64,
}

impl From<ScoreRequest> for BiometricRecord {
    fn from(req: ScoreRequest) -> Self {
        BiometricRecord::new(
            req.age,
            req.bio_years,
            req.mobile_years,
            req.scanner_quality,
            req.device_type,
            req.auth_count,
            req.recent_failures,
        )
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum IntLike {
    Int(i64),
    Float(f64),
    Text(String),
}

fn coerce_int<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    match IntLike::deserialize(deserializer)? {
        IntLike::Int(v) => Ok(v),
        IntLike::Float(v) => truncate(v)
            .ok_or_else(|| de::Error::custom(format!("number {} is not coercible to an integer", v))),
        IntLike::Text(s) => parse_int(&s)
            .ok_or_else(|| de::Error::custom(format!("{:?} is not coercible to an integer", s))),
    }
}

/// Parse an integer or a decimal string (truncated)
pub fn parse_int(s: &str) -> Option<i64> {
    let s = s.trim();
    s.parse::<i64>()
        .ok()
        .or_else(|| s.parse::<f64>().ok().and_then(truncate))
}

fn truncate(v: f64) -> Option<i64> {
    v.is_finite().then(|| v.trunc() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_accepts_integers() {
        let req: ScoreRequest = serde_json::from_value(json!({
            "age": 65, "bio_years": 8, "mobile_years": 2, "scanner_quality": 90,
            "device_type": "Fingerprint", "auth_count": 150, "recent_failures": 0
        }))
        .unwrap();

        let record = BiometricRecord::from(req);
        assert_eq!(record, BiometricRecord::new(65, 8, 2, 90, "Fingerprint", 150, 0));
    }

    #[test]
    fn test_coerces_floats_and_strings() {
        let req: ScoreRequest = serde_json::from_value(json!({
            "age": "65", "bio_years": 8.9, "mobile_years": -2.7, "scanner_quality": " 90 ",
            "device_type": "Iris", "auth_count": "150.6", "recent_failures": 0.0
        }))
        .unwrap();

        assert_eq!(req.age, 65);
        assert_eq!(req.bio_years, 8);
        assert_eq!(req.mobile_years, -2);
        assert_eq!(req.scanner_quality, 90);
        assert_eq!(req.auth_count, 150);
        assert_eq!(req.recent_failures, 0);
    }

    #[test]
    fn test_accepts_corpus_column_names() {
        let req: ScoreRequest = serde_json::from_value(json!({
            "Age": 16, "Bio_Years": 3, "Mobile_Years": 1, "Scanner_Quality": 70,
            "Device_Type": "OTP", "Auth_Count": 40, "Recent_Failures": 1
        }))
        .unwrap();
        assert_eq!(req.age, 16);
        assert_eq!(req.device_type, "OTP");
    }

    #[test]
    fn test_rejects_non_numeric() {
        let result: Result<ScoreRequest, _> = serde_json::from_value(json!({
            "age": "sixty", "bio_years": 8, "mobile_years": 2, "scanner_quality": 90,
            "device_type": "Fingerprint", "auth_count": 150, "recent_failures": 0
        }));
        let err = result.unwrap_err().to_string();
        assert!(err.contains("sixty"), "{err}");
    }

    #[test]
    fn test_parse_int() {
        assert_eq!(parse_int("42"), Some(42));
        assert_eq!(parse_int("-7.9"), Some(-7));
        assert_eq!(parse_int("1e2"), Some(100));
        assert_eq!(parse_int("NaN"), None);
        assert_eq!(parse_int(""), None);
    }
}
