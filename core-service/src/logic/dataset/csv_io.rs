//! Corpus persistence as CSV
//!
//! Writes the full generator schema (with `Risk_Score` and `Advisory_Label`).
//! Reads either that schema, the lean training schema ending in `Target`, or
//! the long-header export with `Years_Since_*` column names.

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::labeler::{self, AT_RISK_THRESHOLD};
use super::record::{BiometricRecord, LabeledRecord};
use super::CorpusError;

/// Row shape on disk
#[derive(Debug, Serialize, Deserialize)]
struct CorpusRow {
    #[serde(rename = "Age")]
    age: i64,
    #[serde(rename = "Bio_Years", alias = "Years_Since_Bio_Update")]
    bio_years: i64,
    #[serde(rename = "Mobile_Years", alias = "Years_Since_Mobile_Link")]
    mobile_years: i64,
    #[serde(rename = "Scanner_Quality", alias = "Scanner_Quality_Score")]
    scanner_quality: i64,
    #[serde(rename = "Device_Type")]
    device_type: String,
    #[serde(rename = "Auth_Count", alias = "Total_Auth_History")]
    auth_count: i64,
    #[serde(rename = "Recent_Failures")]
    recent_failures: i64,
    #[serde(rename = "Risk_Score", default)]
    risk_score: Option<i64>,
    #[serde(rename = "Target", alias = "Failure_Target")]
    target: i64,
    #[serde(rename = "Advisory_Label", skip_deserializing)]
    advisory_label: String,
}

impl From<&LabeledRecord> for CorpusRow {
    fn from(l: &LabeledRecord) -> Self {
        let r = &l.record;
        Self {
            age: r.age,
            bio_years: r.bio_years,
            mobile_years: r.mobile_years,
            scanner_quality: r.scanner_quality,
            device_type: r.device_type.clone(),
            auth_count: r.auth_count,
            recent_failures: r.recent_failures,
            risk_score: Some(i64::from(l.risk_score)),
            target: i64::from(l.target()),
            advisory_label: labeler::advisory_label(l.risk_score).to_string(),
        }
    }
}

impl CorpusRow {
    fn into_labeled(self, row: usize) -> Result<LabeledRecord, CorpusError> {
        let at_risk = match self.target {
            0 => false,
            1 => true,
            other => return Err(CorpusError::InvalidTarget { row, value: other }),
        };

        // Files without a score column get the threshold edge for their class
        let risk_score = match self.risk_score {
            Some(s) => {
                let score = s.clamp(labeler::MIN_RISK_SCORE, labeler::MAX_RISK_SCORE) as u8;
                if (score >= AT_RISK_THRESHOLD) != at_risk {
                    return Err(CorpusError::InconsistentLabel {
                        row,
                        risk_score: s,
                        target: self.target,
                    });
                }
                score
            }
            None if at_risk => AT_RISK_THRESHOLD,
            None => 0,
        };

        Ok(LabeledRecord {
            record: BiometricRecord::new(
                self.age,
                self.bio_years,
                self.mobile_years,
                self.scanner_quality,
                self.device_type,
                self.auth_count,
                self.recent_failures,
            ),
            risk_score,
            at_risk,
            cause: None,
        })
    }
}

/// Write a labeled corpus to any writer
pub fn write_corpus<W: Write>(writer: W, corpus: &[LabeledRecord]) -> Result<(), CorpusError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for record in corpus {
        csv_writer.serialize(CorpusRow::from(record))?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Write a labeled corpus to `path`, creating parent directories
pub fn save_corpus(path: &Path, corpus: &[LabeledRecord]) -> Result<(), CorpusError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let file = File::create(path)?;
    write_corpus(file, corpus)?;

    log::info!("Saved {} records to {}", corpus.len(), path.display());
    Ok(())
}

/// Read a labeled corpus from any reader. Empty corpora are rejected.
pub fn read_corpus<R: Read>(reader: R) -> Result<Vec<LabeledRecord>, CorpusError> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

    let mut corpus = Vec::new();
    for (i, row) in csv_reader.deserialize::<CorpusRow>().enumerate() {
        // Row 1 is the header
        corpus.push(row?.into_labeled(i + 2)?);
    }

    if corpus.is_empty() {
        return Err(CorpusError::Empty);
    }

    Ok(corpus)
}

/// Load a labeled corpus from `path`
pub fn load_corpus(path: &Path) -> Result<Vec<LabeledRecord>, CorpusError> {
    if !path.exists() {
        return Err(CorpusError::NotFound(path.to_path_buf()));
    }

    let file = File::open(path)?;
    let corpus = read_corpus(file)?;

    log::info!("Loaded {} records from {}", corpus.len(), path.display());
    Ok(corpus)
}
