use super::csv_io::{load_corpus, read_corpus, save_corpus, write_corpus};
use super::{build_corpus, corpus_digest, CorpusError};
use std::fs;
use tempfile::tempdir;

#[test]
fn test_corpus_save_and_load() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("final_training_data.csv");

    let corpus = build_corpus(120, 42);
    save_corpus(&path, &corpus).unwrap();

    let loaded = load_corpus(&path).unwrap();
    assert_eq!(loaded.len(), corpus.len());

    for (original, read) in corpus.iter().zip(loaded.iter()) {
        assert_eq!(original.record, read.record);
        assert_eq!(original.risk_score, read.risk_score);
        assert_eq!(original.at_risk, read.at_risk);
        // Causes are not persisted
        assert_eq!(read.cause, None);
    }

    assert_eq!(corpus_digest(&corpus), corpus_digest(&loaded));
}

#[test]
fn test_written_header_and_advisory() {
    let corpus = build_corpus(5, 42);
    let mut buffer = Vec::new();
    write_corpus(&mut buffer, &corpus).unwrap();

    let text = String::from_utf8(buffer).unwrap();
    let header = text.lines().next().unwrap();
    assert_eq!(
        header,
        "Age,Bio_Years,Mobile_Years,Scanner_Quality,Device_Type,Auth_Count,Recent_Failures,Risk_Score,Target,Advisory_Label"
    );
    assert_eq!(text.lines().count(), 6);
}

#[test]
fn test_read_lean_schema_without_risk_score() {
    let data = "\
Age,Bio_Years,Mobile_Years,Scanner_Quality,Device_Type,Auth_Count,Recent_Failures,Target
65,8,2,90,Fingerprint,150,0,1
30,1,1,95,Iris,400,0,0
";
    let corpus = read_corpus(data.as_bytes()).unwrap();
    assert_eq!(corpus.len(), 2);
    assert!(corpus[0].at_risk);
    assert_eq!(corpus[0].record.device_type, "Fingerprint");
    assert_eq!(corpus[0].risk_score, 50);
    assert!(!corpus[1].at_risk);
    assert_eq!(corpus[1].risk_score, 0);
}

#[test]
fn test_read_long_headers() {
    let data = "\
Age,Years_Since_Bio_Update,Years_Since_Mobile_Link,Scanner_Quality_Score,Device_Type,Total_Auth_History,Recent_Failures,Risk_Score,Failure_Target,Advisory_Label
16,3,0,80,OTP,20,1,93,1,CRITICAL: Immediate Biometric Update Required
";
    let corpus = read_corpus(data.as_bytes()).unwrap();
    assert_eq!(corpus.len(), 1);
    assert_eq!(corpus[0].record.bio_years, 3);
    assert_eq!(corpus[0].record.auth_count, 20);
    assert_eq!(corpus[0].risk_score, 93);
    assert!(corpus[0].at_risk);
}

#[test]
fn test_missing_file_is_not_found() {
    let dir = tempdir().unwrap();
    let err = load_corpus(&dir.path().join("absent.csv")).unwrap_err();
    assert!(matches!(err, CorpusError::NotFound(_)));
}

#[test]
fn test_header_only_file_is_empty() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("empty.csv");
    fs::write(&path, "Age,Bio_Years,Mobile_Years,Scanner_Quality,Device_Type,Auth_Count,Recent_Failures,Target\n").unwrap();

    let err = load_corpus(&path).unwrap_err();
    assert!(matches!(err, CorpusError::Empty));
}

#[test]
fn test_malformed_rows_are_rejected() {
    let missing_target = "Age,Bio_Years,Mobile_Years,Scanner_Quality,Device_Type,Auth_Count,Recent_Failures\n1,2,3,4,Iris,5,6\n";
    assert!(matches!(
        read_corpus(missing_target.as_bytes()).unwrap_err(),
        CorpusError::Malformed(_)
    ));

    let not_a_number = "Age,Bio_Years,Mobile_Years,Scanner_Quality,Device_Type,Auth_Count,Recent_Failures,Target\nold,2,3,4,Iris,5,6,0\n";
    assert!(matches!(
        read_corpus(not_a_number.as_bytes()).unwrap_err(),
        CorpusError::Malformed(_)
    ));

    let bad_target = "Age,Bio_Years,Mobile_Years,Scanner_Quality,Device_Type,Auth_Count,Recent_Failures,Target\n1,2,3,4,Iris,5,6,0\n1,2,3,4,Iris,5,6,7\n";
    match read_corpus(bad_target.as_bytes()).unwrap_err() {
        CorpusError::InvalidTarget { row, value } => {
            assert_eq!(row, 3);
            assert_eq!(value, 7);
        }
        other => panic!("unexpected error: {other}"),
    }

    let header = "Age,Bio_Years,Mobile_Years,Scanner_Quality,Device_Type,Auth_Count,Recent_Failures,Risk_Score,Target\n";
    for (line, risk_score, target) in [("1,2,3,4,Iris,5,6,10,1", 10, 1), ("1,2,3,4,Iris,5,6,90,0", 90, 0)] {
        let csv = format!("{header}1,2,3,4,Iris,5,6,85,1\n{line}\n");
        match read_corpus(csv.as_bytes()).unwrap_err() {
            CorpusError::InconsistentLabel { row, risk_score: s, target: t } => {
                assert_eq!(row, 3);
                assert_eq!((s, t), (risk_score, target));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    // Clamping happens before the check
    let clamped = format!("{header}1,2,3,4,Iris,5,6,140,1\n1,2,3,4,Iris,5,6,-20,0\n");
    let corpus = read_corpus(clamped.as_bytes()).unwrap();
    assert_eq!(corpus[0].risk_score, 100);
    assert_eq!(corpus[1].risk_score, 0);
}

#[test]
fn test_digest_changes_with_content() {
    let a = build_corpus(50, 1);
    let b = build_corpus(50, 2);
    assert_ne!(corpus_digest(&a), corpus_digest(&b));
    assert_eq!(corpus_digest(&a).len(), 64);
}
