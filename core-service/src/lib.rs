//! AFEWS Core - Authentication Failure Early-Warning System
//!
//! Risk scoring engine for biometric identity records.
//!
//! ## Pipeline
//! - `logic::dataset` - synthetic records and the ground-truth labeler
//! - `logic::features` - feature layout and the device encoder
//! - `logic::model` - bagged decision-tree classifier
//! - `logic::risk` - tier mapping and the explanation rules
//! - `logic::engine` - the fitted engine and its one-time initialization
//! - `api` - the caller-facing boundary (`score_record`)

pub mod api;
pub mod constants;
pub mod logic;

pub use api::commands::{score_record, ScoreOutput};
pub use api::request::ScoreRequest;
pub use logic::config::{CorpusSource, EngineConfig};
pub use logic::dataset::{BiometricRecord, LabeledRecord};
pub use logic::engine::{EngineError, ScoringEngine};
pub use logic::risk::{RiskAssessment, RiskReason, RiskTier};
