//! Risk Module
//!
//! Turns a classifier probability into a tier and a query-time explanation.
//! The explanation is read off the raw record, never off the model, and is
//! a separate rule set from the training labeler.
//!
//! ## Structure
//! - `types`: RiskTier, RiskReason, RiskAssessment
//! - `rules`: tier thresholds and advice strings
//! - `interpreter`: probability or vote count to assessment
//!
//! ## Usage
//! ```ignore
//! use crate::logic::risk::{interpret, RiskTier};
//!
//! let assessment = interpret(0.93, &record);
//! if assessment.tier == RiskTier::Critical {
//!     println!("{}", assessment.advice);
//! }
//! ```

pub mod interpreter;
pub mod rules;
pub mod types;

#[cfg(test)]
mod tests;

pub use interpreter::{
    interpret, interpret_votes, score_from_probability, score_from_votes, select_reason,
};
pub use rules::{CRITICAL_MIN_SCORE, MODERATE_MIN_SCORE};
pub use types::{RiskAssessment, RiskReason, RiskTier};
