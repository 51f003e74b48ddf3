//! Model Module - Random Forest Classifier
//!
//! Fitted once from the encoded corpus; read-only afterwards so any number
//! of scoring calls can share it.

pub mod forest;
pub mod matrix;
pub mod tree;


use thiserror::Error;

// Re-export common types
pub use forest::{FitReport, ForestConfig, RandomForest, VoteCount};
pub use matrix::TrainingMatrix;
pub use tree::{DecisionTree, TreeConfig, TreeNode};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("training set is empty")]
    EmptyTrainingSet,

    #[error("training set has no feature columns")]
    NoFeatures,

    #[error("forest needs at least one tree")]
    NoTrees,
}
