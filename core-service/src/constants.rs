//! Central Configuration Constants
//!
//! Single source of truth for all engine defaults.
//! Every default can be overridden from the environment.

use std::path::PathBuf;

/// Seed shared by corpus synthesis and forest bagging.
pub const DEFAULT_SEED: u64 = 42;

/// Number of synthetic records used to train the engine when no corpus file is given.
pub const DEFAULT_CORPUS_SIZE: usize = 3000;

/// Number of trees in the ensemble
pub const DEFAULT_TREE_COUNT: usize = 200;

/// File name used when exporting a generated corpus
pub const DEFAULT_CORPUS_FILE: &str = "final_training_data.csv";

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// App name
pub const APP_NAME: &str = "AFEWS";

// ============================================
// Helper functions to read from env with fallback
// ============================================

/// Corpus file to train from. `None` means synthesize in-process.
pub fn get_corpus_path() -> Option<PathBuf> {
    std::env::var("AFEWS_CORPUS_PATH")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .map(PathBuf::from)
}

/// Get synthetic corpus size from environment or use default
pub fn get_corpus_size() -> usize {
    std::env::var("AFEWS_CORPUS_SIZE")
        .ok()
        .and_then(|s| s.parse().ok())
        .filter(|&n| n > 0)
        .unwrap_or(DEFAULT_CORPUS_SIZE)
}

/// Get seed from environment or use default
pub fn get_seed() -> u64 {
    std::env::var("AFEWS_SEED")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_SEED)
}

/// Get tree count from environment or use default
pub fn get_tree_count() -> usize {
    std::env::var("AFEWS_TREE_COUNT")
        .ok()
        .and_then(|s| s.parse().ok())
        .filter(|&n| n > 0)
        .unwrap_or(DEFAULT_TREE_COUNT)
}

/// Directory where exported corpora land by default
pub fn get_dataset_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("afews")
        .join("datasets")
}
