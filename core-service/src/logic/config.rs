//! Engine Configuration
//!
//! Where the training corpus comes from and how the forest is grown.
//! Built once at startup, then handed to `ScoringEngine::fit`.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::constants::{self, DEFAULT_CORPUS_SIZE, DEFAULT_SEED};
use crate::logic::model::ForestConfig;

/// Training corpus source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorpusSource {
    /// Synthesize `records` labeled records in-process
    Synthetic { records: usize },
    /// Load a previously exported corpus CSV
    File(PathBuf),
}

impl Default for CorpusSource {
    fn default() -> Self {
        CorpusSource::Synthetic {
            records: DEFAULT_CORPUS_SIZE,
        }
    }
}

impl std::fmt::Display for CorpusSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CorpusSource::Synthetic { records } => write!(f, "synthetic ({} records)", records),
            CorpusSource::File(path) => write!(f, "file {}", path.display()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    pub corpus: CorpusSource,
    /// Seed for corpus synthesis; also copied into `forest.seed`
    pub seed: u64,
    pub forest: ForestConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            corpus: CorpusSource::default(),
            seed: DEFAULT_SEED,
            forest: ForestConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Defaults overridden by `AFEWS_*` environment variables
    pub fn from_env() -> Self {
        let corpus = match constants::get_corpus_path() {
            Some(path) => CorpusSource::File(path),
            None => CorpusSource::Synthetic {
                records: constants::get_corpus_size(),
            },
        };

        Self::default()
            .with_corpus(corpus)
            .with_seed(constants::get_seed())
            .with_trees(constants::get_tree_count())
    }

    pub fn with_corpus(mut self, corpus: CorpusSource) -> Self {
        self.corpus = corpus;
        self
    }

    pub fn with_corpus_file(self, path: impl Into<PathBuf>) -> Self {
        self.with_corpus(CorpusSource::File(path.into()))
    }

    pub fn with_synthetic(self, records: usize) -> Self {
        self.with_corpus(CorpusSource::Synthetic { records })
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self.forest.seed = seed;
        self
    }

    pub fn with_trees(mut self, n_trees: usize) -> Self {
        self.forest.n_trees = n_trees;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::DEFAULT_TREE_COUNT;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.corpus, CorpusSource::Synthetic { records: 3000 });
        assert_eq!(config.seed, 42);
        assert_eq!(config.forest.seed, 42);
        assert_eq!(config.forest.n_trees, DEFAULT_TREE_COUNT);
    }

    #[test]
    fn test_builders() {
        let config = EngineConfig::default()
            .with_corpus_file("/tmp/corpus.csv")
            .with_seed(7)
            .with_trees(10);

        assert_eq!(config.corpus, CorpusSource::File(PathBuf::from("/tmp/corpus.csv")));
        assert_eq!(config.seed, 7);
        assert_eq!(config.forest.seed, 7);
        assert_eq!(config.forest.n_trees, 10);

        let config = config.with_synthetic(500);
        assert_eq!(config.corpus.to_string(), "synthetic (500 records)");
    }
}
