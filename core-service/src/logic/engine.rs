//! Scoring Engine
//!
//! Owns the fitted device encoder and forest. Both are built once by `fit`
//! and only read afterwards, so `&ScoringEngine` is safe to share across
//! threads without locking.
//!
//! The process-wide instance sits behind a `OnceCell`: `init` fits and
//! publishes it exactly once, `get` hands it to queries.

use chrono::Utc;
use once_cell::sync::OnceCell;
use thiserror::Error;

use crate::api::engine_status::{EngineStatus, FeatureImportance, ModelMetadata};
use crate::logic::config::{CorpusSource, EngineConfig};
use crate::logic::dataset::{self, csv_io, BiometricRecord, CorpusError, LabeledRecord};
use crate::logic::features::{feature_name, DeviceEncoder, LayoutInfo};
use crate::logic::model::{ForestConfig, ModelError, RandomForest, VoteCount};
use crate::logic::risk::{self, RiskAssessment};

const MODEL_TYPE: &str = "random_forest";

static ENGINE: OnceCell<ScoringEngine> = OnceCell::new();

#[derive(Debug, Error)]
pub enum EngineError {
    /// Corpus could not be built or loaded; the engine never became ready
    #[error("engine initialization failed: {0}")]
    Initialization(#[from] CorpusError),

    #[error("model fitting failed: {0}")]
    Model(#[from] ModelError),

    #[error("scoring engine is not initialized")]
    NotInitialized,

    #[error("scoring engine is already initialized")]
    AlreadyInitialized,
}

impl EngineError {
    /// True for failures of the fit phase, as opposed to query-time errors
    pub fn is_initialization_failure(&self) -> bool {
        matches!(self, EngineError::Initialization(_) | EngineError::Model(_))
    }
}

#[derive(Debug)]
pub struct ScoringEngine {
    encoder: DeviceEncoder,
    forest: RandomForest,
    metadata: ModelMetadata,
}

impl ScoringEngine {
    /// Build or load the corpus named by `config`, then fit
    pub fn fit(config: &EngineConfig) -> Result<Self, EngineError> {
        log::info!("Building scoring engine from {}", config.corpus);

        let corpus = match &config.corpus {
            CorpusSource::Synthetic { records } => dataset::build_corpus(*records, config.seed),
            CorpusSource::File(path) => csv_io::load_corpus(path)?,
        };

        Self::from_corpus(&corpus, config.forest.clone())
    }

    /// Fit encoder and forest on an already labeled corpus
    pub fn from_corpus(corpus: &[LabeledRecord], forest_config: ForestConfig) -> Result<Self, EngineError> {
        let encoder = DeviceEncoder::fit_corpus(corpus);
        log::debug!("Device encoder fitted: {:?}", encoder.categories());

        let matrix = encoder.encode_corpus(corpus);
        let seed = forest_config.seed;
        let forest = RandomForest::fit(forest_config, &matrix)?;
        let report = forest.report();

        let feature_importances = forest
            .feature_importances()
            .iter()
            .enumerate()
            .map(|(i, &importance)| FeatureImportance {
                feature: feature_name(i).unwrap_or("unknown").to_string(),
                importance,
            })
            .collect();

        let metadata = ModelMetadata {
            model_type: MODEL_TYPE.to_string(),
            n_trees: forest.n_trees(),
            seed,
            trained_on_records: report.n_samples as u64,
            positive_rate: report.positive_rate,
            corpus_digest: dataset::corpus_digest(corpus),
            trained_at: Utc::now().to_rfc3339(),
            training_accuracy: report.training_accuracy,
            oob_accuracy: report.oob_accuracy,
            feature_importances,
        };

        log::info!(
            "Scoring engine ready: {} trees on {} records (positive rate {:.3})",
            metadata.n_trees,
            metadata.trained_on_records,
            metadata.positive_rate
        );

        Ok(Self {
            encoder,
            forest,
            metadata,
        })
    }

    /// Encode, predict and interpret one record
    pub fn score(&self, record: &BiometricRecord) -> RiskAssessment {
        let votes = self.predict_votes(record);
        let assessment = risk::interpret_votes(votes.positive, votes.total, record);
        log::debug!(
            "Scored record age={} device={:?}: {} ({})",
            record.age,
            record.device_type,
            assessment.score_display(),
            assessment.tier
        );
        assessment
    }

    pub fn predict_probability(&self, record: &BiometricRecord) -> f64 {
        self.predict_votes(record).fraction()
    }

    pub fn predict_votes(&self, record: &BiometricRecord) -> VoteCount {
        let vector = self.encoder.encode(record);
        log::trace!("Encoded query: {}", vector.to_log_entry());
        self.forest.predict_votes(&vector)
    }

    pub fn encoder(&self) -> &DeviceEncoder {
        &self.encoder
    }

    pub fn forest(&self) -> &RandomForest {
        &self.forest
    }

    pub fn metadata(&self) -> &ModelMetadata {
        &self.metadata
    }

    pub fn status(&self) -> EngineStatus {
        let layout = LayoutInfo::current();
        EngineStatus {
            feature_version: layout.version,
            layout_hash: layout.hash,
            feature_count: layout.feature_count,
            device_categories: self.encoder.categories().into_iter().map(String::from).collect(),
            encoder_fingerprint: self.encoder.fingerprint(),
            model: self.metadata.clone(),
        }
    }
}

// ============================================================================
// PROCESS-WIDE ENGINE
// ============================================================================

/// Fit and publish the process-wide engine.
///
/// Concurrent callers block until the first fit finishes. Every call after a
/// successful init returns `AlreadyInitialized` without refitting; a failed
/// fit leaves the engine unset so queries keep getting `NotInitialized`.
pub fn init(config: &EngineConfig) -> Result<&'static ScoringEngine, EngineError> {
    let mut fitted_here = false;
    let engine = ENGINE
        .get_or_try_init(|| {
            fitted_here = true;
            ScoringEngine::fit(config)
        })
        .map_err(|e| {
            log::error!("Scoring engine initialization failed: {}", e);
            e
        })?;

    if !fitted_here {
        log::warn!("Scoring engine already initialized, ignoring init request");
        return Err(EngineError::AlreadyInitialized);
    }
    Ok(engine)
}

pub fn get() -> Result<&'static ScoringEngine, EngineError> {
    ENGINE.get().ok_or(EngineError::NotInitialized)
}

pub fn is_initialized() -> bool {
    ENGINE.get().is_some()
}
