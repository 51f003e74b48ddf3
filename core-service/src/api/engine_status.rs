use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineStatus {
    pub feature_version: u8,
    pub layout_hash: u32,
    pub feature_count: usize,

    /// Device categories in code order
    pub device_categories: Vec<String>,
    pub encoder_fingerprint: u32,
    pub model: ModelMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelMetadata {
    pub model_type: String, // "random_forest"
    pub n_trees: usize,
    pub seed: u64,
    pub trained_on_records: u64,
    pub positive_rate: f64,
    /// SHA-256 of the training corpus, hex
    pub corpus_digest: String,
    /// RFC 3339
    pub trained_at: String,
    pub training_accuracy: f64,
    pub oob_accuracy: Option<f64>,
    pub feature_importances: Vec<FeatureImportance>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureImportance {
    pub feature: String,
    pub importance: f64,
}
