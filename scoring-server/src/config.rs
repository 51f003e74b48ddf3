//! Configuration module

use std::env;

use afews_core::EngineConfig;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,

    /// Maximum records accepted by the batch endpoint
    pub max_batch_size: usize,

    /// Environment (development, production)
    pub environment: String,

    /// Corpus and forest settings (`AFEWS_*` variables)
    pub engine: EngineConfig,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),

            max_batch_size: env::var("MAX_BATCH_SIZE")
                .ok()
                .and_then(|n| n.parse().ok())
                .filter(|&n| n > 0)
                .unwrap_or(1000),

            environment: env::var("ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string()),

            engine: EngineConfig::from_env(),
        }
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}
