//! Embedding model configuration

use serde::{Deserialize, Serialize};

/// Embedding model configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EmbeddingConfig {
    /// Model resource name
    ///
    /// Recorded in the index manifest; a query is only answered against an
    /// index built with the same model.
    #[serde(default = "default_model_name")]
    pub model_name: String,

    /// Texts per batch embedding request (the API accepts at most 100)
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            model_name: default_model_name(),
            batch_size: default_batch_size(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl crate::validation::Validate for EmbeddingConfig {
    fn validate(&self) -> crate::error::Result<()> {
        use crate::error::ConfigError;
        use crate::validation::validate_positive;

        if self.model_name.is_empty() {
            return Err(ConfigError::ValidationError {
                field: "embedding.model_name".to_string(),
                message: "Model name cannot be empty".to_string(),
            });
        }

        validate_positive("embedding.batch_size", self.batch_size, 0)?;
        if self.batch_size > MAX_BATCH_SIZE {
            return Err(ConfigError::ValidationError {
                field: "embedding.batch_size".to_string(),
                message: format!(
                    "batch_size ({}) exceeds the API limit of {}",
                    self.batch_size, MAX_BATCH_SIZE
                ),
            });
        }

        validate_positive("embedding.timeout_secs", self.timeout_secs as usize, 0)?;

        Ok(())
    }
}

const MAX_BATCH_SIZE: usize = 100;

fn default_model_name() -> String {
    "models/embedding-001".to_string()
}

fn default_batch_size() -> usize {
    MAX_BATCH_SIZE
}

fn default_timeout_secs() -> u64 {
    60
}
