//! Similarity search configuration

use serde::{Deserialize, Serialize};

/// Retrieval settings for the query path
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchConfig {
    /// Number of chunks handed to the answer generator
    #[serde(default = "default_top_k")]
    pub top_k: usize,

    /// Distance used to rank chunks against the question
    #[serde(default)]
    pub metric: DistanceMetric,
}

/// Vector distance metric
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DistanceMetric {
    /// Euclidean distance, smaller is closer
    #[default]
    L2,
    /// Cosine similarity, larger is closer
    Cosine,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            top_k: default_top_k(),
            metric: DistanceMetric::default(),
        }
    }
}

impl crate::validation::Validate for SearchConfig {
    fn validate(&self) -> crate::error::Result<()> {
        use crate::error::ConfigError;
        use crate::validation::validate_positive;

        validate_positive("search.top_k", self.top_k, 0)?;

        if self.top_k > 100 {
            return Err(ConfigError::ValidationError {
                field: "search.top_k".to_string(),
                message: format!("top_k ({}) must be <= 100", self.top_k),
            });
        }

        Ok(())
    }
}

fn default_top_k() -> usize {
    4
}
