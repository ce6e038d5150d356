//! Configuration type definitions
//!
//! Each section is self-contained with validation and defaults.

pub mod api;
pub mod chunking;
pub mod embedding;
pub mod llm;
pub mod search;
pub mod storage;

pub use api::ApiConfig;
pub use chunking::{ChunkSizer, ChunkingConfig};
pub use embedding::EmbeddingConfig;
pub use llm::LlmConfig;
pub use search::{DistanceMetric, SearchConfig};
pub use storage::StorageConfig;

use serde::{Deserialize, Serialize};

/// Top-level configuration, organized by pipeline stage
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Where the vector index lives and which artifacts may be loaded
    #[serde(default)]
    pub storage: StorageConfig,

    /// Text chunking before embedding
    #[serde(default)]
    pub chunking: ChunkingConfig,

    /// Embedding model settings
    #[serde(default)]
    pub embedding: EmbeddingConfig,

    /// Answer generation model settings
    #[serde(default)]
    pub llm: LlmConfig,

    /// Similarity search
    #[serde(default)]
    pub search: SearchConfig,

    /// Hosted API endpoint and credential source
    #[serde(default)]
    pub api: ApiConfig,
}

impl crate::validation::Validate for Config {
    fn validate(&self) -> crate::error::Result<()> {
        self.storage.validate()?;
        self.chunking.validate()?;
        self.embedding.validate()?;
        self.llm.validate()?;
        self.search.validate()?;
        self.api.validate()?;

        Ok(())
    }
}
