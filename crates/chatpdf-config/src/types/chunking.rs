//! Text chunking configuration

use serde::{Deserialize, Serialize};

/// Configuration for splitting extracted text before embedding
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChunkingConfig {
    /// Maximum chunk size, measured by `sizer`
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    /// Overlap between adjacent chunks, measured by `sizer`
    ///
    /// Keeps context that spans a chunk boundary retrievable.
    #[serde(default = "default_chunk_overlap")]
    pub chunk_overlap: usize,

    /// Unit used to measure chunk size and overlap
    #[serde(default)]
    pub sizer: ChunkSizer,
}

/// How chunk length is measured
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChunkSizer {
    /// Unicode scalar values
    #[default]
    Characters,
    /// cl100k BPE tokens
    Tokens,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            chunk_size: default_chunk_size(),
            chunk_overlap: default_chunk_overlap(),
            sizer: ChunkSizer::default(),
        }
    }
}

impl crate::validation::Validate for ChunkingConfig {
    fn validate(&self) -> crate::error::Result<()> {
        use crate::error::ConfigError;
        use crate::validation::validate_positive;

        validate_positive("chunking.chunk_size", self.chunk_size, 0)?;

        if self.chunk_overlap >= self.chunk_size {
            return Err(ConfigError::ValidationError {
                field: "chunking.chunk_overlap".to_string(),
                message: format!(
                    "chunk_overlap ({}) must be < chunk_size ({})",
                    self.chunk_overlap, self.chunk_size
                ),
            });
        }

        Ok(())
    }
}

fn default_chunk_size() -> usize {
    10_000
}

fn default_chunk_overlap() -> usize {
    1_000
}
