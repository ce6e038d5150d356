use crate::chunking::tokenizer::{count_tokens, tokenizer};
use crate::error::{ChatPdfError, Result};
use crate::models::Chunk;
use chatpdf_config::{ChunkSizer, ChunkingConfig, ConfigError, Validate};
use text_splitter::{ChunkConfig, TextSplitter};
use tracing::debug;

/// Recursive splitter over paragraph, line, sentence and word boundaries
///
/// Every chunk measures at most `chunk_size` and shares at most
/// `chunk_overlap` with its predecessor. Boundaries snap to the largest
/// semantic unit that fits, so chunks are often shorter than the maximum.
#[derive(Debug, Clone)]
pub struct TextChunker {
    chunk_size: usize,
    chunk_overlap: usize,
    sizer: ChunkSizer,
}

impl TextChunker {
    pub fn new(config: &ChunkingConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            chunk_size: config.chunk_size,
            chunk_overlap: config.chunk_overlap,
            sizer: config.sizer,
        })
    }

    /// Split `text` into ordered chunks; blank input yields none
    pub fn chunk(&self, text: &str) -> Result<Vec<Chunk>> {
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }

        let pieces: Vec<(usize, &str)> = match self.sizer {
            ChunkSizer::Characters => {
                let config = ChunkConfig::new(self.chunk_size)
                    .with_overlap(self.chunk_overlap)
                    .map_err(invalid_overlap)?;
                TextSplitter::new(config).chunk_indices(text).collect()
            }
            ChunkSizer::Tokens => {
                let config = ChunkConfig::new(self.chunk_size)
                    .with_sizer(tokenizer()?.clone())
                    .with_overlap(self.chunk_overlap)
                    .map_err(invalid_overlap)?;
                TextSplitter::new(config).chunk_indices(text).collect()
            }
        };

        debug!(
            "Split {} bytes into {} chunks (size {}, overlap {})",
            text.len(),
            pieces.len(),
            self.chunk_size,
            self.chunk_overlap
        );

        Ok(pieces
            .into_iter()
            .enumerate()
            .map(|(index, (offset, piece))| Chunk {
                index,
                offset,
                text: piece.to_string(),
            })
            .collect())
    }

    /// Length of `text` in the configured unit
    pub fn measure(&self, text: &str) -> Result<usize> {
        match self.sizer {
            ChunkSizer::Characters => Ok(text.chars().count()),
            ChunkSizer::Tokens => count_tokens(text),
        }
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    pub fn chunk_overlap(&self) -> usize {
        self.chunk_overlap
    }
}

fn invalid_overlap(err: impl std::fmt::Display) -> ChatPdfError {
    ConfigError::ValidationError {
        field: "chunking.chunk_overlap".to_string(),
        message: err.to_string(),
    }
    .into()
}
