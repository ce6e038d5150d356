use crate::error::{ChatPdfError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One uploaded PDF, held in memory for the duration of an ingest
#[derive(Debug, Clone)]
pub struct PdfDocument {
    /// Display name, usually the file name
    pub name: String,
    pub bytes: Vec<u8>,
}

impl PdfDocument {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }

    /// Read a PDF from disk; an unreadable file is a `DecodeError`
    pub fn from_path(path: &Path) -> Result<Self> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        let bytes = std::fs::read(path).map_err(|e| ChatPdfError::DecodeError {
            document: name.clone(),
            message: e.to_string(),
        })?;
        Ok(Self { name, bytes })
    }
}

/// Raw text of a document set: every page of every document, concatenated
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedText {
    pub text: String,
    pub documents: usize,
    pub pages: usize,
    /// Pages that yielded no text (image-only, unsupported fonts)
    pub empty_pages: usize,
}

/// Contiguous window of the raw text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    /// Position in the chunk sequence
    pub index: usize,
    /// Byte offset of `text` in the raw text
    pub offset: usize,
    pub text: String,
}

/// A retrieved chunk and its distance or similarity to the query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredChunk {
    pub text: String,
    pub score: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    pub text: String,
    /// True when the text is the fixed refusal sentence
    pub refused: bool,
    /// Chunks the answer was generated from, best match first
    pub sources: Vec<ScoredChunk>,
}
