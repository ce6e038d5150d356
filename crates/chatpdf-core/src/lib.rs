pub mod api;
pub mod chunking;
pub mod embeddings;
pub mod error;
pub mod extract;
pub mod llm;
pub mod models;
pub mod traits;

pub use error::{ChatPdfError, Result, Service};
pub use models::{Answer, Chunk, ExtractedText, PdfDocument, ScoredChunk};
pub use traits::{Embedder, LlmClient};
