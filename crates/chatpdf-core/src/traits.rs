use crate::error::Result;

/// Converts text into fixed-length vectors
///
/// Document and query embeddings must come from the same model for
/// distances between them to be meaningful.
pub trait Embedder: Send + Sync {
    /// Identifier recorded in the index manifest
    fn model_name(&self) -> &str;

    /// Embed a single query
    fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Embed documents for storage, one vector per input in input order
    fn embed_many(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;
}

/// Text-in, text-out generative model
pub trait LlmClient: Send + Sync {
    fn generate(&self, prompt: &str) -> Result<String>;
}
