use crate::report::{IndexStatus, IngestReport};
use chatpdf_config::{Config, Credentials, SearchConfig};
use chatpdf_core::chunking::TextChunker;
use chatpdf_core::embeddings::GeminiEmbedder;
use chatpdf_core::extract::extract_text;
use chatpdf_core::llm::{AnswerGenerator, GeminiClient, REFUSAL};
use chatpdf_core::{Answer, ChatPdfError, Embedder, LlmClient, PdfDocument, Result};
use chatpdf_index::{IndexStore, VectorIndex};
use std::sync::Arc;
use tracing::{debug, info};

/// Ingestion and query paths over one persisted index
///
/// Holds no state between calls other than what is on disk.
pub struct Pipeline {
    chunker: TextChunker,
    embedder: Arc<dyn Embedder>,
    generator: AnswerGenerator,
    store: IndexStore,
    search: SearchConfig,
}

impl Pipeline {
    pub fn new(config: &Config, embedder: Arc<dyn Embedder>, llm: Arc<dyn LlmClient>) -> Result<Self> {
        Ok(Self {
            chunker: TextChunker::new(&config.chunking)?,
            embedder,
            generator: AnswerGenerator::new(llm),
            store: IndexStore::from_config(&config.storage),
            search: config.search.clone(),
        })
    }

    /// Pipeline backed by the hosted embedding and generation models
    pub fn from_config(config: &Config, credentials: Credentials) -> Result<Self> {
        let embedder = GeminiEmbedder::new(&config.embedding, &config.api, credentials.clone())?;
        let llm = GeminiClient::new(&config.llm, &config.api, credentials)?;
        Self::new(config, Arc::new(embedder), Arc::new(llm))
    }

    /// Extract, chunk, embed and persist `documents`, replacing any existing index
    ///
    /// Nothing is written unless every stage succeeds.
    pub fn ingest(&self, documents: &[PdfDocument]) -> Result<IngestReport> {
        if documents.is_empty() {
            return Err(ChatPdfError::EmptyUpload);
        }

        let extracted = extract_text(documents)?;
        let chunks = self.chunker.chunk(&extracted.text)?;
        if chunks.is_empty() {
            return Err(ChatPdfError::NoExtractableText);
        }
        info!("Split document text into {} chunks", chunks.len());

        let texts: Vec<String> = chunks.into_iter().map(|c| c.text).collect();
        let vectors = self.embedder.embed_many(&texts)?;
        if vectors.len() != texts.len() {
            return Err(ChatPdfError::Unexpected(format!(
                "embedder returned {} vectors for {} chunks",
                vectors.len(),
                texts.len()
            )));
        }

        let index = VectorIndex::build(texts.into_iter().zip(vectors).collect())?;
        let manifest = self.store.save(&index, self.embedder.model_name())?;

        Ok(IngestReport {
            documents: extracted.documents,
            pages: extracted.pages,
            empty_pages: extracted.empty_pages,
            characters: extracted.text.chars().count(),
            chunks: manifest.chunk_count,
            dimension: manifest.dimension,
            embedding_model: manifest.embedding_model,
            index_dir: self.store.dir().to_path_buf(),
        })
    }

    /// Answer `question` from the persisted index
    pub fn answer(&self, question: &str) -> Result<Answer> {
        let question = question.trim();
        if question.is_empty() {
            return Err(ChatPdfError::EmptyQuestion);
        }

        let index = self.store.load(self.embedder.model_name())?;
        let query = self.embedder.embed(question)?;
        let sources = index.search(&query, self.search.top_k, self.search.metric)?;
        debug!("Retrieved {} chunks for question", sources.len());

        let context: Vec<String> = sources.iter().map(|s| s.text.clone()).collect();
        let text = self.generator.generate(&context, question)?;
        let refused = text == REFUSAL;

        Ok(Answer {
            text,
            refused,
            sources,
        })
    }

    pub fn index_status(&self) -> Result<IndexStatus> {
        IndexStatus::of(&self.store)
    }
}
