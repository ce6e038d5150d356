use crate::api::{model_path, ApiClient};
use crate::error::{ChatPdfError, Result, Service};
use crate::traits::Embedder;
use chatpdf_config::{ApiConfig, Credentials, EmbeddingConfig};
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

const TASK_QUERY: &str = "RETRIEVAL_QUERY";
const TASK_DOCUMENT: &str = "RETRIEVAL_DOCUMENT";

/// Hosted embedding model (`embedContent` / `batchEmbedContents`)
pub struct GeminiEmbedder {
    api: ApiClient,
    model: String,
    batch_size: usize,
}

#[derive(Debug, Deserialize)]
struct ContentEmbedding {
    #[serde(default)]
    values: Vec<f32>,
}

#[derive(Debug, Deserialize)]
struct EmbedContentResponse {
    embedding: ContentEmbedding,
}

#[derive(Debug, Deserialize)]
struct BatchEmbedContentsResponse {
    #[serde(default)]
    embeddings: Vec<ContentEmbedding>,
}

impl GeminiEmbedder {
    pub fn new(config: &EmbeddingConfig, api: &ApiConfig, credentials: Credentials) -> Result<Self> {
        Ok(Self {
            api: ApiClient::new(
                &api.base_url,
                credentials,
                config.timeout_secs,
                Service::Embedding,
            )?,
            model: model_path(&config.model_name),
            batch_size: config.batch_size.max(1),
        })
    }

    fn request(&self, text: &str, task_type: &str) -> serde_json::Value {
        json!({
            "model": self.model,
            "content": { "parts": [{ "text": text }] },
            "taskType": task_type,
        })
    }
}

impl Embedder for GeminiEmbedder {
    fn model_name(&self) -> &str {
        &self.model
    }

    fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let resp: EmbedContentResponse = self.api.post(
            &format!("{}:embedContent", self.model),
            &self.request(text, TASK_QUERY),
        )?;
        if resp.embedding.values.is_empty() {
            return Err(ChatPdfError::Unexpected(
                "embedding service returned an empty vector".to_string(),
            ));
        }
        Ok(resp.embedding.values)
    }

    fn embed_many(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let mut vectors = Vec::with_capacity(texts.len());

        for (batch_no, batch) in texts.chunks(self.batch_size).enumerate() {
            let requests: Vec<serde_json::Value> = batch
                .iter()
                .map(|t| self.request(t, TASK_DOCUMENT))
                .collect();
            let resp: BatchEmbedContentsResponse = self.api.post(
                &format!("{}:batchEmbedContents", self.model),
                &json!({ "requests": requests }),
            )?;

            if resp.embeddings.len() != batch.len() {
                return Err(ChatPdfError::Unexpected(format!(
                    "embedding service returned {} vectors for {} inputs",
                    resp.embeddings.len(),
                    batch.len()
                )));
            }
            debug!("Embedded batch {} ({} texts)", batch_no, batch.len());
            vectors.extend(resp.embeddings.into_iter().map(|e| e.values));
        }

        Ok(vectors)
    }
}
