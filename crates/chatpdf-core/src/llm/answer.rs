use crate::error::{ChatPdfError, Result};
use crate::llm::prompts::{is_refusal, render_qa_prompt, REFUSAL};
use crate::traits::LlmClient;
use std::sync::Arc;
use tracing::{debug, info};

/// Answers a question from retrieved chunks, or refuses
pub struct AnswerGenerator {
    llm: Arc<dyn LlmClient>,
}

impl AnswerGenerator {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self { llm }
    }

    /// Returns the model's answer, or exactly `REFUSAL`
    pub fn generate(&self, context: &[String], question: &str) -> Result<String> {
        if context.iter().all(|c| c.trim().is_empty()) {
            debug!("No context retrieved, refusing without a model call");
            return Ok(REFUSAL.to_string());
        }

        let prompt = render_qa_prompt(context, question);
        debug!(
            "Generating answer from {} chunks ({} prompt bytes)",
            context.len(),
            prompt.len()
        );

        let reply = self.llm.generate(&prompt)?;
        let reply = reply.trim();
        if reply.is_empty() {
            return Err(ChatPdfError::Unexpected(
                "generation service returned an empty answer".to_string(),
            ));
        }

        if is_refusal(reply) {
            info!("Answer not found in context");
            return Ok(REFUSAL.to_string());
        }

        Ok(reply.to_string())
    }
}
