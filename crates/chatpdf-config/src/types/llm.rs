//! LLM configuration

use serde::{Deserialize, Serialize};

/// Answer generation model configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LlmConfig {
    /// Model name
    ///
    /// Examples: "gemini-pro", "gemini-1.5-flash"
    #[serde(default = "default_model")]
    pub model: String,

    /// Sampling temperature
    ///
    /// Kept low so answers stay close to the retrieved context.
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Optional cap on generated tokens
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            temperature: default_temperature(),
            max_output_tokens: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl crate::validation::Validate for LlmConfig {
    fn validate(&self) -> crate::error::Result<()> {
        use crate::error::ConfigError;
        use crate::validation::{validate_positive, validate_range};

        if self.model.is_empty() {
            return Err(ConfigError::ValidationError {
                field: "llm.model".to_string(),
                message: "Model name cannot be empty".to_string(),
            });
        }

        validate_range("llm.temperature", self.temperature, 0.0, 2.0)?;

        if self.max_output_tokens == Some(0) {
            return Err(ConfigError::ValidationError {
                field: "llm.max_output_tokens".to_string(),
                message: "max_output_tokens must be > 0 (omit it for no cap)".to_string(),
            });
        }

        validate_positive("llm.timeout_secs", self.timeout_secs as usize, 0)?;

        Ok(())
    }
}

fn default_model() -> String {
    "gemini-pro".to_string()
}

fn default_temperature() -> f32 {
    0.3
}

fn default_timeout_secs() -> u64 {
    60
}
