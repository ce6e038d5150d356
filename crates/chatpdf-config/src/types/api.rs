//! Hosted API configuration

use serde::{Deserialize, Serialize};

/// Endpoint and credential source for the hosted model API
///
/// The key itself never lives in configuration; only the name of the
/// environment variable it is read from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiConfig {
    /// Environment variable holding the API key
    #[serde(default = "default_key_env")]
    pub key_env: String,

    /// Base URL of the Generative Language API
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            key_env: default_key_env(),
            base_url: default_base_url(),
        }
    }
}

impl crate::validation::Validate for ApiConfig {
    fn validate(&self) -> crate::error::Result<()> {
        use crate::error::ConfigError;

        if self.key_env.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                field: "api.key_env".to_string(),
                message: "Environment variable name cannot be empty".to_string(),
            });
        }

        crate::validation::validate_url("api.base_url", &self.base_url)
    }
}

fn default_key_env() -> String {
    "GOOGLE_API_KEY".to_string()
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}
