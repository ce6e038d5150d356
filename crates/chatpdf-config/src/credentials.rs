//! API credentials, resolved once at startup

use crate::error::{ConfigError, Result};
use crate::types::ApiConfig;
use std::fmt;

/// API key handed to every remote client at construction time
///
/// Built once when the process starts and read-only afterwards.
#[derive(Clone)]
pub struct Credentials {
    api_key: String,
}

impl Credentials {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
        }
    }

    /// Read the key from the environment variable named by `api.key_env`
    ///
    /// A missing or blank variable is a `MissingCredential` error.
    pub fn from_env(api: &ApiConfig) -> Result<Self> {
        match std::env::var(&api.key_env) {
            Ok(key) if !key.trim().is_empty() => Ok(Self::new(key.trim())),
            _ => Err(ConfigError::MissingCredential {
                var: api.key_env.clone(),
            }),
        }
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &"<redacted>")
            .finish()
    }
}
