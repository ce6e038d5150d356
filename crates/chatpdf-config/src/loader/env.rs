//! Environment variable configuration overlay
//!
//! Supports environment variables in the format
//! `CHATPDF_<section>_<field>=value`, for example:
//! - `CHATPDF_CHUNKING_CHUNK_SIZE=4000`
//! - `CHATPDF_SEARCH_TOP_K=6`
//! - `CHATPDF_STORAGE_INDEX_DIR=/var/lib/chatpdf/index`

use crate::{error::ConfigError, types::*, Config, Result};
use std::env;
use std::path::PathBuf;
use tracing::warn;

const PREFIX: &str = "CHATPDF_";

/// Parse configuration from environment variables
///
/// Returns `None` when no `CHATPDF_` variable is set. Variables that fail to
/// parse are skipped with a warning.
pub fn from_env() -> Result<Option<Config>> {
    let env_vars: Vec<(String, String)> = env::vars()
        .filter(|(k, _)| k.starts_with(PREFIX))
        .collect();

    if env_vars.is_empty() {
        return Ok(None);
    }

    let mut config = Config::default();
    for (key, value) in env_vars {
        if let Err(e) = apply_env_var(&mut config, &key, &value) {
            warn!("Ignoring {}: {}", key, e);
        }
    }

    Ok(Some(config))
}

/// Apply a single environment variable to config
fn apply_env_var(config: &mut Config, key: &str, value: &str) -> Result<()> {
    let key = key.strip_prefix(PREFIX).unwrap_or(key);

    let (section, field) = match key.split_once('_') {
        Some((section, field)) if !field.is_empty() => {
            (section.to_lowercase(), field.to_lowercase())
        }
        _ => {
            return Err(ConfigError::EnvVarError {
                var: format!("{}{}", PREFIX, key),
                message: "Expected format: CHATPDF_<section>_<field>".to_string(),
            })
        }
    };

    match section.as_str() {
        "storage" => apply_storage_var(&mut config.storage, &field, value),
        "chunking" => apply_chunking_var(&mut config.chunking, &field, value),
        "embedding" => apply_embedding_var(&mut config.embedding, &field, value),
        "llm" => apply_llm_var(&mut config.llm, &field, value),
        "search" => apply_search_var(&mut config.search, &field, value),
        "api" => apply_api_var(&mut config.api, &field, value),
        _ => Err(ConfigError::EnvVarError {
            var: format!("{}{}", PREFIX, key),
            message: format!("Unknown section: {}", section),
        }),
    }
}

fn var_name(section: &str, field: &str) -> String {
    format!("{}{}_{}", PREFIX, section, field.to_uppercase())
}

fn unknown_field(section: &str, field: &str) -> ConfigError {
    ConfigError::EnvVarError {
        var: var_name(section, field),
        message: format!("Unknown field: {}", field),
    }
}

fn parse_number<T: std::str::FromStr>(section: &str, field: &str, value: &str) -> Result<T> {
    value.trim().parse().map_err(|_| ConfigError::EnvVarError {
        var: var_name(section, field),
        message: format!("Invalid number: {}", value),
    })
}

fn apply_storage_var(config: &mut StorageConfig, field: &str, value: &str) -> Result<()> {
    match field {
        "index_dir" => config.index_dir = PathBuf::from(value),
        "allow_untrusted_index" => {
            config.allow_untrusted_index = parse_bool("STORAGE", field, value)?
        }
        _ => return Err(unknown_field("STORAGE", field)),
    }
    Ok(())
}

fn apply_chunking_var(config: &mut ChunkingConfig, field: &str, value: &str) -> Result<()> {
    match field {
        "chunk_size" => config.chunk_size = parse_number("CHUNKING", field, value)?,
        "chunk_overlap" => config.chunk_overlap = parse_number("CHUNKING", field, value)?,
        "sizer" => {
            config.sizer = match value.to_lowercase().as_str() {
                "characters" | "chars" => ChunkSizer::Characters,
                "tokens" => ChunkSizer::Tokens,
                _ => {
                    return Err(ConfigError::invalid_enum(
                        "chunking.sizer",
                        value,
                        &["characters", "tokens"],
                    ))
                }
            };
        }
        _ => return Err(unknown_field("CHUNKING", field)),
    }
    Ok(())
}

fn apply_embedding_var(config: &mut EmbeddingConfig, field: &str, value: &str) -> Result<()> {
    match field {
        "model_name" => config.model_name = value.to_string(),
        "batch_size" => config.batch_size = parse_number("EMBEDDING", field, value)?,
        "timeout_secs" => config.timeout_secs = parse_number("EMBEDDING", field, value)?,
        _ => return Err(unknown_field("EMBEDDING", field)),
    }
    Ok(())
}

fn apply_llm_var(config: &mut LlmConfig, field: &str, value: &str) -> Result<()> {
    match field {
        "model" => config.model = value.to_string(),
        "temperature" => config.temperature = parse_number("LLM", field, value)?,
        "max_output_tokens" => {
            config.max_output_tokens = Some(parse_number("LLM", field, value)?)
        }
        "timeout_secs" => config.timeout_secs = parse_number("LLM", field, value)?,
        _ => return Err(unknown_field("LLM", field)),
    }
    Ok(())
}

fn apply_search_var(config: &mut SearchConfig, field: &str, value: &str) -> Result<()> {
    match field {
        "top_k" => config.top_k = parse_number("SEARCH", field, value)?,
        "metric" => {
            config.metric = match value.to_lowercase().as_str() {
                "l2" | "euclidean" => DistanceMetric::L2,
                "cosine" => DistanceMetric::Cosine,
                _ => {
                    return Err(ConfigError::invalid_enum(
                        "search.metric",
                        value,
                        &["l2", "cosine"],
                    ))
                }
            };
        }
        _ => return Err(unknown_field("SEARCH", field)),
    }
    Ok(())
}

fn apply_api_var(config: &mut ApiConfig, field: &str, value: &str) -> Result<()> {
    match field {
        "key_env" => config.key_env = value.to_string(),
        "base_url" => config.base_url = value.to_string(),
        _ => return Err(unknown_field("API", field)),
    }
    Ok(())
}

fn parse_bool(section: &str, field: &str, value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::EnvVarError {
            var: var_name(section, field),
            message: format!(
                "Invalid boolean: {} (use true/false, 1/0, yes/no, on/off)",
                value
            ),
        }),
    }
}
