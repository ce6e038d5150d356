use crate::error::{ChatPdfError, Result};
use once_cell::sync::Lazy;
use tiktoken_rs::{cl100k_base, CoreBPE};

static TOKENIZER: Lazy<std::result::Result<CoreBPE, String>> =
    Lazy::new(|| cl100k_base().map_err(|e| e.to_string()));

/// Shared cl100k tokenizer, loaded on first use
pub fn tokenizer() -> Result<&'static CoreBPE> {
    TOKENIZER
        .as_ref()
        .map_err(|e| ChatPdfError::Unexpected(format!("failed to load tokenizer: {}", e)))
}

/// Count exact tokens using tiktoken (GPT-compatible)
pub fn count_tokens(text: &str) -> Result<usize> {
    Ok(tokenizer()?.encode_with_special_tokens(text).len())
}
