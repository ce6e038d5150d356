//! Configuration merging logic
//!
//! Merges configurations from multiple sources with proper precedence.

use crate::{types::*, Config};

/// Merge two configurations, with `overlay` taking precedence
///
/// Fields of `overlay` that differ from their default override `base`.
pub fn merge(mut base: Config, overlay: Config) -> Config {
    base.storage = merge_storage(base.storage, overlay.storage);
    base.chunking = merge_chunking(base.chunking, overlay.chunking);
    base.embedding = merge_embedding(base.embedding, overlay.embedding);
    base.llm = merge_llm(base.llm, overlay.llm);
    base.search = merge_search(base.search, overlay.search);
    base.api = merge_api(base.api, overlay.api);

    base
}

/// Pick `overlay` when it was explicitly set (differs from `default`)
fn pick<T: PartialEq>(base: T, overlay: T, default: &T) -> T {
    if overlay != *default {
        overlay
    } else {
        base
    }
}

fn pick_f32(base: f32, overlay: f32, default: f32) -> f32 {
    if (overlay - default).abs() > 0.001 {
        overlay
    } else {
        base
    }
}

fn merge_storage(base: StorageConfig, overlay: StorageConfig) -> StorageConfig {
    let default = StorageConfig::default();
    StorageConfig {
        index_dir: pick(base.index_dir, overlay.index_dir, &default.index_dir),
        allow_untrusted_index: pick(
            base.allow_untrusted_index,
            overlay.allow_untrusted_index,
            &default.allow_untrusted_index,
        ),
    }
}

fn merge_chunking(base: ChunkingConfig, overlay: ChunkingConfig) -> ChunkingConfig {
    let default = ChunkingConfig::default();
    ChunkingConfig {
        chunk_size: pick(base.chunk_size, overlay.chunk_size, &default.chunk_size),
        chunk_overlap: pick(
            base.chunk_overlap,
            overlay.chunk_overlap,
            &default.chunk_overlap,
        ),
        sizer: pick(base.sizer, overlay.sizer, &default.sizer),
    }
}

fn merge_embedding(base: EmbeddingConfig, overlay: EmbeddingConfig) -> EmbeddingConfig {
    let default = EmbeddingConfig::default();
    EmbeddingConfig {
        model_name: pick(base.model_name, overlay.model_name, &default.model_name),
        batch_size: pick(base.batch_size, overlay.batch_size, &default.batch_size),
        timeout_secs: pick(base.timeout_secs, overlay.timeout_secs, &default.timeout_secs),
    }
}

fn merge_llm(base: LlmConfig, overlay: LlmConfig) -> LlmConfig {
    let default = LlmConfig::default();
    LlmConfig {
        model: pick(base.model, overlay.model, &default.model),
        temperature: pick_f32(base.temperature, overlay.temperature, default.temperature),
        max_output_tokens: overlay.max_output_tokens.or(base.max_output_tokens),
        timeout_secs: pick(base.timeout_secs, overlay.timeout_secs, &default.timeout_secs),
    }
}

fn merge_search(base: SearchConfig, overlay: SearchConfig) -> SearchConfig {
    let default = SearchConfig::default();
    SearchConfig {
        top_k: pick(base.top_k, overlay.top_k, &default.top_k),
        metric: pick(base.metric, overlay.metric, &default.metric),
    }
}

fn merge_api(base: ApiConfig, overlay: ApiConfig) -> ApiConfig {
    let default = ApiConfig::default();
    ApiConfig {
        key_env: pick(base.key_env, overlay.key_env, &default.key_env),
        base_url: pick(base.base_url, overlay.base_url, &default.base_url),
    }
}
