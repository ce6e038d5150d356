//! Index storage configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Location and trust settings for the persisted vector index
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StorageConfig {
    /// Directory holding the serialized index and its manifest
    ///
    /// Replaced wholesale on every successful ingest. Shared by every
    /// process pointed at it; there is no locking.
    #[serde(default = "default_index_dir")]
    pub index_dir: PathBuf,

    /// Load index artifacts whose provenance cannot be verified
    ///
    /// Off by default: only indexes written by chatpdf itself (matching
    /// producer tag, format version and checksum) are accepted.
    #[serde(default)]
    pub allow_untrusted_index: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            index_dir: default_index_dir(),
            allow_untrusted_index: false,
        }
    }
}

impl crate::validation::Validate for StorageConfig {
    fn validate(&self) -> crate::error::Result<()> {
        use crate::error::ConfigError;

        if self.index_dir.as_os_str().is_empty() {
            return Err(ConfigError::ValidationError {
                field: "storage.index_dir".to_string(),
                message: "Index directory cannot be empty".to_string(),
            });
        }

        Ok(())
    }
}

fn default_index_dir() -> PathBuf {
    PathBuf::from("faiss_index")
}
