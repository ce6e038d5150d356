use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::time::{SystemTime, UNIX_EPOCH};

/// Tag written by this crate into every manifest it produces
pub const PRODUCER: &str = "chatpdf";

/// Layout version of `index.bin`
pub const FORMAT_VERSION: u32 = 1;

/// Metadata stored next to a serialized index
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    pub format_version: u32,
    pub producer: String,
    pub embedding_model: String,
    pub dimension: usize,
    pub chunk_count: usize,
    /// Unix seconds
    pub created_at: u64,
    /// Hex SHA-256 of `index.bin`
    pub checksum: String,
}

impl Manifest {
    pub fn new(embedding_model: &str, dimension: usize, chunk_count: usize, payload: &[u8]) -> Self {
        Self {
            format_version: FORMAT_VERSION,
            producer: PRODUCER.to_string(),
            embedding_model: embedding_model.to_string(),
            dimension,
            chunk_count,
            created_at: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0),
            checksum: checksum(payload),
        }
    }

    /// Provenance problems with this manifest and its payload, if any
    pub fn provenance_violations(&self, payload: &[u8]) -> Vec<String> {
        let mut violations = Vec::new();
        if self.producer != PRODUCER {
            violations.push(format!("unknown producer '{}'", self.producer));
        }
        if self.format_version != FORMAT_VERSION {
            violations.push(format!(
                "format version {} (expected {})",
                self.format_version, FORMAT_VERSION
            ));
        }
        if self.checksum != checksum(payload) {
            violations.push("checksum mismatch".to_string());
        }
        violations
    }
}

pub fn checksum(payload: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(payload);
    hex::encode(hasher.finalize())
}
