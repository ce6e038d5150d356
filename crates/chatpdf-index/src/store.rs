use crate::flat::VectorIndex;
use crate::manifest::Manifest;
use chatpdf_config::StorageConfig;
use chatpdf_core::{ChatPdfError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

const INDEX_FILE: &str = "index.bin";
const MANIFEST_FILE: &str = "manifest.json";

/// Which persisted indexes may be deserialized
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TrustPolicy {
    /// Reject anything whose manifest does not verify as written by this crate
    #[default]
    SelfProducedOnly,
    /// Load failed-provenance artifacts with a warning
    AllowUntrusted,
}

/// A persisted index directory holding `index.bin` and `manifest.json`
///
/// Saves go to a sibling staging directory that is renamed into place, so
/// readers never observe a partially written artifact.
#[derive(Debug, Clone)]
pub struct IndexStore {
    dir: PathBuf,
    trust: TrustPolicy,
}

impl IndexStore {
    pub fn new(dir: impl Into<PathBuf>, trust: TrustPolicy) -> Self {
        Self {
            dir: dir.into(),
            trust,
        }
    }

    pub fn from_config(config: &StorageConfig) -> Self {
        let trust = if config.allow_untrusted_index {
            TrustPolicy::AllowUntrusted
        } else {
            TrustPolicy::SelfProducedOnly
        };
        Self::new(config.index_dir.clone(), trust)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn trust(&self) -> TrustPolicy {
        self.trust
    }

    /// Replace the persisted index with `index`
    ///
    /// An existing directory is only replaced when it is empty or holds
    /// nothing but index files; anything else is left untouched.
    pub fn save(&self, index: &VectorIndex, embedding_model: &str) -> Result<Manifest> {
        self.recover_interrupted_swap()?;
        self.ensure_replaceable()?;

        let payload = bincode::serialize(index).map_err(ChatPdfError::unexpected)?;
        let manifest = Manifest::new(embedding_model, index.dimension(), index.len(), &payload);
        let manifest_json =
            serde_json::to_string_pretty(&manifest).map_err(ChatPdfError::unexpected)?;

        let parent = self.parent_dir();
        fs::create_dir_all(&parent)?;

        let staging = tempfile::Builder::new()
            .prefix(".chatpdf-")
            .tempdir_in(&parent)?;
        fs::write(staging.path().join(INDEX_FILE), &payload)?;
        fs::write(staging.path().join(MANIFEST_FILE), manifest_json)?;
        debug!("Staged index in {}", staging.path().display());

        self.swap_into_place(staging.path())?;

        info!(
            "Saved index with {} chunks ({} dims) to {}",
            manifest.chunk_count,
            manifest.dimension,
            self.dir.display()
        );
        Ok(manifest)
    }

    /// Load the persisted index, checking provenance and embedding model
    pub fn load(&self, expected_model: &str) -> Result<VectorIndex> {
        self.recover_interrupted_swap()?;
        let manifest = self.read_manifest()?.ok_or_else(|| ChatPdfError::IndexNotFound {
            path: self.dir.clone(),
        })?;

        let index_path = self.dir.join(INDEX_FILE);
        let payload = match fs::read(&index_path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ChatPdfError::IndexNotFound {
                    path: self.dir.clone(),
                })
            }
            Err(e) => return Err(e.into()),
        };

        let violations = manifest.provenance_violations(&payload);
        if !violations.is_empty() {
            let reason = violations.join(", ");
            match self.trust {
                TrustPolicy::SelfProducedOnly => {
                    return Err(ChatPdfError::UntrustedIndex {
                        path: self.dir.clone(),
                        reason,
                    })
                }
                TrustPolicy::AllowUntrusted => {
                    warn!(
                        "Loading index at {} despite failed provenance checks: {}",
                        self.dir.display(),
                        reason
                    );
                }
            }
        }

        if manifest.embedding_model != expected_model {
            return Err(ChatPdfError::IndexMismatch {
                path: self.dir.clone(),
                expected: expected_model.to_string(),
                found: manifest.embedding_model,
            });
        }

        let index: VectorIndex = bincode::deserialize(&payload).map_err(|e| {
            ChatPdfError::Unexpected(format!(
                "failed to decode index at {}: {}",
                index_path.display(),
                e
            ))
        })?;

        if index.dimension() != manifest.dimension || index.len() != manifest.chunk_count {
            return Err(ChatPdfError::Unexpected(format!(
                "index at {} does not match its manifest",
                self.dir.display()
            )));
        }

        info!(
            "Loaded index with {} chunks from {}",
            index.len(),
            self.dir.display()
        );
        Ok(index)
    }

    /// Manifest of the persisted index, or `None` when there is none
    pub fn status(&self) -> Result<Option<Manifest>> {
        self.recover_interrupted_swap()?;
        self.read_manifest()
    }

    fn read_manifest(&self) -> Result<Option<Manifest>> {
        let path = self.dir.join(MANIFEST_FILE);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        serde_json::from_str(&content)
            .map(Some)
            .map_err(|e| ChatPdfError::UntrustedIndex {
                path: self.dir.clone(),
                reason: format!("unreadable manifest: {}", e),
            })
    }

    fn parent_dir(&self) -> PathBuf {
        match self.dir.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }

    fn backup_dir(&self) -> PathBuf {
        let name = self
            .dir
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "index".to_string());
        self.parent_dir().join(format!(".{}.previous", name))
    }

    /// Put back the previous index when a save stopped between its two renames
    fn recover_interrupted_swap(&self) -> Result<()> {
        let backup = self.backup_dir();
        if self.dir.exists() || !backup.is_dir() {
            return Ok(());
        }
        warn!(
            "Restoring index from {} left by an interrupted save",
            backup.display()
        );
        fs::rename(&backup, &self.dir)?;
        Ok(())
    }

    fn ensure_replaceable(&self) -> Result<()> {
        let metadata = match fs::metadata(&self.dir) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(e.into()),
        };
        if !metadata.is_dir() {
            return Err(ChatPdfError::Unexpected(format!(
                "refusing to replace {}: not a directory",
                self.dir.display()
            )));
        }

        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            let name = entry.file_name();
            let known = name == INDEX_FILE || name == MANIFEST_FILE;
            if !known || !entry.file_type()?.is_file() {
                return Err(ChatPdfError::Unexpected(format!(
                    "refusing to replace {}: it contains '{}', which is not part of an index",
                    self.dir.display(),
                    name.to_string_lossy()
                )));
            }
        }
        Ok(())
    }

    fn swap_into_place(&self, staged: &Path) -> Result<()> {
        if !self.dir.exists() {
            fs::rename(staged, &self.dir)?;
            return Ok(());
        }

        let backup = self.backup_dir();
        if backup.exists() {
            fs::remove_dir_all(&backup)?;
        }
        fs::rename(&self.dir, &backup)?;

        if let Err(e) = fs::rename(staged, &self.dir) {
            if let Err(restore) = fs::rename(&backup, &self.dir) {
                warn!(
                    "Failed to restore previous index from {}: {}",
                    backup.display(),
                    restore
                );
            }
            return Err(e.into());
        }

        if let Err(e) = fs::remove_dir_all(&backup) {
            warn!("Failed to remove {}: {}", backup.display(), e);
        }
        Ok(())
    }
}
