use chatpdf_core::Result;
use chatpdf_index::{IndexStore, Manifest};
use serde::Serialize;
use std::path::PathBuf;

/// Summary of a successful ingest
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IngestReport {
    pub documents: usize,
    pub pages: usize,
    pub empty_pages: usize,
    pub characters: usize,
    pub chunks: usize,
    pub dimension: usize,
    pub embedding_model: String,
    pub index_dir: PathBuf,
}

/// What is currently persisted at the configured index location
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexStatus {
    pub index_dir: PathBuf,
    pub manifest: Option<Manifest>,
}

impl IndexStatus {
    pub fn of(store: &IndexStore) -> Result<Self> {
        Ok(Self {
            index_dir: store.dir().to_path_buf(),
            manifest: store.status()?,
        })
    }

    pub fn exists(&self) -> bool {
        self.manifest.is_some()
    }
}
