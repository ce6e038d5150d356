use anyhow::Result;
use chatpdf_config::DistanceMetric;
use chatpdf_core::ChatPdfError;
use chatpdf_index::{IndexStore, Manifest, TrustPolicy, VectorIndex};
use std::fs;
use tempfile::tempdir;

const MODEL: &str = "models/embedding-001";

fn sample_index() -> Result<VectorIndex> {
    Ok(VectorIndex::build(vec![
        ("The capital of France is Paris.".to_string(), vec![1.0, 0.0, 0.0]),
        ("Rivers flow into the sea.".to_string(), vec![0.0, 1.0, 0.0]),
    ])?)
}

fn read_manifest(dir: &std::path::Path) -> Result<Manifest> {
    Ok(serde_json::from_str(&fs::read_to_string(dir.join("manifest.json"))?)?)
}

fn write_manifest(dir: &std::path::Path, manifest: &Manifest) -> Result<()> {
    fs::write(dir.join("manifest.json"), serde_json::to_string(manifest)?)?;
    Ok(())
}

#[test]
fn test_save_then_load() -> Result<()> {
    let tmp = tempdir()?;
    let store = IndexStore::new(tmp.path().join("faiss_index"), TrustPolicy::default());

    let manifest = store.save(&sample_index()?, MODEL)?;
    assert_eq!(manifest.chunk_count, 2);
    assert_eq!(manifest.dimension, 3);
    assert_eq!(manifest.embedding_model, MODEL);

    let index = store.load(MODEL)?;
    assert_eq!(index, sample_index()?);

    let hits = index.search(&[0.9, 0.1, 0.0], 4, DistanceMetric::L2)?;
    assert_eq!(hits[0].text, "The capital of France is Paris.");
    Ok(())
}

#[test]
fn test_missing_index_is_not_found() -> Result<()> {
    let tmp = tempdir()?;
    let store = IndexStore::new(tmp.path().join("faiss_index"), TrustPolicy::default());

    match store.load(MODEL) {
        Err(ChatPdfError::IndexNotFound { path }) => assert_eq!(path, store.dir()),
        other => panic!("expected IndexNotFound, got {:?}", other),
    }
    assert!(store.status()?.is_none());
    Ok(())
}

#[test]
fn test_missing_payload_is_not_found() -> Result<()> {
    let tmp = tempdir()?;
    let store = IndexStore::new(tmp.path().join("faiss_index"), TrustPolicy::default());
    store.save(&sample_index()?, MODEL)?;
    fs::remove_file(store.dir().join("index.bin"))?;

    assert!(matches!(
        store.load(MODEL),
        Err(ChatPdfError::IndexNotFound { .. })
    ));
    Ok(())
}

#[test]
fn test_save_replaces_previous_index() -> Result<()> {
    let tmp = tempdir()?;
    let store = IndexStore::new(tmp.path().join("faiss_index"), TrustPolicy::default());
    store.save(&sample_index()?, MODEL)?;

    let replacement = VectorIndex::build(vec![("Only chunk".to_string(), vec![0.5, 0.5])])?;
    store.save(&replacement, MODEL)?;

    let loaded = store.load(MODEL)?;
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded.dimension(), 2);

    // Only the index directory itself remains; no staging or backup leftovers
    let entries: Vec<_> = fs::read_dir(tmp.path())?.collect::<std::io::Result<_>>()?;
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].file_name(), "faiss_index");
    Ok(())
}

#[test]
fn test_tampered_payload_rejected_by_default() -> Result<()> {
    let tmp = tempdir()?;
    let store = IndexStore::new(tmp.path().join("faiss_index"), TrustPolicy::SelfProducedOnly);
    store.save(&sample_index()?, MODEL)?;

    let other = VectorIndex::build(vec![("injected".to_string(), vec![1.0, 1.0, 1.0])])?;
    fs::write(store.dir().join("index.bin"), bincode::serialize(&other)?)?;

    match store.load(MODEL) {
        Err(ChatPdfError::UntrustedIndex { reason, .. }) => assert!(reason.contains("checksum")),
        other => panic!("expected UntrustedIndex, got {:?}", other),
    }
    Ok(())
}

#[test]
fn test_foreign_producer_rejected_by_default() -> Result<()> {
    let tmp = tempdir()?;
    let store = IndexStore::new(tmp.path().join("faiss_index"), TrustPolicy::default());
    store.save(&sample_index()?, MODEL)?;

    let mut manifest = read_manifest(store.dir())?;
    manifest.producer = "langchain".to_string();
    write_manifest(store.dir(), &manifest)?;

    let err = store.load(MODEL).unwrap_err();
    assert_eq!(err.kind(), "UntrustedIndex");
    Ok(())
}

#[test]
fn test_allow_untrusted_loads_with_warning() -> Result<()> {
    let tmp = tempdir()?;
    let dir = tmp.path().join("faiss_index");
    IndexStore::new(&dir, TrustPolicy::default()).save(&sample_index()?, MODEL)?;

    let mut manifest = read_manifest(&dir)?;
    manifest.producer = "langchain".to_string();
    manifest.checksum = "0".repeat(64);
    write_manifest(&dir, &manifest)?;

    let index = IndexStore::new(&dir, TrustPolicy::AllowUntrusted).load(MODEL)?;
    assert_eq!(index.len(), 2);
    Ok(())
}

#[test]
fn test_unreadable_manifest_untrusted() -> Result<()> {
    let tmp = tempdir()?;
    let store = IndexStore::new(tmp.path().join("faiss_index"), TrustPolicy::default());
    store.save(&sample_index()?, MODEL)?;
    fs::write(store.dir().join("manifest.json"), "{ not json")?;

    assert_eq!(store.load(MODEL).unwrap_err().kind(), "UntrustedIndex");
    Ok(())
}

#[test]
fn test_other_embedding_model_rejected() -> Result<()> {
    let tmp = tempdir()?;
    let store = IndexStore::new(tmp.path().join("faiss_index"), TrustPolicy::default());
    store.save(&sample_index()?, MODEL)?;

    match store.load("models/text-embedding-004") {
        Err(ChatPdfError::IndexMismatch { expected, found, .. }) => {
            assert_eq!(expected, "models/text-embedding-004");
            assert_eq!(found, MODEL);
        }
        other => panic!("expected IndexMismatch, got {:?}", other),
    }
    Ok(())
}

#[test]
fn test_status_reports_manifest() -> Result<()> {
    let tmp = tempdir()?;
    let store = IndexStore::new(tmp.path().join("nested").join("faiss_index"), TrustPolicy::default());
    store.save(&sample_index()?, MODEL)?;

    let manifest = store.status()?.expect("manifest");
    assert_eq!(manifest.chunk_count, 2);
    assert_eq!(manifest.producer, "chatpdf");
    Ok(())
}

#[test]
fn test_save_refuses_directory_with_other_files() -> Result<()> {
    let tmp = tempdir()?;
    let dir = tmp.path().join("notes");
    fs::create_dir_all(&dir)?;
    fs::write(dir.join("thesis.txt"), "chapter one")?;

    let store = IndexStore::new(&dir, TrustPolicy::default());
    let err = store.save(&sample_index()?, MODEL).unwrap_err();
    assert_eq!(err.kind(), "UnexpectedError");
    assert!(err.to_string().contains("thesis.txt"));

    assert_eq!(fs::read_to_string(dir.join("thesis.txt"))?, "chapter one");
    assert!(!dir.join("index.bin").exists());
    let leftovers: Vec<_> = fs::read_dir(tmp.path())?.collect::<std::io::Result<_>>()?;
    assert_eq!(leftovers.len(), 1);
    Ok(())
}

#[test]
fn test_save_refuses_plain_file() -> Result<()> {
    let tmp = tempdir()?;
    let path = tmp.path().join("faiss_index");
    fs::write(&path, "not a directory")?;

    let store = IndexStore::new(&path, TrustPolicy::default());
    assert!(store.save(&sample_index()?, MODEL).is_err());
    assert_eq!(fs::read_to_string(&path)?, "not a directory");
    Ok(())
}

#[test]
fn test_save_into_existing_empty_directory() -> Result<()> {
    let tmp = tempdir()?;
    let dir = tmp.path().join("faiss_index");
    fs::create_dir_all(&dir)?;

    let store = IndexStore::new(&dir, TrustPolicy::default());
    store.save(&sample_index()?, MODEL)?;
    assert_eq!(store.load(MODEL)?.len(), 2);
    Ok(())
}

#[test]
fn test_save_replaces_untrusted_index() -> Result<()> {
    let tmp = tempdir()?;
    let store = IndexStore::new(tmp.path().join("faiss_index"), TrustPolicy::default());
    store.save(&sample_index()?, MODEL)?;
    fs::write(store.dir().join("manifest.json"), "{ not json")?;

    let replacement = VectorIndex::build(vec![("Only chunk".to_string(), vec![0.5, 0.5])])?;
    store.save(&replacement, MODEL)?;
    assert_eq!(store.load(MODEL)?.len(), 1);
    Ok(())
}

#[test]
fn test_interrupted_swap_restores_previous_index() -> Result<()> {
    let tmp = tempdir()?;
    let store = IndexStore::new(tmp.path().join("faiss_index"), TrustPolicy::default());
    store.save(&sample_index()?, MODEL)?;

    // State after the first rename of a save: only the backup is present
    fs::rename(store.dir(), tmp.path().join(".faiss_index.previous"))?;

    assert_eq!(store.status()?.map(|m| m.chunk_count), Some(2));
    assert_eq!(store.load(MODEL)?, sample_index()?);
    assert!(!tmp.path().join(".faiss_index.previous").exists());
    Ok(())
}

#[test]
fn test_save_after_interrupted_swap() -> Result<()> {
    let tmp = tempdir()?;
    let store = IndexStore::new(tmp.path().join("faiss_index"), TrustPolicy::default());
    store.save(&sample_index()?, MODEL)?;
    fs::rename(store.dir(), tmp.path().join(".faiss_index.previous"))?;

    let replacement = VectorIndex::build(vec![("Only chunk".to_string(), vec![0.5, 0.5])])?;
    store.save(&replacement, MODEL)?;

    assert_eq!(store.load(MODEL)?.len(), 1);
    let entries: Vec<_> = fs::read_dir(tmp.path())?.collect::<std::io::Result<_>>()?;
    assert_eq!(entries.len(), 1);
    Ok(())
}
