use super::ui;
use anyhow::Result;
use chatpdf_config::Config;
use chatpdf_core::api::model_path;
use chatpdf_index::IndexStore;
use chatpdf_pipeline::IndexStatus;

pub fn handle_status(config: &Config) -> Result<()> {
    let status = IndexStatus::of(&IndexStore::from_config(&config.storage))?;
    print_status(&status, config);
    Ok(())
}

pub fn print_status(status: &IndexStatus, config: &Config) {
    ui::print_header("Index");
    ui::print_key_value("Location", &status.index_dir.display().to_string());

    let Some(manifest) = &status.manifest else {
        println!("No documents have been processed yet.");
        return;
    };

    ui::print_key_value("Chunks", &manifest.chunk_count.to_string());
    ui::print_key_value("Dimensions", &manifest.dimension.to_string());
    ui::print_key_value("Embedding model", &manifest.embedding_model);
    ui::print_key_value("Created (unix)", &manifest.created_at.to_string());
    ui::print_key_value("Producer", &manifest.producer);
    ui::print_key_value("Format version", &manifest.format_version.to_string());

    if manifest.embedding_model != model_path(&config.embedding.model_name) {
        ui::print_error(&format!(
            "Configured embedding model '{}' differs; re-process your documents before asking.",
            config.embedding.model_name
        ));
    }
}
