use super::ui;
use anyhow::{Context, Result};
use chatpdf_config::Config;
use chatpdf_core::PdfDocument;
use chatpdf_pipeline::{IngestReport, Pipeline};
use std::path::PathBuf;

pub fn handle_ingest(config: &Config, pdfs: &[PathBuf]) -> Result<()> {
    let pipeline = super::open_pipeline(config)?;
    ingest_files(&pipeline, pdfs)?;
    Ok(())
}

/// Read and ingest `pdfs`, showing progress; shared with the chat session
pub fn ingest_files(pipeline: &Pipeline, pdfs: &[PathBuf]) -> Result<IngestReport> {
    let documents = pdfs
        .iter()
        .map(|path| PdfDocument::from_path(path))
        .collect::<Result<Vec<_>, _>>()?;

    let spinner = ui::spinner("Processing...");
    let result = pipeline.ingest(&documents);
    spinner.finish_and_clear();

    let report = result.context("ingest failed")?;
    ui::print_success("Done");
    print_report(&report);
    Ok(report)
}

fn print_report(report: &IngestReport) {
    ui::print_key_value("Documents", &report.documents.to_string());
    if report.empty_pages > 0 {
        ui::print_key_value(
            "Pages",
            &format!("{} ({} without text)", report.pages, report.empty_pages),
        );
    } else {
        ui::print_key_value("Pages", &report.pages.to_string());
    }
    ui::print_key_value("Characters", &report.characters.to_string());
    ui::print_key_value("Chunks", &report.chunks.to_string());
    ui::print_key_value("Index", &report.index_dir.display().to_string());
}
