//! Raw text extraction from PDF byte streams

use crate::error::{ChatPdfError, Result};
use crate::models::{ExtractedText, PdfDocument};
use lopdf::Document;
use tracing::{debug, info};

/// Extract the text of every page of every document, in upload then page order
///
/// Page texts are concatenated with no separator. A page whose text cannot be
/// read contributes nothing; a stream that is not a PDF aborts the batch.
pub fn extract_text(documents: &[PdfDocument]) -> Result<ExtractedText> {
    let mut extracted = ExtractedText::default();

    for document in documents {
        let pdf = Document::load_mem(&document.bytes).map_err(|e| ChatPdfError::DecodeError {
            document: document.name.clone(),
            message: e.to_string(),
        })?;

        let pages = pdf.get_pages();
        for page_number in pages.keys() {
            extracted.pages += 1;
            match pdf.extract_text(&[*page_number]) {
                Ok(text) if !text.trim().is_empty() => extracted.text.push_str(&text),
                Ok(_) => {
                    debug!("{}: page {} has no text layer", document.name, page_number);
                    extracted.empty_pages += 1;
                }
                Err(e) => {
                    debug!(
                        "{}: failed to extract page {}: {}",
                        document.name, page_number, e
                    );
                    extracted.empty_pages += 1;
                }
            }
        }

        extracted.documents += 1;
        debug!("{}: extracted {} pages", document.name, pages.len());
    }

    info!(
        "Extracted {} characters from {} documents ({} pages, {} empty)",
        extracted.text.chars().count(),
        extracted.documents,
        extracted.pages,
        extracted.empty_pages
    );

    Ok(extracted)
}
