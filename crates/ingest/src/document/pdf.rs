use docsplit_core::Metadata;

use super::{ExtractedText, ExtractionError};

/// Split pdf-extract output into pages on form feeds, dropping blank pages.
fn split_pages(text: &str) -> Vec<&str> {
    text.split('\x0C')
        .map(str::trim)
        .filter(|page| !page.is_empty())
        .collect()
}

pub fn extract_pdf(bytes: &[u8]) -> Result<ExtractedText, ExtractionError> {
    let raw = pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| ExtractionError::PdfError(e.to_string()))?;

    let pages = split_pages(&raw);
    if pages.is_empty() {
        // Scanned/image-only PDFs extract to nothing.
        tracing::warn!("PDF contains no extractable text");
    }

    let mut metadata = Metadata::new();
    metadata.insert("type".into(), "pdf".into());
    metadata.insert("num_pages".into(), pages.len().into());

    let mut text = pages.join("\n");
    if !text.is_empty() {
        text.push('\n');
    }
    Ok(ExtractedText { text, metadata })
}
