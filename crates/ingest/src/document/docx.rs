use docsplit_core::Metadata;
use docx_rs::{DocumentChild, ParagraphChild, RunChild};

use super::{ExtractedText, ExtractionError};

/// Paragraph texts in document order. Empty paragraphs are kept as blank lines.
fn paragraphs(docx: &docx_rs::Docx) -> Vec<String> {
    docx.document
        .children
        .iter()
        .filter_map(|child| match child {
            DocumentChild::Paragraph(para) => Some(para),
            _ => None,
        })
        .map(|para| {
            let mut text = String::new();
            for child in &para.children {
                if let ParagraphChild::Run(run) = child {
                    for run_child in &run.children {
                        if let RunChild::Text(t) = run_child {
                            text.push_str(&t.text);
                        }
                    }
                }
            }
            text
        })
        .collect()
}

pub fn extract_docx(bytes: &[u8]) -> Result<ExtractedText, ExtractionError> {
    let docx =
        docx_rs::read_docx(bytes).map_err(|e| ExtractionError::DocxError(e.to_string()))?;
    let paragraphs = paragraphs(&docx);

    let mut metadata = Metadata::new();
    metadata.insert("type".into(), "docx".into());
    metadata.insert("paragraphs".into(), paragraphs.len().into());

    Ok(ExtractedText {
        text: paragraphs.join("\n"),
        metadata,
    })
}
