use docsplit_core::Metadata;

use super::{ExtractedText, ExtractionError};

/// Decode bytes as UTF-8, falling back to lossy conversion.
pub(super) fn decode(bytes: &[u8]) -> (String, bool) {
    match String::from_utf8(bytes.to_vec()) {
        Ok(text) => (text, false),
        Err(_) => (String::from_utf8_lossy(bytes).into_owned(), true),
    }
}

pub fn extract_txt(bytes: &[u8]) -> Result<ExtractedText, ExtractionError> {
    let (text, lossy) = decode(bytes);
    let mut metadata = Metadata::new();
    metadata.insert("type".into(), "txt".into());
    if lossy {
        tracing::warn!("text is not valid UTF-8, invalid sequences replaced");
        metadata.insert("lossy_utf8".into(), true.into());
    }
    Ok(ExtractedText { text, metadata })
}
