use docsplit_core::Metadata;

use super::txt::decode;
use super::{ExtractedText, ExtractionError};

/// Heading titles (lines starting with `#`), in document order.
fn headings(text: &str) -> Vec<String> {
    text.lines()
        .filter(|line| line.starts_with('#'))
        .map(|line| line.trim_start_matches('#').trim().to_string())
        .filter(|h| !h.is_empty())
        .collect()
}

pub fn extract_md(bytes: &[u8]) -> Result<ExtractedText, ExtractionError> {
    let (text, _) = decode(bytes);
    let headings = headings(&text);

    let mut metadata = Metadata::new();
    metadata.insert("type".into(), "md".into());
    metadata.insert("headings".into(), headings.len().into());
    if let Some(title) = headings.first() {
        metadata.insert("title".into(), title.clone().into());
    }
    Ok(ExtractedText { text, metadata })
}

#[cfg(test)]
mod tests {
    use super::*;
    use docsplit_core::FieldValue;

    #[test]
    fn extract_headings() {
        let content = b"# Title\n\nSome text.\n\n## Section 1\n\nMore text.\n\n### Subsection\n";
        let out = extract_md(content).unwrap();
        assert_eq!(headings(&out.text), vec!["Title", "Section 1", "Subsection"]);
        assert_eq!(out.metadata.get("headings"), Some(&FieldValue::Integer(3)));
        assert_eq!(out.metadata.get("title"), Some(&FieldValue::from("Title")));
    }

    #[test]
    fn preserves_full_content() {
        let content = b"# Hello\n\nParagraph one.\n\n## World\n\nParagraph two.";
        let out = extract_md(content).unwrap();
        assert!(out.text.contains("Paragraph one."));
        assert!(out.text.contains("## World"));
    }

    #[test]
    fn no_headings() {
        let out = extract_md(b"Just plain text without any headings.").unwrap();
        assert_eq!(out.metadata.get("headings"), Some(&FieldValue::Integer(0)));
        assert!(out.metadata.get("title").is_none());
    }
}
