//! Turns segmented text into [`DocumentChunk`] records.

use chrono::Utc;
use docsplit_core::{DocumentChunk, FieldValue, SourceDocument};
use uuid::Uuid;

use super::segmenter::split_text;
use super::types::ChunkConfig;

/// Split `document` and wrap every piece with positional metadata.
///
/// Each chunk's metadata is a copy of the parent's plus `chunk_index`,
/// `total_chunks`, `chunk_size` (chars) and `original_document_id`. The parent
/// is only read.
pub fn create_chunks(document: &SourceDocument, config: &ChunkConfig) -> Vec<DocumentChunk> {
    let pieces = split_text(&document.content, config);
    let total = pieces.len();
    let created_at = Utc::now();

    let chunks: Vec<DocumentChunk> = pieces
        .into_iter()
        .enumerate()
        .map(|(idx, content)| {
            let mut metadata = document.metadata.clone();
            metadata.insert("chunk_index".to_string(), idx.into());
            metadata.insert("total_chunks".to_string(), total.into());
            metadata.insert("chunk_size".to_string(), content.chars().count().into());
            metadata.insert(
                "original_document_id".to_string(),
                FieldValue::Text(document.doc_id.to_string()),
            );
            DocumentChunk {
                chunk_id: Uuid::new_v4(),
                chunk_index: idx,
                parent_doc_id: document.doc_id,
                content,
                metadata,
                created_at,
            }
        })
        .collect();

    tracing::debug!(
        doc_id = %document.doc_id,
        filename = document.filename().unwrap_or("unknown"),
        chunks = chunks.len(),
        "created chunks"
    );
    chunks
}
