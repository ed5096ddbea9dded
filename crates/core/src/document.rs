use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier assigned to a source document when it is loaded.
pub type DocId = Uuid;

/// Identifier of a single chunk.
pub type ChunkId = Uuid;

/// Insertion-ordered metadata map carried by documents and chunks.
pub type Metadata = IndexMap<String, FieldValue>;

/// Scalar metadata values. Serialized untagged so JSON shows plain scalars.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum FieldValue {
    Boolean(bool),
    Integer(i64),
    Text(String),
    Null,
}

impl FieldValue {
    /// Extract as string, returning None for non-text values.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(n) => Some(*n),
            _ => None,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        FieldValue::Integer(n)
    }
}

impl From<usize> for FieldValue {
    fn from(n: usize) -> Self {
        FieldValue::Integer(i64::try_from(n).unwrap_or(i64::MAX))
    }
}

impl From<u64> for FieldValue {
    fn from(n: u64) -> Self {
        FieldValue::Integer(i64::try_from(n).unwrap_or(i64::MAX))
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Boolean(b)
    }
}

/// A loaded document: raw text plus metadata describing where it came from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceDocument {
    pub doc_id: DocId,
    pub content: String,
    pub metadata: Metadata,
    pub created_at: DateTime<Utc>,
}

impl SourceDocument {
    /// Create a document with a freshly generated id.
    pub fn new(content: impl Into<String>, metadata: Metadata) -> Self {
        Self {
            doc_id: Uuid::new_v4(),
            content: content.into(),
            metadata,
            created_at: Utc::now(),
        }
    }

    /// Value of the `filename` metadata key, if present.
    pub fn filename(&self) -> Option<&str> {
        self.metadata.get("filename").and_then(FieldValue::as_str)
    }
}

/// A bounded piece of a [`SourceDocument`], ready for embedding and storage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentChunk {
    pub chunk_id: ChunkId,
    /// 0-based position among the chunks of the parent document.
    pub chunk_index: usize,
    /// Back-reference to the parent document (lookup only).
    pub parent_doc_id: DocId,
    pub content: String,
    pub metadata: Metadata,
    pub created_at: DateTime<Utc>,
}

impl DocumentChunk {
    /// Value of the `total_chunks` metadata key.
    pub fn total_chunks(&self) -> Option<usize> {
        self.metadata
            .get("total_chunks")
            .and_then(FieldValue::as_i64)
            .and_then(|n| usize::try_from(n).ok())
    }

    /// Chunk length in characters.
    pub fn char_len(&self) -> usize {
        self.content.chars().count()
    }
}
