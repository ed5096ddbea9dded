//! Human-readable and JSON reports of a document's chunks.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use docsplit_core::{DocsplitError, DocumentChunk, FieldValue};

const RULE_WIDTH: usize = 50;

/// Size statistics over a chunk sequence, in characters.
#[derive(Debug, Clone, PartialEq)]
pub struct ChunkStats {
    pub count: usize,
    pub min_size: usize,
    pub max_size: usize,
    pub mean_size: f64,
}

impl ChunkStats {
    /// `None` when there are no chunks.
    pub fn from_chunks(chunks: &[DocumentChunk]) -> Option<Self> {
        let sizes: Vec<usize> = chunks.iter().map(DocumentChunk::char_len).collect();
        let min_size = *sizes.iter().min()?;
        let max_size = *sizes.iter().max()?;
        let total: usize = sizes.iter().sum();
        Some(Self {
            count: sizes.len(),
            min_size,
            max_size,
            mean_size: total as f64 / sizes.len() as f64,
        })
    }
}

fn source_of(chunks: &[DocumentChunk]) -> &str {
    chunks
        .first()
        .and_then(|c| c.metadata.get("source"))
        .and_then(FieldValue::as_str)
        .unwrap_or("unknown")
}

/// Write the chunk analysis: header, size statistics, then every chunk.
pub fn write_text_report<W: Write>(chunks: &[DocumentChunk], mut out: W) -> io::Result<()> {
    let rule = "-".repeat(RULE_WIDTH);

    writeln!(out, "Chunk analysis")?;
    writeln!(out, "Total chunks: {}", chunks.len())?;
    writeln!(out, "Source document: {}", source_of(chunks))?;
    writeln!(out)?;

    if let Some(stats) = ChunkStats::from_chunks(chunks) {
        writeln!(out, "Min chunk size: {} chars", stats.min_size)?;
        writeln!(out, "Max chunk size: {} chars", stats.max_size)?;
        writeln!(out, "Mean chunk size: {:.2} chars", stats.mean_size)?;
        writeln!(out)?;
    }

    for chunk in chunks {
        writeln!(out)?;
        writeln!(out, "Chunk {}/{}", chunk.chunk_index + 1, chunks.len())?;
        writeln!(out, "Size: {} chars", chunk.char_len())?;
        writeln!(out, "Content:")?;
        writeln!(out, "{rule}")?;
        writeln!(out, "{}", chunk.content)?;
        writeln!(out, "{rule}")?;
    }
    out.flush()
}

fn create_parent(path: &Path) -> io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent),
        _ => Ok(()),
    }
}

/// Save the text report to `path`, creating parent directories.
pub fn save_text_report(chunks: &[DocumentChunk], path: impl AsRef<Path>) -> Result<(), DocsplitError> {
    let path = path.as_ref();
    create_parent(path)?;
    write_text_report(chunks, BufWriter::new(File::create(path)?))?;
    tracing::info!(path = %path.display(), chunks = chunks.len(), "text report saved");
    Ok(())
}

/// Save the chunks as a pretty-printed JSON array.
pub fn save_json_report(chunks: &[DocumentChunk], path: impl AsRef<Path>) -> Result<(), DocsplitError> {
    let path = path.as_ref();
    create_parent(path)?;
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, chunks)?;
    writer.flush()?;
    tracing::info!(path = %path.display(), chunks = chunks.len(), "json report saved");
    Ok(())
}
