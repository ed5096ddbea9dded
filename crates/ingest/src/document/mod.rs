//! Document loading: read a file from disk into a [`SourceDocument`].
//!
//! Dispatch is by extension: plain text, markdown, PDF and Word (.docx) are
//! supported.

mod docx;
mod md;
mod pdf;
mod txt;

use std::fs;
use std::path::{Path, PathBuf};

use docsplit_core::{FieldValue, Metadata, SourceDocument};
use thiserror::Error;
use tracing::{info, warn};
use walkdir::WalkDir;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Unsupported file type: {0}")]
    UnsupportedType(String),
    #[error("Not a file or directory: {}", .0.display())]
    NotFound(PathBuf),
    #[error("PDF extraction failed: {0}")]
    PdfError(String),
    #[error("DOCX extraction failed: {0}")]
    DocxError(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Directory walk failed: {0}")]
    Walk(#[from] walkdir::Error),
}

/// Extensions (lower-case, without the dot) that [`load_file`] accepts.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["txt", "text", "md", "markdown", "pdf", "docx"];

/// Text extracted from a file plus format-specific metadata.
#[derive(Debug, Clone, Default)]
pub struct ExtractedText {
    pub text: String,
    pub metadata: Metadata,
}

fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}

pub fn is_supported(path: &Path) -> bool {
    SUPPORTED_EXTENSIONS.contains(&extension_of(path).as_str())
}

/// Extract text from file bytes based on the file name's extension.
pub fn extract_text(bytes: &[u8], filename: &str) -> Result<ExtractedText, ExtractionError> {
    let ext = extension_of(Path::new(filename));

    match ext.as_str() {
        "pdf" => pdf::extract_pdf(bytes),
        "docx" => docx::extract_docx(bytes),
        "txt" | "text" => txt::extract_txt(bytes),
        "md" | "markdown" => md::extract_md(bytes),
        other => Err(ExtractionError::UnsupportedType(other.to_string())),
    }
}

/// Metadata every loaded document carries.
fn base_metadata(path: &Path, size_bytes: u64) -> Metadata {
    let mut meta = Metadata::new();
    meta.insert("source".into(), path.display().to_string().into());
    meta.insert(
        "filename".into(),
        path.file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
            .into(),
    );
    let ext = extension_of(path);
    let ext = if ext.is_empty() { ext } else { format!(".{ext}") };
    meta.insert("extension".into(), FieldValue::Text(ext));
    meta.insert("size_bytes".into(), size_bytes.into());
    meta
}

/// Load one file into a [`SourceDocument`] with a fresh id.
pub fn load_file(path: impl AsRef<Path>) -> Result<SourceDocument, ExtractionError> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(ExtractionError::NotFound(path.to_path_buf()));
    }
    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    if !is_supported(path) {
        return Err(ExtractionError::UnsupportedType(extension_of(path)));
    }

    info!(path = %path.display(), "reading document");
    let bytes = fs::read(path)?;
    let extracted = extract_text(&bytes, &filename)?;

    let mut metadata = base_metadata(path, bytes.len() as u64);
    metadata.extend(extracted.metadata);

    let doc = SourceDocument::new(extracted.text, metadata);
    info!(path = %path.display(), doc_id = %doc.doc_id, chars = doc.content.chars().count(), "document loaded");
    Ok(doc)
}

/// Load every supported file in `dir`, sorted by file name.
///
/// Unsupported files and files that fail to load are logged and skipped. Only
/// the top level is read unless `recursive` is set.
pub fn load_directory(
    dir: impl AsRef<Path>,
    recursive: bool,
) -> Result<Vec<SourceDocument>, ExtractionError> {
    let dir = dir.as_ref();
    if !dir.is_dir() {
        return Err(ExtractionError::NotFound(dir.to_path_buf()));
    }

    let max_depth = if recursive { usize::MAX } else { 1 };
    let mut documents = Vec::new();

    for entry in WalkDir::new(dir).max_depth(max_depth).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if !is_supported(path) {
            warn!(
                path = %path.display(),
                supported = ?SUPPORTED_EXTENSIONS,
                "skipping unsupported file type"
            );
            continue;
        }
        match load_file(path) {
            Ok(doc) => documents.push(doc),
            Err(e) => warn!(path = %path.display(), error = %e, "failed to load document, skipping"),
        }
    }

    info!(dir = %dir.display(), count = documents.len(), "loaded documents");
    Ok(documents)
}
