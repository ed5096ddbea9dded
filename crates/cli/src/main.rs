mod cli;

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use rayon::prelude::*;
use tracing::{info, warn};

use docsplit_core::{config, Config, FieldValue, SourceDocument};
use docsplit_ingest::report::{save_json_report, save_text_report};
use docsplit_ingest::{create_chunks, load_directory, ChunkConfig};

use crate::cli::{CliArgs, ReportFormat};

/// Report stem for a document: its path under `docs_dir` with separators
/// replaced by `__`, or the bare file name outside it.
fn report_stem(docs_dir: &Path, doc: &SourceDocument) -> String {
    let filename = doc.filename().unwrap_or("unknown");
    doc.metadata
        .get("source")
        .and_then(FieldValue::as_str)
        .and_then(|source| Path::new(source).strip_prefix(docs_dir).ok())
        .map(|rel| {
            rel.components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect::<Vec<_>>()
                .join("__")
        })
        .filter(|stem| !stem.is_empty())
        .unwrap_or_else(|| filename.to_string())
}

/// One distinct report path per document, in input order.
///
/// A stem already taken gets the document id appended.
fn report_paths(
    documents: &[SourceDocument],
    docs_dir: &Path,
    results_dir: &Path,
    format: ReportFormat,
) -> Vec<PathBuf> {
    let mut taken = HashSet::new();
    documents
        .iter()
        .map(|doc| {
            let stem = report_stem(docs_dir, doc);
            let mut path = results_dir.join(format!("chunks_{stem}.{}", format.extension()));
            if !taken.insert(path.clone()) {
                path = results_dir.join(format!("chunks_{stem}_{}.{}", doc.doc_id, format.extension()));
                taken.insert(path.clone());
            }
            path
        })
        .collect()
}

/// Chunk one document and write its report; returns the chunk count.
fn process(
    doc: &SourceDocument,
    chunk_config: &ChunkConfig,
    path: &Path,
    format: ReportFormat,
) -> Result<usize> {
    let chunks = create_chunks(doc, chunk_config);
    if chunks.is_empty() {
        warn!(doc_id = %doc.doc_id, filename = doc.filename().unwrap_or("unknown"), "document produced no chunks");
    }
    let saved = match format {
        ReportFormat::Text => save_text_report(&chunks, path),
        ReportFormat::Json => save_json_report(&chunks, path),
    };
    saved.with_context(|| format!("failed to write report {}", path.display()))?;
    Ok(chunks.len())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    config::load_dotenv();
    let args = CliArgs::parse();

    let mut config = Config::for_profile(args.profile.as_deref().unwrap_or(""));
    args.apply_overrides(&mut config);
    config.log_summary();

    let chunk_config =
        ChunkConfig::try_from(&config.chunking).context("invalid chunking configuration")?;

    let documents = load_directory(&config.paths.docs_dir, args.recursive).with_context(|| {
        format!("failed to load documents from {}", config.paths.docs_dir.display())
    })?;
    if documents.is_empty() {
        warn!(dir = %config.paths.docs_dir.display(), "no documents found");
        return Ok(());
    }

    let results_dir = &config.paths.results_dir;
    let paths = report_paths(&documents, &config.paths.docs_dir, results_dir, args.format);
    let counts = documents
        .par_iter()
        .zip(paths.par_iter())
        .map(|(doc, path)| process(doc, &chunk_config, path, args.format))
        .collect::<Result<Vec<usize>>>()?;

    info!(
        documents = documents.len(),
        chunks = counts.iter().sum::<usize>(),
        results = %results_dir.display(),
        "chunking complete"
    );
    Ok(())
}
