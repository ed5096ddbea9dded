use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use docsplit_core::Config;

/// Split documents into overlapping chunks and write a report per document.
///
/// Defaults come from the environment (and `.env`); flags override them.
#[derive(Parser, Debug)]
#[command(name = "docsplit", version, about = "Split documents into overlapping chunks")]
pub struct CliArgs {
    /// Configuration profile; keys are looked up as {PROFILE}_{KEY} first
    #[arg(long, env = "DOCSPLIT_PROFILE")]
    pub profile: Option<String>,

    /// Directory containing .txt, .md, .pdf and .docx documents
    #[arg(long)]
    pub docs_dir: Option<PathBuf>,

    /// Directory the reports are written to
    #[arg(long)]
    pub results_dir: Option<PathBuf>,

    /// Maximum chunk size in characters
    #[arg(long, allow_negative_numbers = true)]
    pub chunk_size: Option<i64>,

    /// Characters shared between consecutive chunks
    #[arg(long, allow_negative_numbers = true)]
    pub overlap: Option<i64>,

    /// Characters at the end of a chunk searched for a separator
    #[arg(long, allow_negative_numbers = true)]
    pub boundary_window: Option<i64>,

    /// Separators in priority order, as a JSON string array, e.g. '["\n\n", ". "]'
    #[arg(long, value_parser = parse_separator_list)]
    pub separators: Option<SeparatorList>,

    /// Descend into subdirectories of the docs directory
    #[arg(long)]
    pub recursive: bool,

    /// Report format
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,
}

/// Separators given on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeparatorList(pub Vec<String>);

fn parse_separator_list(raw: &str) -> Result<SeparatorList, String> {
    serde_json::from_str::<Vec<String>>(raw)
        .map(SeparatorList)
        .map_err(|e| format!("expected a JSON array of strings: {e}"))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    Text,
    Json,
}

impl ReportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ReportFormat::Text => "txt",
            ReportFormat::Json => "json",
        }
    }
}

impl CliArgs {
    /// Overwrite config values with any flags given on the command line.
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(dir) = &self.docs_dir {
            config.paths.docs_dir = dir.clone();
        }
        if let Some(dir) = &self.results_dir {
            config.paths.results_dir = dir.clone();
        }
        if let Some(size) = self.chunk_size {
            config.chunking.chunk_size = size;
        }
        if let Some(overlap) = self.overlap {
            config.chunking.chunk_overlap = overlap;
        }
        if let Some(window) = self.boundary_window {
            config.chunking.boundary_window = window;
        }
        if let Some(SeparatorList(separators)) = &self.separators {
            config.chunking.separators = separators.clone();
        }
    }
}
