//! Chunk configuration and its validation.

use docsplit_core::config::{default_separators, DEFAULT_BOUNDARY_WINDOW};
use docsplit_core::{ChunkingSettings, DocsplitError};

// ── Configuration ───────────────────────────────────────────────────────────

/// Validated configuration for the segmenter. Sizes are in characters.
///
/// Invariants: `max_size > 0`, `overlap < max_size`, `boundary_window > 0`,
/// and every separator is non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkConfig {
    max_size: usize,
    overlap: usize,
    separators: Vec<String>,
    boundary_window: usize,
}

impl ChunkConfig {
    /// Build a config with the default boundary window.
    pub fn new(
        max_size: usize,
        overlap: usize,
        separators: Vec<String>,
    ) -> Result<Self, DocsplitError> {
        Self::builder()
            .max_size(max_size)
            .overlap(overlap)
            .separators(separators)
            .build()
    }

    pub fn builder() -> ChunkConfigBuilder {
        ChunkConfigBuilder::default()
    }

    /// Maximum chunk length in characters.
    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// Characters repeated at the start of the following chunk.
    pub fn overlap(&self) -> usize {
        self.overlap
    }

    /// Preferred cut points, highest priority first.
    pub fn separators(&self) -> &[String] {
        &self.separators
    }

    /// Length of the trailing window searched for separators.
    pub fn boundary_window(&self) -> usize {
        self.boundary_window
    }
}

impl Default for ChunkConfig {
    fn default() -> Self {
        Self {
            max_size: 500,
            overlap: 50,
            separators: default_separators(),
            boundary_window: DEFAULT_BOUNDARY_WINDOW as usize,
        }
    }
}

impl TryFrom<&ChunkingSettings> for ChunkConfig {
    type Error = DocsplitError;

    fn try_from(s: &ChunkingSettings) -> Result<Self, Self::Error> {
        if s.chunk_size <= 0 {
            return Err(DocsplitError::InvalidConfiguration(format!(
                "chunk size must be positive, got {}",
                s.chunk_size
            )));
        }
        if s.chunk_overlap < 0 {
            return Err(DocsplitError::InvalidConfiguration(format!(
                "chunk overlap must not be negative, got {}",
                s.chunk_overlap
            )));
        }
        if s.boundary_window <= 0 {
            return Err(DocsplitError::InvalidConfiguration(format!(
                "boundary window must be positive, got {}",
                s.boundary_window
            )));
        }
        Self::builder()
            .max_size(to_usize(s.chunk_size)?)
            .overlap(to_usize(s.chunk_overlap)?)
            .boundary_window(to_usize(s.boundary_window)?)
            .separators(s.separators.clone())
            .build()
    }
}

fn to_usize(n: i64) -> Result<usize, DocsplitError> {
    usize::try_from(n)
        .map_err(|_| DocsplitError::InvalidConfiguration(format!("{n} does not fit in usize")))
}

// ── Builder ─────────────────────────────────────────────────────────────────

/// Builder for [`ChunkConfig`]; unset fields take the defaults.
#[derive(Debug, Clone, Default)]
pub struct ChunkConfigBuilder {
    max_size: Option<usize>,
    overlap: Option<usize>,
    separators: Option<Vec<String>>,
    boundary_window: Option<usize>,
}

impl ChunkConfigBuilder {
    pub fn max_size(mut self, max_size: usize) -> Self {
        self.max_size = Some(max_size);
        self
    }

    pub fn overlap(mut self, overlap: usize) -> Self {
        self.overlap = Some(overlap);
        self
    }

    pub fn separators<S: Into<String>>(mut self, separators: impl IntoIterator<Item = S>) -> Self {
        self.separators = Some(separators.into_iter().map(Into::into).collect());
        self
    }

    pub fn boundary_window(mut self, boundary_window: usize) -> Self {
        self.boundary_window = Some(boundary_window);
        self
    }

    pub fn build(self) -> Result<ChunkConfig, DocsplitError> {
        let defaults = ChunkConfig::default();
        let config = ChunkConfig {
            max_size: self.max_size.unwrap_or(defaults.max_size),
            overlap: self.overlap.unwrap_or(defaults.overlap),
            separators: self.separators.unwrap_or(defaults.separators),
            boundary_window: self.boundary_window.unwrap_or(defaults.boundary_window),
        };
        validate(&config)?;
        Ok(config)
    }
}

fn validate(config: &ChunkConfig) -> Result<(), DocsplitError> {
    if config.max_size == 0 {
        return Err(DocsplitError::InvalidConfiguration(
            "max chunk size must be positive".to_string(),
        ));
    }
    // overlap >= max_size is rejected, not clamped.
    if config.overlap >= config.max_size {
        return Err(DocsplitError::InvalidConfiguration(format!(
            "overlap ({}) must be smaller than max chunk size ({})",
            config.overlap, config.max_size
        )));
    }
    if config.boundary_window == 0 {
        return Err(DocsplitError::InvalidConfiguration(
            "boundary window must be positive".to_string(),
        ));
    }
    if let Some(i) = config.separators.iter().position(|s| s.is_empty()) {
        return Err(DocsplitError::InvalidConfiguration(format!(
            "separator #{i} is empty"
        )));
    }
    Ok(())
}
