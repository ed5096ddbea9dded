use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Separators tried in priority order when no `CHUNK_SEPARATORS` is set.
pub const DEFAULT_SEPARATORS: &[&str] = &["\n\n", "\n", ". ", "! ", "? "];

pub const DEFAULT_CHUNK_SIZE: i64 = 500;
pub const DEFAULT_CHUNK_OVERLAP: i64 = 50;
pub const DEFAULT_BOUNDARY_WINDOW: i64 = 100;

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

/// Read a profiled env var: tries {PROFILE}_{KEY} first, falls back to {KEY}.
fn profiled_env_opt(profile: &str, key: &str) -> Option<String> {
    if !profile.is_empty() {
        let prefixed = format!("{}_{}", profile, key);
        if let Some(v) = env_opt(&prefixed) {
            return Some(v);
        }
    }
    env_opt(key)
}

fn profiled_env_or(profile: &str, key: &str, default: &str) -> String {
    profiled_env_opt(profile, key).unwrap_or_else(|| default.to_string())
}

/// Signed on purpose: a negative value must reach validation, not vanish here.
fn profiled_env_i64(profile: &str, key: &str, default: i64) -> i64 {
    match profiled_env_opt(profile, key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(key, value = %raw, default, "not an integer, using default");
            default
        }),
        None => default,
    }
}

// ── Top-level config ──────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Active profile name (empty = default).
    pub profile: String,
    pub chunking: ChunkingSettings,
    pub paths: PathsConfig,
}

impl Config {
    /// Build config from environment variables (call `load_dotenv()` first).
    /// Profile is read from `DOCSPLIT_PROFILE`. When set (e.g. `BOOKS`),
    /// every key is first looked up as `{PROFILE}_{KEY}`, falling back to `{KEY}`.
    pub fn from_env() -> Self {
        let profile = env_or("DOCSPLIT_PROFILE", "").to_uppercase();
        Self::for_profile(&profile)
    }

    /// Build config for a specific named profile (empty string = default).
    pub fn for_profile(profile: &str) -> Self {
        let p = profile.to_uppercase();
        let p = p.as_str();
        Self {
            profile: p.to_string(),
            chunking: ChunkingSettings::from_env_profiled(p),
            paths: PathsConfig::from_env_profiled(p),
        }
    }

    pub fn profile_label(&self) -> &str {
        if self.profile.is_empty() { "default" } else { &self.profile }
    }

    /// Print a summary for startup logs.
    pub fn log_summary(&self) {
        tracing::info!("Config loaded (profile: {}):", self.profile_label());
        tracing::info!(
            "  chunking:    size={}, overlap={}, window={}, separators={:?}",
            self.chunking.chunk_size,
            self.chunking.chunk_overlap,
            self.chunking.boundary_window,
            self.chunking.separators
        );
        tracing::info!(
            "  paths:       docs={}, results={}",
            self.paths.docs_dir.display(),
            self.paths.results_dir.display()
        );
    }
}

// ── Chunking ──────────────────────────────────────────────────

/// Raw, unvalidated chunking parameters as read from the environment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChunkingSettings {
    pub chunk_size: i64,
    pub chunk_overlap: i64,
    pub boundary_window: i64,
    pub separators: Vec<String>,
}

impl Default for ChunkingSettings {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            chunk_overlap: DEFAULT_CHUNK_OVERLAP,
            boundary_window: DEFAULT_BOUNDARY_WINDOW,
            separators: default_separators(),
        }
    }
}

impl ChunkingSettings {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            chunk_size: profiled_env_i64(p, "CHUNK_SIZE", DEFAULT_CHUNK_SIZE),
            chunk_overlap: profiled_env_i64(p, "CHUNK_OVERLAP", DEFAULT_CHUNK_OVERLAP),
            boundary_window: profiled_env_i64(p, "CHUNK_BOUNDARY_WINDOW", DEFAULT_BOUNDARY_WINDOW),
            separators: profiled_env_opt(p, "CHUNK_SEPARATORS")
                .map(|raw| parse_separators(&raw))
                .unwrap_or_else(default_separators),
        }
    }
}

pub fn default_separators() -> Vec<String> {
    DEFAULT_SEPARATORS.iter().map(|s| s.to_string()).collect()
}

/// Parse `CHUNK_SEPARATORS`, a JSON array of strings such as `["\n\n", ". "]`.
fn parse_separators(raw: &str) -> Vec<String> {
    match serde_json::from_str::<Vec<String>>(raw) {
        Ok(seps) => seps,
        Err(e) => {
            tracing::warn!(error = %e, "CHUNK_SEPARATORS is not a JSON string array, using defaults");
            default_separators()
        }
    }
}

// ── Paths ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    pub docs_dir: PathBuf,
    pub results_dir: PathBuf,
}

impl PathsConfig {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            docs_dir: PathBuf::from(profiled_env_or(p, "DOCS_DIR", "docs")),
            results_dir: PathBuf::from(profiled_env_or(p, "RESULTS_DIR", ".results")),
        }
    }
}
