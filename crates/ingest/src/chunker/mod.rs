//! Document chunking engine.
//!
//! Splits text into bounded, overlapping chunks suitable for embedding.
//! Cuts prefer caller-supplied separators (paragraph, line, sentence) in
//! priority order and fall back to a hard cut at `max_size` characters; the
//! next chunk restarts `overlap` characters earlier, snapped to a word boundary.

mod assembler;
mod segmenter;
mod types;

pub use assembler::create_chunks;
pub use segmenter::split_text;
pub use types::{ChunkConfig, ChunkConfigBuilder};
