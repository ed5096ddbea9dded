pub mod chunker;
pub mod document;
pub mod report;

pub use chunker::{create_chunks, split_text, ChunkConfig};
pub use document::{load_directory, load_file, ExtractionError};
