//! Utility modules

pub mod files;
pub mod text;

pub use files::{read_attachment, read_document, FileOpenError};
pub use text::{whitespace_word_count, words, DocumentStats, WordSpan};
