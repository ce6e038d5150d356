//! Splitting raw document text into overlapping windows

mod splitter;
mod tokenizer;

pub use splitter::TextChunker;
pub use tokenizer::count_tokens;
