//! Fixed-size document chunking.
//!
//! Splits the knowledge document into retrieval units. The splitter is
//! deliberately simple: fixed maximum size in characters, zero overlap, no
//! semantic boundary awareness. Concatenating the chunks in order reproduces
//! the document exactly, so chunk identity is just its position.

use crate::error::{DestekError, Result};
use serde::{Deserialize, Serialize};

/// A contiguous slice of the knowledge document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    /// Zero-based position of this chunk in the document.
    pub position: usize,
    /// Text content of this chunk.
    pub content: String,
}

impl Chunk {
    pub fn new(position: usize, content: String) -> Self {
        Self { position, content }
    }

    /// Length of this chunk in characters.
    pub fn char_count(&self) -> usize {
        self.content.chars().count()
    }
}

/// Splitter producing fixed-size, non-overlapping chunks.
#[derive(Debug, Clone, Copy)]
pub struct FixedSizeChunker {
    chunk_size: usize,
}

impl FixedSizeChunker {
    /// Create a splitter with a maximum chunk size in characters.
    pub fn new(chunk_size: usize) -> Result<Self> {
        if chunk_size == 0 {
            return Err(DestekError::Config(
                "chunking.chunk_size must be greater than zero".to_string(),
            ));
        }
        Ok(Self { chunk_size })
    }

    /// Split a document into ordered chunks.
    ///
    /// Splits on character boundaries so multi-byte text (Turkish included)
    /// never lands mid-codepoint. May split mid-sentence.
    pub fn split(&self, text: &str) -> Vec<Chunk> {
        let mut chunks = Vec::new();
        let mut current = String::with_capacity(self.chunk_size.min(text.len()));
        let mut current_chars = 0;

        for ch in text.chars() {
            current.push(ch);
            current_chars += 1;
            if current_chars == self.chunk_size {
                chunks.push(Chunk::new(chunks.len(), std::mem::take(&mut current)));
                current_chars = 0;
            }
        }

        if !current.is_empty() {
            chunks.push(Chunk::new(chunks.len(), current));
        }

        chunks
    }
}
