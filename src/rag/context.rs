//! Context selection for the answer prompt.
//!
//! The knowledge slot of the prompt is filled by one of two mutually
//! exclusive sources, chosen once at startup: the whole document, or the
//! chunks retrieved for the current question.

use crate::embedding::Embedder;
use crate::error::Result;
use crate::index::{KnowledgeIndex, ScoredChunk};
use crate::knowledge::KnowledgeDocument;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

/// Trait for producing the knowledge text for a question.
#[async_trait]
pub trait ContextSource: Send + Sync {
    /// Build the knowledge slot content for the given question.
    async fn context_for(&self, question: &str) -> Result<String>;
}

/// Puts the entire knowledge document into every prompt.
pub struct FullDocumentContext {
    document: Arc<KnowledgeDocument>,
}

impl FullDocumentContext {
    pub fn new(document: Arc<KnowledgeDocument>) -> Self {
        Self { document }
    }
}

#[async_trait]
impl ContextSource for FullDocumentContext {
    async fn context_for(&self, _question: &str) -> Result<String> {
        Ok(self.document.text().to_string())
    }
}

/// Retrieves the nearest chunks for each question from the index.
pub struct RetrievalContext {
    index: Arc<KnowledgeIndex>,
    embedder: Arc<dyn Embedder>,
    top_k: usize,
}

impl RetrievalContext {
    pub fn new(index: Arc<KnowledgeIndex>, embedder: Arc<dyn Embedder>, top_k: usize) -> Self {
        Self {
            index,
            embedder,
            top_k,
        }
    }

    /// Retrieve the `k` chunks nearest to the query, best first.
    pub async fn retrieve(&self, query: &str, k: usize) -> Result<Vec<ScoredChunk>> {
        let query_embedding = self.embedder.embed(query).await?;
        Ok(self.index.search(&query_embedding, k))
    }
}

#[async_trait]
impl ContextSource for RetrievalContext {
    async fn context_for(&self, question: &str) -> Result<String> {
        let results = self.retrieve(question, self.top_k).await?;
        debug!("Retrieved {} chunks for question", results.len());
        Ok(format_chunks_for_prompt(&results))
    }
}

/// Join retrieved chunks into a single knowledge block.
pub fn format_chunks_for_prompt(results: &[ScoredChunk]) -> String {
    results
        .iter()
        .map(|r| r.chunk.content.as_str())
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunking::Chunk;

    #[tokio::test]
    async fn test_full_document_context_ignores_question() {
        let doc = Arc::new(KnowledgeDocument::from_text("Paket A aylık 100 TL'dir."));
        let source = FullDocumentContext::new(doc);

        let context = source.context_for("fiyat nedir?").await.unwrap();
        assert_eq!(context, "Paket A aylık 100 TL'dir.");
    }

    #[test]
    fn test_chunk_formatting_preserves_order() {
        let results = vec![
            ScoredChunk {
                chunk: Chunk::new(2, "en yakın".to_string()),
                score: 0.9,
            },
            ScoredChunk {
                chunk: Chunk::new(0, "ikinci".to_string()),
                score: 0.5,
            },
        ];

        assert_eq!(format_chunks_for_prompt(&results), "en yakın\n\nikinci");
    }
}
