//! In-memory similarity index over knowledge chunks.
//!
//! The index is built once at startup from the chunked knowledge document and
//! is read-only afterwards, so lookups need no synchronization. The corpus is
//! a single document, so exact cosine scoring over every entry is used rather
//! than an approximate structure.

use crate::chunking::Chunk;
use crate::embedding::Embedder;
use crate::error::{DestekError, Result};
use tracing::{debug, instrument};

/// A chunk paired with its embedding.
#[derive(Debug, Clone)]
pub struct IndexEntry {
    pub chunk: Chunk,
    pub embedding: Vec<f32>,
}

/// A retrieval hit with its similarity score.
#[derive(Debug, Clone)]
pub struct ScoredChunk {
    pub chunk: Chunk,
    pub score: f32,
}

/// Read-only nearest-neighbor index over the knowledge chunks.
#[derive(Debug)]
pub struct KnowledgeIndex {
    entries: Vec<IndexEntry>,
}

impl KnowledgeIndex {
    /// Build the index by embedding every chunk.
    ///
    /// Any embedding failure aborts construction; a partially built index is
    /// never exposed.
    #[instrument(skip(chunks, embedder), fields(chunks = chunks.len()))]
    pub async fn build(chunks: Vec<Chunk>, embedder: &dyn Embedder) -> Result<Self> {
        if chunks.is_empty() {
            return Err(DestekError::Index(
                "Cannot build an index from zero chunks".to_string(),
            ));
        }

        let texts: Vec<String> = chunks.iter().map(|c| c.content.clone()).collect();
        let embeddings = embedder.embed_batch(&texts).await?;

        if embeddings.len() != chunks.len() {
            return Err(DestekError::Index(format!(
                "Embedding count mismatch: {} chunks, {} embeddings",
                chunks.len(),
                embeddings.len()
            )));
        }

        let entries = chunks
            .into_iter()
            .zip(embeddings)
            .map(|(chunk, embedding)| IndexEntry { chunk, embedding })
            .collect::<Vec<_>>();

        debug!("Built index with {} entries", entries.len());
        Ok(Self { entries })
    }

    /// Return the `k` entries nearest to the query embedding, best first.
    pub fn search(&self, query_embedding: &[f32], k: usize) -> Vec<ScoredChunk> {
        let mut results: Vec<ScoredChunk> = self
            .entries
            .iter()
            .map(|entry| ScoredChunk {
                chunk: entry.chunk.clone(),
                score: cosine_similarity(query_embedding, &entry.embedding),
            })
            .collect();

        results.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        results.truncate(k);

        results
    }

    /// Number of indexed chunks.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Compute cosine similarity between two vectors.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot_product / (norm_a * norm_b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    /// Embedder that maps each text to a fixed axis vector by arrival order.
    struct AxisEmbedder {
        dimensions: usize,
    }

    #[async_trait]
    impl Embedder for AxisEmbedder {
        async fn embed(&self, _text: &str) -> Result<Vec<f32>> {
            unimplemented!("tests embed batches only")
        }

        async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
            Ok((0..texts.len())
                .map(|i| {
                    let mut v = vec![0.0; self.dimensions];
                    v[i % self.dimensions] = 1.0;
                    v
                })
                .collect())
        }

        fn dimensions(&self) -> usize {
            self.dimensions
        }
    }

    fn five_chunks() -> Vec<Chunk> {
        (0..5)
            .map(|i| Chunk::new(i, format!("bölüm {}", i)))
            .collect()
    }

    #[test]
    fn test_cosine_similarity() {
        let a = vec![1.0, 0.0, 0.0];
        let b = vec![1.0, 0.0, 0.0];
        assert!((cosine_similarity(&a, &b) - 1.0).abs() < 0.001);

        let c = vec![0.0, 1.0, 0.0];
        assert!((cosine_similarity(&a, &c)).abs() < 0.001);

        let d = vec![-1.0, 0.0, 0.0];
        assert!((cosine_similarity(&a, &d) + 1.0).abs() < 0.001);
    }

    #[tokio::test]
    async fn test_top_one_returns_nearest_chunk() {
        let embedder = AxisEmbedder { dimensions: 5 };
        let index = KnowledgeIndex::build(five_chunks(), &embedder).await.unwrap();

        // Query pointing at axis 2 must hit chunk position 2 exactly.
        let query = vec![0.0, 0.0, 1.0, 0.0, 0.0];
        let results = index.search(&query, 1);

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].chunk.position, 2);
    }

    #[tokio::test]
    async fn test_results_are_ranked_and_truncated() {
        let embedder = AxisEmbedder { dimensions: 5 };
        let index = KnowledgeIndex::build(five_chunks(), &embedder).await.unwrap();

        let query = vec![0.9, 0.4, 0.1, 0.0, 0.0];
        let results = index.search(&query, 3);

        assert_eq!(results.len(), 3);
        assert!(results[0].score >= results[1].score);
        assert!(results[1].score >= results[2].score);
        assert_eq!(results[0].chunk.position, 0);
    }

    #[tokio::test]
    async fn test_empty_chunk_list_is_rejected() {
        let embedder = AxisEmbedder { dimensions: 3 };
        let err = KnowledgeIndex::build(vec![], &embedder).await.unwrap_err();
        assert!(matches!(err, DestekError::Index(_)));
    }
}
