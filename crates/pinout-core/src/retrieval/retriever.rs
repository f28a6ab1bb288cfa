//! Similarity search with part-number and attribute-tag filtering.

use std::sync::Arc;

use crate::config::RetrievalConfig;
use crate::error::PinoutResult;
use crate::traits::{Embedder, EmbeddingAction, VectorStore};
use crate::types::DocumentChunk;

/// Retrieves a bounded, relevance-filtered set of chunks for one query.
///
/// Filtering order: similarity threshold, then part number, then
/// attribute tag. The part-number filter is deliberately permissive:
/// chunks carrying no part-number metadata pass, since their origin is
/// unknown rather than wrong. The tag filter never starves the caller:
/// when it would eliminate every remaining candidate, the pre-tag list
/// is used instead.
pub struct ChunkRetriever {
    embedder: Arc<dyn Embedder>,
    vector_store: Arc<dyn VectorStore>,
    config: RetrievalConfig,
}

impl ChunkRetriever {
    pub fn new(
        embedder: Arc<dyn Embedder>,
        vector_store: Arc<dyn VectorStore>,
        config: RetrievalConfig,
    ) -> Self {
        Self {
            embedder,
            vector_store,
            config,
        }
    }

    /// Retrieve up to `max_chunks` chunks relevant to `query`.
    pub async fn retrieve(
        &self,
        query: &str,
        attribute_key: Option<&str>,
        part_number: Option<&str>,
    ) -> PinoutResult<Vec<DocumentChunk>> {
        tracing::debug!(query, ?attribute_key, ?part_number, "retrieving chunks");

        let candidates = self.similar_chunks(query).await?;
        tracing::debug!(count = candidates.len(), "chunks passed similarity threshold");

        let candidates = match part_number {
            Some(part) => filter_by_part_number(candidates, part),
            None => candidates,
        };

        let mut chunks = match attribute_key {
            Some(key) => {
                let tagged = filter_by_attribute_tag(&candidates, key);
                if tagged.is_empty() && !candidates.is_empty() {
                    tracing::warn!(
                        attribute = key,
                        "no chunks carry the attribute tag, falling back to similarity order"
                    );
                    candidates
                } else {
                    tagged
                }
            }
            None => candidates,
        };

        chunks.truncate(self.config.max_chunks);
        tracing::debug!(count = chunks.len(), "retrieval finished");
        Ok(chunks)
    }

    /// Similarity search, keeping candidates at or above the threshold
    /// in descending relevance order.
    async fn similar_chunks(&self, query: &str) -> PinoutResult<Vec<DocumentChunk>> {
        let query_vector = self
            .embedder
            .embed(query, Some(EmbeddingAction::Search))
            .await?;

        let results = self
            .vector_store
            .search(&query_vector, self.config.candidate_k, None)
            .await?;

        Ok(results
            .into_iter()
            .filter(|result| result.score >= self.config.similarity_threshold)
            .map(|result| DocumentChunk::from_payload(result.id, &result.payload))
            .collect())
    }
}

fn filter_by_part_number(chunks: Vec<DocumentChunk>, part_number: &str) -> Vec<DocumentChunk> {
    chunks
        .into_iter()
        .filter(|chunk| match chunk.metadata.part_number.as_deref() {
            Some(chunk_part) if !chunk_part.trim().is_empty() => {
                chunk_part.trim() == part_number.trim()
            }
            _ => true,
        })
        .collect()
}

fn filter_by_attribute_tag(chunks: &[DocumentChunk], attribute_key: &str) -> Vec<DocumentChunk> {
    chunks
        .iter()
        .filter(|chunk| {
            chunk
                .metadata
                .tags
                .get(attribute_key)
                .is_some_and(|tag| !tag.is_empty())
        })
        .cloned()
        .collect()
}
