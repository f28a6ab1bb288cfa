//! In-memory vector store implementation.
//!
//! Keeps every record in a process-local map and scores searches with
//! cosine similarity. Extraction runs rebuild the index from the source
//! documents on startup, so nothing needs to survive the process.

use async_trait::async_trait;
use std::collections::HashMap;

use pinout_core::error::PinoutResult;
use pinout_core::traits::{VectorRecord, VectorSearchResult, VectorStore, VectorStoreConfig};
use pinout_core::types::Filter;

/// Vector store holding all records in memory.
pub struct InMemoryVectorStore {
    config: VectorStoreConfig,
    storage: tokio::sync::RwLock<HashMap<String, VectorRecord>>,
}

impl InMemoryVectorStore {
    /// Create an empty store for the configured collection.
    pub fn new(config: VectorStoreConfig) -> Self {
        Self {
            config,
            storage: tokio::sync::RwLock::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl VectorStore for InMemoryVectorStore {
    async fn insert(&self, records: Vec<VectorRecord>) -> PinoutResult<()> {
        let mut storage = self.storage.write().await;
        for record in records {
            storage.insert(record.id.clone(), record);
        }
        tracing::debug!(
            collection = %self.config.collection_name,
            total = storage.len(),
            "inserted records"
        );
        Ok(())
    }

    async fn search(
        &self,
        query_vector: &[f32],
        limit: usize,
        filters: Option<Filter>,
    ) -> PinoutResult<Vec<VectorSearchResult>> {
        let storage = self.storage.read().await;

        let mut results: Vec<VectorSearchResult> = storage
            .values()
            .filter(|record| match &filters {
                Some(filter) => filter.matches(&record.payload),
                None => true,
            })
            .map(|record| VectorSearchResult {
                id: record.id.clone(),
                score: cosine_similarity(query_vector, &record.vector),
                payload: record.payload.clone(),
            })
            .collect();

        results.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        results.truncate(limit);
        Ok(results)
    }

    async fn get(&self, id: &str) -> PinoutResult<Option<VectorRecord>> {
        let storage = self.storage.read().await;
        Ok(storage.get(id).cloned())
    }

    async fn delete(&self, id: &str) -> PinoutResult<()> {
        let mut storage = self.storage.write().await;
        storage.remove(id);
        Ok(())
    }

    async fn list(
        &self,
        filters: Option<Filter>,
        limit: Option<usize>,
    ) -> PinoutResult<Vec<VectorRecord>> {
        let storage = self.storage.read().await;
        let mut records: Vec<VectorRecord> = storage
            .values()
            .filter(|record| match &filters {
                Some(filter) => filter.matches(&record.payload),
                None => true,
            })
            .cloned()
            .collect();
        if let Some(l) = limit {
            records.truncate(l);
        }
        Ok(records)
    }

    async fn reset(&self) -> PinoutResult<()> {
        let mut storage = self.storage.write().await;
        storage.clear();
        tracing::debug!(collection = %self.config.collection_name, "reset collection");
        Ok(())
    }

    fn collection_name(&self) -> &str {
        &self.config.collection_name
    }
}

fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let na: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let nb: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if na == 0.0 || nb == 0.0 {
        0.0
    } else {
        dot / (na * nb)
    }
}
