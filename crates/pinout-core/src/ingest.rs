//! Page-level document ingestion with dictionary tag spotting.
//!
//! Each page of an input document becomes one chunk. Before indexing,
//! every chunk is scanned for occurrences of the catalog's dictionary
//! values; hits are recorded as attribute tags so retrieval can prefer
//! chunks that actually mention a value the model could answer with.

use std::collections::BTreeSet;
use std::collections::HashMap;
use std::sync::Arc;

use regex::Regex;

use crate::catalog::AttributeCatalog;
use crate::error::PinoutResult;
use crate::traits::{Embedder, EmbeddingAction, VectorRecord, VectorStore};
use crate::types::{ChunkMetadata, DocumentChunk};

/// Turns extracted page texts into tagged, indexed chunks.
pub struct DocumentIngestor {
    embedder: Arc<dyn Embedder>,
    vector_store: Arc<dyn VectorStore>,
    taggers: Vec<(String, Regex)>,
}

impl DocumentIngestor {
    /// Build an ingestor whose tag spotters come from the catalog's
    /// dictionaries. Attributes without a dictionary get no spotter.
    pub fn new(
        embedder: Arc<dyn Embedder>,
        vector_store: Arc<dyn VectorStore>,
        catalog: &AttributeCatalog,
    ) -> Self {
        let taggers = catalog
            .all()
            .iter()
            .filter_map(|spec| {
                let escaped: Vec<String> = spec
                    .allowed_values
                    .iter()
                    .filter(|v| !v.is_empty())
                    .map(|v| regex::escape(v))
                    .collect();
                if escaped.is_empty() {
                    return None;
                }
                let pattern = format!("(?i)({})", escaped.join("|"));
                match Regex::new(&pattern) {
                    Ok(regex) => Some((spec.key.clone(), regex)),
                    Err(e) => {
                        tracing::warn!(attribute = %spec.key, error = %e, "skipping tag spotter");
                        None
                    }
                }
            })
            .collect();

        Self {
            embedder,
            vector_store,
            taggers,
        }
    }

    /// Scan a chunk text for dictionary values, one entry per attribute
    /// with at least one hit. Hits are trimmed, deduplicated, sorted,
    /// and joined with ", ".
    pub fn spot_tags(&self, text: &str) -> HashMap<String, String> {
        let mut tags = HashMap::new();
        for (attribute, regex) in &self.taggers {
            let matches: BTreeSet<String> = regex
                .find_iter(text)
                .map(|m| m.as_str().trim().to_string())
                .collect();
            if !matches.is_empty() {
                tags.insert(
                    attribute.clone(),
                    matches.into_iter().collect::<Vec<_>>().join(", "),
                );
            }
        }
        tags
    }

    /// Convert page texts into tagged chunks. Pages are numbered from 1;
    /// blank pages are dropped.
    pub fn chunk_pages(
        &self,
        source: &str,
        pages: &[String],
        part_number: Option<&str>,
    ) -> Vec<DocumentChunk> {
        pages
            .iter()
            .enumerate()
            .filter(|(_, text)| !text.trim().is_empty())
            .map(|(index, text)| {
                DocumentChunk::new(
                    text.clone(),
                    ChunkMetadata {
                        source: source.to_string(),
                        page: index + 1,
                        part_number: part_number.map(|p| p.to_string()),
                        tags: self.spot_tags(text),
                    },
                )
            })
            .collect()
    }

    /// Embed and index chunks. Returns the number of records written.
    pub async fn index_chunks(&self, chunks: &[DocumentChunk]) -> PinoutResult<usize> {
        if chunks.is_empty() {
            return Ok(0);
        }

        let texts: Vec<String> = chunks.iter().map(|chunk| chunk.text.clone()).collect();
        let vectors = self
            .embedder
            .embed_batch(&texts, Some(EmbeddingAction::Add))
            .await?;

        let records: Vec<VectorRecord> = chunks
            .iter()
            .zip(vectors)
            .map(|(chunk, vector)| VectorRecord::new(chunk.id.clone(), vector, chunk.to_payload()))
            .collect();

        let count = records.len();
        self.vector_store.insert(records).await?;
        tracing::info!(count, "indexed document chunks");
        Ok(count)
    }

    /// Chunk, tag, embed, and index one document in a single call.
    pub async fn ingest_document(
        &self,
        source: &str,
        pages: &[String],
        part_number: Option<&str>,
    ) -> PinoutResult<Vec<DocumentChunk>> {
        let chunks = self.chunk_pages(source, pages, part_number);
        self.index_chunks(&chunks).await?;
        Ok(chunks)
    }
}
