//! Document chunk types for ingestion and retrieval.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Metadata attached to an ingested chunk.
///
/// `tags` maps attribute keys to the dictionary values spotted in the
/// chunk text at ingestion time. A chunk with no spotted values for an
/// attribute simply has no entry for that key.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChunkMetadata {
    /// Originating file name.
    pub source: String,
    /// 1-based page number within the file.
    pub page: usize,
    /// Part number this chunk belongs to, when known at ingestion.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub part_number: Option<String>,
    /// Attribute tags spotted in the text, joined with ", ".
    #[serde(default)]
    pub tags: HashMap<String, String>,
}

/// A page-level chunk of an ingested document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentChunk {
    /// Unique identifier.
    pub id: String,
    /// Chunk text content.
    pub text: String,
    /// Chunk metadata.
    pub metadata: ChunkMetadata,
}

impl DocumentChunk {
    /// Create a new chunk with a generated id.
    pub fn new(text: impl Into<String>, metadata: ChunkMetadata) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            text: text.into(),
            metadata,
        }
    }

    /// MD5 hash of the chunk text, used for dedup across re-ingestion.
    pub fn content_hash(&self) -> String {
        format!("{:x}", md5::compute(self.text.as_bytes()))
    }

    /// Flatten into a vector store payload.
    ///
    /// The text lives under "data" with its content hash under "hash";
    /// tags are spread as top-level keys so the retriever can test
    /// attribute presence without deserializing.
    pub fn to_payload(&self) -> HashMap<String, serde_json::Value> {
        let mut payload = HashMap::new();
        payload.insert("data".to_string(), serde_json::json!(self.text));
        payload.insert("hash".to_string(), serde_json::json!(self.content_hash()));
        payload.insert("source".to_string(), serde_json::json!(self.metadata.source));
        payload.insert("page".to_string(), serde_json::json!(self.metadata.page));
        if let Some(part) = &self.metadata.part_number {
            payload.insert("part_number".to_string(), serde_json::json!(part));
        }
        for (key, joined) in &self.metadata.tags {
            payload.insert(key.clone(), serde_json::json!(joined));
        }
        payload
    }

    /// Rebuild a chunk from a vector store payload.
    pub fn from_payload(id: impl Into<String>, payload: &HashMap<String, serde_json::Value>) -> Self {
        let text = payload
            .get("data")
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string();
        let source = payload
            .get("source")
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string();
        let page = payload.get("page").and_then(|v| v.as_u64()).unwrap_or(0) as usize;
        let part_number = payload
            .get("part_number")
            .and_then(|v| v.as_str())
            .map(|s| s.to_string());

        let mut tags = HashMap::new();
        for (key, value) in payload {
            if matches!(key.as_str(), "data" | "hash" | "source" | "page" | "part_number") {
                continue;
            }
            if let Some(s) = value.as_str() {
                tags.insert(key.clone(), s.to_string());
            }
        }

        Self {
            id: id.into(),
            text,
            metadata: ChunkMetadata {
                source,
                page,
                part_number,
                tags,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_round_trip() {
        let mut tags = HashMap::new();
        tags.insert("Gender".to_string(), "Female, Male".to_string());

        let chunk = DocumentChunk::new(
            "2-row female housing",
            ChunkMetadata {
                source: "datasheet.pdf".to_string(),
                page: 3,
                part_number: Some("1-967616-1".to_string()),
                tags,
            },
        );

        let payload = chunk.to_payload();
        assert_eq!(payload.get("data").and_then(|v| v.as_str()), Some("2-row female housing"));
        assert_eq!(payload.get("page").and_then(|v| v.as_u64()), Some(3));
        assert_eq!(
            payload.get("hash").and_then(|v| v.as_str()),
            Some(chunk.content_hash().as_str())
        );

        let restored = DocumentChunk::from_payload(chunk.id.clone(), &payload);
        assert_eq!(restored.text, chunk.text);
        assert_eq!(restored.metadata.part_number.as_deref(), Some("1-967616-1"));
        assert_eq!(
            restored.metadata.tags.get("Gender").map(String::as_str),
            Some("Female, Male")
        );
        assert!(!restored.metadata.tags.contains_key("hash"));
    }

    #[test]
    fn test_content_hash_is_stable() {
        let meta = ChunkMetadata {
            source: "a.pdf".to_string(),
            page: 1,
            part_number: None,
            tags: HashMap::new(),
        };
        let a = DocumentChunk::new("same text", meta.clone());
        let b = DocumentChunk::new("same text", meta);
        assert_ne!(a.id, b.id);
        assert_eq!(a.content_hash(), b.content_hash());
    }
}
