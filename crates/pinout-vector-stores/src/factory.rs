//! Factory for creating vector store providers.

use std::sync::Arc;

use pinout_core::error::{PinoutError, PinoutResult};
use pinout_core::traits::{VectorStore, VectorStoreConfig, VectorStoreProvider};

use crate::memory::InMemoryVectorStore;

/// Factory for creating vector store providers.
pub struct VectorStoreFactory;

impl VectorStoreFactory {
    /// Create a vector store from the given configuration.
    pub fn create(
        provider: VectorStoreProvider,
        config: VectorStoreConfig,
    ) -> PinoutResult<Arc<dyn VectorStore>> {
        match provider {
            VectorStoreProvider::InMemory => Ok(Arc::new(InMemoryVectorStore::new(config))),

            other => Err(PinoutError::UnsupportedProvider {
                provider: format!("{:?}", other),
            }),
        }
    }

    /// Create an in-memory store with the default collection.
    pub fn in_memory() -> PinoutResult<Arc<dyn VectorStore>> {
        Self::create(VectorStoreProvider::InMemory, VectorStoreConfig::default())
    }

    /// Create an in-memory store with a custom collection name.
    pub fn in_memory_with_collection(collection_name: &str) -> PinoutResult<Arc<dyn VectorStore>> {
        let config = VectorStoreConfig {
            provider: VectorStoreProvider::InMemory,
            collection_name: collection_name.to_string(),
            ..VectorStoreConfig::default()
        };
        Self::create(VectorStoreProvider::InMemory, config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_in_memory() {
        let store = VectorStoreFactory::in_memory_with_collection("test_chunks").unwrap();
        assert_eq!(store.collection_name(), "test_chunks");
    }

    #[test]
    fn test_unsupported_provider_is_rejected() {
        let result = VectorStoreFactory::create(
            VectorStoreProvider::Qdrant,
            VectorStoreConfig::default(),
        );
        assert!(matches!(
            result,
            Err(PinoutError::UnsupportedProvider { .. })
        ));
    }
}
