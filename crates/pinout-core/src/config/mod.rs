//! Configuration system for pinout.

use serde::{Deserialize, Serialize};

use crate::traits::{EmbedderConfig, EmbedderProvider, LlmConfig, VectorStoreConfig};
use crate::types::ExtractionStage;

/// LLM provider type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    #[default]
    Groq,
    OpenAI,
    Anthropic,
}

/// Provider configuration with type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmProviderConfig {
    /// Provider type.
    pub provider: LlmProvider,
    /// Provider-specific configuration.
    #[serde(flatten)]
    pub config: LlmConfig,
}

impl Default for LlmProviderConfig {
    fn default() -> Self {
        Self {
            provider: LlmProvider::Groq,
            config: LlmConfig {
                model: "qwen/qwen3-32b".to_string(),
                ..Default::default()
            },
        }
    }
}

/// Embedder provider configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbedderProviderConfig {
    /// Provider type.
    pub provider: EmbedderProvider,
    /// Provider-specific configuration.
    #[serde(flatten)]
    pub config: EmbedderConfig,
}

impl Default for EmbedderProviderConfig {
    fn default() -> Self {
        Self {
            provider: EmbedderProvider::HuggingFace,
            config: EmbedderConfig::default(),
        }
    }
}

/// Chunk retrieval tuning for the document fallback stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    /// Candidates fetched from the vector store per query.
    pub candidate_k: usize,
    /// Minimum cosine similarity a candidate must reach.
    pub similarity_threshold: f32,
    /// Chunks kept after filtering.
    pub max_chunks: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            candidate_k: 8,
            similarity_threshold: 0.7,
            max_chunks: 5,
        }
    }
}

/// Delay inserted after each backend call, per stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PacingConfig {
    /// Delay after each web extraction call.
    pub web_seconds: f64,
    /// Delay after each document fallback call.
    pub document_seconds: f64,
    /// Delay after each final recheck call.
    pub final_seconds: f64,
    /// Delay after each manual recheck call.
    pub manual_seconds: f64,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            web_seconds: 0.2,
            document_seconds: 0.5,
            final_seconds: 0.3,
            manual_seconds: 0.5,
        }
    }
}

impl PacingConfig {
    /// Delay for the given stage.
    pub fn for_stage(&self, stage: ExtractionStage) -> std::time::Duration {
        let seconds = match stage {
            ExtractionStage::Web => self.web_seconds,
            ExtractionStage::PdfFallback => self.document_seconds,
            ExtractionStage::FinalFallback => self.final_seconds,
            ExtractionStage::ManualRecheck => self.manual_seconds,
        };
        std::time::Duration::from_secs_f64(seconds.max(0.0))
    }
}

/// Main pipeline configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// LLM configuration.
    pub llm: LlmProviderConfig,
    /// Embedder configuration.
    pub embedder: EmbedderProviderConfig,
    /// Vector store configuration.
    pub vector_store: VectorStoreConfig,
    /// Retrieval configuration.
    pub retrieval: RetrievalConfig,
    /// Per-stage pacing delays.
    pub pacing: PacingConfig,
    /// Batch re-entries allowed before the run is aborted.
    pub max_attempts: u32,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            llm: LlmProviderConfig::default(),
            embedder: EmbedderProviderConfig::default(),
            vector_store: VectorStoreConfig::default(),
            retrieval: RetrievalConfig::default(),
            pacing: PacingConfig::default(),
            max_attempts: 3,
        }
    }
}

impl ExtractionConfig {
    /// Load configuration from a file (TOML, JSON, or YAML).
    pub fn from_file(path: impl AsRef<std::path::Path>) -> crate::error::PinoutResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let ext = path.as_ref().extension().and_then(|e| e.to_str());

        match ext {
            Some("toml") => toml::from_str(&content)
                .map_err(|e| crate::error::PinoutError::Configuration(e.to_string())),
            Some("json") => serde_json::from_str(&content)
                .map_err(|e| crate::error::PinoutError::Configuration(e.to_string())),
            Some("yaml" | "yml") => serde_yaml::from_str(&content)
                .map_err(|e| crate::error::PinoutError::Configuration(e.to_string())),
            _ => Err(crate::error::PinoutError::Configuration(
                "Unsupported config file format. Use .toml, .json, or .yaml".to_string(),
            )),
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Reads `.env` from the working directory first, then applies
    /// overrides on top of the defaults.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        // LLM configuration
        if let Ok(api_key) = std::env::var("GROQ_API_KEY") {
            config.llm.config.api_key = Some(api_key);
        }
        if let Ok(model) = std::env::var("LLM_MODEL_NAME") {
            config.llm.config.model = model;
        }
        if let Ok(temperature) = std::env::var("LLM_TEMPERATURE") {
            if let Ok(value) = temperature.parse() {
                config.llm.config.temperature = value;
            }
        }
        if let Ok(max_tokens) = std::env::var("LLM_MAX_OUTPUT_TOKENS") {
            if let Ok(value) = max_tokens.parse() {
                config.llm.config.max_tokens = value;
            }
        }

        // Embedder configuration
        if let Ok(model) = std::env::var("EMBEDDING_MODEL_NAME") {
            config.embedder.config.model = model;
        }
        if let Ok(url) = std::env::var("EMBEDDING_API_URL") {
            config.embedder.config.base_url = Some(url);
        }
        if let Ok(dims) = std::env::var("EMBEDDING_DIMENSIONS") {
            if let Ok(value) = dims.parse() {
                config.embedder.config.embedding_dims = value;
                config.vector_store.embedding_model_dims = value;
            }
        }
        if let Ok(batch) = std::env::var("EMBEDDING_BATCH_SIZE") {
            if let Ok(value) = batch.parse() {
                config.embedder.config.batch_size = value;
            }
        }
        if let Ok(timeout) = std::env::var("EMBEDDING_TIMEOUT") {
            if let Ok(value) = timeout.parse() {
                config.embedder.config.timeout_seconds = value;
            }
        }
        if let Ok(max_len) = std::env::var("EMBEDDING_MAX_TEXT_LENGTH") {
            if let Ok(value) = max_len.parse() {
                config.embedder.config.max_text_length = value;
            }
        }

        // Vector store and retrieval configuration
        if let Ok(name) = std::env::var("COLLECTION_NAME") {
            config.vector_store.collection_name = name;
        }
        if let Ok(k) = std::env::var("RETRIEVER_K") {
            if let Ok(value) = k.parse() {
                config.retrieval.candidate_k = value;
            }
        }
        if let Ok(threshold) = std::env::var("VECTOR_SIMILARITY_THRESHOLD") {
            if let Ok(value) = threshold.parse() {
                config.retrieval.similarity_threshold = value;
            }
        }

        config
    }

    /// Build configuration using builder pattern.
    pub fn builder() -> ExtractionConfigBuilder {
        ExtractionConfigBuilder::default()
    }
}

/// Builder for ExtractionConfig.
#[derive(Default)]
pub struct ExtractionConfigBuilder {
    config: ExtractionConfig,
}

impl ExtractionConfigBuilder {
    /// Set LLM configuration.
    pub fn llm(mut self, config: LlmProviderConfig) -> Self {
        self.config.llm = config;
        self
    }

    /// Set embedder configuration.
    pub fn embedder(mut self, config: EmbedderProviderConfig) -> Self {
        self.config.embedder = config;
        self
    }

    /// Set vector store configuration.
    pub fn vector_store(mut self, config: VectorStoreConfig) -> Self {
        self.config.vector_store = config;
        self
    }

    /// Set retrieval configuration.
    pub fn retrieval(mut self, config: RetrievalConfig) -> Self {
        self.config.retrieval = config;
        self
    }

    /// Set pacing delays.
    pub fn pacing(mut self, config: PacingConfig) -> Self {
        self.config.pacing = config;
        self
    }

    /// Set the batch attempt limit.
    pub fn max_attempts(mut self, max_attempts: u32) -> Self {
        self.config.max_attempts = max_attempts;
        self
    }

    /// Build the configuration.
    pub fn build(self) -> ExtractionConfig {
        self.config
    }
}
