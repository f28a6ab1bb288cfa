//! Groq LLM provider implementation.
//!
//! Groq exposes an OpenAI-compatible chat completions endpoint; this
//! client speaks that dialect directly. Rate-limited calls surface as
//! [`PinoutError::RateLimit`] so the web stage can classify them.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use pinout_core::error::{PinoutError, PinoutResult};
use pinout_core::traits::{
    GenerationOptions, Llm, LlmConfig, LlmResponse, ResponseFormat, TokenUsage,
};
use pinout_core::types::{Message, MessageRole};

const GROQ_API_URL: &str = "https://api.groq.com/openai/v1";

/// Groq LLM provider.
pub struct GroqLlm {
    client: Client,
    config: LlmConfig,
    base_url: String,
}

#[derive(Debug, Serialize)]
struct GroqRequest {
    model: String,
    messages: Vec<GroqMessage>,
    temperature: f32,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<GroqResponseFormat>,
}

#[derive(Debug, Serialize)]
struct GroqMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Serialize)]
struct GroqResponseFormat {
    #[serde(rename = "type")]
    format_type: &'static str,
}

#[derive(Debug, Deserialize)]
struct GroqResponse {
    choices: Vec<GroqChoice>,
    #[serde(default)]
    usage: Option<GroqUsage>,
}

#[derive(Debug, Deserialize)]
struct GroqChoice {
    message: GroqChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct GroqChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GroqUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct GroqError {
    error: GroqErrorDetail,
}

#[derive(Debug, Deserialize)]
struct GroqErrorDetail {
    message: String,
}

impl GroqLlm {
    /// Create a new Groq LLM provider.
    pub fn new(config: LlmConfig) -> PinoutResult<Self> {
        let api_key = config
            .api_key
            .clone()
            .or_else(|| std::env::var("GROQ_API_KEY").ok())
            .ok_or_else(|| {
                PinoutError::Configuration("Groq API key not found. Set GROQ_API_KEY environment variable or provide api_key in config.".to_string())
            })?;

        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::AUTHORIZATION,
            format!("Bearer {}", api_key)
                .parse()
                .map_err(|_| PinoutError::Configuration("Invalid API key format".to_string()))?,
        );
        headers.insert(
            reqwest::header::CONTENT_TYPE,
            "application/json"
                .parse()
                .map_err(|_| PinoutError::Configuration("Invalid content type".to_string()))?,
        );

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| {
                PinoutError::Configuration(format!("Failed to create HTTP client: {}", e))
            })?;

        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| GROQ_API_URL.to_string());

        let mut config = config;
        if config.model.is_empty() {
            config.model = "qwen/qwen3-32b".to_string();
        }

        Ok(Self {
            client,
            config,
            base_url,
        })
    }
}

#[async_trait]
impl Llm for GroqLlm {
    async fn generate(
        &self,
        messages: &[Message],
        options: Option<GenerationOptions>,
    ) -> PinoutResult<LlmResponse> {
        let options = options.unwrap_or_default();

        let chat_messages: Vec<GroqMessage> = messages
            .iter()
            .map(|m| GroqMessage {
                role: match m.role {
                    MessageRole::System => "system",
                    MessageRole::User => "user",
                    MessageRole::Assistant => "assistant",
                },
                content: m.content.clone(),
            })
            .collect();

        let response_format = match options.response_format {
            Some(ResponseFormat::Json) => Some(GroqResponseFormat {
                format_type: "json_object",
            }),
            _ => None,
        };

        let request = GroqRequest {
            model: self.config.model.clone(),
            messages: chat_messages,
            temperature: options.temperature.unwrap_or(self.config.temperature),
            max_tokens: options.max_tokens.unwrap_or(self.config.max_tokens),
            response_format,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .json(&request)
            .send()
            .await
            .map_err(|e| PinoutError::llm(format!("Groq API request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| PinoutError::llm(format!("Failed to read response body: {}", e)))?;

        if !status.is_success() {
            let error: Result<GroqError, _> = serde_json::from_str(&body);
            let message = error
                .map(|e| e.error.message)
                .unwrap_or_else(|_| body.clone());
            return Err(PinoutError::from_http_status(status.as_u16(), &message));
        }

        let response: GroqResponse = serde_json::from_str(&body)
            .map_err(|e| PinoutError::llm(format!("Failed to parse response: {}", e)))?;

        let content = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content);

        let usage = response.usage.map(|u| TokenUsage {
            prompt_tokens: u.prompt_tokens,
            completion_tokens: u.completion_tokens,
            total_tokens: u.total_tokens,
        });

        tracing::debug!(
            model = self.config.model.as_str(),
            has_content = content.is_some(),
            "groq chat completion finished"
        );

        Ok(LlmResponse { content, usage })
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}
