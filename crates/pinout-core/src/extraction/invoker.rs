//! One LLM call per attribute, timed and classified.

use std::sync::Arc;
use std::time::Instant;

use crate::extraction::classify::classify_raw;
use crate::extraction::prompts::{render_document_prompt, render_web_prompt};
use crate::traits::Llm;
use crate::types::{round2, ExtractionStage, Message, Outcome};

/// Everything needed to run one extraction call.
#[derive(Debug, Clone)]
pub struct ExtractionContext {
    /// Stage this call belongs to. Picks the prompt template and the
    /// classification rules.
    pub stage: ExtractionStage,
    /// Attribute key the model must answer under.
    pub attribute_key: String,
    /// Instruction text, already augmented for recheck stages.
    pub instructions: String,
    /// Cleaned web text or joined document chunks.
    pub source_text: String,
    /// JSON rendering of the allowed dictionary values.
    pub dictionary_block: String,
    /// Part number, when the caller supplied one.
    pub part_number: Option<String>,
}

impl ExtractionContext {
    /// Context for a web extraction call.
    pub fn web(
        attribute_key: impl Into<String>,
        instructions: impl Into<String>,
        cleaned_web_data: impl Into<String>,
    ) -> Self {
        Self {
            stage: ExtractionStage::Web,
            attribute_key: attribute_key.into(),
            instructions: instructions.into(),
            source_text: cleaned_web_data.into(),
            dictionary_block: String::new(),
            part_number: None,
        }
    }

    /// Context for a document call in any of the fallback stages.
    pub fn document(
        stage: ExtractionStage,
        attribute_key: impl Into<String>,
        instructions: impl Into<String>,
        dictionary_block: impl Into<String>,
        context: impl Into<String>,
        part_number: Option<String>,
    ) -> Self {
        Self {
            stage,
            attribute_key: attribute_key.into(),
            instructions: instructions.into(),
            source_text: context.into(),
            dictionary_block: dictionary_block.into(),
            part_number,
        }
    }

    fn render_prompt(&self) -> String {
        match self.stage {
            ExtractionStage::Web => {
                render_web_prompt(&self.attribute_key, &self.instructions, &self.source_text)
            }
            ExtractionStage::PdfFallback
            | ExtractionStage::FinalFallback
            | ExtractionStage::ManualRecheck => render_document_prompt(
                &self.attribute_key,
                &self.instructions,
                &self.dictionary_block,
                &self.source_text,
                self.part_number.as_deref(),
            ),
        }
    }
}

/// Result of a single timed extraction call.
#[derive(Debug, Clone)]
pub struct InvocationResult {
    /// Raw model output, or a synthesized error payload when the call
    /// itself failed.
    pub raw_output: String,
    /// Classified outcome.
    pub outcome: Outcome,
    /// Wall-clock call duration, rounded to centiseconds.
    pub latency_seconds: f64,
}

/// Runs extraction calls against a single LLM backend.
pub struct ExtractionInvoker {
    llm: Arc<dyn Llm>,
}

impl ExtractionInvoker {
    pub fn new(llm: Arc<dyn Llm>) -> Self {
        Self { llm }
    }

    /// Run one extraction call and classify the response.
    ///
    /// A failed backend call never surfaces as an `Err`: the error is
    /// folded into a `{"error": ...}` payload and classified like any
    /// other response, so rate limits and transport failures land in
    /// the same outcome model as model answers.
    pub async fn invoke(&self, context: &ExtractionContext) -> InvocationResult {
        let prompt = context.render_prompt();
        let messages = [Message::user(prompt)];

        let started = Instant::now();
        let raw_output = match self.llm.generate(&messages, None).await {
            Ok(response) => response.content_or_empty().to_string(),
            Err(e) => serde_json::json!({
                "error": format!("Exception during {} call: {}", context.stage.label(), e)
            })
            .to_string(),
        };
        let latency_seconds = round2(started.elapsed().as_secs_f64());

        let outcome = classify_raw(&raw_output, &context.attribute_key, context.stage);
        tracing::debug!(
            attribute = %context.attribute_key,
            stage = context.stage.label(),
            context_chars = context.source_text.len(),
            latency_seconds,
            success = matches!(outcome, Outcome::Found(_)),
            "extraction call finished"
        );

        InvocationResult {
            raw_output,
            outcome,
            latency_seconds,
        }
    }
}
