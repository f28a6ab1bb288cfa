//! The staged extraction pipeline.
//!
//! One orchestrator drives a whole batch: web extraction per attribute,
//! a single structured document-extraction call (or per-attribute PDF
//! context extraction when that API is not configured), and a final
//! recheck for everything still unresolved. Attribute-level failures
//! never abort a batch; they are classified into the record and handed
//! to the next stage. Only the top-level attempt guard is fatal, and
//! even that clears session state instead of propagating a crash.

use std::sync::Arc;
use std::time::Instant;

use crate::catalog::AttributeCatalog;
use crate::config::PacingConfig;
use crate::error::PinoutResult;
use crate::extraction::{
    augment_for_recheck, lookup_attribute, ExtractionContext, ExtractionInvoker,
};
use crate::pipeline::recheck::{apply_recheck, should_rollback};
use crate::retrieval::ChunkRetriever;
use crate::session::ExtractionSession;
use crate::store::ResultStore;
use crate::traits::{DocumentExtractor, WebSource};
use crate::types::{round2, AttributeRecord, ExtractionSource, ExtractionStage};

/// Drives the extraction stages over one [`ExtractionSession`].
pub struct StageOrchestrator {
    catalog: AttributeCatalog,
    invoker: ExtractionInvoker,
    retriever: ChunkRetriever,
    document_extractor: Option<Arc<dyn DocumentExtractor>>,
    web_source: Option<Arc<dyn WebSource>>,
    pacing: PacingConfig,
    max_attempts: u32,
}

impl StageOrchestrator {
    pub fn new(
        catalog: AttributeCatalog,
        invoker: ExtractionInvoker,
        retriever: ChunkRetriever,
    ) -> Self {
        Self {
            catalog,
            invoker,
            retriever,
            document_extractor: None,
            web_source: None,
            pacing: PacingConfig::default(),
            max_attempts: 3,
        }
    }

    /// Attach a structured document-extraction backend.
    pub fn with_document_extractor(mut self, extractor: Arc<dyn DocumentExtractor>) -> Self {
        self.document_extractor = Some(extractor);
        self
    }

    /// Attach a web text source for the first stage.
    pub fn with_web_source(mut self, source: Arc<dyn WebSource>) -> Self {
        self.web_source = Some(source);
        self
    }

    /// Override the delay inserted between backend calls.
    pub fn with_pacing(mut self, pacing: PacingConfig) -> Self {
        self.pacing = pacing;
        self
    }

    /// Override the batch re-entry limit.
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Run the full pipeline for the session's current part and document.
    ///
    /// Replaces the session's result store with a fresh one, runs every
    /// stage in order, and re-arms the attempt guard on completion.
    pub async fn run_batch(&self, session: &mut ExtractionSession) -> PinoutResult<()> {
        let attempt = session.register_attempt(self.max_attempts)?;
        tracing::info!(
            attempt,
            part_number = ?session.part_number(),
            attributes = self.catalog.len(),
            "starting extraction batch"
        );

        self.run_web_stage(session).await?;

        let queued = session.results().document_fallback_queue();
        self.run_document_stage(session, &queued).await?;

        let recheck = session.results().final_recheck_queue();
        self.run_recheck_stage(session, &recheck, ExtractionStage::FinalFallback)
            .await?;

        session.complete_batch();
        tracing::info!(total = session.results().len(), "extraction batch finished");
        Ok(())
    }

    /// Re-run selected attributes with the recheck rules, at the user's
    /// request.
    ///
    /// Any attribute may be selected, not just failed ones. The call can
    /// be repeated freely; each run applies the rollback rule against
    /// whatever the store holds at that moment.
    pub async fn manual_recheck(
        &self,
        session: &mut ExtractionSession,
        selected: &[String],
    ) -> PinoutResult<()> {
        tracing::info!(count = selected.len(), "starting manual recheck");
        self.run_recheck_stage(session, selected, ExtractionStage::ManualRecheck)
            .await
    }

    /// Stage 1: one extraction call per attribute over cleaned web text.
    async fn run_web_stage(&self, session: &mut ExtractionSession) -> PinoutResult<()> {
        let keys: Vec<String> = self.catalog.keys().map(str::to_string).collect();
        *session.results_mut() = ResultStore::for_attributes(keys.iter().map(String::as_str));

        let Some(web_text) = self.web_context(session).await else {
            tracing::info!("no web data for this part, every attribute goes to the document stage");
            return Ok(());
        };

        tracing::info!(attributes = self.catalog.len(), "running web extraction");
        for spec in self.catalog.all() {
            let context = ExtractionContext::web(
                spec.key.as_str(),
                spec.web_instructions.as_str(),
                web_text.as_str(),
            );
            let invocation = self.invoker.invoke(&context).await;
            let record = AttributeRecord::from_outcome(
                spec.key.as_str(),
                ExtractionStage::Web,
                &invocation.outcome,
                invocation.raw_output.as_str(),
                invocation.latency_seconds,
            );
            session.results_mut().replace(record);
            tokio::time::sleep(self.pacing.for_stage(ExtractionStage::Web)).await;
        }
        Ok(())
    }

    /// Stage 2: structured extraction when configured, PDF context otherwise.
    async fn run_document_stage(
        &self,
        session: &mut ExtractionSession,
        queued: &[String],
    ) -> PinoutResult<()> {
        if queued.is_empty() {
            tracing::info!("web extraction succeeded for every attribute, skipping document stage");
            return Ok(());
        }
        tracing::info!(count = queued.len(), "running document fallback");

        match &self.document_extractor {
            Some(extractor) => {
                self.run_structured_extraction(session, queued, extractor.as_ref())
                    .await
            }
            None => self.run_pdf_fallback(session, queued).await,
        }
    }

    /// One structured extraction call covering every queued attribute.
    async fn run_structured_extraction(
        &self,
        session: &mut ExtractionSession,
        queued: &[String],
        extractor: &dyn DocumentExtractor,
    ) -> PinoutResult<()> {
        tracing::info!(
            provider = extractor.provider_name(),
            "running structured document extraction"
        );

        let started = Instant::now();
        let extraction = match session.file_bytes() {
            Some(bytes) => extractor.extract(bytes).await,
            None => {
                tracing::error!("no uploaded file bytes, structured extraction cannot run");
                return Ok(());
            }
        };
        let run_seconds = round2(started.elapsed().as_secs_f64());

        match extraction {
            Ok(mapping) if !mapping.is_empty() => {
                let raw_output = serde_json::to_string(&mapping).unwrap_or_default();
                tracing::info!(
                    seconds = run_seconds,
                    keys = mapping.len(),
                    "structured extraction finished"
                );
                for key in queued {
                    let total_latency = self.accumulated_latency(session, key, run_seconds);
                    let record = match lookup_attribute(&mapping, key) {
                        Some(value) => {
                            tracing::debug!(attribute = key.as_str(), "structured value adopted");
                            AttributeRecord {
                                prompt_name: key.clone(),
                                extracted_value: value,
                                source: ExtractionSource::NuMindApi,
                                raw_output: raw_output.clone(),
                                parse_error: None,
                                is_success: true,
                                is_error: false,
                                is_not_found: false,
                                is_rate_limited: false,
                                latency_seconds: total_latency,
                            }
                        }
                        None => AttributeRecord {
                            prompt_name: key.clone(),
                            extracted_value: "NOT FOUND".to_string(),
                            source: ExtractionSource::NuMindApi,
                            raw_output: raw_output.clone(),
                            parse_error: None,
                            is_success: false,
                            is_error: false,
                            is_not_found: true,
                            is_rate_limited: false,
                            latency_seconds: total_latency,
                        },
                    };
                    session.results_mut().replace(record);
                }
            }
            Ok(_) => {
                tracing::error!("structured extraction returned no results");
                for key in queued {
                    let total_latency = self.accumulated_latency(session, key, run_seconds);
                    session.results_mut().replace(AttributeRecord {
                        prompt_name: key.clone(),
                        extracted_value: "NuMind Extraction Failed".to_string(),
                        source: ExtractionSource::NuMindApi,
                        raw_output: "NuMind API returned no results".to_string(),
                        parse_error: Some("NuMind extraction failed".to_string()),
                        is_success: false,
                        is_error: true,
                        is_not_found: false,
                        is_rate_limited: false,
                        latency_seconds: total_latency,
                    });
                }
            }
            Err(e) => {
                tracing::error!(error = %e, "structured extraction failed");
                let message = e.to_string();
                let summary: String = message.chars().take(100).collect();
                for key in queued {
                    let total_latency = self.accumulated_latency(session, key, run_seconds);
                    session.results_mut().replace(AttributeRecord {
                        prompt_name: key.clone(),
                        extracted_value: format!("NuMind Error: {summary}"),
                        source: ExtractionSource::NuMindApi,
                        raw_output: format!("Exception: {message}"),
                        parse_error: Some(message.clone()),
                        is_success: false,
                        is_error: true,
                        is_not_found: false,
                        is_rate_limited: false,
                        latency_seconds: total_latency,
                    });
                }
            }
        }
        Ok(())
    }

    /// Per-attribute extraction over retrieved PDF context.
    async fn run_pdf_fallback(
        &self,
        session: &mut ExtractionSession,
        queued: &[String],
    ) -> PinoutResult<()> {
        tracing::warn!("structured extraction unavailable, extracting from retrieved context");
        let part_number = session.part_number().map(str::to_string);

        for key in queued {
            let spec = self.catalog.get(key)?;

            let started = Instant::now();
            let context_text = self.retrieve_context(key, part_number.as_deref()).await;
            let context = ExtractionContext::document(
                ExtractionStage::PdfFallback,
                spec.key.as_str(),
                spec.pdf_instructions.as_str(),
                spec.dictionary_block(),
                context_text,
                part_number.clone(),
            );
            let invocation = self.invoker.invoke(&context).await;
            let run_seconds = round2(started.elapsed().as_secs_f64());

            let total_latency = self.accumulated_latency(session, key, run_seconds);
            let record = AttributeRecord::from_outcome(
                key.as_str(),
                ExtractionStage::PdfFallback,
                &invocation.outcome,
                invocation.raw_output.as_str(),
                total_latency,
            );
            session.results_mut().replace(record);
            tokio::time::sleep(self.pacing.for_stage(ExtractionStage::PdfFallback)).await;
        }
        Ok(())
    }

    /// Stage 3 and manual recheck share this loop; only the stage differs.
    async fn run_recheck_stage(
        &self,
        session: &mut ExtractionSession,
        keys: &[String],
        stage: ExtractionStage,
    ) -> PinoutResult<()> {
        if keys.is_empty() {
            tracing::info!(stage = stage.label(), "no attributes need rechecking");
            return Ok(());
        }
        tracing::info!(count = keys.len(), stage = stage.label(), "running recheck");
        let part_number = session.part_number().map(str::to_string);

        for key in keys {
            let spec = self.catalog.get(key)?;
            let Some(original) = session.results().get(key).cloned() else {
                tracing::warn!(attribute = key.as_str(), "no stored record to recheck, skipping");
                continue;
            };

            let started = Instant::now();
            let context_text = self.retrieve_context(key, part_number.as_deref()).await;
            let instructions =
                augment_for_recheck(&spec.pdf_instructions, &original.extracted_value, stage);
            let context = ExtractionContext::document(
                stage,
                spec.key.as_str(),
                instructions,
                spec.dictionary_block(),
                context_text,
                part_number.clone(),
            );
            let invocation = self.invoker.invoke(&context).await;
            let run_seconds = round2(started.elapsed().as_secs_f64());

            let rolled_back = should_rollback(&original, &invocation.outcome, stage);
            let updated = apply_recheck(
                &original,
                &invocation.outcome,
                &invocation.raw_output,
                stage,
                run_seconds,
            );
            if rolled_back {
                tracing::info!(
                    attribute = key.as_str(),
                    kept = updated.extracted_value.as_str(),
                    stage = stage.label(),
                    "recheck kept the stored value"
                );
            } else {
                tracing::info!(
                    attribute = key.as_str(),
                    value = updated.extracted_value.as_str(),
                    stage = stage.label(),
                    "recheck adopted a new value"
                );
            }
            session.results_mut().replace(updated);
            tokio::time::sleep(self.pacing.for_stage(stage)).await;
        }
        Ok(())
    }

    /// Cleaned web text for the current part, fetched once and cached on
    /// the session.
    async fn web_context(&self, session: &mut ExtractionSession) -> Option<String> {
        if let Some(text) = session.web_context() {
            return Some(text.to_string());
        }
        let source = self.web_source.as_ref()?;
        let part = session.part_number()?.trim().to_string();
        if part.is_empty() {
            return None;
        }
        match source.fetch(&part).await {
            Ok(Some(text)) => {
                session.set_web_context(Some(text.clone()));
                Some(text)
            }
            Ok(None) => {
                tracing::info!(part_number = part.as_str(), "no web data found for part");
                None
            }
            Err(e) => {
                tracing::warn!(error = %e, "web fetch failed, continuing without web data");
                None
            }
        }
    }

    /// Joined chunk text for an attribute, empty when retrieval fails.
    async fn retrieve_context(&self, attribute_key: &str, part_number: Option<&str>) -> String {
        match self
            .retriever
            .retrieve(attribute_key, Some(attribute_key), part_number)
            .await
        {
            Ok(chunks) => chunks
                .iter()
                .map(|chunk| chunk.text.as_str())
                .collect::<Vec<_>>()
                .join("\n\n"),
            Err(e) => {
                tracing::warn!(
                    attribute = attribute_key,
                    error = %e,
                    "chunk retrieval failed, extracting with empty context"
                );
                String::new()
            }
        }
    }

    fn accumulated_latency(
        &self,
        session: &ExtractionSession,
        key: &str,
        run_seconds: f64,
    ) -> f64 {
        let previous = session
            .results()
            .get(key)
            .map(|record| record.latency_seconds)
            .unwrap_or(0.0);
        round2(previous + run_seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RetrievalConfig;
    use crate::error::{PinoutError, PinoutResult};
    use crate::traits::{
        Embedder, GenerationOptions, Llm, LlmResponse, VectorRecord, VectorSearchResult,
        VectorStore,
    };
    use crate::types::{AttributeSpec, Filter, Message};
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    struct QueueLlm {
        responses: Mutex<VecDeque<String>>,
    }

    impl QueueLlm {
        fn new(responses: &[&str]) -> Arc<Self> {
            Arc::new(Self {
                responses: Mutex::new(responses.iter().map(|s| s.to_string()).collect()),
            })
        }
    }

    #[async_trait]
    impl Llm for QueueLlm {
        async fn generate(
            &self,
            _messages: &[Message],
            _options: Option<GenerationOptions>,
        ) -> PinoutResult<LlmResponse> {
            let next = self.responses.lock().unwrap().pop_front();
            match next {
                Some(content) => Ok(LlmResponse {
                    content: Some(content),
                    usage: None,
                }),
                None => Err(PinoutError::llm("queue exhausted")),
            }
        }

        fn model_name(&self) -> &str {
            "queued"
        }
    }

    struct NullEmbedder;

    #[async_trait]
    impl Embedder for NullEmbedder {
        async fn embed(
            &self,
            _text: &str,
            _action: Option<crate::traits::EmbeddingAction>,
        ) -> PinoutResult<Vec<f32>> {
            Ok(vec![0.0; 4])
        }

        fn dimension(&self) -> usize {
            4
        }

        fn model_name(&self) -> &str {
            "null"
        }
    }

    struct EmptyStore;

    #[async_trait]
    impl VectorStore for EmptyStore {
        async fn insert(&self, _records: Vec<VectorRecord>) -> PinoutResult<()> {
            Ok(())
        }

        async fn search(
            &self,
            _query_vector: &[f32],
            _limit: usize,
            _filters: Option<Filter>,
        ) -> PinoutResult<Vec<VectorSearchResult>> {
            Ok(Vec::new())
        }

        async fn get(&self, _id: &str) -> PinoutResult<Option<VectorRecord>> {
            Ok(None)
        }

        async fn delete(&self, _id: &str) -> PinoutResult<()> {
            Ok(())
        }

        async fn list(
            &self,
            _filters: Option<Filter>,
            _limit: Option<usize>,
        ) -> PinoutResult<Vec<VectorRecord>> {
            Ok(Vec::new())
        }

        async fn reset(&self) -> PinoutResult<()> {
            Ok(())
        }

        fn collection_name(&self) -> &str {
            "test"
        }
    }

    struct CountingWebSource {
        text: String,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl WebSource for CountingWebSource {
        async fn fetch(&self, _part_number: &str) -> PinoutResult<Option<String>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(Some(self.text.clone()))
        }
    }

    struct FixedExtractor {
        mapping: serde_json::Map<String, serde_json::Value>,
    }

    #[async_trait]
    impl DocumentExtractor for FixedExtractor {
        async fn extract(
            &self,
            _file_bytes: &[u8],
        ) -> PinoutResult<serde_json::Map<String, serde_json::Value>> {
            Ok(self.mapping.clone())
        }

        fn provider_name(&self) -> &str {
            "fixed"
        }
    }

    fn small_catalog() -> AttributeCatalog {
        AttributeCatalog::new(vec![
            AttributeSpec::new(
                "Gender",
                "web instructions",
                "pdf instructions",
                vec!["female".to_string(), "male".to_string()],
            ),
            AttributeSpec::new("Colour", "web instructions", "pdf instructions", Vec::new()),
        ])
    }

    fn orchestrator(catalog: AttributeCatalog, llm: Arc<dyn Llm>) -> StageOrchestrator {
        let retriever = ChunkRetriever::new(
            Arc::new(NullEmbedder),
            Arc::new(EmptyStore),
            RetrievalConfig::default(),
        );
        StageOrchestrator::new(catalog, ExtractionInvoker::new(llm), retriever)
            .with_pacing(PacingConfig {
                web_seconds: 0.0,
                document_seconds: 0.0,
                final_seconds: 0.0,
                manual_seconds: 0.0,
            })
    }

    #[tokio::test]
    async fn test_batch_without_web_runs_pdf_then_recheck() {
        // No web source: both attributes start as placeholders, go through
        // the PDF fallback, and Colour needs the final recheck on top.
        let llm = QueueLlm::new(&[
            r#"{"Gender": "male"}"#,
            r#"{"Colour": "NOT FOUND"}"#,
            r#"{"Colour": "black"}"#,
        ]);
        let orchestrator = orchestrator(small_catalog(), llm);
        let mut session = ExtractionSession::new();

        orchestrator.run_batch(&mut session).await.unwrap();

        let gender = session.results().get("Gender").unwrap();
        assert_eq!(gender.extracted_value, "male");
        assert_eq!(gender.source, ExtractionSource::Pdf);
        assert!(gender.is_success);

        let colour = session.results().get("Colour").unwrap();
        assert_eq!(colour.extracted_value, "black");
        assert_eq!(colour.source, ExtractionSource::FinalFallback);
        assert_eq!(session.extraction_attempts(), 0);
    }

    #[tokio::test]
    async fn test_web_text_fetched_once_per_part() {
        let llm = QueueLlm::new(&[r#"{"Gender": "male"}"#, r#"{"Gender": "male"}"#]);
        let catalog = AttributeCatalog::new(vec![AttributeSpec::new(
            "Gender",
            "web instructions",
            "pdf instructions",
            Vec::new(),
        )]);
        let web = Arc::new(CountingWebSource {
            text: "cleaned page".to_string(),
            calls: AtomicUsize::new(0),
        });
        let orchestrator = orchestrator(catalog, llm).with_web_source(web.clone());

        let mut session = ExtractionSession::new();
        session.set_part_number(Some("1-1234567-1".to_string()));

        orchestrator.run_batch(&mut session).await.unwrap();
        orchestrator.run_batch(&mut session).await.unwrap();

        assert_eq!(web.calls.load(Ordering::SeqCst), 1);
        let gender = session.results().get("Gender").unwrap();
        assert_eq!(gender.source, ExtractionSource::Web);
    }

    #[tokio::test]
    async fn test_structured_extraction_covers_queued_attributes() {
        // Web stage is skipped, the extractor answers Gender only, and the
        // recheck then resolves Colour from document context.
        let llm = QueueLlm::new(&[r#"{"Colour": "green"}"#]);
        let mut mapping = serde_json::Map::new();
        mapping.insert("Gender".to_string(), serde_json::json!("male"));
        let orchestrator = orchestrator(small_catalog(), llm)
            .with_document_extractor(Arc::new(FixedExtractor { mapping }));

        let mut session = ExtractionSession::new();
        session.set_file_bytes(Some(b"%PDF-1.4".to_vec()));

        orchestrator.run_batch(&mut session).await.unwrap();

        let gender = session.results().get("Gender").unwrap();
        assert_eq!(gender.extracted_value, "male");
        assert_eq!(gender.source, ExtractionSource::NuMindApi);
        assert!(gender.raw_output.contains("\"Gender\""));

        let colour = session.results().get("Colour").unwrap();
        assert_eq!(colour.extracted_value, "green");
        assert_eq!(colour.source, ExtractionSource::FinalFallback);
    }

    #[tokio::test]
    async fn test_extractor_without_file_bytes_leaves_records_to_recheck() {
        let llm = QueueLlm::new(&[r#"{"Gender": "female"}"#, r#"{"Colour": "natural"}"#]);
        let orchestrator = orchestrator(small_catalog(), llm).with_document_extractor(Arc::new(
            FixedExtractor {
                mapping: serde_json::Map::new(),
            },
        ));

        let mut session = ExtractionSession::new();
        orchestrator.run_batch(&mut session).await.unwrap();

        // Stage 2 could not run, so the placeholders fell through to the
        // final recheck, which answered both attributes.
        let gender = session.results().get("Gender").unwrap();
        assert_eq!(gender.extracted_value, "female");
        assert_eq!(gender.source, ExtractionSource::FinalFallback);
    }

    #[tokio::test]
    async fn test_attempt_guard_aborts_the_fourth_entry() {
        let llm = QueueLlm::new(&[]);
        let orchestrator = orchestrator(small_catalog(), llm);
        let mut session = ExtractionSession::new();
        for _ in 0..3 {
            session.register_attempt(3).unwrap();
        }

        let err = orchestrator.run_batch(&mut session).await.unwrap_err();
        assert!(err.to_string().contains("attempt limit"));
        assert!(session.results().is_empty());
        assert_eq!(session.extraction_attempts(), 0);
    }
}
