//! Integration tests for the staged extraction pipeline.
//!
//! Drives the orchestrator end to end with scripted collaborators to pin
//! down the rollback rule, the empty-answer confirmation policy, latency
//! accumulation, and the attempt guard.

use async_trait::async_trait;
use futures::stream;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use pinout_core::error::{PinoutError, PinoutResult};
use pinout_core::traits::{
    Embedder, EmbeddingAction, GenerationOptions, Llm, LlmResponse, VectorRecord,
    VectorSearchResult, VectorStore, WebSource,
};
use pinout_core::types::{AttributeSpec, Filter, Message};
use pinout_core::{
    export_csv, AttributeCatalog, ChunkRetriever, DocumentIngestor, ExtractionInvoker,
    ExtractionSession, ExtractionSource, PacingConfig, RetrievalConfig, StageOrchestrator,
};

/// One scripted backend reply: either model output or a transport failure.
enum Reply {
    Content(&'static str),
    Fail(&'static str),
}

struct ScriptedLlm {
    replies: Mutex<VecDeque<Reply>>,
}

impl ScriptedLlm {
    fn new(replies: Vec<Reply>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into()),
        })
    }
}

#[async_trait]
impl Llm for ScriptedLlm {
    async fn generate(
        &self,
        _messages: &[Message],
        _options: Option<GenerationOptions>,
    ) -> PinoutResult<LlmResponse> {
        match self.replies.lock().unwrap().pop_front() {
            Some(Reply::Content(text)) => Ok(LlmResponse {
                content: Some(text.to_string()),
                usage: None,
            }),
            Some(Reply::Fail(message)) => Err(PinoutError::llm(message)),
            None => Err(PinoutError::llm("no scripted reply left")),
        }
    }

    fn model_name(&self) -> &str {
        "scripted"
    }
}

struct StaticEmbedder;

#[async_trait]
impl Embedder for StaticEmbedder {
    async fn embed(
        &self,
        _text: &str,
        _action: Option<EmbeddingAction>,
    ) -> PinoutResult<Vec<f32>> {
        Ok(vec![0.1, 0.2, 0.3])
    }

    fn dimension(&self) -> usize {
        3
    }

    fn model_name(&self) -> &str {
        "static"
    }
}

/// A minimal in-memory store: returns everything inserted, in order,
/// with a fixed similarity score.
#[derive(Default)]
struct MemoryStore {
    records: Mutex<Vec<VectorRecord>>,
}

#[async_trait]
impl VectorStore for MemoryStore {
    async fn insert(&self, records: Vec<VectorRecord>) -> PinoutResult<()> {
        self.records.lock().unwrap().extend(records);
        Ok(())
    }

    async fn search(
        &self,
        _query_vector: &[f32],
        limit: usize,
        _filters: Option<Filter>,
    ) -> PinoutResult<Vec<VectorSearchResult>> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .take(limit)
            .map(|record| VectorSearchResult {
                id: record.id.clone(),
                score: 0.9,
                payload: record.payload.clone(),
            })
            .collect())
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
        Ok(self.records.lock().unwrap().clone())
    }

    async fn reset(&self) -> PinoutResult<()> {
        self.records.lock().unwrap().clear();
        Ok(())
    }

    fn collection_name(&self) -> &str {
        "pipeline-test"
    }
}

struct FixedWeb(&'static str);

#[async_trait]
impl WebSource for FixedWeb {
    async fn fetch(&self, _part_number: &str) -> PinoutResult<Option<String>> {
        Ok(Some(self.0.to_string()))
    }
}

fn gender_catalog() -> AttributeCatalog {
    AttributeCatalog::new(vec![AttributeSpec::new(
        "Gender",
        "Extract the gender of the connector.",
        "Extract the gender of the connector from the context.",
        vec!["female".to_string(), "male".to_string()],
    )])
}

fn two_attribute_catalog() -> AttributeCatalog {
    AttributeCatalog::new(vec![
        AttributeSpec::new(
            "Gender",
            "Extract the gender of the connector.",
            "Extract the gender of the connector from the context.",
            vec!["female".to_string(), "male".to_string()],
        ),
        AttributeSpec::new(
            "Colour",
            "Extract the colour of the housing.",
            "Extract the colour of the housing from the context.",
            Vec::new(),
        ),
    ])
}

fn no_pacing() -> PacingConfig {
    PacingConfig {
        web_seconds: 0.0,
        document_seconds: 0.0,
        final_seconds: 0.0,
        manual_seconds: 0.0,
    }
}

fn orchestrator_with(
    catalog: AttributeCatalog,
    llm: Arc<ScriptedLlm>,
    store: Arc<MemoryStore>,
) -> StageOrchestrator {
    let retriever = ChunkRetriever::new(
        Arc::new(StaticEmbedder),
        store,
        RetrievalConfig::default(),
    );
    StageOrchestrator::new(catalog, ExtractionInvoker::new(llm), retriever)
        .with_pacing(no_pacing())
}

fn web_session(part: &str) -> ExtractionSession {
    let mut session = ExtractionSession::new();
    session.set_part_number(Some(part.to_string()));
    session
}

/// A later stage must never downgrade a confirmed answer: a failing
/// manual recheck leaves everything but latency untouched.
#[tokio::test]
async fn test_failing_recheck_leaves_confirmed_record_unchanged() {
    let llm = ScriptedLlm::new(vec![
        Reply::Content(r#"{"Gender": "male"}"#),
        Reply::Fail("backend exploded"),
    ]);
    let orchestrator = orchestrator_with(gender_catalog(), llm, Arc::new(MemoryStore::default()))
        .with_web_source(Arc::new(FixedWeb("The plug is a male connector.")));

    let mut session = web_session("1-1234567-1");
    orchestrator.run_batch(&mut session).await.unwrap();
    let before = session.results().get("Gender").unwrap().clone();
    assert_eq!(before.extracted_value, "male");
    assert_eq!(before.source, ExtractionSource::Web);

    orchestrator
        .manual_recheck(&mut session, &["Gender".to_string()])
        .await
        .unwrap();

    let after = session.results().get("Gender").unwrap();
    assert_eq!(after.extracted_value, before.extracted_value);
    assert_eq!(after.source, before.source);
    assert_eq!(after.raw_output, before.raw_output);
    assert_eq!(after.parse_error, before.parse_error);
    assert_eq!(after.is_success, before.is_success);
    assert_eq!(after.is_not_found, before.is_not_found);
    assert!(after.latency_seconds >= before.latency_seconds);
}

/// An accepted "none" answer that the final recheck cannot improve on is
/// confirmed, not replaced with a NOT FOUND sentinel.
#[tokio::test]
async fn test_none_answer_is_confirmed_by_final_recheck() {
    let llm = ScriptedLlm::new(vec![
        Reply::Content(r#"{"Gender": "none"}"#),
        Reply::Content(r#"{"Gender": "NOT FOUND"}"#),
    ]);
    let orchestrator = orchestrator_with(gender_catalog(), llm, Arc::new(MemoryStore::default()))
        .with_web_source(Arc::new(FixedWeb("No gender information on this page.")));

    let mut session = web_session("1-1234567-1");
    orchestrator.run_batch(&mut session).await.unwrap();

    let record = session.results().get("Gender").unwrap();
    assert_eq!(record.extracted_value, "none");
    assert_eq!(record.source, ExtractionSource::Web);
    assert!(record.is_success);
}

/// A web-stage NOT FOUND queues the attribute for the document stage,
/// which may then resolve it from retrieved context.
#[tokio::test]
async fn test_not_found_on_web_falls_through_to_document_stage() {
    let llm = ScriptedLlm::new(vec![
        Reply::Content(r#"{"Gender": "NOT FOUND"}"#),
        Reply::Content(r#"{"Gender": "female"}"#),
    ]);
    let orchestrator = orchestrator_with(gender_catalog(), llm, Arc::new(MemoryStore::default()))
        .with_web_source(Arc::new(FixedWeb("Receptacle housing, 2 positions.")));

    let mut session = web_session("1-1234567-1");
    orchestrator.run_batch(&mut session).await.unwrap();

    let record = session.results().get("Gender").unwrap();
    assert_eq!(record.extracted_value, "female");
    assert_eq!(record.source, ExtractionSource::Pdf);
    assert!(record.is_success);
}

/// When every stage comes up empty the record ends as the final-stage
/// NOT FOUND sentinel with the not-found flag set.
#[tokio::test]
async fn test_unresolved_attribute_ends_as_not_found_final() {
    let llm = ScriptedLlm::new(vec![
        Reply::Content(r#"{"Gender": "NOT FOUND"}"#),
        Reply::Content(r#"{"Gender": "NOT FOUND"}"#),
        Reply::Content(r#"{"Gender": "NOT FOUND"}"#),
    ]);
    let orchestrator = orchestrator_with(gender_catalog(), llm, Arc::new(MemoryStore::default()))
        .with_web_source(Arc::new(FixedWeb("Nothing relevant here.")));

    let mut session = web_session("1-1234567-1");
    orchestrator.run_batch(&mut session).await.unwrap();

    let record = session.results().get("Gender").unwrap();
    assert_eq!(record.extracted_value, "NOT FOUND (Final)");
    assert_eq!(record.source, ExtractionSource::FinalFallback);
    assert!(record.is_not_found);
    assert!(!record.is_success);
}

/// No web context at all: every attribute starts as a placeholder and the
/// document stage answers all of them.
#[tokio::test]
async fn test_skipped_web_stage_sends_every_attribute_to_pdf() {
    let llm = ScriptedLlm::new(vec![
        Reply::Content(r#"{"Gender": "male"}"#),
        Reply::Content(r#"{"Colour": "black"}"#),
    ]);
    let orchestrator = orchestrator_with(
        two_attribute_catalog(),
        llm,
        Arc::new(MemoryStore::default()),
    );

    let mut session = ExtractionSession::new();
    orchestrator.run_batch(&mut session).await.unwrap();

    let gender = session.results().get("Gender").unwrap();
    let colour = session.results().get("Colour").unwrap();
    assert_eq!(gender.source, ExtractionSource::Pdf);
    assert_eq!(colour.source, ExtractionSource::Pdf);
    assert_eq!(gender.extracted_value, "male");
    assert_eq!(colour.extracted_value, "black");
}

/// Repeated manual rechecks that keep failing must not drift the value.
#[tokio::test]
async fn test_repeated_failing_rechecks_do_not_drift() {
    let llm = ScriptedLlm::new(vec![
        Reply::Content(r#"{"Gender": "none"}"#),
        Reply::Content(r#"{"Gender": "NOT FOUND"}"#),
        Reply::Content(r#"{"Gender": "NOT FOUND"}"#),
        Reply::Content(r#"{"Gender": "NOT FOUND"}"#),
    ]);
    let orchestrator = orchestrator_with(gender_catalog(), llm, Arc::new(MemoryStore::default()))
        .with_web_source(Arc::new(FixedWeb("No gender information on this page.")));

    let mut session = web_session("1-1234567-1");
    orchestrator.run_batch(&mut session).await.unwrap();

    let selected = vec!["Gender".to_string()];
    orchestrator
        .manual_recheck(&mut session, &selected)
        .await
        .unwrap();
    let first = session.results().get("Gender").unwrap().clone();

    orchestrator
        .manual_recheck(&mut session, &selected)
        .await
        .unwrap();
    let second = session.results().get("Gender").unwrap();

    assert_eq!(first.extracted_value, "none");
    assert_eq!(second.extracted_value, first.extracted_value);
    assert_eq!(second.source, first.source);
    assert_eq!(second.source, ExtractionSource::Web);
}

/// Latency only ever accumulates, whichever way each stage goes.
#[tokio::test]
async fn test_latency_never_decreases_across_stages() {
    let llm = ScriptedLlm::new(vec![
        Reply::Content(r#"{"Gender": "male"}"#),
        Reply::Fail("down"),
        Reply::Fail("still down"),
    ]);
    let orchestrator = orchestrator_with(gender_catalog(), llm, Arc::new(MemoryStore::default()))
        .with_web_source(Arc::new(FixedWeb("The plug is a male connector.")));

    let mut session = web_session("1-1234567-1");
    orchestrator.run_batch(&mut session).await.unwrap();
    let after_batch = session.results().get("Gender").unwrap().latency_seconds;

    let selected = vec!["Gender".to_string()];
    orchestrator
        .manual_recheck(&mut session, &selected)
        .await
        .unwrap();
    let after_first = session.results().get("Gender").unwrap().latency_seconds;

    orchestrator
        .manual_recheck(&mut session, &selected)
        .await
        .unwrap();
    let after_second = session.results().get("Gender").unwrap().latency_seconds;

    assert!(after_batch >= 0.0);
    assert!(after_first >= after_batch);
    assert!(after_second >= after_first);
}

/// The fourth uncompleted batch entry aborts and clears the session, and
/// the next batch starts clean.
#[tokio::test]
async fn test_attempt_limit_aborts_then_recovers() {
    let llm = ScriptedLlm::new(vec![Reply::Content(r#"{"Gender": "male"}"#)]);
    let orchestrator = orchestrator_with(gender_catalog(), llm, Arc::new(MemoryStore::default()))
        .with_web_source(Arc::new(FixedWeb("The plug is a male connector.")));

    let mut session = web_session("1-1234567-1");
    for _ in 0..3 {
        session.register_attempt(3).unwrap();
    }

    let err = orchestrator.run_batch(&mut session).await.unwrap_err();
    assert!(err.to_string().contains("attempt limit"));
    assert!(session.results().is_empty());

    orchestrator.run_batch(&mut session).await.unwrap();
    assert_eq!(
        session.results().get("Gender").unwrap().extracted_value,
        "male"
    );
}

/// Ingested chunks survive the payload round trip and the retriever's
/// part and tag filters pick the right ones back out.
#[tokio::test]
async fn test_ingested_chunks_flow_through_retrieval_filters() {
    let store = Arc::new(MemoryStore::default());
    let embedder = Arc::new(StaticEmbedder);
    let catalog = two_attribute_catalog();
    let ingestor = DocumentIngestor::new(embedder.clone(), store.clone(), &catalog);

    let pages = vec![
        "Connector body, male version, part 1-1234567-1.".to_string(),
        "Mounting instructions and torque values.".to_string(),
    ];
    let chunks = ingestor
        .ingest_document("datasheet.pdf", &pages, Some("1-1234567-1"))
        .await
        .unwrap();
    assert_eq!(chunks.len(), 2);

    let retriever = ChunkRetriever::new(embedder, store, RetrievalConfig::default());

    // Only the first page mentions a Gender dictionary value, so the tag
    // filter keeps just that chunk.
    let tagged = retriever
        .retrieve("Gender", Some("Gender"), Some("1-1234567-1"))
        .await
        .unwrap();
    assert_eq!(tagged.len(), 1);
    assert!(tagged[0].text.contains("male version"));
    assert_eq!(tagged[0].metadata.page, 1);

    // No chunk carries a Colour tag: the filter must fall back to the
    // similarity-ordered candidates instead of returning nothing.
    let fallback = retriever
        .retrieve("Colour", Some("Colour"), Some("1-1234567-1"))
        .await
        .unwrap();
    assert_eq!(fallback.len(), 2);
}

/// A finished batch exports as the detailed results CSV.
#[tokio::test]
async fn test_batch_results_export_as_csv() {
    let llm = ScriptedLlm::new(vec![
        Reply::Content(r#"{"Gender": "male"}"#),
        Reply::Content(r#"{"Colour": "NOT FOUND"}"#),
        Reply::Content(r#"{"Colour": "natural"}"#),
    ]);
    let orchestrator = orchestrator_with(
        two_attribute_catalog(),
        llm,
        Arc::new(MemoryStore::default()),
    )
    .with_web_source(Arc::new(FixedWeb("male connector, colour not listed")));

    let mut session = web_session("1-1234567-1");
    orchestrator.run_batch(&mut session).await.unwrap();

    let records: Vec<_> = session.results().records().to_vec();
    let mut output = Vec::new();
    let stats = export_csv(stream::iter(records), &mut output).await.unwrap();
    assert_eq!(stats.exported, 2);
    assert!(stats.is_success());

    let content = String::from_utf8(output).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert!(lines[0].starts_with("Prompt Name,Extracted Value,Source,"));
    assert!(lines[1].starts_with("Gender,male,Web,true,"));
    assert!(lines[2].starts_with("Colour,natural,PDF,true,"));
}
