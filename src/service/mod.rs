//! Startup state machine and user-facing error mapping.
//!
//! Initialization runs exactly once per process: load the knowledge document,
//! then (for the retrieval strategy) chunk, embed and index it. The outcome is
//! terminal — a failed startup is reported identically on every request until
//! the process restarts, and nothing is ever reloaded.

use crate::chunking::FixedSizeChunker;
use crate::config::{ContextStrategy, Prompts, Settings};
use crate::conversation::Query;
use crate::embedding::OpenAIEmbedder;
use crate::error::{DestekError, Result};
use crate::generation::OpenAIGenerator;
use crate::index::KnowledgeIndex;
use crate::knowledge::KnowledgeDocument;
use crate::rag::{AnswerEngine, FullDocumentContext, RetrievalContext};
use std::sync::Arc;
use tracing::{error, info};

/// Fixed prefix of the setup-failure answer.
const SETUP_ERROR_PREFIX: &str = "Uygulama başlatılırken bir hata oluştu";

/// Fixed answer when the provider's safety filter blocks a response.
const SAFETY_FILTERED_ANSWER: &str =
    "Üzgünüm, bu mesaja yanıt veremiyorum. Sorunuzu farklı bir şekilde ifade ederseniz yardımcı olmaktan memnuniyet duyarım.";

/// Terminal per-process service state, decided once at startup.
pub enum ServiceState {
    /// Pipeline built; requests run against it for the process lifetime.
    Ready(Arc<AnswerEngine>),
    /// Startup failed; the detail is frozen into every subsequent answer.
    Failed(String),
}

impl ServiceState {
    /// Run startup initialization, capturing any failure as `Failed`.
    pub async fn initialize(settings: &Settings) -> Self {
        match build_engine(settings).await {
            Ok(engine) => {
                info!(
                    strategy = %settings.retrieval.strategy,
                    "Service initialized"
                );
                ServiceState::Ready(Arc::new(engine))
            }
            Err(e) => {
                error!("Startup failed: {}", e);
                ServiceState::Failed(e.to_string())
            }
        }
    }

    /// Answer a query, mapping every failure into user-facing Turkish text.
    ///
    /// Never returns an error: failure semantics live in the answer payload.
    pub async fn answer(&self, query: &Query) -> String {
        match self {
            ServiceState::Failed(detail) => {
                format!("{}: {}.", SETUP_ERROR_PREFIX, detail)
            }
            ServiceState::Ready(engine) => match engine.answer(query).await {
                Ok(answer) => answer,
                Err(e) => request_error_answer(&e),
            },
        }
    }
}

/// Map a per-request failure to the text embedded in the answer field.
pub fn request_error_answer(error: &DestekError) -> String {
    match error {
        DestekError::SafetyFiltered => SAFETY_FILTERED_ANSWER.to_string(),
        other => format!("Cevap üretilirken bir hata oluştu: {}", other),
    }
}

/// Build the full answer pipeline from settings.
async fn build_engine(settings: &Settings) -> Result<AnswerEngine> {
    let document = Arc::new(KnowledgeDocument::load(&settings.knowledge_path())?);
    info!(
        chars = document.char_count(),
        "Loaded knowledge document from {}",
        settings.knowledge.path
    );

    let prompts = Prompts::load(
        settings.prompts.custom_dir.as_deref(),
        Some(&settings.prompts.variables),
    )?;

    let generator = Arc::new(OpenAIGenerator::new(
        &settings.generation.model,
        settings.generation.temperature,
    ));

    match settings.retrieval.strategy {
        ContextStrategy::FullDocument => Ok(AnswerEngine::new(
            Box::new(FullDocumentContext::new(document)),
            generator,
            prompts,
        )),
        ContextStrategy::Retrieval => {
            let chunker = FixedSizeChunker::new(settings.chunking.chunk_size)?;
            let chunks = chunker.split(document.text());
            info!(chunks = chunks.len(), "Split knowledge document");

            let embedder = Arc::new(OpenAIEmbedder::with_config(
                &settings.embedding.model,
                settings.embedding.dimensions as usize,
            ));
            let index = Arc::new(KnowledgeIndex::build(chunks, embedder.as_ref()).await?);
            info!(entries = index.len(), "Built knowledge index");

            Ok(AnswerEngine::new(
                Box::new(RetrievalContext::new(
                    index,
                    embedder,
                    settings.retrieval.top_k,
                )),
                generator,
                prompts,
            ))
        }
    }
}
