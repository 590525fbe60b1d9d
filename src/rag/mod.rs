//! Retrieval-augmented answering.
//!
//! Ties context selection, prompt assembly and generation together into the
//! per-request answer pipeline.

pub mod context;
mod engine;

pub use context::{ContextSource, FullDocumentContext, RetrievalContext};
pub use engine::AnswerEngine;
