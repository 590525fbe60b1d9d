//! Configuration module for Destek.
//!
//! Handles loading and managing application settings and prompt templates.

mod prompts;
mod settings;

pub use prompts::{AnswerPrompts, Prompts, REFUSAL_SENTENCE};
pub use settings::{
    ChunkingSettings, ContextStrategy, EmbeddingSettings, GeneralSettings, GenerationSettings,
    KnowledgeSettings, PromptSettings, RetrievalSettings, Settings,
};
