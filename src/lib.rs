//! Destek - Retrieval-Augmented Customer Support Chat
//!
//! A web service that answers customer questions strictly from a fixed
//! knowledge document, optionally narrowed down via embedding retrieval.
//!
//! The name "Destek" is the Turkish word for "support."
//!
//! # Overview
//!
//! Destek allows you to:
//! - Serve a `/ask` chat endpoint backed by a single knowledge text
//! - Split and embed the knowledge document into a searchable index
//! - Carry caller-supplied conversation history into the prompt
//! - Keep the model on-script with a policy-bearing prompt template
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - `config` - Configuration and prompt template management
//! - `knowledge` - Knowledge document loading
//! - `chunking` - Fixed-size document chunking
//! - `embedding` - Embedding generation
//! - `index` - In-memory similarity index
//! - `conversation` - Conversation history and query types
//! - `generation` - Chat completion backends
//! - `rag` - Context building and the answer engine
//! - `service` - Startup state machine
//! - `server` - HTTP API
//!
//! # Example
//!
//! ```rust,no_run
//! use destek::config::Settings;
//! use destek::service::ServiceState;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let state = ServiceState::initialize(&settings).await;
//!
//!     destek::server::run("127.0.0.1", 8000, state, &settings).await?;
//!     Ok(())
//! }
//! ```

pub mod chunking;
pub mod cli;
pub mod config;
pub mod conversation;
pub mod embedding;
pub mod error;
pub mod generation;
pub mod index;
pub mod knowledge;
pub mod openai;
pub mod rag;
pub mod server;
pub mod service;

pub use error::{DestekError, Result};
