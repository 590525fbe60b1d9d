//! CLI module for Destek.

pub mod commands;
mod output;

pub use output::Output;

use clap::{Parser, Subcommand};

/// Destek - Retrieval-Augmented Customer Support Chat
///
/// A web service that answers customer questions from a fixed knowledge
/// document. The name "Destek" is the Turkish word for "support."
#[derive(Parser, Debug)]
#[command(name = "destek")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the support chat HTTP server
    Serve {
        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port to bind to
        #[arg(short, long, default_value = "8000")]
        port: u16,
    },

    /// Ask a single question from the terminal
    Ask {
        /// The question to ask
        question: String,
    },

    /// Check system requirements and configuration
    Doctor,
}
