//! Ask command - one-shot question from the terminal.

use crate::cli::Output;
use crate::config::Settings;
use crate::conversation::Query;
use crate::service::ServiceState;

/// Run the full pipeline once for a single question and print the answer.
pub async fn run_ask(question: &str, settings: Settings) -> anyhow::Result<()> {
    Output::info("Initializing knowledge pipeline...");
    let state = ServiceState::initialize(&settings).await;

    let query = Query::Question(question.to_string());
    let answer = state.answer(&query).await;

    println!();
    println!("{}", answer);

    Ok(())
}
