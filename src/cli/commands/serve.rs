//! Serve command - run the support chat HTTP server.

use crate::cli::Output;
use crate::config::Settings;
use crate::server;
use crate::service::ServiceState;

/// Initialize the pipeline and start the HTTP server.
pub async fn run_serve(host: &str, port: u16, settings: Settings) -> anyhow::Result<()> {
    Output::info("Initializing knowledge pipeline...");
    let state = ServiceState::initialize(&settings).await;

    if let ServiceState::Failed(detail) = &state {
        // The server still starts: /ask reports the frozen failure detail
        // on every call, exactly as it would after a partial deploy.
        Output::warning(&format!("Startup failed: {}", detail));
        Output::warning("Serving anyway; /ask will report the setup error.");
    }

    server::run(host, port, state, &settings).await
}
