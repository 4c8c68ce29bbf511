use std::sync::Arc;

use scoreboard_lambda_rust::config::ScoreboardConfig;
use scoreboard_lambda_rust::feed;
use scoreboard_lambda_rust::scheduler::{self, TerminalSink};
use tracing::error;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // RUST_LOG controls verbosity; selector decisions live under `scoreboard::selector`.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .try_init();

    let config = match ScoreboardConfig::load() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Failed to load scoreboard config");
            std::process::exit(1);
        }
    };

    let source = Arc::from(feed::from_config(&config));
    if let Err(e) = scheduler::run(config, source, TerminalSink).await {
        error!(error = %e, "Scoreboard stopped");
        std::process::exit(1);
    }
}
