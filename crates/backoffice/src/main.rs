//! Back-office console entry point.
//!
//! Usage: `backoffice <script.json>`. The report is printed to stdout as
//! JSON; logs go to stderr.

use std::process::ExitCode;

use backoffice::{Config, Console, ConsoleError, RunReport, Script};
use event_store::InMemoryEventStore;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

fn init_tracing(config: &Config) {
    let filter =
        EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if config.log_json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

async fn run(path: &str, config: Config) -> Result<RunReport, ConsoleError> {
    let script = Script::load(path).await?;
    let mut console = Console::new(InMemoryEventStore::new(), config);
    console.run(script).await
}

#[tokio::main]
async fn main() -> ExitCode {
    let config = Config::from_env();
    init_tracing(&config);

    let Some(path) = std::env::args().nth(1) else {
        eprintln!("usage: backoffice <script.json>");
        return ExitCode::from(2);
    };

    let report = match run(&path, config).await {
        Ok(report) => report,
        Err(e) => {
            tracing::error!(error = %e, %path, "script failed");
            return ExitCode::FAILURE;
        }
    };

    let rejected = report.rejected().count();
    match serde_json::to_string_pretty(&report) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            tracing::error!(error = %e, "failed to render report");
            return ExitCode::FAILURE;
        }
    }

    tracing::info!(steps = report.steps.len(), rejected, "script finished");
    ExitCode::SUCCESS
}
