use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use perfcalc_client::api::HttpResultsApi;
use perfcalc_client::config::ClientConfig;
use perfcalc_client::surface::TerminalSurface;
use perfcalc_client::view::{FormInput, LoadOutcome, ResultsView, SubmitOutcome};

#[derive(Debug, Parser)]
#[command(name = "perfcalc", version, about = "Submit calculations and browse historical results")]
struct Cli {
    /// Base URL of the API server (overrides PERFCALC_API_URL).
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Per-request timeout in seconds (overrides PERFCALC_TIMEOUT_SECS).
    #[arg(long, global = true)]
    timeout_secs: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show historical results.
    Results,
    /// Run a calculation, then show the refreshed results.
    Submit {
        /// Lower bound (i), at least 1.
        #[arg(long, allow_hyphen_values = true)]
        lower: String,
        /// Upper bound (j), greater than the lower bound.
        #[arg(long, allow_hyphen_values = true)]
        upper: String,
        /// sequential, threading or multiprocessing.
        #[arg(long)]
        mode: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "perfcalc=info,perfcalc_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = ClientConfig::from_env();
    if let Some(base_url) = cli.base_url.as_deref() {
        config = config.with_base_url(base_url);
    }
    if let Some(secs) = cli.timeout_secs {
        config.timeout = Duration::from_secs(secs);
    }
    tracing::debug!(base_url = %config.base_url, timeout = ?config.timeout, "Loaded client configuration");

    let http = reqwest::Client::builder()
        .build()
        .context("Failed to build HTTP client")?;
    let api = HttpResultsApi::with_client(http, config.base_url.clone());
    let view = Arc::new(ResultsView::new(
        api,
        TerminalSurface::stdout(),
        config.timeout,
    ));

    // Ctrl-C aborts whatever request is in flight instead of killing the process.
    let abort_view = Arc::clone(&view);
    let abort_task = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Received Ctrl-C, aborting in-flight request");
            abort_view.abort();
        }
    });

    let succeeded = match cli.command {
        Command::Results => !matches!(view.load_results().await, LoadOutcome::Failed(_)),
        Command::Submit { lower, upper, mode } => {
            let form = FormInput {
                lower_bound: lower,
                upper_bound: upper,
                processing_mode: mode,
            };
            matches!(
                view.submit(&form).await,
                SubmitOutcome::Completed {
                    refresh: LoadOutcome::Shown(_) | LoadOutcome::Empty
                }
            )
        }
    };

    abort_task.abort();

    Ok(if succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
