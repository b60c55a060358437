//! `job-tracker`: search live job listings from the terminal.

use std::process::ExitCode;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use common::SearchQuery;
use tracing_subscriber::EnvFilter;

use tracker::app::{OutputMode, Tracker};
use tracker::config::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
use tracker::{QueryClient, TrackerConfig, ViewState};

#[derive(Parser, Debug)]
#[command(name = "job-tracker")]
#[command(version)]
#[command(about = "Search live job listings and chart the top hiring companies")]
struct Args {
    /// Base URL of the search API
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout_secs: u64,

    /// Reject invalid job titles and locations before sending them
    #[arg(long)]
    validate: bool,

    /// Print results as JSON
    #[arg(long)]
    json: bool,

    /// Job title to search once; omit for interactive mode
    #[arg(short, long)]
    query: Option<String>,

    /// Location for the one-shot search
    #[arg(short, long, requires = "query")]
    location: Option<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = TrackerConfig::new(args.base_url)
        .with_timeout(Duration::from_secs(args.timeout_secs))
        .with_validation(args.validate);
    let client = QueryClient::new(&config)?;
    let mode = if args.json {
        OutputMode::Json
    } else {
        OutputMode::Text
    };
    let mut tracker = Tracker::new(client, mode);
    let mut stdout = std::io::stdout().lock();

    match args.query {
        Some(query) => {
            let query = SearchQuery::new(query, args.location.unwrap_or_default());
            let failed = matches!(tracker.search_once(&query).await, ViewState::Failed(_));
            tracker.present(&mut stdout)?;
            Ok(if failed {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            })
        }
        None => {
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            tracker.run_interactive(stdin, &mut stdout).await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
