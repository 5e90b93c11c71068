//! `usercheck` - runs the users service conformance suite
//!
//! Exit codes: 0 when every executed check passed, 1 when any check failed
//! or errored, 2 when the suite could not be set up.

mod cli;
mod output;

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::{debug, info};
use usercheck_core::{ConformanceSuite, Fixture, SuiteContext, SuiteReport};
use usercheck_infra::{observability, UsersApiClient};

use crate::cli::Args;

const EXIT_FAILED: u8 = 1;
const EXIT_SETUP: u8 = 2;

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env before anything reads the environment
    let dotenv = dotenvy::dotenv();

    let args = Args::parse();
    if let Err(err) = observability::init_tracing(args.log_format) {
        eprintln!("{err}");
    }

    match dotenv {
        Ok(path) => debug!(path = %path.display(), "Loaded .env"),
        Err(e) => debug!(error = %e, "No .env file loaded"),
    }

    let result = run(&args).await;
    match &result {
        Ok(report) => {
            if let Err(err) =
                output::write_report(&mut std::io::stdout().lock(), report, args.format)
            {
                eprintln!("error: {err:#}");
                return ExitCode::from(EXIT_FAILED);
            }
        }
        Err(err) => eprintln!("error: {err:#}"),
    }

    ExitCode::from(exit_code(&result))
}

/// Maps the outcome of a run to the process exit code.
fn exit_code(result: &anyhow::Result<SuiteReport>) -> u8 {
    match result {
        Err(_) => EXIT_SETUP,
        Ok(report) if report.is_success() => 0,
        Ok(_) => EXIT_FAILED,
    }
}

async fn run(args: &Args) -> anyhow::Result<SuiteReport> {
    let config = args.resolve_config().context("Failed to load configuration")?;
    let checks = args.selected_checks(&config)?;

    let client = UsersApiClient::from_service_config(&config.service)
        .context("Failed to build the users service client")?;
    let context = SuiteContext::new(config).context("Invalid configuration")?;
    let fixture = Fixture::embedded().context("Failed to load the embedded fixture")?;

    info!(host = %context.host(), records = fixture.len(), "Starting conformance suite");

    let suite = ConformanceSuite::new(context, Arc::new(client), fixture);
    let report = match checks {
        Some(checks) => suite.run_checks(&checks).await,
        None => suite.run().await,
    };
    Ok(report)
}
