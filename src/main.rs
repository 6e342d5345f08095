// ABOUTME: Entry point for the gitship CLI application.
// ABOUTME: Parses arguments, sets up logging and dispatches to command handlers.

mod cli;
mod commands;

use clap::Parser;
use cli::Cli;
use gitship::config::HealthcheckConfig;
use gitship::context::DeployContext;
use gitship::error::{Error, Result};
use gitship::history::HistoryLog;
use gitship::output::Output;
use gitship::types::{BranchName, ServiceName};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber based on verbose flag
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let mode = cli.output_mode();
    if let Err(e) = run(cli, Output::new(mode)).await {
        Output::new(mode).error(&e.to_string());
        std::process::exit(e.exit_code());
    }
}

async fn run(cli: Cli, output: Output) -> Result<()> {
    if let Some(count) = cli.history {
        let log = HistoryLog::new(cli.app_dir.join(gitship::config::HISTORY_FILE));
        return commands::history(&log, count, &output);
    }

    let ctx = build_context(&cli)?;
    commands::deploy(ctx, output).await
}

fn build_context(cli: &Cli) -> Result<DeployContext> {
    let branch = BranchName::new(&cli.branch)?;
    let service = ServiceName::new(&cli.service)?;

    let host = cli.host.trim();
    if host.is_empty() || host.contains(|c: char| c.is_whitespace() || c == '/') {
        return Err(Error::InvalidHost(cli.host.clone()));
    }

    let healthcheck = HealthcheckConfig {
        port: cli.port,
        ..HealthcheckConfig::default()
    };

    Ok(DeployContext::new(&cli.app_dir, branch, service)
        .health_host(host)
        .healthcheck(healthcheck)
        .public_check(!cli.skip_public_check))
}
