// ABOUTME: Command-line interface definition using clap derive macros.
// ABOUTME: Positional branch and host, path and service overrides, output modes.

use clap::Parser;
use gitship::config;
use gitship::output::OutputMode;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "gitship")]
#[command(about = "Deploy a git branch of the web application on this host")]
#[command(version)]
pub struct Cli {
    /// Branch to deploy
    #[arg(default_value = config::DEFAULT_BRANCH)]
    pub branch: String,

    /// Public hostname for the post-deploy HTTPS check
    #[arg(default_value = config::DEFAULT_HEALTH_HOST)]
    pub host: String,

    /// Application checkout
    #[arg(long, value_name = "DIR", default_value = config::DEFAULT_APP_DIR)]
    pub app_dir: PathBuf,

    /// systemd unit serving the application
    #[arg(long, value_name = "UNIT", default_value = config::DEFAULT_SERVICE)]
    pub service: String,

    /// Local port of the application server
    #[arg(long, default_value_t = config::DEFAULT_PORT)]
    pub port: u16,

    /// Skip the HTTPS check against the public host
    #[arg(long)]
    pub skip_public_check: bool,

    /// Show the last N recorded deploys instead of deploying
    #[arg(
        long,
        value_name = "N",
        num_args = 0..=1,
        default_missing_value = "10"
    )]
    pub history: Option<usize>,

    /// Only print warnings, errors and the final result
    #[arg(short, long, conflicts_with = "json")]
    pub quiet: bool,

    /// Print JSON lines instead of text
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn output_mode(&self) -> OutputMode {
        if self.json {
            OutputMode::Json
        } else if self.quiet {
            OutputMode::Quiet
        } else {
            OutputMode::Normal
        }
    }
}
