mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use instalens_core::{AppConfig, ConfigError};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "instalens-cli")]
#[command(about = "Fetch and normalize public Instagram profiles")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch a profile and print the normalized result as JSON
    Analyze {
        /// Profile username (without the leading @)
        username: String,
        /// Maximum number of posts (clamped to 1..=60)
        #[arg(long, allow_negative_numbers = true)]
        limit: Option<i64>,
        /// Session id to use instead of `IG_SESSIONID`
        #[arg(long)]
        sid: Option<String>,
        /// Read `<username>.json` graphs from this directory instead of the network
        #[arg(long)]
        snapshot_dir: Option<PathBuf>,
    },
    /// Normalize a previously saved profile graph without network access
    Normalize {
        /// Path to a `web_profile_info` JSON response
        file: PathBuf,
        #[arg(long, allow_negative_numbers = true)]
        limit: Option<i64>,
    },
    /// Report whether a session id and user-agent are configured
    Health,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    // only `analyze` needs a valid config; the rest still log at `info`
    let config = instalens_core::load_app_config();
    let log_level = config.as_ref().map_or("info", |c| c.log_level.as_str());
    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(log_level))?;
    // stdout carries the JSON result
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    run(cli.command, config).await
}

async fn run(
    command: Commands,
    config: Result<AppConfig, ConfigError>,
) -> anyhow::Result<ExitCode> {
    match command {
        Commands::Analyze {
            username,
            limit,
            sid,
            snapshot_dir,
        } => {
            commands::run_analyze(config?, &username, limit, sid.as_deref(), snapshot_dir).await
        }
        Commands::Normalize { file, limit } => commands::run_normalize(&file, limit).await,
        Commands::Health => commands::run_health(),
    }
}
