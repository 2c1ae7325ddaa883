mod check_cmd;
mod config;
mod inspect_cmd;
mod write_cmd;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use config::Config;

#[derive(Parser)]
#[command(name = "logwarden")]
#[command(about = "Check and exercise named-logger configurations")]
#[command(version)]
struct Cli {
    /// Logging configuration file (YAML or JSON). Without it the default
    /// locations are searched.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the configuration and list the registered loggers
    Check,
    /// Print the normalized logger definitions and aliases as JSON
    Inspect,
    /// Write one record through a configured logger
    Write {
        /// Logger name; the default logger when omitted
        #[arg(short, long)]
        logger: Option<String>,
        /// Record severity
        #[arg(long, default_value = "info")]
        level: String,
        /// Message text
        message: String,
    },
}

fn main() -> Result<()> {
    let config = Config::from_env();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let path = config.source_path(cli.config);

    match cli.command {
        Commands::Check => check_cmd::run(path),
        Commands::Inspect => inspect_cmd::run(path),
        Commands::Write {
            logger,
            level,
            message,
        } => write_cmd::run(path, logger.as_deref(), &level, &message),
    }
}
