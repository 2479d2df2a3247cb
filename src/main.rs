//! regauth - GitLab-backed registry authentication
//!
//! CLI entry point that dispatches to subcommands.

use clap::Parser;
use console::style;
use regauth::cli::{Cli, Commands};
use regauth::config::ConfigManager;
use regauth::error::RegauthResult;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            if let Some(hint) = e.hint() {
                eprintln!("{} {}", style("Hint:").yellow(), hint);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> RegauthResult<()> {
    let cli = Cli::parse();

    // Initialize logging: 0 = warn, 1 = info, 2 = debug, 3+ = trace
    let filter = match cli.verbose {
        0 => EnvFilter::new("regauth=warn"),
        1 => EnvFilter::new("regauth=info"),
        2 => EnvFilter::new("regauth=debug"),
        _ => EnvFilter::new("regauth=trace"),
    };

    if cli.log_json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .without_time()
            .with_writer(std::io::stderr)
            .init();
    }

    let manager = match cli.config {
        Some(ref path) => ConfigManager::with_path(path.clone()),
        None => ConfigManager::new(),
    };

    // Config subcommands load the file themselves, if at all
    let command = match cli.command {
        Commands::Config(args) => return regauth::cli::commands::config(args, &manager).await,
        command => command,
    };

    // An explicit config path must exist, the default one may not
    let config = if cli.config.is_some() {
        manager.load_required().await?
    } else {
        manager.load().await?
    };

    match command {
        Commands::Check => regauth::cli::commands::check(&config, &manager).await,
        Commands::Verify(args) => regauth::cli::commands::verify(args, &config).await,
        Commands::Match(args) => regauth::cli::commands::publish(args, &config).await,
        Commands::Config(args) => regauth::cli::commands::config(args, &manager).await,
    }
}
