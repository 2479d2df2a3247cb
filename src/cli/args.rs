//! CLI argument definitions using clap derive

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// regauth - GitLab-backed registry authentication
///
/// Inspect configuration and exercise the authentication and publish
/// decisions the registry plugin makes.
#[derive(Parser, Debug)]
#[command(name = "regauth")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "REGAUTH_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate configuration and print the effective settings
    Check,

    /// Show or initialize configuration
    Config(ConfigArgs),

    /// Authenticate a user against GitLab and print their groups
    Verify(VerifyArgs),

    /// Check whether groups may publish a package
    Match(MatchArgs),
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: Option<ConfigAction>,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the effective configuration as TOML
    Show,

    /// Print the configuration file path
    Path,

    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}

/// Arguments for the verify command
#[derive(Parser, Debug)]
pub struct VerifyArgs {
    /// Registry user name, must match the token owner
    #[arg(short, long)]
    pub user: String,

    /// GitLab personal access token
    #[arg(short, long, env = "REGAUTH_TOKEN", hide_env_values = true)]
    pub token: String,
}

/// Arguments for the match command
#[derive(Parser, Debug)]
pub struct MatchArgs {
    /// Group the caller belongs to (repeatable)
    #[arg(short, long = "group", required = true)]
    pub groups: Vec<String>,

    /// Package name, e.g. @org/team/pkg
    #[arg(short, long)]
    pub package: String,
}
