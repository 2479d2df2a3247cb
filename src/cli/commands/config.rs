//! Config command - show or initialize configuration

use crate::cli::args::{ConfigAction, ConfigArgs};
use crate::cli::commands::CHECK;
use crate::config::{Config, ConfigManager};
use crate::error::RegauthResult;
use console::style;

/// Execute the config command
///
/// Only `show` reads the config file, so `path` and `init` still work when
/// the existing file is broken.
pub async fn execute(args: ConfigArgs, manager: &ConfigManager) -> RegauthResult<()> {
    match args.action {
        None | Some(ConfigAction::Show) => show_config(&manager.load().await?)?,
        Some(ConfigAction::Path) => show_path(manager),
        Some(ConfigAction::Init { force }) => init_config(manager, force).await?,
    }

    Ok(())
}

fn show_config(config: &Config) -> RegauthResult<()> {
    let toml = toml::to_string_pretty(config)?;
    println!("{}", toml);
    Ok(())
}

fn show_path(manager: &ConfigManager) {
    println!("{}", manager.path().display());
}

async fn init_config(manager: &ConfigManager, force: bool) -> RegauthResult<()> {
    let path = manager.path();

    if path.exists() && !force {
        println!(
            "{} Config already exists at {}",
            style("!").yellow(),
            path.display()
        );
        println!("  Use --force to overwrite");
        return Ok(());
    }

    manager.save(&Config::default()).await?;
    println!("{} Configuration initialized at {}", CHECK, path.display());

    Ok(())
}
