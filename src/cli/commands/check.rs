//! Check command - validate configuration and print effective settings

use crate::cli::commands::CHECK;
use crate::config::{Config, ConfigManager};
use crate::error::RegauthResult;
use crate::policy::AccessPolicy;
use console::style;

/// Execute the check command
pub async fn execute(config: &Config, manager: &ConfigManager) -> RegauthResult<()> {
    config.validate(manager.path())?;
    let policy = AccessPolicy::gitlab(config)?;

    println!("{}", style("regauth configuration").bold().cyan());
    println!();
    println!("  {} Config file:   {}", CHECK, manager.path().display());
    println!("  {} GitLab url:    {}", CHECK, config.gitlab.url);
    println!("  {} Timeout:       {}s", CHECK, config.gitlab.timeout_secs);

    match policy.cache() {
        Some(cache) => println!(
            "  {} Auth cache:    enabled (ttl {}s)",
            CHECK,
            cache.ttl().as_secs()
        ),
        None => println!("  {} Auth cache:    {}", CHECK, style("disabled").yellow()),
    }

    let level = policy.publish_level();
    if config.legacy_mode {
        println!(
            "  {} Publish level: {} (legacy mode)",
            CHECK,
            style(level).yellow()
        );
    } else {
        println!(
            "  {} Publish level: {} (GitLab access level {})",
            CHECK,
            level,
            level.access_level()
        );
    }
    println!(
        "  {} Default access: {}",
        CHECK,
        config.default_allow_access.join(", ")
    );

    Ok(())
}
