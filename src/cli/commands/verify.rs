//! Verify command - authenticate a user against GitLab

use crate::cli::args::VerifyArgs;
use crate::cli::commands::CHECK;
use crate::config::Config;
use crate::error::RegauthResult;
use crate::policy::AccessPolicy;
use console::style;
use tracing::debug;

/// Execute the verify command
pub async fn execute(args: VerifyArgs, config: &Config) -> RegauthResult<()> {
    let policy = AccessPolicy::gitlab(config)?;
    debug!("Verifying {} against {}", args.user, config.gitlab.url);

    let groups = policy.authenticate(&args.user, &args.token).await?;

    println!(
        "{} Authenticated {}",
        CHECK,
        style(&args.user).bold()
    );
    println!("  Groups: {}", groups.join(", "));
    Ok(())
}
