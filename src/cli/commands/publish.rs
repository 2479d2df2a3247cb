//! Match command - evaluate publish rights for a set of groups

use crate::cli::args::MatchArgs;
use crate::cli::commands::{CHECK, CROSS};
use crate::config::Config;
use crate::error::RegauthResult;
use crate::policy::{match_group_with_package, AccessPolicy, CallerIdentity, PackageDescriptor};
use console::style;

/// Execute the match command
///
/// Fails with the same error the registry would return when no group matches.
pub async fn execute(args: MatchArgs, config: &Config) -> RegauthResult<()> {
    let policy = AccessPolicy::gitlab(config)?;

    for group in &args.groups {
        let mark = if match_group_with_package(group, &args.package) {
            &CHECK
        } else {
            &CROSS
        };
        println!("  {} {}", mark, group);
    }

    let caller = CallerIdentity {
        name: None,
        real_groups: args.groups,
    };
    let package = PackageDescriptor::gitlab(args.package);

    policy.allow_publish(&caller, &package)?;
    println!(
        "{} may publish {}",
        style("match:").green().bold(),
        package.name
    );
    Ok(())
}
