//! Status command implementation

use colored::Colorize;

use crate::cli::{CommandContext, GlobalOptions};
use crate::config::Config;
use crate::error::Result;
use crate::session::token;

/// Run the status command to display session and configuration status
pub fn run(opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::new(opts)?;

    println!("{}\n", "SkillBridge Status".bold());

    let config_path = Config::resolve_path(opts.config_ref())?;
    if config_path.exists() {
        println!("Config file: {}", config_path.display().to_string().cyan());
    } else {
        println!("Config file: {} {}", config_path.display(), "(not found, using defaults)".dimmed());
    }
    println!("API: {}", ctx.config.api_url().cyan());
    println!("Storage: {}", ctx.config.storage_path()?.display());
    println!();

    match ctx.session.get_token() {
        Some(jwt) if token::is_valid(&jwt) => {
            match token::expiration(&jwt) {
                Some(expires) => {
                    let remaining = expires.signed_duration_since(chrono::Utc::now());
                    let hours = remaining.num_hours();
                    let mins = remaining.num_minutes() % 60;
                    if token::will_expire_soon(&jwt, chrono::Duration::minutes(5)) {
                        println!("{} Session expires soon ({}m left)", "⚠".yellow(), remaining.num_minutes());
                    } else {
                        println!("{} Session valid (expires in {}h {}m)", "✓".green(), hours, mins);
                    }
                }
                None => println!("{} Session valid (no expiry)", "✓".green()),
            }
        }
        Some(_) => {
            println!("{} Session expired or invalid", "✗".red());
            println!("  → Run 'skillbridge login' to sign in again");
        }
        None => {
            println!("{} Not signed in", "○".dimmed());
            println!("  → Run 'skillbridge login' to sign in");
        }
    }

    if let Some(user) = ctx.session.get_user() {
        println!("{} Signed in as {} ({})", "✓".green(), user.display_name().bold(), user.role);
    }

    let unread = ctx.notifications.unread_count();
    if unread > 0 {
        println!("{} {} unread notification(s)", "●".cyan(), unread);
    } else {
        println!("{} No unread notifications", "○".dimmed());
    }

    println!("Theme: {}", ctx.theme.name());
    println!();

    Ok(())
}
