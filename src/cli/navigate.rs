//! `open` command: navigate to a path and render the screen

use std::time::Duration;

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::json;

use crate::cli::{CommandContext, GlobalOptions, OutputFormat};
use crate::client::RequestScope;
use crate::error::{ApiError, Result};
use crate::events::{AppEvent, Subscription};
use crate::output::json::format_json;
use crate::routes::{LOGIN_PATH, Navigation, RedirectReason};
use crate::views::Screen;

/// Spinner on stderr while a screen loads; hidden when stderr is not a terminal
pub(crate) fn spinner(message: String) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.green} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

fn print_redirect(ctx: &CommandContext, to: &str, reason: &str) -> Result<()> {
    match ctx.format {
        OutputFormat::Json => {
            println!("{}", format_json(&json!({ "redirect": to, "reason": reason }))?);
        }
        _ => println!("{} {} ({})", "→ Redirecting to".yellow(), to.bold(), reason),
    }
    Ok(())
}

/// Surface a load error; a session that ended while loading sends the user
/// to the login screen first.
fn handle_load_error(ctx: &CommandContext, events: &mut Subscription, err: crate::error::Error) -> Result<()> {
    if events.drain_contains(AppEvent::SessionEnded) {
        print_redirect(ctx, LOGIN_PATH, "Session ended")?;
    }
    Err(err)
}

/// Run the open command
pub async fn open(opts: &GlobalOptions, path: &str) -> Result<()> {
    let ctx = CommandContext::new(opts)?;

    let (route, user) = match ctx.controller().navigate(path) {
        Navigation::Render { route, user } => (route, user),
        Navigation::Redirect { to, reason } => {
            if reason == RedirectReason::AlreadySignedIn {
                log::debug!("{} skipped, session active", path);
            }
            return print_redirect(&ctx, to, reason.describe());
        }
        Navigation::NotFound { path } => {
            return Err(ApiError::NotFound(format!("No screen at {}", path)).into());
        }
    };

    let env = ctx.view_env();
    let mut events = env.events().subscribe();
    let scope = RequestScope::new();
    let pb = spinner(format!("Loading {}...", route.title()));

    let loaded = tokio::select! {
        result = Screen::load(route, user, &env, &scope) => result,
        _ = tokio::signal::ctrl_c() => {
            scope.unmount();
            Err(ApiError::Cancelled.into())
        }
    };
    pb.finish_and_clear();

    match loaded {
        Ok(screen) => ctx.print(&screen),
        Err(err) => handle_load_error(&ctx, &mut events, err),
    }
}
