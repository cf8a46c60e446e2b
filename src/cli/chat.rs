//! Chat and guide command implementations

use colored::Colorize;

use crate::cli::{ChatCommands, CommandContext, GlobalOptions, GuideCommands};
use crate::error::Result;
use crate::views::{ChatThread, GuideDirectory, PendingConfirmations};

/// Run a chat subcommand
pub async fn run(opts: &GlobalOptions, command: ChatCommands) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let env = ctx.view_env();
    let scope = ctx.scope();

    match command {
        ChatCommands::Start { guide_id } => {
            let mut directory = GuideDirectory::load(ctx.session.get_user(), &env, &scope).await?;
            let response = directory.connect(guide_id, &env, &scope).await?;
            match response.status.as_deref() {
                Some(status) => println!(
                    "{} Request sent to {} ({})",
                    "✓".green(),
                    response.guide_name,
                    status
                ),
                None => println!(
                    "{} Connected. Open the thread with {}",
                    "✓".green(),
                    format!("skillbridge open /chat/{}/{}", response.student_id, response.guide_id)
                        .cyan()
                ),
            }
        }
        ChatCommands::Send {
            student_id,
            guide_id,
            message,
        } => {
            let mut thread = ChatThread::load(student_id, guide_id, &env, &scope).await?;
            thread.send(&message, &env, &scope).await?;
            ctx.print(&thread)?;
        }
    }

    Ok(())
}

/// Run a guide subcommand
pub async fn guide(opts: &GlobalOptions, command: GuideCommands) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let env = ctx.view_env();
    let scope = ctx.scope();

    match command {
        GuideCommands::Confirm { request_id, action } => {
            let mut pending = PendingConfirmations::load(&env, &scope).await?;
            let message = pending.confirm(request_id, action, &env, &scope).await?;
            println!("{} {}", "✓".green(), message);
        }
    }

    Ok(())
}
