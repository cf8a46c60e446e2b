//! Commands over local state only: notifications and theme

use colored::Colorize;

use crate::cli::{CommandContext, GlobalOptions, NotificationCommands, OutputFormat, ThemeCommands};
use crate::error::Result;
use crate::models::NotificationDisplay;
use crate::notifications::Notification;
use crate::output::Formattable;
use crate::output::formatters::heading;
use crate::output::json::format_json;
use crate::output::table::format_table_or;
use crate::theme::{Palette, paint};

/// Rendered notification list
struct NotificationList(Vec<Notification>);

impl Formattable for NotificationList {
    fn format(&self, format: OutputFormat, palette: &Palette) -> Result<String> {
        match format {
            OutputFormat::Json => Ok(format_json(&self.0)?),
            OutputFormat::Table => {
                let rows: Vec<NotificationDisplay> =
                    self.0.iter().map(NotificationDisplay::from).collect();
                Ok(format_table_or(&rows, "No notifications."))
            }
            OutputFormat::Pretty => {
                let mut out = heading("Notifications", palette);
                if self.0.is_empty() {
                    out.push_str("No notifications.");
                    return Ok(out);
                }
                for n in &self.0 {
                    let marker = if n.unread {
                        paint("●", palette.info)
                    } else {
                        paint("○", palette.text_secondary)
                    };
                    out.push_str(&format!(
                        "{} {} {} {}\n",
                        marker,
                        n.message,
                        paint(&n.time, palette.text_secondary),
                        paint(&format!("[{}]", n.id), palette.text_secondary)
                    ));
                }
                Ok(out.trim_end().to_string())
            }
        }
    }
}

/// Run a notifications subcommand
pub fn notifications(opts: &GlobalOptions, command: NotificationCommands) -> Result<()> {
    let ctx = CommandContext::new(opts)?;

    match command {
        NotificationCommands::List => ctx.print(&NotificationList(ctx.notifications.list()))?,
        NotificationCommands::Read { id } => {
            if ctx.notifications.mark_as_read(id)? {
                println!("{} Notification dismissed", "✓".green());
            } else {
                println!("{} No notification with id {}", "○".dimmed(), id);
            }
        }
        NotificationCommands::ReadAll => {
            ctx.notifications.mark_all_as_read()?;
            println!("{} All notifications dismissed", "✓".green());
        }
    }

    Ok(())
}

/// Run a theme subcommand
pub fn theme(opts: &GlobalOptions, command: ThemeCommands) -> Result<()> {
    let mut ctx = CommandContext::new(opts)?;

    if let ThemeCommands::Toggle = command {
        ctx.theme.toggle()?;
    }

    let palette = ctx.palette();
    println!(
        "Theme: {} {}",
        paint(ctx.theme.name(), palette.primary).bold(),
        paint("■", palette.secondary)
    );
    Ok(())
}
