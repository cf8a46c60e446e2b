//! Job command implementations

use colored::Colorize;
use dialoguer::{Confirm, theme::ColorfulTheme};

use crate::cli::{CommandContext, GlobalOptions, JobCommands, JobFields, OutputFormat};
use crate::client::JobApi;
use crate::client::models::{JobApplicationRequest, JobPosting};
use crate::error::Result;
use crate::models::JobApplicationDisplay;
use crate::output::json::format_json;
use crate::output::table::format_table_or;
use crate::views::JobBoard;

impl From<JobFields> for JobPosting {
    fn from(fields: JobFields) -> Self {
        Self {
            title: fields.title,
            description: fields.description,
            category: fields.category,
            domain: fields.domain,
            location: fields.location,
            stipend: fields.stipend,
            currency: fields.currency,
            experience: fields.experience,
            requirements: fields.requirements,
            skills: fields.skills,
            application_deadline: fields.deadline,
        }
    }
}

/// Run a job subcommand
pub async fn run(opts: &GlobalOptions, command: JobCommands) -> Result<()> {
    let ctx = CommandContext::new(opts)?;

    match command {
        JobCommands::Post { job } => {
            let created = ctx.client.create_job(&job.into()).await?;
            println!("{} Posted job #{} \"{}\"", "✓".green(), created.id, created.title);
        }
        JobCommands::Update { job_id, job } => {
            let updated = ctx.client.update_job(job_id, &job.into()).await?;
            println!("{} Updated job #{} \"{}\"", "✓".green(), updated.id, updated.title);
        }
        JobCommands::Delete { job_id, yes } => {
            let confirmed = yes
                || Confirm::with_theme(&ColorfulTheme::default())
                    .with_prompt(format!("Delete job {}?", job_id))
                    .default(false)
                    .interact()?;
            if !confirmed {
                println!("Cancelled.");
                return Ok(());
            }
            ctx.client.delete_job(job_id).await?;
            println!("{} Deleted job {}", "✓".green(), job_id);
        }
        JobCommands::Apply {
            job_id,
            cover_letter,
            resume,
        } => {
            let env = ctx.view_env();
            let scope = ctx.scope();
            let mut board = JobBoard::load(&env, &scope).await?;
            if board.has_applied(job_id) {
                println!("{} Already applied to job {}", "○".dimmed(), job_id);
                return Ok(());
            }
            let request = JobApplicationRequest {
                cover_letter,
                resume,
            };
            let application_id = board.apply(job_id, &request, &env, &scope).await?;
            println!(
                "{} Applied to job {} (application {})",
                "✓".green(),
                job_id,
                application_id
            );
        }
        JobCommands::Applications { job_id, status } => {
            let applications = ctx.client.job_applications(job_id, status).await?;
            match ctx.format {
                OutputFormat::Json => println!("{}", format_json(&applications)?),
                _ => {
                    let rows: Vec<JobApplicationDisplay> =
                        applications.iter().map(JobApplicationDisplay::from).collect();
                    println!("{}", format_table_or(&rows, "No applications yet."));
                }
            }
        }
        JobCommands::Status {
            application_id,
            status,
        } => {
            ctx.client
                .update_application_status(application_id, status)
                .await?;
            println!(
                "{} Application {} is now {}",
                "✓".green(),
                application_id,
                status.as_str()
            );
        }
    }

    Ok(())
}
