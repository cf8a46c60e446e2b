//! Project and submission command implementations

use colored::Colorize;
use dialoguer::{Confirm, theme::ColorfulTheme};

use crate::cli::{
    CommandContext, GlobalOptions, OutputFormat, ProjectCommands, SubmissionCommands,
};
use crate::client::models::{NewProject, NewSubmission, SubmissionReview};
use crate::client::{ProjectApi, SubmissionApi};
use crate::error::{ApiError, Result};
use crate::models::{ApplicationDisplay, SubmissionDisplay};
use crate::output::json::format_json;
use crate::output::table::format_table_or;
use crate::views::{AppliedProjects, ProjectDetailsView};

const REVIEW_STATUSES: &[&str] = &["accepted", "rejected", "changes_requested"];

/// Run the apply command
pub async fn apply(opts: &GlobalOptions, project_id: u64) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let env = ctx.view_env();
    let scope = ctx.scope();

    let user = ctx.session.get_user();
    let mut details = ProjectDetailsView::load(project_id, user, &env, &scope).await?;
    if details.has_applied() {
        println!("{} Already applied to \"{}\"", "○".dimmed(), details.project().title);
        return Ok(());
    }

    details.apply(&env, &scope).await?;
    if let Some(n) = ctx.notifications.list().first() {
        println!("{} {}", "✓".green(), n.message);
    }
    Ok(())
}

/// Run the withdraw command
pub async fn withdraw(opts: &GlobalOptions, project_id: u64) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let env = ctx.view_env();
    let scope = ctx.scope();

    let mut applied = AppliedProjects::load(&env, &scope).await?;
    if !applied.applications().iter().any(|a| a.project_id == project_id) {
        return Err(ApiError::NotFound(format!(
            "No application for project {}",
            project_id
        ))
        .into());
    }

    applied.withdraw(project_id, &env, &scope).await?;
    if let Some(n) = ctx.notifications.list().first() {
        println!("{} {}", "✓".green(), n.message);
    }
    Ok(())
}

/// Run a project subcommand
pub async fn run(opts: &GlobalOptions, command: ProjectCommands) -> Result<()> {
    let ctx = CommandContext::new(opts)?;

    match command {
        ProjectCommands::Post {
            title,
            description,
            requirements,
            skills,
            budget,
            deadline,
            difficulty,
            duration,
            team_size,
            location,
        } => {
            let project = ctx
                .client
                .post_project(&NewProject {
                    title,
                    description,
                    requirements,
                    skills,
                    budget,
                    deadline,
                    difficulty,
                    duration,
                    team_size,
                    location,
                })
                .await?;
            println!("{} Posted project #{} \"{}\"", "✓".green(), project.id, project.title);
        }
        ProjectCommands::Delete { project_id, yes } => {
            let confirmed = yes
                || Confirm::with_theme(&ColorfulTheme::default())
                    .with_prompt(format!("Delete project {}?", project_id))
                    .default(false)
                    .interact()?;
            if !confirmed {
                println!("Cancelled.");
                return Ok(());
            }
            ctx.client.delete_project(project_id).await?;
            println!("{} Deleted project {}", "✓".green(), project_id);
        }
        ProjectCommands::SubmitRepo { project_id, url } => {
            ctx.client.submit_github_repo(project_id, &url).await?;
            println!("{} Repository linked to project {}", "✓".green(), project_id);
        }
        ProjectCommands::Applicants { project_id } => {
            let applicants = ctx.client.project_applicants(project_id).await?;
            match ctx.format {
                OutputFormat::Json => println!("{}", format_json(&applicants)?),
                _ => {
                    let rows: Vec<ApplicationDisplay> =
                        applicants.iter().map(ApplicationDisplay::from).collect();
                    println!("{}", format_table_or(&rows, "No applicants yet."));
                }
            }
        }
    }

    Ok(())
}

/// Run a submission subcommand
pub async fn submission(opts: &GlobalOptions, command: SubmissionCommands) -> Result<()> {
    let ctx = CommandContext::new(opts)?;

    match command {
        SubmissionCommands::Submit {
            project_id,
            github_link,
            notes,
        } => {
            let submission = ctx
                .client
                .submit_project(project_id, &NewSubmission { github_link, notes })
                .await?;
            match ctx.format {
                OutputFormat::Json => println!("{}", format_json(&submission)?),
                _ => println!(
                    "{}",
                    format_table_or(&[SubmissionDisplay::from(&submission)], "")
                ),
            }
        }
        SubmissionCommands::Review {
            submission_id,
            status,
            feedback,
            update,
        } => {
            if !REVIEW_STATUSES.contains(&status.as_str()) {
                return Err(ApiError::BadRequest(format!(
                    "status must be one of {}",
                    REVIEW_STATUSES.join(", ")
                ))
                .into());
            }
            let review = SubmissionReview { status, feedback };
            if update {
                ctx.client.update_review(submission_id, &review).await?;
            } else {
                ctx.client.review_submission(submission_id, &review).await?;
            }
            println!(
                "{} Submission {} marked {}",
                "✓".green(),
                submission_id,
                review.status
            );
        }
    }

    Ok(())
}
