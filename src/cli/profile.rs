//! Profile and resume command implementations

use std::path::Path;

use colored::Colorize;

use crate::cli::{CommandContext, GlobalOptions, OutputFormat, ProfileCommands, ResumeCommands};
use crate::client::ResumeApi;
use crate::client::models::{ProfileUpdate, ResumeRequest};
use crate::error::{Error, Result};
use crate::output::json::format_json;
use crate::routes::Route;
use crate::views::ProfileView;

/// Run a profile subcommand
pub async fn run(opts: &GlobalOptions, command: ProfileCommands) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let env = ctx.view_env();
    let scope = ctx.scope();

    match command {
        ProfileCommands::Update {
            name,
            bio,
            phone,
            github_url,
            linkedin,
            portfolio_url,
            skills,
            university,
            major,
            year,
            company_name,
            position,
        } => {
            let update = ProfileUpdate {
                name,
                bio,
                phone,
                github_url,
                linkedin,
                portfolio_url,
                skills,
                university,
                major,
                year,
                company_name,
                position,
            };

            let mut view = ProfileView::load(Route::EditProfile, &env, &scope).await?;
            view.save(&update, &env, &scope).await?;
            println!("{} Profile updated", "✓".green());
            ctx.print(&view)?;
        }
    }

    Ok(())
}

/// Read a resume description; `.yaml`/`.yml` files are YAML, anything else JSON
fn read_resume_request(path: &Path) -> Result<ResumeRequest> {
    let contents = std::fs::read_to_string(path)?;
    let is_yaml = matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    );
    if is_yaml {
        serde_yaml::from_str(&contents)
            .map_err(|e| Error::Other(format!("Invalid resume file {}: {}", path.display(), e)))
    } else {
        Ok(serde_json::from_str(&contents)?)
    }
}

/// Run a resume subcommand
pub async fn resume(opts: &GlobalOptions, command: ResumeCommands) -> Result<()> {
    let ctx = CommandContext::new(opts)?;

    match command {
        ResumeCommands::Generate { file } => {
            let request = read_resume_request(Path::new(&file))?;
            let response = ctx.client.generate_resume(&request).await?;

            match ctx.format {
                OutputFormat::Json => println!("{}", format_json(&response)?),
                _ => match response.url {
                    Some(url) => println!("{} Resume ready: {}", "✓".green(), url.cyan()),
                    None => println!(
                        "{} Resume generated, but no download link was returned",
                        "⚠".yellow()
                    ),
                },
            }
        }
    }

    Ok(())
}
