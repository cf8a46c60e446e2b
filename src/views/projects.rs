//! Project listing, project details and company projects screens

use std::collections::BTreeSet;

use serde_json::json;

use super::ViewEnv;
use crate::cli::OutputFormat;
use crate::client::models::{Project, ProjectApplication, Role, UserProfile};
use crate::client::{DashboardApi, ProjectApi, RequestScope};
use crate::error::{ApiError, Result};
use crate::models::ProjectDisplay;
use crate::output::formatters::{field, format_date, heading, is_deadline_soon};
use crate::output::json::format_route_json;
use crate::output::table::format_table_or;
use crate::output::Formattable;
use crate::routes::Route;
use crate::theme::{Palette, paint};

fn require_student(user: Option<&UserProfile>) -> Result<()> {
    match user {
        None => Err(ApiError::NotLoggedIn.into()),
        Some(u) if u.role != Role::Student => {
            Err(ApiError::Forbidden("Only students can apply to projects".into()).into())
        }
        Some(_) => Ok(()),
    }
}

fn applied_message(title: &str) -> String {
    format!(
        "Successfully applied to \"{}\"! You will be notified about the review status.",
        title
    )
}

/// Ids of projects the student has applied to; empty for everyone else
async fn applied_ids(
    user: Option<&UserProfile>,
    env: &ViewEnv,
    scope: &RequestScope,
) -> Result<BTreeSet<u64>> {
    if user.is_none_or(|u| u.role != Role::Student) {
        return Ok(BTreeSet::new());
    }
    let applications = scope.run(env.client.my_applications()).await?;
    Ok(applications.iter().map(|a| a.project_id).collect())
}

/// Public project board. Students see which projects they can still apply to.
pub struct ProjectBoard {
    projects: Vec<Project>,
    user: Option<UserProfile>,
    unapplied: BTreeSet<u64>,
}

impl ProjectBoard {
    pub async fn load(
        user: Option<UserProfile>,
        env: &ViewEnv,
        scope: &RequestScope,
    ) -> Result<Self> {
        let projects = scope.run(env.client.list_projects()).await?;
        let applied = applied_ids(user.as_ref(), env, scope).await?;
        let unapplied = projects
            .iter()
            .map(|p| p.id)
            .filter(|id| !applied.contains(id))
            .collect();

        Ok(Self {
            projects,
            user,
            unapplied,
        })
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    /// Projects the signed-in student has not applied to yet
    pub fn unapplied(&self) -> &BTreeSet<u64> {
        &self.unapplied
    }

    fn is_student(&self) -> bool {
        self.user.as_ref().is_some_and(|u| u.role == Role::Student)
    }

    /// Whether the Apply action is offered for `id`
    pub fn can_apply(&self, id: u64) -> bool {
        self.is_student() && self.unapplied.contains(&id)
    }

    /// Apply as the signed-in student. The board is updated in place.
    pub async fn apply(
        &mut self,
        id: u64,
        env: &ViewEnv,
        scope: &RequestScope,
    ) -> Result<ProjectApplication> {
        require_student(self.user.as_ref())?;

        let application = scope.run(env.client.apply_to_project(id)).await?;
        self.unapplied.remove(&id);

        let title = self
            .projects
            .iter()
            .find(|p| p.id == id)
            .map(|p| p.title.as_str())
            .unwrap_or("Unknown Project");
        env.announce_application_change(applied_message(title))?;

        Ok(application)
    }
}

impl Formattable for ProjectBoard {
    fn format(&self, format: OutputFormat, palette: &Palette) -> Result<String> {
        match format {
            OutputFormat::Json => Ok(format_route_json(
                &Route::Projects.path(),
                &json!({ "projects": self.projects, "unapplied": self.unapplied }),
            )?),
            OutputFormat::Table => {
                let rows: Vec<ProjectDisplay> = self
                    .projects
                    .iter()
                    .map(|p| ProjectDisplay::new(p, self.is_student() && !self.unapplied.contains(&p.id)))
                    .collect();
                Ok(format_table_or(&rows, "No projects available."))
            }
            OutputFormat::Pretty => {
                let mut out = heading(Route::Projects.title(), palette);
                if self.projects.is_empty() {
                    out.push_str("No projects available.");
                    return Ok(out);
                }
                for project in &self.projects {
                    out.push_str(&format!(
                        "\n{} {}\n",
                        paint(&format!("#{}", project.id), palette.secondary),
                        project.title
                    ));
                    if !project.description.is_empty() {
                        out.push_str(&format!("  {}\n", project.description));
                    }
                    if !project.difficulty.is_empty() {
                        out.push_str(&format!("  {}\n", field("Difficulty", &project.difficulty, palette)));
                    }
                    let deadline = format_date(project.deadline.as_deref());
                    let deadline = if is_deadline_soon(project.deadline.as_deref(), chrono::Utc::now()) {
                        paint(&format!("{} (soon)", deadline), palette.warning).to_string()
                    } else {
                        deadline
                    };
                    out.push_str(&format!("  {}\n", field("Deadline", &deadline, palette)));
                    if self.is_student() {
                        let state = if self.can_apply(project.id) {
                            paint(&format!("skillbridge apply {}", project.id), palette.info)
                        } else {
                            paint("Applied", palette.success)
                        };
                        out.push_str(&format!("  {}\n", state));
                    }
                }
                Ok(out)
            }
        }
    }
}

/// One project with the student's apply state
pub struct ProjectDetailsView {
    project: Project,
    user: Option<UserProfile>,
    has_applied: bool,
}

impl ProjectDetailsView {
    pub async fn load(
        id: u64,
        user: Option<UserProfile>,
        env: &ViewEnv,
        scope: &RequestScope,
    ) -> Result<Self> {
        let project = scope.run(env.client.get_project(id)).await?;
        let has_applied = applied_ids(user.as_ref(), env, scope).await?.contains(&id);
        Ok(Self {
            project,
            user,
            has_applied,
        })
    }

    pub fn project(&self) -> &Project {
        &self.project
    }

    pub fn has_applied(&self) -> bool {
        self.has_applied
    }

    pub async fn apply(&mut self, env: &ViewEnv, scope: &RequestScope) -> Result<ProjectApplication> {
        require_student(self.user.as_ref())?;
        let application = scope.run(env.client.apply_to_project(self.project.id)).await?;
        self.has_applied = true;
        env.announce_application_change(applied_message(&self.project.title))?;
        Ok(application)
    }
}

impl Formattable for ProjectDetailsView {
    fn format(&self, format: OutputFormat, palette: &Palette) -> Result<String> {
        let p = &self.project;
        let route = Route::ProjectDetails(p.id);
        match format {
            OutputFormat::Json => Ok(format_route_json(
                &route.path(),
                &json!({ "project": p, "has_applied": self.has_applied }),
            )?),
            OutputFormat::Table => Ok(crate::output::table::format_fields([
                ("ID", p.id.to_string()),
                ("Title", p.title.clone()),
                ("Description", p.description.clone()),
                ("Requirements", p.requirements.clone()),
                ("Skills", p.skills.clone()),
                ("Budget", p.budget.clone()),
                ("Difficulty", p.difficulty.clone()),
                ("Duration", p.duration.clone()),
                ("Team size", p.team_size.clone()),
                ("Location", p.location.clone()),
                ("Deadline", format_date(p.deadline.as_deref())),
                ("Applied", if self.has_applied { "yes".into() } else { String::new() }),
            ])),
            OutputFormat::Pretty => {
                let mut out = heading(&p.title, palette);
                for (label, value) in [
                    ("Description", &p.description),
                    ("Requirements", &p.requirements),
                    ("Skills", &p.skills),
                    ("Budget", &p.budget),
                    ("Difficulty", &p.difficulty),
                    ("Duration", &p.duration),
                    ("Team size", &p.team_size),
                    ("Location", &p.location),
                ] {
                    if !value.is_empty() {
                        out.push_str(&format!("{}\n", field(label, value, palette)));
                    }
                }
                out.push_str(&field("Deadline", &format_date(p.deadline.as_deref()), palette));
                if self.user.as_ref().is_some_and(|u| u.role == Role::Student) {
                    out.push('\n');
                    if self.has_applied {
                        out.push_str(&paint("You have applied to this project", palette.success).to_string());
                    } else {
                        out.push_str(&paint(&format!("Apply with: skillbridge apply {}", p.id), palette.info).to_string());
                    }
                }
                Ok(out)
            }
        }
    }
}

/// Projects the signed-in company has posted
pub struct CompanyProjects {
    projects: Vec<Project>,
}

impl CompanyProjects {
    pub async fn load(env: &ViewEnv, scope: &RequestScope) -> Result<Self> {
        let projects = scope.run(env.client.company_projects()).await?;
        Ok(Self { projects })
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    /// Delete a posted project and drop it from the list
    pub async fn delete(&mut self, id: u64, env: &ViewEnv, scope: &RequestScope) -> Result<()> {
        scope.run(env.client.delete_project(id)).await?;
        self.projects.retain(|p| p.id != id);
        Ok(())
    }
}

impl Formattable for CompanyProjects {
    fn format(&self, format: OutputFormat, palette: &Palette) -> Result<String> {
        match format {
            OutputFormat::Json => Ok(format_route_json(
                &Route::CompanyProjects.path(),
                &self.projects,
            )?),
            OutputFormat::Table | OutputFormat::Pretty => {
                let rows: Vec<ProjectDisplay> = self.projects.iter().map(ProjectDisplay::from).collect();
                let table = format_table_or(&rows, "You have not posted any projects yet.");
                if matches!(format, OutputFormat::Pretty) {
                    Ok(format!("{}{}", heading(Route::CompanyProjects.title(), palette), table))
                } else {
                    Ok(table)
                }
            }
        }
    }
}
