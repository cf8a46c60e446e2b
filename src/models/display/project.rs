//! Project and application display models

use serde::Serialize;
use tabled::Tabled;

use crate::client::models::{Project, ProjectApplication};
use crate::output::formatters::{format_date, truncate};

/// Project display model for table/JSON output.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct ProjectDisplay {
    #[tabled(rename = "ID")]
    pub id: u64,

    #[tabled(rename = "TITLE")]
    pub title: String,

    #[tabled(rename = "DIFFICULTY")]
    pub difficulty: String,

    #[tabled(rename = "DURATION")]
    pub duration: String,

    #[tabled(rename = "DEADLINE")]
    pub deadline: String,

    /// Checkmark when the signed-in student has already applied
    #[tabled(rename = "APPLIED")]
    pub applied: String,
}

impl ProjectDisplay {
    pub fn new(project: &Project, applied: bool) -> Self {
        Self {
            id: project.id,
            title: truncate(&project.title, 40),
            difficulty: project.difficulty.clone(),
            duration: project.duration.clone(),
            deadline: format_date(project.deadline.as_deref()),
            applied: super::check(applied),
        }
    }
}

impl From<&Project> for ProjectDisplay {
    fn from(project: &Project) -> Self {
        Self::new(project, false)
    }
}

/// Project application display model for table/JSON output.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct ApplicationDisplay {
    #[tabled(rename = "APPLICATION")]
    pub id: u64,

    #[tabled(rename = "PROJECT")]
    pub project_id: u64,

    #[tabled(rename = "TITLE")]
    pub title: String,

    #[tabled(rename = "STUDENT")]
    pub student_id: u64,

    #[tabled(rename = "STATUS")]
    pub status: String,

    #[tabled(rename = "REPOSITORY")]
    pub repository: String,
}

impl From<&ProjectApplication> for ApplicationDisplay {
    fn from(app: &ProjectApplication) -> Self {
        Self {
            id: app.id,
            project_id: app.project_id,
            title: truncate(&app.project_title, 40),
            student_id: app.student_id,
            status: app.status.clone(),
            repository: app.github_repo_url.clone(),
        }
    }
}
