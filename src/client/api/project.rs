//! Project API trait

use async_trait::async_trait;

use crate::client::models::{NewProject, Project, ProjectApplication};
use crate::error::Result;

/// Project listing and application operations
#[async_trait]
pub trait ProjectApi: Send + Sync {
    /// List all open projects (public)
    async fn list_projects(&self) -> Result<Vec<Project>>;

    /// Get one project (public)
    async fn get_project(&self, id: u64) -> Result<Project>;

    /// Post a new project as a company
    async fn post_project(&self, project: &NewProject) -> Result<Project>;

    async fn delete_project(&self, id: u64) -> Result<()>;

    /// Apply to a project as a student
    async fn apply_to_project(&self, id: u64) -> Result<ProjectApplication>;

    /// Withdraw the student's application to a project
    async fn withdraw_application(&self, project_id: u64) -> Result<()>;

    /// Applicants of one of the company's projects
    async fn project_applicants(&self, id: u64) -> Result<Vec<ProjectApplication>>;

    /// Projects posted by the signed-in company
    async fn company_projects(&self) -> Result<Vec<Project>>;

    /// Attach a GitHub repository to the student's application
    async fn submit_github_repo(&self, project_id: u64, repo_url: &str) -> Result<()>;
}
