//! Dashboard API trait

use async_trait::async_trait;
use serde_json::Value;

use crate::client::models::ProjectApplication;
use crate::error::Result;

/// Role dashboards and application lists
///
/// Dashboard payloads are summary counters whose shape the backend owns,
/// so they are returned as raw JSON.
#[async_trait]
pub trait DashboardApi: Send + Sync {
    async fn student_dashboard(&self) -> Result<Value>;

    async fn company_dashboard(&self) -> Result<Value>;

    async fn guide_dashboard(&self) -> Result<Value>;

    /// The signed-in student's project applications
    async fn my_applications(&self) -> Result<Vec<ProjectApplication>>;

    /// Applications to all of the company's projects
    async fn company_applications(&self) -> Result<Vec<ProjectApplication>>;
}
