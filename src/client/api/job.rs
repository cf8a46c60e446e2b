//! Job API trait

use async_trait::async_trait;
use serde_json::Value;

use crate::client::models::{
    ApplicationStatus, JobApplication, JobApplicationRequest, JobListing, JobPosting,
};
use crate::error::Result;

/// Job listing and job application operations
#[async_trait]
pub trait JobApi: Send + Sync {
    /// List active jobs
    async fn list_jobs(&self) -> Result<Vec<JobListing>>;

    async fn get_job(&self, id: u64) -> Result<JobListing>;

    /// Post a job as a company
    async fn create_job(&self, job: &JobPosting) -> Result<JobListing>;

    async fn update_job(&self, id: u64, job: &JobPosting) -> Result<JobListing>;

    async fn delete_job(&self, id: u64) -> Result<()>;

    /// Jobs posted by the signed-in company
    async fn company_jobs(&self) -> Result<Vec<JobListing>>;

    /// Applications to a job, optionally filtered by status
    async fn job_applications(
        &self,
        job_id: u64,
        status: Option<ApplicationStatus>,
    ) -> Result<Vec<JobApplication>>;

    /// Move a job application to a new status
    async fn update_application_status(
        &self,
        application_id: u64,
        status: ApplicationStatus,
    ) -> Result<()>;

    /// Apply to a job. Returns the new application id.
    async fn apply_to_job(&self, id: u64, application: &JobApplicationRequest) -> Result<u64>;

    /// Ids of jobs the student has applied to
    async fn my_job_applications(&self) -> Result<Vec<u64>>;

    /// Application counters for the company's jobs
    async fn application_stats(&self) -> Result<Value>;
}
