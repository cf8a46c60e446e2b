//! Submission API trait

use async_trait::async_trait;

use crate::client::models::{NewSubmission, Submission, SubmissionReview};
use crate::error::Result;

/// Project submission and review operations
#[async_trait]
pub trait SubmissionApi: Send + Sync {
    /// Submit work for a project
    async fn submit_project(&self, project_id: u64, submission: &NewSubmission)
    -> Result<Submission>;

    /// The signed-in student's submissions
    async fn my_submissions(&self) -> Result<Vec<Submission>>;

    /// Submissions received for a project
    async fn project_submissions(&self, project_id: u64) -> Result<Vec<Submission>>;

    /// Review a submission for the first time
    async fn review_submission(&self, id: u64, review: &SubmissionReview) -> Result<Submission>;

    /// Replace an existing review
    async fn update_review(&self, id: u64, review: &SubmissionReview) -> Result<Submission>;

    /// Submissions from the guide's connected students
    async fn guide_submissions(&self) -> Result<Vec<Submission>>;
}
