//! Submission display model

use serde::Serialize;
use tabled::Tabled;

use crate::client::models::Submission;
use crate::output::formatters::{format_date, truncate};

/// Submission display model for table/JSON output.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct SubmissionDisplay {
    #[tabled(rename = "ID")]
    pub id: u64,

    #[tabled(rename = "PROJECT")]
    pub project_id: u64,

    #[tabled(rename = "STUDENT")]
    pub student_id: u64,

    #[tabled(rename = "REPOSITORY")]
    pub github_link: String,

    #[tabled(rename = "STATUS")]
    pub status: String,

    #[tabled(rename = "FEEDBACK")]
    pub feedback: String,

    #[tabled(rename = "SUBMITTED")]
    pub submitted_at: String,
}

impl From<&Submission> for SubmissionDisplay {
    fn from(sub: &Submission) -> Self {
        // Reviews write review_status; older rows only carry status
        let status = if sub.review_status.is_empty() {
            sub.status.clone()
        } else {
            sub.review_status.clone()
        };
        let feedback = if sub.feedback.is_empty() {
            &sub.review_comment
        } else {
            &sub.feedback
        };

        Self {
            id: sub.id,
            project_id: sub.project_id,
            student_id: sub.student_id,
            github_link: sub.github_link.clone(),
            status,
            feedback: truncate(feedback, 40),
            submitted_at: format_date(sub.submitted_at.as_deref()),
        }
    }
}
