//! Project submission models

use serde::{Deserialize, Serialize};

/// Work submitted by a student for a project
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Submission {
    #[serde(default, alias = "ID", deserialize_with = "super::id_format::deserialize")]
    pub id: u64,
    #[serde(default)]
    pub project_id: u64,
    #[serde(default)]
    pub student_id: u64,
    #[serde(default)]
    pub github_link: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub feedback: String,
    #[serde(default)]
    pub review_status: String,
    #[serde(default)]
    pub review_comment: String,
    #[serde(default)]
    pub submitted_at: Option<String>,
}

/// Submission body
#[derive(Debug, Clone, Serialize)]
pub struct NewSubmission {
    pub github_link: String,
    pub notes: String,
}

/// Review verdict: accepted, rejected or changes_requested
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionReview {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
}
