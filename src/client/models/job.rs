//! Job listing and job application models

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Job listing
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobListing {
    #[serde(default, alias = "ID", deserialize_with = "super::id_format::deserialize")]
    pub id: u64,
    #[serde(default)]
    pub company_id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub domain: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub stipend: i64,
    #[serde(default)]
    pub currency: String,
    #[serde(default)]
    pub experience: i64,
    /// Stored by the backend as a raw JSON array
    #[serde(default)]
    pub skills: Value,
    #[serde(default)]
    pub applicant_count: u32,
    #[serde(default)]
    pub application_deadline: Option<String>,
    #[serde(default)]
    pub is_active: bool,
}

impl JobListing {
    /// Skills as plain strings, whatever shape the backend sent
    pub fn skill_list(&self) -> Vec<String> {
        match &self.skills {
            Value::Array(items) => items
                .iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect(),
            Value::String(s) => s
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            _ => Vec::new(),
        }
    }
}

/// Body for creating or updating a job listing
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobPosting {
    pub title: String,
    pub description: String,
    pub category: String,
    pub domain: String,
    pub location: String,
    #[serde(default)]
    pub stipend: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(default)]
    pub experience: i64,
    #[serde(default)]
    pub requirements: Vec<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    pub application_deadline: String,
}

/// Student's application to a job
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobApplication {
    #[serde(default, alias = "ID", deserialize_with = "super::id_format::deserialize")]
    pub id: u64,
    #[serde(default)]
    pub job_listing_id: u64,
    #[serde(default)]
    pub user_id: u64,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub resume: String,
    #[serde(default)]
    pub cover_letter: String,
    #[serde(default)]
    pub applied_at: Option<String>,
}

/// Optional body when applying to a job
#[derive(Debug, Clone, Default, Serialize)]
pub struct JobApplicationRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_letter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resume: Option<String>,
}

/// Status a company may set on a job application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
pub enum ApplicationStatus {
    Applied,
    Shortlisted,
    Rejected,
    Accepted,
}

impl ApplicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Applied => "Applied",
            ApplicationStatus::Shortlisted => "Shortlisted",
            ApplicationStatus::Rejected => "Rejected",
            ApplicationStatus::Accepted => "Accepted",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skill_list_from_array_and_string() {
        let job: JobListing =
            serde_json::from_str(r#"{"id": 1, "skills": ["rust", "sql"]}"#).unwrap();
        assert_eq!(job.skill_list(), vec!["rust", "sql"]);

        let job: JobListing = serde_json::from_str(r#"{"id": 1, "skills": "go, k8s"}"#).unwrap();
        assert_eq!(job.skill_list(), vec!["go", "k8s"]);

        let job: JobListing = serde_json::from_str(r#"{"id": 1}"#).unwrap();
        assert!(job.skill_list().is_empty());
    }

    #[test]
    fn test_application_status_serializes_capitalized() {
        let json = serde_json::to_value(ApplicationStatus::Shortlisted).unwrap();
        assert_eq!(json, "Shortlisted");
    }
}
