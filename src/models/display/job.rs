//! Job display models

use serde::Serialize;
use tabled::Tabled;

use crate::client::models::{JobApplication, JobListing};
use crate::output::formatters::{format_date, truncate};

/// Job listing display model for table/JSON output.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct JobDisplay {
    #[tabled(rename = "ID")]
    pub id: u64,

    #[tabled(rename = "TITLE")]
    pub title: String,

    #[tabled(rename = "LOCATION")]
    pub location: String,

    #[tabled(rename = "STIPEND")]
    pub stipend: String,

    #[tabled(rename = "SKILLS")]
    pub skills: String,

    #[tabled(rename = "DEADLINE")]
    pub deadline: String,

    #[tabled(rename = "APPLICANTS")]
    pub applicants: u32,

    #[tabled(rename = "APPLIED")]
    pub applied: String,
}

impl JobDisplay {
    pub fn new(job: &JobListing, applied: bool) -> Self {
        let stipend = if job.stipend > 0 {
            let currency = if job.currency.is_empty() {
                "INR"
            } else {
                job.currency.as_str()
            };
            format!("{} {}", job.stipend, currency)
        } else {
            "Unpaid".to_string()
        };

        Self {
            id: job.id,
            title: truncate(&job.title, 40),
            location: job.location.clone(),
            stipend,
            skills: truncate(&job.skill_list().join(", "), 30),
            deadline: format_date(job.application_deadline.as_deref()),
            applicants: job.applicant_count,
            applied: super::check(applied),
        }
    }
}

impl From<&JobListing> for JobDisplay {
    fn from(job: &JobListing) -> Self {
        Self::new(job, false)
    }
}

/// Job application display model for table/JSON output.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct JobApplicationDisplay {
    #[tabled(rename = "APPLICATION")]
    pub id: u64,

    #[tabled(rename = "JOB")]
    pub job_id: u64,

    #[tabled(rename = "USER")]
    pub user_id: u64,

    #[tabled(rename = "STATUS")]
    pub status: String,

    #[tabled(rename = "APPLIED AT")]
    pub applied_at: String,
}

impl From<&JobApplication> for JobApplicationDisplay {
    fn from(app: &JobApplication) -> Self {
        Self {
            id: app.id,
            job_id: app.job_listing_id,
            user_id: app.user_id,
            status: app.status.clone(),
            applied_at: format_date(app.applied_at.as_deref()),
        }
    }
}
