//! Job board and company job management

use std::collections::BTreeSet;

use serde_json::{Value, json};

use super::ViewEnv;
use crate::cli::OutputFormat;
use crate::client::models::{JobApplicationRequest, JobListing};
use crate::client::{JobApi, RequestScope};
use crate::error::Result;
use crate::models::JobDisplay;
use crate::output::Formattable;
use crate::output::formatters::{field, heading};
use crate::output::json::format_route_json;
use crate::output::table::format_table_or;
use crate::routes::Route;
use crate::theme::Palette;

/// Open jobs with the student's applied set
pub struct JobBoard {
    jobs: Vec<JobListing>,
    applied: BTreeSet<u64>,
}

impl JobBoard {
    pub async fn load(env: &ViewEnv, scope: &RequestScope) -> Result<Self> {
        let jobs = scope.run(env.client.list_jobs()).await?;
        let applied = scope
            .run(env.client.my_job_applications())
            .await?
            .into_iter()
            .collect();
        Ok(Self { jobs, applied })
    }

    pub fn jobs(&self) -> &[JobListing] {
        &self.jobs
    }

    pub fn has_applied(&self, job_id: u64) -> bool {
        self.applied.contains(&job_id)
    }

    /// Apply and mark the job as applied. Returns the application id.
    pub async fn apply(
        &mut self,
        job_id: u64,
        request: &JobApplicationRequest,
        env: &ViewEnv,
        scope: &RequestScope,
    ) -> Result<u64> {
        let application_id = scope.run(env.client.apply_to_job(job_id, request)).await?;
        self.applied.insert(job_id);
        if let Some(job) = self.jobs.iter_mut().find(|j| j.id == job_id) {
            job.applicant_count += 1;
        }

        let title = self
            .jobs
            .iter()
            .find(|j| j.id == job_id)
            .map(|j| j.title.as_str())
            .unwrap_or("Unknown Job");
        env.notifications
            .add(format!("Successfully applied to \"{}\".", title))?;
        Ok(application_id)
    }
}

impl Formattable for JobBoard {
    fn format(&self, format: OutputFormat, palette: &Palette) -> Result<String> {
        match format {
            OutputFormat::Json => Ok(format_route_json(
                &Route::Jobs.path(),
                &json!({ "jobs": self.jobs, "applied": self.applied }),
            )?),
            OutputFormat::Table | OutputFormat::Pretty => {
                let rows: Vec<JobDisplay> = self
                    .jobs
                    .iter()
                    .map(|j| JobDisplay::new(j, self.has_applied(j.id)))
                    .collect();
                let table = format_table_or(&rows, "No jobs available.");
                if matches!(format, OutputFormat::Pretty) {
                    Ok(format!("{}{}", heading(Route::Jobs.title(), palette), table))
                } else {
                    Ok(table)
                }
            }
        }
    }
}

/// The company's posted jobs and application counters
pub struct CompanyJobs {
    jobs: Vec<JobListing>,
    stats: Value,
}

impl CompanyJobs {
    pub async fn load(env: &ViewEnv, scope: &RequestScope) -> Result<Self> {
        let jobs = scope.run(env.client.company_jobs()).await?;
        let stats = scope.run(env.client.application_stats()).await?;
        Ok(Self { jobs, stats })
    }

    pub fn jobs(&self) -> &[JobListing] {
        &self.jobs
    }

    pub fn stats(&self) -> &Value {
        &self.stats
    }

    pub async fn delete(&mut self, job_id: u64, env: &ViewEnv, scope: &RequestScope) -> Result<()> {
        scope.run(env.client.delete_job(job_id)).await?;
        self.jobs.retain(|j| j.id != job_id);
        Ok(())
    }
}

impl Formattable for CompanyJobs {
    fn format(&self, format: OutputFormat, palette: &Palette) -> Result<String> {
        match format {
            OutputFormat::Json => Ok(format_route_json(
                &Route::CompanyJobs.path(),
                &json!({ "jobs": self.jobs, "stats": self.stats }),
            )?),
            OutputFormat::Table | OutputFormat::Pretty => {
                let rows: Vec<JobDisplay> = self.jobs.iter().map(JobDisplay::from).collect();
                let table = format_table_or(&rows, "You have not posted any jobs yet.");
                if !matches!(format, OutputFormat::Pretty) {
                    return Ok(table);
                }

                let mut out = heading(Route::CompanyJobs.title(), palette);
                if let Value::Object(stats) = &self.stats {
                    for (key, value) in stats {
                        let value = match value {
                            Value::String(s) => s.clone(),
                            other => other.to_string(),
                        };
                        out.push_str(&format!("{}\n", field(&key.replace('_', " "), &value, palette)));
                    }
                    out.push('\n');
                }
                out.push_str(&table);
                Ok(out)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::models::Role;
    use crate::views::tests::env_for;

    #[tokio::test]
    async fn test_apply_marks_job_applied() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/jobs")
            .with_status(200)
            .with_body(r#"{"jobs": [{"id": 5, "title": "Backend intern", "applicant_count": 2}]}"#)
            .expect(1)
            .create_async()
            .await;
        server
            .mock("GET", "/my-job-applications")
            .with_status(200)
            .with_body(r#"{"job_ids": null}"#)
            .create_async()
            .await;
        server
            .mock("POST", "/jobs/5/apply")
            .with_status(201)
            .with_body(r#"{"message": "Application submitted", "application_id": 99}"#)
            .create_async()
            .await;

        let env = env_for(&server, Some(Role::Student));
        let scope = RequestScope::new();
        let mut board = JobBoard::load(&env, &scope).await.unwrap();
        assert!(!board.has_applied(5));

        let id = board
            .apply(5, &JobApplicationRequest::default(), &env, &scope)
            .await
            .unwrap();

        assert_eq!(id, 99);
        assert!(board.has_applied(5));
        assert_eq!(board.jobs()[0].applicant_count, 3);
        assert_eq!(
            env.notifications.list()[0].message,
            "Successfully applied to \"Backend intern\"."
        );
    }

    #[tokio::test]
    async fn test_company_jobs_with_stats() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/company/jobs")
            .with_status(200)
            .with_body(r#"{"jobs": [{"id": 1, "title": "Data intern"}]}"#)
            .create_async()
            .await;
        server
            .mock("GET", "/company/application-stats")
            .with_status(200)
            .with_body(r#"{"total_applications": 4, "shortlisted": 1}"#)
            .create_async()
            .await;

        let env = env_for(&server, Some(Role::Company));
        let scope = RequestScope::new();
        let view = CompanyJobs::load(&env, &scope).await.unwrap();

        assert_eq!(view.stats()["total_applications"], 4);
        colored::control::set_override(false);
        let out = view.format(OutputFormat::Pretty, &Palette::LIGHT).unwrap();
        assert!(out.contains("total applications: 4"));
        assert!(out.contains("Data intern"));
    }
}
