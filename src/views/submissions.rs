//! Submission lists for students, companies and guides

use futures::future::try_join_all;

use super::ViewEnv;
use crate::cli::OutputFormat;
use crate::client::models::{Submission, SubmissionReview};
use crate::client::{ProjectApi, RequestScope, SubmissionApi};
use crate::error::Result;
use crate::models::SubmissionDisplay;
use crate::output::Formattable;
use crate::output::formatters::heading;
use crate::output::json::format_route_json;
use crate::output::table::format_table_or;
use crate::routes::Route;
use crate::theme::Palette;

pub struct SubmissionList {
    route: Route,
    submissions: Vec<Submission>,
}

impl SubmissionList {
    /// Load the submissions `route` shows.
    ///
    /// Companies see submissions for every project they posted, fetched
    /// concurrently.
    pub async fn load(route: Route, env: &ViewEnv, scope: &RequestScope) -> Result<Self> {
        let submissions = match route {
            Route::CompanySubmissions => {
                let projects = scope.run(env.client.company_projects()).await?;
                let per_project = scope
                    .run(try_join_all(
                        projects
                            .iter()
                            .map(|p| env.client.project_submissions(p.id)),
                    ))
                    .await?;
                per_project.into_iter().flatten().collect()
            }
            Route::GuideSubmissions => scope.run(env.client.guide_submissions()).await?,
            _ => scope.run(env.client.my_submissions()).await?,
        };

        Ok(Self { route, submissions })
    }

    pub fn submissions(&self) -> &[Submission] {
        &self.submissions
    }

    /// Review a submission and record the verdict locally.
    pub async fn review(
        &mut self,
        id: u64,
        review: SubmissionReview,
        env: &ViewEnv,
        scope: &RequestScope,
    ) -> Result<()> {
        scope.run(env.client.review_submission(id, &review)).await?;
        if let Some(sub) = self.submissions.iter_mut().find(|s| s.id == id) {
            sub.review_status = review.status.clone();
            if let Some(feedback) = review.feedback {
                sub.review_comment = feedback;
            }
        }
        Ok(())
    }
}

impl Formattable for SubmissionList {
    fn format(&self, format: OutputFormat, palette: &Palette) -> Result<String> {
        match format {
            OutputFormat::Json => Ok(format_route_json(&self.route.path(), &self.submissions)?),
            OutputFormat::Table | OutputFormat::Pretty => {
                let rows: Vec<SubmissionDisplay> =
                    self.submissions.iter().map(SubmissionDisplay::from).collect();
                let table = format_table_or(&rows, "No submissions yet.");
                if matches!(format, OutputFormat::Pretty) {
                    Ok(format!("{}{}", heading(self.route.title(), palette), table))
                } else {
                    Ok(table)
                }
            }
        }
    }
}
