//! Application lists: a student's applied projects and a company's inbox

use super::ViewEnv;
use crate::cli::OutputFormat;
use crate::client::models::ProjectApplication;
use crate::client::{DashboardApi, ProjectApi, RequestScope};
use crate::error::Result;
use crate::events::{AppEvent, Subscription};
use crate::models::ApplicationDisplay;
use crate::output::Formattable;
use crate::output::formatters::{field, heading, status};
use crate::output::json::format_route_json;
use crate::output::table::format_table_or;
use crate::routes::Route;
use crate::theme::{Palette, paint};

/// Projects the signed-in student applied to
pub struct AppliedProjects {
    applications: Vec<ProjectApplication>,
}

impl AppliedProjects {
    pub async fn load(env: &ViewEnv, scope: &RequestScope) -> Result<Self> {
        let applications = scope.run(env.client.my_applications()).await?;
        Ok(Self { applications })
    }

    pub fn applications(&self) -> &[ProjectApplication] {
        &self.applications
    }

    /// Withdraw from `project_id` and drop its row.
    pub async fn withdraw(
        &mut self,
        project_id: u64,
        env: &ViewEnv,
        scope: &RequestScope,
    ) -> Result<()> {
        scope.run(env.client.withdraw_application(project_id)).await?;

        let title = self
            .applications
            .iter()
            .find(|a| a.project_id == project_id)
            .map(|a| a.project_title.clone())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| "Unknown Project".to_string());
        self.applications.retain(|a| a.project_id != project_id);

        env.announce_application_change(format!("Successfully withdrew from \"{}\".", title))
    }

    /// Refetch when another screen changed applications since the last call.
    ///
    /// Returns whether a refetch happened.
    pub async fn refresh_if_changed(
        &mut self,
        events: &mut Subscription,
        env: &ViewEnv,
        scope: &RequestScope,
    ) -> Result<bool> {
        if !events.drain_contains(AppEvent::ApplicationsChanged) {
            return Ok(false);
        }
        self.applications = scope.run(env.client.my_applications()).await?;
        Ok(true)
    }
}

impl Formattable for AppliedProjects {
    fn format(&self, format: OutputFormat, palette: &Palette) -> Result<String> {
        let route = Route::AppliedProjects;
        match format {
            OutputFormat::Json => Ok(format_route_json(&route.path(), &self.applications)?),
            OutputFormat::Table => {
                let rows: Vec<ApplicationDisplay> =
                    self.applications.iter().map(ApplicationDisplay::from).collect();
                Ok(format_table_or(&rows, "You have not applied to any projects yet."))
            }
            OutputFormat::Pretty => {
                let mut out = heading(route.title(), palette);
                if self.applications.is_empty() {
                    out.push_str("You have not applied to any projects yet.");
                    return Ok(out);
                }
                for app in &self.applications {
                    let title = if app.project_title.is_empty() {
                        format!("Project #{}", app.project_id)
                    } else {
                        app.project_title.clone()
                    };
                    out.push_str(&format!(
                        "\n{} {}\n  {}\n",
                        title,
                        status(&app.status, palette),
                        paint(&format!("skillbridge withdraw {}", app.project_id), palette.text_secondary)
                    ));
                    if !app.github_repo_url.is_empty() {
                        out.push_str(&format!("  {}\n", field("Repository", &app.github_repo_url, palette)));
                    }
                }
                Ok(out)
            }
        }
    }
}

/// Applications to the signed-in company's projects
pub struct ApplicationList {
    applications: Vec<ProjectApplication>,
}

impl ApplicationList {
    pub async fn load(env: &ViewEnv, scope: &RequestScope) -> Result<Self> {
        let applications = scope.run(env.client.company_applications()).await?;
        Ok(Self { applications })
    }

    pub fn applications(&self) -> &[ProjectApplication] {
        &self.applications
    }
}

impl Formattable for ApplicationList {
    fn format(&self, format: OutputFormat, palette: &Palette) -> Result<String> {
        let route = Route::CompanyApplications;
        match format {
            OutputFormat::Json => Ok(format_route_json(&route.path(), &self.applications)?),
            OutputFormat::Table | OutputFormat::Pretty => {
                let rows: Vec<ApplicationDisplay> =
                    self.applications.iter().map(ApplicationDisplay::from).collect();
                let table = format_table_or(&rows, "No applications yet.");
                if matches!(format, OutputFormat::Pretty) {
                    Ok(format!("{}{}", heading(route.title(), palette), table))
                } else {
                    Ok(table)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::models::Role;
    use crate::views::tests::env_for;

    const TWO_APPLICATIONS: &str = r#"{"applications": [
        {"id": 1, "project_id": 41, "project_title": "ETL", "status": "pending"},
        {"id": 2, "project_id": 42, "project_title": "Chat bot", "status": "accepted"}
    ]}"#;

    #[tokio::test]
    async fn test_withdraw_drops_row_and_notifies() {
        let mut server = mockito::Server::new_async().await;
        let list = server
            .mock("GET", "/my-applications")
            .with_status(200)
            .with_body(TWO_APPLICATIONS)
            .expect(1)
            .create_async()
            .await;
        let withdraw = server
            .mock("DELETE", "/projects/41/apply")
            .with_status(200)
            .with_body(r#"{"message": "Application withdrawn"}"#)
            .expect(1)
            .create_async()
            .await;

        let env = env_for(&server, Some(Role::Student));
        let mut events = env.events().subscribe();
        let scope = RequestScope::new();
        let mut view = AppliedProjects::load(&env, &scope).await.unwrap();

        view.withdraw(41, &env, &scope).await.unwrap();

        assert_eq!(view.applications().len(), 1);
        assert_eq!(view.applications()[0].project_id, 42);
        assert_eq!(
            env.notifications.list()[0].message,
            "Successfully withdrew from \"ETL\"."
        );
        assert!(events.drain_contains(AppEvent::ApplicationsChanged));
        withdraw.assert_async().await;
        list.assert_async().await;
    }

    #[tokio::test]
    async fn test_refresh_only_after_change_event() {
        let mut server = mockito::Server::new_async().await;
        let list = server
            .mock("GET", "/my-applications")
            .with_status(200)
            .with_body(TWO_APPLICATIONS)
            .expect(2)
            .create_async()
            .await;

        let env = env_for(&server, Some(Role::Student));
        let mut events = env.events().subscribe();
        let scope = RequestScope::new();
        let mut view = AppliedProjects::load(&env, &scope).await.unwrap();

        assert!(!view.refresh_if_changed(&mut events, &env, &scope).await.unwrap());

        env.events().publish(AppEvent::ApplicationsChanged);
        assert!(view.refresh_if_changed(&mut events, &env, &scope).await.unwrap());
        list.assert_async().await;
    }

    #[tokio::test]
    async fn test_company_applications_empty() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/company/applications")
            .with_status(200)
            .with_body(r#"{"applications": null}"#)
            .create_async()
            .await;

        let env = env_for(&server, Some(Role::Company));
        let scope = RequestScope::new();
        let view = ApplicationList::load(&env, &scope).await.unwrap();

        assert!(view.applications().is_empty());
        let out = view.format(OutputFormat::Table, &Palette::LIGHT).unwrap();
        assert_eq!(out, "No applications yet.");
    }
}
