//! Role dashboard

use serde_json::{Value, json};

use super::ViewEnv;
use crate::cli::OutputFormat;
use crate::client::models::{Role, UserProfile};
use crate::client::{DashboardApi, RequestScope};
use crate::error::Result;
use crate::events::{AppEvent, Subscription};
use crate::notifications::Notification;
use crate::output::Formattable;
use crate::output::formatters::{field, heading};
use crate::output::json::format_route_json;
use crate::output::table::format_fields;
use crate::routes::Route;
use crate::theme::{Palette, paint};

/// Counters for the signed-in user's role plus their notifications
pub struct DashboardView {
    user: UserProfile,
    stats: Value,
    notifications: Vec<Notification>,
}

async fn fetch_stats(role: Role, env: &ViewEnv, scope: &RequestScope) -> Result<Value> {
    let stats = match role {
        Role::Student => scope.run(env.client.student_dashboard()).await?,
        Role::Company => scope.run(env.client.company_dashboard()).await?,
        Role::Guide => scope.run(env.client.guide_dashboard()).await?,
        Role::Unknown => {
            log::debug!("No dashboard for unknown role");
            Value::Null
        }
    };
    Ok(stats)
}

/// Flatten nested counters into `("projects applications", "3")` pairs
fn flatten(prefix: &str, value: &Value, out: &mut Vec<(String, String)>) {
    match value {
        Value::Object(map) => {
            for (key, inner) in map {
                let label = key.replace('_', " ");
                let label = if prefix.is_empty() {
                    label
                } else {
                    format!("{} {}", prefix, label)
                };
                flatten(&label, inner, out);
            }
        }
        Value::Null => {}
        Value::String(s) => out.push((prefix.to_string(), s.clone())),
        other => out.push((prefix.to_string(), other.to_string())),
    }
}

fn capitalize(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

impl DashboardView {
    pub async fn load(user: UserProfile, env: &ViewEnv, scope: &RequestScope) -> Result<Self> {
        let stats = fetch_stats(user.role, env, scope).await?;
        Ok(Self {
            user,
            stats,
            notifications: env.notifications.list(),
        })
    }

    pub fn user(&self) -> &UserProfile {
        &self.user
    }

    pub fn stats(&self) -> &Value {
        &self.stats
    }

    /// Counters as labelled rows
    pub fn stat_rows(&self) -> Vec<(String, String)> {
        let mut rows = Vec::new();
        flatten("", &self.stats, &mut rows);
        rows.into_iter()
            .map(|(label, value)| (capitalize(&label), value))
            .collect()
    }

    /// Refetch counters and notifications after an application change.
    pub async fn refresh_if_changed(
        &mut self,
        events: &mut Subscription,
        env: &ViewEnv,
        scope: &RequestScope,
    ) -> Result<bool> {
        if !events.drain_contains(AppEvent::ApplicationsChanged) {
            return Ok(false);
        }
        self.stats = fetch_stats(self.user.role, env, scope).await?;
        self.notifications = env.notifications.list();
        Ok(true)
    }
}

impl Formattable for DashboardView {
    fn format(&self, format: OutputFormat, palette: &Palette) -> Result<String> {
        let unread = self.notifications.iter().filter(|n| n.unread).count();
        match format {
            OutputFormat::Json => Ok(format_route_json(
                &Route::Dashboard.path(),
                &json!({
                    "user": self.user,
                    "stats": self.stats,
                    "notifications": self.notifications,
                }),
            )?),
            OutputFormat::Table => {
                let mut rows = vec![
                    ("User".to_string(), self.user.display_name().to_string()),
                    ("Role".to_string(), self.user.role.to_string()),
                ];
                rows.extend(self.stat_rows());
                rows.push(("Unread notifications".to_string(), unread.to_string()));
                Ok(format_fields(rows.iter().map(|(l, v)| (l.as_str(), v.clone()))))
            }
            OutputFormat::Pretty => {
                let mut out = heading(
                    &format!("Welcome back, {}", self.user.display_name()),
                    palette,
                );
                out.push_str(&format!("{}\n", field("Role", self.user.role.as_str(), palette)));
                for (label, value) in self.stat_rows() {
                    out.push_str(&format!("{}\n", field(&label, &value, palette)));
                }
                if unread > 0 {
                    out.push_str(&format!(
                        "\n{}\n",
                        paint(&format!("{} unread notification(s)", unread), palette.info)
                    ));
                    for n in self.notifications.iter().filter(|n| n.unread).take(5) {
                        out.push_str(&format!("  {} {}\n", paint(&n.time, palette.text_secondary), n.message));
                    }
                }
                Ok(out.trim_end().to_string())
            }
        }
    }
}
