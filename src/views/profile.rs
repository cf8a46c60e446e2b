//! Profile and profile editing

use super::ViewEnv;
use crate::cli::OutputFormat;
use crate::client::models::{ProfileUpdate, Role, UserProfile};
use crate::client::{AuthApi, RequestScope};
use crate::error::{ApiError, Result};
use crate::output::Formattable;
use crate::output::formatters::{field, heading};
use crate::output::json::format_route_json;
use crate::output::table::format_fields;
use crate::routes::Route;
use crate::theme::{Palette, paint};

/// Labelled extras shown for each role
fn role_fields(role: Role) -> &'static [(&'static str, &'static str)] {
    match role {
        Role::Student => &[
            ("University", "university"),
            ("Major", "major"),
            ("Year", "year"),
            ("Skills", "skills"),
            ("Bio", "bio"),
            ("Phone", "phone"),
            ("GitHub", "github_url"),
            ("LinkedIn", "linkedin"),
            ("Portfolio", "portfolio_url"),
        ],
        Role::Company => &[
            ("Company", "company_name"),
            ("Position", "position"),
            ("Phone", "phone"),
            ("Bio", "bio"),
            ("LinkedIn", "linkedin"),
        ],
        Role::Guide => &[
            ("University", "university"),
            ("Position", "position"),
            ("Skills", "skills"),
            ("Bio", "bio"),
            ("GitHub", "github_url"),
            ("LinkedIn", "linkedin"),
        ],
        Role::Unknown => &[],
    }
}

pub struct ProfileView {
    route: Route,
    user: UserProfile,
}

impl ProfileView {
    /// Fetch the current profile; the cached copy is refreshed with it.
    pub async fn load(route: Route, env: &ViewEnv, scope: &RequestScope) -> Result<Self> {
        let user = scope.run(env.client.get_profile()).await?;
        Ok(Self { route, user })
    }

    pub fn user(&self) -> &UserProfile {
        &self.user
    }

    pub fn rows(&self) -> Vec<(&'static str, String)> {
        let mut rows = vec![
            ("Name", self.user.display_name().to_string()),
            ("Email", self.user.email.clone()),
            ("Role", self.user.role.to_string()),
        ];
        for &(label, key) in role_fields(self.user.role) {
            if let Some(value) = self.user.field(key) {
                rows.push((label, value.to_string()));
            }
        }
        rows
    }

    /// Save edited fields and show the returned profile.
    pub async fn save(
        &mut self,
        update: &ProfileUpdate,
        env: &ViewEnv,
        scope: &RequestScope,
    ) -> Result<()> {
        if update.is_empty() {
            return Err(ApiError::BadRequest("Nothing to update".into()).into());
        }
        self.user = scope.run(env.client.update_profile(update)).await?;
        Ok(())
    }
}

impl Formattable for ProfileView {
    fn format(&self, format: OutputFormat, palette: &Palette) -> Result<String> {
        match format {
            OutputFormat::Json => Ok(format_route_json(&self.route.path(), &self.user)?),
            OutputFormat::Table => Ok(format_fields(self.rows())),
            OutputFormat::Pretty => {
                let mut out = heading(self.route.title(), palette);
                for (label, value) in self.rows() {
                    out.push_str(&format!("{}\n", field(label, &value, palette)));
                }
                if self.route == Route::EditProfile {
                    out.push_str(&format!(
                        "\n{}",
                        paint("Edit with: skillbridge profile update --bio <text> ...", palette.info)
                    ));
                }
                Ok(out.trim_end().to_string())
            }
        }
    }
}
