//! Screens that only collect input
//!
//! Forms load nothing. Rendering one lists the command that submits it.

use serde_json::json;

use crate::cli::OutputFormat;
use crate::client::models::UserProfile;
use crate::error::Result;
use crate::output::Formattable;
use crate::output::formatters::heading;
use crate::output::json::format_route_json;
use crate::output::table::format_fields;
use crate::routes::Route;
use crate::theme::{Palette, paint};

pub struct FormScreen {
    route: Route,
    user: Option<UserProfile>,
}

impl FormScreen {
    pub fn new(route: Route, user: Option<UserProfile>) -> Self {
        Self { route, user }
    }

    pub fn route(&self) -> Route {
        self.route
    }

    /// Command that submits this form
    pub fn command(&self) -> &'static str {
        match self.route {
            Route::Login => "skillbridge login --email <email>",
            Route::Signup => "skillbridge signup --name <name> --email <email> --role <role>",
            Route::PostProject => "skillbridge project post --title <title> --description <text>",
            Route::PostJob => "skillbridge job post --title <title> --description <text>",
            Route::ResumeBuilder => "skillbridge resume generate --file <resume.json>",
            _ => "skillbridge --help",
        }
    }
}

impl Formattable for FormScreen {
    fn format(&self, format: OutputFormat, palette: &Palette) -> Result<String> {
        let signed_in_as = self.user.as_ref().map(|u| u.display_name().to_string());
        match format {
            OutputFormat::Json => Ok(format_route_json(
                &self.route.path(),
                &json!({ "command": self.command(), "user": signed_in_as }),
            )?),
            OutputFormat::Table => Ok(format_fields([
                ("Form", self.route.title().to_string()),
                ("Command", self.command().to_string()),
                ("Signed in as", signed_in_as.unwrap_or_default()),
            ])),
            OutputFormat::Pretty => Ok(format!(
                "{}{}",
                heading(self.route.title(), palette),
                paint(self.command(), palette.info)
            )),
        }
    }
}
