//! Route table
//!
//! Every screen is reachable by a path. Each [`Route`] declares who may see
//! it exactly once, in [`Route::access`]; the guard and controller read that
//! table instead of each view carrying its own role check.

pub mod controller;
pub mod guard;

use crate::client::models::Role;

pub use controller::{Navigation, RedirectReason, RouteController};
pub use guard::{GuardOutcome, guard};

/// Login screen, also the target for signed-out users
pub const LOGIN_PATH: &str = "/";
/// Landing screen for signed-in users
pub const DASHBOARD_PATH: &str = "/dashboard";

/// Who may open a route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Anyone, signed in or not
    Public,
    /// Any signed-in user
    Authenticated,
    /// Signed-in users with one of these roles
    Roles(&'static [Role]),
}

impl Access {
    pub fn allows(&self, role: Role) -> bool {
        match self {
            Access::Public | Access::Authenticated => true,
            Access::Roles(roles) => roles.contains(&role),
        }
    }
}

const STUDENT: &[Role] = &[Role::Student];
const COMPANY: &[Role] = &[Role::Company];
const GUIDE: &[Role] = &[Role::Guide];
const STUDENT_OR_GUIDE: &[Role] = &[Role::Student, Role::Guide];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Signup,
    Projects,
    ProjectDetails(u64),
    Guides,
    Dashboard,
    Profile,
    EditProfile,
    ResumeBuilder,
    AppliedProjects,
    Submissions,
    Jobs,
    PostProject,
    CompanyProjects,
    CompanyApplications,
    CompanySubmissions,
    CompanyJobs,
    PostJob,
    GuideSubmissions,
    PendingConfirmations,
    Conversations,
    Chat { student_id: u64, guide_id: u64 },
}

impl Route {
    /// Match a path such as `/projects/42`. Query strings and a trailing
    /// slash are ignored.
    pub fn parse(path: &str) -> Option<Route> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        let route = match segments.as_slice() {
            [] => Route::Login,
            ["signup"] => Route::Signup,
            ["projects"] => Route::Projects,
            ["projects", id] => Route::ProjectDetails(id.parse().ok()?),
            ["guides"] => Route::Guides,
            ["dashboard"] => Route::Dashboard,
            ["profile"] => Route::Profile,
            ["profile", "edit"] => Route::EditProfile,
            ["resume-builder"] => Route::ResumeBuilder,
            ["applied-projects"] => Route::AppliedProjects,
            ["submissions"] => Route::Submissions,
            ["jobs"] => Route::Jobs,
            ["post-project"] => Route::PostProject,
            ["company", "projects"] => Route::CompanyProjects,
            ["company", "applications"] => Route::CompanyApplications,
            ["company", "submissions"] => Route::CompanySubmissions,
            ["company", "jobs"] => Route::CompanyJobs,
            ["post-job"] => Route::PostJob,
            ["guide", "submissions"] => Route::GuideSubmissions,
            ["pending-confirmations"] => Route::PendingConfirmations,
            ["conversations"] => Route::Conversations,
            ["chat", student_id, guide_id] => Route::Chat {
                student_id: student_id.parse().ok()?,
                guide_id: guide_id.parse().ok()?,
            },
            _ => return None,
        };
        Some(route)
    }

    pub fn path(&self) -> String {
        match self {
            Route::Login => LOGIN_PATH.to_string(),
            Route::Signup => "/signup".to_string(),
            Route::Projects => "/projects".to_string(),
            Route::ProjectDetails(id) => format!("/projects/{}", id),
            Route::Guides => "/guides".to_string(),
            Route::Dashboard => DASHBOARD_PATH.to_string(),
            Route::Profile => "/profile".to_string(),
            Route::EditProfile => "/profile/edit".to_string(),
            Route::ResumeBuilder => "/resume-builder".to_string(),
            Route::AppliedProjects => "/applied-projects".to_string(),
            Route::Submissions => "/submissions".to_string(),
            Route::Jobs => "/jobs".to_string(),
            Route::PostProject => "/post-project".to_string(),
            Route::CompanyProjects => "/company/projects".to_string(),
            Route::CompanyApplications => "/company/applications".to_string(),
            Route::CompanySubmissions => "/company/submissions".to_string(),
            Route::CompanyJobs => "/company/jobs".to_string(),
            Route::PostJob => "/post-job".to_string(),
            Route::GuideSubmissions => "/guide/submissions".to_string(),
            Route::PendingConfirmations => "/pending-confirmations".to_string(),
            Route::Conversations => "/conversations".to_string(),
            Route::Chat {
                student_id,
                guide_id,
            } => format!("/chat/{}/{}", student_id, guide_id),
        }
    }

    pub fn access(&self) -> Access {
        match self {
            Route::Login
            | Route::Signup
            | Route::Projects
            | Route::ProjectDetails(_)
            | Route::Guides => Access::Public,

            Route::Dashboard | Route::Profile | Route::EditProfile | Route::ResumeBuilder => {
                Access::Authenticated
            }

            Route::AppliedProjects | Route::Submissions | Route::Jobs => Access::Roles(STUDENT),

            Route::PostProject
            | Route::CompanyProjects
            | Route::CompanyApplications
            | Route::CompanySubmissions
            | Route::CompanyJobs
            | Route::PostJob => Access::Roles(COMPANY),

            Route::GuideSubmissions | Route::PendingConfirmations => Access::Roles(GUIDE),

            Route::Conversations | Route::Chat { .. } => Access::Roles(STUDENT_OR_GUIDE),
        }
    }

    /// Heading shown above the rendered screen
    pub fn title(&self) -> &'static str {
        match self {
            Route::Login => "Sign in",
            Route::Signup => "Create an account",
            Route::Projects => "Projects",
            Route::ProjectDetails(_) => "Project details",
            Route::Guides => "Guides",
            Route::Dashboard => "Dashboard",
            Route::Profile => "Profile",
            Route::EditProfile => "Edit profile",
            Route::ResumeBuilder => "Resume builder",
            Route::AppliedProjects => "Applied projects",
            Route::Submissions => "My submissions",
            Route::Jobs => "Jobs",
            Route::PostProject => "Post a project",
            Route::CompanyProjects => "Company projects",
            Route::CompanyApplications => "Applications",
            Route::CompanySubmissions => "Submissions received",
            Route::CompanyJobs => "Job management",
            Route::PostJob => "Post a job",
            Route::GuideSubmissions => "Student submissions",
            Route::PendingConfirmations => "Pending confirmations",
            Route::Conversations => "Conversations",
            Route::Chat { .. } => "Chat",
        }
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.path())
    }
}
