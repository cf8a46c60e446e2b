//! Screen state and rendering
//!
//! A screen is loaded only after the route controller allowed it. All of
//! its calls go through the caller's [`RequestScope`], so unmounting the
//! scope discards whatever is still loading. Mutating actions update the
//! loaded state in place instead of refetching, record a local
//! notification, and publish on the event bus so other screens can refresh.

pub mod applications;
pub mod dashboard;
pub mod forms;
pub mod jobs;
pub mod messaging;
pub mod profile;
pub mod projects;
pub mod submissions;

use std::sync::Arc;

use crate::cli::OutputFormat;
use crate::client::models::UserProfile;
use crate::client::{RequestScope, SkillBridgeClient};
use crate::error::{ApiError, Result};
use crate::events::{AppEvent, EventBus};
use crate::notifications::NotificationCenter;
use crate::output::Formattable;
use crate::routes::Route;
use crate::theme::Palette;

pub use applications::{AppliedProjects, ApplicationList};
pub use dashboard::DashboardView;
pub use forms::FormScreen;
pub use jobs::{CompanyJobs, JobBoard};
pub use messaging::{ChatThread, ConversationList, GuideDirectory, PendingConfirmations};
pub use profile::ProfileView;
pub use projects::{CompanyProjects, ProjectBoard, ProjectDetailsView};
pub use submissions::SubmissionList;

/// Shared services every screen may use
#[derive(Clone)]
pub struct ViewEnv {
    pub client: Arc<SkillBridgeClient>,
    pub notifications: Arc<NotificationCenter>,
}

impl ViewEnv {
    pub fn new(client: Arc<SkillBridgeClient>, notifications: Arc<NotificationCenter>) -> Self {
        Self {
            client,
            notifications,
        }
    }

    pub fn events(&self) -> &EventBus {
        self.client.events()
    }

    /// Record a notification and tell other screens that applications changed.
    pub(crate) fn announce_application_change(&self, message: String) -> Result<()> {
        self.notifications.add(message)?;
        self.events().publish(AppEvent::ApplicationsChanged);
        Ok(())
    }
}

/// The signed-in profile, for screens that only render behind the guard
pub(crate) fn require_user(user: Option<UserProfile>) -> Result<UserProfile> {
    user.ok_or_else(|| ApiError::NotLoggedIn.into())
}

/// A loaded screen
pub enum Screen {
    Form(FormScreen),
    Dashboard(DashboardView),
    Projects(ProjectBoard),
    ProjectDetails(ProjectDetailsView),
    CompanyProjects(CompanyProjects),
    Guides(GuideDirectory),
    Profile(ProfileView),
    AppliedProjects(AppliedProjects),
    Applications(ApplicationList),
    Submissions(SubmissionList),
    Jobs(JobBoard),
    CompanyJobs(CompanyJobs),
    PendingConfirmations(PendingConfirmations),
    Conversations(ConversationList),
    Chat(ChatThread),
}

impl Screen {
    /// Load the data `route` shows. `user` is the profile the guard saw.
    pub async fn load(
        route: Route,
        user: Option<UserProfile>,
        env: &ViewEnv,
        scope: &RequestScope,
    ) -> Result<Screen> {
        log::debug!("Loading {}", route);

        let screen = match route {
            Route::Login
            | Route::Signup
            | Route::PostProject
            | Route::PostJob
            | Route::ResumeBuilder => Screen::Form(FormScreen::new(route, user)),
            Route::Dashboard => {
                Screen::Dashboard(DashboardView::load(require_user(user)?, env, scope).await?)
            }
            Route::Projects => Screen::Projects(ProjectBoard::load(user, env, scope).await?),
            Route::ProjectDetails(id) => {
                Screen::ProjectDetails(ProjectDetailsView::load(id, user, env, scope).await?)
            }
            Route::CompanyProjects => {
                Screen::CompanyProjects(CompanyProjects::load(env, scope).await?)
            }
            Route::Guides => Screen::Guides(GuideDirectory::load(user, env, scope).await?),
            Route::Profile | Route::EditProfile => {
                Screen::Profile(ProfileView::load(route, env, scope).await?)
            }
            Route::AppliedProjects => {
                Screen::AppliedProjects(AppliedProjects::load(env, scope).await?)
            }
            Route::CompanyApplications => {
                Screen::Applications(ApplicationList::load(env, scope).await?)
            }
            Route::Submissions | Route::CompanySubmissions | Route::GuideSubmissions => {
                Screen::Submissions(SubmissionList::load(route, env, scope).await?)
            }
            Route::Jobs => Screen::Jobs(JobBoard::load(env, scope).await?),
            Route::CompanyJobs => Screen::CompanyJobs(CompanyJobs::load(env, scope).await?),
            Route::PendingConfirmations => {
                Screen::PendingConfirmations(PendingConfirmations::load(env, scope).await?)
            }
            Route::Conversations => {
                Screen::Conversations(ConversationList::load(env, scope).await?)
            }
            Route::Chat {
                student_id,
                guide_id,
            } => Screen::Chat(ChatThread::load(student_id, guide_id, env, scope).await?),
        };

        Ok(screen)
    }

    fn view(&self) -> &dyn Formattable {
        match self {
            Screen::Form(v) => v,
            Screen::Dashboard(v) => v,
            Screen::Projects(v) => v,
            Screen::ProjectDetails(v) => v,
            Screen::CompanyProjects(v) => v,
            Screen::Guides(v) => v,
            Screen::Profile(v) => v,
            Screen::AppliedProjects(v) => v,
            Screen::Applications(v) => v,
            Screen::Submissions(v) => v,
            Screen::Jobs(v) => v,
            Screen::CompanyJobs(v) => v,
            Screen::PendingConfirmations(v) => v,
            Screen::Conversations(v) => v,
            Screen::Chat(v) => v,
        }
    }
}

impl Formattable for Screen {
    fn format(&self, format: OutputFormat, palette: &Palette) -> Result<String> {
        self.view().format(format, palette)
    }
}
