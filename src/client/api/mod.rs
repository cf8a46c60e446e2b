//! API trait definitions split by responsibility
//!
//! The SkillBridge API surface is organized into focused traits:
//! - [`AuthApi`] - Sign-in, sign-up, profile and token refresh
//! - [`ProjectApi`] - Project listings and applications
//! - [`SubmissionApi`] - Project submissions and reviews
//! - [`DashboardApi`] - Role dashboards and application lists
//! - [`ChatApi`] - Guides, connections and chat
//! - [`JobApi`] - Job listings and job applications
//! - [`ResumeApi`] - Resume generation
//!
//! [`SkillBridgeClient`](super::SkillBridgeClient) implements all of them.

mod auth;
mod chat;
mod dashboard;
mod job;
mod project;
mod resume;
mod submission;

pub use auth::AuthApi;
pub use chat::ChatApi;
pub use dashboard::DashboardApi;
pub use job::JobApi;
pub use project::ProjectApi;
pub use resume::ResumeApi;
pub use submission::SubmissionApi;
