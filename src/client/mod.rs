//! SkillBridge API client
//!
//! [`Gateway`] is the single HTTP call path. [`SkillBridgeClient`] layers the
//! session on top of it and implements the facade traits in [`api`].

pub mod api;
pub mod gateway;
pub mod models;
pub mod scope;
pub mod skillbridge;

pub use api::{AuthApi, ChatApi, DashboardApi, JobApi, ProjectApi, ResumeApi, SubmissionApi};
pub use gateway::Gateway;
pub use scope::RequestScope;
pub use skillbridge::SkillBridgeClient;
