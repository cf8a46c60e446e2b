//! SkillBridge API data models
//!
//! The backend owns these shapes; the models here are tolerant readers.
//! Every field the client does not strictly need is defaulted so a backend
//! that omits it still deserializes.

mod auth;
mod chat;
mod job;
mod project;
mod resume;
mod submission;
mod user;

pub use auth::{AuthResponse, GoogleOAuthRequest, LoginRequest, SignupRequest};
pub use chat::{
    ChatMessage, ConnectionAction, ConnectionRequest, Conversation, Guide, SendMessageRequest,
    StartConversationResponse,
};
pub use job::{
    ApplicationStatus, JobApplication, JobApplicationRequest, JobListing, JobPosting,
};
pub use project::{NewProject, Project, ProjectApplication};
pub use resume::{
    ResumeCertification, ResumeEducation, ResumeExperience, ResumeProject, ResumeRequest,
    ResumeResponse,
};
pub use submission::{NewSubmission, Submission, SubmissionReview};
pub use user::{ProfileUpdate, Role, UserProfile};

/// Accept numeric ids that arrive as numbers or strings.
pub(crate) mod id_format {
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Num(u64),
        Text(String),
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<u64, D::Error>
    where
        D: Deserializer<'de>,
    {
        match RawId::deserialize(deserializer)? {
            RawId::Num(n) => Ok(n),
            RawId::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
        }
    }
}
