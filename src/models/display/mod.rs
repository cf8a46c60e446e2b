//! Display model implementations for table and JSON output

mod chat;
mod job;
mod notification;
mod project;
mod submission;

pub use chat::{ChatMessageDisplay, ConnectionRequestDisplay, ConversationDisplay, GuideDisplay};
pub use job::{JobApplicationDisplay, JobDisplay};
pub use notification::NotificationDisplay;
pub use project::{ApplicationDisplay, ProjectDisplay};
pub use submission::SubmissionDisplay;

/// Checkmark cell for boolean columns
pub(crate) fn check(flag: bool) -> String {
    if flag {
        "\u{2713}".to_string()
    } else {
        String::new()
    }
}
