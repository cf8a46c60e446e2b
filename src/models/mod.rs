//! Display models for CLI output
//!
//! Display models turn API payloads into table rows with stable column
//! names. JSON output serializes the same rows.

pub mod display;

pub use display::{
    ApplicationDisplay, ChatMessageDisplay, ConnectionRequestDisplay, ConversationDisplay,
    GuideDisplay, JobApplicationDisplay, JobDisplay, NotificationDisplay, ProjectDisplay,
    SubmissionDisplay,
};
