//! Guide and chat models

use serde::{Deserialize, Serialize};

/// Public guide listing
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Guide {
    #[serde(default, alias = "ID", deserialize_with = "super::id_format::deserialize")]
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub university: String,
    #[serde(default)]
    pub position: String,
    #[serde(default)]
    pub github_url: String,
    #[serde(default)]
    pub linkedin: String,
}

/// One chat message between a student and a guide
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatMessage {
    #[serde(default, alias = "ID", deserialize_with = "super::id_format::deserialize")]
    pub id: u64,
    #[serde(default)]
    pub student_id: u64,
    #[serde(default)]
    pub guide_id: u64,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub sender_id: u64,
    #[serde(default)]
    pub sender_role: String,
    #[serde(default)]
    pub is_read: bool,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Message body
#[derive(Debug, Clone, Serialize)]
pub struct SendMessageRequest {
    pub student_id: u64,
    pub guide_id: u64,
    pub message: String,
}

/// Conversation summary
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Conversation {
    #[serde(default)]
    pub student_id: u64,
    #[serde(default)]
    pub guide_id: u64,
    #[serde(default)]
    pub student_name: String,
    #[serde(default)]
    pub guide_name: String,
    #[serde(default)]
    pub last_message: String,
    #[serde(default)]
    pub last_sender: String,
    #[serde(default)]
    pub last_sent_at: Option<String>,
    #[serde(default)]
    pub unread_count: u32,
}

/// Result of asking a guide to connect
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StartConversationResponse {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub student_id: u64,
    #[serde(default)]
    pub guide_id: u64,
    #[serde(default)]
    pub guide_name: String,
    /// "pending" until the guide confirms; absent when already connected
    #[serde(default)]
    pub status: Option<String>,
}

/// Student request awaiting a guide's decision
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConnectionRequest {
    #[serde(default, alias = "ID", deserialize_with = "super::id_format::deserialize")]
    pub id: u64,
    #[serde(default)]
    pub student_id: u64,
    #[serde(default)]
    pub guide_id: u64,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// A guide's decision on a connection request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionAction {
    Accept,
    Reject,
}
