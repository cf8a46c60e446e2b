//! Guide, conversation and chat display models

use serde::Serialize;
use tabled::Tabled;

use crate::client::models::{ChatMessage, ConnectionRequest, Conversation, Guide};
use crate::output::formatters::{format_date, truncate};

/// Guide display model for table/JSON output.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct GuideDisplay {
    #[tabled(rename = "ID")]
    pub id: u64,

    #[tabled(rename = "NAME")]
    pub name: String,

    #[tabled(rename = "POSITION")]
    pub position: String,

    #[tabled(rename = "UNIVERSITY")]
    pub university: String,

    #[tabled(rename = "CONNECTED")]
    pub connected: String,
}

impl GuideDisplay {
    pub fn new(guide: &Guide, connected: bool) -> Self {
        Self {
            id: guide.id,
            name: guide.name.clone(),
            position: guide.position.clone(),
            university: guide.university.clone(),
            connected: super::check(connected),
        }
    }
}

/// Conversation summary display model for table/JSON output.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct ConversationDisplay {
    #[tabled(rename = "STUDENT")]
    pub student: String,

    #[tabled(rename = "GUIDE")]
    pub guide: String,

    #[tabled(rename = "LAST MESSAGE")]
    pub last_message: String,

    #[tabled(rename = "UNREAD")]
    pub unread: u32,

    #[tabled(rename = "OPEN WITH")]
    pub path: String,
}

impl From<&Conversation> for ConversationDisplay {
    fn from(conv: &Conversation) -> Self {
        Self {
            student: conv.student_name.clone(),
            guide: conv.guide_name.clone(),
            last_message: truncate(&conv.last_message, 40),
            unread: conv.unread_count,
            path: format!("/chat/{}/{}", conv.student_id, conv.guide_id),
        }
    }
}

/// Chat message display model for table/JSON output.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct ChatMessageDisplay {
    #[tabled(rename = "FROM")]
    pub sender: String,

    #[tabled(rename = "MESSAGE")]
    pub message: String,

    #[tabled(rename = "SENT")]
    pub sent_at: String,
}

impl From<&ChatMessage> for ChatMessageDisplay {
    fn from(msg: &ChatMessage) -> Self {
        Self {
            sender: msg.sender_role.clone(),
            message: msg.message.clone(),
            sent_at: format_date(msg.created_at.as_deref()),
        }
    }
}

/// Pending connection request display model for table/JSON output.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct ConnectionRequestDisplay {
    #[tabled(rename = "REQUEST")]
    pub id: u64,

    #[tabled(rename = "STUDENT")]
    pub student_id: u64,

    #[tabled(rename = "STATUS")]
    pub status: String,

    #[tabled(rename = "REQUESTED")]
    pub created_at: String,
}

impl From<&ConnectionRequest> for ConnectionRequestDisplay {
    fn from(req: &ConnectionRequest) -> Self {
        Self {
            id: req.id,
            student_id: req.student_id,
            status: req.status.clone(),
            created_at: format_date(req.created_at.as_deref()),
        }
    }
}
