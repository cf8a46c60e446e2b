//! Guides, connection requests, conversations and chat threads

use std::collections::BTreeSet;

use serde_json::json;

use super::ViewEnv;
use crate::cli::OutputFormat;
use crate::client::models::{
    ChatMessage, ConnectionAction, ConnectionRequest, Conversation, Guide, Role,
    SendMessageRequest, StartConversationResponse, UserProfile,
};
use crate::client::{ChatApi, RequestScope};
use crate::error::{ApiError, Result};
use crate::models::{
    ChatMessageDisplay, ConnectionRequestDisplay, ConversationDisplay, GuideDisplay,
};
use crate::output::Formattable;
use crate::output::formatters::{format_date, heading};
use crate::output::json::format_route_json;
use crate::output::table::format_table_or;
use crate::routes::Route;
use crate::theme::{Palette, paint};

fn titled(table: String, route: &Route, format: OutputFormat, palette: &Palette) -> String {
    if matches!(format, OutputFormat::Pretty) {
        format!("{}{}", heading(route.title(), palette), table)
    } else {
        table
    }
}

/// Public guide directory. Students also see who they are connected to.
pub struct GuideDirectory {
    guides: Vec<Guide>,
    user: Option<UserProfile>,
    connected: BTreeSet<u64>,
}

impl GuideDirectory {
    pub async fn load(
        user: Option<UserProfile>,
        env: &ViewEnv,
        scope: &RequestScope,
    ) -> Result<Self> {
        let guides = scope.run(env.client.list_guides()).await?;
        let connected = if user.as_ref().is_some_and(|u| u.role == Role::Student) {
            scope
                .run(env.client.connected_guides())
                .await?
                .into_iter()
                .collect()
        } else {
            BTreeSet::new()
        };
        Ok(Self {
            guides,
            user,
            connected,
        })
    }

    pub fn guides(&self) -> &[Guide] {
        &self.guides
    }

    pub fn is_connected(&self, guide_id: u64) -> bool {
        self.connected.contains(&guide_id)
    }

    /// Ask a guide to connect. A response without a status means the pair
    /// was already connected.
    pub async fn connect(
        &mut self,
        guide_id: u64,
        env: &ViewEnv,
        scope: &RequestScope,
    ) -> Result<StartConversationResponse> {
        match &self.user {
            None => return Err(ApiError::NotLoggedIn.into()),
            Some(u) if u.role != Role::Student => {
                return Err(ApiError::Forbidden("Only students can contact guides".into()).into());
            }
            Some(_) => {}
        }

        let response = scope.run(env.client.start_conversation(guide_id)).await?;
        if response.status.is_none() {
            self.connected.insert(guide_id);
        }
        Ok(response)
    }
}

impl Formattable for GuideDirectory {
    fn format(&self, format: OutputFormat, palette: &Palette) -> Result<String> {
        let route = Route::Guides;
        match format {
            OutputFormat::Json => Ok(format_route_json(
                &route.path(),
                &json!({ "guides": self.guides, "connected": self.connected }),
            )?),
            _ => {
                let rows: Vec<GuideDisplay> = self
                    .guides
                    .iter()
                    .map(|g| GuideDisplay::new(g, self.is_connected(g.id)))
                    .collect();
                let table = format_table_or(&rows, "No guides available.");
                Ok(titled(table, &route, format, palette))
            }
        }
    }
}

/// Connection requests waiting for the signed-in guide
pub struct PendingConfirmations {
    requests: Vec<ConnectionRequest>,
}

impl PendingConfirmations {
    pub async fn load(env: &ViewEnv, scope: &RequestScope) -> Result<Self> {
        let requests = scope.run(env.client.pending_confirmations()).await?;
        Ok(Self { requests })
    }

    pub fn requests(&self) -> &[ConnectionRequest] {
        &self.requests
    }

    /// Accept or reject a request and drop it from the list.
    pub async fn confirm(
        &mut self,
        request_id: u64,
        action: ConnectionAction,
        env: &ViewEnv,
        scope: &RequestScope,
    ) -> Result<String> {
        let message = scope
            .run(env.client.confirm_connection(request_id, action))
            .await?;
        self.requests.retain(|r| r.id != request_id);
        env.notifications.add(match action {
            ConnectionAction::Accept => "Student connection approved!",
            ConnectionAction::Reject => "Student connection rejected",
        })?;
        Ok(message)
    }
}

impl Formattable for PendingConfirmations {
    fn format(&self, format: OutputFormat, palette: &Palette) -> Result<String> {
        let route = Route::PendingConfirmations;
        match format {
            OutputFormat::Json => Ok(format_route_json(&route.path(), &self.requests)?),
            _ => {
                let rows: Vec<ConnectionRequestDisplay> =
                    self.requests.iter().map(ConnectionRequestDisplay::from).collect();
                let table = format_table_or(&rows, "No pending requests.");
                Ok(titled(table, &route, format, palette))
            }
        }
    }
}

pub struct ConversationList {
    conversations: Vec<Conversation>,
}

impl ConversationList {
    pub async fn load(env: &ViewEnv, scope: &RequestScope) -> Result<Self> {
        let conversations = scope.run(env.client.conversations()).await?;
        Ok(Self { conversations })
    }

    pub fn conversations(&self) -> &[Conversation] {
        &self.conversations
    }
}

impl Formattable for ConversationList {
    fn format(&self, format: OutputFormat, palette: &Palette) -> Result<String> {
        let route = Route::Conversations;
        match format {
            OutputFormat::Json => Ok(format_route_json(&route.path(), &self.conversations)?),
            _ => {
                let rows: Vec<ConversationDisplay> =
                    self.conversations.iter().map(ConversationDisplay::from).collect();
                let table = format_table_or(&rows, "No conversations yet.");
                Ok(titled(table, &route, format, palette))
            }
        }
    }
}

/// Messages between one student and one guide, oldest first
pub struct ChatThread {
    student_id: u64,
    guide_id: u64,
    messages: Vec<ChatMessage>,
}

impl ChatThread {
    pub async fn load(
        student_id: u64,
        guide_id: u64,
        env: &ViewEnv,
        scope: &RequestScope,
    ) -> Result<Self> {
        let messages = scope
            .run(env.client.chat_history(student_id, guide_id))
            .await?;
        Ok(Self {
            student_id,
            guide_id,
            messages,
        })
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Send `text` and append the stored message.
    pub async fn send(
        &mut self,
        text: &str,
        env: &ViewEnv,
        scope: &RequestScope,
    ) -> Result<&ChatMessage> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ApiError::BadRequest("Message cannot be empty".into()).into());
        }

        let request = SendMessageRequest {
            student_id: self.student_id,
            guide_id: self.guide_id,
            message: text.to_string(),
        };
        let message = scope.run(env.client.send_message(&request)).await?;
        self.messages.push(message);
        Ok(&self.messages[self.messages.len() - 1])
    }
}

impl Formattable for ChatThread {
    fn format(&self, format: OutputFormat, palette: &Palette) -> Result<String> {
        let route = Route::Chat {
            student_id: self.student_id,
            guide_id: self.guide_id,
        };
        match format {
            OutputFormat::Json => Ok(format_route_json(&route.path(), &self.messages)?),
            OutputFormat::Table => {
                let rows: Vec<ChatMessageDisplay> =
                    self.messages.iter().map(ChatMessageDisplay::from).collect();
                Ok(format_table_or(&rows, "No messages yet."))
            }
            OutputFormat::Pretty => {
                let mut out = heading(route.title(), palette);
                if self.messages.is_empty() {
                    out.push_str("No messages yet.");
                    return Ok(out);
                }
                for msg in &self.messages {
                    let colour = if msg.sender_role == "guide" {
                        palette.secondary
                    } else {
                        palette.primary
                    };
                    out.push_str(&format!(
                        "{} {} {}\n",
                        paint(&format_date(msg.created_at.as_deref()), palette.text_secondary),
                        paint(&format!("{}:", msg.sender_role), colour),
                        msg.message
                    ));
                }
                Ok(out.trim_end().to_string())
            }
        }
    }
}
