//! Guide and chat API trait

use async_trait::async_trait;

use crate::client::models::{
    ChatMessage, ConnectionAction, ConnectionRequest, Conversation, Guide, SendMessageRequest,
    StartConversationResponse,
};
use crate::error::Result;

/// Guide discovery, connection and chat operations
#[async_trait]
pub trait ChatApi: Send + Sync {
    /// List all guides (public)
    async fn list_guides(&self) -> Result<Vec<Guide>>;

    /// Ids of guides the student is connected to
    async fn connected_guides(&self) -> Result<Vec<u64>>;

    /// Ask a guide to connect
    async fn start_conversation(&self, guide_id: u64) -> Result<StartConversationResponse>;

    async fn send_message(&self, message: &SendMessageRequest) -> Result<ChatMessage>;

    /// Messages between a student and a guide, oldest first
    async fn chat_history(&self, student_id: u64, guide_id: u64) -> Result<Vec<ChatMessage>>;

    async fn conversations(&self) -> Result<Vec<Conversation>>;

    /// Connection requests waiting for the guide
    async fn pending_confirmations(&self) -> Result<Vec<ConnectionRequest>>;

    /// Accept or reject a connection request. Returns the server's message.
    async fn confirm_connection(&self, request_id: u64, action: ConnectionAction)
    -> Result<String>;
}
