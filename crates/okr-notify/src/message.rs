// message.rs — The context message injected into the agent's conversation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Who a conversation message originates from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageRole {
    /// System-origin, informational. The agent reads it as context.
    System,
    /// A human utterance.
    User,
    /// An agent reply.
    Assistant,
}

/// A message appended to the conversational actor's context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContextMessage {
    pub role: MessageRole,

    pub content: String,

    /// When false, the agent must not produce an automatic reply to this
    /// message — it only updates what the agent knows.
    pub follow_up: bool,

    pub created_at: DateTime<Utc>,
}

impl ContextMessage {
    /// A system-origin, no-follow-up context update.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
            follow_up: false,
            created_at: Utc::now(),
        }
    }
}
