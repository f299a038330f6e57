use serde::{Deserialize, Serialize};

use super::message::{Message, now_millis};
use crate::services::title_generator::derive_title;

/// Title given to a conversation before its first message
pub const DEFAULT_TITLE: &str = "New Chat";

/// A conversation with the agent. The thread id doubles as the backend
/// session correlator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    pub thread_id: String,
    pub title: String,
    pub created_at: i64,
    pub updated_at: i64,
    #[serde(default)]
    pub messages: Vec<Message>,
}

impl Conversation {
    /// Create an empty conversation stamped with the current time
    pub fn new(thread_id: String) -> Self {
        let now = now_millis();
        Self {
            thread_id,
            title: DEFAULT_TITLE.to_string(),
            created_at: now,
            updated_at: now,
            messages: Vec::new(),
        }
    }

    /// Append a message. A user message opening the conversation also
    /// becomes its title.
    pub fn with_message(mut self, message: Message) -> Self {
        if self.messages.is_empty() && message.is_user() {
            self.title = derive_title(&message.content);
        }
        self.messages.push(message);
        self.touched()
    }

    /// Bump `updated_at`. Never moves it backwards, even if the clock does.
    pub fn touched(mut self) -> Self {
        self.updated_at = self.updated_at.max(now_millis());
        self
    }

    pub fn message_count(&self) -> usize {
        self.messages.len()
    }

    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }
}
