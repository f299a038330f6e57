//! Conversation state, persistence and the agent request lifecycle behind
//! the Pachico chat client.

pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;
pub mod settings;

pub use controllers::{ChatController, SendOutcome, SharedStore};
pub use models::{Conversation, ConversationsStore, Message, Role};
pub use repositories::ConversationStorage;
pub use services::{AgentBackend, AgentClient, ChatResponse, ClientError};
pub use settings::AppConfig;
