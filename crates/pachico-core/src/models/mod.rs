pub mod conversation;
pub mod conversations_store;
pub mod message;
pub mod send_tracker;

pub use conversation::{Conversation, DEFAULT_TITLE};
pub use conversations_store::ConversationsStore;
pub use message::{Message, Role};
pub use send_tracker::{InFlightGuard, SendTracker};
