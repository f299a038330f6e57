pub mod agent_client;
pub mod attachments;
pub mod error;
pub mod title_generator;

pub use agent_client::{AgentBackend, AgentClient, ChatResponse};
pub use attachments::{Attachment, AttachmentKind};
pub use error::{ClientError, ClientResult};
pub use title_generator::derive_title;
