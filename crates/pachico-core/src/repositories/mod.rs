pub mod conversation_storage;
pub mod error;
pub mod in_memory_repository;
pub mod json_file_repository;
pub mod key_value_repository;

pub use conversation_storage::{ConversationStorage, STORAGE_KEY};
pub use error::{RepositoryError, RepositoryResult};
pub use in_memory_repository::InMemoryRepository;
pub use json_file_repository::JsonFileRepository;
pub use key_value_repository::KeyValueRepository;
