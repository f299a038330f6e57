use std::sync::Arc;

use tracing::{debug, warn};

use super::error::RepositoryResult;
use super::key_value_repository::KeyValueRepository;
use crate::models::Conversation;

/// Key under which the whole conversation list is stored
pub const STORAGE_KEY: &str = "pachico-conversations";

/// Loads and saves the full conversation list under [`STORAGE_KEY`].
///
/// A detached storage has no backend: it loads nothing and saves nowhere.
#[derive(Clone)]
pub struct ConversationStorage {
    backend: Option<Arc<dyn KeyValueRepository>>,
}

impl ConversationStorage {
    pub fn new(backend: Arc<dyn KeyValueRepository>) -> Self {
        Self {
            backend: Some(backend),
        }
    }

    /// Storage for environments without a persistence backend
    pub fn detached() -> Self {
        Self { backend: None }
    }

    /// Load all conversations. Never fails: missing, unreadable or corrupt
    /// data all yield an empty list.
    pub fn load(&self) -> Vec<Conversation> {
        match self.try_load() {
            Ok(conversations) => conversations,
            Err(e) => {
                warn!(error = %e, "Discarding unreadable conversation data");
                Vec::new()
            }
        }
    }

    /// Load all conversations, surfacing read and parse errors
    pub fn try_load(&self) -> RepositoryResult<Vec<Conversation>> {
        let Some(backend) = &self.backend else {
            return Ok(Vec::new());
        };

        let Some(raw) = backend.get(STORAGE_KEY)? else {
            debug!("No stored conversations");
            return Ok(Vec::new());
        };

        let conversations: Vec<Conversation> = serde_json::from_str(&raw)?;
        debug!(count = conversations.len(), "Loaded stored conversations");
        Ok(conversations)
    }

    /// Overwrite the stored list with `conversations`
    pub fn save(&self, conversations: &[Conversation]) -> RepositoryResult<()> {
        let Some(backend) = &self.backend else {
            return Ok(());
        };

        let json = serde_json::to_string(conversations)?;
        backend.set(STORAGE_KEY, &json)
    }

    /// Generate a new globally-unique thread id
    pub fn new_thread_id(&self) -> String {
        uuid::Uuid::new_v4().to_string()
    }

    pub fn storage_path(&self) -> Option<String> {
        self.backend.as_ref().map(|b| b.storage_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Message;
    use crate::repositories::{InMemoryRepository, JsonFileRepository, RepositoryError};

    fn sample_conversations() -> Vec<Conversation> {
        let first = Conversation::new("thread-1".to_string())
            .with_message(Message::user("Is rice ok after training?"))
            .with_message(Message::assistant(
                "Yes, plus some protein.",
                vec!["exports/macros.png".to_string()],
            ));
        let second = Conversation::new("thread-2".to_string());
        vec![first, second]
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let storage = ConversationStorage::new(Arc::new(InMemoryRepository::new()));
        let conversations = sample_conversations();

        storage.save(&conversations).unwrap();

        assert_eq!(storage.load(), conversations);
    }

    #[test]
    fn test_round_trip_through_file() {
        let tmp = tempfile::tempdir().unwrap();
        let storage = ConversationStorage::new(Arc::new(JsonFileRepository::with_dir(tmp.path())));
        let conversations = sample_conversations();

        storage.save(&conversations).unwrap();

        let reopened =
            ConversationStorage::new(Arc::new(JsonFileRepository::with_dir(tmp.path())));
        assert_eq!(reopened.load(), conversations);
        assert!(tmp.path().join("pachico-conversations.json").exists());
    }

    #[test]
    fn test_save_overwrites_previous_value() {
        let storage = ConversationStorage::new(Arc::new(InMemoryRepository::new()));

        storage.save(&sample_conversations()).unwrap();
        storage.save(&[]).unwrap();

        assert!(storage.load().is_empty());
    }

    #[test]
    fn test_missing_data_loads_empty() {
        let storage = ConversationStorage::new(Arc::new(InMemoryRepository::new()));
        assert!(storage.load().is_empty());
    }

    #[test]
    fn test_corrupt_data_loads_empty() {
        let backend = InMemoryRepository::new();
        backend.set(STORAGE_KEY, "{not json").unwrap();
        let storage = ConversationStorage::new(Arc::new(backend));

        assert!(storage.load().is_empty());
        assert!(matches!(storage.try_load(), Err(RepositoryError::Serialization(_))));
    }

    #[test]
    fn test_wrong_shape_loads_empty() {
        let backend = InMemoryRepository::new();
        backend.set(STORAGE_KEY, r#"{"threadId": "x"}"#).unwrap();
        let storage = ConversationStorage::new(Arc::new(backend));

        assert!(storage.load().is_empty());
    }

    #[test]
    fn test_detached_storage_is_inert() {
        let storage = ConversationStorage::detached();

        storage.save(&sample_conversations()).unwrap();

        assert!(storage.load().is_empty());
        assert!(storage.storage_path().is_none());
    }

    #[test]
    fn test_thread_ids_are_unique() {
        let storage = ConversationStorage::detached();
        let a = storage.new_thread_id();
        let b = storage.new_thread_id();
        assert_ne!(a, b);
        assert!(uuid::Uuid::parse_str(&a).is_ok());
    }
}
