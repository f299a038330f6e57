use std::cmp::Reverse;

use tracing::{debug, info, warn};

use super::conversation::Conversation;
use crate::repositories::ConversationStorage;

/// In-memory collection of all conversations plus the active selection.
///
/// Hydrated once from [`ConversationStorage`]; every mutation of the
/// collection after hydration writes the whole list back.
pub struct ConversationsStore {
    conversations: Vec<Conversation>,
    active_conversation_id: Option<String>,
    hydrated: bool,
    storage: ConversationStorage,
}

impl ConversationsStore {
    pub fn new(storage: ConversationStorage) -> Self {
        Self {
            conversations: Vec::new(),
            active_conversation_id: None,
            hydrated: false,
            storage,
        }
    }

    /// Load stored conversations. Only the first call has any effect.
    pub fn hydrate(&mut self) {
        if self.hydrated {
            debug!("Store already hydrated, ignoring");
            return;
        }

        self.conversations = self.storage.load();
        self.hydrated = true;

        info!(count = self.conversations.len(), "Conversations hydrated");
    }

    pub fn is_hydrated(&self) -> bool {
        self.hydrated
    }

    /// Create an empty conversation, make it active and return its id
    pub fn create(&mut self) -> String {
        let thread_id = self.storage.new_thread_id();
        self.conversations
            .insert(0, Conversation::new(thread_id.clone()));
        self.active_conversation_id = Some(thread_id.clone());

        debug!(thread_id = %thread_id, "Created conversation");
        self.persist();

        thread_id
    }

    /// Set the active conversation. The id is not validated.
    pub fn select(&mut self, id: impl Into<String>) {
        self.active_conversation_id = Some(id.into());
    }

    /// Delete a conversation by id
    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.conversations.len();
        self.conversations.retain(|c| c.thread_id != id);
        let removed = self.conversations.len() != before;

        if self.active_conversation_id.as_deref() == Some(id) {
            self.active_conversation_id = None;
        }

        if removed {
            debug!(thread_id = %id, "Deleted conversation");
            self.persist();
        }

        removed
    }

    /// Replace the conversation with `id` by `transform` applied to it.
    ///
    /// Returns false when no such conversation exists. A transform that
    /// changes the thread id is discarded.
    pub fn update<F>(&mut self, id: &str, transform: F) -> bool
    where
        F: FnOnce(Conversation) -> Conversation,
    {
        let Some(index) = self.conversations.iter().position(|c| c.thread_id == id) else {
            debug!(thread_id = %id, "Update for unknown conversation ignored");
            return false;
        };

        let updated = transform(self.conversations[index].clone());
        if updated.thread_id != id {
            warn!(
                thread_id = %id,
                new_thread_id = %updated.thread_id,
                "Transform changed the thread id, discarding"
            );
            return false;
        }

        self.conversations[index] = updated;
        self.persist();

        true
    }

    /// The conversation matching the active id, if any
    pub fn active_conversation(&self) -> Option<&Conversation> {
        self.active_conversation_id
            .as_deref()
            .and_then(|id| self.get(id))
    }

    pub fn active_id(&self) -> Option<&str> {
        self.active_conversation_id.as_deref()
    }

    pub fn get(&self, id: &str) -> Option<&Conversation> {
        self.conversations.iter().find(|c| c.thread_id == id)
    }

    /// All conversations in storage order
    pub fn conversations(&self) -> &[Conversation] {
        &self.conversations
    }

    /// All conversations, most recently updated first
    pub fn list_recent(&self) -> Vec<&Conversation> {
        let mut convs: Vec<&Conversation> = self.conversations.iter().collect();
        convs.sort_by_key(|c| Reverse(c.updated_at));
        convs
    }

    pub fn len(&self) -> usize {
        self.conversations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conversations.is_empty()
    }

    fn persist(&self) {
        // Writing before hydration would clobber stored data
        if !self.hydrated {
            return;
        }

        if let Err(e) = self.storage.save(&self.conversations) {
            warn!(error = ?e, "Failed to persist conversations");
        }
    }
}
