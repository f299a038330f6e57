use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, info, warn};

use crate::models::{ConversationsStore, InFlightGuard, Message, SendTracker};
use crate::services::AgentBackend;

/// Opening of the message shown in place of a failed reply
pub const APOLOGY_PREFIX: &str = "Sorry, something went wrong.";

/// Used when the failure carries no message of its own
pub const FALLBACK_DETAIL: &str = "Please try again.";

/// Conversation store shared between the controller and the front end
pub type SharedStore = Arc<Mutex<ConversationsStore>>;

/// How a send ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    /// Nothing was sent: no active conversation or blank input
    Skipped,
    /// The agent replied
    Replied,
    /// The request failed; an apology message was appended instead
    Failed(String),
}

/// A user message that has been applied locally and still awaits the agent.
/// Dropping it releases the in-flight mark without appending a reply.
pub struct PendingSend {
    thread_id: String,
    content: String,
    guard: InFlightGuard,
}

impl PendingSend {
    pub fn thread_id(&self) -> &str {
        &self.thread_id
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

/// Drives the send lifecycle: optimistic local append, remote call, then
/// a reply or a compensating error message.
pub struct ChatController {
    store: SharedStore,
    backend: Arc<dyn AgentBackend>,
    tracker: SendTracker,
}

impl ChatController {
    pub fn new(store: SharedStore, backend: Arc<dyn AgentBackend>) -> Self {
        Self {
            store,
            backend,
            tracker: SendTracker::new(),
        }
    }

    pub fn store(&self) -> &SharedStore {
        &self.store
    }

    /// True while any send is in flight
    pub fn is_loading(&self) -> bool {
        self.tracker.is_loading()
    }

    pub fn is_sending(&self, thread_id: &str) -> bool {
        self.tracker.is_sending(thread_id)
    }

    /// Send `content` to the active conversation and record the outcome
    pub async fn send(&self, content: &str) -> SendOutcome {
        match self.begin_send(content) {
            Some(pending) => self.complete_send(pending).await,
            None => SendOutcome::Skipped,
        }
    }

    /// Apply the user message locally.
    ///
    /// Returns `None` when there is no active conversation or the content is
    /// blank. The thread id is fixed here; later changes to the active
    /// conversation do not affect where the reply lands.
    pub fn begin_send(&self, content: &str) -> Option<PendingSend> {
        let content = content.trim();
        if content.is_empty() {
            debug!("Ignoring blank message");
            return None;
        }

        let thread_id = {
            let mut store = self.store.lock();
            let Some(active) = store.active_conversation() else {
                debug!("No active conversation, message not sent");
                return None;
            };
            let thread_id = active.thread_id.clone();

            let user_message = Message::user(content);
            store.update(&thread_id, |c| c.with_message(user_message));
            thread_id
        };

        let guard = self.tracker.begin(&thread_id);

        Some(PendingSend {
            thread_id,
            content: content.to_string(),
            guard,
        })
    }

    /// Ask the agent and append its reply, or an apology on failure.
    /// The user message from [`Self::begin_send`] is never rolled back.
    pub async fn complete_send(&self, pending: PendingSend) -> SendOutcome {
        let PendingSend {
            thread_id,
            content,
            guard,
        } = pending;

        let (reply, outcome) = match self.backend.send_message(&content, &thread_id).await {
            Ok(response) => {
                info!(
                    thread_id = %thread_id,
                    files = response.file_paths.len(),
                    "Agent replied"
                );
                (
                    Message::assistant(response.text, response.file_paths),
                    SendOutcome::Replied,
                )
            }
            Err(e) => {
                let detail = e.to_string();
                warn!(thread_id = %thread_id, error = %detail, "Send failed");
                (
                    Message::assistant(apology_message(&detail), Vec::new()),
                    SendOutcome::Failed(detail),
                )
            }
        };

        let applied = self
            .store
            .lock()
            .update(&thread_id, |c| c.with_message(reply));
        if !applied {
            debug!(thread_id = %thread_id, "Conversation gone before reply arrived");
        }

        drop(guard);
        outcome
    }
}

/// Text of the assistant message that stands in for a failed reply
pub fn apology_message(detail: &str) -> String {
    let detail = detail.trim();
    let detail = if detail.is_empty() {
        FALLBACK_DETAIL
    } else {
        detail
    };
    format!("{} {}", APOLOGY_PREFIX, detail)
}
