use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::debug;

/// Tracks which conversations have a request in flight.
///
/// Keyed by thread id; the value counts concurrent sends on that thread.
/// Cheap to clone, clones share state.
#[derive(Clone, Default)]
pub struct SendTracker {
    in_flight: Arc<Mutex<HashMap<String, usize>>>,
}

impl SendTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a send as started. The mark is released when the guard drops.
    pub fn begin(&self, thread_id: &str) -> InFlightGuard {
        *self
            .in_flight
            .lock()
            .entry(thread_id.to_string())
            .or_insert(0) += 1;

        debug!(thread_id = %thread_id, "Send started");

        InFlightGuard {
            tracker: self.clone(),
            thread_id: thread_id.to_string(),
        }
    }

    /// Whether this conversation has a send in flight
    pub fn is_sending(&self, thread_id: &str) -> bool {
        self.in_flight.lock().contains_key(thread_id)
    }

    /// Whether any conversation has a send in flight
    pub fn is_loading(&self) -> bool {
        !self.in_flight.lock().is_empty()
    }

    fn finish(&self, thread_id: &str) {
        let mut in_flight = self.in_flight.lock();
        if let Some(count) = in_flight.get_mut(thread_id) {
            *count -= 1;
            if *count == 0 {
                in_flight.remove(thread_id);
            }
        }

        debug!(thread_id = %thread_id, "Send finished");
    }
}

/// Releases one in-flight mark on drop
pub struct InFlightGuard {
    tracker: SendTracker,
    thread_id: String,
}

impl InFlightGuard {
    pub fn thread_id(&self) -> &str {
        &self.thread_id
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.tracker.finish(&self.thread_id);
    }
}
