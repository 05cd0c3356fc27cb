// notifier.rs — ContextNotifier: bridges the state store to context sinks.
//
// Registered as a StateObserver on the SessionStore. Each snapshot is
// serialized full-fidelity (no truncation) and wrapped in a system-origin
// message. The first delivery is the session-start state and is swallowed;
// wiring code subscribes the notifier and then publishes once to prime it.

use okr_store::{SessionState, StateObserver, StoreError};

use crate::message::ContextMessage;
use crate::sink::ContextSink;

/// Serializes every post-change session state for the conversational actor.
pub struct ContextNotifier {
    sinks: Vec<Box<dyn ContextSink>>,
    primed: bool,
}

impl ContextNotifier {
    pub fn new() -> Self {
        Self {
            sinks: Vec::new(),
            primed: false,
        }
    }

    /// Add a delivery target.
    pub fn add_sink(&mut self, sink: Box<dyn ContextSink>) {
        self.sinks.push(sink);
    }

    /// Render the snapshot as the message the agent will read.
    fn render(state: &SessionState) -> Result<ContextMessage, serde_json::Error> {
        let snapshot = serde_json::to_string_pretty(state)?;
        Ok(ContextMessage::system(format!(
            "The OKRs have been updated. The new state is: {}",
            snapshot
        )))
    }
}

impl Default for ContextNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl StateObserver for ContextNotifier {
    fn state_changed(&mut self, state: &SessionState) -> Result<(), StoreError> {
        // Session-start snapshot: prime only, do not notify.
        if !self.primed {
            self.primed = true;
            return Ok(());
        }

        let message =
            Self::render(state).map_err(|e| StoreError::Observer(e.to_string()))?;

        for sink in &mut self.sinks {
            sink.deliver(&message)
                .map_err(|e| StoreError::Observer(e.to_string()))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::BufferSink;
    use okr_store::SessionStore;

    fn wired_store() -> (SessionStore, BufferSink) {
        let buffer = BufferSink::new();
        let mut notifier = ContextNotifier::new();
        notifier.add_sink(Box::new(buffer.clone()));

        let mut store = SessionStore::new(SessionState::sample());
        store.subscribe(Box::new(notifier));
        // Prime with the session-start snapshot.
        store.publish();
        (store, buffer)
    }

    #[test]
    fn first_snapshot_is_suppressed() {
        let (_store, buffer) = wired_store();
        assert!(buffer.is_empty());
    }

    #[test]
    fn each_change_after_start_notifies() {
        let (mut store, buffer) = wired_store();

        store.replace(|mut s| {
            s.objectives.retain(|o| o.id != "2");
            s
        });
        store.replace(|s| s);

        assert_eq!(buffer.len(), 2);
    }

    #[test]
    fn message_is_system_origin_with_full_snapshot() {
        let (mut store, buffer) = wired_store();
        store.replace(|s| s);

        let messages = buffer.drain();
        let msg = &messages[0];
        assert_eq!(msg.role, crate::message::MessageRole::System);
        assert!(!msg.follow_up);
        // Full fidelity: every objective and key result appears.
        assert!(msg.content.contains("Increase revenue growth"));
        assert!(msg.content.contains("Acquire 100 new enterprise customers"));
        assert!(msg.content.contains("current_period"));
    }

    #[test]
    fn mutations_by_any_actor_reach_the_agent_context() {
        let (mut store, buffer) = wired_store();

        // Simulates the manual UI path writing through the same store.
        store.replace(|mut s| {
            s.objectives[0].summary = "Renamed by the user".to_string();
            s.objectives[0].recompute();
            s
        });

        let messages = buffer.drain();
        assert_eq!(messages.len(), 1);
        assert!(messages[0].content.contains("Renamed by the user"));
    }
}
