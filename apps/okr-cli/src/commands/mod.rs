// mod.rs — Command modules plus shared session wiring.

pub mod bridge;
pub mod demo;
pub mod schema;
pub mod shell;

use okr_bridge::AgentBridge;
use okr_notify::{BufferSink, ContextNotifier, JsonlLogSink};
use okr_store::{SessionState, SessionStore};

use crate::config::BuilderConfig;

/// Build a fully wired session: state store, change notifier (primed with
/// the session-start snapshot, which is suppressed), and the agent bridge
/// owning the store. The returned BufferSink is the read handle for
/// context messages destined for the conversational actor.
pub(crate) fn build_session(config: &BuilderConfig) -> (AgentBridge, BufferSink) {
    let mut state = if config.sample_data {
        SessionState::sample()
    } else {
        SessionState::default()
    };
    if let Some(period) = &config.current_period {
        state.current_period = period.clone();
    }

    let buffer = BufferSink::new();
    let mut notifier = ContextNotifier::new();
    notifier.add_sink(Box::new(buffer.clone()));
    if let Some(path) = &config.context_log {
        notifier.add_sink(Box::new(JsonlLogSink::new(path)));
    }

    let mut store = SessionStore::new(state);
    store.subscribe(Box::new(notifier));
    // Prime the notifier: the session-start snapshot must not notify.
    store.publish();

    (AgentBridge::new(store), buffer)
}
