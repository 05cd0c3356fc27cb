//! # okr-notify
//!
//! Change notification for the conversational actor.
//!
//! Whenever the session state changes — no matter which actor caused it —
//! [`ContextNotifier`] serializes the full new snapshot into a
//! system-origin [`ContextMessage`] and forwards it to a [`ContextSink`],
//! so the agent always reasons about fresh data. The message is marked
//! `follow_up: false`: it is informational context, not a user utterance,
//! and must not trigger an automatic reply.
//!
//! The very first snapshot the notifier sees is the session-start state
//! and is suppressed; only changes after initialization notify.

pub mod error;
pub mod message;
pub mod notifier;
pub mod sink;

pub use error::NotifyError;
pub use message::{ContextMessage, MessageRole};
pub use notifier::ContextNotifier;
pub use sink::{BufferSink, ContextSink, JsonlLogSink};
