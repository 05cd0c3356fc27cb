//! # okr-bridge
//!
//! The agent mutation bridge: where the conversational actor's structured
//! mutation proposals enter the system.
//!
//! Each operation takes a schema-validated payload, checks its shape
//! before anything else runs, invokes the mutation engine, writes the
//! result through the session store, and returns a [`MutationAck`] — the
//! created/updated entity (or the deleted id) plus a human-readable
//! narrative for the in-progress and complete presentation phases.
//! A rejected payload is a typed [`BridgeError`], never a silent failure,
//! and leaves the session state untouched.
//!
//! The commit confirmation gate lives here too: [`CommitWorkflow`] holds
//! the ephemeral pending-confirmation state that must never be merged into
//! the persistent session document.

pub mod ack;
pub mod bridge;
pub mod commit;
pub mod error;
pub mod payload;

pub use ack::{AckValue, MutationAck, Narrative};
pub use bridge::AgentBridge;
pub use commit::CommitWorkflow;
pub use error::BridgeError;
pub use payload::{BridgeRequest, KeyResultSpec, ObjectiveIdPayload, ObjectivePayload, ObjectiveSpec};
