// ack.rs — Acknowledgment values returned to the proposing actor.
//
// Every accepted mutation answers with the entity it produced (or the id
// it removed) plus a narrative for the two visible presentation phases.
// The failed phase has no ack: it is the BridgeError itself, whose
// Display text is the explanatory status.

use okr_model::Objective;
use serde::{Deserialize, Serialize};

/// What a successful mutation hands back to the calling actor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MutationAck {
    /// The created/updated entity, or the deleted id.
    pub value: AckValue,

    /// Presentation text for the in-progress and complete phases.
    pub narrative: Narrative,
}

/// The acknowledgment payload proper.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AckValue {
    /// An objective was created or updated; here is its stored form.
    Objective { objective: Objective },

    /// An objective (and all of its key results) was removed.
    Deleted { objective_id: String },

    /// A commit confirmation is now awaiting the human's accept/reject.
    CommitPending { objective_id: String },

    /// A pending commit confirmation was discarded; nothing changed.
    CommitCancelled { objective_id: String },
}

/// Status text for the transient and final presentation states.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Narrative {
    /// Shown while the mutation is in flight (transient indicator).
    pub in_progress: String,

    /// Shown once the mutation has applied.
    pub complete: String,
}

impl Narrative {
    pub fn new(in_progress: impl Into<String>, complete: impl Into<String>) -> Self {
        Self {
            in_progress: in_progress.into(),
            complete: complete.into(),
        }
    }
}
