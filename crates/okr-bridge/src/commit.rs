// commit.rs — The two-phase commit confirmation gate.
//
// An objective's status only ever moves draft → committed, and only
// through this workflow's confirmed path. The pending-confirmation set is
// presentation state: it lives beside the session document, is never
// serialized with it, and does not survive the session.

use std::collections::HashSet;

use okr_model::{Objective, ObjectiveStatus};
use okr_store::SessionStore;
use tracing::info;

use crate::error::BridgeError;

/// Tracks which objectives are awaiting a commit confirmation.
#[derive(Debug, Default)]
pub struct CommitWorkflow {
    pending: HashSet<String>,
}

impl CommitWorkflow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the confirmation affordance is showing for an objective.
    pub fn is_pending(&self, objective_id: &str) -> bool {
        self.pending.contains(objective_id)
    }

    /// Open a confirmation for the given objective. Renders the affordance
    /// only — the session state is not touched and status is NOT set here.
    pub fn request(
        &mut self,
        store: &SessionStore,
        objective_id: &str,
    ) -> Result<Objective, BridgeError> {
        let state = store.get();
        let objective = state
            .objective(objective_id)
            .ok_or_else(|| BridgeError::ObjectiveNotFound(objective_id.to_string()))?
            .clone();

        self.pending.insert(objective_id.to_string());
        Ok(objective)
    }

    /// The human accepted: transition the objective to committed through
    /// the store. Confirming an already-committed objective is a no-op —
    /// no error, no duplicate transition, no extra notification.
    pub fn confirm(
        &mut self,
        store: &mut SessionStore,
        objective_id: &str,
    ) -> Result<Objective, BridgeError> {
        let state = store.get();
        let objective = state
            .objective(objective_id)
            .ok_or_else(|| BridgeError::ObjectiveNotFound(objective_id.to_string()))?;

        if objective.status == ObjectiveStatus::Committed {
            self.pending.remove(objective_id);
            return Ok(objective.clone());
        }

        if !self.pending.remove(objective_id) {
            return Err(BridgeError::NoPendingCommit(objective_id.to_string()));
        }

        let id = objective_id.to_string();
        let next = store.replace(move |mut s| {
            for o in &mut s.objectives {
                if o.id == id {
                    o.status = ObjectiveStatus::Committed;
                }
            }
            s
        });

        info!(objective_id, "objective committed");
        // The objective was present above and replace cannot remove it.
        Ok(next
            .objective(objective_id)
            .cloned()
            .unwrap_or_else(|| objective.clone()))
    }

    /// The human rejected: discard the pending confirmation. The session
    /// document is unchanged, but the current snapshot is re-published so
    /// the affordance visibly disappears.
    pub fn cancel(
        &mut self,
        store: &mut SessionStore,
        objective_id: &str,
    ) -> Result<(), BridgeError> {
        if !self.pending.remove(objective_id) {
            return Err(BridgeError::NoPendingCommit(objective_id.to_string()));
        }
        store.publish();
        Ok(())
    }
}
