// bridge.rs — AgentBridge: the mutation entry point for the agent actor.
//
// One method per mutation kind. Each validates the payload shape first,
// runs the engine, writes through the session store, and answers with an
// ack. The store is owned here so every path — including the manual CRUD
// surface, which borrows it via store_mut() — funnels through the same
// single point of truth.

use okr_engine::{add_objective, delete_objective, update_objective, Outcome};
use okr_store::SessionStore;
use tracing::info;

use crate::ack::{AckValue, MutationAck, Narrative};
use crate::commit::CommitWorkflow;
use crate::error::BridgeError;
use crate::payload::{BridgeRequest, ObjectiveIdPayload, ObjectivePayload};

/// Receives structured mutation proposals and applies them to the session.
pub struct AgentBridge {
    store: SessionStore,
    commit: CommitWorkflow,
}

impl AgentBridge {
    pub fn new(store: SessionStore) -> Self {
        Self {
            store,
            commit: CommitWorkflow::new(),
        }
    }

    /// Read access to the shared store.
    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Mutable access for the manual CRUD path — same store, same
    /// observers, no second copy of the state.
    pub fn store_mut(&mut self) -> &mut SessionStore {
        &mut self.store
    }

    /// Whether a commit confirmation is currently showing for an objective.
    pub fn commit_pending(&self, objective_id: &str) -> bool {
        self.commit.is_pending(objective_id)
    }

    /// Dispatch one request from the event stream.
    pub fn handle(&mut self, request: BridgeRequest) -> Result<MutationAck, BridgeError> {
        match request {
            BridgeRequest::AddObjective(payload) => self.add_objective(payload),
            BridgeRequest::UpdateObjective(payload) => self.update_objective(payload),
            BridgeRequest::DeleteObjective(payload) => self.delete_objective(payload),
            BridgeRequest::RequestCommitConfirmation(payload) => {
                self.request_commit_confirmation(payload)
            }
            BridgeRequest::ConfirmCommit(payload) => self.confirm_commit(payload),
            BridgeRequest::CancelCommit(payload) => self.cancel_commit(payload),
        }
    }

    /// Add an objective to the OKR list.
    pub fn add_objective(
        &mut self,
        payload: ObjectivePayload,
    ) -> Result<MutationAck, BridgeError> {
        let spec = payload.objective;
        spec.validate()?;
        let in_progress = format!("Adding objective: \"{}\"...", spec.summary);

        let state = self.store.get();
        let (next, created) =
            add_objective(&state.objectives, spec.into_draft(), Some(&state.current_period));
        self.store.replace(move |mut s| {
            s.objectives = next;
            s
        });

        info!(objective_id = %created.id, "objective added");
        Ok(MutationAck {
            narrative: Narrative::new(
                in_progress,
                format!("Added objective \"{}\" ({}).", created.summary, created.id),
            ),
            value: AckValue::Objective { objective: created },
        })
    }

    /// Update an objective in the OKR list (merge-patch semantics).
    pub fn update_objective(
        &mut self,
        payload: ObjectivePayload,
    ) -> Result<MutationAck, BridgeError> {
        let spec = payload.objective;
        spec.validate()?;
        let patch = spec.into_patch()?;
        let in_progress = format!("Updating objective {}...", patch.id);

        let state = self.store.get();
        match update_objective(&state.objectives, &patch) {
            Outcome::NotFound => Err(BridgeError::ObjectiveNotFound(patch.id)),
            Outcome::Applied((next, updated)) => {
                self.store.replace(move |mut s| {
                    s.objectives = next;
                    s
                });

                info!(objective_id = %updated.id, "objective updated");
                Ok(MutationAck {
                    narrative: Narrative::new(
                        in_progress,
                        format!("Updated objective \"{}\".", updated.summary),
                    ),
                    value: AckValue::Objective { objective: updated },
                })
            }
        }
    }

    /// Delete an objective from the OKR list.
    pub fn delete_objective(
        &mut self,
        payload: ObjectiveIdPayload,
    ) -> Result<MutationAck, BridgeError> {
        let id = payload.validate()?.to_string();

        let state = self.store.get();
        match delete_objective(&state.objectives, &id) {
            Outcome::NotFound => Err(BridgeError::ObjectiveNotFound(id)),
            Outcome::Applied(next) => {
                self.store.replace(move |mut s| {
                    s.objectives = next;
                    s
                });

                info!(objective_id = %id, "objective deleted");
                Ok(MutationAck {
                    narrative: Narrative::new(
                        format!("Deleting objective {}...", id),
                        format!("Objective with ID {} has been deleted.", id),
                    ),
                    value: AckValue::Deleted { objective_id: id },
                })
            }
        }
    }

    /// Show the commit confirmation affordance for an objective.
    ///
    /// This never sets status to committed — only the workflow's confirm
    /// path does, and only after the human accepts.
    pub fn request_commit_confirmation(
        &mut self,
        payload: ObjectiveIdPayload,
    ) -> Result<MutationAck, BridgeError> {
        let id = payload.validate()?;
        let objective = self.commit.request(&self.store, id)?;

        Ok(MutationAck {
            narrative: Narrative::new(
                format!("Preparing commit confirmation for \"{}\"...", objective.summary),
                format!(
                    "Are you sure you want to commit \"{}\"? Confirm or cancel.",
                    objective.summary
                ),
            ),
            value: AckValue::CommitPending {
                objective_id: objective.id,
            },
        })
    }

    /// The human accepted a pending commit confirmation.
    pub fn confirm_commit(
        &mut self,
        payload: ObjectiveIdPayload,
    ) -> Result<MutationAck, BridgeError> {
        let id = payload.validate()?;
        let committed = self.commit.confirm(&mut self.store, id)?;

        Ok(MutationAck {
            narrative: Narrative::new(
                format!("Committing \"{}\"...", committed.summary),
                format!("Objective \"{}\" is now committed.", committed.summary),
            ),
            value: AckValue::Objective {
                objective: committed,
            },
        })
    }

    /// The human rejected a pending commit confirmation.
    pub fn cancel_commit(
        &mut self,
        payload: ObjectiveIdPayload,
    ) -> Result<MutationAck, BridgeError> {
        let id = payload.validate()?.to_string();
        self.commit.cancel(&mut self.store, &id)?;

        Ok(MutationAck {
            narrative: Narrative::new(
                format!("Cancelling commit confirmation for {}...", id),
                "Commit cancelled — the objective remains a draft.".to_string(),
            ),
            value: AckValue::CommitCancelled { objective_id: id },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::{KeyResultSpec, ObjectiveSpec};
    use okr_model::ObjectiveStatus;
    use okr_store::SessionState;

    fn bridge_with(state: SessionState) -> AgentBridge {
        AgentBridge::new(SessionStore::new(state))
    }

    fn objective_payload(spec: ObjectiveSpec) -> ObjectivePayload {
        ObjectivePayload { objective: spec }
    }

    fn id_payload(id: &str) -> ObjectiveIdPayload {
        ObjectiveIdPayload {
            objective_id: id.to_string(),
        }
    }

    #[test]
    fn add_objective_acks_with_stored_entity() {
        let mut bridge = bridge_with(SessionState::for_period("Q1 2026"));

        let ack = bridge
            .add_objective(objective_payload(ObjectiveSpec {
                summary: "Grow revenue".to_string(),
                ..ObjectiveSpec::default()
            }))
            .unwrap();

        let AckValue::Objective { objective } = ack.value else {
            panic!("expected objective ack");
        };
        assert_eq!(objective.summary, "Grow revenue");
        assert_eq!(objective.status, ObjectiveStatus::Draft);
        assert_eq!(objective.progress, 0);
        assert_eq!(objective.quarter.as_deref(), Some("Q1 2026"));
        assert!(ack.narrative.in_progress.contains("Adding objective"));

        // The ack mirrors what the store now holds.
        assert!(bridge.store().get().objective(&objective.id).is_some());
    }

    #[test]
    fn rejected_payload_leaves_session_state_untouched() {
        let mut bridge = bridge_with(SessionState::sample());
        let before = bridge.store().get();

        let err = bridge
            .add_objective(objective_payload(ObjectiveSpec {
                summary: "".to_string(),
                ..ObjectiveSpec::default()
            }))
            .unwrap_err();

        assert!(matches!(err, BridgeError::EmptyObjectiveSummary));
        assert_eq!(bridge.store().get(), before);
    }

    #[test]
    fn update_not_found_is_distinct_and_harmless() {
        let mut bridge = bridge_with(SessionState::sample());
        let before = bridge.store().get();

        let err = bridge
            .update_objective(objective_payload(ObjectiveSpec {
                id: Some("ghost".to_string()),
                summary: "Anything".to_string(),
                ..ObjectiveSpec::default()
            }))
            .unwrap_err();

        assert!(matches!(err, BridgeError::ObjectiveNotFound(_)));
        assert_eq!(bridge.store().get(), before);
    }

    #[test]
    fn update_replaces_key_results_and_recomputes() {
        let mut bridge = bridge_with(SessionState::sample());

        let ack = bridge
            .update_objective(objective_payload(ObjectiveSpec {
                id: Some("1".to_string()),
                summary: "Increase revenue growth".to_string(),
                key_results: Some(vec![KeyResultSpec {
                    id: Some("1-1".to_string()),
                    summary: "Acquire 100 new enterprise customers".to_string(),
                    description: None,
                    progress: 100.0,
                    target: 100.0,
                    units: "customers".to_string(),
                }]),
                ..ObjectiveSpec::default()
            }))
            .unwrap();

        let AckValue::Objective { objective } = ack.value else {
            panic!("expected objective ack");
        };
        assert_eq!(objective.progress, 100);
        assert!(objective.key_results[0].is_completed);
    }

    #[test]
    fn delete_acks_with_removed_id() {
        let mut bridge = bridge_with(SessionState::sample());

        let ack = bridge.delete_objective(id_payload("2")).unwrap();
        assert!(matches!(
            ack.value,
            AckValue::Deleted { ref objective_id } if objective_id == "2"
        ));
        assert!(bridge.store().get().objective("2").is_none());

        // Scenario E/F chain: updating the deleted id is now NotFound.
        let err = bridge
            .update_objective(objective_payload(ObjectiveSpec {
                id: Some("2".to_string()),
                summary: "Gone".to_string(),
                ..ObjectiveSpec::default()
            }))
            .unwrap_err();
        assert!(matches!(err, BridgeError::ObjectiveNotFound(_)));
    }

    #[test]
    fn commit_request_never_commits_directly() {
        let mut bridge = bridge_with(SessionState::sample());

        let ack = bridge.request_commit_confirmation(id_payload("1")).unwrap();
        assert!(matches!(ack.value, AckValue::CommitPending { .. }));
        assert!(bridge.commit_pending("1"));
        assert_eq!(
            bridge.store().get().objective("1").unwrap().status,
            ObjectiveStatus::Draft
        );
    }

    #[test]
    fn full_commit_flow_through_the_bridge() {
        let mut bridge = bridge_with(SessionState::sample());

        bridge.request_commit_confirmation(id_payload("1")).unwrap();
        let ack = bridge.cancel_commit(id_payload("1")).unwrap();
        assert!(matches!(ack.value, AckValue::CommitCancelled { .. }));
        assert_eq!(
            bridge.store().get().objective("1").unwrap().status,
            ObjectiveStatus::Draft
        );

        bridge.request_commit_confirmation(id_payload("1")).unwrap();
        let ack = bridge.confirm_commit(id_payload("1")).unwrap();
        let AckValue::Objective { objective } = ack.value else {
            panic!("expected objective ack");
        };
        assert_eq!(objective.status, ObjectiveStatus::Committed);
    }

    #[test]
    fn handle_dispatches_tagged_requests() {
        let mut bridge = bridge_with(SessionState::for_period("Q1 2026"));

        let request: BridgeRequest = serde_json::from_str(
            r#"{"action":"add_objective","objective":{"summary":"Ship the demo"}}"#,
        )
        .unwrap();
        let ack = bridge.handle(request).unwrap();
        assert!(matches!(ack.value, AckValue::Objective { .. }));
        assert_eq!(bridge.store().get().objectives.len(), 1);
    }

    #[test]
    fn manual_path_shares_the_same_store() {
        let mut bridge = bridge_with(SessionState::for_period("Q1 2026"));
        bridge
            .add_objective(objective_payload(ObjectiveSpec {
                summary: "Shared".to_string(),
                ..ObjectiveSpec::default()
            }))
            .unwrap();

        // The manual surface mutates through store_mut — one state, two actors.
        bridge.store_mut().replace(|mut s| {
            s.objectives[0].summary = "Shared, renamed manually".to_string();
            s
        });

        let state = bridge.store().get();
        assert_eq!(state.objectives[0].summary, "Shared, renamed manually");
    }
}
