// payload.rs — Structured mutation payloads from the conversational actor.
//
// This is the one canonical payload schema. The field names follow the
// domain model (`summary`, `units`); the older title/unit revision of the
// wire shape is not silently accepted. JsonSchema derives document the
// exact shape handed to the model provider as tool parameter schemas.

use okr_engine::{KeyResultDraft, ObjectiveDraft, ObjectivePatch};
use okr_model::KeyResult;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::BridgeError;

/// An objective as proposed by the agent.
///
/// On add, any supplied ids are ignored — the engine assigns fresh ones.
/// On update, `id` is required and unspecified fields keep prior values.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct ObjectiveSpec {
    /// The objective id. Required for update, ignored on add.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// The objective summary.
    pub summary: String,

    /// Optional longer description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// The key results of the objective. When present on update, the
    /// existing list is replaced wholesale.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_results: Option<Vec<KeyResultSpec>>,

    /// Optional period label (e.g., "Q1 2026").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quarter: Option<String>,
}

/// A key result as proposed by the agent.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct KeyResultSpec {
    /// The key result id. Fresh one assigned when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// The key result summary.
    pub summary: String,

    /// Optional longer description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Current value achieved.
    #[serde(default)]
    pub progress: f64,

    /// Value representing 100%.
    #[serde(default = "default_target")]
    pub target: f64,

    /// Free-text unit label.
    #[serde(default = "default_units")]
    pub units: String,
}

fn default_target() -> f64 {
    100.0
}

fn default_units() -> String {
    "%".to_string()
}

/// Envelope for add/update: `{ "objective": { ... } }`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ObjectivePayload {
    /// The objective object.
    pub objective: ObjectiveSpec,
}

/// Envelope for operations that only name a target:
/// `{ "objective_id": "..." }`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ObjectiveIdPayload {
    /// The id of the target objective.
    pub objective_id: String,
}

/// One mutation request from the event stream, tagged by action.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum BridgeRequest {
    /// Add an objective to the OKR list.
    AddObjective(ObjectivePayload),
    /// Update an objective in the OKR list.
    UpdateObjective(ObjectivePayload),
    /// Delete an objective from the OKR list.
    DeleteObjective(ObjectiveIdPayload),
    /// Show the commit confirmation affordance. Does NOT commit.
    RequestCommitConfirmation(ObjectiveIdPayload),
    /// The human accepted a pending commit confirmation.
    ConfirmCommit(ObjectiveIdPayload),
    /// The human rejected a pending commit confirmation.
    CancelCommit(ObjectiveIdPayload),
}

impl ObjectiveSpec {
    /// Shape validation shared by add and update. Runs before the engine
    /// is invoked; a failure here leaves the session state untouched.
    pub(crate) fn validate(&self) -> Result<(), BridgeError> {
        if self.summary.trim().is_empty() {
            return Err(BridgeError::EmptyObjectiveSummary);
        }
        if let Some(key_results) = &self.key_results {
            let mut seen = std::collections::HashSet::new();
            for (index, kr) in key_results.iter().enumerate() {
                if kr.summary.trim().is_empty() {
                    return Err(BridgeError::EmptyKeyResultSummary);
                }
                if !kr.progress.is_finite() {
                    return Err(BridgeError::NonFiniteNumber {
                        field: format!("keyResults[{}].progress", index),
                    });
                }
                if !kr.target.is_finite() {
                    return Err(BridgeError::NonFiniteNumber {
                        field: format!("keyResults[{}].target", index),
                    });
                }
                if let Some(id) = &kr.id {
                    if !seen.insert(id.clone()) {
                        return Err(BridgeError::DuplicateKeyResultId(id.clone()));
                    }
                }
            }
        }
        Ok(())
    }

    /// Convert into an engine draft for add (supplied ids are discarded).
    pub(crate) fn into_draft(self) -> ObjectiveDraft {
        ObjectiveDraft {
            summary: self.summary,
            description: self.description,
            key_results: self
                .key_results
                .unwrap_or_default()
                .into_iter()
                .map(KeyResultSpec::into_draft)
                .collect(),
            quarter: self.quarter,
        }
    }

    /// Convert into an engine patch for update. Requires an id.
    pub(crate) fn into_patch(self) -> Result<ObjectivePatch, BridgeError> {
        let id = match self.id {
            Some(id) if !id.trim().is_empty() => id,
            _ => return Err(BridgeError::MissingObjectiveId),
        };
        Ok(ObjectivePatch {
            id,
            summary: Some(self.summary),
            description: self.description,
            key_results: self
                .key_results
                .map(|specs| specs.into_iter().map(KeyResultSpec::materialize).collect()),
            quarter: self.quarter,
        })
    }
}

impl KeyResultSpec {
    fn into_draft(self) -> KeyResultDraft {
        KeyResultDraft {
            summary: self.summary,
            description: self.description,
            progress: self.progress,
            target: self.target,
            units: self.units,
        }
    }

    /// Materialize a full key result for a wholesale list replacement,
    /// assigning a fresh id when the payload carries none. Derived fields
    /// are recomputed by the engine before storing.
    fn materialize(self) -> KeyResult {
        let id = self
            .id
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        let mut kr = KeyResult::new(id, self.summary, self.progress, self.target, self.units);
        kr.description = self.description;
        kr
    }
}

impl ObjectiveIdPayload {
    pub(crate) fn validate(&self) -> Result<&str, BridgeError> {
        let id = self.objective_id.trim();
        if id.is_empty() {
            return Err(BridgeError::MissingObjectiveId);
        }
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_parses_tagged_action() {
        let line = r#"{"action":"add_objective","objective":{"summary":"Grow revenue"}}"#;
        let request: BridgeRequest = serde_json::from_str(line).unwrap();
        assert!(matches!(request, BridgeRequest::AddObjective(_)));
    }

    #[test]
    fn delete_request_parses_objective_id() {
        let line = r#"{"action":"delete_objective","objective_id":"obj-1"}"#;
        let request: BridgeRequest = serde_json::from_str(line).unwrap();
        match request {
            BridgeRequest::DeleteObjective(payload) => {
                assert_eq!(payload.objective_id, "obj-1");
            }
            other => panic!("unexpected request: {:?}", other),
        }
    }

    #[test]
    fn spec_defaults_fill_progress_target_units() {
        let spec: KeyResultSpec =
            serde_json::from_str(r#"{"summary": "Reduce bugs"}"#).unwrap();
        assert_eq!(spec.progress, 0.0);
        assert_eq!(spec.target, 100.0);
        assert_eq!(spec.units, "%");
    }

    #[test]
    fn empty_summary_fails_validation() {
        let spec = ObjectiveSpec {
            summary: "   ".to_string(),
            ..ObjectiveSpec::default()
        };
        assert!(matches!(
            spec.validate(),
            Err(BridgeError::EmptyObjectiveSummary)
        ));
    }

    #[test]
    fn non_finite_numbers_fail_validation() {
        let spec = ObjectiveSpec {
            summary: "Valid".to_string(),
            key_results: Some(vec![KeyResultSpec {
                id: None,
                summary: "Bad".to_string(),
                description: None,
                progress: f64::NAN,
                target: 100.0,
                units: "%".to_string(),
            }]),
            ..ObjectiveSpec::default()
        };
        assert!(matches!(
            spec.validate(),
            Err(BridgeError::NonFiniteNumber { .. })
        ));
    }

    #[test]
    fn duplicate_key_result_ids_fail_validation() {
        let kr = KeyResultSpec {
            id: Some("kr-1".to_string()),
            summary: "A".to_string(),
            description: None,
            progress: 0.0,
            target: 100.0,
            units: "%".to_string(),
        };
        let spec = ObjectiveSpec {
            summary: "Valid".to_string(),
            key_results: Some(vec![kr.clone(), kr]),
            ..ObjectiveSpec::default()
        };
        assert!(matches!(
            spec.validate(),
            Err(BridgeError::DuplicateKeyResultId(_))
        ));
    }

    #[test]
    fn update_without_id_is_rejected() {
        let spec = ObjectiveSpec {
            summary: "Valid".to_string(),
            ..ObjectiveSpec::default()
        };
        assert!(matches!(
            spec.into_patch(),
            Err(BridgeError::MissingObjectiveId)
        ));
    }

    #[test]
    fn materialized_key_results_get_ids() {
        let spec = KeyResultSpec {
            id: None,
            summary: "Fresh".to_string(),
            description: None,
            progress: 10.0,
            target: 100.0,
            units: "%".to_string(),
        };
        let kr = spec.materialize();
        assert!(!kr.id.is_empty());
    }
}
