// patch.rs — Draft and patch types for the mutation operations.
//
// A Draft describes a new entity before the engine assigns it an id and
// fills derived fields. A Patch is a partial update keyed by id: every
// optional field left as None keeps its prior value (merge semantics).

use okr_model::KeyResult;
use serde::{Deserialize, Serialize};

/// A new objective as proposed by either actor, before id assignment.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ObjectiveDraft {
    /// Short free-text label.
    pub summary: String,

    /// Optional longer description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Initial key results, if any. Each gets a fresh id on insertion.
    #[serde(default)]
    pub key_results: Vec<KeyResultDraft>,

    /// Period label. When None, the session's current period is applied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quarter: Option<String>,
}

impl ObjectiveDraft {
    pub fn new(summary: impl Into<String>) -> Self {
        Self {
            summary: summary.into(),
            ..Self::default()
        }
    }
}

/// A new key result before id assignment.
///
/// Defaults mirror the manual "add key result" button: zero progress
/// toward a target of 100 percent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyResultDraft {
    pub summary: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default)]
    pub progress: f64,

    #[serde(default = "default_target")]
    pub target: f64,

    #[serde(default = "default_units")]
    pub units: String,
}

impl Default for KeyResultDraft {
    fn default() -> Self {
        Self {
            summary: "New key result".to_string(),
            description: None,
            progress: 0.0,
            target: default_target(),
            units: default_units(),
        }
    }
}

impl KeyResultDraft {
    pub fn new(summary: impl Into<String>, progress: f64, target: f64) -> Self {
        Self {
            summary: summary.into(),
            description: None,
            progress,
            target,
            units: default_units(),
        }
    }
}

fn default_target() -> f64 {
    100.0
}

fn default_units() -> String {
    "%".to_string()
}

/// Partial update to an existing objective, keyed by id.
///
/// `id` and `status` are deliberately not patchable: the id is immutable
/// and status only changes through the commit workflow.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ObjectivePatch {
    /// Target objective id (required).
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// When present, replaces the key-result list wholesale. Derived
    /// fields on each entry are recomputed before storing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_results: Option<Vec<KeyResult>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quarter: Option<String>,
}

impl ObjectivePatch {
    pub fn for_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }
}

/// Partial update to an existing key result, keyed by id.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KeyResultPatch {
    /// Target key result id (required).
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub units: Option<String>,
}

impl KeyResultPatch {
    pub fn for_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_result_draft_defaults_match_manual_add() {
        let draft = KeyResultDraft::default();
        assert_eq!(draft.progress, 0.0);
        assert_eq!(draft.target, 100.0);
        assert_eq!(draft.units, "%");
    }

    #[test]
    fn draft_deserializes_with_defaults() {
        let draft: KeyResultDraft =
            serde_json::from_str(r#"{"summary": "Reduce critical bugs"}"#).unwrap();
        assert_eq!(draft.summary, "Reduce critical bugs");
        assert_eq!(draft.target, 100.0);
        assert_eq!(draft.units, "%");
    }

    #[test]
    fn patch_omits_unset_fields_in_json() {
        let patch = ObjectivePatch::for_id("obj-1");
        let json = serde_json::to_string(&patch).unwrap();
        assert_eq!(json, r#"{"id":"obj-1"}"#);
    }
}
