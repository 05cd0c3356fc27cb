// objective.rs — Objective: a qualitative goal owning zero or more key results.
//
// `progress` is always a pure function of the key results: the arithmetic
// mean of each key result's clamped percent-complete, rounded to the
// nearest integer, 0 when there are none. `status` starts as Draft and
// moves to Committed exactly once, through the commit workflow's confirmed
// path — there is no transition back.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::key_result::KeyResult;

/// Commit status of an objective.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectiveStatus {
    /// Being drafted — editable, not yet finalized.
    #[default]
    Draft,

    /// Finalized via the commit workflow. Terminal.
    Committed,
}

impl fmt::Display for ObjectiveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObjectiveStatus::Draft => write!(f, "draft"),
            ObjectiveStatus::Committed => write!(f, "committed"),
        }
    }
}

/// A qualitative goal tracked for a period, owning zero or more key results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Objective {
    /// Unique identifier within the collection. Immutable after creation.
    pub id: String,

    /// Short free-text label (e.g., "Increase revenue growth").
    pub summary: String,

    /// Optional longer description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Key results, in insertion order (display order, not semantics).
    #[serde(default)]
    pub key_results: Vec<KeyResult>,

    /// Derived: rounded mean of key-result percent-complete values, 0..=100.
    /// Recomputed after every mutation; caller-supplied values do not survive.
    #[serde(default)]
    pub progress: u8,

    /// Commit status. Starts Draft; one-way transition to Committed.
    #[serde(default)]
    pub status: ObjectiveStatus,

    /// Optional period grouping label (e.g., "Q1 2026").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quarter: Option<String>,
}

impl Objective {
    /// Create a draft objective with no key results.
    pub fn new(id: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            summary: summary.into(),
            description: None,
            key_results: Vec::new(),
            progress: 0,
            status: ObjectiveStatus::Draft,
            quarter: None,
        }
    }

    /// Recompute all derived fields: each key result's completion flag,
    /// then the objective-level progress percentage.
    pub fn recompute(&mut self) {
        for kr in &mut self.key_results {
            kr.recompute();
        }
        self.progress = objective_progress(&self.key_results);
    }

    /// Look up a key result by id.
    pub fn key_result(&self, id: &str) -> Option<&KeyResult> {
        self.key_results.iter().find(|kr| kr.id == id)
    }
}

/// Objective-level progress: the arithmetic mean of each key result's
/// clamped percent-complete, rounded to the nearest integer. Zero when
/// there are no key results — never a division by zero, never NaN.
pub fn objective_progress(key_results: &[KeyResult]) -> u8 {
    if key_results.is_empty() {
        return 0;
    }
    let total: f64 = key_results.iter().map(KeyResult::percent_complete).sum();
    (total / key_results.len() as f64).round() as u8
}
