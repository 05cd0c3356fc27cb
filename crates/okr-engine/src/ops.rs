// ops.rs — The mutation operations.
//
// All operations are pure: they borrow the current collection (or
// objective), build the next version, and return it. The previous value
// is untouched, so the state store can swap snapshots wholesale and
// readers never see a partially-applied mutation.
//
// Derived-field recomputation is a mandatory post-step of every operation
// here, never a responsibility of the caller or the UI layer.

use std::collections::HashSet;

use okr_model::{KeyResult, Objective};
use uuid::Uuid;

use crate::patch::{KeyResultDraft, KeyResultPatch, ObjectiveDraft, ObjectivePatch};

/// Result of a mutation that targets an existing id.
///
/// `NotFound` is a normal, reportable condition — not an error and not
/// silently swallowed. Callers must branch on it.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    /// The mutation applied; carries the resulting value.
    Applied(T),
    /// No entity with the target id exists; nothing changed.
    NotFound,
}

impl<T> Outcome<T> {
    pub fn is_applied(&self) -> bool {
        matches!(self, Outcome::Applied(_))
    }

    /// Convert into an Option, discarding the NotFound marker.
    pub fn applied(self) -> Option<T> {
        match self {
            Outcome::Applied(value) => Some(value),
            Outcome::NotFound => None,
        }
    }
}

/// Generate an id that does not collide with any existing one.
///
/// UUID v4 collisions are astronomically unlikely, but uniqueness is an
/// invariant here, not a probability — so check and retry.
fn fresh_id(existing: &HashSet<&str>) -> String {
    loop {
        let id = Uuid::new_v4().to_string();
        if !existing.contains(id.as_str()) {
            return id;
        }
    }
}

/// Add a new objective to the collection.
///
/// Assigns a fresh unique id, defaults status to Draft, fills the quarter
/// from `default_quarter` when the draft has none, and appends at the end.
/// Returns the new collection and the stored objective (the acknowledgment
/// value for the proposing actor).
pub fn add_objective(
    objectives: &[Objective],
    draft: ObjectiveDraft,
    default_quarter: Option<&str>,
) -> (Vec<Objective>, Objective) {
    let ids: HashSet<&str> = objectives.iter().map(|o| o.id.as_str()).collect();

    let mut objective = Objective::new(fresh_id(&ids), draft.summary);
    objective.description = draft.description;
    objective.quarter = draft
        .quarter
        .or_else(|| default_quarter.map(str::to_string));

    let mut key_results: Vec<KeyResult> = Vec::new();
    for kr_draft in draft.key_results {
        let kr_ids: HashSet<&str> = key_results.iter().map(|kr| kr.id.as_str()).collect();
        let kr = materialize_key_result(&kr_ids, kr_draft);
        key_results.push(kr);
    }
    objective.key_results = key_results;
    objective.recompute();

    let mut next = objectives.to_vec();
    next.push(objective.clone());
    (next, objective)
}

/// Merge-patch an existing objective.
///
/// Unspecified fields retain their prior values. When the patch carries a
/// key-result list it replaces the existing one wholesale, and every
/// derived field is recomputed before storing. The objective's id and
/// status are never touched here.
pub fn update_objective(
    objectives: &[Objective],
    patch: &ObjectivePatch,
) -> Outcome<(Vec<Objective>, Objective)> {
    let Some(index) = objectives.iter().position(|o| o.id == patch.id) else {
        return Outcome::NotFound;
    };

    let mut objective = objectives[index].clone();
    if let Some(summary) = &patch.summary {
        objective.summary = summary.clone();
    }
    if let Some(description) = &patch.description {
        objective.description = Some(description.clone());
    }
    if let Some(quarter) = &patch.quarter {
        objective.quarter = Some(quarter.clone());
    }
    if let Some(key_results) = &patch.key_results {
        objective.key_results = key_results.clone();
    }
    objective.recompute();

    let mut next = objectives.to_vec();
    next[index] = objective.clone();
    Outcome::Applied((next, objective))
}

/// Remove an objective (and all of its key results) from the collection.
pub fn delete_objective(objectives: &[Objective], id: &str) -> Outcome<Vec<Objective>> {
    if !objectives.iter().any(|o| o.id == id) {
        return Outcome::NotFound;
    }
    Outcome::Applied(
        objectives
            .iter()
            .filter(|o| o.id != id)
            .cloned()
            .collect(),
    )
}

/// Append a new key result to an objective and recompute its progress.
pub fn add_key_result(objective: &Objective, draft: KeyResultDraft) -> (Objective, KeyResult) {
    let ids: HashSet<&str> = objective
        .key_results
        .iter()
        .map(|kr| kr.id.as_str())
        .collect();
    let kr = materialize_key_result(&ids, draft);

    let mut next = objective.clone();
    next.key_results.push(kr.clone());
    next.recompute();
    (next, kr)
}

/// Merge-patch one of an objective's key results and recompute progress.
pub fn update_key_result(objective: &Objective, patch: &KeyResultPatch) -> Outcome<Objective> {
    let Some(index) = objective
        .key_results
        .iter()
        .position(|kr| kr.id == patch.id)
    else {
        return Outcome::NotFound;
    };

    let mut next = objective.clone();
    let kr = &mut next.key_results[index];
    if let Some(summary) = &patch.summary {
        kr.summary = summary.clone();
    }
    if let Some(description) = &patch.description {
        kr.description = Some(description.clone());
    }
    if let Some(progress) = patch.progress {
        kr.progress = progress;
    }
    if let Some(target) = patch.target {
        kr.target = target;
    }
    if let Some(units) = &patch.units {
        kr.units = units.clone();
    }
    next.recompute();
    Outcome::Applied(next)
}

/// Remove a key result from an objective and recompute its progress.
pub fn delete_key_result(objective: &Objective, id: &str) -> Outcome<Objective> {
    if !objective.key_results.iter().any(|kr| kr.id == id) {
        return Outcome::NotFound;
    }
    let mut next = objective.clone();
    next.key_results.retain(|kr| kr.id != id);
    next.recompute();
    Outcome::Applied(next)
}

fn materialize_key_result(existing_ids: &HashSet<&str>, draft: KeyResultDraft) -> KeyResult {
    let mut kr = KeyResult::new(
        fresh_id(existing_ids),
        draft.summary,
        draft.progress,
        draft.target,
        draft.units,
    );
    kr.description = draft.description;
    kr
}
