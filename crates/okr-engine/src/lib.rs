//! # okr-engine
//!
//! Pure mutation operations over a collection of [`okr_model::Objective`]s.
//!
//! Every operation returns a new collection (inputs are never mutated in a
//! caller-visible way) and recomputes the derived fields of the touched
//! objective before returning, so `progress` and `is_completed` are always
//! consistent with the underlying key-result data.
//!
//! Operations that target an id which does not exist return
//! [`Outcome::NotFound`] rather than erroring — the engine itself never
//! fails and never panics. Callers are responsible for surfacing NotFound
//! as a distinguishable condition instead of conflating it with success.
//!
//! Updates are merge-patches: fields absent from a [`ObjectivePatch`] or
//! [`KeyResultPatch`] retain their prior values, never reset to defaults.

pub mod ops;
pub mod patch;

pub use ops::{
    add_key_result, add_objective, delete_key_result, delete_objective, update_key_result,
    update_objective, Outcome,
};
pub use patch::{KeyResultDraft, KeyResultPatch, ObjectiveDraft, ObjectivePatch};
