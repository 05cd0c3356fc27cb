//! # okr-model
//!
//! Domain model for the OKR builder: [`Objective`] and [`KeyResult`] value
//! types plus the derived-field computation rules.
//!
//! Two fields are never set by callers — they are always recomputed from
//! the underlying data:
//!
//! - [`KeyResult::is_completed`] — true iff `progress >= target`
//! - [`Objective::progress`] — rounded mean of each key result's clamped
//!   percent-complete, `0` when there are no key results
//!
//! The mutation engine (okr-engine) calls [`Objective::recompute`] after
//! every mutation so readers can rely on these invariants at all times.

pub mod key_result;
pub mod objective;

pub use key_result::KeyResult;
pub use objective::{objective_progress, Objective, ObjectiveStatus};
