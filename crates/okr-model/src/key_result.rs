// key_result.rs — KeyResult: a quantitative metric measuring an objective.
//
// A key result tracks a current value against a target value in some unit
// ("%", "customers", "USD"). Percent-complete is derived, clamped to
// [0, 100], and defined as 0 when the target is not positive so the math
// never divides by zero or produces NaN.

use serde::{Deserialize, Serialize};

/// A measurable key result within an objective.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyResult {
    /// Unique identifier within the parent objective. Immutable after creation.
    pub id: String,

    /// Short free-text label (e.g., "Acquire 100 new enterprise customers").
    pub summary: String,

    /// Optional longer description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Current value achieved.
    pub progress: f64,

    /// Value that counts as 100%. A non-positive target yields 0% progress.
    pub target: f64,

    /// Free-text unit label (e.g., "%", "customers", "USD").
    pub units: String,

    /// Derived: true iff `progress >= target`. Recomputed after every
    /// mutation — a caller-supplied value never survives a store write.
    #[serde(default)]
    pub is_completed: bool,
}

impl KeyResult {
    /// Create a key result with derived fields already consistent.
    pub fn new(
        id: impl Into<String>,
        summary: impl Into<String>,
        progress: f64,
        target: f64,
        units: impl Into<String>,
    ) -> Self {
        let mut kr = Self {
            id: id.into(),
            summary: summary.into(),
            description: None,
            progress,
            target,
            units: units.into(),
            is_completed: false,
        };
        kr.recompute();
        kr
    }

    /// Percent-complete in [0, 100].
    ///
    /// `clamp(progress / target, 0, 1) * 100` when `target > 0`, otherwise 0.
    /// Non-finite inputs also resolve to 0 rather than propagating NaN.
    pub fn percent_complete(&self) -> f64 {
        if self.target <= 0.0 || !self.target.is_finite() || !self.progress.is_finite() {
            return 0.0;
        }
        (self.progress / self.target).clamp(0.0, 1.0) * 100.0
    }

    /// Recompute the derived completion flag from `progress` and `target`.
    pub fn recompute(&mut self) {
        self.is_completed = self.progress >= self.target;
    }
}
