// session.rs — SessionState: the one shared mutable document.
//
// Holds the objective collection plus session metadata. The store stamps
// `last_updated` on every successful mutation; nothing else writes it.

use chrono::{DateTime, Datelike, Utc};
use okr_model::{KeyResult, Objective};
use serde::{Deserialize, Serialize};

/// The full session document shared between the two actors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    /// All objectives, id-unique, in insertion order.
    pub objectives: Vec<Objective>,

    /// Default period label applied to newly created objectives.
    pub current_period: String,

    /// Refreshed by the store on every successful mutation.
    pub last_updated: DateTime<Utc>,
}

impl SessionState {
    /// Empty session for a given period label.
    pub fn for_period(period: impl Into<String>) -> Self {
        Self {
            objectives: Vec::new(),
            current_period: period.into(),
            last_updated: Utc::now(),
        }
    }

    /// Look up an objective by id.
    pub fn objective(&self, id: &str) -> Option<&Objective> {
        self.objectives.iter().find(|o| o.id == id)
    }

    /// Demo data: the two objectives the original product shipped as its
    /// sample quarter, with derived fields recomputed.
    pub fn sample() -> Self {
        let mut revenue = Objective::new("1", "Increase revenue growth");
        revenue.description =
            Some("Drive significant revenue expansion through strategic initiatives".to_string());
        revenue.quarter = Some("Q1 2026".to_string());
        revenue.key_results = vec![
            KeyResult::new(
                "1-1",
                "Acquire 100 new enterprise customers",
                67.0,
                100.0,
                "customers",
            ),
            KeyResult::new(
                "1-2",
                "Increase monthly recurring revenue to $500K",
                380_000.0,
                500_000.0,
                "USD",
            ),
        ];
        revenue.recompute();

        let mut quality = Objective::new("2", "Improve product quality");
        quality.description =
            Some("Enhance user experience and reduce technical debt".to_string());
        quality.quarter = Some("Q1 2026".to_string());
        quality.key_results = vec![
            KeyResult::new("2-1", "Reduce critical bugs by 80%", 60.0, 80.0, "%"),
            KeyResult::new("2-2", "Achieve 95% customer satisfaction score", 88.0, 95.0, "%"),
        ];
        quality.recompute();

        Self {
            objectives: vec![revenue, quality],
            current_period: "Q1 2026".to_string(),
            last_updated: Utc::now(),
        }
    }
}

impl Default for SessionState {
    /// Empty session labeled with the current calendar quarter.
    fn default() -> Self {
        let now = Utc::now();
        let quarter = (now.month() - 1) / 3 + 1;
        Self::for_period(format!("Q{} {}", quarter, now.year()))
    }
}
