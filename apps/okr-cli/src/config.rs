// config.rs — Builder configuration.
//
// Looked up as `<project_root>/okr.toml`; every field is optional and the
// file may be absent entirely. This configures the session's ambient
// behavior (default period label, context transcript path, sample data) —
// provider credentials and transport settings belong to the excluded
// relay layer, not here.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Configuration for one builder session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BuilderConfig {
    /// Default period label for new objectives (e.g., "Q3 2026").
    /// Falls back to the current calendar quarter when unset.
    #[serde(default)]
    pub current_period: Option<String>,

    /// When set, every context message is also appended here as JSONL,
    /// giving an inspectable transcript of what the agent was told.
    #[serde(default)]
    pub context_log: Option<PathBuf>,

    /// Start sessions from the built-in sample objectives.
    #[serde(default)]
    pub sample_data: bool,
}

impl BuilderConfig {
    /// Load `<project_root>/okr.toml`, or defaults when it doesn't exist.
    pub fn load(project_root: &Path) -> anyhow::Result<Self> {
        let path = project_root.join("okr.toml");
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(&path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config = toml::from_str(&raw)
            .with_context(|| format!("parsing {}", path.display()))?;
        Ok(config)
    }
}
