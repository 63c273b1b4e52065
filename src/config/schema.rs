use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::matcher::MatcherConfig;

/// Top-level configuration loaded from ~/.config/medscore/config.yaml.
///
/// Every section is optional in the file. A missing section falls back to
/// its defaults, so an empty or absent config behaves identically to the
/// built-in settings.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub matcher: MatcherConfig,
    pub history: HistoryConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct HistoryConfig {
    /// Calculation log location. None uses the default path
    /// (~/.config/medscore/calculations.json).
    pub path: Option<PathBuf>,
    /// How many records `history` shows when --limit is not given.
    pub limit: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            path: None,
            limit: 50,
        }
    }
}
