//! Gate settings loading and override resolution.

use std::path::Path;

use privgate_contracts::{
    error::{PrivgateError, PrivgateResult},
    policy::GateConfig,
};

use crate::config::SettingsFile;

/// Parse a settings document and return its `[checks]` table.
pub fn parse_settings_toml(s: &str) -> PrivgateResult<GateConfig> {
    let file: SettingsFile = toml::from_str(s).map_err(|e| PrivgateError::ConfigError {
        reason: format!("failed to parse gate settings TOML: {}", e),
    })?;
    Ok(file.checks)
}

/// Read and parse the settings file at `path`.
pub fn load_settings(path: &Path) -> PrivgateResult<GateConfig> {
    let contents = std::fs::read_to_string(path).map_err(|e| PrivgateError::ConfigError {
        reason: format!("failed to read gate settings '{}': {}", path.display(), e),
    })?;
    parse_settings_toml(&contents)
}

/// Per-key overrides, typically from CLI flags or environment variables.
///
/// `None` leaves the base value untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Overrides {
    pub commit_verification: Option<bool>,
    pub fallback_to_commit_author: Option<bool>,
    pub check_commits: Option<bool>,
    pub check_diff: Option<bool>,
    pub check_labels: Option<bool>,
}

impl Overrides {
    /// Apply the overrides on top of `base`.
    pub fn apply(self, base: GateConfig) -> GateConfig {
        GateConfig {
            commit_verification: self.commit_verification.unwrap_or(base.commit_verification),
            fallback_to_commit_author: self
                .fallback_to_commit_author
                .unwrap_or(base.fallback_to_commit_author),
            check_commits: self.check_commits.unwrap_or(base.check_commits),
            check_diff: self.check_diff.unwrap_or(base.check_diff),
            check_labels: self.check_labels.unwrap_or(base.check_labels),
        }
    }
}
