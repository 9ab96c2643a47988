//! Configuration file schemas.
//!
//! Two documents are read from TOML: the requester registry and the gate
//! settings. Both are plain serde models; loading lives in `registry` and
//! `settings`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use privgate_contracts::policy::{GateConfig, Registry, RequesterPolicy};

/// The top-level structure deserialized from a requester registry file.
///
/// Table keys are requester identities, matched exactly against the pull
/// request author. Quote keys that contain brackets.
///
/// Example:
/// ```toml
/// [requesters."dependabot[bot]"]
/// labels = ["dependencies", "github_actions"]
///
/// [requesters.octocat]
/// labels = ["privilege-drop"]
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegistryConfig {
    #[serde(default)]
    pub requesters: BTreeMap<String, RequesterPolicy>,
}

impl RegistryConfig {
    pub fn into_registry(self) -> Registry {
        Registry::new(self.requesters)
    }
}

/// The gate settings file.
///
/// Example:
/// ```toml
/// [checks]
/// commitVerification = true
/// checkDiff = false
/// ```
///
/// Missing keys take their `GateConfig::default()` values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SettingsFile {
    #[serde(default)]
    pub checks: GateConfig,
}
