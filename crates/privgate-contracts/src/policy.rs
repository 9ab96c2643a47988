//! Requester policy, registry, and gate configuration types.
//!
//! The registry maps a privileged requester's identity to the policy that
//! governs their self-service pull requests. `GateConfig` holds the toggles
//! that decide which checks run at all.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Policy attached to one privileged requester.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequesterPolicy {
    /// The exact label set a PR must carry. Order and duplicates are ignored.
    #[serde(default)]
    pub labels: Vec<String>,
}

/// The set of privileged requesters loaded for one run.
///
/// Keys are requester identities and are matched case-sensitively against
/// the pull request author. A registry is immutable once built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registry {
    requesters: BTreeMap<String, RequesterPolicy>,
}

impl Registry {
    pub fn new(requesters: BTreeMap<String, RequesterPolicy>) -> Self {
        Self { requesters }
    }

    /// Return the policy registered for `author`, if any.
    ///
    /// Identity match is exact: `Dependabot` does not match `dependabot`.
    pub fn lookup(&self, author: &str) -> Option<&RequesterPolicy> {
        self.requesters.get(author)
    }

    pub fn len(&self) -> usize {
        self.requesters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requesters.is_empty()
    }

    /// Iterate requester identities in sorted order.
    pub fn identities(&self) -> impl Iterator<Item = &str> {
        self.requesters.keys().map(String::as_str)
    }
}

impl FromIterator<(String, RequesterPolicy)> for Registry {
    fn from_iter<I: IntoIterator<Item = (String, RequesterPolicy)>>(iter: I) -> Self {
        Self {
            requesters: iter.into_iter().collect(),
        }
    }
}

/// Outcome of asking a registry for its requesters.
///
/// `Unavailable` is not an error: a repository without a requester
/// configuration simply has nothing to approve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryLookup {
    Unavailable,
    Available(Registry),
}

/// Immutable switches controlling which checks the gate runs.
///
/// Field names in serialized form match the recognized configuration keys
/// (`commitVerification`, `fallback_to_commit_author`, `checkCommits`,
/// `checkDiff`, `checkLabels`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GateConfig {
    /// Fail the commit check on any commit not explicitly verified.
    #[serde(rename = "commitVerification")]
    pub commit_verification: bool,
    /// Use the raw commit author name when no linked account exists.
    #[serde(rename = "fallback_to_commit_author")]
    pub fallback_to_commit_author: bool,
    #[serde(rename = "checkCommits")]
    pub check_commits: bool,
    #[serde(rename = "checkDiff")]
    pub check_diff: bool,
    #[serde(rename = "checkLabels")]
    pub check_labels: bool,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            commit_verification: false,
            fallback_to_commit_author: false,
            check_commits: true,
            check_diff: true,
            check_labels: true,
        }
    }
}
