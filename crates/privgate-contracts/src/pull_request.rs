//! Pull request data types.
//!
//! These types describe what the pull-request source hands to the gate.
//! The gate only reads them; fetching is the collaborator's concern.

use serde::{Deserialize, Serialize};

/// A single commit on the pull request, in the PR's native order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    /// Commit identifier, used in failure reasons and the report.
    pub sha: String,
    /// Login of the forge account linked to the commit author, if any.
    ///
    /// Commits authored with an email that maps to no account carry `None`.
    #[serde(default)]
    pub author_login: Option<String>,
    /// Raw author display name from the commit metadata. Always present.
    pub author_name: String,
    /// Signature verification status reported by the forge.
    ///
    /// `None` means the status is unknown and is treated as unverified.
    #[serde(default)]
    pub verified: Option<bool>,
}

impl Commit {
    /// True only when the forge explicitly reported the commit as verified.
    pub fn is_verified(&self) -> bool {
        self.verified == Some(true)
    }
}

/// A label attached to the pull request.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Label {
    pub name: String,
}

impl Label {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// A complete, point-in-time view of a pull request.
///
/// Sources that hold everything in memory (fixtures, JSON snapshots) store
/// one of these; network-backed sources may never materialize it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PullRequestSnapshot {
    /// Pull request number, used only for logging.
    #[serde(default)]
    pub number: Option<u64>,
    /// Login of the account that opened the pull request.
    pub author: String,
    /// Commits in the order the forge lists them.
    #[serde(default)]
    pub commits: Vec<Commit>,
    /// Raw unified diff of the whole change set.
    #[serde(default)]
    pub diff: String,
    #[serde(default)]
    pub labels: Vec<Label>,
}
