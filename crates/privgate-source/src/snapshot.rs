//! Snapshot-backed implementation of `PullRequestSource`.
//!
//! `SnapshotPullRequest` serves a `PullRequestSnapshot` held in memory and
//! records approvals instead of sending them anywhere. Approvals live behind
//! `Arc<Mutex<_>>` so a caller can keep a handle and inspect them after the
//! gate has run.

use std::{
    path::Path,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::info;

use privgate_contracts::{
    error::{PrivgateError, PrivgateResult},
    pull_request::{Commit, Label, PullRequestSnapshot},
};
use privgate_core::traits::PullRequestSource;

// ── Internal mutable state ────────────────────────────────────────────────────

#[derive(Default)]
pub(crate) struct ApprovalState {
    /// One timestamp per `approve()` call, in call order.
    pub(crate) approvals: Vec<DateTime<Utc>>,
}

// ── Public source ─────────────────────────────────────────────────────────────

/// A pull request served from a snapshot.
pub struct SnapshotPullRequest {
    snapshot: PullRequestSnapshot,
    pub(crate) state: Arc<Mutex<ApprovalState>>,
}

impl SnapshotPullRequest {
    pub fn new(snapshot: PullRequestSnapshot) -> Self {
        Self {
            snapshot,
            state: Arc::new(Mutex::new(ApprovalState::default())),
        }
    }

    /// Parse `s` as a JSON `PullRequestSnapshot`.
    ///
    /// Returns `PrivgateError::SourceError` if the JSON is malformed or has
    /// no `author`.
    pub fn from_json_str(s: &str) -> PrivgateResult<Self> {
        let snapshot: PullRequestSnapshot =
            serde_json::from_str(s).map_err(|e| PrivgateError::SourceError {
                reason: format!("failed to parse pull request snapshot JSON: {}", e),
            })?;
        Ok(Self::new(snapshot))
    }

    /// Read and parse the JSON snapshot at `path`.
    pub fn from_file(path: &Path) -> PrivgateResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| PrivgateError::SourceError {
            reason: format!("failed to read pull request snapshot '{}': {}", path.display(), e),
        })?;
        Self::from_json_str(&contents)
    }

    pub fn snapshot(&self) -> &PullRequestSnapshot {
        &self.snapshot
    }

    /// Number of times `approve()` has been called.
    pub fn approval_count(&self) -> usize {
        self.state
            .lock()
            .map(|state| state.approvals.len())
            .unwrap_or_default()
    }

    /// Time of the most recent approval, if any.
    pub fn approved_at(&self) -> Option<DateTime<Utc>> {
        self.state
            .lock()
            .ok()
            .and_then(|state| state.approvals.last().copied())
    }
}

#[async_trait]
impl PullRequestSource for SnapshotPullRequest {
    fn author(&self) -> &str {
        &self.snapshot.author
    }

    async fn list_commits(&self) -> PrivgateResult<Vec<Commit>> {
        Ok(self.snapshot.commits.clone())
    }

    async fn diff(&self) -> PrivgateResult<String> {
        Ok(self.snapshot.diff.clone())
    }

    async fn list_labels(&self) -> PrivgateResult<Vec<Label>> {
        Ok(self.snapshot.labels.clone())
    }

    /// Record an approval.
    ///
    /// Returns `Err(ApprovalFailed)` only if the internal mutex is poisoned.
    async fn approve(&self) -> PrivgateResult<()> {
        let mut state = self.state.lock().map_err(|e| PrivgateError::ApprovalFailed {
            reason: format!("approval state lock poisoned: {}", e),
        })?;

        state.approvals.push(Utc::now());

        info!(
            number = ?self.snapshot.number,
            author = %self.snapshot.author,
            approvals = state.approvals.len(),
            "pull request approval recorded"
        );

        Ok(())
    }
}
