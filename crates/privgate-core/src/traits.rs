//! Collaborator traits for the gate.
//!
//! - `PullRequestSource`: supplies PR data and records the approval
//! - `RequesterRegistry`: supplies the privileged requester configuration
//!
//! Both are I/O-bound in real deployments, so their methods are async. The
//! gate awaits each call before making the next one.

use async_trait::async_trait;

use privgate_contracts::{
    error::PrivgateResult,
    policy::RegistryLookup,
    pull_request::{Commit, Label},
};

/// A single pull request, as seen by the gate.
///
/// The gate fetches only what the enabled checks need, and calls `approve()`
/// at most once per run.
#[async_trait]
pub trait PullRequestSource: Send + Sync {
    /// Login of the account that opened the pull request.
    fn author(&self) -> &str;

    /// Commits in the PR's native order. Implementations must not re-sort.
    async fn list_commits(&self) -> PrivgateResult<Vec<Commit>>;

    /// The raw unified diff of the whole change set.
    async fn diff(&self) -> PrivgateResult<String>;

    async fn list_labels(&self) -> PrivgateResult<Vec<Label>>;

    /// Mark the pull request as approved.
    ///
    /// Not assumed to be idempotent.
    async fn approve(&self) -> PrivgateResult<()>;
}

/// Source of the privileged requester configuration.
#[async_trait]
pub trait RequesterRegistry: Send + Sync {
    /// Load the registry for this run.
    ///
    /// Return `Ok(RegistryLookup::Unavailable)` when there is simply no
    /// configuration; reserve `Err` for configuration that exists but is broken.
    async fn requesters(&self) -> PrivgateResult<RegistryLookup>;
}
