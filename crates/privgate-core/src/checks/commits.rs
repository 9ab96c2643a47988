//! Commit authorship and verification check.
//!
//! Every commit must resolve to the requester's identity (case-insensitive).
//! When strict verification is on, every commit must also be explicitly
//! verified. Commits are examined in the order given; the first offending
//! commit ends the check.

use tracing::{debug, warn};

use privgate_contracts::{
    error::{PrivgateError, PrivgateResult},
    evaluation::CheckVerdict,
    pull_request::Commit,
};

/// Options the commit check reads from `GateConfig`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CommitCheckOptions {
    /// Fail on any commit whose verification status is not explicitly true.
    pub require_verification: bool,
    /// Fall back to the raw author name when no linked account exists.
    pub fallback_to_author_name: bool,
}

/// Outcome of resolving a commit's author identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthorResolution {
    /// The lower-cased identity to compare against the requester.
    Resolved(String),
    /// No linked account, and fallback was not permitted.
    Missing,
}

/// Resolve the identity that authored `commit`.
///
/// Prefers the linked account login; uses the raw author name only when
/// `fallback` is true. Both are lower-cased.
pub fn resolve_author(commit: &Commit, fallback: bool) -> AuthorResolution {
    match &commit.author_login {
        Some(login) => AuthorResolution::Resolved(login.to_lowercase()),
        None if fallback => AuthorResolution::Resolved(commit.author_name.to_lowercase()),
        None => AuthorResolution::Missing,
    }
}

/// Result of the commit check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitCheckOutcome {
    pub verdict: CheckVerdict,
    /// True when every examined commit was explicitly verified.
    ///
    /// Published as the `commits_verified` signal whether or not
    /// verification is enforced. Reflects only commits examined before
    /// the check stopped.
    pub all_verified: bool,
    /// Shas of examined commits that were not explicitly verified.
    pub unverified: Vec<String>,
}

/// Check that every commit was authored by `requester`.
///
/// Returns `Err(UnresolvedCommitAuthor)` when a commit has no linked account
/// and fallback is disabled. An empty commit list passes.
pub fn check_commits(
    commits: &[Commit],
    requester: &str,
    options: CommitCheckOptions,
) -> PrivgateResult<CommitCheckOutcome> {
    let requester = requester.to_lowercase();
    let mut unverified = Vec::new();

    for commit in commits {
        let author = match resolve_author(commit, options.fallback_to_author_name) {
            AuthorResolution::Resolved(author) => author,
            AuthorResolution::Missing => {
                return Err(PrivgateError::UnresolvedCommitAuthor {
                    sha: commit.sha.clone(),
                });
            }
        };

        debug!(sha = %commit.sha, author = %author, verified = ?commit.verified, "checking commit");

        if !commit.is_verified() {
            unverified.push(commit.sha.clone());

            if options.require_verification {
                warn!(sha = %commit.sha, "commit is not verified and verification is required");
                return Ok(CommitCheckOutcome {
                    verdict: CheckVerdict::failed(format!(
                        "commit {} is not verified",
                        commit.sha
                    )),
                    all_verified: false,
                    unverified,
                });
            }
        }

        if author != requester {
            warn!(
                sha = %commit.sha,
                author = %author,
                requester = %requester,
                "commit author does not match requester"
            );
            return Ok(CommitCheckOutcome {
                verdict: CheckVerdict::failed(format!(
                    "commit {} was authored by '{}', not '{}'",
                    commit.sha, author, requester
                )),
                all_verified: unverified.is_empty(),
                unverified,
            });
        }
    }

    Ok(CommitCheckOutcome {
        verdict: CheckVerdict::Passed,
        all_verified: unverified.is_empty(),
        unverified,
    })
}
