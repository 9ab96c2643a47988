//! Error types for the privgate approval gate.
//!
//! Policy failures are not errors: they come back as `Decision::Denied`.
//! Everything here aborts the run.

use thiserror::Error;

/// The unified error type for the privgate crates.
#[derive(Debug, Error)]
pub enum PrivgateError {
    /// A commit has no linked author account and name fallback is disabled.
    ///
    /// This is a data defect, not a policy violation, so it is never turned
    /// into a denial.
    #[error("cannot resolve author of commit {sha}: no linked account and fallback to commit author is disabled")]
    UnresolvedCommitAuthor { sha: String },

    /// A required configuration value or file is missing or invalid.
    #[error("configuration error: {reason}")]
    ConfigError { reason: String },

    /// The pull request source could not supply data.
    #[error("pull request source error: {reason}")]
    SourceError { reason: String },

    /// The approval sink rejected or failed to record the approval.
    #[error("approval failed: {reason}")]
    ApprovalFailed { reason: String },
}

/// Convenience alias used throughout the privgate crates.
pub type PrivgateResult<T> = Result<T, PrivgateError>;
