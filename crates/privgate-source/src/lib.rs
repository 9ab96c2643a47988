//! # privgate-source
//!
//! A file- and memory-backed pull request source for the privgate gate.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use privgate_source::SnapshotPullRequest;
//!
//! let pr = SnapshotPullRequest::from_file(Path::new("pr.json"))?;
//! let report = gate.evaluate(&pr, &registry).await?;
//! assert_eq!(pr.approval_count(), usize::from(report.decision.is_approved()));
//! ```
//!
//! Snapshot JSON shape:
//!
//! ```json
//! {
//!   "number": 42,
//!   "author": "octocat",
//!   "commits": [
//!     { "sha": "a1b2c3", "author_login": "octocat", "author_name": "Octo Cat", "verified": true }
//!   ],
//!   "diff": "--- a/CODEOWNERS\n+++ b/CODEOWNERS\n-/infra @octocat\n",
//!   "labels": [{ "name": "privilege-drop" }]
//! }
//! ```

pub mod snapshot;

pub use snapshot::SnapshotPullRequest;

// ── Tests ─────────────────────────────────────────────────────────────────────
