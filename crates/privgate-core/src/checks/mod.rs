//! The three gating predicates.
//!
//! Each check is a pure function over data the gate has already fetched.

pub mod commits;
pub mod diff;
pub mod labels;

#[cfg(test)]
mod proptest;

pub use commits::{check_commits, resolve_author, AuthorResolution, CommitCheckOptions, CommitCheckOutcome};
pub use diff::check_diff_only_removals;
pub use labels::check_labels;
