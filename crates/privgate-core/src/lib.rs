//! # privgate-core
//!
//! The policy-evaluation engine for the privgate approval gate.
//!
//! This crate provides:
//! - The collaborator traits (`PullRequestSource`, `RequesterRegistry`)
//! - The three gating checks (commit authorship, removal-only diff, label set)
//! - The `Gate` that runs them in order and approves on success
//!
//! ## Usage
//!
//! ```rust,ignore
//! use privgate_core::Gate;
//!
//! let report = Gate::new(config).evaluate(&pull_request, &registry).await?;
//! ```

pub mod checks;
pub mod gate;
pub mod traits;

pub use gate::Gate;
pub use traits::{PullRequestSource, RequesterRegistry};
