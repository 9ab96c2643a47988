//! Evaluation outcomes and the per-run report.
//!
//! `CheckVerdict` is what each predicate returns. `EvaluationReport` is what
//! the gate returns to its caller after a run, one per pull request.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unique identifier for a single gate run.
///
/// Appears in every log event of the run and in the report.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunId(pub uuid::Uuid);

impl RunId {
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The three gating checks, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckStage {
    Commits,
    Diff,
    Labels,
}

impl CheckStage {
    /// All stages in the fixed order the gate runs them.
    pub const ORDER: [CheckStage; 3] = [CheckStage::Commits, CheckStage::Diff, CheckStage::Labels];

    pub fn as_str(self) -> &'static str {
        match self {
            CheckStage::Commits => "commits",
            CheckStage::Diff => "diff",
            CheckStage::Labels => "labels",
        }
    }
}

impl fmt::Display for CheckStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of a single predicate check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum CheckVerdict {
    Passed,
    Failed {
        /// Human-readable explanation naming the offending commit, line, or labels.
        reason: String,
    },
}

impl CheckVerdict {
    pub fn failed(reason: impl Into<String>) -> Self {
        CheckVerdict::Failed {
            reason: reason.into(),
        }
    }

    pub fn is_passed(&self) -> bool {
        matches!(self, CheckVerdict::Passed)
    }
}

/// What happened to one stage during a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum StageOutcome {
    /// The stage's toggle is off; treated as passing.
    Skipped,
    /// An earlier stage failed, so this one never ran.
    NotReached,
    /// The stage ran and produced a verdict.
    Evaluated { verdict: CheckVerdict },
}

/// A stage paired with its outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageRecord {
    pub stage: CheckStage,
    pub outcome: StageOutcome,
}

/// The single, final decision of a run.
///
/// There is no partial approval: a run either approves the pull request or
/// it does not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum Decision {
    /// Every enabled check passed and the approval sink was invoked.
    Approved,
    /// A requester matched but one of its enabled checks failed.
    Denied { stage: CheckStage, reason: String },
    /// Nothing to evaluate: no registry, or no requester matches the author.
    NotApplicable { reason: String },
}

impl Decision {
    pub fn is_approved(&self) -> bool {
        matches!(self, Decision::Approved)
    }
}

/// Everything a caller needs to report on a finished run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationReport {
    pub run_id: RunId,
    /// The pull request author as reported by the source.
    pub author: String,
    /// The requester whose policy was evaluated, when one matched.
    pub requester: Option<String>,
    pub decision: Decision,
    /// One record per stage, in evaluation order. Empty when no requester matched.
    pub stages: Vec<StageRecord>,
    /// True when every examined commit was verified. `None` when the commit
    /// check did not run.
    pub commits_verified: Option<bool>,
    /// Shas of examined commits that were not explicitly verified.
    pub unverified_commits: Vec<String>,
    /// Wall-clock time the decision was reached (UTC).
    pub evaluated_at: DateTime<Utc>,
}

impl EvaluationReport {
    /// Outcome recorded for `stage`, if the report has one.
    pub fn stage(&self, stage: CheckStage) -> Option<&StageOutcome> {
        self.stages
            .iter()
            .find(|record| record.stage == stage)
            .map(|record| &record.outcome)
    }
}
