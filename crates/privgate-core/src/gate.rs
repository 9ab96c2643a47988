//! The approval gate: the decision flow over the three checks.
//!
//! The gate enforces the evaluation order:
//!
//!   Registry → Requester lookup → Commits → Diff → Labels → Approve
//!
//! `PullRequestSource::approve()` is called only after every enabled check
//! has passed. Data for a stage is fetched only when that stage runs.

use chrono::Utc;
use tracing::{debug, info, warn};

use privgate_contracts::{
    error::PrivgateResult,
    evaluation::{
        CheckStage, CheckVerdict, Decision, EvaluationReport, RunId, StageOutcome, StageRecord,
    },
    policy::{GateConfig, RegistryLookup, RequesterPolicy},
};

use crate::{
    checks::{check_commits, check_diff_only_removals, check_labels, CommitCheckOptions},
    traits::{PullRequestSource, RequesterRegistry},
};

/// Per-run accumulator for stage outcomes and the commit signal.
#[derive(Default)]
struct StageLog {
    stages: Vec<StageRecord>,
    commits_verified: Option<bool>,
    unverified_commits: Vec<String>,
}

impl StageLog {
    fn record(&mut self, stage: CheckStage, outcome: StageOutcome) {
        self.stages.push(StageRecord { stage, outcome });
    }

    /// Mark every stage after `failed` as not reached.
    fn close_after(&mut self, failed: CheckStage) {
        let later = CheckStage::ORDER
            .iter()
            .skip_while(|stage| **stage != failed)
            .skip(1);
        for stage in later {
            self.record(*stage, StageOutcome::NotReached);
        }
    }
}

/// The approval gate for one configuration.
///
/// The configuration is fixed at construction; a gate may evaluate any
/// number of pull requests, each as an independent run.
#[derive(Debug, Clone)]
pub struct Gate {
    config: GateConfig,
}

impl Gate {
    pub fn new(config: GateConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GateConfig {
        &self.config
    }

    /// Evaluate `pr` against the requesters in `registry`.
    ///
    /// # Flow
    ///
    /// 1. Load the registry. `Unavailable` → `NotApplicable`, nothing fetched.
    /// 2. Look up the PR author. No match → `NotApplicable`, no checks run.
    /// 3. Run the enabled checks in order; the first failure → `Denied`.
    /// 4. All enabled checks passed → `pr.approve()` once → `Approved`.
    ///
    /// # Errors
    ///
    /// Returns `Err` for data and configuration defects (an unresolvable
    /// commit author, a broken registry) and collaborator failures. Policy
    /// failures are NOT errors; they are `Decision::Denied`.
    pub async fn evaluate(
        &self,
        pr: &dyn PullRequestSource,
        registry: &dyn RequesterRegistry,
    ) -> PrivgateResult<EvaluationReport> {
        let run_id = RunId::new();
        let author = pr.author().to_string();

        debug!(run_id = %run_id, author = %author, "gate run starting");

        let registry = match registry.requesters().await? {
            RegistryLookup::Available(registry) => registry,
            RegistryLookup::Unavailable => {
                warn!(run_id = %run_id, "requester registry unavailable, nothing to evaluate");
                return Ok(Self::report(
                    run_id,
                    author,
                    None,
                    Decision::NotApplicable {
                        reason: "requester registry unavailable".to_string(),
                    },
                    StageLog::default(),
                ));
            }
        };

        let Some(policy) = registry.lookup(&author) else {
            info!(
                run_id = %run_id,
                author = %author,
                requesters = registry.len(),
                "pull request author is not a privileged requester"
            );
            let reason = format!("'{author}' is not a privileged requester");
            return Ok(Self::report(
                run_id,
                author,
                None,
                Decision::NotApplicable { reason },
                StageLog::default(),
            ));
        };

        info!(run_id = %run_id, requester = %author, "privileged requester matched, running checks");

        let mut log = StageLog::default();
        let decision = match self.run_checks(&run_id, pr, &author, policy, &mut log).await? {
            Some((stage, reason)) => {
                warn!(run_id = %run_id, stage = %stage, reason = %reason, "check failed, not approving");
                Decision::Denied { stage, reason }
            }
            None => {
                pr.approve().await?;
                info!(run_id = %run_id, requester = %author, "all enabled checks passed, pull request approved");
                Decision::Approved
            }
        };

        let requester = Some(author.clone());
        Ok(Self::report(run_id, author, requester, decision, log))
    }

    /// Run the enabled checks in order, stopping at the first failure.
    ///
    /// Returns the failing stage and its reason, or `None` when every
    /// enabled check passed.
    async fn run_checks(
        &self,
        run_id: &RunId,
        pr: &dyn PullRequestSource,
        requester: &str,
        policy: &RequesterPolicy,
        log: &mut StageLog,
    ) -> PrivgateResult<Option<(CheckStage, String)>> {
        for stage in CheckStage::ORDER {
            if !self.enabled(stage) {
                debug!(run_id = %run_id, stage = %stage, "check disabled, skipping");
                log.record(stage, StageOutcome::Skipped);
                continue;
            }

            debug!(run_id = %run_id, stage = %stage, "running check");
            let verdict = match stage {
                CheckStage::Commits => {
                    let commits = pr.list_commits().await?;
                    let outcome = check_commits(&commits, requester, self.commit_options())?;
                    log.commits_verified = Some(outcome.all_verified);
                    log.unverified_commits = outcome.unverified;
                    outcome.verdict
                }
                CheckStage::Diff => {
                    let diff = pr.diff().await?;
                    check_diff_only_removals(&diff)
                }
                CheckStage::Labels => {
                    let labels = pr.list_labels().await?;
                    check_labels(
                        labels.iter().map(|label| label.name.as_str()),
                        policy.labels.iter().map(String::as_str),
                    )
                }
            };

            log.record(stage, StageOutcome::Evaluated { verdict: verdict.clone() });

            if let CheckVerdict::Failed { reason } = verdict {
                log.close_after(stage);
                return Ok(Some((stage, reason)));
            }
        }

        Ok(None)
    }

    fn enabled(&self, stage: CheckStage) -> bool {
        match stage {
            CheckStage::Commits => self.config.check_commits,
            CheckStage::Diff => self.config.check_diff,
            CheckStage::Labels => self.config.check_labels,
        }
    }

    fn commit_options(&self) -> CommitCheckOptions {
        CommitCheckOptions {
            require_verification: self.config.commit_verification,
            fallback_to_author_name: self.config.fallback_to_commit_author,
        }
    }

    fn report(
        run_id: RunId,
        author: String,
        requester: Option<String>,
        decision: Decision,
        log: StageLog,
    ) -> EvaluationReport {
        EvaluationReport {
            run_id,
            author,
            requester,
            decision,
            stages: log.stages,
            commits_verified: log.commits_verified,
            unverified_commits: log.unverified_commits,
            evaluated_at: Utc::now(),
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────
