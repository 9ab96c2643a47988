//! privgate: pull request approval gate for privileged requesters.
//!
//! Evaluates a pull request snapshot against the requester registry and
//! approves it when the author's policy is satisfied.
//!
//! Usage:
//!   privgate evaluate --pr pr.json --registry requesters.toml
//!   privgate evaluate --pr pr.json --registry requesters.toml --commit-verification --no-check-diff --json
//!   privgate check-diff change.diff

mod output;

use std::{path::PathBuf, process::ExitCode};

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use privgate_contracts::{
    error::{PrivgateError, PrivgateResult},
    evaluation::{CheckVerdict, Decision, EvaluationReport},
    policy::GateConfig,
};
use privgate_core::{checks::check_diff_only_removals, Gate};
use privgate_policy::{load_settings, FileRequesterRegistry, Overrides};
use privgate_source::SnapshotPullRequest;

// ── CLI definition ────────────────────────────────────────────────────────────

/// privgate: automated approval gate for privileged requesters.
#[derive(Parser)]
#[command(
    name = "privgate",
    about = "Approve pull requests from privileged requesters that satisfy their policy",
    long_about = "Looks up the pull request author in the requester registry, runs the\n\
                  enabled commit, diff, and label checks, and approves the pull request\n\
                  only when every enabled check passes."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Evaluate a pull request snapshot and approve it if its policy passes.
    Evaluate(EvaluateArgs),
    /// Run only the removal-only diff check on a diff file.
    CheckDiff {
        /// Path to a unified diff.
        path: PathBuf,
    },
}

#[derive(clap::Args)]
struct EvaluateArgs {
    /// Pull request snapshot (JSON).
    #[arg(long, env = "PRIVGATE_PR")]
    pr: PathBuf,

    /// Requester registry (TOML). A missing file means nothing to evaluate.
    #[arg(long, env = "PRIVGATE_REGISTRY")]
    registry: PathBuf,

    /// Gate settings (TOML with a [checks] table).
    #[arg(long, env = "PRIVGATE_SETTINGS")]
    settings: Option<PathBuf>,

    /// Require every commit to be verified.
    #[arg(
        long,
        env = "PRIVGATE_COMMIT_VERIFICATION",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        overrides_with = "no_commit_verification"
    )]
    commit_verification: Option<bool>,

    /// Accept unverified commits.
    #[arg(long, overrides_with = "commit_verification")]
    no_commit_verification: bool,

    /// Use the raw commit author name when a commit has no linked account.
    #[arg(
        long,
        env = "PRIVGATE_FALLBACK_TO_COMMIT_AUTHOR",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        overrides_with = "no_fallback_to_commit_author"
    )]
    fallback_to_commit_author: Option<bool>,

    /// Treat commits without a linked account as a fatal error.
    #[arg(long, overrides_with = "fallback_to_commit_author")]
    no_fallback_to_commit_author: bool,

    /// Enable the commit authorship check.
    #[arg(
        long,
        env = "PRIVGATE_CHECK_COMMITS",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        overrides_with = "no_check_commits"
    )]
    check_commits: Option<bool>,

    /// Disable the commit authorship check.
    #[arg(long, overrides_with = "check_commits")]
    no_check_commits: bool,

    /// Enable the removal-only diff check.
    #[arg(
        long,
        env = "PRIVGATE_CHECK_DIFF",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        overrides_with = "no_check_diff"
    )]
    check_diff: Option<bool>,

    /// Disable the removal-only diff check.
    #[arg(long, overrides_with = "check_diff")]
    no_check_diff: bool,

    /// Enable the label-set check.
    #[arg(
        long,
        env = "PRIVGATE_CHECK_LABELS",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        overrides_with = "no_check_labels"
    )]
    check_labels: Option<bool>,

    /// Disable the label-set check.
    #[arg(long, overrides_with = "check_labels")]
    no_check_labels: bool,

    /// File to append `key=value` output signals to.
    #[arg(long, env = "GITHUB_OUTPUT")]
    output_file: Option<PathBuf>,

    /// Print the full evaluation report as JSON.
    #[arg(long)]
    json: bool,
}

impl EvaluateArgs {
    fn overrides(&self) -> Overrides {
        Overrides {
            commit_verification: toggle(self.commit_verification, self.no_commit_verification),
            fallback_to_commit_author: toggle(
                self.fallback_to_commit_author,
                self.no_fallback_to_commit_author,
            ),
            check_commits: toggle(self.check_commits, self.no_check_commits),
            check_diff: toggle(self.check_diff, self.no_check_diff),
            check_labels: toggle(self.check_labels, self.no_check_labels),
        }
    }

    fn gate_config(&self) -> PrivgateResult<GateConfig> {
        let base = match &self.settings {
            Some(path) => load_settings(path)?,
            None => GateConfig::default(),
        };
        Ok(self.overrides().apply(base))
    }
}

/// Combine a `--flag[=bool]` / `--no-flag` pair into one override.
///
/// `--no-flag` wins over a value that came from the environment.
fn toggle(on: Option<bool>, off: bool) -> Option<bool> {
    if off {
        Some(false)
    } else {
        on
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Initialize structured logging.  Set RUST_LOG=debug for verbose output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Command::Evaluate(args) => run_evaluate(args).await,
        Command::CheckDiff { path } => run_check_diff(path),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("privgate error: {}", e);
            ExitCode::FAILURE
        }
    }
}

// ── Commands ──────────────────────────────────────────────────────────────────

async fn run_evaluate(args: EvaluateArgs) -> PrivgateResult<ExitCode> {
    let config = args.gate_config()?;
    info!(?config, "gate configuration resolved");

    let pr = SnapshotPullRequest::from_file(&args.pr)?;
    let registry = FileRequesterRegistry::new(&args.registry);

    let report = Gate::new(config).evaluate(&pr, &registry).await?;

    // With --json, stdout carries only the report.
    let signals = output::signal_lines(&report);
    match &args.output_file {
        Some(path) => output::append_signals(path, &signals)?,
        None if args.json => {
            for line in &signals {
                eprintln!("{line}");
            }
        }
        None => {
            for line in &signals {
                println!("{line}");
            }
        }
    }

    if args.json {
        let json = serde_json::to_string_pretty(&report).map_err(|e| PrivgateError::ConfigError {
            reason: format!("failed to serialize evaluation report: {}", e),
        })?;
        println!("{json}");
    } else {
        print_summary(&report);
    }

    Ok(ExitCode::SUCCESS)
}

fn run_check_diff(path: PathBuf) -> PrivgateResult<ExitCode> {
    let diff = std::fs::read_to_string(&path).map_err(|e| PrivgateError::SourceError {
        reason: format!("failed to read diff '{}': {}", path.display(), e),
    })?;

    match check_diff_only_removals(&diff) {
        CheckVerdict::Passed => {
            println!("diff contains only removals");
            Ok(ExitCode::SUCCESS)
        }
        CheckVerdict::Failed { reason } => {
            println!("{reason}");
            Ok(ExitCode::from(2))
        }
    }
}

// ── Summary ───────────────────────────────────────────────────────────────────

fn print_summary(report: &EvaluationReport) {
    match &report.decision {
        Decision::Approved => {
            println!("APPROVED  pull request by '{}'", report.author);
        }
        Decision::Denied { stage, reason } => {
            println!("DENIED    {} check failed: {}", stage, reason);
        }
        Decision::NotApplicable { reason } => {
            println!("SKIPPED   {}", reason);
        }
    }
}
