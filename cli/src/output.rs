//! Output signals published after a run.
//!
//! Signals are `key=value` lines. When an output file is configured (as CI
//! runners do through `GITHUB_OUTPUT`) they are appended to it; otherwise
//! they go to stdout, or to stderr when stdout carries the JSON report.

use std::{fs::OpenOptions, io::Write, path::Path};

use privgate_contracts::{
    error::{PrivgateError, PrivgateResult},
    evaluation::EvaluationReport,
};

/// Build the signal lines for `report`.
///
/// `commits_verified` is emitted only when the commit check ran.
pub fn signal_lines(report: &EvaluationReport) -> Vec<String> {
    let mut lines = vec![format!("approved={}", report.decision.is_approved())];
    if let Some(verified) = report.commits_verified {
        lines.push(format!("commits_verified={verified}"));
    }
    lines
}

/// Append `lines` to the file at `path`, creating it if needed.
pub fn append_signals(path: &Path, lines: &[String]) -> PrivgateResult<()> {
    let write_err = |e: std::io::Error| PrivgateError::ConfigError {
        reason: format!("failed to write output signals to '{}': {}", path.display(), e),
    };

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(write_err)?;
    for line in lines {
        writeln!(file, "{line}").map_err(write_err)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use privgate_contracts::evaluation::{CheckStage, Decision, RunId};

    use super::*;

    fn report(decision: Decision, commits_verified: Option<bool>) -> EvaluationReport {
        EvaluationReport {
            run_id: RunId::new(),
            author: "octocat".to_string(),
            requester: Some("octocat".to_string()),
            decision,
            stages: vec![],
            commits_verified,
            unverified_commits: vec![],
            evaluated_at: Default::default(),
        }
    }

    #[test]
    fn signals_include_commits_verified_when_commit_check_ran() {
        let lines = signal_lines(&report(Decision::Approved, Some(false)));
        assert_eq!(lines, vec!["approved=true", "commits_verified=false"]);
    }

    #[test]
    fn signals_omit_commits_verified_when_commit_check_skipped() {
        let denied = Decision::Denied {
            stage: CheckStage::Diff,
            reason: "adds content".to_string(),
        };
        let lines = signal_lines(&report(denied, None));
        assert_eq!(lines, vec!["approved=false"]);
    }

    #[test]
    fn signals_append_to_existing_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), "previous=1\n").unwrap();

        append_signals(file.path(), &["approved=true".to_string()]).unwrap();

        let contents = std::fs::read_to_string(file.path()).unwrap();
        assert_eq!(contents, "previous=1\napproved=true\n");
    }
}
