//! Removal-only diff check.
//!
//! Textual, not semantic: hunks are not parsed and line numbers are not
//! reconciled. A `+`-prefixed line anywhere in the text is an addition,
//! except the `+++` destination-file header.

use tracing::warn;

use privgate_contracts::evaluation::CheckVerdict;

const FILE_HEADER: &str = "+++";

/// Pass only if `diff` adds no content lines.
pub fn check_diff_only_removals(diff: &str) -> CheckVerdict {
    for (idx, line) in diff.lines().enumerate() {
        if line.starts_with(FILE_HEADER) {
            continue;
        }
        if line.starts_with('+') {
            let line_no = idx + 1;
            warn!(line = line_no, "diff adds content");
            return CheckVerdict::failed(format!("diff line {line_no} adds content: {line}"));
        }
    }
    CheckVerdict::Passed
}
