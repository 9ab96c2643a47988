//! Label-set equality check.

use std::collections::BTreeSet;

use tracing::warn;

use privgate_contracts::evaluation::CheckVerdict;

/// Pass iff the PR's labels and `required` are equal as sets.
///
/// Duplicates and order are ignored on both sides. Names are compared
/// exactly; no case folding.
pub fn check_labels<'a, P, R>(pr_labels: P, required: R) -> CheckVerdict
where
    P: IntoIterator<Item = &'a str>,
    R: IntoIterator<Item = &'a str>,
{
    let actual: BTreeSet<&str> = pr_labels.into_iter().collect();
    let expected: BTreeSet<&str> = required.into_iter().collect();

    if actual.len() == expected.len() && actual.iter().all(|label| expected.contains(label)) {
        return CheckVerdict::Passed;
    }

    let missing: Vec<&str> = expected.difference(&actual).copied().collect();
    let unexpected: Vec<&str> = actual.difference(&expected).copied().collect();
    warn!(?missing, ?unexpected, "labels do not match required set");

    CheckVerdict::failed(format!(
        "labels do not match required set (missing: [{}], unexpected: [{}])",
        missing.join(", "),
        unexpected.join(", ")
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(pr: &[&str], required: &[&str]) -> CheckVerdict {
        check_labels(pr.iter().copied(), required.iter().copied())
    }

    #[test]
    fn permuted_sets_match() {
        assert!(check(&["a", "b"], &["b", "a"]).is_passed());
    }

    #[test]
    fn missing_label_fails() {
        match check(&["a"], &["a", "b"]) {
            CheckVerdict::Failed { reason } => {
                assert!(reason.contains("missing: [b]"), "unexpected reason: {reason}");
                assert!(reason.contains("unexpected: []"));
            }
            other => panic!("expected Failed, got {:?}", other),
        }
    }

    #[test]
    fn extra_label_fails() {
        match check(&["a", "b", "c"], &["a", "b"]) {
            CheckVerdict::Failed { reason } => assert!(reason.contains("unexpected: [c]")),
            other => panic!("expected Failed, got {:?}", other),
        }
    }

    #[test]
    fn duplicates_are_ignored_on_either_side() {
        assert!(check(&["a", "a", "b"], &["b", "a"]).is_passed());
        assert!(check(&["a", "b"], &["b", "b", "a", "a"]).is_passed());
    }

    #[test]
    fn comparison_is_case_sensitive() {
        assert!(!check(&["Dependencies"], &["dependencies"]).is_passed());
    }

    #[test]
    fn both_empty_match() {
        assert!(check(&[], &[]).is_passed());
    }

    #[test]
    fn result_is_symmetric() {
        let cases: [(&[&str], &[&str]); 4] = [
            (&["a"], &["a", "b"]),
            (&["x", "y"], &["y", "x"]),
            (&["x"], &["y"]),
            (&[], &["z"]),
        ];
        for (left, right) in cases {
            assert_eq!(
                check(left, right).is_passed(),
                check(right, left).is_passed(),
                "asymmetric result for {:?} vs {:?}",
                left,
                right
            );
        }
    }
}
