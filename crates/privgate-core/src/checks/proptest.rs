//! Property-based tests for the gating checks.
//!
//! These tests use proptest to verify invariants around:
//! - Commit authorship matching under arbitrary letter case
//! - The first foreign or unverified commit deciding the outcome
//! - Label-set comparison ignoring order and duplicates

use std::collections::BTreeSet;

use privgate_contracts::{error::PrivgateError, pull_request::Commit};
use proptest::prelude::*;

use super::{check_commits, check_labels, CommitCheckOptions};

const LENIENT: CommitCheckOptions = CommitCheckOptions {
    require_verification: false,
    fallback_to_author_name: false,
};

const STRICT: CommitCheckOptions = CommitCheckOptions {
    require_verification: true,
    fallback_to_author_name: false,
};

// ============================================================================
// Strategies for generating arbitrary values
// ============================================================================

/// Strategy for account logins: lowercase, starting with a letter.
fn arb_login() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z][a-z0-9-]{0,15}").unwrap()
}

/// Strategy for a login together with a copy of it in arbitrary letter case.
fn arb_login_with_case_variant() -> impl Strategy<Value = (String, String)> {
    (arb_login(), prop::collection::vec(any::<bool>(), 16)).prop_map(|(login, mask)| {
        let variant = login
            .chars()
            .zip(mask.iter().cycle())
            .map(|(c, upper)| if *upper { c.to_ascii_uppercase() } else { c })
            .collect();
        (login, variant)
    })
}

/// Strategy for a forge verification status.
fn arb_verified() -> impl Strategy<Value = Option<bool>> {
    prop_oneof![Just(Some(true)), Just(Some(false)), Just(None)]
}

/// Strategy for a status that does not count as verified.
fn arb_not_verified() -> impl Strategy<Value = Option<bool>> {
    prop_oneof![Just(Some(false)), Just(None)]
}

/// Strategy for label names, drawn from a small alphabet so sets overlap.
fn arb_labels() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(
        prop::string::string_regex("[a-d]{1,2}").unwrap(),
        0..8,
    )
}

/// Commits by `login` with positional shas, one per verification status.
fn commits_by(login: &str, statuses: &[Option<bool>]) -> Vec<Commit> {
    statuses
        .iter()
        .enumerate()
        .map(|(i, verified)| Commit {
            sha: format!("{:07x}", i),
            author_login: Some(login.to_string()),
            author_name: "Display Name".to_string(),
            verified: *verified,
        })
        .collect()
}

fn label_refs(labels: &[String]) -> impl Iterator<Item = &str> {
    labels.iter().map(String::as_str)
}

// ============================================================================
// Property tests: commit authorship
// ============================================================================

proptest! {
    /// Commits whose login matches the requester in any letter case pass.
    #[test]
    fn requester_commits_pass_in_any_case(
        (requester, author) in arb_login_with_case_variant(),
        statuses in prop::collection::vec(arb_verified(), 0..12),
    ) {
        let commits = commits_by(&author, &statuses);
        let outcome = check_commits(&commits, &requester, LENIENT).unwrap();

        prop_assert!(outcome.verdict.is_passed(), "verdict: {:?}", outcome.verdict);
        let expect_all_verified = statuses.iter().all(|v| *v == Some(true));
        prop_assert_eq!(outcome.all_verified, expect_all_verified);
    }

    /// One foreign author anywhere in the list fails the check on that commit.
    #[test]
    fn one_foreign_author_fails(
        requester in arb_login(),
        len in 0usize..10,
        position in any::<prop::sample::Index>(),
    ) {
        let mut commits = commits_by(&requester, &vec![Some(true); len]);
        let at = position.index(len + 1);
        commits.insert(at, Commit {
            sha: "f0re1gn".to_string(),
            author_login: Some(format!("{}-other", requester)),
            author_name: "Someone Else".to_string(),
            verified: Some(true),
        });

        let outcome = check_commits(&commits, &requester, LENIENT).unwrap();
        prop_assert!(!outcome.verdict.is_passed());
        prop_assert!(
            format!("{:?}", outcome.verdict).contains("f0re1gn"),
            "reason should name the foreign commit: {:?}",
            outcome.verdict
        );
    }

    /// Under strict verification, one unverified commit fails the check and
    /// is the only commit reported as unverified.
    #[test]
    fn one_unverified_commit_fails_when_strict(
        requester in arb_login(),
        len in 0usize..10,
        position in any::<prop::sample::Index>(),
        status in arb_not_verified(),
    ) {
        let at = position.index(len + 1);
        let mut statuses = vec![Some(true); len + 1];
        statuses[at] = status;
        let commits = commits_by(&requester, &statuses);

        let outcome = check_commits(&commits, &requester, STRICT).unwrap();
        prop_assert!(!outcome.verdict.is_passed());
        prop_assert!(!outcome.all_verified);
        prop_assert_eq!(outcome.unverified, vec![commits[at].sha.clone()]);
    }

    /// A commit with no linked account is fatal without fallback, wherever it sits.
    #[test]
    fn unlinked_commit_is_fatal_without_fallback(
        requester in arb_login(),
        len in 0usize..10,
        position in any::<prop::sample::Index>(),
    ) {
        let mut commits = commits_by(&requester, &vec![Some(true); len]);
        let at = position.index(len + 1);
        commits.insert(at, Commit {
            sha: "un11nked".to_string(),
            author_login: None,
            author_name: requester.clone(),
            verified: Some(true),
        });

        match check_commits(&commits, &requester, LENIENT) {
            Err(PrivgateError::UnresolvedCommitAuthor { sha }) => prop_assert_eq!(sha, "un11nked"),
            other => prop_assert!(false, "expected UnresolvedCommitAuthor, got {:?}", other),
        }
    }
}

// ============================================================================
// Property tests: label sets
// ============================================================================

proptest! {
    /// Reordering and duplicating the PR's labels never changes the outcome.
    #[test]
    fn labels_ignore_order_and_duplicates(
        (required, shuffled) in arb_labels().prop_flat_map(|labels| {
            let mut doubled = labels.clone();
            doubled.extend(labels.iter().cloned());
            (Just(labels), Just(doubled).prop_shuffle())
        }),
    ) {
        prop_assert!(check_labels(label_refs(&shuffled), label_refs(&required)).is_passed());
    }

    /// The check passes exactly when both sides hold the same set of names.
    #[test]
    fn labels_pass_iff_sets_equal(pr in arb_labels(), required in arb_labels()) {
        let pr_set: BTreeSet<&str> = label_refs(&pr).collect();
        let required_set: BTreeSet<&str> = label_refs(&required).collect();

        let verdict = check_labels(label_refs(&pr), label_refs(&required));
        prop_assert_eq!(verdict.is_passed(), pr_set == required_set);
    }

    /// Swapping the PR labels and the required labels gives the same outcome.
    #[test]
    fn labels_check_is_symmetric(a in arb_labels(), b in arb_labels()) {
        prop_assert_eq!(
            check_labels(label_refs(&a), label_refs(&b)).is_passed(),
            check_labels(label_refs(&b), label_refs(&a)).is_passed()
        );
    }
}
