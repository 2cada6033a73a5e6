//! GitHistory over a real repository built in a temp dir.

mod common;

use chrono::NaiveDate;
use common::*;
use ripple_core::errors::HistoryError;
use ripple_inspect::history::{ChangeKind, CommitFilter, DiffHunk, GitHistory, RevisionHistory};

/// HEAD resolves to the newest commit; unknown names fail as unresolved.
#[test]
fn test_resolve_ref() {
    let h = order_history();
    let git = GitHistory::open(h.repo.path()).unwrap();
    assert_eq!(git.resolve_ref("HEAD").unwrap(), h.service_change);
    assert_eq!(git.resolve_ref("HEAD~2").unwrap(), h.root);

    let err = git.resolve_ref("no-such-branch").unwrap_err();
    assert!(matches!(err, HistoryError::UnresolvedRef { name, .. } if name == "no-such-branch"));
}

/// Opening a plain directory fails cleanly.
#[test]
fn test_open_outside_repository() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        GitHistory::open(dir.path()),
        Err(HistoryError::RepositoryOpen { .. })
    ));
}

/// Commits come newest first, with metadata and parents.
#[test]
fn test_list_commits_metadata() {
    let h = order_history();
    let git = GitHistory::open(h.repo.path()).unwrap();
    let commits = git
        .list_commits(&h.service_change, &CommitFilter::new(Some(10), None))
        .unwrap();

    let ids: Vec<&str> = commits.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, [h.service_change.as_str(), h.repo_change.as_str(), h.root.as_str()]);
    assert_eq!(commits[0].message, "Normalize orders before saving");
    assert_eq!(commits[0].author.email, "dev@acme.test");
    assert_eq!(commits[0].timestamp, jan(10));
    assert_eq!(commits[0].first_parent(), Some(h.repo_change.as_str()));
    assert!(commits[2].parents.is_empty());
}

/// Count and date limits each cut the walk.
#[test]
fn test_list_commits_limits() {
    let h = order_history();
    let git = GitHistory::open(h.repo.path()).unwrap();

    let by_count = git
        .list_commits(&h.service_change, &CommitFilter::new(Some(1), None))
        .unwrap();
    assert_eq!(by_count.len(), 1);

    let by_date = git
        .list_commits(&h.service_change, &CommitFilter::new(None, NaiveDate::from_ymd_opt(2024, 1, 5)))
        .unwrap();
    assert_eq!(by_date.len(), 2);
}

/// A rebased commit keeps its old author date; the since-date cut follows
/// the commit date the walk is ordered by, so it is still selected.
#[test]
fn test_since_uses_commit_date_after_rebase() {
    let repo = TestRepo::new();
    repo.commit("Initial order module", &[(REPOSITORY_PATH, REPOSITORY_V1)], jan(1));
    let rebased = repo.commit_as(
        "Persist a copy of the order",
        &[(REPOSITORY_PATH, REPOSITORY_V2)],
        jan(2),
        jan(20),
    );
    let head = repo.commit("Add readme", &[("README.md", "# orders\n")], jan(21));

    let git = GitHistory::open(repo.path()).unwrap();
    let commits = git
        .list_commits(&head, &CommitFilter::new(None, NaiveDate::from_ymd_opt(2024, 1, 15)))
        .unwrap();

    let ids: Vec<&str> = commits.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, [head.as_str(), rebased.as_str()]);
    assert_eq!(commits[1].timestamp, jan(2));
    assert_eq!(commits[1].committed_at, jan(20));
}

/// Zero-context hunks on the new side, filtered by path.
#[test]
fn test_diff_hunks_and_filter() {
    let h = order_history();
    let git = GitHistory::open(h.repo.path()).unwrap();

    let all = git.diff(&h.root, &h.repo_change, &|_: &str| true).unwrap();
    assert_eq!(all.len(), 2);

    let java = git
        .diff(&h.root, &h.repo_change, &|p: &str| p.ends_with(".java"))
        .unwrap();
    assert_eq!(java.len(), 1);
    assert_eq!(java[0].path, REPOSITORY_PATH);
    assert_eq!(java[0].kind, ChangeKind::Modified);
    assert_eq!(
        java[0].hunks,
        vec![DiffHunk {
            old_start: 5,
            old_len: 1,
            new_start: 5,
            new_len: 1,
        }]
    );
}

/// Added files show up whole.
#[test]
fn test_diff_added_file() {
    let repo = TestRepo::new();
    let first = repo.commit("init", &[("README.md", "x\n")], jan(1));
    let second = repo.commit("add", &[(REPOSITORY_PATH, REPOSITORY_V1)], jan(2));
    let git = GitHistory::open(repo.path()).unwrap();

    let diff = git.diff(&first, &second, &|_: &str| true).unwrap();
    assert_eq!(diff.len(), 1);
    assert_eq!(diff[0].kind, ChangeKind::Added);
    assert_eq!(diff[0].hunks[0].new_start, 1);
    assert_eq!(diff[0].hunks[0].new_len, 7);
}

/// Files are read as of a revision; absent paths are `None`.
#[test]
fn test_read_file_at_revision() {
    let h = order_history();
    let git = GitHistory::open(h.repo.path()).unwrap();

    let old = git.read_file(&h.root, REPOSITORY_PATH).unwrap().unwrap();
    let new = git.read_file(&h.repo_change, REPOSITORY_PATH).unwrap().unwrap();
    assert_eq!(old, REPOSITORY_V1.as_bytes());
    assert_eq!(new, REPOSITORY_V2.as_bytes());
    assert_eq!(git.read_file(&h.root, "src/Missing.java").unwrap(), None);
}

/// Unknown ids are reported, not panicked on.
#[test]
fn test_unknown_commit() {
    let h = order_history();
    let git = GitHistory::open(h.repo.path()).unwrap();
    assert!(matches!(
        git.commit("0000000000000000000000000000000000000001"),
        Err(HistoryError::CommitNotFound { .. })
    ));
    assert!(matches!(git.commit("not-hex"), Err(HistoryError::CommitNotFound { .. })));
}
