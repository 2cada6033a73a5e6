//! Commit metadata and diff types.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorInfo {
    pub name: String,
    pub email: String,
}

/// One commit as listed from a branch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitMeta {
    /// Full hex id.
    pub id: String,
    /// Parent ids, first parent first.
    pub parents: Vec<String>,
    pub message: String,
    pub author: AuthorInfo,
    /// Author time; what reports show.
    pub timestamp: DateTime<Utc>,
    /// Committer time; what history walks order by and date filters cut on.
    pub committed_at: DateTime<Utc>,
}

impl CommitMeta {
    pub fn first_parent(&self) -> Option<&str> {
        self.parents.first().map(String::as_str)
    }
}

/// Which commits of a branch to take, newest first. Collection stops at
/// whichever limit is reached first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CommitFilter {
    pub max_count: Option<usize>,
    /// Commits committed before this day (UTC) end the walk. The cut uses
    /// committer time, the key the walk is sorted by, so a rebased commit
    /// with an old author date does not end it early.
    pub since: Option<NaiveDate>,
}

impl CommitFilter {
    pub fn new(max_count: Option<usize>, since: Option<NaiveDate>) -> Self {
        Self { max_count, since }
    }

    /// Whether a history walk that already selected `selected` commits
    /// should stop before taking one committed at `committed_at`.
    pub fn stops_at(&self, selected: usize, committed_at: &DateTime<Utc>) -> bool {
        if self.max_count.is_some_and(|max| selected >= max) {
            return true;
        }
        self.since
            .is_some_and(|since| committed_at.date_naive() < since)
    }

    /// Apply the filter to commits already ordered newest first.
    pub fn select(&self, commits: impl IntoIterator<Item = CommitMeta>) -> Vec<CommitMeta> {
        let mut selected = Vec::new();
        for commit in commits {
            if self.stops_at(selected.len(), &commit.committed_at) {
                break;
            }
            selected.push(commit);
        }
        selected
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChangeKind {
    Added,
    Modified,
    Renamed,
}

/// One hunk in unified-diff terms; lines are 1-based, lengths may be 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffHunk {
    pub old_start: u32,
    pub old_len: u32,
    pub new_start: u32,
    pub new_len: u32,
}

/// A file that exists on the new side of a diff. Deleted files are not
/// reported: nothing at the revision can be impacted through them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDiff {
    /// Path at the new revision.
    pub path: String,
    pub old_path: Option<String>,
    pub kind: ChangeKind,
    pub hunks: Vec<DiffHunk>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn commit(id: &str, day: u32) -> CommitMeta {
        let at = Utc.with_ymd_and_hms(2024, 3, day, 12, 0, 0).unwrap();
        CommitMeta {
            id: id.to_string(),
            parents: Vec::new(),
            message: String::new(),
            author: AuthorInfo::default(),
            timestamp: at,
            committed_at: at,
        }
    }

    fn ids(commits: &[CommitMeta]) -> Vec<&str> {
        commits.iter().map(|c| c.id.as_str()).collect()
    }

    #[test]
    fn count_limit_stops_first() {
        let filter = CommitFilter::new(Some(2), NaiveDate::from_ymd_opt(2024, 3, 1));
        let picked = filter.select(vec![commit("c", 9), commit("b", 8), commit("a", 7)]);
        assert_eq!(ids(&picked), ["c", "b"]);
    }

    #[test]
    fn since_limit_stops_first() {
        let filter = CommitFilter::new(Some(10), NaiveDate::from_ymd_opt(2024, 3, 8));
        let picked = filter.select(vec![commit("c", 9), commit("b", 8), commit("a", 7), commit("z", 9)]);
        assert_eq!(ids(&picked), ["c", "b"]);
    }

    #[test]
    fn since_cuts_on_commit_date_not_author_date() {
        let mut rebased = commit("b", 8);
        rebased.timestamp = Utc.with_ymd_and_hms(2024, 2, 1, 12, 0, 0).unwrap();
        let filter = CommitFilter::new(None, NaiveDate::from_ymd_opt(2024, 3, 5));
        let picked = filter.select(vec![commit("c", 9), rebased, commit("a", 1)]);
        assert_eq!(ids(&picked), ["c", "b"]);
    }

    #[test]
    fn no_limits_takes_everything() {
        let picked = CommitFilter::default().select(vec![commit("b", 2), commit("a", 1)]);
        assert_eq!(picked.len(), 2);
    }
}
