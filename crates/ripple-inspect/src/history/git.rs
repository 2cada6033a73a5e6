//! GitHistory — RevisionHistory over a git repository (libgit2).

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use git2::{Delta, DiffOptions, ErrorCode, Oid, Patch, Repository, Sort};
use ripple_core::errors::HistoryError;
use tracing::debug;

use super::traits::RevisionHistory;
use super::types::{AuthorInfo, ChangeKind, CommitFilter, CommitMeta, DiffHunk, FileDiff};

/// A git repository on disk. `git2::Repository` is not `Sync`, so every
/// operation opens its own handle; worker threads never share one.
#[derive(Debug, Clone)]
pub struct GitHistory {
    git_dir: PathBuf,
}

impl GitHistory {
    /// Discover the repository containing `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, HistoryError> {
        let path = path.as_ref();
        let repo = Repository::discover(path).map_err(|e| HistoryError::RepositoryOpen {
            path: path.display().to_string(),
            message: e.message().to_string(),
        })?;
        Ok(Self {
            git_dir: repo.path().to_path_buf(),
        })
    }

    pub fn git_dir(&self) -> &Path {
        &self.git_dir
    }

    fn repo(&self) -> Result<Repository, HistoryError> {
        Repository::open(&self.git_dir).map_err(|e| HistoryError::RepositoryOpen {
            path: self.git_dir.display().to_string(),
            message: e.message().to_string(),
        })
    }
}

impl RevisionHistory for GitHistory {
    fn resolve_ref(&self, name: &str) -> Result<String, HistoryError> {
        let repo = self.repo()?;
        let unresolved = |e: git2::Error| HistoryError::UnresolvedRef {
            name: name.to_string(),
            message: e.message().to_string(),
        };
        let commit = repo
            .revparse_single(name)
            .and_then(|object| object.peel_to_commit())
            .map_err(unresolved)?;
        Ok(commit.id().to_string())
    }

    fn list_commits(&self, head: &str, filter: &CommitFilter) -> Result<Vec<CommitMeta>, HistoryError> {
        let repo = self.repo()?;
        let walk_error = |e: git2::Error| HistoryError::Walk {
            message: e.message().to_string(),
        };

        let mut walk = repo.revwalk().map_err(walk_error)?;
        walk.set_sorting(Sort::TIME).map_err(walk_error)?;
        walk.push(parse_oid(head)?).map_err(walk_error)?;

        let mut selected = Vec::new();
        for oid in walk {
            let oid = oid.map_err(walk_error)?;
            let commit = repo.find_commit(oid).map_err(walk_error)?;
            let meta = commit_meta(&commit);
            if filter.stops_at(selected.len(), &meta.committed_at) {
                break;
            }
            selected.push(meta);
        }

        debug!(head, selected = selected.len(), "listed commits");
        Ok(selected)
    }

    fn commit(&self, id: &str) -> Result<CommitMeta, HistoryError> {
        let repo = self.repo()?;
        let commit = repo
            .find_commit(parse_oid(id)?)
            .map_err(|_| HistoryError::CommitNotFound { id: id.to_string() })?;
        Ok(commit_meta(&commit))
    }

    fn diff(
        &self,
        from: &str,
        to: &str,
        accept: &dyn Fn(&str) -> bool,
    ) -> Result<Vec<FileDiff>, HistoryError> {
        let repo = self.repo()?;
        let diff_error = |e: git2::Error| HistoryError::Diff {
            from: from.to_string(),
            to: to.to_string(),
            message: e.message().to_string(),
        };

        let old_tree = find_tree(&repo, from)?;
        let new_tree = find_tree(&repo, to)?;
        let mut options = DiffOptions::new();
        options.context_lines(0);
        let mut diff = repo
            .diff_tree_to_tree(Some(&old_tree), Some(&new_tree), Some(&mut options))
            .map_err(diff_error)?;
        diff.find_similar(None).map_err(diff_error)?;

        let mut files = Vec::new();
        for idx in 0..diff.deltas().count() {
            let Some(delta) = diff.get_delta(idx) else {
                continue;
            };
            let kind = match delta.status() {
                Delta::Added => ChangeKind::Added,
                Delta::Modified => ChangeKind::Modified,
                Delta::Renamed => ChangeKind::Renamed,
                _ => continue,
            };
            let Some(path) = delta.new_file().path().and_then(path_string) else {
                continue;
            };
            if !accept(&path) {
                continue;
            }
            let old_path = match kind {
                ChangeKind::Renamed => delta.old_file().path().and_then(path_string),
                _ => None,
            };

            let mut hunks = Vec::new();
            if let Some(patch) = Patch::from_diff(&diff, idx).map_err(diff_error)? {
                for hunk_idx in 0..patch.num_hunks() {
                    let (hunk, _) = patch.hunk(hunk_idx).map_err(diff_error)?;
                    hunks.push(DiffHunk {
                        old_start: hunk.old_start(),
                        old_len: hunk.old_lines(),
                        new_start: hunk.new_start(),
                        new_len: hunk.new_lines(),
                    });
                }
            }

            files.push(FileDiff {
                path,
                old_path,
                kind,
                hunks,
            });
        }
        Ok(files)
    }

    fn read_file(&self, revision: &str, path: &str) -> Result<Option<Vec<u8>>, HistoryError> {
        let repo = self.repo()?;
        let read_error = |e: git2::Error| HistoryError::ReadFile {
            revision: revision.to_string(),
            path: path.to_string(),
            message: e.message().to_string(),
        };

        let tree = find_tree(&repo, revision)?;
        let entry = match tree.get_path(Path::new(path)) {
            Ok(entry) => entry,
            Err(e) if e.code() == ErrorCode::NotFound => return Ok(None),
            Err(e) => return Err(read_error(e)),
        };
        let object = entry.to_object(&repo).map_err(read_error)?;
        Ok(object.as_blob().map(|blob| blob.content().to_vec()))
    }
}

fn parse_oid(id: &str) -> Result<Oid, HistoryError> {
    Oid::from_str(id).map_err(|_| HistoryError::CommitNotFound { id: id.to_string() })
}

fn find_tree<'r>(repo: &'r Repository, id: &str) -> Result<git2::Tree<'r>, HistoryError> {
    repo.find_commit(parse_oid(id)?)
        .and_then(|commit| commit.tree())
        .map_err(|_| HistoryError::CommitNotFound { id: id.to_string() })
}

fn path_string(path: &Path) -> Option<String> {
    path.to_str().map(|p| p.replace('\\', "/"))
}

fn commit_meta(commit: &git2::Commit<'_>) -> CommitMeta {
    let author = commit.author();
    CommitMeta {
        id: commit.id().to_string(),
        parents: commit.parent_ids().map(|p| p.to_string()).collect(),
        message: commit.message().unwrap_or_default().trim_end().to_string(),
        author: AuthorInfo {
            name: author.name().unwrap_or_default().to_string(),
            email: author.email().unwrap_or_default().to_string(),
        },
        timestamp: utc(author.when()),
        committed_at: utc(commit.time()),
    }
}

fn utc(time: git2::Time) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(time.seconds(), 0).unwrap_or_default()
}
