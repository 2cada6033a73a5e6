//! Shared fixtures: a throwaway git repository and a small Java project.

#![allow(dead_code)]

use std::fs;
use std::path::Path;
use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use git2::{Commit, Repository, Signature, Time};
use ripple_analysis::source_model::JavaSourceModel;
use ripple_core::config::AnalysisConfig;
use ripple_inspect::{CommitAnalyzer, GitHistory};
use tempfile::TempDir;

pub const REPOSITORY_PATH: &str = "src/main/java/com/acme/repo/OrderRepository.java";
pub const SERVICE_PATH: &str = "src/main/java/com/acme/service/OrderService.java";
pub const TEST_PATH: &str = "src/test/java/com/acme/service/OrderServiceTest.java";

pub const REPOSITORY_V1: &str = r#"package com.acme.repo;

public class OrderRepository {
    public void persist(Order order) {
        store.put(order.id(), order);
    }
}
"#;

pub const REPOSITORY_V2: &str = r#"package com.acme.repo;

public class OrderRepository {
    public void persist(Order order) {
        store.put(order.id(), order.copy());
    }
}
"#;

pub const SERVICE_V1: &str = r#"package com.acme.service;

import com.acme.repo.OrderRepository;

public class OrderService {
    private final OrderRepository repository = new OrderRepository();

    public void save(Order order) {
        validate(order);
        repository.persist(order);
    }

    void validate(Order order) {
        order.lines().forEach(line -> check(line));
    }

    private void check(Object line) {
    }
}
"#;

pub const SERVICE_V2: &str = r#"package com.acme.service;

import com.acme.repo.OrderRepository;

public class OrderService {
    private final OrderRepository repository = new OrderRepository();

    public void save(Order order) {
        validate(order);
        repository.persist(order.normalized());
    }

    void validate(Order order) {
        order.lines().forEach(line -> check(line));
    }

    private void check(Object line) {
    }
}
"#;

pub const TEST_V1: &str = r#"package com.acme.service;

import org.junit.jupiter.api.Test;

class OrderServiceTest {
    private final OrderService service = new OrderService();

    @Test
    void savesOrder() {
        service.save(new Order());
    }
}
"#;

pub const TEST_V2: &str = r#"package com.acme.service;

import org.junit.jupiter.api.Test;

class OrderServiceTest {
    private final OrderService service = new OrderService();

    @Test
    void savesOrder() {
        service.save(new Order("A-1"));
    }
}
"#;

pub struct TestRepo {
    pub dir: TempDir,
    pub repo: Repository,
}

impl TestRepo {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let repo = Repository::init(dir.path()).unwrap();
        Self { dir, repo }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write `files`, stage them, and commit on HEAD at `when`.
    pub fn commit(&self, message: &str, files: &[(&str, &str)], when: DateTime<Utc>) -> String {
        self.commit_as(message, files, when, when)
    }

    /// Like `commit`, with an author date that differs from the commit date,
    /// as a rebase or cherry-pick leaves it.
    pub fn commit_as(
        &self,
        message: &str,
        files: &[(&str, &str)],
        authored: DateTime<Utc>,
        committed: DateTime<Utc>,
    ) -> String {
        let mut index = self.repo.index().unwrap();
        for (path, content) in files {
            let full = self.path().join(path);
            fs::create_dir_all(full.parent().unwrap()).unwrap();
            fs::write(&full, content).unwrap();
            index.add_path(Path::new(path)).unwrap();
        }
        index.write().unwrap();
        let tree = self.repo.find_tree(index.write_tree().unwrap()).unwrap();

        let author = Signature::new("Dev", "dev@acme.test", &Time::new(authored.timestamp(), 0)).unwrap();
        let committer = Signature::new("Dev", "dev@acme.test", &Time::new(committed.timestamp(), 0)).unwrap();
        let parent = self.repo.head().ok().and_then(|h| h.peel_to_commit().ok());
        let parents: Vec<&Commit<'_>> = parent.iter().collect();
        self.repo
            .commit(Some("HEAD"), &author, &committer, message, &tree, &parents)
            .unwrap()
            .to_string()
    }
}

/// Noon UTC on the given day of January 2024.
pub fn jan(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, day, 12, 0, 0).unwrap()
}

/// Ids of the three fixture commits, oldest first.
pub struct History {
    pub repo: TestRepo,
    pub root: String,
    pub repo_change: String,
    pub service_change: String,
}

/// Root commit on Jan 1, a repository fix on Jan 5, a service change
/// with its test on Jan 10.
pub fn order_history() -> History {
    let repo = TestRepo::new();
    let root = repo.commit(
        "Initial order module",
        &[
            (REPOSITORY_PATH, REPOSITORY_V1),
            (SERVICE_PATH, SERVICE_V1),
            (TEST_PATH, TEST_V1),
            ("README.md", "# orders\n"),
        ],
        jan(1),
    );
    let repo_change = repo.commit(
        "Persist a copy of the order",
        &[(REPOSITORY_PATH, REPOSITORY_V2), ("README.md", "# orders\n\ncopies\n")],
        jan(5),
    );
    let service_change = repo.commit(
        "Normalize orders before saving",
        &[(SERVICE_PATH, SERVICE_V2), (TEST_PATH, TEST_V2)],
        jan(10),
    );
    History {
        repo,
        root,
        repo_change,
        service_change,
    }
}

pub fn analyzer(repo: &TestRepo, config: AnalysisConfig) -> CommitAnalyzer {
    let history = Arc::new(GitHistory::open(repo.path()).unwrap());
    CommitAnalyzer::new(history, Arc::new(JavaSourceModel::new()), config)
}
