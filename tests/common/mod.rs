// Shared helpers for tests that need a real repository on disk.
#![allow(dead_code)]

use git2::{Oid, Repository, Signature, Time};
use std::path::Path;
use tempfile::TempDir;

/// 2023-11-14 22:13:20 UTC
pub const BASE_TIME: i64 = 1_700_000_000;

const DAY: i64 = 86_400;

/// A throwaway repository whose commits are one day apart, starting at
/// [BASE_TIME].
pub struct TestRepo {
    pub dir: TempDir,
    pub repo: Repository,
    commits: i64,
}

impl TestRepo {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Could not create temp dir");
        let repo = Repository::init(dir.path()).expect("Could not init git repo");

        TestRepo {
            dir,
            repo,
            commits: 0,
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    fn signature(&self) -> Signature<'static> {
        let time = Time::new(BASE_TIME + self.commits * DAY, 0);
        Signature::new("Test User", "test@example.com", &time).expect("Could not create sig")
    }

    /// Commit on top of HEAD (or as the root commit) and advance HEAD.
    pub fn commit(&mut self, message: &str) -> Oid {
        let parents: Vec<Oid> = self
            .repo
            .head()
            .ok()
            .and_then(|head| head.target())
            .into_iter()
            .collect();

        self.commit_with_parents(message, &parents, true)
    }

    /// Commit with explicit parents. HEAD only moves when `update_head` is set.
    pub fn commit_with_parents(&mut self, message: &str, parents: &[Oid], update_head: bool) -> Oid {
        let sig = self.signature();
        self.commits += 1;

        let tree_id = self
            .repo
            .index()
            .expect("Could not get index")
            .write_tree()
            .expect("Could not write tree");
        let tree = self.repo.find_tree(tree_id).expect("Could not find tree");

        let parent_commits: Vec<git2::Commit> = parents
            .iter()
            .map(|oid| self.repo.find_commit(*oid).expect("Could not find parent"))
            .collect();
        let parent_refs: Vec<&git2::Commit> = parent_commits.iter().collect();

        self.repo
            .commit(
                update_head.then_some("HEAD"),
                &sig,
                &sig,
                message,
                &tree,
                &parent_refs,
            )
            .expect("Could not create commit")
    }

    pub fn tag(&self, name: &str, oid: Oid) {
        let object = self.repo.find_object(oid, None).expect("Could not find object");
        self.repo
            .tag_lightweight(name, &object, false)
            .expect("Could not create tag");
    }
}
