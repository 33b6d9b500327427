use crate::error::{ChangelogError, Result};
use crate::git::{format_decoration, GitLogOptions, RawCommit, Repository};
use std::collections::HashMap;

/// Mock repository for testing without actual git operations
///
/// Commits are kept newest first, in the order `read_log` returns them.
pub struct MockRepository {
    commits: Vec<RawCommit>,
    tags: HashMap<String, String>,
}

impl MockRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        MockRepository {
            commits: Vec::new(),
            tags: HashMap::new(),
        }
    }

    /// Add a commit older than every commit added so far
    pub fn push_commit(&mut self, hash: impl Into<String>, message: impl Into<String>) {
        self.push_raw(RawCommit {
            hash: hash.into(),
            message: message.into(),
            committer_date: None,
            git_tags: None,
        });
    }

    /// Add a fully specified commit, older than every commit so far
    pub fn push_raw(&mut self, commit: RawCommit) {
        self.commits.push(commit);
    }

    /// Tag a commit and refresh its decoration
    pub fn add_tag(&mut self, name: impl Into<String>, hash: &str) {
        let name = name.into();
        self.tags.insert(name.clone(), hash.to_string());

        if let Some(commit) = self.commits.iter_mut().find(|c| c.hash == hash) {
            let mut refs: Vec<String> = commit
                .git_tags
                .as_deref()
                .map(|d| {
                    d.trim()
                        .trim_start_matches('(')
                        .trim_end_matches(')')
                        .split(", ")
                        .filter(|s| !s.is_empty())
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default();
            refs.push(format!("tag: {}", name));
            commit.git_tags = format_decoration(&refs);
        }
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl Repository for MockRepository {
    fn resolve_revision(&self, revision: &str) -> Result<String> {
        if let Some(hash) = self.tags.get(revision) {
            return Ok(hash.clone());
        }

        if revision == "HEAD" {
            if let Some(first) = self.commits.first() {
                return Ok(first.hash.clone());
            }
        }

        self.commits
            .iter()
            .find(|c| c.hash.starts_with(revision))
            .map(|c| c.hash.clone())
            .ok_or_else(|| ChangelogError::revision(format!("Cannot resolve '{}'", revision)))
    }

    fn read_log(&self, from: Option<&str>, options: &GitLogOptions) -> Result<Vec<RawCommit>> {
        let to = self.resolve_revision(&options.to)?;
        let stop = from.map(|rev| self.resolve_revision(rev)).transpose()?;

        // linear history: skip everything newer than `to`, stop at `from`
        Ok(self
            .commits
            .iter()
            .skip_while(|c| c.hash != to)
            .take_while(|c| Some(&c.hash) != stop.as_ref())
            .cloned()
            .collect())
    }
}
