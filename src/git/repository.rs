use crate::error::{ChangelogError, Result};
use crate::git::{format_decoration, GitLogOptions, RawCommit};
use chrono::{DateTime, FixedOffset};
use git2::{Oid, Repository as Git2Repo, Sort};
use std::collections::HashMap;
use std::path::Path;

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;

        Ok(Git2Repository { repo })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository { repo }
    }

    fn resolve_oid(&self, revision: &str) -> Result<Oid> {
        self.repo
            .revparse_single(revision)
            .and_then(|object| object.peel_to_commit())
            .map(|commit| commit.id())
            .map_err(|e| {
                ChangelogError::revision(format!("Cannot resolve '{}': {}", revision, e))
            })
    }

    /// Collect ref names per commit, labeled like `git log --format=%d`.
    ///
    /// HEAD comes first (`HEAD -> branch` when attached), then tags as
    /// `tag: name`, then local and remote branches. Tags pointing at
    /// non-commit objects are skipped.
    fn decorations(&self) -> Result<HashMap<Oid, Vec<String>>> {
        let mut decorations: HashMap<Oid, Vec<String>> = HashMap::new();

        let head = self.repo.head().ok();
        let head_branch = head
            .as_ref()
            .filter(|h| h.is_branch())
            .and_then(|h| h.shorthand().map(str::to_string));

        if let Some(head) = head.as_ref() {
            if let Ok(commit) = head.peel_to_commit() {
                let label = match &head_branch {
                    Some(branch) => format!("HEAD -> {}", branch),
                    None => "HEAD".to_string(),
                };
                decorations.entry(commit.id()).or_default().push(label);
            }
        }

        let mut tags = Vec::new();
        let mut branches = Vec::new();

        for reference in self.repo.references()? {
            let reference = reference?;
            let (Some(name), Some(short)) = (reference.name(), reference.shorthand()) else {
                continue;
            };

            let Ok(commit) = reference.peel_to_commit() else {
                continue;
            };

            if name.starts_with("refs/tags/") {
                tags.push((commit.id(), format!("tag: {}", short)));
            } else if name.starts_with("refs/heads/") {
                if head_branch.as_deref() != Some(short) {
                    branches.push((commit.id(), short.to_string()));
                }
            } else if name.starts_with("refs/remotes/") {
                branches.push((commit.id(), short.to_string()));
            }
        }

        for (oid, label) in tags.into_iter().chain(branches) {
            decorations.entry(oid).or_default().push(label);
        }

        Ok(decorations)
    }
}

impl super::Repository for Git2Repository {
    fn resolve_revision(&self, revision: &str) -> Result<String> {
        self.resolve_oid(revision).map(|oid| oid.to_string())
    }

    fn read_log(&self, from: Option<&str>, options: &GitLogOptions) -> Result<Vec<RawCommit>> {
        let to_oid = self.resolve_oid(&options.to)?;

        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::TIME)?;
        revwalk.push(to_oid)?;

        if let Some(from) = from {
            let from_oid = self.resolve_oid(from)?;
            revwalk.hide(from_oid)?;
        }

        let decorations = self.decorations()?;
        let mut commits = Vec::new();

        for oid_result in revwalk {
            let oid = oid_result?;
            let commit = self.repo.find_commit(oid)?;

            if options.no_merges && commit.parent_count() > 1 {
                continue;
            }

            commits.push(RawCommit {
                hash: oid.to_string(),
                message: String::from_utf8_lossy(commit.message_bytes()).into_owned(),
                committer_date: format_git_time(commit.committer().when()),
                git_tags: decorations
                    .get(&oid)
                    .and_then(|refs| format_decoration(refs)),
            });
        }

        log::debug!(
            "read {} commits from {} (from: {:?})",
            commits.len(),
            options.to,
            from
        );

        Ok(commits)
    }
}

/// Format a git timestamp as `YYYY-MM-DD HH:MM:SS +ZZZZ` in its own offset.
pub fn format_git_time(time: git2::Time) -> Option<String> {
    let offset = FixedOffset::east_opt(time.offset_minutes() * 60)?;
    let utc = DateTime::from_timestamp(time.seconds(), 0)?;

    Some(
        utc.with_timezone(&offset)
            .format("%Y-%m-%d %H:%M:%S %z")
            .to_string(),
    )
}
