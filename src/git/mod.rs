//! Git history access
//!
//! This module provides a trait-based abstraction over reading the commit
//! log, allowing for a real `git2` backed implementation and a mock
//! implementation for testing.
//!
//! - [repository::Git2Repository]: reads a repository on disk with `git2`
//! - [mock::MockRepository]: in-memory history for tests
//!
//! Pipeline code depends on the [Repository] trait only.
//!
//! ```rust
//! # use phabricator_changelog::git::{GitLogOptions, Repository};
//! # fn example<R: Repository>(repo: &R) -> Result<(), Box<dyn std::error::Error>> {
//! let commits = repo.read_log(Some("v1.0.0"), &GitLogOptions::default())?;
//! for commit in commits {
//!     println!("{} {:?}", commit.hash, commit.git_tags);
//! }
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::config::GitConfig;
use crate::error::Result;

/// One history entry as read from the repository, before parsing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawCommit {
    /// Full commit hash
    pub hash: String,
    /// Full commit message
    pub message: String,
    /// Committer timestamp in `git log --format=%ci` form
    pub committer_date: Option<String>,
    /// Ref decoration in `git log --format=%d` form, e.g. ` (HEAD -> main, tag: v1.0.0)`
    pub git_tags: Option<String>,
}

/// Extra options for the history walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitLogOptions {
    /// Revision the walk starts from (newest commit)
    pub to: String,
    /// Skip commits with more than one parent
    pub no_merges: bool,
}

impl Default for GitLogOptions {
    fn default() -> Self {
        GitLogOptions {
            to: "HEAD".to_string(),
            no_merges: false,
        }
    }
}

impl From<&GitConfig> for GitLogOptions {
    fn from(config: &GitConfig) -> Self {
        GitLogOptions {
            to: config.to.clone(),
            no_merges: config.no_merges,
        }
    }
}

/// Read access to a commit history
pub trait Repository {
    /// Resolve a revision (tag, branch, hash) to a full commit hash.
    ///
    /// # Returns
    /// * `Ok(String)` - Full hash of the commit the revision points at
    /// * `Err` - If the revision does not name a commit
    fn resolve_revision(&self, revision: &str) -> Result<String>;

    /// Read the commit log, newest first.
    ///
    /// Walks from `options.to` back through history. When `from` is given,
    /// the walk stops before that revision and its ancestors (exclusive);
    /// without it the whole history is returned.
    ///
    /// # Returns
    /// * `Ok(Vec<RawCommit>)` - History entries, newest first
    /// * `Err` - If a revision cannot be resolved or the walk fails
    fn read_log(&self, from: Option<&str>, options: &GitLogOptions) -> Result<Vec<RawCommit>>;
}

/// Render a list of ref names the way `git log --format=%d` does.
pub fn format_decoration(refs: &[String]) -> Option<String> {
    if refs.is_empty() {
        None
    } else {
        Some(format!(" ({})", refs.join(", ")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_decoration() {
        let refs = vec!["HEAD -> main".to_string(), "tag: v1.0.0".to_string()];
        assert_eq!(
            format_decoration(&refs),
            Some(" (HEAD -> main, tag: v1.0.0)".to_string())
        );
    }

    #[test]
    fn test_format_decoration_empty() {
        assert_eq!(format_decoration(&[]), None);
    }

    #[test]
    fn test_git_log_options_from_config() {
        let config = GitConfig {
            to: "develop".to_string(),
            no_merges: true,
        };
        let options = GitLogOptions::from(&config);
        assert_eq!(options.to, "develop");
        assert!(options.no_merges);
    }
}
