//! Release grouping and changelog rendering
//!
//! Commits arrive newest first. [Releases] cuts them into release entries
//! at every commit for which `generate_on` holds, and [Renderer] turns each
//! entry into Markdown through the four templates.

pub mod render;
pub mod templates;

pub use render::Renderer;
pub use templates::TemplateSet;

use crate::classifier::{self, CommitField};
use crate::domain::Commit;

/// Heading of the entry holding commits newer than the latest release
pub const UNRELEASED: &str = "Unreleased";

/// How commits are transformed, grouped, ordered and rendered.
#[derive(Debug, Clone)]
pub struct WriterOptions {
    /// Relabels a commit or drops it by returning `None`
    pub transform: fn(Commit) -> Option<Commit>,
    /// Field commits are grouped by
    pub group_by: CommitField,
    /// Fields commits within a group are ordered by
    pub commits_sort: Vec<CommitField>,
    /// Whether a commit opens a new release entry
    pub generate_on: fn(&Commit) -> bool,
    pub templates: TemplateSet,
}

impl WriterOptions {
    /// Writer options with the changelog classification rules.
    pub fn new(templates: TemplateSet) -> Self {
        WriterOptions {
            transform: classifier::classify,
            group_by: CommitField::Type,
            commits_sort: vec![CommitField::Scope, CommitField::Subject],
            generate_on: classifier::generate_on,
            templates,
        }
    }
}

/// One changelog entry
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Release {
    /// Version of the commit that opened the entry, `None` for unreleased commits
    pub version: Option<String>,
    /// Committer date of the commit that opened the entry
    pub date: Option<String>,
    /// Classified commits, newest first
    pub commits: Vec<Commit>,
}

impl Release {
    pub fn title(&self) -> &str {
        self.version.as_deref().unwrap_or(UNRELEASED)
    }
}

#[derive(Debug, Clone)]
struct ReleaseKey {
    version: Option<String>,
    date: Option<String>,
}

/// Iterator over release entries, newest first.
///
/// The first entry collects commits newer than the latest release and is
/// only yielded when it is not empty. A commit dropped by the transform
/// still opens a release when it carries a valid version.
pub struct Releases<I> {
    commits: I,
    transform: fn(Commit) -> Option<Commit>,
    generate_on: fn(&Commit) -> bool,
    key: Option<ReleaseKey>,
    pending: Vec<Commit>,
    done: bool,
}

impl<I: Iterator<Item = Commit>> Releases<I> {
    pub fn new(commits: I, options: &WriterOptions) -> Self {
        Releases {
            commits,
            transform: options.transform,
            generate_on: options.generate_on,
            key: None,
            pending: Vec::new(),
            done: false,
        }
    }

    fn emit(&mut self, next_key: Option<ReleaseKey>) -> Option<Release> {
        let commits = std::mem::take(&mut self.pending);
        let key = std::mem::replace(&mut self.key, next_key);

        match key {
            Some(key) => Some(Release {
                version: key.version,
                date: key.date,
                commits,
            }),
            None if commits.is_empty() => None,
            None => Some(Release {
                version: None,
                date: None,
                commits,
            }),
        }
    }
}

impl<I: Iterator<Item = Commit>> Iterator for Releases<I> {
    type Item = Release;

    fn next(&mut self) -> Option<Release> {
        if self.done {
            return None;
        }

        while let Some(commit) = self.commits.next() {
            let opens_on_raw = (self.generate_on)(&commit);
            let key = ReleaseKey {
                version: commit.version.clone(),
                date: commit.committer_date.clone(),
            };

            let kept = (self.transform)(commit);
            let opens = match kept.as_ref() {
                Some(classified) => (self.generate_on)(classified),
                None => opens_on_raw,
            };

            let emitted = if opens { self.emit(Some(key)) } else { None };

            if let Some(classified) = kept {
                self.pending.push(classified);
            }

            if emitted.is_some() {
                return emitted;
            }
        }

        self.done = true;
        self.emit(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn commit(commit_type: &str, subject: &str, version: Option<&str>) -> Commit {
        Commit {
            r#type: Some(commit_type.to_string()),
            subject: Some(subject.to_string()),
            hash: format!("{:0<40}", subject),
            version: version.map(str::to_string),
            committer_date: version.map(|_| "2020-01-01".to_string()),
            ..Default::default()
        }
    }

    fn releases(commits: Vec<Commit>) -> Vec<Release> {
        let options = WriterOptions::new(TemplateSet::builtin());
        Releases::new(commits.into_iter(), &options).collect()
    }

    fn subjects(release: &Release) -> Vec<&str> {
        release
            .commits
            .iter()
            .map(|c| c.subject.as_deref().unwrap_or_default())
            .collect()
    }

    #[test]
    fn test_unreleased_then_versions() {
        let result = releases(vec![
            commit("feat", "newest", None),
            commit("fix", "second", Some("2.0.0")),
            commit("feat", "third", None),
            commit("feat", "oldest", Some("1.0.0")),
        ]);

        assert_eq!(result.len(), 3);
        assert_eq!(result[0].title(), "Unreleased");
        assert_eq!(subjects(&result[0]), vec!["newest"]);
        assert_eq!(result[1].version.as_deref(), Some("2.0.0"));
        assert_eq!(result[1].date.as_deref(), Some("2020-01-01"));
        assert_eq!(subjects(&result[1]), vec!["second", "third"]);
        assert_eq!(result[2].version.as_deref(), Some("1.0.0"));
        assert_eq!(subjects(&result[2]), vec!["oldest"]);
    }

    #[test]
    fn test_empty_unreleased_block_is_skipped() {
        let result = releases(vec![
            commit("feat", "tagged", Some("1.1.0")),
            commit("fix", "older", None),
        ]);

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].version.as_deref(), Some("1.1.0"));
        assert_eq!(subjects(&result[0]), vec!["tagged", "older"]);
    }

    #[test]
    fn test_dropped_commit_still_opens_release() {
        let result = releases(vec![
            commit("feat", "after", None),
            commit("chore", "release 3.0.0", Some("3.0.0")),
            commit("fix", "before", None),
        ]);

        assert_eq!(result.len(), 2);
        assert_eq!(subjects(&result[0]), vec!["after"]);
        assert_eq!(result[1].version.as_deref(), Some("3.0.0"));
        assert_eq!(subjects(&result[1]), vec!["before"]);
    }

    #[test]
    fn test_invalid_version_does_not_open_release() {
        let result = releases(vec![
            commit("feat", "one", None),
            commit("feat", "two", Some("nightly")),
            commit("feat", "three", Some("2.0.0")),
        ]);

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].version, None);
        assert_eq!(subjects(&result[0]), vec!["one", "two"]);
        assert_eq!(result[1].version.as_deref(), Some("2.0.0"));
    }

    #[test]
    fn test_release_without_kept_commits_is_emitted() {
        let result = releases(vec![commit("docs", "readme", Some("0.1.0"))]);

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].version.as_deref(), Some("0.1.0"));
        assert!(result[0].commits.is_empty());
    }

    #[test]
    fn test_no_commits_no_releases() {
        assert!(releases(Vec::new()).is_empty());
        assert!(releases(vec![commit("chore", "x", None)]).is_empty());
    }
}
