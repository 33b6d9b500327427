//! Commit classification and ordering rules.
//!
//! [classify] decides which commits reach the changelog and how they are
//! labeled; the comparators and [generate_on] decide how they are grouped
//! and ordered.

use std::cmp::Ordering;

use crate::domain::{Commit, Note};
use crate::parser::BREAKING_CHANGE;

/// Title breaking-change notes are rendered under
pub const BREAKING_CHANGES: &str = "BREAKING CHANGES";

/// Characters of the hash kept for display
pub const HASH_LENGTH: usize = 7;

/// Maximum characters of a subject
pub const SUBJECT_LENGTH: usize = 80;

/// Section heading for a commit type, `None` for types left out of the changelog.
pub fn section_title(commit_type: &str) -> Option<&'static str> {
    match commit_type {
        "feat" => Some("Features"),
        "fix" => Some("Bug Fixes"),
        "perf" => Some("Performance Improvements"),
        "revert" => Some("Reverts"),
        _ => None,
    }
}

/// Relabel a commit for rendering, or drop it.
///
/// Returns `None` when the type has no section. Kept commits get their
/// section title as type, a 7 character hash, a subject of at most 80
/// characters and `BREAKING CHANGES` as title of breaking-change notes.
pub fn classify(mut commit: Commit) -> Option<Commit> {
    let title = commit.r#type.as_deref().and_then(section_title)?;
    commit.r#type = Some(title.to_string());

    commit.hash = truncate_chars(&commit.hash, HASH_LENGTH);

    if let Some(subject) = commit.subject.as_deref() {
        commit.subject = Some(truncate_chars(subject, SUBJECT_LENGTH));
    }

    for note in commit.notes.iter_mut() {
        if note.title == BREAKING_CHANGE {
            note.title = BREAKING_CHANGES.to_string();
        }
    }

    Some(commit)
}

/// True when the commit opens a new release entry: its version is a valid
/// semantic version.
pub fn generate_on(commit: &Commit) -> bool {
    commit.version.as_deref().and_then(valid_version).is_some()
}

/// Parse a version the way release tags are written: surrounding
/// whitespace and one leading `v` or `=` are ignored.
pub fn valid_version(version: &str) -> Option<semver::Version> {
    let trimmed = version.trim();
    let bare = trimmed
        .strip_prefix('v')
        .or_else(|| trimmed.strip_prefix('='))
        .unwrap_or(trimmed);

    semver::Version::parse(bare).ok()
}

fn truncate_chars(value: &str, max: usize) -> String {
    match value.char_indices().nth(max) {
        Some((index, _)) => value[..index].to_string(),
        None => value.to_string(),
    }
}

/// Commit field usable as grouping or sort key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitField {
    Type,
    Scope,
    Subject,
}

impl CommitField {
    pub fn value<'a>(&self, commit: &'a Commit) -> Option<&'a str> {
        match self {
            CommitField::Type => commit.r#type.as_deref(),
            CommitField::Scope => commit.scope.as_deref(),
            CommitField::Subject => commit.subject.as_deref(),
        }
    }
}

/// Compare commits field by field, ascending; absent values sort first.
pub fn compare_commits(fields: &[CommitField], a: &Commit, b: &Commit) -> Ordering {
    fields
        .iter()
        .map(|field| field.value(a).cmp(&field.value(b)))
        .find(|ordering| ordering.is_ne())
        .unwrap_or(Ordering::Equal)
}

/// Commit groups and note groups are ordered by title.
pub fn compare_titles(a: &str, b: &str) -> Ordering {
    a.cmp(b)
}

/// Notes within a group are ordered by text.
pub fn compare_notes(a: &Note, b: &Note) -> Ordering {
    a.text.cmp(&b.text)
}
