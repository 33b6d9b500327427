//! Per-commit version and date extraction.

use chrono::{DateTime, NaiveDate, Utc};
use regex::Regex;

use crate::domain::Commit;
use crate::error::Result;

/// Finds the version in a ref decoration such as ` (HEAD -> main, tag: v1.2.3)`
pub const TAG_PATTERN: &str = r"(?i)tag:\s*[v=]?(.+?)[,)]";

/// Output format of normalized committer dates
pub const DATE_FORMAT: &str = "%Y-%m-%d";

const GIT_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S %z";

/// Fills `version` from the tag decoration and normalizes `committer_date`.
///
/// Matching is stateless: each call searches its input from the start, so
/// one record never affects the next.
#[derive(Debug, Clone)]
pub struct TagExtractor {
    pattern: Regex,
}

impl TagExtractor {
    pub fn new() -> Result<Self> {
        Ok(TagExtractor {
            pattern: Regex::new(TAG_PATTERN)?,
        })
    }

    /// Version from the first `tag:` entry, without a leading `v` or `=`.
    pub fn extract_version(&self, git_tags: &str) -> Option<String> {
        self.pattern
            .captures(git_tags)
            .and_then(|captures| captures.get(1))
            .map(|m| m.as_str().to_string())
    }

    /// Apply both transforms to a commit in place.
    ///
    /// Missing tags or dates leave the record untouched. A date that cannot
    /// be read is kept as is.
    pub fn apply(&self, commit: &mut Commit) {
        if let Some(git_tags) = commit.git_tags.as_deref() {
            if let Some(version) = self.extract_version(git_tags) {
                commit.version = Some(version);
            }
        }

        if let Some(date) = commit.committer_date.as_deref() {
            match format_date(date) {
                Some(formatted) => commit.committer_date = Some(formatted),
                None => log::warn!("cannot read committer date '{}' of {}", date, commit.hash),
            }
        }
    }
}

/// Reformat a timestamp as `YYYY-MM-DD` in UTC.
///
/// Accepts git's `%ci` form, RFC 3339 and RFC 2822. A bare `YYYY-MM-DD`
/// date is returned unchanged.
pub fn format_date(raw: &str) -> Option<String> {
    let raw = raw.trim();

    let parsed = DateTime::parse_from_str(raw, GIT_DATE_FORMAT)
        .or_else(|_| DateTime::parse_from_rfc3339(raw))
        .or_else(|_| DateTime::parse_from_rfc2822(raw));

    match parsed {
        Ok(date) => Some(date.with_timezone(&Utc).format(DATE_FORMAT).to_string()),
        Err(_) => NaiveDate::parse_from_str(raw, DATE_FORMAT)
            .ok()
            .map(|date| date.format(DATE_FORMAT).to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> TagExtractor {
        TagExtractor::new().unwrap()
    }

    fn tagged(git_tags: &str) -> Commit {
        Commit {
            git_tags: Some(git_tags.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_version_with_v_prefix() {
        let mut commit = tagged(" (HEAD -> main, tag: v1.2.3)");
        extractor().apply(&mut commit);
        assert_eq!(commit.version.as_deref(), Some("1.2.3"));
    }

    #[test]
    fn test_version_with_equals_prefix() {
        let mut commit = tagged(" (tag:=1.2.3, origin/main)");
        extractor().apply(&mut commit);
        assert_eq!(commit.version.as_deref(), Some("1.2.3"));
    }

    #[test]
    fn test_first_tag_wins() {
        let mut commit = tagged(" (tag: v2.0.0, tag: latest)");
        extractor().apply(&mut commit);
        assert_eq!(commit.version.as_deref(), Some("2.0.0"));
    }

    #[test]
    fn test_no_tag_leaves_version_unset() {
        let mut commit = tagged(" (HEAD -> main, origin/main)");
        extractor().apply(&mut commit);
        assert_eq!(commit.version, None);

        let mut untagged = Commit::default();
        extractor().apply(&mut untagged);
        assert_eq!(untagged.version, None);
    }

    #[test]
    fn test_consecutive_calls_are_independent() {
        let extractor = extractor();

        let mut first = tagged("xxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxx (tag: v10.20.30)");
        let mut second = tagged(" (tag: v1.0.0)");
        let mut third = tagged(" (HEAD)");

        extractor.apply(&mut first);
        extractor.apply(&mut second);
        extractor.apply(&mut third);

        assert_eq!(first.version.as_deref(), Some("10.20.30"));
        assert_eq!(second.version.as_deref(), Some("1.0.0"));
        assert_eq!(third.version, None);
    }

    #[test]
    fn test_date_converted_to_utc() {
        let mut commit = Commit {
            committer_date: Some("2016-01-02 00:30:00 +0100".to_string()),
            ..Default::default()
        };
        extractor().apply(&mut commit);
        assert_eq!(commit.committer_date.as_deref(), Some("2016-01-01"));
    }

    #[test]
    fn test_unreadable_date_is_kept() {
        let mut commit = Commit {
            committer_date: Some("last tuesday".to_string()),
            ..Default::default()
        };
        extractor().apply(&mut commit);
        assert_eq!(commit.committer_date.as_deref(), Some("last tuesday"));
    }

    #[test]
    fn test_format_date_variants() {
        assert_eq!(
            format_date("2020-05-06T23:59:59-02:00").as_deref(),
            Some("2020-05-07")
        );
        assert_eq!(
            format_date("Tue, 1 Jul 2003 10:52:37 +0200").as_deref(),
            Some("2003-07-01")
        );
        assert_eq!(format_date("2021-12-31").as_deref(), Some("2021-12-31"));
        assert_eq!(format_date("not a date"), None);
    }
}
