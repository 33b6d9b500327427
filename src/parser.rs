//! Conventional commit parsing
//!
//! [ParserOptions] declares how a raw message is split into fields and
//! [CommitParser] applies it to one [RawCommit] at a time.

use regex::Regex;

use crate::domain::{Commit, Note, Reference};
use crate::error::{ChangelogError, Result};
use crate::git::RawCommit;

/// Matches `type(scope): subject`
pub const HEADER_PATTERN: &str = r"^(\w*)(?:\((.*)\))?: (.*)$";

/// Footer keyword that flags a breaking change
pub const BREAKING_CHANGE: &str = "BREAKING CHANGE";

/// Commit field filled by one capture group of the header pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderField {
    Type,
    Scope,
    Subject,
}

/// How raw commit messages are split into structured fields.
#[derive(Debug, Clone)]
pub struct ParserOptions {
    header_pattern: Regex,
    header_correspondence: Vec<HeaderField>,
    note_keywords: Vec<String>,
    issue_prefixes: Vec<String>,
    reference_actions: Vec<String>,
}

impl ParserOptions {
    /// Build parser options, checking that every header field has a
    /// capture group to read from.
    pub fn new(
        header_pattern: &str,
        header_correspondence: Vec<HeaderField>,
        note_keywords: Vec<String>,
        issue_prefixes: Vec<String>,
        reference_actions: Vec<String>,
    ) -> Result<Self> {
        let header_pattern = Regex::new(header_pattern)?;

        let groups = header_pattern.captures_len() - 1;
        if groups != header_correspondence.len() {
            return Err(ChangelogError::config(format!(
                "header pattern has {} capture groups but {} fields are mapped",
                groups,
                header_correspondence.len()
            )));
        }

        if issue_prefixes.iter().any(|p| p.is_empty()) {
            return Err(ChangelogError::config("issue prefixes must not be empty"));
        }

        Ok(ParserOptions {
            header_pattern,
            header_correspondence,
            note_keywords,
            issue_prefixes,
            reference_actions,
        })
    }

    /// Options for Phabricator hosted projects: Maniphest `T` task
    /// references and `Ref` reference lines.
    pub fn phabricator() -> Result<Self> {
        ParserOptions::new(
            HEADER_PATTERN,
            vec![HeaderField::Type, HeaderField::Scope, HeaderField::Subject],
            vec![BREAKING_CHANGE.to_string()],
            vec!["T".to_string()],
            vec!["Ref".to_string()],
        )
    }

    pub fn header_correspondence(&self) -> &[HeaderField] {
        &self.header_correspondence
    }

    pub fn note_keywords(&self) -> &[String] {
        &self.note_keywords
    }

    pub fn issue_prefixes(&self) -> &[String] {
        &self.issue_prefixes
    }

    pub fn reference_actions(&self) -> &[String] {
        &self.reference_actions
    }
}

fn alternation(words: &[String]) -> String {
    words
        .iter()
        .map(|w| regex::escape(w))
        .collect::<Vec<_>>()
        .join("|")
}

/// Parses raw commits according to [ParserOptions]
#[derive(Debug, Clone)]
pub struct CommitParser {
    options: ParserOptions,
    notes_pattern: Option<Regex>,
    action_pattern: Option<Regex>,
    references_pattern: Regex,
}

impl CommitParser {
    pub fn new(options: ParserOptions) -> Result<Self> {
        let notes_pattern = if options.note_keywords.is_empty() {
            None
        } else {
            Some(Regex::new(&format!(
                r"(?i)^[\s|*]*({})[:\s]+(.*)$",
                alternation(&options.note_keywords)
            ))?)
        };

        let action_pattern = if options.reference_actions.is_empty() {
            None
        } else {
            Some(Regex::new(&format!(
                r"(?i)^\s*({})[:\s]+",
                alternation(&options.reference_actions)
            ))?)
        };

        let references_pattern = Regex::new(&format!(
            r"(?:^|[^\w])({})(\d+)\b",
            alternation(&options.issue_prefixes)
        ))?;

        Ok(CommitParser {
            options,
            notes_pattern,
            action_pattern,
            references_pattern,
        })
    }

    /// Parse one raw commit into a [Commit].
    ///
    /// A header that does not match the header pattern is not an error:
    /// type, scope and subject are simply left unset. An empty message
    /// yields a commit with an empty header.
    pub fn parse(&self, raw: &RawCommit) -> Commit {
        let message = raw.message.trim();
        let mut lines = message.lines();
        let header = lines.next().unwrap_or_default().trim_end().to_string();

        let mut commit = Commit {
            header: header.clone(),
            hash: raw.hash.clone(),
            committer_date: raw.committer_date.clone(),
            git_tags: raw.git_tags.clone(),
            ..Default::default()
        };

        if let Some(captures) = self.options.header_pattern.captures(&header) {
            for (index, field) in self.options.header_correspondence.iter().enumerate() {
                let value = captures
                    .get(index + 1)
                    .map(|m| m.as_str())
                    .filter(|s| !s.is_empty())
                    .map(str::to_string);

                match field {
                    HeaderField::Type => commit.r#type = value,
                    HeaderField::Scope => commit.scope = value,
                    HeaderField::Subject => commit.subject = value,
                }
            }
        }

        self.collect_references(&header, None, &mut commit.references);

        let mut body_lines: Vec<&str> = Vec::new();
        let mut footer_lines: Vec<&str> = Vec::new();
        let mut in_footer = false;
        let mut current_note: Option<usize> = None;

        for line in lines {
            if let Some(captures) = self.notes_pattern.as_ref().and_then(|p| p.captures(line)) {
                in_footer = true;
                footer_lines.push(line);
                commit.notes.push(Note::new(&captures[1], &captures[2]));
                current_note = Some(commit.notes.len() - 1);
                continue;
            }

            if let Some(captures) = self.action_pattern.as_ref().and_then(|p| p.captures(line)) {
                in_footer = true;
                footer_lines.push(line);
                current_note = None;
                self.collect_references(line, Some(&captures[1]), &mut commit.references);
                continue;
            }

            if in_footer {
                footer_lines.push(line);
                if let Some(index) = current_note {
                    let text = &mut commit.notes[index].text;
                    text.push('\n');
                    text.push_str(line);
                }
            } else {
                body_lines.push(line);
            }

            self.collect_references(line, None, &mut commit.references);
        }

        for note in commit.notes.iter_mut() {
            note.text = note.text.trim().to_string();
        }

        commit.body = join_trimmed(&body_lines);
        commit.footer = join_trimmed(&footer_lines);

        commit
    }

    fn collect_references(&self, line: &str, action: Option<&str>, into: &mut Vec<Reference>) {
        for captures in self.references_pattern.captures_iter(line) {
            let prefix = captures[1].to_string();
            let issue = captures[2].to_string();

            if into
                .iter()
                .any(|r| r.prefix == prefix && r.issue == issue)
            {
                continue;
            }

            into.push(Reference {
                action: action.map(str::to_string),
                raw: format!("{}{}", prefix, issue),
                prefix,
                issue,
            });
        }
    }
}

fn join_trimmed(lines: &[&str]) -> Option<String> {
    let joined = lines.join("\n");
    let trimmed = joined.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
