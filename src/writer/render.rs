use regex::Regex;
use serde::Serialize;
use tera::Tera;

use crate::classifier::{
    compare_commits, compare_notes, compare_titles, valid_version, CommitField,
};
use crate::context::Context;
use crate::domain::{Commit, Note};
use crate::error::Result;
use crate::writer::{Release, WriterOptions};

#[derive(Debug, Serialize)]
struct CommitGroup<'a> {
    title: &'a str,
    commits: Vec<&'a Commit>,
}

#[derive(Debug, Serialize)]
struct NoteEntry<'a> {
    title: &'a str,
    text: &'a str,
    commit: &'a Commit,
}

#[derive(Debug, Serialize)]
struct NoteGroup<'a> {
    title: &'a str,
    notes: Vec<NoteEntry<'a>>,
}

#[derive(Debug, Serialize)]
struct ReleaseContext<'a> {
    context: &'a Context,
    base_url: String,
    link_references: bool,
    version: &'a str,
    date: Option<&'a str>,
    is_patch: bool,
    commit_groups: Vec<CommitGroup<'a>>,
    note_groups: Vec<NoteGroup<'a>>,
}

/// Renders release entries through the configured templates.
pub struct Renderer {
    tera: Tera,
    context: Context,
    group_by: CommitField,
    commits_sort: Vec<CommitField>,
    extra_lines: Regex,
}

impl Renderer {
    /// Compile the templates. Syntax errors fail here, before anything is
    /// written.
    pub fn new(options: &WriterOptions, context: Context) -> Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_templates(vec![
            ("header", options.templates.header.as_str()),
            ("commit", options.templates.commit.as_str()),
            ("footer", options.templates.footer.as_str()),
            ("main", options.templates.main.as_str()),
        ])?;

        Ok(Renderer {
            tera,
            context,
            group_by: options.group_by,
            commits_sort: options.commits_sort.clone(),
            extra_lines: Regex::new(r"\n{3,}")?,
        })
    }

    /// Render one release entry as Markdown, without trailing newline.
    pub fn render(&self, release: &Release) -> Result<String> {
        let version = release.title();
        let is_patch = release
            .version
            .as_deref()
            .and_then(valid_version)
            .map(|v| v.patch != 0)
            .unwrap_or(false);

        let release_context = ReleaseContext {
            context: &self.context,
            base_url: self.context.base_url(),
            link_references: self.context.link_references(),
            version,
            date: release.date.as_deref(),
            is_patch,
            commit_groups: self.commit_groups(&release.commits),
            note_groups: note_groups(&release.commits),
        };

        let context = tera::Context::from_serialize(&release_context)?;
        let rendered = self.tera.render("main", &context)?;

        Ok(self.strip_extra_lines(&rendered))
    }

    fn commit_groups<'a>(&self, commits: &'a [Commit]) -> Vec<CommitGroup<'a>> {
        let mut groups: Vec<CommitGroup<'a>> = Vec::new();

        for commit in commits {
            let title = self.group_by.value(commit).unwrap_or_default();
            match groups.iter_mut().find(|g| g.title == title) {
                Some(group) => group.commits.push(commit),
                None => groups.push(CommitGroup {
                    title,
                    commits: vec![commit],
                }),
            }
        }

        for group in groups.iter_mut() {
            group
                .commits
                .sort_by(|a, b| compare_commits(&self.commits_sort, a, b));
        }
        groups.sort_by(|a, b| compare_titles(a.title, b.title));

        groups
    }

    fn strip_extra_lines(&self, rendered: &str) -> String {
        self.extra_lines
            .replace_all(rendered, "\n\n")
            .trim()
            .to_string()
    }
}

fn note_groups(commits: &[Commit]) -> Vec<NoteGroup<'_>> {
    let mut groups: Vec<(&str, Vec<(&Note, &Commit)>)> = Vec::new();

    for commit in commits {
        for note in &commit.notes {
            match groups.iter_mut().find(|(title, _)| *title == note.title) {
                Some((_, notes)) => notes.push((note, commit)),
                None => groups.push((note.title.as_str(), vec![(note, commit)])),
            }
        }
    }

    groups.sort_by(|a, b| compare_titles(a.0, b.0));

    groups
        .into_iter()
        .map(|(title, mut notes)| {
            notes.sort_by(|a, b| compare_notes(a.0, b.0));
            NoteGroup {
                title,
                notes: notes
                    .into_iter()
                    .map(|(note, commit)| NoteEntry {
                        title: &note.title,
                        text: &note.text,
                        commit,
                    })
                    .collect(),
            }
        })
        .collect()
}
