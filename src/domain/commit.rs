use serde::Serialize;

/// A commit record as it travels through the pipeline.
///
/// Created by the parser from one raw history entry, enriched in place by
/// the tag extractor and finally relabeled by the classifier.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Commit {
    #[serde(rename = "type")]
    pub r#type: Option<String>,
    pub scope: Option<String>,
    pub subject: Option<String>,
    /// First line of the message
    pub header: String,
    pub body: Option<String>,
    pub footer: Option<String>,
    pub hash: String,
    pub committer_date: Option<String>,
    /// Ref decoration in `git log --format=%d` form
    pub git_tags: Option<String>,
    /// Version extracted from `git_tags`
    pub version: Option<String>,
    pub notes: Vec<Note>,
    pub references: Vec<Reference>,
}

/// A footer note such as a breaking change description
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Note {
    pub title: String,
    pub text: String,
}

impl Note {
    pub fn new(title: impl Into<String>, text: impl Into<String>) -> Self {
        Note {
            title: title.into(),
            text: text.into(),
        }
    }
}

/// A reference to a Maniphest task, e.g. `Ref T123`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reference {
    /// Action keyword that introduced the reference, if any
    pub action: Option<String>,
    pub prefix: String,
    pub issue: String,
    /// Text as it appeared in the message
    pub raw: String,
}
