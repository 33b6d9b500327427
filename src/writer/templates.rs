use std::fs;
use std::path::Path;

use crate::error::{ChangelogError, Result};

pub const MAIN_TEMPLATE: &str = "main.md";
pub const HEADER_TEMPLATE: &str = "header.md";
pub const COMMIT_TEMPLATE: &str = "commit.md";
pub const FOOTER_TEMPLATE: &str = "footer.md";

/// The four template fragments a release entry is rendered from.
///
/// `main` includes the others by the names `header`, `commit` and `footer`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateSet {
    pub main: String,
    pub header: String,
    pub commit: String,
    pub footer: String,
}

impl TemplateSet {
    /// Templates shipped with the binary.
    pub fn builtin() -> Self {
        TemplateSet::new(
            include_str!("../../templates/main.md"),
            include_str!("../../templates/header.md"),
            include_str!("../../templates/commit.md"),
            include_str!("../../templates/footer.md"),
        )
    }

    /// Partials lose their trailing newlines so `main` controls line breaks.
    pub fn new(
        main: impl Into<String>,
        header: &str,
        commit: &str,
        footer: &str,
    ) -> Self {
        TemplateSet {
            main: main.into(),
            header: header.trim_end_matches(&['\r', '\n'][..]).to_string(),
            commit: commit.trim_end_matches(&['\r', '\n'][..]).to_string(),
            footer: footer.trim_end_matches(&['\r', '\n'][..]).to_string(),
        }
    }

    /// Read `main.md`, `header.md`, `commit.md` and `footer.md` from a
    /// directory. Every file must exist and be valid UTF-8.
    pub fn load<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();
        log::debug!("loading templates from {}", dir.display());

        let read = |name: &str| -> Result<String> {
            let path = dir.join(name);
            fs::read_to_string(&path).map_err(|e| {
                ChangelogError::config(format!("cannot read template {}: {}", path.display(), e))
            })
        };

        let main = read(MAIN_TEMPLATE)?;
        let header = read(HEADER_TEMPLATE)?;
        let commit = read(COMMIT_TEMPLATE)?;
        let footer = read(FOOTER_TEMPLATE)?;

        Ok(TemplateSet::new(main, &header, &commit, &footer))
    }
}
