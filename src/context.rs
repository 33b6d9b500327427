//! Template variables that stay constant for a whole run.

use serde::Serialize;

/// Prefix Phabricator puts in front of Maniphest task ids.
pub const ISSUE_PREFIX: &str = "T";

/// Prefix Diffusion puts in front of a repository callsign in commit URLs.
pub const COMMIT_PREFIX: &str = "r";

/// Host and link settings shared by every rendered release.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Context {
    /// Phabricator host as given on the command line
    pub host: String,
    /// Marks that commit and issue links can be generated
    pub repository: bool,
    /// Commit link identifier, `r<diffusion id>`
    pub commit: String,
    /// Issue link prefix
    pub issue: String,
}

impl Context {
    /// Build the context for a Phabricator host and Diffusion repository id.
    pub fn phabricator(host: impl Into<String>, diffusion_id: &str) -> Self {
        Context {
            host: host.into(),
            repository: true,
            commit: format!("{}{}", COMMIT_PREFIX, diffusion_id),
            issue: ISSUE_PREFIX.to_string(),
        }
    }

    /// Host as an absolute URL, `https://` is assumed when no scheme is given.
    pub fn base_url(&self) -> String {
        let host = self.host.trim_end_matches('/');
        if host.contains("://") {
            host.to_string()
        } else {
            format!("https://{}", host)
        }
    }

    /// Whether templates should emit links at all.
    pub fn link_references(&self) -> bool {
        self.repository && !self.host.is_empty()
    }
}
