//! Command line interface
//!
//! Argument parsing lives here so the binary stays a thin shell around
//! [orchestration].

pub mod orchestration;

use clap::{CommandFactory, Parser};

use orchestration::ChangelogArgs;

pub const USAGE: &str = "changelog <phabricator_host> <diffusion_id> [--from <tag>]";

#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(
    name = "changelog",
    version,
    about = "Generate a CHANGELOG.md from conventional commits for a Phabricator hosted repository",
    override_usage = USAGE,
    after_help = "Example:\n  changelog my.phabricator.org MYPROJECT"
)]
pub struct Args {
    #[arg(
        value_name = "ARGS",
        help = "Phabricator host followed by the Diffusion repository id"
    )]
    pub positional: Vec<String>,

    #[arg(long, value_name = "TAG", help = "Only include commits after this tag or revision")]
    pub from: Option<String>,

    #[arg(short, long, help = "Custom configuration file path")]
    pub config: Option<String>,

    #[arg(long, help = "Enable debug logging")]
    pub debug: bool,
}

impl Args {
    /// Workflow arguments, or `None` when the positional count is not
    /// exactly two and help should be shown instead.
    pub fn invocation(&self) -> Option<ChangelogArgs> {
        match self.positional.as_slice() {
            [host, diffusion_id] => Some(ChangelogArgs {
                host: host.clone(),
                diffusion_id: diffusion_id.clone(),
                from: self.from.clone(),
            }),
            _ => None,
        }
    }

    /// Print the usage help to stdout.
    pub fn print_help() -> std::io::Result<()> {
        Args::command().print_help()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("changelog").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_two_positionals_run() {
        let args = parse(&["my.phabricator.org", "MYPROJECT"]);
        let invocation = args.invocation().unwrap();
        assert_eq!(invocation.host, "my.phabricator.org");
        assert_eq!(invocation.diffusion_id, "MYPROJECT");
        assert_eq!(invocation.from, None);
    }

    #[test]
    fn test_from_flag_is_passed() {
        let args = parse(&["phab", "APP", "--from", "v1.0.0"]);
        assert_eq!(args.invocation().unwrap().from.as_deref(), Some("v1.0.0"));
    }

    #[test]
    fn test_wrong_positional_count_shows_help() {
        assert_eq!(parse(&[]).invocation(), None);
        assert_eq!(parse(&["phab"]).invocation(), None);
        assert_eq!(parse(&["phab", "APP", "extra"]).invocation(), None);
        assert_eq!(parse(&["--from", "v1.0.0", "phab"]).invocation(), None);
    }

    #[test]
    fn test_debug_and_config_flags() {
        let args = parse(&["--debug", "-c", "custom.toml", "phab", "APP"]);
        assert!(args.debug);
        assert_eq!(args.config.as_deref(), Some("custom.toml"));
        assert!(args.invocation().is_some());
    }

    #[test]
    fn test_command_is_consistent() {
        Args::command().debug_assert();
    }
}
