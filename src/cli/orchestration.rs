//! Changelog workflow orchestration
//!
//! Wires run options, template context, git-log options, parser options and
//! writer options into the read → parse → extract → classify → render
//! pipeline and streams the result into the output file.

use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

use crate::config::Config;
use crate::context::Context;
use crate::error::Result;
use crate::extractor::TagExtractor;
use crate::git::{Git2Repository, GitLogOptions, Repository};
use crate::parser::{CommitParser, ParserOptions};
use crate::writer::{Releases, Renderer, TemplateSet, WriterOptions};

/// Arguments for the changelog workflow
///
/// Mirrors the CLI positional arguments and flags in a form that can be
/// used without clap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangelogArgs {
    /// Phabricator host, e.g. `my.phabricator.org`
    pub host: String,

    /// Diffusion repository identifier (callsign)
    pub diffusion_id: String,

    /// Tag or revision to start after; `None` for the whole history
    pub from: Option<String>,
}

/// Options for one pipeline run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    /// Emit every release entry, not only the newest
    pub all_blocks: bool,

    /// Starting point of the history walk (exclusive)
    pub from: Option<String>,
}

impl RunOptions {
    pub fn new(from: Option<String>) -> Self {
        RunOptions {
            all_blocks: true,
            from,
        }
    }
}

/// Result of a successful changelog run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowResult {
    /// File the changelog was written to
    pub output: PathBuf,

    /// Number of release entries written
    pub releases: usize,

    /// Number of commits read from history
    pub commits: usize,
}

/// Counts reported by [write_changelog]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WriteSummary {
    pub releases: usize,
    pub commits: usize,
}

/// Main changelog workflow on the repository in the current directory.
pub fn run_changelog_workflow(args: &ChangelogArgs, config: &Config) -> Result<WorkflowResult> {
    let repo = Git2Repository::open(".")?;
    generate_changelog(&repo, args, config)
}

/// Generate the changelog for `repo` into the configured output file.
///
/// Templates are loaded and compiled before the output file is created, so
/// a template problem never truncates an existing changelog. A failure
/// while writing leaves whatever was written so far in place.
pub fn generate_changelog<R: Repository>(
    repo: &R,
    args: &ChangelogArgs,
    config: &Config,
) -> Result<WorkflowResult> {
    let templates = match &config.templates.dir {
        Some(dir) => TemplateSet::load(dir)?,
        None => TemplateSet::builtin(),
    };

    let run_options = RunOptions::new(args.from.clone());
    let context = Context::phabricator(&args.host, &args.diffusion_id);
    let git_options = GitLogOptions::from(&config.git);
    let writer_options = WriterOptions::new(templates);
    let renderer = Renderer::new(&writer_options, context)?;

    let mut file = File::create(&config.output.path)?;
    let summary = write_changelog(
        repo,
        &run_options,
        &git_options,
        &writer_options,
        &renderer,
        &mut file,
    )?;

    log::info!(
        "wrote {} releases from {} commits to {}",
        summary.releases,
        summary.commits,
        config.output.path.display()
    );

    Ok(WorkflowResult {
        output: config.output.path.clone(),
        releases: summary.releases,
        commits: summary.commits,
    })
}

/// Run the pipeline and write each rendered release entry to `out` as soon
/// as it is rendered.
pub fn write_changelog<R: Repository, W: Write>(
    repo: &R,
    run_options: &RunOptions,
    git_options: &GitLogOptions,
    writer_options: &WriterOptions,
    renderer: &Renderer,
    out: &mut W,
) -> Result<WriteSummary> {
    let parser = CommitParser::new(ParserOptions::phabricator()?)?;
    let extractor = TagExtractor::new()?;

    let raw_commits = repo.read_log(run_options.from.as_deref(), git_options)?;
    let mut commits: Vec<_> = raw_commits.iter().map(|raw| parser.parse(raw)).collect();

    for commit in commits.iter_mut() {
        extractor.apply(commit);
    }

    let mut summary = WriteSummary {
        releases: 0,
        commits: commits.len(),
    };

    let releases = Releases::new(commits.into_iter(), writer_options);
    let limit = if run_options.all_blocks { usize::MAX } else { 1 };

    for release in releases.take(limit) {
        log::debug!(
            "rendering {} with {} commits",
            release.title(),
            release.commits.len()
        );

        let block = renderer.render(&release)?;
        if summary.releases > 0 {
            out.write_all(b"\n")?;
        }
        out.write_all(block.as_bytes())?;
        out.write_all(b"\n")?;
        summary.releases += 1;
    }

    out.flush()?;
    Ok(summary)
}
