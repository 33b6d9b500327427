use anyhow::Result;
use clap::Parser;

use phabricator_changelog::cli::orchestration::run_changelog_workflow;
use phabricator_changelog::cli::Args;
use phabricator_changelog::{config, ui};

fn initialize_logger(debug: bool) -> Result<()> {
    let filter = if debug {
        simplelog::LevelFilter::Debug
    } else {
        simplelog::LevelFilter::Info
    };

    let config = simplelog::ConfigBuilder::new()
        .add_filter_allow_str("phabricator_changelog")
        .build();

    simplelog::TermLogger::init(
        filter,
        config,
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    )?;

    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Anything but exactly two positionals is a request for help
    let Some(changelog_args) = args.invocation() else {
        Args::print_help()?;
        return Ok(());
    };

    initialize_logger(args.debug)?;

    let config = match config::load_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(1);
        }
    };

    ui::display_status(&format!(
        "Generating changelog for {} on {}",
        changelog_args.diffusion_id, changelog_args.host
    ));

    match run_changelog_workflow(&changelog_args, &config) {
        Ok(result) => {
            ui::display_summary(&result);
            Ok(())
        }
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(1);
        }
    }
}
