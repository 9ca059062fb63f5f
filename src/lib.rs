#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

use std::{env::current_dir, path::PathBuf};

use clap::{command, Arg, ArgAction, ArgMatches, Command};
use log::LevelFilter;
use miette::{miette, IntoDiagnostic, Result};

pub use crate::{
    config::Config,
    git::{Git, VersionControl},
    state::{NextRelease, ReleaseType, RunType, State},
    step::{Context, Step},
    workflow::Workflow,
};

mod changelog;
pub mod config;
pub mod fs;
pub mod git;
mod state;
pub mod step;
pub mod workflow;

pub use changelog::MessageFormat;

/// Parse the command line and run the selected command in the current directory.
///
/// ## Errors
/// Any failure of the selected command, rendered by [`miette`].
pub fn run() -> Result<()> {
    let matches = build_cli().get_matches();
    init_logging(matches.get_flag("verbose"));

    let root = current_dir().into_diagnostic()?;
    let mut config = Config::load(&root)?;
    if let Some(file) = matches.get_one::<String>("file") {
        config.file = PathBuf::from(file);
    }

    match matches.subcommand() {
        Some(("get-version", _)) => {
            println!("{}", step::decide::read_version(&config, &root)?);
            Ok(())
        }
        Some(("check", _)) => {
            let state = run_workflow(Workflow::CHECK, &matches, &root, &config)?;
            if let Some(next_release) = state.next_release() {
                println!("{}", next_release.version);
            }
            Ok(())
        }
        Some(("release", _)) => {
            let state = run_workflow(Workflow::RELEASE, &matches, &root, &config)?;
            let notes = state.notes();
            if !notes.is_empty() {
                print!("{notes}");
            }
            Ok(())
        }
        _ => Err(miette!("Unknown command")),
    }
}

fn run_workflow(
    workflow: Workflow,
    matches: &ArgMatches,
    root: &std::path::Path,
    config: &Config,
) -> Result<State> {
    let git = Git::discover(root)?;
    let context = Context {
        root,
        config,
        git: &git,
    };
    let state = if matches.get_flag("dry-run") {
        RunType::DryRun(State::new())
    } else {
        RunType::Real(State::new())
    };
    Ok(workflow.run(state, &context)?.into_inner())
}

fn build_cli() -> Command {
    command!()
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("file")
                .long("file")
                .help("The file containing the version to release, overrides the config file")
                .env("VERSION_GATE_FILE")
                .global(true),
        )
        .arg(
            Arg::new("dry-run")
                .long("dry-run")
                .help("Pretend to run, logging what would be written or committed")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log more details about what is happening")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(
            Command::new("release").about(
                "Release the version in the version file unless it's already tagged, \
                adding a changelog entry for the latest commit and committing it",
            ),
        )
        .subcommand(
            Command::new("check")
                .about("Print the version that would be released, nothing if it's already tagged"),
        )
        .subcommand(Command::new("get-version").about("Print the version in the version file"))
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_env("RUST_LOG")
        .format_timestamp(None)
        .format_target(false)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_is_valid() {
        build_cli().debug_assert();
    }
}
