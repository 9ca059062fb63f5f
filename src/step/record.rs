use log::{error, info};

use super::{Context, Error, Step};
use crate::state::{Release, RunType, State};

/// Commit the changelog, unless the release was skipped or the changelog didn't change.
///
/// A failed commit leaves the changelog written but uncommitted, running this step again with
/// the same state is safe.
pub(crate) fn run(state: RunType<State>, context: &Context) -> Result<RunType<State>, Error> {
    let (run_type, state) = state.take();
    if state.release == Release::Undecided {
        return Err(Error::NotDecided { step: Step::Record });
    }
    if state.skip_release() {
        info!("Skipping Git commit (release disabled).");
        return Ok(run_type.of(state));
    }
    if state.skip_commit() == Some(true) {
        info!("Skipping Git commit (no changelog update).");
        return Ok(run_type.of(state));
    }

    let config = context.config;
    let message = &config.changelog.commit_message;
    if let RunType::DryRun(()) = run_type {
        info!(
            "Would commit {} with message \"{message}\"",
            config.changelog.path
        );
        return Ok(run_type.of(state));
    }

    let path = config.changelog_path(context.root);
    if let Err(err) = context.git.commit(&[path], message) {
        error!("Failed to commit {}: {err}", config.changelog.path);
        return Err(err.into());
    }
    info!("Committed {}", config.changelog.path);
    Ok(run_type.of(state))
}
