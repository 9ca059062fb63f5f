use log::{info, warn};

use super::{Context, Error, Step};
use crate::{
    changelog::{self, Changelog},
    fs::{self, WriteType},
    state::{ChangelogUpdate, Release, RunType, State},
};

/// Append an entry for the latest commit to the changelog, unless that exact entry is already
/// there. The entry becomes the notes of the next release.
pub(crate) fn run(state: RunType<State>, context: &Context) -> Result<RunType<State>, Error> {
    let (run_type, mut state) = state.take();
    let next_release = match &mut state.release {
        Release::Undecided => return Err(Error::NotDecided { step: Step::Note }),
        Release::Skipped { .. } => {
            info!("Skipping changelog (release disabled).");
            return Ok(run_type.of(state));
        }
        Release::Next { next_release, .. } => next_release,
    };
    let config = context.config;

    let commit_message = context.git.last_commit_message()?;
    info!("Last commit message: \"{commit_message}\"");

    let mut changelog = Changelog::load(
        config.changelog_path(context.root),
        &config.changelog.header,
    )?;
    let tag = config.tag_name(&next_release.version);
    let entry = changelog::entry(&tag, &commit_message, config.changelog.message_format);

    if changelog.contains(&entry) {
        warn!("Entry already exists in changelog. Skipping append.");
        next_release.notes = String::new();
        state.changelog = ChangelogUpdate::AlreadyPresent;
        return Ok(run_type.of(state));
    }

    let diff = changelog.with_entry(&entry);
    match run_type {
        RunType::DryRun(()) => fs::write(WriteType::<&str, _>::DryRun(diff), &changelog.path)?,
        RunType::Real(()) => {
            fs::write(
                WriteType::<_, String>::Real(changelog.content.as_str()),
                &changelog.path,
            )?;
            info!("Appended changelog entry for {tag}");
        }
    }
    next_release.notes = entry;
    state.changelog = ChangelogUpdate::Written;
    Ok(run_type.of(state))
}
