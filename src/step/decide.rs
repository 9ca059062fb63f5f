use log::{info, warn};

use super::{Context, Error};
use crate::{
    config::{Config, LookupFailure},
    fs,
    state::{NextRelease, Release, ReleaseType, RunType, State},
};

/// Read the version out of the configured version file, trimmed of surrounding whitespace.
pub fn read_version(config: &Config, root: &std::path::Path) -> Result<String, fs::Error> {
    let contents = fs::read_to_string(config.version_file(root))?;
    Ok(contents.trim().to_string())
}

/// Decide whether the version in the version file still needs releasing.
///
/// If a reference named after the version already exists, the release is skipped and every
/// later step does nothing. Otherwise the version becomes the next release, classified as
/// [`ReleaseType::MINIMAL`].
pub(crate) fn run(state: RunType<State>, context: &Context) -> Result<RunType<State>, Error> {
    let (run_type, mut state) = state.take();
    let config = context.config;
    let version = read_version(config, context.root)?;
    let tag = config.tag_name(&version);

    info!("Using version {version} from {}", config.file.display());

    let exists = match context.git.reference_exists(&tag) {
        Ok(exists) => exists,
        Err(err) if config.on_lookup_error == LookupFailure::Proceed => {
            warn!(
                "Could not check whether tag {tag} exists, proceeding as if it does not. \
                This version may already be released: {err}"
            );
            false
        }
        Err(err) => return Err(err.into()),
    };

    if exists {
        info!("Tag {tag} already exists and matches the version file. Skipping release completely.");
        state.release = Release::Skipped { tag };
        return Ok(run_type.of(state));
    }

    info!("Tag {tag} does not exist, release will proceed.");
    state.release = Release::Next {
        next_release: NextRelease {
            version,
            notes: String::new(),
        },
        release_type: ReleaseType::MINIMAL,
    };
    Ok(run_type.of(state))
}
