use log::info;

use crate::state::{Release, RunType, State};

/// Nothing is published here, this only reports a skipped release.
pub(crate) fn run(state: RunType<State>) -> RunType<State> {
    if let Release::Skipped { tag } = &state.inner().release {
        info!("Skipping publish (release disabled, {tag} already exists).");
    }
    state
}
