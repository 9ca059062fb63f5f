use std::{fmt, path::Path};

use miette::Diagnostic;
use thiserror::Error;

use crate::{config::Config, fs, git, git::VersionControl, state::RunType, State};

pub mod decide;
pub mod note;
pub mod publish;
pub mod record;

/// Each variant is one lifecycle hook of a release. They always run in the order they are
/// declared, see [`crate::Workflow::RELEASE`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Step {
    /// Read the version file and check whether its tag already exists.
    Decide,
    /// Append an entry for the latest commit to the changelog.
    Note,
    /// Commit the changelog.
    Record,
    /// Acknowledge a skipped release, nothing is published.
    Publish,
}

/// Everything a [`Step`] reads besides the [`State`].
#[derive(Clone, Copy)]
pub struct Context<'a> {
    /// The directory every configured path is relative to.
    pub root: &'a Path,
    pub config: &'a Config,
    pub git: &'a dyn VersionControl,
}

impl Step {
    pub fn run(self, state: RunType<State>, context: &Context) -> Result<RunType<State>, Error> {
        match self {
            Step::Decide => decide::run(state, context),
            Step::Note => note::run(state, context),
            Step::Record => record::run(state, context),
            Step::Publish => Ok(publish::run(state)),
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Decide => f.write_str("Decide"),
            Step::Note => f.write_str("Note"),
            Step::Record => f.write_str("Record"),
            Step::Publish => f.write_str("Publish"),
        }
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Fs(#[from] fs::Error),
    #[error(transparent)]
    #[diagnostic(transparent)]
    Git(#[from] git::Error),
    #[error("No release has been decided on yet")]
    #[diagnostic(
        code(step::not_decided),
        help("The {step} step needs the Decide step to run before it.")
    )]
    NotDecided { step: Step },
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub(crate) mod test_helpers {
    use std::path::Path;

    use tempfile::TempDir;

    use crate::{config::Config, git::fake::FakeGit, state::RunType, State};

    use super::{Context, Step};

    /// A temp directory containing a version file with `version`.
    pub(crate) fn workspace(version: &str) -> TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("version"), version).unwrap();
        dir
    }

    pub(crate) fn run_steps(
        steps: &[Step],
        root: &Path,
        config: &Config,
        git: &FakeGit,
        state: RunType<State>,
    ) -> Result<RunType<State>, super::Error> {
        let context = Context { root, config, git };
        steps
            .iter()
            .try_fold(state, |state, step| step.run(state, &context))
    }
}
