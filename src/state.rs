use std::fmt::{self, Display};

/// The release classification handed back by [`crate::step::decide`].
///
/// The real version always comes from the version file, so this only exists because callers
/// expect _some_ classification when a release goes forward. Only the smallest one is ever
/// needed.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ReleaseType {
    Patch,
}

impl ReleaseType {
    /// The smallest classification a caller will accept.
    pub const MINIMAL: Self = Self::Patch;
}

impl Display for ReleaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Patch => f.write_str("patch"),
        }
    }
}

/// The release that is going forward.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NextRelease {
    pub version: String,
    pub notes: String,
}

/// What [`crate::step::decide`] concluded.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum Release {
    /// All runs start here—nothing has been decided yet.
    Undecided,
    /// The tag for this version already exists, every later step should do nothing.
    Skipped { tag: String },
    /// No tag yet, release this version.
    Next {
        next_release: NextRelease,
        release_type: ReleaseType,
    },
}

/// What [`crate::step::note`] did with the changelog.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum ChangelogUpdate {
    /// Note hasn't run (or the release was skipped).
    Pending,
    /// The exact entry was already in the changelog, nothing was written.
    AlreadyPresent,
    /// The entry was appended to the changelog.
    Written,
}

/// The state of a single release attempt. Every [`crate::step::Step`] takes it by value and
/// hands back a new one.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct State {
    pub(crate) release: Release,
    pub(crate) changelog: ChangelogUpdate,
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}

impl State {
    #[must_use]
    pub fn new() -> Self {
        Self {
            release: Release::Undecided,
            changelog: ChangelogUpdate::Pending,
        }
    }

    /// Once `true`, every later step is a no-op.
    #[must_use]
    pub fn skip_release(&self) -> bool {
        matches!(self.release, Release::Skipped { .. })
    }

    /// `None` until the changelog step has run for a release that is going forward.
    #[must_use]
    pub fn skip_commit(&self) -> Option<bool> {
        match self.changelog {
            ChangelogUpdate::Pending => None,
            ChangelogUpdate::AlreadyPresent => Some(true),
            ChangelogUpdate::Written => Some(false),
        }
    }

    #[must_use]
    pub fn next_release(&self) -> Option<&NextRelease> {
        match &self.release {
            Release::Next { next_release, .. } => Some(next_release),
            Release::Undecided | Release::Skipped { .. } => None,
        }
    }

    /// The classification returned by the decide step, `None` meaning "no release".
    #[must_use]
    pub fn release_type(&self) -> Option<ReleaseType> {
        match &self.release {
            Release::Next { release_type, .. } => Some(*release_type),
            Release::Undecided | Release::Skipped { .. } => None,
        }
    }

    /// The release notes produced by the changelog step, empty if nothing was appended.
    #[must_use]
    pub fn notes(&self) -> &str {
        self.next_release()
            .map_or("", |next_release| next_release.notes.as_str())
    }
}

/// The type of state—an outer enum to make sure that dry-runs are handled appropriately.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RunType<T> {
    /// Signifies that this is a dry run. Reads still happen, but nothing is written or committed.
    DryRun(T),
    /// This is a real run, actually do the thing.
    Real(T),
}

impl<T> RunType<T> {
    #[must_use]
    pub fn of<R>(&self, new_value: R) -> RunType<R> {
        match self {
            RunType::DryRun(_) => RunType::DryRun(new_value),
            RunType::Real(_) => RunType::Real(new_value),
        }
    }

    pub fn take(self) -> (RunType<()>, T) {
        match self {
            RunType::DryRun(inner) => (RunType::DryRun(()), inner),
            RunType::Real(inner) => (RunType::Real(()), inner),
        }
    }

    pub fn inner(&self) -> &T {
        match self {
            RunType::DryRun(inner) | RunType::Real(inner) => inner,
        }
    }

    pub fn into_inner(self) -> T {
        self.take().1
    }
}
