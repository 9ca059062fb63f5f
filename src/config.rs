use std::path::{Path, PathBuf};

use log::debug;
use miette::Diagnostic;
use relative_path::RelativePathBuf;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{changelog::MessageFormat, fs};

pub(crate) const DEFAULT_VERSION_FILE: &str = "version";
pub(crate) const DEFAULT_TAG_PREFIX: &str = "v";
pub(crate) const CHANGELOG_FILE: &str = "CHANGELOG.md";
pub(crate) const CHANGELOG_HEADER: &str =
    "# Changelog\n\nAll notable changes will be documented here.\n";
pub(crate) const CHANGELOG_COMMIT_MESSAGE: &str = "docs: update CHANGELOG.md";

/// Everything a release attempt can be configured with, loaded from `version-gate.toml` if
/// present.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// The file which contains the version to release. Relative paths are resolved against the
    /// working directory, absolute paths are used as-is.
    pub file: PathBuf,
    /// Prepended to the version to get the name of the Git tag (and the changelog heading).
    pub tag_prefix: String,
    /// What to do when looking up the tag fails for any reason other than it not existing.
    pub on_lookup_error: LookupFailure,
    pub changelog: Changelog,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            file: PathBuf::from(DEFAULT_VERSION_FILE),
            tag_prefix: String::from(DEFAULT_TAG_PREFIX),
            on_lookup_error: LookupFailure::default(),
            changelog: Changelog::default(),
        }
    }
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Changelog {
    pub path: RelativePathBuf,
    /// Used as the start of the changelog when the file doesn't exist yet.
    pub header: String,
    pub commit_message: String,
    pub message_format: MessageFormat,
}

impl Default for Changelog {
    fn default() -> Self {
        Self {
            path: RelativePathBuf::from(CHANGELOG_FILE),
            header: String::from(CHANGELOG_HEADER),
            commit_message: String::from(CHANGELOG_COMMIT_MESSAGE),
            message_format: MessageFormat::default(),
        }
    }
}

/// How to treat a tag lookup that failed (as opposed to one that found nothing).
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LookupFailure {
    /// Stop the release, an inconclusive lookup could mean the version was already released.
    #[default]
    Abort,
    /// Treat the tag as missing and release anyway.
    Proceed,
}

impl Config {
    pub const CONFIG_PATH: &'static str = "version-gate.toml";

    /// Load `version-gate.toml` from `root`, falling back to the defaults if there isn't one.
    ///
    /// ## Errors
    /// 1. The file exists but can't be read
    /// 2. The contents aren't a valid config
    pub fn load(root: &Path) -> Result<Self, Error> {
        let path = root.join(Self::CONFIG_PATH);
        if !path.exists() {
            debug!("No `{}` found, using default config", Self::CONFIG_PATH);
            return Ok(Self::default());
        }
        let source_code = fs::read_to_string(path.as_path())?;
        toml::from_str(&source_code).map_err(|source| Error::Toml { path, source })
    }

    /// The version file, resolved against `root` unless it's absolute.
    #[must_use]
    pub fn version_file(&self, root: &Path) -> PathBuf {
        root.join(&self.file)
    }

    #[must_use]
    pub fn changelog_path(&self, root: &Path) -> PathBuf {
        self.changelog.path.to_path(root)
    }

    #[must_use]
    pub fn tag_name(&self, version: &str) -> String {
        format!("{}{version}", self.tag_prefix)
    }
}

#[derive(Debug, Diagnostic, Error)]
pub enum Error {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Fs(#[from] fs::Error),
    #[error("Invalid config file {path}: {source}")]
    #[diagnostic(
        code(config::toml),
        help("Check the config file for typos, every key is optional and unknown keys are rejected.")
    )]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
