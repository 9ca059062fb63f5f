//! Proxies to FS utils that _either_ actually write to files or log what would happen (for dry runs).

use std::{
    fmt::Display,
    io,
    path::{Path, PathBuf},
};

use log::{info, trace};
use miette::Diagnostic;
use thiserror::Error;

/// Writes to a file if this is not a dry run, or logs just the diff if it is.
///
/// This is how the changelog gets updated, the new entry is the diff.
pub(crate) fn write<C: AsRef<[u8]> + Display, Diff: Display>(
    to_write: WriteType<C, Diff>,
    path: &Path,
) -> Result<(), Error> {
    match to_write {
        WriteType::DryRun(diff) => {
            info!("Would add the following to {}: {diff}", path.display());
            Ok(())
        }
        WriteType::Real(contents) => {
            trace!("Writing {} to {}", contents, path.display());
            std::fs::write(path, contents).map_err(|source| Error::Write {
                path: path.into(),
                source,
            })
        }
    }
}

pub(crate) enum WriteType<Real, DryRun> {
    Real(Real),
    DryRun(DryRun),
}

/// Used for the version file, the changelog, and the config file.
pub(crate) fn read_to_string<P: AsRef<Path> + Into<PathBuf>>(path: P) -> Result<String, Error> {
    std::fs::read_to_string(path.as_ref()).map_err(|source| Error::Read {
        path: path.into(),
        source,
    })
}

#[derive(Debug, Diagnostic, Error)]
pub enum Error {
    #[error("Error writing to {path}: {source}")]
    #[diagnostic(
        code(fs::write),
        help("Make sure you have permission to write to this file.")
    )]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Error reading from {path}: {source}")]
    #[diagnostic(
        code(fs::read),
        help("Make sure the file exists and that you have permission to read it.")
    )]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn dry_run_does_not_touch_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("CHANGELOG.md");
        write(WriteType::<&str, &str>::DryRun("- entry"), &path).unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = read_to_string(dir.path().join("version"));
        assert!(matches!(result, Err(Error::Read { .. })));
    }
}
