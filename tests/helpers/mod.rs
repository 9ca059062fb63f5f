#![allow(dead_code)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

mod git;

use std::path::Path;

pub use git::*;

/// A Git repo in `path` with `version` committed as the version file, and `message` as the
/// message of that commit.
pub fn repo_with_version(path: &Path, version: &str, message: &str) {
    init(path);
    std::fs::write(path.join("version"), version).unwrap();
    add_all(path);
    commit(path, message);
}
