use std::{path::Path, process::Command};

/// Run `git` with `args` in `path`, panicking with stderr if it fails. Returns stdout.
fn git(path: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .args(args)
        .current_dir(path)
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "{}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// Create a Git repo in `path` with some fake config.
pub fn init(path: &Path) {
    git(path, &["init", "--initial-branch=main"]);
    // Configure fake Git user.
    git(path, &["config", "user.email", "fake@version-gate.dev"]);
    git(path, &["config", "user.name", "Fake version-gate"]);
}

/// Create a commit with `message` in the Git repo which exists in `path`.
pub fn commit(path: &Path, message: &str) {
    git(path, &["commit", "--allow-empty", "-m", message]);
}

/// Create a tag with `label` in the Git repo which exists in `path`.
pub fn tag(path: &Path, label: &str) {
    git(path, &["tag", label]);
}

/// Add all files to git
pub fn add_all(path: &Path) {
    git(path, &["add", "."]);
}

/// See which files, if any, are dirty in a Git repo
pub fn status(path: &Path) -> Vec<String> {
    let mut lines: Vec<String> = git(path, &["status", "--porcelain"])
        .lines()
        .map(String::from)
        .collect();
    lines.sort();
    lines
}

/// The full message of the commit at HEAD
pub fn last_commit_message(path: &Path) -> String {
    git(path, &["log", "-1", "--pretty=%B"]).trim().to_string()
}

/// How many commits are reachable from HEAD
pub fn commit_count(path: &Path) -> usize {
    git(path, &["rev-list", "--count", "HEAD"])
        .trim()
        .parse()
        .unwrap()
}
