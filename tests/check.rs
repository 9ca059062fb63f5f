use helpers::*;
use snapbox::cmd::{cargo_bin, Command};

mod helpers;

/// `check` prints the version that would be released.
#[test]
fn untagged_version() {
    let temp_dir = tempfile::tempdir().unwrap();
    let temp_path = temp_dir.path();
    repo_with_version(temp_path, " 3.0.0 \n", "feat!: breaking");

    Command::new(cargo_bin!("version-gate"))
        .arg("check")
        .current_dir(temp_path)
        .assert()
        .success()
        .stdout_eq("3.0.0\n");
    assert!(!temp_path.join("CHANGELOG.md").exists());
}

/// `check` prints nothing for a version that's already tagged.
#[test]
fn tagged_version() {
    let temp_dir = tempfile::tempdir().unwrap();
    let temp_path = temp_dir.path();
    repo_with_version(temp_path, "3.0.0", "feat!: breaking");
    tag(temp_path, "v3.0.0");

    Command::new(cargo_bin!("version-gate"))
        .arg("check")
        .current_dir(temp_path)
        .assert()
        .success()
        .stdout_eq("");
}

/// `--file` points at a different version file.
#[test]
fn file_override() {
    let temp_dir = tempfile::tempdir().unwrap();
    let temp_path = temp_dir.path();
    repo_with_version(temp_path, "1.0.0", "feat: init");
    tag(temp_path, "v1.0.0");
    std::fs::write(temp_path.join("NEXT_VERSION"), "1.1.0").unwrap();

    Command::new(cargo_bin!("version-gate"))
        .arg("check")
        .arg("--file")
        .arg("NEXT_VERSION")
        .current_dir(temp_path)
        .assert()
        .success()
        .stdout_eq("1.1.0\n");
}

/// `--file` can point at an absolute path outside the repository.
#[test]
fn absolute_file_override() {
    let temp_dir = tempfile::tempdir().unwrap();
    let temp_path = temp_dir.path();
    repo_with_version(temp_path, "1.0.0", "feat: init");
    let elsewhere = tempfile::tempdir().unwrap();
    let version_file = elsewhere.path().join("VERSION");
    std::fs::write(&version_file, "2.0.0\n").unwrap();

    Command::new(cargo_bin!("version-gate"))
        .arg("check")
        .arg("--file")
        .arg(&version_file)
        .current_dir(temp_path)
        .assert()
        .success()
        .stdout_eq("2.0.0\n");
}

/// A version that can't be a reference name can't have been tagged, so it's released.
#[test]
fn version_that_is_not_a_valid_tag_name() {
    let temp_dir = tempfile::tempdir().unwrap();
    let temp_path = temp_dir.path();
    repo_with_version(temp_path, "1.0.0 beta", "feat: init");

    Command::new(cargo_bin!("version-gate"))
        .arg("check")
        .current_dir(temp_path)
        .assert()
        .success()
        .stdout_eq("1.0.0 beta\n");
}
