use snapbox::cmd::{cargo_bin, Command};

/// `get-version` prints the trimmed contents of the version file, no Git repo required.
#[test]
fn get_version() {
    let temp_dir = tempfile::tempdir().unwrap();
    std::fs::write(temp_dir.path().join("version"), "\n  0.9.2  \n").unwrap();

    Command::new(cargo_bin!("version-gate"))
        .arg("get-version")
        .current_dir(temp_dir.path())
        .assert()
        .success()
        .stdout_eq("0.9.2\n");
}

/// `get-version` fails when there is no version file.
#[test]
fn missing_version_file() {
    let temp_dir = tempfile::tempdir().unwrap();

    Command::new(cargo_bin!("version-gate"))
        .arg("get-version")
        .current_dir(temp_dir.path())
        .assert()
        .failure();
}
