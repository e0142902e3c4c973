//! Command-line error paths. None of these reach the viewer.

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;

fn npyplot() -> Command {
    Command::new(env!("CARGO_BIN_EXE_npyplot"))
}

#[test]
fn help_lists_flags() {
    npyplot()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--default-titles"))
        .stdout(predicate::str::contains("--offset"));
}

#[test]
fn no_paths_is_usage_error() {
    npyplot()
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("PATH"));
}

#[test]
fn non_integer_offset_is_usage_error() {
    npyplot()
        .args(["a.npy", "--offset", "two"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("--offset"));
}

#[test]
fn missing_file_names_path() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nothing_here.npy");

    npyplot()
        .arg(&missing)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("nothing_here.npy"));
}

#[test]
fn non_npy_file_is_rejected() {
    let mut file = tempfile::Builder::new().suffix(".npy").tempfile().unwrap();
    file.write_all(b"not an array").unwrap();

    npyplot()
        .arg(file.path())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("NumPy"));
}
