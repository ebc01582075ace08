use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn reports_a_single_isolated_marker() {
    let width = 32usize;
    let height = 32usize;
    let mut buf = vec![0u8; width * height];
    buf[16 * width + 16] = 200;

    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(&buf).unwrap();

    Command::cargo_bin("fimd")
        .unwrap()
        .args([
            file.path().to_str().unwrap(),
            "--width",
            "32",
            "--height",
            "32",
            "--radius",
            "3",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("marker 16 16"));
}

#[test]
fn rejects_a_file_of_the_wrong_size() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(&[0u8; 10]).unwrap();

    Command::cargo_bin("fimd")
        .unwrap()
        .args([
            file.path().to_str().unwrap(),
            "--width",
            "32",
            "--height",
            "32",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected width*height"));
}
