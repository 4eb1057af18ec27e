use std::io::Write;
use std::process::{Command, Output};

use tempfile::NamedTempFile;

fn csvtv(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_csvtv"))
        .args(args)
        .env_remove("CSVTV_LOG")
        .output()
        .expect("failed to start csvtv")
}

fn csv_file(content: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content).unwrap();
    file
}

#[test]
fn no_arguments_prints_usage() {
    let output = csvtv(&[]);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(String::from_utf8_lossy(&output.stdout), "Usage: csvtv <filename>\n");
}

#[test]
fn two_arguments_print_usage() {
    let output = csvtv(&["a.csv", "b.csv"]);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(String::from_utf8_lossy(&output.stdout), "Usage: csvtv <filename>\n");
}

#[test]
fn missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.csv");
    let output = csvtv(&[path.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("no such file or directory"), "{stdout}");
}

#[test]
fn malformed_file() {
    let file = csv_file(b"a,b,c\n1,2\n");
    let output = csvtv(&[file.path().to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));
    assert!(!output.stdout.is_empty());
}

#[test]
fn empty_file() {
    let file = csv_file(b"");
    let output = csvtv(&[file.path().to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("file contains no records"), "{stdout}");
}

#[test]
fn unterminated_quote() {
    let file = csv_file(b"a,\"bc\nd,e\n");
    let output = csvtv(&[file.path().to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("unterminated quoted-field"), "{stdout}");
}

#[test]
fn help_flag_is_taken_as_filename() {
    let dir = tempfile::tempdir().unwrap();
    let output = Command::new(env!("CARGO_BIN_EXE_csvtv"))
        .arg("--help")
        .current_dir(dir.path())
        .env_remove("CSVTV_LOG")
        .output()
        .expect("failed to start csvtv");
    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("open --help: no such file or directory"), "{stdout}");
}

#[test]
fn dollar_in_filename_is_opened_as_is() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report$2024.csv");
    std::fs::write(&path, "").unwrap();
    let output = csvtv(&[path.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("file contains no records"), "{stdout}");
}
