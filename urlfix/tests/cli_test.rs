//! Process-level tests of the `generate` and `top-urls` binaries.

use std::io::Write;
use std::process::{Command, Output, Stdio};

use tempfile::NamedTempFile;

fn generate(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_generate"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run generate")
}

fn top_urls(args: &[&str], stdin: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_top-urls"))
        .args(args)
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to run top-urls");

    // Dropping the pipe closes standard input. The binary may exit without
    // reading it when a path is given, so a failed write is not an error.
    if let Some(mut pipe) = child.stdin.take() {
        let _ = pipe.write_all(stdin.as_bytes());
    }
    child.wait_with_output().unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).unwrap()
}

fn fixture_file(count: &str) -> NamedTempFile {
    let output = generate(&[count]);
    assert!(output.status.success());

    let mut file = NamedTempFile::new().unwrap();
    file.write_all(&output.stdout).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_generate_three() {
    let output = generate(&["3"]);
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        stdout(&output),
        "http://api.tech.com/item/0 3\n\
         http://api.tech.com/item/1 1\n\
         http://api.tech.com/item/2 1\n"
    );
    assert!(output.stderr.is_empty());
}

#[test]
fn test_generate_matches_golden_file() {
    let golden = std::fs::read_to_string("../urlfix-core/tests/golden/fixtures_100.txt").unwrap();
    let output = generate(&["100"]);
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output), golden);
}

#[test]
fn test_generate_is_reproducible() {
    let first = generate(&["2000"]);
    let second = generate(&["2000"]);
    assert_eq!(first.stdout, second.stdout);
    assert_eq!(stdout(&first).lines().count(), 2000);
}

#[test]
fn test_generate_lines_are_well_formed() {
    let n = 500u64;
    let output = generate(&["500"]);
    for (k, line) in stdout(&output).lines().enumerate() {
        let (url, count) = line.split_once(' ').unwrap();
        assert_eq!(url, format!("http://api.tech.com/item/{}", k));
        let count: u64 = count.parse().unwrap();
        assert!((1..=n).contains(&count), "Count {} out of range", count);
    }
}

#[test]
fn test_generate_zero() {
    let output = generate(&["0"]);
    assert_eq!(output.status.code(), Some(0));
    assert!(output.stdout.is_empty());
}

#[test]
fn test_generate_usage() {
    for args in [&[][..], &["1", "2"][..], &["1", "2", "3"][..]] {
        let output = generate(args);
        assert_eq!(output.status.code(), Some(1), "args: {:?}", args);
        assert_eq!(stdout(&output), "Usage: generate <count>\n");
    }
}

#[test]
fn test_generate_invalid_count() {
    for arg in ["abc", "3.5", ""] {
        let output = generate(&[arg]);
        assert_eq!(output.status.code(), Some(2), "arg: {:?}", arg);
        assert!(output.stdout.is_empty());
        assert!(String::from_utf8_lossy(&output.stderr).contains("invalid count"));
    }
}

#[test]
fn test_generate_negative_count() {
    let output = generate(&["-4"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("must not be negative"));
}

#[test]
fn test_generate_closed_stdout() {
    let mut child = Command::new(env!("CARGO_BIN_EXE_generate"))
        .arg("1000000")
        .env_remove("RUST_LOG")
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to run generate");

    // Nobody reads the output, so writes fail once the pipe is closed
    drop(child.stdout.take());

    let output = child.wait_with_output().unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("failed to write fixtures"));
}

#[test]
fn test_top_urls_path_argument() {
    let file = fixture_file("100");
    let path = file.path().to_str().unwrap();
    let output = top_urls(&[path, "-k", "3"], "");

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        stdout(&output),
        "http://api.tech.com/item/73\n\
         http://api.tech.com/item/36\n\
         http://api.tech.com/item/44\n"
    );
}

#[test]
fn test_top_urls_path_from_stdin() {
    let file = fixture_file("100");
    let path = file.path().to_str().unwrap();
    let output = top_urls(&[], &format!("{}\n", path));

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output).lines().count(), 10);
    assert_eq!(stdout(&output).lines().next(), Some("http://api.tech.com/item/73"));
}

#[test]
fn test_top_urls_sequential_matches_parallel() {
    let file = fixture_file("5000");
    let path = file.path().to_str().unwrap();

    let sequential = top_urls(&[path, "--sequential", "-k", "20"], "");
    let parallel = top_urls(
        &[path, "-k", "20", "--threads", "3", "--segment-size", "700"],
        "",
    );

    assert_eq!(sequential.status.code(), Some(0));
    assert_eq!(parallel.status.code(), Some(0));
    assert_eq!(sequential.stdout, parallel.stdout);
    assert_eq!(stdout(&sequential).lines().count(), 20);
}

#[test]
fn test_top_urls_missing_file() {
    let output = top_urls(&["/nonexistent/fixtures.txt"], "");
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("failed to scan"));
}

#[test]
fn test_top_urls_empty_stdin() {
    let output = top_urls(&[], "");
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("standard input"));
}
