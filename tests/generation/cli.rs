//! Smoke tests for the `randodo` binary.

use std::path::PathBuf;
use std::process::{Command, Output};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn randodo(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_randodo"))
        .args(args)
        .env_remove("RANDODO_FILE")
        .env_remove("RANDODO_SEED")
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run randodo")
}

fn stdout_lines(output: &Output) -> Vec<String> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn test_generate_with_seed_is_reproducible() {
    let file = fixture("people.rnd");
    let args = [
        "generate",
        "--file",
        file.to_str().unwrap(),
        "--name",
        "phone",
        "--count",
        "5",
        "--seed",
        "42",
    ];

    let first = randodo(&args);
    let second = randodo(&args);

    assert!(first.status.success());
    let lines = stdout_lines(&first);
    assert_eq!(lines.len(), 5);
    assert_eq!(lines, stdout_lines(&second));
    for line in &lines {
        assert!(line.starts_with("+1 ("), "unexpected phone {line:?}");
        assert_eq!(line.len(), "+1 (012) 345-6789".len());
    }
}

#[test]
fn test_generate_jsonl() {
    let file = fixture("people.rnd");
    let output = randodo(&[
        "generate",
        "--file",
        file.to_str().unwrap(),
        "--name",
        "first",
        "--count",
        "3",
        "--seed",
        "1",
        "--format",
        "jsonl",
    ]);

    assert!(output.status.success());
    let lines = stdout_lines(&output);
    assert_eq!(lines.len(), 3);
    for (index, line) in lines.iter().enumerate() {
        let record: serde_json::Value = serde_json::from_str(line).unwrap();
        assert_eq!(record["name"], "first");
        assert_eq!(record["index"], index as u64);
        let value = record["value"].as_str().unwrap();
        assert!(["ann", "bob", "eve", "kim"].contains(&value));
    }
}

#[test]
fn test_list_prints_definitions() {
    let file = fixture("people.rnd");
    let output = randodo(&["list", "--file", file.to_str().unwrap()]);

    assert!(output.status.success());
    let lines = stdout_lines(&output);
    assert_eq!(lines.len(), 6);
    assert_eq!(lines[1], "first = (ann|bob|eve|kim)");
}

#[test]
fn test_inspect_single_generator() {
    let file = fixture("people.rnd");
    let output = randodo(&["inspect", "--file", file.to_str().unwrap(), "--name", "digit"]);

    assert!(output.status.success());
    assert_eq!(stdout_lines(&output), vec!["digit = alt(seq([0123456789]))"]);
}

#[test]
fn test_unknown_generator_fails() {
    let file = fixture("people.rnd");
    let output = randodo(&["generate", "--file", file.to_str().unwrap(), "--name", "nope"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Generator not found: nope"), "stderr: {stderr}");
}

#[test]
fn test_broken_template_reports_line() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.rnd");
    std::fs::write(&path, "ok = [a-z]{3}\nbad = x{5,2}\n").unwrap();

    let output = randodo(&["list", "--file", path.to_str().unwrap()]);

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Line 2: invalid pattern for 'bad'"), "stderr: {stderr}");
}
