//! Integration tests for canopy

mod harness;

use std::path::MAIN_SEPARATOR;

use harness::{TestTree, canopy, run_canopy, sample_tree};
use predicates::prelude::*;

fn dir(name: &str) -> String {
    format!("{}{}", name, MAIN_SEPARATOR)
}

#[test]
fn test_basic_tree_output() {
    let tree = sample_tree();

    let (stdout, _stderr, code) = run_canopy(tree.path(), &[]);
    assert_eq!(code, Some(0));
    let lines: Vec<String> = stdout.lines().map(String::from).collect();
    let expected = vec![dir("dirA"), " - file1".to_string(), dir("dirB"), "file2".to_string()];
    assert_eq!(lines, expected);
}

#[test]
fn test_positional_and_root_flag_agree() {
    let tree = sample_tree();
    let parent = tree.path().parent().unwrap();
    let name = tree.path().file_name().unwrap().to_str().unwrap();

    let (positional, _, _) = run_canopy(parent, &[name]);
    let (flag, _, _) = run_canopy(parent, &["--root", name]);
    assert_eq!(positional, flag);
    assert!(positional.contains("file1"));
}

#[test]
fn test_root_and_positional_conflict() {
    let tree = sample_tree();
    canopy(tree.path())
        .args(["--root", ".", "."])
        .assert()
        .code(1);
}

#[test]
fn test_ignore_directory() {
    let tree = sample_tree();

    let (stdout, _stderr, code) = run_canopy(tree.path(), &["-I", "dirA", "--total"]);
    assert_eq!(code, Some(0));
    assert!(stdout.contains(&dir("dirA")), "ignored dir is still listed");
    assert!(!stdout.contains("file1"), "ignored dir is not opened: {}", stdout);
    assert!(stdout.contains("2 directories, 1 files"), "{}", stdout);
}

#[test]
#[cfg(unix)]
fn test_ignore_list_separator() {
    let tree = sample_tree();
    tree.add_file("dirB/inner", "");

    let (stdout, _stderr, _code) = run_canopy(tree.path(), &["--ignore", "dirA:dirB"]);
    assert!(!stdout.contains("file1"));
    assert!(!stdout.contains("inner"));
    assert!(stdout.contains("file2"));
}

#[test]
fn test_default_ignores_git_and_cache() {
    let tree = TestTree::new();
    tree.add_file(".git/HEAD", "ref");
    tree.add_file(".cache/blob", "");
    tree.add_file("src/main.rs", "");

    let (stdout, _stderr, _code) = run_canopy(tree.path(), &[]);
    assert!(stdout.contains(&dir(".git")));
    assert!(stdout.contains(&dir(".cache")));
    assert!(!stdout.contains("HEAD"));
    assert!(!stdout.contains("blob"));
    assert!(stdout.contains("main.rs"));
}

#[test]
fn test_total_flag() {
    let tree = sample_tree();
    canopy(tree.path())
        .arg("--total")
        .assert()
        .success()
        .stdout(predicate::str::ends_with("\n\n2 directories, 2 files\n"));
}

#[test]
fn test_full_path() {
    let tree = sample_tree();
    let root = tree.path().canonicalize().unwrap();

    let (stdout, _stderr, code) = run_canopy(&root, &["-f"]);
    assert_eq!(code, Some(0));
    let expected = root.join("dirA").join("file1");
    assert!(
        stdout.lines().any(|l| l == expected.display().to_string()),
        "full path mode should print absolute paths: {}",
        stdout
    );
}

#[test]
fn test_full_path_cleans_parent_components() {
    let tree = sample_tree();
    let root = tree.path().canonicalize().unwrap();

    let (stdout, _stderr, code) = run_canopy(&root.join("dirB"), &["../dirA", "-f"]);
    assert_eq!(code, Some(0));
    assert_eq!(stdout, format!("{}\n", root.join("dirA").join("file1").display()));
}

#[test]
fn test_dirs_only() {
    let tree = sample_tree();

    let (stdout, _stderr, code) = run_canopy(tree.path(), &["-d", "--total"]);
    assert_eq!(code, Some(0));
    assert!(!stdout.contains("file1"));
    assert!(!stdout.contains("file2"));
    assert!(stdout.contains("2 directories, 0 files"));
}

#[test]
fn test_json_output() {
    let tree = sample_tree();

    let (stdout, _stderr, code) = run_canopy(tree.path(), &["--json"]);
    assert_eq!(code, Some(0));
    let value: serde_json::Value = serde_json::from_str(&stdout).expect("valid JSON");
    assert_eq!(value["directories"], 2);
    assert_eq!(value["files"], 2);
    assert_eq!(value["nodes"][1]["name"], "file1");
    assert_eq!(value["nodes"][1]["depth"], 1);
}

#[test]
fn test_forced_color() {
    let tree = sample_tree();
    canopy(tree.path())
        .args(["--color", "always"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\x1b["));
}

#[test]
fn test_no_color_flag_wins() {
    let tree = sample_tree();
    canopy(tree.path())
        .args(["--color", "always", "--no-color"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\x1b[").not());
}

#[test]
fn test_invalid_root() {
    let tree = sample_tree();
    canopy(tree.path())
        .arg("invalid")
        .assert()
        .code(4)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("invalid"));
}

#[test]
fn test_version() {
    let tree = TestTree::new();
    canopy(tree.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_single_worker_matches_default() {
    let tree = TestTree::new();
    tree.add_grid(3, 3, 2);

    let (parallel, _, _) = run_canopy(tree.path(), &["--total"]);
    let (serial, _, _) = run_canopy(tree.path(), &["-j", "1", "--total"]);
    assert_eq!(parallel, serial);
    // 3 + 9 + 27 directories, 2 files in each plus the root
    assert!(parallel.ends_with("39 directories, 80 files\n"), "{}", parallel);
}
