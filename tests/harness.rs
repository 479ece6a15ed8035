//! Test harness for canopy integration tests

use std::path::Path;

use assert_cmd::Command;

pub use canopy::test_utils::TestTree;

/// A `canopy` command running in `dir` with colors and diagnostics off.
pub fn canopy(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("canopy").expect("Failed to find canopy binary");
    cmd.current_dir(dir).env("NO_COLOR", "1").env_remove("RUST_LOG");
    cmd
}

/// Run canopy and return (stdout, stderr, exit code).
pub fn run_canopy(dir: &Path, args: &[&str]) -> (String, String, Option<i32>) {
    let output = canopy(dir).args(args).output().expect("Failed to run canopy");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (stdout, stderr, output.status.code())
}

/// The tree used by most tests: dirA/file1, dirB/, file2
#[allow(dead_code)]
pub fn sample_tree() -> TestTree {
    let tree = TestTree::new();
    tree.add_file("dirA/file1", "1");
    tree.add_dir("dirB");
    tree.add_file("file2", "2");
    tree
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_harness_creates_temp_dir() {
        let tree = TestTree::new();
        assert!(tree.path().exists());
    }

    #[test]
    fn test_harness_sample_tree() {
        let tree = sample_tree();
        assert!(tree.path().join("dirA/file1").is_file());
        assert!(tree.path().join("dirB").is_dir());
    }
}
