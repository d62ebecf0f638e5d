//! Integration tests for the jdx CLI.
//!
//! These tests run the built binary against data files in temporary
//! directories.

use rstest::{fixture, rstest};
use tempfile::TempDir;

mod common;
use common::{run_jdx_in_dir, run_jdx_with_input, stderr, stdout, write_demo};

// ============================================================================
// Test Fixtures
// ============================================================================

/// Provides a temporary directory holding `demo.data`
#[fixture]
fn demo_dir() -> TempDir {
    let temp = TempDir::new().expect("Failed to create temp directory");
    write_demo(temp.path());
    temp
}

// ============================================================================
// Help and Errors
// ============================================================================

#[test]
fn test_cli_help_shows_all_commands() {
    let temp = TempDir::new().expect("Failed to create temp directory");
    let output = run_jdx_in_dir(temp.path(), &["--help"]);

    assert!(output.status.success());
    let out = stdout(&output);
    for command in ["summary", "roots", "cycles", "show", "export", "encode", "explore"] {
        assert!(out.contains(command), "missing {command} in help:\n{out}");
    }
}

#[test]
fn test_missing_data_file_fails() {
    let temp = TempDir::new().expect("Failed to create temp directory");
    let output = run_jdx_in_dir(temp.path(), &["summary", "nothing"]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("error"));
}

#[test]
fn test_malformed_data_reports_line() {
    let temp = TempDir::new().expect("Failed to create temp directory");
    std::fs::write(temp.path().join("bad.data"), "Pa\nSX\nD0.0>3.0\n").unwrap();

    let output = run_jdx_in_dir(temp.path(), &["roots", "bad"]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("line 3"), "{}", stderr(&output));
}

#[rstest]
fn test_unknown_package_fails(demo_dir: TempDir) {
    let output = run_jdx_in_dir(demo_dir.path(), &["show", "demo", "org.missing"]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("org.missing"));
}

// ============================================================================
// One-shot Commands
// ============================================================================

#[rstest]
fn test_summary_by_basename(demo_dir: TempDir) {
    let output = run_jdx_in_dir(demo_dir.path(), &["summary", "demo"]);

    assert!(output.status.success(), "{}", stderr(&output));
    let out = stdout(&output);
    assert!(out.contains("Java Package Dependency Data"));
    assert!(out.contains("Packages:     3"), "{out}");
    assert!(out.contains("Roots:        0"), "{out}");
}

#[rstest]
fn test_summary_json(demo_dir: TempDir) {
    let output = run_jdx_in_dir(demo_dir.path(), &["--json", "summary", "demo.data"]);

    assert!(output.status.success(), "{}", stderr(&output));
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["meta"]["basename"], "demo");
    assert_eq!(value["nPackages"], 3);
    assert_eq!(value["nDependencies"], 3);
    assert_eq!(value["longestCycle"], 0);
}

#[rstest]
fn test_cycles_text(demo_dir: TempDir) {
    let output = run_jdx_in_dir(demo_dir.path(), &["cycles", "demo"]);

    assert!(output.status.success(), "{}", stderr(&output));
    let out = stdout(&output);
    assert!(out.contains("Found 1 package cycle(s)"), "{out}");
    assert!(out.contains("com.acme -> com.acme.util -> com.acme"), "{out}");
}

#[rstest]
fn test_cycles_check_agrees(demo_dir: TempDir) {
    let output = run_jdx_in_dir(demo_dir.path(), &["cycles", "demo", "--check"]);

    assert!(output.status.success(), "{}", stderr(&output));
    assert!(stdout(&output).contains("Declared cycles agree"));
}

#[rstest]
fn test_show_class_json(demo_dir: TempDir) {
    let output = run_jdx_in_dir(
        demo_dir.path(),
        &["show", "demo", "com.acme.util", "Strings", "--json"],
    );

    assert!(output.status.success(), "{}", stderr(&output));
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["detail"]["nextHops"][0], 0);
    assert_eq!(value["imports"][0]["qualifiedName"], "com.acme.Gadget");
    assert_eq!(value["imports"][0]["inCycle"], true);
}

#[rstest]
fn test_export_to_stdout(demo_dir: TempDir) {
    let output = run_jdx_in_dir(demo_dir.path(), &["export", "demo", "-o", "-", "--compact"]);

    assert!(output.status.success(), "{}", stderr(&output));
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["packages"][2], "com.acme.app");
    assert_eq!(value["codedDependencies"][0], "0.0>1.0");
    assert_eq!(value["codedCycles"][0], "0}1}");
}

#[rstest]
fn test_encode_round_trips_through_the_cli(demo_dir: TempDir) {
    let output = run_jdx_in_dir(demo_dir.path(), &["encode", "demo", "-o", "copy.data"]);
    assert!(output.status.success(), "{}", stderr(&output));

    let output = run_jdx_in_dir(demo_dir.path(), &["--json", "summary", "copy"]);
    assert!(output.status.success(), "{}", stderr(&output));
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["meta"]["file"], "copy.data");
    assert_eq!(value["nClasses"], 4);
    assert_eq!(value["nCycles"], 1);
}

#[rstest]
fn test_config_file_changes_suffix(demo_dir: TempDir) {
    std::fs::rename(demo_dir.path().join("demo.data"), demo_dir.path().join("demo.deps")).unwrap();
    std::fs::write(demo_dir.path().join("jdx.yaml"), "data-suffix: .deps\n").unwrap();

    let output = run_jdx_in_dir(demo_dir.path(), &["roots", "demo"]);

    assert!(output.status.success(), "{}", stderr(&output));
    assert!(stdout(&output).contains("No root packages"));
}

// ============================================================================
// Explore
// ============================================================================

#[rstest]
fn test_explore_session(demo_dir: TempDir) {
    let output = run_jdx_with_input(
        demo_dir.path(),
        &["explore", "demo"],
        "p com.acme.app\nc Main\ni 0\nn 1\nq\n",
    );

    assert!(output.status.success(), "{}", stderr(&output));
    let out = stdout(&output);
    assert!(out.contains("Imports of com.acme.app.Main (1)"), "{out}");
    assert!(out.contains("Imports of com.acme.Widget (1)"), "{out}");
    assert!(out.contains("Next hops"), "{out}");
}

#[rstest]
fn test_explore_survives_bad_commands(demo_dir: TempDir) {
    let output = run_jdx_with_input(demo_dir.path(), &["explore", "demo"], "c 0\nwat\nls\n");

    assert!(output.status.success(), "{}", stderr(&output));
    let out = stdout(&output);
    assert!(out.contains("cannot select class while nothing is selected"), "{out}");
    assert!(out.contains("unknown command 'wat'"), "{out}");
    assert!(out.contains("Packages (3)"), "{out}");
}
