//! Smoke tests for the `stepjump` binary.
#![expect(clippy::expect_used, reason = "tests use explicit failures for clarity")]

use assert_cmd::Command;
use std::str;

use stepjump::test_support::{Project, ProjectBuilder};

fn project() -> Project {
    ProjectBuilder::new()
        .feature(
            "cats.feature",
            concat!(
                "Feature: cats\n",
                "  Scenario: two cats\n",
                "    Given a cat named Tom\n",
                "    And a cat named Felix\n",
            ),
        )
        .steps(
            "cats.rs",
            "#[given(\"a cat named {name}\")]\nfn cat(name: String) {}\n",
        )
        .build()
}

fn stepjump(project: &Project) -> Command {
    let mut cmd = Command::cargo_bin("stepjump").expect("binary exists");
    cmd.current_dir(project.root()).env_remove("STEPJUMP_LOG_LEVEL");
    cmd
}

fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.output().expect("runs");
    assert!(output.status.success(), "{output:?}");
    str::from_utf8(&output.stdout).expect("utf8").to_owned()
}

#[test]
fn jump_from_feature_prints_single_target() {
    let project = project();
    let stdout = stdout_of(stepjump(&project).args(["jump", "features/cats.feature", "3"]));
    assert_eq!(
        stdout.trim_end(),
        format!("{}:1", project.path("features/steps/cats.rs").display())
    );
}

#[test]
fn jump_from_implementation_lists_every_use() {
    let project = project();
    let stdout = stdout_of(stepjump(&project).args(["jump", "features/steps/cats.rs", "2"]));
    let lines: Vec<_> = stdout.lines().collect();
    assert_eq!(lines.len(), 2, "{stdout}");
    assert!(lines.first().is_some_and(|line| line.ends_with(":3: Given a cat named Tom")));
    assert!(lines.get(1).is_some_and(|line| line.ends_with(":4: Given a cat named Felix")));
}

#[test]
fn jump_reads_unsaved_buffer_from_stdin() {
    let project = project();
    let stdout = stdout_of(
        stepjump(&project)
            .args(["jump", "features/new.feature", "3", "--stdin", "--format", "json"])
            .write_stdin("Feature: new\n  Scenario: s\n    Given a cat named Kit\n"),
    );
    let parsed: serde_json::Value = serde_json::from_str(&stdout).expect("json output");
    assert_eq!(parsed.get("kind"), Some(&serde_json::Value::from("jump")));
    assert_eq!(parsed.get("line"), Some(&serde_json::Value::from(1_u64)));
}

#[test]
fn unsupported_file_type_is_reported() {
    let project = project();
    let stdout = stdout_of(stepjump(&project).args([
        "jump",
        "features/cats.feature",
        "3",
        "--filetype",
        "python",
    ]));
    assert_eq!(stdout.trim_end(), "File type \"python\" is not supported");
}

#[test]
fn errors_reports_clean_project() {
    let project = project();
    let stdout = stdout_of(stepjump(&project).arg("errors"));
    assert_eq!(stdout.trim_end(), "No errors found");
}

#[test]
fn errors_lists_relative_locations() {
    let project = ProjectBuilder::new()
        .steps("bad.rs", "\n#[then(\"{x:frobnicate}\")]\nfn bad() {}\n")
        .build();
    let stdout = stdout_of(stepjump(&project).arg("errors"));
    assert!(
        stdout.starts_with("features/steps/bad.rs:2: unknown type `frobnicate`"),
        "{stdout}"
    );
}

#[test]
fn missing_file_without_stdin_fails() {
    let project = project();
    let output = stepjump(&project)
        .args(["jump", "features/missing.feature", "1"])
        .output()
        .expect("runs");
    assert!(!output.status.success());
}
