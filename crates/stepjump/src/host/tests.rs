//! Tests for the front-end adapter.

use std::convert::Infallible;

use rstest::rstest;

use super::*;
use crate::test_support::{Project, ProjectBuilder};

#[derive(Debug, PartialEq, Eq)]
enum Shown {
    Jump(PathBuf, usize),
    Locations(Vec<ListEntry>, usize),
    Quickfix(Vec<ListEntry>, usize),
    Message(String),
}

struct RecordingHost {
    buffer: Buffer,
    file_type: Option<&'static str>,
    cursor: usize,
    shown: Vec<Shown>,
}

impl RecordingHost {
    fn at(buffer: Buffer, file_type: Option<&'static str>, cursor: usize) -> Self {
        Self {
            buffer,
            file_type,
            cursor,
            shown: Vec::new(),
        }
    }
}

impl Host for RecordingHost {
    type Error = Infallible;

    fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    fn file_type(&self) -> Option<&str> {
        self.file_type
    }

    fn cursor_line(&self) -> usize {
        self.cursor
    }

    fn jump(&mut self, target: &StepOccurrence) -> Result<(), Infallible> {
        self.shown
            .push(Shown::Jump(target.filepath.clone(), target.line));
        Ok(())
    }

    fn show_locations(&mut self, entries: Vec<ListEntry>, height: usize) -> Result<(), Infallible> {
        self.shown.push(Shown::Locations(entries, height));
        Ok(())
    }

    fn show_quickfix(&mut self, entries: Vec<ListEntry>, height: usize) -> Result<(), Infallible> {
        self.shown.push(Shown::Quickfix(entries, height));
        Ok(())
    }

    fn message(&mut self, text: &str) -> Result<(), Infallible> {
        self.shown.push(Shown::Message(text.to_owned()));
        Ok(())
    }
}

fn project_with_users(count: usize) -> Project {
    let feature: String = std::iter::once("Feature: users\n  Scenario: many\n".to_owned())
        .chain((0..count).map(|n| format!("    Given a user named user{n}\n")))
        .collect();
    ProjectBuilder::new()
        .feature("users.feature", &feature)
        .steps(
            "users.rs",
            "#[given(\"a user named {name}\")]\nfn user(name: String) {}\n",
        )
        .build()
}

fn run_jump(host: &mut RecordingHost) {
    let Ok(()) = jump(host);
}

#[rstest]
#[case(Some("python"), "File type \"python\" is not supported")]
#[case(None, "File type \"<UNKNOWN>\" is not supported")]
fn rejects_unsupported_file_types(#[case] file_type: Option<&'static str>, #[case] expected: &str) {
    let mut host = RecordingHost::at(Buffer::from_text("x.py", ""), file_type, 1);
    run_jump(&mut host);
    assert_eq!(host.shown, vec![Shown::Message(expected.to_owned())]);
}

#[test]
fn single_match_jumps_directly() {
    let project = project_with_users(1);
    let buffer = Buffer::from_text(
        project.path("features/users.feature"),
        "Feature: users\n  Scenario: many\n    Given a user named user0\n",
    );
    let mut host = RecordingHost::at(buffer, Some("cucumber"), 3);
    run_jump(&mut host);
    assert_eq!(
        host.shown,
        vec![Shown::Jump(project.path("features/steps/users.rs"), 1)]
    );
}

#[rstest]
#[case(2, 2)]
#[case(5, 5)]
#[case(7, 5)]
fn several_matches_show_a_location_list(#[case] users: usize, #[case] height: usize) {
    let project = project_with_users(users);
    let buffer = Buffer::from_text(
        project.path("features/steps/users.rs"),
        "#[given(\"a user named {name}\")]\nfn user(name: String) {}\n",
    );
    let mut host = RecordingHost::at(buffer, Some("rust"), 1);
    run_jump(&mut host);

    let [Shown::Locations(entries, shown_height)] = host.shown.as_slice() else {
        panic!("expected a location list, got {:?}", host.shown);
    };
    assert_eq!(*shown_height, height);
    assert_eq!(entries.len(), users);
    assert!(
        entries
            .iter()
            .all(|entry| entry.text.starts_with("Given a user named user"))
    );
}

#[test]
fn engine_errors_become_messages() {
    let project = project_with_users(1);
    let buffer = Buffer::from_text(
        project.path("features/steps/other.rs"),
        "#[then(\"nobody uses this\")]\nfn unused() {}\n",
    );
    let mut host = RecordingHost::at(buffer, Some("rust"), 1);
    run_jump(&mut host);
    assert_eq!(
        host.shown,
        vec![Shown::Message("Unused step implementation".to_owned())]
    );
}

#[test]
fn report_errors_lists_findings() {
    let project = ProjectBuilder::new()
        .steps("bad.rs", "#[given(\"{x:frobnicate}\")]\nfn bad() {}\n")
        .build();
    let buffer = Buffer::from_text(project.path("features/steps/bad.rs"), "");
    let mut host = RecordingHost::at(buffer, Some("rust"), 1);
    let Ok(()) = report_errors(&mut host);

    let [Shown::Quickfix(entries, 1)] = host.shown.as_slice() else {
        panic!("expected a quick-fix list, got {:?}", host.shown);
    };
    let [entry] = entries.as_slice() else {
        panic!("expected one entry, got {entries:?}");
    };
    assert_eq!(entry.line, 1);
    assert!(entry.filepath.ends_with("features/steps/bad.rs"));
    assert!(entry.text.contains("frobnicate"));
}

#[test]
fn report_errors_on_clean_project_says_so() {
    let project = project_with_users(1);
    let mut host = RecordingHost::at(Buffer::from_text(project.root(), ""), None, 1);
    let Ok(()) = report_errors(&mut host);
    assert_eq!(host.shown, vec![Shown::Message("No errors found".to_owned())]);
}

#[test]
fn list_height_is_capped() {
    assert_eq!(list_height(0), 0);
    assert_eq!(list_height(3), 3);
    assert_eq!(list_height(50), MAX_LIST_HEIGHT);
}
