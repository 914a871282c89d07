//! Behavioural tests for diagnostics published on save.
#![expect(
    clippy::expect_used,
    reason = "behavioural tests use explicit panics for clarity"
)]

use std::path::Path;

use lsp_types::{DidSaveTextDocumentParams, TextDocumentIdentifier, Url};
use stepjump::discovery::ProjectLayout;
use stepjump::resolver::validate_project;
use stepjump::test_support::{Project, ProjectBuilder};
use stepjump_server::handlers::{collect_diagnostics, handle_did_save_text_document};
use stepjump_server::server::ServerState;

fn save(state: &mut ServerState, path: &Path) {
    let params = DidSaveTextDocumentParams {
        text_document: TextDocumentIdentifier {
            uri: Url::from_file_path(path).expect("file URI"),
        },
        text: None,
    };
    handle_did_save_text_document(state, params);
}

fn broken_project() -> Project {
    ProjectBuilder::new()
        .feature("ok.feature", "Feature: ok\n  Scenario: s\n    Given fine\n")
        .feature("broken.feature", "this is not gherkin\n")
        .steps(
            "bad.rs",
            concat!(
                "#[given(\"fine\")]\n",
                "fn fine() {}\n",
                "#[when(\"{n:frobnicate}\")]\n",
                "fn bad() {}\n",
                "#[then(\"{oops\")]\n",
                "fn worse() {}\n",
            ),
        )
        .build()
}

#[test]
fn diagnostics_are_grouped_per_file_in_order() {
    let project = broken_project();
    let layout = ProjectLayout::discover(&project.root()).expect("layout");
    let grouped = collect_diagnostics(validate_project(&layout));

    let files: Vec<_> = grouped.keys().cloned().collect();
    assert_eq!(
        files,
        vec![
            project.path("features/broken.feature"),
            project.path("features/steps/bad.rs"),
        ]
    );

    let rust = grouped
        .get(&project.path("features/steps/bad.rs"))
        .expect("rust diagnostics");
    let lines: Vec<_> = rust.iter().map(|d| d.range.start.line).collect();
    assert_eq!(lines, vec![2, 4]);
    assert!(rust.iter().all(|d| d.source.as_deref() == Some("stepjump")));
    assert!(
        rust.first()
            .is_some_and(|d| d.message.contains("unknown type `frobnicate`"))
    );
}

#[test]
fn save_tracks_and_clears_published_files() {
    let project = broken_project();
    let mut state = ServerState::new();

    save(&mut state, &project.path("features/ok.feature"));
    let published: Vec<_> = state.published_files().map(Path::to_path_buf).collect();
    assert_eq!(published.len(), 2);

    std::fs::write(
        project.path("features/broken.feature"),
        "Feature: fixed\n  Scenario: s\n    Given fine\n",
    )
    .expect("rewrite feature");
    std::fs::write(
        project.path("features/steps/bad.rs"),
        "#[given(\"fine\")]\nfn fine() {}\n",
    )
    .expect("rewrite steps");

    save(&mut state, &project.path("features/steps/bad.rs"));
    assert_eq!(state.published_files().count(), 0);
}

#[test]
fn saving_outside_a_project_is_ignored() {
    let dir = tempfile::TempDir::new().expect("temp dir");
    let path = dir.path().join("loose.feature");
    std::fs::write(&path, "Feature: loose\n").expect("write file");
    let mut state = ServerState::new();

    save(&mut state, &path);

    assert_eq!(state.published_files().count(), 0);
}
