//! End-to-end cross-referencing through the public API.
#![expect(clippy::expect_used, reason = "tests use explicit failures for clarity")]

use stepjump::discovery::{ProjectLayout, locate};
use stepjump::error::EngineError;
use stepjump::indexing::StepType;
use stepjump::resolver::{Buffer, find_references, resolve_at_cursor, validate_project};
use stepjump::test_support::ProjectBuilder;

#[test]
fn localised_project_resolves_both_ways() {
    let project = ProjectBuilder::new()
        .file("stepjump.ini", "[stepjump]\nlang = fr\n")
        .feature(
            "comptes.feature",
            concat!(
                "Fonctionnalité: comptes\n",
                "  Scénario: connexion\n",
                "    Soit un utilisateur nommé Alice\n",
                "    Et il est connecté\n",
            ),
        )
        .steps(
            "comptes.rs",
            concat!(
                "#[given(\"un utilisateur nommé {nom}\")]\n",
                "fn utilisateur(nom: String) {}\n",
                "#[given(\"il est connecté\")]\n",
                "fn connecte() {}\n",
            ),
        )
        .build();
    let layout = project.layout();
    assert_eq!(layout.language(), Some("fr"));

    let feature = Buffer::from_path(project.path("features/comptes.feature")).expect("read");
    let step = resolve_at_cursor(&feature, 4).expect("step under cursor");
    assert_eq!(step.description, "Soit il est connecté");
    assert_eq!(step.step_type, StepType::Given);

    let found = find_references(&step, &layout).expect("implementation found");
    let lines: Vec<_> = found.iter().map(|hit| hit.line).collect();
    assert_eq!(lines, vec![3]);

    let steps = Buffer::from_path(project.path("features/steps/comptes.rs")).expect("read");
    let implementation = resolve_at_cursor(&steps, 1).expect("implementation under cursor");
    let found = find_references(&implementation, &layout).expect("feature step found");
    let lines: Vec<_> = found.iter().map(|hit| hit.line).collect();
    assert_eq!(lines, vec![3]);
}

#[test]
fn locate_is_stable_below_the_root() {
    let project = ProjectBuilder::new()
        .feature("deep/er/x.feature", "Feature: x\n")
        .build();
    let from_root = locate(&project.root()).expect("from root");
    let from_deep = locate(&project.path("features/deep/er/x.feature")).expect("from deep");
    assert_eq!(from_root, from_deep);
    assert_eq!(from_root, project.path("features"));
}

#[test]
fn layout_discovery_fails_outside_projects() {
    let dir = tempfile::TempDir::new().expect("temp dir");
    let err = ProjectLayout::discover(dir.path()).expect_err("no features dir");
    assert!(matches!(err, EngineError::NotFound(_)));
}

#[test]
fn validation_is_repeatable() {
    let project = ProjectBuilder::new()
        .steps("a.rs", "#[when(\"{:bogus}\")]\nfn a() {}\n")
        .build();
    let layout = project.layout();
    let first = validate_project(&layout);
    assert_eq!(first.len(), 1);
    assert_eq!(first, validate_project(&layout));
}
