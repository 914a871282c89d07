//! Text document notification handlers.
//!
//! Saving a feature file or a Rust step file revalidates the whole project it
//! belongs to and republishes diagnostics for every affected file.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use async_lsp::lsp_types::notification;
use lsp_types::{Diagnostic, DiagnosticSeverity, DidSaveTextDocumentParams, PublishDiagnosticsParams};
use stepjump::resolver::{Finding, validate_project};
use tracing::{debug, warn};

use crate::server::ServerState;

use super::util::{line_range, path_to_url};

/// Diagnostics grouped per file, in path order.
pub type FileDiagnostics = BTreeMap<PathBuf, Vec<Diagnostic>>;

const DIAGNOSTIC_SOURCE: &str = "stepjump";

/// Handle `textDocument/didSave` notifications.
///
/// The saved file's project is revalidated from disk. Files with findings get
/// their diagnostics published; files that had diagnostics before and have
/// none now are cleared.
pub fn handle_did_save_text_document(state: &mut ServerState, params: DidSaveTextDocumentParams) {
    let uri = params.text_document.uri;
    let Ok(path) = uri.to_file_path() else {
        debug!(%uri, "ignoring didSave for non-file URI");
        return;
    };

    let layout = match state.layout_for(&path) {
        Ok(layout) => layout,
        Err(err) => {
            debug!(path = %path.display(), error = %err, "saved file is outside any project");
            return;
        }
    };

    let diagnostics = collect_diagnostics(validate_project(&layout));
    let current: BTreeSet<_> = diagnostics.keys().cloned().collect();
    let stale = state.replace_published(layout.features_dir(), current);
    debug!(
        features_dir = %layout.features_dir().display(),
        files = diagnostics.len(),
        cleared = stale.len(),
        "validated project on save"
    );

    for (file, file_diagnostics) in diagnostics {
        publish(state, &file, file_diagnostics);
    }
    for file in stale {
        publish(state, &file, Vec::new());
    }
}

/// Group validation findings into LSP diagnostics per file.
///
/// Findings keep their order within each file.
#[must_use]
pub fn collect_diagnostics(findings: Vec<Finding>) -> FileDiagnostics {
    let mut grouped = FileDiagnostics::new();
    for finding in findings {
        let file = finding.filepath().to_path_buf();
        let diagnostic = Diagnostic {
            range: line_range(finding.line()),
            severity: Some(DiagnosticSeverity::ERROR),
            source: Some(DIAGNOSTIC_SOURCE.to_owned()),
            message: finding.message,
            ..Default::default()
        };
        grouped.entry(file).or_default().push(diagnostic);
    }
    grouped
}

fn publish(state: &ServerState, path: &Path, diagnostics: Vec<Diagnostic>) {
    let Some(client) = state.client() else {
        debug!("no client socket available for publishing diagnostics");
        return;
    };
    let Some(uri) = path_to_url(path) else {
        warn!(path = %path.display(), "cannot convert path to URI");
        return;
    };
    let params = PublishDiagnosticsParams::new(uri, diagnostics, None);
    if let Err(err) = client.notify::<notification::PublishDiagnostics>(params) {
        warn!(error = %err, "failed to publish diagnostics");
    }
}
