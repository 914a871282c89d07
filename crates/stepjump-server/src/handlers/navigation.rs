//! Handlers for `textDocument/definition` and `textDocument/implementation`.
//!
//! Both requests resolve the step under the cursor, in a feature file or a
//! Rust step file, and return every occurrence on the other side of the
//! suite that it pairs with.

use std::path::Path;

use async_lsp::ResponseError;
use async_lsp::lsp_types::notification;
use lsp_types::request::{GotoImplementationParams, GotoImplementationResponse};
use lsp_types::{
    GotoDefinitionParams, GotoDefinitionResponse, MessageType, ShowMessageParams,
    TextDocumentPositionParams,
};
use stepjump::error::EngineError;
use stepjump::indexing::StepOccurrence;
use stepjump::resolver::{Buffer, find_references, resolve_in};
use tracing::{debug, warn};

use crate::server::ServerState;

use super::util::{engine_line, occurrence_location};

/// Handle `textDocument/definition` requests.
///
/// Returns `None` when the cursor is not below a step or nothing matches.
///
/// # Errors
///
/// Never fails; engine errors are reported as `None`.
pub fn handle_definition(
    state: &ServerState,
    params: &GotoDefinitionParams,
) -> Result<Option<GotoDefinitionResponse>, ResponseError> {
    Ok(navigate(state, &params.text_document_position_params))
}

/// Handle `textDocument/implementation` requests.
///
/// Behaves like [`handle_definition`].
///
/// # Errors
///
/// Never fails; engine errors are reported as `None`.
pub fn handle_implementation(
    state: &ServerState,
    params: &GotoImplementationParams,
) -> Result<Option<GotoImplementationResponse>, ResponseError> {
    Ok(navigate(state, &params.text_document_position_params))
}

fn navigate(
    state: &ServerState,
    position: &TextDocumentPositionParams,
) -> Option<GotoDefinitionResponse> {
    let uri = &position.text_document.uri;
    let Ok(path) = uri.to_file_path() else {
        debug!(%uri, "ignoring navigation request for non-file URI");
        return None;
    };

    let targets = match lookup(state, &path, engine_line(position.position)) {
        Ok(targets) => targets,
        Err(err) => {
            report_failure(state, &err);
            return None;
        }
    };

    let locations: Vec<_> = targets.iter().filter_map(occurrence_location).collect();
    debug!(
        path = %path.display(),
        count = locations.len(),
        "found matching steps"
    );
    match <[_; 1]>::try_from(locations) {
        Ok([location]) => Some(GotoDefinitionResponse::Scalar(location)),
        Err(locations) if locations.is_empty() => None,
        Err(locations) => Some(GotoDefinitionResponse::Array(locations)),
    }
}

fn lookup(
    state: &ServerState,
    path: &Path,
    line: usize,
) -> Result<Vec<StepOccurrence>, EngineError> {
    let layout = state.layout_for(path)?;
    let buffer = Buffer::from_path(path)?;
    let occurrence = resolve_in(&layout, &buffer, line)?;
    find_references(&occurrence, &layout)
}

fn report_failure(state: &ServerState, err: &EngineError) {
    debug!(error = %err, "navigation failed");
    let EngineError::Lookup(lookup) = err else {
        return;
    };
    let Some(client) = state.client() else {
        debug!("no client socket available for showing messages");
        return;
    };
    let params = ShowMessageParams {
        typ: MessageType::WARNING,
        message: lookup.to_string(),
    };
    if let Err(err) = client.notify::<notification::ShowMessage>(params) {
        warn!(error = %err, "failed to show lookup failure");
    }
}
