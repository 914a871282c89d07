//! LSP lifecycle handlers for initialisation and shutdown.

use std::path::PathBuf;

use async_lsp::ResponseError;
use lsp_types::{InitializeParams, InitializeResult, InitializedParams, ServerInfo, Url};
use stepjump::discovery::ProjectLayout;
use tracing::{info, warn};

use crate::error::ServerError;
use crate::server::{ServerState, build_server_capabilities};

/// Handle the `initialize` request from the client.
///
/// Records the workspace folders, then discovers the project layout from the
/// first workspace folder (or the root URI). Navigation and diagnostics reuse
/// that layout for documents below its features directory.
///
/// # Errors
///
/// Returns a `ResponseError` when the server is already initialised.
///
/// Layout discovery failures are logged as warnings and do not fail the
/// request.
pub fn handle_initialise(
    state: &mut ServerState,
    params: InitializeParams,
) -> Result<InitializeResult, ResponseError> {
    if state.is_initialised() {
        return Err(ResponseError::new(
            async_lsp::ErrorCode::INVALID_REQUEST,
            ServerError::AlreadyInitialised.to_string(),
        ));
    }

    #[expect(
        deprecated,
        reason = "Some clients still populate root_uri instead of workspace_folders."
    )]
    let InitializeParams {
        workspace_folders,
        root_uri,
        ..
    } = params;
    if let Some(folders) = workspace_folders {
        state.set_workspace_folders(folders);
    }

    if let Some(path) = extract_workspace_path(state.workspace_folders(), root_uri.as_ref()) {
        match ProjectLayout::discover(&path) {
            Ok(layout) => {
                info!(
                    features_dir = %layout.features_dir().display(),
                    language = ?layout.language(),
                    "discovered project layout"
                );
                state.set_layout(layout);
            }
            Err(err) => warn!(error = %err, "project layout discovery failed"),
        }
    }

    Ok(InitializeResult {
        capabilities: build_server_capabilities(),
        server_info: Some(ServerInfo {
            name: "stepjump-lsp".to_owned(),
            version: Some(env!("CARGO_PKG_VERSION").to_owned()),
        }),
    })
}

/// Handle the `initialized` notification from the client.
pub fn handle_initialised(state: &mut ServerState, _params: InitializedParams) {
    state.mark_initialised();
    info!("server initialised");
}

/// Handle the `shutdown` request from the client.
///
/// # Errors
///
/// Never fails; the signature matches the router's request handlers.
pub fn handle_shutdown(_state: &mut ServerState) -> Result<(), ResponseError> {
    info!("shutdown request received");
    Ok(())
}

/// The first `file://` workspace folder, else the root URI.
fn extract_workspace_path(
    workspace_folders: &[lsp_types::WorkspaceFolder],
    root_uri: Option<&Url>,
) -> Option<PathBuf> {
    workspace_folders
        .first()
        .and_then(|folder| folder.uri.to_file_path().ok())
        .or_else(|| root_uri.and_then(|uri| uri.to_file_path().ok()))
}

#[cfg(test)]
#[expect(
    clippy::expect_used,
    reason = "tests require explicit panic messages for debugging failures"
)]
mod tests {
    use super::*;
    use lsp_types::WorkspaceFolder;
    use rstest::{fixture, rstest};
    use std::str::FromStr;
    use stepjump::test_support::ProjectBuilder;

    #[fixture]
    fn state() -> ServerState {
        ServerState::new()
    }

    fn folder(path: &std::path::Path) -> WorkspaceFolder {
        WorkspaceFolder {
            uri: Url::from_file_path(path).expect("valid path"),
            name: "project".to_owned(),
        }
    }

    #[rstest]
    fn initialise_returns_server_info(mut state: ServerState) {
        let result = handle_initialise(&mut state, InitializeParams::default())
            .expect("initialisation should succeed");

        let info = result.server_info.expect("should have server info");
        assert_eq!(info.name, "stepjump-lsp");
        assert!(info.version.is_some());
        assert!(state.layout().is_none());
    }

    #[rstest]
    fn initialise_discovers_layout_from_workspace_folder(mut state: ServerState) {
        let project = ProjectBuilder::new()
            .file("tox.ini", "[stepjump]\nlang = de\n")
            .build();
        let params = InitializeParams {
            workspace_folders: Some(vec![folder(&project.root())]),
            ..Default::default()
        };

        handle_initialise(&mut state, params).expect("initialisation should succeed");

        let layout = state.layout().expect("layout discovered");
        assert_eq!(layout.features_dir(), project.path("features"));
        assert_eq!(layout.language(), Some("de"));
    }

    #[rstest]
    fn initialise_tolerates_missing_layout(mut state: ServerState) {
        let dir = tempfile::TempDir::new().expect("temp dir");
        let params = InitializeParams {
            workspace_folders: Some(vec![folder(dir.path())]),
            ..Default::default()
        };

        assert!(handle_initialise(&mut state, params).is_ok());
        assert!(state.layout().is_none());
    }

    #[rstest]
    fn initialise_fails_when_already_initialised(mut state: ServerState) {
        state.mark_initialised();
        assert!(handle_initialise(&mut state, InitializeParams::default()).is_err());
    }

    #[rstest]
    fn initialised_marks_state(mut state: ServerState) {
        handle_initialised(&mut state, InitializedParams {});
        assert!(state.is_initialised());
    }

    #[rstest]
    fn shutdown_returns_ok(mut state: ServerState) {
        assert!(handle_shutdown(&mut state).is_ok());
    }

    #[test]
    fn workspace_path_prefers_folders() {
        let folders = vec![folder(std::path::Path::new("/folder/path"))];
        let root = Url::from_file_path("/root/path").expect("valid path");
        let path = extract_workspace_path(&folders, Some(&root));
        assert_eq!(path, Some(PathBuf::from("/folder/path")));
    }

    #[test]
    fn workspace_path_falls_back_to_root_uri() {
        let root = Url::from_file_path("/root/path").expect("valid path");
        let path = extract_workspace_path(&[], Some(&root));
        assert_eq!(path, Some(PathBuf::from("/root/path")));
    }

    #[test]
    fn non_file_urls_are_ignored() {
        let url = Url::from_str("https://example.com/path").expect("valid URL");
        assert!(extract_workspace_path(&[], Some(&url)).is_none());
    }
}
