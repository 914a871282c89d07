//! Core language server state and capabilities.
//!
//! This module defines the state shared across all LSP handlers. It is passed
//! to handlers via the async-lsp router.

use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};

use async_lsp::ClientSocket;
use lsp_types::{
    ImplementationProviderCapability, OneOf, ServerCapabilities, TextDocumentSyncCapability,
    TextDocumentSyncKind, TextDocumentSyncOptions, TextDocumentSyncSaveOptions, WorkspaceFolder,
};
use stepjump::discovery::ProjectLayout;
use stepjump::error::EngineError;

/// Central state shared across all LSP handlers.
pub struct ServerState {
    /// Socket used to push notifications to the client.
    client: Option<ClientSocket>,
    /// Workspace folders from the client.
    workspace_folders: Vec<WorkspaceFolder>,
    /// Project layout discovered from the first workspace folder.
    layout: Option<ProjectLayout>,
    /// Files whose last published diagnostics were non-empty.
    published: BTreeSet<PathBuf>,
    /// Whether the server has been initialised.
    initialised: bool,
}

impl fmt::Debug for ServerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerState")
            .field("has_client", &self.client.is_some())
            .field("workspace_folders", &self.workspace_folders)
            .field("layout", &self.layout)
            .field("published", &self.published)
            .field("initialised", &self.initialised)
            .finish_non_exhaustive()
    }
}

impl Default for ServerState {
    fn default() -> Self {
        Self::new()
    }
}

impl ServerState {
    /// Create an uninitialised server state without a client.
    ///
    /// # Examples
    ///
    /// ```
    /// use stepjump_server::server::ServerState;
    ///
    /// let state = ServerState::new();
    /// assert!(state.layout().is_none());
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self {
            client: None,
            workspace_folders: Vec::new(),
            layout: None,
            published: BTreeSet::new(),
            initialised: false,
        }
    }

    /// Attach the socket used for client notifications.
    #[must_use]
    pub fn with_client(mut self, client: ClientSocket) -> Self {
        self.client = Some(client);
        self
    }

    /// The client socket, when one is attached.
    #[must_use]
    pub fn client(&self) -> Option<&ClientSocket> {
        self.client.as_ref()
    }

    /// Store workspace folders provided by the client.
    pub fn set_workspace_folders(&mut self, folders: Vec<WorkspaceFolder>) {
        self.workspace_folders = folders;
    }

    /// Access the workspace folders provided by the client.
    #[must_use]
    pub fn workspace_folders(&self) -> &[WorkspaceFolder] {
        &self.workspace_folders
    }

    /// Store the discovered project layout.
    pub fn set_layout(&mut self, layout: ProjectLayout) {
        self.layout = Some(layout);
    }

    /// The project layout discovered at initialisation, if any.
    #[must_use]
    pub fn layout(&self) -> Option<&ProjectLayout> {
        self.layout.as_ref()
    }

    /// The layout of the project holding `path`.
    ///
    /// Reuses the layout discovered at initialisation when `path` lies under
    /// its features directory, otherwise discovers one from `path`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NotFound`] when `path` is outside any project.
    pub fn layout_for(&self, path: &Path) -> Result<ProjectLayout, EngineError> {
        match self.layout.as_ref() {
            Some(layout) if path.starts_with(layout.features_dir()) => Ok(layout.clone()),
            _ => ProjectLayout::discover(path),
        }
    }

    /// Files currently carrying published diagnostics, in path order.
    pub fn published_files(&self) -> impl Iterator<Item = &Path> {
        self.published.iter().map(PathBuf::as_path)
    }

    /// Record the files under `features_dir` that now carry diagnostics.
    ///
    /// Returns the files below `features_dir` that carried diagnostics before
    /// and no longer do.
    pub fn replace_published(
        &mut self,
        features_dir: &Path,
        current: BTreeSet<PathBuf>,
    ) -> Vec<PathBuf> {
        let (ours, others): (BTreeSet<_>, BTreeSet<_>) = std::mem::take(&mut self.published)
            .into_iter()
            .partition(|path| path.starts_with(features_dir));
        let stale = ours.difference(&current).cloned().collect();
        self.published = others;
        self.published.extend(current);
        stale
    }

    /// Mark the server as initialised.
    pub fn mark_initialised(&mut self) {
        self.initialised = true;
    }

    /// Check if the server is initialised.
    #[must_use]
    pub fn is_initialised(&self) -> bool {
        self.initialised
    }
}

/// Build the server capabilities to advertise to the client.
#[must_use]
pub fn build_server_capabilities() -> ServerCapabilities {
    ServerCapabilities {
        text_document_sync: Some(TextDocumentSyncCapability::Options(
            TextDocumentSyncOptions {
                change: Some(TextDocumentSyncKind::NONE),
                save: Some(TextDocumentSyncSaveOptions::Supported(true)),
                ..Default::default()
            },
        )),
        definition_provider: Some(OneOf::Left(true)),
        implementation_provider: Some(ImplementationProviderCapability::Simple(true)),
        ..Default::default()
    }
}
