//! LSP request and notification handlers.

mod lifecycle;
mod navigation;
mod text_document;
pub mod util;

pub use lifecycle::{handle_initialise, handle_initialised, handle_shutdown};
pub use navigation::{handle_definition, handle_implementation};
pub use text_document::{FileDiagnostics, collect_diagnostics, handle_did_save_text_document};
