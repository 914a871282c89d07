//! Language Server Protocol front end for `stepjump`.
//!
//! The server communicates via JSON-RPC over stdin/stdout and supports:
//!
//! - LSP lifecycle management (initialise/shutdown)
//! - `textDocument/definition` and `textDocument/implementation` navigation
//!   between feature steps and Rust step implementations
//! - diagnostics for malformed step patterns and unparsable files, refreshed
//!   whenever a document is saved
//!
//! # Configuration
//!
//! - `STEPJUMP_LOG_LEVEL`: log verbosity (trace, debug, info, warn, error)
//!
//! # Example
//!
//! ```
//! use stepjump_server::server::ServerState;
//!
//! let state = ServerState::new();
//! assert!(!state.is_initialised());
//! ```

pub mod error;
pub mod handlers;
pub mod server;
