//! Error types for the language server.

use stepjump::error::ConfigError;
use thiserror::Error;

/// Errors that can occur during language server operations.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Server received a duplicate initialisation request.
    #[error("server already initialised")]
    AlreadyInitialised,

    /// An invalid configuration value was provided.
    #[error(transparent)]
    InvalidConfig(#[from] ConfigError),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn already_initialised_error_displays_message() {
        let error = ServerError::AlreadyInitialised;
        assert_eq!(error.to_string(), "server already initialised");
    }

    #[test]
    fn invalid_config_keeps_core_message() {
        let error = ServerError::from(ConfigError("unknown log level `loud`".to_owned()));
        assert_eq!(
            error.to_string(),
            "invalid configuration: unknown log level `loud`"
        );
    }

    #[test]
    fn io_error_converts_from_std_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error: ServerError = io_err.into();
        assert!(error.to_string().contains("file not found"));
    }
}
