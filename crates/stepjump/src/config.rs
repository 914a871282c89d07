//! Runtime configuration read from the environment.
//!
//! Only logging is configurable this way; the Gherkin dialect is a project
//! setting resolved by [`crate::discovery::resolve_language`].

use std::env;
use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// Environment variable holding the log level.
pub const LOG_LEVEL_ENV: &str = "STEPJUMP_LOG_LEVEL";

/// Log level matching the `tracing` levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Everything, including per-file scan traces.
    Trace,
    /// Scan and match progress.
    Debug,
    /// Lifecycle messages.
    Info,
    /// Skipped files and configuration problems.
    #[default]
    Warn,
    /// Failures only.
    Error,
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(Self::Trace),
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            _ => Err(ConfigError(format!(
                "unknown log level '{s}', expected one of: trace, debug, info, warn, error"
            ))),
        }
    }
}

impl LogLevel {
    /// The `tracing` filter directive for this level.
    #[must_use]
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_filter_str())
    }
}

/// Process-wide configuration shared by the command line and LSP hosts.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Log verbosity.
    pub log_level: LogLevel,
}

impl Config {
    /// Load configuration from the environment.
    ///
    /// `fallback` is used when `STEPJUMP_LOG_LEVEL` is unset; each host
    /// picks its own default.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the variable holds an unknown level.
    pub fn from_env(fallback: LogLevel) -> Result<Self, ConfigError> {
        Self::from_lookup(fallback, |key| env::var(key).ok())
    }

    fn from_lookup(
        fallback: LogLevel,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let log_level = match lookup(LOG_LEVEL_ENV) {
            Some(value) => value.parse()?,
            None => fallback,
        };
        Ok(Self { log_level })
    }

    /// Apply command line overrides on top of the environment.
    #[must_use]
    pub fn apply_overrides(mut self, log_level: Option<LogLevel>) -> Self {
        if let Some(level) = log_level {
            self.log_level = level;
        }
        self
    }

    /// Replace the log level.
    #[must_use]
    pub fn with_log_level(mut self, level: LogLevel) -> Self {
        self.log_level = level;
        self
    }
}

#[cfg(test)]
#[expect(
    clippy::unwrap_used,
    reason = "tests require explicit panic messages for debugging failures"
)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("trace", LogLevel::Trace)]
    #[case("DEBUG", LogLevel::Debug)]
    #[case("Info", LogLevel::Info)]
    #[case("warning", LogLevel::Warn)]
    #[case("error", LogLevel::Error)]
    fn log_level_parses_case_insensitively(#[case] raw: &str, #[case] expected: LogLevel) {
        assert_eq!(raw.parse::<LogLevel>().ok(), Some(expected));
    }

    #[test]
    fn log_level_rejects_invalid_values() {
        let err = "loud".parse::<LogLevel>().unwrap_err();
        assert!(err.to_string().contains("unknown log level 'loud'"));
    }

    #[test]
    fn missing_variable_uses_fallback() {
        let config = Config::from_lookup(LogLevel::Info, |_| None).unwrap();
        assert_eq!(config.log_level, LogLevel::Info);
    }

    #[test]
    fn variable_overrides_fallback() {
        let config =
            Config::from_lookup(LogLevel::Info, |_| Some("debug".to_owned())).unwrap();
        assert_eq!(config.log_level, LogLevel::Debug);
    }

    #[test]
    fn invalid_variable_is_an_error() {
        assert!(Config::from_lookup(LogLevel::Info, |_| Some("x".to_owned())).is_err());
    }

    #[test]
    fn overrides_take_precedence() {
        let config = Config::default().apply_overrides(Some(LogLevel::Error));
        assert_eq!(config.log_level, LogLevel::Error);
        let config = Config::default().apply_overrides(None);
        assert_eq!(config.log_level, LogLevel::Warn);
    }
}
