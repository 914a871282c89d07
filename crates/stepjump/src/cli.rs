//! Argument parsing and command dispatch for the `stepjump` binary.

use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use eyre::{Context, Result};

use stepjump::config::{Config, LogLevel};
use stepjump::host::{self, Buffer};
use stepjump::indexing::FileKind;
use stepjump::logging::init_logging;

use crate::output::{CliHost, Format};

/// Jump between Gherkin steps and their Rust implementations.
#[derive(Parser)]
#[command(author, version, about)]
pub(crate) struct Cli {
    /// Log verbosity (trace, debug, info, warn, error). Overrides
    /// `STEPJUMP_LOG_LEVEL`.
    #[arg(long, global = true)]
    log_level: Option<LogLevel>,
    #[command(subcommand)]
    command: Commands,
}

/// Supported commands.
#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Find the counterparts of the step or implementation at a line.
    Jump(JumpArgs),
    /// List malformed step patterns and unparsable files in a project.
    Errors(ErrorsArgs),
}

#[derive(Args)]
pub(crate) struct JumpArgs {
    /// File holding the cursor.
    file: PathBuf,
    /// 1-based cursor line.
    line: usize,
    /// Editor file-type label; inferred from the extension when omitted.
    #[arg(long)]
    filetype: Option<String>,
    /// Read the (possibly unsaved) buffer contents from standard input.
    #[arg(long)]
    stdin: bool,
    /// Output rendering.
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,
}

#[derive(Args)]
pub(crate) struct ErrorsArgs {
    /// Any path inside the project.
    #[arg(default_value = ".")]
    path: PathBuf,
    /// Output rendering.
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,
}

pub(crate) fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env(LogLevel::Warn)?.apply_overrides(cli.log_level);
    init_logging(&config);

    match cli.command {
        Commands::Jump(args) => handle_jump(args),
        Commands::Errors(args) => handle_errors(args),
    }
}

fn handle_jump(args: JumpArgs) -> Result<()> {
    let buffer = if args.stdin {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .wrap_err("failed to read buffer from stdin")?;
        Buffer::from_text(&args.file, &text)
    } else {
        Buffer::from_path(&args.file)?
    };
    let file_type = args.filetype.or_else(|| infer_file_type(&args.file));

    let mut stdout = io::stdout().lock();
    let mut host = CliHost::new(buffer, file_type, args.line, args.format, &mut stdout);
    host::jump(&mut host)?;
    stdout.flush().wrap_err("failed to flush jump output")
}

fn handle_errors(args: ErrorsArgs) -> Result<()> {
    let buffer = Buffer {
        name: args.path,
        lines: Vec::new(),
    };
    let mut stdout = io::stdout().lock();
    let mut host = CliHost::new(buffer, None, 1, args.format, &mut stdout);
    host::report_errors(&mut host)?;
    stdout.flush().wrap_err("failed to flush error report")
}

fn infer_file_type(path: &Path) -> Option<String> {
    let label = match FileKind::from_path(path)? {
        FileKind::Feature => "cucumber",
        FileKind::Implementation => "rust",
    };
    Some(label.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn infers_file_types_from_extensions() {
        assert_eq!(
            infer_file_type(Path::new("a.feature")).as_deref(),
            Some("cucumber")
        );
        assert_eq!(infer_file_type(Path::new("a.rs")).as_deref(), Some("rust"));
        assert_eq!(infer_file_type(Path::new("a.py")), None);
    }

    #[test]
    fn parses_jump_arguments() {
        let Ok(cli) = Cli::try_parse_from([
            "stepjump",
            "--log-level",
            "debug",
            "jump",
            "features/a.feature",
            "12",
            "--stdin",
            "--format",
            "json",
        ]) else {
            panic!("arguments should parse");
        };
        assert_eq!(cli.log_level, Some(LogLevel::Debug));
        let Commands::Jump(args) = cli.command else {
            panic!("expected jump");
        };
        assert_eq!(args.line, 12);
        assert!(args.stdin);
        assert_eq!(args.format, Format::Json);
    }

    #[test]
    fn errors_defaults_to_current_directory() {
        let Ok(cli) = Cli::try_parse_from(["stepjump", "errors"]) else {
            panic!("arguments should parse");
        };
        let Commands::Errors(args) = cli.command else {
            panic!("expected errors");
        };
        assert_eq!(args.path, PathBuf::from("."));
        assert_eq!(args.format, Format::Text);
    }
}
