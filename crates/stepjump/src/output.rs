//! Rendering host output as text or JSON.

use std::io::Write;
use std::path::Path;

use eyre::{Context, Report, Result};
use serde::Serialize;

use stepjump::host::{Buffer, Host, ListEntry};
use stepjump::indexing::StepOccurrence;

/// Output rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub(crate) enum Format {
    /// `path:line` and quick-fix style `path:line: text` lines.
    Text,
    /// One JSON object tagged by `kind`.
    Json,
}

#[derive(Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
enum Rendered<'a> {
    Jump {
        filepath: &'a Path,
        line: usize,
    },
    Locations {
        height: usize,
        entries: &'a [ListEntry],
    },
    Quickfix {
        height: usize,
        entries: &'a [ListEntry],
    },
    Message {
        text: &'a str,
    },
}

/// A [`Host`] writing to a stream.
pub(crate) struct CliHost<W: Write> {
    buffer: Buffer,
    file_type: Option<String>,
    cursor: usize,
    format: Format,
    out: W,
}

impl<W: Write> CliHost<W> {
    pub(crate) fn new(
        buffer: Buffer,
        file_type: Option<String>,
        cursor: usize,
        format: Format,
        out: W,
    ) -> Self {
        Self {
            buffer,
            file_type,
            cursor,
            format,
            out,
        }
    }

    fn render(&mut self, rendered: &Rendered<'_>) -> Result<()> {
        match self.format {
            Format::Json => {
                serde_json::to_writer(&mut self.out, rendered)
                    .wrap_err("failed to serialise output to JSON")?;
                writeln!(self.out).wrap_err("failed to terminate JSON output")
            }
            Format::Text => write_text(&mut self.out, rendered),
        }
    }
}

fn write_text(out: &mut dyn Write, rendered: &Rendered<'_>) -> Result<()> {
    match rendered {
        Rendered::Jump { filepath, line } => {
            writeln!(out, "{}:{line}", filepath.display()).wrap_err("failed to write jump target")
        }
        Rendered::Locations { entries, .. } | Rendered::Quickfix { entries, .. } => entries
            .iter()
            .try_for_each(|entry| {
                writeln!(out, "{}:{}: {}", entry.filepath.display(), entry.line, entry.text)
            })
            .wrap_err("failed to write location list"),
        Rendered::Message { text } => writeln!(out, "{text}").wrap_err("failed to write message"),
    }
}

impl<W: Write> Host for CliHost<W> {
    type Error = Report;

    fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    fn file_type(&self) -> Option<&str> {
        self.file_type.as_deref()
    }

    fn cursor_line(&self) -> usize {
        self.cursor
    }

    fn jump(&mut self, target: &StepOccurrence) -> Result<()> {
        self.render(&Rendered::Jump {
            filepath: &target.filepath,
            line: target.line,
        })
    }

    fn show_locations(&mut self, entries: Vec<ListEntry>, height: usize) -> Result<()> {
        self.render(&Rendered::Locations {
            height,
            entries: &entries,
        })
    }

    fn show_quickfix(&mut self, entries: Vec<ListEntry>, height: usize) -> Result<()> {
        self.render(&Rendered::Quickfix {
            height,
            entries: &entries,
        })
    }

    fn message(&mut self, text: &str) -> Result<()> {
        self.render(&Rendered::Message { text })
    }
}
