//! Shared diagnostics model and rendering utilities.
//!
//! Diagnostics either point into one of the input files (a [`Span`]) or
//! describe a whole file or the host environment (no span). Both kinds render
//! through [`render::render_diagnostic`] and serialize with `serde` for JSON
//! reports.
//!
//! ```
//! use diagnostics::render::{render_diagnostic, SourceProvider};
//! use diagnostics::{Diagnostic, FileId, Span, TextRange};
//!
//! struct SingleFile {
//!   name: String,
//!   text: String,
//! }
//!
//! impl SourceProvider for SingleFile {
//!   fn file_name(&self, _file: FileId) -> Option<&str> {
//!     Some(&self.name)
//!   }
//!
//!   fn file_text(&self, _file: FileId) -> Option<&str> {
//!     Some(&self.text)
//!   }
//! }
//!
//! let provider = SingleFile {
//!   name: "main.py".into(),
//!   text: "print('hi')\r\n".into(),
//! };
//! let diag = Diagnostic::warning(
//!   "TEST0001",
//!   "an example warning",
//!   Span::new(FileId(0), TextRange::new(11, 12)),
//! );
//!
//! let rendered = render_diagnostic(&provider, &diag);
//! assert!(rendered.contains("TEST0001"));
//! assert!(rendered.contains("--> main.py:1:12"));
//! ```

pub mod render;

use serde::Serialize;
use std::fmt::Display;
use std::fmt::Formatter;

/// A stable identifier for an input file.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord, Serialize)]
pub struct FileId(pub u32);

/// A byte range in a file.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize)]
pub struct TextRange {
  pub start: u32,
  pub end: u32,
}

impl TextRange {
  pub const fn new(start: u32, end: u32) -> Self {
    Self { start, end }
  }

  /// Builds a range from `usize` offsets, saturating at `u32::MAX`.
  pub fn from_offsets(start: usize, end: usize) -> Self {
    Self {
      start: saturating_to_u32(start),
      end: saturating_to_u32(end),
    }
  }

  pub fn len(&self) -> u32 {
    self.end.saturating_sub(self.start)
  }

  pub fn is_empty(&self) -> bool {
    self.start >= self.end
  }
}

/// A span across a specific file.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize)]
pub struct Span {
  pub file: FileId,
  pub range: TextRange,
}

impl Span {
  pub const fn new(file: FileId, range: TextRange) -> Self {
    Self { file, range }
  }
}

/// Diagnostic severity.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
  Error,
  Warning,
}

impl Severity {
  pub const fn as_str(&self) -> &'static str {
    match self {
      Severity::Error => "error",
      Severity::Warning => "warning",
    }
  }
}

impl Display for Severity {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

/// A user-facing diagnostic with an optional location and notes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
  pub code: &'static str,
  pub severity: Severity,
  pub message: String,
  /// File the diagnostic is about when it has no precise span.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub file: Option<FileId>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub primary: Option<Span>,
  #[serde(skip_serializing_if = "Vec::is_empty")]
  pub notes: Vec<String>,
}

impl Diagnostic {
  pub fn new(
    severity: Severity,
    code: &'static str,
    message: impl Into<String>,
    primary: Option<Span>,
  ) -> Self {
    Self {
      code,
      severity,
      message: message.into(),
      file: primary.map(|span| span.file),
      primary,
      notes: Vec::new(),
    }
  }

  pub fn error(code: &'static str, message: impl Into<String>, primary: Span) -> Self {
    Self::new(Severity::Error, code, message, Some(primary))
  }

  pub fn warning(code: &'static str, message: impl Into<String>, primary: Span) -> Self {
    Self::new(Severity::Warning, code, message, Some(primary))
  }

  /// A diagnostic about a whole file rather than a range inside it.
  pub fn file_level(
    severity: Severity,
    code: &'static str,
    message: impl Into<String>,
    file: FileId,
  ) -> Self {
    let mut diagnostic = Self::new(severity, code, message, None);
    diagnostic.file = Some(file);
    diagnostic
  }

  pub fn with_note(mut self, note: impl Into<String>) -> Self {
    self.notes.push(note.into());
    self
  }

  pub fn is_error(&self) -> bool {
    self.severity == Severity::Error
  }
}

/// An error raised by the host (file system, argument handling) rather than
/// by inspecting source text.
pub fn host_error(
  code: &'static str,
  primary: Option<Span>,
  message: impl Into<String>,
) -> Diagnostic {
  Diagnostic::new(Severity::Error, code, message, primary)
}

fn saturating_to_u32(value: usize) -> u32 {
  u32::try_from(value).unwrap_or(u32::MAX)
}
