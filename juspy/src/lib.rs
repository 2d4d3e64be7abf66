//! Merges a Python file and a JavaScript file into a single file that runs
//! under either interpreter.
//!
//! The output is one expression statement:
//!
//! ```text
//! eval(["<javascript>", "exec('''<python>''')"][(-1 % 2 + 1) >> 1])
//! ```
//!
//! Both array elements are string literals in both languages. The selector is
//! `0` in JavaScript and `1` in Python (see [`SELECTOR`]), so each interpreter
//! evaluates only its own source. Everything here is pure; reading and writing
//! files is left to the caller.

use diagnostics::Diagnostic;
use diagnostics::FileId;

pub use classify::classify;
pub use classify::classify_extensions;
pub use classify::Classification;
pub use classify::ClassificationWarning;
pub use classify::Classified;
pub use classify::ClassifiedPair;
pub use classify::Order;
pub use classify::SourceBuffer;
pub use encode::encode;
pub use encode::python_exec_statement;
pub use encode::PolyglotDocument;
pub use encode::SELECTOR;
pub use err::ExtractError;
pub use extract::extract;
pub use extract::Payloads;
pub use hazard::scan_hazards;
pub use hazard::Hazard;
pub use hazard::HazardKind;
pub use language::Language;

pub mod classify;
mod encode;
mod err;
pub mod escape;
mod extract;
pub mod hazard;
mod language;

/// File id used in diagnostics for the first input given to [`merge`].
pub const FIRST_FILE: FileId = FileId(0);
/// File id used in diagnostics for the second input given to [`merge`].
pub const SECOND_FILE: FileId = FileId(1);

/// Result of [`merge`].
#[derive(Clone, Debug)]
pub struct Merged {
  pub document: PolyglotDocument,
  pub classified: Classified,
  /// Warnings about the inputs, in input order. Never errors.
  pub diagnostics: Vec<Diagnostic>,
}

/// Classifies two inputs, encodes them and reports anything suspicious.
///
/// ```
/// use juspy::{merge, Language, SourceBuffer};
///
/// let merged = merge(
///   SourceBuffer::new("hello.js", "console.log('hi')", Language::JavaScript),
///   SourceBuffer::new("hello.py", "print('hi')", Language::Python),
/// );
/// assert!(merged.diagnostics.is_empty());
/// assert!(merged.document.as_str().starts_with(r#"eval(["console.log('hi')", "#));
/// ```
pub fn merge(first: SourceBuffer, second: SourceBuffer) -> Merged {
  let classified = classify(first, second);
  let (python_file, js_file) = match classified.order {
    Order::AsGiven => (FIRST_FILE, SECOND_FILE),
    Order::Swapped => (SECOND_FILE, FIRST_FILE),
  };

  let mut diagnostics = Vec::new();
  if let Some(warning) = classified.warning {
    diagnostics.push(warning.to_diagnostic());
  }
  let pair = &classified.pair;
  for (file, text) in [
    (python_file, pair.python.text()),
    (js_file, pair.javascript.text()),
  ] {
    diagnostics.extend(
      scan_hazards(text)
        .iter()
        .map(|hazard| hazard.to_diagnostic(file)),
    );
  }
  diagnostics.sort_by_key(|d| d.file);

  let document = encode(pair.python.text(), pair.javascript.text());
  Merged {
    document,
    classified,
    diagnostics,
  }
}
