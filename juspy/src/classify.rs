use crate::language::Language;
use crate::language::JAVASCRIPT_EXTENSIONS;
use crate::language::PYTHON_EXTENSIONS;
use diagnostics::Diagnostic;
use diagnostics::Severity;
use serde::Serialize;
use std::fmt;
use std::path::Path;

/// Diagnostic code for inputs where neither extension is recognized.
pub const NO_RECOGNIZED_EXTENSION_CODE: &str = "JUSPY0001";
/// Diagnostic code for inputs where only one language is present.
pub const MISSING_COUNTERPART_CODE: &str = "JUSPY0002";

/// The text of one input file together with its inferred language.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceBuffer {
  name: String,
  text: String,
  language: Language,
}

impl SourceBuffer {
  pub fn new(name: impl Into<String>, text: impl Into<String>, language: Language) -> Self {
    Self {
      name: name.into(),
      text: text.into(),
      language,
    }
  }

  /// Builds a buffer whose language is inferred from `path`.
  pub fn from_path(path: &Path, text: impl Into<String>) -> Self {
    Self::new(path.display().to_string(), text, Language::from_path(path))
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn text(&self) -> &str {
    &self.text
  }

  pub fn language(&self) -> Language {
    self.language
  }
}

/// Which input ended up on the Python side.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Order {
  /// The first input is Python, the second JavaScript.
  AsGiven,
  /// The second input is Python, the first JavaScript.
  Swapped,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ClassificationWarning {
  /// Neither input has a Python or JavaScript extension.
  NoRecognizedExtension,
  /// Only `found` is present among the inputs; the other language is missing.
  MissingCounterpart { found: Language },
}

impl ClassificationWarning {
  pub fn code(&self) -> &'static str {
    match self {
      ClassificationWarning::NoRecognizedExtension => NO_RECOGNIZED_EXTENSION_CODE,
      ClassificationWarning::MissingCounterpart { .. } => MISSING_COUNTERPART_CODE,
    }
  }

  pub fn to_diagnostic(&self) -> Diagnostic {
    let diagnostic = Diagnostic::new(Severity::Warning, self.code(), self.to_string(), None);
    match self {
      ClassificationWarning::NoRecognizedExtension => diagnostic
        .with_note(format!(
          "Python extensions: {}; JavaScript extensions: {}",
          dotted(PYTHON_EXTENSIONS),
          dotted(JAVASCRIPT_EXTENSIONS),
        ))
        .with_note("treating the first file as Python and the second as JavaScript"),
      ClassificationWarning::MissingCounterpart { found } => {
        let missing = match found {
          Language::Python => Language::JavaScript,
          _ => Language::Python,
        };
        diagnostic.with_note(format!("found a {found} file but no {missing} file"))
      }
    }
  }
}

impl fmt::Display for ClassificationWarning {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ClassificationWarning::NoRecognizedExtension => {
        f.write_str("invalid file extensions detected")
      }
      ClassificationWarning::MissingCounterpart { .. } => {
        f.write_str("invalid file extension detected")
      }
    }
  }
}

fn dotted(exts: &[&str]) -> String {
  exts
    .iter()
    .map(|ext| format!(".{ext}"))
    .collect::<Vec<_>>()
    .join(", ")
}

/// Outcome of deciding roles from two extensions.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Classification {
  pub order: Order,
  pub warning: Option<ClassificationWarning>,
}

/// Decides which of two inputs is Python and which is JavaScript.
///
/// The first matching rule wins: A is Python; B is Python; A is JavaScript
/// (so B is Python). Otherwise A is treated as Python. Never fails.
///
/// ```
/// use juspy::{classify_extensions, Order};
///
/// assert_eq!(classify_extensions(".py", ".js").order, Order::AsGiven);
/// assert_eq!(classify_extensions(".mjs", ".py").order, Order::Swapped);
/// assert!(classify_extensions(".txt", ".txt").warning.is_some());
/// ```
pub fn classify_extensions(ext_a: &str, ext_b: &str) -> Classification {
  classify_languages(Language::from_extension(ext_a), Language::from_extension(ext_b))
}

fn classify_languages(a: Language, b: Language) -> Classification {
  let has_python = a.is_python() || b.is_python();
  let has_javascript = a.is_javascript() || b.is_javascript();

  let warning = if !(has_python || has_javascript) {
    Some(ClassificationWarning::NoRecognizedExtension)
  } else if !(has_python && has_javascript) {
    Some(ClassificationWarning::MissingCounterpart {
      found: if has_python {
        Language::Python
      } else {
        Language::JavaScript
      },
    })
  } else {
    None
  };

  let order = if a.is_python() {
    Order::AsGiven
  } else if b.is_python() || a.is_javascript() {
    Order::Swapped
  } else {
    Order::AsGiven
  };

  Classification { order, warning }
}

/// Exactly one buffer per side, whatever the extensions said.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassifiedPair {
  pub python: SourceBuffer,
  pub javascript: SourceBuffer,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Classified {
  pub pair: ClassifiedPair,
  pub order: Order,
  pub warning: Option<ClassificationWarning>,
}

/// Orders two buffers into a [`ClassifiedPair`] using their languages.
pub fn classify(first: SourceBuffer, second: SourceBuffer) -> Classified {
  let Classification { order, warning } = classify_languages(first.language, second.language);
  if let Some(warning) = warning {
    tracing::warn!(
      code = warning.code(),
      first = first.name(),
      second = second.name(),
      "{warning}"
    );
  }
  tracing::debug!(?order, first = first.name(), second = second.name(), "classified inputs");

  let pair = match order {
    Order::AsGiven => ClassifiedPair {
      python: first,
      javascript: second,
    },
    Order::Swapped => ClassifiedPair {
      python: second,
      javascript: first,
    },
  };
  Classified {
    pair,
    order,
    warning,
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn buffer(name: &str) -> SourceBuffer {
    SourceBuffer::from_path(Path::new(name), format!("contents of {name}"))
  }

  #[test]
  fn python_first_keeps_order() {
    let c = classify_extensions(".py", ".js");
    assert_eq!(c.order, Order::AsGiven);
    assert_eq!(c.warning, None);
  }

  #[test]
  fn python_second_swaps() {
    let c = classify_extensions(".js", ".py");
    assert_eq!(c.order, Order::Swapped);
    assert_eq!(c.warning, None);
  }

  #[test]
  fn module_javascript_first_swaps() {
    let c = classify_extensions(".mjs", ".py");
    assert_eq!(c.order, Order::Swapped);
    assert_eq!(c.warning, None);
  }

  #[test]
  fn unrecognized_falls_back_with_warning() {
    let c = classify_extensions(".txt", ".txt");
    assert_eq!(c.order, Order::AsGiven);
    assert_eq!(c.warning, Some(ClassificationWarning::NoRecognizedExtension));
  }

  #[test]
  fn lone_javascript_first_is_treated_as_javascript() {
    let c = classify_extensions(".cjs", ".txt");
    assert_eq!(c.order, Order::Swapped);
    assert_eq!(
      c.warning,
      Some(ClassificationWarning::MissingCounterpart {
        found: Language::JavaScript
      })
    );
  }

  #[test]
  fn lone_javascript_second_uses_fallback() {
    let c = classify_extensions(".txt", ".js");
    assert_eq!(c.order, Order::AsGiven);
    assert!(matches!(
      c.warning,
      Some(ClassificationWarning::MissingCounterpart { .. })
    ));
  }

  #[test]
  fn two_python_files_warn_and_keep_order() {
    let c = classify_extensions(".py", ".py");
    assert_eq!(c.order, Order::AsGiven);
    assert_eq!(
      c.warning,
      Some(ClassificationWarning::MissingCounterpart {
        found: Language::Python
      })
    );
  }

  #[test]
  fn two_javascript_files_put_second_on_python_side() {
    let c = classify_extensions(".js", ".mjs");
    assert_eq!(c.order, Order::Swapped);
    assert!(c.warning.is_some());
  }

  #[test]
  fn classify_moves_buffers_into_roles() {
    let classified = classify(buffer("app.js"), buffer("app.py"));
    assert_eq!(classified.pair.python.name(), "app.py");
    assert_eq!(classified.pair.javascript.name(), "app.js");
    assert_eq!(classified.pair.python.text(), "contents of app.py");
    assert_eq!(classified.warning, None);
  }

  #[test]
  fn warnings_become_distinct_diagnostics() {
    let none = ClassificationWarning::NoRecognizedExtension.to_diagnostic();
    assert_eq!(none.code, NO_RECOGNIZED_EXTENSION_CODE);
    assert_eq!(none.severity, Severity::Warning);
    assert_eq!(none.message, "invalid file extensions detected");
    assert!(none.notes[0].contains(".js, .cjs, .mjs"));

    let one = ClassificationWarning::MissingCounterpart {
      found: Language::Python,
    }
    .to_diagnostic();
    assert_eq!(one.code, MISSING_COUNTERPART_CODE);
    assert_eq!(one.message, "invalid file extension detected");
    assert_eq!(one.notes, vec!["found a python file but no javascript file"]);
  }
}
