use crate::escape::escape_host_string;
use crate::escape::escape_python_literal;
use std::fmt;

/// Index expression choosing the branch to evaluate.
///
/// JavaScript's `%` truncates toward zero, so `-1 % 2` is `-1` and the whole
/// expression is `0`, the JavaScript element. Python's `%` floors, so `-1 % 2`
/// is `1` and the expression is `1`, the `exec` element. The same line is
/// therefore a valid program in both languages.
pub const SELECTOR: &str = "(-1 % 2 + 1) >> 1";

pub(crate) const DOCUMENT_PREFIX: &str = "eval([\"";
pub(crate) const ELEMENT_SEPARATOR: &str = "\", \"";
pub(crate) const EXEC_PREFIX: &str = "exec('''";
pub(crate) const EXEC_SUFFIX: &str = "''')";

pub(crate) fn document_suffix() -> String {
  format!("\"][{SELECTOR}])")
}

/// A merged file that runs as either language. Always a single line.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PolyglotDocument(String);

impl PolyglotDocument {
  pub fn as_str(&self) -> &str {
    &self.0
  }

  pub fn into_string(self) -> String {
    self.0
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }
}

impl AsRef<str> for PolyglotDocument {
  fn as_ref(&self) -> &str {
    &self.0
  }
}

impl fmt::Display for PolyglotDocument {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

impl From<PolyglotDocument> for String {
  fn from(value: PolyglotDocument) -> Self {
    value.0
  }
}

/// Wraps Python source in a statement that executes it from a string:
/// `exec('''<escaped>''')`.
///
/// ```
/// assert_eq!(juspy::python_exec_statement("print('hi')"), r"exec('''print(\'hi\')''')");
/// ```
pub fn python_exec_statement(python_text: &str) -> String {
  let mut statement = String::with_capacity(python_text.len() + EXEC_PREFIX.len() + 8);
  statement.push_str(EXEC_PREFIX);
  escape_python_literal(&mut statement, python_text);
  statement.push_str(EXEC_SUFFIX);
  statement
}

/// Merges Python and JavaScript source into one polyglot document.
///
/// Accepts any text, including empty strings, and never fails.
///
/// ```
/// let doc = juspy::encode("", "");
/// assert_eq!(doc.as_str(), r#"eval(["", "exec('''''')"][(-1 % 2 + 1) >> 1])"#);
/// ```
pub fn encode(python_text: &str, js_text: &str) -> PolyglotDocument {
  let exec = python_exec_statement(python_text);
  let suffix = document_suffix();

  let mut out = String::with_capacity(
    DOCUMENT_PREFIX.len() + js_text.len() + ELEMENT_SEPARATOR.len() + exec.len() + suffix.len() + 16,
  );
  out.push_str(DOCUMENT_PREFIX);
  escape_host_string(&mut out, js_text);
  out.push_str(ELEMENT_SEPARATOR);
  escape_host_string(&mut out, &exec);
  out.push_str(&suffix);

  tracing::debug!(
    python_len = python_text.len(),
    js_len = js_text.len(),
    document_len = out.len(),
    "encoded polyglot document"
  );
  PolyglotDocument(out)
}
