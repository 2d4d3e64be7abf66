use crate::encode::document_suffix;
use crate::encode::DOCUMENT_PREFIX;
use crate::encode::ELEMENT_SEPARATOR;
use crate::encode::EXEC_PREFIX;
use crate::encode::EXEC_SUFFIX;
use crate::err::ExtractError;
use crate::escape::unescape_host_string;
use crate::escape::unescape_python_literal;

/// The two source texts recovered from a polyglot document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Payloads {
  pub javascript: String,
  pub python: String,
}

/// Takes apart a document produced by [`crate::encode`], undoing both escaping
/// passes. Trailing whitespace after the closing `])` is ignored.
///
/// ```
/// let doc = juspy::encode("print('hi')\n", "console.log(\"hi\");\n");
/// let payloads = juspy::extract(doc.as_str()).unwrap();
/// assert_eq!(payloads.python, "print('hi')\n");
/// assert_eq!(payloads.javascript, "console.log(\"hi\");\n");
/// ```
pub fn extract(document: &str) -> Result<Payloads, ExtractError> {
  if !document.starts_with(DOCUMENT_PREFIX) {
    return Err(ExtractError::MissingPrefix);
  }

  let js_start = DOCUMENT_PREFIX.len();
  let js_end = find_closing_quote(document, js_start)?;
  if !document[js_end..].starts_with(ELEMENT_SEPARATOR) {
    return Err(ExtractError::MissingSeparator { offset: js_end });
  }

  let exec_start = js_end + ELEMENT_SEPARATOR.len();
  let exec_end = find_closing_quote(document, exec_start)?;
  if document[exec_end..].trim_end() != document_suffix() {
    return Err(ExtractError::MissingSuffix { offset: exec_end });
  }

  let javascript = unescape_host_string(&document[js_start..js_end])?;
  let exec = unescape_host_string(&document[exec_start..exec_end])?;
  let body = exec
    .strip_prefix(EXEC_PREFIX)
    .and_then(|rest| rest.strip_suffix(EXEC_SUFFIX))
    .ok_or(ExtractError::MissingExecWrapper)?;
  let python = unescape_python_literal(body)?;

  Ok(Payloads { javascript, python })
}

/// Returns the offset of the `"` ending a literal whose body starts at `start`.
fn find_closing_quote(document: &str, start: usize) -> Result<usize, ExtractError> {
  let bytes = document.as_bytes();
  let mut i = start;
  while i < bytes.len() {
    match bytes[i] {
      b'\\' => i += 2,
      b'"' => return Ok(i),
      _ => i += 1,
    }
  }
  Err(ExtractError::UnterminatedString {
    offset: start.saturating_sub(1),
  })
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::encode;

  #[test]
  fn recovers_both_payloads() {
    let python = "def f(s):\n    return s.replace('\\\\', '/')\n\nprint(f(\"a\\\\b\"))\n";
    let js = "const s = \"a\\\\b\";\nconsole.log(s.split('\\\\'));\n";
    let payloads = extract(encode(python, js).as_str()).unwrap();
    assert_eq!(payloads.python, python);
    assert_eq!(payloads.javascript, js);
  }

  #[test]
  fn recovers_empty_payloads() {
    let payloads = extract(encode("", "").as_str()).unwrap();
    assert_eq!(payloads.python, "");
    assert_eq!(payloads.javascript, "");
  }

  #[test]
  fn tolerates_trailing_newline() {
    let doc = format!("{}\n", encode("1", "2"));
    let payloads = extract(&doc).unwrap();
    assert_eq!(payloads.python, "1");
    assert_eq!(payloads.javascript, "2");
  }

  #[test]
  fn rejects_foreign_text() {
    assert_eq!(
      extract("console.log(1)"),
      Err(ExtractError::MissingPrefix)
    );
  }

  #[test]
  fn rejects_truncated_documents() {
    assert_eq!(
      extract("eval([\"abc"),
      Err(ExtractError::UnterminatedString { offset: 6 })
    );
    assert_eq!(
      extract("eval([\"abc\"])"),
      Err(ExtractError::MissingSeparator { offset: 10 })
    );
  }

  #[test]
  fn rejects_other_selectors() {
    let doc = encode("a", "b").into_string().replace("(-1 % 2 + 1) >> 1", "0");
    assert!(matches!(
      extract(&doc),
      Err(ExtractError::MissingSuffix { .. })
    ));
  }

  #[test]
  fn rejects_missing_exec_wrapper() {
    assert_eq!(
      extract("eval([\"a\", \"print(1)\"][(-1 % 2 + 1) >> 1])"),
      Err(ExtractError::MissingExecWrapper)
    );
  }
}
