//! Escaping passes used to nest source text inside string literals.
//!
//! Each pass maps a small set of characters to two-character escapes in a
//! single left-to-right scan, so a produced escape is never rescanned. This is
//! equivalent to replacing the backslash first and the other characters after.

use crate::err::ExtractError;

/// Escapes `text` for the body of a Python `'''` literal: backslash, single
/// quote and double quote.
pub fn escape_python_literal(out: &mut String, text: &str) {
  for ch in text.chars() {
    match ch {
      '\\' => out.push_str("\\\\"),
      '\'' => out.push_str("\\'"),
      '"' => out.push_str("\\\""),
      ch => out.push(ch),
    }
  }
}

/// Escapes `text` for the body of a double-quoted host literal: backslash,
/// line feed and double quote. Nothing else is touched; in particular a
/// carriage return passes through raw (see [`crate::hazard`]).
pub fn escape_host_string(out: &mut String, text: &str) {
  for ch in text.chars() {
    match ch {
      '\\' => out.push_str("\\\\"),
      '\n' => out.push_str("\\n"),
      '"' => out.push_str("\\\""),
      ch => out.push(ch),
    }
  }
}

/// Inverse of [`escape_python_literal`].
pub fn unescape_python_literal(body: &str) -> Result<String, ExtractError> {
  unescape(body, |escape| match escape {
    '\\' => Some('\\'),
    '\'' => Some('\''),
    '"' => Some('"'),
    _ => None,
  })
}

/// Inverse of [`escape_host_string`].
pub fn unescape_host_string(body: &str) -> Result<String, ExtractError> {
  unescape(body, |escape| match escape {
    '\\' => Some('\\'),
    'n' => Some('\n'),
    '"' => Some('"'),
    _ => None,
  })
}

fn unescape(body: &str, decode: impl Fn(char) -> Option<char>) -> Result<String, ExtractError> {
  let mut out = String::with_capacity(body.len());
  let mut chars = body.char_indices();
  while let Some((offset, ch)) = chars.next() {
    if ch != '\\' {
      out.push(ch);
      continue;
    }
    let Some((_, escape)) = chars.next() else {
      return Err(ExtractError::TrailingBackslash);
    };
    match decode(escape) {
      Some(decoded) => out.push(decoded),
      None => return Err(ExtractError::InvalidEscape { offset, escape }),
    }
  }
  Ok(out)
}

#[cfg(test)]
mod tests {
  use super::*;

  fn python(text: &str) -> String {
    let mut out = String::new();
    escape_python_literal(&mut out, text);
    out
  }

  fn host(text: &str) -> String {
    let mut out = String::new();
    escape_host_string(&mut out, text);
    out
  }

  #[test]
  fn python_pass_escapes_quotes_and_backslashes() {
    assert_eq!(python(r#"print('a', "b")"#), r#"print(\'a\', \"b\")"#);
    assert_eq!(python(r"C:\dir"), r"C:\\dir");
  }

  #[test]
  fn python_pass_keeps_newlines() {
    assert_eq!(python("a\nb"), "a\nb");
  }

  #[test]
  fn host_pass_escapes_newlines_quotes_and_backslashes() {
    assert_eq!(host("a\nb"), r"a\nb");
    assert_eq!(host(r#"say("hi")"#), r#"say(\"hi\")"#);
    assert_eq!(host(r"\n"), r"\\n");
  }

  #[test]
  fn host_pass_leaves_single_quotes_and_tabs() {
    assert_eq!(host("'\t'"), "'\t'");
  }

  #[test]
  fn backslash_before_quote_yields_two_escapes() {
    assert_eq!(python(r"\'"), r"\\\'");
    assert_eq!(host(r#"\""#), r#"\\\""#);
    assert_eq!(unescape_python_literal(r"\\\'").unwrap(), r"\'");
    assert_eq!(unescape_host_string(r#"\\\""#).unwrap(), r#"\""#);
  }

  #[test]
  fn unescape_inverts_each_pass() {
    let text = "if x:\n    print('\\\\', \"q\")\n";
    assert_eq!(unescape_python_literal(&python(text)).unwrap(), text);
    assert_eq!(unescape_host_string(&host(text)).unwrap(), text);
  }

  #[test]
  fn unescape_rejects_foreign_escapes() {
    assert_eq!(
      unescape_host_string(r"ab\t"),
      Err(ExtractError::InvalidEscape {
        offset: 2,
        escape: 't'
      })
    );
    assert_eq!(
      unescape_python_literal(r"\n"),
      Err(ExtractError::InvalidEscape {
        offset: 0,
        escape: 'n'
      })
    );
    assert_eq!(
      unescape_host_string("x\\"),
      Err(ExtractError::TrailingBackslash)
    );
  }
}
