use std::error::Error;
use std::fmt;

/// Why a document could not be taken apart into its two payloads.
///
/// Offsets are byte offsets into the text being read at the time: the whole
/// document for shape errors, a single literal body for escape errors.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExtractError {
  MissingPrefix,
  UnterminatedString { offset: usize },
  MissingSeparator { offset: usize },
  MissingSuffix { offset: usize },
  MissingExecWrapper,
  InvalidEscape { offset: usize, escape: char },
  TrailingBackslash,
}

impl fmt::Display for ExtractError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ExtractError::MissingPrefix => f.write_str("document does not start with `eval([\"`"),
      ExtractError::UnterminatedString { offset } => {
        write!(f, "string literal starting at {offset} is not terminated")
      }
      ExtractError::MissingSeparator { offset } => {
        write!(f, "expected `, ` between array elements at {offset}")
      }
      ExtractError::MissingSuffix { offset } => {
        write!(f, "expected selector and closing `])` at {offset}")
      }
      ExtractError::MissingExecWrapper => {
        f.write_str("second element is not an `exec('''...''')` statement")
      }
      ExtractError::InvalidEscape { offset, escape } => {
        write!(f, "unexpected escape `\\{escape}` at {offset}")
      }
      ExtractError::TrailingBackslash => f.write_str("literal ends with a lone backslash"),
    }
  }
}

impl Error for ExtractError {}
