use diagnostics::Diagnostic;
use diagnostics::FileId;
use diagnostics::Span;
use diagnostics::TextRange;

/// Diagnostic code for a raw carriage return in an input.
pub const CARRIAGE_RETURN_CODE: &str = "JUSPY0003";
/// Diagnostic code for a NUL character in an input.
pub const NUL_CODE: &str = "JUSPY0004";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HazardKind {
  /// U+000D. The host pass escapes line feeds but not `\r`, and both
  /// JavaScript and Python end a one-line string at a raw `\r`.
  CarriageReturn,
  /// U+0000. JavaScript accepts it inside a string literal, but Python
  /// refuses to compile any source file that contains one.
  Nul,
}

impl HazardKind {
  fn of(ch: char) -> Option<Self> {
    match ch {
      '\r' => Some(HazardKind::CarriageReturn),
      '\0' => Some(HazardKind::Nul),
      _ => None,
    }
  }

  pub fn code(self) -> &'static str {
    match self {
      HazardKind::CarriageReturn => CARRIAGE_RETURN_CODE,
      HazardKind::Nul => NUL_CODE,
    }
  }
}

/// A run of input text that the escaping passes copy into the document in a
/// form at least one interpreter rejects.
///
/// Carriage returns and NUL characters qualify. The document is still produced
/// unchanged; this is a report only.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Hazard {
  pub kind: HazardKind,
  /// Byte range of the run within the input text.
  pub start: usize,
  pub end: usize,
}

impl Hazard {
  pub fn len(&self) -> usize {
    self.end - self.start
  }

  pub fn is_empty(&self) -> bool {
    self.start == self.end
  }

  pub fn to_diagnostic(&self, file: FileId) -> Diagnostic {
    let (message, note) = match self.kind {
      HazardKind::CarriageReturn => (
        "carriage return will not be escaped",
        "the merged file will not parse; convert line endings to LF first",
      ),
      HazardKind::Nul => (
        "NUL character will not be escaped",
        "Python rejects source files containing NUL bytes; write the escape \\x00 instead",
      ),
    };
    Diagnostic::warning(
      self.kind.code(),
      message,
      Span::new(file, TextRange::from_offsets(self.start, self.end)),
    )
    .with_note(note)
  }
}

/// Finds every maximal run of carriage returns or NUL characters in `text`.
/// A run holds one kind only.
pub fn scan_hazards(text: &str) -> Vec<Hazard> {
  let mut hazards: Vec<Hazard> = Vec::new();
  for (offset, kind) in text
    .char_indices()
    .filter_map(|(offset, ch)| HazardKind::of(ch).map(|kind| (offset, kind)))
  {
    match hazards.last_mut() {
      Some(last) if last.end == offset && last.kind == kind => last.end += 1,
      _ => hazards.push(Hazard {
        kind,
        start: offset,
        end: offset + 1,
      }),
    }
  }
  hazards
}

#[cfg(test)]
mod tests {
  use super::*;

  fn cr(start: usize, end: usize) -> Hazard {
    Hazard {
      kind: HazardKind::CarriageReturn,
      start,
      end,
    }
  }

  fn nul(start: usize, end: usize) -> Hazard {
    Hazard {
      kind: HazardKind::Nul,
      start,
      end,
    }
  }

  #[test]
  fn lf_only_text_is_clean() {
    assert!(scan_hazards("a = 1\nb = 2\n").is_empty());
    assert!(scan_hazards("").is_empty());
  }

  #[test]
  fn triple_quotes_are_not_hazards() {
    assert!(scan_hazards("x = '''doc'''\n").is_empty());
  }

  #[test]
  fn escaped_nul_text_is_not_a_hazard() {
    assert!(scan_hazards(r"s = '\x00' + '\0'").is_empty());
  }

  #[test]
  fn crlf_lines_report_each_return() {
    assert_eq!(scan_hazards("a\r\nb\r\n"), vec![cr(1, 2), cr(4, 5)]);
  }

  #[test]
  fn adjacent_returns_merge() {
    let hazards = scan_hazards("a\r\r\rb");
    assert_eq!(hazards, vec![cr(1, 4)]);
    assert_eq!(hazards[0].len(), 3);
  }

  #[test]
  fn nul_runs_are_reported() {
    assert_eq!(
      scan_hazards("console.log('a\u{0}b'.length)"),
      vec![nul(14, 15)]
    );
    assert_eq!(scan_hazards("\0\0x\0"), vec![nul(0, 2), nul(3, 4)]);
  }

  #[test]
  fn runs_split_on_kind_change() {
    assert_eq!(
      scan_hazards("é\r\0\0\r"),
      vec![cr(2, 3), nul(3, 5), cr(5, 6)]
    );
  }

  #[test]
  fn diagnostic_points_into_file() {
    let diagnostic = cr(3, 4).to_diagnostic(FileId(1));
    assert_eq!(diagnostic.code, CARRIAGE_RETURN_CODE);
    assert_eq!(
      diagnostic.primary,
      Some(Span::new(FileId(1), TextRange::new(3, 4)))
    );
  }

  #[test]
  fn nul_diagnostic_has_its_own_code() {
    let diagnostic = nul(0, 2).to_diagnostic(FileId(0));
    assert_eq!(diagnostic.code, NUL_CODE);
    assert!(diagnostic.message.contains("NUL"));
    assert_eq!(
      diagnostic.primary,
      Some(Span::new(FileId(0), TextRange::new(0, 2)))
    );
  }
}
