use serde::Serialize;
use std::fmt;
use std::path::Path;

/// Extensions recognized as Python source.
pub const PYTHON_EXTENSIONS: &[&str] = &["py"];
/// Extensions recognized as JavaScript source.
pub const JAVASCRIPT_EXTENSIONS: &[&str] = &["js", "cjs", "mjs"];

/// The language role assigned to an input file from its extension.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
  Python,
  JavaScript,
  Unknown,
}

impl Language {
  /// Tags an extension, ignoring ASCII case and an optional leading dot.
  ///
  /// ```
  /// use juspy::Language;
  ///
  /// assert_eq!(Language::from_extension(".py"), Language::Python);
  /// assert_eq!(Language::from_extension("MJS"), Language::JavaScript);
  /// assert_eq!(Language::from_extension(".txt"), Language::Unknown);
  /// ```
  pub fn from_extension(ext: &str) -> Language {
    let ext = ext.strip_prefix('.').unwrap_or(ext);
    if PYTHON_EXTENSIONS
      .iter()
      .any(|known| known.eq_ignore_ascii_case(ext))
    {
      Language::Python
    } else if JAVASCRIPT_EXTENSIONS
      .iter()
      .any(|known| known.eq_ignore_ascii_case(ext))
    {
      Language::JavaScript
    } else {
      Language::Unknown
    }
  }

  /// Tags a path by the final extension of its file name. Dotfiles such as
  /// `.py` have no extension and are [`Language::Unknown`].
  pub fn from_path(path: &Path) -> Language {
    path
      .extension()
      .and_then(|ext| ext.to_str())
      .map(Language::from_extension)
      .unwrap_or(Language::Unknown)
  }

  pub const fn as_str(&self) -> &'static str {
    match self {
      Language::Python => "python",
      Language::JavaScript => "javascript",
      Language::Unknown => "unknown",
    }
  }

  pub fn is_python(&self) -> bool {
    *self == Language::Python
  }

  pub fn is_javascript(&self) -> bool {
    *self == Language::JavaScript
  }
}

impl fmt::Display for Language {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn recognizes_all_javascript_extensions() {
    for ext in [".js", ".cjs", ".mjs", "js", ".JS"] {
      assert_eq!(Language::from_extension(ext), Language::JavaScript, "{ext}");
    }
  }

  #[test]
  fn empty_and_unrelated_extensions_are_unknown() {
    assert_eq!(Language::from_extension(""), Language::Unknown);
    assert_eq!(Language::from_extension("."), Language::Unknown);
    assert_eq!(Language::from_extension(".ts"), Language::Unknown);
    assert_eq!(Language::from_extension(".pyc"), Language::Unknown);
  }

  #[test]
  fn paths_use_last_extension() {
    assert_eq!(Language::from_path(Path::new("dir/app.py")), Language::Python);
    assert_eq!(
      Language::from_path(Path::new("out.py.js")),
      Language::JavaScript
    );
    assert_eq!(Language::from_path(Path::new("Makefile")), Language::Unknown);
    assert_eq!(Language::from_path(Path::new(".py")), Language::Unknown);
  }
}
