use crate::Diagnostic;
use crate::FileId;
use crate::Span;
use crate::TextRange;
use std::cmp::max;
use std::fmt::Write;

const TAB_WIDTH: usize = 2;

/// Provides access to source text for rendering diagnostics.
pub trait SourceProvider {
  fn file_name(&self, file: FileId) -> Option<&str>;
  fn file_text(&self, file: FileId) -> Option<&str>;
}

/// Render a diagnostic into a human-readable string with caret highlighting.
pub fn render_diagnostic(provider: &dyn SourceProvider, diagnostic: &Diagnostic) -> String {
  let mut output = String::new();
  writeln!(
    output,
    "{}[{}]: {}",
    diagnostic.severity, diagnostic.code, diagnostic.message
  )
  .unwrap();

  if let Some(primary) = diagnostic.primary {
    render_span(provider, &mut output, primary, &diagnostic.message);
  } else if let Some(file) = diagnostic.file {
    writeln!(output, " --> {}", file_name(provider, file)).unwrap();
  }

  for note in &diagnostic.notes {
    writeln!(output, "= note: {}", note).unwrap();
  }

  output
}

fn file_name(provider: &dyn SourceProvider, file: FileId) -> &str {
  provider.file_name(file).unwrap_or("<unknown file>")
}

fn render_span(provider: &dyn SourceProvider, output: &mut String, span: Span, message: &str) {
  let name = file_name(provider, span.file);
  let Some(text) = provider.file_text(span.file) else {
    writeln!(output, " --> {}:?:?", name).unwrap();
    writeln!(output, "  | (source unavailable)").unwrap();
    return;
  };

  let cache = LineCache::new(text);
  let (start, end) = clamp_range(text, span.range);
  let (line, col) = line_and_column(&cache, start);
  writeln!(output, " --> {}:{}:{}", name, line + 1, col + 1).unwrap();

  let start_line = cache.line_index_at_offset(start);
  let end_line = max(
    start_line,
    cache.line_index_at_offset(if end > start { end - 1 } else { end }),
  );
  let gutter_width = (end_line + 1).to_string().len();

  writeln!(output, "  |").unwrap();
  for line_idx in start_line..=end_line {
    let (line_start, line_end) = cache.line_bounds(line_idx);
    let line_text = &cache.text[line_start..line_end];
    writeln!(
      output,
      "{:>width$} | {}",
      line_idx + 1,
      printable_line(line_text, TAB_WIDTH),
      width = gutter_width
    )
    .unwrap();

    let local_start = start.clamp(line_start, line_end) - line_start;
    let local_end = end.clamp(line_start, line_end) - line_start;
    let start_col = display_column(line_text, local_start, TAB_WIDTH);
    let end_col = display_column(line_text, local_end, TAB_WIDTH);

    let mut underline = format!("{:>width$} | ", "", width = gutter_width);
    underline.push_str(&" ".repeat(start_col));
    underline.push_str(&"^".repeat(max(1, end_col.saturating_sub(start_col))));
    if line_idx == start_line && !message.is_empty() {
      underline.push(' ');
      underline.push_str(message);
    }
    writeln!(output, "{underline}").unwrap();
  }
}

/// Expands tabs and replaces carriage returns and NULs with visible one-column
/// glyphs so they cannot disturb the terminal line.
fn printable_line(line: &str, tab_width: usize) -> String {
  let tab_width = tab_width.max(1);
  let mut expanded = String::with_capacity(line.len());
  for ch in line.chars() {
    match ch {
      '\t' => expanded.push_str(&" ".repeat(tab_width)),
      '\r' => expanded.push('\u{240D}'),
      '\0' => expanded.push('\u{2400}'),
      ch => expanded.push(ch),
    }
  }
  expanded
}

fn clamp_range(text: &str, range: TextRange) -> (usize, usize) {
  let start = clamp_offset_to_char_boundary(text, range.start as usize);
  let end = clamp_offset_to_char_boundary(text, range.end as usize);
  (start, end.max(start))
}

fn clamp_offset_to_char_boundary(text: &str, offset: usize) -> usize {
  let mut offset = offset.min(text.len());
  while offset > 0 && !text.is_char_boundary(offset) {
    offset -= 1;
  }
  offset
}

fn display_column(line_text: &str, offset_in_line: usize, tab_width: usize) -> usize {
  let tab_width = tab_width.max(1);
  line_text
    .char_indices()
    .take_while(|(idx, _)| *idx < offset_in_line)
    .map(|(_, ch)| if ch == '\t' { tab_width } else { 1 })
    .sum()
}

/// Zero-based line and display column of a byte offset.
fn line_and_column(cache: &LineCache<'_>, offset: usize) -> (usize, usize) {
  let line_idx = cache.line_index_at_offset(offset);
  let (line_start, line_end) = cache.line_bounds(line_idx);
  let col = display_column(
    &cache.text[line_start..line_end],
    offset.saturating_sub(line_start),
    TAB_WIDTH,
  );
  (line_idx, col)
}

struct LineCache<'a> {
  text: &'a str,
  starts: Vec<usize>,
}

impl<'a> LineCache<'a> {
  fn new(text: &'a str) -> Self {
    let mut starts = vec![0];
    for (idx, ch) in text.char_indices() {
      if ch == '\n' {
        starts.push(idx + 1);
      }
    }
    Self { text, starts }
  }

  fn line_bounds(&self, line_idx: usize) -> (usize, usize) {
    let start = *self.starts.get(line_idx).unwrap_or(&self.text.len());
    let end = if line_idx + 1 < self.starts.len() {
      self.starts[line_idx + 1].saturating_sub(1)
    } else {
      self.text.len()
    };
    (start, end.max(start))
  }

  fn line_index_at_offset(&self, offset: usize) -> usize {
    let clamped = offset.min(self.text.len());
    match self.starts.binary_search(&clamped) {
      Ok(idx) => idx,
      Err(0) => 0,
      Err(idx) => idx - 1,
    }
  }
}
