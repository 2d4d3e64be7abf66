use clap::Parser;
use diagnostics::render::{render_diagnostic, SourceProvider};
use diagnostics::{host_error, Diagnostic, FileId, Severity};
use juspy::{extract, merge, Order, SourceBuffer, FIRST_FILE, SECOND_FILE};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::Level;
use tracing_subscriber::fmt::format::FmtSpan;

const MISSING_INPUT_CODE: &str = "JUSPY1001";
const READ_INPUT_CODE: &str = "JUSPY1002";
const WRITE_OUTPUT_CODE: &str = "JUSPY1003";
const VERIFY_CODE: &str = "JUSPY1004";

const JSON_SCHEMA_VERSION: u32 = 1;

#[derive(Parser)]
#[command(
  name = "juspy",
  version,
  about = "Merges Python and JavaScript files into a single file that runs under either interpreter."
)]
struct Cli {
  /// First input file (.py, .js, .cjs or .mjs).
  file1: PathBuf,

  /// Second input file (.py, .js, .cjs or .mjs).
  file2: PathBuf,

  /// Where to write the merged file. Parent directories are created.
  #[arg(default_value = "out.py.js")]
  output: PathBuf,

  /// Print a JSON report on stdout instead of progress lines.
  #[arg(long)]
  json: bool,

  /// Check that the merged file decodes back to both inputs before writing it.
  #[arg(long)]
  verify: bool,

  /// Emit tracing events (JSON) on stderr.
  #[arg(long)]
  trace: bool,
}

/// Names and contents of the two inputs, indexed by [`FileId`].
struct InputFiles {
  names: [String; 2],
  texts: [Option<String>; 2],
}

impl SourceProvider for InputFiles {
  fn file_name(&self, file: FileId) -> Option<&str> {
    self.names.get(file.0 as usize).map(|name| name.as_str())
  }

  fn file_text(&self, file: FileId) -> Option<&str> {
    self.texts.get(file.0 as usize)?.as_deref()
  }
}

#[derive(Default, Serialize)]
struct Outcome {
  #[serde(skip_serializing_if = "Option::is_none")]
  python: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  javascript: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  order: Option<Order>,
  written: bool,
  diagnostics: Vec<Diagnostic>,
}

#[derive(Serialize)]
struct JsonReport<'a> {
  schema_version: u32,
  output: String,
  #[serde(flatten)]
  outcome: &'a Outcome,
}

fn main() -> ExitCode {
  let cli = Cli::parse();
  init_tracing(cli.trace);

  if !cli.json {
    println!("Input File 1: {}", cli.file1.display());
    println!("Input File 2: {}", cli.file2.display());
    println!("Output File: {}", cli.output.display());
  }

  let mut inputs = InputFiles {
    names: [
      cli.file1.display().to_string(),
      cli.file2.display().to_string(),
    ],
    texts: [None, None],
  };
  let mut outcome = Outcome::default();
  if let Err(diagnostic) = run(&cli, &mut inputs, &mut outcome) {
    outcome.diagnostics.push(diagnostic);
  }
  let failed = outcome.diagnostics.iter().any(Diagnostic::is_error);

  if cli.json {
    let report = JsonReport {
      schema_version: JSON_SCHEMA_VERSION,
      output: cli.output.display().to_string(),
      outcome: &outcome,
    };
    match serde_json::to_string_pretty(&report) {
      Ok(serialized) => println!("{serialized}"),
      Err(err) => {
        eprintln!("failed to serialize JSON: {err}");
        return ExitCode::FAILURE;
      }
    }
  } else {
    for diagnostic in &outcome.diagnostics {
      eprintln!("{}", render_diagnostic(&inputs, diagnostic));
    }
    if outcome.written {
      println!("Merged files written to {}", cli.output.display());
    }
  }

  if failed {
    ExitCode::FAILURE
  } else {
    ExitCode::SUCCESS
  }
}

fn run(cli: &Cli, inputs: &mut InputFiles, outcome: &mut Outcome) -> Result<(), Diagnostic> {
  let missing: Vec<&PathBuf> = [&cli.file1, &cli.file2]
    .into_iter()
    .filter(|path| !path.exists())
    .collect();
  if !missing.is_empty() {
    let mut diagnostic = host_error(
      MISSING_INPUT_CODE,
      None,
      "one or more input files do not exist",
    );
    for path in missing {
      diagnostic = diagnostic.with_note(format!("not found: {}", path.display()));
    }
    return Err(diagnostic);
  }

  let first = read_input(&cli.file1, FIRST_FILE)?;
  let second = read_input(&cli.file2, SECOND_FILE)?;
  inputs.texts = [Some(first.clone()), Some(second.clone())];

  let merged = merge(
    SourceBuffer::from_path(&cli.file1, first),
    SourceBuffer::from_path(&cli.file2, second),
  );
  let pair = &merged.classified.pair;
  outcome.python = Some(pair.python.name().to_string());
  outcome.javascript = Some(pair.javascript.name().to_string());
  outcome.order = Some(merged.classified.order);
  outcome.diagnostics.extend(merged.diagnostics.iter().cloned());

  if cli.verify {
    let payloads = extract(merged.document.as_str()).map_err(|err| {
      host_error(VERIFY_CODE, None, "merged file does not decode").with_note(err.to_string())
    })?;
    if payloads.python != pair.python.text() || payloads.javascript != pair.javascript.text() {
      return Err(host_error(
        VERIFY_CODE,
        None,
        "merged file does not decode back to the inputs",
      ));
    }
    tracing::debug!("verified merged document");
  }

  write_output(&cli.output, merged.document.as_str())?;
  outcome.written = true;
  Ok(())
}

fn read_input(path: &Path, file: FileId) -> Result<String, Diagnostic> {
  let bytes = fs::read(path).map_err(|err| {
    host_error(
      READ_INPUT_CODE,
      None,
      format!("failed to read {}: {err}", path.display()),
    )
  })?;
  String::from_utf8(bytes).map_err(|err| {
    Diagnostic::file_level(
      Severity::Error,
      READ_INPUT_CODE,
      format!("input is not valid UTF-8: {}", err.utf8_error()),
      file,
    )
  })
}

fn write_output(path: &Path, document: &str) -> Result<(), Diagnostic> {
  let fail = |err: std::io::Error| {
    host_error(
      WRITE_OUTPUT_CODE,
      None,
      format!("failed to write {}: {err}", path.display()),
    )
  };
  if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
    fs::create_dir_all(dir).map_err(fail)?;
  }
  fs::write(path, document).map_err(fail)
}

fn init_tracing(enabled: bool) {
  if !enabled {
    return;
  }
  let _ = tracing_subscriber::fmt()
    .with_span_events(FmtSpan::CLOSE)
    .with_max_level(Level::DEBUG)
    .with_writer(std::io::stderr)
    .json()
    .with_ansi(false)
    .try_init();
}
