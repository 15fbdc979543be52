//! logtriage CLI — validation, orchestration, and rendering around the
//! triage engine.
//!
//! The engine consumes already-read line text and returns plain data; this
//! crate owns everything that touches the filesystem or a terminal.

mod args;
mod render;
mod validate;

pub use args::{Cli, ReportFormat};

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use is_terminal::IsTerminal;
use triage_engine::{Analyzer, PatternTable, Report};

pub fn run(cli: Cli) -> Result<()> {
  let table = match &cli.config {
    Some(path) => {
      let text = fs::read_to_string(path)
        .with_context(|| format!("cannot read config {}", path.display()))?;
      PatternTable::from_json(&text)
        .with_context(|| format!("invalid config {}", path.display()))?
    }
    None => PatternTable::default(),
  };
  let analyzer = Analyzer::new(table);

  match (&cli.file, &cli.dir) {
    (Some(file), None) => analyze_file(file, &analyzer, &cli).map(|_| ()),
    (None, Some(dir)) => analyze_directory(dir, &analyzer, &cli),
    // clap's input group guarantees exactly one is set.
    _ => bail!("specify exactly one of --file or --dir"),
  }
}

/// Analyze one log file end to end. Returns `None` when the file holds no
/// analyzable content (blank lines only).
fn analyze_file(path: &Path, analyzer: &Analyzer, cli: &Cli) -> Result<Option<Report>> {
  eprintln!("Analyzing {}", path.display());

  let resolved = validate::validate_log_file(path, analyzer.table().max_file_size)?;
  let content = validate::read_utf8(&resolved)?;
  let lines: Vec<&str> = content
    .lines()
    .filter(|line| !line.trim().is_empty())
    .collect();

  if lines.is_empty() {
    eprintln!("warning: {} has no content to analyze", path.display());
    return Ok(None);
  }

  let report = analyzer.analyze(&lines);
  let source = resolved.display().to_string();

  let rendered = match cli.format {
    ReportFormat::Json => render::json_report(&report)?,
    ReportFormat::Html => render::html_report(&report, &source),
    ReportFormat::Text => {
      let color = cli.output.is_none() && std::io::stdout().is_terminal();
      render::text_report(&report, &source, color)
    }
  };

  match &cli.output {
    Some(out) => {
      render::save_report(&rendered, out)?;
      eprintln!("Report saved to {}", out.display());
    }
    None if cli.format == ReportFormat::Html => {
      // HTML is unreadable on a terminal; mirror --output report.html.
      let default_out = PathBuf::from("report.html");
      render::save_report(&rendered, &default_out)?;
      eprintln!("HTML report saved to {}", default_out.display());
    }
    None => println!("{}", rendered),
  }

  Ok(Some(report))
}

/// Analyze every *.log / *.txt file in a directory. Per-file failures are
/// reported and skipped; in JSON format a cross-file summary follows.
fn analyze_directory(dir: &Path, analyzer: &Analyzer, cli: &Cli) -> Result<()> {
  let resolved = validate::validate_directory(dir)?;

  let mut log_files: Vec<PathBuf> = fs::read_dir(&resolved)
    .with_context(|| format!("cannot list {}", resolved.display()))?
    .filter_map(|entry| entry.ok())
    .map(|entry| entry.path())
    .filter(|p| {
      matches!(
        p.extension().and_then(|e| e.to_str()),
        Some("log") | Some("txt")
      )
    })
    .collect();
  log_files.sort();

  if log_files.is_empty() {
    eprintln!("warning: no log files found in {}", resolved.display());
    return Ok(());
  }

  eprintln!("Found {} log files", log_files.len());

  let mut results: Vec<(String, Report)> = Vec::new();
  for path in &log_files {
    match analyze_file(path, analyzer, cli) {
      Ok(Some(report)) => {
        let name = path
          .file_name()
          .and_then(|n| n.to_str())
          .unwrap_or_default()
          .to_string();
        results.push((name, report));
      }
      Ok(None) => {}
      Err(e) => eprintln!("Error analyzing {}: {:#}", path.display(), e),
    }
  }

  if cli.format == ReportFormat::Json && !results.is_empty() {
    println!("{}", render::directory_summary(&results)?);
  }

  Ok(())
}
