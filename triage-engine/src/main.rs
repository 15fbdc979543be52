//! Binary entrypoint: read raw log lines from stdin, write one JSON report
//! to stdout.
//!
//! Blank lines carry no signal and are skipped, matching the CLI front end.
//! Uses the built-in default pattern table.

use std::io::{self, BufRead, Write};

use triage_engine::Analyzer;

fn main() {
  let stdin = io::stdin();
  let mut lines: Vec<String> = Vec::new();

  for line in stdin.lock().lines() {
    let line = match line {
      Ok(l) => l,
      Err(e) => {
        let _ = writeln!(io::stderr(), "triage-engine: read error: {}", e);
        std::process::exit(1);
      }
    };
    if line.trim().is_empty() {
      continue;
    }
    lines.push(line);
  }

  let report = Analyzer::with_defaults().analyze(&lines);

  let stdout = io::stdout();
  let mut out = io::BufWriter::new(stdout.lock());
  let _ = serde_json::to_writer_pretty(&mut out, &report);
  let _ = writeln!(out);
  let _ = out.flush();
}
