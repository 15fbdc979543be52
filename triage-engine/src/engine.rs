//! Analyzer: classify a line sequence and compose the statistics report.

use chrono::Utc;

use crate::classify;
use crate::config::PatternTable;
use crate::stats;
use crate::types::{LevelBreakdown, LogEntry, Report, Summary};

/// The analysis engine. Holds the read-only pattern table for its lifetime;
/// carries no per-run state, so every `analyze` call is independent and two
/// calls on identical input yield identical reports apart from the
/// `processed_at` stamp.
pub struct Analyzer {
  table: PatternTable,
}

impl Analyzer {
  pub fn new(table: PatternTable) -> Self {
    Self { table }
  }

  pub fn with_defaults() -> Self {
    Self::new(PatternTable::default())
  }

  pub fn table(&self) -> &PatternTable {
    &self.table
  }

  /// Classify every line into an entry, numbering from 1 in input order.
  pub fn classify_lines<S: AsRef<str>>(&self, lines: &[S]) -> Vec<LogEntry> {
    lines
      .iter()
      .enumerate()
      .map(|(i, line)| classify::classify(line.as_ref(), i as u64 + 1, &self.table))
      .collect()
  }

  /// Full pipeline: classify, then aggregate into one report.
  pub fn analyze<S: AsRef<str>>(&self, lines: &[S]) -> Report {
    let entries = self.classify_lines(lines);
    self.aggregate(&entries)
  }

  /// Compose the five sub-computations into one report. Pure apart from the
  /// wall-clock `processed_at` stamp.
  pub fn aggregate(&self, entries: &[LogEntry]) -> Report {
    let severity = stats::severity_stats(entries);
    let response_time = stats::response_time_stats(entries);
    let trends = stats::time_trends(entries);
    let critical_errors = stats::critical_errors(entries);
    let health_score = stats::health_score(&severity, &response_time);

    Report {
      summary: Summary {
        total_lines: severity.total,
        processed_at: Utc::now().to_rfc3339(),
      },
      levels: LevelBreakdown {
        errors: severity.errors,
        warnings: severity.warnings,
        info: severity.info,
        debug: severity.debug,
        error_rate: format!("{}%", severity.error_rate),
      },
      response_time,
      trends,
      critical_errors,
      health_score,
    }
  }
}
