//! Core types for the triage engine (JSON contracts + internal models).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Severity levels
// ---------------------------------------------------------------------------

/// Closed set of severity levels. A line that matches no marker stays
/// unclassified (`None`) — it counts toward totals but no level bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
  Error,
  Warning,
  Info,
  Debug,
}

impl Level {
  pub fn from_str_loose(s: &str) -> Option<Self> {
    match s.to_ascii_lowercase().as_str() {
      "error" | "err" => Some(Self::Error),
      "warning" | "warn" => Some(Self::Warning),
      "info" => Some(Self::Info),
      "debug" | "trace" => Some(Self::Debug),
      _ => None,
    }
  }
}

// ---------------------------------------------------------------------------
// Classified entries
// ---------------------------------------------------------------------------

/// One classified log line. Classification is total: a line that matches
/// nothing still yields an entry with all optional fields unset.
#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
  /// 1-based position in the input sequence; unique and monotonic per run.
  pub line_number: u64,
  pub level: Option<Level>,
  /// Verbatim matched span of the configured timestamp pattern.
  pub timestamp: Option<String>,
  /// The full line with leading/trailing whitespace removed.
  pub message: String,
  /// Milliseconds, from the response-time pattern's capture group.
  pub response_time: Option<f64>,
}

// ---------------------------------------------------------------------------
// Aggregated statistics
// ---------------------------------------------------------------------------

/// Per-level counts over one run. `error_rate` is the 2-decimal percentage
/// as a plain string ("33.33"); "0.00" when the run is empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeverityStats {
  pub total: u64,
  pub errors: u64,
  pub warnings: u64,
  pub info: u64,
  pub debug: u64,
  pub error_rate: String,
}

/// Distribution of observed response times, all rounded to 2 decimals.
/// Zero-valued when no entry carried a response time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponseTimeStats {
  pub count: u64,
  pub average: f64,
  pub min: f64,
  pub max: f64,
  pub median: f64,
}

/// Counts for entries sharing one calendar-date-and-hour timestamp prefix.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TrendBucket {
  pub total: u64,
  pub errors: u64,
  pub warnings: u64,
}

/// One shortlisted critical error. `timestamp` carries the "N/A" sentinel
/// when the source line had no parseable timestamp.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CriticalError {
  pub line: u64,
  pub message: String,
  pub timestamp: String,
}

// ---------------------------------------------------------------------------
// Report (JSON contract — what we emit)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
  pub total_lines: u64,
  /// Wall-clock stamp (RFC3339). The only non-deterministic report field;
  /// metadata, excluded from equality in tests.
  pub processed_at: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelBreakdown {
  pub errors: u64,
  pub warnings: u64,
  pub info: u64,
  pub debug: u64,
  /// Percentage with a trailing "%", e.g. "33.33%".
  pub error_rate: String,
}

/// The complete statistics report for one run. A pure function of the entry
/// sequence and the pattern table, apart from `summary.processed_at`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
  pub summary: Summary,
  pub levels: LevelBreakdown,
  pub response_time: ResponseTimeStats,
  pub trends: BTreeMap<String, TrendBucket>,
  pub critical_errors: Vec<CriticalError>,
  pub health_score: u8,
}
