//! Aggregate statistics over a classified entry sequence.
//!
//! Five independent sub-computations, each a pure function of the full entry
//! slice: severity counts, response-time distribution, hourly trends, the
//! critical-error shortlist, and the health score. `engine` composes them.

use std::collections::BTreeMap;

use crate::types::{
  CriticalError, Level, LogEntry, ResponseTimeStats, SeverityStats, TrendBucket,
};

/// Critical-error shortlist cap (fixed contract, not configurable).
pub const MAX_CRITICAL_ERRORS: usize = 10;
/// Critical-error message truncation, in chars (fixed contract).
pub const CRITICAL_MESSAGE_CHARS: usize = 200;
/// An error entry whose lowercased message contains one of these is critical.
pub const CRITICAL_KEYWORDS: [&str; 6] =
  ["fatal", "critical", "exception", "crash", "failed", "timeout"];

/// Chars of timestamp kept as the hourly trend key ("YYYY-MM-DD HH").
/// Width is coupled to the default timestamp shape; revisit if that changes.
pub const TREND_KEY_CHARS: usize = 13;

fn round2(v: f64) -> f64 {
  (v * 100.0).round() / 100.0
}

/// Count entries per level. `error_rate` is `errors/total*100` formatted to
/// 2 decimals, or "0.00" for an empty run (never divides by zero).
pub fn severity_stats(entries: &[LogEntry]) -> SeverityStats {
  let count = |level: Level| entries.iter().filter(|e| e.level == Some(level)).count() as u64;
  let total = entries.len() as u64;
  let errors = count(Level::Error);

  let error_rate = if total > 0 {
    format!("{:.2}", errors as f64 / total as f64 * 100.0)
  } else {
    "0.00".to_string()
  };

  SeverityStats {
    total,
    errors,
    warnings: count(Level::Warning),
    info: count(Level::Info),
    debug: count(Level::Debug),
    error_rate,
  }
}

/// Distribution of present response times: count, average, min, max, median,
/// all rounded to 2 decimals. All-zero record when nothing was observed.
pub fn response_time_stats(entries: &[LogEntry]) -> ResponseTimeStats {
  let mut values: Vec<f64> = entries.iter().filter_map(|e| e.response_time).collect();
  if values.is_empty() {
    return ResponseTimeStats {
      count: 0,
      average: 0.0,
      min: 0.0,
      max: 0.0,
      median: 0.0,
    };
  }

  values.sort_by(|a, b| a.total_cmp(b));
  let n = values.len();
  let sum: f64 = values.iter().sum();
  let median = if n % 2 == 0 {
    (values[n / 2 - 1] + values[n / 2]) / 2.0
  } else {
    values[n / 2]
  };

  ResponseTimeStats {
    count: n as u64,
    average: round2(sum / n as f64),
    min: round2(values[0]),
    max: round2(values[n - 1]),
    median: round2(median),
  }
}

/// Bucket entries by the hour-granularity timestamp prefix. Entries without
/// a timestamp are silently excluded.
pub fn time_trends(entries: &[LogEntry]) -> BTreeMap<String, TrendBucket> {
  let mut buckets: BTreeMap<String, TrendBucket> = BTreeMap::new();
  for entry in entries {
    let Some(ts) = &entry.timestamp else { continue };
    let key: String = ts.chars().take(TREND_KEY_CHARS).collect();
    let bucket = buckets.entry(key).or_default();
    bucket.total += 1;
    match entry.level {
      Some(Level::Error) => bucket.errors += 1,
      Some(Level::Warning) => bucket.warnings += 1,
      _ => {}
    }
  }
  buckets
}

/// Shortlist error entries whose message carries a crash/failure keyword:
/// first `MAX_CRITICAL_ERRORS` in original line order, messages truncated to
/// `CRITICAL_MESSAGE_CHARS`.
pub fn critical_errors(entries: &[LogEntry]) -> Vec<CriticalError> {
  entries
    .iter()
    .filter(|e| {
      if e.level != Some(Level::Error) {
        return false;
      }
      let message = e.message.to_lowercase();
      CRITICAL_KEYWORDS.iter().any(|k| message.contains(k))
    })
    .take(MAX_CRITICAL_ERRORS)
    .map(|e| CriticalError {
      line: e.line_number,
      message: e.message.chars().take(CRITICAL_MESSAGE_CHARS).collect(),
      timestamp: e.timestamp.clone().unwrap_or_else(|| "N/A".to_string()),
    })
    .collect()
}

/// Composite health 0-100: start at 100, apply four independent additive
/// penalties, round, clamp.
pub fn health_score(severity: &SeverityStats, response_time: &ResponseTimeStats) -> u8 {
  let mut score = 100.0;

  // Each 1% of errors costs 2 points. The rate is re-parsed from the rounded
  // string so the score and the report consume the same 2-decimal value.
  let error_rate: f64 = severity.error_rate.parse().unwrap_or(0.0);
  score -= error_rate * 2.0;

  // Slow and very slow thresholds stack: average > 5000ms costs 30 total.
  if response_time.average > 1000.0 {
    score -= 10.0;
  }
  if response_time.average > 5000.0 {
    score -= 20.0;
  }

  // High raw error volume is penalized independently of the rate.
  if severity.errors > 50 {
    score -= 15.0;
  }

  score.round().clamp(0.0, 100.0) as u8
}

#[cfg(test)]
mod tests {
  use super::*;

  fn entry(
    line_number: u64,
    level: Option<Level>,
    message: &str,
    timestamp: Option<&str>,
    response_time: Option<f64>,
  ) -> LogEntry {
    LogEntry {
      line_number,
      level,
      timestamp: timestamp.map(str::to_string),
      message: message.to_string(),
      response_time,
    }
  }

  #[test]
  fn severity_counts_and_rate() {
    let entries = vec![
      entry(1, Some(Level::Error), "Error 1", None, None),
      entry(2, Some(Level::Error), "Error 2", None, None),
      entry(3, Some(Level::Warning), "Warning 1", None, None),
      entry(4, Some(Level::Info), "Info 1", None, None),
    ];
    let stats = severity_stats(&entries);
    assert_eq!(stats.total, 4);
    assert_eq!(stats.errors, 2);
    assert_eq!(stats.warnings, 1);
    assert_eq!(stats.info, 1);
    assert_eq!(stats.debug, 0);
    assert_eq!(stats.error_rate, "50.00");
  }

  #[test]
  fn severity_empty_run_has_zero_rate() {
    let stats = severity_stats(&[]);
    assert_eq!(stats.total, 0);
    assert_eq!(stats.error_rate, "0.00");
  }

  #[test]
  fn unmatched_level_counts_toward_total_only() {
    let entries = vec![
      entry(1, None, "no marker here", None, None),
      entry(2, Some(Level::Info), "INFO ok", None, None),
    ];
    let stats = severity_stats(&entries);
    assert_eq!(stats.total, 2);
    assert_eq!(stats.errors + stats.warnings + stats.info + stats.debug, 1);
  }

  #[test]
  fn response_time_odd_count_median_is_middle() {
    let entries: Vec<LogEntry> = [10.0, 20.0, 30.0, 40.0, 50.0]
      .iter()
      .enumerate()
      .map(|(i, &rt)| entry(i as u64 + 1, None, "", None, Some(rt)))
      .collect();
    let stats = response_time_stats(&entries);
    assert_eq!(stats.count, 5);
    assert_eq!(stats.average, 30.0);
    assert_eq!(stats.min, 10.0);
    assert_eq!(stats.max, 50.0);
    assert_eq!(stats.median, 30.0);
  }

  #[test]
  fn response_time_even_count_median_averages_central_pair() {
    let entries: Vec<LogEntry> = [40.0, 10.0, 30.0, 20.0]
      .iter()
      .enumerate()
      .map(|(i, &rt)| entry(i as u64 + 1, None, "", None, Some(rt)))
      .collect();
    let stats = response_time_stats(&entries);
    assert_eq!(stats.median, 25.0);
  }

  #[test]
  fn response_time_empty_filtered_set_is_zeroed() {
    let entries = vec![entry(1, Some(Level::Info), "no timing", None, None)];
    let stats = response_time_stats(&entries);
    assert_eq!(
      stats,
      ResponseTimeStats {
        count: 0,
        average: 0.0,
        min: 0.0,
        max: 0.0,
        median: 0.0
      }
    );
  }

  #[test]
  fn response_time_rounds_to_two_decimals() {
    let entries: Vec<LogEntry> = [0.333, 0.333, 0.336]
      .iter()
      .enumerate()
      .map(|(i, &rt)| entry(i as u64 + 1, None, "", None, Some(rt)))
      .collect();
    let stats = response_time_stats(&entries);
    assert_eq!(stats.average, 0.33);
    assert_eq!(stats.min, 0.33);
    assert_eq!(stats.max, 0.34);
  }

  #[test]
  fn trends_bucket_by_hour_prefix() {
    let entries = vec![
      entry(1, Some(Level::Error), "e", Some("2024-01-15 10:00:00"), None),
      entry(2, Some(Level::Warning), "w", Some("2024-01-15 10:30:00"), None),
      entry(3, Some(Level::Info), "i", Some("2024-01-15 11:00:00"), None),
      entry(4, None, "no timestamp", None, None),
    ];
    let trends = time_trends(&entries);
    assert_eq!(trends.len(), 2);
    let ten = &trends["2024-01-15 10"];
    assert_eq!(ten.total, 2);
    assert_eq!(ten.errors, 1);
    assert_eq!(ten.warnings, 1);
    let eleven = &trends["2024-01-15 11"];
    assert_eq!(eleven.total, 1);
    assert_eq!(eleven.errors, 0);
  }

  #[test]
  fn critical_errors_filter_on_level_and_keyword() {
    let entries = vec![
      entry(
        1,
        Some(Level::Error),
        "Fatal error occurred",
        Some("2024-01-15 10:00:00"),
        None,
      ),
      entry(2, Some(Level::Error), "System crash detected", None, None),
      entry(3, Some(Level::Info), "fatal mentioned but info level", None, None),
      entry(4, Some(Level::Error), "plain error, no keyword", None, None),
    ];
    let critical = critical_errors(&entries);
    assert_eq!(critical.len(), 2);
    assert_eq!(critical[0].line, 1);
    assert_eq!(critical[0].timestamp, "2024-01-15 10:00:00");
    assert_eq!(critical[1].timestamp, "N/A");
  }

  #[test]
  fn critical_errors_are_capped_at_ten() {
    let entries: Vec<LogEntry> = (1..=15)
      .map(|i| entry(i, Some(Level::Error), "request timeout", None, None))
      .collect();
    let critical = critical_errors(&entries);
    assert_eq!(critical.len(), MAX_CRITICAL_ERRORS);
    // First N in original line order.
    assert_eq!(critical[0].line, 1);
    assert_eq!(critical[9].line, 10);
  }

  #[test]
  fn critical_messages_are_truncated_to_200_chars() {
    let long = format!("fatal: {}", "x".repeat(500));
    let entries = vec![entry(1, Some(Level::Error), &long, None, None)];
    let critical = critical_errors(&entries);
    assert_eq!(critical[0].message.chars().count(), CRITICAL_MESSAGE_CHARS);
  }

  fn severity(errors: u64, total: u64) -> SeverityStats {
    let error_rate = if total > 0 {
      format!("{:.2}", errors as f64 / total as f64 * 100.0)
    } else {
      "0.00".to_string()
    };
    SeverityStats {
      total,
      errors,
      warnings: 0,
      info: 0,
      debug: 0,
      error_rate,
    }
  }

  fn timings(average: f64) -> ResponseTimeStats {
    ResponseTimeStats {
      count: 1,
      average,
      min: average,
      max: average,
      median: average,
    }
  }

  #[test]
  fn clean_run_scores_100() {
    assert_eq!(health_score(&severity(0, 100), &timings(100.0)), 100);
  }

  #[test]
  fn error_rate_costs_two_points_per_percent() {
    assert_eq!(health_score(&severity(5, 100), &timings(100.0)), 90);
  }

  #[test]
  fn slow_responses_cost_ten_points() {
    assert_eq!(health_score(&severity(0, 100), &timings(1500.0)), 90);
  }

  #[test]
  fn very_slow_responses_cost_thirty_points_total() {
    assert_eq!(health_score(&severity(0, 100), &timings(6000.0)), 70);
  }

  #[test]
  fn high_error_volume_costs_fifteen_points() {
    // 51 errors out of 10200 lines: rate 0.50 -> -1, volume -> -15.
    assert_eq!(health_score(&severity(51, 10200), &timings(100.0)), 84);
  }

  #[test]
  fn extreme_input_clamps_to_zero() {
    // 100% errors, very slow, high volume: 100 - 200 - 30 - 15 < 0.
    assert_eq!(health_score(&severity(10000, 10000), &timings(100000.0)), 0);
  }
}
