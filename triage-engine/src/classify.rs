//! Total per-line classifier: severity, timestamp, response time, message.

use crate::config::PatternTable;
use crate::types::{Level, LogEntry};

/// Classify one raw line into a structured entry.
///
/// Never fails and has no side effects: a field whose pattern does not match
/// is simply left unset. `line_number` is the caller's 1-based position.
pub fn classify(line: &str, line_number: u64, table: &PatternTable) -> LogEntry {
  let level = detect_level(line, table);

  let timestamp = table
    .time_pattern
    .find(line)
    .map(|m| m.as_str().to_string());

  // First capture group parsed as f64. Matched text f64 cannot parse counts
  // as "no match", not an error.
  let response_time = table
    .response_time_pattern
    .captures(line)
    .and_then(|c| c.get(1))
    .and_then(|m| m.as_str().parse::<f64>().ok());

  LogEntry {
    line_number,
    level,
    timestamp,
    message: line.trim().to_string(),
    response_time,
  }
}

/// First-match-wins scan: level order, then marker order within the level.
/// The table's declared order is the tie-break; specificity never is.
fn detect_level(line: &str, table: &PatternTable) -> Option<Level> {
  for (level, markers) in &table.levels {
    for marker in markers {
      if line.contains(marker.as_str()) {
        return Some(*level);
      }
    }
  }
  None
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parses_level_timestamp_and_response_time() {
    let table = PatternTable::default();
    let entry = classify(
      "2024-01-15 10:00:00 INFO User logged in responseTime: 45.2",
      1,
      &table,
    );
    assert_eq!(entry.level, Some(Level::Info));
    assert_eq!(entry.timestamp.as_deref(), Some("2024-01-15 10:00:00"));
    assert_eq!(entry.response_time, Some(45.2));
    assert_eq!(entry.line_number, 1);
  }

  #[test]
  fn detects_error_level() {
    let table = PatternTable::default();
    let entry = classify("2024-01-15 10:00:00 ERROR Something went wrong", 1, &table);
    assert_eq!(entry.level, Some(Level::Error));
  }

  #[test]
  fn empty_line_yields_entry_with_all_fields_unset() {
    let table = PatternTable::default();
    let entry = classify("", 7, &table);
    assert_eq!(entry.line_number, 7);
    assert_eq!(entry.level, None);
    assert_eq!(entry.timestamp, None);
    assert_eq!(entry.response_time, None);
    assert_eq!(entry.message, "");
  }

  #[test]
  fn message_is_trimmed_but_never_truncated() {
    let table = PatternTable::default();
    let entry = classify("   INFO padded message   ", 1, &table);
    assert_eq!(entry.message, "INFO padded message");
  }

  #[test]
  fn first_match_wins_across_levels() {
    let table = PatternTable::default();
    // Both ERROR and WARN markers present; error is declared first.
    let entry = classify("ERROR escalated from WARN state", 1, &table);
    assert_eq!(entry.level, Some(Level::Error));

    // Reordering the table flips the outcome — declared order is the contract.
    let reordered = PatternTable {
      levels: vec![
        (Level::Warning, vec!["WARN".to_string()]),
        (Level::Error, vec!["ERROR".to_string()]),
      ],
      ..PatternTable::default()
    };
    let entry = classify("ERROR escalated from WARN state", 1, &reordered);
    assert_eq!(entry.level, Some(Level::Warning));
  }

  #[test]
  fn unmatched_severity_stays_unset() {
    let table = PatternTable::default();
    let entry = classify("2024-01-15 10:00:00 NOTICE something odd", 1, &table);
    assert_eq!(entry.level, None);
    assert!(entry.timestamp.is_some());
  }

  #[test]
  fn malformed_capture_counts_as_no_match() {
    let table = PatternTable::from_json(
      r#"{
        "logPatterns": { "error": ["ERROR"] },
        "timePattern": "\\d{4}-\\d{2}-\\d{2}",
        "responseTimePattern": "rt=(\\w+)"
      }"#,
    )
    .unwrap();
    let entry = classify("ERROR rt=abc", 1, &table);
    assert_eq!(entry.response_time, None);
  }

  #[test]
  fn timestamp_is_the_verbatim_matched_span() {
    let table = PatternTable::default();
    let entry = classify("before 2024-02-29 23:59:59 after", 1, &table);
    assert_eq!(entry.timestamp.as_deref(), Some("2024-02-29 23:59:59"));
  }
}
