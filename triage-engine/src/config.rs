//! Pattern table configuration: ordered severity markers + extraction regexes.

use regex::Regex;
use serde::Deserialize;

use crate::error::EngineError;
use crate::types::Level;

pub const DEFAULT_TIME_PATTERN: &str = r"\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2}";
pub const DEFAULT_RESPONSE_TIME_PATTERN: &str = r"(?i)response[_\s-]?time[:=]?\s*(\d+(?:\.\d+)?)";
pub const DEFAULT_MAX_FILE_SIZE: u64 = 50 * 1024 * 1024;

/// Raw config-file shape (camelCase JSON):
///
/// ```json
/// {
///   "logPatterns": { "error": ["ERROR"], "warning": ["WARN"] },
///   "timePattern": "\\d{4}-\\d{2}-\\d{2} \\d{2}:\\d{2}:\\d{2}",
///   "responseTimePattern": "responseTime[:=]\\s*(\\d+(?:\\.\\d+)?)",
///   "maxFileSize": 52428800
/// }
/// ```
///
/// `logPatterns` object order is preserved as declared and is a semantic
/// contract: severity detection is first-match-wins in that order.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawConfig {
  pub log_patterns: serde_json::Map<String, serde_json::Value>,
  pub time_pattern: String,
  pub response_time_pattern: String,
  #[serde(default = "default_max_file_size")]
  pub max_file_size: u64,
}

fn default_max_file_size() -> u64 {
  DEFAULT_MAX_FILE_SIZE
}

impl RawConfig {
  /// Validate and compile into a usable table.
  pub fn compile(&self) -> Result<PatternTable, EngineError> {
    let mut levels = Vec::with_capacity(self.log_patterns.len());
    for (name, value) in &self.log_patterns {
      let level = Level::from_str_loose(name).ok_or_else(|| {
        EngineError::pattern("logPatterns", format!("unknown level '{}'", name))
      })?;
      let markers = value
        .as_array()
        .ok_or_else(|| {
          EngineError::pattern(
            "logPatterns",
            format!("'{}' must map to an array of markers", name),
          )
        })?
        .iter()
        .map(|m| {
          m.as_str().map(str::to_string).ok_or_else(|| {
            EngineError::pattern("logPatterns", format!("'{}' markers must be strings", name))
          })
        })
        .collect::<Result<Vec<String>, EngineError>>()?;
      levels.push((level, markers));
    }

    let time_pattern =
      Regex::new(&self.time_pattern).map_err(|e| EngineError::pattern("timePattern", e))?;
    let response_time_pattern = Regex::new(&self.response_time_pattern)
      .map_err(|e| EngineError::pattern("responseTimePattern", e))?;
    // captures_len counts the implicit whole-match group 0.
    if response_time_pattern.captures_len() < 2 {
      return Err(EngineError::pattern(
        "responseTimePattern",
        "must contain one numeric capture group",
      ));
    }

    Ok(PatternTable {
      levels,
      time_pattern,
      response_time_pattern,
      max_file_size: self.max_file_size,
    })
  }
}

/// Read-only pattern table the classifier runs against.
///
/// `levels` is an explicit ordered list, never a map: earlier levels (and
/// earlier markers within a level) win ties, deterministically.
#[derive(Debug, Clone)]
pub struct PatternTable {
  pub levels: Vec<(Level, Vec<String>)>,
  pub time_pattern: Regex,
  /// Must carry exactly one numeric capture group.
  pub response_time_pattern: Regex,
  /// Upper bound for input files; enforced by the CLI validator, not here.
  pub max_file_size: u64,
}

impl PatternTable {
  /// Parse and compile a JSON config document.
  pub fn from_json(text: &str) -> Result<Self, EngineError> {
    let raw: RawConfig = serde_json::from_str(text)?;
    raw.compile()
  }
}

impl Default for PatternTable {
  fn default() -> Self {
    let markers = |m: &[&str]| m.iter().map(|s| s.to_string()).collect::<Vec<_>>();
    Self {
      levels: vec![
        (Level::Error, markers(&["ERROR", "FATAL", "CRITICAL"])),
        (Level::Warning, markers(&["WARN", "WARNING"])),
        (Level::Info, markers(&["INFO"])),
        (Level::Debug, markers(&["DEBUG", "TRACE"])),
      ],
      time_pattern: Regex::new(DEFAULT_TIME_PATTERN).expect("default time pattern is valid"),
      response_time_pattern: Regex::new(DEFAULT_RESPONSE_TIME_PATTERN)
        .expect("default response-time pattern is valid"),
      max_file_size: DEFAULT_MAX_FILE_SIZE,
    }
  }
}
