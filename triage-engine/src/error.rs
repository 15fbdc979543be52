//! Structured error types for the triage engine.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
  #[error("pattern: {field}: {reason}")]
  Pattern { field: String, reason: String },

  #[error("json: {0}")]
  Json(#[from] serde_json::Error),
}

impl EngineError {
  pub fn pattern(field: &str, reason: impl std::fmt::Display) -> Self {
    Self::Pattern {
      field: field.to_string(),
      reason: reason.to_string(),
    }
  }
}
