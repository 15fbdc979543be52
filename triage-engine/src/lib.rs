//! logtriage Classification & Statistics Engine — deterministic, rule-based.
//!
//! Classifies raw log lines into structured entries and aggregates them into
//! severity counts, response-time distribution, hourly trend buckets, a
//! bounded critical-error shortlist, and a composite 0-100 health score.
//!
//! No DB, no network; pure computation over an in-memory line sequence.

pub mod classify;
pub mod config;
pub mod engine;
pub mod error;
pub mod stats;
pub mod types;

pub use config::PatternTable;
pub use engine::Analyzer;
pub use error::EngineError;
pub use types::{Level, LogEntry, Report};
