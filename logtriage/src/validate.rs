//! Pre-flight checks for log files and directories.
//!
//! The engine never touches the filesystem; every failure mode that involves
//! paths, sizes, or encodings is surfaced here before it runs.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};

/// Validate a candidate log file: exists, is a regular file, non-empty, and
/// within the configured size guard. Returns the canonical path.
pub fn validate_log_file(path: &Path, max_size: u64) -> Result<PathBuf> {
  let meta =
    fs::metadata(path).with_context(|| format!("file not found: {}", path.display()))?;
  if !meta.is_file() {
    bail!("not a regular file: {}", path.display());
  }
  if meta.len() == 0 {
    bail!("file is empty: {}", path.display());
  }
  if meta.len() > max_size {
    bail!(
      "file too large: {:.2}MB (maximum {:.2}MB): {}",
      meta.len() as f64 / 1024.0 / 1024.0,
      max_size as f64 / 1024.0 / 1024.0,
      path.display()
    );
  }
  fs::canonicalize(path).with_context(|| format!("cannot resolve {}", path.display()))
}

/// Read a validated file, rejecting non-UTF-8 content with a clear message.
pub fn read_utf8(path: &Path) -> Result<String> {
  let bytes = fs::read(path).with_context(|| format!("cannot read {}", path.display()))?;
  String::from_utf8(bytes)
    .map_err(|_| anyhow!("unsupported encoding (expected UTF-8): {}", path.display()))
}

/// Validate a directory path: exists and is a directory. Returns the
/// canonical path.
pub fn validate_directory(path: &Path) -> Result<PathBuf> {
  let meta =
    fs::metadata(path).with_context(|| format!("directory not found: {}", path.display()))?;
  if !meta.is_dir() {
    bail!("not a directory: {}", path.display());
  }
  fs::canonicalize(path).with_context(|| format!("cannot resolve {}", path.display()))
}
