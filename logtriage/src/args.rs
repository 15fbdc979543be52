use std::path::PathBuf;

use clap::{ArgGroup, Parser, ValueEnum};

#[derive(Parser)]
#[command(name = "logtriage")]
#[command(about = "Aggregate health diagnostics for raw log files", long_about = None)]
#[command(version)]
#[command(group(ArgGroup::new("input").required(true).args(["file", "dir"])))]
pub struct Cli {
  /// Log file to analyze
  #[arg(short, long)]
  pub file: Option<PathBuf>,

  /// Directory of log files to analyze (*.log, *.txt)
  #[arg(short, long)]
  pub dir: Option<PathBuf>,

  /// Write the report here instead of stdout
  #[arg(short, long)]
  pub output: Option<PathBuf>,

  /// Report format
  #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
  pub format: ReportFormat,

  /// Pattern-table config file (JSON); built-in defaults when omitted
  #[arg(long)]
  pub config: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
  Text,
  Json,
  Html,
}
