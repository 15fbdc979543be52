//! Report renderers: colored text, JSON, and a standalone HTML page.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use triage_engine::Report;

const RULE: &str = "============================================================";

/// Trend buckets shown in the text report (the JSON report carries them all).
const TEXT_TREND_ROWS: usize = 5;

fn styled(text: &str, color: bool, paint: impl Fn(&str) -> String) -> String {
  if color {
    paint(text)
  } else {
    text.to_string()
  }
}

/// Plain-text report, optionally ANSI-colored for terminals.
pub fn text_report(report: &Report, source: &str, color: bool) -> String {
  let mut out: Vec<String> = Vec::new();
  let header = |s: &str| styled(s, color, |t| t.yellow().bold().to_string());

  out.push(styled(RULE, color, |t| t.cyan().bold().to_string()));
  out.push(styled("Log Analysis Report", color, |t| {
    t.cyan().bold().to_string()
  }));
  out.push(styled(RULE, color, |t| t.cyan().bold().to_string()));
  out.push(format!("File: {}", source));
  out.push(format!("Generated: {}", report.summary.processed_at));

  out.push(String::new());
  out.push(header("Summary"));
  out.push(format!("  Total lines: {}", report.summary.total_lines));
  out.push(format!(
    "  Health score: {}",
    health_score_label(report.health_score, color)
  ));

  out.push(String::new());
  out.push(header("Levels"));
  out.push(format!(
    "  {} {}",
    styled("Errors:", color, |t| t.red().to_string()),
    report.levels.errors
  ));
  out.push(format!(
    "  {} {}",
    styled("Warnings:", color, |t| t.yellow().to_string()),
    report.levels.warnings
  ));
  out.push(format!(
    "  {} {}",
    styled("Info:", color, |t| t.blue().to_string()),
    report.levels.info
  ));
  out.push(format!("  Debug: {}", report.levels.debug));
  out.push(format!("  Error rate: {}", report.levels.error_rate));

  if report.response_time.count > 0 {
    out.push(String::new());
    out.push(header("Response times (ms)"));
    out.push(format!("  Average: {}ms", report.response_time.average));
    out.push(format!("  Min: {}ms", report.response_time.min));
    out.push(format!("  Max: {}ms", report.response_time.max));
    out.push(format!("  Median: {}ms", report.response_time.median));
  }

  if !report.critical_errors.is_empty() {
    out.push(String::new());
    out.push(styled("Critical errors", color, |t| t.red().bold().to_string()));
    for (i, critical) in report.critical_errors.iter().enumerate() {
      let preview: String = critical.message.chars().take(80).collect();
      out.push(format!("  {}. line {}: {}", i + 1, critical.line, preview));
    }
  }

  if !report.trends.is_empty() {
    out.push(String::new());
    out.push(header("Hourly trends"));
    for (hour, bucket) in report.trends.iter().take(TEXT_TREND_ROWS) {
      out.push(format!(
        "  {}: {} lines ({} errors, {} warnings)",
        hour, bucket.total, bucket.errors, bucket.warnings
      ));
    }
  }

  out.push(styled(RULE, color, |t| t.cyan().bold().to_string()));
  out.join("\n")
}

fn health_score_label(score: u8, color: bool) -> String {
  let text = format!("{}/100", score);
  if !color {
    return text;
  }
  if score >= 80 {
    text.green().to_string()
  } else if score >= 60 {
    text.yellow().to_string()
  } else {
    text.red().to_string()
  }
}

/// Pretty-printed JSON report (the full statistics contract).
pub fn json_report(report: &Report) -> Result<String> {
  serde_json::to_string_pretty(report).context("serialize report")
}

/// Cross-file summary emitted after directory runs in JSON format.
pub fn directory_summary(results: &[(String, Report)]) -> Result<String> {
  let files: Vec<serde_json::Value> = results
    .iter()
    .map(|(file, report)| {
      serde_json::json!({
        "file": file,
        "totalLines": report.summary.total_lines,
        "errors": report.levels.errors,
        "healthScore": report.health_score,
      })
    })
    .collect();
  serde_json::to_string_pretty(&serde_json::json!({
    "totalFiles": results.len(),
    "files": files,
  }))
  .context("serialize directory summary")
}

/// Standalone HTML page with summary cards and detail tables.
pub fn html_report(report: &Report, source: &str) -> String {
  let health_color = if report.health_score >= 80 {
    "green"
  } else if report.health_score >= 60 {
    "orange"
  } else {
    "red"
  };

  let mut sections = String::new();

  if report.response_time.count > 0 {
    let _ = write!(
      sections,
      r#"
        <h2>Response times (ms)</h2>
        <table>
            <tr><th>Average</th><th>Min</th><th>Max</th><th>Median</th></tr>
            <tr><td>{avg}</td><td>{min}</td><td>{max}</td><td>{median}</td></tr>
        </table>"#,
      avg = report.response_time.average,
      min = report.response_time.min,
      max = report.response_time.max,
      median = report.response_time.median,
    );
  }

  if !report.critical_errors.is_empty() {
    let rows: String = report
      .critical_errors
      .iter()
      .map(|c| {
        format!(
          "            <tr class=\"critical\"><td>{}</td><td>{}</td><td>{}</td></tr>\n",
          c.line,
          escape_html(&c.message),
          escape_html(&c.timestamp)
        )
      })
      .collect();
    let _ = write!(
      sections,
      r#"
        <h2>Critical errors</h2>
        <table>
            <tr><th>Line</th><th>Message</th><th>Time</th></tr>
{rows}        </table>"#,
    );
  }

  if !report.trends.is_empty() {
    let rows: String = report
      .trends
      .iter()
      .map(|(hour, bucket)| {
        format!(
          "            <tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
          escape_html(hour),
          bucket.total,
          bucket.errors,
          bucket.warnings
        )
      })
      .collect();
    let _ = write!(
      sections,
      r#"
        <h2>Hourly trends</h2>
        <table>
            <tr><th>Hour</th><th>Lines</th><th>Errors</th><th>Warnings</th></tr>
{rows}        </table>"#,
    );
  }

  format!(
    r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Log Analysis Report</title>
    <style>
        body {{ font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif; margin: 20px; background: #f5f5f5; }}
        .container {{ max-width: 1200px; margin: 0 auto; background: white; padding: 30px; border-radius: 10px; box-shadow: 0 2px 10px rgba(0,0,0,0.1); }}
        h1 {{ color: #333; border-bottom: 3px solid #4CAF50; padding-bottom: 10px; }}
        .summary {{ display: grid; grid-template-columns: repeat(auto-fit, minmax(200px, 1fr)); gap: 20px; margin: 20px 0; }}
        .card {{ background: #f9f9f9; padding: 15px; border-radius: 5px; border-left: 4px solid #4CAF50; }}
        .card.error {{ border-left-color: #f44336; }}
        .card.warning {{ border-left-color: #ff9800; }}
        .health-score {{ font-size: 2em; color: {health_color}; font-weight: bold; }}
        table {{ width: 100%; border-collapse: collapse; margin: 20px 0; }}
        th, td {{ padding: 12px; text-align: left; border-bottom: 1px solid #ddd; }}
        th {{ background-color: #4CAF50; color: white; }}
        .critical {{ background-color: #ffebee; }}
    </style>
</head>
<body>
    <div class="container">
        <h1>Log Analysis Report</h1>
        <p><strong>File:</strong> {source}</p>
        <p><strong>Generated:</strong> {generated}</p>

        <div class="summary">
            <div class="card">
                <h3>Total lines</h3>
                <p style="font-size: 2em;">{total_lines}</p>
            </div>
            <div class="card error">
                <h3>Errors</h3>
                <p style="font-size: 2em;">{errors}</p>
            </div>
            <div class="card warning">
                <h3>Warnings</h3>
                <p style="font-size: 2em;">{warnings}</p>
            </div>
            <div class="card">
                <h3>Health score</h3>
                <p class="health-score">{health_score}/100</p>
            </div>
        </div>

        <h2>Level breakdown</h2>
        <table>
            <tr><th>Level</th><th>Count</th></tr>
            <tr><td>Errors ({error_rate})</td><td>{errors}</td></tr>
            <tr><td>Warnings</td><td>{warnings}</td></tr>
            <tr><td>Info</td><td>{info}</td></tr>
            <tr><td>Debug</td><td>{debug}</td></tr>
        </table>
{sections}
    </div>
</body>
</html>"#,
    source = escape_html(source),
    generated = report.summary.processed_at,
    total_lines = report.summary.total_lines,
    errors = report.levels.errors,
    warnings = report.levels.warnings,
    info = report.levels.info,
    debug = report.levels.debug,
    error_rate = report.levels.error_rate,
    health_score = report.health_score,
  )
}

fn escape_html(s: &str) -> String {
  s.replace('&', "&amp;")
    .replace('<', "&lt;")
    .replace('>', "&gt;")
    .replace('"', "&quot;")
}

/// Write a rendered report, creating parent directories as needed.
pub fn save_report(rendered: &str, path: &Path) -> Result<()> {
  if let Some(parent) = path.parent() {
    if !parent.as_os_str().is_empty() {
      fs::create_dir_all(parent)
        .with_context(|| format!("cannot create {}", parent.display()))?;
    }
  }
  fs::write(path, rendered).with_context(|| format!("cannot write {}", path.display()))
}
