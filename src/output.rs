//! Output writers for benchmark results
//!
//! Persists the report as pretty-printed JSON and renders the console
//! summary table.

use crate::runner::RunAggregate;
use crate::types::BenchmarkReport;
use crate::{Error, Result};
use std::fs;
use std::path::Path;

/// Write the benchmark report to a JSON file
///
/// Missing parent directories are created.
///
/// # Errors
///
/// Returns [`crate::Error::Io`] on filesystem failures and
/// [`crate::Error::Json`] if the report cannot be serialized
pub fn write_json(report: &BenchmarkReport, output_path: &Path) -> Result<()> {
    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent).map_err(Error::Io)?;
    }

    let json = serde_json::to_string_pretty(report)?;
    fs::write(output_path, json).map_err(Error::Io)?;

    Ok(())
}

/// Render the per-adapter summary as a github-style table.
///
/// One row per adapter in execution order: mean time (`failed` when the
/// adapter never succeeded), mean alignment (`--` when nothing was
/// comparable), mean garbled ratio.
pub fn render_summary_table(aggregate: &RunAggregate) -> String {
    let headers = ["Library", "Time (s/page)", "Alignment (%)", "Garbled Ratio"];

    let mut rows: Vec<[String; 4]> = Vec::new();
    for tool in aggregate.tools() {
        let avg_time = aggregate.avg_time(tool);
        let time_cell = if avg_time >= 0.0 {
            format!("{:.3}", avg_time)
        } else {
            "failed".to_string()
        };
        let align_cell = match aggregate.avg_alignment(tool) {
            Some(score) => format!("{:.2}", score),
            None => "--".to_string(),
        };
        let garbled_cell = format!("{:.3}", aggregate.avg_garbled_ratio(tool));
        rows.push([tool.clone(), time_cell, align_cell, garbled_cell]);
    }

    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in &rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.len());
        }
    }

    let mut out = String::new();
    out.push('|');
    for (header, &width) in headers.iter().zip(&widths) {
        out.push_str(&format!(" {:<width$} |", header));
    }
    out.push('\n');
    out.push('|');
    for &width in &widths {
        out.push_str(&format!("{}|", "-".repeat(width + 2)));
    }
    out.push('\n');
    for row in &rows {
        out.push('|');
        for (cell, &width) in row.iter().zip(&widths) {
            out.push_str(&format!(" {:<width$} |", cell));
        }
        out.push('\n');
    }
    out.pop();
    out
}
