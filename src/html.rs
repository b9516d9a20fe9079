//! HTML visualization output for benchmark results
//!
//! Renders a single self-contained HTML page with three embedded Chart.js
//! bar charts (extraction time, alignment against the baseline, garbled
//! ratio). Viewable in any browser without external dependencies except
//! the Chart.js CDN.

use crate::runner::RunAggregate;
use crate::{Error, Result};
use minijinja::{AutoEscape, Environment, context};
use serde::Serialize;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

/// Chart data aggregated for visualization
#[derive(Debug, Clone, Serialize)]
struct ChartData {
    /// Adapter names, in execution order
    tools: Vec<String>,
    /// Mean extraction seconds per adapter, zero for adapters that never
    /// succeeded
    times: Vec<f64>,
    /// Adapters with at least one alignment score (never the baseline)
    align_tools: Vec<String>,
    /// Mean alignment per entry of `align_tools`
    alignments: Vec<f64>,
    /// Mean garbled ratio per adapter, as a percentage
    garbled_percent: Vec<f64>,
    /// HTML generation timestamp
    generated_at: String,
}

/// Static template environment (initialized once)
static TEMPLATE_ENV: OnceLock<Environment<'static>> = OnceLock::new();

fn init_template_env() -> Environment<'static> {
    let mut env = Environment::new();
    env.add_template(
        "report.html.jinja",
        include_str!("../templates/report.html.jinja"),
    )
    .expect("Failed to add report template");

    // Enable auto-escaping for HTML templates; tojson output stays safe.
    env.set_auto_escape_callback(|name| {
        if name.ends_with(".html.jinja") {
            AutoEscape::Html
        } else {
            AutoEscape::None
        }
    });

    env
}

fn get_template_env() -> &'static Environment<'static> {
    TEMPLATE_ENV.get_or_init(init_template_env)
}

fn build_chart_data(aggregate: &RunAggregate) -> ChartData {
    let tools: Vec<String> = aggregate.tools().to_vec();

    let times: Vec<f64> = tools
        .iter()
        .map(|tool| aggregate.avg_time(tool).max(0.0))
        .collect();

    let mut align_tools = Vec::new();
    let mut alignments = Vec::new();
    for tool in &tools {
        if let Some(score) = aggregate.avg_alignment(tool) {
            align_tools.push(tool.clone());
            alignments.push(score);
        }
    }

    let garbled_percent: Vec<f64> = tools
        .iter()
        .map(|tool| aggregate.avg_garbled_ratio(tool) * 100.0)
        .collect();

    ChartData {
        tools,
        times,
        align_tools,
        alignments,
        garbled_percent,
        generated_at: chrono::Utc::now().to_rfc3339(),
    }
}

/// Write the benchmark chart page.
///
/// Missing parent directories are created.
///
/// # Errors
///
/// Returns [`crate::Error::Io`] on filesystem failures and
/// [`crate::Error::Benchmark`] if the template fails to render
pub fn write_html(aggregate: &RunAggregate, output_path: &Path) -> Result<()> {
    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent).map_err(Error::Io)?;
    }

    let data = build_chart_data(aggregate);
    let html = get_template_env()
        .get_template("report.html.jinja")
        .map_err(|e| Error::Benchmark(format!("Template not found: {}", e)))?
        .render(context! { data => data })
        .map_err(|e| Error::Benchmark(format!("Template render failed: {}", e)))?;

    fs::write(output_path, html).map_err(Error::Io)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_aggregate() -> RunAggregate {
        let mut aggregate = RunAggregate::default();
        aggregate.record_time("mupdf", 0.2);
        aggregate.record_garbled("mupdf", 0.0);
        aggregate.record_time("pdf-extract", 0.4);
        aggregate.record_alignment("pdf-extract", 92.5);
        aggregate.record_garbled("pdf-extract", 0.1);
        aggregate.record_time("lopdf", -1.0);
        aggregate
    }

    #[test]
    fn test_build_chart_data() {
        let data = build_chart_data(&sample_aggregate());

        assert_eq!(data.tools, vec!["mupdf", "pdf-extract", "lopdf"]);
        // Failed adapters chart as zero rather than the sentinel.
        assert_eq!(data.times[2], 0.0);
        assert_eq!(data.align_tools, vec!["pdf-extract"]);
        assert!((data.alignments[0] - 92.5).abs() < 1e-9);
        assert!((data.garbled_percent[1] - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_write_html() {
        let temp_dir = TempDir::new().unwrap();
        let output_path = temp_dir.path().join("charts/benchmark_plot.html");

        write_html(&sample_aggregate(), &output_path).unwrap();

        let html = fs::read_to_string(&output_path).unwrap();
        assert!(html.contains("<canvas id=\"time-chart\">"));
        assert!(html.contains("<canvas id=\"alignment-chart\">"));
        assert!(html.contains("<canvas id=\"garbled-chart\">"));
        assert!(html.contains("pdf-extract"));
        assert!(html.contains("chart.js"));
    }
}
