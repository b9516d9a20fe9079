//! Benchmark runner for executing adapters and collecting results
//!
//! Runs every registered adapter over each document sequentially, feeding
//! per-document records and process-lifetime aggregates. One adapter
//! failing on one document is recorded and skipped over, never fatal.

use crate::adapter::ExtractorAdapter;
use crate::config::BenchmarkConfig;
use crate::metrics;
use crate::registry::AdapterRegistry;
use crate::types::{BenchmarkReport, DocumentReport, ToolSummary};
use crate::{Error, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

/// Adapter whose output is the alignment reference for all others
const BASELINE_ADAPTER: &str = "mupdf";

/// Sentinel recorded in place of a time when an adapter fails
const FAILED_TIME: f64 = -1.0;

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Process-lifetime accumulator across all benchmarked documents.
///
/// Adapter names are remembered in first-seen order so summary rows come
/// out in execution order regardless of map iteration order.
#[derive(Debug, Default)]
pub struct RunAggregate {
    order: Vec<String>,
    times: BTreeMap<String, Vec<f64>>,
    alignments: BTreeMap<String, Vec<f64>>,
    garbled: BTreeMap<String, Vec<f64>>,
    details: Vec<DocumentReport>,
}

impl RunAggregate {
    pub(crate) fn record_time(&mut self, tool: &str, seconds: f64) {
        if !self.times.contains_key(tool) {
            self.order.push(tool.to_string());
        }
        self.times.entry(tool.to_string()).or_default().push(seconds);
    }

    pub(crate) fn record_alignment(&mut self, tool: &str, score: f64) {
        self.alignments.entry(tool.to_string()).or_default().push(score);
    }

    pub(crate) fn record_garbled(&mut self, tool: &str, ratio: f64) {
        self.garbled.entry(tool.to_string()).or_default().push(ratio);
    }

    /// Adapter names in first-seen order
    pub fn tools(&self) -> &[String] {
        &self.order
    }

    /// Per-document records in processing order
    pub fn details(&self) -> &[DocumentReport] {
        &self.details
    }

    /// Mean extraction seconds over successful documents.
    ///
    /// Failure sentinels are excluded from the mean; an adapter that never
    /// succeeded reports the sentinel itself.
    pub fn avg_time(&self, tool: &str) -> f64 {
        let successful: Vec<f64> = self
            .times
            .get(tool)
            .map(|times| times.iter().copied().filter(|t| *t >= 0.0).collect())
            .unwrap_or_default();
        mean(&successful).unwrap_or(FAILED_TIME)
    }

    /// Mean alignment against the baseline, `None` when nothing was
    /// comparable (always the case for the baseline itself)
    pub fn avg_alignment(&self, tool: &str) -> Option<f64> {
        self.alignments.get(tool).and_then(|scores| mean(scores))
    }

    /// Mean garbled ratio over successful documents
    pub fn avg_garbled_ratio(&self, tool: &str) -> f64 {
        self.garbled
            .get(tool)
            .and_then(|ratios| mean(ratios))
            .unwrap_or(0.0)
    }

    /// Per-adapter aggregates, keyed by adapter name
    pub fn summary(&self) -> BTreeMap<String, ToolSummary> {
        self.tools()
            .iter()
            .map(|tool| {
                (
                    tool.clone(),
                    ToolSummary {
                        avg_time: self.avg_time(tool),
                        avg_alignment: self.avg_alignment(tool),
                        avg_garbled_ratio: self.avg_garbled_ratio(tool),
                    },
                )
            })
            .collect()
    }

    /// Assemble the serializable report
    pub fn to_report(&self) -> BenchmarkReport {
        BenchmarkReport {
            summary: self.summary(),
            details: self.details.to_vec(),
        }
    }
}

/// Orchestrates benchmark execution across documents and adapters
pub struct BenchmarkRunner {
    config: BenchmarkConfig,
    registry: AdapterRegistry,
    aggregate: RunAggregate,
}

impl BenchmarkRunner {
    /// Create a new benchmark runner
    pub fn new(config: BenchmarkConfig, registry: AdapterRegistry) -> Self {
        Self {
            config,
            registry,
            aggregate: RunAggregate::default(),
        }
    }

    pub fn config(&self) -> &BenchmarkConfig {
        &self.config
    }

    /// Everything accumulated so far
    pub fn aggregate(&self) -> &RunAggregate {
        &self.aggregate
    }

    /// Benchmark every adapter on a single document.
    ///
    /// Each adapter runs under wall-clock timing; failures record the
    /// time sentinel and an empty text. Afterwards every non-baseline
    /// text is aligned against the baseline, skipping pairs where either
    /// side came out empty.
    pub async fn benchmark_document(&mut self, path: &Path) -> DocumentReport {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let mut report = DocumentReport::new(file_name);

        let adapters: Vec<Arc<dyn ExtractorAdapter>> = self.registry.adapters().to_vec();
        let mut extracted: Vec<(String, String)> = Vec::with_capacity(adapters.len());

        for adapter in &adapters {
            let name = adapter.name().to_string();
            let start = Instant::now();
            match adapter.extract_pages(path).await {
                Ok(pages) => {
                    let elapsed = start.elapsed().as_secs_f64();
                    let full_text = pages.join("\n\n");
                    let garbled = metrics::garbled_ratio(&full_text);

                    report.times.insert(name.clone(), elapsed);
                    report.garbled_ratios.insert(name.clone(), garbled);
                    report
                        .structures
                        .insert(name.clone(), metrics::text_structure(&full_text));

                    self.aggregate.record_time(&name, elapsed);
                    self.aggregate.record_garbled(&name, garbled);

                    tracing::debug!(
                        adapter = %name,
                        file = %path.display(),
                        seconds = elapsed,
                        "extraction finished"
                    );
                    extracted.push((name, full_text));
                }
                Err(e) => {
                    eprintln!("Warning: {} failed on {}: {}", name, path.display(), e);
                    report.times.insert(name.clone(), FAILED_TIME);
                    self.aggregate.record_time(&name, FAILED_TIME);
                    extracted.push((name, String::new()));
                }
            }
        }

        let baseline = extracted
            .iter()
            .find(|(name, _)| name == BASELINE_ADAPTER)
            .map(|(_, text)| text.clone())
            .unwrap_or_default();

        for (name, text) in &extracted {
            if name != BASELINE_ADAPTER && !baseline.is_empty() && !text.is_empty() {
                let alignment = metrics::similarity(&baseline, text);
                report.alignments.insert(name.clone(), alignment);
                self.aggregate.record_alignment(name, alignment);
            }
        }

        self.aggregate.details.push(report.clone());
        report
    }

    /// Benchmark every PDF directly inside a directory.
    ///
    /// Discovery is non-recursive and sorted by path, so truncation via
    /// `max_files` is deterministic. Returns the number of documents
    /// processed.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Io`] when the directory cannot be read.
    pub async fn benchmark_directory(&mut self, dir: &Path) -> Result<usize> {
        let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)
            .map_err(Error::Io)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file()
                    && path
                        .extension()
                        .and_then(|e| e.to_str())
                        .is_some_and(|e| e.eq_ignore_ascii_case("pdf"))
            })
            .collect();
        paths.sort();

        if let Some(max) = self.config.max_files {
            paths.truncate(max);
        }

        let bar = ProgressBar::new(paths.len() as u64);
        bar.set_style(
            ProgressStyle::with_template("{msg} [{bar:40.cyan/dim}] {pos}/{len} ({eta})")
                .unwrap()
                .progress_chars("=> "),
        );
        bar.set_message("Benchmarking PDFs");

        for path in &paths {
            self.benchmark_document(path).await;
            bar.inc(1);
        }
        bar.finish();

        Ok(paths.len())
    }
}
