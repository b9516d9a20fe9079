//! Report types serialized to results.json

use crate::metrics::TextStructure;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-document benchmark record.
///
/// All maps are keyed by adapter name. A failed adapter appears in
/// `times` with the `-1` sentinel and nowhere else; adapters skipped by
/// the alignment rules are simply absent from `alignments`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentReport {
    /// Base name of the benchmarked file
    pub file: String,

    /// Wall-clock extraction seconds, `-1` on failure
    pub times: BTreeMap<String, f64>,

    /// Similarity against the baseline, in `[0, 100]`
    pub alignments: BTreeMap<String, f64>,

    /// Single-character line ratio, in `[0, 1]`
    pub garbled_ratios: BTreeMap<String, f64>,

    /// Structural statistics of the joined document text
    pub structures: BTreeMap<String, TextStructure>,
}

impl DocumentReport {
    pub fn new(file: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            times: BTreeMap::new(),
            alignments: BTreeMap::new(),
            garbled_ratios: BTreeMap::new(),
            structures: BTreeMap::new(),
        }
    }
}

/// Aggregated run statistics for one adapter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolSummary {
    /// Mean extraction seconds over successful documents, `-1` when the
    /// adapter never succeeded
    pub avg_time: f64,

    /// Mean alignment against the baseline, absent for the baseline
    /// itself and for adapters that never produced comparable text
    pub avg_alignment: Option<f64>,

    /// Mean garbled ratio over successful documents
    pub avg_garbled_ratio: f64,
}

/// Top-level results.json document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkReport {
    /// Per-adapter aggregates, keyed by adapter name
    pub summary: BTreeMap<String, ToolSummary>,

    /// One record per benchmarked document, in processing order
    pub details: Vec<DocumentReport>,
}
