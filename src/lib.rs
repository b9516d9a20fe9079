//! Benchmark harness for comparing PDF text extraction libraries
//!
//! This crate benchmarks several Rust PDF extraction backends against each
//! other on real documents, measuring speed and text quality (alignment with
//! a baseline, garbled-output detection, structural statistics). Backends
//! implement [`ExtractorAdapter`] and register with an [`AdapterRegistry`];
//! the [`BenchmarkRunner`] drives them over single files or directories.

pub mod adapter;
pub mod adapters;
pub mod config;
pub mod error;
#[cfg(feature = "html-report")]
pub mod html;
pub mod metrics;
pub mod output;
pub mod registry;
pub mod runner;
pub mod types;

pub use adapter::ExtractorAdapter;
pub use adapters::{LopdfAdapter, McpAdapter, MupdfAdapter, PdfExtractAdapter};
pub use config::BenchmarkConfig;
pub use error::{Error, Result};
#[cfg(feature = "html-report")]
pub use html::write_html;
pub use metrics::{TextStructure, garbled_ratio, similarity, text_structure};
pub use output::{render_summary_table, write_json};
pub use registry::AdapterRegistry;
pub use runner::{BenchmarkRunner, RunAggregate};
pub use types::{BenchmarkReport, DocumentReport, ToolSummary};
