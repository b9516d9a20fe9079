//! PDF extraction benchmark CLI

use clap::Parser;
use pdfbench::{
    AdapterRegistry, BenchmarkConfig, BenchmarkRunner, LopdfAdapter, McpAdapter, MupdfAdapter,
    PdfExtractAdapter, Result, render_summary_table, write_json,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pdfbench")]
#[command(about = "Benchmark PDF text extraction libraries", long_about = None)]
struct Cli {
    /// PDF file or directory of PDFs to benchmark
    input: Option<PathBuf>,

    /// Output directory for results
    #[arg(short, long, default_value = "results")]
    output: PathBuf,

    /// Maximum number of PDFs to process from a directory
    #[arg(long)]
    max_files: Option<usize>,

    /// Path to the pdf-mcp server binary (auto-detected when omitted)
    #[arg(long)]
    mcp_server: Option<PathBuf>,

    /// MCP server timeout in seconds
    #[arg(short = 't', long, default_value_t = 60)]
    timeout: u64,

    /// Skip writing the HTML chart page
    #[arg(long)]
    no_plot: bool,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

fn dir_has_pdfs(dir: &Path) -> bool {
    std::fs::read_dir(dir)
        .map(|entries| {
            entries.filter_map(|entry| entry.ok()).any(|entry| {
                let path = entry.path();
                path.is_file()
                    && path
                        .extension()
                        .and_then(|e| e.to_str())
                        .is_some_and(|e| e.eq_ignore_ascii_case("pdf"))
            })
        })
        .unwrap_or(false)
}

/// Default input lookup when no path is given: a local `pdfs/` directory
/// with at least one PDF, falling back to the bundled reference document.
fn resolve_input(arg: Option<PathBuf>) -> Option<PathBuf> {
    if let Some(path) = arg {
        return Some(path);
    }

    let pdfs_dir = PathBuf::from("pdfs");
    if dir_has_pdfs(&pdfs_dir) {
        return Some(pdfs_dir);
    }

    let reference = PathBuf::from("fixtures/reference.pdf");
    if reference.is_file() {
        return Some(reference);
    }

    None
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let Some(input) = resolve_input(cli.input) else {
        eprintln!("Error: no input given and neither pdfs/ nor fixtures/reference.pdf exists");
        eprintln!("Usage: pdfbench <PDF file or directory>");
        std::process::exit(1);
    };

    if !input.exists() {
        eprintln!("Error: {} not found", input.display());
        std::process::exit(1);
    }

    let config = BenchmarkConfig {
        output_dir: cli.output,
        max_files: cli.max_files,
        mcp_timeout: Duration::from_secs(cli.timeout),
        mcp_server: cli.mcp_server,
    };
    config.validate()?;

    let mut registry = AdapterRegistry::new();

    registry.register(Arc::new(MupdfAdapter::new()))?;
    eprintln!("[adapter] ✓ mupdf (registered)");

    registry.register(Arc::new(PdfExtractAdapter::new()))?;
    eprintln!("[adapter] ✓ pdf-extract (registered)");

    registry.register(Arc::new(LopdfAdapter::new()))?;
    eprintln!("[adapter] ✓ lopdf (registered)");

    match McpAdapter::resolve(config.mcp_server.as_deref(), config.mcp_timeout) {
        Some(adapter) => {
            let server = adapter.server_path().to_path_buf();
            registry.register(Arc::new(adapter))?;
            eprintln!("[adapter] ✓ pdf-mcp (server: {})", server.display());
        }
        None => eprintln!("[adapter] ✗ pdf-mcp (no server binary found, skipping)"),
    }

    let mut runner = BenchmarkRunner::new(config, registry);

    if input.is_file() {
        println!("Benchmarking single PDF: {}", input.display());
        runner.benchmark_document(&input).await;
    } else if input.is_dir() {
        println!("Benchmarking directory: {}", input.display());
        let processed = runner.benchmark_directory(&input).await?;
        if processed == 0 {
            println!("No PDF files found in {}", input.display());
            return Ok(());
        }
    } else {
        eprintln!("Error: {} is neither a file nor a directory", input.display());
        std::process::exit(1);
    }

    println!("\n{}", "=".repeat(60));
    println!("BENCHMARK RESULTS");
    println!("{}", "=".repeat(60));
    println!("{}", render_summary_table(runner.aggregate()));
    println!("{}", "=".repeat(60));

    let results_path = runner.config().output_dir.join("results.json");
    write_json(&runner.aggregate().to_report(), &results_path)?;
    println!("\nDetailed results saved to: {}", results_path.display());

    if !cli.no_plot {
        #[cfg(feature = "html-report")]
        {
            let plot_path = runner.config().output_dir.join("benchmark_plot.html");
            pdfbench::write_html(runner.aggregate(), &plot_path)?;
            println!("Saved visualization to {}", plot_path.display());
        }
        #[cfg(not(feature = "html-report"))]
        eprintln!("Warning: built without the html-report feature, skipping plot");
    }

    Ok(())
}
