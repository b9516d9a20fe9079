//! Extraction backend adapters
//!
//! One module per backend. The three in-process backends (MuPDF,
//! pdf-extract, lopdf) link their libraries directly; the MCP adapter
//! drives an external server over stdio.

pub mod lopdf;
pub mod mcp;
pub mod mupdf;
pub mod pdf_extract;

pub use self::lopdf::LopdfAdapter;
pub use self::mcp::McpAdapter;
pub use self::mupdf::MupdfAdapter;
pub use self::pdf_extract::PdfExtractAdapter;
