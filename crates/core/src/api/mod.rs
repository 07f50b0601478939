//! High-level API module for text unit extraction.
//!
//! This module provides the main public API: one page at a time through
//! [`extract_page`], or a whole document through [`DocumentExtractor`].
//!
//! # Example
//!
//! ```ignore
//! use glyphflow_core::api::{DocumentExtractor, ExtractOptions};
//! use glyphflow_core::engine::DocumentDump;
//! use glyphflow_core::ids::DocumentId;
//!
//! let dump = DocumentDump::from_path("layer.json")?;
//! let doc = DocumentId::from_bytes(&std::fs::read("document.pdf")?);
//! let extractor = DocumentExtractor::new(&dump.pages, doc, ExtractOptions::default());
//! for page in extractor.pages()? {
//!     println!("{:?}", page?.units);
//! }
//! ```

pub mod document;
pub mod page;

// Re-export for convenience
pub use document::{DocumentExtractor, ExtractOptions, PageIterator};
pub use page::{extract_page, extract_runs};
