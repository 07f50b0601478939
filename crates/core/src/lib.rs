//! glyphflow - layout reconstruction for positioned PDF text runs.
//!
//! Takes the text layer a PDF engine reports for a page, rebuilds columns,
//! lines, paragraphs and sentences, and emits translation units with stable
//! content-derived ids and per-line highlight rectangles.

pub mod api;
pub mod engine;
pub mod error;
pub mod ids;
pub mod layout;
pub mod utils;

pub use api::{DocumentExtractor, ExtractOptions, extract_page};
pub use engine::{DocumentDump, PageDump, PageSource, TextItem, Viewport};
pub use error::{ExtractError, Result};
pub use ids::{DocumentId, parse_unit_id, unit_id};
pub use layout::{
    Granularity, LayoutParams, OutputUnit, PageExtraction, Rect, SentenceScope, UnitStatus,
    WritingMode,
};
