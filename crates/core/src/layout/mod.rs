//! Layout reconstruction for positioned glyph runs.
//!
//! This module contains:
//! - Layout types (GlyphRun, Line, TextBlock, OutputUnit, etc.)
//! - Layout parameters (LayoutParams)
//! - Glyph normalization and watermark filtering
//! - Column, line, paragraph and sentence analysis
//! - Highlight rectangle construction

pub mod analysis;
pub mod normalize;
pub mod params;
pub mod rects;
pub mod types;

pub use params::*;
pub use types::*;

pub use analysis::{PageLayout, Segment, analyze_runs};
pub use normalize::{normalize_items, split_watermarks, to_glyph_run};
pub use rects::build_rects;
