//! Layout data types.
//!
//! - `glyph`: GlyphRun, Bounds
//! - `textline`: Line, LineTable, WritingMode
//! - `block`: TextBlock
//! - `unit`: OutputUnit, Rect, PageExtraction

pub mod block;
pub mod glyph;
pub mod textline;
pub mod unit;

pub use block::TextBlock;
pub use glyph::{Bounds, GlyphId, GlyphRun};
pub use textline::{Line, LineId, LineTable, WritingMode};
pub use unit::{OutputUnit, PageExtraction, Rect, UnitStatus};
