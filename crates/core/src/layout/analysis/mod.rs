//! Layout Analysis Module - grouping algorithms
//!
//! Contains the layout analysis stages for:
//! - Detecting reading columns from recurring gutters
//! - Grouping glyph runs into lines
//! - Grouping lines into paragraphs
//! - Splitting paragraph text into sentences

mod analyze;
pub mod columns;
pub mod lines;
pub mod paragraphs;
pub mod sentences;

// Re-export public types and functions
pub use analyze::{PageLayout, analyze_runs};
pub use columns::{ColumnLayout, assign_columns, detect_columns};
pub use lines::{detect_writing_mode, group_lines};
pub use paragraphs::{continues_sentence, ends_sentence, group_paragraphs};
pub use sentences::{Segment, sentence_spans, split_sentences, whole_segment};
