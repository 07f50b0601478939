//! Page-level layout analysis: runs the geometric stages in order.
//!
//! writing mode -> columns -> lines -> paragraphs, then segments the
//! paragraphs into output-unit texts according to the granularity.

use itertools::Itertools;
use tracing::debug;

use super::super::params::{Granularity, LayoutParams, SentenceScope};
use super::super::types::{GlyphId, GlyphRun, Line, LineTable, TextBlock, WritingMode};
use super::columns::{ColumnLayout, detect_columns, effective_page_width};
use super::lines::{detect_writing_mode, group_lines};
use super::paragraphs::group_paragraphs;
use super::sentences::{Segment, split_sentences, whole_segment};

/// Reconstructed structure of one page.
#[derive(Debug, Clone)]
pub struct PageLayout {
    pub runs: Vec<GlyphRun>,
    pub mode: WritingMode,
    pub columns: ColumnLayout,
    /// All lines, column by column, each column in reading order.
    pub lines: Vec<Line>,
    pub line_table: LineTable,
    /// Paragraphs, column by column.
    pub blocks: Vec<TextBlock>,
}

/// Analyzes the (already watermark-free) runs of one page.
///
/// Vertical pages skip column detection and are grouped as one flow.
pub fn analyze_runs(runs: Vec<GlyphRun>, page_width: f64, params: &LayoutParams) -> PageLayout {
    let mode = detect_writing_mode(&runs, params);
    let columns = match mode {
        WritingMode::Horizontal => detect_columns(&runs, page_width, params),
        WritingMode::Vertical => {
            ColumnLayout::single(effective_page_width(&runs, page_width), runs.len())
        }
    };

    let mut lines = Vec::new();
    let mut blocks = Vec::new();
    for column in 0..columns.count() {
        let members = columns.members(column);
        if members.is_empty() {
            continue;
        }
        let column_lines = group_lines(&runs, &members, mode, lines.len(), params);
        blocks.extend(group_paragraphs(&runs, &column_lines, mode, column, params));
        lines.extend(column_lines);
    }
    let line_table = LineTable::from_lines(&lines);

    debug!(
        runs = runs.len(),
        ?mode,
        columns = columns.count(),
        lines = lines.len(),
        paragraphs = blocks.len(),
        "page layout"
    );

    PageLayout {
        runs,
        mode,
        columns,
        lines,
        line_table,
        blocks,
    }
}

impl PageLayout {
    /// Output-unit texts with their contributing runs, in reading order.
    pub fn segments(&self, params: &LayoutParams) -> Vec<Segment> {
        match (params.granularity, params.sentence_scope) {
            (Granularity::Paragraph, _) => self
                .blocks
                .iter()
                .filter_map(|b| whole_segment(&self.runs, &b.items))
                .collect(),
            (Granularity::Sentence, SentenceScope::Paragraph) => self
                .blocks
                .iter()
                .flat_map(|b| split_sentences(&self.runs, &b.items))
                .collect(),
            (Granularity::Sentence, SentenceScope::Column) => self
                .blocks
                .iter()
                .chunk_by(|b| b.column)
                .into_iter()
                .flat_map(|(_, blocks)| {
                    let items: Vec<GlyphId> =
                        blocks.flat_map(|b| b.items.iter().copied()).collect();
                    split_sentences(&self.runs, &items)
                })
                .collect(),
        }
    }
}
