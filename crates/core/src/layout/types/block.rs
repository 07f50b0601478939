//! Text block (paragraph) type.

use super::glyph::{GlyphId, GlyphRun};
use super::textline::{Line, LineId};

/// A contiguous run of lines judged to belong to one paragraph.
#[derive(Debug, Clone, PartialEq)]
pub struct TextBlock {
    /// Reading column the block belongs to (0 when single-column).
    pub column: usize,
    /// Member lines in line order. A line split across paragraphs is listed
    /// by every block holding part of it.
    pub lines: Vec<LineId>,
    /// Flattened runs of all member lines, in reading order.
    pub items: Vec<GlyphId>,
}

impl TextBlock {
    pub fn new(column: usize) -> Self {
        Self {
            column,
            lines: Vec::new(),
            items: Vec::new(),
        }
    }

    pub fn push_line(&mut self, line: &Line) {
        self.lines.push(line.id);
        self.items.extend(line.items.iter().copied());
    }

    /// Appends one run of `line`, recording the line on first use.
    pub fn push_run(&mut self, line: LineId, glyph: GlyphId) {
        if self.lines.last() != Some(&line) {
            self.lines.push(line);
        }
        self.items.push(glyph);
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Moves the accumulated lines and runs out, leaving an empty block of the
    /// same column.
    pub fn take(&mut self) -> Self {
        let empty = Self::new(self.column);
        std::mem::replace(self, empty)
    }

    /// Space-joined, trimmed text of every run in the block.
    pub fn text(&self, runs: &[GlyphRun]) -> String {
        itertools::join(self.items.iter().map(|&g| runs[g].text.as_str()), " ")
            .trim()
            .to_string()
    }
}
