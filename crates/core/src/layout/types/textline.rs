//! Text line types: Line, WritingMode, and the glyph-to-line side table.
//!
//! The `WritingMode` enum allows runtime distinction between horizontal and vertical text.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::glyph::{Bounds, GlyphId, GlyphRun};

/// Sequential line number, unique within a page.
pub type LineId = usize;

/// Direction text flows in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WritingMode {
    /// Left-to-right lines stacked top to bottom.
    #[default]
    Horizontal,
    /// Top-to-bottom lines stacked right to left.
    Vertical,
}

/// Glyph runs judged to lie on the same typographic line.
///
/// In vertical mode a "line" is one column of vertical glyphs.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub id: LineId,
    /// Running average of the clustering coordinate.
    pub anchor: f64,
    /// Runs sorted along the reading axis.
    pub items: SmallVec<[GlyphId; 8]>,
}

impl Line {
    pub fn new(id: LineId, anchor: f64) -> Self {
        Self {
            id,
            anchor,
            items: SmallVec::new(),
        }
    }

    /// Adds a run and folds its anchor into the running average.
    pub fn push(&mut self, glyph: GlyphId, anchor: f64) {
        let n = self.items.len() as f64;
        self.anchor = (self.anchor * n + anchor) / (n + 1.0);
        self.items.push(glyph);
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn runs<'a>(&'a self, runs: &'a [GlyphRun]) -> impl Iterator<Item = &'a GlyphRun> + 'a {
        self.items.iter().map(move |&g| &runs[g])
    }

    pub fn bounds(&self, runs: &[GlyphRun]) -> Option<Bounds> {
        Bounds::of_runs(self.runs(runs))
    }

    /// Space-joined text of the line.
    pub fn text(&self, runs: &[GlyphRun]) -> String {
        let mut out = String::new();
        for run in self.runs(runs) {
            if !out.is_empty() {
                out.push(' ');
            }
            out.push_str(&run.text);
        }
        out
    }
}

/// Side table mapping each glyph run to the line it was grouped into.
#[derive(Debug, Clone, Default)]
pub struct LineTable {
    line_of: FxHashMap<GlyphId, LineId>,
}

impl LineTable {
    pub fn from_lines<'a>(lines: impl IntoIterator<Item = &'a Line>) -> Self {
        let mut line_of = FxHashMap::default();
        for line in lines {
            for &g in &line.items {
                line_of.insert(g, line.id);
            }
        }
        Self { line_of }
    }

    pub fn line_of(&self, glyph: GlyphId) -> Option<LineId> {
        self.line_of.get(&glyph).copied()
    }

    pub fn len(&self) -> usize {
        self.line_of.len()
    }

    pub fn is_empty(&self) -> bool {
        self.line_of.is_empty()
    }
}
