//! Glyph run type: one positioned span of text from the PDF text layer.

use serde::{Deserialize, Serialize};

use super::textline::WritingMode;

/// Index of a glyph run within its page's run vector.
///
/// Later stages refer to runs by this id and keep their per-run results
/// (line, column) in side tables instead of mutating the run.
pub type GlyphId = usize;

/// One positioned run of text, in page space with the origin at the top left.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlyphRun {
    /// Trimmed, non-empty text.
    pub text: String,
    /// Left edge.
    pub x: f64,
    /// Top edge (not the baseline).
    pub y: f64,
    pub w: f64,
    pub h: f64,
    /// Text advances top-to-bottom rather than left-to-right.
    pub is_vertical: bool,
    /// Angle of the run's primary axis, in (-180, 180].
    pub rotation_degrees: f64,
}

impl GlyphRun {
    /// Creates an upright horizontal run. Negative sizes are clamped to zero.
    pub fn new(text: &str, x: f64, y: f64, w: f64, h: f64) -> Self {
        Self {
            text: text.trim().to_string(),
            x,
            y,
            w: w.max(0.0),
            h: h.max(0.0),
            is_vertical: false,
            rotation_degrees: 0.0,
        }
    }

    /// Sets the vertical flag.
    pub const fn vertical(mut self, is_vertical: bool) -> Self {
        self.is_vertical = is_vertical;
        self
    }

    /// Sets the rotation angle in degrees.
    pub const fn rotated(mut self, degrees: f64) -> Self {
        self.rotation_degrees = degrees;
        self
    }

    pub fn x1(&self) -> f64 {
        self.x + self.w
    }

    pub fn y1(&self) -> f64 {
        self.y + self.h
    }

    pub fn center_x(&self) -> f64 {
        self.x + self.w / 2.0
    }

    /// Coordinate lines are clustered on: `y` for horizontal text, `x` for vertical.
    pub fn anchor(&self, mode: WritingMode) -> f64 {
        match mode {
            WritingMode::Horizontal => self.y,
            WritingMode::Vertical => self.x,
        }
    }

    /// Extent across the line axis, which scales the clustering threshold.
    pub fn thickness(&self, mode: WritingMode) -> f64 {
        match mode {
            WritingMode::Horizontal => self.h,
            WritingMode::Vertical => self.w,
        }
    }

    /// Coordinate runs are ordered by within a line.
    pub fn advance_position(&self, mode: WritingMode) -> f64 {
        match mode {
            WritingMode::Horizontal => self.x,
            WritingMode::Vertical => self.y,
        }
    }
}

/// Axis-aligned bounding box accumulated over glyph runs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl Bounds {
    /// Tight bounds of a single run.
    pub fn of_run(run: &GlyphRun) -> Self {
        Self {
            x0: run.x,
            y0: run.y,
            x1: run.x1(),
            y1: run.y1(),
        }
    }

    /// Tight bounds of several runs, `None` when there are none.
    pub fn of_runs<'a>(runs: impl IntoIterator<Item = &'a GlyphRun>) -> Option<Self> {
        runs.into_iter()
            .map(Self::of_run)
            .reduce(|acc, b| acc.union(&b))
    }

    pub fn union(&self, other: &Self) -> Self {
        Self {
            x0: self.x0.min(other.x0),
            y0: self.y0.min(other.y0),
            x1: self.x1.max(other.x1),
            y1: self.y1.max(other.y1),
        }
    }

    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f64 {
        self.y1 - self.y0
    }
}
