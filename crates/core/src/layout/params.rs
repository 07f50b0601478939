//! Layout analysis parameters.
//!
//! Contains `LayoutParams`, the single tunable parameter set for every
//! heuristic in the pipeline, plus the output granularity switches.

use serde::{Deserialize, Serialize};

use crate::error::{ExtractError, Result};

/// Size of the externally visible output unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    /// One unit per sentence.
    #[default]
    Sentence,
    /// One unit per paragraph.
    Paragraph,
}

/// Text span the sentence splitter works on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentenceScope {
    /// Split each paragraph on its own.
    #[default]
    Paragraph,
    /// Join all paragraphs of a column, then split.
    Column,
}

/// Parameters for layout analysis.
///
/// Distances are in page-space units at viewport scale 1.0; ratios are
/// relative to the quantity named in each field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutParams {
    /// Output unit size.
    pub granularity: Granularity,

    /// Span the sentence splitter concatenates before splitting.
    pub sentence_scope: SentenceScope,

    /// If stamp words and diagonal runs should be removed as watermarks.
    pub filter_watermarks: bool,

    /// Runs whose absolute rotation lies strictly between these two angles
    /// (degrees) are watermarks.
    pub watermark_min_rotation: f64,
    pub watermark_max_rotation: f64,

    /// Fraction of vertical runs at which the page switches to vertical mode.
    pub vertical_ratio: f64,

    /// If multi-column detection should run on horizontal pages.
    pub detect_columns: bool,

    /// Number of equal-width histogram buckets spanning the page width.
    pub column_buckets: usize,

    /// Y distance under which two runs share an approximate line during
    /// column detection.
    pub approx_line_tolerance: f64,

    /// Minimum in-line gap counted as a gutter candidate, relative to page width.
    pub min_gap_ratio: f64,

    /// Minimum number of lines a gutter must recur on.
    pub min_gap_occurrences: usize,

    /// Minimum fraction of approximate lines a gutter must recur on.
    pub min_gap_line_ratio: f64,

    /// Narrowest allowed column, relative to page width.
    pub min_column_width_ratio: f64,

    /// Upper limit on detected columns.
    pub max_columns: usize,

    /// Floor for the line clustering threshold.
    pub min_line_tolerance: f64,

    /// Line clustering threshold relative to the run size across the line axis.
    pub line_tolerance_ratio: f64,

    /// Percentile of line left edges taken as the unindented margin.
    pub indent_percentile: f64,

    /// Indentation, relative to average line height, that signals a new paragraph.
    pub indent_ratio: f64,

    /// Line gap, relative to average line height, that alone breaks a paragraph.
    pub large_gap_ratio: f64,

    /// Line gap, relative to average line height, that breaks a paragraph
    /// together with a second signal.
    pub medium_gap_ratio: f64,

    /// Lines shorter than this fraction of the average line width are
    /// considered paragraph endings.
    pub short_line_ratio: f64,

    /// Vertical mode: gap between text columns, relative to average run
    /// height, that breaks a paragraph.
    pub vertical_gap_ratio: f64,

    /// Vertical mode: floor for the paragraph gap.
    pub min_vertical_gap: f64,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            granularity: Granularity::Sentence,
            sentence_scope: SentenceScope::Paragraph,
            filter_watermarks: true,
            watermark_min_rotation: 10.0,
            watermark_max_rotation: 170.0,
            vertical_ratio: 0.4,
            detect_columns: true,
            column_buckets: 80,
            approx_line_tolerance: 3.0,
            min_gap_ratio: 0.06,
            min_gap_occurrences: 3,
            min_gap_line_ratio: 0.15,
            min_column_width_ratio: 0.18,
            max_columns: 4,
            min_line_tolerance: 2.0,
            line_tolerance_ratio: 0.6,
            indent_percentile: 0.15,
            indent_ratio: 1.2,
            large_gap_ratio: 2.5,
            medium_gap_ratio: 1.8,
            short_line_ratio: 0.65,
            vertical_gap_ratio: 1.6,
            min_vertical_gap: 6.0,
        }
    }
}

impl LayoutParams {
    /// Default parameters emitting one unit per paragraph.
    pub fn paragraphs() -> Self {
        Self {
            granularity: Granularity::Paragraph,
            ..Self::default()
        }
    }

    /// Checks that every field lies in its meaningful range.
    pub fn validate(&self) -> Result<()> {
        fn fail(msg: impl Into<String>) -> Result<()> {
            Err(ExtractError::InvalidParams(msg.into()))
        }

        let ratios = [
            ("vertical_ratio", self.vertical_ratio),
            ("min_gap_ratio", self.min_gap_ratio),
            ("min_gap_line_ratio", self.min_gap_line_ratio),
            ("min_column_width_ratio", self.min_column_width_ratio),
            ("indent_percentile", self.indent_percentile),
            ("short_line_ratio", self.short_line_ratio),
        ];
        for (name, value) in ratios {
            if !(0.0..=1.0).contains(&value) {
                return fail(format!("{name} should be between 0 and 1, got {value}"));
            }
        }

        let non_negative = [
            ("approx_line_tolerance", self.approx_line_tolerance),
            ("min_line_tolerance", self.min_line_tolerance),
            ("line_tolerance_ratio", self.line_tolerance_ratio),
            ("indent_ratio", self.indent_ratio),
            ("large_gap_ratio", self.large_gap_ratio),
            ("medium_gap_ratio", self.medium_gap_ratio),
            ("vertical_gap_ratio", self.vertical_gap_ratio),
            ("min_vertical_gap", self.min_vertical_gap),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return fail(format!("{name} should be a non-negative number, got {value}"));
            }
        }

        if self.column_buckets == 0 {
            return fail("column_buckets should be at least 1");
        }
        if self.max_columns == 0 {
            return fail("max_columns should be at least 1");
        }
        if self.watermark_min_rotation > self.watermark_max_rotation {
            return fail(format!(
                "watermark rotation range is empty: {} > {}",
                self.watermark_min_rotation, self.watermark_max_rotation
            ));
        }
        if self.medium_gap_ratio > self.large_gap_ratio {
            return fail(format!(
                "medium_gap_ratio ({}) should not exceed large_gap_ratio ({})",
                self.medium_gap_ratio, self.large_gap_ratio
            ));
        }
        Ok(())
    }
}
