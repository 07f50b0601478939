//! Reading-column detection from recurring in-line gaps.
//!
//! Contains detect_columns() which builds a gap histogram over the page width
//! and turns gaps that recur across many lines into column boundaries.
//!
//! Gaps are measured per approximate line rather than from one global
//! histogram of left edges, so a ragged right margin does not read as a
//! gutter, and the recurrence threshold keeps a single blank area (a figure,
//! a short line) from splitting the page.

use ordered_float::OrderedFloat;
use tracing::{debug, trace};

use super::super::params::LayoutParams;
use super::super::types::{GlyphId, GlyphRun};

/// Column boundaries of a page and the column of every run.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnLayout {
    /// `[0, b1, .., page_width]`, strictly increasing.
    pub boundaries: Vec<f64>,
    /// Column index per glyph id.
    pub column_of: Vec<usize>,
}

impl ColumnLayout {
    /// Everything in one column.
    pub fn single(page_width: f64, run_count: usize) -> Self {
        Self {
            boundaries: vec![0.0, page_width],
            column_of: vec![0; run_count],
        }
    }

    pub fn count(&self) -> usize {
        self.boundaries.len().saturating_sub(1).max(1)
    }

    pub fn is_single(&self) -> bool {
        self.count() == 1
    }

    /// Glyph ids of one column, in glyph order.
    pub fn members(&self, column: usize) -> Vec<GlyphId> {
        self.column_of
            .iter()
            .enumerate()
            .filter(|&(_, &c)| c == column)
            .map(|(g, _)| g)
            .collect()
    }
}

/// A gutter candidate: a contiguous run of gap buckets.
#[derive(Debug, Clone, Copy)]
struct Candidate {
    x: f64,
    score: usize,
}

/// Width used for bucketing: the viewport width, or the rightmost run edge
/// when the viewport reports none.
pub fn effective_page_width(runs: &[GlyphRun], page_width: f64) -> f64 {
    if page_width.is_finite() && page_width > 0.0 {
        return page_width;
    }
    runs.iter().map(GlyphRun::x1).fold(0.0, f64::max)
}

/// Groups runs into coarse lines by y-proximity, each sorted by x.
///
/// Cheaper than the line grouper and only used to measure gaps.
pub fn approximate_lines(runs: &[GlyphRun], tolerance: f64) -> Vec<Vec<GlyphId>> {
    let mut order: Vec<GlyphId> = (0..runs.len()).collect();
    order.sort_by_key(|&g| (OrderedFloat(runs[g].y), OrderedFloat(runs[g].x)));

    let mut lines: Vec<Vec<GlyphId>> = Vec::new();
    let mut line_y = f64::NEG_INFINITY;
    for g in order {
        match lines.last_mut() {
            Some(line) if (runs[g].y - line_y).abs() <= tolerance => line.push(g),
            _ => {
                line_y = runs[g].y;
                lines.push(vec![g]);
            }
        }
    }
    for line in &mut lines {
        line.sort_by_key(|&g| OrderedFloat(runs[g].x));
    }
    lines
}

/// Detects reading columns on a horizontal page.
///
/// # Algorithm
/// 1. Histogram of run left edges over `column_buckets` buckets.
/// 2. Per approximate line, gaps wider than `min_gap_ratio * width`.
/// 3. Gap midpoints are accumulated per bucket; each maximal run of
///    non-empty buckets is a candidate whose score is its gap count minus
///    the left edges falling inside it.
/// 4. Candidates scoring at least `max(min_gap_occurrences,
///    ceil(min_gap_line_ratio * lines))` are accepted strongest first unless
///    they make a column narrower than `min_column_width_ratio * width`.
pub fn detect_columns(runs: &[GlyphRun], page_width: f64, params: &LayoutParams) -> ColumnLayout {
    let width = effective_page_width(runs, page_width);
    if !params.detect_columns || params.max_columns <= 1 || runs.len() < 2 || width <= 0.0 {
        return ColumnLayout::single(width.max(0.0), runs.len());
    }

    let buckets = params.column_buckets.max(1);
    let bucket_w = width / buckets as f64;
    let bucket_of = |x: f64| -> usize {
        let b = (x / bucket_w).floor();
        if b <= 0.0 {
            0
        } else {
            (b as usize).min(buckets - 1)
        }
    };

    let mut left_edges = vec![0usize; buckets];
    for run in runs {
        left_edges[bucket_of(run.x)] += 1;
    }

    let lines = approximate_lines(runs, params.approx_line_tolerance);
    let min_gap = params.min_gap_ratio * width;
    let mut gaps = vec![0usize; buckets];
    for line in &lines {
        let Some((&first, rest)) = line.split_first() else {
            continue;
        };
        let mut right = runs[first].x1();
        for &g in rest {
            let run = &runs[g];
            if run.x - right > min_gap {
                gaps[bucket_of((right + run.x) / 2.0)] += 1;
            }
            right = right.max(run.x1());
        }
    }

    let threshold = params
        .min_gap_occurrences
        .max((params.min_gap_line_ratio * lines.len() as f64).ceil() as usize)
        .max(1);

    let mut candidates = Vec::new();
    let mut b = 0;
    while b < buckets {
        if gaps[b] == 0 {
            b += 1;
            continue;
        }
        let start = b;
        while b < buckets && gaps[b] > 0 {
            b += 1;
        }
        let hits: usize = gaps[start..b].iter().sum();
        let starts: usize = left_edges[start..b].iter().sum();
        let candidate = Candidate {
            x: (start + b) as f64 * bucket_w / 2.0,
            score: hits.saturating_sub(starts),
        };
        trace!(x = candidate.x, hits, starts, threshold, "gutter candidate");
        if candidate.score >= threshold {
            candidates.push(candidate);
        }
    }

    candidates.sort_by_key(|c| (std::cmp::Reverse(c.score), OrderedFloat(c.x)));

    let min_width = params.min_column_width_ratio * width;
    let mut accepted: Vec<f64> = Vec::new();
    for candidate in candidates {
        if accepted.len() + 1 >= params.max_columns {
            break;
        }
        let clear_of_edges = candidate.x >= min_width && width - candidate.x >= min_width;
        let clear_of_others = accepted.iter().all(|&x| (x - candidate.x).abs() >= min_width);
        if clear_of_edges && clear_of_others {
            accepted.push(candidate.x);
        }
    }
    accepted.sort_by_key(|&x| OrderedFloat(x));

    let mut boundaries = Vec::with_capacity(accepted.len() + 2);
    boundaries.push(0.0);
    boundaries.extend(accepted);
    boundaries.push(width);

    let column_of = assign_columns(runs, &boundaries);
    debug!(
        lines = lines.len(),
        columns = boundaries.len() - 1,
        ?boundaries,
        "column detection"
    );
    ColumnLayout {
        boundaries,
        column_of,
    }
}

/// Column of every run by its horizontal center; runs outside the page are
/// clamped to the first or last column.
pub fn assign_columns(runs: &[GlyphRun], boundaries: &[f64]) -> Vec<usize> {
    let last = boundaries.len().saturating_sub(2);
    runs.iter()
        .map(|run| {
            let cx = run.center_x();
            boundaries
                .partition_point(|&b| b <= cx)
                .saturating_sub(1)
                .min(last)
        })
        .collect()
}
