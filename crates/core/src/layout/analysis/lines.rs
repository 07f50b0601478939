//! Run-to-line grouping.
//!
//! Contains detect_writing_mode() for the page-level horizontal/vertical vote
//! and group_lines() which clusters runs into lines along the anchor axis.

use ordered_float::OrderedFloat;

use super::super::params::LayoutParams;
use super::super::types::{GlyphId, GlyphRun, Line, LineId, WritingMode};

/// Majority vote over the runs' vertical flags.
///
/// The page is vertical when at least `vertical_ratio` of its runs are.
pub fn detect_writing_mode(runs: &[GlyphRun], params: &LayoutParams) -> WritingMode {
    if runs.is_empty() {
        return WritingMode::Horizontal;
    }
    let vertical = runs.iter().filter(|r| r.is_vertical).count();
    if vertical as f64 >= params.vertical_ratio * runs.len() as f64 {
        WritingMode::Vertical
    } else {
        WritingMode::Horizontal
    }
}

/// Groups the given runs into lines.
///
/// # Algorithm
/// - Sort runs by (anchor, advance position): `(y, x)` for horizontal text,
///   `(x, y)` for vertical text.
/// - A run joins the nearest line whose running-average anchor lies within
///   `max(min_line_tolerance, thickness * line_tolerance_ratio)`, otherwise
///   it starts a new line. The threshold follows each run's own size, so mixed
///   font sizes on a page cluster correctly.
/// - Items are sorted along the reading axis, lines into reading order
///   (top-to-bottom, or right-to-left for vertical text), then numbered from
///   `first_id`.
///
/// Every member run ends up in exactly one line.
pub fn group_lines(
    runs: &[GlyphRun],
    members: &[GlyphId],
    mode: WritingMode,
    first_id: LineId,
    params: &LayoutParams,
) -> Vec<Line> {
    let mut order = members.to_vec();
    order.sort_by_key(|&g| {
        let run = &runs[g];
        (
            OrderedFloat(run.anchor(mode)),
            OrderedFloat(run.advance_position(mode)),
        )
    });

    let mut lines: Vec<Line> = Vec::new();
    for g in order {
        let run = &runs[g];
        let anchor = run.anchor(mode);
        let threshold = params
            .min_line_tolerance
            .max(run.thickness(mode) * params.line_tolerance_ratio);

        let mut best: Option<(usize, f64)> = None;
        for (i, line) in lines.iter().enumerate() {
            let dist = (line.anchor - anchor).abs();
            if dist <= threshold && best.is_none_or(|(_, d)| dist < d) {
                best = Some((i, dist));
            }
        }

        match best {
            Some((i, _)) => lines[i].push(g, anchor),
            None => {
                let mut line = Line::new(0, anchor);
                line.push(g, anchor);
                lines.push(line);
            }
        }
    }

    for line in &mut lines {
        line.items
            .sort_by_key(|&g| OrderedFloat(runs[g].advance_position(mode)));
    }
    match mode {
        WritingMode::Horizontal => lines.sort_by_key(|l| OrderedFloat(l.anchor)),
        WritingMode::Vertical => lines.sort_by_key(|l| std::cmp::Reverse(OrderedFloat(l.anchor))),
    }
    for (i, line) in lines.iter_mut().enumerate() {
        line.id = first_id + i;
    }
    lines
}
