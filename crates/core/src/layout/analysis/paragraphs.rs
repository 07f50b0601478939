//! Line-to-paragraph grouping.
//!
//! Horizontal text combines punctuation, indentation and line-gap signals;
//! vertical text uses whitespace alone, which may split a line. Both lean towards
//! keeping lines together: a missed break only costs layout, a false break
//! cuts a sentence in two.

use std::sync::LazyLock;

use regex::Regex;
use tracing::trace;

use crate::utils::{mean, percentile};

use super::super::params::LayoutParams;
use super::super::types::{Bounds, GlyphRun, Line, TextBlock, WritingMode};

/// Sentence-final punctuation, optionally followed by closing quotes or brackets.
static SENTENCE_END: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"[.!?。！？]["'”’»」』)\]]*$"#).expect("valid sentence-end pattern")
});

/// Opening quote or dialogue dash at the start of a line.
static DIALOGUE_START: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^["'“‘«「『—–]"#).expect("valid dialogue pattern"));

/// Words that almost never start a sentence, so a line starting with one
/// continues the previous line.
pub const CONTINUATION_WORDS: &[&str] = &[
    "a", "an", "the", "and", "or", "but", "nor", "so", "yet", "of", "in", "on", "at", "to",
    "for", "with", "by", "from", "into", "onto", "over", "under", "about", "as", "than", "that",
    "which", "who", "whom", "whose", "is", "are", "was", "were", "be", "been", "being", "has",
    "have", "had", "do", "does", "did", "can", "could", "will", "would", "shall", "should",
    "may", "might", "must", "not",
];

/// Whether a line's text ends a sentence.
pub fn ends_sentence(text: &str) -> bool {
    SENTENCE_END.is_match(text.trim_end())
}

/// Whether a line's text reads as the continuation of an unfinished sentence:
/// it starts lowercase, or with a continuation word.
pub fn continues_sentence(text: &str) -> bool {
    let text = text.trim_start();
    if text.chars().next().is_some_and(char::is_lowercase) {
        return true;
    }
    let first_word: String = text
        .chars()
        .skip_while(|c| !c.is_alphanumeric())
        .take_while(|c| c.is_alphanumeric())
        .collect::<String>()
        .to_lowercase();
    CONTINUATION_WORDS.contains(&first_word.as_str())
}

fn starts_uppercase(text: &str) -> bool {
    text.trim_start().chars().next().is_some_and(char::is_uppercase)
}

/// Measurements of one line used by the break decision.
struct LineMetrics {
    anchor: f64,
    bounds: Bounds,
    text: String,
}

/// Groups consecutive lines of one column into paragraphs.
///
/// `lines` must already be in reading order. Blocks are tagged with `column`.
pub fn group_paragraphs(
    runs: &[GlyphRun],
    lines: &[Line],
    mode: WritingMode,
    column: usize,
    params: &LayoutParams,
) -> Vec<TextBlock> {
    let lines: Vec<&Line> = lines.iter().filter(|l| !l.is_empty()).collect();
    if lines.is_empty() {
        return Vec::new();
    }

    match mode {
        WritingMode::Horizontal => {
            let breaks = horizontal_breaks(runs, &lines, params);
            let mut blocks = Vec::new();
            let mut current = TextBlock::new(column);
            for (line, starts_new) in lines.iter().zip(breaks) {
                if starts_new && !current.is_empty() {
                    blocks.push(current.take());
                }
                current.push_line(line);
            }
            if !current.is_empty() {
                blocks.push(current);
            }
            blocks
        }
        WritingMode::Vertical => vertical_blocks(runs, &lines, column, params),
    }
}

/// Break flags for horizontal lines; `flags[i]` is true when line `i` starts
/// a new paragraph.
///
/// A break needs the previous line to end a sentence plus one of:
/// (a) indentation beyond the margin by more than `indent_ratio` line heights,
/// (b) a gap over `large_gap_ratio` line heights,
/// (c) a gap over `medium_gap_ratio` line heights before an uppercase start,
/// (d) a dialogue opener after a medium gap,
/// (e) a conspicuously short previous line, an uppercase start and a medium gap.
/// An unfinished previous line followed by a lowercase or continuation-word
/// start always merges.
fn horizontal_breaks(runs: &[GlyphRun], lines: &[&Line], params: &LayoutParams) -> Vec<bool> {
    let metrics: Vec<LineMetrics> = lines
        .iter()
        .filter_map(|line| {
            Some(LineMetrics {
                anchor: line.anchor,
                bounds: line.bounds(runs)?,
                text: line.text(runs),
            })
        })
        .collect();

    let avg_height = mean(metrics.iter().map(|m| m.bounds.height())).unwrap_or(0.0);
    let avg_width = mean(metrics.iter().map(|m| m.bounds.width())).unwrap_or(0.0);
    let left_edges: Vec<f64> = metrics.iter().map(|m| m.bounds.x0).collect();
    let margin = percentile(&left_edges, params.indent_percentile).unwrap_or(0.0);

    let medium_gap = params.medium_gap_ratio * avg_height;
    let mut flags = vec![false; metrics.len()];
    for i in 1..metrics.len() {
        let prev = &metrics[i - 1];
        let cur = &metrics[i];

        if !ends_sentence(&prev.text) {
            // An unfinished sentence never breaks, which covers the
            // lowercase and continuation-word merge as well.
            let reason = if continues_sentence(&cur.text) {
                "continuation"
            } else {
                "unfinished sentence"
            };
            trace!(line = i, reason, "merge");
            continue;
        }

        let gap = cur.anchor - prev.anchor;
        let upper = starts_uppercase(&cur.text);
        let indented = cur.bounds.x0 - margin > params.indent_ratio * avg_height;
        let large_gap = gap > params.large_gap_ratio * avg_height;
        let gap_and_upper = gap > medium_gap && upper;
        let dialogue = DIALOGUE_START.is_match(cur.text.trim_start()) && gap > medium_gap;
        let short_prev = prev.bounds.width() < params.short_line_ratio * avg_width
            && upper
            && gap > medium_gap;

        flags[i] = indented || large_gap || gap_and_upper || dialogue || short_prev;
        trace!(
            line = i,
            gap,
            indented,
            large_gap,
            gap_and_upper,
            dialogue,
            short_prev,
            "paragraph break decision"
        );
    }
    flags
}

/// Paragraphs of vertical text. A run starts a new paragraph when the
/// whitespace before it exceeds
/// `max(min_vertical_gap, avg_run_height * vertical_gap_ratio)`, measured along
/// the line axis from the previous run of the same line. The first run of a
/// line is measured from the previous line's left edge instead.
fn vertical_blocks(
    runs: &[GlyphRun],
    lines: &[&Line],
    column: usize,
    params: &LayoutParams,
) -> Vec<TextBlock> {
    let avg_height = mean(lines.iter().flat_map(|l| l.runs(runs)).map(|r| r.h)).unwrap_or(0.0);
    let threshold = params
        .min_vertical_gap
        .max(avg_height * params.vertical_gap_ratio);

    let mut blocks = Vec::new();
    let mut current = TextBlock::new(column);
    let mut prev_line: Option<Bounds> = None;
    for line in lines {
        let bounds = line.bounds(runs);
        if let (Some(prev), Some(cur)) = (prev_line, bounds) {
            // Lines run right to left: prev's left edge to cur's right edge.
            let gap = prev.x0 - cur.x1;
            if gap > threshold && !current.is_empty() {
                trace!(line = line.id, gap, threshold, "vertical break between lines");
                blocks.push(current.take());
            }
        }

        let mut prev_run: Option<&GlyphRun> = None;
        for &g in &line.items {
            let run = &runs[g];
            if let Some(prev) = prev_run {
                let gap = run.y - prev.y1();
                if gap > threshold && !current.is_empty() {
                    trace!(line = line.id, gap, threshold, "vertical break within line");
                    blocks.push(current.take());
                }
            }
            current.push_run(line.id, g);
            prev_run = Some(run);
        }
        prev_line = bounds;
    }
    if !current.is_empty() {
        blocks.push(current);
    }
    blocks
}
