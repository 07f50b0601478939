//! Synthetic page builders shared by the integration tests.

#![allow(dead_code)]

use glyphflow_core::layout::{GlyphRun, OutputUnit, PageExtraction};

pub const CHAR_WIDTH: f64 = 6.0;
pub const WORD_SPACE: f64 = 4.0;
pub const LINE_HEIGHT: f64 = 10.0;

/// One run per word, naturally spaced from `x`.
pub fn ragged_line(text: &str, x: f64, y: f64) -> Vec<GlyphRun> {
    let mut runs = Vec::new();
    let mut cursor = x;
    for word in text.split_whitespace() {
        let w = word.chars().count() as f64 * CHAR_WIDTH;
        runs.push(GlyphRun::new(word, cursor, y, w, LINE_HEIGHT));
        cursor += w + WORD_SPACE;
    }
    runs
}

/// One run per word, spread so the last word ends at `x + width`.
pub fn justified_line(text: &str, x: f64, y: f64, width: f64) -> Vec<GlyphRun> {
    let words: Vec<&str> = text.split_whitespace().collect();
    let widths: Vec<f64> = words
        .iter()
        .map(|w| w.chars().count() as f64 * CHAR_WIDTH)
        .collect();
    let gaps = words.len().saturating_sub(1).max(1) as f64;
    let space = (width - widths.iter().sum::<f64>()) / gaps;

    let mut runs = Vec::new();
    let mut cursor = x;
    for (word, w) in words.iter().zip(&widths) {
        runs.push(GlyphRun::new(word, cursor, y, *w, LINE_HEIGHT));
        cursor += w + space;
    }
    runs
}

/// A column of paragraphs: every paragraph line but the last is justified,
/// lines are 14 apart and paragraphs are separated by one blank line.
pub fn column(paragraphs: &[&[&str]], x: f64, top: f64, width: f64) -> Vec<GlyphRun> {
    let mut runs = Vec::new();
    let mut y = top;
    for paragraph in paragraphs {
        for (i, line) in paragraph.iter().enumerate() {
            if i + 1 == paragraph.len() {
                runs.extend(ragged_line(line, x, y));
            } else {
                runs.extend(justified_line(line, x, y, width));
            }
            y += 14.0;
        }
        y += 14.0;
    }
    runs
}

pub const LEFT: &[&[&str]] = &[
    &[
        "The quick survey began in",
        "spring and ran for twelve",
        "weeks. Results were mixed.",
        "Most sites improved.",
    ],
    &[
        "Next, we describe the data",
        "and the cleaning steps. It",
        "took longer than planned.",
    ],
];

pub const RIGHT: &[&[&str]] = &[
    &[
        "Rainfall was the main driver",
        "of change across all sites.",
        "Soil quality mattered less",
        "than expected.",
    ],
    &[
        "A second study is planned.",
        "It will begin next year and",
        "run for two seasons.",
    ],
];

/// A 612-wide page with two justified columns at x=36 and x=340.
pub fn two_column_page() -> Vec<GlyphRun> {
    let mut runs = column(LEFT, 36.0, 50.0, 200.0);
    runs.extend(column(RIGHT, 340.0, 50.0, 200.0));
    runs
}

/// Every unit's source text, in order.
pub fn sources(page: &PageExtraction) -> Vec<&str> {
    page.units.iter().map(|u| u.source.as_str()).collect()
}

/// `source @ [x,y wxh] ...` per unit, one unit per line.
pub fn render(units: &[OutputUnit]) -> String {
    units
        .iter()
        .map(|u| {
            let rects: Vec<String> = u
                .rects
                .iter()
                .map(|r| format!("[{},{} {}x{}]", r.x, r.y, r.w, r.h))
                .collect();
            format!("{} @ {}", u.source, rects.join(" "))
        })
        .collect::<Vec<_>>()
        .join("\n")
}
