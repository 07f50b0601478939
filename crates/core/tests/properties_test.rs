//! Invariants that hold for any page: determinism, id stability, coverage,
//! rect consistency and single-column passthrough.

mod common;

use common::{column, ragged_line, two_column_page};
use glyphflow_core::api::extract_runs;
use glyphflow_core::ids::{DocumentId, parse_unit_id};
use glyphflow_core::layout::analysis::detect_columns;
use glyphflow_core::layout::{
    Bounds, GlyphRun, LayoutParams, PageExtraction, analyze_runs, build_rects,
};
use rustc_hash::FxHashSet;

fn doc() -> DocumentId {
    DocumentId::from_bytes(b"properties")
}

fn extract(runs: Vec<GlyphRun>, params: &LayoutParams) -> PageExtraction {
    extract_runs(runs, 612.0, &doc(), 7, params)
}

fn all_params() -> Vec<LayoutParams> {
    use glyphflow_core::layout::SentenceScope;
    vec![
        LayoutParams::default(),
        LayoutParams::paragraphs(),
        LayoutParams {
            sentence_scope: SentenceScope::Column,
            ..LayoutParams::default()
        },
    ]
}

/// The page with its runs in a scrambled but fixed order.
fn scrambled(mut runs: Vec<GlyphRun>) -> Vec<GlyphRun> {
    runs.reverse();
    let mid = runs.len() / 2;
    runs.rotate_left(mid / 3);
    runs
}

// ============================================================================
// Determinism and id stability
// ============================================================================

#[test]
fn test_extraction_is_deterministic() {
    for params in all_params() {
        let first = extract(two_column_page(), &params);
        let second = extract(two_column_page(), &params);
        assert_eq!(first, second);
    }
}

#[test]
fn test_ids_do_not_depend_on_run_order() {
    for params in all_params() {
        let ordered = extract(two_column_page(), &params);
        let shuffled = extract(scrambled(two_column_page()), &params);
        assert_eq!(ordered, shuffled);
    }
}

#[test]
fn test_ids_follow_text_not_position() {
    // The same sentence moved down the page keeps its id.
    let high = extract(ragged_line("Stable text.", 36.0, 50.0), &LayoutParams::default());
    let low = extract(ragged_line("Stable text.", 90.0, 400.0), &LayoutParams::default());
    assert_eq!(high.units[0].id, low.units[0].id);
    assert_ne!(high.units[0].rects, low.units[0].rects);

    let (parsed_doc, page, _) = parse_unit_id(&high.units[0].id).unwrap();
    assert_eq!(parsed_doc, doc());
    assert_eq!(page, 7);
}

#[test]
fn test_repeated_sentence_shares_id() {
    let mut runs = ragged_line("See above.", 36.0, 50.0);
    runs.extend(ragged_line("See above.", 36.0, 64.0));
    let page = extract(runs, &LayoutParams::default());
    assert_eq!(page.units.len(), 2);
    assert_eq!(page.units[0].id, page.units[1].id);
    assert_ne!(page.units[0].rects, page.units[1].rects);
}

// ============================================================================
// Coverage
// ============================================================================

fn sorted_words<'a>(texts: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut words: Vec<String> = texts
        .into_iter()
        .flat_map(str::split_whitespace)
        .map(str::to_string)
        .collect();
    words.sort();
    words
}

#[test]
fn test_every_run_lands_in_exactly_one_unit() {
    let mut runs = two_column_page();
    runs.push(GlyphRun::new("WATERMARK", 200.0, 400.0, 200.0, 40.0).rotated(30.0));
    let expected = sorted_words(
        runs.iter()
            .filter(|r| r.text != "WATERMARK")
            .map(|r| r.text.as_str()),
    );

    for params in all_params() {
        let page = extract(runs.clone(), &params);
        let emitted = sorted_words(page.units.iter().map(|u| u.source.as_str()));
        assert_eq!(emitted, expected);
        assert_eq!(page.watermarks, vec!["WATERMARK"]);
    }
}

// ============================================================================
// Rect consistency
// ============================================================================

#[test]
fn test_rects_are_tight_per_line() {
    let params = LayoutParams::default();
    let layout = analyze_runs(two_column_page(), 612.0, &params);

    for segment in layout.segments(&params) {
        let rects = build_rects(&layout.runs, &segment.glyphs, &layout.line_table, 1);

        let mut lines = Vec::new();
        let mut seen = FxHashSet::default();
        for &g in &segment.glyphs {
            let line = layout.line_table.line_of(g).unwrap();
            if seen.insert(line) {
                lines.push(line);
            }
        }
        assert_eq!(rects.len(), lines.len(), "{}", segment.text);

        for (rect, line) in rects.iter().zip(lines) {
            let bounds = Bounds::of_runs(
                segment
                    .glyphs
                    .iter()
                    .filter(|&&g| layout.line_table.line_of(g) == Some(line))
                    .map(|&g| &layout.runs[g]),
            )
            .unwrap();
            assert_eq!(rect.x, bounds.x0);
            assert_eq!(rect.y, bounds.y0);
            assert!((rect.x + rect.w - bounds.x1).abs() < 1e-9);
            assert!((rect.y + rect.h - bounds.y1).abs() < 1e-9);
        }
    }
}

// ============================================================================
// Single-column passthrough
// ============================================================================

#[test]
fn test_single_column_passthrough() {
    let paragraphs: &[&[&str]] = &[
        &["Only one column of text", "lives on this page. It has", "two sentences."],
        &["And a second paragraph", "after a blank line."],
    ];
    let runs = column(paragraphs, 36.0, 50.0, 200.0);

    let detected = detect_columns(&runs, 612.0, &LayoutParams::default());
    assert!(detected.is_single());

    for params in all_params() {
        let with_detection = extract(runs.clone(), &params);
        let without = extract(
            runs.clone(),
            &LayoutParams {
                detect_columns: false,
                ..params.clone()
            },
        );
        assert_eq!(with_detection, without);
    }
}
