//! Glyph normalization: engine text items to `GlyphRun`s.
//!
//! Each item's transform is composed with the page viewport so every run
//! lands in top-left-origin page space at scale 1.0. Watermark runs (stamp
//! words and diagonal text) are split off before layout analysis.

use rustc_hash::FxHashSet;

use crate::engine::{TextItem, Viewport};
use crate::utils::mult_matrix;

use super::params::LayoutParams;
use super::types::GlyphRun;

/// Texts treated as watermark stamps, compared lowercased with collapsed whitespace.
pub const STAMP_PHRASES: &[&str] = &[
    "confidential",
    "draft",
    "sample",
    "preview",
    "demo",
    "watermark",
    "strictly confidential",
    "confidential draft",
    "draft copy",
    "draft only",
    "sample copy",
    "sample only",
    "preview only",
    "demo version",
    "demo only",
    "do not copy",
    "top secret",
];

/// Converts one engine item into a glyph run; `None` for blank text.
pub fn to_glyph_run(item: &TextItem, viewport: &Viewport) -> Option<GlyphRun> {
    let text = item.text.trim();
    if text.is_empty() {
        return None;
    }

    let (a, b, c, d, e, f) = mult_matrix(viewport.transform, item.transform);
    let h = c.hypot(d);
    let mut rotation = b.atan2(a).to_degrees();
    if rotation <= -180.0 {
        rotation += 360.0;
    }

    Some(
        GlyphRun::new(text, e, f - h, item.width * viewport.scale, h)
            .vertical(b.abs() > a.abs())
            .rotated(rotation),
    )
}

/// Converts every non-blank item of a page, preserving engine order.
pub fn normalize_items(items: &[TextItem], viewport: &Viewport) -> Vec<GlyphRun> {
    items
        .iter()
        .filter_map(|item| to_glyph_run(item, viewport))
        .collect()
}

/// Whether the text matches one of the stamp phrases.
pub fn is_stamp_text(text: &str) -> bool {
    let normalized = itertools::join(text.split_whitespace(), " ").to_lowercase();
    STAMP_PHRASES.contains(&normalized.as_str())
}

/// Whether a run is a watermark: a stamp phrase, or rotated diagonally.
pub fn is_watermark(run: &GlyphRun, params: &LayoutParams) -> bool {
    let angle = run.rotation_degrees.abs();
    is_stamp_text(&run.text)
        || (angle > params.watermark_min_rotation && angle < params.watermark_max_rotation)
}

/// Splits watermark runs off the content stream.
///
/// Returns the remaining runs and the unique watermark texts in first-seen
/// order. With `filter_watermarks` disabled every run is kept.
pub fn split_watermarks(
    runs: Vec<GlyphRun>,
    params: &LayoutParams,
) -> (Vec<GlyphRun>, Vec<String>) {
    if !params.filter_watermarks {
        return (runs, Vec::new());
    }

    let mut kept = Vec::with_capacity(runs.len());
    let mut watermarks = Vec::new();
    let mut seen = FxHashSet::default();
    for run in runs {
        if is_watermark(&run, params) {
            if seen.insert(run.text.clone()) {
                watermarks.push(run.text);
            }
        } else {
            kept.push(run);
        }
    }
    (kept, watermarks)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> Viewport {
        Viewport::upright(612.0, 792.0)
    }

    #[test]
    fn upright_item_maps_to_top_left_space() {
        let item = TextItem::new("Hello", (12.0, 0.0, 0.0, 12.0, 72.0, 700.0), 30.0);
        let run = to_glyph_run(&item, &page()).unwrap();
        assert_eq!(run.text, "Hello");
        assert_eq!(run.x, 72.0);
        // baseline at 792 - 700 = 92, top edge one font height above
        assert_eq!(run.y, 80.0);
        assert_eq!(run.h, 12.0);
        assert_eq!(run.w, 30.0);
        assert!(!run.is_vertical);
        assert_eq!(run.rotation_degrees, 0.0);
    }

    #[test]
    fn width_follows_viewport_scale() {
        let item = TextItem::new("Hi", (10.0, 0.0, 0.0, 10.0, 0.0, 100.0), 15.0);
        let run = to_glyph_run(&item, &page().rescaled(2.0)).unwrap();
        assert_eq!(run.w, 30.0);
        assert_eq!(run.h, 20.0);
    }

    #[test]
    fn blank_items_are_dropped() {
        let items = vec![
            TextItem::new("   ", (10.0, 0.0, 0.0, 10.0, 0.0, 100.0), 5.0),
            TextItem::new("", (10.0, 0.0, 0.0, 10.0, 0.0, 100.0), 0.0),
            TextItem::new(" x ", (10.0, 0.0, 0.0, 10.0, 0.0, 100.0), 5.0),
        ];
        let runs = normalize_items(&items, &page());
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].text, "x");
    }

    #[test]
    fn quarter_turn_is_vertical() {
        let item = TextItem::new("縦", (0.0, 12.0, -12.0, 0.0, 300.0, 500.0), 12.0);
        let run = to_glyph_run(&item, &page()).unwrap();
        assert!(run.is_vertical);
        assert!((run.rotation_degrees.abs() - 90.0).abs() < 1e-9);
        assert!((run.h - 12.0).abs() < 1e-9);
    }

    #[test]
    fn diagonal_rotation_is_in_range() {
        let (s, c) = 45f64.to_radians().sin_cos();
        let item = TextItem::new(
            "CONFIDENTIAL",
            (40.0 * c, 40.0 * s, -40.0 * s, 40.0 * c, 100.0, 100.0),
            300.0,
        );
        let run = to_glyph_run(&item, &page()).unwrap();
        assert!((run.rotation_degrees + 45.0).abs() < 1e-9);
        assert!(run.rotation_degrees > -180.0 && run.rotation_degrees <= 180.0);
    }

    #[test]
    fn upside_down_rotation_is_positive_180() {
        let viewport = Viewport::identity(612.0, 792.0);
        let item = TextItem::new("x", (-10.0, 0.0, 0.0, -10.0, 50.0, 50.0), 5.0);
        let run = to_glyph_run(&item, &viewport).unwrap();
        assert_eq!(run.rotation_degrees, 180.0);
    }

    #[test]
    fn stamp_text_matching() {
        assert!(is_stamp_text("CONFIDENTIAL"));
        assert!(is_stamp_text("Draft   Copy"));
        assert!(is_stamp_text(" do not copy "));
        assert!(!is_stamp_text("confidential information follows"));
        assert!(!is_stamp_text("drafted"));
    }

    #[test]
    fn split_reports_unique_watermarks() {
        let params = LayoutParams::default();
        let runs = vec![
            GlyphRun::new("Body", 0.0, 0.0, 30.0, 10.0),
            GlyphRun::new("DRAFT", 0.0, 20.0, 30.0, 10.0),
            GlyphRun::new("Stamp", 0.0, 40.0, 30.0, 10.0).rotated(45.0),
            GlyphRun::new("DRAFT", 0.0, 60.0, 30.0, 10.0),
            GlyphRun::new("Flipped", 0.0, 80.0, 30.0, 10.0).rotated(180.0),
        ];
        let (kept, marks) = split_watermarks(runs, &params);
        assert_eq!(marks, vec!["DRAFT".to_string(), "Stamp".to_string()]);
        let texts: Vec<_> = kept.iter().map(|r| r.text.as_str()).collect();
        assert_eq!(texts, vec!["Body", "Flipped"]);
    }

    #[test]
    fn split_is_a_no_op_when_disabled() {
        let params = LayoutParams {
            filter_watermarks: false,
            ..LayoutParams::default()
        };
        let runs = vec![GlyphRun::new("DRAFT", 0.0, 0.0, 30.0, 10.0).rotated(45.0)];
        let (kept, marks) = split_watermarks(runs, &params);
        assert_eq!(kept.len(), 1);
        assert!(marks.is_empty());
    }
}
