//! Highlight rectangles: one tight box per contributing line.

use rustc_hash::FxHashMap;

use super::types::{Bounds, GlyphId, GlyphRun, LineId, LineTable, Rect};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum GroupKey {
    Line(LineId),
    /// A run missing from the line table still gets its own box.
    Glyph(GlyphId),
}

/// Builds one rect per line among `glyphs`, in first-appearance order.
///
/// Each rect is the tight bounding box of that line's contributing runs
/// only, not of the whole line.
pub fn build_rects(
    runs: &[GlyphRun],
    glyphs: &[GlyphId],
    lines: &LineTable,
    page: usize,
) -> Vec<Rect> {
    let mut index: FxHashMap<GroupKey, usize> = FxHashMap::default();
    let mut groups: Vec<Bounds> = Vec::new();

    for &g in glyphs {
        let key = lines.line_of(g).map_or(GroupKey::Glyph(g), GroupKey::Line);
        let bounds = Bounds::of_run(&runs[g]);
        match index.get(&key) {
            Some(&i) => groups[i] = groups[i].union(&bounds),
            None => {
                index.insert(key, groups.len());
                groups.push(bounds);
            }
        }
    }

    groups
        .into_iter()
        .map(|b| Rect {
            page,
            x: b.x0,
            y: b.y0,
            w: b.width(),
            h: b.height(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::types::Line;

    #[test]
    fn one_rect_per_line() {
        let runs = vec![
            GlyphRun::new("The", 10.0, 100.0, 20.0, 10.0),
            GlyphRun::new("cat", 35.0, 99.0, 20.0, 12.0),
            GlyphRun::new("sat.", 10.0, 112.0, 25.0, 10.0),
        ];
        let mut first = Line::new(0, 100.0);
        first.push(0, 100.0);
        first.push(1, 99.0);
        let mut second = Line::new(1, 112.0);
        second.push(2, 112.0);
        let table = LineTable::from_lines([&first, &second]);

        let rects = build_rects(&runs, &[0, 1, 2], &table, 4);
        assert_eq!(
            rects,
            vec![
                Rect {
                    page: 4,
                    x: 10.0,
                    y: 99.0,
                    w: 45.0,
                    h: 12.0
                },
                Rect {
                    page: 4,
                    x: 10.0,
                    y: 112.0,
                    w: 25.0,
                    h: 10.0
                },
            ]
        );
    }

    #[test]
    fn only_contributing_runs_are_bounded() {
        let runs = vec![
            GlyphRun::new("End.", 0.0, 0.0, 30.0, 10.0),
            GlyphRun::new("Start", 40.0, 0.0, 30.0, 10.0),
        ];
        let mut line = Line::new(0, 0.0);
        line.push(0, 0.0);
        line.push(1, 0.0);
        let table = LineTable::from_lines([&line]);
        let rects = build_rects(&runs, &[1], &table, 1);
        assert_eq!(rects.len(), 1);
        assert_eq!((rects[0].x, rects[0].w), (40.0, 30.0));
    }

    #[test]
    fn unmapped_runs_get_their_own_rect() {
        let runs = vec![
            GlyphRun::new("a", 0.0, 0.0, 5.0, 5.0),
            GlyphRun::new("b", 10.0, 0.0, 5.0, 5.0),
        ];
        let rects = build_rects(&runs, &[0, 1], &LineTable::default(), 1);
        assert_eq!(rects.len(), 2);
    }
}
