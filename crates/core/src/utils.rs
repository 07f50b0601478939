//! Miscellaneous routines shared by the layout stages.
//!
//! Provides:
//! - Affine matrix type and composition (the PDF engine's 2x3 transforms)
//! - Small numeric helpers (mean, percentile)

use ordered_float::OrderedFloat;

/// A 2D point (x, y).
pub type Point = (f64, f64);

/// A 6-element affine transformation matrix (a, b, c, d, e, f).
/// Transforms point (x, y) to (ax + cy + e, bx + dy + f).
pub type Matrix = (f64, f64, f64, f64, f64, f64);

/// Identity transformation matrix.
pub const MATRIX_IDENTITY: Matrix = (1.0, 0.0, 0.0, 1.0, 0.0, 0.0);

/// Composes two matrices: the result applies `inner` first, then `outer`.
///
/// This is the composition the PDF engine uses to place a text item in
/// viewport space: `mult_matrix(viewport.transform, item.transform)`.
pub fn mult_matrix(outer: Matrix, inner: Matrix) -> Matrix {
    let (a1, b1, c1, d1, e1, f1) = outer;
    let (a2, b2, c2, d2, e2, f2) = inner;
    (
        a1 * a2 + c1 * b2,
        b1 * a2 + d1 * b2,
        a1 * c2 + c1 * d2,
        b1 * c2 + d1 * d2,
        a1 * e2 + c1 * f2 + e1,
        b1 * e2 + d1 * f2 + f1,
    )
}

/// Applies a matrix to a point.
pub fn apply_matrix_pt(m: Matrix, v: Point) -> Point {
    let (a, b, c, d, e, f) = m;
    let (x, y) = v;
    (a * x + c * y + e, b * x + d * y + f)
}

/// Arithmetic mean, or `None` for an empty input.
pub fn mean(values: impl IntoIterator<Item = f64>) -> Option<f64> {
    let mut sum = 0.0;
    let mut count = 0usize;
    for v in values {
        sum += v;
        count += 1;
    }
    (count > 0).then(|| sum / count as f64)
}

/// Nearest-rank percentile of `values` for `q` in [0, 1].
///
/// Returns `None` for an empty input.
pub fn percentile(values: &[f64], q: f64) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by_key(|v| OrderedFloat(*v));
    let rank = (q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64).floor() as usize;
    Some(sorted[rank])
}
