//! Single-page extraction: engine text layer in, output units out.

use tracing::debug;

use crate::engine::PageSource;
use crate::error::{ExtractError, Result};
use crate::ids::{DocumentId, unit_id};
use crate::layout::{
    GlyphRun, LayoutParams, OutputUnit, PageExtraction, UnitStatus, analyze_runs, build_rects,
    normalize_items, split_watermarks,
};

/// Extracts the output units of one page.
///
/// `page_index` is 0-based; units, rects and ids carry the 1-based page
/// number. Engine failures are propagated as [`ExtractError::Engine`]; a page
/// without text yields an empty result.
pub fn extract_page<S: PageSource + ?Sized>(
    source: &S,
    doc: &DocumentId,
    page_index: usize,
    params: &LayoutParams,
) -> Result<PageExtraction> {
    params.validate()?;

    let viewport = source
        .viewport(1.0)
        .map_err(|e| ExtractError::engine(page_index, e))?;
    let items = source
        .text_content()
        .map_err(|e| ExtractError::engine(page_index, e))?;

    let runs = normalize_items(&items, &viewport);
    debug!(
        page = page_index + 1,
        items = items.len(),
        runs = runs.len(),
        "normalized text content"
    );
    Ok(extract_runs(runs, viewport.width, doc, page_index + 1, params))
}

/// Runs watermark filtering and the layout stages over already normalized
/// runs of the 1-based `page`.
pub fn extract_runs(
    runs: Vec<GlyphRun>,
    page_width: f64,
    doc: &DocumentId,
    page: usize,
    params: &LayoutParams,
) -> PageExtraction {
    let (runs, watermarks) = split_watermarks(runs, params);
    if runs.is_empty() {
        return PageExtraction {
            watermarks,
            ..PageExtraction::empty(page)
        };
    }

    let layout = analyze_runs(runs, page_width, params);
    let units: Vec<OutputUnit> = layout
        .segments(params)
        .into_iter()
        .map(|segment| OutputUnit {
            id: unit_id(doc, page, &segment.text),
            page,
            rects: build_rects(&layout.runs, &segment.glyphs, &layout.line_table, page),
            source: segment.text,
            translation: None,
            status: UnitStatus::Idle,
        })
        .collect();

    debug!(
        page,
        units = units.len(),
        watermarks = watermarks.len(),
        "page extracted"
    );
    PageExtraction {
        page,
        units,
        watermarks,
        writing_mode: layout.mode,
        column_count: layout.columns.count(),
    }
}
