//! Output unit types handed to the translation layer and the UI.

use serde::{Deserialize, Serialize};

use super::textline::WritingMode;

/// Highlight rectangle in unscaled page space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// 1-based page number.
    pub page: usize,
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

/// Translation progress of a unit, driven by the translation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitStatus {
    #[default]
    Idle,
    Loading,
    Done,
    Error,
}

/// A paragraph or sentence with its content-derived id and highlight rects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputUnit {
    /// `{docId}:p{pageNumber}:{hashHex}`
    pub id: String,
    /// 1-based page number.
    pub page: usize,
    /// Trimmed, space-joined text.
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translation: Option<String>,
    #[serde(default)]
    pub status: UnitStatus,
    /// One rect per contributing line.
    pub rects: Vec<Rect>,
}

/// Everything extracted from one page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageExtraction {
    /// 1-based page number.
    pub page: usize,
    pub units: Vec<OutputUnit>,
    /// Text of runs removed as watermarks, unique, in first-seen order.
    pub watermarks: Vec<String>,
    pub writing_mode: WritingMode,
    pub column_count: usize,
}

impl PageExtraction {
    /// Result for a page with no usable text.
    pub fn empty(page: usize) -> Self {
        Self {
            page,
            units: Vec::new(),
            watermarks: Vec::new(),
            writing_mode: WritingMode::Horizontal,
            column_count: 1,
        }
    }
}
