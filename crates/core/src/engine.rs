//! Interface to the external PDF engine.
//!
//! The engine decodes pages and computes glyph positions; this crate only
//! consumes its per-page text content and viewport. `PageSource` is the seam,
//! and `PageDump`/`DocumentDump` are a serialized form of the same data
//! (a JSON text-layer dump) that implements it.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::utils::{MATRIX_IDENTITY, Matrix};

/// One text-content item as reported by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextItem {
    #[serde(rename = "str")]
    pub text: String,
    /// Glyph transform, anchored at the baseline.
    pub transform: Matrix,
    /// Advance width in unscaled text space.
    pub width: f64,
}

impl TextItem {
    pub fn new(text: &str, transform: Matrix, width: f64) -> Self {
        Self {
            text: text.to_string(),
            transform,
            width,
        }
    }
}

fn unit_scale() -> f64 {
    1.0
}

/// Page viewport: maps PDF user space to top-left-origin page space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub transform: Matrix,
    pub width: f64,
    pub height: f64,
    #[serde(default = "unit_scale")]
    pub scale: f64,
}

impl Viewport {
    /// Viewport of an unrotated page of the given size at scale 1.0.
    pub fn upright(width: f64, height: f64) -> Self {
        Self {
            transform: (1.0, 0.0, 0.0, -1.0, 0.0, height),
            width,
            height,
            scale: 1.0,
        }
    }

    /// Viewport whose transform is the identity (already in page space).
    pub fn identity(width: f64, height: f64) -> Self {
        Self {
            transform: MATRIX_IDENTITY,
            width,
            height,
            scale: 1.0,
        }
    }

    /// Same viewport at another scale.
    pub fn rescaled(&self, scale: f64) -> Self {
        let ratio = if self.scale == 0.0 {
            scale
        } else {
            scale / self.scale
        };
        let (a, b, c, d, e, f) = self.transform;
        Self {
            transform: (
                a * ratio,
                b * ratio,
                c * ratio,
                d * ratio,
                e * ratio,
                f * ratio,
            ),
            width: self.width * ratio,
            height: self.height * ratio,
            scale,
        }
    }
}

/// Source of one page's text layer.
///
/// Implementations may block on I/O; extraction itself never does.
pub trait PageSource {
    /// Positioned text items of the page, in engine order.
    fn text_content(&self) -> std::result::Result<Vec<TextItem>, EngineError>;

    /// Page viewport at the given scale.
    fn viewport(&self, scale: f64) -> std::result::Result<Viewport, EngineError>;
}

/// Serialized text layer of one page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageDump {
    /// Viewport recorded at scale 1.0.
    pub viewport: Viewport,
    #[serde(default)]
    pub items: Vec<TextItem>,
}

impl PageSource for PageDump {
    fn text_content(&self) -> std::result::Result<Vec<TextItem>, EngineError> {
        Ok(self.items.clone())
    }

    fn viewport(&self, scale: f64) -> std::result::Result<Viewport, EngineError> {
        Ok(self.viewport.rescaled(scale))
    }
}

/// Serialized text layer of a whole document.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DocumentDump {
    pub pages: Vec<PageDump>,
}

impl DocumentDump {
    pub fn from_reader(reader: impl Read) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}
