//! Stable content-derived identifiers for output units.
//!
//! Unit ids have the form `{docId}:p{pageNumber}:{hashHex}`. The document id
//! is a prefix of the SHA-256 of the file bytes; the text hash is 32-bit
//! FNV-1a over the trimmed source text. The same text on the same page of the
//! same file therefore always gets the same id, whatever its position.

use std::fmt;

use sha2::{Digest, Sha256};

use crate::error::{ExtractError, Result};

/// Hex characters kept from the file digest.
pub const DOC_ID_LEN: usize = 16;

const FNV_OFFSET_BASIS: u32 = 0x811c_9dc5;
const FNV_PRIME: u32 = 0x0100_0193;

/// Identity of a document's exact bytes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentId(String);

impl DocumentId {
    /// Id of a document from its raw file bytes.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let digest = Sha256::digest(bytes);
        let mut hex = hex::encode(digest);
        hex.truncate(DOC_ID_LEN);
        Self(hex)
    }

    /// Wraps an id computed elsewhere, e.g. one stored with cached units.
    ///
    /// The id must be non-empty and must not contain `:`.
    pub fn new(id: impl Into<String>) -> Result<Self> {
        let id = id.into();
        if id.is_empty() || id.contains(':') {
            return Err(ExtractError::InvalidUnitId(format!("bad document id {id:?}")));
        }
        Ok(Self(id))
    }

    /// Document part of a unit id.
    pub fn from_unit_id(unit_id: &str) -> Result<Self> {
        parse_unit_id(unit_id).map(|(doc, _, _)| doc)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 32-bit FNV-1a of the trimmed text as 8 lowercase hex digits.
pub fn text_hash(text: &str) -> String {
    let hash = text
        .trim()
        .bytes()
        .fold(FNV_OFFSET_BASIS, |h, b| (h ^ u32::from(b)).wrapping_mul(FNV_PRIME));
    format!("{hash:08x}")
}

/// Id of the unit with the given source text on a 1-based page.
pub fn unit_id(doc: &DocumentId, page: usize, source: &str) -> String {
    format!("{doc}:p{page}:{}", text_hash(source))
}

/// Splits a unit id into document id, 1-based page number and text hash.
pub fn parse_unit_id(id: &str) -> Result<(DocumentId, usize, String)> {
    let invalid = || ExtractError::InvalidUnitId(id.to_string());

    let mut parts = id.split(':');
    let (Some(doc), Some(page), Some(hash), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(invalid());
    };
    let page: usize = page
        .strip_prefix('p')
        .and_then(|n| n.parse().ok())
        .filter(|&n| n > 0)
        .ok_or_else(invalid)?;
    if doc.is_empty() || hash.is_empty() || !hash.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(invalid());
    }
    Ok((DocumentId(doc.to_string()), page, hash.to_string()))
}
