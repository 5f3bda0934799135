//! Flat page records produced by the external transform step.
//!
//! Each input document is the JSON output of the upstream XML transform:
//! a mapping of category name to a list of `{ part, slug, date }` records.
//! Categories only group records in transit; the generator works on the
//! flattened stream.

use crate::utils::json::lowercase_keys;
use serde::Deserialize;
use std::{fs, path::Path, path::PathBuf};
use thiserror::Error;

/// One flat page record. Immutable once parsed; equality is structural.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PageRecord {
    /// Content group tag, joins the record to a config rule
    pub part: String,

    /// URL-path fragment (may be empty)
    pub slug: String,

    /// Free-form date token: ISO 8601, `dd.MM.yyyy`, or empty
    pub date: String,
}

/// Errors from reading or parsing one record document.
///
/// A failing document is isolated by the caller; other documents keep
/// processing.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("failed to read record file `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("record parsing error")]
    Json(#[from] serde_json::Error),
}

/// Parse one record document, flattening all categories in input order.
///
/// Object keys are case-insensitive. Unknown record fields are ignored.
pub fn parse_records(text: &str) -> Result<Vec<PageRecord>, ExtractError> {
    let value: serde_json::Value = serde_json::from_str(text)?;
    let categories: serde_json::Map<String, serde_json::Value> =
        serde_json::from_value(lowercase_keys(value))?;

    let mut records = Vec::new();
    for (_, list) in categories {
        let mut items: Vec<PageRecord> = serde_json::from_value(list)?;
        records.append(&mut items);
    }
    Ok(records)
}

/// Read and parse one record file.
pub fn read_records(path: &Path) -> Result<Vec<PageRecord>, ExtractError> {
    let text = fs::read_to_string(path).map_err(|err| ExtractError::Io(path.to_path_buf(), err))?;
    parse_records(&text)
}
