//! Input shape detection for block JSON.

use crate::error::{Error, Result};
use serde_json::Value;
use std::path::Path;

/// Shape of a block JSON document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputShape {
    /// A bare array of block objects
    BlockArray,
    /// A paginated list response with `results`
    ListResponse,
    /// A single block object
    SingleBlock,
}

impl std::fmt::Display for InputShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            InputShape::BlockArray => "block array",
            InputShape::ListResponse => "list response",
            InputShape::SingleBlock => "single block",
        };
        f.write_str(name)
    }
}

/// UTF-8 byte order mark.
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Check if bytes look like a JSON array or object.
///
/// Only the first significant byte is inspected, after an optional BOM
/// and leading whitespace.
pub fn looks_like_json(data: &[u8]) -> bool {
    let data = data.strip_prefix(UTF8_BOM).unwrap_or(data);
    matches!(
        data.iter().find(|b| !b.is_ascii_whitespace()),
        Some(b'[') | Some(b'{')
    )
}

/// Classify a decoded JSON value.
///
/// # Returns
/// * `Ok(InputShape)` for an array, a list response, or a block object
/// * `Err(Error::UnknownFormat)` for anything else
pub fn detect_shape(value: &Value) -> Result<InputShape> {
    match value {
        Value::Array(_) => Ok(InputShape::BlockArray),
        Value::Object(map) if map.get("results").is_some_and(Value::is_array) => {
            Ok(InputShape::ListResponse)
        }
        Value::Object(map) if map.get("id").is_some_and(Value::is_string) => {
            Ok(InputShape::SingleBlock)
        }
        _ => Err(Error::UnknownFormat),
    }
}

/// Detect the input shape from bytes.
pub fn detect_format_from_bytes(data: &[u8]) -> Result<InputShape> {
    if !looks_like_json(data) {
        return Err(Error::UnknownFormat);
    }
    let data = data.strip_prefix(UTF8_BOM).unwrap_or(data);
    let value: Value = serde_json::from_slice(data)?;
    detect_shape(&value)
}

/// Detect the input shape of a file.
///
/// # Example
/// ```no_run
/// use unnotion::detect::detect_format_from_path;
///
/// let shape = detect_format_from_path("blocks.json").unwrap();
/// println!("Input: {}", shape);
/// ```
pub fn detect_format_from_path<P: AsRef<Path>>(path: P) -> Result<InputShape> {
    let data = std::fs::read(path)?;
    detect_format_from_bytes(&data)
}

/// Check if bytes hold a recognizable block document.
pub fn is_block_json(data: &[u8]) -> bool {
    detect_format_from_bytes(data).is_ok()
}
