//! Block JSON parser.

use std::io::Read;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::detect::{detect_shape, looks_like_json, InputShape};
use crate::error::{Error, Result};
use crate::model::{Block, BlockKind, BlockRecord, CodePayload, ImagePayload, Page, TextPayload};

use super::options::ParseOptions;
use super::wire::{WireCodeBlock, WireImageBlock, WireTextBlock};

/// Parser for the content API's block JSON.
pub struct BlockParser {
    value: Value,
    options: ParseOptions,
}

impl BlockParser {
    /// Open a block JSON file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_options(path, ParseOptions::default())
    }

    /// Open a block JSON file with custom options.
    pub fn open_with_options<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Self> {
        let data = std::fs::read(path.as_ref())?;
        Self::from_bytes_with_options(&data, options)
    }

    /// Parse block JSON from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_bytes_with_options(data, ParseOptions::default())
    }

    /// Parse block JSON from bytes with custom options.
    pub fn from_bytes_with_options(data: &[u8], options: ParseOptions) -> Result<Self> {
        if !looks_like_json(data) {
            return Err(Error::UnknownFormat);
        }
        let data = data.strip_prefix(b"\xEF\xBB\xBF".as_slice()).unwrap_or(data);
        let value = serde_json::from_slice(data)?;
        Ok(Self::from_value_with_options(value, options))
    }

    /// Parse block JSON from a string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(json: &str) -> Result<Self> {
        Self::from_bytes(json.as_bytes())
    }

    /// Parse block JSON from a string with custom options.
    pub fn from_str_with_options(json: &str, options: ParseOptions) -> Result<Self> {
        Self::from_bytes_with_options(json.as_bytes(), options)
    }

    /// Parse block JSON from a reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Self::from_reader_with_options(reader, ParseOptions::default())
    }

    /// Parse block JSON from a reader with custom options.
    pub fn from_reader_with_options<R: Read>(mut reader: R, options: ParseOptions) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes_with_options(&data, options)
    }

    /// Wrap an already decoded JSON value.
    pub fn from_value_with_options(value: Value, options: ParseOptions) -> Self {
        Self { value, options }
    }

    /// The detected input shape.
    pub fn shape(&self) -> Result<InputShape> {
        detect_shape(&self.value)
    }

    /// Decode the input into a page.
    pub fn parse(&self) -> Result<Page> {
        let mut page = Page::new();

        let records: &[Value] = match (self.shape()?, &self.value) {
            (InputShape::BlockArray, Value::Array(items)) => items.as_slice(),
            (InputShape::ListResponse, Value::Object(response)) => {
                self.read_cursor(&mut page, response);
                match response.get("results") {
                    Some(Value::Array(items)) => items.as_slice(),
                    _ => &[],
                }
            }
            _ => std::slice::from_ref(&self.value),
        };

        for (index, raw) in records.iter().enumerate() {
            if let Some(record) = self.parse_record(index, raw)? {
                page.add_record(record);
            }
        }

        log::debug!(
            "Parsed {} records ({} partial) from {} inputs",
            page.metadata.block_count,
            page.metadata.partial_count,
            records.len()
        );

        Ok(page)
    }

    fn read_cursor(&self, page: &mut Page, response: &Map<String, Value>) {
        page.metadata.has_more = response
            .get("has_more")
            .and_then(Value::as_bool)
            .unwrap_or(false);
        page.metadata.next_cursor = response
            .get("next_cursor")
            .and_then(Value::as_str)
            .map(str::to_string);

        if page.metadata.has_more {
            log::warn!(
                "Block list is truncated (next cursor: {}). Rendering the first page of results only.",
                page.metadata.next_cursor.as_deref().unwrap_or("none")
            );
        }
    }

    /// Decode one record. `Ok(None)` means the record was skipped.
    fn parse_record(&self, index: usize, raw: &Value) -> Result<Option<BlockRecord>> {
        let Some(object) = raw.as_object() else {
            return self.invalid(index, "record is not an object");
        };
        let Some(id) = object.get("id").and_then(Value::as_str) else {
            return self.invalid(index, "record has no string id");
        };
        let Some(type_name) = object.get("type").and_then(Value::as_str) else {
            return Ok(Some(BlockRecord::Partial { id: id.to_string() }));
        };

        let kind = self.decode_kind(index, id, type_name, object.get(type_name))?;

        Ok(Some(BlockRecord::Full(Block {
            id: id.to_string(),
            kind,
            created_time: timestamp(object.get("created_time")),
            last_edited_time: timestamp(object.get("last_edited_time")),
            has_children: object
                .get("has_children")
                .and_then(Value::as_bool)
                .unwrap_or(false),
        })))
    }

    fn decode_kind(
        &self,
        index: usize,
        id: &str,
        type_name: &str,
        payload: Option<&Value>,
    ) -> Result<BlockKind> {
        let text = |this: &Self| {
            this.decode_payload(index, id, type_name, payload, |wire: WireTextBlock| {
                Ok(TextPayload::from(wire))
            })
        };

        let kind = match type_name {
            "paragraph" => BlockKind::Paragraph(text(self)?),
            "heading_1" => BlockKind::Heading1(text(self)?),
            "heading_2" => BlockKind::Heading2(text(self)?),
            "heading_3" => BlockKind::Heading3(text(self)?),
            "bulleted_list_item" => BlockKind::BulletedListItem(text(self)?),
            "numbered_list_item" => BlockKind::NumberedListItem(text(self)?),
            "quote" => BlockKind::Quote(text(self)?),
            "code" => BlockKind::Code(self.decode_payload(
                index,
                id,
                type_name,
                payload,
                |wire: WireCodeBlock| Ok(CodePayload::from(wire)),
            )?),
            "image" => BlockKind::Image(self.decode_payload(
                index,
                id,
                type_name,
                payload,
                |wire: WireImageBlock| ImagePayload::try_from(wire),
            )?),
            other => BlockKind::Unsupported(other.to_string()),
        };

        Ok(kind)
    }

    /// Decode a payload object; absent or `null` yields `None`.
    fn decode_payload<W, T>(
        &self,
        index: usize,
        id: &str,
        type_name: &str,
        payload: Option<&Value>,
        convert: impl FnOnce(W) -> std::result::Result<T, String>,
    ) -> Result<Option<T>>
    where
        W: DeserializeOwned,
    {
        let Some(value) = payload.filter(|value| !value.is_null()) else {
            return Ok(None);
        };

        let decoded = W::deserialize(value)
            .map_err(|e| e.to_string())
            .and_then(convert);

        match decoded {
            Ok(payload) => Ok(Some(payload)),
            Err(reason) if self.options.is_strict() => Err(Error::InvalidBlock {
                index,
                reason: format!("malformed {} payload: {}", type_name, reason),
            }),
            Err(reason) => {
                log::warn!(
                    "Malformed {} payload in block {} ({}). Rendering it empty.",
                    type_name,
                    id,
                    reason
                );
                Ok(None)
            }
        }
    }

    fn invalid(&self, index: usize, reason: &str) -> Result<Option<BlockRecord>> {
        if self.options.is_strict() {
            return Err(Error::InvalidBlock {
                index,
                reason: reason.to_string(),
            });
        }
        log::warn!("Skipping invalid record at index {}: {}", index, reason);
        Ok(None)
    }
}

fn timestamp(value: Option<&Value>) -> Option<DateTime<Utc>> {
    value.and_then(|value| DateTime::<Utc>::deserialize(value).ok())
}
