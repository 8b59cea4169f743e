//! Wire types for the content API's block JSON.
//!
//! These mirror the source's payload objects closely and convert into the
//! model types. Every field is optional on the wire; `null` and absent
//! are treated alike.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

use crate::model::{
    Annotations, CodePayload, Color, ImagePayload, ImageSource, SourceKind, Span, SpanKind,
    TextPayload,
};

/// One rich text item.
#[derive(Debug, Deserialize)]
pub(crate) struct WireRichText {
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default)]
    plain_text: Option<String>,
    #[serde(default)]
    href: Option<String>,
    #[serde(default)]
    annotations: Option<WireAnnotations>,
    #[serde(default)]
    text: Option<WireText>,
}

/// Annotation flags as sent; a `null` flag reads as unset.
#[derive(Debug, Default, Deserialize)]
struct WireAnnotations {
    #[serde(default)]
    bold: Option<bool>,
    #[serde(default)]
    italic: Option<bool>,
    #[serde(default)]
    strikethrough: Option<bool>,
    #[serde(default)]
    underline: Option<bool>,
    #[serde(default)]
    code: Option<bool>,
    #[serde(default)]
    color: Option<String>,
}

impl From<WireAnnotations> for Annotations {
    fn from(wire: WireAnnotations) -> Self {
        Annotations {
            bold: wire.bold.unwrap_or_default(),
            italic: wire.italic.unwrap_or_default(),
            strikethrough: wire.strikethrough.unwrap_or_default(),
            underline: wire.underline.unwrap_or_default(),
            code: wire.code.unwrap_or_default(),
            color: wire.color.as_deref().map(Color::parse).unwrap_or_default(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct WireText {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    link: Option<WireLink>,
}

#[derive(Debug, Deserialize)]
struct WireLink {
    #[serde(default)]
    url: Option<String>,
}

impl From<WireRichText> for Span {
    fn from(wire: WireRichText) -> Self {
        let (content, text_link) = match wire.text {
            Some(text) => (text.content, text.link.and_then(|link| link.url)),
            None => (None, None),
        };

        Span {
            kind: wire
                .kind
                .as_deref()
                .map(SpanKind::from_type_name)
                .unwrap_or_default(),
            plain_text: wire.plain_text.or(content).unwrap_or_default(),
            link_url: text_link.or(wire.href),
            annotations: wire.annotations.map(Annotations::from).unwrap_or_default(),
        }
    }
}

/// Decode rich text items one by one, dropping only the items that fail.
fn spans(items: Option<Vec<Value>>) -> Vec<Span> {
    items
        .unwrap_or_default()
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| {
            match serde_json::from_value::<WireRichText>(item) {
                Ok(wire) => Some(Span::from(wire)),
                Err(e) => {
                    log::warn!("Skipping malformed rich text item {}: {}", index, e);
                    None
                }
            }
        })
        .collect()
}

/// Payload of the text-bearing block types.
#[derive(Debug, Deserialize)]
pub(crate) struct WireTextBlock {
    #[serde(default)]
    rich_text: Option<Vec<Value>>,
}

impl From<WireTextBlock> for TextPayload {
    fn from(wire: WireTextBlock) -> Self {
        TextPayload::new(spans(wire.rich_text))
    }
}

/// Payload of a code block.
#[derive(Debug, Deserialize)]
pub(crate) struct WireCodeBlock {
    #[serde(default)]
    rich_text: Option<Vec<Value>>,
    #[serde(default)]
    language: Option<String>,
    #[serde(default)]
    caption: Option<Vec<Value>>,
}

impl From<WireCodeBlock> for CodePayload {
    fn from(wire: WireCodeBlock) -> Self {
        CodePayload {
            spans: spans(wire.rich_text),
            language: wire.language,
            caption: wire.caption.map(|caption| spans(Some(caption))),
        }
    }
}

/// Payload of an image block.
#[derive(Debug, Deserialize)]
pub(crate) struct WireImageBlock {
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default)]
    external: Option<WireFile>,
    #[serde(default)]
    file: Option<WireFile>,
    #[serde(default)]
    caption: Option<Vec<Value>>,
}

#[derive(Debug, Deserialize)]
struct WireFile {
    url: String,
    #[serde(default)]
    expiry_time: Option<DateTime<Utc>>,
}

impl TryFrom<WireImageBlock> for ImagePayload {
    type Error = String;

    fn try_from(wire: WireImageBlock) -> Result<Self, Self::Error> {
        let (kind, source) = match wire.kind.as_deref() {
            Some("external") => (SourceKind::External, wire.external),
            _ => (SourceKind::File, wire.file),
        };
        let source = source.ok_or_else(|| {
            format!(
                "image source '{}' is missing",
                wire.kind.as_deref().unwrap_or("file")
            )
        })?;

        Ok(ImagePayload {
            source: ImageSource {
                kind,
                url: source.url,
                expiry_time: source.expiry_time,
            },
            caption: wire.caption.map(|caption| spans(Some(caption))),
        })
    }
}
