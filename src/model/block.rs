//! Block-level types.

use super::Span;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One content unit of a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// Identifier, unique within a page and used as the render key
    pub id: String,

    /// Block type and its payload
    pub kind: BlockKind,

    /// Creation time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_time: Option<DateTime<Utc>>,

    /// Last edit time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_edited_time: Option<DateTime<Utc>>,

    /// Whether the source reports nested children (not rendered)
    #[serde(default)]
    pub has_children: bool,
}

impl Block {
    /// Create a block with the given id and kind.
    pub fn new(id: impl Into<String>, kind: BlockKind) -> Self {
        Self {
            id: id.into(),
            kind,
            created_time: None,
            last_edited_time: None,
            has_children: false,
        }
    }

    /// Create a paragraph block.
    pub fn paragraph(id: impl Into<String>, spans: Vec<Span>) -> Self {
        Self::new(id, BlockKind::Paragraph(Some(TextPayload::new(spans))))
    }

    /// Create a heading block. Levels outside 1..=3 are clamped.
    pub fn heading(id: impl Into<String>, level: u8, spans: Vec<Span>) -> Self {
        let payload = Some(TextPayload::new(spans));
        let kind = match level.clamp(1, 3) {
            1 => BlockKind::Heading1(payload),
            2 => BlockKind::Heading2(payload),
            _ => BlockKind::Heading3(payload),
        };
        Self::new(id, kind)
    }

    /// Create a bulleted list item block.
    pub fn bulleted(id: impl Into<String>, spans: Vec<Span>) -> Self {
        Self::new(id, BlockKind::BulletedListItem(Some(TextPayload::new(spans))))
    }

    /// Create a numbered list item block.
    pub fn numbered(id: impl Into<String>, spans: Vec<Span>) -> Self {
        Self::new(id, BlockKind::NumberedListItem(Some(TextPayload::new(spans))))
    }

    /// Create a quote block.
    pub fn quote(id: impl Into<String>, spans: Vec<Span>) -> Self {
        Self::new(id, BlockKind::Quote(Some(TextPayload::new(spans))))
    }

    /// Create a code block.
    pub fn code(id: impl Into<String>, payload: CodePayload) -> Self {
        Self::new(id, BlockKind::Code(Some(payload)))
    }

    /// Create an image block.
    pub fn image(id: impl Into<String>, payload: ImagePayload) -> Self {
        Self::new(id, BlockKind::Image(Some(payload)))
    }

    /// Create a block of a type this crate does not render.
    pub fn unsupported(id: impl Into<String>, raw_type: impl Into<String>) -> Self {
        Self::new(id, BlockKind::Unsupported(raw_type.into()))
    }

    /// The wire discriminant of this block.
    pub fn type_name(&self) -> &str {
        self.kind.type_name()
    }

    /// Spans carried by this block's text payload, if any.
    pub fn spans(&self) -> Option<&[Span]> {
        self.kind.spans()
    }

    /// Check if the block's type-specific payload is present.
    pub fn has_payload(&self) -> bool {
        match &self.kind {
            BlockKind::Paragraph(p)
            | BlockKind::Heading1(p)
            | BlockKind::Heading2(p)
            | BlockKind::Heading3(p)
            | BlockKind::BulletedListItem(p)
            | BlockKind::NumberedListItem(p)
            | BlockKind::Quote(p) => p.is_some(),
            BlockKind::Code(p) => p.is_some(),
            BlockKind::Image(p) => p.is_some(),
            BlockKind::Unsupported(_) => false,
        }
    }
}

/// Block type with its payload.
///
/// A `None` payload means the source omitted it or it could not be decoded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum BlockKind {
    /// A paragraph
    #[serde(rename = "paragraph")]
    Paragraph(Option<TextPayload>),
    /// A level-1 heading
    #[serde(rename = "heading_1")]
    Heading1(Option<TextPayload>),
    /// A level-2 heading
    #[serde(rename = "heading_2")]
    Heading2(Option<TextPayload>),
    /// A level-3 heading
    #[serde(rename = "heading_3")]
    Heading3(Option<TextPayload>),
    /// An item of an unordered list
    #[serde(rename = "bulleted_list_item")]
    BulletedListItem(Option<TextPayload>),
    /// An item of an ordered list
    #[serde(rename = "numbered_list_item")]
    NumberedListItem(Option<TextPayload>),
    /// A block quote
    #[serde(rename = "quote")]
    Quote(Option<TextPayload>),
    /// A code listing
    #[serde(rename = "code")]
    Code(Option<CodePayload>),
    /// An image
    #[serde(rename = "image")]
    Image(Option<ImagePayload>),
    /// Any other block type, carrying its raw discriminant
    #[serde(rename = "unsupported")]
    Unsupported(String),
}

impl BlockKind {
    /// The wire discriminant (e.g. `"heading_1"`).
    pub fn type_name(&self) -> &str {
        match self {
            BlockKind::Paragraph(_) => "paragraph",
            BlockKind::Heading1(_) => "heading_1",
            BlockKind::Heading2(_) => "heading_2",
            BlockKind::Heading3(_) => "heading_3",
            BlockKind::BulletedListItem(_) => "bulleted_list_item",
            BlockKind::NumberedListItem(_) => "numbered_list_item",
            BlockKind::Quote(_) => "quote",
            BlockKind::Code(_) => "code",
            BlockKind::Image(_) => "image",
            BlockKind::Unsupported(raw) => raw,
        }
    }

    /// Heading level (1-3) for heading blocks.
    pub fn heading_level(&self) -> Option<u8> {
        match self {
            BlockKind::Heading1(_) => Some(1),
            BlockKind::Heading2(_) => Some(2),
            BlockKind::Heading3(_) => Some(3),
            _ => None,
        }
    }

    /// List kind for list item blocks.
    pub fn list_kind(&self) -> Option<ListKind> {
        match self {
            BlockKind::BulletedListItem(_) => Some(ListKind::Unordered),
            BlockKind::NumberedListItem(_) => Some(ListKind::Ordered),
            _ => None,
        }
    }

    /// Spans carried by the payload, if the payload is present.
    pub fn spans(&self) -> Option<&[Span]> {
        match self {
            BlockKind::Paragraph(p)
            | BlockKind::Heading1(p)
            | BlockKind::Heading2(p)
            | BlockKind::Heading3(p)
            | BlockKind::BulletedListItem(p)
            | BlockKind::NumberedListItem(p)
            | BlockKind::Quote(p) => p.as_ref().map(|p| p.spans.as_slice()),
            BlockKind::Code(p) => p.as_ref().map(|p| p.spans.as_slice()),
            BlockKind::Image(_) | BlockKind::Unsupported(_) => None,
        }
    }
}

/// Kind of list a run of list items forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListKind {
    /// Bulleted list
    Unordered,
    /// Numbered list
    Ordered,
}

impl ListKind {
    /// Prefix used when deriving a list container key.
    pub fn key_prefix(self) -> &'static str {
        match self {
            ListKind::Unordered => "bulleted-list",
            ListKind::Ordered => "numbered-list",
        }
    }
}

/// Payload of paragraphs, headings, list items, and quotes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextPayload {
    /// Inline text
    #[serde(default)]
    pub spans: Vec<Span>,
}

impl TextPayload {
    /// Create a payload from spans.
    pub fn new(spans: Vec<Span>) -> Self {
        Self { spans }
    }
}

/// Payload of a code block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CodePayload {
    /// Code text
    #[serde(default)]
    pub spans: Vec<Span>,

    /// Language name (e.g. "rust")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    /// Caption text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<Vec<Span>>,
}

impl CodePayload {
    /// Create a code payload from spans.
    pub fn new(spans: Vec<Span>) -> Self {
        Self {
            spans,
            language: None,
            caption: None,
        }
    }

    /// Set the language.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Set the caption.
    pub fn with_caption(mut self, caption: Vec<Span>) -> Self {
        self.caption = Some(caption);
        self
    }
}

/// Payload of an image block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImagePayload {
    /// Where the image lives
    pub source: ImageSource,

    /// Caption text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<Vec<Span>>,
}

impl ImagePayload {
    /// Create an image payload pointing at an external URL.
    pub fn external(url: impl Into<String>) -> Self {
        Self {
            source: ImageSource::new(SourceKind::External, url),
            caption: None,
        }
    }

    /// Create an image payload pointing at a hosted file.
    pub fn file(url: impl Into<String>) -> Self {
        Self {
            source: ImageSource::new(SourceKind::File, url),
            caption: None,
        }
    }

    /// Set the caption.
    pub fn with_caption(mut self, caption: Vec<Span>) -> Self {
        self.caption = Some(caption);
        self
    }
}

/// Image location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageSource {
    /// Hosting kind
    pub kind: SourceKind,

    /// Image URL
    pub url: String,

    /// Expiry of a hosted file URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_time: Option<DateTime<Utc>>,
}

impl ImageSource {
    /// Create a new image source.
    pub fn new(kind: SourceKind, url: impl Into<String>) -> Self {
        Self {
            kind,
            url: url.into(),
            expiry_time: None,
        }
    }

    /// Check if a hosted file URL has expired at the given instant.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expiry_time.is_some_and(|expiry| expiry <= now)
    }
}

/// Image hosting kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Linked from an external URL
    External,
    /// Uploaded and hosted by the content service
    File,
}

/// A record as returned by the content source.
///
/// The source may return reference stubs instead of full blocks; those
/// are kept as `Partial` so the builder can omit them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "record", rename_all = "snake_case")]
pub enum BlockRecord {
    /// A fully populated block
    Full(Block),
    /// A stub carrying only the id
    Partial {
        /// Block id
        id: String,
    },
}

impl From<Block> for BlockRecord {
    fn from(block: Block) -> Self {
        BlockRecord::Full(block)
    }
}

/// Predicate telling full records apart from partial stubs.
pub trait Completeness {
    /// Record id.
    fn id(&self) -> &str;

    /// The full block, or `None` for a partial record.
    fn as_full(&self) -> Option<&Block>;

    /// Check if the record is fully populated.
    fn is_full(&self) -> bool {
        self.as_full().is_some()
    }
}

impl Completeness for Block {
    fn id(&self) -> &str {
        &self.id
    }

    fn as_full(&self) -> Option<&Block> {
        Some(self)
    }
}

impl Completeness for BlockRecord {
    fn id(&self) -> &str {
        match self {
            BlockRecord::Full(block) => &block.id,
            BlockRecord::Partial { id } => id,
        }
    }

    fn as_full(&self) -> Option<&Block> {
        match self {
            BlockRecord::Full(block) => Some(block),
            BlockRecord::Partial { .. } => None,
        }
    }
}

impl<T: Completeness + ?Sized> Completeness for &T {
    fn id(&self) -> &str {
        (**self).id()
    }

    fn as_full(&self) -> Option<&Block> {
        (**self).as_full()
    }
}

/// Check if a record is fully populated.
pub fn is_full_block<R: Completeness + ?Sized>(record: &R) -> bool {
    record.is_full()
}
