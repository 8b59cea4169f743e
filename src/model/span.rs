//! Inline text types.

use serde::{Deserialize, Serialize};

/// Suffix marking a color as a background fill (e.g. `"red_background"`).
pub const BACKGROUND_SUFFIX: &str = "_background";

/// One run of inline text with uniform annotations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Span {
    /// What kind of inline object produced this run
    #[serde(default)]
    pub kind: SpanKind,

    /// Plain text, used as the fallback and accessible value
    #[serde(default)]
    pub plain_text: String,

    /// Hyperlink target, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_url: Option<String>,

    /// Formatting flags and color
    #[serde(default)]
    pub annotations: Annotations,
}

impl Span {
    /// Create a plain text span.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            kind: SpanKind::Text,
            plain_text: text.into(),
            link_url: None,
            annotations: Annotations::default(),
        }
    }

    /// Create a mention span.
    pub fn mention(text: impl Into<String>) -> Self {
        Self {
            kind: SpanKind::Mention,
            ..Self::text(text)
        }
    }

    /// Create an inline equation span.
    pub fn equation(expression: impl Into<String>) -> Self {
        Self {
            kind: SpanKind::Equation,
            ..Self::text(expression)
        }
    }

    /// Create a bold text span.
    pub fn bold(text: impl Into<String>) -> Self {
        Self::text(text).with_annotations(Annotations {
            bold: true,
            ..Default::default()
        })
    }

    /// Create an italic text span.
    pub fn italic(text: impl Into<String>) -> Self {
        Self::text(text).with_annotations(Annotations {
            italic: true,
            ..Default::default()
        })
    }

    /// Attach a hyperlink.
    pub fn with_link(mut self, url: impl Into<String>) -> Self {
        self.link_url = Some(url.into());
        self
    }

    /// Replace the annotations.
    pub fn with_annotations(mut self, annotations: Annotations) -> Self {
        self.annotations = annotations;
        self
    }

    /// Check if this span carries no text.
    pub fn is_empty(&self) -> bool {
        self.plain_text.is_empty()
    }
}

/// Kind of inline object.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpanKind {
    /// Regular text
    #[default]
    Text,
    /// A mention of a user, page, date, or database
    Mention,
    /// An inline equation
    Equation,
}

impl SpanKind {
    /// Map a wire discriminant to a span kind. Unknown kinds fall back to text.
    pub fn from_type_name(name: &str) -> Self {
        match name {
            "mention" => SpanKind::Mention,
            "equation" => SpanKind::Equation,
            _ => SpanKind::Text,
        }
    }
}

/// Formatting flags attached to a span.
///
/// Every field defaults, so a partially populated record still decodes
/// into a complete set of flags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Annotations {
    /// Bold text
    pub bold: bool,

    /// Italic text
    pub italic: bool,

    /// Strikethrough text
    pub strikethrough: bool,

    /// Underlined text
    pub underline: bool,

    /// Inline code
    pub code: bool,

    /// Foreground or background color
    pub color: Color,
}

impl Annotations {
    /// Check if any flag or a non-default color is set.
    pub fn has_styling(&self) -> bool {
        self.bold
            || self.italic
            || self.strikethrough
            || self.underline
            || self.code
            || !self.color.is_default()
    }
}

/// Span color.
///
/// Parsed from the raw color name: `"default"` means no color,
/// `"<name>_background"` is a background fill, anything else a
/// foreground fill. Serializes back to the raw name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Color {
    /// No color applied
    #[default]
    Default,
    /// Text color
    Foreground(String),
    /// Highlight color
    Background(String),
}

impl Color {
    /// Parse a raw color name.
    pub fn parse(raw: &str) -> Self {
        if raw.is_empty() || raw == "default" {
            return Color::Default;
        }
        match raw.strip_suffix(BACKGROUND_SUFFIX) {
            Some(name) => Color::Background(name.to_string()),
            None => Color::Foreground(raw.to_string()),
        }
    }

    /// Check if this is the default (uncolored) value.
    pub fn is_default(&self) -> bool {
        matches!(self, Color::Default)
    }

    /// The raw color name as it appears on the wire.
    pub fn as_raw(&self) -> String {
        match self {
            Color::Default => "default".to_string(),
            Color::Foreground(name) => name.clone(),
            Color::Background(name) => format!("{}{}", name, BACKGROUND_SUFFIX),
        }
    }
}

impl From<String> for Color {
    fn from(raw: String) -> Self {
        Color::parse(&raw)
    }
}

impl From<&str> for Color {
    fn from(raw: &str) -> Self {
        Color::parse(raw)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.as_raw()
    }
}
