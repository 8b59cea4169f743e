//! Display tree produced by the block tree builder.

use serde::{Deserialize, Serialize};

pub use crate::model::ListKind;

/// One node of the display tree.
///
/// Every node carries a stable key: the source block id, or for a list
/// container a key derived from its first item's id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DisplayNode {
    /// A heading of level 1-3
    Heading {
        /// Render key
        key: String,
        /// Heading level
        level: u8,
        /// Formatted content (empty when the source had none)
        content: FormattedText,
    },

    /// A paragraph
    Paragraph {
        /// Render key
        key: String,
        /// Formatted content
        content: FormattedText,
    },

    /// A list container synthesized from a run of list items
    List {
        /// Render key
        key: String,
        /// Ordered or unordered
        kind: ListKind,
        /// `ListItem` children in source order
        items: Vec<DisplayNode>,
    },

    /// One list item
    ListItem {
        /// Render key
        key: String,
        /// Formatted content
        content: FormattedText,
    },

    /// A block quote
    Quote {
        /// Render key
        key: String,
        /// Formatted content
        content: FormattedText,
    },

    /// A code listing
    Code {
        /// Render key
        key: String,
        /// Formatted code text
        content: FormattedText,
        /// Language tag, present only when non-empty
        language: Option<String>,
        /// Caption, present only when non-empty
        caption: Option<FormattedText>,
    },

    /// An image
    Image {
        /// Render key
        key: String,
        /// Image URL (empty when the source had no payload)
        url: String,
        /// Accessible text
        alt: String,
        /// Caption, present only when non-empty
        caption: Option<String>,
    },

    /// Placeholder for a block type with no renderer
    Unsupported {
        /// Render key (the block id)
        key: String,
        /// Raw block type
        block_type: String,
    },
}

impl DisplayNode {
    /// The node's render key.
    pub fn key(&self) -> &str {
        match self {
            DisplayNode::Heading { key, .. }
            | DisplayNode::Paragraph { key, .. }
            | DisplayNode::List { key, .. }
            | DisplayNode::ListItem { key, .. }
            | DisplayNode::Quote { key, .. }
            | DisplayNode::Code { key, .. }
            | DisplayNode::Image { key, .. }
            | DisplayNode::Unsupported { key, .. } => key,
        }
    }

    /// Short name of the node kind.
    pub fn kind_name(&self) -> &'static str {
        match self {
            DisplayNode::Heading { .. } => "heading",
            DisplayNode::Paragraph { .. } => "paragraph",
            DisplayNode::List { .. } => "list",
            DisplayNode::ListItem { .. } => "list_item",
            DisplayNode::Quote { .. } => "quote",
            DisplayNode::Code { .. } => "code",
            DisplayNode::Image { .. } => "image",
            DisplayNode::Unsupported { .. } => "unsupported",
        }
    }

    /// Child nodes (list items of a list container).
    pub fn children(&self) -> &[DisplayNode] {
        match self {
            DisplayNode::List { items, .. } => items,
            _ => &[],
        }
    }

    /// Plain text of the node, without markup.
    pub fn plain_text(&self) -> String {
        match self {
            DisplayNode::Heading { content, .. }
            | DisplayNode::Paragraph { content, .. }
            | DisplayNode::ListItem { content, .. }
            | DisplayNode::Quote { content, .. }
            | DisplayNode::Code { content, .. } => content.plain_text(),
            DisplayNode::List { items, .. } => items
                .iter()
                .map(|item| item.plain_text())
                .collect::<Vec<_>>()
                .join("\n"),
            DisplayNode::Image { alt, .. } => alt.clone(),
            DisplayNode::Unsupported { .. } => String::new(),
        }
    }
}

/// Formatted inline content: one keyed node per source span.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormattedText {
    /// Span nodes in source order
    pub spans: Vec<FormattedSpan>,
}

impl FormattedText {
    /// Create empty content.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Check if there is no content.
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// Concatenated plain text.
    pub fn plain_text(&self) -> String {
        self.spans.iter().map(|s| s.node.plain_text()).collect()
    }
}

/// A formatted span keyed by its index in the input sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormattedSpan {
    /// Position of the source span
    pub key: usize,
    /// Wrapped content
    pub node: Inline,
}

/// Inline markup tree for one span.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Inline {
    /// Literal text
    Text {
        /// The text
        text: String,
    },
    /// Hyperlink opening in a new browsing context
    Link {
        /// Target URL
        href: String,
        /// Browsing context (`_blank`)
        target: String,
        /// Link relation hardening the new context
        rel: String,
        /// Link content
        child: Box<Inline>,
    },
    /// Bold
    Strong {
        /// Wrapped content
        child: Box<Inline>,
    },
    /// Italic
    Emphasis {
        /// Wrapped content
        child: Box<Inline>,
    },
    /// Strikethrough
    Strikethrough {
        /// Wrapped content
        child: Box<Inline>,
    },
    /// Underline
    Underline {
        /// Wrapped content
        child: Box<Inline>,
    },
    /// Inline code
    Code {
        /// Wrapped content
        child: Box<Inline>,
    },
    /// Colored container
    Styled {
        /// Fill to apply
        fill: Fill,
        /// Wrapped content
        child: Box<Inline>,
    },
}

impl Inline {
    /// Create a text leaf.
    pub fn text(text: impl Into<String>) -> Self {
        Inline::Text { text: text.into() }
    }

    /// The directly wrapped node, or `None` for a text leaf.
    pub fn child(&self) -> Option<&Inline> {
        match self {
            Inline::Text { .. } => None,
            Inline::Link { child, .. }
            | Inline::Strong { child }
            | Inline::Emphasis { child }
            | Inline::Strikethrough { child }
            | Inline::Underline { child }
            | Inline::Code { child }
            | Inline::Styled { child, .. } => Some(child),
        }
    }

    /// Plain text at the leaf.
    pub fn plain_text(&self) -> String {
        let mut node = self;
        while let Some(child) = node.child() {
            node = child;
        }
        match node {
            Inline::Text { text } => text.clone(),
            _ => String::new(),
        }
    }

    /// Wrapper names from outermost to innermost, ending with `"text"`.
    pub fn layer_names(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        let mut node = Some(self);
        while let Some(current) = node {
            names.push(match current {
                Inline::Text { .. } => "text",
                Inline::Link { .. } => "link",
                Inline::Strong { .. } => "strong",
                Inline::Emphasis { .. } => "emphasis",
                Inline::Strikethrough { .. } => "strikethrough",
                Inline::Underline { .. } => "underline",
                Inline::Code { .. } => "code",
                Inline::Styled { .. } => "styled",
            });
            node = current.child();
        }
        names
    }
}

/// Color fill of a styled container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "fill", content = "color", rename_all = "snake_case")]
pub enum Fill {
    /// Text color
    Foreground(String),
    /// Background color
    Background(String),
}

impl Fill {
    /// CSS declaration for this fill.
    pub fn css(&self) -> String {
        match self {
            Fill::Foreground(color) => format!("color: {}", color),
            Fill::Background(color) => format!("background-color: {}", color),
        }
    }
}
