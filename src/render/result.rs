//! Rendering result with metadata and statistics.

use crate::model::PageMetadata;
use serde::{Deserialize, Serialize};

use super::node::DisplayNode;

/// Result of rendering a page, including content and statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderResult {
    /// The rendered content (Markdown, HTML, etc.)
    pub content: String,

    /// Page metadata (copied from the source page)
    pub metadata: PageMetadata,

    /// Rendering statistics
    pub stats: RenderStats,
}

impl RenderResult {
    /// Create a new render result.
    pub fn new(content: String, metadata: PageMetadata, stats: RenderStats) -> Self {
        Self {
            content,
            metadata,
            stats,
        }
    }

    /// Create a simple result with just content.
    pub fn content_only(content: String) -> Self {
        Self {
            content,
            metadata: PageMetadata::default(),
            stats: RenderStats::default(),
        }
    }

    /// Get the content length in bytes.
    pub fn content_len(&self) -> usize {
        self.content.len()
    }
}

/// Statistics collected from a display tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderStats {
    /// Number of headings
    pub heading_count: u32,

    /// Number of paragraphs
    pub paragraph_count: u32,

    /// Number of synthesized list containers
    pub list_count: u32,

    /// Number of list items across all lists
    pub list_item_count: u32,

    /// Number of quotes
    pub quote_count: u32,

    /// Number of code blocks
    pub code_count: u32,

    /// Number of images
    pub image_count: u32,

    /// Number of unsupported block placeholders
    pub unsupported_count: u32,

    /// Approximate word count (whitespace-separated tokens)
    pub word_count: u32,

    /// Character count (excluding whitespace)
    pub char_count: u32,
}

impl RenderStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count node kinds and text in a display tree.
    pub fn from_nodes(nodes: &[DisplayNode]) -> Self {
        let mut stats = Self::new();
        for node in nodes {
            stats.add_node(node);
        }
        stats
    }

    /// Count one node and its children.
    pub fn add_node(&mut self, node: &DisplayNode) {
        match node {
            DisplayNode::Heading { .. } => self.heading_count += 1,
            DisplayNode::Paragraph { .. } => self.paragraph_count += 1,
            DisplayNode::List { items, .. } => {
                self.list_count += 1;
                self.list_item_count += items.len() as u32;
            }
            DisplayNode::ListItem { .. } => self.list_item_count += 1,
            DisplayNode::Quote { .. } => self.quote_count += 1,
            DisplayNode::Code { .. } => self.code_count += 1,
            DisplayNode::Image { .. } => self.image_count += 1,
            DisplayNode::Unsupported { .. } => self.unsupported_count += 1,
        }
        self.count_text(&node.plain_text());
    }

    /// Add word and character counts from text.
    pub fn count_text(&mut self, text: &str) {
        self.word_count += text.split_whitespace().count() as u32;
        self.char_count += text.chars().filter(|c| !c.is_whitespace()).count() as u32;
    }

    /// Total number of top-level and nested nodes counted.
    pub fn node_count(&self) -> u32 {
        self.heading_count
            + self.paragraph_count
            + self.list_count
            + self.list_item_count
            + self.quote_count
            + self.code_count
            + self.image_count
            + self.unsupported_count
    }

    /// Merge another stats instance into this one.
    pub fn merge(&mut self, other: &RenderStats) {
        self.heading_count += other.heading_count;
        self.paragraph_count += other.paragraph_count;
        self.list_count += other.list_count;
        self.list_item_count += other.list_item_count;
        self.quote_count += other.quote_count;
        self.code_count += other.code_count;
        self.image_count += other.image_count;
        self.unsupported_count += other.unsupported_count;
        self.word_count += other.word_count;
        self.char_count += other.char_count;
    }
}
