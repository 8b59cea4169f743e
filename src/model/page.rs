//! Page-level types.

use super::{Block, BlockRecord, Completeness};
use crate::render::flatten;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The block sequence of one page, as supplied for a single render pass.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Page {
    /// Page metadata (id, title, retrieval cursor, etc.)
    pub metadata: PageMetadata,

    /// Top-level records in source order
    pub blocks: Vec<BlockRecord>,
}

impl Page {
    /// Create a new empty page.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a page from records.
    pub fn from_records(blocks: Vec<BlockRecord>) -> Self {
        let mut page = Self::new();
        for record in blocks {
            page.add_record(record);
        }
        page
    }

    /// Add a full block.
    pub fn add_block(&mut self, block: Block) {
        self.add_record(BlockRecord::Full(block));
    }

    /// Add a record, keeping the counts in the metadata current.
    pub fn add_record(&mut self, record: BlockRecord) {
        self.metadata.block_count += 1;
        if !record.is_full() {
            self.metadata.partial_count += 1;
        }
        self.blocks.push(record);
    }

    /// Iterate over the fully populated blocks.
    pub fn full_blocks(&self) -> impl Iterator<Item = &Block> {
        self.blocks.iter().filter_map(|record| record.as_full())
    }

    /// Number of records on the page.
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Check if the page has no records.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Get plain text content of the page.
    pub fn plain_text(&self) -> String {
        self.full_blocks()
            .filter_map(|block| {
                let text = match &block.kind {
                    crate::model::BlockKind::Image(Some(image)) => {
                        flatten(image.caption.as_deref())
                    }
                    kind => flatten(kind.spans()),
                };
                (!text.is_empty()).then_some(text)
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// Page metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageMetadata {
    /// Page id
    pub id: Option<String>,

    /// Page title
    pub title: Option<String>,

    /// Canonical page URL
    pub url: Option<String>,

    /// Creation date
    pub created: Option<DateTime<Utc>>,

    /// Last modification date
    pub last_edited: Option<DateTime<Utc>>,

    /// Number of records supplied
    pub block_count: u32,

    /// Number of partial (stub) records among them
    pub partial_count: u32,

    /// Whether the source reported more records than were supplied
    pub has_more: bool,

    /// Cursor for the next batch, if the source reported one
    pub next_cursor: Option<String>,
}

impl PageMetadata {
    /// Create metadata with a title.
    pub fn with_title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Default::default()
        }
    }

    /// Convert metadata to YAML frontmatter format.
    pub fn to_yaml_frontmatter(&self) -> String {
        let mut lines = vec!["---".to_string()];

        if let Some(ref title) = self.title {
            lines.push(format!("title: \"{}\"", escape_yaml(title)));
        }
        if let Some(ref id) = self.id {
            lines.push(format!("id: \"{}\"", escape_yaml(id)));
        }
        if let Some(ref url) = self.url {
            lines.push(format!("url: \"{}\"", escape_yaml(url)));
        }
        if let Some(ref created) = self.created {
            lines.push(format!("created: {}", created.to_rfc3339()));
        }
        if let Some(ref last_edited) = self.last_edited {
            lines.push(format!("last_edited: {}", last_edited.to_rfc3339()));
        }

        lines.push(format!("blocks: {}", self.block_count));
        if self.has_more {
            lines.push("truncated: true".to_string());
        }

        lines.push("---".to_string());
        lines.push(String::new());

        lines.join("\n")
    }
}

/// Escape special characters for YAML strings.
fn escape_yaml(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}
