//! JSON rendering of the display tree.

use serde::Serialize;

use crate::error::{Error, Result};
use crate::model::{Page, PageMetadata};

use super::builder::build;
use super::node::DisplayNode;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

#[derive(Serialize)]
struct JsonPage<'a> {
    metadata: &'a PageMetadata,
    nodes: Vec<DisplayNode>,
}

/// Convert a page to JSON: its metadata plus the display tree.
pub fn to_json(page: &Page, format: JsonFormat) -> Result<String> {
    let output = JsonPage {
        metadata: &page.metadata,
        nodes: build(&page.blocks),
    };

    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(&output),
        JsonFormat::Compact => serde_json::to_string(&output),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Block, Span};

    #[test]
    fn test_to_json_pretty() {
        let mut page = Page::new();
        page.metadata.title = Some("Test".to_string());
        page.add_block(Block::bulleted("a", vec![Span::text("Hello")]));

        let json = to_json(&page, JsonFormat::Pretty).unwrap();
        assert!(json.contains("\"title\""));
        assert!(json.contains("\"bulleted-list-a\""));
        assert!(json.contains('\n'));
    }

    #[test]
    fn test_to_json_compact() {
        let mut page = Page::new();
        page.add_block(Block::paragraph("p", vec![Span::text("x")]));

        let json = to_json(&page, JsonFormat::Compact).unwrap();
        assert!(!json.contains('\n'));

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["nodes"][0]["type"], "paragraph");
        assert_eq!(value["nodes"][0]["key"], "p");
    }
}
