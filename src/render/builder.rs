//! Block tree building: flat block records to a nested display tree.
//!
//! The source content model stores a list as a run of independent sibling
//! items. The builder walks the records once, left to right, and at each
//! position either consumes a maximal run of same-kind list items into one
//! synthesized list container, or dispatches a single block to its
//! per-type renderer. Partial records produce no output.
//!
//! # Example
//!
//! ```
//! use unnotion::model::{Block, Span};
//! use unnotion::render::{build, DisplayNode};
//!
//! let blocks = vec![
//!     Block::paragraph("p", vec![Span::text("Intro")]),
//!     Block::bulleted("a", vec![Span::text("one")]),
//!     Block::bulleted("b", vec![Span::text("two")]),
//! ];
//!
//! let nodes = build(&blocks);
//! assert_eq!(nodes.len(), 2);
//! assert!(matches!(nodes[1], DisplayNode::List { .. }));
//! ```

use crate::model::{Block, BlockKind, Completeness, ListKind, TextPayload};

use super::node::{DisplayNode, FormattedText};
use super::rich_text::{flatten, format};

/// Build the display tree for a record sequence.
pub fn build<R: Completeness>(records: &[R]) -> Vec<DisplayNode> {
    let nodes: Vec<DisplayNode> = BlockTreeBuilder::new(records).collect();
    log::debug!(
        "Built {} display nodes from {} records",
        nodes.len(),
        records.len()
    );
    nodes
}

/// Iterator yielding one top-level display node per step.
///
/// The only state is the cursor; a list run is consumed entirely within
/// a single call to `next`.
pub struct BlockTreeBuilder<'a, R> {
    records: &'a [R],
    cursor: usize,
}

impl<'a, R: Completeness> BlockTreeBuilder<'a, R> {
    /// Create a builder over a record sequence.
    pub fn new(records: &'a [R]) -> Self {
        Self { records, cursor: 0 }
    }

    /// Current position in the record sequence.
    pub fn position(&self) -> usize {
        self.cursor
    }

    /// Check if every record has been consumed.
    pub fn is_done(&self) -> bool {
        self.cursor >= self.records.len()
    }

    /// Consume the maximal run of `kind` list items starting at the cursor.
    fn take_list_run(&mut self, first: &Block, kind: ListKind) -> DisplayNode {
        let records = self.records;
        let items: Vec<DisplayNode> = records[self.cursor..]
            .iter()
            .map_while(|record| {
                record
                    .as_full()
                    .filter(|block| block.kind.list_kind() == Some(kind))
            })
            .map(render_list_item)
            .collect();

        self.cursor += items.len();

        DisplayNode::List {
            key: format!("{}-{}", kind.key_prefix(), first.id),
            kind,
            items,
        }
    }
}

impl<R: Completeness> Iterator for BlockTreeBuilder<'_, R> {
    type Item = DisplayNode;

    fn next(&mut self) -> Option<Self::Item> {
        let records = self.records;
        loop {
            let record = records.get(self.cursor)?;

            let Some(block) = record.as_full() else {
                log::warn!(
                    "Encountered a partial block (ID: {}). Skipping rendering.",
                    record.id()
                );
                self.cursor += 1;
                continue;
            };

            if let Some(kind) = block.kind.list_kind() {
                return Some(self.take_list_run(block, kind));
            }

            self.cursor += 1;
            return Some(render_block(block));
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.records.len().saturating_sub(self.cursor);
        (0, Some(remaining))
    }
}

/// Render a single non-list block.
///
/// List item blocks reaching this function render as a bare list item;
/// the builder never routes them here.
pub fn render_block(block: &Block) -> DisplayNode {
    let key = block.id.clone();

    match &block.kind {
        BlockKind::Heading1(payload)
        | BlockKind::Heading2(payload)
        | BlockKind::Heading3(payload) => DisplayNode::Heading {
            key,
            level: block.kind.heading_level().unwrap_or(1),
            content: text_content(payload),
        },
        BlockKind::Paragraph(payload) => DisplayNode::Paragraph {
            key,
            content: text_content(payload),
        },
        BlockKind::Quote(payload) => DisplayNode::Quote {
            key,
            content: text_content(payload),
        },
        BlockKind::BulletedListItem(payload) | BlockKind::NumberedListItem(payload) => {
            DisplayNode::ListItem {
                key,
                content: text_content(payload),
            }
        }
        BlockKind::Code(payload) => match payload {
            Some(code) => DisplayNode::Code {
                key,
                content: format(Some(&code.spans)).unwrap_or_default(),
                language: code
                    .language
                    .as_deref()
                    .filter(|lang| !lang.is_empty())
                    .map(str::to_string),
                caption: code
                    .caption
                    .as_deref()
                    .filter(|caption| !caption.is_empty())
                    .and_then(|caption| format(Some(caption))),
            },
            None => DisplayNode::Code {
                key,
                content: FormattedText::empty(),
                language: None,
                caption: None,
            },
        },
        BlockKind::Image(payload) => {
            let (url, alt) = match payload {
                Some(image) => (image.source.url.clone(), flatten(image.caption.as_deref())),
                None => (String::new(), String::new()),
            };
            let caption = (!alt.is_empty()).then(|| alt.clone());
            DisplayNode::Image {
                key,
                url,
                alt,
                caption,
            }
        }
        BlockKind::Unsupported(raw) => DisplayNode::Unsupported {
            key,
            block_type: raw.clone(),
        },
    }
}

/// Render one list item block.
pub fn render_list_item(block: &Block) -> DisplayNode {
    DisplayNode::ListItem {
        key: block.id.clone(),
        content: format(block.kind.spans()).unwrap_or_default(),
    }
}

fn text_content(payload: &Option<TextPayload>) -> FormattedText {
    format(payload.as_ref().map(|p| p.spans.as_slice())).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BlockRecord, CodePayload, ImagePayload, Span};

    #[test]
    fn test_empty_input() {
        let blocks: Vec<Block> = Vec::new();
        assert!(build(&blocks).is_empty());
    }

    #[test]
    fn test_list_grouping() {
        let blocks = vec![
            Block::paragraph("p", vec![Span::text("P")]),
            Block::bulleted("l1", vec![Span::text("one")]),
            Block::bulleted("l2", vec![Span::text("two")]),
            Block::numbered("l3", vec![Span::text("three")]),
        ];

        let nodes = build(&blocks);
        assert_eq!(nodes.len(), 3);
        assert!(matches!(nodes[0], DisplayNode::Paragraph { .. }));

        match &nodes[1] {
            DisplayNode::List { key, kind, items } => {
                assert_eq!(key, "bulleted-list-l1");
                assert_eq!(*kind, ListKind::Unordered);
                let keys: Vec<&str> = items.iter().map(|i| i.key()).collect();
                assert_eq!(keys, vec!["l1", "l2"]);
            }
            other => panic!("expected list, got {:?}", other),
        }

        match &nodes[2] {
            DisplayNode::List { key, kind, items } => {
                assert_eq!(key, "numbered-list-l3");
                assert_eq!(*kind, ListKind::Ordered);
                assert_eq!(items.len(), 1);
            }
            other => panic!("expected list, got {:?}", other),
        }
    }

    #[test]
    fn test_list_run_stops_at_partial() {
        let records = vec![
            BlockRecord::Full(Block::bulleted("a", vec![])),
            BlockRecord::Partial { id: "x".into() },
            BlockRecord::Full(Block::bulleted("b", vec![])),
        ];

        let nodes = build(&records);
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0].key(), "bulleted-list-a");
        assert_eq!(nodes[1].key(), "bulleted-list-b");
    }

    #[test]
    fn test_iterator_advances_past_run() {
        let blocks = vec![
            Block::numbered("a", vec![]),
            Block::numbered("b", vec![]),
            Block::quote("q", vec![]),
        ];
        let mut builder = BlockTreeBuilder::new(&blocks);

        assert!(builder.next().is_some());
        assert_eq!(builder.position(), 2);
        assert!(builder.next().is_some());
        assert!(builder.is_done());
        assert!(builder.next().is_none());
    }

    #[test]
    fn test_code_language_and_caption() {
        let block = Block::code(
            "c",
            CodePayload::new(vec![Span::text("fn main() {}")])
                .with_language("rust")
                .with_caption(vec![Span::italic("entry point")]),
        );
        match render_block(&block) {
            DisplayNode::Code {
                content,
                language,
                caption,
                ..
            } => {
                assert_eq!(content.plain_text(), "fn main() {}");
                assert_eq!(language.as_deref(), Some("rust"));
                assert_eq!(caption.map(|c| c.plain_text()).as_deref(), Some("entry point"));
            }
            other => panic!("expected code, got {:?}", other),
        }
    }

    #[test]
    fn test_code_empty_language_and_caption_omitted() {
        let block = Block::code(
            "c",
            CodePayload::new(vec![Span::text("x")])
                .with_language("")
                .with_caption(vec![]),
        );
        match render_block(&block) {
            DisplayNode::Code {
                language, caption, ..
            } => {
                assert!(language.is_none());
                assert!(caption.is_none());
            }
            other => panic!("expected code, got {:?}", other),
        }
    }

    #[test]
    fn test_image_alt_and_caption() {
        let block = Block::image(
            "i",
            ImagePayload::file("https://files.example/cat.png")
                .with_caption(vec![Span::bold("A "), Span::text("cat")]),
        );
        assert_eq!(
            render_block(&block),
            DisplayNode::Image {
                key: "i".into(),
                url: "https://files.example/cat.png".into(),
                alt: "A cat".into(),
                caption: Some("A cat".into()),
            }
        );

        let bare = Block::image("j", ImagePayload::external("https://example.com/x.png"));
        match render_block(&bare) {
            DisplayNode::Image { alt, caption, .. } => {
                assert_eq!(alt, "");
                assert!(caption.is_none());
            }
            other => panic!("expected image, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_payloads_render_empty_containers() {
        let blocks = vec![
            Block::new("p", BlockKind::Paragraph(None)),
            Block::new("q", BlockKind::Quote(None)),
            Block::new("c", BlockKind::Code(None)),
            Block::new("i", BlockKind::Image(None)),
        ];
        let nodes = build(&blocks);
        assert_eq!(nodes.len(), 4);
        assert!(nodes.iter().all(|n| n.plain_text().is_empty()));
    }

    #[test]
    fn test_unsupported_placeholder() {
        let node = render_block(&Block::unsupported("t", "toggle"));
        assert_eq!(
            node,
            DisplayNode::Unsupported {
                key: "t".into(),
                block_type: "toggle".into(),
            }
        );
    }
}
