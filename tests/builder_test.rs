//! Integration tests for block tree building.

use unnotion::model::{Block, BlockKind, BlockRecord, Span, TextPayload};
use unnotion::render::{build, BlockTreeBuilder, DisplayNode, FormattedText, ListKind};

fn list_keys(node: &DisplayNode) -> Vec<&str> {
    node.children().iter().map(|item| item.key()).collect()
}

#[test]
fn test_mixed_sequence() {
    let records: Vec<BlockRecord> = vec![
        Block::heading("h", 1, vec![Span::text("Title")]).into(),
        Block::bulleted("a", vec![Span::text("A")]).into(),
        Block::bulleted("b", vec![Span::text("B")]).into(),
        Block::paragraph("p", vec![Span::text("Between")]).into(),
        Block::bulleted("c", vec![Span::text("C")]).into(),
        Block::numbered("n1", vec![Span::text("1")]).into(),
        Block::numbered("n2", vec![Span::text("2")]).into(),
    ];

    let nodes = build(&records);
    let keys: Vec<&str> = nodes.iter().map(|n| n.key()).collect();
    assert_eq!(
        keys,
        vec![
            "h",
            "bulleted-list-a",
            "p",
            "bulleted-list-c",
            "numbered-list-n1"
        ]
    );

    assert_eq!(list_keys(&nodes[1]), vec!["a", "b"]);
    assert_eq!(list_keys(&nodes[3]), vec!["c"]);
    assert_eq!(list_keys(&nodes[4]), vec!["n1", "n2"]);
}

#[test]
fn test_adjacent_lists_of_different_kinds_stay_separate() {
    let blocks = vec![
        Block::numbered("1", vec![]),
        Block::bulleted("2", vec![]),
        Block::numbered("3", vec![]),
    ];
    let nodes = build(&blocks);
    let kinds: Vec<ListKind> = nodes
        .iter()
        .map(|n| match n {
            DisplayNode::List { kind, .. } => *kind,
            other => panic!("expected list, got {:?}", other),
        })
        .collect();
    assert_eq!(
        kinds,
        vec![ListKind::Ordered, ListKind::Unordered, ListKind::Ordered]
    );
}

#[test]
fn test_every_full_block_appears_once() {
    let records: Vec<BlockRecord> = vec![
        Block::bulleted("a", vec![]).into(),
        BlockRecord::Partial { id: "gap".into() },
        Block::bulleted("b", vec![]).into(),
        Block::quote("q", vec![]).into(),
        BlockRecord::Partial { id: "tail".into() },
    ];

    let nodes = build(&records);
    let mut seen: Vec<String> = Vec::new();
    for node in &nodes {
        match node {
            DisplayNode::List { items, .. } => {
                seen.extend(items.iter().map(|i| i.key().to_string()))
            }
            other => seen.push(other.key().to_string()),
        }
    }
    assert_eq!(seen, vec!["a", "b", "q"]);
}

#[test]
fn test_only_partials_yields_nothing() {
    let records = vec![
        BlockRecord::Partial { id: "x".into() },
        BlockRecord::Partial { id: "y".into() },
    ];
    let mut builder = BlockTreeBuilder::new(&records);
    assert!(builder.next().is_none());
    assert!(builder.is_done());
}

#[test]
fn test_absent_and_empty_spans_render_alike() {
    let absent = build(&[Block::new("p", BlockKind::Paragraph(None))]);
    let empty = build(&[Block::new(
        "p",
        BlockKind::Paragraph(Some(TextPayload::new(vec![]))),
    )]);
    assert_eq!(absent, empty);
    assert_eq!(
        absent[0],
        DisplayNode::Paragraph {
            key: "p".into(),
            content: FormattedText::empty(),
        }
    );
}

#[test]
fn test_heading_levels() {
    let blocks = vec![
        Block::heading("h1", 1, vec![Span::text("One")]),
        Block::heading("h2", 2, vec![Span::text("Two")]),
        Block::heading("h3", 3, vec![Span::text("Three")]),
    ];
    let levels: Vec<u8> = build(&blocks)
        .iter()
        .map(|n| match n {
            DisplayNode::Heading { level, .. } => *level,
            other => panic!("expected heading, got {:?}", other),
        })
        .collect();
    assert_eq!(levels, vec![1, 2, 3]);
}

#[test]
fn test_unsupported_types_produce_placeholders() {
    let blocks = vec![
        Block::unsupported("d", "divider"),
        Block::unsupported("t", "table_of_contents"),
    ];
    let nodes = build(&blocks);
    assert_eq!(nodes.len(), 2);
    assert!(matches!(
        &nodes[1],
        DisplayNode::Unsupported { key, block_type } if key == "t" && block_type == "table_of_contents"
    ));
}

#[test]
fn test_display_tree_serializes() {
    let nodes = build(&[Block::bulleted("a", vec![Span::bold("x")])]);
    let json = serde_json::to_value(&nodes).unwrap();
    assert_eq!(json[0]["type"], "list");
    assert_eq!(json[0]["key"], "bulleted-list-a");
    assert_eq!(json[0]["items"][0]["type"], "list_item");
}
