//! Integration tests for block JSON parsing and end-to-end rendering.

use std::io::Write;

use tempfile::NamedTempFile;
use unnotion::render::{self, DisplayNode, RenderOptions};
use unnotion::{
    parse_file, parse_files, parse_reader, parse_str, parse_str_with_options, BlockParser, Error,
    InputShape, ParseOptions,
};

const PAGE: &str = r#"{
  "object": "list",
  "results": [
    {"object": "block", "id": "h1", "type": "heading_1", "has_children": false,
     "heading_1": {"rich_text": [{"type": "text", "text": {"content": "Release notes", "link": null},
       "annotations": {"bold": false, "italic": false, "strikethrough": false,
                       "underline": false, "code": false, "color": "default"},
       "plain_text": "Release notes", "href": null}], "is_toggleable": false, "color": "default"}},
    {"object": "block", "id": "p1", "type": "paragraph",
     "paragraph": {"rich_text": [
       {"type": "text", "text": {"content": "See ", "link": null}, "plain_text": "See "},
       {"type": "text", "text": {"content": "the docs", "link": {"url": "https://example.com/docs"}},
        "annotations": {"bold": true, "color": "red_background"}, "plain_text": "the docs",
        "href": "https://example.com/docs"}]}},
    {"object": "block", "id": "l1", "type": "bulleted_list_item",
     "bulleted_list_item": {"rich_text": [{"plain_text": "Faster builds"}]}},
    {"object": "block", "id": "l2", "type": "bulleted_list_item",
     "bulleted_list_item": {"rich_text": [{"plain_text": "Fewer bugs"}]}},
    {"object": "block", "id": "gone"},
    {"object": "block", "id": "c1", "type": "code",
     "code": {"rich_text": [{"plain_text": "cargo install unnotion"}], "language": "shell",
              "caption": []}},
    {"object": "block", "id": "d1", "type": "divider", "divider": {}}
  ],
  "next_cursor": null,
  "has_more": false
}"#;

fn write_temp(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_parse_file_and_detect() {
    let file = write_temp(PAGE);

    assert_eq!(
        unnotion::detect_format_from_path(file.path()).unwrap(),
        InputShape::ListResponse
    );

    let page = parse_file(file.path()).unwrap();
    assert_eq!(page.block_count(), 7);
    assert_eq!(page.metadata.partial_count, 1);
    assert!(!page.metadata.has_more);
}

#[test]
fn test_end_to_end_html() {
    let page = parse_str(PAGE).unwrap();
    let html = render::to_html(&page, &RenderOptions::default());

    let expected = concat!(
        "<h1>Release notes</h1>\n",
        "<p>See <span style=\"background-color: red\"><strong>",
        "<a href=\"https://example.com/docs\" target=\"_blank\" rel=\"noopener noreferrer\">the docs</a>",
        "</strong></span></p>\n",
        "<ul>\n<li>Faster builds</li>\n<li>Fewer bugs</li>\n</ul>\n",
        "<div class=\"code-block\">\n",
        "<div class=\"code-language\">shell</div>\n",
        "<pre><code class=\"language-shell\">cargo install unnotion</code></pre>\n",
        "</div>\n",
        "<div class=\"unsupported-block\">\n",
        "<p>Unsupported block type: divider</p>\n",
        "<p>Block ID: d1</p>\n",
        "</div>\n",
    );
    assert_eq!(html, expected);
}

#[test]
fn test_end_to_end_tree() {
    let page = parse_str(PAGE).unwrap();
    let nodes = render::build(&page.blocks);

    let kinds: Vec<&str> = nodes.iter().map(|n| n.kind_name()).collect();
    assert_eq!(
        kinds,
        vec!["heading", "paragraph", "list", "code", "unsupported"]
    );
    assert!(matches!(
        &nodes[3],
        DisplayNode::Code { caption: None, language: Some(lang), .. } if lang == "shell"
    ));
}

#[test]
fn test_end_to_end_markdown_and_text() {
    let page = parse_str(PAGE).unwrap();

    let markdown = render::to_markdown(&page, &RenderOptions::default().with_unsupported(false));
    assert_eq!(
        markdown,
        "# Release notes\n\n\
         See <span style=\"background-color: red\">**[the docs](https://example.com/docs)**</span>\n\n\
         - Faster builds\n- Fewer bugs\n\n\
         ```shell\ncargo install unnotion\n```"
    );

    let text = render::to_text(&page);
    assert_eq!(
        text,
        "Release notes\n\nSee the docs\n\nFaster builds\nFewer bugs\n\ncargo install unnotion"
    );
}

#[test]
fn test_parse_reader_bare_array() {
    let json = r#"[{"id": "q", "type": "quote", "quote": {"rich_text": [{"plain_text": "Hi"}]}}]"#;
    let page = parse_reader(json.as_bytes()).unwrap();
    assert_eq!(page.plain_text(), "Hi");
}

#[test]
fn test_truncated_list_keeps_cursor() {
    let json = r#"{"object": "list", "results": [], "has_more": true, "next_cursor": "abc"}"#;
    let page = parse_str(json).unwrap();
    assert!(page.is_empty());
    assert!(page.metadata.has_more);
    assert_eq!(page.metadata.next_cursor.as_deref(), Some("abc"));

    let markdown = render::to_markdown(&page, &RenderOptions::new().with_frontmatter(true));
    assert!(markdown.contains("truncated: true"));
}

#[test]
fn test_bad_span_keeps_sibling_spans() {
    let json = r#"[
      {"id": "p", "type": "paragraph", "paragraph": {"rich_text": [
        {"plain_text": "keep me", "annotations": {"bold": true, "color": null}}]}},
      {"id": "q", "type": "paragraph", "paragraph": {"rich_text": [
        {"plain_text": "good"}, 7]}}
    ]"#;

    let page = parse_str_with_options(json, ParseOptions::new().strict()).unwrap();
    assert_eq!(page.plain_text(), "keep me\n\ngood");

    let markdown = render::to_markdown(&page, &RenderOptions::default());
    assert_eq!(markdown, "**keep me**\n\ngood");
}

#[test]
fn test_strict_and_lenient_modes() {
    let json = r#"[{"id": "i", "type": "image", "image": {"type": "external"}}, "junk"]"#;

    let page = parse_str(json).unwrap();
    assert_eq!(page.block_count(), 1);
    let nodes = render::build(&page.blocks);
    assert!(matches!(&nodes[0], DisplayNode::Image { url, .. } if url.is_empty()));

    let result = parse_str_with_options(json, ParseOptions::new().strict());
    assert!(matches!(result, Err(Error::InvalidBlock { index: 0, .. })));
}

#[test]
fn test_parse_files_keeps_order() {
    let good = write_temp(r#"[{"id": "a", "type": "paragraph", "paragraph": {"rich_text": []}}]"#);
    let bad = write_temp("not json");
    let single = write_temp(r#"{"object": "block", "id": "s", "type": "quote", "quote": null}"#);

    let paths = vec![
        good.path().to_path_buf(),
        bad.path().to_path_buf(),
        single.path().to_path_buf(),
    ];

    for options in [ParseOptions::new(), ParseOptions::new().sequential()] {
        let results = parse_files(&paths, &options);
        assert_eq!(results.len(), 3);
        assert!(results[0].is_ok());
        assert!(matches!(results[1], Err(Error::UnknownFormat)));
        assert_eq!(results[2].as_ref().unwrap().block_count(), 1);
    }
}

#[test]
fn test_parser_reports_shape() {
    let parser = BlockParser::from_str(r#"[]"#).unwrap();
    assert_eq!(parser.shape().unwrap(), InputShape::BlockArray);
    assert!(parser.parse().unwrap().is_empty());
}

#[cfg(feature = "async")]
#[tokio::test]
async fn test_parse_file_async() {
    let file = write_temp(PAGE);
    let page = unnotion::parse_file_async(file.path()).await.unwrap();
    assert_eq!(page.block_count(), 7);
}
