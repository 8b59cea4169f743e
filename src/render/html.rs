//! HTML rendering of the display tree.
//!
//! The markup mirrors the page components the display tree was designed
//! for: headings become `h1`-`h3`, list containers become `ul`/`ol`,
//! code listings become `pre`/`code` with a `language-<tag>` class, and
//! images become a `figure` with an optional `figcaption`.

use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::model::Page;

use super::builder::build;
use super::node::{DisplayNode, FormattedText, Inline, ListKind};
use super::result::{RenderResult, RenderStats};
use super::rich_text::is_safe_url;
use super::visitor::{dispatch, NodeVisitor, VisitorAction};
use super::RenderOptions;

/// Convert a page to HTML.
pub fn to_html(page: &Page, options: &RenderOptions) -> String {
    HtmlRenderer::new(options.clone()).render(page)
}

/// HTML renderer.
pub struct HtmlRenderer {
    options: RenderOptions,
    visitor: Option<Box<dyn NodeVisitor>>,
}

impl HtmlRenderer {
    /// Create a new HTML renderer.
    pub fn new(options: RenderOptions) -> Self {
        Self {
            options,
            visitor: None,
        }
    }

    /// Consult `visitor` before emitting each top-level node.
    pub fn with_visitor<V: NodeVisitor + 'static>(mut self, visitor: V) -> Self {
        self.visitor = Some(Box::new(visitor));
        self
    }

    /// Render a page to HTML.
    pub fn render(mut self, page: &Page) -> String {
        let nodes = build(&page.blocks);
        self.render_nodes(&nodes)
    }

    /// Render a page to HTML with statistics.
    pub fn render_with_stats(mut self, page: &Page) -> RenderResult {
        let nodes = build(&page.blocks);
        let content = self.render_nodes(&nodes);
        let stats = RenderStats::from_nodes(&nodes);
        RenderResult::new(content, page.metadata.clone(), stats)
    }

    /// Render an already built display tree.
    pub fn render_nodes(&mut self, nodes: &[DisplayNode]) -> String {
        let mut output = String::new();

        if self.options.wrap_document {
            output.push_str("<div class=\"notion-page\">\n");
        }

        for node in nodes {
            let action = match self.visitor.as_mut() {
                Some(visitor) => dispatch(visitor.as_mut(), node),
                None => VisitorAction::Continue,
            };
            match action {
                VisitorAction::Skip => continue,
                VisitorAction::Replace(custom) => {
                    output.push_str(&custom);
                    output.push('\n');
                }
                VisitorAction::Continue => self.render_node(&mut output, node),
            }
        }

        if self.options.wrap_document {
            output.push_str("</div>\n");
        }

        output
    }

    fn render_node(&self, output: &mut String, node: &DisplayNode) {
        match node {
            DisplayNode::Heading {
                key,
                level,
                content,
            } => {
                let level = (*level).min(self.options.max_heading_level);
                output.push_str(&format!("<h{}{}>", level, self.id_attr(key)));
                write_formatted(output, content);
                output.push_str(&format!("</h{}>\n", level));
            }
            DisplayNode::Paragraph { key, content } => {
                output.push_str(&format!("<p{}>", self.id_attr(key)));
                write_formatted(output, content);
                output.push_str("</p>\n");
            }
            DisplayNode::List { key, kind, items } => {
                let tag = match kind {
                    ListKind::Unordered => "ul",
                    ListKind::Ordered => "ol",
                };
                output.push_str(&format!("<{}{}>\n", tag, self.id_attr(key)));
                for item in items {
                    self.render_node(output, item);
                }
                output.push_str(&format!("</{}>\n", tag));
            }
            DisplayNode::ListItem { key, content } => {
                output.push_str(&format!("<li{}>", self.id_attr(key)));
                write_formatted(output, content);
                output.push_str("</li>\n");
            }
            DisplayNode::Quote { key, content } => {
                output.push_str(&format!("<blockquote{}>", self.id_attr(key)));
                write_formatted(output, content);
                output.push_str("</blockquote>\n");
            }
            DisplayNode::Code {
                key,
                content,
                language,
                caption,
            } => {
                output.push_str(&format!("<div class=\"code-block\"{}>\n", self.id_attr(key)));
                if let Some(lang) = language {
                    output.push_str(&format!(
                        "<div class=\"code-language\">{}</div>\n",
                        encode_text(lang)
                    ));
                }
                match language {
                    Some(lang) => output.push_str(&format!(
                        "<pre><code class=\"language-{}\">",
                        encode_double_quoted_attribute(lang)
                    )),
                    None => output.push_str("<pre><code>"),
                }
                write_formatted(output, content);
                output.push_str("</code></pre>\n");
                if let Some(caption) = caption {
                    output.push_str("<div class=\"code-caption\">");
                    write_formatted(output, caption);
                    output.push_str("</div>\n");
                }
                output.push_str("</div>\n");
            }
            DisplayNode::Image {
                key,
                url,
                alt,
                caption,
            } => {
                output.push_str(&format!("<figure{}>\n", self.id_attr(key)));
                output.push_str(&format!(
                    "<img src=\"{}\" alt=\"{}\">\n",
                    encode_double_quoted_attribute(safe_src(url)),
                    encode_double_quoted_attribute(alt)
                ));
                if let Some(caption) = caption {
                    output.push_str(&format!(
                        "<figcaption>{}</figcaption>\n",
                        encode_text(caption)
                    ));
                }
                output.push_str("</figure>\n");
            }
            DisplayNode::Unsupported { key, block_type } => {
                if !self.options.show_unsupported {
                    return;
                }
                output.push_str(&format!(
                    "<div class=\"unsupported-block\"{}>\n",
                    self.id_attr(key)
                ));
                output.push_str(&format!(
                    "<p>Unsupported block type: {}</p>\n",
                    encode_text(block_type)
                ));
                output.push_str(&format!("<p>Block ID: {}</p>\n", encode_text(key)));
                output.push_str("</div>\n");
            }
        }
    }

    fn id_attr(&self, key: &str) -> String {
        if self.options.emit_block_ids {
            format!(" id=\"{}\"", encode_double_quoted_attribute(key))
        } else {
            String::new()
        }
    }
}

fn safe_src(url: &str) -> &str {
    if is_safe_url(url) {
        url
    } else {
        log::warn!("Dropping image source with a disallowed scheme");
        ""
    }
}

/// Write formatted content as inline HTML.
pub fn write_formatted(output: &mut String, content: &FormattedText) {
    for span in &content.spans {
        write_inline(output, &span.node);
    }
}

fn write_inline(output: &mut String, node: &Inline) {
    let (open, close) = match node {
        Inline::Text { text } => {
            output.push_str(&encode_text(text));
            return;
        }
        // Unsafe targets keep their text and lose the anchor.
        Inline::Link { href, child, .. } if !is_safe_url(href) => {
            write_inline(output, child);
            return;
        }
        Inline::Link {
            href, target, rel, ..
        } => (
            format!(
                "<a href=\"{}\" target=\"{}\" rel=\"{}\">",
                encode_double_quoted_attribute(href),
                encode_double_quoted_attribute(target),
                encode_double_quoted_attribute(rel)
            ),
            "</a>",
        ),
        Inline::Strong { .. } => ("<strong>".to_string(), "</strong>"),
        Inline::Emphasis { .. } => ("<em>".to_string(), "</em>"),
        Inline::Strikethrough { .. } => ("<s>".to_string(), "</s>"),
        Inline::Underline { .. } => ("<u>".to_string(), "</u>"),
        Inline::Code { .. } => ("<code>".to_string(), "</code>"),
        Inline::Styled { fill, .. } => (
            format!(
                "<span style=\"{}\">",
                encode_double_quoted_attribute(&fill.css())
            ),
            "</span>",
        ),
    };

    output.push_str(&open);
    if let Some(child) = node.child() {
        write_inline(output, child);
    }
    output.push_str(close);
}
