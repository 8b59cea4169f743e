//! Markdown rendering of the display tree.

use crate::model::Page;

use super::builder::build;
use super::node::{DisplayNode, FormattedText, Inline, ListKind};
use super::result::{RenderResult, RenderStats};
use super::rich_text::is_safe_url;
use super::visitor::{dispatch, NodeVisitor, VisitorAction};
use super::RenderOptions;

/// Convert a page to Markdown.
pub fn to_markdown(page: &Page, options: &RenderOptions) -> String {
    MarkdownRenderer::new(options.clone()).render(page)
}

/// Convert a page to Markdown with statistics.
pub fn to_markdown_with_stats(page: &Page, options: &RenderOptions) -> RenderResult {
    let mut options = options.clone();
    options.collect_stats = true;
    MarkdownRenderer::new(options).render_with_stats(page)
}

/// Markdown renderer.
pub struct MarkdownRenderer {
    options: RenderOptions,
    stats: RenderStats,
    visitor: Option<Box<dyn NodeVisitor>>,
}

impl MarkdownRenderer {
    /// Create a new Markdown renderer.
    pub fn new(options: RenderOptions) -> Self {
        Self {
            options,
            stats: RenderStats::new(),
            visitor: None,
        }
    }

    /// Consult `visitor` before emitting each top-level node.
    pub fn with_visitor<V: NodeVisitor + 'static>(mut self, visitor: V) -> Self {
        self.visitor = Some(Box::new(visitor));
        self
    }

    /// Render a page to Markdown.
    pub fn render(mut self, page: &Page) -> String {
        self.render_internal(page)
    }

    /// Render a page to Markdown with statistics.
    pub fn render_with_stats(mut self, page: &Page) -> RenderResult {
        self.options.collect_stats = true;
        let content = self.render_internal(page);
        RenderResult::new(content, page.metadata.clone(), self.stats)
    }

    fn render_internal(&mut self, page: &Page) -> String {
        let mut output = String::new();

        if self.options.include_frontmatter {
            output.push_str(&page.metadata.to_yaml_frontmatter());
        }

        let nodes = build(&page.blocks);
        for node in &nodes {
            let action = match self.visitor.as_mut() {
                Some(visitor) => dispatch(visitor.as_mut(), node),
                None => VisitorAction::Continue,
            };
            match action {
                VisitorAction::Skip => continue,
                VisitorAction::Replace(custom) => {
                    output.push_str(&custom);
                    output.push_str("\n\n");
                }
                VisitorAction::Continue => self.render_node(&mut output, node),
            }
            if self.options.collect_stats {
                self.stats.add_node(node);
            }
        }

        output.trim().to_string()
    }

    fn render_node(&self, output: &mut String, node: &DisplayNode) {
        match node {
            DisplayNode::Heading { level, content, .. } => {
                let level = (*level).min(self.options.max_heading_level);
                output.push_str(&"#".repeat(level as usize));
                output.push(' ');
                self.render_formatted(output, content);
                output.push_str("\n\n");
            }
            DisplayNode::Paragraph { content, .. } => {
                if content.plain_text().trim().is_empty() {
                    return;
                }
                self.render_formatted(output, content);
                output.push_str("\n\n");
            }
            DisplayNode::List { kind, items, .. } => {
                for (index, item) in items.iter().enumerate() {
                    let marker = match kind {
                        ListKind::Unordered => self.options.list_marker.to_string(),
                        ListKind::Ordered => format!("{}.", index + 1),
                    };
                    output.push_str(&marker);
                    output.push(' ');
                    if let DisplayNode::ListItem { content, .. } = item {
                        self.render_formatted(output, content);
                    }
                    output.push('\n');
                }
                output.push('\n');
            }
            DisplayNode::ListItem { content, .. } => {
                output.push_str(&self.options.list_marker.to_string());
                output.push(' ');
                self.render_formatted(output, content);
                output.push_str("\n\n");
            }
            DisplayNode::Quote { content, .. } => {
                let mut inner = String::new();
                self.render_formatted(&mut inner, content);
                for line in inner.lines() {
                    output.push_str("> ");
                    output.push_str(line);
                    output.push('\n');
                }
                if inner.is_empty() {
                    output.push_str(">\n");
                }
                output.push('\n');
            }
            DisplayNode::Code {
                content,
                language,
                caption,
                ..
            } => {
                output.push_str("```");
                output.push_str(language.as_deref().unwrap_or(""));
                output.push('\n');
                let code = content.plain_text();
                output.push_str(&code);
                if !code.ends_with('\n') {
                    output.push('\n');
                }
                output.push_str("```\n\n");
                if let Some(caption) = caption {
                    output.push('*');
                    self.render_formatted(output, caption);
                    output.push_str("*\n\n");
                }
            }
            DisplayNode::Image {
                url, alt, caption, ..
            } => {
                let url = if is_safe_url(url) { url.as_str() } else { "" };
                output.push_str(&format!(
                    "![{}]({})\n\n",
                    escape_markdown(alt),
                    link_destination(url)
                ));
                if let Some(caption) = caption {
                    output.push('*');
                    output.push_str(&self.escape(caption));
                    output.push_str("*\n\n");
                }
            }
            DisplayNode::Unsupported { key, block_type } => {
                if self.options.show_unsupported {
                    output.push_str(&format!(
                        "<!-- Unsupported block type: {} (Block ID: {}) -->\n\n",
                        block_type, key
                    ));
                }
            }
        }
    }

    fn render_formatted(&self, output: &mut String, content: &FormattedText) {
        for span in &content.spans {
            self.render_inline(output, &span.node);
        }
    }

    fn render_inline(&self, output: &mut String, node: &Inline) {
        match node {
            Inline::Text { text } => output.push_str(&self.escape(text)),
            Inline::Link { href, child, .. } if !is_safe_url(href) => {
                self.render_inline(output, child);
            }
            Inline::Link { href, child, .. } => {
                output.push('[');
                self.render_inline(output, child);
                output.push_str(&format!("]({})", link_destination(href)));
            }
            Inline::Strong { child } => self.wrap(output, "**", child, "**"),
            Inline::Emphasis { child } => self.wrap(output, "*", child, "*"),
            Inline::Strikethrough { child } => self.wrap(output, "~~", child, "~~"),
            Inline::Underline { child } => self.wrap(output, "<u>", child, "</u>"),
            // Backticks take their content literally.
            Inline::Code { child } => output.push_str(&code_span(&child.plain_text())),
            Inline::Styled { fill, child } => {
                let open = format!("<span style=\"{}\">", fill.css());
                self.wrap(output, &open, child, "</span>");
            }
        }
    }

    fn wrap(&self, output: &mut String, open: &str, child: &Inline, close: &str) {
        output.push_str(open);
        self.render_inline(output, child);
        output.push_str(close);
    }

    fn escape(&self, text: &str) -> String {
        if self.options.escape_special_chars {
            escape_markdown(text)
        } else {
            text.to_string()
        }
    }
}

/// Write a link or image destination.
///
/// Destinations the bare form cannot hold are wrapped in `<...>` with
/// inner angle brackets escaped.
fn link_destination(url: &str) -> String {
    if !url.is_empty() && !url.contains([' ', '(', ')', '<', '>', '\n']) {
        return url.to_string();
    }
    let mut result = String::with_capacity(url.len() + 2);
    result.push('<');
    for c in url.chars() {
        match c {
            '<' | '>' => {
                result.push('\\');
                result.push(c);
            }
            '\n' => result.push_str("%0A"),
            _ => result.push(c),
        }
    }
    result.push('>');
    result
}

/// Write an inline code span.
///
/// The fence is one backtick longer than the longest backtick run in the
/// code, and padded with spaces when the code starts or ends with one.
fn code_span(code: &str) -> String {
    let longest = code
        .split(|c: char| c != '`')
        .map(str::len)
        .max()
        .unwrap_or(0);
    let fence = "`".repeat(longest + 1);
    let pad = if code.starts_with('`') || code.ends_with('`') {
        " "
    } else {
        ""
    };
    format!("{fence}{pad}{code}{pad}{fence}")
}

/// Escape special Markdown characters.
/// Only escape characters that could be misinterpreted as Markdown syntax.
fn escape_markdown(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' | '`' | '*' | '_' | '[' | ']' | '|' => {
                result.push('\\');
                result.push(c);
            }
            _ => result.push(c),
        }
    }
    result
}
