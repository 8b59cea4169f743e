//! Rendering module: block records to a display tree, and the display
//! tree to various output formats.

mod builder;
mod html;
mod json;
mod markdown;
mod node;
mod options;
mod result;
mod rich_text;
mod text;
pub mod visitor;

pub use builder::{build, render_block, render_list_item, BlockTreeBuilder};
pub use html::{to_html, write_formatted, HtmlRenderer};
pub use json::{to_json, JsonFormat};
pub use markdown::{to_markdown, to_markdown_with_stats, MarkdownRenderer};
pub use node::{DisplayNode, Fill, FormattedSpan, FormattedText, Inline, ListKind};
pub use options::RenderOptions;
pub use result::{RenderResult, RenderStats};
pub use rich_text::{
    flatten, format, format_span, is_safe_url, Layer, LAYER_ORDER, LINK_REL, LINK_TARGET,
    SAFE_URL_SCHEMES,
};
pub use text::to_text;
pub use visitor::{
    CompositeVisitor, DefaultVisitor, NodeVisitor, SkipImagesVisitor, SkipUnsupportedVisitor,
    VisitorAction,
};
