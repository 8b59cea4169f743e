//! # unnotion
//!
//! Render Notion block content to HTML, Markdown, plain text, and JSON.
//!
//! The content source stores a page as a flat sequence of blocks, each
//! carrying annotated rich text. This library decodes that sequence,
//! builds a nested display tree from it (grouping consecutive list items
//! into list containers and skipping partial records), and renders the
//! tree to the output format of your choice.
//!
//! ## Quick Start
//!
//! ```no_run
//! use unnotion::{parse_file, render};
//!
//! fn main() -> unnotion::Result<()> {
//!     // Parse a block list saved from the content API
//!     let page = parse_file("blocks.json")?;
//!
//!     // Convert to HTML
//!     let options = render::RenderOptions::default();
//!     let html = render::to_html(&page, &options);
//!     println!("{}", html);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Rich text**: bold, italic, strikethrough, underline, code, colors, links
//! - **List grouping**: consecutive list items become one list container
//! - **Multiple output formats**: HTML, Markdown, plain text, JSON
//! - **Lenient decoding**: malformed payloads render empty instead of failing
//! - **Parallel processing**: Uses Rayon for multi-file parsing

pub mod detect;
pub mod error;
pub mod model;
pub mod parser;
pub mod render;

// Re-export commonly used types
pub use detect::{detect_format_from_bytes, detect_format_from_path, InputShape};
pub use error::{Error, Result};
pub use model::{
    Annotations, Block, BlockKind, BlockRecord, Color, Completeness, Page, PageMetadata, Span,
};
pub use parser::{BlockParser, ErrorMode, ParseOptions};
pub use render::{DisplayNode, JsonFormat, RenderOptions, RenderResult};

use rayon::prelude::*;
use std::io::Read;
use std::path::Path;

/// Parse a block JSON file and return a page.
///
/// # Arguments
///
/// * `path` - Path to the JSON file
///
/// # Example
///
/// ```no_run
/// use unnotion::parse_file;
///
/// let page = parse_file("blocks.json").unwrap();
/// println!("Blocks: {}", page.block_count());
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Page> {
    let parser = BlockParser::open(path)?;
    parser.parse()
}

/// Parse a block JSON file with custom options.
///
/// # Example
///
/// ```no_run
/// use unnotion::{parse_file_with_options, ParseOptions};
///
/// let options = ParseOptions::new().strict();
/// let page = parse_file_with_options("blocks.json", options).unwrap();
/// ```
pub fn parse_file_with_options<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Page> {
    let parser = BlockParser::open_with_options(path, options)?;
    parser.parse()
}

/// Parse block JSON from bytes.
pub fn parse_bytes(data: &[u8]) -> Result<Page> {
    let parser = BlockParser::from_bytes(data)?;
    parser.parse()
}

/// Parse block JSON from bytes with custom options.
pub fn parse_bytes_with_options(data: &[u8], options: ParseOptions) -> Result<Page> {
    let parser = BlockParser::from_bytes_with_options(data, options)?;
    parser.parse()
}

/// Parse block JSON from a string.
///
/// # Example
///
/// ```
/// use unnotion::parse_str;
///
/// let page = parse_str(r#"[{"id": "a", "type": "paragraph",
///     "paragraph": {"rich_text": [{"plain_text": "Hello"}]}}]"#).unwrap();
/// assert_eq!(page.plain_text(), "Hello");
/// ```
pub fn parse_str(json: &str) -> Result<Page> {
    let parser = BlockParser::from_str(json)?;
    parser.parse()
}

/// Parse block JSON from a string with custom options.
pub fn parse_str_with_options(json: &str, options: ParseOptions) -> Result<Page> {
    let parser = BlockParser::from_str_with_options(json, options)?;
    parser.parse()
}

/// Parse block JSON from a reader.
///
/// # Example
///
/// ```no_run
/// use unnotion::parse_reader;
/// use std::fs::File;
///
/// let file = File::open("blocks.json").unwrap();
/// let page = parse_reader(file).unwrap();
/// ```
pub fn parse_reader<R: Read>(reader: R) -> Result<Page> {
    let parser = BlockParser::from_reader(reader)?;
    parser.parse()
}

/// Parse block JSON from a reader with custom options.
pub fn parse_reader_with_options<R: Read>(reader: R, options: ParseOptions) -> Result<Page> {
    let parser = BlockParser::from_reader_with_options(reader, options)?;
    parser.parse()
}

/// Parse many block JSON files.
///
/// Files are parsed in parallel unless `options.parallel` is off. The
/// results keep the order of `paths`; one failing file does not affect
/// the others.
pub fn parse_files<P>(paths: &[P], options: &ParseOptions) -> Vec<Result<Page>>
where
    P: AsRef<Path> + Sync,
{
    if options.parallel {
        paths
            .par_iter()
            .map(|path| parse_file_with_options(path, options.clone()))
            .collect()
    } else {
        paths
            .iter()
            .map(|path| parse_file_with_options(path, options.clone()))
            .collect()
    }
}

/// Parse a block JSON file using async I/O.
#[cfg(feature = "async")]
pub async fn parse_file_async<P: AsRef<Path>>(path: P) -> Result<Page> {
    let data = tokio::fs::read(path.as_ref()).await?;
    parse_bytes(&data)
}

/// Convert a block JSON file to HTML.
///
/// # Example
///
/// ```no_run
/// use unnotion::to_html;
///
/// let html = to_html("blocks.json").unwrap();
/// std::fs::write("page.html", html).unwrap();
/// ```
pub fn to_html<P: AsRef<Path>>(path: P) -> Result<String> {
    let page = parse_file(path)?;
    Ok(render::to_html(&page, &RenderOptions::default()))
}

/// Convert a block JSON file to Markdown.
pub fn to_markdown<P: AsRef<Path>>(path: P) -> Result<String> {
    let page = parse_file(path)?;
    Ok(render::to_markdown(&page, &RenderOptions::default()))
}

/// Convert a block JSON file to Markdown with custom options.
///
/// # Example
///
/// ```no_run
/// use unnotion::{to_markdown_with_options, RenderOptions};
///
/// let options = RenderOptions::new()
///     .with_frontmatter(true)
///     .with_list_marker('*');
/// let markdown = to_markdown_with_options("blocks.json", &options).unwrap();
/// ```
pub fn to_markdown_with_options<P: AsRef<Path>>(
    path: P,
    options: &RenderOptions,
) -> Result<String> {
    let page = parse_file(path)?;
    Ok(render::to_markdown(&page, options))
}

/// Convert a block JSON file to plain text.
pub fn to_text<P: AsRef<Path>>(path: P) -> Result<String> {
    let page = parse_file(path)?;
    Ok(render::to_text(&page))
}

/// Convert a block JSON file to JSON (metadata plus display tree).
pub fn to_json<P: AsRef<Path>>(path: P, format: JsonFormat) -> Result<String> {
    let page = parse_file(path)?;
    render::to_json(&page, format)
}

/// Builder for parsing and rendering block content.
///
/// # Example
///
/// ```no_run
/// use unnotion::Unnotion;
///
/// let html = Unnotion::new()
///     .strict()
///     .with_block_ids()
///     .with_title("Release notes")
///     .parse("blocks.json")?
///     .to_html();
/// # Ok::<(), unnotion::Error>(())
/// ```
pub struct Unnotion {
    parse_options: ParseOptions,
    render_options: RenderOptions,
    title: Option<String>,
}

impl Unnotion {
    /// Create a new Unnotion builder.
    pub fn new() -> Self {
        Self {
            parse_options: ParseOptions::default(),
            render_options: RenderOptions::default(),
            title: None,
        }
    }

    /// Enable strict parsing mode.
    pub fn strict(mut self) -> Self {
        self.parse_options = self.parse_options.strict();
        self
    }

    /// Enable lenient parsing mode.
    pub fn lenient(mut self) -> Self {
        self.parse_options = self.parse_options.lenient();
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.parse_options = self.parse_options.sequential();
        self
    }

    /// Enable frontmatter in Markdown output.
    pub fn with_frontmatter(mut self) -> Self {
        self.render_options = self.render_options.with_frontmatter(true);
        self
    }

    /// Emit block ids as HTML `id` attributes.
    pub fn with_block_ids(mut self) -> Self {
        self.render_options = self.render_options.with_block_ids(true);
        self
    }

    /// Hide unsupported block placeholders.
    pub fn hide_unsupported(mut self) -> Self {
        self.render_options = self.render_options.with_unsupported(false);
        self
    }

    /// Set the page title recorded in the metadata.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Replace the render options.
    pub fn with_render_options(mut self, options: RenderOptions) -> Self {
        self.render_options = options;
        self
    }

    /// Parse a block JSON file and return a result wrapper.
    pub fn parse<P: AsRef<Path>>(self, path: P) -> Result<UnnotionResult> {
        let parser = BlockParser::open_with_options(path, self.parse_options.clone())?;
        self.finish(parser)
    }

    /// Parse block JSON from bytes.
    pub fn parse_bytes(self, data: &[u8]) -> Result<UnnotionResult> {
        let parser = BlockParser::from_bytes_with_options(data, self.parse_options.clone())?;
        self.finish(parser)
    }

    /// Parse block JSON from a string.
    pub fn parse_str(self, json: &str) -> Result<UnnotionResult> {
        self.parse_bytes(json.as_bytes())
    }

    fn finish(self, parser: BlockParser) -> Result<UnnotionResult> {
        let mut page = parser.parse()?;
        if self.title.is_some() {
            page.metadata.title = self.title;
        }
        Ok(UnnotionResult {
            page,
            render_options: self.render_options,
        })
    }
}

impl Default for Unnotion {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of parsing block content.
pub struct UnnotionResult {
    /// The parsed page
    pub page: Page,
    /// Render options to use
    render_options: RenderOptions,
}

impl UnnotionResult {
    /// Build the display tree.
    pub fn nodes(&self) -> Vec<DisplayNode> {
        render::build(&self.page.blocks)
    }

    /// Convert to HTML.
    pub fn to_html(&self) -> String {
        render::to_html(&self.page, &self.render_options)
    }

    /// Convert to Markdown.
    pub fn to_markdown(&self) -> String {
        render::to_markdown(&self.page, &self.render_options)
    }

    /// Convert to plain text.
    pub fn to_text(&self) -> String {
        render::to_text(&self.page)
    }

    /// Convert to JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.page, format)
    }

    /// Get the page.
    pub fn page(&self) -> &Page {
        &self.page
    }
}
