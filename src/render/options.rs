//! Rendering options and configuration.

/// Options for rendering a display tree.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Maximum heading level (1-6)
    pub max_heading_level: u8,

    /// Include YAML frontmatter with page metadata (Markdown)
    pub include_frontmatter: bool,

    /// Character to use for unordered list markers (Markdown)
    pub list_marker: char,

    /// Escape special Markdown characters
    pub escape_special_chars: bool,

    /// Emit a visible placeholder for unsupported blocks
    pub show_unsupported: bool,

    /// Emit each node's key as an `id` attribute (HTML)
    pub emit_block_ids: bool,

    /// Wrap the output in a single container element (HTML)
    pub wrap_document: bool,

    /// Collect statistics during rendering
    pub collect_stats: bool,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum heading level.
    pub fn with_max_heading(mut self, level: u8) -> Self {
        self.max_heading_level = level.clamp(1, 6);
        self
    }

    /// Enable or disable frontmatter.
    pub fn with_frontmatter(mut self, include: bool) -> Self {
        self.include_frontmatter = include;
        self
    }

    /// Set the list marker character.
    pub fn with_list_marker(mut self, marker: char) -> Self {
        self.list_marker = marker;
        self
    }

    /// Enable or disable Markdown escaping.
    pub fn with_escaping(mut self, escape: bool) -> Self {
        self.escape_special_chars = escape;
        self
    }

    /// Show or hide unsupported block placeholders.
    pub fn with_unsupported(mut self, show: bool) -> Self {
        self.show_unsupported = show;
        self
    }

    /// Enable or disable `id` attributes on HTML elements.
    pub fn with_block_ids(mut self, emit: bool) -> Self {
        self.emit_block_ids = emit;
        self
    }

    /// Enable or disable the HTML container element.
    pub fn with_wrapper(mut self, wrap: bool) -> Self {
        self.wrap_document = wrap;
        self
    }

    /// Enable statistics collection during rendering.
    pub fn with_stats(mut self, collect: bool) -> Self {
        self.collect_stats = collect;
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            max_heading_level: 6,
            include_frontmatter: false,
            list_marker: '-',
            escape_special_chars: true,
            show_unsupported: true,
            emit_block_ids: false,
            wrap_document: false,
            collect_stats: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_options_builder() {
        let options = RenderOptions::new()
            .with_frontmatter(true)
            .with_max_heading(9)
            .with_list_marker('*')
            .with_unsupported(false);

        assert!(options.include_frontmatter);
        assert_eq!(options.max_heading_level, 6);
        assert_eq!(options.list_marker, '*');
        assert!(!options.show_unsupported);
    }

    #[test]
    fn test_render_options_defaults() {
        let options = RenderOptions::default();
        assert!(options.show_unsupported);
        assert!(options.escape_special_chars);
        assert!(!options.emit_block_ids);
        assert!(!options.wrap_document);
    }
}
