//! Visitor pattern for customizing rendering.
//!
//! The HTML and Markdown renderers consult a visitor before emitting each
//! top-level display node, so callers can drop or replace elements
//! without touching the renderers themselves.
//!
//! # Example
//!
//! ```
//! use unnotion::render::visitor::{NodeVisitor, VisitorAction};
//!
//! struct HideCode;
//!
//! impl NodeVisitor for HideCode {
//!     fn visit_code(&mut self, _language: Option<&str>, _code: &str) -> VisitorAction {
//!         VisitorAction::Replace("<!-- code omitted -->".to_string())
//!     }
//! }
//! ```

use super::node::{DisplayNode, ListKind};

/// Action returned by visitor methods to control rendering behavior.
#[derive(Debug, Clone, Default)]
pub enum VisitorAction {
    /// Continue with default rendering.
    #[default]
    Continue,

    /// Replace the element with custom output.
    Replace(String),

    /// Skip this element entirely (produce no output).
    Skip,
}

impl VisitorAction {
    /// Check if this action indicates the element should be skipped.
    pub fn should_skip(&self) -> bool {
        matches!(self, VisitorAction::Skip)
    }

    /// Check if this action provides replacement content.
    pub fn is_replace(&self) -> bool {
        matches!(self, VisitorAction::Replace(_))
    }

    /// Get replacement content if available.
    pub fn replacement(&self) -> Option<&str> {
        match self {
            VisitorAction::Replace(s) => Some(s),
            _ => None,
        }
    }
}

/// Trait for visiting display nodes during rendering.
///
/// All methods return `VisitorAction::Continue` by default.
pub trait NodeVisitor: Send + Sync {
    /// Called before rendering a heading.
    fn visit_heading(&mut self, text: &str, level: u8) -> VisitorAction {
        let _ = (text, level);
        VisitorAction::Continue
    }

    /// Called before rendering a paragraph.
    fn visit_paragraph(&mut self, text: &str) -> VisitorAction {
        let _ = text;
        VisitorAction::Continue
    }

    /// Called before rendering a list container.
    ///
    /// # Arguments
    /// * `kind` - Ordered or unordered
    /// * `item_count` - Number of items in the run
    fn visit_list(&mut self, kind: ListKind, item_count: usize) -> VisitorAction {
        let _ = (kind, item_count);
        VisitorAction::Continue
    }

    /// Called before rendering a block quote.
    fn visit_quote(&mut self, text: &str) -> VisitorAction {
        let _ = text;
        VisitorAction::Continue
    }

    /// Called before rendering a code block.
    fn visit_code(&mut self, language: Option<&str>, code: &str) -> VisitorAction {
        let _ = (language, code);
        VisitorAction::Continue
    }

    /// Called before rendering an image.
    fn visit_image(&mut self, url: &str, alt: &str) -> VisitorAction {
        let _ = (url, alt);
        VisitorAction::Continue
    }

    /// Called before rendering an unsupported block placeholder.
    fn visit_unsupported(&mut self, id: &str, block_type: &str) -> VisitorAction {
        let _ = (id, block_type);
        VisitorAction::Continue
    }
}

/// Route a node to the matching visitor method.
pub fn dispatch(visitor: &mut dyn NodeVisitor, node: &DisplayNode) -> VisitorAction {
    match node {
        DisplayNode::Heading { level, content, .. } => {
            visitor.visit_heading(&content.plain_text(), *level)
        }
        DisplayNode::Paragraph { content, .. } | DisplayNode::ListItem { content, .. } => {
            visitor.visit_paragraph(&content.plain_text())
        }
        DisplayNode::List { kind, items, .. } => visitor.visit_list(*kind, items.len()),
        DisplayNode::Quote { content, .. } => visitor.visit_quote(&content.plain_text()),
        DisplayNode::Code {
            language, content, ..
        } => visitor.visit_code(language.as_deref(), &content.plain_text()),
        DisplayNode::Image { url, alt, .. } => visitor.visit_image(url, alt),
        DisplayNode::Unsupported { key, block_type } => visitor.visit_unsupported(key, block_type),
    }
}

/// Default visitor that performs no customization.
#[derive(Debug, Clone, Default)]
pub struct DefaultVisitor;

impl DefaultVisitor {
    /// Create a new default visitor.
    pub fn new() -> Self {
        Self
    }
}

impl NodeVisitor for DefaultVisitor {}

/// Visitor that skips all images.
#[derive(Debug, Clone, Default)]
pub struct SkipImagesVisitor;

impl NodeVisitor for SkipImagesVisitor {
    fn visit_image(&mut self, _url: &str, _alt: &str) -> VisitorAction {
        VisitorAction::Skip
    }
}

/// Visitor that drops unsupported block placeholders.
#[derive(Debug, Clone, Default)]
pub struct SkipUnsupportedVisitor;

impl NodeVisitor for SkipUnsupportedVisitor {
    fn visit_unsupported(&mut self, _id: &str, _block_type: &str) -> VisitorAction {
        VisitorAction::Skip
    }
}

/// Composite visitor that chains multiple visitors.
///
/// Visitors are called in order. The first visitor that returns
/// a non-Continue action determines the result.
pub struct CompositeVisitor {
    visitors: Vec<Box<dyn NodeVisitor>>,
}

impl CompositeVisitor {
    /// Create a new composite visitor.
    pub fn new() -> Self {
        Self {
            visitors: Vec::new(),
        }
    }

    /// Add a visitor to the chain.
    pub fn with_visitor<V: NodeVisitor + 'static>(mut self, visitor: V) -> Self {
        self.visitors.push(Box::new(visitor));
        self
    }

    fn first_action(
        &mut self,
        mut visit: impl FnMut(&mut dyn NodeVisitor) -> VisitorAction,
    ) -> VisitorAction {
        for visitor in &mut self.visitors {
            let action = visit(visitor.as_mut());
            if !matches!(action, VisitorAction::Continue) {
                return action;
            }
        }
        VisitorAction::Continue
    }
}

impl Default for CompositeVisitor {
    fn default() -> Self {
        Self::new()
    }
}

impl NodeVisitor for CompositeVisitor {
    fn visit_heading(&mut self, text: &str, level: u8) -> VisitorAction {
        self.first_action(|v| v.visit_heading(text, level))
    }

    fn visit_paragraph(&mut self, text: &str) -> VisitorAction {
        self.first_action(|v| v.visit_paragraph(text))
    }

    fn visit_list(&mut self, kind: ListKind, item_count: usize) -> VisitorAction {
        self.first_action(|v| v.visit_list(kind, item_count))
    }

    fn visit_quote(&mut self, text: &str) -> VisitorAction {
        self.first_action(|v| v.visit_quote(text))
    }

    fn visit_code(&mut self, language: Option<&str>, code: &str) -> VisitorAction {
        self.first_action(|v| v.visit_code(language, code))
    }

    fn visit_image(&mut self, url: &str, alt: &str) -> VisitorAction {
        self.first_action(|v| v.visit_image(url, alt))
    }

    fn visit_unsupported(&mut self, id: &str, block_type: &str) -> VisitorAction {
        self.first_action(|v| v.visit_unsupported(id, block_type))
    }
}
