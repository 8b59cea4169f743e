//! Plain text rendering of the display tree.

use crate::model::Page;

use super::builder::build;

/// Convert a page to plain text.
///
/// Each top-level node contributes its flattened text; list items go one
/// per line. Unsupported placeholders and empty nodes produce nothing.
pub fn to_text(page: &Page) -> String {
    build(&page.blocks)
        .iter()
        .map(|node| node.plain_text())
        .filter(|text| !text.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}
