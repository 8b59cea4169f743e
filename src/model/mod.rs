//! Content model types for block-structured pages.
//!
//! This module defines the intermediate representation that bridges
//! decoding of the content source and rendering. Blocks are kept in a
//! flat sequence exactly as supplied; any nesting is a view built by the
//! renderer.

mod block;
mod page;
mod span;

pub use block::{
    is_full_block, Block, BlockKind, BlockRecord, CodePayload, Completeness, ImagePayload,
    ImageSource, ListKind, SourceKind, TextPayload,
};
pub use page::{Page, PageMetadata};
pub use span::{Annotations, Color, Span, SpanKind, BACKGROUND_SUFFIX};
