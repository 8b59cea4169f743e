//! Block JSON parsing module.

mod block_parser;
mod options;
mod wire;

pub use block_parser::BlockParser;
pub use options::{ErrorMode, ParseOptions};
