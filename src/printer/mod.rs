//! Human-readable renderings of tokens and syntax trees.
//!
//! - [`format_token`]: one line per token, optionally with its location
//! - [`dump_tree`]: indented tree, one node per line
//! - [`to_source`]: canonical program text that parses back to the same tree

pub mod source;
pub mod tree;

pub use source::to_source;
pub use tree::dump_tree;

use crate::lexer::Token;

/// Summary line for a token.
///
/// With `details`, the six location fields are appended as
/// `start_offset,end_offset,start_line,end_line,start_column,end_column`.
pub fn format_token(token: &Token, details: bool) -> String {
    if details {
        format!("{} @ {}", token.kind, token.location)
    } else {
        token.kind.to_string()
    }
}
