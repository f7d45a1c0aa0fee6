//! Single-pass scanner turning Pipa source into tokens with source locations.

pub mod errors;
pub mod scanner;
pub mod tokens;

pub use errors::{LexError, LexErrorKind, Location, Position, MAX_TOKEN_LEN};
pub use scanner::{tokenize, Scanner};
pub use tokens::{Token, TokenKind};
