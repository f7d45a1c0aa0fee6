//! Pipa Language Front End
//!
//! Lexer and parser for Pipa, a small statement language with typed variable
//! assignments, function calls, `if`/`loop`/`break` blocks and four levels of
//! arithmetic and comparison operators. Source text is turned into tokens with
//! [`lexer::tokenize`], tokens into a syntax tree with [`parser::parse`], and
//! both can be rendered with the [`printer`] and [`report`] modules.

pub mod lexer;
pub mod parser;
pub mod printer;
pub mod report;

pub use lexer::{tokenize, LexError, LexErrorKind, Location, Position, Token, TokenKind};
pub use parser::{parse, BinaryOperator, Node, NodeKind, ParseError, ParseOutcome};
