//! Recursive-descent parser over a token slice.
//!
//! Every parse function takes a [`Cursor`] by value and returns the parsed
//! node together with the advanced cursor, so failed alternatives leave no
//! trace and the caller simply retries from its own copy.

pub mod ast;
pub mod errors;
pub mod expressions;
pub mod statements;

pub use ast::{BinaryOperator, Node, NodeKind};
pub use errors::{ParseError, ParseFailure, ParseOutcome};
pub use expressions::{parse_expr, parse_fun_call, Cursor, ParseResult};
pub use statements::{parse, parse_statement, parse_statements};
