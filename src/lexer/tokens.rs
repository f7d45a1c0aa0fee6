use crate::lexer::Location;
use serde::Serialize;
use std::fmt;

/// Token kinds
///
/// Keywords (`if`, `loop`, `break`) are not distinguished here; the parser
/// recognizes them by comparing identifier text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum TokenKind {
    // Literals and identifiers
    IntegerLiteral(String),
    StringLiteral(String),
    Identifier(String),

    // Operators
    AssignOp,           // =
    AddOp,              // +
    SubtractOp,         // -
    MultiplyOp,         // *
    DivideOp,           // /
    EqualOp,            // ==
    LessThan,           // <
    LessThanOrEqual,    // <=
    GreaterThan,        // >
    GreaterThanOrEqual, // >=

    // Punctuation
    LeftParen,    // (
    RightParen,   // )
    LeftBrace,    // {
    RightBrace,   // }
    LeftBracket,  // [
    RightBracket, // ]
    Dot,          // .
    Comma,        // ,

    // Trivia
    Newline,
    Comment(String),
}

impl TokenKind {
    /// Text payload for literal, identifier and comment tokens.
    pub fn text(&self) -> Option<&str> {
        match self {
            TokenKind::IntegerLiteral(s)
            | TokenKind::StringLiteral(s)
            | TokenKind::Identifier(s)
            | TokenKind::Comment(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_identifier(&self, text: &str) -> bool {
        matches!(self, TokenKind::Identifier(s) if s == text)
    }

    /// Newlines and comments separate statements but carry no syntax.
    pub fn is_trivia(&self) -> bool {
        matches!(self, TokenKind::Newline | TokenKind::Comment(_))
    }

    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::IntegerLiteral(_) => "IntegerLiteral",
            TokenKind::StringLiteral(_) => "StringLiteral",
            TokenKind::Identifier(_) => "Identifier",
            TokenKind::AssignOp => "AssignOp",
            TokenKind::AddOp => "AddOp",
            TokenKind::SubtractOp => "SubtractOp",
            TokenKind::MultiplyOp => "MultiplyOp",
            TokenKind::DivideOp => "DivideOp",
            TokenKind::EqualOp => "EqualOp",
            TokenKind::LessThan => "LessThan",
            TokenKind::LessThanOrEqual => "LessThanOrEqual",
            TokenKind::GreaterThan => "GreaterThan",
            TokenKind::GreaterThanOrEqual => "GreaterThanOrEqual",
            TokenKind::LeftParen => "LeftParen",
            TokenKind::RightParen => "RightParen",
            TokenKind::LeftBrace => "LeftBrace",
            TokenKind::RightBrace => "RightBrace",
            TokenKind::LeftBracket => "LeftBracket",
            TokenKind::RightBracket => "RightBracket",
            TokenKind::Dot => "Dot",
            TokenKind::Comma => "Comma",
            TokenKind::Newline => "Newline",
            TokenKind::Comment(_) => "Comment",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.text() {
            Some(text) => write!(f, "{}({:?})", self.name(), text),
            None => write!(f, "{}", self.name()),
        }
    }
}

/// A token with location information
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub location: Location,
}

impl Token {
    pub fn new(kind: TokenKind, location: Location) -> Self {
        Self { kind, location }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.kind)
    }
}
