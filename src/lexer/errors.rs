use serde::Serialize;
use thiserror::Error;

/// Span in the source file.
///
/// Offsets are byte offsets with an exclusive end. Lines are 1-based and
/// columns 0-based; the column resets to 0 after every newline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Location {
    pub start_offset: usize,
    pub end_offset: usize,
    pub start_line: usize,
    pub end_line: usize,
    pub start_column: usize,
    pub end_column: usize,
}

impl Location {
    pub fn new(start: Position, end: Position) -> Self {
        Self {
            start_offset: start.offset,
            end_offset: end.offset,
            start_line: start.line,
            end_line: end.line,
            start_column: start.column,
            end_column: end.column,
        }
    }

    /// Location covering `first` through `last`.
    pub fn span(first: &Location, last: &Location) -> Self {
        Self {
            start_offset: first.start_offset,
            end_offset: last.end_offset,
            start_line: first.start_line,
            end_line: last.end_line,
            start_column: first.start_column,
            end_column: last.end_column,
        }
    }

    pub fn start(&self) -> Position {
        Position::new(self.start_offset, self.start_line, self.start_column)
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{},{},{},{},{},{}",
            self.start_offset,
            self.end_offset,
            self.start_line,
            self.end_line,
            self.start_column,
            self.end_column
        )
    }
}

/// A single point in the source file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(offset: usize, line: usize, column: usize) -> Self {
        Self { offset, line, column }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "line {}, char {}, offset {}", self.line, self.column, self.offset)
    }
}

/// Longest run of characters a single token may accumulate.
pub const MAX_TOKEN_LEN: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexErrorKind {
    IdTooLong,
    NumberTooLong,
    StrTooLong,
    CommentTooLong,
    UnknownChar,
    UnterminatedString,
}

impl std::fmt::Display for LexErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let s = match self {
            LexErrorKind::IdTooLong => "identifier too long",
            LexErrorKind::NumberTooLong => "number too long",
            LexErrorKind::StrTooLong => "string literal too long",
            LexErrorKind::CommentTooLong => "comment too long",
            LexErrorKind::UnknownChar => "unknown character",
            LexErrorKind::UnterminatedString => "unterminated string literal",
        };
        write!(f, "{}", s)
    }
}

/// Fatal lexer error with the position where scanning stopped.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind} at line {line}, char {character}, offset {offset}")]
pub struct LexError {
    pub kind: LexErrorKind,
    pub offset: usize,
    pub line: usize,
    pub character: usize,
}

impl LexError {
    pub fn new(kind: LexErrorKind, pos: Position) -> Self {
        Self {
            kind,
            offset: pos.offset,
            line: pos.line,
            character: pos.column,
        }
    }

    pub fn position(&self) -> Position {
        Position::new(self.offset, self.line, self.character)
    }
}
