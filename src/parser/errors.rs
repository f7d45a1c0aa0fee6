use crate::parser::Node;
use thiserror::Error;

/// Why a single parse function gave up.
///
/// `at` is the index of the token where matching stopped; an index equal to
/// the token count means the input ran out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseFailure {
    /// Local mismatch; the caller may try another alternative.
    NoMatch { at: usize },
    /// Must not be retried with a different alternative.
    Unrecoverable { at: usize, reason: String },
}

impl ParseFailure {
    pub fn at(&self) -> usize {
        match self {
            ParseFailure::NoMatch { at } | ParseFailure::Unrecoverable { at, .. } => *at,
        }
    }

    /// Keeps whichever failure got further into the input.
    pub fn furthest(self, other: ParseFailure) -> ParseFailure {
        if other.at() > self.at() {
            other
        } else {
            self
        }
    }
}

/// Result of parsing a whole token sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseOutcome {
    Success(Node),
    /// No statement matched; `at` is the offending token, `None` at end of input.
    NoMatch { at: Option<usize> },
    /// A program was parsed but tokens from `at` onward were left over.
    ExtraTokens { program: Node, at: usize },
    Unrecoverable { at: Option<usize>, reason: String },
}

impl ParseOutcome {
    /// The partially or fully parsed program, if any.
    pub fn program(&self) -> Option<&Node> {
        match self {
            ParseOutcome::Success(program) | ParseOutcome::ExtraTokens { program, .. } => Some(program),
            ParseOutcome::NoMatch { .. } | ParseOutcome::Unrecoverable { .. } => None,
        }
    }

    /// Index of the token the outcome points at, if it is a failure.
    pub fn failing_token(&self) -> Option<usize> {
        match self {
            ParseOutcome::Success(_) => None,
            ParseOutcome::ExtraTokens { at, .. } => Some(*at),
            ParseOutcome::NoMatch { at } | ParseOutcome::Unrecoverable { at, .. } => *at,
        }
    }

    pub fn into_result(self) -> Result<Node, ParseError> {
        match self {
            ParseOutcome::Success(program) => Ok(program),
            ParseOutcome::NoMatch { at: Some(at) } => Err(ParseError::NoMatch(at)),
            ParseOutcome::NoMatch { at: None } => Err(ParseError::UnexpectedEof),
            ParseOutcome::ExtraTokens { at, .. } => Err(ParseError::ExtraTokens(at)),
            ParseOutcome::Unrecoverable { reason, .. } => Err(ParseError::Unrecoverable(reason)),
        }
    }
}

/// Parser error types
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("No statement matches at token {0}")]
    NoMatch(usize),

    #[error("Unexpected end of input")]
    UnexpectedEof,

    #[error("Unexpected extra tokens starting at token {0}")]
    ExtraTokens(usize),

    #[error("{0}")]
    Unrecoverable(String),

    #[error("Lexer error: {0}")]
    LexerError(#[from] crate::lexer::LexError),
}
