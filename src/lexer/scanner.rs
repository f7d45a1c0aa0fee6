use crate::lexer::{LexError, LexErrorKind, Location, Position, Token, TokenKind, MAX_TOKEN_LEN};
use tracing::{debug, trace};

/// Single-pass scanner over ASCII source text.
///
/// The scanner works on bytes and holds one byte of lookahead; it never
/// moves backwards.
pub struct Scanner<'a> {
    input: &'a [u8],
    current: usize,
    line: usize,
    column: usize,
    tokens: Vec<Token>,
}

impl<'a> Scanner<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input: input.as_bytes(),
            current: 0,
            line: 1,
            column: 0,
            tokens: Vec::new(),
        }
    }

    pub fn scan_all(mut self) -> Result<Vec<Token>, LexError> {
        while let Some(ch) = self.peek() {
            if ch == b' ' {
                self.advance();
                continue;
            }

            let token = self.scan_token()?;
            trace!(token = %token.kind, location = %token.location, "scanned token");
            self.tokens.push(token);
        }

        debug!(count = self.tokens.len(), "tokenized input");
        Ok(self.tokens)
    }

    fn current_position(&self) -> Position {
        Position::new(self.current, self.line, self.column)
    }

    fn peek(&self) -> Option<u8> {
        self.input.get(self.current).copied()
    }

    fn advance(&mut self) -> Option<u8> {
        let ch = self.peek()?;
        self.current += 1;
        if ch == b'\n' {
            self.line += 1;
            self.column = 0;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    fn match_char(&mut self, expected: u8) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn scan_token(&mut self) -> Result<Token, LexError> {
        let start = self.current_position();

        let ch = match self.advance() {
            Some(ch) => ch,
            None => return Err(LexError::new(LexErrorKind::UnknownChar, start)),
        };

        let kind = match ch {
            b'(' => TokenKind::LeftParen,
            b')' => TokenKind::RightParen,
            b'{' => TokenKind::LeftBrace,
            b'}' => TokenKind::RightBrace,
            b'[' => TokenKind::LeftBracket,
            b']' => TokenKind::RightBracket,
            b'.' => TokenKind::Dot,
            b',' => TokenKind::Comma,
            b'+' => TokenKind::AddOp,
            b'-' => TokenKind::SubtractOp,
            b'*' => TokenKind::MultiplyOp,
            b'/' => TokenKind::DivideOp,

            b'\n' => TokenKind::Newline,

            b'=' => {
                if self.match_char(b'=') {
                    TokenKind::EqualOp
                } else {
                    TokenKind::AssignOp
                }
            }
            b'<' => {
                if self.match_char(b'=') {
                    TokenKind::LessThanOrEqual
                } else {
                    TokenKind::LessThan
                }
            }
            b'>' => {
                if self.match_char(b'=') {
                    TokenKind::GreaterThanOrEqual
                } else {
                    TokenKind::GreaterThan
                }
            }

            b'"' => TokenKind::StringLiteral(self.scan_string_literal(start)?),
            b'#' => TokenKind::Comment(self.scan_comment()?),

            ch if ch.is_ascii_digit() => TokenKind::IntegerLiteral(self.scan_run(
                ch,
                |c| c.is_ascii_digit(),
                LexErrorKind::NumberTooLong,
            )?),
            ch if ch.is_ascii_alphabetic() => TokenKind::Identifier(self.scan_run(
                ch,
                |c| c.is_ascii_alphabetic(),
                LexErrorKind::IdTooLong,
            )?),

            _ => return Err(LexError::new(LexErrorKind::UnknownChar, start)),
        };

        Ok(Token::new(kind, Location::new(start, self.current_position())))
    }

    /// Accumulates `first` and every following byte accepted by `accept`.
    fn scan_run(
        &mut self,
        first: u8,
        accept: impl Fn(u8) -> bool,
        too_long: LexErrorKind,
    ) -> Result<String, LexError> {
        let mut text = vec![first];

        while let Some(ch) = self.peek().filter(|&c| accept(c)) {
            self.push_bounded(&mut text, ch, too_long)?;
            self.advance();
        }

        Ok(into_text(text))
    }

    fn scan_string_literal(&mut self, start: Position) -> Result<String, LexError> {
        let mut value = Vec::new();

        loop {
            match self.peek() {
                None => return Err(LexError::new(LexErrorKind::UnterminatedString, start)),
                Some(b'"') => {
                    self.advance();
                    break;
                }
                Some(b'\\') => {
                    let escape_pos = self.current_position();
                    self.advance();
                    let escaped = self
                        .advance()
                        .ok_or_else(|| LexError::new(LexErrorKind::UnterminatedString, start))?;
                    let ch = match escaped {
                        b't' => b'\t',
                        b'n' => b'\n',
                        other => other,
                    };
                    if value.len() >= MAX_TOKEN_LEN {
                        return Err(LexError::new(LexErrorKind::StrTooLong, escape_pos));
                    }
                    value.push(ch);
                }
                Some(ch) => {
                    self.push_bounded(&mut value, ch, LexErrorKind::StrTooLong)?;
                    self.advance();
                }
            }
        }

        Ok(into_text(value))
    }

    /// Consumes a `#` comment through its newline (or end of input).
    fn scan_comment(&mut self) -> Result<String, LexError> {
        let mut body = Vec::new();

        while let Some(ch) = self.peek() {
            if ch == b'\n' {
                self.advance();
                break;
            }
            self.push_bounded(&mut body, ch, LexErrorKind::CommentTooLong)?;
            self.advance();
        }

        Ok(into_text(body))
    }

    /// Pushes the byte under the cursor, failing at its position if the
    /// buffer is already full.
    fn push_bounded(&self, buffer: &mut Vec<u8>, ch: u8, too_long: LexErrorKind) -> Result<(), LexError> {
        if buffer.len() >= MAX_TOKEN_LEN {
            return Err(LexError::new(too_long, self.current_position()));
        }
        buffer.push(ch);
        Ok(())
    }
}

fn into_text(bytes: Vec<u8>) -> String {
    String::from_utf8(bytes).unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned())
}

// Convenience function for tokenizing input
pub fn tokenize(input: &str) -> Result<Vec<Token>, LexError> {
    Scanner::new(input).scan_all()
}
