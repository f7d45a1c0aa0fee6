use crate::lexer::{Location, Token, TokenKind};
use crate::parser::{BinaryOperator, Node, NodeKind, ParseFailure};

/// Outcome of one parse function: the node plus the cursor after it.
pub type ParseResult<'t, T> = Result<(T, Cursor<'t>), ParseFailure>;

/// Read-only position in a token slice.
///
/// Parse functions take a cursor by value and hand back the cursor that
/// follows what they consumed, so a failed alternative leaves nothing to undo.
#[derive(Debug, Clone, Copy)]
pub struct Cursor<'t> {
    tokens: &'t [Token],
    current: usize,
}

impl<'t> Cursor<'t> {
    #[must_use]
    pub fn new(tokens: &'t [Token]) -> Self {
        Self { tokens, current: 0 }
    }

    /// Index of the next unread token
    pub fn position(&self) -> usize {
        self.current
    }

    pub fn is_at_end(&self) -> bool {
        self.current >= self.tokens.len()
    }

    /// Peek at current token without consuming it
    pub fn peek(&self) -> Option<&'t Token> {
        self.tokens.get(self.current)
    }

    /// Cursor one token further on
    #[must_use]
    pub fn advance(self) -> Self {
        Self {
            tokens: self.tokens,
            current: (self.current + 1).min(self.tokens.len()),
        }
    }

    /// Check if current token is of the same kind, ignoring any payload
    pub fn check(&self, kind: &TokenKind) -> bool {
        self.peek()
            .is_some_and(|token| std::mem::discriminant(&token.kind) == std::mem::discriminant(kind))
    }

    /// Skip newline and comment tokens
    #[must_use]
    pub fn skip_trivia(mut self) -> Self {
        while self.peek().is_some_and(|token| token.kind.is_trivia()) {
            self = self.advance();
        }
        self
    }

    pub(crate) fn no_match(&self) -> ParseFailure {
        ParseFailure::NoMatch { at: self.current }
    }

    /// Consume a token of the given kind
    pub(crate) fn expect(self, kind: &TokenKind) -> ParseResult<'t, &'t Token> {
        match self.peek() {
            Some(token) if self.check(kind) => Ok((token, self.advance())),
            _ => Err(self.no_match()),
        }
    }

    /// Consume an identifier and return its text
    pub(crate) fn expect_identifier(self) -> ParseResult<'t, (&'t str, Location)> {
        match self.peek() {
            Some(Token { kind: TokenKind::Identifier(name), location }) => Ok(((name.as_str(), *location), self.advance())),
            _ => Err(self.no_match()),
        }
    }

    /// Consume an identifier spelled exactly `keyword`
    pub(crate) fn expect_keyword(self, keyword: &str) -> ParseResult<'t, Location> {
        match self.peek() {
            Some(token) if token.kind.is_identifier(keyword) => Ok((token.location, self.advance())),
            _ => Err(self.no_match()),
        }
    }
}

/// Parse an expression
pub fn parse_expr(cursor: Cursor<'_>) -> ParseResult<'_, Node> {
    parse_binary_op(cursor)
}

/// Parse `operand (op expr)?`.
///
/// The recursion makes every chain right-leaning; [`rebalance`] then fixes
/// one precedence inversion at this level.
fn parse_binary_op(cursor: Cursor<'_>) -> ParseResult<'_, Node> {
    let (lhs, cursor) = parse_unary_op(cursor)?;

    let op = match cursor.peek().and_then(|token| BinaryOperator::from_token(&token.kind)) {
        Some(op) => op,
        None => return Ok((lhs, cursor)),
    };

    let cursor = cursor.advance();
    if cursor.is_at_end() {
        return Err(cursor.no_match());
    }

    let (rhs, cursor) = parse_binary_op(cursor)?;
    Ok((rebalance(lhs, op, rhs), cursor))
}

/// Rotates `lhs op (a rhs_op b)` into `(lhs op a) rhs_op b` when `op` binds
/// tighter than `rhs_op`. Only the top of `rhs` is inspected.
fn rebalance(lhs: Node, op: BinaryOperator, rhs: Node) -> Node {
    let Node { kind, location } = rhs;
    match kind {
        NodeKind::BinaryOp {
            lhs: inner_lhs,
            op: inner_op,
            rhs: inner_rhs,
        } if op.precedence() > inner_op.precedence() => {
            Node::binary(Node::binary(lhs, op, *inner_lhs), inner_op, *inner_rhs)
        }
        kind => Node::binary(lhs, op, Node::new(kind, location)),
    }
}

/// Parse a function call or a literal/identifier operand
fn parse_unary_op(cursor: Cursor<'_>) -> ParseResult<'_, Node> {
    match parse_fun_call(cursor) {
        Err(ParseFailure::NoMatch { .. }) => {}
        result => return result,
    }

    let token = cursor.peek().ok_or_else(|| cursor.no_match())?;
    let kind = match &token.kind {
        TokenKind::IntegerLiteral(text) => {
            let value = text.parse::<i64>().map_err(|_| ParseFailure::Unrecoverable {
                at: cursor.position(),
                reason: format!("integer literal {} does not fit in 64 bits", text),
            })?;
            NodeKind::IntLiteral { value }
        }
        TokenKind::Identifier(name) => NodeKind::Identifier { name: name.clone() },
        TokenKind::StringLiteral(value) => NodeKind::StrLiteral { value: value.clone() },
        _ => return Err(cursor.no_match()),
    };

    Ok((Node::new(kind, token.location), cursor.advance()))
}

/// Parse `name(arg, ...)`
pub fn parse_fun_call(cursor: Cursor<'_>) -> ParseResult<'_, Node> {
    let ((name, name_location), cursor) = cursor.expect_identifier()?;
    let (_, mut cursor) = cursor.expect(&TokenKind::LeftParen)?;

    let mut args = Vec::new();
    if !cursor.check(&TokenKind::RightParen) {
        loop {
            let (arg, next) = parse_expr(cursor)?;
            args.push(arg);
            cursor = next;

            if cursor.is_at_end() {
                return Err(cursor.no_match());
            }
            if !cursor.check(&TokenKind::Comma) {
                break;
            }
            cursor = cursor.advance();
        }
    }

    let (right_paren, cursor) = cursor.expect(&TokenKind::RightParen)?;

    let fun_name = Node::new(NodeKind::Identifier { name: name.to_string() }, name_location);
    Ok((
        Node::new(
            NodeKind::FunCall {
                fun_name: Box::new(fun_name),
                args,
            },
            Location::span(&name_location, &right_paren.location),
        ),
        cursor,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;

    /// Renders an expression as a fully parenthesized prefix form.
    fn sexpr(node: &Node) -> String {
        match &node.kind {
            NodeKind::BinaryOp { lhs, op, rhs } => format!("({} {} {})", op, sexpr(lhs), sexpr(rhs)),
            NodeKind::IntLiteral { value } => value.to_string(),
            NodeKind::Identifier { name } => name.clone(),
            NodeKind::StrLiteral { value } => format!("{:?}", value),
            NodeKind::FunCall { fun_name, args } => {
                let args: Vec<String> = args.iter().map(sexpr).collect();
                format!("{}[{}]", sexpr(fun_name), args.join(" "))
            }
            other => panic!("not an expression: {:?}", other),
        }
    }

    fn expr(source: &str) -> String {
        let tokens = tokenize(source).unwrap();
        let (node, rest) = parse_expr(Cursor::new(&tokens)).unwrap();
        assert!(rest.is_at_end(), "unconsumed input in {:?}", source);
        sexpr(&node)
    }

    fn expr_failure(source: &str) -> ParseFailure {
        let tokens = tokenize(source).unwrap();
        parse_expr(Cursor::new(&tokens)).unwrap_err()
    }

    #[test]
    fn test_primaries() {
        assert_eq!(expr("42"), "42");
        assert_eq!(expr("name"), "name");
        assert_eq!(expr("\"hi\""), "\"hi\"");
    }

    #[test]
    fn test_multiplication_binds_tighter() {
        assert_eq!(expr("1 + 2 * 3"), "(+ 1 (* 2 3))");
        assert_eq!(expr("2 * 3 + 1"), "(+ (* 2 3) 1)");
    }

    #[test]
    fn test_equal_precedence_stays_right_associated() {
        assert_eq!(expr("a + b - c"), "(+ a (- b c))");
        assert_eq!(expr("a / b * c"), "(/ a (* b c))");
    }

    #[test]
    fn test_single_rotation_baselines() {
        assert_eq!(expr("a * b + c * d"), "(+ (* a b) (* c d))");
        assert_eq!(expr("a * b * c + d"), "(+ (* a (* b c)) d)");
        assert_eq!(expr("a - b * c + d"), "(- a (+ (* b c) d))");
    }

    #[test]
    fn test_comparisons_bind_loosest() {
        assert_eq!(expr("1 + 2 < 3"), "(< (+ 1 2) 3)");
        assert_eq!(expr("1 < 2 + 3"), "(< 1 (+ 2 3))");
        assert_eq!(expr("x * 2 >= y"), "(>= (* x 2) y)");
    }

    #[test]
    fn test_function_calls() {
        assert_eq!(expr("f()"), "f[]");
        assert_eq!(expr("add(1, g(x), \"s\")"), "add[1 g[x] \"s\"]");
        assert_eq!(expr("f(1) + 2"), "(+ f[1] 2)");
        assert_eq!(expr("f(1 + 2 * 3)"), "f[(+ 1 (* 2 3))]");
    }

    #[test]
    fn test_rotated_locations_cover_operands() {
        let tokens = tokenize("2 * 3 + 10").unwrap();
        let (node, _) = parse_expr(Cursor::new(&tokens)).unwrap();
        assert_eq!((node.location.start_offset, node.location.end_offset), (0, 10));
        match &node.kind {
            NodeKind::BinaryOp { lhs, op, .. } => {
                assert_eq!(*op, BinaryOperator::Add);
                assert_eq!((lhs.location.start_offset, lhs.location.end_offset), (0, 5));
            }
            other => panic!("expected binary op, got {:?}", other),
        }
    }

    #[test]
    fn test_call_location_ends_at_paren() {
        let tokens = tokenize("f( )").unwrap();
        let (node, _) = parse_expr(Cursor::new(&tokens)).unwrap();
        assert_eq!((node.location.start_offset, node.location.end_offset), (0, 4));
    }

    #[test]
    fn test_dangling_operator_is_no_match() {
        assert_eq!(expr_failure("1 +"), ParseFailure::NoMatch { at: 2 });
        assert_eq!(expr_failure("1 + )"), ParseFailure::NoMatch { at: 2 });
    }

    #[test]
    fn test_unclosed_call_is_no_match() {
        let tokens = tokenize("f(1, 2").unwrap();
        let failure = parse_fun_call(Cursor::new(&tokens)).unwrap_err();
        assert_eq!(failure, ParseFailure::NoMatch { at: 5 });
    }

    #[test]
    fn test_unclosed_call_falls_back_to_identifier() {
        let tokens = tokenize("f(1 2)").unwrap();
        let (node, rest) = parse_expr(Cursor::new(&tokens)).unwrap();
        assert_eq!(sexpr(&node), "f");
        assert_eq!(rest.position(), 1);
    }

    #[test]
    fn test_integer_overflow_is_unrecoverable() {
        match expr_failure("1 + 99999999999999999999") {
            ParseFailure::Unrecoverable { at, reason } => {
                assert_eq!(at, 2);
                assert!(reason.contains("99999999999999999999"));
            }
            other => panic!("expected unrecoverable failure, got {:?}", other),
        }
        assert_eq!(expr("9223372036854775807"), "9223372036854775807");
    }
}
