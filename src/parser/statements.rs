use crate::lexer::{Location, Token, TokenKind};
use crate::parser::expressions::{parse_expr, parse_fun_call, Cursor, ParseResult};
use crate::parser::{Node, NodeKind, ParseFailure, ParseOutcome};
use tracing::{debug, trace, warn};

type StatementParser = for<'t> fn(Cursor<'t>) -> ParseResult<'t, Node>;

/// Statement forms in the order they are tried
const STATEMENT_FORMS: [(&str, StatementParser); 5] = [
    ("var_assign", parse_var_assign),
    ("fun_call", parse_fun_call),
    ("if_statement", parse_if_statement),
    ("loop_statement", parse_loop_statement),
    ("break_statement", parse_break_statement),
];

/// Parse a complete program.
///
/// Parsing stops at end of input or at a closing brace with no matching
/// opening brace; in the latter case the statements before it are returned
/// as [`ParseOutcome::ExtraTokens`].
pub fn parse(tokens: &[Token]) -> ParseOutcome {
    let outcome = match parse_statements(Cursor::new(tokens)) {
        Ok((statements, rest)) => {
            let program = program_node(statements);
            if rest.is_at_end() {
                ParseOutcome::Success(program)
            } else {
                warn!(at = rest.position(), "tokens left after program");
                ParseOutcome::ExtraTokens {
                    program,
                    at: rest.position(),
                }
            }
        }
        Err(ParseFailure::NoMatch { at }) => ParseOutcome::NoMatch {
            at: (at < tokens.len()).then_some(at),
        },
        Err(ParseFailure::Unrecoverable { at, reason }) => ParseOutcome::Unrecoverable {
            at: (at < tokens.len()).then_some(at),
            reason,
        },
    };

    debug!(tokens = tokens.len(), failing_token = ?outcome.failing_token(), "parsed program");
    outcome
}

fn program_node(statements: Vec<Node>) -> Node {
    let location = match (statements.first(), statements.last()) {
        (Some(first), Some(last)) => Location::span(&first.location, &last.location),
        _ => Location::default(),
    };
    Node::new(NodeKind::Program { statements }, location)
}

/// Parse statements until a closing brace or end of input.
pub fn parse_statements(cursor: Cursor<'_>) -> ParseResult<'_, Vec<Node>> {
    let mut cursor = cursor.skip_trivia();
    let mut statements = Vec::new();

    while !cursor.is_at_end() && !cursor.check(&TokenKind::RightBrace) {
        let (statement, next) = parse_statement(cursor)?;
        statements.push(statement);
        cursor = next.skip_trivia();
    }

    Ok((statements, cursor))
}

/// Parse a statement, trying each form in turn.
///
/// When every form fails, the failure that got furthest is reported.
pub fn parse_statement(cursor: Cursor<'_>) -> ParseResult<'_, Node> {
    let mut failure = cursor.no_match();

    for (form, parse_form) in STATEMENT_FORMS {
        match parse_form(cursor) {
            Ok(found) => {
                trace!(form, at = cursor.position(), "matched statement");
                return Ok(found);
            }
            Err(err @ ParseFailure::Unrecoverable { .. }) => return Err(err),
            Err(err) => failure = failure.furthest(err),
        }
    }

    Err(failure)
}

/// Parse `type name = expr`
fn parse_var_assign(cursor: Cursor<'_>) -> ParseResult<'_, Node> {
    let ((type_name, type_location), cursor) = cursor.expect_identifier()?;
    let ((var_name, name_location), cursor) = cursor.expect_identifier()?;
    let (_, cursor) = cursor.expect(&TokenKind::AssignOp)?;
    let (init_value, cursor) = parse_expr(cursor)?;

    let location = Location::span(&type_location, &init_value.location);
    let var_type = Node::new(
        NodeKind::TypeIdentifier {
            name: type_name.to_string(),
        },
        type_location,
    );
    let var_name = Node::new(
        NodeKind::Identifier {
            name: var_name.to_string(),
        },
        name_location,
    );

    Ok((
        Node::new(
            NodeKind::VarAssign {
                var_type: Box::new(var_type),
                var_name: Box::new(var_name),
                init_value: Box::new(init_value),
            },
            location,
        ),
        cursor,
    ))
}

/// Parse `{ statements }`, returning the statements and the closing brace location
fn parse_block(cursor: Cursor<'_>) -> ParseResult<'_, (Vec<Node>, Location)> {
    let (_, cursor) = cursor.expect(&TokenKind::LeftBrace)?;
    let (statements, cursor) = parse_statements(cursor)?;
    let (right_brace, cursor) = cursor.expect(&TokenKind::RightBrace)?;
    Ok(((statements, right_brace.location), cursor))
}

/// Parse `if cond { ... }`
fn parse_if_statement(cursor: Cursor<'_>) -> ParseResult<'_, Node> {
    let (if_location, cursor) = cursor.expect_keyword("if")?;
    let (cond, cursor) = parse_expr(cursor)?;
    let ((consequent, end), cursor) = parse_block(cursor)?;

    Ok((
        Node::new(
            NodeKind::IfStatement {
                cond: Box::new(cond),
                consequent,
            },
            Location::span(&if_location, &end),
        ),
        cursor,
    ))
}

/// Parse `loop { ... }`
fn parse_loop_statement(cursor: Cursor<'_>) -> ParseResult<'_, Node> {
    let (loop_location, cursor) = cursor.expect_keyword("loop")?;
    let ((body, end), cursor) = parse_block(cursor)?;

    Ok((
        Node::new(NodeKind::LoopStatement { body }, Location::span(&loop_location, &end)),
        cursor,
    ))
}

/// Parse `break`
fn parse_break_statement(cursor: Cursor<'_>) -> ParseResult<'_, Node> {
    let (location, cursor) = cursor.expect_keyword("break")?;
    Ok((Node::new(NodeKind::BreakStatement, location), cursor))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;
    use crate::parser::BinaryOperator;

    fn parse_source(source: &str) -> ParseOutcome {
        let tokens = tokenize(source).unwrap();
        parse(&tokens)
    }

    fn statements(source: &str) -> Vec<Node> {
        match parse_source(source) {
            ParseOutcome::Success(Node {
                kind: NodeKind::Program { statements },
                ..
            }) => statements,
            other => panic!("expected a parsed program, got {:?}", other),
        }
    }

    fn int(node: &Node) -> i64 {
        match node.kind {
            NodeKind::IntLiteral { value } => value,
            ref other => panic!("expected integer literal, got {:?}", other),
        }
    }

    fn name(node: &Node) -> &str {
        match &node.kind {
            NodeKind::Identifier { name } | NodeKind::TypeIdentifier { name } => name,
            other => panic!("expected identifier, got {:?}", other),
        }
    }

    #[test]
    fn test_var_assign_with_precedence() {
        let stmts = statements("int x = 1 + 2 * 3");
        assert_eq!(stmts.len(), 1);

        match &stmts[0].kind {
            NodeKind::VarAssign {
                var_type,
                var_name,
                init_value,
            } => {
                assert!(matches!(var_type.kind, NodeKind::TypeIdentifier { ref name } if name == "int"));
                assert_eq!(name(var_name), "x");
                match &init_value.kind {
                    NodeKind::BinaryOp { lhs, op, rhs } => {
                        assert_eq!(*op, BinaryOperator::Add);
                        assert_eq!(int(lhs), 1);
                        match &rhs.kind {
                            NodeKind::BinaryOp { lhs, op, rhs } => {
                                assert_eq!(*op, BinaryOperator::Multiply);
                                assert_eq!(int(lhs), 2);
                                assert_eq!(int(rhs), 3);
                            }
                            other => panic!("expected multiplication, got {:?}", other),
                        }
                    }
                    other => panic!("expected addition, got {:?}", other),
                }
            }
            other => panic!("expected var assign, got {:?}", other),
        }
        assert_eq!(stmts[0].location.start_offset, 0);
        assert_eq!(stmts[0].location.end_offset, 17);
    }

    #[test]
    fn test_fun_call_statement() {
        let stmts = statements("print(1, 2, 3)");
        match &stmts[0].kind {
            NodeKind::FunCall { fun_name, args } => {
                assert_eq!(name(fun_name), "print");
                assert_eq!(args.iter().map(int).collect::<Vec<_>>(), vec![1, 2, 3]);
            }
            other => panic!("expected function call, got {:?}", other),
        }
    }

    #[test]
    fn test_if_break() {
        let stmts = statements("if x { break }");
        match &stmts[0].kind {
            NodeKind::IfStatement { cond, consequent } => {
                assert_eq!(name(cond), "x");
                assert_eq!(consequent.len(), 1);
                assert!(matches!(consequent[0].kind, NodeKind::BreakStatement));
            }
            other => panic!("expected if statement, got {:?}", other),
        }
        assert_eq!(stmts[0].location.end_offset, 14);
    }

    #[test]
    fn test_loop_with_multiline_body() {
        let source = "loop {\n\n  int i = i + 1\n  if i > 10 {\n    break\n  }\n}\nprint(i)\n";
        let stmts = statements(source);
        assert_eq!(stmts.len(), 2);
        match &stmts[0].kind {
            NodeKind::LoopStatement { body } => {
                assert_eq!(body.len(), 2);
                assert!(matches!(body[0].kind, NodeKind::VarAssign { .. }));
                assert!(matches!(body[1].kind, NodeKind::IfStatement { .. }));
            }
            other => panic!("expected loop, got {:?}", other),
        }
        assert!(matches!(stmts[1].kind, NodeKind::FunCall { .. }));
    }

    #[test]
    fn test_empty_blocks_and_programs() {
        assert!(statements("").is_empty());
        assert!(statements("\n\n# only a comment\n").is_empty());
        match &statements("loop {}")[0].kind {
            NodeKind::LoopStatement { body } => assert!(body.is_empty()),
            other => panic!("expected loop, got {:?}", other),
        }
    }

    #[test]
    fn test_comments_separate_statements() {
        let stmts = statements("int a = 1 # first\nint b = 2\n");
        assert_eq!(stmts.len(), 2);
    }

    #[test]
    fn test_keywords_only_by_position() {
        // `if(...)` is tried as a call before the if-statement form.
        let stmts = statements("if(1)");
        assert!(matches!(stmts[0].kind, NodeKind::FunCall { .. }));

        let stmts = statements("int loop = 3");
        assert!(matches!(stmts[0].kind, NodeKind::VarAssign { .. }));
    }

    #[test]
    fn test_unmatched_brace_gives_extra_tokens() {
        match parse_source("int x = 1\nprint(x)\n}\nint y = 2") {
            ParseOutcome::ExtraTokens { program, at } => {
                assert_eq!(at, 10);
                match program.kind {
                    NodeKind::Program { statements } => {
                        assert_eq!(statements.len(), 2);
                        assert!(matches!(statements[1].kind, NodeKind::FunCall { .. }));
                    }
                    other => panic!("expected program, got {:?}", other),
                }
            }
            other => panic!("expected extra tokens, got {:?}", other),
        }
    }

    #[test]
    fn test_no_match_points_at_furthest_token() {
        // `x = 1`: the var-assign form fails on `=`, the other forms earlier.
        assert_eq!(parse_source("x = 1"), ParseOutcome::NoMatch { at: Some(1) });
        assert_eq!(parse_source("int x = 1\n)"), ParseOutcome::NoMatch { at: Some(5) });
    }

    #[test]
    fn test_no_match_at_end_of_input() {
        assert_eq!(parse_source("print(1,"), ParseOutcome::NoMatch { at: None });
        assert_eq!(parse_source("if x {\nbreak\n"), ParseOutcome::NoMatch { at: None });
    }

    #[test]
    fn test_unrecoverable_stops_alternatives() {
        match parse_source("int x = 123456789012345678901234567890") {
            ParseOutcome::Unrecoverable { at, reason } => {
                assert_eq!(at, Some(3));
                assert!(reason.contains("does not fit"));
            }
            other => panic!("expected unrecoverable, got {:?}", other),
        }
    }

    #[test]
    fn test_parser_does_not_consume_on_failure() {
        let tokens = tokenize("break").unwrap();
        let cursor = Cursor::new(&tokens);
        assert!(parse_var_assign(cursor).is_err());
        let (node, rest) = parse_statement(cursor).unwrap();
        assert!(matches!(node.kind, NodeKind::BreakStatement));
        assert!(rest.is_at_end());
        assert_eq!(cursor.position(), 0);
    }
}
