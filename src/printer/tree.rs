use crate::parser::{Node, NodeKind};

const INDENT: &str = "  ";

/// Render `node` as an indented tree, one node per line.
pub fn dump_tree(node: &Node) -> String {
    let mut out = String::new();
    write_node(&mut out, node, 0);
    out
}

fn line(out: &mut String, level: usize, text: &str) {
    out.push_str(&INDENT.repeat(level));
    out.push_str(text);
    out.push('\n');
}

fn write_node(out: &mut String, node: &Node, level: usize) {
    match &node.kind {
        NodeKind::Program { statements } => {
            line(out, level, "Program");
            for statement in statements {
                write_node(out, statement, level + 1);
            }
        }
        NodeKind::VarAssign {
            var_type,
            var_name,
            init_value,
        } => {
            line(out, level, "VarAssign");
            write_node(out, var_type, level + 1);
            write_node(out, var_name, level + 1);
            write_node(out, init_value, level + 1);
        }
        NodeKind::FunCall { fun_name, args } => {
            line(out, level, "FunCall");
            write_node(out, fun_name, level + 1);
            line(out, level + 1, "Args:");
            for arg in args {
                write_node(out, arg, level + 2);
            }
        }
        NodeKind::BinaryOp { lhs, op, rhs } => {
            line(out, level, &format!("BinaryOp({})", op));
            write_node(out, lhs, level + 1);
            write_node(out, rhs, level + 1);
        }
        NodeKind::IfStatement { cond, consequent } => {
            line(out, level, "IfStatement");
            write_node(out, cond, level + 1);
            line(out, level + 1, "Then:");
            for statement in consequent {
                write_node(out, statement, level + 2);
            }
        }
        NodeKind::LoopStatement { body } => {
            line(out, level, "LoopStatement");
            for statement in body {
                write_node(out, statement, level + 1);
            }
        }
        NodeKind::BreakStatement => line(out, level, "BreakStatement"),
        NodeKind::IntLiteral { value } => line(out, level, &format!("IntLiteral({})", value)),
        NodeKind::StrLiteral { value } => line(out, level, &format!("StrLiteral({:?})", value)),
        NodeKind::Identifier { name } => line(out, level, &format!("Identifier({})", name)),
        NodeKind::TypeIdentifier { name } => line(out, level, &format!("TypeIdentifier({})", name)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;
    use crate::parser::{parse, ParseOutcome};
    use expect_test::expect;

    fn program(source: &str) -> Node {
        match parse(&tokenize(source).unwrap()) {
            ParseOutcome::Success(program) => program,
            other => panic!("expected a parsed program, got {:?}", other),
        }
    }

    #[test]
    fn test_dump_statements() {
        let tree = dump_tree(&program("int x = 1 + 2 * 3\nprint(x, \"done\")\n"));
        expect![[r#"
            Program
              VarAssign
                TypeIdentifier(int)
                Identifier(x)
                BinaryOp(+)
                  IntLiteral(1)
                  BinaryOp(*)
                    IntLiteral(2)
                    IntLiteral(3)
              FunCall
                Identifier(print)
                Args:
                  Identifier(x)
                  StrLiteral("done")
        "#]]
        .assert_eq(&tree);
    }

    #[test]
    fn test_dump_control_flow() {
        let tree = dump_tree(&program("loop {\n  if n >= 10 {\n    break\n  }\n}"));
        expect![[r#"
            Program
              LoopStatement
                IfStatement
                  BinaryOp(>=)
                    Identifier(n)
                    IntLiteral(10)
                  Then:
                    BreakStatement
        "#]]
        .assert_eq(&tree);
    }
}
