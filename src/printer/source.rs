use crate::parser::{Node, NodeKind};

const INDENT: &str = "  ";

/// Canonical source text for `node`.
///
/// Statements go on their own lines and block bodies are indented by two
/// spaces. Binary expressions are written without parentheses, so for any
/// tree the parser produced, parsing the output yields the same tree.
pub fn to_source(node: &Node) -> String {
    let mut out = String::new();
    match &node.kind {
        NodeKind::Program { statements } => write_statements(&mut out, statements, 0),
        _ => write_node(&mut out, node, 0),
    }
    out
}

fn write_statements(out: &mut String, statements: &[Node], level: usize) {
    for statement in statements {
        out.push_str(&INDENT.repeat(level));
        write_node(out, statement, level);
        out.push('\n');
    }
}

fn write_block(out: &mut String, statements: &[Node], level: usize) {
    out.push_str("{\n");
    write_statements(out, statements, level + 1);
    out.push_str(&INDENT.repeat(level));
    out.push('}');
}

fn write_node(out: &mut String, node: &Node, level: usize) {
    match &node.kind {
        NodeKind::Program { statements } => write_statements(out, statements, level),
        NodeKind::VarAssign {
            var_type,
            var_name,
            init_value,
        } => {
            write_node(out, var_type, level);
            out.push(' ');
            write_node(out, var_name, level);
            out.push_str(" = ");
            write_node(out, init_value, level);
        }
        NodeKind::FunCall { fun_name, args } => {
            write_node(out, fun_name, level);
            out.push('(');
            for (i, arg) in args.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_node(out, arg, level);
            }
            out.push(')');
        }
        NodeKind::BinaryOp { lhs, op, rhs } => {
            write_node(out, lhs, level);
            out.push_str(&format!(" {} ", op));
            write_node(out, rhs, level);
        }
        NodeKind::IfStatement { cond, consequent } => {
            out.push_str("if ");
            write_node(out, cond, level);
            out.push(' ');
            write_block(out, consequent, level);
        }
        NodeKind::LoopStatement { body } => {
            out.push_str("loop ");
            write_block(out, body, level);
        }
        NodeKind::BreakStatement => out.push_str("break"),
        NodeKind::IntLiteral { value } => out.push_str(&value.to_string()),
        NodeKind::StrLiteral { value } => {
            out.push('"');
            out.push_str(&escape_string(value));
            out.push('"');
        }
        NodeKind::Identifier { name } | NodeKind::TypeIdentifier { name } => out.push_str(name),
    }
}

/// Inverse of the lexer's escape decoding.
fn escape_string(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\t' => escaped.push_str("\\t"),
            '\n' => escaped.push_str("\\n"),
            other => escaped.push(other),
        }
    }
    escaped
}
