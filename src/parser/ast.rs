use crate::lexer::{Location, TokenKind};
use serde::Serialize;
use std::fmt;

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BinaryOperator {
    // Arithmetic
    Add,
    Subtract,
    Multiply,
    Divide,

    // Comparison
    Equal,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
}

impl BinaryOperator {
    pub fn from_token(kind: &TokenKind) -> Option<Self> {
        match kind {
            TokenKind::AddOp => Some(BinaryOperator::Add),
            TokenKind::SubtractOp => Some(BinaryOperator::Subtract),
            TokenKind::MultiplyOp => Some(BinaryOperator::Multiply),
            TokenKind::DivideOp => Some(BinaryOperator::Divide),
            TokenKind::EqualOp => Some(BinaryOperator::Equal),
            TokenKind::LessThan => Some(BinaryOperator::LessThan),
            TokenKind::LessThanOrEqual => Some(BinaryOperator::LessThanOrEqual),
            TokenKind::GreaterThan => Some(BinaryOperator::GreaterThan),
            TokenKind::GreaterThanOrEqual => Some(BinaryOperator::GreaterThanOrEqual),
            _ => None,
        }
    }

    /// Comparisons bind loosest, then `+ -`, then `* /`.
    pub fn precedence(&self) -> i32 {
        match self {
            BinaryOperator::Add | BinaryOperator::Subtract => 1,
            BinaryOperator::Multiply | BinaryOperator::Divide => 2,
            BinaryOperator::Equal
            | BinaryOperator::LessThan
            | BinaryOperator::LessThanOrEqual
            | BinaryOperator::GreaterThan
            | BinaryOperator::GreaterThanOrEqual => 0,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOperator::Add => "+",
            BinaryOperator::Subtract => "-",
            BinaryOperator::Multiply => "*",
            BinaryOperator::Divide => "/",
            BinaryOperator::Equal => "==",
            BinaryOperator::LessThan => "<",
            BinaryOperator::LessThanOrEqual => "<=",
            BinaryOperator::GreaterThan => ">",
            BinaryOperator::GreaterThanOrEqual => ">=",
        }
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Node variants
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum NodeKind {
    Program {
        statements: Vec<Node>,
    },
    VarAssign {
        var_type: Box<Node>,
        var_name: Box<Node>,
        init_value: Box<Node>,
    },
    FunCall {
        fun_name: Box<Node>,
        args: Vec<Node>,
    },
    BinaryOp {
        lhs: Box<Node>,
        op: BinaryOperator,
        rhs: Box<Node>,
    },
    IfStatement {
        cond: Box<Node>,
        consequent: Vec<Node>,
    },
    LoopStatement {
        body: Vec<Node>,
    },
    BreakStatement,
    IntLiteral {
        value: i64,
    },
    StrLiteral {
        value: String,
    },
    Identifier {
        name: String,
    },
    TypeIdentifier {
        name: String,
    },
}

/// AST node with location information
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Node {
    pub kind: NodeKind,
    pub location: Location,
}

impl Node {
    pub fn new(kind: NodeKind, location: Location) -> Self {
        Self { kind, location }
    }

    pub fn binary(lhs: Node, op: BinaryOperator, rhs: Node) -> Self {
        let location = Location::span(&lhs.location, &rhs.location);
        Self::new(
            NodeKind::BinaryOp {
                lhs: Box::new(lhs),
                op,
                rhs: Box::new(rhs),
            },
            location,
        )
    }

    /// Compares two trees while ignoring every location.
    pub fn same_shape(&self, other: &Node) -> bool {
        fn all_same(a: &[Node], b: &[Node]) -> bool {
            a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.same_shape(y))
        }

        match (&self.kind, &other.kind) {
            (NodeKind::Program { statements: a }, NodeKind::Program { statements: b }) => all_same(a, b),
            (
                NodeKind::VarAssign { var_type: t1, var_name: n1, init_value: v1 },
                NodeKind::VarAssign { var_type: t2, var_name: n2, init_value: v2 },
            ) => t1.same_shape(t2) && n1.same_shape(n2) && v1.same_shape(v2),
            (
                NodeKind::FunCall { fun_name: n1, args: a1 },
                NodeKind::FunCall { fun_name: n2, args: a2 },
            ) => n1.same_shape(n2) && all_same(a1, a2),
            (
                NodeKind::BinaryOp { lhs: l1, op: o1, rhs: r1 },
                NodeKind::BinaryOp { lhs: l2, op: o2, rhs: r2 },
            ) => o1 == o2 && l1.same_shape(l2) && r1.same_shape(r2),
            (
                NodeKind::IfStatement { cond: c1, consequent: s1 },
                NodeKind::IfStatement { cond: c2, consequent: s2 },
            ) => c1.same_shape(c2) && all_same(s1, s2),
            (NodeKind::LoopStatement { body: a }, NodeKind::LoopStatement { body: b }) => all_same(a, b),
            (a, b) => a == b,
        }
    }
}
