use crate::{
    lexer::tokens::{Operator, Token, TokenKind},
    Position,
};

use super::{ast::Expr, statements::FuncDefStmt};

// CELLS

/// Cell Expression
/// A single identifier, number or string token used as an operand.
#[derive(Debug, Clone, PartialEq)]
pub struct CellExpr {
    pub token: Token,
    pub position: Position,
}

impl CellExpr {
    pub fn is_number(&self) -> bool {
        self.token.kind == TokenKind::Number
    }

    pub fn is_string(&self) -> bool {
        self.token.kind == TokenKind::String
    }
}

// OPERATORS

/// Unary Expression
/// A prefix `+`, `-`, `not` or `~` applied to a cell.
#[derive(Debug, Clone, PartialEq)]
pub struct UnaryExpr {
    pub op: Operator,
    pub operand: Box<Expr>,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpr {
    pub op: Operator,
    pub left: Box<Expr>,
    pub right: Box<Expr>,
    pub position: Position,
}

/// Ternary Expression
/// `then_expr if condition else else_expr`
#[derive(Debug, Clone, PartialEq)]
pub struct TernaryExpr {
    pub condition: Box<Expr>,
    pub then_expr: Box<Expr>,
    pub else_expr: Box<Expr>,
    pub position: Position,
}

// POSTFIX

#[derive(Debug, Clone, PartialEq)]
pub struct CallExpr {
    pub callee: Box<Expr>,
    pub arguments: Vec<Argument>,
    pub position: Position,
}

/// Argument
/// One call argument. At most one of the unpack flags is set, and a keyword
/// name is never combined with either of them.
#[derive(Debug, Clone, PartialEq)]
pub struct Argument {
    pub expr: Expr,
    /// `*expr`
    pub is_unpack_sequence: bool,
    /// `**expr`
    pub is_unpack_mapping: bool,
    /// `name = expr`
    pub keyword_name: Option<String>,
    pub position: Position,
}

impl Argument {
    pub fn positional(expr: Expr, position: Position) -> Self {
        Argument {
            expr,
            is_unpack_sequence: false,
            is_unpack_mapping: false,
            keyword_name: None,
            position,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SubscriptExpr {
    pub target: Box<Expr>,
    pub index: Box<Expr>,
    pub position: Position,
}

/// Access Expression
/// A run of `.name` lookups collapsed into one node: `a.b.c` has target `a`
/// and names `["b", "c"]`.
#[derive(Debug, Clone, PartialEq)]
pub struct AccessExpr {
    pub target: Box<Expr>,
    pub names: Vec<String>,
    pub position: Position,
}

// FUNCTIONS

/// `fun (params) { ... }` used as a value. The wrapped definition has an
/// empty name and no decorators.
#[derive(Debug, Clone, PartialEq)]
pub struct AnonymousFunctionExpr {
    pub function: Box<FuncDefStmt>,
    pub position: Position,
}
