use std::{collections::BTreeMap, slice::Iter};

use crate::Position;

use super::ast::{Expr, Stmt};

#[derive(Debug, Clone, PartialEq)]
pub struct BlockStmt {
    pub body: Vec<Stmt>,
    pub position: Position,
}

impl BlockStmt {
    pub fn iter(&self) -> Iter<'_, Stmt> {
        self.body.iter()
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionStmt {
    pub expression: Expr,
    pub position: Position,
}

/// If Statement
/// `elif` chains are folded into nested ifs: the else block of an `if` with
/// an `elif` holds exactly one `IfStmt`.
#[derive(Debug, Clone, PartialEq)]
pub struct IfStmt {
    pub condition: Expr,
    pub if_block: BlockStmt,
    pub else_block: Option<BlockStmt>,
    pub position: Position,
}

/// For Statement
///
/// - `for { }` has no init, condition or update
/// - `for cond { }` has only a condition
/// - `for init; cond; update { }` may leave any of the three parts empty
#[derive(Debug, Clone, PartialEq)]
pub struct ForStmt {
    pub init: Vec<Expr>,
    pub condition: Option<Expr>,
    pub update: Vec<Expr>,
    pub body: BlockStmt,
    pub position: Position,
}

impl ForStmt {
    pub fn is_infinite(&self) -> bool {
        self.init.is_empty() && self.condition.is_none() && self.update.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TryStmt {
    pub try_block: BlockStmt,
    pub catch_cases: Vec<CatchCase>,
    pub finally_block: Option<BlockStmt>,
    pub position: Position,
}

/// `catch [filter] [as alias] { ... }`
#[derive(Debug, Clone, PartialEq)]
pub struct CatchCase {
    pub filter: Option<Expr>,
    pub alias: Option<String>,
    pub body: BlockStmt,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: String,
    /// `*name`
    pub is_variadic_positional: bool,
    /// `**name`
    pub is_variadic_keyword: bool,
    pub position: Position,
}

/// Function Definition
/// Parameters keep their source order. Defaults are keyed by parameter name;
/// the variadic names are repeated in `var_arg_name`/`kw_var_arg_name` for
/// direct lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct FuncDefStmt {
    pub decorators: Vec<Expr>,
    pub name: String,
    pub params: Vec<Param>,
    pub defaults: BTreeMap<String, Expr>,
    pub var_arg_name: Option<String>,
    pub kw_var_arg_name: Option<String>,
    pub body: BlockStmt,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassDefStmt {
    pub decorators: Vec<Expr>,
    pub name: String,
    pub bases: Vec<Expr>,
    pub body: BlockStmt,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BreakStmt {
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContinueStmt {
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStmt {
    pub value: Option<Expr>,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ThrowStmt {
    pub value: Expr,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssertStmt {
    pub value: Expr,
    pub position: Position,
}
