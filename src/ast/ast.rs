use crate::Position;

use super::{
    expressions::{
        AccessExpr, AnonymousFunctionExpr, Argument, BinaryExpr, CallExpr, CellExpr,
        SubscriptExpr, TernaryExpr, UnaryExpr,
    },
    statements::{
        AssertStmt, BlockStmt, BreakStmt, CatchCase, ClassDefStmt, ContinueStmt, ExpressionStmt,
        ForStmt, FuncDefStmt, IfStmt, Param, ReturnStmt, ThrowStmt, TryStmt,
    },
};

/// Node Trait
///
/// Every node, expression or statement, knows where it starts in the source.
pub trait Node {
    /// Returns the position the node was built at.
    fn get_position(&self) -> Position;
}

macro_rules! impl_node {
    ($($node:ty),* $(,)?) => {
        $(
            impl Node for $node {
                fn get_position(&self) -> Position {
                    self.position
                }
            }
        )*
    };
}

impl_node!(
    CellExpr,
    UnaryExpr,
    BinaryExpr,
    TernaryExpr,
    CallExpr,
    Argument,
    SubscriptExpr,
    AccessExpr,
    AnonymousFunctionExpr,
    BlockStmt,
    ExpressionStmt,
    IfStmt,
    ForStmt,
    TryStmt,
    CatchCase,
    FuncDefStmt,
    Param,
    ClassDefStmt,
    BreakStmt,
    ContinueStmt,
    ReturnStmt,
    ThrowStmt,
    AssertStmt,
);

/// Expression
///
/// One constructor per concrete expression kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Cell(CellExpr),
    Unary(UnaryExpr),
    Binary(BinaryExpr),
    Ternary(TernaryExpr),
    Call(CallExpr),
    Subscript(SubscriptExpr),
    Access(AccessExpr),
    AnonymousFunction(AnonymousFunctionExpr),
}

impl Node for Expr {
    fn get_position(&self) -> Position {
        match self {
            Expr::Cell(expr) => expr.get_position(),
            Expr::Unary(expr) => expr.get_position(),
            Expr::Binary(expr) => expr.get_position(),
            Expr::Ternary(expr) => expr.get_position(),
            Expr::Call(expr) => expr.get_position(),
            Expr::Subscript(expr) => expr.get_position(),
            Expr::Access(expr) => expr.get_position(),
            Expr::AnonymousFunction(expr) => expr.get_position(),
        }
    }
}

/// Statement
///
/// One constructor per concrete statement kind. Disjoint from `Expr`; an
/// expression used as a statement is wrapped in `ExpressionStmt`.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Block(BlockStmt),
    Expression(ExpressionStmt),
    If(IfStmt),
    For(ForStmt),
    Try(TryStmt),
    FuncDef(FuncDefStmt),
    ClassDef(ClassDefStmt),
    Break(BreakStmt),
    Continue(ContinueStmt),
    Return(ReturnStmt),
    Throw(ThrowStmt),
    Assert(AssertStmt),
}

impl Node for Stmt {
    fn get_position(&self) -> Position {
        match self {
            Stmt::Block(stmt) => stmt.get_position(),
            Stmt::Expression(stmt) => stmt.get_position(),
            Stmt::If(stmt) => stmt.get_position(),
            Stmt::For(stmt) => stmt.get_position(),
            Stmt::Try(stmt) => stmt.get_position(),
            Stmt::FuncDef(stmt) => stmt.get_position(),
            Stmt::ClassDef(stmt) => stmt.get_position(),
            Stmt::Break(stmt) => stmt.get_position(),
            Stmt::Continue(stmt) => stmt.get_position(),
            Stmt::Return(stmt) => stmt.get_position(),
            Stmt::Throw(stmt) => stmt.get_position(),
            Stmt::Assert(stmt) => stmt.get_position(),
        }
    }
}
