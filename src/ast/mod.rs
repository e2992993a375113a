/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - ast: The `Node` trait and the `Expr`/`Stmt` tagged unions
/// - expressions: Definitions for the expression variants
/// - statements: Definitions for the statement variants
/// - printer: Canonical source printer for a parsed tree
pub mod ast;
pub mod expressions;
pub mod printer;
pub mod statements;
