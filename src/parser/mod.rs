//! Parser module for building an Abstract Syntax Tree (AST).
//!
//! This module contains the recursive-descent parser that transforms the
//! token list produced by the lexer into a tree of `Stmt`/`Expr` nodes. It
//! handles:
//!
//! - Statement parsing (blocks, if/elif/else, for, try, definitions, jumps)
//! - Expression parsing (assignments, ternaries, binary ops, unary ops,
//!   calls, subscripts, attribute access)
//! - Error reporting, with EOF errors marked as incomplete input
//!
//! Binary operators are parsed by precedence climbing over the precedence
//! table; prefix and postfix forms dispatch through lookup tables.

pub mod expr;
pub mod lookups;
pub mod parser;
pub mod stmt;
