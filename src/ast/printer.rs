//! Canonical source printer.
//!
//! Prints a tree back into source text that parses to the same tree. Binary
//! and ternary expressions are always parenthesized, so precedence never has
//! to be reconstructed; everything else is printed as plainly as possible.

use crate::lexer::tokens::{Operator, Token};

use super::{
    ast::{Expr, Stmt},
    expressions::{Argument, CellExpr},
    statements::{BlockStmt, CatchCase, FuncDefStmt, IfStmt, Param},
};

const INDENT: &str = "    ";

/// Prints a top-level block: its statements, one per line, without braces.
pub fn print_block(block: &BlockStmt) -> String {
    let mut printer = Printer::default();
    for stmt in block.iter() {
        printer.stmt(stmt);
    }
    printer.output
}

pub fn print_stmt(stmt: &Stmt) -> String {
    let mut printer = Printer::default();
    printer.stmt(stmt);
    printer.output
}

pub fn print_expr(expr: &Expr) -> String {
    let mut printer = Printer::default();
    printer.expr(expr);
    printer.output
}

#[derive(Default)]
struct Printer {
    output: String,
    depth: usize,
}

impl Printer {
    fn line_start(&mut self) {
        for _ in 0..self.depth {
            self.output.push_str(INDENT);
        }
    }

    fn push(&mut self, text: &str) {
        self.output.push_str(text);
    }

    fn stmt(&mut self, stmt: &Stmt) {
        self.line_start();
        match stmt {
            Stmt::Block(block) => self.block(block),
            Stmt::Expression(stmt) => {
                self.expr(&stmt.expression);
                self.push(";");
            }
            Stmt::If(stmt) => self.if_stmt(stmt),
            Stmt::For(stmt) => {
                self.push("for ");
                if stmt.init.is_empty() && stmt.update.is_empty() {
                    if let Some(condition) = &stmt.condition {
                        self.expr(condition);
                        self.push(" ");
                    }
                } else {
                    self.expr_list(&stmt.init);
                    self.push("; ");
                    if let Some(condition) = &stmt.condition {
                        self.expr(condition);
                    }
                    self.push("; ");
                    self.expr_list(&stmt.update);
                    if !stmt.update.is_empty() {
                        self.push(" ");
                    }
                }
                self.block(&stmt.body);
            }
            Stmt::Try(stmt) => {
                self.push("try ");
                self.block(&stmt.try_block);
                for case in stmt.catch_cases.iter() {
                    self.catch_case(case);
                }
                if let Some(finally_block) = &stmt.finally_block {
                    self.push(" finally ");
                    self.block(finally_block);
                }
            }
            Stmt::FuncDef(stmt) => {
                self.decorators(&stmt.decorators);
                self.push("fun ");
                self.push(&stmt.name);
                self.signature(stmt);
            }
            Stmt::ClassDef(stmt) => {
                self.decorators(&stmt.decorators);
                self.push("class ");
                self.push(&stmt.name);
                if !stmt.bases.is_empty() {
                    self.push(" extends ");
                    self.expr_list(&stmt.bases);
                }
                self.push(" ");
                self.block(&stmt.body);
            }
            Stmt::Break(_) => self.push("break;"),
            Stmt::Continue(_) => self.push("continue;"),
            Stmt::Return(stmt) => match &stmt.value {
                Some(value) => {
                    self.push("return ");
                    self.expr(value);
                    self.push(";");
                }
                None => self.push("return;"),
            },
            Stmt::Throw(stmt) => {
                self.push("throw ");
                self.expr(&stmt.value);
                self.push(";");
            }
            Stmt::Assert(stmt) => {
                self.push("assert ");
                self.expr(&stmt.value);
                self.push(";");
            }
        }
        self.push("\n");
    }

    /// Braced block; the caller has already positioned the opening brace.
    fn block(&mut self, block: &BlockStmt) {
        if block.is_empty() {
            self.push("{}");
            return;
        }
        self.push("{\n");
        self.depth += 1;
        for stmt in block.iter() {
            self.stmt(stmt);
        }
        self.depth -= 1;
        self.line_start();
        self.push("}");
    }

    fn if_stmt(&mut self, stmt: &IfStmt) {
        self.push("if ");
        self.expr(&stmt.condition);
        self.push(" ");
        self.block(&stmt.if_block);
        if let Some(else_block) = &stmt.else_block {
            self.push(" else ");
            self.block(else_block);
        }
    }

    fn catch_case(&mut self, case: &CatchCase) {
        self.push(" catch ");
        if let Some(filter) = &case.filter {
            self.expr(filter);
            self.push(" ");
        }
        if let Some(alias) = &case.alias {
            self.push("as ");
            self.push(alias);
            self.push(" ");
        }
        self.block(&case.body);
    }

    fn decorators(&mut self, decorators: &[Expr]) {
        for decorator in decorators {
            self.push("@");
            self.expr(decorator);
            self.push("\n");
            self.line_start();
        }
    }

    fn signature(&mut self, function: &FuncDefStmt) {
        self.push("(");
        for (i, param) in function.params.iter().enumerate() {
            if i > 0 {
                self.push(", ");
            }
            self.param(param, function);
        }
        self.push(") ");
        self.block(&function.body);
    }

    fn param(&mut self, param: &Param, function: &FuncDefStmt) {
        if param.is_variadic_positional {
            self.push("*");
        } else if param.is_variadic_keyword {
            self.push("**");
        }
        self.push(&param.name);
        if let Some(default) = function.defaults.get(&param.name) {
            self.push(" = ");
            self.expr(default);
        }
    }

    fn expr_list(&mut self, exprs: &[Expr]) {
        for (i, expr) in exprs.iter().enumerate() {
            if i > 0 {
                self.push(", ");
            }
            self.expr(expr);
        }
    }

    fn expr(&mut self, expr: &Expr) {
        match expr {
            Expr::Cell(cell) => self.cell(cell),
            Expr::Unary(unary) => {
                self.push(unary.op.spelling());
                if unary.op == Operator::Not {
                    self.push(" ");
                }
                match unary.operand.as_ref() {
                    Expr::Cell(cell) => self.cell(cell),
                    operand => {
                        self.push("(");
                        self.expr(operand);
                        self.push(")");
                    }
                }
            }
            Expr::Binary(binary) => {
                self.push("(");
                self.expr(&binary.left);
                self.push(" ");
                self.push(binary.op.spelling());
                self.push(" ");
                self.expr(&binary.right);
                self.push(")");
            }
            Expr::Ternary(ternary) => {
                self.push("(");
                self.expr(&ternary.then_expr);
                self.push(" if ");
                self.expr(&ternary.condition);
                self.push(" else ");
                self.expr(&ternary.else_expr);
                self.push(")");
            }
            Expr::Call(call) => {
                self.postfix_target(&call.callee, false);
                self.push("(");
                for (i, argument) in call.arguments.iter().enumerate() {
                    if i > 0 {
                        self.push(", ");
                    }
                    self.argument(argument);
                }
                self.push(")");
            }
            Expr::Subscript(subscript) => {
                self.postfix_target(&subscript.target, false);
                self.push("[");
                self.expr(&subscript.index);
                self.push("]");
            }
            Expr::Access(access) => {
                self.postfix_target(&access.target, true);
                for name in access.names.iter() {
                    self.push(".");
                    self.push(name);
                }
            }
            Expr::AnonymousFunction(function) => {
                self.push("fun ");
                self.signature(&function.function);
            }
        }
    }

    /// Wraps a postfix target in parentheses when printing it bare would
    /// change how the postfix operator binds.
    fn postfix_target(&mut self, target: &Expr, is_access: bool) {
        let wrap = match target {
            Expr::Unary(_) | Expr::Binary(_) | Expr::Ternary(_) | Expr::AnonymousFunction(_) => {
                true
            }
            // `1.x` would scan as a float and `a.b.c` must stay one access node
            Expr::Cell(cell) => is_access && cell.is_number(),
            Expr::Access(_) => is_access,
            Expr::Call(_) | Expr::Subscript(_) => false,
        };
        if wrap {
            self.push("(");
            self.expr(target);
            self.push(")");
        } else {
            self.expr(target);
        }
    }

    fn argument(&mut self, argument: &Argument) {
        if argument.is_unpack_sequence {
            self.push("*");
        } else if argument.is_unpack_mapping {
            self.push("**");
        } else if let Some(name) = &argument.keyword_name {
            self.push(name);
            self.push(" = ");
        }
        self.expr(&argument.expr);
    }

    fn cell(&mut self, cell: &CellExpr) {
        let text = if cell.is_string() {
            quote_string(&cell.token.value)
        } else if cell.is_number() {
            format_number(&cell.token)
        } else {
            cell.token.value.clone()
        };
        self.push(&text);
    }
}

fn format_number(token: &Token) -> String {
    let prefix = match token.num_base {
        16 => "0x",
        8 => "0o",
        2 => "0b",
        _ => "",
    };
    let mut text = format!("{}{}", prefix, token.value);
    if let Some(exponent) = &token.num_exponent {
        text.push('e');
        text.push_str(exponent);
    }
    text
}

/// Double-quoted string literal with every special character escaped.
pub fn quote_string(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for ch in value.chars() {
        match ch {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            '\t' => quoted.push_str("\\t"),
            '\x07' => quoted.push_str("\\a"),
            '\x08' => quoted.push_str("\\b"),
            '\x0b' => quoted.push_str("\\v"),
            '\x0c' => quoted.push_str("\\f"),
            ch if ch.is_control() && (ch as u32) < 0x100 => {
                quoted.push_str(&format!("\\x{:02x}", ch as u32))
            }
            ch if ch.is_control() => quoted.push_str(&format!("\\u{:04x}", ch as u32)),
            ch => quoted.push(ch),
        }
    }
    quoted.push('"');
    quoted
}
