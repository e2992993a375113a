use std::collections::{BTreeMap, HashSet};

use tracing::trace;

use crate::{
    ast::{
        ast::{Expr, Node, Stmt},
        statements::{
            AssertStmt, BlockStmt, BreakStmt, CatchCase, ClassDefStmt, ContinueStmt,
            ExpressionStmt, ForStmt, FuncDefStmt, IfStmt, Param, ReturnStmt, ThrowStmt, TryStmt,
        },
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Operator, TokenKind},
    Position,
};

use super::{
    expr::{parse_expr, parse_expr_list},
    parser::Parser,
};

pub fn parse_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let kind = parser.current_token_kind();
    trace!(%kind, position = %parser.get_position(), "statement");

    let handler = match parser.get_stmt_lookup().get(&kind) {
        Some(handler) => *handler,
        None => return parse_expression_stmt(parser),
    };
    handler(parser)
}

pub fn parse_expression_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let expression = parse_expr(parser)?;

    parser.expect(TokenKind::Semicolon, "';'")?;

    Ok(Stmt::Expression(ExpressionStmt {
        position: expression.get_position(),
        expression,
    }))
}

/// `{ stmt* }`. Running out of input before the closing brace is reported as
/// an incomplete program.
pub fn parse_block(parser: &mut Parser) -> Result<BlockStmt, Error> {
    let position = parser.expect(TokenKind::OpenCurly, "'{'")?.position;
    parser.enter_nesting()?;

    let mut body = vec![];
    while parser.current_token_kind() != TokenKind::CloseCurly {
        if !parser.has_tokens() {
            return Err(parser.expected("'}'"));
        }
        body.push(parse_stmt(parser)?);
    }
    parser.advance();
    parser.exit_nesting();

    Ok(BlockStmt { body, position })
}

pub fn parse_block_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    Ok(Stmt::Block(parse_block(parser)?))
}

/// `if C { } (elif C { })* (else { })?`
///
/// Each `elif` becomes an `IfStmt` nested alone in the else block of the
/// clause before it.
pub fn parse_if_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let position = parser.advance().position;
    let condition = parse_expr(parser)?;
    let if_block = parse_block(parser)?;

    let mut elifs = vec![];
    while parser.current_token_kind() == TokenKind::Elif {
        let position = parser.advance().position;
        let condition = parse_expr(parser)?;
        let if_block = parse_block(parser)?;
        elifs.push(IfStmt {
            condition,
            if_block,
            else_block: None,
            position,
        });
    }

    let mut else_block = if parser.current_token_kind() == TokenKind::Else {
        parser.advance();
        Some(parse_block(parser)?)
    } else {
        None
    };

    for mut elif in elifs.into_iter().rev() {
        elif.else_block = else_block;
        let position = elif.position;
        else_block = Some(BlockStmt {
            body: vec![Stmt::If(elif)],
            position,
        });
    }

    Ok(Stmt::If(IfStmt {
        condition,
        if_block,
        else_block,
        position,
    }))
}

/// Three forms:
///
/// - `for { }`
/// - `for C { }`
/// - `for I; C; U { }` where each part may be empty
pub fn parse_for_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let position = parser.advance().position;

    if parser.current_token_kind() == TokenKind::OpenCurly {
        let body = parse_block(parser)?;
        return Ok(Stmt::For(ForStmt {
            init: vec![],
            condition: None,
            update: vec![],
            body,
            position,
        }));
    }

    let mut init = if parser.current_token_kind() == TokenKind::Semicolon {
        vec![]
    } else {
        parse_expr_list(parser)?
    };

    if parser.current_token_kind() == TokenKind::OpenCurly && init.len() == 1 {
        let condition = init.pop();
        let body = parse_block(parser)?;
        return Ok(Stmt::For(ForStmt {
            init,
            condition,
            update: vec![],
            body,
            position,
        }));
    }

    parser.expect(TokenKind::Semicolon, "';'")?;
    let condition = if parser.current_token_kind() == TokenKind::Semicolon {
        None
    } else {
        Some(parse_expr(parser)?)
    };
    parser.expect(TokenKind::Semicolon, "';'")?;
    let update = if parser.current_token_kind() == TokenKind::OpenCurly {
        vec![]
    } else {
        parse_expr_list(parser)?
    };
    let body = parse_block(parser)?;

    Ok(Stmt::For(ForStmt {
        init,
        condition,
        update,
        body,
        position,
    }))
}

/// `as` is an ordinary identifier everywhere except right inside a catch
/// clause.
fn is_alias_marker(parser: &Parser) -> bool {
    let token = parser.current_token();
    token.kind == TokenKind::Identifier && token.value == "as"
}

/// `try { } (catch [F] [as N] { })* (finally { })?` with at least one catch
/// or a finally.
pub fn parse_try_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let position = parser.advance().position;
    let try_block = parse_block(parser)?;

    let mut catch_cases = vec![];
    while parser.current_token_kind() == TokenKind::Catch {
        let position = parser.advance().position;

        let filter = if parser.current_token_kind() == TokenKind::OpenCurly
            || is_alias_marker(parser)
        {
            None
        } else {
            Some(parse_expr(parser)?)
        };

        let alias = if is_alias_marker(parser) {
            parser.advance();
            Some(parser.expect(TokenKind::Identifier, "a name after 'as'")?.value)
        } else {
            None
        };

        let body = parse_block(parser)?;
        catch_cases.push(CatchCase {
            filter,
            alias,
            body,
            position,
        });
    }

    let finally_block = if parser.current_token_kind() == TokenKind::Finally {
        parser.advance();
        Some(parse_block(parser)?)
    } else {
        None
    };

    if catch_cases.is_empty() && finally_block.is_none() {
        return Err(parser.expected("'catch' or 'finally'"));
    }

    Ok(Stmt::Try(TryStmt {
        try_block,
        catch_cases,
        finally_block,
        position,
    }))
}

/// `@expr` lines in front of a function or class definition.
pub fn parse_decorated_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let position = parser.get_position();
    let mut decorators = vec![];
    while parser.current_token_kind() == TokenKind::At {
        parser.advance();
        decorators.push(parse_expr(parser)?);
    }

    match parser.current_token_kind() {
        TokenKind::Fun => Ok(Stmt::FuncDef(parse_func_def(parser, decorators, position)?)),
        TokenKind::Class => Ok(Stmt::ClassDef(parse_class_def(parser, decorators, position)?)),
        _ => Err(parser.expected("'fun' or 'class' after decorators")),
    }
}

/// `fun name(...) { }` is a definition; `fun (...) { }` starts an
/// expression statement.
pub fn parse_fun_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    if parser.peek_token().kind == TokenKind::Identifier {
        let position = parser.get_position();
        Ok(Stmt::FuncDef(parse_func_def(parser, vec![], position)?))
    } else {
        parse_expression_stmt(parser)
    }
}

/// A decorated definition starts at its first `@`.
fn parse_func_def(
    parser: &mut Parser,
    decorators: Vec<Expr>,
    position: Position,
) -> Result<FuncDefStmt, Error> {
    parser.advance();
    let name = parser.expect(TokenKind::Identifier, "a function name")?.value;
    parse_function_rest(parser, decorators, name, position)
}

/// Parameter list and body, shared by named and anonymous functions.
pub fn parse_function_rest(
    parser: &mut Parser,
    decorators: Vec<Expr>,
    name: String,
    position: Position,
) -> Result<FuncDefStmt, Error> {
    parser.expect(TokenKind::OpenParen, "'('")?;

    let mut params: Vec<Param> = vec![];
    let mut defaults = BTreeMap::new();
    let mut seen = HashSet::new();
    let mut var_arg_name = None;
    let mut kw_var_arg_name = None;

    while parser.current_token_kind() != TokenKind::CloseParen {
        let param_position = parser.get_position();
        let invalid = |parser: &Parser, reason: String| {
            Error::new(
                ErrorImpl::InvalidParameters { reason },
                param_position,
                parser.get_file(),
            )
        };

        if kw_var_arg_name.is_some() {
            return Err(invalid(
                parser,
                String::from("no parameter may follow the keyword collector"),
            ));
        }

        let is_variadic_keyword = parser.is_operator(Operator::Power);
        let is_variadic_positional = parser.is_operator(Operator::Mult);
        if is_variadic_positional && var_arg_name.is_some() {
            return Err(invalid(
                parser,
                String::from("only one positional collector is allowed"),
            ));
        }
        if is_variadic_keyword || is_variadic_positional {
            parser.advance();
        }

        let name = parser.expect(TokenKind::Identifier, "a parameter name")?.value;
        if !seen.insert(name.clone()) {
            return Err(invalid(parser, format!("duplicate parameter `{}`", name)));
        }

        if is_variadic_keyword {
            kw_var_arg_name = Some(name.clone());
        } else if is_variadic_positional {
            var_arg_name = Some(name.clone());
        } else if parser.is_operator(Operator::Assign) {
            parser.advance();
            defaults.insert(name.clone(), parse_expr(parser)?);
        } else if !defaults.is_empty() && var_arg_name.is_none() {
            return Err(invalid(
                parser,
                format!("parameter `{}` without a default follows one with a default", name),
            ));
        }

        params.push(Param {
            name,
            is_variadic_positional,
            is_variadic_keyword,
            position: param_position,
        });

        if parser.current_token_kind() == TokenKind::Comma {
            parser.advance();
        } else {
            break;
        }
    }
    parser.expect(TokenKind::CloseParen, "')'")?;

    let body = parse_block(parser)?;

    Ok(FuncDefStmt {
        decorators,
        name,
        params,
        defaults,
        var_arg_name,
        kw_var_arg_name,
        body,
        position,
    })
}

pub fn parse_class_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let position = parser.get_position();
    Ok(Stmt::ClassDef(parse_class_def(parser, vec![], position)?))
}

/// `class Name (extends E, ...)? { }`
fn parse_class_def(
    parser: &mut Parser,
    decorators: Vec<Expr>,
    position: Position,
) -> Result<ClassDefStmt, Error> {
    parser.advance();
    let name = parser.expect(TokenKind::Identifier, "a class name")?.value;

    let bases = if parser.current_token_kind() == TokenKind::Extends {
        parser.advance();
        parse_expr_list(parser)?
    } else {
        vec![]
    };

    let body = parse_block(parser)?;

    Ok(ClassDefStmt {
        decorators,
        name,
        bases,
        body,
        position,
    })
}

pub fn parse_break_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let position = parser.advance().position;
    parser.expect(TokenKind::Semicolon, "';'")?;
    Ok(Stmt::Break(BreakStmt { position }))
}

pub fn parse_continue_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let position = parser.advance().position;
    parser.expect(TokenKind::Semicolon, "';'")?;
    Ok(Stmt::Continue(ContinueStmt { position }))
}

pub fn parse_return_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let position = parser.advance().position;

    let value = if parser.current_token_kind() == TokenKind::Semicolon {
        None
    } else {
        Some(parse_expr(parser)?)
    };
    parser.expect(TokenKind::Semicolon, "';'")?;

    Ok(Stmt::Return(ReturnStmt { value, position }))
}

pub fn parse_throw_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let position = parser.advance().position;
    let value = parse_expr(parser)?;
    parser.expect(TokenKind::Semicolon, "';'")?;
    Ok(Stmt::Throw(ThrowStmt { value, position }))
}

pub fn parse_assert_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let position = parser.advance().position;
    let value = parse_expr(parser)?;
    parser.expect(TokenKind::Semicolon, "';'")?;
    Ok(Stmt::Assert(AssertStmt { value, position }))
}
