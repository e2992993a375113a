use tracing::trace;

use crate::{
    ast::{
        ast::{Expr, Node},
        expressions::{
            AccessExpr, AnonymousFunctionExpr, Argument, BinaryExpr, CallExpr, CellExpr,
            SubscriptExpr, TernaryExpr, UnaryExpr,
        },
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Operator, TokenKind, ASSIGNMENT_PRECEDENCE},
};

use super::{parser::Parser, stmt::parse_function_rest};

/// Operators accepted in front of a cell.
const PREFIX_OPERATORS: [Operator; 4] = [Operator::Plus, Operator::Sub, Operator::Not, Operator::Bng];

/// Parses a full expression, assignments included.
pub fn parse_expr(parser: &mut Parser) -> Result<Expr, Error> {
    parse_binary_expr(parser, ASSIGNMENT_PRECEDENCE)
}

/// Parses `expr (, expr)*`.
pub fn parse_expr_list(parser: &mut Parser) -> Result<Vec<Expr>, Error> {
    let mut exprs = vec![parse_expr(parser)?];
    while parser.current_token_kind() == TokenKind::Comma {
        parser.advance();
        exprs.push(parse_expr(parser)?);
    }
    Ok(exprs)
}

/// Every nested expression passes through here, so this is where nesting is
/// counted.
pub fn parse_binary_expr(parser: &mut Parser, min_precedence: u8) -> Result<Expr, Error> {
    parser.enter_nesting()?;
    let result = parse_ternary_expr(parser)
        .and_then(|left| parse_binary_rhs(parser, left, min_precedence));
    parser.exit_nesting();
    result
}

/// Binary operator at the current token, with its precedence.
fn current_binary_operator(parser: &Parser) -> Option<(Operator, u8)> {
    let token = parser.current_token();
    if token.kind != TokenKind::Operator {
        return None;
    }
    token
        .op
        .and_then(|op| op.precedence().map(|precedence| (op, precedence)))
}

/// Precedence climbing. Operators of equal precedence group to the left,
/// except assignments which group to the right.
pub fn parse_binary_rhs(
    parser: &mut Parser,
    mut left: Expr,
    min_precedence: u8,
) -> Result<Expr, Error> {
    loop {
        let (op, precedence) = match current_binary_operator(parser) {
            Some((op, precedence)) if precedence >= min_precedence => (op, precedence),
            _ => return Ok(left),
        };
        parser.advance();

        let right = if op.is_assignment() {
            // the target of `a = b + c = d` is `(b + c) = d`
            parse_binary_expr(parser, precedence)?
        } else {
            let right = parse_ternary_expr(parser)?;
            match current_binary_operator(parser) {
                Some((_, next_precedence)) if next_precedence > precedence => {
                    parse_binary_rhs(parser, right, precedence + 1)?
                }
                _ => right,
            }
        };

        left = Expr::Binary(BinaryExpr {
            position: left.get_position(),
            op,
            left: Box::new(left),
            right: Box::new(right),
        });
    }
}

/// `then if condition else otherwise`, or just the unary operand.
pub fn parse_ternary_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let then_expr = parse_unary_expr(parser)?;
    if parser.current_token_kind() != TokenKind::If {
        return Ok(then_expr);
    }
    parser.advance();

    let condition = parse_expr(parser)?;
    parser.expect(TokenKind::Else, "'else'")?;
    let else_expr = parse_expr(parser)?;

    Ok(Expr::Ternary(TernaryExpr {
        position: then_expr.get_position(),
        condition: Box::new(condition),
        then_expr: Box::new(then_expr),
        else_expr: Box::new(else_expr),
    }))
}

/// A prefix operator binds to the cell right after it; anything else is a
/// postfix chain.
pub fn parse_unary_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let token = parser.current_token();
    let prefix = token
        .op
        .filter(|op| token.kind == TokenKind::Operator && PREFIX_OPERATORS.contains(op));

    match prefix {
        Some(op) => {
            let position = parser.advance().position;
            let operand = parse_cell_expr(parser)?;
            Ok(Expr::Unary(UnaryExpr {
                op,
                operand: Box::new(operand),
                position,
            }))
        }
        None => parse_postfix_expr(parser),
    }
}

pub fn parse_postfix_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let mut expr = parse_cell_expr(parser)?;

    loop {
        let kind = parser.current_token_kind();
        let handler = match parser.get_postfix_lookup().get(&kind) {
            Some(handler) => *handler,
            None => return Ok(expr),
        };
        expr = handler(parser, expr)?;
    }
}

pub fn parse_cell_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let kind = parser.current_token_kind();
    let handler = match parser.get_nud_lookup().get(&kind) {
        Some(handler) => *handler,
        None if kind.is_keyword() => {
            return Err(parser.error(ErrorImpl::UnexpectedToken {
                token: parser.current_token().describe(),
            }))
        }
        None => return Err(parser.expected("an expression")),
    };
    handler(parser)
}

pub fn parse_primary_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let token = parser.advance();
    trace!(token = %token, "cell");
    Ok(Expr::Cell(CellExpr {
        position: token.position,
        token,
    }))
}

/// Parentheses only group; they leave no node behind.
pub fn parse_grouping_expr(parser: &mut Parser) -> Result<Expr, Error> {
    parser.advance();
    let expr = parse_expr(parser)?;
    parser.expect(TokenKind::CloseParen, "')'")?;
    Ok(expr)
}

pub fn parse_anonymous_function_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let position = parser.advance().position;
    let function = parse_function_rest(parser, vec![], String::new(), position)?;
    Ok(Expr::AnonymousFunction(AnonymousFunctionExpr {
        function: Box::new(function),
        position,
    }))
}

pub fn parse_call_expr(parser: &mut Parser, callee: Expr) -> Result<Expr, Error> {
    parser.advance();

    let mut arguments = vec![];
    while parser.current_token_kind() != TokenKind::CloseParen {
        arguments.push(parse_argument(parser)?);
        if parser.current_token_kind() == TokenKind::Comma {
            parser.advance();
        } else {
            break;
        }
    }
    parser.expect(TokenKind::CloseParen, "')'")?;

    // `*a` may not come after `**b`
    if let Some(first_mapping) = arguments.iter().position(|arg| arg.is_unpack_mapping) {
        if let Some(argument) = arguments[first_mapping..]
            .iter()
            .find(|arg| arg.is_unpack_sequence)
        {
            return Err(Error::new(
                ErrorImpl::UnpackOrder,
                argument.position,
                parser.get_file(),
            ));
        }
    }

    Ok(Expr::Call(CallExpr {
        position: callee.get_position(),
        callee: Box::new(callee),
        arguments,
    }))
}

/// `expr`, `*expr`, `**expr` or `name = expr`.
pub fn parse_argument(parser: &mut Parser) -> Result<Argument, Error> {
    let position = parser.get_position();

    if parser.is_operator(Operator::Mult) {
        parser.advance();
        let expr = parse_expr(parser)?;
        return Ok(Argument {
            is_unpack_sequence: true,
            ..Argument::positional(expr, position)
        });
    }

    if parser.is_operator(Operator::Power) {
        parser.advance();
        let expr = parse_expr(parser)?;
        return Ok(Argument {
            is_unpack_mapping: true,
            ..Argument::positional(expr, position)
        });
    }

    if parser.current_token_kind() == TokenKind::Identifier
        && parser.peek_token().is_operator(Operator::Assign)
    {
        let name = parser.advance().value;
        parser.advance();
        let expr = parse_expr(parser)?;
        return Ok(Argument {
            keyword_name: Some(name),
            ..Argument::positional(expr, position)
        });
    }

    let expr = parse_expr(parser)?;
    Ok(Argument::positional(expr, position))
}

pub fn parse_subscript_expr(parser: &mut Parser, target: Expr) -> Result<Expr, Error> {
    parser.advance();
    let index = parse_expr(parser)?;
    parser.expect(TokenKind::CloseBracket, "']'")?;

    Ok(Expr::Subscript(SubscriptExpr {
        position: target.get_position(),
        target: Box::new(target),
        index: Box::new(index),
    }))
}

/// Consecutive `.name` lookups become a single node.
pub fn parse_access_expr(parser: &mut Parser, target: Expr) -> Result<Expr, Error> {
    let mut names = vec![];
    while parser.current_token_kind() == TokenKind::Dot {
        parser.advance();
        names.push(parser.expect(TokenKind::Identifier, "an attribute name")?.value);
    }

    Ok(Expr::Access(AccessExpr {
        position: target.get_position(),
        target: Box::new(target),
        names,
    }))
}
