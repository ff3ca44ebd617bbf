use crate::{
    ast::{
        ast::{Expr, Node},
        expressions::{
            BasicLit, BinaryExpr, CallExpr, Ident, LitValue, Number, ParenExpr, SelectorExpr,
            UnaryExpr,
        },
    },
    errors::errors::{Error, ErrorImpl},
    lexer::{literals::decode_literal, tokens::TokenKind},
};

use super::{lookups::BindingPower, parser::Parser};

/// Parses an expression whose operators bind tighter than `bp`.
///
/// Every prefix and every infix step deepens the tree by one level and
/// counts against the parser's nesting limit.
pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> Result<Expr, Error> {
    let depth = parser.nesting();
    let expr = parse_expr_inner(parser, bp);
    parser.reset_nesting(depth);
    expr
}

fn parse_expr_inner(parser: &mut Parser, bp: BindingPower) -> Result<Expr, Error> {
    parser.enter_nesting()?;

    // First parse NUD
    let token_kind = parser.current_token_kind();
    let Some(nud) = parser.get_nud_lookup().get(&token_kind).copied() else {
        return Err(parser.unexpected("expected expression"));
    };

    let mut left = nud(parser)?;

    // While the current token binds tighter than the caller, extend the lhs
    while parser.current_binding_power() > bp {
        let token_kind = parser.current_token_kind();
        let Some(led) = parser.get_led_lookup().get(&token_kind).copied() else {
            return Err(Error::new(
                ErrorImpl::UnexpectedToken {
                    token: parser.current_token().value.clone(),
                },
                parser.get_position(),
            ));
        };

        parser.enter_nesting()?;
        let token_bp = parser.current_binding_power();
        left = led(parser, left, token_bp)?;
    }

    Ok(left)
}

pub fn parse_primary_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let token = parser.advance().clone();

    match token.kind {
        TokenKind::Identifier => Ok(Ident::new(token.span.start, token.value).into()),
        TokenKind::Int => match decode_literal(token.kind, &token.value, token.span.start)? {
            LitValue::Int(value) => Ok(Number::new(token.span.start, token.span.end, value)?.into()),
            other => Err(Error::new(
                ErrorImpl::LiteralKindMismatch {
                    kind: token.kind.to_string(),
                    value: other.to_string(),
                },
                token.span.start,
            )),
        },
        TokenKind::Float | TokenKind::String => {
            Ok(BasicLit::from_literal(token.span.start, token.kind, token.value)?.into())
        }
        _ => Err(Error::new(
            ErrorImpl::UnexpectedToken { token: token.value },
            token.span.start,
        )),
    }
}

pub fn parse_binary_expr(parser: &mut Parser, left: Expr, bp: BindingPower) -> Result<Expr, Error> {
    let operator_token = parser.advance().clone();
    let right = parse_expr(parser, bp)?;

    Ok(BinaryExpr::new(operator_token.span.start, operator_token.kind, left, right)?.into())
}

pub fn parse_unary_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let operator_token = parser.advance().clone();
    let rhs = parse_expr(parser, BindingPower::Unary)?;

    Ok(UnaryExpr::new(operator_token.span.start, operator_token.kind, rhs)?.into())
}

pub fn parse_grouping_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let lparen = parser.advance().span.start;
    let expr = parse_expr(parser, BindingPower::Default)?;
    let rparen = parser.expect(TokenKind::CloseParen)?.span.start;

    Ok(ParenExpr::new(lparen, expr, rparen)?.into())
}

/// `f(a, b)`. A trailing comma before `)` is allowed.
pub fn parse_call_expr(parser: &mut Parser, left: Expr, _bp: BindingPower) -> Result<Expr, Error> {
    let lparen = parser.advance().span.start;

    let mut args = vec![];
    while parser.current_token_kind() != TokenKind::CloseParen {
        args.push(parse_expr(parser, BindingPower::Default)?);

        if parser.current_token_kind() == TokenKind::Comma {
            parser.advance();
        } else {
            break;
        }
    }

    let rparen = parser.expect(TokenKind::CloseParen)?.span.start;

    Ok(CallExpr::new(left, lparen, args, rparen)?.into())
}

pub fn parse_selector_expr(
    parser: &mut Parser,
    left: Expr,
    _bp: BindingPower,
) -> Result<Expr, Error> {
    parser.advance();

    let error = parser.unexpected(format!("expected selector after {}", left.node_type()));
    let sel = parser.expect_error(TokenKind::Identifier, Some(error))?;

    Ok(SelectorExpr::new(left, Ident::new(sel.span.start, sel.value))?.into())
}
