use crate::{
    ast::{
        ast::{Node, Stmt},
        statements::{AssignStmt, BlockStmt, ExprStmt},
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
};

use super::{expr::parse_expr, lookups::BindingPower, parser::Parser};

/// `expr` or `target = value` / `target := value`.
pub fn parse_simple_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let expr = parse_expr(parser, BindingPower::Default)?;

    if !parser.current_token_kind().is_assign_operator() {
        return Ok(ExprStmt::new(expr).into());
    }

    if !expr.is_lvalue() {
        return Err(Error::new(
            ErrorImpl::InvalidAssignTarget {
                target: expr.node_type().to_string(),
            },
            expr.pos(),
        ));
    }

    let operator_token = parser.advance().clone();
    let value = parse_expr(parser, BindingPower::Default)?;

    Ok(AssignStmt::new(expr, operator_token.span.start, operator_token.kind, value)?.into())
}

pub fn parse_block_stmt(parser: &mut Parser) -> Result<BlockStmt, Error> {
    let lbrace = parser.expect(TokenKind::OpenCurly)?.span.start;

    let mut statements = Vec::new();
    loop {
        match parser.current_token_kind() {
            TokenKind::CloseCurly => break,
            TokenKind::Semicolon => {
                parser.advance();
            }
            TokenKind::EOF => return Err(parser.unexpected("expected }")),
            _ => {
                statements.push(parse_simple_stmt(parser)?);
                if parser.current_token_kind() != TokenKind::CloseCurly {
                    parser.expect(TokenKind::Semicolon)?;
                }
            }
        }
    }

    let rbrace = parser.expect(TokenKind::CloseCurly)?.span.start;

    BlockStmt::new(lbrace, statements, rbrace)
}
