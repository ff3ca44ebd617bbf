//! Top-level declaration handlers.
//!
//! Each handler starts on its keyword and stops before the terminating `;`,
//! which the file loop consumes.

use tracing::trace;

use crate::{
    ast::{
        builder::FileBuilder,
        declarations::{ConstSpec, Func, ImportSpec, VarSpec},
        expressions::{BasicLit, Ident},
    },
    errors::errors::Error,
    lexer::tokens::{Token, TokenKind},
};

use super::{expr::parse_expr, lookups::BindingPower, parser::Parser, stmt::parse_block_stmt};

fn expect_name(parser: &mut Parser, context: &str) -> Result<Ident, Error> {
    let error = parser.unexpected(format!("expected identifier in {}", context));
    let token = parser.expect_error(TokenKind::Identifier, Some(error))?;
    Ok(ident(token))
}

fn ident(token: Token) -> Ident {
    Ident::new(token.span.start, token.value)
}

/// Optional type name following a declared name.
fn parse_type_name(parser: &mut Parser) -> Option<Ident> {
    if parser.current_token_kind() == TokenKind::Identifier {
        Some(ident(parser.advance().clone()))
    } else {
        None
    }
}

pub fn parse_import_decl(parser: &mut Parser, builder: &mut FileBuilder) -> Result<(), Error> {
    let import_pos = parser.expect(TokenKind::Import)?.span.start;

    let name = parse_type_name(parser);

    let error = parser.unexpected("expected import path");
    let path = parser.expect_error(TokenKind::String, Some(error))?;
    let path = BasicLit::from_literal(path.span.start, path.kind, path.value)?;

    let spec = ImportSpec::new(import_pos, name, path)?;
    trace!(path = %spec.path_value(), "import");
    builder.import(spec);
    Ok(())
}

pub fn parse_const_decl(parser: &mut Parser, builder: &mut FileBuilder) -> Result<(), Error> {
    let const_pos = parser.advance().span.start;
    let name = expect_name(parser, "constant declaration")?;
    let ty = parse_type_name(parser);

    let error = parser.unexpected("expected = in constant declaration");
    parser.expect_error(TokenKind::Assignment, Some(error))?;
    let value = parse_expr(parser, BindingPower::Default)?;

    trace!(name = %name.name, "const");
    builder.constant(ConstSpec::new(const_pos, name, ty, value)?);
    Ok(())
}

pub fn parse_var_decl(parser: &mut Parser, builder: &mut FileBuilder) -> Result<(), Error> {
    let var_pos = parser.advance().span.start;
    let name = expect_name(parser, "variable declaration")?;
    let ty = parse_type_name(parser);

    let value = if parser.current_token_kind() == TokenKind::Assignment {
        parser.advance();
        Some(parse_expr(parser, BindingPower::Default)?)
    } else if ty.is_none() {
        return Err(parser.unexpected("expected type or value in variable declaration"));
    } else {
        None
    };

    trace!(name = %name.name, "var");
    builder.global(VarSpec::new(var_pos, name, ty, value)?);
    Ok(())
}

pub fn parse_func_decl(parser: &mut Parser, builder: &mut FileBuilder) -> Result<(), Error> {
    let func_pos = parser.advance().span.start;
    let name = expect_name(parser, "function declaration")?;

    parser.expect(TokenKind::OpenParen)?;
    let error = parser.unexpected("functions take no parameters");
    parser.expect_error(TokenKind::CloseParen, Some(error))?;

    let body = parse_block_stmt(parser)?;

    trace!(name = %name.name, stmts = body.len(), "func");
    builder.func(Func::new(func_pos, name.name_pos, name.name, body)?);
    Ok(())
}
