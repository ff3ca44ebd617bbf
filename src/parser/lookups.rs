use std::collections::HashMap;

use crate::{
    ast::{ast::Expr, builder::FileBuilder},
    errors::errors::Error,
    lexer::tokens::TokenKind,
};

use super::{decl::*, expr::*, parser::Parser};

#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Debug)]
pub enum BindingPower {
    Default,
    LogicalOr,
    LogicalAnd,
    Relational,
    Additive,
    Multiplicative,
    Unary,
    Call,
    Member,
    Primary,
}

pub type DeclHandler = fn(&mut Parser, &mut FileBuilder) -> Result<(), Error>;
pub type NUDHandler = fn(&mut Parser) -> Result<Expr, Error>;
pub type LEDHandler = fn(&mut Parser, Expr, BindingPower) -> Result<Expr, Error>;

/// Binding power of a binary operator, `Default` for anything else.
///
/// Shared by the parser tables and the printer, which parenthesizes
/// operands that would otherwise regroup.
pub fn operator_binding_power(kind: TokenKind) -> BindingPower {
    match kind {
        TokenKind::Or => BindingPower::LogicalOr,
        TokenKind::And => BindingPower::LogicalAnd,
        TokenKind::Less
        | TokenKind::LessEquals
        | TokenKind::Greater
        | TokenKind::GreaterEquals
        | TokenKind::Equals
        | TokenKind::NotEquals => BindingPower::Relational,
        TokenKind::Plus | TokenKind::Dash => BindingPower::Additive,
        TokenKind::Star | TokenKind::Slash | TokenKind::Percent => BindingPower::Multiplicative,
        _ => BindingPower::Default,
    }
}

pub fn create_token_lookups(parser: &mut Parser) {
    // Logical, relational, additive and multiplicative
    for kind in [
        TokenKind::Or,
        TokenKind::And,
        TokenKind::Less,
        TokenKind::LessEquals,
        TokenKind::Greater,
        TokenKind::GreaterEquals,
        TokenKind::Equals,
        TokenKind::NotEquals,
        TokenKind::Plus,
        TokenKind::Dash,
        TokenKind::Star,
        TokenKind::Slash,
        TokenKind::Percent,
    ] {
        parser.led(kind, operator_binding_power(kind), parse_binary_expr);
    }

    parser.led(TokenKind::OpenParen, BindingPower::Call, parse_call_expr);
    parser.led(TokenKind::Dot, BindingPower::Member, parse_selector_expr);

    // Literals and names
    parser.nud(TokenKind::Int, parse_primary_expr);
    parser.nud(TokenKind::Float, parse_primary_expr);
    parser.nud(TokenKind::String, parse_primary_expr);
    parser.nud(TokenKind::Identifier, parse_primary_expr);

    // Prefix
    parser.nud(TokenKind::Plus, parse_unary_expr);
    parser.nud(TokenKind::Dash, parse_unary_expr);
    parser.nud(TokenKind::Not, parse_unary_expr);
    parser.nud(TokenKind::OpenParen, parse_grouping_expr);

    // Declarations
    parser.decl(TokenKind::Const, parse_const_decl);
    parser.decl(TokenKind::Var, parse_var_decl);
    parser.decl(TokenKind::Func, parse_func_decl);
}

// Lookup tables inside parser struct, so it's easier
pub type DeclLookup = HashMap<TokenKind, DeclHandler>;
pub type NUDLookup = HashMap<TokenKind, NUDHandler>;
pub type LEDLookup = HashMap<TokenKind, LEDHandler>;
pub type BPLookup = HashMap<TokenKind, BindingPower>;
