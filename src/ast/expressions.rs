use std::fmt::Display;

use serde::Serialize;

use crate::{
    errors::errors::{Error, ErrorImpl},
    lexer::{literals::decode_literal, tokens::TokenKind},
    Pos,
};

use super::{
    ast::{Expr, Node, NodeType},
    ranges::ensure_range,
};

// LITERALS

/// Decoded value of a literal, tied to the literal's token kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum LitValue {
    Int(i64),
    Float(f64),
    String(String),
}

impl LitValue {
    /// The token kind a literal holding this value must carry.
    pub fn token_kind(&self) -> TokenKind {
        match self {
            LitValue::Int(_) => TokenKind::Int,
            LitValue::Float(_) => TokenKind::Float,
            LitValue::String(_) => TokenKind::String,
        }
    }
}

impl Display for LitValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LitValue::Int(value) => write!(f, "int {}", value),
            LitValue::Float(value) => write!(f, "float {}", value),
            LitValue::String(value) => write!(f, "string {:?}", value),
        }
    }
}

/// Identifier
/// Represents a name reference in the AST.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ident {
    pub name_pos: Pos,
    pub name: String,
}

impl Ident {
    pub fn new(name_pos: Pos, name: impl Into<String>) -> Self {
        Ident {
            name_pos,
            name: name.into(),
        }
    }
}

impl Node for Ident {
    fn pos(&self) -> Pos {
        self.name_pos
    }
    fn end(&self) -> Pos {
        self.name_pos.offset(self.name.len())
    }
    fn node_type(&self) -> NodeType {
        NodeType::Ident
    }
}

/// Number Expression
/// Represents an integer literal in the AST.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Number {
    pub value_pos: Pos,
    pub value_end: Pos,
    pub value: i64,
}

impl Number {
    pub fn new(value_pos: Pos, value_end: Pos, value: i64) -> Result<Self, Error> {
        ensure_range(Number {
            value_pos,
            value_end,
            value,
        })
    }
}

impl Node for Number {
    fn pos(&self) -> Pos {
        self.value_pos
    }
    fn end(&self) -> Pos {
        self.value_end
    }
    fn node_type(&self) -> NodeType {
        NodeType::Number
    }
}

/// Basic Literal
/// Keeps the literal's source text next to its decoded value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BasicLit {
    pub value_pos: Pos,
    pub value_type: TokenKind,
    pub value_lit: String,
    pub value: LitValue,
}

impl BasicLit {
    /// Builds a literal from an already decoded value.
    ///
    /// The value must agree with `value_type`: an `Int` literal holds
    /// `LitValue::Int`, and so on.
    pub fn new(
        value_pos: Pos,
        value_type: TokenKind,
        value_lit: impl Into<String>,
        value: LitValue,
    ) -> Result<Self, Error> {
        if value.token_kind() != value_type {
            return Err(Error::new(
                ErrorImpl::LiteralKindMismatch {
                    kind: value_type.to_string(),
                    value: value.to_string(),
                },
                value_pos,
            ));
        }

        Ok(BasicLit {
            value_pos,
            value_type,
            value_lit: value_lit.into(),
            value,
        })
    }

    /// Decodes `value_lit` and builds the literal from it.
    pub fn from_literal(
        value_pos: Pos,
        value_type: TokenKind,
        value_lit: impl Into<String>,
    ) -> Result<Self, Error> {
        let value_lit = value_lit.into();
        let value = decode_literal(value_type, &value_lit, value_pos)?;
        BasicLit::new(value_pos, value_type, value_lit, value)
    }
}

impl Node for BasicLit {
    fn pos(&self) -> Pos {
        self.value_pos
    }
    fn end(&self) -> Pos {
        self.value_pos.offset(self.value_lit.len())
    }
    fn node_type(&self) -> NodeType {
        NodeType::BasicLit
    }
}

// COMPLEX

/// Binary Expression
/// Represents a binary operation between two expressions in the AST.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BinaryExpr {
    pub op_pos: Pos,
    pub op: TokenKind,
    pub x: Box<Expr>,
    pub y: Box<Expr>,
}

impl BinaryExpr {
    pub fn new(op_pos: Pos, op: TokenKind, x: Expr, y: Expr) -> Result<Self, Error> {
        if !op.is_binary_operator() {
            return Err(Error::new(
                ErrorImpl::UnexpectedTokenDetailed {
                    token: op.to_string(),
                    message: String::from("expected a binary operator"),
                },
                op_pos,
            ));
        }

        ensure_range(BinaryExpr {
            op_pos,
            op,
            x: Box::new(x),
            y: Box::new(y),
        })
    }
}

impl Node for BinaryExpr {
    fn pos(&self) -> Pos {
        self.x.pos()
    }
    fn end(&self) -> Pos {
        self.y.end()
    }
    fn node_type(&self) -> NodeType {
        NodeType::BinaryExpr
    }
}

/// Unary Expression
/// Represents a prefix operation on an expression in the AST.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnaryExpr {
    pub op_pos: Pos,
    pub op: TokenKind,
    pub x: Box<Expr>,
}

impl UnaryExpr {
    pub fn new(op_pos: Pos, op: TokenKind, x: Expr) -> Result<Self, Error> {
        if !op.is_unary_operator() {
            return Err(Error::new(
                ErrorImpl::UnexpectedTokenDetailed {
                    token: op.to_string(),
                    message: String::from("expected a unary operator"),
                },
                op_pos,
            ));
        }

        ensure_range(UnaryExpr {
            op_pos,
            op,
            x: Box::new(x),
        })
    }
}

impl Node for UnaryExpr {
    fn pos(&self) -> Pos {
        self.op_pos
    }
    fn end(&self) -> Pos {
        self.x.end()
    }
    fn node_type(&self) -> NodeType {
        NodeType::UnaryExpr
    }
}

/// Parenthesized Expression
/// Keeps explicit parentheses so printers and precedence-sensitive passes see them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParenExpr {
    pub lparen: Pos,
    pub x: Box<Expr>,
    pub rparen: Pos,
}

impl ParenExpr {
    pub fn new(lparen: Pos, x: Expr, rparen: Pos) -> Result<Self, Error> {
        ensure_range(ParenExpr {
            lparen,
            x: Box::new(x),
            rparen,
        })
    }
}

impl Node for ParenExpr {
    fn pos(&self) -> Pos {
        self.lparen
    }
    fn end(&self) -> Pos {
        self.rparen.offset(1)
    }
    fn node_type(&self) -> NodeType {
        NodeType::ParenExpr
    }
}

/// Call Expression
/// Represents a function call in the AST. The callee is always a bare name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CallExpr {
    pub func_name: Ident,
    pub lparen: Pos,
    pub args: Vec<Expr>,
    pub rparen: Pos,
}

impl CallExpr {
    /// Builds a call from an arbitrary callee expression.
    ///
    /// Only `Expr::Ident` is accepted; selectors, calls and every other
    /// expression are rejected with `CallTargetNotIdent`.
    pub fn new(callee: Expr, lparen: Pos, args: Vec<Expr>, rparen: Pos) -> Result<Self, Error> {
        match callee {
            Expr::Ident(func_name) => CallExpr::with_ident(func_name, lparen, args, rparen),
            other => Err(Error::new(
                ErrorImpl::CallTargetNotIdent {
                    target: other.node_type().to_string(),
                },
                other.pos(),
            )),
        }
    }

    pub fn with_ident(
        func_name: Ident,
        lparen: Pos,
        args: Vec<Expr>,
        rparen: Pos,
    ) -> Result<Self, Error> {
        ensure_range(CallExpr {
            func_name,
            lparen,
            args,
            rparen,
        })
    }
}

impl Node for CallExpr {
    fn pos(&self) -> Pos {
        self.func_name.pos()
    }
    fn end(&self) -> Pos {
        self.rparen.offset(1)
    }
    fn node_type(&self) -> NodeType {
        NodeType::CallExpr
    }
}

/// Selector Expression
/// Represents `x.sel` member access.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectorExpr {
    pub x: Box<Expr>,
    pub sel: Ident,
}

impl SelectorExpr {
    pub fn new(x: Expr, sel: Ident) -> Result<Self, Error> {
        ensure_range(SelectorExpr {
            x: Box::new(x),
            sel,
        })
    }
}

impl Node for SelectorExpr {
    fn pos(&self) -> Pos {
        self.x.pos()
    }
    fn end(&self) -> Pos {
        self.sel.end()
    }
    fn node_type(&self) -> NodeType {
        NodeType::SelectorExpr
    }
}
