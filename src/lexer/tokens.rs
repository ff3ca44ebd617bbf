use lazy_static::lazy_static;
use serde::Serialize;
use std::{collections::HashMap, fmt::Display};

use crate::Span;

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("package", TokenKind::Package);
        map.insert("import", TokenKind::Import);
        map.insert("const", TokenKind::Const);
        map.insert("var", TokenKind::Var);
        map.insert("func", TokenKind::Func);
        map
    };
}

/// The closed set of token kinds.
///
/// AST nodes store operators (`BinaryExpr::op`, `AssignStmt::op`, ...) and
/// literal kinds (`BasicLit::value_type`) as members of this enumeration.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize)]
pub enum TokenKind {
    EOF,

    // Literals
    Identifier,
    Int,
    Float,
    String,

    OpenParen,
    CloseParen,
    OpenCurly,
    CloseCurly,

    Assignment, // =
    Define,     // :=
    Equals,     // ==
    Not,        // !
    NotEquals,  // !=

    Less,
    LessEquals,
    Greater,
    GreaterEquals,

    Or,
    And,

    Dot,
    Semicolon,
    Comma,

    Plus,
    Dash,
    Slash,
    Star,
    Percent,

    // Reserved
    Package,
    Import,
    Const,
    Var,
    Func,
}

impl TokenKind {
    /// The source spelling of operator and punctuation kinds.
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::EOF => "EOF",
            TokenKind::Identifier => "IDENT",
            TokenKind::Int => "INT",
            TokenKind::Float => "FLOAT",
            TokenKind::String => "STRING",
            TokenKind::OpenParen => "(",
            TokenKind::CloseParen => ")",
            TokenKind::OpenCurly => "{",
            TokenKind::CloseCurly => "}",
            TokenKind::Assignment => "=",
            TokenKind::Define => ":=",
            TokenKind::Equals => "==",
            TokenKind::Not => "!",
            TokenKind::NotEquals => "!=",
            TokenKind::Less => "<",
            TokenKind::LessEquals => "<=",
            TokenKind::Greater => ">",
            TokenKind::GreaterEquals => ">=",
            TokenKind::Or => "||",
            TokenKind::And => "&&",
            TokenKind::Dot => ".",
            TokenKind::Semicolon => ";",
            TokenKind::Comma => ",",
            TokenKind::Plus => "+",
            TokenKind::Dash => "-",
            TokenKind::Slash => "/",
            TokenKind::Star => "*",
            TokenKind::Percent => "%",
            TokenKind::Package => "package",
            TokenKind::Import => "import",
            TokenKind::Const => "const",
            TokenKind::Var => "var",
            TokenKind::Func => "func",
        }
    }

    pub fn is_literal(&self) -> bool {
        matches!(self, TokenKind::Int | TokenKind::Float | TokenKind::String)
    }

    pub fn is_binary_operator(&self) -> bool {
        matches!(
            self,
            TokenKind::Plus
                | TokenKind::Dash
                | TokenKind::Star
                | TokenKind::Slash
                | TokenKind::Percent
                | TokenKind::Equals
                | TokenKind::NotEquals
                | TokenKind::Less
                | TokenKind::LessEquals
                | TokenKind::Greater
                | TokenKind::GreaterEquals
                | TokenKind::And
                | TokenKind::Or
        )
    }

    pub fn is_unary_operator(&self) -> bool {
        matches!(self, TokenKind::Plus | TokenKind::Dash | TokenKind::Not)
    }

    pub fn is_assign_operator(&self) -> bool {
        matches!(self, TokenKind::Assignment | TokenKind::Define)
    }

    /// Whether a newline directly after this token inserts a semicolon.
    pub fn ends_statement(&self) -> bool {
        matches!(
            self,
            TokenKind::Identifier
                | TokenKind::Int
                | TokenKind::Float
                | TokenKind::String
                | TokenKind::CloseParen
                | TokenKind::CloseCurly
        )
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub span: Span,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Token {{\nkind: {},\nvalue: {}}}", self.kind, self.value)
    }
}
