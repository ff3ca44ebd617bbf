use std::fmt::Display;

use serde::Serialize;

use crate::{Pos, Span};

use super::{
    expressions::{
        BasicLit, BinaryExpr, CallExpr, Ident, Number, ParenExpr, SelectorExpr, UnaryExpr,
    },
    statements::{AssignStmt, ExprStmt},
};

/// Node Trait
///
/// Every entity in the tree reports a half-open source range `[pos, end)`
/// and the discriminant of its concrete variant.
pub trait Node {
    /// Offset of the first byte belonging to the node.
    fn pos(&self) -> Pos;
    /// Offset one past the last byte belonging to the node.
    fn end(&self) -> Pos;
    /// Returns the concrete variant of the node.
    fn node_type(&self) -> NodeType;

    fn span(&self) -> Span {
        Span::new(self.pos(), self.end())
    }
}

/// Node Types
///
/// One entry per concrete entity. Used for dispatch and diagnostics, never
/// for downcasting.
#[derive(PartialEq, Eq, Clone, Copy, Debug, Hash, Serialize)]
pub enum NodeType {
    File,
    PackageSpec,
    ImportSpec,
    ConstSpec,
    VarSpec,
    Func,
    BlockStmt,
    ExprStmt,
    AssignStmt,
    Ident,
    Number,
    BasicLit,
    BinaryExpr,
    UnaryExpr,
    ParenExpr,
    CallExpr,
    SelectorExpr,
}

impl Display for NodeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Statement Types
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum StmtType {
    ExprStmt,
    AssignStmt,
}

/// Statement
///
/// Closed set of statement kinds. New kinds are added as new members, and
/// every exhaustive match over `Stmt` then has to handle them.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub enum Stmt {
    Expr(ExprStmt),
    Assign(AssignStmt),
}

impl Stmt {
    /// Returns the type of the statement.
    pub fn get_stmt_type(&self) -> StmtType {
        match self {
            Stmt::Expr(_) => StmtType::ExprStmt,
            Stmt::Assign(_) => StmtType::AssignStmt,
        }
    }
}

impl Node for Stmt {
    fn pos(&self) -> Pos {
        match self {
            Stmt::Expr(stmt) => stmt.pos(),
            Stmt::Assign(stmt) => stmt.pos(),
        }
    }
    fn end(&self) -> Pos {
        match self {
            Stmt::Expr(stmt) => stmt.end(),
            Stmt::Assign(stmt) => stmt.end(),
        }
    }
    fn node_type(&self) -> NodeType {
        match self {
            Stmt::Expr(_) => NodeType::ExprStmt,
            Stmt::Assign(_) => NodeType::AssignStmt,
        }
    }
}

impl From<ExprStmt> for Stmt {
    fn from(stmt: ExprStmt) -> Self {
        Stmt::Expr(stmt)
    }
}

impl From<AssignStmt> for Stmt {
    fn from(stmt: AssignStmt) -> Self {
        Stmt::Assign(stmt)
    }
}

/// Expression Types
///
/// Defines the various kinds of expressions in the AST.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum ExprType {
    Ident,
    Number,
    BasicLit,
    Binary,
    Unary,
    Paren,
    Call,
    Selector,
}

/// Expression
///
/// Closed set of expression kinds. Sub-expressions are owned through `Box`,
/// so every expression has exactly one parent.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub enum Expr {
    Ident(Ident),
    Number(Number),
    BasicLit(BasicLit),
    Binary(BinaryExpr),
    Unary(UnaryExpr),
    Paren(ParenExpr),
    Call(CallExpr),
    Selector(SelectorExpr),
}

impl Expr {
    /// Returns the expression type of the expression.
    pub fn get_expr_type(&self) -> ExprType {
        match self {
            Expr::Ident(_) => ExprType::Ident,
            Expr::Number(_) => ExprType::Number,
            Expr::BasicLit(_) => ExprType::BasicLit,
            Expr::Binary(_) => ExprType::Binary,
            Expr::Unary(_) => ExprType::Unary,
            Expr::Paren(_) => ExprType::Paren,
            Expr::Call(_) => ExprType::Call,
            Expr::Selector(_) => ExprType::Selector,
        }
    }

    /// Whether the expression has the shape of an assignment target.
    pub fn is_lvalue(&self) -> bool {
        match self {
            Expr::Ident(_) | Expr::Selector(_) => true,
            Expr::Number(_)
            | Expr::BasicLit(_)
            | Expr::Binary(_)
            | Expr::Unary(_)
            | Expr::Paren(_)
            | Expr::Call(_) => false,
        }
    }

    pub fn as_ident(&self) -> Option<&Ident> {
        match self {
            Expr::Ident(ident) => Some(ident),
            Expr::Number(_)
            | Expr::BasicLit(_)
            | Expr::Binary(_)
            | Expr::Unary(_)
            | Expr::Paren(_)
            | Expr::Call(_)
            | Expr::Selector(_) => None,
        }
    }
}

impl Node for Expr {
    fn pos(&self) -> Pos {
        match self {
            Expr::Ident(expr) => expr.pos(),
            Expr::Number(expr) => expr.pos(),
            Expr::BasicLit(expr) => expr.pos(),
            Expr::Binary(expr) => expr.pos(),
            Expr::Unary(expr) => expr.pos(),
            Expr::Paren(expr) => expr.pos(),
            Expr::Call(expr) => expr.pos(),
            Expr::Selector(expr) => expr.pos(),
        }
    }
    fn end(&self) -> Pos {
        match self {
            Expr::Ident(expr) => expr.end(),
            Expr::Number(expr) => expr.end(),
            Expr::BasicLit(expr) => expr.end(),
            Expr::Binary(expr) => expr.end(),
            Expr::Unary(expr) => expr.end(),
            Expr::Paren(expr) => expr.end(),
            Expr::Call(expr) => expr.end(),
            Expr::Selector(expr) => expr.end(),
        }
    }
    fn node_type(&self) -> NodeType {
        match self {
            Expr::Ident(_) => NodeType::Ident,
            Expr::Number(_) => NodeType::Number,
            Expr::BasicLit(_) => NodeType::BasicLit,
            Expr::Binary(_) => NodeType::BinaryExpr,
            Expr::Unary(_) => NodeType::UnaryExpr,
            Expr::Paren(_) => NodeType::ParenExpr,
            Expr::Call(_) => NodeType::CallExpr,
            Expr::Selector(_) => NodeType::SelectorExpr,
        }
    }
}

macro_rules! impl_expr_from {
    ($($node:ident => $variant:ident),* $(,)?) => {
        $(
            impl From<$node> for Expr {
                fn from(expr: $node) -> Self {
                    Expr::$variant(expr)
                }
            }
        )*
    };
}

impl_expr_from! {
    Ident => Ident,
    Number => Number,
    BasicLit => BasicLit,
    BinaryExpr => Binary,
    UnaryExpr => Unary,
    ParenExpr => Paren,
    CallExpr => Call,
    SelectorExpr => Selector,
}
