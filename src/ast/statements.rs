use std::slice::Iter;

use serde::Serialize;

use crate::{
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    Pos,
};

use super::{
    ast::{Expr, Node, NodeType, Stmt},
    ranges::ensure_range,
};

/// A lexical block. Statement order is execution order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlockStmt {
    pub lbrace: Pos,
    pub list: Vec<Stmt>,
    pub rbrace: Pos,
}

impl BlockStmt {
    pub fn new(lbrace: Pos, list: Vec<Stmt>, rbrace: Pos) -> Result<Self, Error> {
        ensure_range(BlockStmt {
            lbrace,
            list,
            rbrace,
        })
    }

    pub fn iter(&self) -> Iter<'_, Stmt> {
        self.list.iter()
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }
}

impl Node for BlockStmt {
    fn pos(&self) -> Pos {
        self.lbrace
    }
    fn end(&self) -> Pos {
        self.rbrace.offset(1)
    }
    fn node_type(&self) -> NodeType {
        NodeType::BlockStmt
    }
}

impl<'a> IntoIterator for &'a BlockStmt {
    type Item = &'a Stmt;
    type IntoIter = Iter<'a, Stmt>;

    fn into_iter(self) -> Self::IntoIter {
        self.list.iter()
    }
}

/// An expression evaluated for its effect.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExprStmt {
    pub x: Expr,
}

impl ExprStmt {
    pub fn new(x: Expr) -> Self {
        ExprStmt { x }
    }
}

impl Node for ExprStmt {
    fn pos(&self) -> Pos {
        self.x.pos()
    }
    fn end(&self) -> Pos {
        self.x.end()
    }
    fn node_type(&self) -> NodeType {
        NodeType::ExprStmt
    }
}

/// `target = value` rebinds, `target := value` declares and binds.
///
/// The target is expected to be an identifier or a selector; the parser
/// checks that shape before building the statement.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssignStmt {
    pub target: Expr,
    pub op_pos: Pos,
    pub op: TokenKind,
    pub value: Expr,
}

impl AssignStmt {
    pub fn new(target: Expr, op_pos: Pos, op: TokenKind, value: Expr) -> Result<Self, Error> {
        if !op.is_assign_operator() {
            return Err(Error::new(
                ErrorImpl::InvalidAssignOperator {
                    operator: op.to_string(),
                },
                op_pos,
            ));
        }

        ensure_range(AssignStmt {
            target,
            op_pos,
            op,
            value,
        })
    }

    /// Whether this is a `:=` declaration.
    pub fn is_define(&self) -> bool {
        self.op == TokenKind::Define
    }
}

impl Node for AssignStmt {
    fn pos(&self) -> Pos {
        self.target.pos()
    }
    fn end(&self) -> Pos {
        self.value.end()
    }
    fn node_type(&self) -> NodeType {
        NodeType::AssignStmt
    }
}
