use crate::Pos;

use super::{
    ast::{Expr, Node, NodeType, Stmt},
    declarations::{ConstSpec, File, Func, ImportSpec, PackageSpec, VarSpec},
    expressions::{BasicLit, Ident},
    statements::BlockStmt,
};

/// A borrowed reference to any node of a file.
///
/// `Expr` and `Stmt` stay wrapped so that the variant is resolved by the
/// exhaustive matches below. `Ident` and `BasicLit` appear on their own only
/// where a parent holds them directly (call names, selectors, declaration
/// names, import paths).
#[derive(Debug, Clone, Copy)]
pub enum NodeRef<'ast> {
    File(&'ast File),
    PackageSpec(&'ast PackageSpec),
    ImportSpec(&'ast ImportSpec),
    ConstSpec(&'ast ConstSpec),
    VarSpec(&'ast VarSpec),
    Func(&'ast Func),
    BlockStmt(&'ast BlockStmt),
    Stmt(&'ast Stmt),
    Expr(&'ast Expr),
    Ident(&'ast Ident),
    BasicLit(&'ast BasicLit),
}

/// Identity of a node within a live tree: its address plus its type.
///
/// Only meaningful while the tree is alive and unmoved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    addr: usize,
    node_type: NodeType,
}

impl NodeId {
    pub fn node_type(&self) -> NodeType {
        self.node_type
    }
}

fn addr_of<T>(node: &T) -> usize {
    node as *const T as usize
}

impl<'ast> NodeRef<'ast> {
    pub fn id(&self) -> NodeId {
        let addr = match self {
            NodeRef::File(node) => addr_of(*node),
            NodeRef::PackageSpec(node) => addr_of(*node),
            NodeRef::ImportSpec(node) => addr_of(*node),
            NodeRef::ConstSpec(node) => addr_of(*node),
            NodeRef::VarSpec(node) => addr_of(*node),
            NodeRef::Func(node) => addr_of(*node),
            NodeRef::BlockStmt(node) => addr_of(*node),
            NodeRef::Stmt(node) => addr_of(*node),
            NodeRef::Expr(node) => addr_of(*node),
            NodeRef::Ident(node) => addr_of(*node),
            NodeRef::BasicLit(node) => addr_of(*node),
        };

        NodeId {
            addr,
            node_type: self.node_type(),
        }
    }

    /// Direct children in source order.
    pub fn children(&self) -> Vec<NodeRef<'ast>> {
        match *self {
            NodeRef::File(file) => {
                let mut children = vec![NodeRef::PackageSpec(&file.pkg)];
                children.extend(file.imports.iter().map(NodeRef::ImportSpec));
                children.extend(file.consts.iter().map(NodeRef::ConstSpec));
                children.extend(file.globals.iter().map(NodeRef::VarSpec));
                children.extend(file.funcs.iter().map(NodeRef::Func));
                // Declaration kinds interleave in source; the sort is stable
                // so nodes at equal positions keep their list order.
                children.sort_by_key(|child| child.pos());
                children
            }
            NodeRef::PackageSpec(_) => vec![],
            NodeRef::ImportSpec(spec) => {
                let mut children = vec![];
                if let Some(name) = &spec.name {
                    children.push(NodeRef::Ident(name));
                }
                children.push(NodeRef::BasicLit(&spec.path));
                children
            }
            NodeRef::ConstSpec(spec) => {
                let mut children = vec![NodeRef::Ident(&spec.name)];
                if let Some(ty) = &spec.ty {
                    children.push(NodeRef::Ident(ty));
                }
                children.push(NodeRef::Expr(&spec.value));
                children
            }
            NodeRef::VarSpec(spec) => {
                let mut children = vec![NodeRef::Ident(&spec.name)];
                if let Some(ty) = &spec.ty {
                    children.push(NodeRef::Ident(ty));
                }
                if let Some(value) = &spec.value {
                    children.push(NodeRef::Expr(value));
                }
                children
            }
            NodeRef::Func(func) => vec![NodeRef::BlockStmt(&func.body)],
            NodeRef::BlockStmt(block) => block.list.iter().map(NodeRef::Stmt).collect(),
            NodeRef::Stmt(stmt) => match stmt {
                Stmt::Expr(stmt) => vec![NodeRef::Expr(&stmt.x)],
                Stmt::Assign(stmt) => vec![NodeRef::Expr(&stmt.target), NodeRef::Expr(&stmt.value)],
            },
            NodeRef::Expr(expr) => match expr {
                Expr::Ident(_) | Expr::Number(_) | Expr::BasicLit(_) => vec![],
                Expr::Binary(expr) => vec![NodeRef::Expr(&expr.x), NodeRef::Expr(&expr.y)],
                Expr::Unary(expr) => vec![NodeRef::Expr(&expr.x)],
                Expr::Paren(expr) => vec![NodeRef::Expr(&expr.x)],
                Expr::Call(expr) => {
                    let mut children = vec![NodeRef::Ident(&expr.func_name)];
                    children.extend(expr.args.iter().map(NodeRef::Expr));
                    children
                }
                Expr::Selector(expr) => vec![NodeRef::Expr(&expr.x), NodeRef::Ident(&expr.sel)],
            },
            NodeRef::Ident(_) | NodeRef::BasicLit(_) => vec![],
        }
    }
}

impl Node for NodeRef<'_> {
    fn pos(&self) -> Pos {
        match self {
            NodeRef::File(node) => node.pos(),
            NodeRef::PackageSpec(node) => node.pos(),
            NodeRef::ImportSpec(node) => node.pos(),
            NodeRef::ConstSpec(node) => node.pos(),
            NodeRef::VarSpec(node) => node.pos(),
            NodeRef::Func(node) => node.pos(),
            NodeRef::BlockStmt(node) => node.pos(),
            NodeRef::Stmt(node) => node.pos(),
            NodeRef::Expr(node) => node.pos(),
            NodeRef::Ident(node) => node.pos(),
            NodeRef::BasicLit(node) => node.pos(),
        }
    }
    fn end(&self) -> Pos {
        match self {
            NodeRef::File(node) => node.end(),
            NodeRef::PackageSpec(node) => node.end(),
            NodeRef::ImportSpec(node) => node.end(),
            NodeRef::ConstSpec(node) => node.end(),
            NodeRef::VarSpec(node) => node.end(),
            NodeRef::Func(node) => node.end(),
            NodeRef::BlockStmt(node) => node.end(),
            NodeRef::Stmt(node) => node.end(),
            NodeRef::Expr(node) => node.end(),
            NodeRef::Ident(node) => node.end(),
            NodeRef::BasicLit(node) => node.end(),
        }
    }
    fn node_type(&self) -> NodeType {
        match self {
            NodeRef::File(node) => node.node_type(),
            NodeRef::PackageSpec(node) => node.node_type(),
            NodeRef::ImportSpec(node) => node.node_type(),
            NodeRef::ConstSpec(node) => node.node_type(),
            NodeRef::VarSpec(node) => node.node_type(),
            NodeRef::Func(node) => node.node_type(),
            NodeRef::BlockStmt(node) => node.node_type(),
            NodeRef::Stmt(node) => node.node_type(),
            NodeRef::Expr(node) => node.node_type(),
            NodeRef::Ident(node) => node.node_type(),
            NodeRef::BasicLit(node) => node.node_type(),
        }
    }
}

/// Read-only tree visitor.
///
/// `enter` runs before a node's children and decides whether they are
/// visited; `leave` runs after them (also when they were skipped).
pub trait Visitor<'ast> {
    fn enter(&mut self, _node: NodeRef<'ast>) -> bool {
        true
    }

    fn leave(&mut self, _node: NodeRef<'ast>) {}
}

/// Depth-first, source-order traversal starting at `node`.
pub fn walk<'ast, V: Visitor<'ast> + ?Sized>(visitor: &mut V, node: NodeRef<'ast>) {
    if visitor.enter(node) {
        for child in node.children() {
            walk(visitor, child);
        }
    }
    visitor.leave(node);
}

/// Visits every node of `file`.
pub fn walk_file<'ast, V: Visitor<'ast> + ?Sized>(visitor: &mut V, file: &'ast File) {
    walk(visitor, NodeRef::File(file));
}
