//! Range invariants.
//!
//! Every node satisfies `pos <= end`, every child lies inside its parent,
//! and the members of an ordered sequence (block statements, call arguments,
//! each declaration list of a file) do not overlap and appear in source
//! order. Constructors check the first rule for the node they build;
//! [`check_file`] checks all three over a whole file.

use std::iter::once;

use tracing::trace;

use crate::errors::errors::{Error, ErrorImpl};

use super::{
    ast::Node,
    declarations::File,
    walk::{walk_file, NodeRef, Visitor},
};

/// Returns `node` unchanged if `pos <= end`, an `InvalidRange` error otherwise.
pub fn ensure_range<N: Node>(node: N) -> Result<N, Error> {
    check_node_range(&node)?;
    Ok(node)
}

fn check_node_range<N: Node + ?Sized>(node: &N) -> Result<(), Error> {
    if node.end() < node.pos() {
        return Err(Error::new(
            ErrorImpl::InvalidRange {
                node: node.node_type().to_string(),
                start: node.pos().0,
                end: node.end().0,
            },
            node.pos(),
        ));
    }
    Ok(())
}

/// Checks range containment and sibling order over the whole file.
///
/// Stops at the first violation.
pub fn check_file(file: &File) -> Result<(), Error> {
    let mut checker = RangeChecker { error: None };
    walk_file(&mut checker, file);

    match checker.error {
        Some(error) => Err(error),
        None => {
            trace!(filename = %file.filename, "ranges checked");
            Ok(())
        }
    }
}

struct RangeChecker {
    error: Option<Error>,
}

impl RangeChecker {
    fn check(&self, node: NodeRef<'_>) -> Result<(), Error> {
        check_node_range(&node)?;

        let parent = node.span();
        for child in node.children() {
            if !parent.contains(&child.span()) {
                return Err(Error::new(
                    ErrorImpl::ChildOutsideParent {
                        parent: node.node_type().to_string(),
                        child: child.node_type().to_string(),
                    },
                    child.pos(),
                ));
            }
        }

        for group in ordered_groups(node) {
            for pair in group.windows(2) {
                if pair[1].pos() < pair[0].end() {
                    return Err(Error::new(
                        ErrorImpl::SiblingsOverlap {
                            node: pair[1].node_type().to_string(),
                        },
                        pair[1].pos(),
                    ));
                }
            }
        }

        Ok(())
    }
}

impl<'ast> Visitor<'ast> for RangeChecker {
    fn enter(&mut self, node: NodeRef<'ast>) -> bool {
        if self.error.is_some() {
            return false;
        }
        if let Err(error) = self.check(node) {
            self.error = Some(error);
            return false;
        }
        true
    }
}

/// Children that must appear in source order, grouped by sequence.
///
/// Declarations of different kinds may interleave in a file, so each list
/// is ordered on its own, after the package clause.
fn ordered_groups(node: NodeRef<'_>) -> Vec<Vec<NodeRef<'_>>> {
    match node {
        NodeRef::File(file) => {
            let pkg = NodeRef::PackageSpec(&file.pkg);

            vec![
                once(pkg).chain(file.imports.iter().map(NodeRef::ImportSpec)).collect(),
                once(pkg).chain(file.consts.iter().map(NodeRef::ConstSpec)).collect(),
                once(pkg).chain(file.globals.iter().map(NodeRef::VarSpec)).collect(),
                once(pkg).chain(file.funcs.iter().map(NodeRef::Func)).collect(),
            ]
        }
        NodeRef::PackageSpec(_)
        | NodeRef::ImportSpec(_)
        | NodeRef::ConstSpec(_)
        | NodeRef::VarSpec(_)
        | NodeRef::Func(_)
        | NodeRef::BlockStmt(_)
        | NodeRef::Stmt(_)
        | NodeRef::Expr(_)
        | NodeRef::Ident(_)
        | NodeRef::BasicLit(_) => vec![node.children()],
    }
}

