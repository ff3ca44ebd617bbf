use std::collections::HashMap;

use super::{
    declarations::File,
    walk::{walk_file, NodeId, NodeRef, Visitor},
};

/// Side table from each node to its parent.
///
/// The tree keeps no back references, so passes that need parent context
/// build one of these instead. Entries are keyed by [`NodeId`] and borrow
/// the file, which therefore cannot move while the table is alive.
#[derive(Debug)]
pub struct ParentTable<'ast> {
    parents: HashMap<NodeId, NodeRef<'ast>>,
}

impl<'ast> ParentTable<'ast> {
    pub fn build(file: &'ast File) -> Self {
        let mut builder = ParentTableBuilder {
            parents: HashMap::new(),
            stack: vec![],
        };
        walk_file(&mut builder, file);

        ParentTable {
            parents: builder.parents,
        }
    }

    /// The parent of `node`, or `None` for the file root and for nodes
    /// from another tree.
    pub fn parent(&self, node: NodeRef<'_>) -> Option<NodeRef<'ast>> {
        self.parents.get(&node.id()).copied()
    }

    /// Parents of `node` from the nearest to the root.
    pub fn ancestors(&self, node: NodeRef<'_>) -> Vec<NodeRef<'ast>> {
        let mut ancestors = vec![];
        let mut current = self.parent(node);
        while let Some(parent) = current {
            ancestors.push(parent);
            current = self.parent(parent);
        }
        ancestors
    }

    pub fn len(&self) -> usize {
        self.parents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parents.is_empty()
    }
}

struct ParentTableBuilder<'ast> {
    parents: HashMap<NodeId, NodeRef<'ast>>,
    stack: Vec<NodeRef<'ast>>,
}

impl<'ast> Visitor<'ast> for ParentTableBuilder<'ast> {
    fn enter(&mut self, node: NodeRef<'ast>) -> bool {
        if let Some(parent) = self.stack.last() {
            self.parents.insert(node.id(), *parent);
        }
        self.stack.push(node);
        true
    }

    fn leave(&mut self, _node: NodeRef<'ast>) {
        self.stack.pop();
    }
}
