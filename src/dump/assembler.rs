//! The assembler folds parsed records, in dump order, into a single tree.
//!
//! Records may arrive in any order, so a child reference can precede the record
//! that defines the child. Such children enter the table as placeholders and are
//! resolved in place later, keeping the edges recorded in the meantime. Parent
//! links are first-claim-wins: once a record has claimed a child, later claims by
//! other records are dropped silently.

use super::record::{NodeId, NodeRecord};
use super::tree::{AstTree, TreeNode, ROOT_ID};
use crate::error::AstVizError;

/// The assembler either produces the finished tree or reports that the dump
/// never mentions the root id.
type AssemblerResult = Result<AstTree, AstVizError>;

pub struct Assembler {
    tree: AstTree,
}

impl Assembler {
    pub fn new() -> Self {
        Self {
            tree: AstTree::new(),
        }
    }

    /// Fold the records into a tree and resolve its root.
    pub fn assemble(mut self, records: Vec<NodeRecord>) -> AssemblerResult {
        for record in &records {
            self.apply(record);
        }
        if self.tree.contains(ROOT_ID) {
            Ok(self.tree)
        } else {
            Err(AstVizError::NoRoot)
        }
    }

    /// Create or update the record's own node, then link its children.
    fn apply(&mut self, record: &NodeRecord) {
        match self.tree.get_mut(record.id) {
            // The id was seen before, as a forward reference or a duplicate
            // record: overwrite label and tag in place, edges stay intact.
            Some(node) => {
                node.label = record.label();
                node.typ = record.typ.clone();
            }
            None => self
                .tree
                .insert(record.id, TreeNode::new(record.label(), record.typ.clone())),
        }
        for &child_id in &record.children {
            self.link_child(record.id, child_id);
        }
    }

    /// Attach `child_id` to `parent_id` unless the child already has a parent.
    fn link_child(&mut self, parent_id: NodeId, child_id: NodeId) {
        // A record naming itself as a child would become its own parent and
        // cycle the renderers; such claims are refused.
        if parent_id == child_id {
            return;
        }
        match self.tree.get_mut(child_id) {
            // First claim wins.
            Some(child) if child.parent.is_some() => return,
            Some(child) => child.parent = Some(parent_id),
            // Forward reference: the only moment a brand-new node gets its
            // parent set, so placeholders always hang off whichever record
            // revealed them first.
            None => {
                let mut child = TreeNode::placeholder(child_id);
                child.parent = Some(parent_id);
                self.tree.insert(child_id, child);
            }
        }
        if let Some(parent) = self.tree.get_mut(parent_id) {
            parent.children.push(child_id);
        }
    }
}

impl Default for Assembler {
    fn default() -> Self {
        Self::new()
    }
}
