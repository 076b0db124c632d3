//! Positional edit handles for document trees.

use super::{Document, DocumentNode, NodeId, Visitor, Walker};

/// A `(parent, node)` handle naming one child slot by identity.
///
/// References hold no index. Every operation re-locates `node` inside
/// `parent`'s current children first, so a batch of references collected
/// up front stays valid while earlier edits shift siblings around. Only
/// detaching the node itself (or replacing it) invalidates its handle.
///
/// # Panics
/// All operations panic when the parent's children are read-only or when
/// `node` is no longer among them. Both are bugs in the calling pass, not
/// recoverable states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeReference {
    parent: NodeId,
    node: NodeId,
}

impl NodeReference {
    pub fn new(parent: NodeId, node: NodeId) -> Self {
        Self { parent, node }
    }

    pub fn parent(&self) -> NodeId {
        self.parent
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Replaces the referenced node with `replacement` in place.
    pub fn replace(&self, document: &mut Document, replacement: NodeId) {
        let index = self.resolve_index(document);
        document.children_mut(self.parent)[index] = replacement;
    }

    /// Detaches the referenced node from its parent.
    pub fn remove(&self, document: &mut Document) {
        let index = self.resolve_index(document);
        document.children_mut(self.parent).remove(index);
    }

    /// Inserts `id` immediately before the referenced node.
    pub fn insert_before(&self, document: &mut Document, id: NodeId) {
        let index = self.resolve_index(document);
        document.children_mut(self.parent).insert(index, id);
    }

    /// Inserts `id` immediately after the referenced node.
    pub fn insert_after(&self, document: &mut Document, id: NodeId) {
        let index = self.resolve_index(document);
        document.children_mut(self.parent).insert(index + 1, id);
    }

    /// Inserts every id in order, the first one immediately before the
    /// referenced node.
    pub fn insert_before_all(&self, document: &mut Document, ids: &[NodeId]) {
        let mut index = self.resolve_index(document);
        let children = document.children_mut(self.parent);
        for &id in ids {
            children.insert(index, id);
            index += 1;
        }
    }

    /// Inserts every id in order, the first one immediately after the
    /// referenced node.
    pub fn insert_after_all(&self, document: &mut Document, ids: &[NodeId]) {
        let mut index = self.resolve_index(document) + 1;
        let children = document.children_mut(self.parent);
        for &id in ids {
            children.insert(index, id);
            index += 1;
        }
    }

    fn resolve_index(&self, document: &Document) -> usize {
        let parent = document.node(self.parent);
        if parent.children().is_read_only() {
            panic!("{} children are read-only", parent.kind().name());
        }
        match parent
            .children_ids()
            .iter()
            .position(|&child| child == self.node)
        {
            Some(index) => index,
            None => panic!("node is no longer a child of {}", parent.kind().name()),
        }
    }
}

/// References to every node below `start` matching a predicate, collected
/// post-order.
///
/// Post-order means a leaf's reference precedes its ancestors', so
/// applying edits in collection order never disturbs an entry that has
/// yet to be resolved from above. `start` itself has no parent within
/// the traversal and is never part of the result.
pub fn collect_references<F>(
    document: &Document,
    start: NodeId,
    predicate: F,
) -> Vec<NodeReference>
where
    F: Fn(&DocumentNode) -> bool,
{
    struct Collector<F> {
        predicate: F,
        references: Vec<NodeReference>,
    }

    impl<F> Visitor for Collector<F>
    where
        F: Fn(&DocumentNode) -> bool,
    {
        fn visit_default(&mut self, walker: &mut Walker<'_>, id: NodeId) {
            walker.descend(self, id);
            if let Some(parent) = walker.parent() {
                if (self.predicate)(walker.document().node(id)) {
                    self.references.push(NodeReference::new(parent, id));
                }
            }
        }
    }

    let mut collector = Collector {
        predicate,
        references: Vec::new(),
    };
    super::walk_from(&mut collector, document, start);
    collector.references
}

// ============================================================================
// Tests
// ============================================================================
