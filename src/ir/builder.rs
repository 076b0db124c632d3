//! Stack-shaped construction of document trees.

use super::{Document, NodeId, NodeKind};

/// Builds a subtree by keeping a stack of open frames.
///
/// The builder is seeded with an existing node. [`push`](NodeBuilder::push)
/// opens a new frame: the node is allocated, appended to the current
/// frame's children right away, and becomes the target for subsequent
/// additions until [`pop`](NodeBuilder::pop) closes it. Because linking is
/// eager, the tree is well-formed after every call; there is no separate
/// commit step, and [`finish`](NodeBuilder::finish) merely hands back the
/// seed node.
pub struct NodeBuilder<'doc> {
    document: &'doc mut Document,
    start: NodeId,
    stack: Vec<NodeId>,
}

impl<'doc> NodeBuilder<'doc> {
    /// Opens a builder whose first frame is `start`.
    pub fn new(document: &'doc mut Document, start: NodeId) -> Self {
        Self {
            document,
            start,
            stack: vec![start],
        }
    }

    /// The node new children are currently appended to, or `None` when
    /// every frame has been popped.
    pub fn current(&self) -> Option<NodeId> {
        self.stack.last().copied()
    }

    /// Allocates a node, appends it to the current frame, and makes it
    /// the new current frame.
    ///
    /// With no open frame the node starts a detached subtree instead.
    ///
    /// # Panics
    /// Panics when the current frame is a leaf kind.
    pub fn push(&mut self, kind: NodeKind) -> NodeId {
        let id = self.document.alloc(kind);
        self.push_existing(id);
        id
    }

    /// Like [`push`](NodeBuilder::push) for a node that already exists.
    pub fn push_existing(&mut self, id: NodeId) {
        if let Some(parent) = self.current() {
            self.document.children_mut(parent).push(id);
        }
        self.stack.push(id);
    }

    /// Allocates a node and appends it to the current frame without
    /// opening it.
    ///
    /// # Panics
    /// Panics when every frame has been popped, or when the current frame
    /// is a leaf kind.
    pub fn add(&mut self, kind: NodeKind) -> NodeId {
        let parent = self.current().expect("add on an empty builder");
        let id = self.document.alloc(kind);
        self.document.children_mut(parent).push(id);
        id
    }

    /// Appends an existing node to the current frame without opening it.
    ///
    /// # Panics
    /// Panics when every frame has been popped, or when the current frame
    /// is a leaf kind.
    pub fn attach(&mut self, id: NodeId) {
        let parent = self.current().expect("attach on an empty builder");
        self.document.children_mut(parent).push(id);
    }

    /// Allocates a node and inserts it among the current frame's children
    /// at `index`. `index == len` appends.
    ///
    /// # Panics
    /// Panics when every frame has been popped, when the current frame is
    /// a leaf kind, or when `index` is past the end.
    pub fn insert(&mut self, index: usize, kind: NodeKind) -> NodeId {
        let parent = self.current().expect("insert on an empty builder");
        let id = self.document.alloc(kind);
        let children = self.document.children_mut(parent);
        if index == children.len() {
            children.push(id);
        } else {
            children.insert(index, id);
        }
        id
    }

    /// Closes the current frame and returns it.
    ///
    /// # Panics
    /// Panics when every frame has already been popped.
    pub fn pop(&mut self) -> NodeId {
        self.stack.pop().expect("pop on an empty builder")
    }

    /// Drops any open frames and returns the seed node.
    pub fn finish(self) -> NodeId {
        self.start
    }
}

// ============================================================================
// Tests
// ============================================================================
