//! Visitor infrastructure for document trees.
//!
//! Implement [`Visitor`] for your pass and override only the methods you
//! need. Every per-kind method defaults to [`Visitor::visit_default`],
//! which recurses into children through the walker, so an empty impl
//! traverses the whole tree. Keep the `visit_default` call in an override
//! to continue recursion; omit it to prune the subtree. Doing your own
//! work before the call processes the node pre-order relative to its
//! children, after the call post-order.
//!
//! [`Walker`] carries the traversal state: a shared borrow of the
//! document plus the stack of ancestors of the node being visited. The
//! shared borrow means the borrow checker rejects any attempt to mutate
//! the document mid-walk; record [`NodeReference`](super::NodeReference)
//! handles instead and apply them afterwards.
//!
//! # Examples
//!
//! ```
//! use trellis::ir::{
//!     walk_document, Document, DocumentNode, NodeBuilder, NodeId, NodeKind, Visitor, Walker,
//! };
//!
//! struct NamespaceNames(Vec<String>);
//!
//! impl Visitor for NamespaceNames {
//!     fn visit_namespace(&mut self, walker: &mut Walker<'_>, id: NodeId, node: &DocumentNode) {
//!         if let NodeKind::Namespace { content } = node.kind() {
//!             self.0.push(content.clone());
//!         }
//!         self.visit_default(walker, id);
//!     }
//! }
//!
//! let mut document = Document::new("component");
//! let root = document.root();
//! NodeBuilder::new(&mut document, root).add(NodeKind::Namespace {
//!     content: "App.Pages".into(),
//! });
//!
//! let mut names = NamespaceNames(Vec::new());
//! walk_document(&mut names, &document);
//! assert_eq!(names.0, ["App.Pages"]);
//! ```

use super::{Document, DocumentNode, ExtensionNode, NodeId, NodeKind};

/// One visit method per node kind, all defaulting to [`visit_default`],
/// which recurses.
///
/// [`visit_default`]: Visitor::visit_default
pub trait Visitor: Sized {
    /// Fallback for every kind without an override. The default body
    /// descends into children; override it to change the handling of all
    /// kinds at once.
    fn visit_default(&mut self, walker: &mut Walker<'_>, id: NodeId) {
        walker.descend(self, id);
    }

    fn visit_document(&mut self, walker: &mut Walker<'_>, id: NodeId, _node: &DocumentNode) {
        self.visit_default(walker, id);
    }

    fn visit_namespace(&mut self, walker: &mut Walker<'_>, id: NodeId, _node: &DocumentNode) {
        self.visit_default(walker, id);
    }

    fn visit_class(&mut self, walker: &mut Walker<'_>, id: NodeId, _node: &DocumentNode) {
        self.visit_default(walker, id);
    }

    fn visit_method(&mut self, walker: &mut Walker<'_>, id: NodeId, _node: &DocumentNode) {
        self.visit_default(walker, id);
    }

    fn visit_field(&mut self, walker: &mut Walker<'_>, id: NodeId, _node: &DocumentNode) {
        self.visit_default(walker, id);
    }

    fn visit_property(&mut self, walker: &mut Walker<'_>, id: NodeId, _node: &DocumentNode) {
        self.visit_default(walker, id);
    }

    fn visit_using(&mut self, walker: &mut Walker<'_>, id: NodeId, _node: &DocumentNode) {
        self.visit_default(walker, id);
    }

    fn visit_directive(&mut self, walker: &mut Walker<'_>, id: NodeId, _node: &DocumentNode) {
        self.visit_default(walker, id);
    }

    fn visit_directive_token(&mut self, walker: &mut Walker<'_>, id: NodeId, _node: &DocumentNode) {
        self.visit_default(walker, id);
    }

    fn visit_host_code(&mut self, walker: &mut Walker<'_>, id: NodeId, _node: &DocumentNode) {
        self.visit_default(walker, id);
    }

    fn visit_host_expression(&mut self, walker: &mut Walker<'_>, id: NodeId, _node: &DocumentNode) {
        self.visit_default(walker, id);
    }

    fn visit_markup_element(&mut self, walker: &mut Walker<'_>, id: NodeId, _node: &DocumentNode) {
        self.visit_default(walker, id);
    }

    fn visit_markup_attribute(
        &mut self,
        walker: &mut Walker<'_>,
        id: NodeId,
        _node: &DocumentNode,
    ) {
        self.visit_default(walker, id);
    }

    fn visit_markup_attribute_value(
        &mut self,
        walker: &mut Walker<'_>,
        id: NodeId,
        _node: &DocumentNode,
    ) {
        self.visit_default(walker, id);
    }

    fn visit_markup_content(&mut self, walker: &mut Walker<'_>, id: NodeId, _node: &DocumentNode) {
        self.visit_default(walker, id);
    }

    fn visit_tag_helper(&mut self, walker: &mut Walker<'_>, id: NodeId, _node: &DocumentNode) {
        self.visit_default(walker, id);
    }

    fn visit_tag_helper_property(
        &mut self,
        walker: &mut Walker<'_>,
        id: NodeId,
        _node: &DocumentNode,
    ) {
        self.visit_default(walker, id);
    }

    fn visit_tag_helper_html_attribute(
        &mut self,
        walker: &mut Walker<'_>,
        id: NodeId,
        _node: &DocumentNode,
    ) {
        self.visit_default(walker, id);
    }

    fn visit_component(&mut self, walker: &mut Walker<'_>, id: NodeId, _node: &DocumentNode) {
        self.visit_default(walker, id);
    }

    fn visit_component_attribute(
        &mut self,
        walker: &mut Walker<'_>,
        id: NodeId,
        _node: &DocumentNode,
    ) {
        self.visit_default(walker, id);
    }

    fn visit_component_child_content(
        &mut self,
        walker: &mut Walker<'_>,
        id: NodeId,
        _node: &DocumentNode,
    ) {
        self.visit_default(walker, id);
    }

    fn visit_component_type_argument(
        &mut self,
        walker: &mut Walker<'_>,
        id: NodeId,
        _node: &DocumentNode,
    ) {
        self.visit_default(walker, id);
    }

    fn visit_component_type_inference_method(
        &mut self,
        walker: &mut Walker<'_>,
        id: NodeId,
        _node: &DocumentNode,
    ) {
        self.visit_default(walker, id);
    }

    fn visit_reference_capture(
        &mut self,
        walker: &mut Walker<'_>,
        id: NodeId,
        _node: &DocumentNode,
    ) {
        self.visit_default(walker, id);
    }

    fn visit_set_key(&mut self, walker: &mut Walker<'_>, id: NodeId, _node: &DocumentNode) {
        self.visit_default(walker, id);
    }

    fn visit_splat(&mut self, walker: &mut Walker<'_>, id: NodeId, _node: &DocumentNode) {
        self.visit_default(walker, id);
    }

    fn visit_token(&mut self, walker: &mut Walker<'_>, id: NodeId, _node: &DocumentNode) {
        self.visit_default(walker, id);
    }

    /// Called for [`NodeKind::Extension`] nodes with the erased payload.
    /// Downcast through [`ExtensionNode::as_any`] when the concrete type
    /// matters; the default treats it as an ordinary container.
    fn visit_extension(&mut self, walker: &mut Walker<'_>, id: NodeId, _node: &dyn ExtensionNode) {
        self.visit_default(walker, id);
    }
}

/// Traversal engine: dispatches nodes to visitor methods and tracks the
/// ancestor chain of the node currently being visited.
pub struct Walker<'doc> {
    document: &'doc Document,
    ancestors: Vec<NodeId>,
}

impl<'doc> Walker<'doc> {
    pub fn new(document: &'doc Document) -> Self {
        Self {
            document,
            ancestors: Vec::new(),
        }
    }

    pub fn document(&self) -> &'doc Document {
        self.document
    }

    /// Parent of the node currently being visited, if any.
    pub fn parent(&self) -> Option<NodeId> {
        self.ancestors.last().copied()
    }

    /// Ancestors of the current node, nearest first.
    pub fn ancestors(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.ancestors.iter().rev().copied()
    }

    /// How many ancestors the current node has.
    pub fn depth(&self) -> usize {
        self.ancestors.len()
    }

    /// Dispatches `id` to the visitor method matching its kind.
    pub fn walk<V: Visitor>(&mut self, visitor: &mut V, id: NodeId) {
        let document = self.document;
        let node = document.node(id);
        match node.kind() {
            NodeKind::Document { .. } => visitor.visit_document(self, id, node),
            NodeKind::Namespace { .. } => visitor.visit_namespace(self, id, node),
            NodeKind::Class { .. } => visitor.visit_class(self, id, node),
            NodeKind::Method { .. } => visitor.visit_method(self, id, node),
            NodeKind::Field { .. } => visitor.visit_field(self, id, node),
            NodeKind::Property { .. } => visitor.visit_property(self, id, node),
            NodeKind::Using { .. } => visitor.visit_using(self, id, node),
            NodeKind::Directive { .. } => visitor.visit_directive(self, id, node),
            NodeKind::DirectiveToken { .. } => visitor.visit_directive_token(self, id, node),
            NodeKind::HostCode => visitor.visit_host_code(self, id, node),
            NodeKind::HostExpression => visitor.visit_host_expression(self, id, node),
            NodeKind::MarkupElement { .. } => visitor.visit_markup_element(self, id, node),
            NodeKind::MarkupAttribute { .. } => visitor.visit_markup_attribute(self, id, node),
            NodeKind::MarkupAttributeValue { .. } => {
                visitor.visit_markup_attribute_value(self, id, node)
            }
            NodeKind::MarkupContent => visitor.visit_markup_content(self, id, node),
            NodeKind::TagHelper { .. } => visitor.visit_tag_helper(self, id, node),
            NodeKind::TagHelperProperty { .. } => {
                visitor.visit_tag_helper_property(self, id, node)
            }
            NodeKind::TagHelperHtmlAttribute { .. } => {
                visitor.visit_tag_helper_html_attribute(self, id, node)
            }
            NodeKind::Component { .. } => visitor.visit_component(self, id, node),
            NodeKind::ComponentAttribute { .. } => {
                visitor.visit_component_attribute(self, id, node)
            }
            NodeKind::ComponentChildContent { .. } => {
                visitor.visit_component_child_content(self, id, node)
            }
            NodeKind::ComponentTypeArgument { .. } => {
                visitor.visit_component_type_argument(self, id, node)
            }
            NodeKind::ComponentTypeInferenceMethod { .. } => {
                visitor.visit_component_type_inference_method(self, id, node)
            }
            NodeKind::ReferenceCapture { .. } => visitor.visit_reference_capture(self, id, node),
            NodeKind::SetKey { .. } => visitor.visit_set_key(self, id, node),
            NodeKind::Splat => visitor.visit_splat(self, id, node),
            NodeKind::Token { .. } => visitor.visit_token(self, id, node),
            NodeKind::Extension(ext) => visitor.visit_extension(self, id, ext.as_ref()),
        }
    }

    /// Walks each child of `id` in slot order, with `id` pushed onto the
    /// ancestor stack for the duration.
    pub fn descend<V: Visitor>(&mut self, visitor: &mut V, id: NodeId) {
        let document = self.document;
        self.ancestors.push(id);
        for &child in document.node(id).children_ids() {
            self.walk(visitor, child);
        }
        self.ancestors.pop();
    }
}

/// Walks the whole document from its root.
pub fn walk_document<V: Visitor>(visitor: &mut V, document: &Document) {
    walk_from(visitor, document, document.root());
}

/// Walks the subtree rooted at `start`.
pub fn walk_from<V: Visitor>(visitor: &mut V, document: &Document, start: NodeId) {
    Walker::new(document).walk(visitor, start);
}

// ============================================================================
// Composition helpers
// ============================================================================

/// Ids of every node below `start` (excluding `start` itself) matching a
/// predicate, in pre-order.
pub fn find_descendants<F>(document: &Document, start: NodeId, predicate: F) -> Vec<NodeId>
where
    F: Fn(&DocumentNode) -> bool,
{
    struct Finder<F> {
        predicate: F,
        found: Vec<NodeId>,
    }

    impl<F> Visitor for Finder<F>
    where
        F: Fn(&DocumentNode) -> bool,
    {
        fn visit_default(&mut self, walker: &mut Walker<'_>, id: NodeId) {
            if (self.predicate)(walker.document().node(id)) {
                self.found.push(id);
            }
            walker.descend(self, id);
        }
    }

    let mut finder = Finder {
        predicate,
        found: Vec::new(),
    };
    Walker::new(document).descend(&mut finder, start);
    finder.found
}

/// Number of nodes in the subtree rooted at `start` (including `start`)
/// matching a predicate.
pub fn count_nodes<F>(document: &Document, start: NodeId, predicate: F) -> usize
where
    F: Fn(&DocumentNode) -> bool,
{
    struct Counter<F> {
        predicate: F,
        count: usize,
    }

    impl<F> Visitor for Counter<F>
    where
        F: Fn(&DocumentNode) -> bool,
    {
        fn visit_default(&mut self, walker: &mut Walker<'_>, id: NodeId) {
            if (self.predicate)(walker.document().node(id)) {
                self.count += 1;
            }
            walker.descend(self, id);
        }
    }

    let mut counter = Counter {
        predicate,
        count: 0,
    };
    walk_from(&mut counter, document, start);
    counter.count
}

/// Whether any node in the subtree rooted at `start` (including `start`)
/// has a kind matching the predicate. Short-circuits on the first match.
pub fn contains_kind<F>(document: &Document, start: NodeId, predicate: F) -> bool
where
    F: Fn(&NodeKind) -> bool,
{
    struct Detector<F> {
        predicate: F,
        found: bool,
    }

    impl<F> Visitor for Detector<F>
    where
        F: Fn(&NodeKind) -> bool,
    {
        fn visit_default(&mut self, walker: &mut Walker<'_>, id: NodeId) {
            if self.found {
                return;
            }
            if (self.predicate)(walker.document().node(id).kind()) {
                self.found = true;
                return;
            }
            walker.descend(self, id);
        }
    }

    let mut detector = Detector {
        predicate,
        found: false,
    };
    walk_from(&mut detector, document, start);
    detector.found
}

// ============================================================================
// Tests
// ============================================================================
