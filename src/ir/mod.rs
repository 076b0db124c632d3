//! Mutable document IR.
//!
//! Where [`syntax`](crate::syntax) models parsed source as an immutable
//! value, this module models the output side: the document tree that
//! lowering and rewrite passes edit in place before code generation. Every
//! node lives in an arena owned by its [`Document`] and is addressed by a
//! [`NodeId`], so passes hold plain copyable ids across edits instead of
//! references into the tree. Structural edits go through
//! [`NodeReference`] handles or a [`NodeBuilder`]; read-side traversal goes
//! through [`Visitor`] and [`Walker`].
//!
//! Nodes detached by an edit are not destroyed. They stay in the arena,
//! unreachable from the root, and simply stop participating in traversal.

mod builder;
mod format;
mod reference;
mod visit;

pub use builder::NodeBuilder;
pub use format::tree_to_string;
pub use reference::{collect_references, NodeReference};
pub use visit::{
    contains_kind, count_nodes, find_descendants, walk_document, walk_from, Visitor, Walker,
};

use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;

use la_arena::{Arena, Idx};

use crate::diagnostics::Diagnostic;
use crate::span::Span;

/// Identity of a node within its [`Document`]'s arena.
pub type NodeId = Idx<DocumentNode>;

/// Well-known annotation keys shared between passes.
pub mod annotations {
    /// Marks the namespace generated members are emitted into.
    pub const PRIMARY_NAMESPACE: &str = "primary-namespace";
    /// Marks the class generated members land on.
    pub const PRIMARY_CLASS: &str = "primary-class";
    /// Marks the method that renders the document body.
    pub const PRIMARY_METHOD: &str = "primary-method";
    /// Marks nodes pulled in from an imported document rather than the
    /// main source file.
    pub const IMPORTED: &str = "imported";
}

/// Classifies the text carried by a [`NodeKind::Token`] node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Host-language code.
    Host,
    /// Literal markup text.
    Markup,
}

/// Escape hatch for node kinds the core does not know about.
///
/// Backends box their own types into [`NodeKind::Extension`]. A visitor
/// that knows a concrete extension type recovers it through
/// [`ExtensionNode::as_any`]; every other visitor sees an ordinary
/// container node and recurses straight through it.
pub trait ExtensionNode: fmt::Debug {
    /// Display name used by panic messages and tree dumps.
    fn name(&self) -> &str;

    /// Typed access for visitors that recognize the concrete type.
    fn as_any(&self) -> &dyn Any;
}

/// Payload of a [`DocumentNode`].
///
/// One variant per construct the code generator understands, from the
/// outer declaration shell (namespace, class, method) down to individual
/// tokens of host code or markup.
#[derive(Debug)]
pub enum NodeKind {
    /// Root of a document tree. `kind` labels the flavor of document the
    /// tree was lowered from, e.g. `"component"`.
    Document { kind: String },
    Namespace { content: String },
    Class {
        name: String,
        base_type: Option<String>,
        interfaces: Vec<String>,
        modifiers: Vec<String>,
    },
    Method {
        name: String,
        return_type: String,
        modifiers: Vec<String>,
        parameters: Vec<String>,
    },
    Field {
        name: String,
        field_type: String,
        modifiers: Vec<String>,
    },
    Property {
        name: String,
        property_type: String,
        modifiers: Vec<String>,
    },
    Using { content: String },
    Directive { name: String },
    DirectiveToken { content: String },
    /// Host-language statement block; children are host tokens.
    HostCode,
    /// Host-language expression whose value is rendered into the output;
    /// children are host tokens.
    HostExpression,
    MarkupElement { tag_name: String },
    MarkupAttribute {
        name: String,
        prefix: String,
        suffix: String,
    },
    MarkupAttributeValue { prefix: String },
    /// Literal markup run; children are markup tokens.
    MarkupContent,
    TagHelper { tag_name: String },
    TagHelperProperty { attribute_name: String },
    TagHelperHtmlAttribute { attribute_name: String },
    Component { tag_name: String },
    ComponentAttribute { attribute_name: String },
    ComponentChildContent {
        attribute_name: String,
        parameter_name: String,
    },
    ComponentTypeArgument { type_parameter_name: String },
    ComponentTypeInferenceMethod {
        full_type_name: String,
        method_name: String,
    },
    ReferenceCapture { identifier: String },
    SetKey { key: String },
    Splat,
    Token { content: String, kind: TokenKind },
    Extension(Box<dyn ExtensionNode>),
}

impl NodeKind {
    /// Kinds whose child collection is the read-only [`Children::Leaf`]
    /// sentinel.
    pub fn is_leaf(&self) -> bool {
        matches!(
            self,
            NodeKind::Token { .. }
                | NodeKind::DirectiveToken { .. }
                | NodeKind::ReferenceCapture { .. }
                | NodeKind::SetKey { .. }
        )
    }

    /// Display name used in panic messages and tree dumps.
    pub fn name(&self) -> &str {
        match self {
            NodeKind::Document { .. } => "Document",
            NodeKind::Namespace { .. } => "Namespace",
            NodeKind::Class { .. } => "Class",
            NodeKind::Method { .. } => "Method",
            NodeKind::Field { .. } => "Field",
            NodeKind::Property { .. } => "Property",
            NodeKind::Using { .. } => "Using",
            NodeKind::Directive { .. } => "Directive",
            NodeKind::DirectiveToken { .. } => "DirectiveToken",
            NodeKind::HostCode => "HostCode",
            NodeKind::HostExpression => "HostExpression",
            NodeKind::MarkupElement { .. } => "MarkupElement",
            NodeKind::MarkupAttribute { .. } => "MarkupAttribute",
            NodeKind::MarkupAttributeValue { .. } => "MarkupAttributeValue",
            NodeKind::MarkupContent => "MarkupContent",
            NodeKind::TagHelper { .. } => "TagHelper",
            NodeKind::TagHelperProperty { .. } => "TagHelperProperty",
            NodeKind::TagHelperHtmlAttribute { .. } => "TagHelperHtmlAttribute",
            NodeKind::Component { .. } => "Component",
            NodeKind::ComponentAttribute { .. } => "ComponentAttribute",
            NodeKind::ComponentChildContent { .. } => "ComponentChildContent",
            NodeKind::ComponentTypeArgument { .. } => "ComponentTypeArgument",
            NodeKind::ComponentTypeInferenceMethod { .. } => "ComponentTypeInferenceMethod",
            NodeKind::ReferenceCapture { .. } => "ReferenceCapture",
            NodeKind::SetKey { .. } => "SetKey",
            NodeKind::Splat => "Splat",
            NodeKind::Token { .. } => "Token",
            NodeKind::Extension(ext) => ext.name(),
        }
    }
}

/// Child list of a node.
///
/// Leaf kinds share the [`Children::Leaf`] sentinel: iteration sees an
/// empty list and any attempt to mutate it panics.
#[derive(Debug)]
pub enum Children {
    /// Read-only empty sentinel for leaf kinds.
    Leaf,
    /// Ordered child ids for container kinds.
    Nodes(Vec<NodeId>),
}

impl Children {
    pub fn ids(&self) -> &[NodeId] {
        match self {
            Children::Leaf => &[],
            Children::Nodes(ids) => ids,
        }
    }

    pub fn len(&self) -> usize {
        self.ids().len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids().is_empty()
    }

    pub fn is_read_only(&self) -> bool {
        matches!(self, Children::Leaf)
    }
}

/// A single node in a [`Document`].
///
/// Annotation and diagnostic storage is allocated on first use; most nodes
/// carry neither.
#[derive(Debug)]
pub struct DocumentNode {
    kind: NodeKind,
    children: Children,
    source: Option<Span>,
    annotations: Option<BTreeMap<String, String>>,
    diagnostics: Option<Vec<Diagnostic>>,
}

impl DocumentNode {
    fn new(kind: NodeKind) -> Self {
        let children = if kind.is_leaf() {
            Children::Leaf
        } else {
            Children::Nodes(Vec::new())
        };
        Self {
            kind,
            children,
            source: None,
            annotations: None,
            diagnostics: None,
        }
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// Mutable payload access, for passes that rewrite content in place.
    pub fn kind_mut(&mut self) -> &mut NodeKind {
        &mut self.kind
    }

    pub fn children(&self) -> &Children {
        &self.children
    }

    pub fn children_ids(&self) -> &[NodeId] {
        self.children.ids()
    }

    /// Span of the source text this node was lowered from, when known.
    pub fn source(&self) -> Option<Span> {
        self.source
    }

    pub fn set_source(&mut self, span: Span) {
        self.source = Some(span);
    }

    pub fn annotation(&self, key: &str) -> Option<&str> {
        self.annotations.as_ref()?.get(key).map(String::as_str)
    }

    pub fn set_annotation(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.annotations
            .get_or_insert_with(BTreeMap::new)
            .insert(key.into(), value.into());
    }

    /// Annotations in key order.
    pub fn annotations(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.annotations
            .iter()
            .flatten()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        self.diagnostics.as_deref().unwrap_or(&[])
    }

    pub fn add_diagnostic(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.get_or_insert_with(Vec::new).push(diagnostic);
    }

    pub fn has_diagnostics(&self) -> bool {
        self.diagnostics.as_ref().is_some_and(|d| !d.is_empty())
    }
}

/// A mutable document tree.
///
/// The document owns every node it ever allocated, reachable or not, in a
/// single arena. The root is allocated up front and never changes
/// identity; edits only rearrange child lists.
#[derive(Debug)]
pub struct Document {
    nodes: Arena<DocumentNode>,
    root: NodeId,
}

impl Document {
    /// Creates a document whose root carries the given kind label.
    pub fn new(kind: impl Into<String>) -> Self {
        let mut nodes = Arena::default();
        let root = nodes.alloc(DocumentNode::new(NodeKind::Document { kind: kind.into() }));
        Self { nodes, root }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Allocates a node without attaching it anywhere. Link it with a
    /// [`NodeBuilder`] or a [`NodeReference`] edit.
    pub fn alloc(&mut self, kind: NodeKind) -> NodeId {
        self.nodes.alloc(DocumentNode::new(kind))
    }

    pub fn node(&self, id: NodeId) -> &DocumentNode {
        &self.nodes[id]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut DocumentNode {
        &mut self.nodes[id]
    }

    /// Mutable child vector of `id`.
    ///
    /// # Panics
    /// Panics when `id` is a leaf kind, whose children are read-only.
    pub(crate) fn children_mut(&mut self, id: NodeId) -> &mut Vec<NodeId> {
        let node = &mut self.nodes[id];
        match &mut node.children {
            Children::Nodes(ids) => ids,
            Children::Leaf => panic!("{} children are read-only", node.kind.name()),
        }
    }

    /// Gathers every diagnostic in the subtree under `root`: each node's
    /// own bag first, then its children in order.
    pub fn collate_diagnostics(&self, root: NodeId) -> Vec<Diagnostic> {
        fn collect(document: &Document, id: NodeId, out: &mut Vec<Diagnostic>) {
            let node = document.node(id);
            out.extend_from_slice(node.diagnostics());
            for &child in node.children_ids() {
                collect(document, child, out);
            }
        }

        let mut out = Vec::new();
        collect(self, root, &mut out);
        out
    }
}

impl std::ops::Index<NodeId> for Document {
    type Output = DocumentNode;

    fn index(&self, id: NodeId) -> &DocumentNode {
        &self.nodes[id]
    }
}

impl std::ops::IndexMut<NodeId> for Document {
    fn index_mut(&mut self, id: NodeId) -> &mut DocumentNode {
        &mut self.nodes[id]
    }
}

// ============================================================================
// Tests
// ============================================================================
