//! Indented tree dumps for documents.
//!
//! One node per line: kind name, kind-specific header fields, then
//! `@span` when the node carries a source location, `#key=value`
//! annotations in key order, and `!n` when `n` diagnostics are attached.
//! Two-space indent per level. The formatter is itself a [`Visitor`]
//! running pre-order, so a node prints before its children.

use super::{Document, NodeId, NodeKind, TokenKind, Visitor, Walker};

/// Renders the subtree under `start`.
pub fn tree_to_string(document: &Document, start: NodeId) -> String {
    let mut formatter = TreeFormatter { out: String::new() };
    super::walk_from(&mut formatter, document, start);
    formatter.out
}

impl Document {
    /// Tree dump of the whole document; the view used by tests and
    /// failure messages.
    pub fn debug_string(&self) -> String {
        tree_to_string(self, self.root())
    }
}

struct TreeFormatter {
    out: String,
}

impl Visitor for TreeFormatter {
    fn visit_default(&mut self, walker: &mut Walker<'_>, id: NodeId) {
        let node = walker.document().node(id);
        for _ in 0..walker.depth() {
            self.out.push_str("  ");
        }
        self.out.push_str(node.kind().name());
        push_header(&mut self.out, node.kind());
        if let Some(span) = node.source() {
            self.out.push_str(&format!(" @{span}"));
        }
        for (key, value) in node.annotations() {
            self.out.push_str(&format!(" #{key}={value:?}"));
        }
        if node.has_diagnostics() {
            self.out.push_str(&format!(" !{}", node.diagnostics().len()));
        }
        self.out.push('\n');
        walker.descend(self, id);
    }
}

fn push_header(out: &mut String, kind: &NodeKind) {
    match kind {
        NodeKind::Document { kind } => {
            if !kind.is_empty() {
                out.push_str(&format!(" kind={kind:?}"));
            }
        }
        NodeKind::Namespace { content } | NodeKind::Using { content } => {
            out.push_str(&format!(" content={content:?}"));
        }
        NodeKind::Class {
            name, base_type, ..
        } => {
            out.push_str(&format!(" name={name:?}"));
            if let Some(base) = base_type {
                out.push_str(&format!(" base={base:?}"));
            }
        }
        NodeKind::Method {
            name, return_type, ..
        } => {
            out.push_str(&format!(" name={name:?} return={return_type:?}"));
        }
        NodeKind::Field {
            name, field_type, ..
        } => {
            out.push_str(&format!(" name={name:?} type={field_type:?}"));
        }
        NodeKind::Property {
            name,
            property_type,
            ..
        } => {
            out.push_str(&format!(" name={name:?} type={property_type:?}"));
        }
        NodeKind::Directive { name } => {
            out.push_str(&format!(" name={name:?}"));
        }
        NodeKind::DirectiveToken { content } => {
            out.push_str(&format!(" content={content:?}"));
        }
        NodeKind::MarkupElement { tag_name }
        | NodeKind::TagHelper { tag_name }
        | NodeKind::Component { tag_name } => {
            out.push_str(&format!(" tag={tag_name:?}"));
        }
        NodeKind::MarkupAttribute { name, .. } => {
            out.push_str(&format!(" name={name:?}"));
        }
        NodeKind::MarkupAttributeValue { prefix } => {
            if !prefix.is_empty() {
                out.push_str(&format!(" prefix={prefix:?}"));
            }
        }
        NodeKind::TagHelperProperty { attribute_name }
        | NodeKind::TagHelperHtmlAttribute { attribute_name }
        | NodeKind::ComponentAttribute { attribute_name } => {
            out.push_str(&format!(" name={attribute_name:?}"));
        }
        NodeKind::ComponentChildContent {
            attribute_name,
            parameter_name,
        } => {
            out.push_str(&format!(
                " name={attribute_name:?} parameter={parameter_name:?}"
            ));
        }
        NodeKind::ComponentTypeArgument {
            type_parameter_name,
        } => {
            out.push_str(&format!(" name={type_parameter_name:?}"));
        }
        NodeKind::ComponentTypeInferenceMethod {
            full_type_name,
            method_name,
        } => {
            out.push_str(&format!(
                " type={full_type_name:?} method={method_name:?}"
            ));
        }
        NodeKind::ReferenceCapture { identifier } => {
            out.push_str(&format!(" id={identifier:?}"));
        }
        NodeKind::SetKey { key } => {
            out.push_str(&format!(" key={key:?}"));
        }
        NodeKind::Token { content, kind } => {
            let class = match kind {
                TokenKind::Host => "host",
                TokenKind::Markup => "markup",
            };
            out.push_str(&format!(" {class} {content:?}"));
        }
        NodeKind::HostCode
        | NodeKind::HostExpression
        | NodeKind::MarkupContent
        | NodeKind::Splat
        | NodeKind::Extension(_) => {}
    }
}

// ============================================================================
// Tests
// ============================================================================
