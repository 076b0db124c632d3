use crate::diagnostics::Diagnostic;
use crate::span::Span;
use crate::syntax::node::SyntaxNode;
use crate::syntax::SyntaxKind;
use crate::text::VirtualCharSequence;

/// A parsed embedded-language document: the source view it was parsed from,
/// the root node, and every diagnostic the parse produced. Immutable.
#[derive(Debug, Clone)]
pub struct SyntaxTree<K: SyntaxKind> {
    text: VirtualCharSequence,
    root: SyntaxNode<K>,
    diagnostics: Vec<Diagnostic>,
}

impl<K: SyntaxKind> SyntaxTree<K> {
    pub fn new(
        text: VirtualCharSequence,
        root: SyntaxNode<K>,
        diagnostics: Vec<Diagnostic>,
    ) -> Self {
        Self { text, root, diagnostics }
    }

    pub fn text(&self) -> &VirtualCharSequence {
        &self.text
    }

    pub fn root(&self) -> &SyntaxNode<K> {
        &self.root
    }

    /// Diagnostics aggregated across the whole parse, in discovery order.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Bounding span of the source this tree was parsed from.
    pub fn source_span(&self) -> Option<Span> {
        self.text.span()
    }
}
