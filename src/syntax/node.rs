use std::fmt;
use std::sync::OnceLock;

use crate::span::Span;
use crate::syntax::token::Token;
use crate::syntax::SyntaxKind;
use crate::text::VirtualChar;

/// The uniform child-slot type: every slot of a node is either a subtree or
/// a token. A closed union, matched exhaustively everywhere.
#[derive(Debug, Clone)]
pub enum NodeOrToken<K: SyntaxKind> {
    Node(SyntaxNode<K>),
    Token(Token<K>),
}

impl<K: SyntaxKind> NodeOrToken<K> {
    pub fn kind(&self) -> K {
        match self {
            NodeOrToken::Node(node) => node.kind(),
            NodeOrToken::Token(token) => token.kind(),
        }
    }

    pub fn is_node(&self) -> bool {
        matches!(self, NodeOrToken::Node(_))
    }

    pub fn is_token(&self) -> bool {
        matches!(self, NodeOrToken::Token(_))
    }

    pub fn as_node(&self) -> Option<&SyntaxNode<K>> {
        match self {
            NodeOrToken::Node(node) => Some(node),
            NodeOrToken::Token(_) => None,
        }
    }

    pub fn as_token(&self) -> Option<&Token<K>> {
        match self {
            NodeOrToken::Token(token) => Some(token),
            NodeOrToken::Node(_) => None,
        }
    }

    pub fn span(&self) -> Option<Span> {
        match self {
            NodeOrToken::Node(node) => node.span(),
            NodeOrToken::Token(token) => token.span(),
        }
    }

    pub fn full_span(&self) -> Option<Span> {
        match self {
            NodeOrToken::Node(node) => node.full_span(),
            NodeOrToken::Token(token) => token.full_span(),
        }
    }

    pub fn contains(&self, ch: VirtualChar) -> bool {
        match self {
            NodeOrToken::Node(node) => node.contains(ch),
            NodeOrToken::Token(token) => token.chars().contains(ch),
        }
    }

    pub(crate) fn write_to(&self, out: &mut String, include_trivia: bool) {
        match self {
            NodeOrToken::Node(node) => node.write_to(out, include_trivia),
            NodeOrToken::Token(token) => token.write_to(out, include_trivia),
        }
    }
}

impl<K: SyntaxKind> From<SyntaxNode<K>> for NodeOrToken<K> {
    fn from(node: SyntaxNode<K>) -> Self {
        NodeOrToken::Node(node)
    }
}

impl<K: SyntaxKind> From<Token<K>> for NodeOrToken<K> {
    fn from(token: Token<K>) -> Self {
        NodeOrToken::Token(token)
    }
}

/// An interior node: a kind tag over an ordered run of child slots.
///
/// Nodes are homogeneous; each language fixes the arity and slot shape of
/// its concrete kinds in that language's constructors (with debug
/// assertions), not in the type system. The tree is immutable once built and
/// owned strictly top-down, which is what makes the full-span memo below
/// safe: it is computed at most once from children that can never change.
#[derive(Clone)]
pub struct SyntaxNode<K: SyntaxKind> {
    kind: K,
    children: Vec<NodeOrToken<K>>,
    full_span: OnceLock<Option<Span>>,
}

impl<K: SyntaxKind> SyntaxNode<K> {
    pub fn new(kind: K, children: Vec<NodeOrToken<K>>) -> Self {
        debug_assert!(kind != K::NONE, "node kind must not be the none kind");
        Self { kind, children, full_span: OnceLock::new() }
    }

    pub fn kind(&self) -> K {
        self.kind
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    pub fn child(&self, index: usize) -> Option<&NodeOrToken<K>> {
        self.children.get(index)
    }

    /// Children in slot order.
    pub fn children(&self) -> impl ExactSizeIterator<Item = &NodeOrToken<K>> {
        self.children.iter()
    }

    pub(crate) fn child_slots(&self) -> &[NodeOrToken<K>] {
        &self.children
    }

    /// Tight bounding span over the source text this subtree consumed.
    ///
    /// Missing tokens contribute nothing: they exist for structural
    /// completeness, not for text the parser actually saw. `None` when the
    /// whole subtree is missing or empty.
    pub fn span(&self) -> Option<Span> {
        let mut acc: Option<Span> = None;
        for child in &self.children {
            if let Some(span) = child.span() {
                acc = Some(match acc {
                    Some(a) => a.union(span),
                    None => span,
                });
            }
        }
        acc
    }

    /// Bounding span including trivia, from the first and last present
    /// descendants. Memoized; the tree is immutable after construction, so
    /// the memo is never invalidated.
    pub fn full_span(&self) -> Option<Span> {
        *self.full_span.get_or_init(|| {
            let first = self.children.iter().find_map(NodeOrToken::full_span);
            let last = self.children.iter().rev().find_map(NodeOrToken::full_span);
            match (first, last) {
                (Some(first), Some(last)) => Some(first.union(last)),
                _ => None,
            }
        })
    }

    /// Whether any descendant token consumed `ch`. Linear in subtree size,
    /// which is fine for embedded-language trees (one string literal's worth
    /// of text).
    pub fn contains(&self, ch: VirtualChar) -> bool {
        self.children.iter().any(|child| child.contains(ch))
    }

    /// Concatenated token text, trivia excluded.
    pub fn text(&self) -> String {
        let mut out = String::new();
        self.write_to(&mut out, false);
        out
    }

    /// Concatenated token text, trivia included. For a tree with no missing
    /// tokens this reproduces the parsed source slice exactly.
    pub fn full_text(&self) -> String {
        let mut out = String::new();
        self.write_to(&mut out, true);
        out
    }

    pub(crate) fn write_to(&self, out: &mut String, include_trivia: bool) {
        for child in &self.children {
            child.write_to(out, include_trivia);
        }
    }

    /// All descendant tokens in source order.
    pub fn descendant_tokens(&self) -> DescendantTokens<'_, K> {
        DescendantTokens { stack: self.children.iter().rev().collect() }
    }

    /// Indented kind-per-line outline of the subtree, for tests and
    /// debugging. Token lines carry their text; missing tokens are marked.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        self.dump_into(&mut out, 0);
        out
    }

    fn dump_into(&self, out: &mut String, depth: usize) {
        for _ in 0..depth {
            out.push_str("  ");
        }
        out.push_str(&format!("{:?}\n", self.kind));
        for child in &self.children {
            match child {
                NodeOrToken::Node(node) => node.dump_into(out, depth + 1),
                NodeOrToken::Token(token) => {
                    for _ in 0..=depth {
                        out.push_str("  ");
                    }
                    if token.is_missing() {
                        out.push_str(&format!("{:?} (missing)\n", token.kind()));
                    } else {
                        out.push_str(&format!("{:?} {:?}\n", token.kind(), token.text()));
                    }
                }
            }
        }
    }
}

impl<K: SyntaxKind> fmt::Debug for SyntaxNode<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyntaxNode")
            .field("kind", &self.kind)
            .field("children", &self.children)
            .finish()
    }
}

/// Depth-first token iterator driven by an explicit work stack.
pub struct DescendantTokens<'a, K: SyntaxKind> {
    stack: Vec<&'a NodeOrToken<K>>,
}

impl<'a, K: SyntaxKind> Iterator for DescendantTokens<'a, K> {
    type Item = &'a Token<K>;

    fn next(&mut self) -> Option<&'a Token<K>> {
        while let Some(child) = self.stack.pop() {
            match child {
                NodeOrToken::Token(token) => return Some(token),
                NodeOrToken::Node(node) => {
                    self.stack.extend(node.children.iter().rev());
                }
            }
        }
        None
    }
}
