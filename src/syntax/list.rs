use crate::syntax::node::{NodeOrToken, SyntaxNode};
use crate::syntax::token::Token;
use crate::syntax::SyntaxKind;

/// View over a flat alternating `(node, separator, node, ..., node)` slice.
///
/// Parsers keep separated constructs (comma lists, colon-chained policies)
/// as one flat child array so separators keep their trivia and position.
/// This view exposes natural element indexing without allocating a second
/// "just the nodes" array: element `i` lives at flat slot `2*i`, separator
/// `i` at flat slot `2*i + 1`.
#[derive(Clone, Copy)]
pub struct SeparatedList<'a, K: SyntaxKind> {
    slots: &'a [NodeOrToken<K>],
}

impl<'a, K: SyntaxKind> SeparatedList<'a, K> {
    /// Wrap a flat alternating slice. The full alternation is validated in
    /// debug builds only.
    pub fn new(slots: &'a [NodeOrToken<K>]) -> Self {
        #[cfg(debug_assertions)]
        for (i, slot) in slots.iter().enumerate() {
            if i % 2 == 0 {
                debug_assert!(slot.is_node(), "even slot {i} must be a node");
            } else {
                debug_assert!(slot.is_token(), "odd slot {i} must be a separator token");
            }
        }
        Self { slots }
    }

    /// Number of element nodes: `(N + 1) / 2` for flat length `N`.
    pub fn len(&self) -> usize {
        (self.slots.len() + 1) / 2
    }

    /// Number of separator tokens: `N / 2` for flat length `N`.
    pub fn separator_len(&self) -> usize {
        self.slots.len() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&'a SyntaxNode<K>> {
        self.slots.get(index * 2).and_then(NodeOrToken::as_node)
    }

    /// Element node `index`.
    ///
    /// # Panics
    /// Panics when `index` is out of bounds or the slot alternation was
    /// violated.
    pub fn node(&self, index: usize) -> &'a SyntaxNode<K> {
        self.slots[index * 2]
            .as_node()
            .unwrap_or_else(|| panic!("slot {} is not a node", index * 2))
    }

    pub fn separator(&self, index: usize) -> &'a Token<K> {
        self.slots[index * 2 + 1]
            .as_token()
            .unwrap_or_else(|| panic!("slot {} is not a separator", index * 2 + 1))
    }

    /// Element nodes in order, separators skipped.
    pub fn iter(&self) -> impl Iterator<Item = &'a SyntaxNode<K>> {
        self.slots.iter().step_by(2).filter_map(NodeOrToken::as_node)
    }

    /// The underlying flat slice, separators included.
    pub fn slots(&self) -> &'a [NodeOrToken<K>] {
        self.slots
    }
}
