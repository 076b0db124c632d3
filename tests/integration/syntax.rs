//! Tree assembly for a language defined entirely outside the crate.
//!
//! The kind enum below is local to this file; everything it gets from the
//! library comes through the `SyntaxKind` trait. If these tests compile and
//! pass, a downstream embedded language needs nothing but its own kinds and
//! constructors.

use trellis::diagnostics::Diagnostic;
use trellis::span::Span;
use trellis::syntax::{
    NodeOrToken, SeparatedList, SyntaxKind, SyntaxNode, SyntaxTree, Token, Trivia,
};
use trellis::text::VirtualCharSequence;

/// A `key=value, key=value` settings list, assembled by hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfKind {
    None,
    KeyToken,
    EqualsToken,
    ValueToken,
    CommaToken,
    Space,
    Entry,
    Entries,
}

impl SyntaxKind for ConfKind {
    const NONE: Self = ConfKind::None;
}

fn seq(offset: usize, source: &str) -> VirtualCharSequence {
    VirtualCharSequence::from_source(offset, source)
}

fn token(
    kind: ConfKind,
    text: &VirtualCharSequence,
    range: std::ops::Range<usize>,
) -> Token<ConfKind> {
    Token::new(kind, text.slice(range))
}

/// `key=value` over three tokens, no trivia.
fn entry(
    text: &VirtualCharSequence,
    key: std::ops::Range<usize>,
    equals: usize,
    value: std::ops::Range<usize>,
) -> SyntaxNode<ConfKind> {
    SyntaxNode::new(
        ConfKind::Entry,
        vec![
            token(ConfKind::KeyToken, text, key).into(),
            token(ConfKind::EqualsToken, text, equals..equals + 1).into(),
            token(ConfKind::ValueToken, text, value).into(),
        ],
    )
}

#[test]
fn test_external_kind_plugs_in() {
    assert!(ConfKind::None.is_none());
    assert!(!ConfKind::Entry.is_none());

    let text = seq(0, "a=1");
    let node = entry(&text, 0..1, 1, 2..3);
    assert_eq!(node.kind(), ConfKind::Entry);
    assert_eq!(node.child_count(), 3);
}

#[test]
fn test_trivia_splits_text_from_full_text() {
    let source = "retries = 3";
    let text = seq(0, source);
    let key = token(ConfKind::KeyToken, &text, 0..7)
        .with_trailing(Trivia::new(ConfKind::Space, text.slice(7..8)));
    let equals = token(ConfKind::EqualsToken, &text, 8..9)
        .with_trailing(Trivia::new(ConfKind::Space, text.slice(9..10)));
    let value = token(ConfKind::ValueToken, &text, 10..11);
    let node = SyntaxNode::new(
        ConfKind::Entry,
        vec![key.into(), equals.into(), value.into()],
    );

    assert_eq!(node.text(), "retries=3");
    assert_eq!(node.full_text(), source, "trivia restores the exact source");
    assert_eq!(node.span(), Some(Span::new(0, 11)));
    assert_eq!(node.full_span(), Some(Span::new(0, 11)));
}

#[test]
fn test_spans_stay_absolute_under_host_offset() {
    // The settings text starts at offset 17 of some larger document.
    let text = seq(17, "a=1");
    let node = entry(&text, 0..1, 1, 2..3);
    assert_eq!(node.span(), Some(Span::new(17, 20)));

    let value = node.child(2).and_then(NodeOrToken::as_token).unwrap();
    assert_eq!(value.span(), Some(Span::new(19, 20)));
}

#[test]
fn test_missing_value_keeps_entry_shape() {
    // "a=" with the value missing: recovery keeps the three-slot shape.
    let text = seq(0, "a=");
    let node = SyntaxNode::new(
        ConfKind::Entry,
        vec![
            token(ConfKind::KeyToken, &text, 0..1).into(),
            token(ConfKind::EqualsToken, &text, 1..2).into(),
            Token::missing(ConfKind::ValueToken).into(),
        ],
    );

    assert_eq!(node.child_count(), 3, "missing slot still occupies its place");
    assert_eq!(node.span(), Some(Span::new(0, 2)), "missing token adds no width");
    assert_eq!(node.text(), "a=");
    assert_eq!(
        node.dump(),
        "Entry\n  KeyToken \"a\"\n  EqualsToken \"=\"\n  ValueToken (missing)\n"
    );
}

#[test]
fn test_separated_list_views_flat_slots() {
    let text = seq(0, "a=1,b=2,c=3");
    let slots: Vec<NodeOrToken<ConfKind>> = vec![
        entry(&text, 0..1, 1, 2..3).into(),
        token(ConfKind::CommaToken, &text, 3..4).into(),
        entry(&text, 4..5, 5, 6..7).into(),
        token(ConfKind::CommaToken, &text, 7..8).into(),
        entry(&text, 8..9, 9, 10..11).into(),
    ];
    let list = SeparatedList::new(&slots);

    assert_eq!(list.len(), 3);
    assert_eq!(list.separator_len(), 2);
    assert_eq!(list.node(1).text(), "b=2");
    assert_eq!(list.separator(0).text(), ",");
    assert!(list.get(3).is_none());

    let entries: Vec<String> = list.iter().map(SyntaxNode::text).collect();
    assert_eq!(entries, vec!["a=1", "b=2", "c=3"]);

    // The same slots make a node; both views agree on the text.
    let node = SyntaxNode::new(ConfKind::Entries, slots.clone());
    assert_eq!(node.text(), text.text());
}

#[test]
fn test_descendant_tokens_cross_node_boundaries() {
    let text = seq(0, "a=1,b=2");
    let node = SyntaxNode::new(
        ConfKind::Entries,
        vec![
            entry(&text, 0..1, 1, 2..3).into(),
            token(ConfKind::CommaToken, &text, 3..4).into(),
            entry(&text, 4..5, 5, 6..7).into(),
        ],
    );

    let texts: Vec<String> = node.descendant_tokens().map(|t| t.text()).collect();
    assert_eq!(texts, vec!["a", "=", "1", ",", "b", "=", "2"]);

    // Source order means monotonically non-decreasing span starts.
    let starts: Vec<usize> = node
        .descendant_tokens()
        .filter_map(|t| t.span())
        .map(|s| s.start)
        .collect();
    let mut sorted = starts.clone();
    sorted.sort_unstable();
    assert_eq!(starts, sorted);
}

#[test]
fn test_diagnostics_ride_on_tokens_and_tree() {
    let text = seq(0, "a=!");
    let bad_span = Span::new(2, 3);
    let value = token(ConfKind::ValueToken, &text, 2..3)
        .with_diagnostic(Diagnostic::error("value must be alphanumeric", bad_span));
    let node = SyntaxNode::new(
        ConfKind::Entry,
        vec![
            token(ConfKind::KeyToken, &text, 0..1).into(),
            token(ConfKind::EqualsToken, &text, 1..2).into(),
            value.into(),
        ],
    );

    // Token-level: the diagnostic is reachable from the tree.
    let carried: Vec<&Diagnostic> = node
        .descendant_tokens()
        .flat_map(|t| t.diagnostics().iter())
        .collect();
    assert_eq!(carried.len(), 1);
    assert_eq!(carried[0].span, bad_span);

    // Tree-level: the parse aggregates its own copy in discovery order.
    let tree = SyntaxTree::new(
        text,
        node,
        vec![Diagnostic::error("value must be alphanumeric", bad_span)],
    );
    assert_eq!(tree.diagnostics().len(), 1);
    assert_eq!(tree.source_span(), Some(Span::new(0, 3)));
    assert_eq!(tree.root().full_text(), tree.text().text());
}
