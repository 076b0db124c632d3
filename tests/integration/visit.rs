//! Visitor dispatch and traversal order over documents: slot-order walks,
//! ancestor tracking, pruning, and the composition helpers that wrap the
//! walker for one-off queries.

use trellis::ir::{
    contains_kind, count_nodes, find_descendants, walk_document, walk_from, Document,
    DocumentNode, NodeBuilder, NodeId, NodeKind, TokenKind, Visitor, Walker,
};

fn element(tag: &str) -> NodeKind {
    NodeKind::MarkupElement {
        tag_name: tag.to_string(),
    }
}

fn host_token(content: &str) -> NodeKind {
    NodeKind::Token {
        content: content.to_string(),
        kind: TokenKind::Host,
    }
}

fn markup_token(content: &str) -> NodeKind {
    NodeKind::Token {
        content: content.to_string(),
        kind: TokenKind::Markup,
    }
}

/// A page exercising most kinds the walker dispatches on: a directive,
/// the declaration shell, markup with attributes, a host expression, and
/// a component call.
fn sample_page() -> Document {
    let mut document = Document::new("component");
    let root = document.root();
    let mut builder = NodeBuilder::new(&mut document, root);

    builder.push(NodeKind::Directive {
        name: "page".to_string(),
    });
    builder.add(NodeKind::DirectiveToken {
        content: "/checkout".to_string(),
    });
    builder.pop();

    builder.push(NodeKind::Class {
        name: "Checkout".to_string(),
        base_type: None,
        interfaces: Vec::new(),
        modifiers: Vec::new(),
    });
    builder.push(NodeKind::Method {
        name: "BuildRenderTree".to_string(),
        return_type: "void".to_string(),
        modifiers: Vec::new(),
        parameters: Vec::new(),
    });

    builder.push(element("div"));
    builder.push(NodeKind::MarkupAttribute {
        name: "class".to_string(),
        prefix: " class=\"".to_string(),
        suffix: "\"".to_string(),
    });
    builder.push(NodeKind::MarkupAttributeValue {
        prefix: String::new(),
    });
    builder.add(markup_token("line-total"));
    builder.pop();
    builder.pop();
    builder.push(NodeKind::MarkupContent);
    builder.add(markup_token("Total: "));
    builder.pop();
    builder.push(NodeKind::HostExpression);
    builder.add(host_token("Model.Total"));
    builder.pop();
    builder.pop();

    builder.push(NodeKind::Component {
        tag_name: "PriceTag".to_string(),
    });
    builder.push(NodeKind::ComponentAttribute {
        attribute_name: "Value".to_string(),
    });
    builder.add(host_token("Model.Total * 1.2m"));
    builder.pop();
    builder.pop();

    builder.finish();
    document
}

// ===== dispatch order =====

#[derive(Default)]
struct OrderLog {
    pre: Vec<String>,
    post: Vec<String>,
}

impl Visitor for OrderLog {
    fn visit_document(&mut self, walker: &mut Walker<'_>, id: NodeId, _node: &DocumentNode) {
        self.pre.push("document".to_string());
        self.visit_default(walker, id);
        self.post.push("document".to_string());
    }

    fn visit_markup_element(&mut self, walker: &mut Walker<'_>, id: NodeId, node: &DocumentNode) {
        let NodeKind::MarkupElement { tag_name } = node.kind() else {
            unreachable!();
        };
        self.pre.push(tag_name.clone());
        self.visit_default(walker, id);
        self.post.push(tag_name.clone());
    }
}

#[test]
fn test_children_walk_in_slot_order() {
    let mut document = Document::new("");
    let root = document.root();
    let mut builder = NodeBuilder::new(&mut document, root);
    builder.push(element("a"));
    builder.add(element("b"));
    builder.add(element("c"));
    builder.pop();
    builder.add(element("d"));
    builder.finish();

    let mut log = OrderLog::default();
    walk_document(&mut log, &document);

    assert_eq!(log.pre, vec!["document", "a", "b", "c", "d"]);
    assert_eq!(log.post, vec!["b", "c", "a", "d", "document"]);
}

// ===== exhaustive visits =====

#[derive(Default)]
struct NodeCounter {
    count: usize,
}

impl Visitor for NodeCounter {
    fn visit_default(&mut self, walker: &mut Walker<'_>, id: NodeId) {
        self.count += 1;
        walker.descend(self, id);
    }
}

#[test]
fn test_default_walk_reaches_every_node() {
    let document = sample_page();
    let mut counter = NodeCounter::default();
    walk_document(&mut counter, &document);

    assert_eq!(counter.count, 16);
    assert_eq!(
        counter.count,
        count_nodes(&document, document.root(), |_| true),
        "visitor and helper disagree on node count"
    );
}

// ===== targeted collection =====

#[derive(Default)]
struct HostSnippets {
    contents: Vec<String>,
}

impl Visitor for HostSnippets {
    fn visit_token(&mut self, walker: &mut Walker<'_>, id: NodeId, node: &DocumentNode) {
        if let NodeKind::Token {
            content,
            kind: TokenKind::Host,
        } = node.kind()
        {
            self.contents.push(content.clone());
        }
        self.visit_default(walker, id);
    }
}

#[test]
fn test_collector_sees_host_tokens_in_source_order() {
    let document = sample_page();
    let mut snippets = HostSnippets::default();
    walk_document(&mut snippets, &document);

    assert_eq!(snippets.contents, vec!["Model.Total", "Model.Total * 1.2m"]);
}

// ===== pruning =====

/// Collects token text but never descends into markup elements.
#[derive(Default)]
struct MarkupPruner {
    skipped_elements: usize,
    contents: Vec<String>,
}

impl Visitor for MarkupPruner {
    fn visit_markup_element(
        &mut self,
        _walker: &mut Walker<'_>,
        _id: NodeId,
        _node: &DocumentNode,
    ) {
        self.skipped_elements += 1;
    }

    fn visit_token(&mut self, walker: &mut Walker<'_>, id: NodeId, node: &DocumentNode) {
        if let NodeKind::Token { content, .. } = node.kind() {
            self.contents.push(content.clone());
        }
        self.visit_default(walker, id);
    }
}

#[test]
fn test_not_descending_prunes_the_subtree() {
    let document = sample_page();
    let mut pruner = MarkupPruner::default();
    walk_document(&mut pruner, &document);

    assert_eq!(pruner.skipped_elements, 1);
    assert_eq!(
        pruner.contents,
        vec!["Model.Total * 1.2m"],
        "tokens inside the pruned element must not be visited"
    );
}

// ===== ancestor tracking =====

#[derive(Default)]
struct AncestrySnapshot {
    depth: usize,
    chain: Vec<String>,
    parent_is_attribute: bool,
}

impl Visitor for AncestrySnapshot {
    fn visit_markup_attribute_value(
        &mut self,
        walker: &mut Walker<'_>,
        id: NodeId,
        _node: &DocumentNode,
    ) {
        self.depth = walker.depth();
        self.chain = walker
            .ancestors()
            .map(|ancestor| walker.document().node(ancestor).kind().name().to_string())
            .collect();
        self.parent_is_attribute = walker.parent().is_some_and(|parent| {
            matches!(
                walker.document().node(parent).kind(),
                NodeKind::MarkupAttribute { .. }
            )
        });
        self.visit_default(walker, id);
    }
}

#[test]
fn test_walker_reports_ancestors_nearest_first() {
    let document = sample_page();
    let mut snapshot = AncestrySnapshot::default();
    walk_document(&mut snapshot, &document);

    assert_eq!(snapshot.depth, 4);
    assert_eq!(
        snapshot.chain,
        vec!["MarkupAttribute", "MarkupElement", "Method", "Class", "Document"]
    );
    assert!(snapshot.parent_is_attribute);
}

// ===== composition helpers =====

#[test]
fn test_helpers_scope_to_the_given_subtree() {
    let document = sample_page();
    let root = document.root();
    let div = find_descendants(&document, root, |node| {
        matches!(node.kind(), NodeKind::MarkupElement { .. })
    })[0];
    let component = find_descendants(&document, root, |node| {
        matches!(node.kind(), NodeKind::Component { .. })
    })[0];

    // find_descendants never reports its start node.
    let tokens_under_div = find_descendants(&document, div, |node| {
        matches!(node.kind(), NodeKind::Token { .. })
    });
    assert_eq!(tokens_under_div.len(), 3);

    // count_nodes includes the start node.
    assert_eq!(count_nodes(&document, div, |_| true), 8);

    assert!(contains_kind(&document, root, |kind| {
        matches!(kind, NodeKind::HostExpression)
    }));
    assert!(!contains_kind(&document, component, |kind| {
        matches!(kind, NodeKind::MarkupElement { .. })
    }));

    // A scoped walk stays inside the subtree.
    let mut snippets = HostSnippets::default();
    walk_from(&mut snippets, &document, component);
    assert_eq!(snippets.contents, vec!["Model.Total * 1.2m"]);
}

// ===== query then rewrite =====

#[test]
fn test_walk_results_drive_later_edits() {
    let mut document = sample_page();
    let root = document.root();

    let host_tokens = find_descendants(&document, root, |node| {
        matches!(
            node.kind(),
            NodeKind::Token {
                kind: TokenKind::Host,
                ..
            }
        )
    });
    for id in host_tokens {
        if let NodeKind::Token { content, .. } = document.node_mut(id).kind_mut() {
            *content = content.replace("Model.", "this.Model.");
        }
    }

    let mut snippets = HostSnippets::default();
    walk_document(&mut snippets, &document);
    assert_eq!(
        snippets.contents,
        vec!["this.Model.Total", "this.Model.Total * 1.2m"]
    );
}
