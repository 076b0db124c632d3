//! Shape constructors and typed views over route-pattern nodes.
//!
//! The tree itself is homogeneous; the constructors here are the only way
//! the parser assembles nodes, and they assert each child slot carries the
//! expected kind. The view structs go the other way: given an untyped node,
//! `cast` checks the kind tag and exposes shape-aware accessors.

use crate::syntax::{NodeOrToken, SyntaxNode, Token};

use super::RouteKind;

type Part = NodeOrToken<RouteKind>;

fn assert_part(part: &Part, allowed: &[RouteKind]) {
    debug_assert!(
        allowed.contains(&part.kind()),
        "unexpected child kind {:?}, allowed {:?}",
        part.kind(),
        allowed
    );
}

pub(crate) fn pattern(mut parts: Vec<Part>, end: Token<RouteKind>) -> SyntaxNode<RouteKind> {
    for part in &parts {
        assert_part(part, &[RouteKind::Segment, RouteKind::Separator]);
    }
    debug_assert_eq!(end.kind(), RouteKind::EndOfPatternToken);
    parts.push(end.into());
    SyntaxNode::new(RouteKind::Pattern, parts)
}

pub(crate) fn segment(parts: Vec<Part>) -> SyntaxNode<RouteKind> {
    for part in &parts {
        assert_part(part, &[RouteKind::Literal, RouteKind::Parameter]);
    }
    SyntaxNode::new(RouteKind::Segment, parts)
}

pub(crate) fn literal(token: Token<RouteKind>) -> SyntaxNode<RouteKind> {
    debug_assert_eq!(token.kind(), RouteKind::LiteralToken);
    SyntaxNode::new(RouteKind::Literal, vec![token.into()])
}

pub(crate) fn separator(token: Token<RouteKind>) -> SyntaxNode<RouteKind> {
    debug_assert_eq!(token.kind(), RouteKind::SlashToken);
    SyntaxNode::new(RouteKind::Separator, vec![token.into()])
}

pub(crate) fn parameter(
    open: Token<RouteKind>,
    inner: Vec<Part>,
    close: Token<RouteKind>,
) -> SyntaxNode<RouteKind> {
    debug_assert_eq!(open.kind(), RouteKind::OpenBraceToken);
    debug_assert_eq!(close.kind(), RouteKind::CloseBraceToken);
    for part in &inner {
        assert_part(
            part,
            &[
                RouteKind::CatchAll,
                RouteKind::ParameterName,
                RouteKind::Optional,
                RouteKind::DefaultValue,
                RouteKind::Policy,
            ],
        );
    }
    let mut parts = Vec::with_capacity(inner.len() + 2);
    parts.push(open.into());
    parts.extend(inner);
    parts.push(close.into());
    SyntaxNode::new(RouteKind::Parameter, parts)
}

pub(crate) fn parameter_name(token: Token<RouteKind>) -> SyntaxNode<RouteKind> {
    debug_assert_eq!(token.kind(), RouteKind::ParameterNameToken);
    SyntaxNode::new(RouteKind::ParameterName, vec![token.into()])
}

pub(crate) fn catch_all(asterisk: Token<RouteKind>) -> SyntaxNode<RouteKind> {
    debug_assert_eq!(asterisk.kind(), RouteKind::AsteriskToken);
    SyntaxNode::new(RouteKind::CatchAll, vec![asterisk.into()])
}

pub(crate) fn optional(question: Token<RouteKind>) -> SyntaxNode<RouteKind> {
    debug_assert_eq!(question.kind(), RouteKind::QuestionMarkToken);
    SyntaxNode::new(RouteKind::Optional, vec![question.into()])
}

pub(crate) fn default_value(
    equals: Token<RouteKind>,
    value: Token<RouteKind>,
) -> SyntaxNode<RouteKind> {
    debug_assert_eq!(equals.kind(), RouteKind::EqualsToken);
    debug_assert_eq!(value.kind(), RouteKind::DefaultValueToken);
    SyntaxNode::new(RouteKind::DefaultValue, vec![equals.into(), value.into()])
}

pub(crate) fn policy(colon: Token<RouteKind>, fragments: Vec<Part>) -> SyntaxNode<RouteKind> {
    debug_assert_eq!(colon.kind(), RouteKind::ColonToken);
    for part in &fragments {
        assert_part(
            part,
            &[RouteKind::PolicyFragment, RouteKind::PolicyFragmentEscaped],
        );
    }
    let mut parts = Vec::with_capacity(fragments.len() + 1);
    parts.push(colon.into());
    parts.extend(fragments);
    SyntaxNode::new(RouteKind::Policy, parts)
}

pub(crate) fn policy_fragment(token: Token<RouteKind>) -> SyntaxNode<RouteKind> {
    debug_assert_eq!(token.kind(), RouteKind::PolicyFragmentToken);
    SyntaxNode::new(RouteKind::PolicyFragment, vec![token.into()])
}

pub(crate) fn policy_fragment_escaped(
    open: Token<RouteKind>,
    content: Token<RouteKind>,
    close: Token<RouteKind>,
) -> SyntaxNode<RouteKind> {
    debug_assert_eq!(open.kind(), RouteKind::OpenParenToken);
    debug_assert_eq!(content.kind(), RouteKind::PolicyFragmentToken);
    debug_assert_eq!(close.kind(), RouteKind::CloseParenToken);
    SyntaxNode::new(
        RouteKind::PolicyFragmentEscaped,
        vec![open.into(), content.into(), close.into()],
    )
}

macro_rules! view {
    ($(#[$meta:meta])* $name:ident, $kind:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy)]
        pub struct $name<'a> {
            node: &'a SyntaxNode<RouteKind>,
        }

        impl<'a> $name<'a> {
            pub fn cast(node: &'a SyntaxNode<RouteKind>) -> Option<Self> {
                (node.kind() == $kind).then_some(Self { node })
            }

            pub fn node(&self) -> &'a SyntaxNode<RouteKind> {
                self.node
            }
        }
    };
}

view!(
    /// The root of a parsed pattern.
    Pattern,
    RouteKind::Pattern
);
view!(
    /// One path segment between separators.
    Segment,
    RouteKind::Segment
);
view!(
    /// A literal section of a segment.
    Literal,
    RouteKind::Literal
);
view!(
    /// A `{...}` parameter.
    Parameter,
    RouteKind::Parameter
);
view!(
    /// A `:policy` constraint inside a parameter.
    Policy,
    RouteKind::Policy
);

impl<'a> Pattern<'a> {
    pub fn segments(&self) -> impl Iterator<Item = Segment<'a>> + 'a {
        self.node
            .children()
            .filter_map(|part| part.as_node())
            .filter_map(Segment::cast)
    }
}

impl<'a> Segment<'a> {
    /// Child parts in order; each is a `Literal` or `Parameter` node.
    pub fn parts(&self) -> impl Iterator<Item = &'a SyntaxNode<RouteKind>> + 'a {
        self.node.children().filter_map(|part| part.as_node())
    }

    pub fn parameters(&self) -> impl Iterator<Item = Parameter<'a>> + 'a {
        self.parts().filter_map(Parameter::cast)
    }
}

impl<'a> Literal<'a> {
    pub fn token(&self) -> &'a Token<RouteKind> {
        match self.node.child(0) {
            Some(NodeOrToken::Token(token)) => token,
            _ => unreachable!("literal node always wraps a single token"),
        }
    }
}

impl<'a> Parameter<'a> {
    fn find(&self, kind: RouteKind) -> Option<&'a SyntaxNode<RouteKind>> {
        self.node
            .children()
            .filter_map(|part| part.as_node())
            .find(|node| node.kind() == kind)
    }

    pub fn name_token(&self) -> Option<&'a Token<RouteKind>> {
        let name = self.find(RouteKind::ParameterName)?;
        match name.child(0) {
            Some(NodeOrToken::Token(token)) => Some(token),
            _ => None,
        }
    }

    pub fn name(&self) -> String {
        self.name_token().map(|t| t.text()).unwrap_or_default()
    }

    pub fn catch_all_token(&self) -> Option<&'a Token<RouteKind>> {
        let catch_all = self.find(RouteKind::CatchAll)?;
        match catch_all.child(0) {
            Some(NodeOrToken::Token(token)) => Some(token),
            _ => None,
        }
    }

    pub fn is_catch_all(&self) -> bool {
        self.catch_all_token().is_some()
    }

    /// `**` catch-alls leave slashes in captured values unencoded.
    pub fn encode_slashes(&self) -> bool {
        self.catch_all_token().map_or(true, |t| t.text() != "**")
    }

    pub fn is_optional(&self) -> bool {
        self.find(RouteKind::Optional).is_some()
    }

    pub fn default_value(&self) -> Option<String> {
        let default = self.find(RouteKind::DefaultValue)?;
        match default.child(1) {
            Some(NodeOrToken::Token(token)) => Some(token.text()),
            _ => None,
        }
    }

    pub fn policies(&self) -> impl Iterator<Item = Policy<'a>> + 'a {
        self.node
            .children()
            .filter_map(|part| part.as_node())
            .filter_map(Policy::cast)
    }
}

impl<'a> Policy<'a> {
    /// Full policy text including the leading colon.
    pub fn text(&self) -> String {
        self.node.text()
    }
}
