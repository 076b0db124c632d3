//! The route-pattern embedded language.
//!
//! URL route templates like `blog/{slug}/comments/{id:int?}` are the
//! concrete language this crate's generic tree machinery was built for.
//! A pattern is segments separated by `/`; a segment mixes literal text and
//! `{...}` parameters; a parameter has an optional `*`/`**` catch-all
//! marker, a name, `:policy` constraints (with `(...)` arguments), an
//! `=default` value, and a trailing `?` optional marker.
//!
//! Parsing never fails: malformed input produces a tree with missing tokens
//! and [`Diagnostic`](crate::diagnostics::Diagnostic)s, so tooling can keep
//! working with whatever structure was recoverable.

mod lexer;
mod nodes;
mod parser;

pub use nodes::{Literal, Parameter, Pattern, Policy, Segment};
pub use parser::parse_route_pattern;

use serde::{Deserialize, Serialize};

use crate::comment::CommentOptions;
use crate::diagnostics::Diagnostic;
use crate::syntax::{SyntaxKind, SyntaxNode, SyntaxTree};
use crate::text::VirtualCharSequence;

/// Kind tag for route-pattern tokens and nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteKind {
    None,

    // Tokens
    LiteralToken,
    SlashToken,
    OpenBraceToken,
    CloseBraceToken,
    OpenParenToken,
    CloseParenToken,
    AsteriskToken,
    QuestionMarkToken,
    ColonToken,
    EqualsToken,
    ParameterNameToken,
    DefaultValueToken,
    PolicyFragmentToken,
    EndOfPatternToken,

    // Nodes
    Pattern,
    Segment,
    Literal,
    Separator,
    Parameter,
    ParameterName,
    CatchAll,
    Optional,
    DefaultValue,
    Policy,
    PolicyFragment,
    PolicyFragmentEscaped,
}

impl SyntaxKind for RouteKind {
    const NONE: Self = RouteKind::None;
}

impl RouteKind {
    pub fn is_token(self) -> bool {
        matches!(
            self,
            RouteKind::LiteralToken
                | RouteKind::SlashToken
                | RouteKind::OpenBraceToken
                | RouteKind::CloseBraceToken
                | RouteKind::OpenParenToken
                | RouteKind::CloseParenToken
                | RouteKind::AsteriskToken
                | RouteKind::QuestionMarkToken
                | RouteKind::ColonToken
                | RouteKind::EqualsToken
                | RouteKind::ParameterNameToken
                | RouteKind::DefaultValueToken
                | RouteKind::PolicyFragmentToken
                | RouteKind::EndOfPatternToken
        )
    }
}

/// Options recognized in `// language=route,...` comments.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RouteOptions {
    pub case_sensitive: bool,
}

impl CommentOptions for RouteOptions {
    fn apply(&mut self, name: &str) -> bool {
        if name.eq_ignore_ascii_case("casesensitive") {
            self.case_sensitive = true;
            true
        } else {
            false
        }
    }
}

/// Summary of one `{...}` parameter, collected after parsing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteParameter {
    pub name: String,
    pub is_catch_all: bool,
    pub is_optional: bool,
    /// `false` only for `**` catch-alls, which keep slashes unencoded.
    pub encode_slashes: bool,
    pub default_value: Option<String>,
    /// Raw policy text including the leading colon, e.g. `:int`, `:min(1)`.
    pub policies: Vec<String>,
}

/// A parsed route pattern: the syntax tree plus per-parameter summaries.
#[derive(Debug, Clone)]
pub struct RoutePatternTree {
    tree: SyntaxTree<RouteKind>,
    parameters: Vec<RouteParameter>,
}

impl RoutePatternTree {
    pub(crate) fn new(tree: SyntaxTree<RouteKind>, parameters: Vec<RouteParameter>) -> Self {
        Self { tree, parameters }
    }

    pub fn tree(&self) -> &SyntaxTree<RouteKind> {
        &self.tree
    }

    pub fn root(&self) -> &SyntaxNode<RouteKind> {
        self.tree.root()
    }

    pub fn text(&self) -> &VirtualCharSequence {
        self.tree.text()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        self.tree.diagnostics()
    }

    /// Parameters in source order, duplicates included.
    pub fn parameters(&self) -> &[RouteParameter] {
        &self.parameters
    }
}
