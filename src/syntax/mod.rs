//! Generic immutable syntax trees for embedded mini-languages.
//!
//! An embedded language is a small grammar living inside a host document,
//! typically inside a string literal (a URL route pattern, for example).
//! This module provides the language-independent tree machinery: tokens over
//! [virtual characters](crate::text), interior nodes with lazy span math,
//! separated-list views, and the tree container. A language instantiates it
//! by supplying a [`SyntaxKind`] enum and constructors for its node shapes;
//! see [`crate::route`] for the route-pattern instance.
//!
//! Trees are immutable once built and owned strictly top-down. Error
//! recovery happens through [missing tokens](Token::missing) and
//! [diagnostics](crate::diagnostics::Diagnostic) as data, never through
//! failed construction.
//!
//! # Example
//!
//! ```
//! use trellis::span::Span;
//! use trellis::syntax::{SyntaxKind, SyntaxNode, Token};
//! use trellis::text::VirtualCharSequence;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! enum MiniKind {
//!     None,
//!     Word,
//!     Pair,
//! }
//!
//! impl SyntaxKind for MiniKind {
//!     const NONE: Self = MiniKind::None;
//! }
//!
//! let text = VirtualCharSequence::from_source(0, "hi");
//! let word = Token::new(MiniKind::Word, text.clone());
//! let pair = SyntaxNode::new(MiniKind::Pair, vec![word.into()]);
//! assert_eq!(pair.span(), Some(Span::new(0, 2)));
//! assert_eq!(pair.text(), "hi");
//! ```

mod list;
mod node;
mod token;
mod tree;

pub use list::SeparatedList;
pub use node::{DescendantTokens, NodeOrToken, SyntaxNode};
pub use token::{Token, Trivia};
pub use tree::SyntaxTree;

/// Kind tag of one embedded language.
///
/// Each language defines one flat enum covering its token, trivia, and node
/// kinds, with a reserved `NONE` member that no real token or node ever
/// carries (it marks absent slots and default values at language
/// boundaries).
pub trait SyntaxKind: Copy + Eq + std::fmt::Debug {
    const NONE: Self;

    fn is_none(self) -> bool {
        self == Self::NONE
    }
}
