//! Syntax-tree and document-IR building blocks for embedded languages.
//!
//! Two tree families share this crate. [`syntax`] is the immutable side:
//! tokens positioned by [`text`] virtual characters, generic over a
//! language's [`SyntaxKind`](syntax::SyntaxKind), built once by a parser
//! and only read afterwards. [`ir`] is the mutable side: an arena-backed
//! document tree that lowering passes edit in place through reference
//! handles and builders. Both families carry [`diagnostics`] as plain
//! data; malformed input degrades the tree, it never aborts construction.
//!
//! [`route`] instantiates the syntax side for URL route patterns and is
//! the grammar exercised throughout the test suite. [`comment`] detects
//! the `language=` marker comments that decide which string literals get
//! an embedded tree in the first place.

pub mod comment;
pub mod diagnostics;
pub mod ir;
pub mod route;
pub mod span;
pub mod syntax;
pub mod text;
