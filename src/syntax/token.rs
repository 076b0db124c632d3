use crate::diagnostics::Diagnostic;
use crate::span::Span;
use crate::syntax::SyntaxKind;
use crate::text::VirtualCharSequence;

/// Non-semantic text attached to a token (whitespace, comments).
///
/// Trivia always has backing text; a zero-width trivia would be meaningless.
#[derive(Debug, Clone)]
pub struct Trivia<K: SyntaxKind> {
    kind: K,
    chars: VirtualCharSequence,
    diagnostics: Vec<Diagnostic>,
}

impl<K: SyntaxKind> Trivia<K> {
    pub fn new(kind: K, chars: VirtualCharSequence) -> Self {
        debug_assert!(kind != K::NONE, "trivia kind must not be the none kind");
        debug_assert!(!chars.is_empty(), "trivia must have backing text");
        Self { kind, chars, diagnostics: Vec::new() }
    }

    pub fn with_diagnostic(mut self, diagnostic: Diagnostic) -> Self {
        self.diagnostics.push(diagnostic);
        self
    }

    pub fn kind(&self) -> K {
        self.kind
    }

    pub fn chars(&self) -> &VirtualCharSequence {
        &self.chars
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn span(&self) -> Span {
        self.chars.span().expect("trivia always has backing text")
    }
}

/// An immutable leaf of the syntax tree.
///
/// A token owns the virtual characters it consumed plus any surrounding
/// trivia. A *missing* token is one the parser synthesized during error
/// recovery to keep a node's shape intact: it has a real kind but no backing
/// text, and span math skips it entirely.
#[derive(Debug, Clone)]
pub struct Token<K: SyntaxKind> {
    kind: K,
    chars: VirtualCharSequence,
    leading: Vec<Trivia<K>>,
    trailing: Vec<Trivia<K>>,
    diagnostics: Vec<Diagnostic>,
}

impl<K: SyntaxKind> Token<K> {
    pub fn new(kind: K, chars: VirtualCharSequence) -> Self {
        debug_assert!(kind != K::NONE, "token kind must not be the none kind");
        Self {
            kind,
            chars,
            leading: Vec::new(),
            trailing: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Synthesized zero-width token standing in for text the parser expected
    /// but did not find.
    pub fn missing(kind: K) -> Self {
        Self::new(kind, VirtualCharSequence::empty())
    }

    pub fn with_leading(mut self, trivia: Trivia<K>) -> Self {
        debug_assert!(!self.is_missing(), "missing tokens carry no trivia");
        self.leading.push(trivia);
        self
    }

    pub fn with_trailing(mut self, trivia: Trivia<K>) -> Self {
        debug_assert!(!self.is_missing(), "missing tokens carry no trivia");
        self.trailing.push(trivia);
        self
    }

    pub fn with_diagnostic(mut self, diagnostic: Diagnostic) -> Self {
        self.diagnostics.push(diagnostic);
        self
    }

    pub fn kind(&self) -> K {
        self.kind
    }

    pub fn chars(&self) -> &VirtualCharSequence {
        &self.chars
    }

    pub fn is_missing(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn leading_trivia(&self) -> &[Trivia<K>] {
        &self.leading
    }

    pub fn trailing_trivia(&self) -> &[Trivia<K>] {
        &self.trailing
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Span of the consumed text, trivia excluded. `None` for missing tokens
    /// so recovery placeholders never distort bounding-span math.
    pub fn span(&self) -> Option<Span> {
        self.chars.span()
    }

    /// Span including leading and trailing trivia.
    pub fn full_span(&self) -> Option<Span> {
        let mut acc: Option<Span> = None;
        let spans = self
            .leading
            .iter()
            .map(Trivia::span)
            .chain(self.chars.span())
            .chain(self.trailing.iter().map(Trivia::span));
        for span in spans {
            acc = Some(match acc {
                Some(a) => a.union(span),
                None => span,
            });
        }
        acc
    }

    /// Token text without trivia.
    pub fn text(&self) -> String {
        self.chars.text()
    }

    /// Token text including trivia.
    pub fn full_text(&self) -> String {
        let mut out = String::new();
        self.write_to(&mut out, true);
        out
    }

    pub(crate) fn write_to(&self, out: &mut String, include_trivia: bool) {
        if include_trivia {
            for trivia in &self.leading {
                out.extend(trivia.chars.iter().map(|c| c.ch));
            }
        }
        out.extend(self.chars.iter().map(|c| c.ch));
        if include_trivia {
            for trivia in &self.trailing {
                out.extend(trivia.chars.iter().map(|c| c.ch));
            }
        }
    }
}
