//! Modal scanner for route patterns.
//!
//! Route patterns have no single token grammar: which characters end a token
//! depends on where the parser is standing. Literal text stops at `/` and a
//! parameter brace, a parameter name stops at `:` and `=`, a parenthesized
//! policy argument swallows everything up to the closing paren. The lexer
//! therefore exposes one scan method per context instead of a token stream.
//!
//! Doubled braces are escapes everywhere outside parens: `{{` and `}}` are
//! consumed as two-character pairs and never terminate a scan. Only a lone
//! `}` closes a parameter.

use crate::span::Span;
use crate::syntax::Token;
use crate::text::VirtualCharSequence;

use super::RouteKind;

pub(crate) struct RouteLexer {
    text: VirtualCharSequence,
    pos: usize,
}

impl RouteLexer {
    pub(crate) fn new(text: VirtualCharSequence) -> Self {
        Self { text, pos: 0 }
    }

    pub(crate) fn is_at_end(&self) -> bool {
        self.pos == self.text.len()
    }

    pub(crate) fn peek(&self, lookahead: usize) -> Option<char> {
        self.text.get(self.pos + lookahead).map(|c| c.ch)
    }

    /// Span of the character at the current position.
    pub(crate) fn peek_span(&self) -> Option<Span> {
        self.text.get(self.pos).map(|c| c.span)
    }

    /// Zero-width span at the current position, for "expected more input"
    /// diagnostics.
    pub(crate) fn here(&self) -> Span {
        let offset = match self.text.get(self.pos) {
            Some(c) => c.span.start,
            None => self.text.last().map_or(0, |c| c.span.end),
        };
        Span::empty(offset)
    }

    fn bump(&mut self, n: usize) {
        self.pos += n;
    }

    /// Whether an escaped `{{`/`}}` pair starts at the current position.
    fn at_escaped_pair(&self) -> bool {
        matches!(
            (self.peek(0), self.peek(1)),
            (Some('{'), Some('{')) | (Some('}'), Some('}'))
        )
    }

    /// Whether a `)` occurs anywhere at or after the current position.
    /// Decides if `(` opens a parenthesized policy argument or is ordinary
    /// fragment text.
    pub(crate) fn close_paren_ahead(&self) -> bool {
        (self.pos..self.text.len()).any(|i| self.text[i].is(')'))
    }

    fn token_from(&self, start: usize, kind: RouteKind) -> Token<RouteKind> {
        Token::new(kind, self.text.slice(start..self.pos))
    }

    /// Consume `ch` if it is the current character.
    pub(crate) fn try_scan(&mut self, ch: char, kind: RouteKind) -> Option<Token<RouteKind>> {
        if self.peek(0) == Some(ch) {
            let start = self.pos;
            self.bump(1);
            Some(self.token_from(start, kind))
        } else {
            None
        }
    }

    /// Consume a catch-all marker: one `*`, or `**` as a single token.
    pub(crate) fn scan_asterisks(&mut self) -> Option<Token<RouteKind>> {
        if self.peek(0) != Some('*') {
            return None;
        }
        let start = self.pos;
        self.bump(1);
        if self.peek(0) == Some('*') {
            self.bump(1);
        }
        Some(self.token_from(start, RouteKind::AsteriskToken))
    }

    /// Consume literal text up to a `/` or a lone `{`. A lone `}` has no
    /// opening brace to close, so it is kept in the literal for the parser
    /// to report.
    pub(crate) fn scan_literal(&mut self) -> Option<Token<RouteKind>> {
        let start = self.pos;
        loop {
            if self.at_escaped_pair() {
                self.bump(2);
                continue;
            }
            match self.peek(0) {
                None | Some('/') | Some('{') => break,
                Some(_) => self.bump(1),
            }
        }
        (self.pos > start).then(|| self.token_from(start, RouteKind::LiteralToken))
    }

    /// Consume a parameter name. `:` and `=` terminate the name only once it
    /// is non-empty, so `{**:int}` names the parameter `:int` rather than
    /// starting an unnamed policy. A trailing `?` is split off as the
    /// optional marker; the name token is missing when nothing remains.
    pub(crate) fn scan_parameter_name(
        &mut self,
    ) -> (Token<RouteKind>, Option<Token<RouteKind>>) {
        let start = self.pos;
        loop {
            if self.at_escaped_pair() {
                self.bump(2);
                continue;
            }
            match self.peek(0) {
                None | Some('}') => break,
                Some(':') | Some('=') if self.pos > start => break,
                Some(_) => self.bump(1),
            }
        }
        self.split_trailing_question(start, RouteKind::ParameterNameToken)
    }

    /// Consume a default value: everything up to the closing brace, with a
    /// trailing `?` split off as the optional marker.
    pub(crate) fn scan_default_value(
        &mut self,
    ) -> (Token<RouteKind>, Option<Token<RouteKind>>) {
        let start = self.pos;
        loop {
            if self.at_escaped_pair() {
                self.bump(2);
                continue;
            }
            match self.peek(0) {
                None | Some('}') => break,
                Some(_) => self.bump(1),
            }
        }
        self.split_trailing_question(start, RouteKind::DefaultValueToken)
    }

    fn split_trailing_question(
        &mut self,
        start: usize,
        kind: RouteKind,
    ) -> (Token<RouteKind>, Option<Token<RouteKind>>) {
        let mut end = self.pos;
        let mut question = None;
        if end > start && self.text[end - 1].is('?') {
            end -= 1;
            question = Some(Token::new(
                RouteKind::QuestionMarkToken,
                self.text.slice(end..self.pos),
            ));
        }
        let token = if end > start {
            Token::new(kind, self.text.slice(start..end))
        } else {
            Token::missing(kind)
        };
        (token, question)
    }

    /// Consume one policy fragment: constraint text up to the next `:`, `=`,
    /// `?`, or closing brace. A `(` stops the fragment only when a `)` exists
    /// somewhere ahead; otherwise it is ordinary fragment text.
    pub(crate) fn scan_policy_fragment(&mut self) -> Option<Token<RouteKind>> {
        let start = self.pos;
        loop {
            if self.at_escaped_pair() {
                self.bump(2);
                continue;
            }
            match self.peek(0) {
                None | Some('}') | Some(':') | Some('=') | Some('?') => break,
                Some('(') if self.close_paren_ahead() => break,
                Some(_) => self.bump(1),
            }
        }
        (self.pos > start).then(|| self.token_from(start, RouteKind::PolicyFragmentToken))
    }

    /// Consume argument text between parens: everything up to the `)`,
    /// braces included.
    pub(crate) fn scan_policy_argument(&mut self) -> Token<RouteKind> {
        let start = self.pos;
        loop {
            if self.at_escaped_pair() {
                self.bump(2);
                continue;
            }
            match self.peek(0) {
                None | Some(')') => break,
                Some(_) => self.bump(1),
            }
        }
        if self.pos > start {
            self.token_from(start, RouteKind::PolicyFragmentToken)
        } else {
            Token::missing(RouteKind::PolicyFragmentToken)
        }
    }
}
