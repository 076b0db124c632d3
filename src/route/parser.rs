//! Recursive-descent parser for route patterns.
//!
//! The parser never fails. Expected-but-absent tokens become missing tokens
//! so node shapes stay intact, everything scanned lands in some token so the
//! tree always round-trips to the input, and problems surface as
//! [`Diagnostic`]s on the tree.
//!
//! Structural checks that need the whole tree (catch-all placement, optional
//! ordering, duplicate names) run as a second pass over the finished tree,
//! alongside parameter summary collection.

use crate::diagnostics::Diagnostic;
use crate::span::Span;
use crate::syntax::{NodeOrToken, SyntaxNode, SyntaxTree, Token};
use crate::text::VirtualCharSequence;

use super::lexer::RouteLexer;
use super::nodes::{self, Literal, Parameter, Pattern, Segment};
use super::{RouteKind, RouteParameter, RoutePatternTree};

mod messages {
    pub(super) const INCOMPLETE_PARAMETER: &str = "There is an incomplete parameter in the route template. Check that each '{' character has a matching '}' character.";
    pub(super) const UNESCAPED_BRACE: &str =
        "In a route parameter, '{' and '}' must be escaped with '{{' and '}}'.";
    pub(super) const CATCH_ALL_NOT_LAST_SEGMENT: &str =
        "A catch-all parameter can only appear as the last segment of the route template.";
    pub(super) const CATCH_ALL_OPTIONAL: &str = "A catch-all parameter cannot be marked optional.";
    pub(super) const CATCH_ALL_IN_MULTI_PART_SEGMENT: &str = "A path segment that contains more than one section, such as a literal section or a parameter, cannot contain a catch-all parameter.";
    pub(super) const CONSECUTIVE_PARAMETERS: &str = "A path segment cannot contain two consecutive parameters. They must be separated by a '/' or by a literal string.";
    pub(super) const OPTIONAL_WITH_DEFAULT: &str =
        "An optional parameter cannot have default value.";
    pub(super) const TILDE_PREFIX: &str =
        "The route template cannot start with a '~' character unless followed by a '/'.";

    pub(super) fn invalid_literal(text: &str) -> String {
        format!(
            "The literal section '{text}' is invalid. Literal sections cannot contain the '?' character."
        )
    }

    pub(super) fn invalid_parameter_name(name: &str) -> String {
        format!(
            "The route parameter name '{name}' is invalid. Route parameter names must be non-empty and cannot contain these characters: '{{', '}}', '/'. The '?' character marks a parameter as optional, and can occur only at the end of the parameter. The '*' character marks a parameter as catch-all, and can occur only at the start of the parameter."
        )
    }

    pub(super) fn duplicate_parameter_name(name: &str) -> String {
        format!("The route parameter name '{name}' appears more than one time in the route template.")
    }

    pub(super) fn optional_preceded_by_invalid_segment(
        segment: &str,
        name: &str,
        previous: &str,
    ) -> String {
        format!(
            "In the segment '{segment}', the optional parameter '{name}' is preceded by an invalid segment '{previous}'. Only a period (.) can precede an optional parameter."
        )
    }
}

/// Collapse doubled braces to single ones, reporting whether any brace was
/// left unpaired. Unpaired braces stay in the output.
fn unescape_braces(text: &str) -> (String, bool) {
    let mut out = String::with_capacity(text.len());
    let mut unpaired = false;
    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == '{' || ch == '}' {
            if chars.peek() == Some(&ch) {
                chars.next();
            } else {
                unpaired = true;
            }
        }
        out.push(ch);
    }
    (out, unpaired)
}

/// Parse `text` as a route pattern.
pub fn parse_route_pattern(text: VirtualCharSequence) -> RoutePatternTree {
    let parser = Parser {
        lexer: RouteLexer::new(text.clone()),
        diagnostics: Vec::new(),
    };
    let (root, mut diagnostics) = parser.parse();
    check_tilde_prefix(&root, &mut diagnostics);
    let parameters = collect_parameters(&root, &mut diagnostics);
    RoutePatternTree::new(SyntaxTree::new(text, root, diagnostics), parameters)
}

struct Parser {
    lexer: RouteLexer,
    diagnostics: Vec<Diagnostic>,
}

impl Parser {
    fn parse(mut self) -> (SyntaxNode<RouteKind>, Vec<Diagnostic>) {
        let mut parts: Vec<NodeOrToken<RouteKind>> = Vec::new();
        while !self.lexer.is_at_end() {
            if let Some(slash) = self.lexer.try_scan('/', RouteKind::SlashToken) {
                parts.push(nodes::separator(slash).into());
            } else {
                let segment = self.parse_segment();
                parts.push(segment.into());
            }
        }
        let root = nodes::pattern(parts, Token::missing(RouteKind::EndOfPatternToken));
        (root, self.diagnostics)
    }

    fn parse_segment(&mut self) -> SyntaxNode<RouteKind> {
        let mut parts: Vec<NodeOrToken<RouteKind>> = Vec::new();
        loop {
            // A lone '{' opens a parameter; '{{' is an escaped literal brace.
            if self.lexer.peek(0) == Some('{') && self.lexer.peek(1) != Some('{') {
                if let Some(parameter) = self.parse_parameter() {
                    parts.push(parameter.into());
                    continue;
                }
            }
            let Some(token) = self.lexer.scan_literal() else {
                break;
            };
            let text = token.text();
            if let Some(span) = token.span() {
                let (_, unpaired_brace) = unescape_braces(&text);
                if unpaired_brace {
                    // A lone '}' in literal text means some '{' never opened.
                    self.report(messages::INCOMPLETE_PARAMETER, span);
                }
                if text.contains('?') {
                    self.report(messages::invalid_literal(&text), span);
                }
            }
            parts.push(nodes::literal(token).into());
        }
        nodes::segment(parts)
    }

    fn parse_parameter(&mut self) -> Option<SyntaxNode<RouteKind>> {
        let open = self.lexer.try_scan('{', RouteKind::OpenBraceToken)?;
        let mut inner: Vec<NodeOrToken<RouteKind>> = Vec::new();

        if let Some(asterisk) = self.lexer.scan_asterisks() {
            inner.push(nodes::catch_all(asterisk).into());
        }

        let (name, question) = self.lexer.scan_parameter_name();
        self.check_parameter_name(&name, question.as_ref());
        inner.push(nodes::parameter_name(name).into());
        if let Some(question) = question {
            inner.push(nodes::optional(question).into());
        }

        loop {
            if let Some(colon) = self.lexer.try_scan(':', RouteKind::ColonToken) {
                let policy = self.parse_policy(colon);
                inner.push(policy.into());
            } else if let Some(equals) = self.lexer.try_scan('=', RouteKind::EqualsToken) {
                let (value, question) = self.lexer.scan_default_value();
                inner.push(nodes::default_value(equals, value).into());
                if let Some(question) = question {
                    inner.push(nodes::optional(question).into());
                }
            } else if let Some(question) =
                self.lexer.try_scan('?', RouteKind::QuestionMarkToken)
            {
                inner.push(nodes::optional(question).into());
            } else if self.lexer.is_at_end() || self.lexer.peek(0) == Some('}') {
                break;
            } else {
                // Text after an optional marker. Keep it as name text so the
                // parameter still round-trips.
                let (extra, question) = self.lexer.scan_parameter_name();
                self.check_parameter_name(&extra, question.as_ref());
                inner.push(nodes::parameter_name(extra).into());
                if let Some(question) = question {
                    inner.push(nodes::optional(question).into());
                }
            }
        }

        let close = match self.lexer.try_scan('}', RouteKind::CloseBraceToken) {
            Some(close) => close,
            None => {
                self.report(messages::INCOMPLETE_PARAMETER, self.lexer.here());
                Token::missing(RouteKind::CloseBraceToken)
            }
        };
        Some(nodes::parameter(open, inner, close))
    }

    fn check_parameter_name(
        &mut self,
        name: &Token<RouteKind>,
        question: Option<&Token<RouteKind>>,
    ) {
        if name.is_missing() {
            let span = question
                .and_then(|q| q.span())
                .or_else(|| self.lexer.peek_span())
                .unwrap_or_else(|| self.lexer.here());
            self.report(messages::invalid_parameter_name(""), span);
            return;
        }
        let Some(span) = name.span() else { return };
        let (unescaped, unpaired_brace) = unescape_braces(&name.text());
        if unpaired_brace {
            self.report(messages::UNESCAPED_BRACE, span);
        } else if unescaped.contains(|c| matches!(c, '{' | '}' | '/' | '?')) {
            self.report(messages::invalid_parameter_name(&unescaped), span);
        }
    }

    fn parse_policy(&mut self, colon: Token<RouteKind>) -> SyntaxNode<RouteKind> {
        let mut fragments: Vec<NodeOrToken<RouteKind>> = Vec::new();
        loop {
            if self.lexer.peek(0) == Some('(') && self.lexer.close_paren_ahead() {
                if let Some(escaped) = self.parse_escaped_argument() {
                    fragments.push(escaped.into());
                    continue;
                }
            }
            match self.lexer.scan_policy_fragment() {
                Some(token) => fragments.push(nodes::policy_fragment(token).into()),
                None => break,
            }
        }
        nodes::policy(colon, fragments)
    }

    fn parse_escaped_argument(&mut self) -> Option<SyntaxNode<RouteKind>> {
        let open = self.lexer.try_scan('(', RouteKind::OpenParenToken)?;
        let content = self.lexer.scan_policy_argument();
        if let Some(span) = content.span() {
            let (_, unpaired_brace) = unescape_braces(&content.text());
            if unpaired_brace {
                self.report(messages::UNESCAPED_BRACE, span);
            }
        }
        let close = self
            .lexer
            .try_scan(')', RouteKind::CloseParenToken)
            .unwrap_or_else(|| Token::missing(RouteKind::CloseParenToken));
        Some(nodes::policy_fragment_escaped(open, content, close))
    }

    fn report(&mut self, message: impl Into<String>, span: Span) {
        self.diagnostics.push(Diagnostic::error(message, span));
    }
}

/// A pattern may only start with `~` when the next character is `/`.
fn check_tilde_prefix(root: &SyntaxNode<RouteKind>, diagnostics: &mut Vec<Diagnostic>) {
    let Some(pattern) = Pattern::cast(root) else { return };
    let text = pattern.node().text();
    let mut chars = text.chars();
    if chars.next() != Some('~') || chars.next() == Some('/') {
        return;
    }
    let first_literal = pattern
        .segments()
        .next()
        .and_then(|segment| segment.parts().next())
        .and_then(Literal::cast);
    if let Some(span) = first_literal.and_then(|literal| literal.token().span()) {
        diagnostics.push(Diagnostic::error(messages::TILDE_PREFIX, span));
    }
}

/// Walk the finished tree: run the segment-level structural checks and build
/// the parameter summaries. Parameters with empty names are not collected.
fn collect_parameters(
    root: &SyntaxNode<RouteKind>,
    diagnostics: &mut Vec<Diagnostic>,
) -> Vec<RouteParameter> {
    let Some(pattern) = Pattern::cast(root) else {
        return Vec::new();
    };
    let segments: Vec<Segment<'_>> = pattern.segments().collect();
    let mut parameters: Vec<RouteParameter> = Vec::new();
    let mut seen: Vec<String> = Vec::new();

    for (segment_index, segment) in segments.iter().enumerate() {
        let parts: Vec<&SyntaxNode<RouteKind>> = segment.parts().collect();
        for (part_index, &part) in parts.iter().enumerate() {
            let Some(parameter) = Parameter::cast(part) else {
                continue;
            };
            let Some(span) = parameter.node().span() else {
                continue;
            };
            let previous = part_index.checked_sub(1).map(|i| parts[i]);

            if parameter.is_catch_all() {
                if parts.len() > 1 {
                    diagnostics.push(Diagnostic::error(
                        messages::CATCH_ALL_IN_MULTI_PART_SEGMENT,
                        span,
                    ));
                }
                if segment_index + 1 != segments.len() {
                    diagnostics.push(Diagnostic::error(
                        messages::CATCH_ALL_NOT_LAST_SEGMENT,
                        span,
                    ));
                }
                if parameter.is_optional() {
                    diagnostics.push(Diagnostic::error(messages::CATCH_ALL_OPTIONAL, span));
                }
            }

            if parameter.is_optional() {
                if parameter.default_value().is_some() {
                    diagnostics.push(Diagnostic::error(messages::OPTIONAL_WITH_DEFAULT, span));
                }
                // Only a period may sit between an optional parameter and
                // whatever precedes it in the segment.
                if let Some(previous) = previous {
                    let previous_text = previous.text();
                    if previous.kind() != RouteKind::Literal || previous_text != "." {
                        let (name, _) = unescape_braces(&parameter.name());
                        diagnostics.push(Diagnostic::error(
                            messages::optional_preceded_by_invalid_segment(
                                &segment.node().text(),
                                &name,
                                &previous_text,
                            ),
                            span,
                        ));
                    }
                }
            } else if previous.is_some_and(|p| p.kind() == RouteKind::Parameter) {
                diagnostics.push(Diagnostic::error(messages::CONSECUTIVE_PARAMETERS, span));
            }

            let name = parameter.name();
            if name.is_empty() {
                continue;
            }
            let lowered = name.to_lowercase();
            if seen.contains(&lowered) {
                let (unescaped, _) = unescape_braces(&name);
                diagnostics.push(Diagnostic::error(
                    messages::duplicate_parameter_name(&unescaped),
                    span,
                ));
                continue;
            }
            seen.push(lowered);
            parameters.push(RouteParameter {
                name,
                is_catch_all: parameter.is_catch_all(),
                is_optional: parameter.is_optional(),
                encode_slashes: parameter.encode_slashes(),
                default_value: parameter.default_value(),
                policies: parameter.policies().map(|p| p.text()).collect(),
            });
        }
    }
    parameters
}
