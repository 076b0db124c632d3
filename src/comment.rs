//! Structured-comment detection.
//!
//! Tooling marks a string literal as containing an embedded language with a
//! comment of the form `// language=route,casesensitive` (also `lang=`,
//! also inside `/* ... */`). Recognition is deliberately split in two
//! layers:
//!
//! - [`match_comment`] finds the language identifier and captures raw option
//!   names. It is lenient: a malformed trailing option ends option
//!   accumulation but never invalidates the language match itself, so a typo
//!   in one option doesn't strip the embedded language from the literal.
//! - [`try_get_options`] parses captured names into a typed option set and
//!   is strict: a single unknown name fails the whole option parse.
//!
//! Callers compose the two according to how forgiving they want to be.

use logos::Logos;

#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(skip r"[ \t]+")]
enum CommentToken {
    #[regex("[a-zA-Z][a-zA-Z0-9_]*")]
    Ident,
    #[token("=")]
    Equals,
    #[token(",")]
    Comma,
}

/// A recognized `language=` comment: the identifier and the raw option
/// captures, in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentMatch<'a> {
    pub language: &'a str,
    pub options: Vec<&'a str>,
}

impl CommentMatch<'_> {
    /// Case-insensitive language comparison, the way consumers look it up.
    pub fn is_language(&self, name: &str) -> bool {
        self.language.eq_ignore_ascii_case(name)
    }
}

/// Recognize a `language=<ident>[,<ident>]*` marker in comment text.
///
/// `text` must start with a comment leader (`//` or `/*`). Option
/// accumulation stops at the first capture that is not a bare identifier;
/// the match itself still succeeds with whatever was accumulated.
pub fn match_comment(text: &str) -> Option<CommentMatch<'_>> {
    let body = strip_comment_leader(text)?;
    let mut lex = CommentToken::lexer(body);

    match lex.next() {
        Some(Ok(CommentToken::Ident)) if is_language_keyword(lex.slice()) => {}
        _ => return None,
    }
    match lex.next() {
        Some(Ok(CommentToken::Equals)) => {}
        _ => return None,
    }
    let language = match lex.next() {
        Some(Ok(CommentToken::Ident)) => lex.slice(),
        _ => return None,
    };

    let mut options = Vec::new();
    loop {
        match lex.next() {
            Some(Ok(CommentToken::Comma)) => match lex.next() {
                Some(Ok(CommentToken::Ident)) => options.push(lex.slice()),
                // Trailing comma or junk after it: stop accumulating, keep
                // the language match.
                _ => break,
            },
            // Anything but a comma ends the option list.
            _ => break,
        }
    }

    Some(CommentMatch { language, options })
}

fn strip_comment_leader(text: &str) -> Option<&str> {
    let text = text.trim_start();
    text.strip_prefix("//").or_else(|| text.strip_prefix("/*"))
}

fn is_language_keyword(word: &str) -> bool {
    word.eq_ignore_ascii_case("language") || word.eq_ignore_ascii_case("lang")
}

/// A typed option set parsed from comment captures.
pub trait CommentOptions: Default {
    /// Fold one recognized option name into the set. Returns `false` for
    /// names this set does not know.
    fn apply(&mut self, name: &str) -> bool;
}

/// Strictly parse captured option names into `O`. Any unrecognized capture
/// fails the whole parse; use the captures from [`match_comment`] directly
/// when best-effort behavior is wanted instead.
pub fn try_get_options<O: CommentOptions>(captures: &[&str]) -> Option<O> {
    let mut options = O::default();
    for capture in captures {
        if !options.apply(capture) {
            return None;
        }
    }
    Some(options)
}
