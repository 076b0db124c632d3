//! Positioned source characters.
//!
//! An embedded language lives inside a larger host document, usually behind
//! escaping (`"{"` in the host may be `{` to the embedded parser). The
//! lexer therefore works over *virtual characters*: the decoded character
//! plus the absolute span it occupied in the host text. Every downstream
//! span in this crate is derived from these, which is what keeps diagnostics
//! pointing at real source offsets.

use std::fmt;
use std::ops::Range;
use std::sync::Arc;

use crate::span::Span;

/// One logical character and the absolute host-text span it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VirtualChar {
    pub ch: char,
    pub span: Span,
}

impl VirtualChar {
    pub fn new(ch: char, span: Span) -> Self {
        Self { ch, span }
    }

    pub fn is(&self, ch: char) -> bool {
        self.ch == ch
    }
}

impl fmt::Display for VirtualChar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.ch)
    }
}

/// An immutable, sliceable view over a shared run of virtual characters.
///
/// Slicing never copies: every view holds the same backing storage and a
/// window into it. Two sequences compare equal only when they are views of
/// the *same* backing storage with the same window, mirroring how string
/// views compare by identity-plus-range rather than by content.
#[derive(Clone)]
pub struct VirtualCharSequence {
    chars: Arc<[VirtualChar]>,
    range: Range<usize>,
}

impl VirtualCharSequence {
    /// Decode `source` into virtual characters, the first one starting at
    /// absolute offset `offset`. Spans follow UTF-8 widths, so offsets into
    /// the original text stay exact for non-ASCII input.
    pub fn from_source(offset: usize, source: &str) -> Self {
        let mut chars = Vec::with_capacity(source.len());
        let mut pos = offset;
        for ch in source.chars() {
            let end = pos + ch.len_utf8();
            chars.push(VirtualChar::new(ch, Span::new(pos, end)));
            pos = end;
        }
        let chars: Arc<[VirtualChar]> = chars.into();
        let range = 0..chars.len();
        Self { chars, range }
    }

    /// The explicit "no text" sequence, used as the body of missing tokens.
    pub fn empty() -> Self {
        Self { chars: Arc::new([]), range: 0..0 }
    }

    pub fn len(&self) -> usize {
        self.range.len()
    }

    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<VirtualChar> {
        if index < self.len() {
            Some(self.chars[self.range.start + index])
        } else {
            None
        }
    }

    pub fn first(&self) -> Option<VirtualChar> {
        self.get(0)
    }

    pub fn last(&self) -> Option<VirtualChar> {
        self.len().checked_sub(1).and_then(|i| self.get(i))
    }

    /// Position of `ch` within this view, matched by character and span.
    pub fn index_of(&self, ch: VirtualChar) -> Option<usize> {
        self.iter().position(|c| c == ch)
    }

    pub fn contains(&self, ch: VirtualChar) -> bool {
        self.index_of(ch).is_some()
    }

    /// Sub-view over `range` (relative to this view). Shares backing storage.
    ///
    /// # Panics
    /// Panics if the range is out of bounds.
    pub fn slice(&self, range: Range<usize>) -> Self {
        assert!(
            range.start <= range.end && range.end <= self.len(),
            "slice {}..{} out of bounds for sequence of length {}",
            range.start,
            range.end,
            self.len(),
        );
        Self {
            chars: Arc::clone(&self.chars),
            range: self.range.start + range.start..self.range.start + range.end,
        }
    }

    /// The first `n` characters as a sub-view.
    pub fn take(&self, n: usize) -> Self {
        self.slice(0..n)
    }

    /// Everything after the first `n` characters as a sub-view.
    pub fn skip(&self, n: usize) -> Self {
        self.slice(n..self.len())
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = VirtualChar> + '_ {
        self.chars[self.range.clone()].iter().copied()
    }

    /// Bounding span from the first to the last character. `None` when empty.
    pub fn span(&self) -> Option<Span> {
        match (self.first(), self.last()) {
            (Some(first), Some(last)) => Some(first.span.union(last.span)),
            _ => None,
        }
    }

    /// Concatenated character content, without position information.
    pub fn text(&self) -> String {
        self.iter().map(|c| c.ch).collect()
    }
}

impl std::ops::Index<usize> for VirtualCharSequence {
    type Output = VirtualChar;

    fn index(&self, index: usize) -> &VirtualChar {
        &self.chars[self.range.start..self.range.end][index]
    }
}

impl PartialEq for VirtualCharSequence {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.chars, &other.chars) && self.range == other.range
    }
}

impl Eq for VirtualCharSequence {}

impl fmt::Debug for VirtualCharSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.span() {
            Some(span) => write!(f, "VirtualCharSequence({:?} @ {span})", self.text()),
            None => write!(f, "VirtualCharSequence(empty)"),
        }
    }
}

impl fmt::Display for VirtualCharSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for ch in self.iter() {
            write!(f, "{}", ch.ch)?;
        }
        Ok(())
    }
}
