//! Read head over the source text.
//!
//! A [`Cursor`] shares the text (and the reserved-word set) with every copy made from it;
//! only the offset is per-copy. Cloning is the checkpoint, [`Cursor::fill_from`] is the
//! commit. A speculative attempt therefore never disturbs the caller until it succeeds.
//!
//! Each copy also carries how many rules are active on it. Past [`MAX_DEPTH`] no further
//! rule may start, so deeply nested input degrades to the raw fallbacks instead of
//! exhausting the stack.

use std::sync::Arc;

use crate::syntax::matcher::{Fit, NotFit};
use crate::syntax::reserved::ReservedWords;

/// Rules that may be active at once on one cursor.
pub const MAX_DEPTH: usize = 160;

#[derive(Debug, Clone)]
pub struct Cursor {
    text: Arc<str>,
    reserved: Arc<ReservedWords>,
    offset: usize,
    depth: usize,
}

impl Cursor {
    /// Cursor at the start of `text`, with the built-in reserved words.
    pub fn new(text: impl Into<Arc<str>>) -> Self {
        Self::with_reserved(text, Arc::new(ReservedWords::default()))
    }

    pub fn with_reserved(text: impl Into<Arc<str>>, reserved: Arc<ReservedWords>) -> Self {
        Self {
            text: text.into(),
            reserved,
            offset: 0,
            depth: 0,
        }
    }

    /// Adopts the offset of `other`. Both cursors must come from the same root.
    pub fn fill_from(&mut self, other: &Cursor) {
        debug_assert!(Arc::ptr_eq(&self.text, &other.text));
        self.offset = other.offset;
    }

    /// The unconsumed suffix. Reading at or past the end is a mismatch, not a failure.
    pub fn remaining(&self) -> Fit<&str> {
        if self.at_end() {
            return Err(NotFit);
        }
        Ok(&self.text[self.offset..])
    }

    pub fn at_end(&self) -> bool {
        self.offset >= self.text.len()
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Advances by `bytes`. Callers only shift by lengths taken from [`Cursor::remaining`].
    pub fn shift(&mut self, bytes: usize) {
        self.offset += bytes;
    }

    /// Consumes one character unconditionally.
    pub fn take_char(&mut self) -> Option<char> {
        let ch = self.remaining().ok()?.chars().next()?;
        self.offset += ch.len_utf8();
        Some(ch)
    }

    /// Enters one more rule. Fails once [`MAX_DEPTH`] rules are active.
    pub fn descend(&mut self) -> Fit<()> {
        if self.depth >= MAX_DEPTH {
            return Err(NotFit);
        }
        self.depth += 1;
        Ok(())
    }

    pub fn ascend(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn is_reserved(&self, word: &str) -> bool {
        self.reserved.contains(word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn copies_do_not_share_offsets() {
        let mut root = Cursor::new("abc");
        let mut copy = root.clone();
        copy.shift(2);
        assert_eq!(root.offset(), 0);
        assert_eq!(copy.remaining(), Ok("c"));

        root.fill_from(&copy);
        assert_eq!(root.offset(), 2);
    }

    #[test]
    fn remaining_past_end_is_a_mismatch() {
        let mut cur = Cursor::new("x");
        cur.shift(1);
        assert!(cur.at_end());
        assert_eq!(cur.remaining(), Err(NotFit));
        assert_eq!(cur.take_char(), None);
    }

    #[test]
    fn take_char_respects_utf8_width() {
        let mut cur = Cursor::new("éa");
        assert_eq!(cur.take_char(), Some('é'));
        assert_eq!(cur.offset(), 2);
        assert_eq!(cur.remaining(), Ok("a"));
    }

    #[test]
    fn descend_stops_at_max_depth() {
        let mut cur = Cursor::new("x");
        for _ in 0..MAX_DEPTH {
            assert!(cur.descend().is_ok());
        }
        assert_eq!(cur.descend(), Err(NotFit));
        assert_eq!(cur.depth(), MAX_DEPTH);

        let copy = cur.clone();
        assert_eq!(copy.depth(), MAX_DEPTH);
        cur.ascend();
        assert!(cur.descend().is_ok());
    }

    #[test]
    fn reserved_words_travel_with_copies() {
        let reserved = Arc::new(ReservedWords::with_extra(["foo"]));
        let cur = Cursor::with_reserved("foo", reserved);
        let copy = cur.clone();
        assert!(copy.is_reserved("foo"));
        assert!(copy.is_reserved("if"));
        assert!(!copy.is_reserved("int"));
    }
}
