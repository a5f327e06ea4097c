//! Atomic lexical units and the include directive.

use crate::syntax::cursor::Cursor;
use crate::syntax::matcher::{
    attempt, fit, fit_pattern_tight, keyword_tight, skip_spaces, symbol, Fit, Node, NotFit,
    ANY_CHAR, SPACES, WORD,
};
use crate::syntax::refactor::{Emitter, Refactor};

/// A run of whitespace, kept verbatim at the top level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spaces {
    pub value: String,
}

impl Node for Spaces {
    fn fit(cur: &mut Cursor) -> Fit<Self> {
        let value = fit_pattern_tight(cur, &SPACES)?;
        Ok(Self { value })
    }
}

impl Refactor for Spaces {
    fn refactor(&self, _out: &mut Emitter<'_>, _indent: usize) -> String {
        self.value.clone()
    }
}

/// Any single character. Fits whenever input remains.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    pub value: char,
}

impl Node for Symbol {
    fn fit(cur: &mut Cursor) -> Fit<Self> {
        let text = fit_pattern_tight(cur, &ANY_CHAR)?;
        let value = text.chars().next().ok_or(NotFit)?;
        Ok(Self { value })
    }
}

impl Refactor for Symbol {
    fn refactor(&self, _out: &mut Emitter<'_>, _indent: usize) -> String {
        self.value.to_string()
    }
}

/// An identifier or keyword: `[A-Za-z_]\w*`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Word {
    pub value: String,
}

impl Node for Word {
    fn fit(cur: &mut Cursor) -> Fit<Self> {
        let value = fit_pattern_tight(cur, &WORD)?;
        Ok(Self { value })
    }
}

impl Refactor for Word {
    fn refactor(&self, _out: &mut Emitter<'_>, _indent: usize) -> String {
        self.value.clone()
    }
}

/// `#include <name>` or `#include "name"`.
///
/// The closing delimiter is taken as whatever single character follows the name; it is
/// not checked against the opening one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Include {
    pub opening: Symbol,
    pub name: Word,
    pub closing: Symbol,
}

impl Node for Include {
    fn fit(cur: &mut Cursor) -> Fit<Self> {
        symbol(cur, '#')?;
        keyword_tight(cur, "include")?;
        skip_spaces(cur);
        let opening = match attempt(cur, |c| symbol(c, '<')) {
            Ok(angle) => angle,
            Err(NotFit) => symbol(cur, '"')?,
        };
        skip_spaces(cur);
        let name = fit::<Word>(cur)?;
        let closing = fit::<Symbol>(cur)?;
        Ok(Self {
            opening,
            name,
            closing,
        })
    }
}

impl Refactor for Include {
    fn refactor(&self, _out: &mut Emitter<'_>, _indent: usize) -> String {
        format!(
            "#include {}{}{}",
            self.opening.value, self.name.value, self.closing.value
        )
    }
}
