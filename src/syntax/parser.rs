//! Top-level driver loop.
//!
//! At each position the rules of [`TOP_LEVEL_RULES`] are tried in order and the first one
//! that fits produces the next element. The final rule accepts any single character, so
//! every iteration consumes input and the loop always reaches the end of the text, even
//! when the text is not C++ at all.

use std::sync::Arc;

use crate::syntax::cursor::Cursor;
use crate::syntax::grammar::{Class, Function, Include, Spaces, Symbol, VariableInit, Word};
use crate::syntax::matcher::{choice, fit_tight, Alternative};
use crate::syntax::refactor::{Emitter, Refactor};
use crate::syntax::reserved::ReservedWords;

/// One element of a parsed source file, in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TopLevel {
    Spaces(Spaces),
    Include(Include),
    Class(Class),
    Function(Function),
    Variable(VariableInit),
    Word(Word),
    Symbol(Symbol),
}

pub const TOP_LEVEL_RULES: &[Alternative<TopLevel>] = &[
    |c| fit_tight::<Spaces>(c).map(TopLevel::Spaces),
    |c| fit_tight::<Include>(c).map(TopLevel::Include),
    |c| fit_tight::<Class>(c).map(TopLevel::Class),
    |c| fit_tight::<Function>(c).map(TopLevel::Function),
    |c| fit_tight::<VariableInit>(c).map(TopLevel::Variable),
    |c| fit_tight::<Word>(c).map(TopLevel::Word),
    |c| fit_tight::<Symbol>(c).map(TopLevel::Symbol),
];

impl TopLevel {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Spaces(_) => "Spaces",
            Self::Include(_) => "Include",
            Self::Class(_) => "Class",
            Self::Function(_) => "Function",
            Self::Variable(_) => "Variable",
            Self::Word(_) => "Word",
            Self::Symbol(_) => "Symbol",
        }
    }

    pub fn is_spaces(&self) -> bool {
        matches!(self, Self::Spaces(_))
    }
}

impl Refactor for TopLevel {
    fn refactor(&self, out: &mut Emitter<'_>, indent: usize) -> String {
        match self {
            Self::Spaces(spaces) => spaces.refactor(out, indent),
            Self::Include(include) => include.refactor(out, indent),
            Self::Class(class) => class.refactor(out, indent),
            Self::Function(function) => function.refactor(out, indent),
            Self::Variable(variable) => variable.refactor(out, indent),
            Self::Word(word) => word.refactor(out, indent),
            Self::Symbol(symbol) => symbol.refactor(out, indent),
        }
    }
}

// ============================================================================
// PUBLIC API
// ============================================================================

/// Parses everything from the cursor to the end of its text.
pub fn parse(cur: &mut Cursor) -> Vec<TopLevel> {
    let mut elements = Vec::new();
    while !cur.at_end() {
        let before = cur.offset();
        let element = match choice(cur, TOP_LEVEL_RULES) {
            Ok(element) => element,
            // Unreachable while the Symbol rule is last; kept so a rule change can never
            // turn into an endless loop.
            Err(_) => match cur.take_char() {
                Some(value) => TopLevel::Symbol(Symbol { value }),
                None => break,
            },
        };
        debug_assert!(cur.offset() > before, "top-level rule consumed nothing");
        elements.push(element);
    }
    elements
}

/// Parses `source` with the given reserved words.
pub fn parse_source(source: &str, reserved: Arc<ReservedWords>) -> Vec<TopLevel> {
    let mut cur = Cursor::with_reserved(source, reserved);
    parse(&mut cur)
}
