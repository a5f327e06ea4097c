//! Backtracking match engine.
//!
//! Every rule is a function `&mut Cursor -> Fit<T>`. A rule that fails may leave its
//! cursor anywhere; callers that need to survive a failure run the rule through
//! [`attempt`], which works on a copy and commits only on success. Every optional or
//! alternative construct of the grammar is built from that one scope.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use crate::syntax::cursor::Cursor;
use crate::syntax::grammar::lexical::{Symbol, Word};

// ============================================================================
// OUTCOME
// ============================================================================

/// The input at the cursor does not fit the rule. Drives backtracking; never fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("input does not fit the expected grammar")]
pub struct NotFit;

pub type Fit<T> = Result<T, NotFit>;

/// A grammar node that knows how to recognize itself at the cursor.
pub trait Node: Sized {
    fn fit(cur: &mut Cursor) -> Fit<Self>;
}

/// One entry of an ordered choice.
pub type Alternative<T> = fn(&mut Cursor) -> Fit<T>;

// ============================================================================
// PATTERNS
// ============================================================================

macro_rules! pattern {
    ($name:ident, $re:literal) => {
        pub static $name: Lazy<Regex> =
            Lazy::new(|| Regex::new(concat!(r"\A(?:", $re, ")")).expect("static pattern"));
    };
}

pattern!(SPACES, r"\s+");
pattern!(ANY_CHAR, r"(?s).");
pattern!(WORD, r"[a-zA-Z_]\w*");
pattern!(SEMICOLON, r";");
pattern!(COMMA, r",");
pattern!(COLON2, r"::");
pattern!(OPERATOR_SPELLING, r"[^(]+");
pattern!(UNTIL_CLOSE_PAREN, r"[^)]+");
pattern!(UNTIL_CLOSE_PAREN_OR_EMPTY, r"[^)]*");
pattern!(THROUGH_SEMICOLON, r"[^;]*;");

// ============================================================================
// PRIMITIVES
// ============================================================================

/// Consumes the anchored match of `pattern`, without skipping whitespace first.
pub fn fit_pattern_tight(cur: &mut Cursor, pattern: &Regex) -> Fit<String> {
    let rest = cur.remaining()?;
    let found = pattern.find(rest).ok_or(NotFit)?;
    let value = found.as_str().to_string();
    cur.shift(value.len());
    Ok(value)
}

pub fn fit_pattern(cur: &mut Cursor, pattern: &Regex) -> Fit<String> {
    skip_spaces(cur);
    fit_pattern_tight(cur, pattern)
}

pub fn skip_spaces(cur: &mut Cursor) {
    let _ = fit_pattern_tight(cur, &SPACES);
}

/// Skips whitespace, then runs `N`'s rule.
pub fn fit<N: Node>(cur: &mut Cursor) -> Fit<N> {
    skip_spaces(cur);
    fit_tight(cur)
}

/// Runs `N`'s rule one level deeper. Every nested rule goes through here, so the depth
/// limit of [`Cursor::descend`] bounds the recursion.
pub fn fit_tight<N: Node>(cur: &mut Cursor) -> Fit<N> {
    cur.descend()?;
    let node = N::fit(cur);
    cur.ascend();
    node
}

// ============================================================================
// COMBINATORS
// ============================================================================

/// Speculative scope: runs `rule` on a checkpoint and commits it only on success.
pub fn attempt<T, F>(cur: &mut Cursor, rule: F) -> Fit<T>
where
    F: FnOnce(&mut Cursor) -> Fit<T>,
{
    let mut scope = cur.clone();
    let value = rule(&mut scope)?;
    cur.fill_from(&scope);
    Ok(value)
}

pub fn optional<T, F>(cur: &mut Cursor, rule: F) -> Option<T>
where
    F: FnOnce(&mut Cursor) -> Fit<T>,
{
    attempt(cur, rule).ok()
}

pub fn have<T, F>(cur: &mut Cursor, rule: F) -> bool
where
    F: FnOnce(&mut Cursor) -> Fit<T>,
{
    attempt(cur, rule).is_ok()
}

/// Ordered choice: the first alternative that fits wins.
pub fn choice<T>(cur: &mut Cursor, alternatives: &[Alternative<T>]) -> Fit<T> {
    alternatives
        .iter()
        .find_map(|alternative| attempt(cur, alternative).ok())
        .ok_or(NotFit)
}

/// One `item`, then as many more as fit.
pub fn repeat<T, F>(cur: &mut Cursor, item: F) -> Fit<Vec<T>>
where
    F: Fn(&mut Cursor) -> Fit<T>,
{
    repeat_with(cur, &item, |_| Ok(()))
}

/// One `item`, then as many `sep item` pairs as fit.
pub fn repeat_sep<T, S, F, G>(cur: &mut Cursor, item: F, sep: G) -> Fit<Vec<T>>
where
    F: Fn(&mut Cursor) -> Fit<T>,
    G: Fn(&mut Cursor) -> Fit<S>,
{
    repeat_with(cur, &item, |c| sep(c).map(|_| ()))
}

fn repeat_with<T, F, G>(cur: &mut Cursor, item: &F, sep: G) -> Fit<Vec<T>>
where
    F: Fn(&mut Cursor) -> Fit<T>,
    G: Fn(&mut Cursor) -> Fit<()>,
{
    let mut items = vec![item(cur)?];
    loop {
        let before = cur.offset();
        let next = attempt(cur, |c| {
            skip_spaces(c);
            sep(c)?;
            skip_spaces(c);
            item(c)
        });
        match next {
            // A zero-width item would repeat forever.
            Ok(value) if cur.offset() > before => items.push(value),
            _ => break,
        }
    }
    Ok(items)
}

// ============================================================================
// CONTEXTUAL LITERALS
// ============================================================================

/// A single character equal to `expected`.
pub fn symbol(cur: &mut Cursor, expected: char) -> Fit<Symbol> {
    let found = fit::<Symbol>(cur)?;
    if found.value != expected {
        return Err(NotFit);
    }
    Ok(found)
}

/// A word equal to `expected`.
pub fn keyword(cur: &mut Cursor, expected: &str) -> Fit<Word> {
    skip_spaces(cur);
    keyword_tight(cur, expected)
}

pub fn keyword_tight(cur: &mut Cursor, expected: &str) -> Fit<Word> {
    let found = fit_tight::<Word>(cur)?;
    if found.value != expected {
        return Err(NotFit);
    }
    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_attempt_leaves_cursor_untouched() {
        let mut cur = Cursor::new("int x");
        let result = attempt(&mut cur, |c| {
            keyword(c, "int")?;
            keyword(c, "y")
        });
        assert_eq!(result, Err(NotFit));
        assert_eq!(cur.offset(), 0);
    }

    #[test]
    fn successful_attempt_commits() {
        let mut cur = Cursor::new("  int x");
        let word = attempt(&mut cur, |c| keyword(c, "int")).unwrap();
        assert_eq!(word.value, "int");
        assert_eq!(cur.offset(), 5);
    }

    #[test]
    fn choice_takes_first_fitting_alternative() {
        let alternatives: &[Alternative<&str>] = &[
            |c| keyword(c, "if").map(|_| "if"),
            |c| fit::<Word>(c).map(|_| "word"),
            |c| fit::<Symbol>(c).map(|_| "symbol"),
        ];
        assert_eq!(choice(&mut Cursor::new("iffy"), alternatives), Ok("word"));
        assert_eq!(choice(&mut Cursor::new("if"), alternatives), Ok("if"));
        assert_eq!(choice(&mut Cursor::new("{"), alternatives), Ok("symbol"));
        assert_eq!(choice(&mut Cursor::new(""), alternatives), Err(NotFit));
    }

    #[test]
    fn repeat_with_separator_stops_before_dangling_separator() {
        let mut cur = Cursor::new("a , b,c, ;");
        let words = repeat_sep(&mut cur, fit::<Word>, |c| symbol(c, ',')).unwrap();
        let names: Vec<_> = words.iter().map(|w| w.value.as_str()).collect();
        assert_eq!(names, ["a", "b", "c"]);
        assert_eq!(cur.remaining(), Ok(", ;"));
    }

    #[test]
    fn repeat_needs_one_item() {
        let mut cur = Cursor::new("; a");
        assert_eq!(repeat(&mut cur, fit::<Word>), Err(NotFit));
    }

    #[test]
    fn have_reports_presence_without_side_effects() {
        let mut cur = Cursor::new("const int");
        assert!(!have(&mut cur, |c| keyword(c, "int")));
        assert_eq!(cur.offset(), 0);
        assert!(have(&mut cur, |c| keyword(c, "const")));
        assert_eq!(cur.remaining(), Ok(" int"));
    }

    #[test]
    fn tight_keyword_refuses_leading_space() {
        assert!(keyword_tight(&mut Cursor::new(" include"), "include").is_err());
        assert!(keyword_tight(&mut Cursor::new("include"), "include").is_ok());
    }

    #[test]
    fn rules_balance_depth_and_stop_at_the_limit() {
        let mut cur = Cursor::new("int x");
        assert!(fit::<Word>(&mut cur).is_ok());
        assert!(fit::<Word>(&mut cur).is_ok());
        assert_eq!(cur.depth(), 0);

        let mut deep = Cursor::new("int");
        while deep.depth() < crate::syntax::cursor::MAX_DEPTH {
            deep.descend().unwrap();
        }
        assert_eq!(fit::<Word>(&mut deep), Err(NotFit));
    }

    #[test]
    fn patterns_are_anchored() {
        let mut cur = Cursor::new("x;y");
        assert_eq!(fit_pattern_tight(&mut cur, &SEMICOLON), Err(NotFit));
        assert_eq!(fit_pattern(&mut cur, &THROUGH_SEMICOLON), Ok("x;".to_string()));
    }
}
