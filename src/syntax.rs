//! Syntax module: a backtracking, combinator-based parser for a subset of C++.
//!
//! - [`cursor`]: position over the shared source text, checkpoint and commit.
//! - [`matcher`]: the combinators (speculative scope, choice, repetition, literals).
//! - [`grammar`]: the node catalog, each node with a parse and a serialization rule.
//! - [`parser`]: the top-level priority loop.
//! - [`refactor`]: serialization back to source text.
//!
//! Parsing never fails as a whole. Input no rule recognizes comes back as single
//! [`grammar::Symbol`] elements and is re-emitted untouched.

pub mod cursor;
pub mod grammar;
pub mod matcher;
pub mod parser;
pub mod refactor;
pub mod reserved;

pub use cursor::Cursor;
pub use matcher::{Fit, Node, NotFit};
pub use parser::{parse, parse_source, TopLevel};
pub use refactor::{Emitter, Refactor};
pub use reserved::ReservedWords;
