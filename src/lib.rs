//! # Obfuscator
//!
//! Parses a subset of C++ with a hand-written backtracking parser and re-emits it with
//! every class's members regrouped into one `private:` and one `public:` block, each in
//! a random order. The output is equivalent to the input; only member order changes.
//!
//! ```text
//! source → syntax::parse → Vec<TopLevel> → transform::render_elements → source
//! ```
//!
//! 1. [`syntax`]: cursor, combinators, node catalog, top-level driver.
//! 2. [`transform`]: the emission pass and the seedable [`Obfuscator`].
//! 3. [`config`]: settings file and defaults.
//! 4. [`errors`]: fatal boundary errors with `miette` diagnostics.
//! 5. [`cli`]: the command-line shell.

pub use crate::errors::{ErrorKind, ObfuscatorError};
pub use crate::transform::{Obfuscated, Obfuscator};

pub mod cli;
pub mod config;
pub mod errors;
pub mod syntax;
pub mod transform;
