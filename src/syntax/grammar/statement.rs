//! Function bodies and the statements inside them.
//!
//! Only `if`/`else` and `for` are parsed structurally. Anything else is an expression
//! statement captured verbatim up to its `;`. Parenthesized regions (conditions, the
//! `for` step) are captured as raw text with an explicit paren count.

use crate::syntax::cursor::Cursor;
use crate::syntax::matcher::{
    attempt, choice, fit, fit_pattern_tight, keyword, optional, repeat, skip_spaces, symbol,
    Alternative, Fit, Node, NotFit, THROUGH_SEMICOLON, UNTIL_CLOSE_PAREN,
    UNTIL_CLOSE_PAREN_OR_EMPTY,
};
use crate::syntax::refactor::{Emitter, Refactor};

// ============================================================================
// RAW CAPTURES
// ============================================================================

/// Text up to (not including) the `)` that balances it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BalancedText {
    pub value: String,
}

fn is_balanced(text: &str) -> bool {
    text.matches('(').count() == text.matches(')').count()
}

impl Node for BalancedText {
    fn fit(cur: &mut Cursor) -> Fit<Self> {
        let mut value = fit_pattern_tight(cur, &UNTIL_CLOSE_PAREN)?;
        while !is_balanced(&value) {
            if !cur.remaining()?.starts_with(')') {
                return Err(NotFit);
            }
            cur.shift(1);
            value.push(')');
            value.push_str(&fit_pattern_tight(cur, &UNTIL_CLOSE_PAREN_OR_EMPTY)?);
        }
        Ok(Self { value })
    }
}

impl Refactor for BalancedText {
    fn refactor(&self, _out: &mut Emitter<'_>, _indent: usize) -> String {
        self.value.trim_end().to_string()
    }
}

/// `( ... )` with the inside kept as raw text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpressionInBrackets {
    pub inner: Option<BalancedText>,
}

impl Node for ExpressionInBrackets {
    fn fit(cur: &mut Cursor) -> Fit<Self> {
        symbol(cur, '(')?;
        let inner = optional(cur, fit::<BalancedText>);
        symbol(cur, ')')?;
        Ok(Self { inner })
    }
}

impl Refactor for ExpressionInBrackets {
    fn refactor(&self, out: &mut Emitter<'_>, indent: usize) -> String {
        let inner = match &self.inner {
            Some(inner) => inner.refactor(out, indent),
            None => String::new(),
        };
        format!("({})", inner)
    }
}

/// Everything up to and including the next `;`. Never starts with `}`, so a block's
/// closing brace is not swallowed as the start of a statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpressionStatement {
    pub value: String,
}

impl Node for ExpressionStatement {
    fn fit(cur: &mut Cursor) -> Fit<Self> {
        skip_spaces(cur);
        if cur.remaining()?.starts_with('}') {
            return Err(NotFit);
        }
        let value = fit_pattern_tight(cur, &THROUGH_SEMICOLON)?;
        Ok(Self { value })
    }
}

impl Refactor for ExpressionStatement {
    fn refactor(&self, _out: &mut Emitter<'_>, _indent: usize) -> String {
        self.value.clone()
    }
}

// ============================================================================
// BLOCKS
// ============================================================================

/// `{ statement* }`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Body {
    pub statements: Vec<Statement>,
}

impl Node for Body {
    fn fit(cur: &mut Cursor) -> Fit<Self> {
        symbol(cur, '{')?;
        let statements = optional(cur, |c| repeat(c, fit::<Statement>)).unwrap_or_default();
        symbol(cur, '}')?;
        Ok(Self { statements })
    }
}

impl Refactor for Body {
    fn refactor(&self, out: &mut Emitter<'_>, indent: usize) -> String {
        let inner = out.nested(indent);
        let mut text = String::from("{\n");
        for statement in &self.statements {
            text.push_str(&out.pad(inner));
            text.push_str(&statement.refactor(out, inner));
            text.push('\n');
        }
        text.push_str(&out.pad(indent));
        text.push('}');
        text
    }
}

/// A braced block, or a single unbraced statement after `if`/`else`/`for`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BodyOrStatement {
    Body(Body),
    Statement(Box<Statement>),
}

impl Node for BodyOrStatement {
    fn fit(cur: &mut Cursor) -> Fit<Self> {
        match attempt(cur, fit::<Body>) {
            Ok(body) => Ok(Self::Body(body)),
            Err(NotFit) => fit::<Statement>(cur).map(|s| Self::Statement(Box::new(s))),
        }
    }
}

impl Refactor for BodyOrStatement {
    fn refactor(&self, out: &mut Emitter<'_>, indent: usize) -> String {
        match self {
            Self::Body(body) => body.refactor(out, indent),
            Self::Statement(statement) => statement.refactor(out, indent),
        }
    }
}

// ============================================================================
// STATEMENTS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IfElse {
    pub condition: ExpressionInBrackets,
    pub then_branch: BodyOrStatement,
    pub else_branch: Option<BodyOrStatement>,
}

impl Node for IfElse {
    fn fit(cur: &mut Cursor) -> Fit<Self> {
        keyword(cur, "if")?;
        let condition = fit::<ExpressionInBrackets>(cur)?;
        let then_branch = fit::<BodyOrStatement>(cur)?;
        let else_branch = optional(cur, |c| {
            keyword(c, "else")?;
            fit::<BodyOrStatement>(c)
        });
        Ok(Self {
            condition,
            then_branch,
            else_branch,
        })
    }
}

impl Refactor for IfElse {
    fn refactor(&self, out: &mut Emitter<'_>, indent: usize) -> String {
        let mut text = format!(
            "if {} {}",
            self.condition.refactor(out, indent),
            self.then_branch.refactor(out, indent)
        );
        if let Some(else_branch) = &self.else_branch {
            text.push_str(" else ");
            text.push_str(&else_branch.refactor(out, indent));
        }
        text
    }
}

/// `for (init; condition; step) body`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForLoop {
    pub init: ExpressionStatement,
    pub condition: ExpressionStatement,
    pub step: Option<BalancedText>,
    pub body: BodyOrStatement,
}

impl Node for ForLoop {
    fn fit(cur: &mut Cursor) -> Fit<Self> {
        keyword(cur, "for")?;
        symbol(cur, '(')?;
        let init = fit::<ExpressionStatement>(cur)?;
        let condition = fit::<ExpressionStatement>(cur)?;
        let step = optional(cur, fit::<BalancedText>);
        symbol(cur, ')')?;
        let body = fit::<BodyOrStatement>(cur)?;
        Ok(Self {
            init,
            condition,
            step,
            body,
        })
    }
}

impl Refactor for ForLoop {
    fn refactor(&self, out: &mut Emitter<'_>, indent: usize) -> String {
        let step = match &self.step {
            Some(step) => format!(" {}", step.refactor(out, indent)),
            None => String::new(),
        };
        format!(
            "for ({} {}{}) {}",
            self.init.value,
            self.condition.value,
            step,
            self.body.refactor(out, indent)
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    IfElse(Box<IfElse>),
    For(Box<ForLoop>),
    Expression(ExpressionStatement),
}

const STATEMENTS: &[Alternative<Statement>] = &[
    |c| fit::<IfElse>(c).map(|s| Statement::IfElse(Box::new(s))),
    |c| fit::<ForLoop>(c).map(|s| Statement::For(Box::new(s))),
    |c| fit::<ExpressionStatement>(c).map(Statement::Expression),
];

impl Node for Statement {
    fn fit(cur: &mut Cursor) -> Fit<Self> {
        choice(cur, STATEMENTS)
    }
}

impl Refactor for Statement {
    fn refactor(&self, out: &mut Emitter<'_>, indent: usize) -> String {
        match self {
            Self::IfElse(if_else) => if_else.refactor(out, indent),
            Self::For(for_loop) => for_loop.refactor(out, indent),
            Self::Expression(expression) => expression.refactor(out, indent),
        }
    }
}
