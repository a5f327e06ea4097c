//! Type names: `ns::name<args>` with optional `const`, `&` and `*`.

use crate::syntax::cursor::Cursor;
use crate::syntax::grammar::lexical::Word;
use crate::syntax::matcher::{
    attempt, fit, fit_pattern, have, keyword, optional, repeat_sep, symbol, Fit, Node, NotFit,
    COLON2, COMMA,
};
use crate::syntax::refactor::{Emitter, Refactor};

/// A type name with at most one namespace level and an optional template argument list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Type {
    pub namespace: Option<Word>,
    pub name: Word,
    pub args: Vec<Type>,
}

impl Node for Type {
    fn fit(cur: &mut Cursor) -> Fit<Self> {
        let namespace = optional(cur, |c| {
            let namespace = fit::<Word>(c)?;
            fit_pattern(c, &COLON2)?;
            Ok(namespace)
        });

        let templated = attempt(cur, |c| {
            let name = fit::<Word>(c)?;
            symbol(c, '<')?;
            let args = repeat_sep(c, fit::<Type>, |c| fit_pattern(c, &COMMA))?;
            symbol(c, '>')?;
            Ok((name, args))
        });
        let (name, args) = match templated {
            Ok(templated) => templated,
            Err(NotFit) => (fit::<Word>(cur)?, Vec::new()),
        };

        if cur.is_reserved(&name.value) {
            return Err(NotFit);
        }
        Ok(Self {
            namespace,
            name,
            args,
        })
    }
}

impl Refactor for Type {
    fn refactor(&self, out: &mut Emitter<'_>, indent: usize) -> String {
        let mut text = String::new();
        if let Some(namespace) = &self.namespace {
            text.push_str(&namespace.value);
            text.push_str("::");
        }
        text.push_str(&self.name.value);
        if !self.args.is_empty() {
            let args: Vec<_> = self.args.iter().map(|a| a.refactor(out, indent)).collect();
            text.push('<');
            text.push_str(&args.join(", "));
            text.push('>');
        }
        text
    }
}

/// A [`Type`] with its cv/reference/pointer decoration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QualifiedType {
    pub is_const: bool,
    pub ty: Type,
    pub is_reference: bool,
    pub is_pointer: bool,
}

impl Node for QualifiedType {
    fn fit(cur: &mut Cursor) -> Fit<Self> {
        let mut is_const = have(cur, |c| keyword(c, "const"));
        let ty = fit::<Type>(cur)?;
        is_const |= have(cur, |c| keyword(c, "const"));
        let is_reference = have(cur, |c| symbol(c, '&'));
        let is_pointer = have(cur, |c| symbol(c, '*'));
        Ok(Self {
            is_const,
            ty,
            is_reference,
            is_pointer,
        })
    }
}

impl Refactor for QualifiedType {
    fn refactor(&self, out: &mut Emitter<'_>, indent: usize) -> String {
        let mut text = String::new();
        if self.is_const {
            text.push_str("const ");
        }
        text.push_str(&self.ty.refactor(out, indent));
        if self.is_reference {
            text.push('&');
        }
        if self.is_pointer {
            text.push('*');
        }
        text
    }
}
