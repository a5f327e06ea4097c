//! Class definitions, and the member shuffle applied when they are emitted.

use crate::syntax::cursor::Cursor;
use crate::syntax::grammar::function::Function;
use crate::syntax::grammar::lexical::Word;
use crate::syntax::grammar::statement::ExpressionStatement;
use crate::syntax::grammar::types::QualifiedType;
use crate::syntax::matcher::{
    choice, fit, fit_pattern, keyword, optional, repeat, symbol, Alternative, Fit, Node,
    SEMICOLON,
};
use crate::syntax::refactor::{Emitter, Refactor};

/// `Type rest-of-declaration;`, e.g. `int x = 5;`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableInit {
    pub ty: QualifiedType,
    pub rest: ExpressionStatement,
}

impl Node for VariableInit {
    fn fit(cur: &mut Cursor) -> Fit<Self> {
        let ty = fit::<QualifiedType>(cur)?;
        let rest = fit::<ExpressionStatement>(cur)?;
        Ok(Self { ty, rest })
    }
}

impl Refactor for VariableInit {
    fn refactor(&self, out: &mut Emitter<'_>, indent: usize) -> String {
        format!("{} {}", self.ty.refactor(out, indent), self.rest.value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Member {
    Function(Function),
    Variable(VariableInit),
}

const MEMBERS: &[Alternative<Member>] = &[
    |c| fit::<Function>(c).map(Member::Function),
    |c| fit::<VariableInit>(c).map(Member::Variable),
];

impl Node for Member {
    fn fit(cur: &mut Cursor) -> Fit<Self> {
        choice(cur, MEMBERS)
    }
}

impl Refactor for Member {
    fn refactor(&self, out: &mut Emitter<'_>, indent: usize) -> String {
        match self {
            Self::Function(function) => function.refactor(out, indent),
            Self::Variable(variable) => variable.refactor(out, indent),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Public,
    Private,
}

impl Visibility {
    pub fn as_str(&self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Private => "private",
        }
    }
}

/// `public:` or `private:` followed by any number of members.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassSection {
    pub visibility: Visibility,
    pub members: Vec<Member>,
}

impl ClassSection {
    fn labeled(cur: &mut Cursor, visibility: Visibility) -> Fit<Self> {
        keyword(cur, visibility.as_str())?;
        symbol(cur, ':')?;
        let members = optional(cur, |c| repeat(c, fit::<Member>)).unwrap_or_default();
        Ok(Self {
            visibility,
            members,
        })
    }
}

const SECTIONS: &[Alternative<ClassSection>] = &[
    |c| ClassSection::labeled(c, Visibility::Public),
    |c| ClassSection::labeled(c, Visibility::Private),
];

impl Node for ClassSection {
    fn fit(cur: &mut Cursor) -> Fit<Self> {
        choice(cur, SECTIONS)
    }
}

/// `class Name { ... };`
///
/// Members written before the first label are private, as the language's default
/// access for `class` dictates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Class {
    pub name: Word,
    pub unlabeled: Vec<Member>,
    pub sections: Vec<ClassSection>,
}

impl Node for Class {
    fn fit(cur: &mut Cursor) -> Fit<Self> {
        keyword(cur, "class")?;
        let name = fit::<Word>(cur)?;
        symbol(cur, '{')?;
        let unlabeled = optional(cur, |c| repeat(c, fit::<Member>)).unwrap_or_default();
        let sections = optional(cur, |c| repeat(c, fit::<ClassSection>)).unwrap_or_default();
        symbol(cur, '}')?;
        fit_pattern(cur, &SEMICOLON)?;
        Ok(Self {
            name,
            unlabeled,
            sections,
        })
    }
}

impl Class {
    /// Members with the given access, unlabeled ones first, then sections in order.
    pub fn members(&self, visibility: Visibility) -> Vec<&Member> {
        let unlabeled = match visibility {
            Visibility::Private => self.unlabeled.as_slice(),
            Visibility::Public => &self.unlabeled[..0],
        };
        unlabeled
            .iter()
            .chain(
                self.sections
                    .iter()
                    .filter(|section| section.visibility == visibility)
                    .flat_map(|section| section.members.iter()),
            )
            .collect()
    }
}

impl Refactor for Class {
    fn refactor(&self, out: &mut Emitter<'_>, indent: usize) -> String {
        let mut private = self.members(Visibility::Private);
        let mut public = self.members(Visibility::Public);
        out.shuffle(&mut private);
        out.shuffle(&mut public);
        out.record_class();

        let inner = out.nested(indent);
        let mut text = format!("class {} {{\n", self.name.value);
        for (visibility, members) in [(Visibility::Private, private), (Visibility::Public, public)] {
            if visibility == Visibility::Public {
                text.push('\n');
            }
            text.push_str(&out.pad(indent));
            text.push_str(visibility.as_str());
            text.push_str(":\n");
            for (position, member) in members.into_iter().enumerate() {
                // Public members are separated by a blank line, private ones are not.
                if visibility == Visibility::Public && position > 0 {
                    text.push('\n');
                }
                text.push_str(&out.pad(inner));
                text.push_str(&member.refactor(out, inner));
                text.push('\n');
            }
        }
        text.push_str(&out.pad(indent));
        text.push_str("};");
        text
    }
}
