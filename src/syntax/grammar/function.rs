//! Function signatures, declarations and implementations.

use crate::syntax::cursor::Cursor;
use crate::syntax::grammar::lexical::Word;
use crate::syntax::grammar::statement::{Body, ExpressionInBrackets};
use crate::syntax::grammar::types::QualifiedType;
use crate::syntax::matcher::{
    attempt, choice, fit, fit_pattern, have, keyword, optional, repeat_sep, symbol, Alternative,
    Fit, Node, NotFit, COLON2, COMMA, OPERATOR_SPELLING, SEMICOLON,
};
use crate::syntax::refactor::{refactor_list, Emitter, Refactor};

// ============================================================================
// ARGUMENTS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuncArgument {
    pub ty: QualifiedType,
    pub name: Word,
}

impl Node for FuncArgument {
    fn fit(cur: &mut Cursor) -> Fit<Self> {
        let ty = fit::<QualifiedType>(cur)?;
        let name = fit::<Word>(cur)?;
        Ok(Self { ty, name })
    }
}

impl Refactor for FuncArgument {
    fn refactor(&self, out: &mut Emitter<'_>, indent: usize) -> String {
        format!("{} {}", self.ty.refactor(out, indent), self.name.value)
    }
}

/// `( arg, arg, ... )`, possibly empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuncArguments {
    pub args: Vec<FuncArgument>,
}

impl Node for FuncArguments {
    fn fit(cur: &mut Cursor) -> Fit<Self> {
        symbol(cur, '(')?;
        let args = optional(cur, |c| {
            repeat_sep(c, fit::<FuncArgument>, |c| fit_pattern(c, &COMMA))
        })
        .unwrap_or_default();
        symbol(cur, ')')?;
        Ok(Self { args })
    }
}

impl Refactor for FuncArguments {
    fn refactor(&self, out: &mut Emitter<'_>, indent: usize) -> String {
        format!("({})", refactor_list(&self.args, out, indent, ", "))
    }
}

// ============================================================================
// NAMES
// ============================================================================

/// `Name(args)` with no return type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constructor {
    pub name: Word,
    pub args: FuncArguments,
}

impl Node for Constructor {
    fn fit(cur: &mut Cursor) -> Fit<Self> {
        let name = fit::<Word>(cur)?;
        let args = fit::<FuncArguments>(cur)?;
        Ok(Self { name, args })
    }
}

impl Refactor for Constructor {
    fn refactor(&self, out: &mut Emitter<'_>, indent: usize) -> String {
        format!("{}{}", self.name.value, self.args.refactor(out, indent))
    }
}

/// `~Name(args)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Destructor {
    pub constructor: Constructor,
}

impl Node for Destructor {
    fn fit(cur: &mut Cursor) -> Fit<Self> {
        symbol(cur, '~')?;
        let constructor = fit::<Constructor>(cur)?;
        Ok(Self { constructor })
    }
}

impl Refactor for Destructor {
    fn refactor(&self, out: &mut Emitter<'_>, indent: usize) -> String {
        format!("~{}", self.constructor.refactor(out, indent))
    }
}

/// A plain identifier or an `operator` spelling (everything up to the argument list).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FunctionName {
    Operator(String),
    Plain(Word),
}

impl Node for FunctionName {
    fn fit(cur: &mut Cursor) -> Fit<Self> {
        let operator = attempt(cur, |c| {
            keyword(c, "operator")?;
            fit_pattern(c, &OPERATOR_SPELLING)
        });
        match operator {
            Ok(spelling) => Ok(Self::Operator(spelling.trim_end().to_string())),
            Err(NotFit) => fit::<Word>(cur).map(Self::Plain),
        }
    }
}

impl Refactor for FunctionName {
    fn refactor(&self, _out: &mut Emitter<'_>, _indent: usize) -> String {
        match self {
            Self::Operator(spelling) => format!("operator {}", spelling),
            Self::Plain(word) => word.value.clone(),
        }
    }
}

/// `ReturnType [Class::]name(args)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlainFunction {
    pub returns: QualifiedType,
    pub owner: Option<Word>,
    pub name: FunctionName,
    pub args: FuncArguments,
}

impl Node for PlainFunction {
    fn fit(cur: &mut Cursor) -> Fit<Self> {
        let returns = fit::<QualifiedType>(cur)?;
        let owner = optional(cur, |c| {
            let owner = fit::<Word>(c)?;
            fit_pattern(c, &COLON2)?;
            Ok(owner)
        });
        let name = fit::<FunctionName>(cur)?;
        let args = fit::<FuncArguments>(cur)?;
        Ok(Self {
            returns,
            owner,
            name,
            args,
        })
    }
}

impl Refactor for PlainFunction {
    fn refactor(&self, out: &mut Emitter<'_>, indent: usize) -> String {
        let returns = self.returns.refactor(out, indent);
        let name = self.name.refactor(out, indent);
        let args = self.args.refactor(out, indent);
        match &self.owner {
            Some(owner) => format!("{} {}::{}{}", returns, owner.value, name, args),
            None => format!("{} {}{}", returns, name, args),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Callable {
    Destructor(Destructor),
    Constructor(Constructor),
    Function(PlainFunction),
}

const CALLABLES: &[Alternative<Callable>] = &[
    |c| fit::<Destructor>(c).map(Callable::Destructor),
    |c| fit::<Constructor>(c).map(Callable::Constructor),
    |c| fit::<PlainFunction>(c).map(Callable::Function),
];

impl Refactor for Callable {
    fn refactor(&self, out: &mut Emitter<'_>, indent: usize) -> String {
        match self {
            Self::Destructor(destructor) => destructor.refactor(out, indent),
            Self::Constructor(constructor) => constructor.refactor(out, indent),
            Self::Function(function) => function.refactor(out, indent),
        }
    }
}

/// Everything of a function up to its body or `;`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    pub is_virtual: bool,
    pub is_friend: bool,
    pub callable: Callable,
    pub is_const: bool,
}

impl Node for Signature {
    fn fit(cur: &mut Cursor) -> Fit<Self> {
        let is_virtual = have(cur, |c| keyword(c, "virtual"));
        let is_friend = have(cur, |c| keyword(c, "friend"));
        let callable = choice(cur, CALLABLES)?;
        let is_const = have(cur, |c| keyword(c, "const"));
        Ok(Self {
            is_virtual,
            is_friend,
            callable,
            is_const,
        })
    }
}

impl Refactor for Signature {
    fn refactor(&self, out: &mut Emitter<'_>, indent: usize) -> String {
        let mut text = String::new();
        if self.is_virtual {
            text.push_str("virtual ");
        }
        if self.is_friend {
            text.push_str("friend ");
        }
        text.push_str(&self.callable.refactor(out, indent));
        if self.is_const {
            text.push_str(" const");
        }
        text
    }
}

// ============================================================================
// DECLARATIONS AND IMPLEMENTATIONS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclarationTail {
    None,
    /// `= 0`
    PureVirtual,
    /// `= default`
    Defaulted,
}

/// A prototype terminated by `;`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuncDeclaration {
    pub signature: Signature,
    pub tail: DeclarationTail,
}

impl Node for FuncDeclaration {
    fn fit(cur: &mut Cursor) -> Fit<Self> {
        let signature = fit::<Signature>(cur)?;
        let tail = if have(cur, |c| symbol(c, '=')) {
            if have(cur, |c| symbol(c, '0')) {
                DeclarationTail::PureVirtual
            } else {
                keyword(cur, "default")?;
                DeclarationTail::Defaulted
            }
        } else {
            DeclarationTail::None
        };
        fit_pattern(cur, &SEMICOLON)?;
        Ok(Self { signature, tail })
    }
}

impl Refactor for FuncDeclaration {
    fn refactor(&self, out: &mut Emitter<'_>, indent: usize) -> String {
        let tail = match self.tail {
            DeclarationTail::None => "",
            DeclarationTail::PureVirtual => " = 0",
            DeclarationTail::Defaulted => " = default",
        };
        format!("{}{};", self.signature.refactor(out, indent), tail)
    }
}

/// One entry of a constructor's initializer list: `member(args)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberInit {
    pub name: Word,
    pub value: ExpressionInBrackets,
}

impl Node for MemberInit {
    fn fit(cur: &mut Cursor) -> Fit<Self> {
        let name = fit::<Word>(cur)?;
        let value = fit::<ExpressionInBrackets>(cur)?;
        Ok(Self { name, value })
    }
}

impl Refactor for MemberInit {
    fn refactor(&self, out: &mut Emitter<'_>, indent: usize) -> String {
        format!("{}{}", self.name.value, self.value.refactor(out, indent))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuncImplementation {
    pub signature: Signature,
    pub inits: Vec<MemberInit>,
    pub body: Body,
}

impl Node for FuncImplementation {
    fn fit(cur: &mut Cursor) -> Fit<Self> {
        let signature = fit::<Signature>(cur)?;
        let inits = optional(cur, |c| {
            symbol(c, ':')?;
            repeat_sep(c, fit::<MemberInit>, |c| fit_pattern(c, &COMMA))
        })
        .unwrap_or_default();
        let body = fit::<Body>(cur)?;
        Ok(Self {
            signature,
            inits,
            body,
        })
    }
}

impl Refactor for FuncImplementation {
    fn refactor(&self, out: &mut Emitter<'_>, indent: usize) -> String {
        let mut text = self.signature.refactor(out, indent);
        if !self.inits.is_empty() {
            text.push_str(" : ");
            text.push_str(&refactor_list(&self.inits, out, indent, ", "));
        }
        text.push(' ');
        text.push_str(&self.body.refactor(out, indent));
        text
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Function {
    Declaration(FuncDeclaration),
    Implementation(FuncImplementation),
}

const FUNCTIONS: &[Alternative<Function>] = &[
    |c| fit::<FuncDeclaration>(c).map(Function::Declaration),
    |c| fit::<FuncImplementation>(c).map(Function::Implementation),
];

impl Node for Function {
    fn fit(cur: &mut Cursor) -> Fit<Self> {
        choice(cur, FUNCTIONS)
    }
}

impl Function {
    pub fn signature(&self) -> &Signature {
        match self {
            Self::Declaration(declaration) => &declaration.signature,
            Self::Implementation(implementation) => &implementation.signature,
        }
    }
}

impl Refactor for Function {
    fn refactor(&self, out: &mut Emitter<'_>, indent: usize) -> String {
        match self {
            Self::Declaration(declaration) => declaration.refactor(out, indent),
            Self::Implementation(implementation) => implementation.refactor(out, indent),
        }
    }
}
