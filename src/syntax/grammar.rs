//! The node catalog. Each node owns its parse rule ([`Node`](crate::syntax::matcher::Node))
//! and its serialization rule ([`Refactor`](crate::syntax::refactor::Refactor)).

pub mod class;
pub mod function;
pub mod lexical;
pub mod statement;
pub mod types;

pub use class::{Class, ClassSection, Member, VariableInit, Visibility};
pub use function::{
    Callable, Constructor, DeclarationTail, Destructor, FuncArgument, FuncArguments,
    FuncDeclaration, FuncImplementation, Function, FunctionName, MemberInit, PlainFunction,
    Signature,
};
pub use lexical::{Include, Spaces, Symbol, Word};
pub use statement::{
    BalancedText, Body, BodyOrStatement, ExpressionInBrackets, ExpressionStatement, ForLoop,
    IfElse, Statement,
};
pub use types::{QualifiedType, Type};
