// tests/parser_tests.rs

use std::sync::Arc;

use obfuscator::syntax::grammar::{
    BodyOrStatement, Callable, Class, DeclarationTail, ExpressionStatement, ForLoop,
    FuncDeclaration, FuncImplementation, Function, FunctionName, IfElse, Include, QualifiedType,
    Statement, Type, Visibility,
};
use obfuscator::syntax::{parse_source, Cursor, Emitter, Node, Refactor, ReservedWords, TopLevel};
use obfuscator::transform::render_elements;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256StarStar;

fn parse_node<N: Node>(text: &str) -> N {
    match N::fit(&mut Cursor::new(text)) {
        Ok(node) => node,
        Err(_) => panic!("expected {text:?} to parse"),
    }
}

fn emit<N: Refactor>(node: &N) -> String {
    let mut rng = Xoshiro256StarStar::seed_from_u64(0);
    let mut out = Emitter::new(4, &mut rng);
    node.refactor(&mut out, 0)
}

fn render(source: &str) -> String {
    let mut rng = Xoshiro256StarStar::seed_from_u64(0);
    let elements = parse_source(source, Arc::new(ReservedWords::default()));
    render_elements(&elements, 4, &mut rng).code
}

fn kinds(source: &str) -> Vec<&'static str> {
    parse_source(source, Arc::new(ReservedWords::default()))
        .iter()
        .map(TopLevel::kind)
        .collect()
}

// ---
// Include
// ---

#[test]
fn test_include_angle_brackets() {
    let include: Include = parse_node("#include <vector>");
    assert_eq!(include.opening.value, '<');
    assert_eq!(include.name.value, "vector");
    assert_eq!(include.closing.value, '>');
    assert_eq!(emit(&include), "#include <vector>");
}

#[test]
fn test_include_quotes_and_missing_space() {
    let include: Include = parse_node("#include\"util\"");
    assert_eq!(include.opening.value, '"');
    assert_eq!(emit(&include), "#include \"util\"");
}

#[test]
fn test_include_takes_any_closing_character() {
    let include: Include = parse_node("#include \"a.h\"");
    assert_eq!(include.name.value, "a");
    assert_eq!(include.closing.value, '.');

    assert_eq!(kinds("#include \"a.h\""), ["Include", "Word", "Symbol"]);
    assert_eq!(render("#include \"a.h\""), "#include \"a.h\"");
}

#[test]
fn test_include_keyword_must_follow_hash() {
    assert!(Include::fit(&mut Cursor::new("# include <vector>")).is_err());
    assert!(Include::fit(&mut Cursor::new("#define X")).is_err());
}

// ---
// Types
// ---

#[test]
fn test_type_with_namespace_and_template_args() {
    let ty: Type = parse_node("std::map< std::string ,int >");
    assert_eq!(ty.namespace.as_ref().map(|w| w.value.as_str()), Some("std"));
    assert_eq!(ty.name.value, "map");
    assert_eq!(ty.args.len(), 2);
    assert_eq!(emit(&ty), "std::map<std::string, int>");
}

#[test]
fn test_nested_template_closes_on_adjacent_brackets() {
    let ty: Type = parse_node("std::vector<std::vector<int>>");
    assert_eq!(ty.args.len(), 1);
    assert_eq!(ty.args[0].args[0].name.value, "int");
    assert_eq!(emit(&ty), "std::vector<std::vector<int>>");

    assert_eq!(kinds("std::vector<std::vector<int>> v;"), ["Variable"]);
    assert_eq!(
        render("std::vector<std::vector<int>> v;"),
        "std::vector<std::vector<int>> v;"
    );
}

#[test]
fn test_deep_template_nesting_falls_back_to_raw_text() {
    let source = "a<".repeat(5000);
    let elements = parse_source(&source, Arc::new(ReservedWords::default()));
    assert_eq!(elements.len(), 10000);
    assert!(elements
        .iter()
        .all(|e| matches!(e, TopLevel::Word(_) | TopLevel::Symbol(_))));
    assert_eq!(render(&source), source);
}

#[test]
fn test_reserved_word_is_never_a_type() {
    assert!(Type::fit(&mut Cursor::new("return")).is_err());
    assert!(Type::fit(&mut Cursor::new("class")).is_err());

    let reserved = Arc::new(ReservedWords::with_extra(["slots"]));
    assert!(Type::fit(&mut Cursor::with_reserved("slots", reserved)).is_err());
}

#[test]
fn test_qualified_type_decorations() {
    let ty: QualifiedType = parse_node("const std::string &");
    assert!(ty.is_const);
    assert!(ty.is_reference);
    assert!(!ty.is_pointer);
    assert_eq!(emit(&ty), "const std::string&");

    let ty: QualifiedType = parse_node("Node*");
    assert!(ty.is_pointer);
    assert_eq!(emit(&ty), "Node*");
}

// ---
// Functions
// ---

#[test]
fn test_pure_virtual_declaration() {
    let decl: FuncDeclaration = parse_node("virtual void draw() const = 0;");
    assert!(decl.signature.is_virtual);
    assert!(decl.signature.is_const);
    assert_eq!(decl.tail, DeclarationTail::PureVirtual);
    assert_eq!(emit(&decl), "virtual void draw() const = 0;");
}

#[test]
fn test_defaulted_and_plain_declarations() {
    let decl: FuncDeclaration = parse_node("A() = default;");
    assert_eq!(decl.tail, DeclarationTail::Defaulted);
    assert_eq!(emit(&decl), "A() = default;");

    let decl: FuncDeclaration = parse_node("~A();");
    assert_eq!(decl.tail, DeclarationTail::None);
    assert_eq!(emit(&decl), "~A();");
}

#[test]
fn test_declaration_tail_rejects_other_values() {
    assert!(FuncDeclaration::fit(&mut Cursor::new("void f() = 1;")).is_err());
}

#[test]
fn test_operator_declaration() {
    let decl: FuncDeclaration = parse_node("bool operator==(const A& other) const;");
    let function = Function::Declaration(decl.clone());
    assert!(function.signature().is_const);
    let name = match &decl.signature.callable {
        Callable::Function(plain) => &plain.name,
        other => panic!("expected a plain function, got {other:?}"),
    };
    assert_eq!(name, &FunctionName::Operator("==".to_string()));
    assert_eq!(emit(&decl), "bool operator ==(const A& other) const;");
}

#[test]
fn test_out_of_class_method_keeps_owner() {
    let decl: FuncDeclaration = parse_node("int Counter::next(int step);");
    assert_eq!(emit(&decl), "int Counter::next(int step);");
}

#[test]
fn test_constructor_with_initializer_list() {
    let implementation: FuncImplementation = parse_node("A(int x) : value(x), other() { }");
    assert_eq!(implementation.inits.len(), 2);
    assert!(implementation.body.statements.is_empty());
    assert_eq!(emit(&implementation), "A(int x) : value(x), other() {\n}");
}

// ---
// Statements
// ---

#[test]
fn test_if_else_with_single_statement_branches() {
    let if_else: IfElse = parse_node("if (a) b(); else c();");
    assert!(matches!(if_else.then_branch, BodyOrStatement::Statement(_)));
    assert!(matches!(if_else.else_branch, Some(BodyOrStatement::Statement(_))));
    assert_eq!(emit(&if_else), "if (a) b(); else c();");
}

#[test]
fn test_condition_tracks_nested_parens() {
    let if_else: IfElse = parse_node("if ((a && f(b)) || c) x;");
    let condition = if_else.condition.inner.as_ref().map(|c| c.value.as_str());
    assert_eq!(condition, Some("(a && f(b)) || c"));
    assert_eq!(emit(&if_else), "if ((a && f(b)) || c) x;");
}

#[test]
fn test_for_clauses_are_recoverable() {
    let for_loop: ForLoop = parse_node("for (int i = 0; i < n; i++) { x++; }");
    assert_eq!(for_loop.init.value, "int i = 0;");
    assert_eq!(for_loop.condition.value, "i < n;");
    assert_eq!(for_loop.step.as_ref().map(|s| s.value.as_str()), Some("i++"));
    match &for_loop.body {
        BodyOrStatement::Body(body) => {
            assert_eq!(body.statements.len(), 1);
            assert!(matches!(&body.statements[0], Statement::Expression(e) if e.value == "x++;"));
        }
        other => panic!("expected a braced body, got {other:?}"),
    }
    assert_eq!(emit(&for_loop), "for (int i = 0; i < n; i++) {\n    x++;\n}");
}

#[test]
fn test_for_without_step() {
    let for_loop: ForLoop = parse_node("for (;;) tick();");
    assert!(for_loop.step.is_none());
    assert_eq!(emit(&for_loop), "for (; ;) tick();");
}

#[test]
fn test_expression_statement_never_starts_with_brace() {
    assert!(ExpressionStatement::fit(&mut Cursor::new("} x;")).is_err());
    assert!(ExpressionStatement::fit(&mut Cursor::new("  } x;")).is_err());
}

// ---
// Classes
// ---

#[test]
fn test_unlabeled_members_are_private() {
    let class: Class = parse_node("class A { int x; void f(); public: int y; private: int z; };");
    assert_eq!(class.unlabeled.len(), 2);
    assert_eq!(class.sections.len(), 2);
    assert_eq!(class.members(Visibility::Private).len(), 3);
    assert_eq!(class.members(Visibility::Public).len(), 1);
}

#[test]
fn test_class_needs_closing_semicolon() {
    assert!(Class::fit(&mut Cursor::new("class A { int x; }")).is_err());
}

#[test]
fn test_protected_section_is_not_a_class() {
    assert!(Class::fit(&mut Cursor::new("class A { protected: int x; };")).is_err());
}

// ---
// Top-level driver
// ---

#[test]
fn test_top_level_element_order() {
    assert_eq!(
        kinds("#include <vector>\nint main() { return 0; }\n"),
        ["Include", "Spaces", "Function", "Spaces"]
    );
    assert_eq!(
        kinds("int counter = 0;\nclass A { };"),
        ["Variable", "Spaces", "Class"]
    );
}

#[test]
fn test_stray_braces_fall_back_to_symbols() {
    assert_eq!(kinds("}}"), ["Symbol", "Symbol"]);
    assert_eq!(
        kinds("int main() { return 0; } }"),
        ["Function", "Spaces", "Symbol"]
    );
}

#[test]
fn test_unparseable_text_terminates() {
    assert_eq!(kinds(""), Vec::<&str>::new());
    assert_eq!(kinds("@ ?"), ["Symbol", "Spaces", "Symbol"]);
    assert_eq!(kinds("x"), ["Word"]);
}
