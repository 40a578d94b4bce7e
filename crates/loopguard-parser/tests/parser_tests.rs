//! Tests for statement and declaration parsing.
use loopguard_parser::parser::{FunctionKind, NodeData, VariableKind};
use loopguard_parser::{NodeArena, NodeIndex, ParserState};

fn parse_source(source: &str) -> (ParserState, NodeIndex) {
    let mut parser = ParserState::new("test.ts".to_string(), source.to_string());
    let root = parser.parse_source_file();
    (parser, root)
}

fn statements(arena: &NodeArena, root: NodeIndex) -> Vec<NodeIndex> {
    match arena.data(root) {
        Some(NodeData::SourceFile(block)) => block.statements.clone(),
        other => panic!("expected source file, got {other:?}"),
    }
}

fn find_all(arena: &NodeArena, kind: &str) -> Vec<NodeIndex> {
    arena
        .indices()
        .filter(|&idx| arena.kind_name(idx) == kind)
        .collect()
}

#[test]
fn parse_for_statement_parts() {
    let (parser, root) = parse_source("for (var i = 0; i < 10; i++) { foo(); }");
    let arena = parser.get_arena();
    assert!(parser.get_diagnostics().is_empty());
    let stmts = statements(arena, root);
    let Some(NodeData::For(stmt)) = arena.data(stmts[0]) else {
        panic!("expected for statement");
    };
    let decl = arena.get_variable_declaration(stmt.init).expect("init declaration");
    assert_eq!(decl.kind, VariableKind::Var);
    assert_eq!(arena.kind_name(stmt.test), "BinaryExpression");
    assert_eq!(arena.kind_name(stmt.update), "UpdateExpression");
    assert!(arena.is_loop_head_once(stmts[0], stmt.init));
    assert!(!arena.is_loop_head_once(stmts[0], stmt.update));
}

#[test]
fn parse_for_in_with_in_operator_in_body() {
    let (parser, root) = parse_source("for (const k in obj) { if (k in other) {} }");
    let arena = parser.get_arena();
    assert!(parser.get_diagnostics().is_empty());
    let stmts = statements(arena, root);
    assert_eq!(arena.kind_name(stmts[0]), "ForInStatement");
}

#[test]
fn parse_for_of_with_destructuring_and_await() {
    let (parser, _) = parse_source("async function f() { for await (let [a, b] of xs) {} }");
    let arena = parser.get_arena();
    assert!(parser.get_diagnostics().is_empty());
    let loops = find_all(arena, "ForOfStatement");
    assert_eq!(loops.len(), 1);
    let Some(NodeData::ForOf(stmt)) = arena.data(loops[0]) else {
        unreachable!();
    };
    assert!(stmt.is_await);
    assert!(arena.is_loop_head_once(loops[0], stmt.right));
}

#[test]
fn parse_for_in_expression_head_becomes_pattern() {
    let (parser, root) = parse_source("for ([a, b] of pairs) {}");
    let arena = parser.get_arena();
    assert!(parser.get_diagnostics().is_empty());
    let stmts = statements(arena, root);
    let Some(NodeData::ForOf(stmt)) = arena.data(stmts[0]) else {
        panic!("expected for-of");
    };
    assert_eq!(arena.kind_name(stmt.left), "ArrayPattern");
}

#[test]
fn parse_while_and_do_while() {
    let (parser, root) = parse_source("while (a) b(); do { c(); } while (d)\nnext();");
    let arena = parser.get_arena();
    assert!(parser.get_diagnostics().is_empty());
    let kinds: Vec<_> = statements(arena, root)
        .into_iter()
        .map(|idx| arena.kind_name(idx))
        .collect();
    assert_eq!(
        kinds,
        vec!["WhileStatement", "DoWhileStatement", "ExpressionStatement"]
    );
}

#[test]
fn parse_let_as_identifier_when_not_declaring() {
    let (parser, root) = parse_source("let = 1; let\nx = 2;");
    let arena = parser.get_arena();
    let stmts = statements(arena, root);
    assert_eq!(arena.kind_name(stmts[0]), "ExpressionStatement");
    assert_eq!(arena.kind_name(stmts[1]), "VariableDeclaration");
}

#[test]
fn parse_using_and_await_using_declarations() {
    let (parser, _) =
        parse_source("async function f() { using a = r(); await using b = s(); }");
    let arena = parser.get_arena();
    assert!(parser.get_diagnostics().is_empty());
    let kinds: Vec<_> = find_all(arena, "VariableDeclaration")
        .into_iter()
        .filter_map(|idx| arena.get_variable_declaration(idx).map(|d| d.kind))
        .collect();
    assert_eq!(kinds, vec![VariableKind::Using, VariableKind::AwaitUsing]);
}

#[test]
fn parse_function_kinds() {
    let (parser, _root) = parse_source(
        "function a() {}\nconst b = function named() {};\nconst c = () => 1;\nclass D { constructor() {} m() {} get g() { return 1; } set s(v) {} }\nconst o = { m() {}, async *gen() {} };",
    );
    let arena = parser.get_arena();
    assert!(parser.get_diagnostics().is_empty());
    let kinds: Vec<_> = arena
        .indices()
        .filter_map(|idx| arena.get_function(idx).map(|f| f.kind))
        .collect();
    assert_eq!(
        kinds,
        vec![
            FunctionKind::Declaration,
            FunctionKind::Expression,
            FunctionKind::Arrow,
            FunctionKind::Constructor,
            FunctionKind::Method,
            FunctionKind::Getter,
            FunctionKind::Setter,
            FunctionKind::Method,
            FunctionKind::Method,
        ]
    );
}

#[test]
fn parse_class_members_and_static_block() {
    let (parser, root) = parse_source(
        "class Holder extends Base<T> implements I {\n  static count = 0;\n  #secret?: string;\n  [key: string]: unknown;\n  static {\n    const v = 1;\n  }\n}\nconst ok = 1;",
    );
    let arena = parser.get_arena();
    assert!(parser.get_diagnostics().is_empty());
    assert_eq!(statements(arena, root).len(), 2);
    assert_eq!(find_all(arena, "StaticBlock").len(), 1);
    assert_eq!(find_all(arena, "PropertyDefinition").len(), 2);
    assert_eq!(find_all(arena, "TSIndexSignature").len(), 1);
}

#[test]
fn parse_parameters_with_defaults_rest_and_modifiers() {
    let (parser, _root) = parse_source(
        "class P { constructor(private readonly a: number, b = 2, ...rest: string[]) {} }",
    );
    let arena = parser.get_arena();
    assert!(parser.get_diagnostics().is_empty());
    let names: Vec<_> = find_all(arena, "Parameter")
        .into_iter()
        .flat_map(|param| arena.pattern_identifiers(param))
        .filter_map(|id| arena.identifier_text(id))
        .collect();
    assert_eq!(names, vec!["a", "b", "rest"]);
}

#[test]
fn parse_imports_and_exports() {
    let (parser, root) = parse_source(
        "import def, { a as b, type C } from \"m\";\nimport * as ns from 'n';\nexport { b, def as other };\nexport default function () {}\nexport * from \"x\";",
    );
    let arena = parser.get_arena();
    assert!(parser.get_diagnostics().is_empty());
    assert_eq!(statements(arena, root).len(), 5);
    assert_eq!(find_all(arena, "ImportSpecifier").len(), 4);
    // Local export names refer to bindings
    let local_refs: Vec<_> = find_all(arena, "ExportSpecifier")
        .into_iter()
        .filter_map(|spec| match arena.data(spec) {
            Some(NodeData::ExportSpecifier(data)) => Some(data.local),
            _ => None,
        })
        .filter(|&local| matches!(arena.data(local), Some(NodeData::Identifier(_))))
        .collect();
    assert_eq!(local_refs.len(), 2);
}

#[test]
fn parse_typescript_declarations() {
    let (parser, root) = parse_source(
        "type MyType = number;\ninterface Processor<T> { process(item: T): void; }\nenum Color { Red, Green = 2 }\ndeclare const env: string;\nnamespace NS { export const x = 1; }",
    );
    let arena = parser.get_arena();
    assert!(parser.get_diagnostics().is_empty());
    let kinds: Vec<_> = statements(arena, root)
        .into_iter()
        .map(|idx| arena.kind_name(idx))
        .collect();
    assert_eq!(
        kinds,
        vec![
            "TSTypeAliasDeclaration",
            "TSInterfaceDeclaration",
            "TSEnumDeclaration",
            "VariableDeclaration",
            "BlockStatement",
        ]
    );
}

#[test]
fn parse_regex_and_division() {
    let (parser, _root) = parse_source("const r = /a[/]b/g; const d = x / y / z;");
    let arena = parser.get_arena();
    assert!(parser.get_diagnostics().is_empty());
    assert_eq!(find_all(arena, "Literal").len(), 1);
    assert_eq!(find_all(arena, "BinaryExpression").len(), 2);
}

#[test]
fn parse_asi_restricted_return() {
    let (parser, _root) = parse_source("function f() { return\n1; }");
    let arena = parser.get_arena();
    let returns = find_all(arena, "ReturnStatement");
    let Some(NodeData::Return(argument)) = arena.data(returns[0]) else {
        unreachable!();
    };
    assert!(argument.is_none());
}

#[test]
fn parse_parent_links_and_spans() {
    let source = "while (x) { (function () { i; })(); }";
    let (parser, root) = parse_source(source);
    let arena = parser.get_arena();
    let func = find_all(arena, "FunctionExpression")[0];
    let span = arena.span(func).expect("span");
    assert_eq!(span.text(source), "function () { i; }");
    let ancestors: Vec<_> = arena
        .ancestors(func)
        .map(|idx| arena.kind_name(idx))
        .collect();
    assert_eq!(
        ancestors,
        vec![
            "CallExpression",
            "ExpressionStatement",
            "BlockStatement",
            "WhileStatement",
            "Program",
        ]
    );
    assert_eq!(arena.parent(root), NodeIndex::NONE);
}

#[test]
fn parse_recovers_from_malformed_statement() {
    let (parser, root) = parse_source("const x = 1\nconst y = ;\nconst z = 3;");
    let arena = parser.get_arena();
    assert!(statements(arena, root).len() >= 2);
    assert!(!parser.get_diagnostics().is_empty());
    let diagnostics = parser.to_diagnostics();
    assert_eq!(diagnostics[0].file, "test.ts");
}

#[test]
fn parse_stray_close_brace_reports_and_continues() {
    let (parser, root) = parse_source("}\nconst ok = 1;");
    let arena = parser.get_arena();
    assert_eq!(statements(arena, root).len(), 1);
    assert_eq!(parser.get_diagnostics().len(), 1);
}
