//! Tests for scope construction and reference resolution.
use loopguard_binder::{
    BinderOptions, BinderState, DeclarationKind, GlobalAccess, Reference, ReferenceFlags,
    ScopeKind, SourceType,
};
use loopguard_parser::{NodeArena, NodeIndex, ParserState};

fn bind_with(source: &str, options: BinderOptions) -> (ParserState, BinderState) {
    let mut parser = ParserState::new("test.ts".to_string(), source.to_string());
    let root = parser.parse_source_file();
    assert!(
        parser.get_diagnostics().is_empty(),
        "unexpected parse errors: {:?}",
        parser.get_diagnostics()
    );
    let mut binder = BinderState::new(options);
    binder.bind_source_file(parser.get_arena(), root);
    (parser, binder)
}

fn bind(source: &str) -> (ParserState, BinderState) {
    bind_with(source, BinderOptions::default())
}

fn references_named<'a>(binder: &'a BinderState, name: &str) -> Vec<&'a Reference> {
    binder.references.iter().filter(|r| r.name == name).collect()
}

fn first_node(arena: &NodeArena, kind: &str) -> NodeIndex {
    arena
        .indices()
        .find(|&idx| arena.kind_name(idx) == kind)
        .unwrap_or_else(|| panic!("no {kind} node"))
}

fn scope_kinds(binder: &BinderState) -> Vec<ScopeKind> {
    binder.scopes.iter().map(|scope| scope.kind).collect()
}

fn through_names(binder: &BinderState, node: NodeIndex) -> Vec<String> {
    let scope = binder.node_scope(node).expect("scope of node");
    binder
        .through(scope)
        .iter()
        .filter_map(|&r| binder.reference(r))
        .map(|r| r.name.clone())
        .collect()
}

#[test]
fn test_for_let_head_scope_and_references() {
    let (parser, binder) = bind("for (let i = 0; i < n; i++) { f(() => i); }");
    let arena = parser.get_arena();
    assert_eq!(
        scope_kinds(&binder),
        vec![
            ScopeKind::Global,
            ScopeKind::Module,
            ScopeKind::For,
            ScopeKind::Block,
            ScopeKind::Function,
        ]
    );

    let for_node = first_node(arena, "ForStatement");
    let for_scope = binder.node_scope(for_node).unwrap();
    let i = binder.scope(for_scope).unwrap().get("i").expect("i declared in for scope");
    let binding = binder.binding(i).unwrap();
    assert_eq!(binding.kind(), DeclarationKind::Let);
    assert_eq!(binding.owning_loop, for_node);

    let flags: Vec<_> = binder
        .references_of(i)
        .iter()
        .map(|&r| binder.reference(r).unwrap().flags)
        .collect();
    assert_eq!(
        flags,
        vec![
            ReferenceFlags::WRITE | ReferenceFlags::INIT,
            ReferenceFlags::READ,
            ReferenceFlags::READ_WRITE,
            ReferenceFlags::READ,
        ]
    );

    let arrow = first_node(arena, "ArrowFunctionExpression");
    assert_eq!(through_names(&binder, arrow), vec!["i"]);
}

#[test]
fn test_var_hoists_to_function_scope() {
    let (parser, binder) = bind("function outer() { if (x) { var v = 1; } return v; }");
    let arena = parser.get_arena();
    let func = first_node(arena, "FunctionDeclaration");
    let func_scope = binder.node_scope(func).unwrap();
    let v = binder.scope(func_scope).unwrap().get("v").expect("v hoisted");
    assert_eq!(binder.binding(v).unwrap().kind(), DeclarationKind::Var);
    assert_eq!(binder.references_of(v).len(), 2);

    let x = references_named(&binder, "x");
    assert_eq!(x.len(), 1);
    assert!(x[0].resolved.is_none());
    assert_eq!(through_names(&binder, func), vec!["x"]);
}

#[test]
fn test_named_function_expression_references_its_own_name() {
    let (parser, binder) =
        bind("const arr = []; while (c) { (function f() { arr.push(f); c; })(); }");
    let arena = parser.get_arena();
    let func = first_node(arena, "FunctionExpression");
    let func_scope = binder.node_scope(func).unwrap();
    assert_eq!(binder.scope(func_scope).unwrap().kind, ScopeKind::Function);
    let name_scope = binder.scope(func_scope).unwrap().parent;
    assert_eq!(
        binder.scope(name_scope).unwrap().kind,
        ScopeKind::FunctionExpressionName
    );

    assert_eq!(through_names(&binder, func), vec!["arr", "f", "c"]);
    let f_ref = references_named(&binder, "f")[0];
    let f_binding = binder.binding(f_ref.resolved.unwrap()).unwrap();
    assert_eq!(f_binding.kind(), DeclarationKind::FunctionExpressionName);
}

#[test]
fn test_parameter_defaults_do_not_see_body_declarations() {
    let (_parser, binder) = bind("function g(a = b, c = a) { var b; }");
    let b = references_named(&binder, "b");
    assert_eq!(b.len(), 1);
    assert!(b[0].resolved.is_none());

    let a = references_named(&binder, "a");
    assert_eq!(a.len(), 2);
    assert_eq!(a[0].flags, ReferenceFlags::WRITE | ReferenceFlags::INIT);
    assert!(a[1].is_read());
    let param = binder.binding(a[1].resolved.unwrap()).unwrap();
    assert_eq!(param.kind(), DeclarationKind::Parameter);
}

#[test]
fn test_type_references_resolve_in_type_namespace() {
    let (_parser, binder) = bind(
        "type T = number;\ninterface I { x: T }\nlet v: T = 1;\nlet w: typeof v;\nfunction h(p: I): T { return p as any; }\ntype Only = 1;\nOnly;",
    );
    let t_refs = references_named(&binder, "T");
    assert_eq!(t_refs.len(), 3);
    for reference in &t_refs {
        assert!(reference.is_type_reference());
        let binding = binder.binding(reference.resolved.unwrap()).unwrap();
        assert_eq!(binding.kind(), DeclarationKind::TypeAlias);
    }

    // `typeof v` reads the value
    let v_refs = references_named(&binder, "v");
    let query = v_refs.iter().find(|r| !r.is_write()).unwrap();
    assert!(!query.is_type_reference());
    assert!(query.resolved.is_some());

    let only = references_named(&binder, "Only");
    assert_eq!(only.len(), 1);
    assert!(only[0].resolved.is_none());
}

#[test]
fn test_signature_parameters_are_not_bindings() {
    let (_parser, binder) = bind("type Processor<T> = (item: T) => void;\nitem;");
    assert!(binder.bindings.iter().all(|b| b.name != "item"));
    assert!(references_named(&binder, "item")[0].resolved.is_none());
}

#[test]
fn test_configured_globals_resolve() {
    let mut options = BinderOptions::default();
    options
        .globals
        .insert("MyType".to_string(), GlobalAccess::Readonly);
    options.globals.insert("Hidden".to_string(), GlobalAccess::Off);
    let (_parser, binder) = bind_with("let a: MyType; MyType; Hidden;", options);

    let refs = references_named(&binder, "MyType");
    assert_eq!(refs.len(), 2);
    for reference in refs {
        let binding = binder.binding(reference.resolved.unwrap()).unwrap();
        assert_eq!(binding.kind(), DeclarationKind::ImplicitGlobal);
        assert_eq!(binding.scope, binder.global_scope());
        assert!(!binding.writable);
    }
    assert!(references_named(&binder, "Hidden")[0].resolved.is_none());
}

#[test]
fn test_script_source_has_no_module_scope() {
    let options = BinderOptions {
        source_type: SourceType::Script,
        ..BinderOptions::default()
    };
    let (_parser, binder) = bind_with("var s = 1; s;", options);
    assert_eq!(scope_kinds(&binder), vec![ScopeKind::Global]);
    let s = binder.scope(binder.global_scope()).unwrap().get("s").unwrap();
    assert_eq!(binder.references_of(s).len(), 2);
}

#[test]
fn test_class_scopes() {
    let (parser, binder) =
        bind("class K { static count = 0; field = () => this; static { var z = 1; } }");
    let arena = parser.get_arena();
    assert_eq!(
        scope_kinds(&binder),
        vec![
            ScopeKind::Global,
            ScopeKind::Module,
            ScopeKind::Class,
            ScopeKind::ClassFieldInitializer,
            ScopeKind::ClassFieldInitializer,
            ScopeKind::Function,
            ScopeKind::ClassStaticBlock,
        ]
    );
    let arrow = first_node(arena, "ArrowFunctionExpression");
    let arrow_scope = binder.node_scope(arrow).unwrap();
    assert_eq!(binder.scope(arrow_scope).unwrap().kind, ScopeKind::Function);

    let static_block = first_node(arena, "StaticBlock");
    let block_scope = binder.node_scope(static_block).unwrap();
    assert!(binder.scope(block_scope).unwrap().get("z").is_some());
    assert_eq!(binder.variable_scope_of(block_scope), block_scope);

    // Declared both outside and inside the class
    let k_count = binder.bindings.iter().filter(|b| b.name == "K").count();
    assert_eq!(k_count, 2);
}

#[test]
fn test_assignment_targets() {
    let (_parser, binder) = bind("let a, b, o; [a, { b = 1 }] = o; a += 1; o.p = a;");
    let flags = |name: &str| -> Vec<ReferenceFlags> {
        references_named(&binder, name)
            .iter()
            .map(|r| r.flags)
            .collect()
    };
    assert_eq!(
        flags("a"),
        vec![
            ReferenceFlags::WRITE,
            ReferenceFlags::READ_WRITE,
            ReferenceFlags::READ
        ]
    );
    assert_eq!(flags("b"), vec![ReferenceFlags::WRITE, ReferenceFlags::WRITE]);
    assert_eq!(flags("o"), vec![ReferenceFlags::READ, ReferenceFlags::READ]);
}

#[test]
fn test_for_of_var_destructuring_head() {
    let (parser, binder) = bind("for (var [k, v] of entries) { k; }");
    let arena = parser.get_arena();
    assert_eq!(
        scope_kinds(&binder),
        vec![ScopeKind::Global, ScopeKind::Module, ScopeKind::Block]
    );
    let k_refs = references_named(&binder, "k");
    assert_eq!(k_refs.len(), 2);
    assert!(k_refs[0].is_write() && k_refs[0].is_init());
    let k = binder.binding(k_refs[0].resolved.unwrap()).unwrap();
    assert_eq!(k.owning_loop, first_node(arena, "ForOfStatement"));
}

#[test]
fn test_catch_and_switch_scopes() {
    let (_parser, binder) =
        bind("try { } catch ({ message }) { message; }\nswitch (x) { case 1: let y = 2; }");
    assert_eq!(
        scope_kinds(&binder),
        vec![
            ScopeKind::Global,
            ScopeKind::Module,
            ScopeKind::Block,
            ScopeKind::Catch,
            ScopeKind::Block,
            ScopeKind::Switch,
        ]
    );
    let message = references_named(&binder, "message")[0];
    let binding = binder.binding(message.resolved.unwrap()).unwrap();
    assert_eq!(binding.kind(), DeclarationKind::CatchParameter);
    let switch_scope = binder
        .scopes
        .iter()
        .find(|s| s.kind == ScopeKind::Switch)
        .unwrap();
    assert!(switch_scope.get("y").is_some());
}

#[test]
fn test_implicit_arguments() {
    let (_parser, binder) = bind("function f() { return () => arguments; }");
    let reference = references_named(&binder, "arguments")[0];
    let binding = binder.binding(reference.resolved.unwrap()).unwrap();
    assert_eq!(binding.kind(), DeclarationKind::ImplicitArguments);
}

#[test]
fn test_find_enclosing_scope() {
    let (parser, binder) = bind("for (let i of xs) { use(i); }");
    let arena = parser.get_arena();
    let call = first_node(arena, "CallExpression");
    let scope = binder.find_enclosing_scope(arena, call).unwrap();
    let scope_data = binder.scope(scope).unwrap();
    assert_eq!(scope_data.kind, ScopeKind::Block);
    assert_eq!(
        binder.scope(scope_data.parent).unwrap().kind,
        ScopeKind::For
    );
    let module = binder.scope(binder.global_scope()).unwrap().children[0];
    assert_eq!(binder.variable_scope_of(scope), module);
}

#[test]
fn test_scope_tree_dump() {
    let (parser, binder) = bind("let a = 1; function f() { a = 2; }");
    let dump = binder.scope_tree(parser.get_arena()).unwrap();
    let json = serde_json::to_value(&dump).unwrap();
    assert_eq!(json["kind"], "global");
    assert_eq!(json["children"][0]["kind"], "module");
    let variables = json["children"][0]["variables"].as_array().unwrap();
    assert_eq!(variables[0]["name"], "a");
    assert_eq!(variables[0]["kind"], "let");
    assert_eq!(variables[0]["writes"], 2);
    assert_eq!(json["children"][0]["children"][0]["through"][0], "a");
}
