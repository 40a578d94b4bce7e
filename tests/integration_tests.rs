//! End-to-end tests through the `loopguard` facade: parse, bind and check
//! whole snippets, then look at the diagnostics a user would see.

use loopguard::binder::{BinderOptions, BinderState};
use loopguard::common::{DiagnosticCategory, LineMap};
use loopguard::lint::{NoLoopFuncState, RULE_NAME, dump_scopes};
use loopguard::parser::ParserState;
use loopguard::{LintOptions, LintResult, RuleSeverity, lint_source};

fn lint(source: &str) -> LintResult {
    lint_source("test.js", source, &LintOptions::default())
}

fn flagged_names(source: &str) -> Vec<Vec<String>> {
    lint(source)
        .findings
        .into_iter()
        .map(|finding| finding.variable_names)
        .collect()
}

// =============================================================================
// Reference scenarios
// =============================================================================

#[test]
fn test_var_counter_captured_by_function_expression() {
    let source = "for (var i=0; i<l; i++) { (function() { i; }) }";
    let result = lint(source);

    assert_eq!(result.findings.len(), 1);
    let finding = &result.findings[0];
    assert_eq!(finding.node_kind, "FunctionExpression");
    assert_eq!(finding.variable_names, ["i"]);
    assert_eq!(&source[finding.pos as usize..finding.end as usize], "function() { i; }");

    assert_eq!(result.diagnostics.len(), 1);
    let diagnostic = &result.diagnostics[0];
    assert_eq!(diagnostic.rule, Some(RULE_NAME));
    assert_eq!(diagnostic.category, DiagnosticCategory::Error);
    assert_eq!(
        diagnostic.message_text,
        "Function declared in a loop contains unsafe references to variable(s) 'i'."
    );
}

#[test]
fn test_let_counter_is_fresh_per_iteration() {
    assert!(flagged_names("for (let i=0; i<l; i++) { (function() { i; }) }").is_empty());
}

#[test]
fn test_true_iife_is_exempt() {
    assert!(flagged_names("for (var i=0; i<l; i++) { (function(){ i; })() }").is_empty());
}

#[test]
fn test_async_iife_is_flagged_without_await() {
    assert_eq!(
        flagged_names("for (var i=0; i<l; i++) { (async function(){ i; })() }"),
        vec![vec!["i".to_string()]]
    );
}

#[test]
fn test_self_leaking_iife_is_flagged() {
    let source = "for (var i=0; i<5; i++) { (function fun(){ if(arr.includes(fun)) return i; arr.push(fun); })() }";
    assert_eq!(flagged_names(source), vec![vec!["i".to_string()]]);
}

#[test]
fn test_unmodified_outer_let_is_safe() {
    assert!(flagged_names("let a=0; for (let i=0;i<l;i++) { (function(){ a; }); }").is_empty());
}

// =============================================================================
// Properties across loop kinds
// =============================================================================

const LOOP_HEADS: &[(&str, &str)] = &[
    ("for (;;) {", "}"),
    ("for (const k in obj) {", "}"),
    ("for (const k of list) {", "}"),
    ("while (more()) {", "}"),
    ("do {", "} while (more());"),
];

#[test]
fn test_binding_mutated_after_loop_is_flagged_in_every_loop_kind() {
    for keyword in ["var", "let"] {
        for (open, close) in LOOP_HEADS {
            let source = format!("{keyword} x = 0; {open} later(() => x); {close} x = 1;");
            assert_eq!(
                flagged_names(&source),
                vec![vec!["x".to_string()]],
                "expected a finding for {source:?}"
            );
        }
    }
}

#[test]
fn test_constant_capture_is_never_flagged() {
    for (open, close) in LOOP_HEADS {
        let source = format!("const x = 0; {open} later(() => x); {close}");
        assert!(flagged_names(&source).is_empty(), "unexpected finding for {source:?}");
    }
}

#[test]
fn test_each_iife_condition_is_required() {
    let exempt = "for (var i = 0; i < n; i++) { (function () { return i; })(); }";
    assert!(flagged_names(exempt).is_empty());

    let variants = [
        // suspending
        "for (var i = 0; i < n; i++) { (async function () { return i; })(); }",
        "for (var i = 0; i < n; i++) { (function* () { yield i; })(); }",
        // stored instead of called
        "for (var i = 0; i < n; i++) { const f = function () { return i; }; f(); }",
        // leaks its own identity
        "for (var i = 0; i < n; i++) { (function g() { keep(g); return i; })(); }",
    ];
    for source in variants {
        assert_eq!(flagged_names(source).len(), 1, "expected a finding for {source:?}");
    }
}

#[test]
fn test_non_qualifying_level_breaks_iife_chain() {
    let exempt = "for (var i = 0; i < n; i++) { (() => (() => (() => i)())())(); }";
    assert!(flagged_names(exempt).is_empty());

    // The middle arrow is passed to `run` instead of being called
    let broken = "for (var i = 0; i < n; i++) { (() => run(() => (() => i)()))(); }";
    let result = lint(broken);
    assert_eq!(result.findings.len(), 1);
    assert_eq!(result.findings[0].node_kind, "ArrowFunctionExpression");
    assert_eq!(
        &broken[result.findings[0].pos as usize..result.findings[0].end as usize],
        "() => (() => i)()"
    );
}

#[test]
fn test_escape_states_are_queryable_per_closure() {
    let source = "for (var i = 0; i < n; i++) { (function () { i; })(); keep(function () { i; }); }";
    let mut parser = ParserState::new("test.js".to_string(), source.to_string());
    let root = parser.parse_source_file();
    let arena = parser.get_arena();
    let mut binder = BinderState::new(BinderOptions::default());
    binder.bind_source_file(arena, root);

    let mut state = NoLoopFuncState::new(arena, &binder);
    let mut closures: Vec<_> = arena
        .indices()
        .filter(|&idx| arena.kind_name(idx) == "FunctionExpression")
        .collect();
    closures.sort_by_key(|&idx| arena.get(idx).map(|node| node.pos));

    let states: Vec<bool> = closures.iter().map(|&c| state.is_exempt(c)).collect();
    assert_eq!(states, [true, false]);
    assert_eq!(state.check_file().len(), 1);
}

// =============================================================================
// Diagnostics
// =============================================================================

#[test]
fn test_findings_and_syntax_errors_share_one_ordered_list() {
    let source = "for (var i = 0; i < n; i++) {\n  later(() => i);\n}\nlet = ;\n";
    let result = lint(source);
    assert_eq!(result.findings.len(), 1);
    assert!(result.diagnostics.len() >= 2);
    assert_eq!(result.diagnostics[0].rule, Some(RULE_NAME));
    assert!(result.diagnostics[1..].iter().all(|d| d.rule.is_none()));

    let map = LineMap::build(source);
    assert_eq!(map.line_and_column(result.diagnostics[0].start, source), (2, 9));
}

#[test]
fn test_rule_severity_controls_category() {
    let source = "while (x) { later(() => x); x--; } var x;";
    let warn = lint_source(
        "test.js",
        source,
        &LintOptions {
            no_loop_func: RuleSeverity::Warn,
            ..LintOptions::default()
        },
    );
    assert_eq!(warn.warning_count(), 1);
    assert_eq!(warn.error_count(), 0);

    let off = lint_source(
        "test.js",
        source,
        &LintOptions {
            no_loop_func: RuleSeverity::Off,
            ..LintOptions::default()
        },
    );
    assert!(off.diagnostics.is_empty());
    assert!(off.findings.is_empty());
}

// =============================================================================
// Serialised output
// =============================================================================

#[test]
fn test_finding_serialises_with_camel_case_fields() {
    let source = "for (var i = 0; i < n; i++) { later(() => i); }";
    let result = lint(source);
    let value = serde_json::to_value(&result.findings).unwrap();

    let finding = &value[0];
    assert_eq!(finding["nodeKind"], "ArrowFunctionExpression");
    assert_eq!(finding["messageId"], "unsafeRefs");
    assert_eq!(finding["variableNames"], serde_json::json!(["i"]));
    assert_eq!(finding["pos"], 36);
    assert_eq!(finding["end"], 43);
    assert!(finding["node"].is_u64());
}

#[test]
fn test_scope_dump_serialises_as_nested_tree() {
    let source = "for (let i = 0; i < n; i++) { later(() => i); }";
    let dump = dump_scopes("test.js", source, &BinderOptions::default()).unwrap();
    let value = serde_json::to_value(&dump).unwrap();

    assert_eq!(value["kind"], "global");
    let module = &value["children"][0];
    assert_eq!(module["kind"], "module");
    assert_eq!(module["through"], serde_json::json!(["n", "later"]));

    let for_scope = &module["children"][0];
    assert_eq!(for_scope["kind"], "for");
    assert_eq!(for_scope["variables"][0]["name"], "i");
    assert_eq!(for_scope["variables"][0]["writes"], 2);
}
