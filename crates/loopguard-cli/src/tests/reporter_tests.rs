use crate::driver::FileReport;
use crate::reporter::{Reporter, render_json};
use loopguard_lint::{LintOptions, RuleSeverity, lint_source};
use std::path::PathBuf;

fn report(name: &str, source: &str, severity: RuleSeverity) -> FileReport {
    let options = LintOptions {
        no_loop_func: severity,
        ..LintOptions::default()
    };
    FileReport {
        path: PathBuf::from(name),
        display_name: name.to_string(),
        source: source.to_string(),
        result: lint_source(name, source, &options),
    }
}

#[test]
fn text_output_has_location_rule_and_snippet() {
    let source = "let x;\nfor (var i = 0; i < n; i++) { f(() => i); }\n";
    let files = vec![report("src/a.js", source, RuleSeverity::Error)];
    let output = Reporter::new(false).render(&files);

    assert!(output.starts_with("src/a.js:2:33 - error no-loop-func: Function declared in a loop"));
    assert!(output.contains("    2   for (var i = 0; i < n; i++) { f(() => i); }"));
    assert!(output.contains("~~~~~~~"));
    assert!(output.ends_with("Found 1 problem (1 error, 0 warnings).\n"));
}

#[test]
fn syntax_errors_show_typescript_codes() {
    let files = vec![report("b.ts", "let = ;\n", RuleSeverity::Error)];
    let output = Reporter::new(false).render(&files);
    assert!(output.contains("b.ts:1:"));
    assert!(output.contains("error TS"));
}

#[test]
fn warnings_use_warning_label() {
    let source = "for (var i = 0; i < n; i++) { f(() => i); }";
    let files = vec![report("a.js", source, RuleSeverity::Warn)];
    let output = Reporter::new(false).render(&files);
    assert!(output.contains(" - warning no-loop-func: "));
    assert!(output.contains("Found 1 problem (0 errors, 1 warning)."));
}

#[test]
fn clean_files_render_nothing() {
    let files = vec![report("a.js", "for (const x of xs) { f(() => x); }", RuleSeverity::Error)];
    assert_eq!(Reporter::new(false).render(&files), "");
    let json = render_json(&files).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value[0]["messages"].as_array().map(Vec::len), Some(0));
}

#[test]
fn json_positions_are_one_based() {
    let source = "\n\nwhile (x) { g(function () { return y; }); y++; }\nvar y;";
    let files = vec![report("c.js", source, RuleSeverity::Error)];
    let value: serde_json::Value = serde_json::from_str(&render_json(&files).unwrap()).unwrap();
    let message = &value[0]["messages"][0];
    assert_eq!(message["line"], 3);
    assert_eq!(message["column"], 15);
    assert_eq!(message["endLine"], 3);
    assert!(message.get("code").is_none());
}
