use crate::args::CliArgs;
use crate::config::LoopguardConfig;
use crate::driver::{EXIT_LINT_ERRORS, EXIT_SUCCESS, discover_files, lint_files, run};
use clap::Parser;
use std::path::{Path, PathBuf};

const UNSAFE: &str = "for (var i = 0; i < 3; i++) { setTimeout(() => console.log(i)); }\n";
const SAFE: &str = "for (let i = 0; i < 3; i++) { setTimeout(() => console.log(i)); }\n";

fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("failed to create test dir");
    }
    std::fs::write(&path, contents).expect("failed to write test file");
    path
}

fn args(extra: &[&str]) -> CliArgs {
    let mut argv = vec!["loopguard"];
    argv.extend_from_slice(extra);
    CliArgs::try_parse_from(argv).expect("valid arguments")
}

#[test]
fn discovers_lintable_files_sorted_and_filtered() {
    let dir = tempfile::tempdir().unwrap();
    write_file(dir.path(), "b.ts", SAFE);
    write_file(dir.path(), "a.js", SAFE);
    write_file(dir.path(), "nested/c.mjs", SAFE);
    write_file(dir.path(), "notes.md", "# notes");
    write_file(dir.path(), "node_modules/pkg/index.js", UNSAFE);

    let filter = LoopguardConfig::default().file_filter().unwrap();
    let files = discover_files(&[], dir.path(), &filter).unwrap();
    let names: Vec<_> = files
        .iter()
        .map(|f| f.strip_prefix(dir.path()).unwrap().to_string_lossy().replace('\\', "/"))
        .collect();
    assert_eq!(names, vec!["a.js", "b.ts", "nested/c.mjs"]);
}

#[test]
fn explicit_files_bypass_patterns_and_missing_paths_fail() {
    let dir = tempfile::tempdir().unwrap();
    write_file(dir.path(), "node_modules/pkg/index.js", UNSAFE);
    let filter = LoopguardConfig::default().file_filter().unwrap();

    let files = discover_files(
        &[PathBuf::from("node_modules/pkg/index.js")],
        dir.path(),
        &filter,
    )
    .unwrap();
    assert_eq!(files.len(), 1);

    let err = discover_files(&[PathBuf::from("missing")], dir.path(), &filter).unwrap_err();
    assert!(err.to_string().contains("no such file or directory"));
}

#[test]
fn lint_files_keeps_input_order() {
    let dir = tempfile::tempdir().unwrap();
    let files: Vec<PathBuf> = (0..8)
        .map(|n| {
            let source = if n % 2 == 0 { UNSAFE } else { SAFE };
            write_file(dir.path(), &format!("f{n}.js"), source)
        })
        .collect();

    let reports = lint_files(&files, &LoopguardConfig::default(), dir.path()).unwrap();
    let names: Vec<_> = reports.iter().map(|r| r.display_name.clone()).collect();
    let expected: Vec<_> = (0..8).map(|n| format!("f{n}.js")).collect();
    assert_eq!(names, expected);
    for (n, report) in reports.iter().enumerate() {
        assert_eq!(report.result.findings.len(), usize::from(n % 2 == 0));
    }
}

#[test]
fn run_exits_one_on_errors_and_zero_when_clean() {
    let dir = tempfile::tempdir().unwrap();
    write_file(dir.path(), "bad.js", UNSAFE);
    write_file(dir.path(), "good.js", SAFE);

    let summary = run(&args(&["bad.js"]), dir.path(), false).unwrap();
    assert_eq!(summary.exit_code, EXIT_LINT_ERRORS);
    assert_eq!(summary.error_count, 1);
    assert!(summary.output.contains("bad.js:1:"));
    assert!(summary.output.contains("no-loop-func"));
    assert!(summary.output.contains("'i'"));

    let summary = run(&args(&["good.js"]), dir.path(), false).unwrap();
    assert_eq!(summary.exit_code, EXIT_SUCCESS);
    assert!(summary.output.is_empty());
}

#[test]
fn run_applies_config_severity_and_max_warnings() {
    let dir = tempfile::tempdir().unwrap();
    write_file(dir.path(), "bad.js", UNSAFE);
    write_file(
        dir.path(),
        "loopguard.json",
        r#"{ "rules": { "no-loop-func": "warn" } }"#,
    );

    let summary = run(&args(&[]), dir.path(), false).unwrap();
    assert_eq!(summary.exit_code, EXIT_SUCCESS);
    assert_eq!(summary.warning_count, 1);

    let summary = run(&args(&["--max-warnings", "0"]), dir.path(), false).unwrap();
    assert_eq!(summary.exit_code, EXIT_LINT_ERRORS);

    let summary = run(&args(&["--quiet"]), dir.path(), false).unwrap();
    assert_eq!(summary.warning_count, 0);
    assert!(summary.output.is_empty());
}

#[test]
fn run_reports_invalid_config() {
    let dir = tempfile::tempdir().unwrap();
    write_file(dir.path(), "bad.js", UNSAFE);
    write_file(dir.path(), "custom.json", "{ not json");

    let err = run(&args(&["-c", "custom.json"]), dir.path(), false).unwrap_err();
    assert!(format!("{err:#}").contains("custom.json"));
}

#[test]
fn run_json_output_is_parseable() {
    let dir = tempfile::tempdir().unwrap();
    write_file(dir.path(), "bad.js", UNSAFE);

    let summary = run(&args(&["--format", "json"]), dir.path(), false).unwrap();
    let value: serde_json::Value = serde_json::from_str(&summary.output).unwrap();
    let file = &value[0];
    assert_eq!(file["filePath"], "bad.js");
    assert_eq!(file["errorCount"], 1);
    assert_eq!(file["messages"][0]["ruleId"], "no-loop-func");
    assert_eq!(file["messages"][0]["severity"], 2);
    assert_eq!(file["messages"][0]["line"], 1);
}

#[test]
fn run_print_scopes_dumps_scope_tree() {
    let dir = tempfile::tempdir().unwrap();
    write_file(dir.path(), "bad.js", UNSAFE);

    let summary = run(&args(&["--print-scopes"]), dir.path(), false).unwrap();
    assert_eq!(summary.exit_code, EXIT_SUCCESS);
    let value: serde_json::Value = serde_json::from_str(&summary.output).unwrap();
    assert_eq!(value[0]["file"], "bad.js");
    assert_eq!(value[0]["scopes"]["kind"], "global");
}

#[test]
fn run_respects_global_flag() {
    let dir = tempfile::tempdir().unwrap();
    write_file(
        dir.path(),
        "globals.js",
        "counter = 0; while (counter < 3) { tasks.push(() => counter); counter++; }\n",
    );

    // Undeclared names are never flagged
    let summary = run(&args(&[]), dir.path(), false).unwrap();
    assert_eq!(summary.error_count, 0);

    let summary = run(&args(&["--global", "counter:writable"]), dir.path(), false).unwrap();
    assert_eq!(summary.error_count, 1);
}
