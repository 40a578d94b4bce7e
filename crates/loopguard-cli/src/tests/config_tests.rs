use crate::config::{LoopguardConfig, find_config, load_config, parse_config};
use loopguard_binder::{GlobalAccess, SourceType};
use loopguard_lint::RuleSeverity;
use std::path::Path;

#[test]
fn parses_rules_globals_and_patterns() {
    let config = parse_config(
        r#"{
            "include": ["src/**/*.js"],
            "exclude": ["src/vendor/**"],
            "rules": { "no-loop-func": "warn" },
            "globals": { "MyType": "readonly", "counter": true, "legacy": "off" },
            "sourceType": "script"
        }"#,
    )
    .unwrap();
    assert_eq!(config.rules.no_loop_func, RuleSeverity::Warn);
    assert_eq!(config.globals["MyType"], GlobalAccess::Readonly);
    assert_eq!(config.globals["counter"], GlobalAccess::Writable);
    assert_eq!(config.globals["legacy"], GlobalAccess::Off);
    assert_eq!(config.source_type, Some(SourceType::Script));

    let filter = config.file_filter().unwrap();
    assert!(filter.is_included(Path::new("src/app/main.js")));
    assert!(!filter.is_included(Path::new("src/vendor/lib.js")));
    assert!(!filter.is_included(Path::new("test/main.js")));
}

#[test]
fn numeric_severity_and_defaults() {
    let config = parse_config(r#"{ "rules": { "no-loop-func": 0 } }"#).unwrap();
    assert_eq!(config.rules.no_loop_func, RuleSeverity::Off);

    let config = parse_config("{}").unwrap();
    assert_eq!(config.rules.no_loop_func, RuleSeverity::Error);
    let filter = config.file_filter().unwrap();
    assert!(filter.is_included(Path::new("a.ts")));
    assert!(filter.is_included(Path::new("deep/dir/b.cjs")));
    assert!(!filter.is_included(Path::new("node_modules/pkg/index.js")));
    assert!(!filter.is_included(Path::new("README.md")));
}

#[test]
fn rejects_unknown_keys_and_bad_severity() {
    assert!(parse_config(r#"{ "rulez": {} }"#).is_err());
    let err = parse_config(r#"{ "rules": { "no-loop-func": "loud" } }"#).unwrap_err();
    assert!(format!("{err:#}").contains("not a valid severity"));
}

#[test]
fn source_type_follows_extension_unless_configured() {
    let config = LoopguardConfig::default();
    assert_eq!(
        config.lint_options(Path::new("a.cjs")).binder.source_type,
        SourceType::Script
    );
    assert_eq!(
        config.lint_options(Path::new("a.mjs")).binder.source_type,
        SourceType::Module
    );

    let config = LoopguardConfig {
        source_type: Some(SourceType::Script),
        ..LoopguardConfig::default()
    };
    assert_eq!(
        config.lint_options(Path::new("a.ts")).binder.source_type,
        SourceType::Script
    );
}

#[test]
fn global_flags_override_config() {
    let mut config = LoopguardConfig::default();
    config.globals.insert("a".to_string(), GlobalAccess::Writable);
    config
        .apply_global_flags(&["a".to_string(), "b:writable".to_string(), "c:off".to_string()])
        .unwrap();
    assert_eq!(config.globals["a"], GlobalAccess::Readonly);
    assert_eq!(config.globals["b"], GlobalAccess::Writable);
    assert_eq!(config.globals["c"], GlobalAccess::Off);

    assert!(config.apply_global_flags(&["d:sometimes".to_string()]).is_err());
    assert!(config.apply_global_flags(&[":writable".to_string()]).is_err());
}

#[test]
fn finds_config_in_ancestor_directory() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("a").join("b");
    std::fs::create_dir_all(&nested).unwrap();
    let config_path = dir.path().join("loopguard.json");
    std::fs::write(&config_path, r#"{ "rules": { "no-loop-func": "warn" } }"#).unwrap();

    assert_eq!(find_config(&nested), Some(config_path.clone()));
    let config = load_config(&config_path).unwrap();
    assert_eq!(config.rules.no_loop_func, RuleSeverity::Warn);
}

#[test]
fn load_config_reports_path_on_failure() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.json");
    let err = load_config(&missing).unwrap_err();
    assert!(format!("{err:#}").contains("nope.json"));
}
