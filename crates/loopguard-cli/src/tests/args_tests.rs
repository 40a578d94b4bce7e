use crate::args::{CliArgs, OutputFormat};
use clap::Parser;
use std::path::PathBuf;

#[test]
fn defaults_to_text_output_and_no_paths() {
    let args = CliArgs::try_parse_from(["loopguard"]).unwrap();
    assert!(args.paths.is_empty());
    assert_eq!(args.format, OutputFormat::Text);
    assert!(!args.quiet);
    assert!(!args.print_scopes);
    assert_eq!(args.max_warnings, None);
}

#[test]
fn parses_flags_and_repeated_globals() {
    let args = CliArgs::try_parse_from([
        "loopguard",
        "src",
        "lib/a.js",
        "--format",
        "json",
        "--no-color",
        "--max-warnings",
        "3",
        "--global",
        "MyType",
        "--global",
        "counter:writable",
        "-c",
        "conf/loopguard.json",
    ])
    .unwrap();
    assert_eq!(args.paths, vec![PathBuf::from("src"), PathBuf::from("lib/a.js")]);
    assert_eq!(args.format, OutputFormat::Json);
    assert!(args.no_color);
    assert_eq!(args.max_warnings, Some(3));
    assert_eq!(args.globals, vec!["MyType".to_string(), "counter:writable".to_string()]);
    assert_eq!(args.config, Some(PathBuf::from("conf/loopguard.json")));
}

#[test]
fn rejects_unknown_format() {
    assert!(CliArgs::try_parse_from(["loopguard", "--format", "xml"]).is_err());
}
