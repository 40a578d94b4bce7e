//! loopguard finds closures created inside JavaScript and TypeScript loops
//! that capture a binding whose value changes between iterations.
//!
//! The work is split across the workspace crates, re-exported here:
//!
//! - [`common`] - spans, line maps and diagnostics
//! - [`parser`] - arena AST and recovering parser
//! - [`binder`] - scope graph and reference resolution
//! - [`lint`] - the `no-loop-func` rule
//!
//! ```
//! use loopguard::lint::{LintOptions, lint_source};
//!
//! let source = "for (var i = 0; i < 3; i++) { later(() => i); }";
//! let result = lint_source("a.js", source, &LintOptions::default());
//! assert_eq!(result.findings.len(), 1);
//! assert_eq!(result.findings[0].variable_names, ["i"]);
//! ```

pub use loopguard_binder as binder;
pub use loopguard_common as common;
pub use loopguard_lint as lint;
pub use loopguard_parser as parser;

pub use loopguard_lint::{LintOptions, LintResult, LoopFuncFinding, RuleSeverity, lint_source};
