//! The `no-loop-func` rule.
//!
//! A closure created inside a loop body may run after the loop has moved on.
//! If it captures a binding whose value can change between iterations, every
//! closure sees the last value instead of the one current when it was made.
//! This crate finds those closures:
//! - `loops` - the loop that repeatedly evaluates a node
//! - `classify` - whether a captured binding is stable across iterations
//! - `escape` - immediately invoked closures that cannot outlive an iteration
//! - `report` - one finding per offending closure
//!
//! [`lint_source`] runs the whole pipeline (parse, bind, check) on one file.

pub mod state;
pub use state::NoLoopFuncState;

mod check;
mod classify;
mod loops;

pub mod escape;
pub use escape::EscapeState;

pub mod report;
pub use report::{LoopFuncFinding, MessageId, RULE_NAME};

pub mod options;
pub use options::{LintOptions, RuleSeverity};

pub mod pipeline;
pub use pipeline::{LintResult, dump_scopes, lint_source};
