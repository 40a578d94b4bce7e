//! Parse, bind and check one file.

use crate::options::LintOptions;
use crate::report::LoopFuncFinding;
use crate::state::NoLoopFuncState;
use loopguard_binder::{BinderOptions, BinderState, ScopeTreeDump};
use loopguard_common::Diagnostic;
use loopguard_parser::ParserState;
use tracing::debug_span;

/// Outcome of linting one file.
#[derive(Clone, Debug, Default)]
pub struct LintResult {
    /// Syntax errors and rule findings, ordered by start offset
    pub diagnostics: Vec<Diagnostic>,
    /// Rule findings with their captured names; empty when the rule is off
    pub findings: Vec<LoopFuncFinding>,
}

impl LintResult {
    pub fn error_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.is_error()).count()
    }

    pub fn warning_count(&self) -> usize {
        self.diagnostics.len() - self.error_count()
    }
}

/// Lint `source`. Syntax errors do not stop the rule: the parser always
/// produces a tree and the rule checks whatever it could recover.
pub fn lint_source(file_name: &str, source: &str, options: &LintOptions) -> LintResult {
    let _span = debug_span!("lint_source", file = %file_name).entered();

    let mut parser = ParserState::new(file_name.to_string(), source.to_string());
    let root = parser.parse_source_file();
    let mut diagnostics = parser.to_diagnostics();

    let Some(category) = options.no_loop_func.category() else {
        return LintResult {
            diagnostics,
            findings: Vec::new(),
        };
    };

    let arena = parser.get_arena();
    let mut binder = BinderState::new(options.binder.clone());
    binder.bind_source_file(arena, root);

    let findings = NoLoopFuncState::new(arena, &binder).check_file();
    diagnostics.extend(
        findings
            .iter()
            .map(|finding| finding.to_diagnostic(file_name, category)),
    );
    diagnostics.sort_by_key(|d| d.start);

    LintResult {
        diagnostics,
        findings,
    }
}

/// Scope graph of `source`, for `--print-scopes`.
pub fn dump_scopes(file_name: &str, source: &str, options: &BinderOptions) -> Option<ScopeTreeDump> {
    let mut parser = ParserState::new(file_name.to_string(), source.to_string());
    let root = parser.parse_source_file();
    let arena = parser.get_arena();
    let mut binder = BinderState::new(options.clone());
    binder.bind_source_file(arena, root);
    binder.scope_tree(arena)
}
