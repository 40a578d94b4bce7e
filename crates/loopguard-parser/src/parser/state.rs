//! Parser state: token cursor, diagnostics and speculative parsing.
//!
//! `ParserState` is a recursive-descent parser over the `ScannerState` token
//! stream. Statement, expression and type parsing live in the `state_*`
//! modules as further `impl ParserState` blocks.

use super::node::{NodeData, NodeIndex};
use super::node_arena::NodeArena;
use loopguard_common::limits::MAX_PARSE_DEPTH;
use loopguard_common::{Diagnostic, diagnostic_codes, format_message, get_message_template};
use loopguard_scanner::{ScannerState, SyntaxKind};
use tracing::{debug, trace};

/// Inside a function body (not at module top level)
pub(crate) const CONTEXT_FLAG_IN_FUNCTION: u32 = 1 << 0;
/// Inside an async function body: `await` is an operator
pub(crate) const CONTEXT_FLAG_ASYNC: u32 = 1 << 1;
/// Inside a generator body: `yield` is an operator
pub(crate) const CONTEXT_FLAG_GENERATOR: u32 = 1 << 2;
/// `in` is not a binary operator (for-statement initializers)
pub(crate) const CONTEXT_FLAG_DISALLOW_IN: u32 = 1 << 3;
/// Parsing the `extends` clause of a conditional type
pub(crate) const CONTEXT_FLAG_DISALLOW_CONDITIONAL_TYPES: u32 = 1 << 4;

/// A syntax error found while parsing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseDiagnostic {
    pub start: u32,
    pub length: u32,
    pub message: String,
    pub code: u32,
}

/// Recursive-descent parser for one source file.
pub struct ParserState {
    pub(crate) scanner: ScannerState,
    pub(crate) arena: NodeArena,
    pub(crate) file_name: String,
    pub(crate) current_token: SyntaxKind,
    pub(crate) context_flags: u32,
    pub(crate) parse_diagnostics: Vec<ParseDiagnostic>,
    pub(crate) recursion_depth: u32,
    /// End of the most recently consumed token
    pub(crate) prev_token_end: u32,
    /// Errors reported so far, including ones suppressed as duplicates
    pub(crate) error_count: u32,
}

impl ParserState {
    pub fn new(file_name: String, source_text: String) -> ParserState {
        let capacity = source_text.len() / 4;
        ParserState {
            scanner: ScannerState::new(source_text),
            arena: NodeArena::with_capacity(capacity),
            file_name,
            current_token: SyntaxKind::Unknown,
            context_flags: 0,
            parse_diagnostics: Vec::new(),
            recursion_depth: 0,
            prev_token_end: 0,
            error_count: 0,
        }
    }

    /// Parse the whole file and link parent pointers. Always returns a
    /// `Program` node; syntax errors are collected as diagnostics.
    pub fn parse_source_file(&mut self) -> NodeIndex {
        let _span = tracing::debug_span!("parse_source_file", file = %self.file_name).entered();
        self.next_token();
        let statements = self.parse_statement_list_until_eof();
        let end = self.scanner.text().len() as u32;
        let root = self
            .arena
            .add(0, end, NodeData::SourceFile(super::node::BlockData { statements }));
        self.arena.link_parents(root);

        for err in self.scanner.take_errors() {
            self.parse_diagnostics.push(ParseDiagnostic {
                start: err.start,
                length: err.length,
                message: err.message,
                code: err.code,
            });
        }
        self.parse_diagnostics.sort_by_key(|d| d.start);
        self.parse_diagnostics.dedup_by_key(|d| d.start);

        debug!(
            nodes = self.arena.len(),
            diagnostics = self.parse_diagnostics.len(),
            "parsed source file"
        );
        root
    }

    pub fn get_arena(&self) -> &NodeArena {
        &self.arena
    }

    pub fn into_arena(self) -> NodeArena {
        self.arena
    }

    pub fn get_diagnostics(&self) -> &[ParseDiagnostic] {
        &self.parse_diagnostics
    }

    pub fn source_text(&self) -> &str {
        self.scanner.text()
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Syntax errors as common diagnostics.
    pub fn to_diagnostics(&self) -> Vec<Diagnostic> {
        self.parse_diagnostics
            .iter()
            .map(|d| {
                Diagnostic::error(
                    self.file_name.clone(),
                    d.start,
                    d.length,
                    d.message.clone(),
                    d.code,
                )
            })
            .collect()
    }

    // =========================================================================
    // Token cursor
    // =========================================================================

    #[inline]
    pub(crate) fn token(&self) -> SyntaxKind {
        self.current_token
    }

    #[inline]
    pub(crate) fn is_token(&self, kind: SyntaxKind) -> bool {
        self.current_token == kind
    }

    #[inline]
    pub(crate) fn token_pos(&self) -> u32 {
        self.scanner.token_pos()
    }

    #[inline]
    pub(crate) fn token_end(&self) -> u32 {
        self.scanner.token_end()
    }

    pub(crate) fn token_value(&self) -> String {
        self.scanner.token_value().to_string()
    }

    pub(crate) fn next_token(&mut self) -> SyntaxKind {
        self.prev_token_end = self.scanner.token_end();
        self.current_token = self.scanner.scan();
        self.current_token
    }

    pub(crate) fn has_preceding_line_break(&self) -> bool {
        self.scanner.has_preceding_line_break()
    }

    /// Identifier, or a contextual keyword usable as one.
    pub(crate) fn is_identifier(&self) -> bool {
        self.current_token == SyntaxKind::Identifier || self.current_token.is_contextual_keyword()
    }

    pub(crate) fn is_identifier_or_keyword(&self) -> bool {
        self.current_token.is_identifier_or_keyword()
    }

    /// Identifier token whose text is `text` (for soft words like `is`).
    pub(crate) fn is_identifier_text(&self, text: &str) -> bool {
        self.is_identifier() && self.scanner.token_value() == text
    }

    /// Consume `kind` or report `'x' expected.`
    pub(crate) fn parse_expected(&mut self, kind: SyntaxKind) -> bool {
        if self.is_token(kind) {
            self.next_token();
            true
        } else {
            self.error_token_expected(kind.text());
            false
        }
    }

    pub(crate) fn parse_optional(&mut self, kind: SyntaxKind) -> bool {
        if self.is_token(kind) {
            self.next_token();
            true
        } else {
            false
        }
    }

    /// ASI: a statement may end at `;`, before `}`, at end of file, or at a
    /// line break.
    pub(crate) fn can_parse_semicolon(&self) -> bool {
        self.is_token(SyntaxKind::SemicolonToken)
            || self.is_token(SyntaxKind::CloseBraceToken)
            || self.is_token(SyntaxKind::EndOfFileToken)
            || self.has_preceding_line_break()
    }

    pub(crate) fn parse_semicolon(&mut self) {
        if self.parse_optional(SyntaxKind::SemicolonToken) {
            return;
        }
        if !self.can_parse_semicolon() {
            self.error_token_expected(";");
        }
    }

    // =========================================================================
    // Context flags
    // =========================================================================

    #[inline]
    pub(crate) fn in_context(&self, flag: u32) -> bool {
        self.context_flags & flag != 0
    }

    /// Run `f` with `flags` as the context, restoring the previous context.
    pub(crate) fn with_context<T>(&mut self, flags: u32, f: impl FnOnce(&mut Self) -> T) -> T {
        let saved = self.context_flags;
        self.context_flags = flags;
        let result = f(self);
        self.context_flags = saved;
        result
    }

    /// Run `f` with `in` allowed as a binary operator.
    pub(crate) fn allow_in<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        let flags = self.context_flags & !CONTEXT_FLAG_DISALLOW_IN;
        self.with_context(flags, f)
    }

    pub(crate) fn disallow_in<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        let flags = self.context_flags | CONTEXT_FLAG_DISALLOW_IN;
        self.with_context(flags, f)
    }

    /// `await` is an operator in async functions and at module top level.
    pub(crate) fn await_is_operator(&self) -> bool {
        self.in_context(CONTEXT_FLAG_ASYNC) || !self.in_context(CONTEXT_FLAG_IN_FUNCTION)
    }

    // =========================================================================
    // Recursion guard
    // =========================================================================

    /// Enter one level of nesting. Returns false (after reporting) when the
    /// input is nested too deeply to parse.
    pub(crate) fn enter_recursion(&mut self) -> bool {
        if self.recursion_depth >= MAX_PARSE_DEPTH {
            if self.recursion_depth == MAX_PARSE_DEPTH {
                self.error_at_current_token(diagnostic_codes::EXPRESSION_EXPECTED, &[]);
            }
            self.recursion_depth += 1;
            return false;
        }
        self.recursion_depth += 1;
        true
    }

    pub(crate) fn exit_recursion(&mut self) {
        self.recursion_depth = self.recursion_depth.saturating_sub(1);
    }

    // =========================================================================
    // Look-ahead and speculative parsing
    // =========================================================================

    /// Evaluate `f` and rewind the token stream afterwards.
    pub(crate) fn look_ahead<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        let snapshot = self.scanner.save_state();
        let current = self.current_token;
        let prev_end = self.prev_token_end;
        let result = f(self);
        self.scanner.restore_state(snapshot);
        self.current_token = current;
        self.prev_token_end = prev_end;
        result
    }

    /// Look ahead one token: is it `kind` (on any line)?
    pub(crate) fn next_token_is(&mut self, kind: SyntaxKind) -> bool {
        self.look_ahead(|p| p.next_token() == kind)
    }

    /// Look ahead one token: does it satisfy `pred` and sit on the same line?
    pub(crate) fn next_token_on_same_line(&mut self, pred: impl FnOnce(&Self) -> bool) -> bool {
        self.look_ahead(|p| {
            p.next_token();
            !p.has_preceding_line_break() && pred(p)
        })
    }

    /// Run `f` speculatively. When it returns `None` or reports a syntax
    /// error, every token, node and diagnostic it produced is discarded.
    pub(crate) fn try_parse<T>(&mut self, f: impl FnOnce(&mut Self) -> Option<T>) -> Option<T> {
        let snapshot = self.scanner.save_state();
        let current = self.current_token;
        let prev_end = self.prev_token_end;
        let arena_len = self.arena.len();
        let diag_len = self.parse_diagnostics.len();
        let error_count = self.error_count;
        let flags = self.context_flags;
        let depth = self.recursion_depth;

        let result = f(self);
        if result.is_some() && self.error_count == error_count {
            return result;
        }

        trace!(pos = self.token_pos(), "speculative parse rewound");
        self.scanner.restore_state(snapshot);
        self.current_token = current;
        self.prev_token_end = prev_end;
        self.arena.truncate(arena_len);
        self.parse_diagnostics.truncate(diag_len);
        self.error_count = error_count;
        self.context_flags = flags;
        self.recursion_depth = depth;
        None
    }

    // =========================================================================
    // Node construction
    // =========================================================================

    /// Add a node spanning from `pos` to the end of the last consumed token.
    pub(crate) fn finish_node(&mut self, pos: u32, data: NodeData) -> NodeIndex {
        let end = self.prev_token_end.max(pos);
        self.arena.add(pos, end, data)
    }

    /// Consume the current identifier-like token as an `Identifier` node.
    pub(crate) fn parse_identifier_node(&mut self) -> NodeIndex {
        if !self.is_identifier() {
            self.error_at_current_token(diagnostic_codes::IDENTIFIER_EXPECTED, &[]);
            return NodeIndex::NONE;
        }
        let pos = self.token_pos();
        let name = self.token_value();
        self.next_token();
        self.finish_node(pos, NodeData::Identifier(name))
    }

    /// Consume any identifier or keyword as a non-reference `PropertyName`.
    pub(crate) fn parse_property_name_node(&mut self) -> NodeIndex {
        if !self.is_identifier_or_keyword() {
            self.error_at_current_token(diagnostic_codes::IDENTIFIER_EXPECTED, &[]);
            return NodeIndex::NONE;
        }
        let pos = self.token_pos();
        let name = self.token_value();
        self.next_token();
        self.finish_node(pos, NodeData::PropertyName(name))
    }

    // =========================================================================
    // Diagnostics
    // =========================================================================

    pub(crate) fn error_at(&mut self, start: u32, length: u32, code: u32, args: &[&str]) {
        self.error_count += 1;
        // One error per position keeps cascades readable
        if self
            .parse_diagnostics
            .last()
            .is_some_and(|last| last.start == start)
        {
            return;
        }
        let template = get_message_template(code).unwrap_or("Unexpected token.");
        let message = format_message(template, args);
        trace!(start, code, %message, "parse error");
        self.parse_diagnostics.push(ParseDiagnostic {
            start,
            length,
            message,
            code,
        });
    }

    pub(crate) fn error_at_current_token(&mut self, code: u32, args: &[&str]) {
        let start = self.token_pos();
        let length = self.token_end().saturating_sub(start);
        self.error_at(start, length, code, args);
    }

    pub(crate) fn error_token_expected(&mut self, token: &str) {
        self.error_at_current_token(diagnostic_codes::TOKEN_EXPECTED, &[token]);
    }

    pub(crate) fn error_expression_expected(&mut self) {
        self.error_at_current_token(diagnostic_codes::EXPRESSION_EXPECTED, &[]);
    }
}
