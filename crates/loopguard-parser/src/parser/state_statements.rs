//! Parser state - statement and declaration parsing methods

use super::node::*;
use super::state::{
    CONTEXT_FLAG_ASYNC, CONTEXT_FLAG_DISALLOW_IN, CONTEXT_FLAG_GENERATOR, CONTEXT_FLAG_IN_FUNCTION,
    ParserState,
};
use loopguard_common::diagnostic_codes;
use loopguard_scanner::SyntaxKind;

impl ParserState {
    // =========================================================================
    // Statement lists
    // =========================================================================

    pub(crate) fn parse_statement_list_until_eof(&mut self) -> NodeList {
        let mut statements = Vec::new();
        while !self.is_token(SyntaxKind::EndOfFileToken) {
            if self.is_token(SyntaxKind::CloseBraceToken) {
                // Stray closing brace at top level
                self.error_at_current_token(diagnostic_codes::DECLARATION_OR_STATEMENT_EXPECTED, &[]);
                self.next_token();
                continue;
            }
            self.parse_statement_into(&mut statements);
        }
        statements
    }

    /// Statements up to (not including) the closing `}`.
    pub(crate) fn parse_block_statements(&mut self) -> NodeList {
        let mut statements = Vec::new();
        while !self.is_token(SyntaxKind::CloseBraceToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            self.parse_statement_into(&mut statements);
        }
        statements
    }

    /// Parse one statement, always making progress.
    fn parse_statement_into(&mut self, statements: &mut NodeList) {
        let start = self.token_pos();
        let statement = self.parse_statement();
        if statement.is_some() {
            statements.push(statement);
        }
        if self.token_pos() == start && !self.is_token(SyntaxKind::EndOfFileToken) {
            self.next_token();
        }
    }

    pub(crate) fn parse_block(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        self.parse_expected(SyntaxKind::OpenBraceToken);
        let statements = self.allow_in(|p| p.parse_block_statements());
        self.parse_expected(SyntaxKind::CloseBraceToken);
        self.finish_node(pos, NodeData::Block(BlockData { statements }))
    }

    // =========================================================================
    // Statements
    // =========================================================================

    pub(crate) fn parse_statement(&mut self) -> NodeIndex {
        if !self.enter_recursion() {
            return NodeIndex::NONE;
        }
        let result = self.parse_statement_worker();
        self.exit_recursion();
        result
    }

    fn parse_statement_worker(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        match self.token() {
            SyntaxKind::OpenBraceToken => self.parse_block(),
            SyntaxKind::SemicolonToken => {
                self.next_token();
                self.finish_node(pos, NodeData::Empty)
            }
            SyntaxKind::AtToken => {
                self.skip_decorators();
                self.parse_statement_worker()
            }
            SyntaxKind::VarKeyword => self.parse_variable_statement(),
            SyntaxKind::ConstKeyword => {
                if self.next_token_is(SyntaxKind::EnumKeyword) {
                    self.next_token();
                    self.parse_enum_declaration(pos, true)
                } else {
                    self.parse_variable_statement()
                }
            }
            SyntaxKind::LetKeyword if self.is_let_declaration() => self.parse_variable_statement(),
            SyntaxKind::UsingKeyword if self.is_using_declaration() => {
                self.parse_variable_statement()
            }
            SyntaxKind::AwaitKeyword if self.is_await_using_declaration() => {
                self.parse_variable_statement()
            }
            SyntaxKind::FunctionKeyword => {
                self.parse_function_declaration(pos, false, false)
            }
            SyntaxKind::AsyncKeyword
                if self.next_token_on_same_line(|p| p.is_token(SyntaxKind::FunctionKeyword)) =>
            {
                self.next_token();
                self.parse_function_declaration(pos, true, false)
            }
            SyntaxKind::ClassKeyword => self.parse_class(pos, true, false),
            SyntaxKind::AbstractKeyword
                if self.next_token_on_same_line(|p| p.is_token(SyntaxKind::ClassKeyword)) =>
            {
                self.next_token();
                self.parse_class(pos, true, false)
            }
            SyntaxKind::IfKeyword => self.parse_if_statement(),
            SyntaxKind::ForKeyword => self.parse_for_statement(),
            SyntaxKind::WhileKeyword => self.parse_while_statement(),
            SyntaxKind::DoKeyword => self.parse_do_statement(),
            SyntaxKind::ReturnKeyword => self.parse_return_or_throw(true),
            SyntaxKind::ThrowKeyword => self.parse_return_or_throw(false),
            SyntaxKind::BreakKeyword => self.parse_break_or_continue(true),
            SyntaxKind::ContinueKeyword => self.parse_break_or_continue(false),
            SyntaxKind::SwitchKeyword => self.parse_switch_statement(),
            SyntaxKind::TryKeyword => self.parse_try_statement(),
            SyntaxKind::DebuggerKeyword => {
                self.next_token();
                self.parse_semicolon();
                self.finish_node(pos, NodeData::Debugger)
            }
            SyntaxKind::WithKeyword => self.parse_with_statement(),
            SyntaxKind::ImportKeyword
                if !self.look_ahead(|p| {
                    matches!(
                        p.next_token(),
                        SyntaxKind::OpenParenToken | SyntaxKind::DotToken
                    )
                }) =>
            {
                self.parse_import_declaration()
            }
            SyntaxKind::ExportKeyword => self.parse_export_declaration(),
            SyntaxKind::TypeKeyword if self.next_token_on_same_line(|p| p.is_identifier()) => {
                self.parse_type_alias_declaration()
            }
            SyntaxKind::InterfaceKeyword
                if self.next_token_on_same_line(|p| p.is_identifier()) =>
            {
                self.parse_interface_declaration()
            }
            SyntaxKind::EnumKeyword if self.next_token_on_same_line(|p| p.is_identifier()) => {
                self.parse_enum_declaration(pos, false)
            }
            SyntaxKind::DeclareKeyword if self.next_token_on_same_line(|p| p.is_declaration_start()) => {
                self.next_token();
                self.parse_statement_worker()
            }
            _ if self.is_namespace_declaration() => self.parse_namespace_declaration(),
            _ if self.is_identifier() && self.next_token_is(SyntaxKind::ColonToken) => {
                self.parse_labeled_statement()
            }
            _ => self.parse_expression_statement(),
        }
    }

    /// Keywords that can follow `declare`.
    fn is_declaration_start(&self) -> bool {
        matches!(
            self.token(),
            SyntaxKind::VarKeyword
                | SyntaxKind::LetKeyword
                | SyntaxKind::ConstKeyword
                | SyntaxKind::FunctionKeyword
                | SyntaxKind::ClassKeyword
                | SyntaxKind::AbstractKeyword
                | SyntaxKind::EnumKeyword
                | SyntaxKind::InterfaceKeyword
                | SyntaxKind::TypeKeyword
                | SyntaxKind::AsyncKeyword
        ) || self.is_identifier_text("namespace")
            || self.is_identifier_text("module")
            || self.is_identifier_text("global")
    }

    /// `let` starts a declaration when followed by a binding name or pattern.
    fn is_let_declaration(&mut self) -> bool {
        self.look_ahead(|p| {
            p.next_token();
            p.is_identifier()
                || p.is_token(SyntaxKind::OpenBracketToken)
                || p.is_token(SyntaxKind::OpenBraceToken)
        })
    }

    /// `using x` on one line (and not `using of`).
    pub(crate) fn is_using_declaration(&mut self) -> bool {
        self.next_token_on_same_line(|p| p.is_identifier() && !p.is_token(SyntaxKind::OfKeyword))
    }

    /// `await using x` on one line.
    pub(crate) fn is_await_using_declaration(&mut self) -> bool {
        self.look_ahead(|p| {
            if p.next_token() != SyntaxKind::UsingKeyword || p.has_preceding_line_break() {
                return false;
            }
            p.next_token();
            !p.has_preceding_line_break() && p.is_identifier()
        })
    }

    fn is_namespace_declaration(&mut self) -> bool {
        if !(self.is_identifier_text("namespace")
            || self.is_identifier_text("module")
            || self.is_identifier_text("global"))
        {
            return false;
        }
        self.look_ahead(|p| {
            p.next_token();
            if p.has_preceding_line_break() {
                return false;
            }
            if p.is_token(SyntaxKind::OpenBraceToken) {
                return true;
            }
            if !(p.is_identifier() || p.is_token(SyntaxKind::StringLiteral)) {
                return false;
            }
            // Dotted names: `namespace A.B.C {`
            loop {
                p.next_token();
                if !p.is_token(SyntaxKind::DotToken) {
                    break;
                }
                p.next_token();
            }
            p.is_token(SyntaxKind::OpenBraceToken)
        })
    }

    /// `namespace N { ... }` / `declare module "m" { ... }` / `declare global { ... }`
    /// The body is kept as a block; the name is not bound.
    fn parse_namespace_declaration(&mut self) -> NodeIndex {
        self.next_token();
        while !self.is_token(SyntaxKind::OpenBraceToken) && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            self.next_token();
        }
        self.parse_block()
    }

    fn skip_decorators(&mut self) {
        while self.parse_optional(SyntaxKind::AtToken) {
            self.parse_left_hand_side_expression();
        }
    }

    fn parse_variable_statement(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        let data = self.allow_in(|p| p.parse_variable_declaration_data());
        self.parse_semicolon();
        self.finish_node(pos, NodeData::VariableDeclaration(data))
    }

    /// Parse `var|let|const|using|await using` and its declarator list.
    pub(crate) fn parse_variable_declaration_data(&mut self) -> VariableDeclarationData {
        let kind = match self.token() {
            SyntaxKind::LetKeyword => VariableKind::Let,
            SyntaxKind::ConstKeyword => VariableKind::Const,
            SyntaxKind::UsingKeyword => VariableKind::Using,
            SyntaxKind::AwaitKeyword => {
                self.next_token();
                VariableKind::AwaitUsing
            }
            _ => VariableKind::Var,
        };
        self.next_token();

        let mut declarations = Vec::new();
        loop {
            let pos = self.token_pos();
            let id = self.parse_binding_target();
            if id.is_none() {
                break;
            }
            // Definite assignment assertion: `let x!: T`
            self.parse_optional(SyntaxKind::ExclamationToken);
            let type_annotation = self.parse_type_annotation();
            let init = if self.parse_optional(SyntaxKind::EqualsToken) {
                self.parse_assignment_expression()
            } else {
                NodeIndex::NONE
            };
            declarations.push(self.finish_node(
                pos,
                NodeData::VariableDeclarator(VariableDeclaratorData {
                    id,
                    type_annotation,
                    init,
                }),
            ));
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }
        VariableDeclarationData { kind, declarations }
    }

    fn parse_if_statement(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        self.next_token();
        self.parse_expected(SyntaxKind::OpenParenToken);
        let test = self.allow_in(|p| p.parse_expression());
        self.parse_expected(SyntaxKind::CloseParenToken);
        let consequent = self.parse_statement();
        let alternate = if self.parse_optional(SyntaxKind::ElseKeyword) {
            self.parse_statement()
        } else {
            NodeIndex::NONE
        };
        self.finish_node(
            pos,
            NodeData::If(IfData {
                test,
                consequent,
                alternate,
            }),
        )
    }

    /// `for (;;)`, `for (x in y)`, `for (x of y)` and `for await (x of y)`.
    fn parse_for_statement(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        self.next_token();
        let is_await = self.parse_optional(SyntaxKind::AwaitKeyword);
        self.parse_expected(SyntaxKind::OpenParenToken);

        let init = if self.is_token(SyntaxKind::SemicolonToken) {
            NodeIndex::NONE
        } else if self.is_for_declaration_start() {
            let decl_pos = self.token_pos();
            let data = self.disallow_in(|p| p.parse_variable_declaration_data());
            self.finish_node(decl_pos, NodeData::VariableDeclaration(data))
        } else {
            self.disallow_in(|p| p.parse_expression())
        };

        if self.is_token(SyntaxKind::InKeyword) || self.is_token(SyntaxKind::OfKeyword) {
            let is_in = self.is_token(SyntaxKind::InKeyword);
            self.next_token();
            if self.arena.get_variable_declaration(init).is_none() {
                self.reinterpret_as_pattern(init);
            }
            let right = if is_in {
                self.allow_in(|p| p.parse_expression())
            } else {
                self.allow_in(|p| p.parse_assignment_expression())
            };
            self.parse_expected(SyntaxKind::CloseParenToken);
            let body = self.parse_statement();
            let data = ForInOfData {
                left: init,
                right,
                body,
                is_await,
            };
            return self.finish_node(
                pos,
                if is_in {
                    NodeData::ForIn(data)
                } else {
                    NodeData::ForOf(data)
                },
            );
        }

        self.parse_expected(SyntaxKind::SemicolonToken);
        let test = if self.is_token(SyntaxKind::SemicolonToken) {
            NodeIndex::NONE
        } else {
            self.allow_in(|p| p.parse_expression())
        };
        self.parse_expected(SyntaxKind::SemicolonToken);
        let update = if self.is_token(SyntaxKind::CloseParenToken) {
            NodeIndex::NONE
        } else {
            self.allow_in(|p| p.parse_expression())
        };
        self.parse_expected(SyntaxKind::CloseParenToken);
        let body = self.parse_statement();
        self.finish_node(
            pos,
            NodeData::For(ForData {
                init,
                test,
                update,
                body,
            }),
        )
    }

    fn is_for_declaration_start(&mut self) -> bool {
        match self.token() {
            SyntaxKind::VarKeyword | SyntaxKind::ConstKeyword => true,
            SyntaxKind::LetKeyword => self.is_let_declaration(),
            SyntaxKind::UsingKeyword => self.is_using_declaration(),
            SyntaxKind::AwaitKeyword => self.is_await_using_declaration(),
            _ => false,
        }
    }

    fn parse_while_statement(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        self.next_token();
        self.parse_expected(SyntaxKind::OpenParenToken);
        let test = self.allow_in(|p| p.parse_expression());
        self.parse_expected(SyntaxKind::CloseParenToken);
        let body = self.parse_statement();
        self.finish_node(pos, NodeData::While(WhileData { test, body }))
    }

    fn parse_do_statement(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        self.next_token();
        let body = self.parse_statement();
        self.parse_expected(SyntaxKind::WhileKeyword);
        self.parse_expected(SyntaxKind::OpenParenToken);
        let test = self.allow_in(|p| p.parse_expression());
        self.parse_expected(SyntaxKind::CloseParenToken);
        // The semicolon after do-while is always optional
        self.parse_optional(SyntaxKind::SemicolonToken);
        self.finish_node(pos, NodeData::DoWhile(WhileData { test, body }))
    }

    fn parse_return_or_throw(&mut self, is_return: bool) -> NodeIndex {
        let pos = self.token_pos();
        self.next_token();
        let argument = if is_return && self.can_parse_semicolon() {
            NodeIndex::NONE
        } else {
            self.allow_in(|p| p.parse_expression())
        };
        self.parse_semicolon();
        self.finish_node(
            pos,
            if is_return {
                NodeData::Return(argument)
            } else {
                NodeData::Throw(argument)
            },
        )
    }

    fn parse_break_or_continue(&mut self, is_break: bool) -> NodeIndex {
        let pos = self.token_pos();
        self.next_token();
        let label = if self.is_identifier() && !self.has_preceding_line_break() {
            self.parse_property_name_node()
        } else {
            NodeIndex::NONE
        };
        self.parse_semicolon();
        self.finish_node(
            pos,
            if is_break {
                NodeData::Break(label)
            } else {
                NodeData::Continue(label)
            },
        )
    }

    fn parse_switch_statement(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        self.next_token();
        self.parse_expected(SyntaxKind::OpenParenToken);
        let discriminant = self.allow_in(|p| p.parse_expression());
        self.parse_expected(SyntaxKind::CloseParenToken);
        self.parse_expected(SyntaxKind::OpenBraceToken);

        let mut cases = Vec::new();
        while !self.is_token(SyntaxKind::CloseBraceToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            let case_pos = self.token_pos();
            let test = if self.parse_optional(SyntaxKind::CaseKeyword) {
                self.allow_in(|p| p.parse_expression())
            } else if self.parse_optional(SyntaxKind::DefaultKeyword) {
                NodeIndex::NONE
            } else {
                self.error_token_expected("case");
                self.next_token();
                continue;
            };
            self.parse_expected(SyntaxKind::ColonToken);
            let mut consequent = Vec::new();
            while !matches!(
                self.token(),
                SyntaxKind::CaseKeyword
                    | SyntaxKind::DefaultKeyword
                    | SyntaxKind::CloseBraceToken
                    | SyntaxKind::EndOfFileToken
            ) {
                self.parse_statement_into(&mut consequent);
            }
            cases.push(self.finish_node(
                case_pos,
                NodeData::SwitchCase(SwitchCaseData { test, consequent }),
            ));
        }
        self.parse_expected(SyntaxKind::CloseBraceToken);
        self.finish_node(
            pos,
            NodeData::Switch(SwitchData {
                discriminant,
                cases,
            }),
        )
    }

    fn parse_try_statement(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        self.next_token();
        let block = self.parse_block();

        let handler = if self.is_token(SyntaxKind::CatchKeyword) {
            let catch_pos = self.token_pos();
            self.next_token();
            let mut param = NodeIndex::NONE;
            let mut type_annotation = NodeIndex::NONE;
            if self.parse_optional(SyntaxKind::OpenParenToken) {
                param = self.parse_binding_target();
                type_annotation = self.parse_type_annotation();
                self.parse_expected(SyntaxKind::CloseParenToken);
            }
            let body = self.parse_block();
            self.finish_node(
                catch_pos,
                NodeData::CatchClause(CatchClauseData {
                    param,
                    type_annotation,
                    body,
                }),
            )
        } else {
            NodeIndex::NONE
        };

        let finalizer = if self.parse_optional(SyntaxKind::FinallyKeyword) {
            self.parse_block()
        } else {
            NodeIndex::NONE
        };

        if handler.is_none() && finalizer.is_none() {
            self.error_token_expected("catch");
        }
        self.finish_node(
            pos,
            NodeData::Try(TryData {
                block,
                handler,
                finalizer,
            }),
        )
    }

    fn parse_with_statement(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        self.next_token();
        self.parse_expected(SyntaxKind::OpenParenToken);
        let object = self.allow_in(|p| p.parse_expression());
        self.parse_expected(SyntaxKind::CloseParenToken);
        let body = self.parse_statement();
        self.finish_node(pos, NodeData::With { object, body })
    }

    fn parse_labeled_statement(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        let label = self.parse_property_name_node();
        self.parse_expected(SyntaxKind::ColonToken);
        let body = self.parse_statement();
        self.finish_node(pos, NodeData::Labeled { label, body })
    }

    fn parse_expression_statement(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        let expression = self.allow_in(|p| p.parse_expression());
        if expression.is_none() {
            self.error_at_current_token(diagnostic_codes::DECLARATION_OR_STATEMENT_EXPECTED, &[]);
            return NodeIndex::NONE;
        }
        self.parse_semicolon();
        self.finish_node(pos, NodeData::ExpressionStatement(expression))
    }

    // =========================================================================
    // Functions
    // =========================================================================

    /// `function [*] name (...) {...}` after any `async` has been consumed.
    /// The name is optional for `export default function`.
    pub(crate) fn parse_function_declaration(
        &mut self,
        pos: u32,
        is_async: bool,
        name_optional: bool,
    ) -> NodeIndex {
        self.parse_expected(SyntaxKind::FunctionKeyword);
        let is_generator = self.parse_optional(SyntaxKind::AsteriskToken);
        let name = if self.is_identifier() {
            self.parse_identifier_node()
        } else {
            if !name_optional {
                self.error_at_current_token(diagnostic_codes::IDENTIFIER_EXPECTED, &[]);
            }
            NodeIndex::NONE
        };
        let caps = FunctionCapabilities {
            is_arrow: false,
            is_generator,
            is_async,
        };
        let data = self.parse_function_rest(FunctionKind::Declaration, caps, name);
        let node = self.finish_node(pos, NodeData::FunctionLike(data));
        if self.arena.get_function(node).is_some_and(|f| f.body.is_none()) {
            // Overload signature or ambient declaration
            self.parse_semicolon();
        }
        node
    }

    /// Type parameters, parameters, return type and body of a function-like
    /// node, parsed in the function's own context.
    pub(crate) fn parse_function_rest(
        &mut self,
        kind: FunctionKind,
        caps: FunctionCapabilities,
        name: NodeIndex,
    ) -> FunctionData {
        let mut flags = CONTEXT_FLAG_IN_FUNCTION;
        if caps.is_async {
            flags |= CONTEXT_FLAG_ASYNC;
        }
        if caps.is_generator {
            flags |= CONTEXT_FLAG_GENERATOR;
        }
        self.with_context(flags, |p| {
            let type_parameters = p.parse_type_parameters_opt();
            let params = p.parse_parameter_list();
            let return_type = p.parse_return_type_annotation();
            let body = if p.is_token(SyntaxKind::OpenBraceToken) {
                p.parse_block()
            } else {
                NodeIndex::NONE
            };
            FunctionData {
                kind,
                caps,
                name,
                type_parameters,
                params,
                return_type,
                body,
            }
        })
    }

    /// `( param, ... )`
    pub(crate) fn parse_parameter_list(&mut self) -> NodeList {
        let mut params = Vec::new();
        if !self.parse_expected(SyntaxKind::OpenParenToken) {
            return params;
        }
        let context = self.context_flags & !CONTEXT_FLAG_DISALLOW_IN;
        self.with_context(context, |p| {
            while !p.is_token(SyntaxKind::CloseParenToken)
                && !p.is_token(SyntaxKind::EndOfFileToken)
            {
                let param = p.parse_parameter();
                if param.is_none() {
                    break;
                }
                params.push(param);
                if !p.parse_optional(SyntaxKind::CommaToken) {
                    break;
                }
            }
        });
        self.parse_expected(SyntaxKind::CloseParenToken);
        params
    }

    pub(crate) fn parse_parameter(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        self.skip_decorators();
        // Constructor parameter properties
        while matches!(
            self.token(),
            SyntaxKind::PublicKeyword
                | SyntaxKind::PrivateKeyword
                | SyntaxKind::ProtectedKeyword
                | SyntaxKind::ReadonlyKeyword
                | SyntaxKind::OverrideKeyword
        ) && self.next_token_on_same_line(|p| {
            p.is_identifier()
                || p.is_token(SyntaxKind::OpenBraceToken)
                || p.is_token(SyntaxKind::OpenBracketToken)
        }) {
            self.next_token();
        }

        let pattern = if self.is_token(SyntaxKind::ThisKeyword) {
            // `this` parameter: a type annotation, not a binding
            let this_pos = self.token_pos();
            self.next_token();
            self.finish_node(this_pos, NodeData::PropertyName("this".to_string()))
        } else if self.is_token(SyntaxKind::DotDotDotToken) {
            let rest_pos = self.token_pos();
            self.next_token();
            let target = self.parse_binding_target();
            self.finish_node(rest_pos, NodeData::RestElement(target))
        } else {
            self.parse_binding_target()
        };
        if pattern.is_none() {
            return NodeIndex::NONE;
        }

        let optional = self.parse_optional(SyntaxKind::QuestionToken);
        let type_annotation = self.parse_type_annotation();
        let pattern = if self.parse_optional(SyntaxKind::EqualsToken) {
            let pattern_pos = self.arena.get(pattern).map_or(pos, |n| n.pos);
            let right = self.parse_assignment_expression();
            self.finish_node(
                pattern_pos,
                NodeData::AssignmentPattern {
                    left: pattern,
                    right,
                },
            )
        } else {
            pattern
        };
        self.finish_node(
            pos,
            NodeData::Parameter(ParameterData {
                pattern,
                optional,
                type_annotation,
            }),
        )
    }

    // =========================================================================
    // Binding patterns
    // =========================================================================

    /// Identifier, `{...}` or `[...]` in a declaration.
    pub(crate) fn parse_binding_target(&mut self) -> NodeIndex {
        match self.token() {
            SyntaxKind::OpenBraceToken => self.parse_object_binding_pattern(),
            SyntaxKind::OpenBracketToken => self.parse_array_binding_pattern(),
            _ => self.parse_identifier_node(),
        }
    }

    /// Binding target with an optional `= default`.
    fn parse_binding_element(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        let target = self.parse_binding_target();
        if target.is_some() && self.parse_optional(SyntaxKind::EqualsToken) {
            let right = self.allow_in(|p| p.parse_assignment_expression());
            return self.finish_node(
                pos,
                NodeData::AssignmentPattern {
                    left: target,
                    right,
                },
            );
        }
        target
    }

    fn parse_object_binding_pattern(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        self.next_token();
        let mut properties = Vec::new();
        while !self.is_token(SyntaxKind::CloseBraceToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            let prop_pos = self.token_pos();
            if self.parse_optional(SyntaxKind::DotDotDotToken) {
                let target = self.parse_binding_target();
                properties.push(self.finish_node(prop_pos, NodeData::RestElement(target)));
            } else if self.is_identifier() && !self.next_token_is(SyntaxKind::ColonToken) {
                // Shorthand `{ a }` / `{ a = 1 }`
                let name = self.token_value();
                let name_end = self.token_end();
                self.next_token();
                let key = self
                    .arena
                    .add(prop_pos, name_end, NodeData::PropertyName(name.clone()));
                let mut value = self.arena.add(prop_pos, name_end, NodeData::Identifier(name));
                if self.parse_optional(SyntaxKind::EqualsToken) {
                    let right = self.allow_in(|p| p.parse_assignment_expression());
                    value = self.finish_node(prop_pos, NodeData::AssignmentPattern { left: value, right });
                }
                properties.push(self.finish_node(
                    prop_pos,
                    NodeData::Property(PropertyData {
                        key,
                        value,
                        kind: PropertyKind::Init,
                        computed: false,
                        shorthand: true,
                        method: false,
                    }),
                ));
            } else {
                let (key, computed) = self.parse_property_key();
                if key.is_none() {
                    break;
                }
                self.parse_expected(SyntaxKind::ColonToken);
                let value = self.parse_binding_element();
                properties.push(self.finish_node(
                    prop_pos,
                    NodeData::Property(PropertyData {
                        key,
                        value,
                        kind: PropertyKind::Init,
                        computed,
                        shorthand: false,
                        method: false,
                    }),
                ));
            }
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }
        self.parse_expected(SyntaxKind::CloseBraceToken);
        self.finish_node(pos, NodeData::ObjectPattern(properties))
    }

    fn parse_array_binding_pattern(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        self.next_token();
        let mut elements = Vec::new();
        while !self.is_token(SyntaxKind::CloseBracketToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            if self.parse_optional(SyntaxKind::CommaToken) {
                elements.push(NodeIndex::NONE);
                continue;
            }
            let element_pos = self.token_pos();
            let element = if self.parse_optional(SyntaxKind::DotDotDotToken) {
                let target = self.parse_binding_target();
                self.finish_node(element_pos, NodeData::RestElement(target))
            } else {
                self.parse_binding_element()
            };
            if element.is_none() {
                break;
            }
            elements.push(element);
            if !self.is_token(SyntaxKind::CloseBracketToken) {
                if !self.parse_expected(SyntaxKind::CommaToken) {
                    break;
                }
            }
        }
        self.parse_expected(SyntaxKind::CloseBracketToken);
        self.finish_node(pos, NodeData::ArrayPattern(elements))
    }

    /// Property key: identifier/keyword, string, number, private name or
    /// `[computed]`. Returns `(key, computed)`.
    pub(crate) fn parse_property_key(&mut self) -> (NodeIndex, bool) {
        let pos = self.token_pos();
        match self.token() {
            SyntaxKind::OpenBracketToken => {
                self.next_token();
                let expr = self.allow_in(|p| p.parse_assignment_expression());
                self.parse_expected(SyntaxKind::CloseBracketToken);
                (expr, true)
            }
            SyntaxKind::StringLiteral => {
                let value = self.token_value();
                self.next_token();
                let key = self.finish_node(
                    pos,
                    NodeData::Literal(LiteralData {
                        kind: LiteralKind::String,
                        value,
                    }),
                );
                (key, false)
            }
            SyntaxKind::NumericLiteral | SyntaxKind::BigIntLiteral => {
                let kind = if self.is_token(SyntaxKind::BigIntLiteral) {
                    LiteralKind::BigInt
                } else {
                    LiteralKind::Number
                };
                let value = self.token_value();
                self.next_token();
                (self.finish_node(pos, NodeData::Literal(LiteralData { kind, value })), false)
            }
            SyntaxKind::PrivateIdentifier => {
                let name = self.token_value();
                self.next_token();
                (self.finish_node(pos, NodeData::PrivateName(name)), false)
            }
            _ if self.is_identifier_or_keyword() => (self.parse_property_name_node(), false),
            _ => {
                self.error_at_current_token(diagnostic_codes::PROPERTY_ASSIGNMENT_EXPECTED, &[]);
                (NodeIndex::NONE, false)
            }
        }
    }

    // =========================================================================
    // Classes
    // =========================================================================

    /// `class [name] [<T>] [extends X] [implements Y] { members }`
    pub(crate) fn parse_class(
        &mut self,
        pos: u32,
        is_declaration: bool,
        name_optional: bool,
    ) -> NodeIndex {
        self.parse_expected(SyntaxKind::ClassKeyword);
        let name = if self.is_identifier() && !self.is_token(SyntaxKind::ImplementsKeyword) {
            self.parse_identifier_node()
        } else {
            if is_declaration && !name_optional {
                self.error_at_current_token(diagnostic_codes::IDENTIFIER_EXPECTED, &[]);
            }
            NodeIndex::NONE
        };
        let type_parameters = self.parse_type_parameters_opt();

        let mut implements = Vec::new();
        let super_class = if self.parse_optional(SyntaxKind::ExtendsKeyword) {
            let expr = self.parse_left_hand_side_expression();
            if self.is_token(SyntaxKind::LessThanToken) {
                implements.extend(self.parse_type_arguments());
            }
            expr
        } else {
            NodeIndex::NONE
        };
        if self.parse_optional(SyntaxKind::ImplementsKeyword) {
            loop {
                let reference = self.parse_type_reference();
                if reference.is_none() {
                    break;
                }
                implements.push(reference);
                if !self.parse_optional(SyntaxKind::CommaToken) {
                    break;
                }
            }
        }

        let members = self.with_context(
            self.context_flags & !CONTEXT_FLAG_DISALLOW_IN,
            |p| p.parse_class_members(),
        );
        self.finish_node(
            pos,
            NodeData::Class(ClassData {
                is_declaration,
                name,
                type_parameters,
                super_class,
                implements,
                members,
            }),
        )
    }

    fn parse_class_members(&mut self) -> NodeList {
        let mut members = Vec::new();
        if !self.parse_expected(SyntaxKind::OpenBraceToken) {
            return members;
        }
        while !self.is_token(SyntaxKind::CloseBraceToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            if self.parse_optional(SyntaxKind::SemicolonToken) {
                continue;
            }
            let start = self.token_pos();
            let member = self.parse_class_member();
            if member.is_some() {
                members.push(member);
            }
            if self.token_pos() == start {
                self.next_token();
            }
        }
        self.parse_expected(SyntaxKind::CloseBraceToken);
        members
    }

    /// Can the next token start a member name (so the current keyword is a
    /// modifier rather than the name itself)?
    fn next_is_member_name_start(&mut self) -> bool {
        self.next_token_on_same_line(|p| {
            p.is_identifier_or_keyword()
                || matches!(
                    p.token(),
                    SyntaxKind::OpenBracketToken
                        | SyntaxKind::PrivateIdentifier
                        | SyntaxKind::StringLiteral
                        | SyntaxKind::NumericLiteral
                        | SyntaxKind::AsteriskToken
                        | SyntaxKind::OpenBraceToken
                )
        })
    }

    fn parse_class_member(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        self.skip_decorators();

        let mut is_static = false;
        loop {
            match self.token() {
                SyntaxKind::StaticKeyword
                    if self.next_token_is(SyntaxKind::OpenBraceToken) =>
                {
                    self.next_token();
                    self.parse_expected(SyntaxKind::OpenBraceToken);
                    let statements = self
                        .with_context(CONTEXT_FLAG_IN_FUNCTION, |p| p.parse_block_statements());
                    self.parse_expected(SyntaxKind::CloseBraceToken);
                    return self.finish_node(pos, NodeData::StaticBlock(BlockData { statements }));
                }
                SyntaxKind::StaticKeyword
                | SyntaxKind::PublicKeyword
                | SyntaxKind::PrivateKeyword
                | SyntaxKind::ProtectedKeyword
                | SyntaxKind::ReadonlyKeyword
                | SyntaxKind::AbstractKeyword
                | SyntaxKind::OverrideKeyword
                | SyntaxKind::DeclareKeyword
                | SyntaxKind::AccessorKeyword
                    if self.next_is_member_name_start()
                        && !self.next_token_is(SyntaxKind::OpenBraceToken) =>
                {
                    is_static |= self.is_token(SyntaxKind::StaticKeyword);
                    self.next_token();
                }
                _ => break,
            }
        }

        // Index signature: `[key: string]: T`
        if self.is_token(SyntaxKind::OpenBracketToken) && self.is_index_signature_start() {
            return self.parse_index_signature(pos);
        }

        let is_async = self.is_token(SyntaxKind::AsyncKeyword)
            && self.next_is_member_name_start()
            && !self.next_token_is(SyntaxKind::OpenBraceToken);
        if is_async {
            self.next_token();
        }
        let is_generator = self.parse_optional(SyntaxKind::AsteriskToken);
        let mut kind = FunctionKind::Method;
        if !is_async
            && !is_generator
            && (self.is_token(SyntaxKind::GetKeyword) || self.is_token(SyntaxKind::SetKeyword))
            && self.next_is_member_name_start()
            && !self.next_token_is(SyntaxKind::OpenBraceToken)
        {
            kind = if self.is_token(SyntaxKind::GetKeyword) {
                FunctionKind::Getter
            } else {
                FunctionKind::Setter
            };
            self.next_token();
        }

        let (key, computed) = self.parse_property_key();
        if key.is_none() {
            return NodeIndex::NONE;
        }
        let optional = self.parse_optional(SyntaxKind::QuestionToken);
        if !optional {
            self.parse_optional(SyntaxKind::ExclamationToken);
        }

        if self.is_token(SyntaxKind::OpenParenToken) || self.is_token(SyntaxKind::LessThanToken) {
            if kind == FunctionKind::Method
                && !computed
                && !is_static
                && self.arena.identifier_text(key) == Some("constructor")
            {
                kind = FunctionKind::Constructor;
            }
            let value_pos = self.token_pos();
            let caps = FunctionCapabilities {
                is_arrow: false,
                is_generator,
                is_async,
            };
            let data = self.parse_function_rest(kind, caps, NodeIndex::NONE);
            let has_body = data.body.is_some();
            let value = self.finish_node(value_pos, NodeData::FunctionLike(data));
            if !has_body {
                self.parse_semicolon();
            }
            return self.finish_node(
                pos,
                NodeData::MethodDefinition(MethodData {
                    key,
                    computed,
                    is_static,
                    value,
                }),
            );
        }

        let type_annotation = self.parse_type_annotation();
        let value = if self.parse_optional(SyntaxKind::EqualsToken) {
            // Field initializers run as if in a method body
            self.with_context(CONTEXT_FLAG_IN_FUNCTION, |p| {
                p.parse_assignment_expression()
            })
        } else {
            NodeIndex::NONE
        };
        self.parse_semicolon();
        self.finish_node(
            pos,
            NodeData::PropertyDefinition(PropertyDefinitionData {
                key,
                computed,
                is_static,
                type_annotation,
                value,
            }),
        )
    }

    // =========================================================================
    // Modules
    // =========================================================================

    fn parse_module_source(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        if !self.is_token(SyntaxKind::StringLiteral) {
            self.error_token_expected("string literal");
            return NodeIndex::NONE;
        }
        let value = self.token_value();
        self.next_token();
        let source = self.finish_node(
            pos,
            NodeData::Literal(LiteralData {
                kind: LiteralKind::String,
                value,
            }),
        );
        // Import attributes: `with { type: "json" }`
        if (self.is_token(SyntaxKind::WithKeyword) || self.is_identifier_text("assert"))
            && !self.has_preceding_line_break()
        {
            self.next_token();
            self.parse_primary_expression();
        }
        source
    }

    /// Module export name: identifier, keyword or string.
    fn parse_module_export_name(&mut self) -> NodeIndex {
        if self.is_token(SyntaxKind::StringLiteral) {
            let pos = self.token_pos();
            let value = self.token_value();
            self.next_token();
            return self.finish_node(
                pos,
                NodeData::Literal(LiteralData {
                    kind: LiteralKind::String,
                    value,
                }),
            );
        }
        self.parse_property_name_node()
    }

    fn parse_import_declaration(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        self.next_token();

        let is_type_only = self.is_token(SyntaxKind::TypeKeyword)
            && self.look_ahead(|p| {
                p.next_token();
                (p.is_identifier() && !p.is_token(SyntaxKind::FromKeyword))
                    || matches!(
                        p.token(),
                        SyntaxKind::OpenBraceToken | SyntaxKind::AsteriskToken
                    )
            });
        if is_type_only {
            self.next_token();
        }

        let mut specifiers = Vec::new();
        if self.is_token(SyntaxKind::StringLiteral) {
            // Side-effect import
            let source = self.parse_module_source();
            self.parse_semicolon();
            return self.finish_node(
                pos,
                NodeData::ImportDeclaration(ImportDeclarationData {
                    specifiers,
                    source,
                    is_type_only,
                }),
            );
        }

        if self.is_identifier() {
            let local_pos = self.token_pos();
            let local = self.parse_identifier_node();
            // `import x = require("m")`
            if self.parse_optional(SyntaxKind::EqualsToken) {
                let source = self.parse_expression();
                self.parse_semicolon();
                let spec = self.finish_node(
                    local_pos,
                    NodeData::ImportSpecifier(ImportSpecifierData {
                        kind: ImportSpecifierKind::Default,
                        imported: NodeIndex::NONE,
                        local,
                        is_type_only,
                    }),
                );
                return self.finish_node(
                    pos,
                    NodeData::ImportDeclaration(ImportDeclarationData {
                        specifiers: vec![spec],
                        source,
                        is_type_only,
                    }),
                );
            }
            specifiers.push(self.finish_node(
                local_pos,
                NodeData::ImportSpecifier(ImportSpecifierData {
                    kind: ImportSpecifierKind::Default,
                    imported: NodeIndex::NONE,
                    local,
                    is_type_only,
                }),
            ));
            self.parse_optional(SyntaxKind::CommaToken);
        }

        if self.is_token(SyntaxKind::AsteriskToken) {
            let ns_pos = self.token_pos();
            self.next_token();
            self.parse_expected(SyntaxKind::AsKeyword);
            let local = self.parse_identifier_node();
            specifiers.push(self.finish_node(
                ns_pos,
                NodeData::ImportSpecifier(ImportSpecifierData {
                    kind: ImportSpecifierKind::Namespace,
                    imported: NodeIndex::NONE,
                    local,
                    is_type_only,
                }),
            ));
        } else if self.parse_optional(SyntaxKind::OpenBraceToken) {
            while !self.is_token(SyntaxKind::CloseBraceToken)
                && !self.is_token(SyntaxKind::EndOfFileToken)
            {
                let spec_pos = self.token_pos();
                let mut spec_type_only = is_type_only;
                // `{ type X }` marks one specifier type-only; `{ type }` imports `type`
                if self.is_token(SyntaxKind::TypeKeyword)
                    && self.look_ahead(|p| {
                        p.next_token();
                        (p.is_identifier_or_keyword() && !p.is_token(SyntaxKind::AsKeyword))
                            || p.is_token(SyntaxKind::StringLiteral)
                    })
                {
                    spec_type_only = true;
                    self.next_token();
                }
                let name_pos = self.token_pos();
                let name_end = self.token_end();
                let name_text = self.token_value();
                let imported = self.parse_module_export_name();
                if imported.is_none() {
                    break;
                }
                let local = if self.parse_optional(SyntaxKind::AsKeyword) {
                    self.parse_identifier_node()
                } else {
                    self.arena
                        .add(name_pos, name_end, NodeData::Identifier(name_text))
                };
                specifiers.push(self.finish_node(
                    spec_pos,
                    NodeData::ImportSpecifier(ImportSpecifierData {
                        kind: ImportSpecifierKind::Named,
                        imported,
                        local,
                        is_type_only: spec_type_only,
                    }),
                ));
                if !self.parse_optional(SyntaxKind::CommaToken) {
                    break;
                }
            }
            self.parse_expected(SyntaxKind::CloseBraceToken);
        }

        self.parse_expected(SyntaxKind::FromKeyword);
        let source = self.parse_module_source();
        self.parse_semicolon();
        self.finish_node(
            pos,
            NodeData::ImportDeclaration(ImportDeclarationData {
                specifiers,
                source,
                is_type_only,
            }),
        )
    }

    fn parse_export_declaration(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        self.next_token();

        // `export = expr`
        if self.parse_optional(SyntaxKind::EqualsToken) {
            let expr = self.allow_in(|p| p.parse_assignment_expression());
            self.parse_semicolon();
            return self.finish_node(pos, NodeData::ExportDefault(expr));
        }

        if self.parse_optional(SyntaxKind::DefaultKeyword) {
            let decl_pos = self.token_pos();
            let declaration = match self.token() {
                SyntaxKind::FunctionKeyword => self.parse_function_declaration(decl_pos, false, true),
                SyntaxKind::AsyncKeyword
                    if self.next_token_on_same_line(|p| p.is_token(SyntaxKind::FunctionKeyword)) =>
                {
                    self.next_token();
                    self.parse_function_declaration(decl_pos, true, true)
                }
                SyntaxKind::ClassKeyword => self.parse_class(decl_pos, true, true),
                SyntaxKind::AbstractKeyword
                    if self.next_token_on_same_line(|p| p.is_token(SyntaxKind::ClassKeyword)) =>
                {
                    self.next_token();
                    self.parse_class(decl_pos, true, true)
                }
                SyntaxKind::InterfaceKeyword
                    if self.next_token_on_same_line(|p| p.is_identifier()) =>
                {
                    self.parse_interface_declaration()
                }
                _ => {
                    let expr = self.allow_in(|p| p.parse_assignment_expression());
                    self.parse_semicolon();
                    expr
                }
            };
            return self.finish_node(pos, NodeData::ExportDefault(declaration));
        }

        let is_type_only = self.is_token(SyntaxKind::TypeKeyword)
            && self.look_ahead(|p| {
                matches!(
                    p.next_token(),
                    SyntaxKind::OpenBraceToken | SyntaxKind::AsteriskToken
                )
            });
        if is_type_only {
            self.next_token();
        }

        if self.parse_optional(SyntaxKind::AsteriskToken) {
            let exported = if self.parse_optional(SyntaxKind::AsKeyword) {
                self.parse_module_export_name()
            } else {
                NodeIndex::NONE
            };
            self.parse_expected(SyntaxKind::FromKeyword);
            let source = self.parse_module_source();
            self.parse_semicolon();
            return self.finish_node(pos, NodeData::ExportAll { exported, source });
        }

        if self.parse_optional(SyntaxKind::OpenBraceToken) {
            let mut specifiers = Vec::new();
            while !self.is_token(SyntaxKind::CloseBraceToken)
                && !self.is_token(SyntaxKind::EndOfFileToken)
            {
                let spec_pos = self.token_pos();
                if self.is_token(SyntaxKind::TypeKeyword)
                    && self.look_ahead(|p| {
                        p.next_token();
                        p.is_identifier_or_keyword()
                    })
                {
                    self.next_token();
                }
                let local = self.parse_module_export_name();
                if local.is_none() {
                    break;
                }
                let exported = if self.parse_optional(SyntaxKind::AsKeyword) {
                    self.parse_module_export_name()
                } else {
                    NodeIndex::NONE
                };
                specifiers.push(self.finish_node(
                    spec_pos,
                    NodeData::ExportSpecifier(ExportSpecifierData { local, exported }),
                ));
                if !self.parse_optional(SyntaxKind::CommaToken) {
                    break;
                }
            }
            self.parse_expected(SyntaxKind::CloseBraceToken);
            let source = if self.parse_optional(SyntaxKind::FromKeyword) {
                self.parse_module_source()
            } else {
                // Local exports refer to bindings of this module
                if !is_type_only {
                    self.mark_export_locals_as_references(&specifiers);
                }
                NodeIndex::NONE
            };
            self.parse_semicolon();
            return self.finish_node(
                pos,
                NodeData::ExportNamed(ExportNamedData {
                    declaration: NodeIndex::NONE,
                    specifiers,
                    source,
                    is_type_only,
                }),
            );
        }

        let declaration = self.parse_statement();
        self.finish_node(
            pos,
            NodeData::ExportNamed(ExportNamedData {
                declaration,
                specifiers: Vec::new(),
                source: NodeIndex::NONE,
                is_type_only,
            }),
        )
    }

    fn mark_export_locals_as_references(&mut self, specifiers: &[NodeIndex]) {
        for &spec in specifiers {
            let local = match self.arena.data(spec) {
                Some(NodeData::ExportSpecifier(data)) => data.local,
                _ => continue,
            };
            if let Some(node) = self.arena.get_mut(local)
                && let NodeData::PropertyName(name) = &mut node.data
            {
                let name = std::mem::take(name);
                node.data = NodeData::Identifier(name);
            }
        }
    }

    // =========================================================================
    // TypeScript declarations
    // =========================================================================

    fn parse_type_alias_declaration(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        self.next_token();
        let name = self.parse_identifier_node();
        let type_parameters = self.parse_type_parameters_opt();
        self.parse_expected(SyntaxKind::EqualsToken);
        let annotation = self.parse_type();
        self.parse_semicolon();
        self.finish_node(
            pos,
            NodeData::TypeAlias(TypeAliasData {
                name,
                type_parameters,
                annotation,
            }),
        )
    }

    fn parse_interface_declaration(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        self.next_token();
        let name = self.parse_identifier_node();
        let type_parameters = self.parse_type_parameters_opt();
        let mut extends = Vec::new();
        if self.parse_optional(SyntaxKind::ExtendsKeyword) {
            loop {
                let reference = self.parse_type_reference();
                if reference.is_none() {
                    break;
                }
                extends.push(reference);
                if !self.parse_optional(SyntaxKind::CommaToken) {
                    break;
                }
            }
        }
        let members = self.parse_type_members();
        self.finish_node(
            pos,
            NodeData::Interface(InterfaceData {
                name,
                type_parameters,
                extends,
                members,
            }),
        )
    }

    fn parse_enum_declaration(&mut self, pos: u32, is_const: bool) -> NodeIndex {
        self.parse_expected(SyntaxKind::EnumKeyword);
        let name = self.parse_identifier_node();
        let mut members = Vec::new();
        self.parse_expected(SyntaxKind::OpenBraceToken);
        while !self.is_token(SyntaxKind::CloseBraceToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            let member_pos = self.token_pos();
            let (member_name, _) = self.parse_property_key();
            if member_name.is_none() {
                break;
            }
            let initializer = if self.parse_optional(SyntaxKind::EqualsToken) {
                self.allow_in(|p| p.parse_assignment_expression())
            } else {
                NodeIndex::NONE
            };
            members.push(self.finish_node(
                member_pos,
                NodeData::EnumMember(EnumMemberData {
                    name: member_name,
                    initializer,
                }),
            ));
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }
        self.parse_expected(SyntaxKind::CloseBraceToken);
        self.finish_node(
            pos,
            NodeData::Enum(EnumData {
                name,
                is_const,
                members,
            }),
        )
    }
}
