//! Parser state - expression parsing methods

use super::node::*;
use super::state::{
    CONTEXT_FLAG_ASYNC, CONTEXT_FLAG_DISALLOW_IN, CONTEXT_FLAG_GENERATOR, CONTEXT_FLAG_IN_FUNCTION,
    ParserState,
};
use loopguard_scanner::SyntaxKind;
use tracing::trace;

/// Arrow function head accepted by the speculative parse.
struct ArrowHead {
    pos: u32,
    is_async: bool,
    type_parameters: NodeList,
    params: NodeList,
    return_type: NodeIndex,
}

impl ParserState {
    // =========================================================================
    // Re-scanning
    // =========================================================================

    fn re_scan_greater_token(&mut self) {
        self.current_token = self.scanner.re_scan_greater_token();
    }

    fn re_scan_slash_token(&mut self) {
        self.current_token = self.scanner.re_scan_slash_token();
    }

    fn re_scan_template_token(&mut self) {
        self.current_token = self.scanner.re_scan_template_token();
    }

    // =========================================================================
    // Comma and assignment expressions
    // =========================================================================

    /// `a, b, c` - a single expression unless a comma follows.
    pub(crate) fn parse_expression(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        let first = self.parse_assignment_expression();
        if first.is_none() || !self.is_token(SyntaxKind::CommaToken) {
            return first;
        }
        let mut expressions = vec![first];
        while self.parse_optional(SyntaxKind::CommaToken) {
            let next = self.parse_assignment_expression();
            if next.is_none() {
                break;
            }
            expressions.push(next);
        }
        self.finish_node(pos, NodeData::Sequence(expressions))
    }

    pub(crate) fn parse_assignment_expression(&mut self) -> NodeIndex {
        if !self.enter_recursion() {
            return NodeIndex::NONE;
        }
        let result = self.parse_assignment_expression_worker();
        self.exit_recursion();
        result
    }

    fn parse_assignment_expression_worker(&mut self) -> NodeIndex {
        if self.is_token(SyntaxKind::YieldKeyword) && self.in_context(CONTEXT_FLAG_GENERATOR) {
            return self.parse_yield_expression();
        }
        if let Some(arrow) = self.parse_arrow_function_if_present() {
            return arrow;
        }

        let pos = self.token_pos();
        let left = self.parse_conditional_expression();
        if left.is_none() || !self.token().is_assignment_operator() {
            return left;
        }
        let operator = self.token();
        if operator == SyntaxKind::EqualsToken {
            self.reinterpret_as_pattern(left);
        }
        self.next_token();
        let right = self.parse_assignment_expression();
        self.finish_node(
            pos,
            NodeData::Assignment(BinaryData {
                operator,
                left,
                right,
            }),
        )
    }

    /// Rewrite an array/object literal on the left of `=` (or in a `for-in`
    /// head) into the equivalent destructuring pattern.
    pub(crate) fn reinterpret_as_pattern(&mut self, index: NodeIndex) {
        let mut stack = vec![index];
        while let Some(current) = stack.pop() {
            let Some(node) = self.arena.get_mut(current) else {
                continue;
            };
            match &mut node.data {
                NodeData::Array(list) => {
                    let list = std::mem::take(list);
                    stack.extend(list.iter().copied().filter(|idx| idx.is_some()));
                    node.data = NodeData::ArrayPattern(list);
                }
                NodeData::Object(list) => {
                    let list = std::mem::take(list);
                    stack.extend(list.iter().copied());
                    node.data = NodeData::ObjectPattern(list);
                }
                NodeData::Property(prop) => stack.push(prop.value),
                NodeData::Spread(argument) => {
                    let argument = *argument;
                    node.data = NodeData::RestElement(argument);
                    stack.push(argument);
                }
                NodeData::Assignment(assign) if assign.operator == SyntaxKind::EqualsToken => {
                    let (left, right) = (assign.left, assign.right);
                    node.data = NodeData::AssignmentPattern { left, right };
                    stack.push(left);
                }
                NodeData::AssignmentPattern { left, .. } => stack.push(*left),
                _ => {}
            }
        }
    }

    fn parse_yield_expression(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        self.next_token();
        let same_line = !self.has_preceding_line_break();
        let delegate = same_line && self.parse_optional(SyntaxKind::AsteriskToken);
        let has_argument = delegate
            || (same_line
                && !matches!(
                    self.token(),
                    SyntaxKind::CloseParenToken
                        | SyntaxKind::CloseBracketToken
                        | SyntaxKind::CloseBraceToken
                        | SyntaxKind::CommaToken
                        | SyntaxKind::SemicolonToken
                        | SyntaxKind::ColonToken
                        | SyntaxKind::EndOfFileToken
                ));
        let argument = if has_argument {
            self.parse_assignment_expression()
        } else {
            NodeIndex::NONE
        };
        self.finish_node(pos, NodeData::Yield { argument, delegate })
    }

    // =========================================================================
    // Arrow functions
    // =========================================================================

    /// Parse an arrow function when the tokens ahead form one. The head is
    /// parsed speculatively; once `=>` is seen the body is committed.
    fn parse_arrow_function_if_present(&mut self) -> Option<NodeIndex> {
        let candidate = match self.token() {
            SyntaxKind::OpenParenToken | SyntaxKind::LessThanToken => true,
            SyntaxKind::AsyncKeyword => self.next_token_on_same_line(|p| {
                p.is_identifier()
                    || p.is_token(SyntaxKind::OpenParenToken)
                    || p.is_token(SyntaxKind::LessThanToken)
                    || p.is_token(SyntaxKind::EqualsGreaterThanToken)
            }),
            _ => self.is_identifier() && self.next_token_is(SyntaxKind::EqualsGreaterThanToken),
        };
        if !candidate {
            return None;
        }
        let head = self.try_parse(|p| p.parse_arrow_head())?;
        trace!(pos = head.pos, "arrow function");
        Some(self.parse_arrow_body(head))
    }

    fn parse_arrow_head(&mut self) -> Option<ArrowHead> {
        let pos = self.token_pos();
        let is_async = self.is_token(SyntaxKind::AsyncKeyword)
            && !self.next_token_is(SyntaxKind::EqualsGreaterThanToken);
        if is_async {
            self.next_token();
        }

        let mut type_parameters = Vec::new();
        let mut return_type = NodeIndex::NONE;
        let params = if self.is_identifier() {
            let param_pos = self.token_pos();
            let pattern = self.parse_identifier_node();
            vec![self.finish_node(
                param_pos,
                NodeData::Parameter(ParameterData {
                    pattern,
                    optional: false,
                    type_annotation: NodeIndex::NONE,
                }),
            )]
        } else {
            type_parameters = self.parse_type_parameters_opt();
            if !self.is_token(SyntaxKind::OpenParenToken) {
                return None;
            }
            let params = self.parse_parameter_list();
            if self.is_token(SyntaxKind::ColonToken) {
                return_type = self.parse_return_type_annotation();
            }
            params
        };

        if !self.is_token(SyntaxKind::EqualsGreaterThanToken) || self.has_preceding_line_break() {
            return None;
        }
        self.next_token();
        Some(ArrowHead {
            pos,
            is_async,
            type_parameters,
            params,
            return_type,
        })
    }

    fn parse_arrow_body(&mut self, head: ArrowHead) -> NodeIndex {
        let mut flags = CONTEXT_FLAG_IN_FUNCTION | (self.context_flags & CONTEXT_FLAG_DISALLOW_IN);
        if head.is_async {
            flags |= CONTEXT_FLAG_ASYNC;
        }
        let body = self.with_context(flags, |p| {
            if p.is_token(SyntaxKind::OpenBraceToken) {
                p.parse_block()
            } else {
                p.parse_assignment_expression()
            }
        });
        self.finish_node(
            head.pos,
            NodeData::FunctionLike(FunctionData {
                kind: FunctionKind::Arrow,
                caps: FunctionCapabilities {
                    is_arrow: true,
                    is_generator: false,
                    is_async: head.is_async,
                },
                name: NodeIndex::NONE,
                type_parameters: head.type_parameters,
                params: head.params,
                return_type: head.return_type,
                body,
            }),
        )
    }

    // =========================================================================
    // Conditional and binary expressions
    // =========================================================================

    fn parse_conditional_expression(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        let test = self.parse_binary_expression(0);
        if test.is_none() || !self.parse_optional(SyntaxKind::QuestionToken) {
            return test;
        }
        let consequent = self.allow_in(|p| p.parse_assignment_expression());
        self.parse_expected(SyntaxKind::ColonToken);
        let alternate = self.parse_assignment_expression();
        self.finish_node(
            pos,
            NodeData::Conditional(ConditionalData {
                test,
                consequent,
                alternate,
            }),
        )
    }

    /// Binding power of a binary operator; 0 when `kind` is not one here.
    fn binary_precedence(&self, kind: SyntaxKind) -> u8 {
        match kind {
            SyntaxKind::QuestionQuestionToken | SyntaxKind::BarBarToken => 1,
            SyntaxKind::AmpersandAmpersandToken => 2,
            SyntaxKind::BarToken => 3,
            SyntaxKind::CaretToken => 4,
            SyntaxKind::AmpersandToken => 5,
            SyntaxKind::EqualsEqualsToken
            | SyntaxKind::ExclamationEqualsToken
            | SyntaxKind::EqualsEqualsEqualsToken
            | SyntaxKind::ExclamationEqualsEqualsToken => 6,
            SyntaxKind::InKeyword if self.in_context(CONTEXT_FLAG_DISALLOW_IN) => 0,
            SyntaxKind::LessThanToken
            | SyntaxKind::GreaterThanToken
            | SyntaxKind::LessThanEqualsToken
            | SyntaxKind::GreaterThanEqualsToken
            | SyntaxKind::InstanceOfKeyword
            | SyntaxKind::InKeyword
            | SyntaxKind::AsKeyword
            | SyntaxKind::SatisfiesKeyword => 7,
            SyntaxKind::LessThanLessThanToken
            | SyntaxKind::GreaterThanGreaterThanToken
            | SyntaxKind::GreaterThanGreaterThanGreaterThanToken => 8,
            SyntaxKind::PlusToken | SyntaxKind::MinusToken => 9,
            SyntaxKind::AsteriskToken | SyntaxKind::SlashToken | SyntaxKind::PercentToken => 10,
            SyntaxKind::AsteriskAsteriskToken => 11,
            _ => 0,
        }
    }

    /// Precedence climbing: consumes operators binding tighter than
    /// `min_precedence`.
    fn parse_binary_expression(&mut self, min_precedence: u8) -> NodeIndex {
        let pos = self.token_pos();
        let mut left = self.parse_unary_expression();
        if left.is_none() {
            return left;
        }
        loop {
            self.re_scan_greater_token();
            let operator = self.token();
            let precedence = self.binary_precedence(operator);
            if precedence == 0 || precedence <= min_precedence {
                break;
            }

            if matches!(operator, SyntaxKind::AsKeyword | SyntaxKind::SatisfiesKeyword) {
                if self.has_preceding_line_break() {
                    break;
                }
                self.next_token();
                let annotation = if operator == SyntaxKind::AsKeyword
                    && self.is_token(SyntaxKind::ConstKeyword)
                {
                    let const_pos = self.token_pos();
                    self.next_token();
                    self.finish_node(const_pos, NodeData::TypeKeyword("const".to_string()))
                } else {
                    self.parse_type()
                };
                left = self.finish_node(
                    pos,
                    NodeData::TypeCast(TypeCastData {
                        expression: left,
                        annotation,
                    }),
                );
                continue;
            }

            self.next_token();
            // `**` is right-associative
            let right = if operator == SyntaxKind::AsteriskAsteriskToken {
                self.parse_binary_expression(precedence - 1)
            } else {
                self.parse_binary_expression(precedence)
            };
            if right.is_none() {
                self.error_expression_expected();
            }
            let data = BinaryData {
                operator,
                left,
                right,
            };
            left = self.finish_node(
                pos,
                match operator {
                    SyntaxKind::BarBarToken
                    | SyntaxKind::AmpersandAmpersandToken
                    | SyntaxKind::QuestionQuestionToken => NodeData::Logical(data),
                    _ => NodeData::Binary(data),
                },
            );
        }
        left
    }

    // =========================================================================
    // Unary and update expressions
    // =========================================================================

    fn parse_unary_expression(&mut self) -> NodeIndex {
        if !self.enter_recursion() {
            return NodeIndex::NONE;
        }
        let result = self.parse_unary_expression_worker();
        self.exit_recursion();
        result
    }

    fn parse_unary_expression_worker(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        let operator = self.token();
        match operator {
            SyntaxKind::PlusToken
            | SyntaxKind::MinusToken
            | SyntaxKind::TildeToken
            | SyntaxKind::ExclamationToken
            | SyntaxKind::TypeOfKeyword
            | SyntaxKind::VoidKeyword
            | SyntaxKind::DeleteKeyword => {
                self.next_token();
                let argument = self.parse_unary_expression();
                self.finish_node(pos, NodeData::Unary(UnaryData { operator, argument }))
            }
            SyntaxKind::PlusPlusToken | SyntaxKind::MinusMinusToken => {
                self.next_token();
                let argument = self.parse_unary_expression();
                self.finish_node(
                    pos,
                    NodeData::Update(UpdateData {
                        operator,
                        prefix: true,
                        argument,
                    }),
                )
            }
            SyntaxKind::AwaitKeyword if self.await_is_operator() => {
                self.next_token();
                let argument = self.parse_unary_expression();
                self.finish_node(pos, NodeData::Await(argument))
            }
            SyntaxKind::LessThanToken => {
                // Angle-bracket type assertion: `<T>expr`
                self.next_token();
                let annotation = self.parse_type();
                self.parse_expected(SyntaxKind::GreaterThanToken);
                let expression = self.parse_unary_expression();
                self.finish_node(
                    pos,
                    NodeData::TypeCast(TypeCastData {
                        expression,
                        annotation,
                    }),
                )
            }
            _ => self.parse_postfix_expression(),
        }
    }

    fn parse_postfix_expression(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        let expression = self.parse_left_hand_side_expression();
        if expression.is_some()
            && matches!(
                self.token(),
                SyntaxKind::PlusPlusToken | SyntaxKind::MinusMinusToken
            )
            && !self.has_preceding_line_break()
        {
            let operator = self.token();
            self.next_token();
            return self.finish_node(
                pos,
                NodeData::Update(UpdateData {
                    operator,
                    prefix: false,
                    argument: expression,
                }),
            );
        }
        expression
    }

    // =========================================================================
    // Member, call and new expressions
    // =========================================================================

    pub(crate) fn parse_left_hand_side_expression(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        let expression = if self.is_token(SyntaxKind::NewKeyword) {
            self.parse_new_expression()
        } else {
            self.parse_primary_expression()
        };
        if expression.is_none() {
            return expression;
        }
        self.parse_member_and_call_chain(pos, expression, true)
    }

    fn parse_member_and_call_chain(
        &mut self,
        pos: u32,
        mut expression: NodeIndex,
        allow_calls: bool,
    ) -> NodeIndex {
        loop {
            match self.token() {
                SyntaxKind::DotToken => {
                    self.next_token();
                    let property = self.parse_member_name();
                    expression = self.finish_member(pos, expression, property, false, false);
                }
                SyntaxKind::QuestionDotToken => {
                    self.next_token();
                    if self.is_token(SyntaxKind::OpenParenToken) && allow_calls {
                        let arguments = self.parse_arguments();
                        expression = self.finish_call(pos, expression, Vec::new(), arguments, true);
                    } else if self.parse_optional(SyntaxKind::OpenBracketToken) {
                        let property = self.allow_in(|p| p.parse_expression());
                        self.parse_expected(SyntaxKind::CloseBracketToken);
                        expression = self.finish_member(pos, expression, property, true, true);
                    } else if self.is_token(SyntaxKind::LessThanToken) && allow_calls {
                        let type_arguments = self.parse_type_arguments();
                        let arguments = self.parse_arguments();
                        expression =
                            self.finish_call(pos, expression, type_arguments, arguments, true);
                    } else {
                        let property = self.parse_member_name();
                        expression = self.finish_member(pos, expression, property, false, true);
                    }
                }
                SyntaxKind::OpenBracketToken => {
                    self.next_token();
                    let property = self.allow_in(|p| p.parse_expression());
                    self.parse_expected(SyntaxKind::CloseBracketToken);
                    expression = self.finish_member(pos, expression, property, true, false);
                }
                SyntaxKind::ExclamationToken if !self.has_preceding_line_break() => {
                    self.next_token();
                    expression = self.finish_node(pos, NodeData::NonNull(expression));
                }
                SyntaxKind::NoSubstitutionTemplateLiteral | SyntaxKind::TemplateHead => {
                    let quasi = self.parse_template();
                    expression = self.finish_node(
                        pos,
                        NodeData::TaggedTemplate {
                            tag: expression,
                            quasi,
                        },
                    );
                }
                SyntaxKind::OpenParenToken if allow_calls => {
                    let arguments = self.parse_arguments();
                    expression = self.finish_call(pos, expression, Vec::new(), arguments, false);
                }
                SyntaxKind::LessThanToken if allow_calls => {
                    // `f<T>(x)`: only a call when the type arguments close
                    // cleanly and an argument list follows
                    let type_arguments = self.try_parse(|p| {
                        let args = p.parse_type_arguments();
                        p.is_token(SyntaxKind::OpenParenToken).then_some(args)
                    });
                    let Some(type_arguments) = type_arguments else {
                        break;
                    };
                    let arguments = self.parse_arguments();
                    expression =
                        self.finish_call(pos, expression, type_arguments, arguments, false);
                }
                _ => break,
            }
        }
        expression
    }

    fn parse_member_name(&mut self) -> NodeIndex {
        if self.is_token(SyntaxKind::PrivateIdentifier) {
            let pos = self.token_pos();
            let name = self.token_value();
            self.next_token();
            return self.finish_node(pos, NodeData::PrivateName(name));
        }
        self.parse_property_name_node()
    }

    fn finish_member(
        &mut self,
        pos: u32,
        object: NodeIndex,
        property: NodeIndex,
        computed: bool,
        optional: bool,
    ) -> NodeIndex {
        self.finish_node(
            pos,
            NodeData::Member(MemberData {
                object,
                property,
                computed,
                optional,
            }),
        )
    }

    fn finish_call(
        &mut self,
        pos: u32,
        callee: NodeIndex,
        type_arguments: NodeList,
        arguments: NodeList,
        optional: bool,
    ) -> NodeIndex {
        self.finish_node(
            pos,
            NodeData::Call(CallData {
                callee,
                type_arguments,
                arguments,
                optional,
            }),
        )
    }

    fn parse_new_expression(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        let new_end = self.token_end();
        self.next_token();

        if self.parse_optional(SyntaxKind::DotToken) {
            // `new.target`
            let meta = self
                .arena
                .add(pos, new_end, NodeData::PropertyName("new".to_string()));
            let property = self.parse_property_name_node();
            return self.finish_node(pos, NodeData::MetaProperty { meta, property });
        }

        let callee_pos = self.token_pos();
        let callee = if self.is_token(SyntaxKind::NewKeyword) {
            self.parse_new_expression()
        } else {
            self.parse_primary_expression()
        };
        if callee.is_none() {
            return NodeIndex::NONE;
        }
        let callee = self.parse_member_and_call_chain(callee_pos, callee, false);
        let type_arguments = if self.is_token(SyntaxKind::LessThanToken) {
            self.try_parse(|p| Some(p.parse_type_arguments()))
                .unwrap_or_default()
        } else {
            Vec::new()
        };
        let arguments = if self.is_token(SyntaxKind::OpenParenToken) {
            self.parse_arguments()
        } else {
            Vec::new()
        };
        self.finish_node(
            pos,
            NodeData::New(CallData {
                callee,
                type_arguments,
                arguments,
                optional: false,
            }),
        )
    }

    /// `( arg, ...spread )`
    fn parse_arguments(&mut self) -> NodeList {
        let mut arguments = Vec::new();
        if !self.parse_expected(SyntaxKind::OpenParenToken) {
            return arguments;
        }
        self.allow_in(|p| {
            while !p.is_token(SyntaxKind::CloseParenToken)
                && !p.is_token(SyntaxKind::EndOfFileToken)
            {
                let argument = p.parse_spread_or_assignment_expression();
                if argument.is_none() {
                    break;
                }
                arguments.push(argument);
                if !p.parse_optional(SyntaxKind::CommaToken) {
                    break;
                }
            }
        });
        self.parse_expected(SyntaxKind::CloseParenToken);
        arguments
    }

    fn parse_spread_or_assignment_expression(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        if self.parse_optional(SyntaxKind::DotDotDotToken) {
            let argument = self.parse_assignment_expression();
            return self.finish_node(pos, NodeData::Spread(argument));
        }
        self.parse_assignment_expression()
    }

    // =========================================================================
    // Primary expressions
    // =========================================================================

    /// Reports "Expression expected." and returns `NONE` when nothing here
    /// starts an expression.
    pub(crate) fn parse_primary_expression(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        match self.token() {
            SyntaxKind::ThisKeyword => {
                self.next_token();
                self.finish_node(pos, NodeData::This)
            }
            SyntaxKind::SuperKeyword => {
                self.next_token();
                self.finish_node(pos, NodeData::Super)
            }
            SyntaxKind::NullKeyword => self.parse_literal(LiteralKind::Null),
            SyntaxKind::TrueKeyword | SyntaxKind::FalseKeyword => {
                self.parse_literal(LiteralKind::Boolean)
            }
            SyntaxKind::NumericLiteral => self.parse_literal(LiteralKind::Number),
            SyntaxKind::BigIntLiteral => self.parse_literal(LiteralKind::BigInt),
            SyntaxKind::StringLiteral => self.parse_literal(LiteralKind::String),
            SyntaxKind::SlashToken | SyntaxKind::SlashEqualsToken => {
                self.re_scan_slash_token();
                self.parse_literal(LiteralKind::RegExp)
            }
            SyntaxKind::NoSubstitutionTemplateLiteral | SyntaxKind::TemplateHead => {
                self.parse_template()
            }
            SyntaxKind::OpenParenToken => {
                // Parentheses are transparent in the tree
                self.next_token();
                let expression = self.allow_in(|p| p.parse_expression());
                self.parse_expected(SyntaxKind::CloseParenToken);
                expression
            }
            SyntaxKind::OpenBracketToken => self.parse_array_literal(),
            SyntaxKind::OpenBraceToken => self.parse_object_literal(),
            SyntaxKind::FunctionKeyword => self.parse_function_expression(pos, false),
            SyntaxKind::AsyncKeyword
                if self.next_token_on_same_line(|p| p.is_token(SyntaxKind::FunctionKeyword)) =>
            {
                self.next_token();
                self.parse_function_expression(pos, true)
            }
            SyntaxKind::ClassKeyword => self.parse_class(pos, false, true),
            SyntaxKind::NewKeyword => self.parse_new_expression(),
            SyntaxKind::ImportKeyword => self.parse_import_meta_or_call(),
            SyntaxKind::PrivateIdentifier => {
                // `#x in obj`
                let name = self.token_value();
                self.next_token();
                self.finish_node(pos, NodeData::PrivateName(name))
            }
            _ if self.is_identifier() => self.parse_identifier_node(),
            _ => {
                self.error_expression_expected();
                NodeIndex::NONE
            }
        }
    }

    fn parse_literal(&mut self, kind: LiteralKind) -> NodeIndex {
        let pos = self.token_pos();
        let value = if kind == LiteralKind::RegExp {
            self.scanner.token_text().to_string()
        } else {
            self.token_value()
        };
        self.next_token();
        self.finish_node(pos, NodeData::Literal(LiteralData { kind, value }))
    }

    /// `` `a${b}c` `` - the scanner hands back each text part after its
    /// substitution's closing brace is re-scanned.
    pub(crate) fn parse_template(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        let mut quasis = vec![self.token_value()];
        let mut expressions = Vec::new();
        if self.is_token(SyntaxKind::NoSubstitutionTemplateLiteral) {
            self.next_token();
            return self.finish_node(pos, NodeData::Template(TemplateData { quasis, expressions }));
        }
        self.next_token();
        loop {
            let expression = self.allow_in(|p| p.parse_expression());
            if expression.is_some() {
                expressions.push(expression);
            }
            if !self.is_token(SyntaxKind::CloseBraceToken) {
                self.error_token_expected("}");
                break;
            }
            self.re_scan_template_token();
            quasis.push(self.token_value());
            let is_tail = self.is_token(SyntaxKind::TemplateTail);
            self.next_token();
            if is_tail {
                break;
            }
        }
        self.finish_node(pos, NodeData::Template(TemplateData { quasis, expressions }))
    }

    fn parse_array_literal(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        self.next_token();
        let mut elements = Vec::new();
        self.allow_in(|p| {
            while !p.is_token(SyntaxKind::CloseBracketToken)
                && !p.is_token(SyntaxKind::EndOfFileToken)
            {
                if p.parse_optional(SyntaxKind::CommaToken) {
                    // Hole
                    elements.push(NodeIndex::NONE);
                    continue;
                }
                let element = p.parse_spread_or_assignment_expression();
                if element.is_none() {
                    break;
                }
                elements.push(element);
                if !p.is_token(SyntaxKind::CloseBracketToken)
                    && !p.parse_expected(SyntaxKind::CommaToken)
                {
                    break;
                }
            }
        });
        self.parse_expected(SyntaxKind::CloseBracketToken);
        self.finish_node(pos, NodeData::Array(elements))
    }

    fn parse_object_literal(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        self.next_token();
        let mut properties = Vec::new();
        self.allow_in(|p| {
            while !p.is_token(SyntaxKind::CloseBraceToken)
                && !p.is_token(SyntaxKind::EndOfFileToken)
            {
                let member_pos = p.token_pos();
                let member = if p.parse_optional(SyntaxKind::DotDotDotToken) {
                    let argument = p.parse_assignment_expression();
                    p.finish_node(member_pos, NodeData::Spread(argument))
                } else {
                    p.parse_object_literal_member(member_pos)
                };
                if member.is_none() {
                    break;
                }
                properties.push(member);
                if !p.parse_optional(SyntaxKind::CommaToken) {
                    break;
                }
            }
        });
        self.parse_expected(SyntaxKind::CloseBraceToken);
        self.finish_node(pos, NodeData::Object(properties))
    }

    /// Can the next token start a property key?
    fn next_is_property_key_start(&mut self) -> bool {
        self.look_ahead(|p| {
            p.next_token();
            p.is_identifier_or_keyword()
                || matches!(
                    p.token(),
                    SyntaxKind::StringLiteral
                        | SyntaxKind::NumericLiteral
                        | SyntaxKind::BigIntLiteral
                        | SyntaxKind::OpenBracketToken
                        | SyntaxKind::PrivateIdentifier
                        | SyntaxKind::AsteriskToken
                )
        })
    }

    fn parse_object_literal_member(&mut self, pos: u32) -> NodeIndex {
        let is_async = self.is_token(SyntaxKind::AsyncKeyword)
            && !self.look_ahead(|p| {
                p.next_token();
                p.has_preceding_line_break()
            })
            && self.next_is_property_key_start();
        if is_async {
            self.next_token();
        }
        let is_generator = self.parse_optional(SyntaxKind::AsteriskToken);

        let mut kind = PropertyKind::Init;
        let mut function_kind = FunctionKind::Method;
        if !is_async
            && !is_generator
            && (self.is_token(SyntaxKind::GetKeyword) || self.is_token(SyntaxKind::SetKeyword))
            && self.next_is_property_key_start()
        {
            if self.is_token(SyntaxKind::GetKeyword) {
                kind = PropertyKind::Get;
                function_kind = FunctionKind::Getter;
            } else {
                kind = PropertyKind::Set;
                function_kind = FunctionKind::Setter;
            }
            self.next_token();
        }

        let (key, computed) = self.parse_property_key();
        if key.is_none() {
            return NodeIndex::NONE;
        }

        // Method: `a() {}`, `get a() {}`, `async *a() {}`
        if is_async
            || is_generator
            || kind != PropertyKind::Init
            || self.is_token(SyntaxKind::OpenParenToken)
            || self.is_token(SyntaxKind::LessThanToken)
        {
            let value_pos = self.token_pos();
            let caps = FunctionCapabilities {
                is_arrow: false,
                is_generator,
                is_async,
            };
            let data = self.parse_function_rest(function_kind, caps, NodeIndex::NONE);
            let value = self.finish_node(value_pos, NodeData::FunctionLike(data));
            return self.finish_node(
                pos,
                NodeData::Property(PropertyData {
                    key,
                    value,
                    kind,
                    computed,
                    shorthand: false,
                    method: kind == PropertyKind::Init,
                }),
            );
        }

        if self.parse_optional(SyntaxKind::ColonToken) {
            let value = self.parse_assignment_expression();
            return self.finish_node(
                pos,
                NodeData::Property(PropertyData {
                    key,
                    value,
                    kind,
                    computed,
                    shorthand: false,
                    method: false,
                }),
            );
        }

        // Shorthand `{ a }`, or `{ a = 1 }` when the literal becomes a pattern
        let shorthand_name = match self.arena.data(key) {
            Some(NodeData::PropertyName(name)) if !computed => Some(name.clone()),
            _ => None,
        };
        let Some(name) = shorthand_name else {
            self.error_token_expected(":");
            return NodeIndex::NONE;
        };
        let (key_pos, key_end) = self.arena.get(key).map_or((pos, pos), |n| (n.pos, n.end));
        let mut value = self.arena.add(key_pos, key_end, NodeData::Identifier(name));
        if self.parse_optional(SyntaxKind::EqualsToken) {
            let right = self.parse_assignment_expression();
            value = self.finish_node(key_pos, NodeData::AssignmentPattern { left: value, right });
        }
        self.finish_node(
            pos,
            NodeData::Property(PropertyData {
                key,
                value,
                kind,
                computed,
                shorthand: true,
                method: false,
            }),
        )
    }

    fn parse_function_expression(&mut self, pos: u32, is_async: bool) -> NodeIndex {
        self.parse_expected(SyntaxKind::FunctionKeyword);
        let is_generator = self.parse_optional(SyntaxKind::AsteriskToken);
        let name = if self.is_identifier() {
            self.parse_identifier_node()
        } else {
            NodeIndex::NONE
        };
        let caps = FunctionCapabilities {
            is_arrow: false,
            is_generator,
            is_async,
        };
        let data = self.parse_function_rest(FunctionKind::Expression, caps, name);
        if data.body.is_none() {
            self.error_token_expected("{");
        }
        self.finish_node(pos, NodeData::FunctionLike(data))
    }

    /// `import.meta` or dynamic `import(...)`.
    fn parse_import_meta_or_call(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        let import_end = self.token_end();
        self.next_token();
        if self.parse_optional(SyntaxKind::DotToken) {
            let meta = self
                .arena
                .add(pos, import_end, NodeData::PropertyName("import".to_string()));
            let property = self.parse_property_name_node();
            return self.finish_node(pos, NodeData::MetaProperty { meta, property });
        }
        if !self.is_token(SyntaxKind::OpenParenToken) {
            self.error_token_expected("(");
            return NodeIndex::NONE;
        }
        let arguments = self.parse_arguments();
        self.finish_node(pos, NodeData::ImportCall(arguments))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(source: &str) -> (ParserState, NodeIndex) {
        let mut parser = ParserState::new("test.ts".to_string(), source.to_string());
        let root = parser.parse_source_file();
        (parser, root)
    }

    fn first_expression(parser: &ParserState, root: NodeIndex) -> NodeIndex {
        let arena = parser.get_arena();
        let Some(NodeData::SourceFile(block)) = arena.data(root) else {
            panic!("expected source file");
        };
        match arena.data(block.statements[0]) {
            Some(NodeData::ExpressionStatement(expr)) => *expr,
            other => panic!("expected expression statement, got {other:?}"),
        }
    }

    #[test]
    fn test_binary_precedence() {
        let (parser, root) = parse("a + b * c;");
        let arena = parser.get_arena();
        let expr = first_expression(&parser, root);
        let Some(NodeData::Binary(sum)) = arena.data(expr) else {
            panic!("expected binary");
        };
        assert_eq!(sum.operator, SyntaxKind::PlusToken);
        assert_eq!(arena.kind_name(sum.right), "BinaryExpression");
    }

    #[test]
    fn test_parenthesized_arrow_is_function() {
        let (parser, root) = parse("(a, b) => a + b;");
        let arena = parser.get_arena();
        let expr = first_expression(&parser, root);
        let func = arena.get_function(expr).expect("arrow");
        assert_eq!(func.kind, FunctionKind::Arrow);
        assert_eq!(func.params.len(), 2);
        assert!(parser.get_diagnostics().is_empty());
    }

    #[test]
    fn test_parenthesized_expression_is_not_arrow() {
        let (parser, root) = parse("(a, b);");
        let arena = parser.get_arena();
        let expr = first_expression(&parser, root);
        assert_eq!(arena.kind_name(expr), "SequenceExpression");
        assert!(parser.get_diagnostics().is_empty());
    }

    #[test]
    fn test_iife_callee_is_function() {
        let (parser, root) = parse("(function () { a; })();");
        let arena = parser.get_arena();
        let expr = first_expression(&parser, root);
        let call = arena.get_call(expr).expect("call");
        assert!(arena.is_function_like(call.callee));
        assert!(arena.is_direct_callee(call.callee));
    }

    #[test]
    fn test_destructuring_assignment_becomes_pattern() {
        let (parser, root) = parse("[a, { b = 1 }] = c;");
        let arena = parser.get_arena();
        let expr = first_expression(&parser, root);
        let Some(NodeData::Assignment(assign)) = arena.data(expr) else {
            panic!("expected assignment");
        };
        assert_eq!(arena.kind_name(assign.left), "ArrayPattern");
        let names: Vec<_> = arena
            .pattern_identifiers(assign.left)
            .into_iter()
            .filter_map(|id| arena.identifier_text(id))
            .collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn test_as_expression_and_generic_call() {
        let (parser, root) = parse("f<number>(x as any);");
        let arena = parser.get_arena();
        let expr = first_expression(&parser, root);
        let call = arena.get_call(expr).expect("call");
        assert_eq!(call.type_arguments.len(), 1);
        assert_eq!(arena.kind_name(call.arguments[0]), "TSAsExpression");
        assert!(parser.get_diagnostics().is_empty());
    }

    #[test]
    fn test_comparison_is_not_generic_call() {
        let (parser, root) = parse("a < b && c > (d);");
        let arena = parser.get_arena();
        let expr = first_expression(&parser, root);
        assert_eq!(arena.kind_name(expr), "LogicalExpression");
        assert!(parser.get_diagnostics().is_empty());
    }

    #[test]
    fn test_template_with_substitutions() {
        let (parser, root) = parse("`a${b}c${d}e`;");
        let arena = parser.get_arena();
        let expr = first_expression(&parser, root);
        let Some(NodeData::Template(template)) = arena.data(expr) else {
            panic!("expected template");
        };
        assert_eq!(template.quasis, vec!["a", "c", "e"]);
        assert_eq!(template.expressions.len(), 2);
    }

    #[test]
    fn test_async_arrow_and_await() {
        let (parser, root) = parse("async x => await x;");
        let arena = parser.get_arena();
        let expr = first_expression(&parser, root);
        let func = arena.get_function(expr).expect("arrow");
        assert!(func.caps.is_async);
        assert_eq!(arena.kind_name(func.body), "AwaitExpression");
    }
}
