//! Parser state - type annotation parsing methods

use super::node::*;
use super::state::{CONTEXT_FLAG_DISALLOW_CONDITIONAL_TYPES, ParserState};
use loopguard_common::diagnostic_codes;
use loopguard_scanner::SyntaxKind;

/// Type names that are keywords in type position.
const TYPE_KEYWORDS: &[&str] = &[
    "any",
    "unknown",
    "number",
    "string",
    "boolean",
    "bigint",
    "symbol",
    "object",
    "never",
    "undefined",
    "void",
    "null",
    "this",
    "intrinsic",
];

impl ParserState {
    // =========================================================================
    // Annotations
    // =========================================================================

    /// `: T` if present.
    pub(crate) fn parse_type_annotation(&mut self) -> NodeIndex {
        if self.parse_optional(SyntaxKind::ColonToken) {
            self.parse_type()
        } else {
            NodeIndex::NONE
        }
    }

    /// `: T`, `: x is T` or `: asserts x` if present.
    pub(crate) fn parse_return_type_annotation(&mut self) -> NodeIndex {
        if self.parse_optional(SyntaxKind::ColonToken) {
            self.parse_type_or_type_predicate()
        } else {
            NodeIndex::NONE
        }
    }

    fn parse_type_or_type_predicate(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        let is_predicate_subject = |p: &Self| p.is_identifier() || p.is_token(SyntaxKind::ThisKeyword);

        if self.is_identifier_text("asserts") && self.next_token_on_same_line(is_predicate_subject) {
            self.next_token();
            let parameter = self.parse_property_name_node();
            let annotation = if self.is_identifier_text("is") && !self.has_preceding_line_break() {
                self.next_token();
                self.parse_type()
            } else {
                NodeIndex::NONE
            };
            return self.finish_node(
                pos,
                NodeData::TypePredicate {
                    parameter,
                    annotation,
                },
            );
        }

        if is_predicate_subject(self) && self.next_token_on_same_line(|p| p.is_identifier_text("is")) {
            let parameter = self.parse_property_name_node();
            self.next_token();
            let annotation = self.parse_type();
            return self.finish_node(
                pos,
                NodeData::TypePredicate {
                    parameter,
                    annotation,
                },
            );
        }

        self.parse_type()
    }

    // =========================================================================
    // Types
    // =========================================================================

    pub(crate) fn parse_type(&mut self) -> NodeIndex {
        if !self.enter_recursion() {
            return NodeIndex::NONE;
        }
        let result = self.parse_type_worker();
        self.exit_recursion();
        result
    }

    fn parse_type_worker(&mut self) -> NodeIndex {
        if let Some(function_type) = self.parse_function_type_if_present() {
            return function_type;
        }

        let pos = self.token_pos();
        let check_type = self.parse_union_type();
        if check_type.is_none()
            || self.in_context(CONTEXT_FLAG_DISALLOW_CONDITIONAL_TYPES)
            || !self.is_token(SyntaxKind::ExtendsKeyword)
            || self.has_preceding_line_break()
        {
            return check_type;
        }

        self.next_token();
        let extends_type = self.with_context(
            self.context_flags | CONTEXT_FLAG_DISALLOW_CONDITIONAL_TYPES,
            |p| p.parse_type(),
        );
        let branch_flags = self.context_flags & !CONTEXT_FLAG_DISALLOW_CONDITIONAL_TYPES;
        self.parse_expected(SyntaxKind::QuestionToken);
        let true_type = self.with_context(branch_flags, |p| p.parse_type());
        self.parse_expected(SyntaxKind::ColonToken);
        let false_type = self.with_context(branch_flags, |p| p.parse_type());
        self.finish_node(
            pos,
            NodeData::ConditionalType(ConditionalTypeData {
                check_type,
                extends_type,
                true_type,
                false_type,
            }),
        )
    }

    /// `(a: A) => R`, `<T>(a: T) => R` and `new (...) => R`.
    fn parse_function_type_if_present(&mut self) -> Option<NodeIndex> {
        let is_constructor = self.is_token(SyntaxKind::NewKeyword)
            || (self.is_token(SyntaxKind::AbstractKeyword)
                && self.next_token_is(SyntaxKind::NewKeyword));
        if !is_constructor
            && !self.is_token(SyntaxKind::OpenParenToken)
            && !self.is_token(SyntaxKind::LessThanToken)
        {
            return None;
        }
        self.try_parse(|p| {
            let pos = p.token_pos();
            p.parse_optional(SyntaxKind::AbstractKeyword);
            p.parse_optional(SyntaxKind::NewKeyword);
            let type_parameters = p.parse_type_parameters_opt();
            if !p.is_token(SyntaxKind::OpenParenToken) {
                return None;
            }
            let params = p.parse_parameter_list();
            if !p.parse_optional(SyntaxKind::EqualsGreaterThanToken) {
                return None;
            }
            let return_type = p.parse_type_or_type_predicate();
            Some(p.finish_node(
                pos,
                NodeData::FunctionType(SignatureData {
                    key: NodeIndex::NONE,
                    type_parameters,
                    params,
                    return_type,
                }),
            ))
        })
    }

    fn parse_union_type(&mut self) -> NodeIndex {
        self.parse_type_list(SyntaxKind::BarToken, |p| p.parse_intersection_type())
    }

    fn parse_intersection_type(&mut self) -> NodeIndex {
        self.parse_type_list(SyntaxKind::AmpersandToken, |p| p.parse_type_operator())
    }

    /// `A | B | C` or `A & B & C`, with an optional leading separator.
    fn parse_type_list(
        &mut self,
        separator: SyntaxKind,
        mut parse_member: impl FnMut(&mut Self) -> NodeIndex,
    ) -> NodeIndex {
        let pos = self.token_pos();
        self.parse_optional(separator);
        let first = parse_member(self);
        if first.is_none() || !self.is_token(separator) {
            return first;
        }
        let mut types = vec![first];
        while self.parse_optional(separator) {
            let next = parse_member(self);
            if next.is_none() {
                break;
            }
            types.push(next);
        }
        self.finish_node(
            pos,
            if separator == SyntaxKind::BarToken {
                NodeData::UnionType(types)
            } else {
                NodeData::IntersectionType(types)
            },
        )
    }

    fn parse_type_operator(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        match self.token() {
            SyntaxKind::KeyOfKeyword | SyntaxKind::ReadonlyKeyword => {
                let operator = self.token();
                self.next_token();
                let type_node = self.parse_type_operator();
                self.finish_node(pos, NodeData::TypeOperator { operator, type_node })
            }
            _ if self.is_identifier_text("unique")
                && self.next_token_on_same_line(|p| p.is_identifier()) =>
            {
                // `unique symbol`
                self.next_token();
                self.parse_type_operator()
            }
            _ if self.is_identifier_text("infer")
                && self.next_token_on_same_line(|p| p.is_identifier()) =>
            {
                self.next_token();
                let param_pos = self.token_pos();
                let name = self.parse_identifier_node();
                let constraint = if self.is_token(SyntaxKind::ExtendsKeyword) {
                    self.try_parse(|p| {
                        p.next_token();
                        let constraint = p.with_context(
                            p.context_flags | CONTEXT_FLAG_DISALLOW_CONDITIONAL_TYPES,
                            |q| q.parse_type(),
                        );
                        // `infer U extends X ? ...` belongs to the outer conditional
                        (!p.is_token(SyntaxKind::QuestionToken)).then_some(constraint)
                    })
                    .unwrap_or(NodeIndex::NONE)
                } else {
                    NodeIndex::NONE
                };
                let parameter = self.finish_node(
                    param_pos,
                    NodeData::TypeParameter(TypeParameterData {
                        name,
                        constraint,
                        default: NodeIndex::NONE,
                    }),
                );
                self.finish_node(pos, NodeData::InferType(parameter))
            }
            _ => self.parse_postfix_type(),
        }
    }

    /// `T[]` and `T[K]`.
    fn parse_postfix_type(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        let mut result = self.parse_non_array_type();
        while result.is_some()
            && self.is_token(SyntaxKind::OpenBracketToken)
            && !self.has_preceding_line_break()
        {
            self.next_token();
            if self.parse_optional(SyntaxKind::CloseBracketToken) {
                result = self.finish_node(pos, NodeData::ArrayType(result));
            } else {
                let index = self.parse_type();
                self.parse_expected(SyntaxKind::CloseBracketToken);
                result = self.finish_node(
                    pos,
                    NodeData::IndexedAccessType {
                        object: result,
                        index,
                    },
                );
            }
        }
        result
    }

    fn parse_non_array_type(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        match self.token() {
            SyntaxKind::OpenParenToken => {
                self.next_token();
                let inner = self.with_context(
                    self.context_flags & !CONTEXT_FLAG_DISALLOW_CONDITIONAL_TYPES,
                    |p| p.parse_type(),
                );
                self.parse_expected(SyntaxKind::CloseParenToken);
                inner
            }
            SyntaxKind::OpenBraceToken => {
                if self.is_mapped_type_start() {
                    self.parse_mapped_type()
                } else {
                    let members = self.parse_type_members();
                    self.finish_node(pos, NodeData::TypeLiteral(members))
                }
            }
            SyntaxKind::OpenBracketToken => self.parse_tuple_type(),
            SyntaxKind::TypeOfKeyword => self.parse_type_query(),
            SyntaxKind::StringLiteral
            | SyntaxKind::NumericLiteral
            | SyntaxKind::BigIntLiteral
            | SyntaxKind::TrueKeyword
            | SyntaxKind::FalseKeyword
            | SyntaxKind::NoSubstitutionTemplateLiteral => {
                let literal = self.parse_primary_expression();
                self.finish_node(pos, NodeData::LiteralType(literal))
            }
            SyntaxKind::TemplateHead => self.parse_template_literal_type(),
            SyntaxKind::MinusToken if self.next_token_is(SyntaxKind::NumericLiteral) => {
                self.next_token();
                let value = format!("-{}", self.token_value());
                self.next_token();
                let literal = self.finish_node(
                    pos,
                    NodeData::Literal(LiteralData {
                        kind: LiteralKind::Number,
                        value,
                    }),
                );
                self.finish_node(pos, NodeData::LiteralType(literal))
            }
            SyntaxKind::ImportKeyword => {
                // `import("m").T` - the target is in another module
                self.next_token();
                self.parse_expected(SyntaxKind::OpenParenToken);
                self.parse_optional(SyntaxKind::StringLiteral);
                self.parse_expected(SyntaxKind::CloseParenToken);
                while self.parse_optional(SyntaxKind::DotToken) {
                    self.parse_property_name_node();
                }
                if self.is_token(SyntaxKind::LessThanToken) {
                    self.parse_type_arguments();
                }
                self.finish_node(pos, NodeData::TypeKeyword("import".to_string()))
            }
            _ if self.is_identifier_or_keyword() => {
                let text = self.token_value();
                if TYPE_KEYWORDS.contains(&text.as_str()) && !self.next_token_is(SyntaxKind::DotToken) {
                    self.next_token();
                    return self.finish_node(pos, NodeData::TypeKeyword(text));
                }
                self.parse_type_reference()
            }
            _ => {
                self.error_at_current_token(diagnostic_codes::TYPE_EXPECTED, &[]);
                NodeIndex::NONE
            }
        }
    }

    /// `` `prefix${T}suffix` `` in type position.
    fn parse_template_literal_type(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        let mut quasis = vec![self.token_value()];
        let mut expressions = Vec::new();
        self.next_token();
        loop {
            let inner = self.parse_type();
            if inner.is_some() {
                expressions.push(inner);
            }
            if !self.is_token(SyntaxKind::CloseBraceToken) {
                self.error_token_expected("}");
                break;
            }
            self.current_token = self.scanner.re_scan_template_token();
            quasis.push(self.token_value());
            let is_tail = self.is_token(SyntaxKind::TemplateTail);
            self.next_token();
            if is_tail {
                break;
            }
        }
        let template = self.finish_node(pos, NodeData::Template(TemplateData { quasis, expressions }));
        self.finish_node(pos, NodeData::LiteralType(template))
    }

    /// `A.B.C<T>`
    pub(crate) fn parse_type_reference(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        let name = self.parse_entity_name();
        if name.is_none() {
            return NodeIndex::NONE;
        }
        let type_arguments =
            if self.is_token(SyntaxKind::LessThanToken) && !self.has_preceding_line_break() {
                self.parse_type_arguments()
            } else {
                Vec::new()
            };
        self.finish_node(
            pos,
            NodeData::TypeReference(TypeReferenceData {
                name,
                type_arguments,
            }),
        )
    }

    /// Dotted name whose first part is a reference and the rest are
    /// property names.
    fn parse_entity_name(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        if !self.is_identifier_or_keyword() {
            self.error_at_current_token(diagnostic_codes::IDENTIFIER_EXPECTED, &[]);
            return NodeIndex::NONE;
        }
        let text = self.token_value();
        self.next_token();
        let mut name = self.finish_node(pos, NodeData::Identifier(text));
        while self.parse_optional(SyntaxKind::DotToken) {
            let right = self.parse_property_name_node();
            name = self.finish_node(pos, NodeData::QualifiedName { left: name, right });
        }
        name
    }

    /// `typeof x.y<T>`
    fn parse_type_query(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        self.next_token();
        let name = self.parse_entity_name();
        if self.is_token(SyntaxKind::LessThanToken) && !self.has_preceding_line_break() {
            self.parse_type_arguments();
        }
        self.finish_node(pos, NodeData::TypeQuery(name))
    }

    /// `[A, B?, ...C[]]` and labelled `[name: A, rest?: B]`.
    fn parse_tuple_type(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        self.next_token();
        let mut elements = Vec::new();
        while !self.is_token(SyntaxKind::CloseBracketToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            self.parse_optional(SyntaxKind::DotDotDotToken);
            let is_labelled = self.is_identifier_or_keyword()
                && self.look_ahead(|p| {
                    p.next_token();
                    p.parse_optional(SyntaxKind::QuestionToken);
                    p.is_token(SyntaxKind::ColonToken)
                });
            if is_labelled {
                self.next_token();
                self.parse_optional(SyntaxKind::QuestionToken);
                self.next_token();
                self.parse_optional(SyntaxKind::DotDotDotToken);
            }
            let element = self.parse_type();
            if element.is_none() {
                break;
            }
            self.parse_optional(SyntaxKind::QuestionToken);
            elements.push(element);
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }
        self.parse_expected(SyntaxKind::CloseBracketToken);
        self.finish_node(pos, NodeData::TupleType(elements))
    }

    fn is_mapped_type_start(&mut self) -> bool {
        self.look_ahead(|p| {
            p.next_token();
            if p.is_token(SyntaxKind::PlusToken) || p.is_token(SyntaxKind::MinusToken) {
                p.next_token();
            }
            if p.is_token(SyntaxKind::ReadonlyKeyword) {
                p.next_token();
            }
            if !p.is_token(SyntaxKind::OpenBracketToken) {
                return false;
            }
            p.next_token();
            if !p.is_identifier() {
                return false;
            }
            p.next_token();
            p.is_token(SyntaxKind::InKeyword)
        })
    }

    /// `{ readonly [K in keyof T]?: T[K] }`
    fn parse_mapped_type(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        self.parse_expected(SyntaxKind::OpenBraceToken);
        if !self.parse_optional(SyntaxKind::PlusToken) {
            self.parse_optional(SyntaxKind::MinusToken);
        }
        self.parse_optional(SyntaxKind::ReadonlyKeyword);
        self.parse_expected(SyntaxKind::OpenBracketToken);
        let param_pos = self.token_pos();
        let name = self.parse_identifier_node();
        self.parse_expected(SyntaxKind::InKeyword);
        let constraint = self.parse_type();
        // Key remapping: `as NewKey`
        let default = if self.parse_optional(SyntaxKind::AsKeyword) {
            self.parse_type()
        } else {
            NodeIndex::NONE
        };
        let type_parameter = self.finish_node(
            param_pos,
            NodeData::TypeParameter(TypeParameterData {
                name,
                constraint,
                default,
            }),
        );
        self.parse_expected(SyntaxKind::CloseBracketToken);
        if !self.parse_optional(SyntaxKind::PlusToken) {
            self.parse_optional(SyntaxKind::MinusToken);
        }
        self.parse_optional(SyntaxKind::QuestionToken);
        let annotation = self.parse_type_annotation();
        self.parse_optional(SyntaxKind::SemicolonToken);
        self.parse_expected(SyntaxKind::CloseBraceToken);
        self.finish_node(
            pos,
            NodeData::MappedType {
                type_parameter,
                annotation,
            },
        )
    }

    // =========================================================================
    // Type parameters and arguments
    // =========================================================================

    /// `<T extends U = D, ...>` if present.
    pub(crate) fn parse_type_parameters_opt(&mut self) -> NodeList {
        let mut params = Vec::new();
        if !self.parse_optional(SyntaxKind::LessThanToken) {
            return params;
        }
        while !self.is_token(SyntaxKind::GreaterThanToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            let pos = self.token_pos();
            // Variance and const modifiers
            while (self.is_token(SyntaxKind::ConstKeyword)
                || self.is_token(SyntaxKind::InKeyword)
                || self.is_identifier_text("out"))
                && self.look_ahead(|p| {
                    p.next_token();
                    p.is_identifier()
                })
            {
                self.next_token();
            }
            let name = self.parse_identifier_node();
            if name.is_none() {
                break;
            }
            let constraint = if self.parse_optional(SyntaxKind::ExtendsKeyword) {
                self.parse_type()
            } else {
                NodeIndex::NONE
            };
            let default = if self.parse_optional(SyntaxKind::EqualsToken) {
                self.parse_type()
            } else {
                NodeIndex::NONE
            };
            params.push(self.finish_node(
                pos,
                NodeData::TypeParameter(TypeParameterData {
                    name,
                    constraint,
                    default,
                }),
            ));
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }
        self.parse_expected(SyntaxKind::GreaterThanToken);
        params
    }

    /// `<A, B>`
    pub(crate) fn parse_type_arguments(&mut self) -> NodeList {
        let mut args = Vec::new();
        if !self.parse_expected(SyntaxKind::LessThanToken) {
            return args;
        }
        while !self.is_token(SyntaxKind::GreaterThanToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            let arg = self.parse_type();
            if arg.is_none() {
                break;
            }
            args.push(arg);
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }
        self.parse_expected(SyntaxKind::GreaterThanToken);
        args
    }

    // =========================================================================
    // Type members
    // =========================================================================

    /// `{ member; member, ... }` of an interface or type literal.
    pub(crate) fn parse_type_members(&mut self) -> NodeList {
        let mut members = Vec::new();
        if !self.parse_expected(SyntaxKind::OpenBraceToken) {
            return members;
        }
        while !self.is_token(SyntaxKind::CloseBraceToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            let start = self.token_pos();
            let member = self.parse_type_member();
            if member.is_some() {
                members.push(member);
            }
            if !self.parse_optional(SyntaxKind::SemicolonToken) {
                self.parse_optional(SyntaxKind::CommaToken);
            }
            if self.token_pos() == start {
                self.next_token();
            }
        }
        self.parse_expected(SyntaxKind::CloseBraceToken);
        members
    }

    fn parse_type_member(&mut self) -> NodeIndex {
        let pos = self.token_pos();

        let is_construct = self.is_token(SyntaxKind::NewKeyword)
            && self.look_ahead(|p| {
                matches!(
                    p.next_token(),
                    SyntaxKind::OpenParenToken | SyntaxKind::LessThanToken
                )
            });
        if is_construct {
            self.next_token();
        }
        if is_construct
            || self.is_token(SyntaxKind::OpenParenToken)
            || self.is_token(SyntaxKind::LessThanToken)
        {
            let signature = self.parse_signature_rest(NodeIndex::NONE);
            return self.finish_node(pos, NodeData::CallSignature(signature));
        }

        if self.is_token(SyntaxKind::ReadonlyKeyword)
            && self.look_ahead(|p| {
                p.next_token();
                !matches!(
                    p.token(),
                    SyntaxKind::ColonToken
                        | SyntaxKind::QuestionToken
                        | SyntaxKind::OpenParenToken
                        | SyntaxKind::SemicolonToken
                        | SyntaxKind::CommaToken
                        | SyntaxKind::CloseBraceToken
                )
            })
        {
            self.next_token();
        }
        if self.is_token(SyntaxKind::OpenBracketToken) && self.is_index_signature_start() {
            return self.parse_index_signature(pos);
        }
        if (self.is_token(SyntaxKind::GetKeyword) || self.is_token(SyntaxKind::SetKeyword))
            && self.look_ahead(|p| {
                p.next_token();
                p.is_identifier_or_keyword()
                    || matches!(
                        p.token(),
                        SyntaxKind::StringLiteral
                            | SyntaxKind::NumericLiteral
                            | SyntaxKind::OpenBracketToken
                    )
            })
        {
            self.next_token();
        }

        let (key, computed) = self.parse_property_key();
        if key.is_none() {
            return NodeIndex::NONE;
        }
        let optional = self.parse_optional(SyntaxKind::QuestionToken);
        if self.is_token(SyntaxKind::OpenParenToken) || self.is_token(SyntaxKind::LessThanToken) {
            let signature = self.parse_signature_rest(key);
            return self.finish_node(pos, NodeData::MethodSignature(signature));
        }
        let annotation = self.parse_type_annotation();
        self.finish_node(
            pos,
            NodeData::PropertySignature(PropertySignatureData {
                key,
                computed,
                optional,
                annotation,
            }),
        )
    }

    fn parse_signature_rest(&mut self, key: NodeIndex) -> SignatureData {
        let type_parameters = self.parse_type_parameters_opt();
        let params = self.parse_parameter_list();
        let return_type = self.parse_return_type_annotation();
        SignatureData {
            key,
            type_parameters,
            params,
            return_type,
        }
    }

    /// `[` name `:` ... starts an index signature rather than a computed key.
    pub(crate) fn is_index_signature_start(&mut self) -> bool {
        self.look_ahead(|p| {
            p.next_token();
            if !p.is_identifier_or_keyword() {
                return false;
            }
            p.next_token();
            p.is_token(SyntaxKind::ColonToken)
        })
    }

    /// `[key: K]: T`
    pub(crate) fn parse_index_signature(&mut self, pos: u32) -> NodeIndex {
        self.parse_expected(SyntaxKind::OpenBracketToken);
        let param_pos = self.token_pos();
        let name = self.parse_property_name_node();
        let type_annotation = self.parse_type_annotation();
        let param = self.finish_node(
            param_pos,
            NodeData::Parameter(ParameterData {
                pattern: name,
                optional: false,
                type_annotation,
            }),
        );
        self.parse_expected(SyntaxKind::CloseBracketToken);
        let annotation = self.parse_type_annotation();
        self.finish_node(
            pos,
            NodeData::IndexSignature {
                params: vec![param],
                annotation,
            },
        )
    }
}
