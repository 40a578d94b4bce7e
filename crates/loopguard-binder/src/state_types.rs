//! Type positions.
//!
//! Names in types produce type references, which never observe a runtime
//! value. `typeof x` is the exception: it reads the value `x`.

use crate::scopes::{DeclarationKind, ReferenceFlags, ScopeId};
use crate::state::BinderState;
use loopguard_parser::parser::NodeData;
use loopguard_parser::{NodeArena, NodeIndex};

impl BinderState {
    pub(crate) fn bind_type(&mut self, arena: &NodeArena, idx: NodeIndex) {
        let Some(data) = arena.data(idx) else {
            return;
        };
        match data {
            NodeData::Identifier(_) => {
                self.add_reference(arena, idx, ReferenceFlags::READ | ReferenceFlags::TYPE)
            }
            NodeData::TypeReference(reference) => {
                let head = Self::entity_name_head(arena, reference.name);
                self.bind_type(arena, head);
                self.bind_type_list(arena, &reference.type_arguments);
            }
            NodeData::QualifiedName { .. } => {
                let head = Self::entity_name_head(arena, idx);
                self.bind_type(arena, head);
            }
            NodeData::TypeQuery(name) => {
                let head = Self::entity_name_head(arena, *name);
                if matches!(arena.data(head), Some(NodeData::Identifier(_))) {
                    self.add_reference(arena, head, ReferenceFlags::READ);
                }
            }
            // Parameter names of signatures are not bindings
            NodeData::FunctionType(sig) | NodeData::CallSignature(sig) | NodeData::MethodSignature(sig) => {
                self.bind_signature_key(arena, sig.key);
                self.bind_type_list(arena, &sig.type_parameters);
                self.bind_signature_params(arena, &sig.params);
                self.bind_type(arena, sig.return_type);
            }
            NodeData::IndexSignature { params, annotation } => {
                self.bind_signature_params(arena, params);
                self.bind_type(arena, *annotation);
            }
            NodeData::PropertySignature(sig) => {
                if sig.computed {
                    self.bind_node(arena, sig.key);
                }
                self.bind_type(arena, sig.annotation);
            }
            NodeData::TypeParameter(param) => {
                self.bind_type(arena, param.constraint);
                self.bind_type(arena, param.default);
            }
            NodeData::TypePredicate { annotation, .. } => self.bind_type(arena, *annotation),
            NodeData::LiteralType(literal) => {
                // Template literal types hold types in their substitutions
                if let Some(NodeData::Template(template)) = arena.data(*literal) {
                    self.bind_type_list(arena, &template.expressions);
                }
            }
            NodeData::TypeKeyword(_)
            | NodeData::Parameter(_)
            | NodeData::PropertyName(_)
            | NodeData::PrivateName(_)
            | NodeData::Literal(_) => {}
            NodeData::ArrayType(_)
            | NodeData::TupleType(_)
            | NodeData::UnionType(_)
            | NodeData::IntersectionType(_)
            | NodeData::TypeLiteral(_)
            | NodeData::TypeOperator { .. }
            | NodeData::IndexedAccessType { .. }
            | NodeData::ConditionalType(_)
            | NodeData::InferType(_)
            | NodeData::MappedType { .. }
            | NodeData::RestElement(_) => {
                for child in arena.children(idx) {
                    self.bind_type(arena, child);
                }
            }
            // Anything else in a type position is an expression
            _ => self.bind_node(arena, idx),
        }
    }

    pub(crate) fn bind_type_list(&mut self, arena: &NodeArena, list: &[NodeIndex]) {
        for &idx in list {
            self.bind_type(arena, idx);
        }
    }

    /// Declare the type parameters of a function or class in its scope.
    pub(crate) fn declare_type_parameters(
        &mut self,
        arena: &NodeArena,
        scope: ScopeId,
        params: &[NodeIndex],
    ) {
        for &param in params {
            if let Some(NodeData::TypeParameter(data)) = arena.data(param) {
                self.declare(
                    arena,
                    scope,
                    data.name,
                    DeclarationKind::TypeParameter,
                    param,
                    NodeIndex::NONE,
                );
                self.bind_type(arena, data.constraint);
                self.bind_type(arena, data.default);
            }
        }
    }

    fn bind_signature_key(&mut self, arena: &NodeArena, key: NodeIndex) {
        if !matches!(
            arena.data(key),
            None | Some(NodeData::PropertyName(_) | NodeData::Literal(_) | NodeData::PrivateName(_))
        ) {
            self.bind_node(arena, key);
        }
    }

    fn bind_signature_params(&mut self, arena: &NodeArena, params: &[NodeIndex]) {
        for &param in params {
            if let Some(NodeData::Parameter(data)) = arena.data(param) {
                self.bind_type(arena, data.type_annotation);
            }
        }
    }

    /// Leftmost identifier of `a.b.c`.
    fn entity_name_head(arena: &NodeArena, mut idx: NodeIndex) -> NodeIndex {
        while let Some(NodeData::QualifiedName { left, .. }) = arena.data(idx) {
            idx = *left;
        }
        idx
    }
}
