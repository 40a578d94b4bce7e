//! Binding and assignment patterns.
//!
//! A pattern is flattened into the identifiers it assigns, the expressions
//! evaluated while destructuring (defaults, computed keys, member targets)
//! and the type annotations attached to it. Declarations, parameters and
//! assignments all go through the same flattening.

use crate::scopes::{DeclarationKind, ReferenceFlags, ScopeId};
use crate::state::BinderState;
use loopguard_parser::parser::NodeData;
use loopguard_parser::{NodeArena, NodeIndex};
use smallvec::SmallVec;

/// An identifier assigned by a pattern.
#[derive(Clone, Copy, Debug)]
pub(crate) struct PatternTarget {
    pub identifier: NodeIndex,
    /// Number of `= default` clauses the identifier sits under
    pub defaults: u32,
}

#[derive(Debug, Default)]
pub(crate) struct PatternParts {
    pub targets: SmallVec<[PatternTarget; 4]>,
    /// Expressions evaluated during destructuring, in source order
    pub right_hand: Vec<NodeIndex>,
    pub type_annotations: Vec<NodeIndex>,
}

impl PatternParts {
    pub(crate) fn collect(arena: &NodeArena, pattern: NodeIndex) -> PatternParts {
        let mut parts = PatternParts::default();
        parts.walk(arena, pattern, 0);
        parts
    }

    fn walk(&mut self, arena: &NodeArena, idx: NodeIndex, defaults: u32) {
        let Some(data) = arena.data(idx) else {
            return;
        };
        match data {
            NodeData::Identifier(_) => self.targets.push(PatternTarget {
                identifier: idx,
                defaults,
            }),
            NodeData::ObjectPattern(list) => {
                for &element in list {
                    match arena.data(element) {
                        Some(NodeData::Property(prop)) => {
                            if prop.computed {
                                self.right_hand.push(prop.key);
                            }
                            self.walk(arena, prop.value, defaults);
                        }
                        _ => self.walk(arena, element, defaults),
                    }
                }
            }
            NodeData::ArrayPattern(list) => {
                for &element in list {
                    self.walk(arena, element, defaults);
                }
            }
            NodeData::AssignmentPattern { left, right } => {
                self.walk(arena, *left, defaults + 1);
                self.right_hand.push(*right);
            }
            NodeData::RestElement(argument) => self.walk(arena, *argument, defaults),
            NodeData::Parameter(param) => {
                self.walk(arena, param.pattern, defaults);
                if param.type_annotation.is_some() {
                    self.type_annotations.push(param.type_annotation);
                }
            }
            NodeData::NonNull(expression) => self.walk(arena, *expression, defaults),
            NodeData::TypeCast(cast) => {
                self.walk(arena, cast.expression, defaults);
                self.type_annotations.push(cast.annotation);
            }
            // `this` parameter
            NodeData::PropertyName(_) => {}
            // Member expressions and anything else are evaluated, not bound
            _ => self.right_hand.push(idx),
        }
    }
}

impl BinderState {
    /// Declare every identifier of `pattern` in `scope`.
    ///
    /// Each `= default` the identifier sits under and the optional `init`
    /// produce an initialising write made from the current scope.
    pub(crate) fn bind_declaration_pattern(
        &mut self,
        arena: &NodeArena,
        pattern: NodeIndex,
        scope: ScopeId,
        kind: DeclarationKind,
        declaration: NodeIndex,
        owning_loop: NodeIndex,
        has_init: bool,
    ) {
        let parts = PatternParts::collect(arena, pattern);
        for target in &parts.targets {
            self.declare(arena, scope, target.identifier, kind, declaration, owning_loop);
            for _ in 0..target.defaults {
                self.add_reference(arena, target.identifier, ReferenceFlags::WRITE | ReferenceFlags::INIT);
            }
            if has_init {
                self.add_reference(arena, target.identifier, ReferenceFlags::WRITE | ReferenceFlags::INIT);
            }
        }
        self.bind_pattern_rest(arena, &parts);
    }

    /// Record writes for every identifier assigned by `pattern`.
    pub(crate) fn bind_assignment_target(
        &mut self,
        arena: &NodeArena,
        pattern: NodeIndex,
        flags: ReferenceFlags,
    ) {
        let parts = PatternParts::collect(arena, pattern);
        for target in &parts.targets {
            for _ in 0..target.defaults {
                self.add_reference(arena, target.identifier, ReferenceFlags::WRITE);
            }
            self.add_reference(arena, target.identifier, flags);
        }
        self.bind_pattern_rest(arena, &parts);
    }

    /// Type annotations first, then the evaluated expressions.
    fn bind_pattern_rest(&mut self, arena: &NodeArena, parts: &PatternParts) {
        for &annotation in &parts.type_annotations {
            self.bind_type(arena, annotation);
        }
        for &expression in &parts.right_hand {
            self.bind_node(arena, expression);
        }
    }
}
