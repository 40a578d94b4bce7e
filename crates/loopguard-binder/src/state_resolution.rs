//! Reference resolution.
//!
//! Runs once after the walk, so every declaration of the file is known and
//! hoisted or later-declared names resolve like they do at runtime.

use crate::scopes::{BindingId, ReferenceId, ScopeId, ScopeKind};
use crate::state::BinderState;
use loopguard_common::limits::MAX_SCOPE_WALK_ITERATIONS;
use loopguard_parser::NodeArena;
use tracing::{trace, warn};

impl BinderState {
    pub(crate) fn resolve_references(&mut self, arena: &NodeArena) {
        for index in 0..self.references.len() {
            let id = ReferenceId(index as u32);
            let mut scope = self.references[index].from;
            let mut iterations = 0usize;
            while scope.is_some() {
                iterations += 1;
                if iterations > MAX_SCOPE_WALK_ITERATIONS {
                    warn!(reference = id.0, "scope chain too deep, leaving reference unresolved");
                    break;
                }
                if let Some(binding) = self.resolve_in_scope(arena, scope, id) {
                    self.references[index].resolved = Some(binding);
                    self.bindings[binding.0 as usize].references.push(id);
                    break;
                }
                self.scopes[scope.0 as usize].through.push(id);
                scope = self.scopes[scope.0 as usize].parent;
            }
            trace!(
                reference = id.0,
                name = %self.references[index].name,
                resolved = ?self.references[index].resolved,
                "resolve reference"
            );
        }
    }

    /// Binding in `scope` that `reference` may resolve to.
    fn resolve_in_scope(
        &self,
        arena: &NodeArena,
        scope: ScopeId,
        reference: ReferenceId,
    ) -> Option<BindingId> {
        let reference = self.reference(reference)?;
        let scope_data = self.scope(scope)?;
        let binding_id = scope_data.get(&reference.name)?;
        let binding = self.binding(binding_id)?;

        let namespace_ok = if reference.is_type_reference() {
            binding.is_type()
        } else {
            binding.is_value()
        };
        if !namespace_ok {
            return None;
        }

        // A parameter default cannot see declarations made in the body
        if scope_data.kind == ScopeKind::Function
            && let Some(body_start) = arena
                .get_function(scope_data.block)
                .and_then(|func| arena.get(func.body))
                .map(|body| body.pos)
            && reference.pos < body_start
            && binding.defs.iter().all(|def| {
                arena
                    .get(def.name_node)
                    .is_none_or(|name| name.pos >= body_start)
            })
        {
            return None;
        }

        Some(binding_id)
    }
}
