//! Binding classification.
//!
//! A captured binding is safe for a loop when a closure created in any
//! iteration observes the same value as code running in that iteration.
//! Constants always are. A `let` declared inside the loop gets a fresh cell
//! per iteration. Anything else is safe only if every write to it happens
//! before the outermost enclosing loop starts, from the binding's own
//! function.

use crate::state::NoLoopFuncState;
use loopguard_binder::{BindingId, DeclarationKind, Reference};
use loopguard_parser::NodeIndex;
use tracing::{debug, trace};

impl<'a> NoLoopFuncState<'a> {
    /// Is `reference`, captured by a closure inside `loop_node`, stable
    /// across the iterations of that loop?
    pub fn is_safe(&mut self, loop_node: NodeIndex, reference: &Reference) -> bool {
        if reference.is_type_reference() {
            return true;
        }
        // Undeclared names are another rule's business
        let Some(binding) = reference.resolved else {
            return true;
        };
        if let Some(&verdict) = self.safe_verdicts.get(&(loop_node, binding)) {
            return verdict;
        }
        let verdict = self.classify_binding(loop_node, binding);
        trace!(loop_node = loop_node.0, binding = binding.0, safe = verdict, "classify binding");
        self.safe_verdicts.insert((loop_node, binding), verdict);
        verdict
    }

    fn classify_binding(&mut self, loop_node: NodeIndex, binding_id: BindingId) -> bool {
        let arena = self.arena;
        let binder = self.binder;
        let Some(binding) = binder.binding(binding_id) else {
            debug!(binding = binding_id.0, "binding missing from scope graph");
            return true;
        };

        let kind = binding.kind();
        if kind.is_effectively_constant() {
            return true;
        }

        // Only variable declarations carry a range worth comparing
        let declaration = match kind {
            DeclarationKind::Var | DeclarationKind::Let => binding
                .first_definition()
                .map(|def| def.declaration)
                .filter(|decl| decl.is_some()),
            _ => None,
        };

        if kind == DeclarationKind::Let
            && let Some(loop_span) = arena.span(loop_node)
            && let Some(decl_span) = declaration.and_then(|decl| arena.span(decl))
            && loop_span.strictly_contains(decl_span)
        {
            return true;
        }

        let excluded = declaration.filter(|_| kind == DeclarationKind::Let);
        let top = self.top_loop(loop_node, excluded);
        let border = arena.get(top).map_or(0, |node| node.pos);
        let home = binder.variable_scope_of(binding.scope);

        binding
            .references
            .iter()
            .filter_map(|&reference| binder.reference(reference))
            .all(|reference| {
                !reference.is_write()
                    || (binder.variable_scope_of(reference.from) == home && reference.pos < border)
            })
    }
}
