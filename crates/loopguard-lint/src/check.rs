//! Driver: visit every closure of the file and report the ones that capture
//! unsafe bindings from inside a loop.

use crate::report::{LoopFuncFinding, MessageId};
use crate::state::NoLoopFuncState;
use indexmap::IndexSet;
use loopguard_parser::NodeIndex;
use tracing::debug;

impl<'a> NoLoopFuncState<'a> {
    /// Check every function-like node of the arena. Findings come back in
    /// source order.
    pub fn check_file(&mut self) -> Vec<LoopFuncFinding> {
        let arena = self.arena;
        let mut findings: Vec<LoopFuncFinding> = arena
            .indices()
            .filter(|&idx| arena.is_function_like(idx))
            .filter_map(|idx| self.check_function(idx))
            .collect();
        findings.sort_by_key(|finding| (finding.pos, std::cmp::Reverse(finding.end)));
        debug!(findings = findings.len(), "no-loop-func check complete");
        findings
    }

    /// Check one closure.
    pub fn check_function(&mut self, closure: NodeIndex) -> Option<LoopFuncFinding> {
        let arena = self.arena;
        let binder = self.binder;
        let func = arena.get_function(closure)?;
        // Overload signatures and ambient declarations have nothing to capture
        if func.body.is_none() {
            return None;
        }

        let loop_node = self.containing_loop(closure)?;
        if self.is_exempt(closure) {
            return None;
        }

        let Some(scope) = binder.node_scope(closure) else {
            debug!(closure = closure.0, "closure has no scope, skipping");
            return None;
        };

        let mut unsafe_names: IndexSet<&str> = IndexSet::new();
        for &id in binder.through(scope) {
            let Some(reference) = binder.reference(id) else {
                continue;
            };
            if reference.resolved.is_some() && !self.is_safe(loop_node, reference) {
                unsafe_names.insert(reference.name.as_str());
            }
        }
        if unsafe_names.is_empty() {
            return None;
        }

        let node = arena.get(closure)?;
        let finding = LoopFuncFinding {
            node: closure,
            node_kind: arena.kind_name(closure),
            message_id: MessageId::UnsafeRefs,
            variable_names: unsafe_names.into_iter().map(str::to_string).collect(),
            pos: node.pos,
            end: node.end,
        };
        debug!(
            closure = closure.0,
            loop_node = loop_node.0,
            names = ?finding.variable_names,
            "closure captures unsafe references"
        );
        Some(finding)
    }
}
