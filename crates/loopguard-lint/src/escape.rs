//! Immediately invoked closures.
//!
//! A function that is called right where it is defined finishes before the
//! enclosing iteration continues, so whatever it captures is read with the
//! value of that iteration. Three things break that guarantee:
//!
//! ```javascript
//! (async () => { await tick(); use(i); })();   // resumes later
//! (function* () { use(i); })();                 // body runs on next()
//! (function f() { list.push(f); })();          // hands itself out
//! ```
//!
//! Async and generator functions lose the exemption even when they never
//! suspend.

use crate::state::NoLoopFuncState;
use loopguard_parser::NodeIndex;
use loopguard_parser::parser::{FunctionKind, NodeData};
use serde::Serialize;
use tracing::trace;

/// Verdict for one function level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum EscapeState {
    /// Invoked in place and cannot outlive the iteration
    Exempt,
    /// May run after the iteration that created it
    Escaping,
}

impl<'a> NoLoopFuncState<'a> {
    /// True when `closure` is an immediately invoked function that cannot
    /// outlive the iteration it was created in.
    pub fn is_exempt(&mut self, closure: NodeIndex) -> bool {
        self.escape_state(closure) == EscapeState::Exempt
    }

    pub(crate) fn escape_state(&mut self, closure: NodeIndex) -> EscapeState {
        if let Some(&state) = self.escape_states.get(&closure) {
            return state;
        }
        let state = self.compute_escape_state(closure);
        trace!(closure = closure.0, state = ?state, "escape state");
        self.escape_states.insert(closure, state);
        state
    }

    fn compute_escape_state(&self, closure: NodeIndex) -> EscapeState {
        let arena = self.arena;
        let Some(func) = arena.get_function(closure) else {
            return EscapeState::Escaping;
        };
        if func.caps.can_suspend()
            || !matches!(func.kind, FunctionKind::Expression | FunctionKind::Arrow)
            || !arena.is_direct_callee(closure)
        {
            return EscapeState::Escaping;
        }
        if self.references_own_name(closure, func.name) {
            return EscapeState::Escaping;
        }
        EscapeState::Exempt
    }

    /// Does a named function expression mention its own name in its body?
    fn references_own_name(&self, closure: NodeIndex, name: NodeIndex) -> bool {
        let Some(NodeData::Identifier(own_name)) = self.arena.data(name) else {
            return false;
        };
        let Some(scope) = self.binder.node_scope(closure) else {
            return false;
        };
        self.binder
            .through(scope)
            .iter()
            .filter_map(|&reference| self.binder.reference(reference))
            .any(|reference| reference.name == *own_name)
    }
}
