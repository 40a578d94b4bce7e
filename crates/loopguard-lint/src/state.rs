//! Rule state for one file.
//!
//! `NoLoopFuncState` borrows the node arena and the scope graph and keeps
//! the memo tables of a single pass. Loop lookup, classification and the
//! escape analysis live in the sibling modules as further `impl` blocks.

use crate::escape::EscapeState;
use loopguard_binder::{BinderState, BindingId};
use loopguard_parser::{NodeArena, NodeIndex};
use rustc_hash::FxHashMap;

pub struct NoLoopFuncState<'a> {
    pub(crate) arena: &'a NodeArena,
    pub(crate) binder: &'a BinderState,
    /// Per function-like node: may the loop walk cross it?
    pub(crate) escape_states: FxHashMap<NodeIndex, EscapeState>,
    /// Per `(loop, binding)`: is the binding stable for that loop?
    pub(crate) safe_verdicts: FxHashMap<(NodeIndex, BindingId), bool>,
}

impl<'a> NoLoopFuncState<'a> {
    pub fn new(arena: &'a NodeArena, binder: &'a BinderState) -> NoLoopFuncState<'a> {
        NoLoopFuncState {
            arena,
            binder,
            escape_states: FxHashMap::default(),
            safe_verdicts: FxHashMap::default(),
        }
    }

    pub fn arena(&self) -> &'a NodeArena {
        self.arena
    }

    pub fn binder(&self) -> &'a BinderState {
        self.binder
    }
}
