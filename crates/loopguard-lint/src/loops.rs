//! Loop lookup.
//!
//! A node is repeated by a loop when it sits in the part the loop evaluates
//! on every iteration. The `for` init clause and the iterated expression of
//! `for-in`/`for-of` run once and do not count. Function boundaries stop the
//! search unless the function is an exempt immediately invoked closure.

use crate::escape::EscapeState;
use crate::state::NoLoopFuncState;
use loopguard_parser::NodeIndex;
use loopguard_parser::parser::NodeData;
use tracing::trace;

impl<'a> NoLoopFuncState<'a> {
    /// Innermost loop that evaluates `node` on each iteration.
    ///
    /// Returns `None` when the walk reaches the root, or a function level
    /// that may outlive the iteration that created it.
    pub fn containing_loop(&mut self, node: NodeIndex) -> Option<NodeIndex> {
        let arena = self.arena;
        let mut current = node;
        for parent in arena.ancestors(node) {
            match arena.data(parent)? {
                NodeData::While(_) | NodeData::DoWhile(_) => return Some(parent),
                NodeData::For(_) | NodeData::ForIn(_) | NodeData::ForOf(_) => {
                    if !arena.is_loop_head_once(parent, current) {
                        return Some(parent);
                    }
                }
                NodeData::FunctionLike(_) => {
                    if self.escape_state(parent) != EscapeState::Exempt {
                        trace!(node = node.0, boundary = parent.0, "loop walk stopped at function");
                        return None;
                    }
                }
                _ => {}
            }
            current = parent;
        }
        None
    }

    /// Outermost loop in the chain of loops enclosing `loop_node`.
    ///
    /// With `excluded`, loops that start before `excluded` ends are not
    /// part of the chain: a `let` declared inside an outer loop body is
    /// fresh per iteration of that outer loop.
    pub fn top_loop(&mut self, loop_node: NodeIndex, excluded: Option<NodeIndex>) -> NodeIndex {
        let border = excluded
            .and_then(|node| self.arena.get(node))
            .map_or(0, |node| node.end);
        let mut top = loop_node;
        let mut candidate = Some(loop_node);
        while let Some(current) = candidate
            && self.arena.get(current).is_some_and(|node| node.pos >= border)
        {
            top = current;
            candidate = self.containing_loop(current);
        }
        top
    }
}
