//! NodeArena access methods and node classification queries.

use super::node::*;
use super::node_arena::NodeArena;
use loopguard_common::Span;

impl NodeArena {
    /// Get a node by index
    #[inline]
    pub fn get(&self, index: NodeIndex) -> Option<&Node> {
        if index.is_none() {
            None
        } else {
            self.nodes.get(index.0 as usize)
        }
    }

    /// Get a mutable node by index
    #[inline]
    pub fn get_mut(&mut self, index: NodeIndex) -> Option<&mut Node> {
        if index.is_none() {
            None
        } else {
            self.nodes.get_mut(index.0 as usize)
        }
    }

    #[inline]
    pub fn data(&self, index: NodeIndex) -> Option<&NodeData> {
        self.get(index).map(|node| &node.data)
    }

    #[inline]
    pub fn parent(&self, index: NodeIndex) -> NodeIndex {
        self.get(index).map_or(NodeIndex::NONE, |node| node.parent)
    }

    #[inline]
    pub fn span(&self, index: NodeIndex) -> Option<Span> {
        self.get(index).map(|node| Span::new(node.pos, node.end))
    }

    /// ESTree-style type name, or "" for an absent node.
    pub fn kind_name(&self, index: NodeIndex) -> &'static str {
        self.data(index).map_or("", NodeData::kind_name)
    }

    /// Text of an Identifier, PropertyName or PrivateName node.
    pub fn identifier_text(&self, index: NodeIndex) -> Option<&str> {
        match self.data(index)? {
            NodeData::Identifier(name) | NodeData::PropertyName(name) | NodeData::PrivateName(name) => {
                Some(name)
            }
            _ => None,
        }
    }

    pub fn get_function(&self, index: NodeIndex) -> Option<&FunctionData> {
        match self.data(index)? {
            NodeData::FunctionLike(func) => Some(func),
            _ => None,
        }
    }

    pub fn get_variable_declaration(&self, index: NodeIndex) -> Option<&VariableDeclarationData> {
        match self.data(index)? {
            NodeData::VariableDeclaration(decl) => Some(decl),
            _ => None,
        }
    }

    pub fn get_call(&self, index: NodeIndex) -> Option<&CallData> {
        match self.data(index)? {
            NodeData::Call(call) => Some(call),
            _ => None,
        }
    }

    pub fn is_function_like(&self, index: NodeIndex) -> bool {
        matches!(self.data(index), Some(NodeData::FunctionLike(_)))
    }

    /// `for`, `for-in`, `for-of`, `while` and `do-while` statements.
    pub fn is_loop(&self, index: NodeIndex) -> bool {
        matches!(
            self.data(index),
            Some(
                NodeData::For(_)
                    | NodeData::ForIn(_)
                    | NodeData::ForOf(_)
                    | NodeData::While(_)
                    | NodeData::DoWhile(_)
            )
        )
    }

    /// True when `child` is evaluated once before a loop starts rather than
    /// on every iteration: the init clause of a `for`, or the iterated
    /// expression of a `for-in`/`for-of`.
    pub fn is_loop_head_once(&self, loop_node: NodeIndex, child: NodeIndex) -> bool {
        match self.data(loop_node) {
            Some(NodeData::For(stmt)) => stmt.init == child,
            Some(NodeData::ForIn(stmt) | NodeData::ForOf(stmt)) => stmt.right == child,
            _ => false,
        }
    }

    /// True when `index` is the callee of the call expression that is its
    /// parent.
    pub fn is_direct_callee(&self, index: NodeIndex) -> bool {
        self.get_call(self.parent(index))
            .is_some_and(|call| call.callee == index)
    }

    /// Identifier nodes declared by a binding pattern, in source order.
    pub fn pattern_identifiers(&self, pattern: NodeIndex) -> Vec<NodeIndex> {
        let mut out = Vec::new();
        let mut stack = vec![pattern];
        while let Some(current) = stack.pop() {
            match self.data(current) {
                Some(NodeData::Identifier(_)) => out.push(current),
                Some(NodeData::ObjectPattern(list) | NodeData::ArrayPattern(list)) => {
                    stack.extend(list.iter().rev().copied().filter(|idx| idx.is_some()));
                }
                Some(NodeData::Property(prop)) => stack.push(prop.value),
                Some(NodeData::AssignmentPattern { left, .. }) => stack.push(*left),
                Some(NodeData::RestElement(arg)) => stack.push(*arg),
                Some(NodeData::Parameter(param)) => stack.push(param.pattern),
                _ => {}
            }
        }
        out
    }
}
