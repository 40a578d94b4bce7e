//! Parser: arena AST types and the recursive descent parser state.

pub mod node;
pub use node::*;

pub mod node_arena;
pub use node_arena::{ChildList, NodeArena};

mod node_access;

pub mod state;
pub use state::{ParseDiagnostic, ParserState};

mod state_expressions;
mod state_statements;
mod state_types;
