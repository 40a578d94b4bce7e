//! Scope analysis for loopguard.
//!
//! The binder walks a parsed file once and produces a scope graph in the
//! shape ESLint rules expect: a tree of [`Scope`]s, the [`Binding`]s each
//! scope declares, and every identifier [`Reference`] together with the
//! binding it resolves to. Each scope also records its `through` list, the
//! references made inside it that resolve somewhere further out.

pub mod scopes;
pub use scopes::{
    Binding, BindingId, DeclarationKind, Definition, Reference, ReferenceFlags, ReferenceId,
    Scope, ScopeId, ScopeKind,
};

pub mod state;
pub use state::{BinderOptions, BinderState, GlobalAccess, ScopeTreeDump, SourceType};

mod state_node_binding;
mod state_patterns;
mod state_resolution;
mod state_types;
