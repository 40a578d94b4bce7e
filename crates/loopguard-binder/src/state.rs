//! Binder state: owns the scope graph of one file and answers queries on it.

use crate::scopes::{
    Binding, BindingId, DeclarationKind, Definition, Reference, ReferenceFlags, ReferenceId,
    Scope, ScopeId, ScopeKind,
};
use loopguard_parser::{NodeArena, NodeIndex};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::smallvec;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, trace};

// =============================================================================
// Options
// =============================================================================

/// Whether top-level code runs as a classic script or as an ES module.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    Script,
    #[default]
    Module,
}

impl SourceType {
    /// `.cjs`/`.cts` files are CommonJS scripts; everything else is a module.
    pub fn from_path(path: &Path) -> SourceType {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("cjs" | "cts") => SourceType::Script,
            _ => SourceType::Module,
        }
    }
}

/// Access granted to a configured global.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawGlobalAccess", rename_all = "lowercase")]
pub enum GlobalAccess {
    Readonly,
    Writable,
    Off,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawGlobalAccess {
    Flag(bool),
    Name(String),
}

impl TryFrom<RawGlobalAccess> for GlobalAccess {
    type Error = String;

    fn try_from(raw: RawGlobalAccess) -> Result<Self, Self::Error> {
        match raw {
            RawGlobalAccess::Flag(true) => Ok(GlobalAccess::Writable),
            RawGlobalAccess::Flag(false) => Ok(GlobalAccess::Readonly),
            RawGlobalAccess::Name(name) => match name.as_str() {
                "readonly" | "readable" => Ok(GlobalAccess::Readonly),
                "writable" | "writeable" => Ok(GlobalAccess::Writable),
                "off" => Ok(GlobalAccess::Off),
                other => Err(format!(
                    "'{other}' is not a valid global access; expected \"readonly\", \"writable\" or \"off\""
                )),
            },
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct BinderOptions {
    pub source_type: SourceType,
    /// Names that exist in the global scope without a declaration
    pub globals: BTreeMap<String, GlobalAccess>,
}

// =============================================================================
// Binder state
// =============================================================================

/// Scope graph of one file.
///
/// Build it with [`BinderState::bind_source_file`]; afterwards the state is
/// read-only.
#[derive(Debug)]
pub struct BinderState {
    pub(crate) options: BinderOptions,
    pub scopes: Vec<Scope>,
    pub bindings: Vec<Binding>,
    pub references: Vec<Reference>,
    pub(crate) current_scope: ScopeId,
    /// Innermost scope introduced by each node
    pub(crate) node_scopes: FxHashMap<NodeIndex, ScopeId>,
    /// Binding declared by each name node
    pub(crate) declared_names: FxHashMap<NodeIndex, BindingId>,
}

impl BinderState {
    pub fn new(options: BinderOptions) -> BinderState {
        BinderState {
            options,
            scopes: Vec::new(),
            bindings: Vec::new(),
            references: Vec::new(),
            current_scope: ScopeId::NONE,
            node_scopes: FxHashMap::default(),
            declared_names: FxHashMap::default(),
        }
    }

    /// Build the scope graph for the tree rooted at `root` and resolve every
    /// reference.
    pub fn bind_source_file(&mut self, arena: &NodeArena, root: NodeIndex) {
        let global = self.enter_scope(ScopeKind::Global, root);
        let globals: Vec<_> = self
            .options
            .globals
            .iter()
            .filter(|(_, access)| **access != GlobalAccess::Off)
            .map(|(name, access)| (name.clone(), *access == GlobalAccess::Writable))
            .collect();
        for (name, writable) in globals {
            let binding = self.declare_implicit(global, &name, DeclarationKind::ImplicitGlobal);
            if let Some(binding) = self.bindings.get_mut(binding.index()) {
                binding.writable = writable;
            }
        }
        if self.options.source_type == SourceType::Module {
            self.enter_scope(ScopeKind::Module, root);
        }

        self.bind_node(arena, root);

        if self.options.source_type == SourceType::Module {
            self.exit_scope();
        }
        self.exit_scope();
        self.resolve_references(arena);

        debug!(
            scopes = self.scopes.len(),
            bindings = self.bindings.len(),
            references = self.references.len(),
            "bind_source_file complete"
        );
    }

    // =========================================================================
    // Scope and declaration helpers
    // =========================================================================

    pub(crate) fn enter_scope(&mut self, kind: ScopeKind, block: NodeIndex) -> ScopeId {
        let id = ScopeId(self.scopes.len() as u32);
        let parent = self.current_scope;
        let variable_scope = if kind.is_variable_scope() || parent.is_none() {
            id
        } else {
            self.scopes[parent.index()].variable_scope
        };
        self.scopes.push(Scope::new(kind, block, parent, variable_scope));
        if parent.is_some() {
            self.scopes[parent.index()].children.push(id);
        }
        self.node_scopes.insert(block, id);
        self.current_scope = id;
        trace!(scope = id.0, kind = kind.as_str(), block = block.0, "enter scope");
        id
    }

    pub(crate) fn exit_scope(&mut self) {
        if let Some(scope) = self.scopes.get(self.current_scope.index()) {
            self.current_scope = scope.parent;
        }
    }

    pub(crate) fn current_variable_scope(&self) -> ScopeId {
        self.scopes
            .get(self.current_scope.index())
            .map_or(ScopeId::NONE, |scope| scope.variable_scope)
    }

    /// Declare the identifier `name_node` in `scope`, merging with an
    /// existing binding of the same name.
    pub(crate) fn declare(
        &mut self,
        arena: &NodeArena,
        scope: ScopeId,
        name_node: NodeIndex,
        kind: DeclarationKind,
        declaration: NodeIndex,
        owning_loop: NodeIndex,
    ) -> Option<BindingId> {
        let name = arena.identifier_text(name_node)?.to_string();
        let def = Definition {
            kind,
            name_node,
            declaration,
        };
        let binding = self.declare_definition(scope, name, def, owning_loop)?;
        self.declared_names.insert(name_node, binding);
        Some(binding)
    }

    /// Declare a binding that has no declaring identifier.
    pub(crate) fn declare_implicit(
        &mut self,
        scope: ScopeId,
        name: &str,
        kind: DeclarationKind,
    ) -> BindingId {
        let declaration = self
            .scopes
            .get(scope.index())
            .map_or(NodeIndex::NONE, |s| s.block);
        let def = Definition {
            kind,
            name_node: NodeIndex::NONE,
            declaration,
        };
        self.declare_definition(scope, name.to_string(), def, NodeIndex::NONE)
            .unwrap_or(BindingId::NONE)
    }

    fn declare_definition(
        &mut self,
        scope: ScopeId,
        name: String,
        def: Definition,
        owning_loop: NodeIndex,
    ) -> Option<BindingId> {
        let scope_data = self.scopes.get_mut(scope.index())?;
        if let Some(&existing) = scope_data.names.get(&name) {
            let binding = &mut self.bindings[existing.index()];
            binding.defs.push(def);
            if binding.owning_loop.is_none() {
                binding.owning_loop = owning_loop;
            }
            return Some(existing);
        }
        let id = BindingId(self.bindings.len() as u32);
        scope_data.names.insert(name.clone(), id);
        scope_data.bindings.push(id);
        trace!(binding = id.0, name = %name, kind = def.kind.as_str(), scope = scope.0, "declare");
        self.bindings.push(Binding {
            name,
            scope,
            writable: !def.kind.is_effectively_constant(),
            defs: smallvec![def],
            owning_loop,
            references: Vec::new(),
        });
        Some(id)
    }

    /// Record a reference from the current scope. Resolution happens after
    /// the whole file has been walked.
    pub(crate) fn add_reference(
        &mut self,
        arena: &NodeArena,
        identifier: NodeIndex,
        flags: ReferenceFlags,
    ) {
        let Some(name) = arena.identifier_text(identifier) else {
            return;
        };
        let Some(scope) = self.scopes.get_mut(self.current_scope.index()) else {
            return;
        };
        let id = ReferenceId(self.references.len() as u32);
        scope.references.push(id);
        self.references.push(Reference {
            identifier,
            name: name.to_string(),
            from: self.current_scope,
            pos: arena.get(identifier).map_or(0, |node| node.pos),
            resolved: None,
            flags,
        });
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// The outermost scope.
    pub fn global_scope(&self) -> ScopeId {
        if self.scopes.is_empty() {
            ScopeId::NONE
        } else {
            ScopeId(0)
        }
    }

    pub fn scope(&self, id: ScopeId) -> Option<&Scope> {
        self.scopes.get(id.index())
    }

    pub fn binding(&self, id: BindingId) -> Option<&Binding> {
        self.bindings.get(id.index())
    }

    pub fn reference(&self, id: ReferenceId) -> Option<&Reference> {
        self.references.get(id.index())
    }

    /// Innermost scope introduced by `node` itself. For a function this is
    /// its function scope, never the name scope of a named expression.
    pub fn node_scope(&self, node: NodeIndex) -> Option<ScopeId> {
        self.node_scopes.get(&node).copied()
    }

    /// Innermost scope containing `node`.
    pub fn find_enclosing_scope(&self, arena: &NodeArena, node: NodeIndex) -> Option<ScopeId> {
        if let Some(scope) = self.node_scope(node) {
            return Some(scope);
        }
        arena
            .ancestors(node)
            .find_map(|ancestor| self.node_scope(ancestor))
    }

    pub fn bindings_of(&self, scope: ScopeId) -> &[BindingId] {
        self.scope(scope).map_or(&[], |s| s.bindings.as_slice())
    }

    pub fn references_of(&self, binding: BindingId) -> &[ReferenceId] {
        self.binding(binding).map_or(&[], |b| b.references.as_slice())
    }

    pub fn through(&self, scope: ScopeId) -> &[ReferenceId] {
        self.scope(scope).map_or(&[], |s| s.through.as_slice())
    }

    pub fn variable_scope_of(&self, scope: ScopeId) -> ScopeId {
        self.scope(scope).map_or(ScopeId::NONE, |s| s.variable_scope)
    }

    /// Binding introduced by a declared identifier.
    pub fn binding_of_name(&self, name_node: NodeIndex) -> Option<BindingId> {
        self.declared_names.get(&name_node).copied()
    }

    /// Binding of the reference made by `identifier`, if it resolved.
    pub fn resolved_binding(&self, identifier: NodeIndex) -> Option<BindingId> {
        self.references
            .iter()
            .find(|reference| reference.identifier == identifier)
            .and_then(|reference| reference.resolved)
    }

    /// Look `name` up from `scope` outward in the value namespace.
    pub fn lookup(&self, scope: ScopeId, name: &str) -> Option<BindingId> {
        let mut current = scope;
        while let Some(data) = self.scope(current) {
            if let Some(binding) = data.get(name)
                && self.bindings[binding.index()].is_value()
            {
                return Some(binding);
            }
            current = data.parent;
        }
        None
    }

    // =========================================================================
    // Debug output
    // =========================================================================

    /// Serializable tree of every scope, for `--print-scopes`.
    pub fn scope_tree(&self, arena: &NodeArena) -> Option<ScopeTreeDump> {
        self.dump_scope(arena, self.global_scope())
    }

    fn dump_scope(&self, arena: &NodeArena, id: ScopeId) -> Option<ScopeTreeDump> {
        let scope = self.scope(id)?;
        let span = arena.span(scope.block);
        let variables = scope
            .bindings
            .iter()
            .filter_map(|&binding| self.binding(binding))
            .map(|binding| {
                let refs = binding.references.iter().filter_map(|&r| self.reference(r));
                VariableDump {
                    name: binding.name.clone(),
                    kind: binding.kind(),
                    references: binding.references.len(),
                    writes: refs.filter(|r| r.is_write()).count(),
                }
            })
            .collect();
        let through = scope
            .through
            .iter()
            .filter_map(|&r| self.reference(r))
            .map(|r| r.name.clone())
            .collect();
        let children = scope
            .children
            .iter()
            .filter_map(|&child| self.dump_scope(arena, child))
            .collect();
        Some(ScopeTreeDump {
            kind: scope.kind,
            block: arena.kind_name(scope.block),
            range: span.map_or([0, 0], |span| [span.start, span.end]),
            variables,
            through,
            children,
        })
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct ScopeTreeDump {
    pub kind: ScopeKind,
    pub block: &'static str,
    pub range: [u32; 2],
    pub variables: Vec<VariableDump>,
    pub through: Vec<String>,
    pub children: Vec<ScopeTreeDump>,
}

#[derive(Clone, Debug, Serialize)]
pub struct VariableDump {
    pub name: String,
    pub kind: DeclarationKind,
    pub references: usize,
    pub writes: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_type_from_extension() {
        assert_eq!(SourceType::from_path(Path::new("a/b.cjs")), SourceType::Script);
        assert_eq!(SourceType::from_path(Path::new("a/b.ts")), SourceType::Module);
        assert_eq!(SourceType::from_path(Path::new("noext")), SourceType::Module);
    }

    #[test]
    fn test_global_access_deserialize() {
        let parsed: BTreeMap<String, GlobalAccess> =
            serde_json::from_str(r#"{"a":"readonly","b":"writeable","c":true,"d":"off"}"#)
                .unwrap();
        assert_eq!(parsed["a"], GlobalAccess::Readonly);
        assert_eq!(parsed["b"], GlobalAccess::Writable);
        assert_eq!(parsed["c"], GlobalAccess::Writable);
        assert_eq!(parsed["d"], GlobalAccess::Off);
        assert!(serde_json::from_str::<GlobalAccess>(r#""sometimes""#).is_err());
    }
}
