//! Scope graph data types.
//!
//! Scopes, bindings and references live in flat vectors owned by
//! [`BinderState`](crate::BinderState) and point at each other through
//! integer handles.

use bitflags::bitflags;
use loopguard_parser::NodeIndex;
use rustc_hash::FxHashMap;
use serde::Serialize;
use smallvec::SmallVec;

// =============================================================================
// Handles
// =============================================================================

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
        #[serde(transparent)]
        pub struct $name(pub u32);

        impl $name {
            pub const NONE: $name = $name(u32::MAX);

            #[inline]
            pub fn is_none(self) -> bool {
                self == Self::NONE
            }

            #[inline]
            pub fn is_some(self) -> bool {
                self != Self::NONE
            }

            #[inline]
            pub(crate) fn index(self) -> usize {
                self.0 as usize
            }
        }
    };
}

define_id!(
    /// Index of a scope in `BinderState::scopes`.
    ScopeId
);
define_id!(
    /// Index of a binding in `BinderState::bindings`.
    BindingId
);
define_id!(
    /// Index of a reference in `BinderState::references`.
    ReferenceId
);

// =============================================================================
// Scopes
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScopeKind {
    Global,
    Module,
    Function,
    /// Holds the name of a named function expression, wrapping its function scope
    FunctionExpressionName,
    Block,
    /// Lexical `for` head (`let`/`const`/`using` declarations only)
    For,
    Catch,
    Class,
    ClassFieldInitializer,
    ClassStaticBlock,
    Switch,
}

impl ScopeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ScopeKind::Global => "global",
            ScopeKind::Module => "module",
            ScopeKind::Function => "function",
            ScopeKind::FunctionExpressionName => "function-expression-name",
            ScopeKind::Block => "block",
            ScopeKind::For => "for",
            ScopeKind::Catch => "catch",
            ScopeKind::Class => "class",
            ScopeKind::ClassFieldInitializer => "class-field-initializer",
            ScopeKind::ClassStaticBlock => "class-static-block",
            ScopeKind::Switch => "switch",
        }
    }

    /// Scopes that own `var` declarations: the nearest one is a scope's
    /// variable scope.
    pub fn is_variable_scope(self) -> bool {
        matches!(
            self,
            ScopeKind::Global
                | ScopeKind::Module
                | ScopeKind::Function
                | ScopeKind::ClassFieldInitializer
                | ScopeKind::ClassStaticBlock
        )
    }
}

#[derive(Clone, Debug)]
pub struct Scope {
    pub kind: ScopeKind,
    /// Node that introduced the scope
    pub block: NodeIndex,
    pub parent: ScopeId,
    /// Nearest enclosing variable scope (possibly this scope)
    pub variable_scope: ScopeId,
    pub children: Vec<ScopeId>,
    /// Bindings declared here, in declaration order
    pub bindings: Vec<BindingId>,
    /// References made directly in this scope
    pub references: Vec<ReferenceId>,
    /// References made in this scope or below that are not resolved here,
    /// in source order
    pub through: Vec<ReferenceId>,
    pub(crate) names: FxHashMap<String, BindingId>,
}

impl Scope {
    pub(crate) fn new(kind: ScopeKind, block: NodeIndex, parent: ScopeId, variable_scope: ScopeId) -> Scope {
        Scope {
            kind,
            block,
            parent,
            variable_scope,
            children: Vec::new(),
            bindings: Vec::new(),
            references: Vec::new(),
            through: Vec::new(),
            names: FxHashMap::default(),
        }
    }

    /// Binding declared directly in this scope under `name`.
    pub fn get(&self, name: &str) -> Option<BindingId> {
        self.names.get(name).copied()
    }
}

// =============================================================================
// Bindings
// =============================================================================

/// How a binding was introduced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DeclarationKind {
    Var,
    Let,
    Const,
    Using,
    AwaitUsing,
    Parameter,
    FunctionName,
    FunctionExpressionName,
    ClassName,
    CatchParameter,
    Import,
    /// The implicit `arguments` object of a non-arrow function
    ImplicitArguments,
    /// A global supplied by configuration
    ImplicitGlobal,
    TypeAlias,
    Interface,
    Enum,
    TypeParameter,
}

impl DeclarationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            DeclarationKind::Var => "var",
            DeclarationKind::Let => "let",
            DeclarationKind::Const => "const",
            DeclarationKind::Using => "using",
            DeclarationKind::AwaitUsing => "await using",
            DeclarationKind::Parameter => "parameter",
            DeclarationKind::FunctionName => "function",
            DeclarationKind::FunctionExpressionName => "function-expression-name",
            DeclarationKind::ClassName => "class",
            DeclarationKind::CatchParameter => "catch",
            DeclarationKind::Import => "import",
            DeclarationKind::ImplicitArguments => "arguments",
            DeclarationKind::ImplicitGlobal => "global",
            DeclarationKind::TypeAlias => "type",
            DeclarationKind::Interface => "interface",
            DeclarationKind::Enum => "enum",
            DeclarationKind::TypeParameter => "type-parameter",
        }
    }

    /// `const`, `using` and `await using` can never be reassigned.
    pub fn is_effectively_constant(self) -> bool {
        matches!(
            self,
            DeclarationKind::Const | DeclarationKind::Using | DeclarationKind::AwaitUsing
        )
    }

    pub fn is_value(self) -> bool {
        !matches!(
            self,
            DeclarationKind::TypeAlias | DeclarationKind::Interface | DeclarationKind::TypeParameter
        )
    }

    pub fn is_type(self) -> bool {
        matches!(
            self,
            DeclarationKind::ClassName
                | DeclarationKind::Import
                | DeclarationKind::ImplicitGlobal
                | DeclarationKind::TypeAlias
                | DeclarationKind::Interface
                | DeclarationKind::Enum
                | DeclarationKind::TypeParameter
        )
    }
}

/// One declaration of a binding. A name declared twice in the same scope
/// (`var i; var i;`) is one binding with two definitions.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct Definition {
    pub kind: DeclarationKind,
    /// The declared identifier; NONE for implicit bindings
    pub name_node: NodeIndex,
    /// Declaring construct: the `VariableDeclaration` for variables, the
    /// function for parameters and function names, the class, the import
    /// declaration, the catch clause, and so on
    pub declaration: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct Binding {
    pub name: String,
    pub scope: ScopeId,
    pub defs: SmallVec<[Definition; 1]>,
    /// Loop whose head declares this binding, if any
    pub owning_loop: NodeIndex,
    /// Every reference resolved to this binding, in source order
    pub references: Vec<ReferenceId>,
    /// False for constants and read-only globals
    pub writable: bool,
}

impl Binding {
    /// Kind of the first definition.
    pub fn kind(&self) -> DeclarationKind {
        self.defs
            .first()
            .map_or(DeclarationKind::ImplicitGlobal, |def| def.kind)
    }

    pub fn first_definition(&self) -> Option<&Definition> {
        self.defs.first()
    }

    pub fn is_value(&self) -> bool {
        self.defs.iter().any(|def| def.kind.is_value())
    }

    pub fn is_type(&self) -> bool {
        self.defs.iter().any(|def| def.kind.is_type())
    }
}

// =============================================================================
// References
// =============================================================================

bitflags! {
    /// How a reference uses its binding.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ReferenceFlags: u8 {
        const READ = 1 << 0;
        const WRITE = 1 << 1;
        /// Appears in a type position
        const TYPE = 1 << 2;
        /// The write initialises a declaration (`let x = 1`, `for (const k in o)`)
        const INIT = 1 << 3;
        const READ_WRITE = Self::READ.bits() | Self::WRITE.bits();
    }
}

#[derive(Clone, Debug)]
pub struct Reference {
    pub identifier: NodeIndex,
    pub name: String,
    /// Scope the reference is made from
    pub from: ScopeId,
    /// Start offset of the identifier
    pub pos: u32,
    pub resolved: Option<BindingId>,
    pub flags: ReferenceFlags,
}

impl Reference {
    pub fn is_read(&self) -> bool {
        self.flags.contains(ReferenceFlags::READ)
    }

    pub fn is_write(&self) -> bool {
        self.flags.contains(ReferenceFlags::WRITE)
    }

    pub fn is_type_reference(&self) -> bool {
        self.flags.contains(ReferenceFlags::TYPE)
    }

    pub fn is_init(&self) -> bool {
        self.flags.contains(ReferenceFlags::INIT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variable_scope_kinds() {
        assert!(ScopeKind::Function.is_variable_scope());
        assert!(ScopeKind::ClassStaticBlock.is_variable_scope());
        assert!(!ScopeKind::For.is_variable_scope());
        assert!(!ScopeKind::FunctionExpressionName.is_variable_scope());
    }

    #[test]
    fn test_declaration_namespaces() {
        assert!(DeclarationKind::ClassName.is_value());
        assert!(DeclarationKind::ClassName.is_type());
        assert!(!DeclarationKind::Interface.is_value());
        assert!(!DeclarationKind::Let.is_type());
        assert!(DeclarationKind::AwaitUsing.is_effectively_constant());
        assert!(!DeclarationKind::Let.is_effectively_constant());
    }

    #[test]
    fn test_read_write_flags() {
        let flags = ReferenceFlags::READ_WRITE;
        assert!(flags.contains(ReferenceFlags::READ));
        assert!(flags.contains(ReferenceFlags::WRITE));
        assert!(!flags.contains(ReferenceFlags::TYPE));
    }
}
