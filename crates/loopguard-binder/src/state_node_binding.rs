//! Node walk: creates scopes, declares bindings and records references.

use crate::scopes::{DeclarationKind, ReferenceFlags, ScopeKind};
use crate::state::BinderState;
use crate::state_patterns::PatternParts;
use loopguard_parser::parser::{
    ClassData, ForData, ForInOfData, FunctionData, FunctionKind, NodeData, VariableKind,
};
use loopguard_parser::{NodeArena, NodeIndex};
use loopguard_scanner::SyntaxKind;
use tracing::trace;

impl BinderState {
    /// Bind a node in value position.
    pub(crate) fn bind_node(&mut self, arena: &NodeArena, idx: NodeIndex) {
        let Some(data) = arena.data(idx) else {
            return;
        };
        match data {
            NodeData::SourceFile(block) => self.bind_nodes(arena, &block.statements),

            // Names
            NodeData::Identifier(_) => self.add_reference(arena, idx, ReferenceFlags::READ),
            NodeData::PropertyName(_) | NodeData::PrivateName(_) => {}

            // Declarations
            NodeData::VariableDeclaration(_) => self.bind_variable_declaration(arena, idx),
            NodeData::FunctionLike(func) => self.bind_function(arena, idx, func),
            NodeData::Class(class) => self.bind_class(arena, idx, class),
            NodeData::MethodDefinition(method) => {
                if method.computed {
                    self.bind_node(arena, method.key);
                }
                self.bind_node(arena, method.value);
            }
            NodeData::PropertyDefinition(prop) => {
                if prop.computed {
                    self.bind_node(arena, prop.key);
                }
                self.bind_type(arena, prop.type_annotation);
                if prop.value.is_some() {
                    self.enter_scope(ScopeKind::ClassFieldInitializer, prop.value);
                    self.bind_node(arena, prop.value);
                    self.exit_scope();
                }
            }
            NodeData::StaticBlock(block) => {
                self.enter_scope(ScopeKind::ClassStaticBlock, idx);
                self.bind_nodes(arena, &block.statements);
                self.exit_scope();
            }
            NodeData::ImportDeclaration(decl) => {
                let scope = self.current_scope;
                for &specifier in &decl.specifiers {
                    if let Some(NodeData::ImportSpecifier(spec)) = arena.data(specifier) {
                        self.declare(
                            arena,
                            scope,
                            spec.local,
                            DeclarationKind::Import,
                            idx,
                            NodeIndex::NONE,
                        );
                    }
                }
            }
            NodeData::ExportNamed(decl) => {
                self.bind_node(arena, decl.declaration);
                if decl.source.is_none() {
                    for &specifier in &decl.specifiers {
                        if let Some(NodeData::ExportSpecifier(spec)) = arena.data(specifier) {
                            self.bind_node(arena, spec.local);
                        }
                    }
                }
            }
            NodeData::ExportDefault(expression) => self.bind_node(arena, *expression),
            NodeData::ExportAll { .. } | NodeData::ImportSpecifier(_) | NodeData::ExportSpecifier(_) => {}

            // TypeScript declarations
            NodeData::TypeAlias(alias) => {
                let scope = self.current_scope;
                self.declare(arena, scope, alias.name, DeclarationKind::TypeAlias, idx, NodeIndex::NONE);
                self.bind_type_list(arena, &alias.type_parameters);
                self.bind_type(arena, alias.annotation);
            }
            NodeData::Interface(iface) => {
                let scope = self.current_scope;
                self.declare(arena, scope, iface.name, DeclarationKind::Interface, idx, NodeIndex::NONE);
                self.bind_type_list(arena, &iface.type_parameters);
                self.bind_type_list(arena, &iface.extends);
                self.bind_type_list(arena, &iface.members);
            }
            NodeData::Enum(decl) => {
                let scope = self.current_scope;
                self.declare(arena, scope, decl.name, DeclarationKind::Enum, idx, NodeIndex::NONE);
                for &member in &decl.members {
                    if let Some(NodeData::EnumMember(member)) = arena.data(member) {
                        self.bind_node(arena, member.initializer);
                    }
                }
            }

            // Statements
            NodeData::Block(block) => {
                self.enter_scope(ScopeKind::Block, idx);
                self.bind_nodes(arena, &block.statements);
                self.exit_scope();
            }
            NodeData::Empty | NodeData::Debugger | NodeData::Break(_) | NodeData::Continue(_) => {}
            NodeData::ExpressionStatement(expression)
            | NodeData::Return(expression)
            | NodeData::Throw(expression) => self.bind_node(arena, *expression),
            NodeData::Labeled { body, .. } => self.bind_node(arena, *body),
            NodeData::If(stmt) => {
                self.bind_node(arena, stmt.test);
                self.bind_node(arena, stmt.consequent);
                self.bind_node(arena, stmt.alternate);
            }
            NodeData::For(stmt) => self.bind_for_statement(arena, idx, stmt),
            NodeData::ForIn(stmt) | NodeData::ForOf(stmt) => {
                self.bind_for_in_of_statement(arena, idx, stmt)
            }
            NodeData::While(stmt) => {
                self.bind_node(arena, stmt.test);
                self.bind_node(arena, stmt.body);
            }
            NodeData::DoWhile(stmt) => {
                self.bind_node(arena, stmt.body);
                self.bind_node(arena, stmt.test);
            }
            NodeData::Switch(stmt) => {
                self.bind_node(arena, stmt.discriminant);
                self.enter_scope(ScopeKind::Switch, idx);
                for &case in &stmt.cases {
                    if let Some(NodeData::SwitchCase(case)) = arena.data(case) {
                        self.bind_node(arena, case.test);
                        self.bind_nodes(arena, &case.consequent);
                    }
                }
                self.exit_scope();
            }
            NodeData::SwitchCase(case) => {
                self.bind_node(arena, case.test);
                self.bind_nodes(arena, &case.consequent);
            }
            NodeData::Try(stmt) => {
                self.bind_node(arena, stmt.block);
                self.bind_node(arena, stmt.handler);
                self.bind_node(arena, stmt.finalizer);
            }
            NodeData::CatchClause(clause) => {
                let scope = self.enter_scope(ScopeKind::Catch, idx);
                if clause.param.is_some() {
                    self.bind_declaration_pattern(
                        arena,
                        clause.param,
                        scope,
                        DeclarationKind::CatchParameter,
                        idx,
                        NodeIndex::NONE,
                        false,
                    );
                }
                self.bind_type(arena, clause.type_annotation);
                self.bind_node(arena, clause.body);
                self.exit_scope();
            }
            NodeData::With { object, body } => {
                self.bind_node(arena, *object);
                self.bind_node(arena, *body);
            }

            // Expressions
            NodeData::Literal(_) | NodeData::This | NodeData::Super | NodeData::MetaProperty { .. } => {}
            NodeData::Property(prop) => {
                if prop.computed {
                    self.bind_node(arena, prop.key);
                }
                self.bind_node(arena, prop.value);
            }
            NodeData::Update(update) => {
                if Self::is_simple_target(arena, update.argument) {
                    self.bind_assignment_target(arena, update.argument, ReferenceFlags::READ_WRITE);
                } else {
                    self.bind_node(arena, update.argument);
                }
            }
            NodeData::Assignment(assign) => {
                if assign.operator == SyntaxKind::EqualsToken {
                    self.bind_assignment_target(arena, assign.left, ReferenceFlags::WRITE);
                } else if Self::is_simple_target(arena, assign.left) {
                    self.bind_assignment_target(arena, assign.left, ReferenceFlags::READ_WRITE);
                } else {
                    self.bind_node(arena, assign.left);
                }
                self.bind_node(arena, assign.right);
            }
            NodeData::Member(member) => {
                self.bind_node(arena, member.object);
                if member.computed {
                    self.bind_node(arena, member.property);
                }
            }
            NodeData::Call(call) | NodeData::New(call) => {
                self.bind_node(arena, call.callee);
                self.bind_type_list(arena, &call.type_arguments);
                self.bind_nodes(arena, &call.arguments);
            }
            NodeData::TypeCast(cast) => {
                self.bind_node(arena, cast.expression);
                self.bind_type(arena, cast.annotation);
            }
            NodeData::ObjectPattern(_)
            | NodeData::ArrayPattern(_)
            | NodeData::AssignmentPattern { .. }
            | NodeData::RestElement(_) => {
                self.bind_assignment_target(arena, idx, ReferenceFlags::WRITE)
            }

            // Remaining expressions only evaluate their children
            NodeData::Template(_)
            | NodeData::TaggedTemplate { .. }
            | NodeData::Array(_)
            | NodeData::Object(_)
            | NodeData::Spread(_)
            | NodeData::Unary(_)
            | NodeData::Binary(_)
            | NodeData::Logical(_)
            | NodeData::Conditional(_)
            | NodeData::Sequence(_)
            | NodeData::Await(_)
            | NodeData::Yield { .. }
            | NodeData::ImportCall(_)
            | NodeData::NonNull(_) => {
                for child in arena.children(idx) {
                    self.bind_node(arena, child);
                }
            }

            // Parameters are bound with their function; type nodes in type mode
            NodeData::Parameter(_) | NodeData::VariableDeclarator(_) | NodeData::EnumMember(_) => {}
            _ => self.bind_type(arena, idx),
        }
    }

    pub(crate) fn bind_nodes(&mut self, arena: &NodeArena, statements: &[NodeIndex]) {
        for &statement in statements {
            self.bind_node(arena, statement);
        }
    }

    /// An identifier, possibly behind `!` or a type assertion.
    fn is_simple_target(arena: &NodeArena, idx: NodeIndex) -> bool {
        match arena.data(idx) {
            Some(NodeData::Identifier(_)) => true,
            Some(NodeData::NonNull(inner)) => Self::is_simple_target(arena, *inner),
            Some(NodeData::TypeCast(cast)) => Self::is_simple_target(arena, cast.expression),
            _ => false,
        }
    }

    // =========================================================================
    // Declarations
    // =========================================================================

    fn bind_variable_declaration(&mut self, arena: &NodeArena, idx: NodeIndex) {
        let Some(decl) = arena.get_variable_declaration(idx) else {
            return;
        };
        let kind = match decl.kind {
            VariableKind::Var => DeclarationKind::Var,
            VariableKind::Let => DeclarationKind::Let,
            VariableKind::Const => DeclarationKind::Const,
            VariableKind::Using => DeclarationKind::Using,
            VariableKind::AwaitUsing => DeclarationKind::AwaitUsing,
        };
        let scope = if decl.kind.is_lexical() {
            self.current_scope
        } else {
            self.current_variable_scope()
        };
        let owning_loop = Self::owning_loop_of_declaration(arena, idx);

        for &declarator in &decl.declarations {
            let Some(NodeData::VariableDeclarator(data)) = arena.data(declarator) else {
                continue;
            };
            self.bind_declaration_pattern(
                arena,
                data.id,
                scope,
                kind,
                idx,
                owning_loop,
                data.init.is_some(),
            );
            self.bind_type(arena, data.type_annotation);
            self.bind_node(arena, data.init);
        }
    }

    /// The loop whose head holds declaration `idx`.
    fn owning_loop_of_declaration(arena: &NodeArena, idx: NodeIndex) -> NodeIndex {
        let parent = arena.parent(idx);
        let in_head = match arena.data(parent) {
            Some(NodeData::For(stmt)) => stmt.init == idx,
            Some(NodeData::ForIn(stmt) | NodeData::ForOf(stmt)) => stmt.left == idx,
            _ => false,
        };
        if in_head { parent } else { NodeIndex::NONE }
    }

    fn bind_for_statement(&mut self, arena: &NodeArena, idx: NodeIndex, stmt: &ForData) {
        let lexical = arena
            .get_variable_declaration(stmt.init)
            .is_some_and(|decl| decl.kind.is_lexical());
        if lexical {
            self.enter_scope(ScopeKind::For, idx);
        }
        self.bind_node(arena, stmt.init);
        self.bind_node(arena, stmt.test);
        self.bind_node(arena, stmt.update);
        self.bind_node(arena, stmt.body);
        if lexical {
            self.exit_scope();
        }
    }

    fn bind_for_in_of_statement(&mut self, arena: &NodeArena, idx: NodeIndex, stmt: &ForInOfData) {
        let declaration = arena.get_variable_declaration(stmt.left);
        let lexical = declaration.is_some_and(|decl| decl.kind.is_lexical());
        if lexical {
            self.enter_scope(ScopeKind::For, idx);
        }
        if let Some(decl) = declaration {
            self.bind_variable_declaration(arena, stmt.left);
            // Every iteration assigns the head binding
            let first = decl.declarations.first().copied().unwrap_or(NodeIndex::NONE);
            if let Some(NodeData::VariableDeclarator(data)) = arena.data(first) {
                let parts = PatternParts::collect(arena, data.id);
                for target in &parts.targets {
                    self.add_reference(
                        arena,
                        target.identifier,
                        ReferenceFlags::WRITE | ReferenceFlags::INIT,
                    );
                }
            }
        } else {
            self.bind_assignment_target(arena, stmt.left, ReferenceFlags::WRITE);
        }
        self.bind_node(arena, stmt.right);
        self.bind_node(arena, stmt.body);
        if lexical {
            self.exit_scope();
        }
    }

    // =========================================================================
    // Functions and classes
    // =========================================================================

    fn bind_function(&mut self, arena: &NodeArena, idx: NodeIndex, func: &FunctionData) {
        trace!(function = idx.0, kind = ?func.kind, "bind function");
        if func.kind == FunctionKind::Declaration && func.name.is_some() {
            let scope = self.current_scope;
            self.declare(arena, scope, func.name, DeclarationKind::FunctionName, idx, NodeIndex::NONE);
        }
        let has_name_scope = func.kind == FunctionKind::Expression && func.name.is_some();
        if has_name_scope {
            let scope = self.enter_scope(ScopeKind::FunctionExpressionName, idx);
            self.declare(
                arena,
                scope,
                func.name,
                DeclarationKind::FunctionExpressionName,
                idx,
                NodeIndex::NONE,
            );
        }

        let scope = self.enter_scope(ScopeKind::Function, idx);
        if !func.caps.is_arrow {
            self.declare_implicit(scope, "arguments", DeclarationKind::ImplicitArguments);
        }
        self.declare_type_parameters(arena, scope, &func.type_parameters);
        for &param in &func.params {
            self.bind_declaration_pattern(
                arena,
                param,
                scope,
                DeclarationKind::Parameter,
                idx,
                NodeIndex::NONE,
                false,
            );
        }
        self.bind_type(arena, func.return_type);
        match arena.data(func.body) {
            // The body block shares the function scope
            Some(NodeData::Block(body)) => self.bind_nodes(arena, &body.statements),
            Some(_) => self.bind_node(arena, func.body),
            None => {}
        }
        self.exit_scope();

        if has_name_scope {
            self.exit_scope();
        }
    }

    fn bind_class(&mut self, arena: &NodeArena, idx: NodeIndex, class: &ClassData) {
        if class.is_declaration && class.name.is_some() {
            let scope = self.current_scope;
            self.declare(arena, scope, class.name, DeclarationKind::ClassName, idx, NodeIndex::NONE);
        }
        let scope = self.enter_scope(ScopeKind::Class, idx);
        if class.name.is_some() {
            self.declare(arena, scope, class.name, DeclarationKind::ClassName, idx, NodeIndex::NONE);
        }
        self.declare_type_parameters(arena, scope, &class.type_parameters);
        self.bind_node(arena, class.super_class);
        self.bind_type_list(arena, &class.implements);
        self.bind_nodes(arena, &class.members);
        self.exit_scope();
    }
}
