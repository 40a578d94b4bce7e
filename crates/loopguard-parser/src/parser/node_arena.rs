//! Node arena: owns every node of one parsed file.

use super::node::*;
use loopguard_common::limits::MAX_PARENT_WALK;
use smallvec::SmallVec;

/// Child list of one node, in source order.
pub type ChildList = SmallVec<[NodeIndex; 8]>;

/// Flat storage for the nodes of one source file.
#[derive(Clone, Debug, Default)]
pub struct NodeArena {
    pub(crate) nodes: Vec<Node>,
}

impl NodeArena {
    pub fn new() -> NodeArena {
        NodeArena { nodes: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> NodeArena {
        NodeArena {
            nodes: Vec::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Add a node and return its index. The parent link is filled in later
    /// by [`NodeArena::link_parents`].
    pub fn add(&mut self, pos: u32, end: u32, data: NodeData) -> NodeIndex {
        let index = NodeIndex(self.nodes.len() as u32);
        self.nodes.push(Node {
            pos,
            end,
            parent: NodeIndex::NONE,
            data,
        });
        index
    }

    /// Drop nodes created after a speculative parse was abandoned.
    pub(crate) fn truncate(&mut self, len: usize) {
        self.nodes.truncate(len);
    }

    /// Iterate over every node index in creation order.
    pub fn indices(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        (0..self.nodes.len() as u32).map(NodeIndex)
    }

    /// Children of `index` in source order. Absent children are skipped.
    pub fn children(&self, index: NodeIndex) -> ChildList {
        let mut out = ChildList::new();
        let Some(node) = self.get(index) else {
            return out;
        };
        let mut one = |child: NodeIndex| {
            if child.is_some() {
                out.push(child);
            }
        };
        match &node.data {
            NodeData::Identifier(_)
            | NodeData::PropertyName(_)
            | NodeData::PrivateName(_)
            | NodeData::Empty
            | NodeData::Debugger
            | NodeData::Literal(_)
            | NodeData::This
            | NodeData::Super
            | NodeData::TypeKeyword(_) => {}

            NodeData::SourceFile(block) | NodeData::Block(block) | NodeData::StaticBlock(block) => {
                block.statements.iter().copied().for_each(one)
            }
            NodeData::VariableDeclaration(decl) => decl.declarations.iter().copied().for_each(one),
            NodeData::VariableDeclarator(decl) => {
                one(decl.id);
                one(decl.type_annotation);
                one(decl.init);
            }
            NodeData::FunctionLike(func) => {
                one(func.name);
                func.type_parameters.iter().copied().for_each(&mut one);
                func.params.iter().copied().for_each(&mut one);
                one(func.return_type);
                one(func.body);
            }
            NodeData::Parameter(param) => {
                one(param.pattern);
                one(param.type_annotation);
            }
            NodeData::Class(class) => {
                one(class.name);
                class.type_parameters.iter().copied().for_each(&mut one);
                one(class.super_class);
                class.implements.iter().copied().for_each(&mut one);
                class.members.iter().copied().for_each(&mut one);
            }
            NodeData::MethodDefinition(method) => {
                one(method.key);
                one(method.value);
            }
            NodeData::PropertyDefinition(prop) => {
                one(prop.key);
                one(prop.type_annotation);
                one(prop.value);
            }
            NodeData::ExpressionStatement(expr)
            | NodeData::Return(expr)
            | NodeData::Throw(expr)
            | NodeData::Break(expr)
            | NodeData::Continue(expr)
            | NodeData::ExportDefault(expr)
            | NodeData::Spread(expr)
            | NodeData::Await(expr)
            | NodeData::NonNull(expr)
            | NodeData::RestElement(expr)
            | NodeData::TypeQuery(expr)
            | NodeData::ArrayType(expr)
            | NodeData::LiteralType(expr)
            | NodeData::InferType(expr) => one(*expr),
            NodeData::If(stmt) => {
                one(stmt.test);
                one(stmt.consequent);
                one(stmt.alternate);
            }
            NodeData::For(stmt) => {
                one(stmt.init);
                one(stmt.test);
                one(stmt.update);
                one(stmt.body);
            }
            NodeData::ForIn(stmt) | NodeData::ForOf(stmt) => {
                one(stmt.left);
                one(stmt.right);
                one(stmt.body);
            }
            NodeData::While(stmt) => {
                one(stmt.test);
                one(stmt.body);
            }
            NodeData::DoWhile(stmt) => {
                one(stmt.body);
                one(stmt.test);
            }
            NodeData::Labeled { label, body } => {
                one(*label);
                one(*body);
            }
            NodeData::Switch(stmt) => {
                one(stmt.discriminant);
                stmt.cases.iter().copied().for_each(&mut one);
            }
            NodeData::SwitchCase(case) => {
                one(case.test);
                case.consequent.iter().copied().for_each(&mut one);
            }
            NodeData::Try(stmt) => {
                one(stmt.block);
                one(stmt.handler);
                one(stmt.finalizer);
            }
            NodeData::CatchClause(clause) => {
                one(clause.param);
                one(clause.type_annotation);
                one(clause.body);
            }
            NodeData::With { object, body } => {
                one(*object);
                one(*body);
            }
            NodeData::ImportDeclaration(decl) => {
                decl.specifiers.iter().copied().for_each(&mut one);
                one(decl.source);
            }
            NodeData::ImportSpecifier(spec) => {
                one(spec.imported);
                one(spec.local);
            }
            NodeData::ExportNamed(decl) => {
                one(decl.declaration);
                decl.specifiers.iter().copied().for_each(&mut one);
                one(decl.source);
            }
            NodeData::ExportSpecifier(spec) => {
                one(spec.local);
                one(spec.exported);
            }
            NodeData::ExportAll { exported, source } => {
                one(*exported);
                one(*source);
            }
            NodeData::Template(template) => template.expressions.iter().copied().for_each(one),
            NodeData::TaggedTemplate { tag, quasi } => {
                one(*tag);
                one(*quasi);
            }
            NodeData::Array(list)
            | NodeData::Object(list)
            | NodeData::Sequence(list)
            | NodeData::ImportCall(list)
            | NodeData::ObjectPattern(list)
            | NodeData::ArrayPattern(list)
            | NodeData::TypeLiteral(list)
            | NodeData::TupleType(list)
            | NodeData::UnionType(list)
            | NodeData::IntersectionType(list) => list.iter().copied().for_each(one),
            NodeData::Property(prop) => {
                // Shorthand properties share the key's text but are separate nodes
                one(prop.key);
                one(prop.value);
            }
            NodeData::Unary(expr) => one(expr.argument),
            NodeData::Update(expr) => one(expr.argument),
            NodeData::Binary(expr) | NodeData::Logical(expr) | NodeData::Assignment(expr) => {
                one(expr.left);
                one(expr.right);
            }
            NodeData::Conditional(expr) => {
                one(expr.test);
                one(expr.consequent);
                one(expr.alternate);
            }
            NodeData::Call(call) | NodeData::New(call) => {
                one(call.callee);
                call.type_arguments.iter().copied().for_each(&mut one);
                call.arguments.iter().copied().for_each(&mut one);
            }
            NodeData::Member(member) => {
                one(member.object);
                one(member.property);
            }
            NodeData::Yield { argument, .. } => one(*argument),
            NodeData::MetaProperty { meta, property } => {
                one(*meta);
                one(*property);
            }
            NodeData::TypeCast(cast) => {
                one(cast.expression);
                one(cast.annotation);
            }
            NodeData::AssignmentPattern { left, right } => {
                one(*left);
                one(*right);
            }
            NodeData::TypeAlias(alias) => {
                one(alias.name);
                alias.type_parameters.iter().copied().for_each(&mut one);
                one(alias.annotation);
            }
            NodeData::Interface(iface) => {
                one(iface.name);
                iface.type_parameters.iter().copied().for_each(&mut one);
                iface.extends.iter().copied().for_each(&mut one);
                iface.members.iter().copied().for_each(&mut one);
            }
            NodeData::Enum(decl) => {
                one(decl.name);
                decl.members.iter().copied().for_each(&mut one);
            }
            NodeData::EnumMember(member) => {
                one(member.name);
                one(member.initializer);
            }
            NodeData::TypeParameter(param) => {
                one(param.name);
                one(param.constraint);
                one(param.default);
            }
            NodeData::TypeReference(reference) => {
                one(reference.name);
                reference.type_arguments.iter().copied().for_each(&mut one);
            }
            NodeData::QualifiedName { left, right } => {
                one(*left);
                one(*right);
            }
            NodeData::PropertySignature(sig) => {
                one(sig.key);
                one(sig.annotation);
            }
            NodeData::MethodSignature(sig)
            | NodeData::CallSignature(sig)
            | NodeData::FunctionType(sig) => {
                one(sig.key);
                sig.type_parameters.iter().copied().for_each(&mut one);
                sig.params.iter().copied().for_each(&mut one);
                one(sig.return_type);
            }
            NodeData::IndexSignature { params, annotation } => {
                params.iter().copied().for_each(&mut one);
                one(*annotation);
            }
            NodeData::TypeOperator { type_node, .. } => one(*type_node),
            NodeData::IndexedAccessType { object, index } => {
                one(*object);
                one(*index);
            }
            NodeData::ConditionalType(cond) => {
                one(cond.check_type);
                one(cond.extends_type);
                one(cond.true_type);
                one(cond.false_type);
            }
            NodeData::MappedType {
                type_parameter,
                annotation,
            } => {
                one(*type_parameter);
                one(*annotation);
            }
            NodeData::TypePredicate {
                parameter,
                annotation,
            } => {
                one(*parameter);
                one(*annotation);
            }
        }
        out
    }

    /// Fill in parent links for every node reachable from `root`.
    pub fn link_parents(&mut self, root: NodeIndex) {
        let mut stack = vec![root];
        while let Some(parent) = stack.pop() {
            for child in self.children(parent) {
                if let Some(node) = self.get_mut(child) {
                    node.parent = parent;
                }
                stack.push(child);
            }
        }
    }

    /// Ancestors of `index`, innermost first. Bounded by `MAX_PARENT_WALK`.
    pub fn ancestors(&self, index: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        let mut current = self.parent(index);
        let mut steps = 0usize;
        std::iter::from_fn(move || {
            if current.is_none() || steps >= MAX_PARENT_WALK {
                return None;
            }
            steps += 1;
            let result = current;
            current = self.parent(current);
            Some(result)
        })
    }
}
