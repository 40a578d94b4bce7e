//! AST node definitions.
//!
//! Nodes live in a [`NodeArena`](super::NodeArena) and refer to each other by
//! [`NodeIndex`]. The shapes follow ESTree closely enough that rule code can
//! speak in ESTree terms (`FunctionExpression`, `ForInStatement`, ...), with
//! TypeScript additions for annotations and type-level declarations.
//!
//! Parentheses are not materialised: `(function () {})()` has the function
//! node as the direct callee of the call.

use loopguard_scanner::SyntaxKind;
use serde::Serialize;

/// Index of a node in the arena. `NodeIndex::NONE` marks an absent child.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NodeIndex(pub u32);

impl NodeIndex {
    pub const NONE: NodeIndex = NodeIndex(u32::MAX);

    #[inline]
    pub fn is_none(self) -> bool {
        self == Self::NONE
    }

    #[inline]
    pub fn is_some(self) -> bool {
        self != Self::NONE
    }
}

pub type NodeList = Vec<NodeIndex>;

/// A node: source range, parent link and kind-specific payload.
#[derive(Clone, Debug)]
pub struct Node {
    /// Start position in source (byte offset)
    pub pos: u32,
    /// End position in source (byte offset, exclusive)
    pub end: u32,
    /// Set by `NodeArena::link_parents` after parsing
    pub parent: NodeIndex,
    pub data: NodeData,
}

// =============================================================================
// Declaration and function payloads
// =============================================================================

/// Keyword of a variable declaration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum VariableKind {
    Var,
    Let,
    Const,
    Using,
    AwaitUsing,
}

impl VariableKind {
    pub fn as_str(self) -> &'static str {
        match self {
            VariableKind::Var => "var",
            VariableKind::Let => "let",
            VariableKind::Const => "const",
            VariableKind::Using => "using",
            VariableKind::AwaitUsing => "await using",
        }
    }

    /// Block scoped (everything but `var`).
    pub fn is_lexical(self) -> bool {
        self != VariableKind::Var
    }
}

#[derive(Clone, Debug)]
pub struct VariableDeclarationData {
    pub kind: VariableKind,
    pub declarations: NodeList,
}

#[derive(Clone, Debug)]
pub struct VariableDeclaratorData {
    /// Identifier, ObjectPattern or ArrayPattern
    pub id: NodeIndex,
    pub type_annotation: NodeIndex,
    pub init: NodeIndex,
}

/// Syntactic form of a function-like node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FunctionKind {
    Declaration,
    Expression,
    Arrow,
    Method,
    Getter,
    Setter,
    Constructor,
}

/// What a function-like node can do, independent of its syntactic form.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct FunctionCapabilities {
    pub is_arrow: bool,
    pub is_generator: bool,
    pub is_async: bool,
}

impl FunctionCapabilities {
    /// Generators and async functions may give up control before completing.
    pub fn can_suspend(self) -> bool {
        self.is_generator || self.is_async
    }
}

#[derive(Clone, Debug)]
pub struct FunctionData {
    pub kind: FunctionKind,
    pub caps: FunctionCapabilities,
    pub name: NodeIndex,
    pub type_parameters: NodeList,
    /// `Parameter` nodes
    pub params: NodeList,
    pub return_type: NodeIndex,
    /// Block, or an expression for concise arrow bodies.
    /// NONE for overload signatures and ambient declarations.
    pub body: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct ParameterData {
    /// Identifier, ObjectPattern, ArrayPattern, AssignmentPattern or RestElement
    pub pattern: NodeIndex,
    pub optional: bool,
    pub type_annotation: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct ClassData {
    pub is_declaration: bool,
    pub name: NodeIndex,
    pub type_parameters: NodeList,
    pub super_class: NodeIndex,
    pub implements: NodeList,
    pub members: NodeList,
}

#[derive(Clone, Debug)]
pub struct MethodData {
    pub key: NodeIndex,
    pub computed: bool,
    pub is_static: bool,
    /// FunctionLike node of kind Method, Getter, Setter or Constructor
    pub value: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct PropertyDefinitionData {
    pub key: NodeIndex,
    pub computed: bool,
    pub is_static: bool,
    pub type_annotation: NodeIndex,
    pub value: NodeIndex,
}

// =============================================================================
// Statement payloads
// =============================================================================

#[derive(Clone, Debug)]
pub struct BlockData {
    pub statements: NodeList,
}

#[derive(Clone, Debug)]
pub struct IfData {
    pub test: NodeIndex,
    pub consequent: NodeIndex,
    pub alternate: NodeIndex,
}

/// `for (init; test; update) body`
#[derive(Clone, Debug)]
pub struct ForData {
    pub init: NodeIndex,
    pub test: NodeIndex,
    pub update: NodeIndex,
    pub body: NodeIndex,
}

/// `for (left in right) body` and `for [await] (left of right) body`
#[derive(Clone, Debug)]
pub struct ForInOfData {
    pub left: NodeIndex,
    pub right: NodeIndex,
    pub body: NodeIndex,
    pub is_await: bool,
}

/// `while (test) body` and `do body while (test)`
#[derive(Clone, Debug)]
pub struct WhileData {
    pub test: NodeIndex,
    pub body: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct TryData {
    pub block: NodeIndex,
    pub handler: NodeIndex,
    pub finalizer: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct CatchClauseData {
    pub param: NodeIndex,
    pub type_annotation: NodeIndex,
    pub body: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct SwitchData {
    pub discriminant: NodeIndex,
    pub cases: NodeList,
}

#[derive(Clone, Debug)]
pub struct SwitchCaseData {
    /// NONE for `default:`
    pub test: NodeIndex,
    pub consequent: NodeList,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImportSpecifierKind {
    Default,
    Namespace,
    Named,
}

#[derive(Clone, Debug)]
pub struct ImportDeclarationData {
    pub specifiers: NodeList,
    pub source: NodeIndex,
    pub is_type_only: bool,
}

#[derive(Clone, Debug)]
pub struct ImportSpecifierData {
    pub kind: ImportSpecifierKind,
    /// PropertyName or string Literal; NONE for default/namespace imports
    pub imported: NodeIndex,
    pub local: NodeIndex,
    pub is_type_only: bool,
}

#[derive(Clone, Debug)]
pub struct ExportNamedData {
    pub declaration: NodeIndex,
    pub specifiers: NodeList,
    pub source: NodeIndex,
    pub is_type_only: bool,
}

#[derive(Clone, Debug)]
pub struct ExportSpecifierData {
    /// Identifier when re-exporting a local, PropertyName with a `source`
    pub local: NodeIndex,
    pub exported: NodeIndex,
}

// =============================================================================
// Expression payloads
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LiteralKind {
    String,
    Number,
    BigInt,
    Boolean,
    Null,
    RegExp,
}

#[derive(Clone, Debug)]
pub struct LiteralData {
    pub kind: LiteralKind,
    /// Cooked value for strings, raw text otherwise
    pub value: String,
}

#[derive(Clone, Debug)]
pub struct TemplateData {
    pub quasis: Vec<String>,
    pub expressions: NodeList,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PropertyKind {
    Init,
    Get,
    Set,
}

#[derive(Clone, Debug)]
pub struct PropertyData {
    pub key: NodeIndex,
    pub value: NodeIndex,
    pub kind: PropertyKind,
    pub computed: bool,
    pub shorthand: bool,
    pub method: bool,
}

#[derive(Clone, Debug)]
pub struct UnaryData {
    pub operator: SyntaxKind,
    pub argument: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct UpdateData {
    pub operator: SyntaxKind,
    pub prefix: bool,
    pub argument: NodeIndex,
}

/// Binary, logical and assignment expressions.
#[derive(Clone, Debug)]
pub struct BinaryData {
    pub operator: SyntaxKind,
    pub left: NodeIndex,
    pub right: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct ConditionalData {
    pub test: NodeIndex,
    pub consequent: NodeIndex,
    pub alternate: NodeIndex,
}

/// Call and `new` expressions.
#[derive(Clone, Debug)]
pub struct CallData {
    pub callee: NodeIndex,
    pub type_arguments: NodeList,
    pub arguments: NodeList,
    pub optional: bool,
}

#[derive(Clone, Debug)]
pub struct MemberData {
    pub object: NodeIndex,
    /// PropertyName/PrivateName when not computed
    pub property: NodeIndex,
    pub computed: bool,
    pub optional: bool,
}

/// `expr as T`, `expr satisfies T`, `<T>expr`
#[derive(Clone, Debug)]
pub struct TypeCastData {
    pub expression: NodeIndex,
    pub annotation: NodeIndex,
}

// =============================================================================
// TypeScript type payloads
// =============================================================================

#[derive(Clone, Debug)]
pub struct TypeAliasData {
    pub name: NodeIndex,
    pub type_parameters: NodeList,
    pub annotation: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct InterfaceData {
    pub name: NodeIndex,
    pub type_parameters: NodeList,
    pub extends: NodeList,
    pub members: NodeList,
}

#[derive(Clone, Debug)]
pub struct EnumData {
    pub name: NodeIndex,
    pub is_const: bool,
    pub members: NodeList,
}

#[derive(Clone, Debug)]
pub struct EnumMemberData {
    pub name: NodeIndex,
    pub initializer: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct TypeParameterData {
    pub name: NodeIndex,
    pub constraint: NodeIndex,
    pub default: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct TypeReferenceData {
    /// Identifier or QualifiedName
    pub name: NodeIndex,
    pub type_arguments: NodeList,
}

/// Signature-shaped types and members: function types, constructor types,
/// call/construct/method signatures.
#[derive(Clone, Debug)]
pub struct SignatureData {
    /// PropertyName key for method signatures, NONE otherwise
    pub key: NodeIndex,
    pub type_parameters: NodeList,
    pub params: NodeList,
    pub return_type: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct PropertySignatureData {
    pub key: NodeIndex,
    pub computed: bool,
    pub optional: bool,
    pub annotation: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct ConditionalTypeData {
    pub check_type: NodeIndex,
    pub extends_type: NodeIndex,
    pub true_type: NodeIndex,
    pub false_type: NodeIndex,
}

// =============================================================================
// Node payload enum
// =============================================================================

/// Kind-specific payload of a node.
#[derive(Clone, Debug)]
pub enum NodeData {
    SourceFile(BlockData),

    // Names
    /// A name in reference or binding position
    Identifier(String),
    /// A name that is never a variable reference: member property, object
    /// key, label, class member key, import/export alias
    PropertyName(String),
    PrivateName(String),

    // Statements and declarations
    VariableDeclaration(VariableDeclarationData),
    VariableDeclarator(VariableDeclaratorData),
    FunctionLike(FunctionData),
    Parameter(ParameterData),
    Class(ClassData),
    MethodDefinition(MethodData),
    PropertyDefinition(PropertyDefinitionData),
    StaticBlock(BlockData),
    Block(BlockData),
    Empty,
    ExpressionStatement(NodeIndex),
    If(IfData),
    For(ForData),
    ForIn(ForInOfData),
    ForOf(ForInOfData),
    While(WhileData),
    DoWhile(WhileData),
    Return(NodeIndex),
    Throw(NodeIndex),
    Break(NodeIndex),
    Continue(NodeIndex),
    Labeled { label: NodeIndex, body: NodeIndex },
    Switch(SwitchData),
    SwitchCase(SwitchCaseData),
    Try(TryData),
    CatchClause(CatchClauseData),
    Debugger,
    With { object: NodeIndex, body: NodeIndex },
    ImportDeclaration(ImportDeclarationData),
    ImportSpecifier(ImportSpecifierData),
    ExportNamed(ExportNamedData),
    ExportSpecifier(ExportSpecifierData),
    ExportDefault(NodeIndex),
    ExportAll { exported: NodeIndex, source: NodeIndex },

    // Expressions
    Literal(LiteralData),
    Template(TemplateData),
    TaggedTemplate { tag: NodeIndex, quasi: NodeIndex },
    This,
    Super,
    Array(NodeList),
    Object(NodeList),
    Property(PropertyData),
    Spread(NodeIndex),
    Unary(UnaryData),
    Update(UpdateData),
    Binary(BinaryData),
    Logical(BinaryData),
    Assignment(BinaryData),
    Conditional(ConditionalData),
    Call(CallData),
    New(CallData),
    Member(MemberData),
    Sequence(NodeList),
    Await(NodeIndex),
    Yield { argument: NodeIndex, delegate: bool },
    MetaProperty { meta: NodeIndex, property: NodeIndex },
    ImportCall(NodeList),
    TypeCast(TypeCastData),
    NonNull(NodeIndex),

    // Patterns
    ObjectPattern(NodeList),
    ArrayPattern(NodeList),
    AssignmentPattern { left: NodeIndex, right: NodeIndex },
    RestElement(NodeIndex),

    // TypeScript declarations
    TypeAlias(TypeAliasData),
    Interface(InterfaceData),
    Enum(EnumData),
    EnumMember(EnumMemberData),
    TypeParameter(TypeParameterData),

    // TypeScript types
    TypeKeyword(String),
    TypeReference(TypeReferenceData),
    QualifiedName { left: NodeIndex, right: NodeIndex },
    /// `typeof x` in a type
    TypeQuery(NodeIndex),
    TypeLiteral(NodeList),
    PropertySignature(PropertySignatureData),
    MethodSignature(SignatureData),
    CallSignature(SignatureData),
    IndexSignature { params: NodeList, annotation: NodeIndex },
    FunctionType(SignatureData),
    ArrayType(NodeIndex),
    TupleType(NodeList),
    UnionType(NodeList),
    IntersectionType(NodeList),
    LiteralType(NodeIndex),
    /// `keyof T`, `readonly T[]`, `unique symbol`
    TypeOperator { operator: SyntaxKind, type_node: NodeIndex },
    IndexedAccessType { object: NodeIndex, index: NodeIndex },
    ConditionalType(ConditionalTypeData),
    InferType(NodeIndex),
    MappedType { type_parameter: NodeIndex, annotation: NodeIndex },
    TypePredicate { parameter: NodeIndex, annotation: NodeIndex },
}

impl NodeData {
    /// ESTree-style type name, used in diagnostics and debug output.
    pub fn kind_name(&self) -> &'static str {
        match self {
            NodeData::SourceFile(_) => "Program",
            NodeData::Identifier(_) | NodeData::PropertyName(_) => "Identifier",
            NodeData::PrivateName(_) => "PrivateIdentifier",
            NodeData::VariableDeclaration(_) => "VariableDeclaration",
            NodeData::VariableDeclarator(_) => "VariableDeclarator",
            NodeData::FunctionLike(func) => match func.kind {
                FunctionKind::Declaration => "FunctionDeclaration",
                FunctionKind::Arrow => "ArrowFunctionExpression",
                FunctionKind::Expression
                | FunctionKind::Method
                | FunctionKind::Getter
                | FunctionKind::Setter
                | FunctionKind::Constructor => "FunctionExpression",
            },
            NodeData::Parameter(_) => "Parameter",
            NodeData::Class(class) => {
                if class.is_declaration {
                    "ClassDeclaration"
                } else {
                    "ClassExpression"
                }
            }
            NodeData::MethodDefinition(_) => "MethodDefinition",
            NodeData::PropertyDefinition(_) => "PropertyDefinition",
            NodeData::StaticBlock(_) => "StaticBlock",
            NodeData::Block(_) => "BlockStatement",
            NodeData::Empty => "EmptyStatement",
            NodeData::ExpressionStatement(_) => "ExpressionStatement",
            NodeData::If(_) => "IfStatement",
            NodeData::For(_) => "ForStatement",
            NodeData::ForIn(_) => "ForInStatement",
            NodeData::ForOf(_) => "ForOfStatement",
            NodeData::While(_) => "WhileStatement",
            NodeData::DoWhile(_) => "DoWhileStatement",
            NodeData::Return(_) => "ReturnStatement",
            NodeData::Throw(_) => "ThrowStatement",
            NodeData::Break(_) => "BreakStatement",
            NodeData::Continue(_) => "ContinueStatement",
            NodeData::Labeled { .. } => "LabeledStatement",
            NodeData::Switch(_) => "SwitchStatement",
            NodeData::SwitchCase(_) => "SwitchCase",
            NodeData::Try(_) => "TryStatement",
            NodeData::CatchClause(_) => "CatchClause",
            NodeData::Debugger => "DebuggerStatement",
            NodeData::With { .. } => "WithStatement",
            NodeData::ImportDeclaration(_) => "ImportDeclaration",
            NodeData::ImportSpecifier(_) => "ImportSpecifier",
            NodeData::ExportNamed(_) => "ExportNamedDeclaration",
            NodeData::ExportSpecifier(_) => "ExportSpecifier",
            NodeData::ExportDefault(_) => "ExportDefaultDeclaration",
            NodeData::ExportAll { .. } => "ExportAllDeclaration",
            NodeData::Literal(_) => "Literal",
            NodeData::Template(_) => "TemplateLiteral",
            NodeData::TaggedTemplate { .. } => "TaggedTemplateExpression",
            NodeData::This => "ThisExpression",
            NodeData::Super => "Super",
            NodeData::Array(_) => "ArrayExpression",
            NodeData::Object(_) => "ObjectExpression",
            NodeData::Property(_) => "Property",
            NodeData::Spread(_) => "SpreadElement",
            NodeData::Unary(_) => "UnaryExpression",
            NodeData::Update(_) => "UpdateExpression",
            NodeData::Binary(_) => "BinaryExpression",
            NodeData::Logical(_) => "LogicalExpression",
            NodeData::Assignment(_) => "AssignmentExpression",
            NodeData::Conditional(_) => "ConditionalExpression",
            NodeData::Call(_) => "CallExpression",
            NodeData::New(_) => "NewExpression",
            NodeData::Member(_) => "MemberExpression",
            NodeData::Sequence(_) => "SequenceExpression",
            NodeData::Await(_) => "AwaitExpression",
            NodeData::Yield { .. } => "YieldExpression",
            NodeData::MetaProperty { .. } => "MetaProperty",
            NodeData::ImportCall(_) => "ImportExpression",
            NodeData::TypeCast(_) => "TSAsExpression",
            NodeData::NonNull(_) => "TSNonNullExpression",
            NodeData::ObjectPattern(_) => "ObjectPattern",
            NodeData::ArrayPattern(_) => "ArrayPattern",
            NodeData::AssignmentPattern { .. } => "AssignmentPattern",
            NodeData::RestElement(_) => "RestElement",
            NodeData::TypeAlias(_) => "TSTypeAliasDeclaration",
            NodeData::Interface(_) => "TSInterfaceDeclaration",
            NodeData::Enum(_) => "TSEnumDeclaration",
            NodeData::EnumMember(_) => "TSEnumMember",
            NodeData::TypeParameter(_) => "TSTypeParameter",
            NodeData::TypeKeyword(_) => "TSKeyword",
            NodeData::TypeReference(_) => "TSTypeReference",
            NodeData::QualifiedName { .. } => "TSQualifiedName",
            NodeData::TypeQuery(_) => "TSTypeQuery",
            NodeData::TypeLiteral(_) => "TSTypeLiteral",
            NodeData::PropertySignature(_) => "TSPropertySignature",
            NodeData::MethodSignature(_) => "TSMethodSignature",
            NodeData::CallSignature(_) => "TSCallSignatureDeclaration",
            NodeData::IndexSignature { .. } => "TSIndexSignature",
            NodeData::FunctionType(_) => "TSFunctionType",
            NodeData::ArrayType(_) => "TSArrayType",
            NodeData::TupleType(_) => "TSTupleType",
            NodeData::UnionType(_) => "TSUnionType",
            NodeData::IntersectionType(_) => "TSIntersectionType",
            NodeData::LiteralType(_) => "TSLiteralType",
            NodeData::TypeOperator { .. } => "TSTypeOperator",
            NodeData::IndexedAccessType { .. } => "TSIndexedAccessType",
            NodeData::ConditionalType(_) => "TSConditionalType",
            NodeData::InferType(_) => "TSInferType",
            NodeData::MappedType { .. } => "TSMappedType",
            NodeData::TypePredicate { .. } => "TSTypePredicate",
        }
    }
}
