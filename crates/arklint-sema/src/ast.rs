//! Read-only AST node arena.
//!
//! Nodes live in a flat arena and are referenced by `NodeId`. Each node
//! records its span, parent, source file and kind-specific payload. The
//! checker never mutates nodes; the arena is populated once by the host
//! (or by `ModelBuilder` in tests) and then only read.

use crate::files::FileId;
use arklint_common::{Atom, Span};
use bitflags::bitflags;
use smallvec::SmallVec;

/// Identifier of a node in the arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

bitflags! {
    /// Declaration modifiers (`readonly`, `abstract`, `static`, ...).
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct ModifierFlags: u16 {
        const EXPORT = 1 << 0;
        const DECLARE = 1 << 1;
        const PUBLIC = 1 << 2;
        const PRIVATE = 1 << 3;
        const PROTECTED = 1 << 4;
        const STATIC = 1 << 5;
        const READONLY = 1 << 6;
        const ABSTRACT = 1 << 7;
        const ASYNC = 1 << 8;
        const CONST = 1 << 9;

        const ACCESS = Self::PUBLIC.bits() | Self::PRIVATE.bits() | Self::PROTECTED.bits();
    }
}

/// Variable declaration list kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VarDeclKind {
    Var,
    Let,
    Const,
}

/// Heritage clause role.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HeritageToken {
    Extends,
    Implements,
}

/// One `extends`/`implements` clause of a class or interface.
#[derive(Clone, Debug)]
pub struct HeritageClause {
    pub token: HeritageToken,
    /// `ExpressionWithTypeArgs` nodes naming the parent types.
    pub types: SmallVec<[NodeId; 2]>,
}

/// Binary operators the checker inspects.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinaryOp {
    Assign,
    AddAssign,
    SubAssign,
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Shl,
    Shr,
    Ushr,
    BitAnd,
    BitOr,
    BitXor,
    LogicalAnd,
    LogicalOr,
    Instanceof,
    In,
    EqEq,
    NotEq,
}

impl BinaryOp {
    /// Whether the operator is an assignment (plain or compound).
    pub fn is_assignment(self) -> bool {
        matches!(self, BinaryOp::Assign | BinaryOp::AddAssign | BinaryOp::SubAssign)
    }
}

/// Prefix unary operators.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnaryOp {
    Plus,
    Minus,
    Tilde,
    Bang,
}

/// Keyword type-node kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TypeKeyword {
    Any,
    Unknown,
    Number,
    String,
    Boolean,
    Object,
    Void,
    Undefined,
    Never,
    Symbol,
}

/// Comment trivia kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommentKind {
    SingleLine,
    MultiLine,
}

/// A comment range, which can stand in for a node when reporting faults on
/// trivia.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CommentRange {
    pub kind: CommentKind,
    pub pos: u32,
    pub end: u32,
}

/// Either an AST node or a comment range.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeOrComment {
    Node(NodeId),
    Comment(CommentRange),
}

impl From<NodeId> for NodeOrComment {
    fn from(node: NodeId) -> Self {
        NodeOrComment::Node(node)
    }
}

// =============================================================================
// Node payloads
// =============================================================================

#[derive(Clone, Debug)]
pub struct ClassDecl {
    pub name: Option<NodeId>,
    pub modifiers: ModifierFlags,
    /// Decorator names, in source order.
    pub decorators: SmallVec<[Atom; 1]>,
    pub heritage: Vec<HeritageClause>,
    pub members: Vec<NodeId>,
}

#[derive(Clone, Debug)]
pub struct InterfaceDecl {
    pub name: NodeId,
    pub heritage: Vec<HeritageClause>,
    pub members: Vec<NodeId>,
}

#[derive(Clone, Debug)]
pub struct EnumDecl {
    pub name: NodeId,
    pub modifiers: ModifierFlags,
    pub members: Vec<NodeId>,
}

#[derive(Clone, Debug)]
pub struct EnumMember {
    pub name: NodeId,
    pub initializer: Option<NodeId>,
}

#[derive(Clone, Debug)]
pub struct TypeAliasDecl {
    pub name: NodeId,
    pub type_node: NodeId,
}

#[derive(Clone, Debug)]
pub struct PropertyDecl {
    pub name: NodeId,
    pub modifiers: ModifierFlags,
    pub decorators: SmallVec<[Atom; 1]>,
    /// Span of the definite-assignment `!` token, if present.
    pub exclamation: Option<Span>,
    pub type_node: Option<NodeId>,
    pub initializer: Option<NodeId>,
}

#[derive(Clone, Debug)]
pub struct PropertySignature {
    pub name: NodeId,
    pub type_node: Option<NodeId>,
}

#[derive(Clone, Debug)]
pub struct MethodDecl {
    pub name: NodeId,
    pub modifiers: ModifierFlags,
}

#[derive(Clone, Debug)]
pub struct ConstructorDecl {
    pub params: Vec<NodeId>,
}

#[derive(Clone, Debug)]
pub struct ParameterDecl {
    pub name: NodeId,
    pub modifiers: ModifierFlags,
}

#[derive(Clone, Debug)]
pub struct FunctionDecl {
    pub name: Option<NodeId>,
    pub return_type: Option<NodeId>,
    pub body: Option<NodeId>,
}

#[derive(Clone, Debug)]
pub struct VariableDeclList {
    pub kind: VarDeclKind,
    pub declarations: Vec<NodeId>,
}

#[derive(Clone, Debug)]
pub struct VariableDecl {
    pub name: NodeId,
    pub type_node: Option<NodeId>,
    pub initializer: Option<NodeId>,
}

#[derive(Clone, Debug)]
pub struct ObjectLiteral {
    pub properties: Vec<NodeId>,
}

#[derive(Clone, Debug)]
pub struct PropertyAssignment {
    pub name: NodeId,
    pub initializer: NodeId,
}

#[derive(Clone, Debug)]
pub struct CallExpr {
    pub callee: NodeId,
    pub args: Vec<NodeId>,
}

#[derive(Clone, Debug)]
pub struct PropertyAccess {
    pub expression: NodeId,
    pub name: Atom,
    /// Span of the member-name token (after the dot).
    pub name_span: Span,
}

#[derive(Clone, Debug)]
pub struct BinaryExpr {
    pub left: NodeId,
    pub op: BinaryOp,
    /// Span of the operator token.
    pub op_span: Span,
    pub right: NodeId,
}

#[derive(Clone, Debug)]
pub struct PrefixUnaryExpr {
    pub op: UnaryOp,
    pub operand: NodeId,
}

#[derive(Clone, Debug)]
pub struct ConditionalExpr {
    pub condition: NodeId,
    pub when_true: NodeId,
    pub when_false: NodeId,
}

#[derive(Clone, Debug)]
pub struct AsExpr {
    pub expression: NodeId,
    pub type_node: NodeId,
}

#[derive(Clone, Debug)]
pub struct TypeAssertion {
    pub type_node: NodeId,
    pub expression: NodeId,
}

#[derive(Clone, Debug)]
pub struct ForInStatement {
    pub initializer: NodeId,
    pub expression: NodeId,
    pub statement: NodeId,
}

#[derive(Clone, Debug)]
pub struct ForOfStatement {
    pub initializer: NodeId,
    pub expression: NodeId,
    pub statement: NodeId,
}

#[derive(Clone, Debug)]
pub struct ForStatement {
    pub initializer: Option<NodeId>,
    pub statement: NodeId,
}

#[derive(Clone, Debug)]
pub struct WithStatement {
    pub expression: NodeId,
    pub statement: NodeId,
}

#[derive(Clone, Debug)]
pub struct CatchClause {
    pub variable_declaration: Option<NodeId>,
    pub block: NodeId,
}

#[derive(Clone, Debug)]
pub struct ExpressionWithTypeArgs {
    pub expression: NodeId,
    pub type_args: SmallVec<[NodeId; 2]>,
}

#[derive(Clone, Debug)]
pub struct ModuleDecl {
    pub name: Atom,
    pub body: Option<NodeId>,
}

#[derive(Clone, Debug)]
pub struct ImportDecl {
    pub default_name: Option<Atom>,
    pub namespace_name: Option<Atom>,
    pub named_bindings: SmallVec<[Atom; 2]>,
}

#[derive(Clone, Debug)]
pub struct TypeReferenceNode {
    /// Identifier or qualified name.
    pub name: NodeId,
    pub type_args: SmallVec<[NodeId; 2]>,
}

#[derive(Clone, Debug)]
pub struct QualifiedName {
    pub left: NodeId,
    pub right: NodeId,
}

// =============================================================================
// NodeKind
// =============================================================================

/// Kind and payload of an AST node.
#[derive(Clone, Debug)]
pub enum NodeKind {
    SourceFile { statements: Vec<NodeId> },
    ModuleDecl(ModuleDecl),
    ModuleBlock { statements: Vec<NodeId> },
    ImportDecl(ImportDecl),
    ExpressionStatement { expression: NodeId },
    Block { statements: Vec<NodeId> },

    ClassDecl(ClassDecl),
    InterfaceDecl(InterfaceDecl),
    EnumDecl(EnumDecl),
    EnumMember(EnumMember),
    TypeAliasDecl(TypeAliasDecl),
    PropertyDecl(PropertyDecl),
    PropertySignature(PropertySignature),
    MethodDecl(MethodDecl),
    MethodSignature { name: NodeId },
    GetAccessor { name: NodeId },
    SetAccessor { name: NodeId },
    ConstructorDecl(ConstructorDecl),
    ParameterDecl(ParameterDecl),
    StaticBlock { statements: Vec<NodeId> },
    FunctionDecl(FunctionDecl),
    FunctionExpr(FunctionDecl),
    ArrowFunction(FunctionDecl),
    VariableStatement { declaration_list: NodeId },
    VariableDeclList(VariableDeclList),
    VariableDecl(VariableDecl),

    Identifier { text: Atom },
    StringLiteral { value: Atom },
    NumericLiteral { value: f64 },
    ObjectLiteral(ObjectLiteral),
    ArrayLiteral { elements: Vec<NodeId> },
    PropertyAssignment(PropertyAssignment),
    ComputedPropertyName { expression: NodeId },
    CallExpr(CallExpr),
    PropertyAccess(PropertyAccess),
    BinaryExpr(BinaryExpr),
    PrefixUnaryExpr(PrefixUnaryExpr),
    ConditionalExpr(ConditionalExpr),
    ParenExpr { expression: NodeId },
    AsExpr(AsExpr),
    TypeAssertion(TypeAssertion),

    ForStatement(ForStatement),
    ForInStatement(ForInStatement),
    ForOfStatement(ForOfStatement),
    WithStatement(WithStatement),
    CatchClause(CatchClause),

    ExpressionWithTypeArgs(ExpressionWithTypeArgs),
    TypeReference(TypeReferenceNode),
    QualifiedName(QualifiedName),
    UnionTypeNode { types: Vec<NodeId> },
    ParenTypeNode { type_node: NodeId },
    KeywordTypeNode { keyword: TypeKeyword },
}

/// One arena node.
#[derive(Clone, Debug)]
pub struct Node {
    pub span: Span,
    pub parent: Option<NodeId>,
    pub file: FileId,
    pub kind: NodeKind,
}

// =============================================================================
// NodeArena
// =============================================================================

/// Flat storage for all nodes of a checking session.
#[derive(Default)]
pub struct NodeArena {
    nodes: Vec<Node>,
}

impl NodeArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn alloc(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    pub(crate) fn set_parent(&mut self, child: NodeId, parent: NodeId) {
        self.nodes[child.0 as usize].parent = Some(parent);
    }

    pub fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id.0 as usize]
    }

    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.get(id).kind
    }

    pub fn span(&self, id: NodeId) -> Span {
        self.get(id).span
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).parent
    }

    pub fn file(&self, id: NodeId) -> FileId {
        self.get(id).file
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    // -------------------------------------------------------------------------
    // Typed accessors
    // -------------------------------------------------------------------------

    pub fn identifier_text(&self, id: NodeId) -> Option<Atom> {
        match self.kind(id) {
            NodeKind::Identifier { text } => Some(*text),
            _ => None,
        }
    }

    pub fn string_value(&self, id: NodeId) -> Option<Atom> {
        match self.kind(id) {
            NodeKind::StringLiteral { value } => Some(*value),
            _ => None,
        }
    }

    pub fn numeric_value(&self, id: NodeId) -> Option<f64> {
        match self.kind(id) {
            NodeKind::NumericLiteral { value } => Some(*value),
            _ => None,
        }
    }

    pub fn class_decl(&self, id: NodeId) -> Option<&ClassDecl> {
        match self.kind(id) {
            NodeKind::ClassDecl(decl) => Some(decl),
            _ => None,
        }
    }

    pub fn interface_decl(&self, id: NodeId) -> Option<&InterfaceDecl> {
        match self.kind(id) {
            NodeKind::InterfaceDecl(decl) => Some(decl),
            _ => None,
        }
    }

    pub fn enum_decl(&self, id: NodeId) -> Option<&EnumDecl> {
        match self.kind(id) {
            NodeKind::EnumDecl(decl) => Some(decl),
            _ => None,
        }
    }

    pub fn property_decl(&self, id: NodeId) -> Option<&PropertyDecl> {
        match self.kind(id) {
            NodeKind::PropertyDecl(decl) => Some(decl),
            _ => None,
        }
    }

    pub fn constructor_decl(&self, id: NodeId) -> Option<&ConstructorDecl> {
        match self.kind(id) {
            NodeKind::ConstructorDecl(decl) => Some(decl),
            _ => None,
        }
    }

    pub fn object_literal(&self, id: NodeId) -> Option<&ObjectLiteral> {
        match self.kind(id) {
            NodeKind::ObjectLiteral(lit) => Some(lit),
            _ => None,
        }
    }

    pub fn property_assignment(&self, id: NodeId) -> Option<&PropertyAssignment> {
        match self.kind(id) {
            NodeKind::PropertyAssignment(prop) => Some(prop),
            _ => None,
        }
    }

    pub fn call_expr(&self, id: NodeId) -> Option<&CallExpr> {
        match self.kind(id) {
            NodeKind::CallExpr(call) => Some(call),
            _ => None,
        }
    }

    pub fn property_access(&self, id: NodeId) -> Option<&PropertyAccess> {
        match self.kind(id) {
            NodeKind::PropertyAccess(access) => Some(access),
            _ => None,
        }
    }

    pub fn binary_expr(&self, id: NodeId) -> Option<&BinaryExpr> {
        match self.kind(id) {
            NodeKind::BinaryExpr(expr) => Some(expr),
            _ => None,
        }
    }

    pub fn type_alias_decl(&self, id: NodeId) -> Option<&TypeAliasDecl> {
        match self.kind(id) {
            NodeKind::TypeAliasDecl(decl) => Some(decl),
            _ => None,
        }
    }

    pub fn variable_decl(&self, id: NodeId) -> Option<&VariableDecl> {
        match self.kind(id) {
            NodeKind::VariableDecl(decl) => Some(decl),
            _ => None,
        }
    }

    pub fn is_object_literal(&self, id: NodeId) -> bool {
        matches!(self.kind(id), NodeKind::ObjectLiteral(_))
    }

    pub fn is_array_literal(&self, id: NodeId) -> bool {
        matches!(self.kind(id), NodeKind::ArrayLiteral { .. })
    }

    pub fn is_identifier(&self, id: NodeId) -> bool {
        matches!(self.kind(id), NodeKind::Identifier { .. })
    }

    pub fn is_string_literal(&self, id: NodeId) -> bool {
        matches!(self.kind(id), NodeKind::StringLiteral { .. })
    }

    pub fn is_numeric_literal(&self, id: NodeId) -> bool {
        matches!(self.kind(id), NodeKind::NumericLiteral { .. })
    }

    pub fn is_class_decl(&self, id: NodeId) -> bool {
        matches!(self.kind(id), NodeKind::ClassDecl(_))
    }

    pub fn is_interface_decl(&self, id: NodeId) -> bool {
        matches!(self.kind(id), NodeKind::InterfaceDecl(_))
    }

    pub fn is_enum_decl(&self, id: NodeId) -> bool {
        matches!(self.kind(id), NodeKind::EnumDecl(_))
    }

    /// Whether the node is a function-like declaration.
    pub fn is_function_like(&self, id: NodeId) -> bool {
        matches!(
            self.kind(id),
            NodeKind::FunctionDecl(_)
                | NodeKind::FunctionExpr(_)
                | NodeKind::ArrowFunction(_)
                | NodeKind::MethodDecl(_)
                | NodeKind::GetAccessor { .. }
                | NodeKind::SetAccessor { .. }
                | NodeKind::ConstructorDecl(_)
        )
    }

    /// Strip any number of wrapping parenthesized expressions.
    pub fn unwrap_parenthesized(&self, mut id: NodeId) -> NodeId {
        while let NodeKind::ParenExpr { expression } = self.kind(id) {
            id = *expression;
        }
        id
    }

    /// Strip any number of wrapping parenthesized type nodes.
    pub fn unwrap_parenthesized_type(&self, mut id: NodeId) -> NodeId {
        while let NodeKind::ParenTypeNode { type_node } = self.kind(id) {
            id = *type_node;
        }
        id
    }

    /// Direct children of a node, in source order.
    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut push = |n: NodeId| out.push(n);
        match self.kind(id) {
            NodeKind::SourceFile { statements }
            | NodeKind::ModuleBlock { statements }
            | NodeKind::Block { statements }
            | NodeKind::StaticBlock { statements } => statements.iter().copied().for_each(push),
            NodeKind::ModuleDecl(m) => m.body.into_iter().for_each(push),
            NodeKind::ImportDecl(_) => {}
            NodeKind::ExpressionStatement { expression } => push(*expression),
            NodeKind::ClassDecl(c) => {
                c.name.into_iter().for_each(&mut push);
                for clause in &c.heritage {
                    clause.types.iter().copied().for_each(&mut push);
                }
                c.members.iter().copied().for_each(push);
            }
            NodeKind::InterfaceDecl(i) => {
                push(i.name);
                for clause in &i.heritage {
                    clause.types.iter().copied().for_each(&mut push);
                }
                i.members.iter().copied().for_each(push);
            }
            NodeKind::EnumDecl(e) => {
                push(e.name);
                e.members.iter().copied().for_each(push);
            }
            NodeKind::EnumMember(m) => {
                push(m.name);
                m.initializer.into_iter().for_each(push);
            }
            NodeKind::TypeAliasDecl(a) => {
                push(a.name);
                push(a.type_node);
            }
            NodeKind::PropertyDecl(p) => {
                push(p.name);
                p.type_node.into_iter().for_each(&mut push);
                p.initializer.into_iter().for_each(push);
            }
            NodeKind::PropertySignature(p) => {
                push(p.name);
                p.type_node.into_iter().for_each(push);
            }
            NodeKind::MethodDecl(m) => push(m.name),
            NodeKind::MethodSignature { name }
            | NodeKind::GetAccessor { name }
            | NodeKind::SetAccessor { name } => push(*name),
            NodeKind::ConstructorDecl(c) => c.params.iter().copied().for_each(push),
            NodeKind::ParameterDecl(p) => push(p.name),
            NodeKind::FunctionDecl(f) | NodeKind::FunctionExpr(f) | NodeKind::ArrowFunction(f) => {
                f.name.into_iter().for_each(&mut push);
                f.return_type.into_iter().for_each(&mut push);
                f.body.into_iter().for_each(push);
            }
            NodeKind::VariableStatement { declaration_list } => push(*declaration_list),
            NodeKind::VariableDeclList(list) => {
                list.declarations.iter().copied().for_each(push);
            }
            NodeKind::VariableDecl(decl) => {
                push(decl.name);
                decl.type_node.into_iter().for_each(&mut push);
                decl.initializer.into_iter().for_each(push);
            }
            NodeKind::Identifier { .. }
            | NodeKind::StringLiteral { .. }
            | NodeKind::NumericLiteral { .. }
            | NodeKind::KeywordTypeNode { .. } => {}
            NodeKind::ObjectLiteral(lit) => lit.properties.iter().copied().for_each(push),
            NodeKind::ArrayLiteral { elements } => elements.iter().copied().for_each(push),
            NodeKind::PropertyAssignment(prop) => {
                push(prop.name);
                push(prop.initializer);
            }
            NodeKind::ComputedPropertyName { expression } => push(*expression),
            NodeKind::CallExpr(call) => {
                push(call.callee);
                call.args.iter().copied().for_each(push);
            }
            NodeKind::PropertyAccess(access) => push(access.expression),
            NodeKind::BinaryExpr(expr) => {
                push(expr.left);
                push(expr.right);
            }
            NodeKind::PrefixUnaryExpr(expr) => push(expr.operand),
            NodeKind::ConditionalExpr(expr) => {
                push(expr.condition);
                push(expr.when_true);
                push(expr.when_false);
            }
            NodeKind::ParenExpr { expression } => push(*expression),
            NodeKind::AsExpr(expr) => {
                push(expr.expression);
                push(expr.type_node);
            }
            NodeKind::TypeAssertion(assertion) => {
                push(assertion.type_node);
                push(assertion.expression);
            }
            NodeKind::ForStatement(stmt) => {
                stmt.initializer.into_iter().for_each(&mut push);
                push(stmt.statement);
            }
            NodeKind::ForInStatement(stmt) => {
                push(stmt.initializer);
                push(stmt.expression);
                push(stmt.statement);
            }
            NodeKind::ForOfStatement(stmt) => {
                push(stmt.initializer);
                push(stmt.expression);
                push(stmt.statement);
            }
            NodeKind::WithStatement(stmt) => {
                push(stmt.expression);
                push(stmt.statement);
            }
            NodeKind::CatchClause(clause) => {
                clause.variable_declaration.into_iter().for_each(&mut push);
                push(clause.block);
            }
            NodeKind::ExpressionWithTypeArgs(expr) => {
                push(expr.expression);
                expr.type_args.iter().copied().for_each(push);
            }
            NodeKind::TypeReference(reference) => {
                push(reference.name);
                reference.type_args.iter().copied().for_each(push);
            }
            NodeKind::QualifiedName(name) => {
                push(name.left);
                push(name.right);
            }
            NodeKind::UnionTypeNode { types } => types.iter().copied().for_each(push),
            NodeKind::ParenTypeNode { type_node } => push(*type_node),
        }
        out
    }

    /// Depth-first walk of the subtree rooted at `id`, calling `callback` on
    /// each node. The walk stops early once `stop` returns true.
    pub fn for_each_in_subtree(
        &self,
        id: NodeId,
        callback: &mut dyn FnMut(NodeId),
        stop: &mut dyn FnMut(NodeId) -> bool,
    ) {
        if stop(id) {
            return;
        }
        callback(id);
        for child in self.children(id) {
            self.for_each_in_subtree(child, callback, stop);
        }
    }
}
