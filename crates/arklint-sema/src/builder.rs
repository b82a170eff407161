//! Programmatic construction of a `SemanticModel`.
//!
//! The host front end adapts its own parse/bind/check results into the model
//! through this builder; the test suites use it to assemble scenarios
//! directly. Nodes are allocated bottom-up (children first); the builder
//! wires parent links when a parent node adopts existing children.

use crate::ast::{
    AsExpr, BinaryExpr, BinaryOp, CallExpr, CatchClause, ClassDecl, ConditionalExpr,
    ConstructorDecl, EnumDecl, EnumMember, ExpressionWithTypeArgs, ForInStatement, ForOfStatement,
    ForStatement, FunctionDecl, ImportDecl, InterfaceDecl, ModifierFlags, ModuleDecl, Node,
    NodeArena, NodeId, NodeKind, ObjectLiteral, ParameterDecl, PrefixUnaryExpr, PropertyAccess,
    PropertyAssignment, PropertyDecl, PropertySignature, QualifiedName, TypeAliasDecl,
    TypeAssertion, TypeKeyword, TypeReferenceNode, UnaryOp, VarDeclKind, VariableDecl,
    VariableDeclList, WithStatement,
};
use crate::files::{FileId, FileRegistry};
use crate::model::{ConstantValue, SemanticModel};
use crate::symbols::{SymbolData, SymbolFlags, SymbolId, SymbolTable};
use crate::types::{CallSignature, ObjectFlags, TypeData, TypeFlags, TypeId, TypeRow, TypeTable};
use arklint_common::{Atom, Interner, Span};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use std::sync::atomic::AtomicU64;
use tracing::trace;

/// Builder for a `SemanticModel`.
pub struct ModelBuilder {
    interner: Interner,
    files: FileRegistry,
    arena: NodeArena,
    symbols: SymbolTable,
    types: TypeTable,
    node_types: FxHashMap<NodeId, TypeId>,
    node_symbols: FxHashMap<NodeId, SymbolId>,
    contextual_types: FxHashMap<NodeId, TypeId>,
    resolved_signatures: FxHashMap<NodeId, CallSignature>,
    constant_values: FxHashMap<NodeId, ConstantValue>,
    symbol_types: FxHashMap<SymbolId, TypeId>,
}

impl Default for ModelBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ModelBuilder {
    pub fn new() -> Self {
        Self {
            interner: Interner::new(),
            files: FileRegistry::new(),
            arena: NodeArena::new(),
            symbols: SymbolTable::new(),
            types: TypeTable::new(),
            node_types: FxHashMap::default(),
            node_symbols: FxHashMap::default(),
            contextual_types: FxHashMap::default(),
            resolved_signatures: FxHashMap::default(),
            constant_values: FxHashMap::default(),
            symbol_types: FxHashMap::default(),
        }
    }

    pub fn intern(&self, text: &str) -> Atom {
        self.interner.intern(text)
    }

    // -------------------------------------------------------------------------
    // Files
    // -------------------------------------------------------------------------

    pub fn file(&mut self, path: &str, is_declaration_file: bool) -> FileId {
        self.files.add(path, is_declaration_file)
    }

    // -------------------------------------------------------------------------
    // Nodes
    // -------------------------------------------------------------------------

    fn node(&mut self, file: FileId, span: Span, kind: NodeKind) -> NodeId {
        self.arena.alloc(Node {
            span,
            parent: None,
            file,
            kind,
        })
    }

    fn adopt(&mut self, parent: NodeId, children: &[NodeId]) {
        for &child in children {
            self.arena.set_parent(child, parent);
        }
    }

    pub fn ident(&mut self, file: FileId, span: Span, text: &str) -> NodeId {
        let text = self.intern(text);
        self.node(file, span, NodeKind::Identifier { text })
    }

    pub fn string_lit(&mut self, file: FileId, span: Span, value: &str) -> NodeId {
        let value = self.intern(value);
        self.node(file, span, NodeKind::StringLiteral { value })
    }

    pub fn numeric_lit(&mut self, file: FileId, span: Span, value: f64) -> NodeId {
        self.node(file, span, NodeKind::NumericLiteral { value })
    }

    pub fn object_literal(&mut self, file: FileId, span: Span, properties: Vec<NodeId>) -> NodeId {
        let id = self.node(file, span, NodeKind::ObjectLiteral(ObjectLiteral { properties }));
        let children = self.arena.children(id);
        self.adopt(id, &children);
        id
    }

    pub fn array_literal(&mut self, file: FileId, span: Span, elements: Vec<NodeId>) -> NodeId {
        let id = self.node(file, span, NodeKind::ArrayLiteral { elements });
        let children = self.arena.children(id);
        self.adopt(id, &children);
        id
    }

    pub fn property_assignment(
        &mut self,
        file: FileId,
        span: Span,
        name: NodeId,
        initializer: NodeId,
    ) -> NodeId {
        let id = self.node(
            file,
            span,
            NodeKind::PropertyAssignment(PropertyAssignment { name, initializer }),
        );
        self.adopt(id, &[name, initializer]);
        id
    }

    pub fn computed_property_name(&mut self, file: FileId, span: Span, expression: NodeId) -> NodeId {
        let id = self.node(file, span, NodeKind::ComputedPropertyName { expression });
        self.adopt(id, &[expression]);
        id
    }

    pub fn call_expr(&mut self, file: FileId, span: Span, callee: NodeId, args: Vec<NodeId>) -> NodeId {
        let id = self.node(file, span, NodeKind::CallExpr(CallExpr { callee, args }));
        let children = self.arena.children(id);
        self.adopt(id, &children);
        id
    }

    pub fn property_access(
        &mut self,
        file: FileId,
        span: Span,
        expression: NodeId,
        name: &str,
        name_span: Span,
    ) -> NodeId {
        let name = self.intern(name);
        let id = self.node(
            file,
            span,
            NodeKind::PropertyAccess(PropertyAccess {
                expression,
                name,
                name_span,
            }),
        );
        self.adopt(id, &[expression]);
        id
    }

    pub fn binary_expr(
        &mut self,
        file: FileId,
        span: Span,
        left: NodeId,
        op: BinaryOp,
        op_span: Span,
        right: NodeId,
    ) -> NodeId {
        let id = self.node(
            file,
            span,
            NodeKind::BinaryExpr(BinaryExpr {
                left,
                op,
                op_span,
                right,
            }),
        );
        self.adopt(id, &[left, right]);
        id
    }

    pub fn prefix_unary(&mut self, file: FileId, span: Span, op: UnaryOp, operand: NodeId) -> NodeId {
        let id = self.node(file, span, NodeKind::PrefixUnaryExpr(PrefixUnaryExpr { op, operand }));
        self.adopt(id, &[operand]);
        id
    }

    pub fn conditional(
        &mut self,
        file: FileId,
        span: Span,
        condition: NodeId,
        when_true: NodeId,
        when_false: NodeId,
    ) -> NodeId {
        let id = self.node(
            file,
            span,
            NodeKind::ConditionalExpr(ConditionalExpr {
                condition,
                when_true,
                when_false,
            }),
        );
        self.adopt(id, &[condition, when_true, when_false]);
        id
    }

    pub fn paren_expr(&mut self, file: FileId, span: Span, expression: NodeId) -> NodeId {
        let id = self.node(file, span, NodeKind::ParenExpr { expression });
        self.adopt(id, &[expression]);
        id
    }

    pub fn as_expr(&mut self, file: FileId, span: Span, expression: NodeId, type_node: NodeId) -> NodeId {
        let id = self.node(file, span, NodeKind::AsExpr(AsExpr { expression, type_node }));
        self.adopt(id, &[expression, type_node]);
        id
    }

    pub fn type_assertion(
        &mut self,
        file: FileId,
        span: Span,
        type_node: NodeId,
        expression: NodeId,
    ) -> NodeId {
        let id = self.node(
            file,
            span,
            NodeKind::TypeAssertion(TypeAssertion { type_node, expression }),
        );
        self.adopt(id, &[type_node, expression]);
        id
    }

    pub fn expression_statement(&mut self, file: FileId, span: Span, expression: NodeId) -> NodeId {
        let id = self.node(file, span, NodeKind::ExpressionStatement { expression });
        self.adopt(id, &[expression]);
        id
    }

    pub fn block(&mut self, file: FileId, span: Span, statements: Vec<NodeId>) -> NodeId {
        let id = self.node(file, span, NodeKind::Block { statements });
        let children = self.arena.children(id);
        self.adopt(id, &children);
        id
    }

    pub fn variable_decl(
        &mut self,
        file: FileId,
        span: Span,
        name: NodeId,
        type_node: Option<NodeId>,
        initializer: Option<NodeId>,
    ) -> NodeId {
        let id = self.node(
            file,
            span,
            NodeKind::VariableDecl(VariableDecl {
                name,
                type_node,
                initializer,
            }),
        );
        let children = self.arena.children(id);
        self.adopt(id, &children);
        id
    }

    pub fn variable_decl_list(
        &mut self,
        file: FileId,
        span: Span,
        kind: VarDeclKind,
        declarations: Vec<NodeId>,
    ) -> NodeId {
        let id = self.node(
            file,
            span,
            NodeKind::VariableDeclList(VariableDeclList { kind, declarations }),
        );
        let children = self.arena.children(id);
        self.adopt(id, &children);
        id
    }

    pub fn variable_statement(&mut self, file: FileId, span: Span, declaration_list: NodeId) -> NodeId {
        let id = self.node(file, span, NodeKind::VariableStatement { declaration_list });
        self.adopt(id, &[declaration_list]);
        id
    }

    pub fn class_decl(&mut self, file: FileId, span: Span, decl: ClassDecl) -> NodeId {
        let id = self.node(file, span, NodeKind::ClassDecl(decl));
        let children = self.arena.children(id);
        self.adopt(id, &children);
        id
    }

    pub fn interface_decl(&mut self, file: FileId, span: Span, decl: InterfaceDecl) -> NodeId {
        let id = self.node(file, span, NodeKind::InterfaceDecl(decl));
        let children = self.arena.children(id);
        self.adopt(id, &children);
        id
    }

    pub fn enum_decl(&mut self, file: FileId, span: Span, decl: EnumDecl) -> NodeId {
        let id = self.node(file, span, NodeKind::EnumDecl(decl));
        let children = self.arena.children(id);
        self.adopt(id, &children);
        id
    }

    pub fn enum_member(
        &mut self,
        file: FileId,
        span: Span,
        name: NodeId,
        initializer: Option<NodeId>,
    ) -> NodeId {
        let id = self.node(file, span, NodeKind::EnumMember(EnumMember { name, initializer }));
        let children = self.arena.children(id);
        self.adopt(id, &children);
        id
    }

    pub fn type_alias_decl(&mut self, file: FileId, span: Span, name: NodeId, type_node: NodeId) -> NodeId {
        let id = self.node(
            file,
            span,
            NodeKind::TypeAliasDecl(TypeAliasDecl { name, type_node }),
        );
        self.adopt(id, &[name, type_node]);
        id
    }

    pub fn property_decl(&mut self, file: FileId, span: Span, decl: PropertyDecl) -> NodeId {
        let id = self.node(file, span, NodeKind::PropertyDecl(decl));
        let children = self.arena.children(id);
        self.adopt(id, &children);
        id
    }

    pub fn property_signature(
        &mut self,
        file: FileId,
        span: Span,
        name: NodeId,
        type_node: Option<NodeId>,
    ) -> NodeId {
        let id = self.node(
            file,
            span,
            NodeKind::PropertySignature(PropertySignature { name, type_node }),
        );
        let children = self.arena.children(id);
        self.adopt(id, &children);
        id
    }

    pub fn method_decl(&mut self, file: FileId, span: Span, name: NodeId, modifiers: ModifierFlags) -> NodeId {
        let id = self.node(file, span, NodeKind::MethodDecl(crate::ast::MethodDecl { name, modifiers }));
        self.adopt(id, &[name]);
        id
    }

    pub fn constructor_decl(&mut self, file: FileId, span: Span, params: Vec<NodeId>) -> NodeId {
        let id = self.node(file, span, NodeKind::ConstructorDecl(ConstructorDecl { params }));
        let children = self.arena.children(id);
        self.adopt(id, &children);
        id
    }

    pub fn parameter_decl(
        &mut self,
        file: FileId,
        span: Span,
        name: NodeId,
        modifiers: ModifierFlags,
    ) -> NodeId {
        let id = self.node(file, span, NodeKind::ParameterDecl(ParameterDecl { name, modifiers }));
        self.adopt(id, &[name]);
        id
    }

    pub fn static_block(&mut self, file: FileId, span: Span, statements: Vec<NodeId>) -> NodeId {
        let id = self.node(file, span, NodeKind::StaticBlock { statements });
        let children = self.arena.children(id);
        self.adopt(id, &children);
        id
    }

    pub fn function_decl(&mut self, file: FileId, span: Span, decl: FunctionDecl) -> NodeId {
        let id = self.node(file, span, NodeKind::FunctionDecl(decl));
        let children = self.arena.children(id);
        self.adopt(id, &children);
        id
    }

    pub fn function_expr(&mut self, file: FileId, span: Span, decl: FunctionDecl) -> NodeId {
        let id = self.node(file, span, NodeKind::FunctionExpr(decl));
        let children = self.arena.children(id);
        self.adopt(id, &children);
        id
    }

    pub fn for_in_statement(
        &mut self,
        file: FileId,
        span: Span,
        initializer: NodeId,
        expression: NodeId,
        statement: NodeId,
    ) -> NodeId {
        let id = self.node(
            file,
            span,
            NodeKind::ForInStatement(ForInStatement {
                initializer,
                expression,
                statement,
            }),
        );
        self.adopt(id, &[initializer, expression, statement]);
        id
    }

    pub fn for_of_statement(
        &mut self,
        file: FileId,
        span: Span,
        initializer: NodeId,
        expression: NodeId,
        statement: NodeId,
    ) -> NodeId {
        let id = self.node(
            file,
            span,
            NodeKind::ForOfStatement(ForOfStatement {
                initializer,
                expression,
                statement,
            }),
        );
        self.adopt(id, &[initializer, expression, statement]);
        id
    }

    pub fn for_statement(
        &mut self,
        file: FileId,
        span: Span,
        initializer: Option<NodeId>,
        statement: NodeId,
    ) -> NodeId {
        let id = self.node(
            file,
            span,
            NodeKind::ForStatement(ForStatement { initializer, statement }),
        );
        let children = self.arena.children(id);
        self.adopt(id, &children);
        id
    }

    pub fn with_statement(
        &mut self,
        file: FileId,
        span: Span,
        expression: NodeId,
        statement: NodeId,
    ) -> NodeId {
        let id = self.node(
            file,
            span,
            NodeKind::WithStatement(WithStatement { expression, statement }),
        );
        self.adopt(id, &[expression, statement]);
        id
    }

    pub fn catch_clause(
        &mut self,
        file: FileId,
        span: Span,
        variable_declaration: Option<NodeId>,
        block: NodeId,
    ) -> NodeId {
        let id = self.node(
            file,
            span,
            NodeKind::CatchClause(CatchClause {
                variable_declaration,
                block,
            }),
        );
        let children = self.arena.children(id);
        self.adopt(id, &children);
        id
    }

    pub fn expression_with_type_args(
        &mut self,
        file: FileId,
        span: Span,
        expression: NodeId,
        type_args: Vec<NodeId>,
    ) -> NodeId {
        let id = self.node(
            file,
            span,
            NodeKind::ExpressionWithTypeArgs(ExpressionWithTypeArgs {
                expression,
                type_args: SmallVec::from_vec(type_args),
            }),
        );
        let children = self.arena.children(id);
        self.adopt(id, &children);
        id
    }

    pub fn type_reference(
        &mut self,
        file: FileId,
        span: Span,
        name: NodeId,
        type_args: Vec<NodeId>,
    ) -> NodeId {
        let id = self.node(
            file,
            span,
            NodeKind::TypeReference(TypeReferenceNode {
                name,
                type_args: SmallVec::from_vec(type_args),
            }),
        );
        let children = self.arena.children(id);
        self.adopt(id, &children);
        id
    }

    pub fn qualified_name(&mut self, file: FileId, span: Span, left: NodeId, right: NodeId) -> NodeId {
        let id = self.node(file, span, NodeKind::QualifiedName(QualifiedName { left, right }));
        self.adopt(id, &[left, right]);
        id
    }

    pub fn union_type_node(&mut self, file: FileId, span: Span, types: Vec<NodeId>) -> NodeId {
        let id = self.node(file, span, NodeKind::UnionTypeNode { types });
        let children = self.arena.children(id);
        self.adopt(id, &children);
        id
    }

    pub fn paren_type_node(&mut self, file: FileId, span: Span, type_node: NodeId) -> NodeId {
        let id = self.node(file, span, NodeKind::ParenTypeNode { type_node });
        self.adopt(id, &[type_node]);
        id
    }

    pub fn keyword_type_node(&mut self, file: FileId, span: Span, keyword: TypeKeyword) -> NodeId {
        self.node(file, span, NodeKind::KeywordTypeNode { keyword })
    }

    pub fn module_decl(&mut self, file: FileId, span: Span, name: &str, body: Option<NodeId>) -> NodeId {
        let name = self.intern(name);
        let id = self.node(file, span, NodeKind::ModuleDecl(ModuleDecl { name, body }));
        let children = self.arena.children(id);
        self.adopt(id, &children);
        id
    }

    pub fn module_block(&mut self, file: FileId, span: Span, statements: Vec<NodeId>) -> NodeId {
        let id = self.node(file, span, NodeKind::ModuleBlock { statements });
        let children = self.arena.children(id);
        self.adopt(id, &children);
        id
    }

    pub fn import_decl(&mut self, file: FileId, span: Span, decl: ImportDecl) -> NodeId {
        self.node(file, span, NodeKind::ImportDecl(decl))
    }

    pub fn source_file(&mut self, file: FileId, span: Span, statements: Vec<NodeId>) -> NodeId {
        let id = self.node(file, span, NodeKind::SourceFile { statements });
        let children = self.arena.children(id);
        self.adopt(id, &children);
        id
    }

    // -------------------------------------------------------------------------
    // Symbols
    // -------------------------------------------------------------------------

    pub fn symbol(&mut self, name: &str, flags: SymbolFlags) -> SymbolId {
        let name = self.intern(name);
        self.symbols.alloc(SymbolData {
            name,
            flags,
            declarations: SmallVec::new(),
            parent: None,
            alias_target: None,
            members: Vec::new(),
        })
    }

    pub fn add_declaration(&mut self, symbol: SymbolId, declaration: NodeId) {
        self.symbols.get_mut(symbol).declarations.push(declaration);
    }

    pub fn set_symbol_parent(&mut self, symbol: SymbolId, parent: SymbolId) {
        self.symbols.get_mut(symbol).parent = Some(parent);
    }

    pub fn set_alias_target(&mut self, alias: SymbolId, target: SymbolId) {
        self.symbols.get_mut(alias).alias_target = Some(target);
    }

    pub fn add_member(&mut self, symbol: SymbolId, member: SymbolId) {
        self.symbols.get_mut(symbol).members.push(member);
    }

    // -------------------------------------------------------------------------
    // Types
    // -------------------------------------------------------------------------

    /// Raw escape hatch: add a fully specified row.
    pub fn add_type(&mut self, row: TypeRow) -> TypeId {
        let id = self.types.add(row);
        self.types.register_union(id);
        id
    }

    /// Declared class type.
    pub fn class_type(&mut self, symbol: SymbolId) -> TypeId {
        self.declared_type(symbol, ObjectFlags::CLASS, 0)
    }

    /// Declared interface type.
    pub fn interface_type(&mut self, symbol: SymbolId) -> TypeId {
        self.declared_type(symbol, ObjectFlags::INTERFACE, 0)
    }

    /// Declared class/interface type with explicit object flags and generic
    /// parameter count.
    pub fn declared_type(
        &mut self,
        symbol: SymbolId,
        object_flags: ObjectFlags,
        type_param_count: u8,
    ) -> TypeId {
        self.types.add(TypeRow {
            flags: TypeFlags::OBJECT,
            object_flags,
            symbol: Some(symbol),
            data: TypeData::Object {
                call_signatures: SmallVec::new(),
                type_param_count,
            },
            ..TypeRow::default()
        })
    }

    /// Instantiated reference to a generic target.
    pub fn reference(&mut self, target: TypeId, type_args: Vec<TypeId>) -> TypeId {
        self.reference_with_flags(target, type_args, ObjectFlags::empty())
    }

    /// Reference with extra object flags (for tuples).
    pub fn reference_with_flags(
        &mut self,
        target: TypeId,
        type_args: Vec<TypeId>,
        extra: ObjectFlags,
    ) -> TypeId {
        let symbol = self.types.symbol(target);
        self.types.add(TypeRow {
            flags: TypeFlags::OBJECT,
            object_flags: ObjectFlags::REFERENCE | extra,
            symbol,
            data: TypeData::Reference {
                target,
                type_args: SmallVec::from_vec(type_args),
            },
            ..TypeRow::default()
        })
    }

    /// Union of `members`, order preserved.
    pub fn union(&mut self, members: Vec<TypeId>) -> TypeId {
        self.types.intern_union(members)
    }

    pub fn intersection(&mut self, members: Vec<TypeId>) -> TypeId {
        self.types.add(TypeRow {
            flags: TypeFlags::INTERSECTION,
            data: TypeData::Intersection(members),
            ..TypeRow::default()
        })
    }

    /// Anonymous function type with a single call signature.
    pub fn function_type(&mut self, declaration: Option<NodeId>, has_return_type_annotation: bool) -> TypeId {
        self.types.add(TypeRow {
            flags: TypeFlags::OBJECT,
            object_flags: ObjectFlags::ANONYMOUS,
            data: TypeData::Object {
                call_signatures: smallvec::smallvec![CallSignature {
                    declaration,
                    has_return_type_annotation,
                }],
                type_param_count: 0,
            },
            ..TypeRow::default()
        })
    }

    /// Anonymous object type backed by `symbol` (class value types).
    pub fn anonymous_object_type(&mut self, symbol: Option<SymbolId>) -> TypeId {
        self.types.add(TypeRow {
            flags: TypeFlags::OBJECT,
            object_flags: ObjectFlags::ANONYMOUS,
            symbol,
            data: TypeData::Object {
                call_signatures: SmallVec::new(),
                type_param_count: 0,
            },
            ..TypeRow::default()
        })
    }

    pub fn type_parameter(&mut self, constraint: Option<TypeId>) -> TypeId {
        self.types.add(TypeRow {
            flags: TypeFlags::TYPE_PARAMETER,
            data: TypeData::TypeParameter { constraint },
            ..TypeRow::default()
        })
    }

    /// Enum declared type.
    pub fn enum_type(&mut self, symbol: SymbolId) -> TypeId {
        self.types.add(TypeRow {
            flags: TypeFlags::ENUM,
            symbol: Some(symbol),
            ..TypeRow::default()
        })
    }

    /// Enum member literal type; `literal_flags` selects the literal kind.
    pub fn enum_literal_type(&mut self, symbol: SymbolId, literal_flags: TypeFlags) -> TypeId {
        self.types.add(TypeRow {
            flags: TypeFlags::ENUM_LITERAL | literal_flags,
            symbol: Some(symbol),
            ..TypeRow::default()
        })
    }

    pub fn string_literal_type(&mut self) -> TypeId {
        self.types.add(TypeRow {
            flags: TypeFlags::STRING_LITERAL,
            ..TypeRow::default()
        })
    }

    pub fn number_literal_type(&mut self) -> TypeId {
        self.types.add(TypeRow {
            flags: TypeFlags::NUMBER_LITERAL,
            ..TypeRow::default()
        })
    }

    /// Type carrying alias information (`Partial<T>`, `Record<K, V>`).
    pub fn alias_type(
        &mut self,
        alias_symbol: SymbolId,
        alias_type_args: Vec<TypeId>,
        flags: TypeFlags,
        object_flags: ObjectFlags,
        data: TypeData,
    ) -> TypeId {
        self.types.add(TypeRow {
            flags,
            object_flags,
            symbol: None,
            alias_symbol: Some(alias_symbol),
            alias_type_args: SmallVec::from_vec(alias_type_args),
            data,
        })
    }

    // -------------------------------------------------------------------------
    // Wiring
    // -------------------------------------------------------------------------

    pub fn set_node_type(&mut self, node: NodeId, ty: TypeId) {
        self.node_types.insert(node, ty);
    }

    pub fn bind_symbol(&mut self, node: NodeId, symbol: SymbolId) {
        self.node_symbols.insert(node, symbol);
    }

    pub fn set_contextual_type(&mut self, node: NodeId, ty: TypeId) {
        self.contextual_types.insert(node, ty);
    }

    pub fn set_resolved_signature(&mut self, call: NodeId, signature: CallSignature) {
        self.resolved_signatures.insert(call, signature);
    }

    pub fn set_constant_value(&mut self, node: NodeId, value: ConstantValue) {
        self.constant_values.insert(node, value);
    }

    pub fn set_symbol_type(&mut self, symbol: SymbolId, ty: TypeId) {
        self.symbol_types.insert(symbol, ty);
    }

    // -------------------------------------------------------------------------
    // Finish
    // -------------------------------------------------------------------------

    pub fn finish(self) -> SemanticModel {
        trace!(
            nodes = self.arena.len(),
            symbols = self.symbols.len(),
            types = self.types.len(),
            "ModelBuilder::finish"
        );
        SemanticModel {
            interner: self.interner,
            files: self.files,
            arena: self.arena,
            symbols: self.symbols,
            types: self.types,
            node_types: self.node_types,
            node_symbols: self.node_symbols,
            contextual_types: self.contextual_types,
            resolved_signatures: self.resolved_signatures,
            constant_values: self.constant_values,
            symbol_types: self.symbol_types,
            symbol_queries: AtomicU64::new(0),
        }
    }
}
