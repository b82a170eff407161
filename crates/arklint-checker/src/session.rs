//! Checking session and the symbol-resolution layer.
//!
//! A `CheckSession` is created per linter run over one `SemanticModel`. It
//! owns the consumed options, the compiled ignore matcher, and the
//! node-to-symbol memoization cache. The cache lives and dies with the
//! session; independent runs get independent caches.

use crate::config::{IgnoreMatcher, LinterOptions, ES_OBJECT, USE_SHARED};
use arklint_common::Atom;
use arklint_sema::ast::{ModifierFlags, NodeId, NodeKind, TypeKeyword, VarDeclKind};
use arklint_sema::{SemanticModel, SymbolFlags, SymbolId, TypeFlags, TypeId};
use rustc_hash::FxHashMap;
use std::cell::RefCell;
use tracing::trace;

/// Predicate over a type, carried explicitly through heritage walks.
pub type TypePredicate = fn(&CheckSession<'_>, TypeId) -> bool;

/// One checking pass over one semantic model.
pub struct CheckSession<'a> {
    pub(crate) model: &'a SemanticModel,
    pub(crate) options: LinterOptions,
    pub(crate) ignore: IgnoreMatcher,
    /// node -> resolved symbol; `None` records a failed resolution so the
    /// model is queried at most once per node.
    symbol_cache: RefCell<FxHashMap<NodeId, Option<SymbolId>>>,
}

impl<'a> CheckSession<'a> {
    pub fn new(model: &'a SemanticModel, options: LinterOptions) -> Self {
        let ignore = IgnoreMatcher::compile(&options);
        Self {
            model,
            options,
            ignore,
            symbol_cache: RefCell::new(FxHashMap::default()),
        }
    }

    pub fn model(&self) -> &'a SemanticModel {
        self.model
    }

    pub fn options(&self) -> &LinterOptions {
        &self.options
    }

    // -------------------------------------------------------------------------
    // Symbol resolution
    // -------------------------------------------------------------------------

    /// Follow an alias symbol to its target; other symbols pass through.
    pub fn follow_if_aliased(&self, symbol: SymbolId) -> SymbolId {
        if self
            .model
            .symbols()
            .flags(symbol)
            .contains(SymbolFlags::ALIAS)
        {
            return self.model.aliased_symbol(symbol);
        }
        symbol
    }

    /// Resolve the symbol bound at a node, following aliases, with
    /// memoization. A failed resolution is cached too and short-circuits
    /// subsequent lookups.
    pub fn true_symbol_at_location(&self, node: NodeId) -> Option<SymbolId> {
        if let Some(cached) = self.symbol_cache.borrow().get(&node) {
            return *cached;
        }
        let resolved = self
            .model
            .symbol_at_location(node)
            .map(|sym| self.follow_if_aliased(sym));
        trace!(node = node.0, found = resolved.is_some(), "resolve symbol");
        self.symbol_cache.borrow_mut().insert(node, resolved);
        resolved
    }

    /// First declaration of a symbol, if any exist.
    pub fn declaration_of(&self, symbol: SymbolId) -> Option<NodeId> {
        self.model.symbols().first_declaration(symbol)
    }

    /// Resolve a node to its symbol's first declaration.
    pub fn declaration_node_of(&self, node: NodeId) -> Option<NodeId> {
        let symbol = self.true_symbol_at_location(node)?;
        self.declaration_of(symbol)
    }

    /// The symbol of the function a call expression resolved to, through the
    /// resolved signature's declaration name.
    pub fn symbol_of_call_expression(&self, call: NodeId) -> Option<SymbolId> {
        let signature = self.model.resolved_call_signature(call)?;
        let decl = signature.declaration?;
        let name = match self.model.arena().kind(decl) {
            NodeKind::FunctionDecl(f) | NodeKind::FunctionExpr(f) | NodeKind::ArrowFunction(f) => {
                f.name?
            }
            NodeKind::MethodDecl(m) => m.name,
            _ => return None,
        };
        self.true_symbol_at_location(name)
    }

    // -------------------------------------------------------------------------
    // Syntactic helpers
    // -------------------------------------------------------------------------

    /// Flatten an entity name (identifier or qualified name) to its
    /// concatenated text.
    pub fn entity_name_to_string(&self, name: NodeId) -> String {
        match self.model.arena().kind(name) {
            NodeKind::Identifier { text } => self.model.interner().resolve(*text).to_string(),
            NodeKind::QualifiedName(qualified) => {
                let mut out = self.entity_name_to_string(qualified.left);
                out.push_str(&self.entity_name_to_string(qualified.right));
                out
            }
            _ => String::new(),
        }
    }

    /// Whether a modifier set contains the given flag.
    pub fn has_modifier(modifiers: ModifierFlags, flag: ModifierFlags) -> bool {
        modifiers.contains(flag)
    }

    /// Whether a declaration node sits under a `const` declaration list.
    pub fn is_const(&self, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if let NodeKind::VariableDeclList(list) = self.model.arena().kind(id) {
                return list.kind == VarDeclKind::Const;
            }
            current = self.model.arena().parent(id);
        }
        false
    }

    /// Whether the node is a variable declaration inside a declaration list.
    pub fn is_var_declaration(&self, node: NodeId) -> bool {
        if !matches!(self.model.arena().kind(node), NodeKind::VariableDecl(_)) {
            return false;
        }
        self.model
            .arena()
            .parent(node)
            .is_some_and(|p| matches!(self.model.arena().kind(p), NodeKind::VariableDeclList(_)))
    }

    /// Whether the expression is the left-hand side of a destructuring
    /// assignment, or a nested element of one.
    pub fn is_destructuring_assignment_lhs(&self, expr: NodeId) -> bool {
        let arena = self.model.arena();
        let mut current = expr;
        let mut parent = arena.parent(expr);
        while let Some(p) = parent {
            match arena.kind(p) {
                NodeKind::BinaryExpr(bin) if bin.op.is_assignment() && bin.left == current => {
                    return true;
                }
                NodeKind::ForStatement(stmt) if stmt.initializer == Some(current) => {
                    return true;
                }
                NodeKind::ForInStatement(stmt) if stmt.initializer == current => {
                    return true;
                }
                NodeKind::ForOfStatement(stmt) if stmt.initializer == current => {
                    return true;
                }
                _ => {}
            }
            current = p;
            parent = arena.parent(p);
        }
        false
    }

    /// Whether a declaration's symbol merges declarations of conflicting
    /// kinds. Namespace/type-declaration collisions are tolerated, and bare
    /// identifier declarations (property-through-assignment) don't count.
    pub fn symbol_has_duplicate_name(&self, symbol: SymbolId, probe: NodeId) -> bool {
        let arena = self.model.arena();
        let probe_is_type_decl = Self::is_type_decl_node(arena.kind(probe));
        let probe_is_module = matches!(arena.kind(probe), NodeKind::ModuleDecl(_));
        for &decl in self.model.symbols().declarations(symbol) {
            if decl == probe {
                continue;
            }
            let kind = arena.kind(decl);
            if matches!(kind, NodeKind::Identifier { .. }) {
                continue;
            }
            let decl_is_type_decl = Self::is_type_decl_node(kind);
            let decl_is_module = matches!(kind, NodeKind::ModuleDecl(_));
            let namespace_type_collision =
                (decl_is_type_decl && probe_is_module) || (probe_is_type_decl && decl_is_module);
            if !Self::same_decl_kind(kind, arena.kind(probe)) && !namespace_type_collision {
                return true;
            }
        }
        false
    }

    fn is_type_decl_node(kind: &NodeKind) -> bool {
        matches!(
            kind,
            NodeKind::ClassDecl(_)
                | NodeKind::InterfaceDecl(_)
                | NodeKind::EnumDecl(_)
                | NodeKind::TypeAliasDecl(_)
        )
    }

    fn same_decl_kind(a: &NodeKind, b: &NodeKind) -> bool {
        std::mem::discriminant(a) == std::mem::discriminant(b)
    }

    /// Whether a function expression calls itself by name anywhere in its
    /// body. Exhausting the subtree without a match answers false; callers
    /// that need "inconclusive" handling must check for a missing name
    /// symbol first.
    pub fn is_function_called_recursively(&self, func_expr: NodeId) -> bool {
        let arena = self.model.arena();
        let NodeKind::FunctionExpr(func) = arena.kind(func_expr) else {
            return false;
        };
        let Some(name) = func.name else {
            return false;
        };
        let Some(symbol) = self.model.symbol_at_location(name) else {
            return false;
        };
        let found = std::cell::Cell::new(false);
        arena.for_each_in_subtree(
            func_expr,
            &mut |node| {
                if let NodeKind::CallExpr(call) = arena.kind(node) {
                    if arena.is_identifier(call.callee)
                        && self.model.symbol_at_location(call.callee) == Some(symbol)
                    {
                        found.set(true);
                    }
                }
            },
            &mut |_| found.get(),
        );
        found.get()
    }

    // -------------------------------------------------------------------------
    // ESObject escape hatch
    // -------------------------------------------------------------------------

    /// Whether a type node is a reference to the `ESObject` alias.
    pub fn is_es_object_type_node(&self, type_node: NodeId) -> bool {
        let arena = self.model.arena();
        let NodeKind::TypeReference(reference) = arena.kind(type_node) else {
            return false;
        };
        arena.identifier_text(reference.name).is_some_and(|text| {
            self.atom_eq(text, ES_OBJECT)
        })
    }

    /// Whether a symbol is the `ESObject` type alias (`type ESObject = any`).
    pub fn is_es_object_symbol(&self, symbol: SymbolId) -> bool {
        let arena = self.model.arena();
        let Some(decl) = self.declaration_of(symbol) else {
            return false;
        };
        let Some(alias) = arena.type_alias_decl(decl) else {
            return false;
        };
        let named_es_object = arena
            .identifier_text(alias.name)
            .is_some_and(|text| self.atom_eq(text, ES_OBJECT));
        named_es_object
            && matches!(
                arena.kind(alias.type_node),
                NodeKind::KeywordTypeNode {
                    keyword: TypeKeyword::Any
                }
            )
    }

    /// The declared type node of the variable a node resolves to.
    pub fn variable_declaration_type_node(&self, node: NodeId) -> Option<NodeId> {
        let symbol = self.true_symbol_at_location(node)?;
        let decl = self.declaration_of(symbol)?;
        self.model.arena().variable_decl(decl)?.type_node
    }

    /// Whether the node's variable declaration is annotated `ESObject`.
    pub fn has_es_object_type(&self, node: NodeId) -> bool {
        self.variable_declaration_type_node(node)
            .is_some_and(|type_node| self.is_es_object_type_node(type_node))
    }

    /// Whether a value may be assigned to an `ESObject`-typed variable:
    /// literals are rejected, otherwise the value type must be unsupported
    /// or anonymous.
    pub fn is_value_assignable_to_es_object(&self, node: NodeId) -> bool {
        let arena = self.model.arena();
        if arena.is_object_literal(node) || arena.is_array_literal(node) {
            return false;
        }
        let value_type = self.model.type_at_location(node);
        self.is_unsupported_type(value_type) || self.is_anonymous_type(value_type)
    }

    // -------------------------------------------------------------------------
    // Shared modules
    // -------------------------------------------------------------------------

    /// Whether a source file opens with the `'use shared'` directive (import
    /// declarations may precede it).
    pub fn is_shared_module(&self, source_file: NodeId) -> bool {
        let arena = self.model.arena();
        let NodeKind::SourceFile { statements } = arena.kind(source_file) else {
            return false;
        };
        for &stmt in statements {
            if matches!(arena.kind(stmt), NodeKind::ImportDecl(_)) {
                continue;
            }
            let NodeKind::ExpressionStatement { expression } = arena.kind(stmt) else {
                return false;
            };
            return arena
                .string_value(*expression)
                .is_some_and(|value| self.atom_eq(value, USE_SHARED));
        }
        false
    }

    // -------------------------------------------------------------------------
    // Small shared utilities
    // -------------------------------------------------------------------------

    /// Compare an atom against a literal name.
    pub(crate) fn atom_eq(&self, atom: Atom, name: &str) -> bool {
        &*self.model.interner().resolve(atom) == name
    }

    /// Resolve a symbol's unescaped name.
    pub(crate) fn symbol_name(&self, symbol: SymbolId) -> Atom {
        self.model.symbols().name(symbol)
    }

    /// Whether the type-or-constraint at an expression should substitute a
    /// type parameter's constraint.
    pub fn type_or_constraint_at(&self, expr: NodeId) -> TypeId {
        let ty = self.model.type_at_location(expr);
        if self
            .model
            .types()
            .flags(ty)
            .contains(TypeFlags::TYPE_PARAMETER)
        {
            if let Some(constraint) = self.model.types().type_param_constraint(ty) {
                return constraint;
            }
        }
        ty
    }
}
