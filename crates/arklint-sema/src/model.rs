//! The semantic model query facade.
//!
//! `SemanticModel` bundles the AST arena, symbol table, type table and the
//! resolution maps wired by the host. The checker treats it as a read-only
//! oracle: it classifies already-resolved types and symbols and never runs
//! inference of its own.

use crate::ast::{NodeArena, NodeId};
use crate::files::{FileRegistry, SourceFileInfo};
use crate::symbols::{SymbolId, SymbolTable};
use crate::types::{CallSignature, TypeFlags, TypeId, TypeTable};
use arklint_common::Interner;
use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;
use std::sync::atomic::{AtomicU64, Ordering};

/// A compile-time constant value attached to an expression (enum members,
/// cross-enum property accesses).
#[derive(Clone, Debug, PartialEq)]
pub enum ConstantValue {
    Number(f64),
    Str(String),
}

/// Read-only semantic model for one set of source files.
pub struct SemanticModel {
    pub(crate) interner: Interner,
    pub(crate) files: FileRegistry,
    pub(crate) arena: NodeArena,
    pub(crate) symbols: SymbolTable,
    pub(crate) types: TypeTable,
    pub(crate) node_types: FxHashMap<NodeId, TypeId>,
    pub(crate) node_symbols: FxHashMap<NodeId, SymbolId>,
    pub(crate) contextual_types: FxHashMap<NodeId, TypeId>,
    pub(crate) resolved_signatures: FxHashMap<NodeId, CallSignature>,
    pub(crate) constant_values: FxHashMap<NodeId, ConstantValue>,
    pub(crate) symbol_types: FxHashMap<SymbolId, TypeId>,
    /// Instrumentation: number of `symbol_at_location` queries served.
    pub(crate) symbol_queries: AtomicU64,
}

impl SemanticModel {
    pub fn interner(&self) -> &Interner {
        &self.interner
    }

    pub fn arena(&self) -> &NodeArena {
        &self.arena
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    pub fn types(&self) -> &TypeTable {
        &self.types
    }

    pub fn files(&self) -> &FileRegistry {
        &self.files
    }

    /// Source file metadata for the file containing `node`.
    pub fn source_file_of(&self, node: NodeId) -> &SourceFileInfo {
        self.files.get(self.arena.file(node))
    }

    /// The resolved type at a node. Unresolved nodes answer `unknown`.
    pub fn type_at_location(&self, node: NodeId) -> TypeId {
        self.node_types
            .get(&node)
            .copied()
            .unwrap_or(TypeId::UNKNOWN)
    }

    /// The symbol bound at a node, if any. Does not follow aliases.
    pub fn symbol_at_location(&self, node: NodeId) -> Option<SymbolId> {
        self.symbol_queries.fetch_add(1, Ordering::Relaxed);
        self.node_symbols.get(&node).copied()
    }

    /// Number of `symbol_at_location` queries served so far.
    pub fn symbol_query_count(&self) -> u64 {
        self.symbol_queries.load(Ordering::Relaxed)
    }

    /// Follow an alias symbol to its ultimate target.
    pub fn aliased_symbol(&self, symbol: SymbolId) -> SymbolId {
        let mut current = symbol;
        let mut seen = FxHashSet::default();
        while let Some(target) = self.symbols.alias_target(current) {
            if !seen.insert(current) {
                break;
            }
            current = target;
        }
        current
    }

    /// Contextual type of an expression, when the surrounding construct
    /// provides one.
    pub fn contextual_type(&self, node: NodeId) -> Option<TypeId> {
        self.contextual_types.get(&node).copied()
    }

    /// The signature a call expression resolved to.
    pub fn resolved_call_signature(&self, call: NodeId) -> Option<CallSignature> {
        self.resolved_signatures.get(&call).cloned()
    }

    /// Compile-time constant value of an expression, if the host computed
    /// one.
    pub fn constant_value(&self, node: NodeId) -> Option<ConstantValue> {
        self.constant_values.get(&node).cloned()
    }

    /// Declared type of a symbol.
    pub fn type_of_symbol(&self, symbol: SymbolId) -> Option<TypeId> {
        self.symbol_types.get(&symbol).copied()
    }

    /// Type arguments of a reference type; empty for other types.
    pub fn type_arguments(&self, ty: TypeId) -> SmallVec<[TypeId; 2]> {
        self.types.type_arguments(ty)
    }

    /// All apparent properties of a type: own members plus members inherited
    /// through the declaration's heritage chain. Derived members shadow base
    /// members of the same name.
    pub fn properties_of_type(&self, ty: TypeId) -> Vec<SymbolId> {
        let mut out = Vec::new();
        let mut seen_names = FxHashSet::default();
        let mut visited = FxHashSet::default();
        self.collect_properties(self.reduce_reference(ty), &mut out, &mut seen_names, &mut visited);
        out
    }

    fn reduce_reference(&self, ty: TypeId) -> TypeId {
        match self.types.reference_parts(ty) {
            Some((target, _)) if target != ty => target,
            _ => ty,
        }
    }

    fn collect_properties(
        &self,
        ty: TypeId,
        out: &mut Vec<SymbolId>,
        seen_names: &mut FxHashSet<arklint_common::Atom>,
        visited: &mut FxHashSet<TypeId>,
    ) {
        if !visited.insert(ty) {
            return;
        }
        let Some(symbol) = self.types.symbol(ty) else {
            return;
        };
        for &member in self.symbols.members(symbol) {
            let flags = self.symbols.flags(member);
            if flags.intersects(
                crate::symbols::SymbolFlags::PROPERTY | crate::symbols::SymbolFlags::METHOD,
            ) && seen_names.insert(self.symbols.name(member))
            {
                out.push(member);
            }
        }
        // Walk the heritage chain of every declaration.
        for &decl in self.symbols.declarations(symbol) {
            let clauses = match self.arena.kind(decl) {
                crate::ast::NodeKind::ClassDecl(c) => &c.heritage,
                crate::ast::NodeKind::InterfaceDecl(i) => &i.heritage,
                _ => continue,
            };
            for clause in clauses {
                for &base_expr in &clause.types {
                    let base = self.reduce_reference(self.type_at_location(base_expr));
                    self.collect_properties(base, out, seen_names, visited);
                }
            }
        }
    }

    /// Strip `null`/`undefined` members from a union. Non-nullable types are
    /// returned unchanged; a fully nullable union collapses to `never`.
    pub fn non_nullable(&self, ty: TypeId) -> TypeId {
        let Some(members) = self.types.union_members(ty) else {
            return ty;
        };
        let remaining: Vec<TypeId> = members
            .iter()
            .copied()
            .filter(|&m| !self.types.flags(m).intersects(TypeFlags::NULLABLE))
            .collect();
        if remaining.len() == members.len() {
            return ty;
        }
        match remaining.len() {
            0 => TypeId::NEVER,
            1 => remaining[0],
            _ => self.types.intern_union(remaining),
        }
    }

    /// Dotted, fully qualified name of a symbol (`lang.ISendable`).
    pub fn fully_qualified_name(&self, symbol: SymbolId) -> String {
        let mut parts = vec![self.interner.resolve(self.symbols.name(symbol)).to_string()];
        let mut current = symbol;
        let mut seen = FxHashSet::default();
        while let Some(parent) = self.symbols.parent(current) {
            if !seen.insert(current) {
                break;
            }
            parts.push(self.interner.resolve(self.symbols.name(parent)).to_string());
            current = parent;
        }
        parts.reverse();
        parts.join(".")
    }

    /// Qualified name of the symbol's parent scope, if it has one.
    pub fn parent_symbol_name(&self, symbol: SymbolId) -> Option<String> {
        let name = self.fully_qualified_name(symbol);
        name.rfind('.').map(|dot| name[..dot].to_string())
    }
}
