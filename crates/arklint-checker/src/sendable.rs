//! Sendable and shareable type classification.
//!
//! Sendable values may cross isolated-execution-context boundaries. A type
//! is sendable when it is a primitive, a type parameter, a class marked
//! with the sendable decorator, or a type that transitively reaches the
//! `ISendable` marker interface. The marker must come from the real
//! language module: an interface of the same name declared anywhere else
//! does not count.
//!
//! Union rules here are strictly conjunctive: one non-sendable member makes
//! the whole union non-sendable.

use crate::config::{
    ARKTS_COLLECTIONS_D_ETS, ARKTS_COLLECTIONS_TYPES, ARKTS_LANG_D_ETS, COLLECTIONS_NAMESPACE,
    ISENDABLE_TYPE, LANG_NAMESPACE, SENDABLE_DECORATOR,
};
use crate::session::CheckSession;
use arklint_common::Atom;
use arklint_sema::ast::{NodeId, NodeKind};
use arklint_sema::{SymbolFlags, TypeFlags, TypeId};

impl CheckSession<'_> {
    /// Whether values of the type may cross execution-context boundaries.
    pub fn is_sendable_type(&self, ty: TypeId) -> bool {
        let sendable_flags = TypeFlags::BOOLEAN
            | TypeFlags::NUMBER
            | TypeFlags::STRING
            | TypeFlags::BIGINT
            | TypeFlags::NULL
            | TypeFlags::UNDEFINED
            | TypeFlags::TYPE_PARAMETER;
        if self.model.types().flags(ty).intersects(sendable_flags) {
            return true;
        }
        self.is_sendable_class_or_interface(ty)
    }

    /// Sendable class (decorator-marked) or a type reaching the `ISendable`
    /// marker interface through heritage.
    pub fn is_sendable_class_or_interface(&self, ty: TypeId) -> bool {
        let Some(symbol) = self.model.types().symbol(ty) else {
            return false;
        };
        let target = self.reduce_reference(ty);

        if self.model.types().is_class(target) {
            if let Some(decl) = self.model.symbols().first_declaration(symbol) {
                if self.model.arena().class_decl(decl).is_some() {
                    return self.has_sendable_decorator(decl);
                }
            }
        }
        // The marker interface itself, or anything deriving from it.
        self.is_or_derived_from(ty, |s: &CheckSession<'_>, t| s.is_isendable_interface(t))
    }

    /// Shareable: const enums are shareable, unions member-wise, everything
    /// else by the sendable rule.
    pub fn is_shareable_type(&self, ty: TypeId) -> bool {
        if self.is_const_enum_symbol(self.model.types().symbol(ty)) {
            return true;
        }
        if let Some(members) = self.model.types().union_members(ty) {
            return members.iter().all(|&m| self.is_shareable_type(m));
        }
        self.is_sendable_type(ty)
    }

    /// Every member of the union must be sendable; non-union types answer
    /// false.
    pub fn is_sendable_union_type(&self, ty: TypeId) -> bool {
        match self.model.types().union_members(ty) {
            Some(members) => members.iter().all(|&m| self.is_sendable_type(m)),
            None => false,
        }
    }

    /// Whether the type, or any union member, is a sendable class or
    /// interface (disjunctive containment query, not a soundness check).
    pub fn type_contains_sendable_class_or_interface(&self, ty: TypeId) -> bool {
        if let Some(members) = self.model.types().union_members(ty) {
            return members
                .iter()
                .any(|&m| self.type_contains_sendable_class_or_interface(m));
        }
        self.is_sendable_class_or_interface(ty)
    }

    /// Whether a class declaration carries the sendable decorator.
    pub fn has_sendable_decorator(&self, class_decl: NodeId) -> bool {
        self.model
            .arena()
            .class_decl(class_decl)
            .is_some_and(|class| {
                class
                    .decorators
                    .iter()
                    .any(|&d| self.atom_eq(d, SENDABLE_DECORATOR))
            })
    }

    /// Decorators of a class declaration other than the sendable marker.
    pub fn non_sendable_decorators(&self, class_decl: NodeId) -> Option<Vec<Atom>> {
        self.model.arena().class_decl(class_decl).map(|class| {
            class
                .decorators
                .iter()
                .copied()
                .filter(|&d| !self.atom_eq(d, SENDABLE_DECORATOR))
                .collect()
        })
    }

    /// Decorators of a member declaration, but only when the enclosing
    /// class is sendable.
    pub fn decorators_if_in_sendable_class(&self, declaration: NodeId) -> Option<Vec<Atom>> {
        let arena = self.model.arena();
        let class_node = match arena.kind(declaration) {
            NodeKind::ParameterDecl(_) => arena.parent(declaration).and_then(|p| arena.parent(p)),
            _ => arena.parent(declaration),
        }?;
        if arena.class_decl(class_node).is_none() || !self.has_sendable_decorator(class_node) {
            return None;
        }
        match arena.kind(declaration) {
            NodeKind::PropertyDecl(prop) => Some(prop.decorators.to_vec()),
            NodeKind::ClassDecl(class) => Some(class.decorators.to_vec()),
            _ => Some(Vec::new()),
        }
    }

    /// The `ISendable` marker interface from the language declaration
    /// module.
    pub fn is_isendable_interface(&self, ty: TypeId) -> bool {
        let types = self.model.types();
        let symbol = types.alias_symbol(ty).or_else(|| types.symbol(ty));
        let Some(symbol) = symbol else {
            return false;
        };
        let Some(decl) = self.model.symbols().first_declaration(symbol) else {
            return false;
        };
        self.is_arkts_isendable_declaration(decl)
    }

    fn is_arkts_isendable_declaration(&self, decl: NodeId) -> bool {
        let arena = self.model.arena();
        let Some(interface) = arena.interface_decl(decl) else {
            return false;
        };
        if !arena
            .identifier_text(interface.name)
            .is_some_and(|text| self.atom_eq(text, ISENDABLE_TYPE))
        {
            return false;
        }
        if !self.declared_in_namespace(decl, LANG_NAMESPACE) {
            return false;
        }
        let file = self.model.source_file_of(decl);
        file.file_name().to_lowercase() == ARKTS_LANG_D_ETS
    }

    /// One of the shared array-like collection classes from the collections
    /// declaration module.
    pub fn is_arkts_collections_array_like_type(&self, ty: TypeId) -> bool {
        let types = self.model.types();
        let symbol = types.alias_symbol(ty).or_else(|| types.symbol(ty));
        let Some(symbol) = symbol else {
            return false;
        };
        let Some(decl) = self.model.symbols().first_declaration(symbol) else {
            return false;
        };
        self.is_arkts_collections_array_like_declaration(decl)
    }

    fn is_arkts_collections_array_like_declaration(&self, decl: NodeId) -> bool {
        let arena = self.model.arena();
        let Some(class) = arena.class_decl(decl) else {
            return false;
        };
        let named_collection = class.name.is_some_and(|name| {
            arena.identifier_text(name).is_some_and(|text| {
                let resolved = self.model.interner().resolve(text);
                ARKTS_COLLECTIONS_TYPES.contains(&&*resolved)
            })
        });
        if !named_collection {
            return false;
        }
        if !self.declared_in_namespace(decl, COLLECTIONS_NAMESPACE) {
            return false;
        }
        let file = self.model.source_file_of(decl);
        file.file_name().to_lowercase() == ARKTS_COLLECTIONS_D_ETS
    }

    /// Whether `decl`'s enclosing module block belongs to a namespace of the
    /// given name.
    fn declared_in_namespace(&self, decl: NodeId, namespace: &str) -> bool {
        let arena = self.model.arena();
        let Some(block) = arena.parent(decl) else {
            return false;
        };
        if !matches!(arena.kind(block), NodeKind::ModuleBlock { .. }) {
            return false;
        }
        let Some(module) = arena.parent(block) else {
            return false;
        };
        match arena.kind(module) {
            NodeKind::ModuleDecl(m) => self.atom_eq(m.name, namespace),
            _ => false,
        }
    }

    // -------------------------------------------------------------------------
    // Syntactic sendable checks
    // -------------------------------------------------------------------------

    /// Sendable check over a type annotation. Union nodes are conjunctive,
    /// alias declarations are followed, const enum references are allowed.
    pub fn is_sendable_type_node(&self, type_node: NodeId) -> bool {
        let arena = self.model.arena();
        let type_node = arena.unwrap_parenthesized_type(type_node);

        if let NodeKind::UnionTypeNode { types } = arena.kind(type_node) {
            // Only a fully sendable union annotation is supported.
            return types.iter().all(|&t| self.is_sendable_type_node(t));
        }

        let symbol = match arena.kind(type_node) {
            NodeKind::TypeReference(reference) => self.true_symbol_at_location(reference.name),
            _ => None,
        };

        if let Some(sym) = symbol {
            if self
                .model
                .symbols()
                .flags(sym)
                .contains(SymbolFlags::TYPE_ALIAS)
            {
                if let Some(decl) = self.declaration_of(sym) {
                    if let Some(alias) = arena.type_alias_decl(decl) {
                        return self.is_sendable_type_node(alias.type_node);
                    }
                }
            }
        }

        if self.is_const_enum_symbol(symbol) {
            return true;
        }

        self.is_sendable_type(self.model.type_at_location(type_node))
    }

    /// Shareable check over a declaration: annotated non-function
    /// declarations go through the syntactic rule, everything else through
    /// the type rule.
    pub fn is_shareable_entity(&self, node: NodeId) -> bool {
        let arena = self.model.arena();
        let decl = self.declaration_node_of(node);
        let type_node = decl.and_then(|d| match arena.kind(d) {
            NodeKind::VariableDecl(var) => var.type_node,
            NodeKind::PropertyDecl(prop) => prop.type_node,
            _ => None,
        });
        match (decl, type_node) {
            (Some(d), Some(annotation)) if !arena.is_function_like(d) => {
                self.is_sendable_type_node(annotation)
            }
            (decl, _) => {
                let target = decl.unwrap_or(node);
                self.is_shareable_type(self.model.type_at_location(target))
            }
        }
    }
}
