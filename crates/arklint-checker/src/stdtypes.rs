//! Standard-library type recognizers.
//!
//! Every recognizer is gated on global-scope residency: a user type that
//! happens to share a standard name (a module-local `Partial`, a project
//! class called `Map`) must not match. Global residency means the symbol
//! has no parent scope in its qualified name, or that parent is the
//! synthetic `global` scope.

use crate::config::STANDARD_LIBRARIES;
use crate::session::CheckSession;
use arklint_sema::{SymbolId, TypeData, TypeId};

impl CheckSession<'_> {
    /// Qualified name of the symbol's enclosing scope, if any.
    pub fn parent_symbol_name(&self, symbol: SymbolId) -> Option<String> {
        self.model.parent_symbol_name(symbol)
    }

    /// Whether the symbol lives in the global scope.
    pub fn is_global_symbol(&self, symbol: SymbolId) -> bool {
        match self.parent_symbol_name(symbol) {
            None => true,
            Some(parent) => parent == "global",
        }
    }

    /// Whether the symbol belongs to the `Symbol` builtin surface.
    pub fn is_symbol_api(&self, symbol: SymbolId) -> bool {
        self.parent_symbol_name(symbol)
            .is_some_and(|parent| parent == "Symbol" || parent == "SymbolConstructor")
    }

    /// The well-known `Symbol.iterator` symbol.
    pub fn is_symbol_iterator(&self, symbol: SymbolId) -> bool {
        self.is_symbol_api(symbol) && self.atom_eq(self.symbol_name(symbol), "iterator")
    }

    fn symbol_named_global(&self, symbol: Option<SymbolId>, name: &str) -> bool {
        symbol.is_some_and(|sym| {
            self.atom_eq(self.symbol_name(sym), name) && self.is_global_symbol(sym)
        })
    }

    /// `Record<K, V>`: an alias to a mapped type, recognized through the
    /// reference target's alias symbol.
    pub fn is_std_record_type(&self, ty: TypeId) -> bool {
        let types = self.model.types();
        if types.alias_symbol(ty).is_none() {
            return false;
        }
        let row = types.row(ty);
        let TypeData::Reference { target, .. } = row.data else {
            return false;
        };
        self.symbol_named_global(types.alias_symbol(target), "Record")
    }

    pub fn is_std_partial_type(&self, ty: TypeId) -> bool {
        self.symbol_named_global(self.model.types().alias_symbol(ty), "Partial")
    }

    pub fn is_std_required_type(&self, ty: TypeId) -> bool {
        self.symbol_named_global(self.model.types().alias_symbol(ty), "Required")
    }

    pub fn is_std_readonly_type(&self, ty: TypeId) -> bool {
        self.symbol_named_global(self.model.types().alias_symbol(ty), "Readonly")
    }

    pub fn is_std_function_type(&self, ty: TypeId) -> bool {
        self.symbol_named_global(self.model.types().symbol(ty), "Function")
    }

    pub fn is_std_map_type(&self, ty: TypeId) -> bool {
        self.symbol_named_global(self.model.types().symbol(ty), "Map")
    }

    pub fn is_std_bigint_type(&self, ty: TypeId) -> bool {
        self.symbol_named_global(self.model.types().symbol(ty), "BigInt")
    }

    pub fn is_std_number_type(&self, ty: TypeId) -> bool {
        self.symbol_named_global(self.model.types().symbol(ty), "Number")
    }

    pub fn is_std_boolean_type(&self, ty: TypeId) -> bool {
        self.symbol_named_global(self.model.types().symbol(ty), "Boolean")
    }

    pub fn is_std_error_type(&self, ty: TypeId) -> bool {
        let Some(symbol) = self.model.types().symbol(ty) else {
            return false;
        };
        self.model.fully_qualified_name(symbol) == "Error" && self.is_global_symbol(symbol)
    }

    /// Whether the type's backing symbol is declared in one of the
    /// TypeScript standard-library files.
    pub fn is_std_library_type(&self, ty: TypeId) -> bool {
        let types = self.model.types();
        let symbol = types.alias_symbol(ty).or_else(|| types.symbol(ty));
        let Some(symbol) = symbol else {
            return false;
        };
        let Some(decl) = self.declaration_of(symbol) else {
            return false;
        };
        let file = self.model.source_file_of(decl);
        STANDARD_LIBRARIES.contains(&file.file_name().to_lowercase().as_str())
    }
}
