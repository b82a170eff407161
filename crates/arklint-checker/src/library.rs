//! Library (dynamic-origin) classification.
//!
//! A symbol is library-origin when its declaring file sits outside the
//! statically-checked boundary: declaration files, third-party directories,
//! and plain `.ts` sources (unless `test_mode` admits them). Standard-library
//! modules are exempt; their API surface is still checked statically.

use crate::config::STANDARD_LIBRARIES;
use crate::session::CheckSession;
use arklint_sema::{NodeId, SymbolId, TypeId};

impl CheckSession<'_> {
    /// Whether a symbol's first declaration classifies as library code.
    pub fn is_library_symbol(&self, symbol: Option<SymbolId>) -> bool {
        let Some(symbol) = symbol else {
            return false;
        };
        let Some(decl) = self.declaration_of(symbol) else {
            return false;
        };
        let file = self.model.source_file_of(decl);

        // Symbols from both *.ts and *.d.ts files obey interop rules; in
        // test mode plain *.ts sources count as static instead, standing in
        // for the restricted-language extension.
        let ext = file.extension_lowercase();
        let is_third_party = self.ignore.is_ignored(&file.path);
        let is_ets = ext == ".ets";
        let is_ts = ext == ".ts" && !file.is_declaration_file;
        let is_static = (is_ets || (is_ts && self.options.test_mode)) && !is_third_party;
        let is_std_lib = STANDARD_LIBRARIES.contains(&file.file_name().to_lowercase().as_str());

        !is_static && !is_std_lib
    }

    /// Whether a type originates from library code. Nullability is stripped
    /// first; a union is library-typed only if every member is.
    pub fn is_library_type(&self, ty: TypeId) -> bool {
        let non_nullable = self.model.non_nullable(ty);
        let types = self.model.types();
        if let Some(members) = types.union_members(non_nullable) {
            return members.iter().all(|&m| self.is_library_type(m));
        }
        let symbol = types
            .alias_symbol(non_nullable)
            .or_else(|| types.symbol(non_nullable));
        self.is_library_symbol(symbol)
    }

    /// Whether the type at a node is library-typed.
    pub fn has_library_type(&self, node: NodeId) -> bool {
        self.is_library_type(self.model.type_at_location(node))
    }
}
