//! Identifier name generation for autofix suggestions.
//!
//! Property names that are not valid identifiers get mangled into one; new
//! names are searched against the target scope so they never collide.
//! Exhausting the search space answers `None` ("inconclusive"), never a
//! fabricated name.

use crate::session::CheckSession;
use arklint_sema::ast::{NodeId, NodeKind};
use arklint_sema::{SymbolId, TypeId};

/// Bounded candidate-name generator.
///
/// Yields `base`, `base_1`, `base_2`, ... up to the attempt cap, then
/// `None`.
pub struct NameGenerator {
    base: String,
    counter: u32,
    max_attempts: u32,
}

impl NameGenerator {
    pub fn new(base: impl Into<String>, max_attempts: u32) -> Self {
        Self {
            base: base.into(),
            counter: 0,
            max_attempts,
        }
    }

    /// Next candidate, or `None` once the search space is exhausted.
    pub fn get_name(&mut self) -> Option<String> {
        if self.counter >= self.max_attempts {
            return None;
        }
        let name = if self.counter == 0 {
            self.base.clone()
        } else {
            format!("{}_{}", self.base, self.counter)
        };
        self.counter += 1;
        Some(name)
    }
}

fn is_identifier_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '$'
}

fn is_identifier_part(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

/// Mangle an arbitrary string into identifier shape: a leading `__` when the
/// first character cannot start an identifier, `_` for spaces, `x<hex>` for
/// everything else outside the identifier alphabet.
pub fn identifier_name_from_string(text: &str) -> Option<String> {
    let mut result = String::new();
    for (i, c) in text.chars().enumerate() {
        if i == 0 && !is_identifier_start(c) {
            result.push_str("__");
        }
        if !is_identifier_part(c) {
            if c == ' ' {
                result.push('_');
            } else {
                result.push('x');
                result.push_str(&format!("{:x}", c as u32));
            }
        } else {
            result.push(c);
        }
    }
    Some(result)
}

impl CheckSession<'_> {
    /// An identifier-shaped replacement name for a symbol whose declared
    /// name is not a valid identifier. Prefixes underscores until the name
    /// no longer collides with a property of the owning type.
    pub fn find_identifier_name_for_symbol(&self, symbol: SymbolId) -> Option<String> {
        let original = self
            .model
            .interner()
            .resolve(self.model.symbols().name(symbol));
        let mut name = identifier_name_from_string(&original)?;
        if name == *original {
            return Some(name);
        }

        let parent_type = self.type_by_property(symbol)?;
        while self.property_named(parent_type, &name).is_some() {
            name.insert(0, '_');
        }
        Some(name)
    }

    fn property_named(&self, ty: TypeId, name: &str) -> Option<SymbolId> {
        let atom = self.model.interner().get(name)?;
        self.find_property(ty, atom)
    }

    /// The type that owns a property symbol, through its declaration's
    /// enclosing declaration.
    fn type_by_property(&self, symbol: SymbolId) -> Option<TypeId> {
        for &decl in self.model.symbols().declarations(symbol) {
            let is_property_decl = matches!(
                self.model.arena().kind(decl),
                NodeKind::PropertyDecl(_)
                    | NodeKind::PropertyAssignment(_)
                    | NodeKind::PropertySignature(_)
            );
            if !is_property_decl {
                return None;
            }
            if let Some(parent) = self.model.arena().parent(decl) {
                return Some(self.model.type_at_location(parent));
            }
        }
        None
    }

    /// Whether a top-level declaration or import binding of this name exists
    /// in the source file.
    pub fn declaration_name_exists(&self, source_file: NodeId, name: &str) -> bool {
        let arena = self.model.arena();
        let NodeKind::SourceFile { statements } = arena.kind(source_file) else {
            return false;
        };
        statements.iter().any(|&stmt| match arena.kind(stmt) {
            NodeKind::ImportDecl(import) => {
                let matches_atom =
                    |atom: arklint_common::Atom| self.atom_eq(atom, name);
                import.default_name.is_some_and(matches_atom)
                    || import.namespace_name.is_some_and(matches_atom)
                    || import.named_bindings.iter().copied().any(matches_atom)
            }
            NodeKind::ClassDecl(class) => class
                .name
                .and_then(|n| arena.identifier_text(n))
                .is_some_and(|text| self.atom_eq(text, name)),
            NodeKind::InterfaceDecl(interface) => arena
                .identifier_text(interface.name)
                .is_some_and(|text| self.atom_eq(text, name)),
            NodeKind::EnumDecl(decl) => arena
                .identifier_text(decl.name)
                .is_some_and(|text| self.atom_eq(text, name)),
            NodeKind::TypeAliasDecl(alias) => arena
                .identifier_text(alias.name)
                .is_some_and(|text| self.atom_eq(text, name)),
            NodeKind::FunctionDecl(func) => func
                .name
                .and_then(|n| arena.identifier_text(n))
                .is_some_and(|text| self.atom_eq(text, name)),
            NodeKind::ModuleDecl(module) => self.atom_eq(module.name, name),
            _ => false,
        })
    }

    /// Draw names from the generator until one is free in the source file.
    /// `None` means the generator ran dry: inconclusive, not "false".
    pub fn generate_unique_name(
        &self,
        generator: &mut NameGenerator,
        source_file: NodeId,
    ) -> Option<String> {
        loop {
            let candidate = generator.get_name()?;
            if !self.declaration_name_exists(source_file, &candidate) {
                return Some(candidate);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generator_exhausts_to_none() {
        let mut generator = NameGenerator::new("tmp", 3);
        assert_eq!(generator.get_name().as_deref(), Some("tmp"));
        assert_eq!(generator.get_name().as_deref(), Some("tmp_1"));
        assert_eq!(generator.get_name().as_deref(), Some("tmp_2"));
        assert_eq!(generator.get_name(), None);
        assert_eq!(generator.get_name(), None);
    }

    #[test]
    fn mangles_non_identifier_characters() {
        assert_eq!(identifier_name_from_string("abc").as_deref(), Some("abc"));
        assert_eq!(identifier_name_from_string("a b").as_deref(), Some("a_b"));
        assert_eq!(
            identifier_name_from_string("1st").as_deref(),
            Some("__1st")
        );
        assert_eq!(
            identifier_name_from_string("a-b").as_deref(),
            Some("ax2db")
        );
    }
}
