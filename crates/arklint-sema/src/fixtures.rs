//! Scenario assembly on top of `ModelBuilder`.
//!
//! Wraps the low-level builder with declaration-level operations: declare a
//! class with members and heritage, build object literals, set up
//! standard-library alias symbols, and so on. Host adapters use the same
//! operations; the checker test suites lean on them heavily.

use crate::ast::{
    ClassDecl, HeritageClause, HeritageToken, InterfaceDecl, ModifierFlags, NodeId, PropertyDecl,
};
use crate::builder::ModelBuilder;
use crate::files::FileId;
use crate::symbols::{SymbolFlags, SymbolId};
use crate::types::{ObjectFlags, TypeData, TypeFlags, TypeId};
use arklint_common::Span;
use smallvec::SmallVec;

/// A declared class/interface: its declaration node, symbol and type.
#[derive(Clone, Copy, Debug)]
pub struct Declared {
    pub node: NodeId,
    pub symbol: SymbolId,
    pub ty: TypeId,
    pub name_node: NodeId,
}

/// A declared member: its declaration node and symbol.
#[derive(Clone, Copy, Debug)]
pub struct Member {
    pub node: NodeId,
    pub symbol: SymbolId,
}

/// Builder wrapper with a span cursor and a default static source file.
pub struct Fixture {
    pub b: ModelBuilder,
    /// Default statically-typed source file (`.ets`).
    pub file: FileId,
    cursor: u32,
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}

impl Fixture {
    pub fn new() -> Self {
        let mut b = ModelBuilder::new();
        let file = b.file("src/main.ets", false);
        Self { b, file, cursor: 0 }
    }

    /// Register an additional file.
    pub fn add_file(&mut self, path: &str, is_declaration_file: bool) -> FileId {
        self.b.file(path, is_declaration_file)
    }

    /// Register a third-party declaration file.
    pub fn lib_file(&mut self, path: &str) -> FileId {
        self.b.file(path, true)
    }

    /// Allocate the next non-overlapping span of `len` bytes.
    pub fn span(&mut self, len: u32) -> Span {
        let span = Span::new(self.cursor, self.cursor + len);
        self.cursor += len + 1;
        span
    }

    // -------------------------------------------------------------------------
    // Declarations
    // -------------------------------------------------------------------------

    /// Declare a class in `file` with the given members and heritage, wiring
    /// symbol, declared type and member symbols.
    pub fn class_in(
        &mut self,
        file: FileId,
        name: &str,
        modifiers: ModifierFlags,
        decorators: &[&str],
        heritage: Vec<HeritageClause>,
        members: &[Member],
    ) -> Declared {
        let name_span = self.span(name.len() as u32);
        let name_node = self.b.ident(file, name_span, name);
        let decl_span = self.span(16 + name.len() as u32);
        let decorator_atoms: SmallVec<[arklint_common::Atom; 1]> =
            decorators.iter().map(|d| self.b.intern(d)).collect();
        let node = self.b.class_decl(
            file,
            decl_span,
            ClassDecl {
                name: Some(name_node),
                modifiers,
                decorators: decorator_atoms,
                heritage,
                members: members.iter().map(|m| m.node).collect(),
            },
        );
        let symbol = self.b.symbol(name, SymbolFlags::CLASS);
        self.b.add_declaration(symbol, node);
        self.b.bind_symbol(name_node, symbol);
        for member in members {
            self.b.add_member(symbol, member.symbol);
        }
        let ty = self.b.class_type(symbol);
        self.b.set_node_type(name_node, ty);
        self.b.set_node_type(node, ty);
        Declared {
            node,
            symbol,
            ty,
            name_node,
        }
    }

    /// Declare a class in the default file.
    pub fn class(&mut self, name: &str, members: &[Member]) -> Declared {
        self.class_in(
            self.file,
            name,
            ModifierFlags::empty(),
            &[],
            Vec::new(),
            members,
        )
    }

    /// Declare an interface in `file`.
    pub fn interface_in(
        &mut self,
        file: FileId,
        name: &str,
        heritage: Vec<HeritageClause>,
        members: &[Member],
    ) -> Declared {
        let name_span = self.span(name.len() as u32);
        let name_node = self.b.ident(file, name_span, name);
        let decl_span = self.span(20 + name.len() as u32);
        let node = self.b.interface_decl(
            file,
            decl_span,
            InterfaceDecl {
                name: name_node,
                heritage,
                members: members.iter().map(|m| m.node).collect(),
            },
        );
        let symbol = self.b.symbol(name, SymbolFlags::INTERFACE);
        self.b.add_declaration(symbol, node);
        self.b.bind_symbol(name_node, symbol);
        for member in members {
            self.b.add_member(symbol, member.symbol);
        }
        let ty = self.b.interface_type(symbol);
        self.b.set_node_type(name_node, ty);
        self.b.set_node_type(node, ty);
        Declared {
            node,
            symbol,
            ty,
            name_node,
        }
    }

    pub fn interface(&mut self, name: &str, members: &[Member]) -> Declared {
        self.interface_in(self.file, name, Vec::new(), members)
    }

    /// A heritage clause entry resolving to `base`'s declared type.
    pub fn heritage_entry(&mut self, file: FileId, base: &Declared) -> NodeId {
        let ident_span = self.span(4);
        let ident = self.b.ident(file, ident_span, "base");
        self.b.bind_symbol(ident, base.symbol);
        let span = self.span(8);
        let entry = self.b.expression_with_type_args(file, span, ident, Vec::new());
        self.b.set_node_type(entry, base.ty);
        entry
    }

    /// A heritage entry whose type is wired later (cyclic declarations).
    pub fn heritage_entry_untyped(&mut self, file: FileId) -> NodeId {
        let ident_span = self.span(4);
        let ident = self.b.ident(file, ident_span, "base");
        let span = self.span(8);
        self.b.expression_with_type_args(file, span, ident, Vec::new())
    }

    /// A heritage clause from pre-built entries.
    pub fn clause(&mut self, token: HeritageToken, entries: Vec<NodeId>) -> HeritageClause {
        HeritageClause {
            token,
            types: SmallVec::from_vec(entries),
        }
    }

    /// `extends` clause naming `base`.
    pub fn extends_clause(&mut self, file: FileId, base: &Declared) -> HeritageClause {
        let entry = self.heritage_entry(file, base);
        HeritageClause {
            token: HeritageToken::Extends,
            types: SmallVec::from_slice(&[entry]),
        }
    }

    /// `implements` clause naming `base`.
    pub fn implements_clause(&mut self, file: FileId, base: &Declared) -> HeritageClause {
        let entry = self.heritage_entry(file, base);
        HeritageClause {
            token: HeritageToken::Implements,
            types: SmallVec::from_slice(&[entry]),
        }
    }

    /// Declare a property member `name: ty` with the given modifiers.
    pub fn property_member(
        &mut self,
        file: FileId,
        name: &str,
        ty: TypeId,
        modifiers: ModifierFlags,
    ) -> Member {
        let name_span = self.span(name.len() as u32);
        let name_node = self.b.ident(file, name_span, name);
        let decl_span = self.span(name.len() as u32 + 10);
        let node = self.b.property_decl(
            file,
            decl_span,
            PropertyDecl {
                name: name_node,
                modifiers,
                decorators: SmallVec::new(),
                exclamation: None,
                type_node: None,
                initializer: None,
            },
        );
        let symbol = self.b.symbol(name, SymbolFlags::PROPERTY);
        self.b.add_declaration(symbol, node);
        self.b.bind_symbol(name_node, symbol);
        self.b.set_symbol_type(symbol, ty);
        Member { node, symbol }
    }

    /// Declare a method member.
    pub fn method_member(&mut self, file: FileId, name: &str) -> Member {
        let name_span = self.span(name.len() as u32);
        let name_node = self.b.ident(file, name_span, name);
        let decl_span = self.span(name.len() as u32 + 6);
        let node = self.b.method_decl(file, decl_span, name_node, ModifierFlags::empty());
        let symbol = self.b.symbol(name, SymbolFlags::METHOD);
        self.b.add_declaration(symbol, node);
        self.b.bind_symbol(name_node, symbol);
        Member { node, symbol }
    }

    /// Declare a constructor with `param_count` parameters.
    pub fn constructor_member(&mut self, file: FileId, param_count: usize) -> Member {
        let mut params = Vec::with_capacity(param_count);
        for i in 0..param_count {
            let p_span = self.span(2);
            let p_name = self.b.ident(file, p_span, &format!("p{i}"));
            let p_decl_span = self.span(4);
            let param = self
                .b
                .parameter_decl(file, p_decl_span, p_name, ModifierFlags::empty());
            params.push(param);
        }
        let span = self.span(14);
        let node = self.b.constructor_decl(file, span, params);
        let symbol = self.b.symbol("constructor", SymbolFlags::CONSTRUCTOR);
        self.b.add_declaration(symbol, node);
        Member { node, symbol }
    }

    // -------------------------------------------------------------------------
    // Object literals
    // -------------------------------------------------------------------------

    /// `name: <numeric literal>` property assignment; the literal is typed
    /// `number`.
    pub fn prop_num(&mut self, file: FileId, name: &str, value: f64) -> NodeId {
        let name_span = self.span(name.len() as u32);
        let name_node = self.b.ident(file, name_span, name);
        let lit_span = self.span(3);
        let lit = self.b.numeric_lit(file, lit_span, value);
        self.b.set_node_type(lit, TypeId::NUMBER);
        let span = name_span.cover(lit_span);
        self.b.property_assignment(file, span, name_node, lit)
    }

    /// `name: <string literal>` property assignment; the literal is typed
    /// `string`.
    pub fn prop_str(&mut self, file: FileId, name: &str, value: &str) -> NodeId {
        let name_span = self.span(name.len() as u32);
        let name_node = self.b.ident(file, name_span, name);
        let lit_span = self.span(value.len() as u32 + 2);
        let lit = self.b.string_lit(file, lit_span, value);
        self.b.set_node_type(lit, TypeId::STRING);
        let span = name_span.cover(lit_span);
        self.b.property_assignment(file, span, name_node, lit)
    }

    /// `"key": <numeric literal>` property assignment with a string-literal
    /// key.
    pub fn prop_str_key(&mut self, file: FileId, key: &str, value: f64) -> NodeId {
        let key_span = self.span(key.len() as u32 + 2);
        let key_lit = self.b.string_lit(file, key_span, key);
        let lit_span = self.span(3);
        let lit = self.b.numeric_lit(file, lit_span, value);
        self.b.set_node_type(lit, TypeId::NUMBER);
        let span = key_span.cover(lit_span);
        self.b.property_assignment(file, span, key_lit, lit)
    }

    /// `name: <initializer>` with an arbitrary pre-built initializer.
    pub fn prop_init(&mut self, file: FileId, name: &str, initializer: NodeId) -> NodeId {
        let name_span = self.span(name.len() as u32);
        let name_node = self.b.ident(file, name_span, name);
        let span = self.span(name.len() as u32 + 6);
        self.b.property_assignment(file, span, name_node, initializer)
    }

    /// `["key"]: <numeric literal>` with a string-literal computed name.
    pub fn prop_computed_str(&mut self, file: FileId, key: &str, value: f64) -> NodeId {
        let key_span = self.span(key.len() as u32 + 2);
        let key_lit = self.b.string_lit(file, key_span, key);
        let computed_span = self.span(key.len() as u32 + 4);
        let computed = self.b.computed_property_name(file, computed_span, key_lit);
        let lit_span = self.span(3);
        let lit = self.b.numeric_lit(file, lit_span, value);
        self.b.set_node_type(lit, TypeId::NUMBER);
        let span = computed_span.cover(lit_span);
        self.b.property_assignment(file, span, computed, lit)
    }

    /// `[Symbol.iterator]: <init>` computed-name property assignment.
    pub fn prop_computed_symbol_iterator(&mut self, file: FileId, initializer: NodeId) -> NodeId {
        let access = self.symbol_iterator_access(file);
        let computed_span = self.span(17);
        let computed = self.b.computed_property_name(file, computed_span, access);
        let span = self.span(24);
        self.b.property_assignment(file, span, computed, initializer)
    }

    /// A `Symbol.iterator` property access bound to the well-known symbol.
    pub fn symbol_iterator_access(&mut self, file: FileId) -> NodeId {
        let sym_ctor = self.b.symbol("SymbolConstructor", SymbolFlags::INTERFACE);
        let iterator = self.b.symbol("iterator", SymbolFlags::PROPERTY);
        self.b.set_symbol_parent(iterator, sym_ctor);
        let sym_span = self.span(6);
        let sym_ident = self.b.ident(file, sym_span, "Symbol");
        let name_span = self.span(8);
        let access_span = sym_span.cover(name_span);
        let access = self
            .b
            .property_access(file, access_span, sym_ident, "iterator", name_span);
        self.b.bind_symbol(access, iterator);
        access
    }

    /// Object literal from pre-built property assignments.
    pub fn obj(&mut self, file: FileId, properties: Vec<NodeId>) -> NodeId {
        let span = self.span(2 + 8 * properties.len() as u32);
        self.b.object_literal(file, span, properties)
    }

    // -------------------------------------------------------------------------
    // Standard library / interop scaffolding
    // -------------------------------------------------------------------------

    /// A global standard-library alias symbol (`Partial`, `Record`, ...)
    /// declared in a default standard-library file.
    pub fn std_alias_symbol(&mut self, name: &str) -> SymbolId {
        let std_file = self.b.file("typescript/lib/lib.es5.d.ts", true);
        let span = self.span(name.len() as u32);
        let name_node = self.b.ident(std_file, span, name);
        let decl_span = self.span(name.len() as u32 + 20);
        let keyword = self
            .b
            .keyword_type_node(std_file, decl_span, crate::ast::TypeKeyword::Any);
        let decl = self.b.type_alias_decl(std_file, decl_span, name_node, keyword);
        let symbol = self.b.symbol(name, SymbolFlags::TYPE_ALIAS);
        self.b.add_declaration(symbol, decl);
        symbol
    }

    /// `Partial<arg>`-shaped alias type for the given global alias symbol.
    pub fn wrapper_alias_type(&mut self, alias: SymbolId, arg: TypeId) -> TypeId {
        self.b.alias_type(
            alias,
            vec![arg],
            TypeFlags::OBJECT,
            ObjectFlags::ANONYMOUS,
            TypeData::Object {
                call_signatures: SmallVec::new(),
                type_param_count: 0,
            },
        )
    }

    /// A `Record<K, V>` type: a reference whose target carries the global
    /// `Record` alias symbol.
    pub fn record_type(&mut self, alias: SymbolId) -> TypeId {
        let target = self.b.alias_type(
            alias,
            Vec::new(),
            TypeFlags::OBJECT,
            ObjectFlags::ANONYMOUS,
            TypeData::Object {
                call_signatures: SmallVec::new(),
                type_param_count: 2,
            },
        );
        self.b.alias_type(
            alias,
            vec![TypeId::STRING, TypeId::ANY],
            TypeFlags::OBJECT,
            ObjectFlags::REFERENCE,
            TypeData::Reference {
                target,
                type_args: SmallVec::from_slice(&[TypeId::STRING, TypeId::ANY]),
            },
        )
    }

    /// Declare a class inside a third-party declaration file and return it;
    /// its symbol classifies as library-origin.
    pub fn lib_class(&mut self, path: &str, name: &str) -> Declared {
        let file = self.lib_file(path);
        self.class_in(file, name, ModifierFlags::empty(), &[], Vec::new(), &[])
    }

    /// A function value exported from a library file: its symbol, an
    /// identifier expression bound to it, and its (any-typed) callee type.
    pub fn lib_function(&mut self, path: &str, name: &str) -> (SymbolId, NodeId) {
        let file = self.lib_file(path);
        let span = self.span(name.len() as u32);
        let decl_name = self.b.ident(file, span, name);
        let decl_span = self.span(name.len() as u32 + 12);
        let decl = self.b.function_decl(
            file,
            decl_span,
            crate::ast::FunctionDecl {
                name: Some(decl_name),
                return_type: None,
                body: None,
            },
        );
        let symbol = self.b.symbol(name, SymbolFlags::FUNCTION);
        self.b.add_declaration(symbol, decl);
        let use_span = self.span(name.len() as u32);
        let use_ident = self.b.ident(self.file, use_span, name);
        self.b.bind_symbol(use_ident, symbol);
        (symbol, use_ident)
    }

    /// The `ISendable` marker interface declared inside `namespace lang` of
    /// the ArkTS language declaration module.
    pub fn isendable_interface(&mut self) -> Declared {
        let file = self.b.file("sdk/@arkts.lang.d.ets", true);
        let name_span = self.span(9);
        let name_node = self.b.ident(file, name_span, "ISendable");
        let decl_span = self.span(30);
        let node = self.b.interface_decl(
            file,
            decl_span,
            InterfaceDecl {
                name: name_node,
                heritage: Vec::new(),
                members: Vec::new(),
            },
        );
        let block_span = self.span(40);
        let block = self.b.module_block(file, block_span, vec![node]);
        let module_span = self.span(60);
        self.b.module_decl(file, module_span, "lang", Some(block));
        let lang = self.b.symbol("lang", SymbolFlags::MODULE);
        let symbol = self.b.symbol("ISendable", SymbolFlags::INTERFACE);
        self.b.set_symbol_parent(symbol, lang);
        self.b.add_declaration(symbol, node);
        self.b.bind_symbol(name_node, symbol);
        let ty = self.b.interface_type(symbol);
        self.b.set_node_type(name_node, ty);
        self.b.set_node_type(node, ty);
        Declared {
            node,
            symbol,
            ty,
            name_node,
        }
    }

    /// A bare import statement (for shared-module and name-scan scenarios).
    pub fn import_stmt(&mut self, file: FileId, named: &[&str]) -> NodeId {
        let span = self.span(20);
        let named_bindings = named.iter().map(|n| self.b.intern(n)).collect();
        self.b.import_decl(
            file,
            span,
            crate::ast::ImportDecl {
                default_name: None,
                namespace_name: None,
                named_bindings,
            },
        )
    }

    /// An expression statement wrapping a string literal directive.
    pub fn directive_stmt(&mut self, file: FileId, text: &str) -> NodeId {
        let lit_span = self.span(text.len() as u32 + 2);
        let lit = self.b.string_lit(file, lit_span, text);
        let span = self.span(text.len() as u32 + 3);
        self.b.expression_statement(file, span, lit)
    }

    /// Finish into the immutable model.
    pub fn finish(self) -> crate::model::SemanticModel {
        self.b.finish()
    }
}
