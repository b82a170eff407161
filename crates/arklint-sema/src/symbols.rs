//! Canonical declaration symbols.
//!
//! A symbol is the canonical identity of a name: its flags, the syntactic
//! declarations that introduced it, its enclosing scope, and (for imports
//! and re-exports) the alias target. The checker always follows aliases to
//! the "true" symbol before classifying.

use crate::ast::NodeId;
use arklint_common::Atom;
use bitflags::bitflags;
use smallvec::SmallVec;

/// Identifier of a symbol in the table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SymbolId(pub u32);

bitflags! {
    /// Symbol classification flags.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct SymbolFlags: u32 {
        const VARIABLE = 1 << 0;
        const PROPERTY = 1 << 1;
        const ENUM_MEMBER = 1 << 2;
        const FUNCTION = 1 << 3;
        const CLASS = 1 << 4;
        const INTERFACE = 1 << 5;
        const ENUM = 1 << 6;
        const CONST_ENUM = 1 << 7;
        const MODULE = 1 << 8;
        const METHOD = 1 << 9;
        const CONSTRUCTOR = 1 << 10;
        const TYPE_ALIAS = 1 << 11;
        const ALIAS = 1 << 12;
        const PROTOTYPE = 1 << 13;
        const ASSIGNMENT = 1 << 14;
        const TYPE_PARAMETER = 1 << 15;
    }
}

/// Stored data for one symbol.
#[derive(Clone, Debug)]
pub struct SymbolData {
    pub name: Atom,
    pub flags: SymbolFlags,
    /// Declarations that introduced this symbol, in binding order.
    pub declarations: SmallVec<[NodeId; 1]>,
    /// Enclosing scope symbol (module/namespace/class), if any. Symbols with
    /// no parent are global.
    pub parent: Option<SymbolId>,
    /// For alias symbols: the aliased target.
    pub alias_target: Option<SymbolId>,
    /// Member symbols (class/interface members, enum members, module exports).
    pub members: Vec<SymbolId>,
}

/// Append-only symbol storage.
#[derive(Default)]
pub struct SymbolTable {
    symbols: Vec<SymbolData>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn alloc(&mut self, data: SymbolData) -> SymbolId {
        let id = SymbolId(self.symbols.len() as u32);
        self.symbols.push(data);
        id
    }

    pub(crate) fn get_mut(&mut self, id: SymbolId) -> &mut SymbolData {
        &mut self.symbols[id.0 as usize]
    }

    pub fn get(&self, id: SymbolId) -> &SymbolData {
        &self.symbols[id.0 as usize]
    }

    pub fn name(&self, id: SymbolId) -> Atom {
        self.get(id).name
    }

    pub fn flags(&self, id: SymbolId) -> SymbolFlags {
        self.get(id).flags
    }

    pub fn declarations(&self, id: SymbolId) -> &[NodeId] {
        &self.get(id).declarations
    }

    /// First declaration, if the symbol has any.
    pub fn first_declaration(&self, id: SymbolId) -> Option<NodeId> {
        self.get(id).declarations.first().copied()
    }

    pub fn parent(&self, id: SymbolId) -> Option<SymbolId> {
        self.get(id).parent
    }

    pub fn alias_target(&self, id: SymbolId) -> Option<SymbolId> {
        self.get(id).alias_target
    }

    pub fn members(&self, id: SymbolId) -> &[SymbolId] {
        &self.get(id).members
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}
