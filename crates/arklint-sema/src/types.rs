//! Interned type representation.
//!
//! Types are stored in a table and referenced by `TypeId`, so equality is an
//! integer comparison. Each row carries the flag sets the checker reads
//! (primitive kind, object kind), the backing symbol, the alias symbol with
//! its type arguments, and kind-specific structure.
//!
//! The well-known intrinsic types are created eagerly at table construction
//! and are addressable through the `TypeId` constants.

use crate::ast::NodeId;
use crate::symbols::SymbolId;
use bitflags::bitflags;
use dashmap::DashMap;
use smallvec::SmallVec;
use std::sync::RwLock;

/// Identifier of a type in the table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TypeId(pub u32);

impl TypeId {
    pub const ANY: TypeId = TypeId(0);
    pub const UNKNOWN: TypeId = TypeId(1);
    pub const NUMBER: TypeId = TypeId(2);
    pub const STRING: TypeId = TypeId(3);
    pub const BOOLEAN: TypeId = TypeId(4);
    pub const BIGINT: TypeId = TypeId(5);
    pub const NULL: TypeId = TypeId(6);
    pub const UNDEFINED: TypeId = TypeId(7);
    pub const VOID: TypeId = TypeId(8);
    pub const NEVER: TypeId = TypeId(9);
    /// The `object` keyword type.
    pub const NON_PRIMITIVE: TypeId = TypeId(10);
}

bitflags! {
    /// Primitive/structural kind flags, mirroring the host checker's view.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct TypeFlags: u32 {
        const ANY = 1 << 0;
        const UNKNOWN = 1 << 1;
        const STRING = 1 << 2;
        const NUMBER = 1 << 3;
        const BOOLEAN = 1 << 4;
        const ENUM = 1 << 5;
        const BIGINT = 1 << 6;
        const STRING_LITERAL = 1 << 7;
        const NUMBER_LITERAL = 1 << 8;
        const BOOLEAN_LITERAL = 1 << 9;
        const ENUM_LITERAL = 1 << 10;
        const UNDEFINED = 1 << 11;
        const NULL = 1 << 12;
        const VOID = 1 << 13;
        const NEVER = 1 << 14;
        const TYPE_PARAMETER = 1 << 15;
        const OBJECT = 1 << 16;
        const UNION = 1 << 17;
        const INTERSECTION = 1 << 18;
        const NON_PRIMITIVE = 1 << 19;

        const NUMBER_LIKE =
            Self::NUMBER.bits() | Self::NUMBER_LITERAL.bits() | Self::ENUM.bits();
        const BOOLEAN_LIKE = Self::BOOLEAN.bits() | Self::BOOLEAN_LITERAL.bits();
        const STRING_LIKE = Self::STRING.bits() | Self::STRING_LITERAL.bits();
        const NULLABLE = Self::NULL.bits() | Self::UNDEFINED.bits();
        const UNION_OR_INTERSECTION = Self::UNION.bits() | Self::INTERSECTION.bits();
    }
}

bitflags! {
    /// Object-type kind flags.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct ObjectFlags: u16 {
        const CLASS = 1 << 0;
        const INTERFACE = 1 << 1;
        const REFERENCE = 1 << 2;
        const TUPLE = 1 << 3;
        const ANONYMOUS = 1 << 4;

        const CLASS_OR_INTERFACE = Self::CLASS.bits() | Self::INTERFACE.bits();
    }
}

/// One call signature of a functional type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallSignature {
    /// Declaration node, when the signature comes from source.
    pub declaration: Option<NodeId>,
    /// Whether the declaration carries an explicit return-type annotation.
    pub has_return_type_annotation: bool,
}

/// Kind-specific type structure.
#[derive(Clone, Debug, Default)]
pub enum TypeData {
    /// Intrinsics, literals: everything lives in the flags.
    #[default]
    None,
    /// Type parameter with optional constraint.
    TypeParameter { constraint: Option<TypeId> },
    /// Union members, in declaration order. Order is significant: the
    /// dynamic-origin classifier scans left to right.
    Union(Vec<TypeId>),
    /// Intersection members.
    Intersection(Vec<TypeId>),
    /// Instantiated reference to a generic target (`Array<number>`).
    Reference {
        target: TypeId,
        type_args: SmallVec<[TypeId; 2]>,
    },
    /// Declared or anonymous object type.
    Object {
        call_signatures: SmallVec<[CallSignature; 1]>,
        /// Number of type parameters on a generic declaration target.
        type_param_count: u8,
    },
}

/// One stored type.
#[derive(Clone, Debug, Default)]
pub struct TypeRow {
    pub flags: TypeFlags,
    pub object_flags: ObjectFlags,
    pub symbol: Option<SymbolId>,
    pub alias_symbol: Option<SymbolId>,
    pub alias_type_args: SmallVec<[TypeId; 2]>,
    pub data: TypeData,
}

/// Append-only type storage.
///
/// Rows are added through `&self`; existing rows are never modified, so
/// readers always see a consistent table.
pub struct TypeTable {
    rows: RwLock<Vec<TypeRow>>,
    /// Interning cache for unions created after construction (nullability
    /// stripping). Identity of equal member lists must be stable, otherwise
    /// `lhs == rhs` fast paths in the checker would miss.
    union_cache: DashMap<Vec<TypeId>, TypeId>,
}

impl Default for TypeTable {
    fn default() -> Self {
        Self::new()
    }
}

fn intrinsic_row(flags: TypeFlags) -> TypeRow {
    TypeRow {
        flags,
        ..TypeRow::default()
    }
}

impl TypeTable {
    /// Create a table with the intrinsic types preallocated at their
    /// `TypeId` constants.
    pub fn new() -> Self {
        let rows = vec![
            intrinsic_row(TypeFlags::ANY),
            intrinsic_row(TypeFlags::UNKNOWN),
            intrinsic_row(TypeFlags::NUMBER),
            intrinsic_row(TypeFlags::STRING),
            intrinsic_row(TypeFlags::BOOLEAN),
            intrinsic_row(TypeFlags::BIGINT),
            intrinsic_row(TypeFlags::NULL),
            intrinsic_row(TypeFlags::UNDEFINED),
            intrinsic_row(TypeFlags::VOID),
            intrinsic_row(TypeFlags::NEVER),
            intrinsic_row(TypeFlags::NON_PRIMITIVE),
        ];
        debug_assert_eq!(rows.len(), TypeId::NON_PRIMITIVE.0 as usize + 1);
        Self {
            rows: RwLock::new(rows),
            union_cache: DashMap::new(),
        }
    }

    /// Get or create the union of `members`, preserving member order.
    ///
    /// Member lists are interned: two calls with the same list return the
    /// same `TypeId`.
    pub fn intern_union(&self, members: Vec<TypeId>) -> TypeId {
        if let Some(existing) = self.union_cache.get(&members) {
            return *existing;
        }
        let id = self.add(TypeRow {
            flags: TypeFlags::UNION,
            data: TypeData::Union(members.clone()),
            ..TypeRow::default()
        });
        self.union_cache.insert(members, id);
        id
    }

    /// Record an already-built union row in the interning cache so later
    /// `intern_union` calls with the same members resolve to it.
    pub fn register_union(&self, id: TypeId) {
        if let Some(members) = self.union_members(id) {
            self.union_cache.entry(members).or_insert(id);
        }
    }

    /// Add a row and return its id.
    pub fn add(&self, row: TypeRow) -> TypeId {
        let mut rows = self.rows.write().expect("type table lock poisoned");
        let id = TypeId(rows.len() as u32);
        rows.push(row);
        id
    }

    /// Clone out a row. Rows are small; the checker reads them by value.
    pub fn row(&self, id: TypeId) -> TypeRow {
        self.rows.read().expect("type table lock poisoned")[id.0 as usize].clone()
    }

    pub fn flags(&self, id: TypeId) -> TypeFlags {
        self.rows.read().expect("type table lock poisoned")[id.0 as usize].flags
    }

    pub fn object_flags(&self, id: TypeId) -> ObjectFlags {
        self.rows.read().expect("type table lock poisoned")[id.0 as usize].object_flags
    }

    pub fn symbol(&self, id: TypeId) -> Option<SymbolId> {
        self.rows.read().expect("type table lock poisoned")[id.0 as usize].symbol
    }

    pub fn alias_symbol(&self, id: TypeId) -> Option<SymbolId> {
        self.rows.read().expect("type table lock poisoned")[id.0 as usize].alias_symbol
    }

    pub fn alias_type_args(&self, id: TypeId) -> SmallVec<[TypeId; 2]> {
        self.rows.read().expect("type table lock poisoned")[id.0 as usize]
            .alias_type_args
            .clone()
    }

    /// Union members, if the type is a union.
    pub fn union_members(&self, id: TypeId) -> Option<Vec<TypeId>> {
        match &self.rows.read().expect("type table lock poisoned")[id.0 as usize].data {
            TypeData::Union(members) => Some(members.clone()),
            _ => None,
        }
    }

    /// Union or intersection members.
    pub fn composite_members(&self, id: TypeId) -> Option<Vec<TypeId>> {
        match &self.rows.read().expect("type table lock poisoned")[id.0 as usize].data {
            TypeData::Union(members) | TypeData::Intersection(members) => Some(members.clone()),
            _ => None,
        }
    }

    pub fn is_union(&self, id: TypeId) -> bool {
        self.flags(id).contains(TypeFlags::UNION)
    }

    pub fn is_union_or_intersection(&self, id: TypeId) -> bool {
        self.flags(id).intersects(TypeFlags::UNION_OR_INTERSECTION)
    }

    /// Reference target and arguments, if the type is a reference.
    pub fn reference_parts(&self, id: TypeId) -> Option<(TypeId, SmallVec<[TypeId; 2]>)> {
        match &self.rows.read().expect("type table lock poisoned")[id.0 as usize].data {
            TypeData::Reference { target, type_args } => Some((*target, type_args.clone())),
            _ => None,
        }
    }

    /// Type arguments of a reference type; empty otherwise.
    pub fn type_arguments(&self, id: TypeId) -> SmallVec<[TypeId; 2]> {
        self.reference_parts(id)
            .map(|(_, args)| args)
            .unwrap_or_default()
    }

    /// Number of type parameters on a declared generic type.
    pub fn type_param_count(&self, id: TypeId) -> u8 {
        match &self.rows.read().expect("type table lock poisoned")[id.0 as usize].data {
            TypeData::Object {
                type_param_count, ..
            } => *type_param_count,
            _ => 0,
        }
    }

    /// Call signatures of the type. References delegate to their target.
    pub fn call_signatures(&self, id: TypeId) -> Vec<CallSignature> {
        let data = self.rows.read().expect("type table lock poisoned")[id.0 as usize]
            .data
            .clone();
        match data {
            TypeData::Object {
                call_signatures, ..
            } => call_signatures.to_vec(),
            TypeData::Reference { target, .. } => self.call_signatures(target),
            _ => Vec::new(),
        }
    }

    /// Constraint of a type parameter, if declared.
    pub fn type_param_constraint(&self, id: TypeId) -> Option<TypeId> {
        match &self.rows.read().expect("type table lock poisoned")[id.0 as usize].data {
            TypeData::TypeParameter { constraint } => *constraint,
            _ => None,
        }
    }

    /// Whether the type is a class or interface declared type (after no
    /// reference reduction; callers reduce first when needed).
    pub fn is_class_or_interface(&self, id: TypeId) -> bool {
        self.object_flags(id)
            .intersects(ObjectFlags::CLASS_OR_INTERFACE)
    }

    pub fn is_class(&self, id: TypeId) -> bool {
        self.object_flags(id).contains(ObjectFlags::CLASS)
    }

    pub fn len(&self) -> usize {
        self.rows.read().expect("type table lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intrinsics_are_preallocated() {
        let table = TypeTable::new();
        assert!(table.flags(TypeId::ANY).contains(TypeFlags::ANY));
        assert!(table.flags(TypeId::NUMBER).contains(TypeFlags::NUMBER));
        assert!(table
            .flags(TypeId::NON_PRIMITIVE)
            .contains(TypeFlags::NON_PRIMITIVE));
    }

    #[test]
    fn union_members_preserve_order() {
        let table = TypeTable::new();
        let union = table.add(TypeRow {
            flags: TypeFlags::UNION,
            data: TypeData::Union(vec![TypeId::STRING, TypeId::NUMBER]),
            ..TypeRow::default()
        });
        assert_eq!(
            table.union_members(union),
            Some(vec![TypeId::STRING, TypeId::NUMBER])
        );
    }

    #[test]
    fn reference_delegates_call_signatures() {
        let table = TypeTable::new();
        let target = table.add(TypeRow {
            flags: TypeFlags::OBJECT,
            object_flags: ObjectFlags::INTERFACE,
            data: TypeData::Object {
                call_signatures: smallvec::smallvec![CallSignature {
                    declaration: None,
                    has_return_type_annotation: true,
                }],
                type_param_count: 0,
            },
            ..TypeRow::default()
        });
        let reference = table.add(TypeRow {
            flags: TypeFlags::OBJECT,
            object_flags: ObjectFlags::REFERENCE,
            data: TypeData::Reference {
                target,
                type_args: SmallVec::new(),
            },
            ..TypeRow::default()
        });
        assert_eq!(table.call_signatures(reference).len(), 1);
    }
}
