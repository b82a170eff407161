//! Type classification predicates.
//!
//! Pure, referentially-transparent queries over resolved types and symbols.
//! Union handling is conjunctive unless noted otherwise: a "-like" check
//! holds for a union only when it holds for every member.

use crate::config::TYPED_ARRAYS;
use crate::session::{CheckSession, TypePredicate};
use arklint_sema::{ObjectFlags, SymbolFlags, SymbolId, TypeFlags, TypeId};

impl CheckSession<'_> {
    /// Reduce an instantiated reference to its generic target.
    pub fn reduce_reference(&self, ty: TypeId) -> TypeId {
        match self.model.types().reference_parts(ty) {
            Some((target, _)) if target != ty => target,
            _ => ty,
        }
    }

    /// Whether the type is an instantiated reference.
    pub fn is_type_reference(&self, ty: TypeId) -> bool {
        let types = self.model.types();
        types.flags(ty).contains(TypeFlags::OBJECT)
            && types.object_flags(ty).contains(ObjectFlags::REFERENCE)
    }

    /// Number-like: the type itself, or every member of a union, carries a
    /// number-like flag.
    pub fn is_number_like_type(&self, ty: TypeId) -> bool {
        let types = self.model.types();
        if let Some(members) = types.union_members(ty) {
            return members
                .iter()
                .all(|&m| types.flags(m).intersects(TypeFlags::NUMBER_LIKE));
        }
        types.flags(ty).intersects(TypeFlags::NUMBER_LIKE)
    }

    /// Boolean-like flag check.
    pub fn is_boolean_like_type(&self, ty: TypeId) -> bool {
        self.model
            .types()
            .flags(ty)
            .intersects(TypeFlags::BOOLEAN_LIKE)
    }

    /// Primitive means boolean or number (literal forms included). `string`
    /// is deliberately not primitive here: the restricted language treats
    /// strings as reference types.
    pub fn is_primitive_type(&self, ty: TypeId) -> bool {
        self.model.types().flags(ty).intersects(
            TypeFlags::BOOLEAN
                | TypeFlags::BOOLEAN_LITERAL
                | TypeFlags::NUMBER
                | TypeFlags::NUMBER_LITERAL,
        )
    }

    /// Enum type: either the backing symbol is an enum (`typeof E` case) or
    /// the type itself carries enum flags.
    pub fn is_enum_type(&self, ty: TypeId) -> bool {
        let types = self.model.types();
        let symbol_is_enum = types
            .symbol(ty)
            .is_some_and(|sym| self.is_enum_symbol(sym));
        symbol_is_enum
            || types
                .flags(ty)
                .intersects(TypeFlags::ENUM | TypeFlags::ENUM_LITERAL)
    }

    pub fn is_enum_symbol(&self, symbol: SymbolId) -> bool {
        self.model
            .symbols()
            .flags(symbol)
            .contains(SymbolFlags::ENUM)
    }

    /// Const enums carry exactly the const-enum flag.
    pub fn is_const_enum_symbol(&self, symbol: Option<SymbolId>) -> bool {
        symbol.is_some_and(|sym| self.model.symbols().flags(sym) == SymbolFlags::CONST_ENUM)
    }

    /// Class or interface symbol.
    pub fn is_type_symbol(&self, symbol: Option<SymbolId>) -> bool {
        symbol.is_some_and(|sym| {
            self.model
                .symbols()
                .flags(sym)
                .intersects(SymbolFlags::CLASS | SymbolFlags::INTERFACE)
        })
    }

    pub fn is_prototype_symbol(&self, symbol: Option<SymbolId>) -> bool {
        symbol.is_some_and(|sym| {
            self.model
                .symbols()
                .flags(sym)
                .contains(SymbolFlags::PROTOTYPE)
        })
    }

    pub fn is_function_symbol(&self, symbol: Option<SymbolId>) -> bool {
        symbol.is_some_and(|sym| {
            self.model
                .symbols()
                .flags(sym)
                .contains(SymbolFlags::FUNCTION)
        })
    }

    /// Method symbol introduced through an assignment.
    pub fn is_method_assignment(&self, symbol: Option<SymbolId>) -> bool {
        symbol.is_some_and(|sym| {
            let flags = self.model.symbols().flags(sym);
            flags.contains(SymbolFlags::METHOD) && flags.contains(SymbolFlags::ASSIGNMENT)
        })
    }

    /// Interface type, judged by the backing symbol.
    pub fn is_interface_type(&self, ty: Option<TypeId>) -> bool {
        ty.and_then(|t| self.model.types().symbol(t))
            .is_some_and(|sym| {
                self.model
                    .symbols()
                    .flags(sym)
                    .contains(SymbolFlags::INTERFACE)
            })
    }

    pub fn is_any_type(&self, ty: TypeId) -> bool {
        self.model.types().flags(ty).contains(TypeFlags::ANY)
    }

    pub fn is_unknown_type(&self, ty: TypeId) -> bool {
        self.model.types().flags(ty).contains(TypeFlags::UNKNOWN)
    }

    /// Types the restricted language cannot express: `any`, `unknown`, and
    /// intersections.
    pub fn is_unsupported_type(&self, ty: TypeId) -> bool {
        self.model
            .types()
            .flags(ty)
            .intersects(TypeFlags::ANY | TypeFlags::UNKNOWN | TypeFlags::INTERSECTION)
    }

    /// The `object` keyword type.
    pub fn is_intrinsic_object_type(&self, ty: TypeId) -> bool {
        self.model
            .types()
            .flags(ty)
            .contains(TypeFlags::NON_PRIMITIVE)
    }

    /// Union with a `null` or `undefined` member.
    pub fn is_nullable_union_type(&self, ty: TypeId) -> bool {
        let types = self.model.types();
        types.union_members(ty).is_some_and(|members| {
            members
                .iter()
                .any(|&m| types.flags(m).intersects(TypeFlags::NULLABLE))
        })
    }

    /// Strip `null`/`undefined` union members.
    pub fn get_non_nullable_type(&self, ty: TypeId) -> TypeId {
        self.model.non_nullable(ty)
    }

    pub fn is_object_flag_type(&self, ty: TypeId) -> bool {
        self.model.types().flags(ty).contains(TypeFlags::OBJECT)
    }

    /// Anonymous object type; for unions/intersections, any member.
    pub fn is_anonymous_type(&self, ty: TypeId) -> bool {
        let types = self.model.types();
        if let Some(members) = types.composite_members(ty) {
            return members.iter().any(|&m| self.is_anonymous_type(m));
        }
        types.flags(ty).contains(TypeFlags::OBJECT)
            && types.object_flags(ty).contains(ObjectFlags::ANONYMOUS)
    }

    /// Anonymous class-valued type (the value side of a class expression).
    pub fn is_class_value_type(&self, ty: TypeId) -> bool {
        let types = self.model.types();
        if !types.flags(ty).contains(TypeFlags::OBJECT)
            || !types.object_flags(ty).contains(ObjectFlags::ANONYMOUS)
        {
            return false;
        }
        types.symbol(ty).is_some_and(|sym| {
            self.model.symbols().flags(sym).contains(SymbolFlags::CLASS)
        })
    }

    /// Whether the type has at least one call signature.
    pub fn is_functional_type(&self, ty: TypeId) -> bool {
        !self.model.types().call_signatures(ty).is_empty()
    }

    // -------------------------------------------------------------------------
    // The built-in Array family
    // -------------------------------------------------------------------------

    /// Generic `Array<T>` from the standard library: a reference with one
    /// type argument to a one-parameter global `Array` target.
    pub fn is_generic_array_type(&self, ty: TypeId) -> bool {
        self.is_global_generic_named(ty, "Array")
    }

    /// `ReadonlyArray<T>` from the standard library.
    pub fn is_readonly_array_type(&self, ty: TypeId) -> bool {
        self.is_global_generic_named(ty, "ReadonlyArray")
    }

    fn is_global_generic_named(&self, ty: TypeId, name: &str) -> bool {
        let types = self.model.types();
        let Some((target, args)) = types.reference_parts(ty) else {
            return false;
        };
        if args.len() != 1 || types.type_param_count(target) != 1 {
            return false;
        }
        let Some(symbol) = types.symbol(ty) else {
            return false;
        };
        self.atom_eq(self.symbol_name(symbol), name) && self.is_global_symbol(symbol)
    }

    /// One of the built-in typed-array classes, in global scope.
    pub fn is_typed_array(&self, ty: TypeId) -> bool {
        let Some(symbol) = self.model.types().symbol(ty) else {
            return false;
        };
        let name = self.model.fully_qualified_name(symbol);
        self.is_global_symbol(symbol) && TYPED_ARRAYS.contains(&name.as_str())
    }

    /// Any member of the built-in array family.
    pub fn is_array(&self, ty: TypeId) -> bool {
        self.is_generic_array_type(ty) || self.is_readonly_array_type(ty) || self.is_typed_array(ty)
    }

    /// Tuple: a reference flagged as tuple.
    pub fn is_tuple(&self, ty: TypeId) -> bool {
        let types = self.model.types();
        self.is_type_reference(ty) && types.object_flags(ty).contains(ObjectFlags::TUPLE)
    }

    /// `string`, or the global `String` reference type.
    pub fn is_string_type(&self, ty: TypeId) -> bool {
        let types = self.model.types();
        if types.flags(ty).contains(TypeFlags::STRING) {
            return true;
        }
        if !self.is_type_reference(ty) {
            return false;
        }
        let Some(symbol) = types.symbol(ty) else {
            return false;
        };
        self.model.fully_qualified_name(symbol) == "String" && self.is_global_symbol(symbol)
    }

    // -------------------------------------------------------------------------
    // Composite walks
    // -------------------------------------------------------------------------

    /// Disjunctive scan over a union/intersection: does any leaf satisfy the
    /// predicate?
    pub fn check_type_set(&self, ty: TypeId, predicate: TypePredicate) -> bool {
        let types = self.model.types();
        let Some(members) = types.composite_members(ty) else {
            return predicate(self, ty);
        };
        members.iter().any(|&m| self.check_type_set(m, predicate))
    }

    /// Whether the type transitively mentions a type parameter (through
    /// union/intersection members or reference type arguments).
    pub fn has_generic_type_parameter(&self, ty: TypeId) -> bool {
        let types = self.model.types();
        if let Some(members) = types.composite_members(ty) {
            return members.iter().any(|&m| self.has_generic_type_parameter(m));
        }
        if self.is_type_reference(ty) {
            return self
                .model
                .type_arguments(ty)
                .iter()
                .any(|&arg| self.has_generic_type_parameter(arg));
        }
        types.flags(ty).contains(TypeFlags::TYPE_PARAMETER)
    }

    /// The universal `Object` supertype: the global `Object` class/interface
    /// or the `object` keyword type.
    pub fn is_object(&self, ty: TypeId) -> bool {
        let types = self.model.types();
        if let Some(symbol) = types.symbol(ty) {
            if types.is_class_or_interface(self.reduce_reference(ty))
                && self.atom_eq(self.symbol_name(symbol), "Object")
            {
                return true;
            }
        }
        types.flags(ty).contains(TypeFlags::NON_PRIMITIVE)
    }

    /// Whether a call expression resolved to a signature with no declared
    /// return type.
    pub fn is_call_to_function_with_omitted_return_type(
        &self,
        expr: arklint_sema::NodeId,
    ) -> bool {
        if self.model.arena().call_expr(expr).is_none() {
            return false;
        }
        match self.model.resolved_call_signature(expr) {
            Some(signature) => match signature.declaration {
                Some(_) => !signature.has_return_type_annotation,
                // Unknown signature: no declaration to carry a return type.
                None => true,
            },
            None => false,
        }
    }
}
