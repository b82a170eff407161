//! Structural compatibility engine.
//!
//! Decides when two class/interface types need a field-level structural
//! check because inheritance does not relate them, and whether an object
//! literal may initialize a value of a target type. Object literals are only
//! trusted to become a class/interface when that target is a plain,
//! trivially-constructible data shape; anything else would let a literal
//! bypass constructor invariants.

use crate::session::{CheckSession, TypePredicate};
use arklint_common::Atom;
use arklint_sema::ast::{HeritageClause, NodeId, NodeKind, PropertyAssignment};
use arklint_sema::{ModifierFlags, SymbolFlags, SymbolId, TypeId};
use rustc_hash::FxHashSet;
use tracing::trace;

impl CheckSession<'_> {
    // -------------------------------------------------------------------------
    // Inheritance relation
    // -------------------------------------------------------------------------

    /// Whether `type_a` is `type_b`, or a subtype of it through heritage
    /// clauses. Reflexive; `Object` is everyone's supertype. Heritage cycles
    /// terminate as "not related".
    pub fn related_by_inheritance_or_identical(&self, type_a: TypeId, type_b: TypeId) -> bool {
        let mut visited = FxHashSet::default();
        self.related_by_inheritance_rec(type_a, type_b, &mut visited)
    }

    fn related_by_inheritance_rec(
        &self,
        type_a: TypeId,
        type_b: TypeId,
        visited: &mut FxHashSet<TypeId>,
    ) -> bool {
        let type_a = self.reduce_reference(type_a);
        let type_b = self.reduce_reference(type_b);

        if type_a == type_b || self.is_object(type_b) {
            return true;
        }
        if !visited.insert(type_a) {
            return false;
        }
        let Some(symbol) = self.model.types().symbol(type_a) else {
            return false;
        };

        let a_is_class = self.model.types().is_class(type_a);
        for &decl in self.model.symbols().declarations(symbol) {
            let clauses = match self.model.arena().kind(decl) {
                NodeKind::ClassDecl(class) => &class.heritage,
                NodeKind::InterfaceDecl(interface) => &interface.heritage,
                _ => continue,
            };
            for clause in clauses {
                // A class's `extends` names its base class; every other
                // clause names interfaces. Entries of the wrong role are
                // skipped.
                let process_interfaces = if a_is_class {
                    clause.token != arklint_sema::HeritageToken::Extends
                } else {
                    true
                };
                if self.process_parent_types(clause, type_b, process_interfaces, visited) {
                    return true;
                }
            }
        }
        false
    }

    fn process_parent_types(
        &self,
        clause: &HeritageClause,
        type_b: TypeId,
        process_interfaces: bool,
        visited: &mut FxHashSet<TypeId>,
    ) -> bool {
        for &base_expr in &clause.types {
            let base = self.reduce_reference(self.model.type_at_location(base_expr));
            if self.model.types().is_class(base) != process_interfaces
                && self.related_by_inheritance_rec(base, type_b, visited)
            {
                return true;
            }
        }
        false
    }

    /// Whether the type, or any type it derives from through heritage,
    /// satisfies the predicate. The visited set caps recursion on heritage
    /// cycles.
    pub fn is_or_derived_from(&self, ty: TypeId, predicate: TypePredicate) -> bool {
        let mut visited = FxHashSet::default();
        self.is_or_derived_from_rec(ty, predicate, &mut visited)
    }

    fn is_or_derived_from_rec(
        &self,
        ty: TypeId,
        predicate: TypePredicate,
        visited: &mut FxHashSet<TypeId>,
    ) -> bool {
        let ty = self.reduce_reference(ty);
        if predicate(self, ty) {
            return true;
        }
        let Some(symbol) = self.model.types().symbol(ty) else {
            return false;
        };
        visited.insert(ty);

        for &decl in self.model.symbols().declarations(symbol) {
            let clauses = match self.model.arena().kind(decl) {
                NodeKind::ClassDecl(class) => &class.heritage,
                NodeKind::InterfaceDecl(interface) => &interface.heritage,
                _ => continue,
            };
            for clause in clauses {
                for &base_expr in &clause.types {
                    let base = self.reduce_reference(self.model.type_at_location(base_expr));
                    if !visited.contains(&base)
                        && self.is_or_derived_from_rec(base, predicate, visited)
                    {
                        return true;
                    }
                }
            }
        }
        false
    }

    // -------------------------------------------------------------------------
    // Structural identity deduction
    // -------------------------------------------------------------------------

    /// Whether assigning `rhs_expr` (of `rhs_type`) to a target of
    /// `lhs_type` requires a field-level structural check because the two
    /// class/interface types are not related by inheritance.
    pub fn need_to_deduce_structural_identity(
        &self,
        lhs_type: TypeId,
        rhs_type: TypeId,
        rhs_expr: NodeId,
    ) -> bool {
        let lhs_type = self.get_non_nullable_type(lhs_type);
        let rhs_type = self.get_non_nullable_type(rhs_type);
        if self.is_library_type(lhs_type) {
            return false;
        }
        if self.is_dynamic_object_assigned_to_std_type(lhs_type, rhs_expr) {
            return false;
        }
        // Functions are compatible by signature; no structural field check.
        if self.are_compatible_functionals(lhs_type, rhs_type) {
            return false;
        }
        let types = self.model.types();
        if types.is_union(rhs_type) || types.is_union(lhs_type) {
            return self.need_to_deduce_handle_unions(lhs_type, rhs_type, rhs_expr);
        }
        if self.options.advanced_class_checks
            && self.is_class_value_type(rhs_type)
            && lhs_type != rhs_type
            && !self.is_object_flag_type(lhs_type)
        {
            // Anonymous class value against a different non-object target:
            // conservatively require deduction.
            return true;
        }
        let result = types.is_class_or_interface(lhs_type)
            && types.is_class_or_interface(rhs_type)
            && !self.related_by_inheritance_or_identical(rhs_type, lhs_type);
        trace!(
            lhs = lhs_type.0,
            rhs = rhs_type.0,
            result,
            "need_to_deduce_structural_identity"
        );
        result
    }

    /// Union asymmetry: a RHS union forces deduction as soon as one member
    /// needs it (every member must fit the target); a LHS union requires it
    /// only when every member does (the value needs just one accommodating
    /// branch).
    fn need_to_deduce_handle_unions(
        &self,
        lhs_type: TypeId,
        rhs_type: TypeId,
        rhs_expr: NodeId,
    ) -> bool {
        let types = self.model.types();
        if let Some(members) = types.union_members(rhs_type) {
            return members
                .iter()
                .any(|&m| self.need_to_deduce_structural_identity(lhs_type, m, rhs_expr));
        }
        if let Some(members) = types.union_members(lhs_type) {
            return members
                .iter()
                .all(|&m| self.need_to_deduce_structural_identity(m, rhs_type, rhs_expr));
        }
        false
    }

    fn are_compatible_functionals(&self, lhs_type: TypeId, rhs_type: TypeId) -> bool {
        (self.is_std_function_type(lhs_type) || self.is_functional_type(lhs_type))
            && (self.is_std_function_type(rhs_type) || self.is_functional_type(rhs_type))
    }

    /// Dynamic data flowing into a standard-library or primitive target is
    /// trusted; interop coercion handles it.
    pub fn is_dynamic_object_assigned_to_std_type(&self, lhs_type: TypeId, rhs_expr: NodeId) -> bool {
        if !self.is_std_library_type(lhs_type) && !self.is_primitive_type(lhs_type) {
            return false;
        }
        let rhs_symbol = if self.model.arena().call_expr(rhs_expr).is_some() {
            self.symbol_of_call_expression(rhs_expr)
        } else {
            self.true_symbol_at_location(rhs_expr)
        };
        rhs_symbol.is_some() && self.is_library_symbol(rhs_symbol)
    }

    // -------------------------------------------------------------------------
    // Object literal validation
    // -------------------------------------------------------------------------

    /// Whether an object literal may initialize a value of `lhs_type`.
    pub fn is_object_literal_assignable(&self, lhs_type: Option<TypeId>, rhs_expr: NodeId) -> bool {
        let Some(lhs_type) = lhs_type else {
            return false;
        };
        // Always check against the non-nullable variant of the target.
        let mut lhs_type = self.get_non_nullable_type(lhs_type);
        if let Some(members) = self.model.types().union_members(lhs_type) {
            if members
                .iter()
                .any(|&m| self.is_object_literal_assignable(Some(m), rhs_expr))
            {
                return true;
            }
        }

        // Library-owned targets accept anything; interop is trusted.
        if self.is_any_type(lhs_type) || self.is_library_type(lhs_type) {
            return true;
        }
        // Dynamic data into a standard/primitive target is likewise trusted.
        if self.is_dynamic_object_assigned_to_std_type(lhs_type, rhs_expr) {
            return true;
        }
        // Partial<T> / Required<T> / Readonly<T>: validate against T.
        if self.is_std_partial_type(lhs_type)
            || self.is_std_required_type(lhs_type)
            || self.is_std_readonly_type(lhs_type)
        {
            let args = self.model.types().alias_type_args(lhs_type);
            if args.len() == 1 {
                lhs_type = args[0];
            } else {
                return false;
            }
        }

        // Record accepts any value type, but keys must be literal-like.
        if self.is_std_record_type(lhs_type) {
            return self.validate_record_object_keys(rhs_expr);
        }
        self.validate_object_literal_type(lhs_type)
            && !self.has_methods(lhs_type)
            && self.validate_fields(lhs_type, rhs_expr)
    }

    /// The target must be a concrete class/interface with an implicit or
    /// truly-empty default constructor, no readonly fields, and no abstract
    /// modifier.
    pub fn validate_object_literal_type(&self, ty: TypeId) -> bool {
        let ty = self.reduce_reference(ty);
        self.model.types().is_class_or_interface(ty)
            && self.has_default_ctor(ty)
            && !self.has_readonly_fields(ty)
            && !self.is_abstract_class(ty)
    }

    fn has_readonly_fields(&self, ty: TypeId) -> bool {
        let Some(symbol) = self.model.types().symbol(ty) else {
            return false;
        };
        for &member in self.model.symbols().members(symbol) {
            let Some(decl) = self.model.symbols().first_declaration(member) else {
                continue;
            };
            if let Some(prop) = self.model.arena().property_decl(decl) {
                if prop.modifiers.contains(ModifierFlags::READONLY) {
                    return true;
                }
            }
        }
        false
    }

    fn has_default_ctor(&self, ty: TypeId) -> bool {
        let Some(symbol) = self.model.types().symbol(ty) else {
            // No symbol, no explicit constructors.
            return true;
        };
        let mut has_ctor = false;
        let mut has_default_ctor = false;
        for &member in self.model.symbols().members(symbol) {
            if !self
                .model
                .symbols()
                .flags(member)
                .contains(SymbolFlags::CONSTRUCTOR)
            {
                continue;
            }
            has_ctor = true;
            if let Some(decl) = self.model.symbols().first_declaration(member) {
                if let Some(ctor) = self.model.arena().constructor_decl(decl) {
                    if ctor.params.is_empty() {
                        has_default_ctor = true;
                    }
                }
            }
        }
        // No explicit constructor means the implicit default one.
        !has_ctor || has_default_ctor
    }

    fn is_abstract_class(&self, ty: TypeId) -> bool {
        if !self.model.types().is_class(ty) {
            return false;
        }
        let Some(symbol) = self.model.types().symbol(ty) else {
            return false;
        };
        let Some(decl) = self.model.symbols().first_declaration(symbol) else {
            return false;
        };
        self.model
            .arena()
            .class_decl(decl)
            .is_some_and(|class| class.modifiers.contains(ModifierFlags::ABSTRACT))
    }

    /// Whether the type exposes any method among its apparent properties.
    pub fn has_methods(&self, ty: TypeId) -> bool {
        self.model.properties_of_type(ty).iter().any(|&prop| {
            self.model
                .symbols()
                .flags(prop)
                .contains(SymbolFlags::METHOD)
        })
    }

    /// Find an apparent property by unescaped name.
    pub fn find_property(&self, ty: TypeId, name: Atom) -> Option<SymbolId> {
        self.model
            .properties_of_type(ty)
            .into_iter()
            .find(|&prop| self.model.symbols().name(prop) == name)
    }

    /// Resolve a property assignment to the matching property symbol of the
    /// target type, using the unescaped property name.
    pub fn get_property_symbol(&self, ty: TypeId, prop: &PropertyAssignment) -> Option<SymbolId> {
        let arena = self.model.arena();
        let name_atom = match self.model.symbol_at_location(prop.name) {
            Some(name_symbol) => self.model.symbols().name(name_symbol),
            None => match arena.kind(prop.name) {
                NodeKind::Identifier { text } => *text,
                NodeKind::StringLiteral { value } => *value,
                NodeKind::NumericLiteral { value } => {
                    self.model.interner().get(&format_numeric_name(*value))?
                }
                _ => return None,
            },
        };
        self.find_property(ty, name_atom)
    }

    /// Every property assignment of the literal must validate against the
    /// target's matching field.
    pub fn validate_fields(&self, object_type: TypeId, object_literal: NodeId) -> bool {
        let Some(literal) = self.model.arena().object_literal(object_literal) else {
            return false;
        };
        for &prop_id in &literal.properties {
            if let Some(prop) = self.model.arena().property_assignment(prop_id) {
                if !self.validate_field(object_type, prop) {
                    return false;
                }
            }
        }
        true
    }

    fn validate_field(&self, ty: TypeId, prop: &PropertyAssignment) -> bool {
        // Match by unescaped property name; a literal property with no
        // target field rejects the whole literal.
        let Some(prop_symbol) = self.get_property_symbol(ty, prop) else {
            return false;
        };
        if self.model.symbols().declarations(prop_symbol).is_empty() {
            return false;
        }
        let Some(prop_type) = self.model.type_of_symbol(prop_symbol) else {
            return false;
        };
        let init = self.model.arena().unwrap_parenthesized(prop.initializer);
        if self.model.arena().is_object_literal(init) {
            if !self.is_object_literal_assignable(Some(prop_type), init) {
                return false;
            }
        } else if self.need_to_deduce_structural_identity(
            prop_type,
            self.model.type_at_location(init),
            init,
        ) {
            return false;
        }
        true
    }

    // -------------------------------------------------------------------------
    // Record keys
    // -------------------------------------------------------------------------

    /// Record keys must be string/numeric literals or literal-like computed
    /// names.
    pub fn validate_record_object_keys(&self, object_literal: NodeId) -> bool {
        let Some(literal) = self.model.arena().object_literal(object_literal) else {
            return false;
        };
        let arena = self.model.arena();
        for &prop_id in &literal.properties {
            let Some(prop) = arena.property_assignment(prop_id) else {
                return false;
            };
            let name = prop.name;
            let valid_computed = matches!(arena.kind(name), NodeKind::ComputedPropertyName { .. })
                && self.is_valid_computed_property_name(name, true);
            if !arena.is_string_literal(name) && !arena.is_numeric_literal(name) && !valid_computed
            {
                return false;
            }
        }
        true
    }

    /// Computed property names are allowed for string-literal expressions
    /// and string enum members; outside Record initializers the well-known
    /// `Symbol.iterator` is also accepted.
    pub fn is_valid_computed_property_name(
        &self,
        computed: NodeId,
        is_record_object_initializer: bool,
    ) -> bool {
        let arena = self.model.arena();
        let NodeKind::ComputedPropertyName { expression } = arena.kind(computed) else {
            return false;
        };
        let expression = *expression;
        if !is_record_object_initializer {
            if let Some(symbol) = self.true_symbol_at_location(expression) {
                if self.is_symbol_iterator(symbol) {
                    return true;
                }
            }
        }
        arena.is_string_literal(expression) || self.is_enum_string_literal(expression)
    }

    /// A string-valued enum member literal.
    pub fn is_enum_string_literal(&self, expr: NodeId) -> bool {
        let is_enum_member = self
            .true_symbol_at_location(expr)
            .is_some_and(|sym| {
                self.model
                    .symbols()
                    .flags(sym)
                    .contains(SymbolFlags::ENUM_MEMBER)
            });
        let ty = self.model.type_at_location(expr);
        let is_string_enum_literal = self.is_enum_type(ty)
            && self
                .model
                .types()
                .flags(ty)
                .contains(arklint_sema::TypeFlags::STRING_LITERAL);
        is_enum_member && is_string_enum_literal
    }
}

/// Render a numeric property name the way it is written (`1`, not `1.0`).
fn format_numeric_name(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}
