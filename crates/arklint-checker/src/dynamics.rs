//! Dynamic/static origin classification.
//!
//! Library-origin ("dynamic") values obey interop rules instead of the
//! restricted-language checks. Classification of a type alone is sometimes
//! impossible: standard-library types, intrinsic objects and `any` depend on
//! the surrounding assignment context, so the type-level query answers a
//! tri-state verdict and the literal-level walk consults context until a
//! definite verdict appears.

use crate::session::CheckSession;
use arklint_sema::ast::{NodeId, NodeKind};
use arklint_sema::TypeId;
use tracing::trace;

/// Verdict of the type-level dynamic-origin query.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DynamicVerdict {
    /// Definitely library-origin.
    Dynamic,
    /// Definitely restricted-language-origin.
    Static,
    /// Cannot be decided from the type alone; the caller must consult the
    /// assignment context.
    Indeterminate,
}

impl DynamicVerdict {
    /// Whether the verdict is settled (not context-dependent).
    pub fn is_definite(self) -> bool {
        !matches!(self, DynamicVerdict::Indeterminate)
    }
}

impl CheckSession<'_> {
    /// Classify a type's origin.
    ///
    /// Unions are scanned left to right and the first `Dynamic` or
    /// `Indeterminate` member settles the answer immediately; only a union
    /// whose every member is definitely `Static` classifies `Static`. The
    /// scan order is source order, so a library member early in the union
    /// wins regardless of what follows.
    pub fn is_dynamic_type(&self, ty: TypeId) -> DynamicVerdict {
        // Strip `undefined`/`null` members before looking at the union.
        let ty = self.get_non_nullable_type(ty);

        if let Some(members) = self.model.types().union_members(ty) {
            for member in members {
                let verdict = self.is_dynamic_type(member);
                if verdict != DynamicVerdict::Static {
                    return verdict;
                }
            }
            return DynamicVerdict::Static;
        }

        if self.is_library_type(ty) {
            return DynamicVerdict::Dynamic;
        }
        if !self.is_std_library_type(ty) && !self.is_intrinsic_object_type(ty) && !self.is_any_type(ty)
        {
            return DynamicVerdict::Static;
        }
        DynamicVerdict::Indeterminate
    }

    /// Whether a nested object/array literal inherits dynamic origin from
    /// its textual context.
    ///
    /// Walks upward through enclosing literals and property assignments,
    /// consulting the contextual type at each level; the first definite
    /// verdict wins. Without one, the literal is dynamic when it is an
    /// argument to a library call (or a call on a library receiver), or the
    /// right-hand side of a property write onto a library-typed object.
    pub fn is_dynamic_literal_initializer(&self, expr: NodeId) -> bool {
        let arena = self.model.arena();
        if !arena.is_object_literal(expr) && !arena.is_array_literal(expr) {
            return false;
        }

        // Nested literals: { f: { ... } } consults the context of each
        // enclosing literal in turn.
        let mut current = expr;
        while arena.is_object_literal(current) || arena.is_array_literal(current) {
            if let Some(context_type) = self.model.contextual_type(current) {
                if !self.is_anonymous_type(context_type) {
                    let verdict = self.is_dynamic_type(context_type);
                    if verdict.is_definite() {
                        trace!(node = current.0, ?verdict, "literal context verdict");
                        return verdict == DynamicVerdict::Dynamic;
                    }
                }
            }
            let Some(parent) = arena.parent(current) else {
                return false;
            };
            current = parent;
            if matches!(arena.kind(current), NodeKind::PropertyAssignment(_)) {
                let Some(parent) = arena.parent(current) else {
                    return false;
                };
                current = parent;
            }
        }

        // Calls with literal arguments: foo({ ... }).
        if arena.call_expr(current).is_some() && self.dynamic_call_with_literal(current) {
            return true;
        }

        // Property writes with literal right-hand sides: obj.f = { ... }.
        if let Some(binary) = arena.binary_expr(current) {
            if let Some(access) = arena.property_access(binary.left) {
                let receiver_type = self.model.type_at_location(access.expression);
                return self.is_library_symbol(self.model.types().symbol(receiver_type));
            }
        }

        false
    }

    fn dynamic_call_with_literal(&self, call: NodeId) -> bool {
        let arena = self.model.arena();
        let Some(call_expr) = arena.call_expr(call) else {
            return false;
        };
        let callee_type = self.model.type_at_location(call_expr.callee);
        if self.is_any_type(callee_type) {
            return true;
        }
        if self.is_library_symbol(self.model.types().symbol(callee_type)) {
            return true;
        }
        // x.foo({ ... }) where x is exported from a library.
        if let Some(access) = arena.property_access(call_expr.callee) {
            let receiver = self.true_symbol_at_location(access.expression);
            if receiver.is_some() && self.is_library_symbol(receiver) {
                return true;
            }
        }
        false
    }
}
