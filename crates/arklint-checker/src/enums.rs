//! Enum member initializer validation.
//!
//! The restricted language only admits compile-time constant enum
//! initializers: literals, const variables, other enum members, and a
//! limited operator set over those.

use crate::session::CheckSession;
use arklint_sema::ast::{BinaryOp, NodeId, NodeKind, TypeKeyword, UnaryOp};
use arklint_sema::ConstantValue;

impl CheckSession<'_> {
    /// Whether the expression (an enum member initializer) is valid: either
    /// the member already has a computed constant value, or the expression
    /// is a compile-time constant.
    pub fn is_valid_enum_member_init(&self, expr: NodeId) -> bool {
        if let Some(member) = self.model.arena().parent(expr) {
            if self.is_number_constant_value(member) {
                return true;
            }
            if self.is_string_constant_value(member) {
                return true;
            }
        }
        self.is_compile_time_expression(expr)
    }

    /// Whether the node has a numeric compile-time value.
    pub fn is_number_constant_value(&self, node: NodeId) -> bool {
        if self.model.arena().is_numeric_literal(node) {
            return true;
        }
        matches!(self.model.constant_value(node), Some(ConstantValue::Number(_)))
    }

    /// Whether the node has an integral numeric compile-time value.
    pub fn is_integer_constant_value(&self, node: NodeId) -> bool {
        let value = match self.model.arena().numeric_value(node) {
            Some(value) => Some(value),
            None => match self.model.constant_value(node) {
                Some(ConstantValue::Number(value)) => Some(value),
                _ => None,
            },
        };
        value.is_some_and(|v| v.fract() == 0.0)
    }

    /// Whether the node has a string compile-time value.
    pub fn is_string_constant_value(&self, node: NodeId) -> bool {
        matches!(self.model.constant_value(node), Some(ConstantValue::Str(_)))
    }

    /// Compile-time constant expression walk.
    pub fn is_compile_time_expression(&self, expr: NodeId) -> bool {
        let arena = self.model.arena();
        match arena.kind(expr) {
            NodeKind::ParenExpr { expression } => self.is_compile_time_expression(*expression),
            NodeKind::AsExpr(as_expr)
                if matches!(
                    arena.kind(as_expr.type_node),
                    NodeKind::KeywordTypeNode {
                        keyword: TypeKeyword::Number
                    }
                ) =>
            {
                self.is_compile_time_expression(as_expr.expression)
            }
            NodeKind::PrefixUnaryExpr(unary) => {
                Self::is_unary_op_allowed_for_enum_init(unary.op)
                    && self.is_compile_time_expression(unary.operand)
            }
            NodeKind::BinaryExpr(bin) => {
                Self::is_binary_op_allowed_for_enum_init(bin.op)
                    && self.is_compile_time_expression(bin.left)
                    && self.is_compile_time_expression(bin.right)
            }
            NodeKind::ConditionalExpr(cond) => {
                self.is_compile_time_expression(cond.when_true)
                    && self.is_compile_time_expression(cond.when_false)
            }
            NodeKind::Identifier { .. } => self.is_identifier_valid_enum_member_init(expr),
            NodeKind::NumericLiteral { .. } | NodeKind::StringLiteral { .. } => true,
            NodeKind::PropertyAccess(_) => self.is_compile_time_property_access(expr),
            _ => false,
        }
    }

    fn is_identifier_valid_enum_member_init(&self, expr: NodeId) -> bool {
        let symbol = self.true_symbol_at_location(expr);
        let Some(decl) = symbol.and_then(|sym| self.declaration_of(sym)) else {
            return false;
        };
        let arena = self.model.arena();
        (self.is_var_declaration(decl) && self.is_const(decl))
            || matches!(arena.kind(decl), NodeKind::EnumMember(_))
    }

    /// A property access is constant when its value is already computed, or
    /// when it names a member of another enum declaration.
    fn is_compile_time_property_access(&self, expr: NodeId) -> bool {
        if self.is_number_constant_value(expr) {
            return true;
        }
        let Some(access) = self.model.arena().property_access(expr) else {
            return false;
        };
        let Some(lhs_symbol) = self.true_symbol_at_location(access.expression) else {
            return false;
        };
        let decls = self.model.symbols().declarations(lhs_symbol);
        if decls.len() != 1 {
            return false;
        }
        self.model.arena().is_enum_decl(decls[0])
    }

    fn is_unary_op_allowed_for_enum_init(op: UnaryOp) -> bool {
        matches!(op, UnaryOp::Plus | UnaryOp::Minus | UnaryOp::Tilde)
    }

    fn is_binary_op_allowed_for_enum_init(op: BinaryOp) -> bool {
        matches!(
            op,
            BinaryOp::Mul
                | BinaryOp::Div
                | BinaryOp::Rem
                | BinaryOp::Sub
                | BinaryOp::Add
                | BinaryOp::Shl
                | BinaryOp::Shr
                | BinaryOp::Ushr
                | BinaryOp::BitOr
                | BinaryOp::BitAnd
                | BinaryOp::BitXor
                | BinaryOp::LogicalOr
                | BinaryOp::LogicalAnd
        )
    }
}
