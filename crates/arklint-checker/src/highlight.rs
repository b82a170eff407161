//! Diagnostic highlight ranges.
//!
//! Maps a fault kind to the exact sub-span to underline: just the `var`
//! keyword, just the operator token, just the declared name. The dispatch
//! table is immutable and built once; fault kinds without an entry (and
//! handlers that decline) fall back to the offending node's full span.

use arklint_common::{FaultId, FaultRecord, Span};
use arklint_sema::ast::{NodeArena, NodeKind, NodeOrComment};
use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;

/// Computes the highlight span for one fault kind; `None` falls back to the
/// full node span.
pub type HighlightHandler = fn(&NodeArena, NodeOrComment) -> Option<Span>;

/// Start offset of a node or comment range.
pub fn start_pos(arena: &NodeArena, node_or_comment: NodeOrComment) -> u32 {
    match node_or_comment {
        NodeOrComment::Node(node) => arena.span(node).start,
        NodeOrComment::Comment(comment) => comment.pos,
    }
}

/// End offset of a node or comment range.
pub fn end_pos(arena: &NodeArena, node_or_comment: NodeOrComment) -> u32 {
    match node_or_comment {
        NodeOrComment::Node(node) => arena.span(node).end,
        NodeOrComment::Comment(comment) => comment.end,
    }
}

/// The highlight range for a fault at a node (or comment range).
pub fn highlight_range(
    arena: &NodeArena,
    node_or_comment: NodeOrComment,
    fault_id: FaultId,
) -> Span {
    HIGHLIGHT_HANDLERS
        .get(&fault_id)
        .and_then(|handler| handler(arena, node_or_comment))
        .unwrap_or_else(|| {
            Span::new(
                start_pos(arena, node_or_comment),
                end_pos(arena, node_or_comment),
            )
        })
}

/// Build a fault record with its highlight range and append it to `faults`.
pub fn record_fault(
    arena: &NodeArena,
    faults: &mut Vec<FaultRecord>,
    node_or_comment: NodeOrComment,
    fault_id: FaultId,
) {
    let range = highlight_range(arena, node_or_comment, fault_id);
    faults.push(FaultRecord::new(fault_id, range));
}

static HIGHLIGHT_HANDLERS: Lazy<FxHashMap<FaultId, HighlightHandler>> = Lazy::new(|| {
    let mut handlers: FxHashMap<FaultId, HighlightHandler> = FxHashMap::default();
    handlers.insert(FaultId::VarDeclaration, var_declaration_range);
    handlers.insert(
        FaultId::CatchWithUnsupportedType,
        catch_with_unsupported_type_range,
    );
    handlers.insert(FaultId::ForInStatement, for_in_statement_range);
    handlers.insert(FaultId::WithStatement, with_statement_range);
    handlers.insert(FaultId::DeleteOperator, delete_operator_range);
    handlers.insert(FaultId::TypeQuery, type_query_range);
    handlers.insert(FaultId::InstanceofUnsupported, instanceof_range);
    handlers.insert(FaultId::ConstAssertion, const_assertion_range);
    handlers.insert(
        FaultId::LimitedReturnTypeInference,
        limited_return_type_inference_range,
    );
    handlers.insert(FaultId::LocalFunction, local_function_range);
    handlers.insert(FaultId::FunctionBind, function_apply_call_range);
    handlers.insert(FaultId::FunctionApplyCall, function_apply_call_range);
    handlers.insert(FaultId::DeclWithDuplicateName, declared_name_range);
    handlers.insert(
        FaultId::ObjectLiteralNoContextType,
        opening_brace_range,
    );
    handlers.insert(FaultId::ClassExpression, class_expression_range);
    handlers.insert(FaultId::MultipleStaticBlocks, multiple_static_blocks_range);
    handlers.insert(FaultId::ParameterProperties, parameter_properties_range);
    handlers.insert(
        FaultId::SendableDefiniteAssignment,
        sendable_definite_assignment_range,
    );
    handlers.insert(FaultId::ObjectTypeLiteral, opening_brace_range);
    handlers
});

fn node_of(node_or_comment: NodeOrComment) -> Option<arklint_sema::NodeId> {
    match node_or_comment {
        NodeOrComment::Node(node) => Some(node),
        NodeOrComment::Comment(_) => None,
    }
}

/// `[start, start + len(keyword))` at the node's start.
fn keyword_range(arena: &NodeArena, node_or_comment: NodeOrComment, keyword: &str) -> Option<Span> {
    let start = start_pos(arena, node_or_comment);
    Some(Span::new(start, start + keyword.len() as u32))
}

fn var_declaration_range(arena: &NodeArena, noc: NodeOrComment) -> Option<Span> {
    keyword_range(arena, noc, "var")
}

fn catch_with_unsupported_type_range(arena: &NodeArena, noc: NodeOrComment) -> Option<Span> {
    let node = node_of(noc)?;
    match arena.kind(node) {
        NodeKind::CatchClause(clause) => clause.variable_declaration.map(|v| arena.span(v)),
        _ => None,
    }
}

fn for_in_statement_range(arena: &NodeArena, noc: NodeOrComment) -> Option<Span> {
    let node = node_of(noc)?;
    match arena.kind(node) {
        NodeKind::ForInStatement(stmt) => Some(Span::new(
            arena.span(stmt.initializer).end + 1,
            arena.span(stmt.expression).start.saturating_sub(1),
        )),
        _ => None,
    }
}

fn with_statement_range(arena: &NodeArena, noc: NodeOrComment) -> Option<Span> {
    let node = node_of(noc)?;
    match arena.kind(node) {
        NodeKind::WithStatement(stmt) => Some(Span::new(
            start_pos(arena, noc),
            arena.span(stmt.statement).start.saturating_sub(1),
        )),
        _ => None,
    }
}

fn delete_operator_range(arena: &NodeArena, noc: NodeOrComment) -> Option<Span> {
    keyword_range(arena, noc, "delete")
}

fn type_query_range(arena: &NodeArena, noc: NodeOrComment) -> Option<Span> {
    keyword_range(arena, noc, "typeof")
}

fn instanceof_range(arena: &NodeArena, noc: NodeOrComment) -> Option<Span> {
    let node = node_of(noc)?;
    match arena.kind(node) {
        NodeKind::BinaryExpr(bin) => Some(Span::new(
            bin.op_span.start,
            bin.op_span.start + "instanceof".len() as u32,
        )),
        _ => None,
    }
}

fn const_assertion_range(arena: &NodeArena, noc: NodeOrComment) -> Option<Span> {
    let node = node_of(noc)?;
    match arena.kind(node) {
        // value as const: highlight between the expression and the type.
        NodeKind::AsExpr(as_expr) => Some(Span::new(
            arena.span(as_expr.expression).end + 1,
            arena.span(as_expr.type_node).start.saturating_sub(1),
        )),
        NodeKind::TypeAssertion(assertion) => Some(Span::new(
            arena.span(assertion.expression).end + 1,
            arena.span(assertion.type_node).end + 1,
        )),
        _ => None,
    }
}

fn limited_return_type_inference_range(arena: &NodeArena, noc: NodeOrComment) -> Option<Span> {
    let node = node_of(noc)?;
    let target = match arena.kind(node) {
        // The error is about the return type, so it is present here.
        NodeKind::FunctionExpr(func) => func.return_type,
        NodeKind::FunctionDecl(func) => func.name,
        NodeKind::MethodDecl(method) => Some(method.name),
        _ => None,
    };
    target.map(|t| arena.span(t))
}

fn local_function_range(arena: &NodeArena, noc: NodeOrComment) -> Option<Span> {
    keyword_range(arena, noc, "function")
}

fn function_apply_call_range(arena: &NodeArena, noc: NodeOrComment) -> Option<Span> {
    let node = node_of(noc)?;
    match arena.kind(node) {
        // Highlight the member name after the last dot.
        NodeKind::PropertyAccess(access) => {
            Some(Span::new(access.name_span.start, arena.span(node).end))
        }
        _ => None,
    }
}

fn declared_name_range(arena: &NodeArena, noc: NodeOrComment) -> Option<Span> {
    let node = node_of(noc)?;
    let name = match arena.kind(node) {
        NodeKind::ClassDecl(class) => class.name,
        NodeKind::InterfaceDecl(interface) => Some(interface.name),
        NodeKind::EnumDecl(decl) => Some(decl.name),
        NodeKind::TypeAliasDecl(alias) => Some(alias.name),
        NodeKind::FunctionDecl(func) => func.name,
        NodeKind::VariableDecl(var) => Some(var.name),
        NodeKind::PropertyDecl(prop) => Some(prop.name),
        NodeKind::MethodDecl(method) => Some(method.name),
        _ => None,
    };
    name.map(|n| arena.span(n))
}

fn opening_brace_range(arena: &NodeArena, noc: NodeOrComment) -> Option<Span> {
    keyword_range(arena, noc, "{")
}

fn class_expression_range(arena: &NodeArena, noc: NodeOrComment) -> Option<Span> {
    keyword_range(arena, noc, "class")
}

fn multiple_static_blocks_range(arena: &NodeArena, noc: NodeOrComment) -> Option<Span> {
    keyword_range(arena, noc, "static")
}

fn parameter_properties_range(arena: &NodeArena, noc: NodeOrComment) -> Option<Span> {
    let node = node_of(noc)?;
    match arena.kind(node) {
        NodeKind::ConstructorDecl(ctor) => {
            let first = ctor.params.first()?;
            let last = ctor.params.last()?;
            Some(Span::new(arena.span(*first).start, arena.span(*last).end))
        }
        _ => None,
    }
}

fn sendable_definite_assignment_range(arena: &NodeArena, noc: NodeOrComment) -> Option<Span> {
    let node = node_of(noc)?;
    match arena.kind(node) {
        NodeKind::PropertyDecl(prop) => {
            let name_span = arena.span(prop.name);
            let end = prop.exclamation.map_or(name_span.end, |excl| excl.end);
            Some(Span::new(name_span.start, end))
        }
        _ => None,
    }
}
