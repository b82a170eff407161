//! Fault highlight ranges.

use arklint_checker::{highlight_range, record_fault, FaultId};
use arklint_common::Span;
use arklint_sema::ast::{CommentKind, CommentRange, NodeOrComment, VarDeclKind};
use arklint_sema::fixtures::Fixture;
use arklint_sema::ModifierFlags;

#[test]
fn var_declaration_highlights_exactly_the_keyword() {
    let mut f = Fixture::new();
    let name = f.b.ident(f.file, Span::new(14, 15), "x");
    let decl = f.b.variable_decl(f.file, Span::new(10, 20), name, None, None);
    f.b.variable_decl_list(f.file, Span::new(10, 20), VarDeclKind::Var, vec![decl]);
    let model = f.finish();

    let range = highlight_range(model.arena(), decl.into(), FaultId::VarDeclaration);
    assert_eq!(range, Span::new(10, 13));
    assert_eq!(range.len(), 3);
}

#[test]
fn unknown_fault_kind_falls_back_to_the_full_span() {
    let mut f = Fixture::new();
    let node = f.b.ident(f.file, Span::new(5, 9), "oops");
    let model = f.finish();

    let range = highlight_range(model.arena(), node.into(), FaultId::StructuralIdentity);
    assert_eq!(range, Span::new(5, 9));
}

#[test]
fn catch_clause_highlights_its_variable_declaration() {
    let mut f = Fixture::new();
    let name = f.b.ident(f.file, Span::new(26, 27), "e");
    let var = f.b.variable_decl(f.file, Span::new(26, 38), name, None, None);
    let block = f.b.block(f.file, Span::new(40, 50), vec![]);
    let clause = f.b.catch_clause(f.file, Span::new(20, 50), Some(var), block);
    let empty_block = f.b.block(f.file, Span::new(70, 80), vec![]);
    let bare = f.b.catch_clause(f.file, Span::new(60, 80), None, empty_block);
    let model = f.finish();

    let range = highlight_range(model.arena(), clause.into(), FaultId::CatchWithUnsupportedType);
    assert_eq!(range, Span::new(26, 38));

    // No variable declaration: fall back to the clause span.
    let bare_range = highlight_range(model.arena(), bare.into(), FaultId::CatchWithUnsupportedType);
    assert_eq!(bare_range, Span::new(60, 80));
}

#[test]
fn for_in_highlights_the_in_region() {
    let mut f = Fixture::new();
    let init = f.b.ident(f.file, Span::new(5, 6), "k");
    let target = f.b.ident(f.file, Span::new(12, 15), "obj");
    let body = f.b.block(f.file, Span::new(17, 20), vec![]);
    let stmt = f.b.for_in_statement(f.file, Span::new(0, 20), init, target, body);
    let model = f.finish();

    let range = highlight_range(model.arena(), stmt.into(), FaultId::ForInStatement);
    assert_eq!(range, Span::new(7, 11));
}

#[test]
fn with_statement_highlights_its_header() {
    let mut f = Fixture::new();
    let expr = f.b.ident(f.file, Span::new(6, 9), "obj");
    let body = f.b.block(f.file, Span::new(11, 20), vec![]);
    let stmt = f.b.with_statement(f.file, Span::new(0, 20), expr, body);
    let model = f.finish();

    let range = highlight_range(model.arena(), stmt.into(), FaultId::WithStatement);
    assert_eq!(range, Span::new(0, 10));
}

#[test]
fn keyword_prefix_handlers_measure_their_keyword() {
    let mut f = Fixture::new();
    let node = f.b.ident(f.file, Span::new(100, 130), "stand_in");
    let model = f.finish();
    let arena = model.arena();

    let cases = [
        (FaultId::DeleteOperator, 6),
        (FaultId::TypeQuery, 6),
        (FaultId::LocalFunction, 8),
        (FaultId::ClassExpression, 5),
        (FaultId::MultipleStaticBlocks, 6),
        (FaultId::ObjectLiteralNoContextType, 1),
        (FaultId::ObjectTypeLiteral, 1),
    ];
    for (fault, len) in cases {
        let range = highlight_range(arena, node.into(), fault);
        assert_eq!(range.start, 100);
        assert_eq!(range.len(), len, "wrong width for {fault:?}");
    }
}

#[test]
fn instanceof_highlights_the_operator_token() {
    let mut f = Fixture::new();
    let left = f.b.ident(f.file, Span::new(0, 1), "x");
    let right = f.b.ident(f.file, Span::new(23, 24), "C");
    let expr = f.b.binary_expr(
        f.file,
        Span::new(0, 24),
        left,
        arklint_sema::BinaryOp::Instanceof,
        Span::new(2, 12),
        right,
    );
    let model = f.finish();

    let range = highlight_range(model.arena(), expr.into(), FaultId::InstanceofUnsupported);
    assert_eq!(range, Span::new(2, 12));
    assert_eq!(range.len(), "instanceof".len() as u32);
}

#[test]
fn const_assertion_highlights_between_expression_and_type() {
    let mut f = Fixture::new();
    let value = f.b.numeric_lit(f.file, Span::new(0, 1), 1.0);
    let keyword = f
        .b
        .keyword_type_node(f.file, Span::new(5, 10), arklint_sema::TypeKeyword::Any);
    let as_expr = f.b.as_expr(f.file, Span::new(0, 10), value, keyword);
    let model = f.finish();

    let range = highlight_range(model.arena(), as_expr.into(), FaultId::ConstAssertion);
    assert_eq!(range, Span::new(2, 4));
}

#[test]
fn limited_return_type_inference_targets_the_name_or_annotation() {
    let mut f = Fixture::new();
    let fn_name = f.b.ident(f.file, Span::new(9, 12), "foo");
    let decl = f.b.function_decl(
        f.file,
        Span::new(0, 40),
        arklint_sema::ast::FunctionDecl {
            name: Some(fn_name),
            return_type: None,
            body: None,
        },
    );
    let ret = f
        .b
        .keyword_type_node(f.file, Span::new(60, 66), arklint_sema::TypeKeyword::Number);
    let expr = f.b.function_expr(
        f.file,
        Span::new(50, 80),
        arklint_sema::ast::FunctionDecl {
            name: None,
            return_type: Some(ret),
            body: None,
        },
    );
    let model = f.finish();

    let decl_range = highlight_range(
        model.arena(),
        decl.into(),
        FaultId::LimitedReturnTypeInference,
    );
    assert_eq!(decl_range, Span::new(9, 12));

    let expr_range = highlight_range(
        model.arena(),
        expr.into(),
        FaultId::LimitedReturnTypeInference,
    );
    assert_eq!(expr_range, Span::new(60, 66));
}

#[test]
fn function_apply_call_highlights_after_the_dot() {
    let mut f = Fixture::new();
    let receiver = f.b.ident(f.file, Span::new(0, 3), "foo");
    let access = f
        .b
        .property_access(f.file, Span::new(0, 9), receiver, "apply", Span::new(4, 9));
    let model = f.finish();

    let range = highlight_range(model.arena(), access.into(), FaultId::FunctionApplyCall);
    assert_eq!(range, Span::new(4, 9));
    let bind_range = highlight_range(model.arena(), access.into(), FaultId::FunctionBind);
    assert_eq!(bind_range, Span::new(4, 9));
}

#[test]
fn duplicate_declaration_highlights_the_declared_name() {
    let mut f = Fixture::new();
    let x = f.property_member(f.file, "x", arklint_sema::TypeId::NUMBER, ModifierFlags::empty());
    let class = f.class("Duplicated", &[x]);
    let model = f.finish();

    let range = highlight_range(model.arena(), class.node.into(), FaultId::DeclWithDuplicateName);
    assert_eq!(range, model.arena().span(class.name_node));
}

#[test]
fn parameter_properties_cover_the_parameter_list() {
    let mut f = Fixture::new();
    let p0_name = f.b.ident(f.file, Span::new(12, 14), "p0");
    let p0 = f
        .b
        .parameter_decl(f.file, Span::new(4, 14), p0_name, ModifierFlags::PRIVATE);
    let p1_name = f.b.ident(f.file, Span::new(20, 22), "p1");
    let p1 = f
        .b
        .parameter_decl(f.file, Span::new(16, 22), p1_name, ModifierFlags::empty());
    let ctor = f.b.constructor_decl(f.file, Span::new(0, 30), vec![p0, p1]);
    let model = f.finish();

    let range = highlight_range(model.arena(), ctor.into(), FaultId::ParameterProperties);
    assert_eq!(range, Span::new(4, 22));
}

#[test]
fn sendable_definite_assignment_includes_the_exclamation() {
    let mut f = Fixture::new();
    let name = f.b.ident(f.file, Span::new(2, 6), "prop");
    let decl = f.b.property_decl(
        f.file,
        Span::new(2, 16),
        arklint_sema::ast::PropertyDecl {
            name,
            modifiers: ModifierFlags::empty(),
            decorators: Default::default(),
            exclamation: Some(Span::new(6, 7)),
            type_node: None,
            initializer: None,
        },
    );
    let model = f.finish();

    let range = highlight_range(
        model.arena(),
        decl.into(),
        FaultId::SendableDefiniteAssignment,
    );
    assert_eq!(range, Span::new(2, 7));
}

#[test]
fn comment_ranges_use_their_own_offsets() {
    let f = Fixture::new();
    let model = f.finish();
    let comment = NodeOrComment::Comment(CommentRange {
        kind: CommentKind::SingleLine,
        pos: 40,
        end: 55,
    });

    let range = highlight_range(model.arena(), comment, FaultId::StructuralIdentity);
    assert_eq!(range, Span::new(40, 55));
    // Keyword handlers still anchor at the comment start.
    let var_range = highlight_range(model.arena(), comment, FaultId::VarDeclaration);
    assert_eq!(var_range, Span::new(40, 43));
}

#[test]
fn record_fault_appends_with_computed_range() {
    let mut f = Fixture::new();
    let name = f.b.ident(f.file, Span::new(4, 5), "x");
    let decl = f.b.variable_decl(f.file, Span::new(0, 10), name, None, None);
    let model = f.finish();

    let mut faults = Vec::new();
    record_fault(
        model.arena(),
        &mut faults,
        decl.into(),
        FaultId::VarDeclaration,
    );
    assert_eq!(faults.len(), 1);
    assert_eq!(faults[0].fault_id, FaultId::VarDeclaration);
    assert_eq!(faults[0].range, Span::new(0, 3));
}
