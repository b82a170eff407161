//! Session behavior: symbol resolution cache, aliases, syntactic helpers.

use arklint_checker::{CheckSession, LinterOptions, NameGenerator};
use arklint_sema::ast::{BinaryOp, TypeKeyword, VarDeclKind};
use arklint_sema::fixtures::Fixture;
use arklint_sema::{SymbolFlags, TypeId};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[test]
fn symbol_resolution_is_cached_per_node() {
    init_tracing();
    let mut f = Fixture::new();
    let symbol = f.b.symbol("value", SymbolFlags::VARIABLE);
    let span = f.span(5);
    let ident = f.b.ident(f.file, span, "value");
    f.b.bind_symbol(ident, symbol);
    let model = f.finish();
    let session = CheckSession::new(&model, LinterOptions::default());

    let before = model.symbol_query_count();
    let first = session.true_symbol_at_location(ident);
    let after_first = model.symbol_query_count();
    let second = session.true_symbol_at_location(ident);
    let after_second = model.symbol_query_count();

    assert_eq!(first, second);
    assert_eq!(after_first, before + 1);
    // Cache hit: no further model query.
    assert_eq!(after_second, after_first);
}

#[test]
fn failed_resolution_is_cached_too() {
    let mut f = Fixture::new();
    let span = f.span(5);
    let ident = f.b.ident(f.file, span, "ghost");
    let model = f.finish();
    let session = CheckSession::new(&model, LinterOptions::default());

    let before = model.symbol_query_count();
    assert_eq!(session.true_symbol_at_location(ident), None);
    assert_eq!(session.true_symbol_at_location(ident), None);
    assert_eq!(model.symbol_query_count(), before + 1);
}

#[test]
fn aliases_resolve_to_their_target() {
    let mut f = Fixture::new();
    let target = f.b.symbol("Widget", SymbolFlags::CLASS);
    let alias = f.b.symbol("W", SymbolFlags::ALIAS);
    f.b.set_alias_target(alias, target);
    let span = f.span(1);
    let ident = f.b.ident(f.file, span, "W");
    f.b.bind_symbol(ident, alias);
    let model = f.finish();
    let session = CheckSession::new(&model, LinterOptions::default());

    assert_eq!(session.true_symbol_at_location(ident), Some(target));
}

#[test]
fn separate_sessions_have_separate_caches() {
    let mut f = Fixture::new();
    let symbol = f.b.symbol("value", SymbolFlags::VARIABLE);
    let span = f.span(5);
    let ident = f.b.ident(f.file, span, "value");
    f.b.bind_symbol(ident, symbol);
    let model = f.finish();

    let first = CheckSession::new(&model, LinterOptions::default());
    let before = model.symbol_query_count();
    first.true_symbol_at_location(ident);
    assert_eq!(model.symbol_query_count(), before + 1);

    let second = CheckSession::new(&model, LinterOptions::default());
    second.true_symbol_at_location(ident);
    // A fresh session starts cold and queries again.
    assert_eq!(model.symbol_query_count(), before + 2);
}

#[test]
fn shared_module_directive_after_imports_only() {
    let mut f = Fixture::new();
    let import = f.import_stmt(f.file, &["worker"]);
    let directive = f.directive_stmt(f.file, "use shared");
    let span = f.span(60);
    let shared = f.b.source_file(f.file, span, vec![import, directive]);

    let other = f.directive_stmt(f.file, "use strict");
    let span2 = f.span(30);
    let strict_only = f.b.source_file(f.file, span2, vec![other]);

    let late_directive = f.directive_stmt(f.file, "use shared");
    let name_span = f.span(1);
    let name = f.b.ident(f.file, name_span, "x");
    let decl_span = f.span(8);
    let var = f.b.variable_decl(f.file, decl_span, name, None, None);
    let list_span = f.span(10);
    let list = f.b.variable_decl_list(f.file, list_span, VarDeclKind::Let, vec![var]);
    let stmt_span = f.span(12);
    let stmt = f.b.variable_statement(f.file, stmt_span, list);
    let span3 = f.span(40);
    let late = f.b.source_file(f.file, span3, vec![stmt, late_directive]);

    let model = f.finish();
    let session = CheckSession::new(&model, LinterOptions::default());

    assert!(session.is_shared_module(shared));
    assert!(!session.is_shared_module(strict_only));
    // A non-import statement before the directive disqualifies it.
    assert!(!session.is_shared_module(late));
}

#[test]
fn es_object_recognition() {
    let mut f = Fixture::new();
    let name_span = f.span(8);
    let alias_name = f.b.ident(f.file, name_span, "ESObject");
    let any_span = f.span(3);
    let any_node = f.b.keyword_type_node(f.file, any_span, TypeKeyword::Any);
    let alias_span = f.span(24);
    let alias_decl = f.b.type_alias_decl(f.file, alias_span, alias_name, any_node);
    let alias_symbol = f.b.symbol("ESObject", SymbolFlags::TYPE_ALIAS);
    f.b.add_declaration(alias_symbol, alias_decl);

    let ref_name_span = f.span(8);
    let ref_name = f.b.ident(f.file, ref_name_span, "ESObject");
    let ref_span = f.span(8);
    let type_ref = f.b.type_reference(f.file, ref_span, ref_name, Vec::new());

    let var_name_span = f.span(1);
    let var_name = f.b.ident(f.file, var_name_span, "v");
    let var_span = f.span(20);
    let var_decl = f.b.variable_decl(f.file, var_span, var_name, Some(type_ref), None);
    let var_symbol = f.b.symbol("v", SymbolFlags::VARIABLE);
    f.b.add_declaration(var_symbol, var_decl);
    let use_span = f.span(1);
    let use_site = f.b.ident(f.file, use_span, "v");
    f.b.bind_symbol(use_site, var_symbol);

    let model = f.finish();
    let session = CheckSession::new(&model, LinterOptions::default());

    assert!(session.is_es_object_type_node(type_ref));
    assert!(session.is_es_object_symbol(alias_symbol));
    assert!(session.has_es_object_type(use_site));
}

#[test]
fn destructuring_assignment_lhs_detection() {
    let mut f = Fixture::new();
    let arr_span = f.span(6);
    let pattern = f.b.array_literal(f.file, arr_span, vec![]);
    let rhs_span = f.span(3);
    let rhs = f.b.ident(f.file, rhs_span, "src");
    let op_span = f.span(1);
    let assign_span = f.span(12);
    f.b.binary_expr(f.file, assign_span, pattern, BinaryOp::Assign, op_span, rhs);

    let lone_span = f.span(6);
    let lone = f.b.array_literal(f.file, lone_span, vec![]);

    let model = f.finish();
    let session = CheckSession::new(&model, LinterOptions::default());

    assert!(session.is_destructuring_assignment_lhs(pattern));
    assert!(!session.is_destructuring_assignment_lhs(rhs));
    assert!(!session.is_destructuring_assignment_lhs(lone));
}

#[test]
fn entity_names_flatten_to_text() {
    let mut f = Fixture::new();
    let left_span = f.span(4);
    let left = f.b.ident(f.file, left_span, "lang");
    let right_span = f.span(9);
    let right = f.b.ident(f.file, right_span, "ISendable");
    let qn_span = f.span(14);
    let qualified = f.b.qualified_name(f.file, qn_span, left, right);
    let model = f.finish();
    let session = CheckSession::new(&model, LinterOptions::default());

    assert_eq!(session.entity_name_to_string(left), "lang");
    assert_eq!(session.entity_name_to_string(qualified), "langISendable");
}

#[test]
fn duplicate_name_detection_tolerates_namespace_merges() {
    let mut f = Fixture::new();
    let class = f.class("Thing", &[]);
    let module_span = f.span(20);
    let module = f.b.module_decl(f.file, module_span, "Thing", None);
    f.b.add_declaration(class.symbol, module);

    let clashing = f.class("Other", &[]);
    let enum_name_span = f.span(5);
    let enum_name = f.b.ident(f.file, enum_name_span, "Other");
    let enum_span = f.span(16);
    let enum_decl = f.b.enum_decl(
        f.file,
        enum_span,
        arklint_sema::ast::EnumDecl {
            name: enum_name,
            modifiers: arklint_sema::ModifierFlags::empty(),
            members: vec![],
        },
    );
    f.b.add_declaration(clashing.symbol, enum_decl);

    let model = f.finish();
    let session = CheckSession::new(&model, LinterOptions::default());

    // Class + namespace merge is tolerated.
    assert!(!session.symbol_has_duplicate_name(class.symbol, class.node));
    // Class + enum merge is a duplicate.
    assert!(session.symbol_has_duplicate_name(clashing.symbol, clashing.node));
}

#[test]
fn recursion_detection_walks_the_body() {
    let mut f = Fixture::new();
    let fn_symbol = f.b.symbol("again", SymbolFlags::FUNCTION);
    let name_span = f.span(5);
    let name = f.b.ident(f.file, name_span, "again");
    f.b.bind_symbol(name, fn_symbol);

    let callee_span = f.span(5);
    let callee = f.b.ident(f.file, callee_span, "again");
    f.b.bind_symbol(callee, fn_symbol);
    let call_span = f.span(8);
    let call = f.b.call_expr(f.file, call_span, callee, vec![]);
    let stmt_span = f.span(9);
    let stmt = f.b.expression_statement(f.file, stmt_span, call);
    let body_span = f.span(12);
    let body = f.b.block(f.file, body_span, vec![stmt]);
    let expr_span = f.span(30);
    let recursive = f.b.function_expr(
        f.file,
        expr_span,
        arklint_sema::ast::FunctionDecl {
            name: Some(name),
            return_type: None,
            body: Some(body),
        },
    );

    let plain_span = f.span(20);
    let plain = f.b.function_expr(
        f.file,
        plain_span,
        arklint_sema::ast::FunctionDecl {
            name: None,
            return_type: None,
            body: None,
        },
    );

    let model = f.finish();
    let session = CheckSession::new(&model, LinterOptions::default());

    assert!(session.is_function_called_recursively(recursive));
    assert!(!session.is_function_called_recursively(plain));
}

#[test]
fn unique_name_generation_skips_taken_names() {
    let mut f = Fixture::new();
    let taken = f.class("tmp", &[]);
    let span = f.span(40);
    let source = f.b.source_file(f.file, span, vec![taken.node]);
    let model = f.finish();
    let session = CheckSession::new(&model, LinterOptions::default());

    let mut generator = NameGenerator::new("tmp", 5);
    let name = session.generate_unique_name(&mut generator, source);
    assert_eq!(name.as_deref(), Some("tmp_1"));

    let mut dry = NameGenerator::new("tmp", 1);
    // The only candidate collides: the search space is exhausted.
    assert_eq!(session.generate_unique_name(&mut dry, source), None);
}

#[test]
fn const_enum_member_initializers_validate() {
    let mut f = Fixture::new();
    // E.A = 1 + 2 is a compile-time expression.
    let one_span = f.span(1);
    let one = f.b.numeric_lit(f.file, one_span, 1.0);
    let two_span = f.span(1);
    let two = f.b.numeric_lit(f.file, two_span, 2.0);
    let op_span = f.span(1);
    let sum_span = f.span(5);
    let sum = f.b.binary_expr(f.file, sum_span, one, BinaryOp::Add, op_span, two);
    let member_name_span = f.span(1);
    let member_name = f.b.ident(f.file, member_name_span, "A");
    let member_span = f.span(9);
    f.b.enum_member(f.file, member_span, member_name, Some(sum));

    // E.B = foo() is not.
    let callee_span = f.span(3);
    let callee = f.b.ident(f.file, callee_span, "foo");
    let call_span = f.span(5);
    let call = f.b.call_expr(f.file, call_span, callee, vec![]);
    let b_name_span = f.span(1);
    let b_name = f.b.ident(f.file, b_name_span, "B");
    let b_span = f.span(9);
    f.b.enum_member(f.file, b_span, b_name, Some(call));

    let model = f.finish();
    let session = CheckSession::new(&model, LinterOptions::default());

    assert!(session.is_valid_enum_member_init(sum));
    assert!(!session.is_valid_enum_member_init(call));
}

#[test]
fn type_parameter_constraint_substitution() {
    let mut f = Fixture::new();
    let constrained = f.b.type_parameter(Some(TypeId::NUMBER));
    let span = f.span(1);
    let expr = f.b.ident(f.file, span, "t");
    f.b.set_node_type(expr, constrained);
    let model = f.finish();
    let session = CheckSession::new(&model, LinterOptions::default());

    assert_eq!(session.type_or_constraint_at(expr), TypeId::NUMBER);
}
