//! Dynamic/static origin classification.

use arklint_checker::{CheckSession, DynamicVerdict, LinterOptions};
use arklint_sema::fixtures::Fixture;
use arklint_sema::{SymbolFlags, TypeFlags, TypeId, TypeRow};

#[test]
fn library_types_are_dynamic() {
    let mut f = Fixture::new();
    let lib = f.lib_class("sdk/widgets.d.ts", "Widget");
    let model = f.finish();
    let session = CheckSession::new(&model, LinterOptions::default());

    assert_eq!(session.is_dynamic_type(lib.ty), DynamicVerdict::Dynamic);
    assert!(session.is_library_type(lib.ty));
}

#[test]
fn restricted_language_types_are_static() {
    let mut f = Fixture::new();
    let local = f.class("Local", &[]);
    let model = f.finish();
    let session = CheckSession::new(&model, LinterOptions::default());

    assert_eq!(session.is_dynamic_type(local.ty), DynamicVerdict::Static);
    assert_eq!(session.is_dynamic_type(TypeId::NUMBER), DynamicVerdict::Static);
}

#[test]
fn standard_library_and_any_are_indeterminate() {
    let mut f = Fixture::new();
    let std_file = f.add_file("typescript/lib/lib.es5.d.ts", true);
    let promise = f.class_in(
        std_file,
        "Promise",
        arklint_sema::ModifierFlags::empty(),
        &[],
        Vec::new(),
        &[],
    );
    let model = f.finish();
    let session = CheckSession::new(&model, LinterOptions::default());

    assert_eq!(session.is_dynamic_type(TypeId::ANY), DynamicVerdict::Indeterminate);
    assert_eq!(session.is_dynamic_type(promise.ty), DynamicVerdict::Indeterminate);
    assert_eq!(
        session.is_dynamic_type(TypeId::NON_PRIMITIVE),
        DynamicVerdict::Indeterminate
    );
}

#[test]
fn union_scan_is_left_to_right_and_first_definite_wins() {
    let mut f = Fixture::new();
    let lib = f.lib_class("sdk/widgets.d.ts", "Widget");
    let lib_first = f.b.union(vec![lib.ty, TypeId::NUMBER]);
    let lib_last = f.b.union(vec![TypeId::NUMBER, lib.ty]);
    let model = f.finish();
    let session = CheckSession::new(&model, LinterOptions::default());

    // Library member first: short-circuits to Dynamic.
    assert_eq!(session.is_dynamic_type(lib_first), DynamicVerdict::Dynamic);
    // Static does not short-circuit; the scan reaches the library member.
    assert_eq!(session.is_dynamic_type(lib_last), DynamicVerdict::Dynamic);
}

#[test]
fn indeterminate_member_short_circuits_the_scan() {
    let mut f = Fixture::new();
    let lib = f.lib_class("sdk/widgets.d.ts", "Widget");
    let any_then_lib = f.b.union(vec![TypeId::ANY, lib.ty]);
    let model = f.finish();
    let session = CheckSession::new(&model, LinterOptions::default());

    assert_eq!(
        session.is_dynamic_type(any_then_lib),
        DynamicVerdict::Indeterminate
    );
}

#[test]
fn all_static_union_is_static() {
    let mut f = Fixture::new();
    let local = f.class("Local", &[]);
    let union = f.b.union(vec![TypeId::NUMBER, local.ty, TypeId::STRING]);
    let model = f.finish();
    let session = CheckSession::new(&model, LinterOptions::default());

    assert_eq!(session.is_dynamic_type(union), DynamicVerdict::Static);
}

#[test]
fn nullability_is_stripped_before_the_scan() {
    let mut f = Fixture::new();
    let lib = f.lib_class("sdk/widgets.d.ts", "Widget");
    let nullable = f.b.union(vec![TypeId::UNDEFINED, lib.ty]);
    let model = f.finish();
    let session = CheckSession::new(&model, LinterOptions::default());

    assert_eq!(session.is_dynamic_type(nullable), DynamicVerdict::Dynamic);
}

#[test]
fn literal_with_library_contextual_type_is_dynamic() {
    let mut f = Fixture::new();
    let lib = f.lib_class("sdk/widgets.d.ts", "Widget");
    let local = f.class("Local", &[]);

    let lib_lit = f.obj(f.file, vec![]);
    f.b.set_contextual_type(lib_lit, lib.ty);
    let local_lit = f.obj(f.file, vec![]);
    f.b.set_contextual_type(local_lit, local.ty);

    let model = f.finish();
    let session = CheckSession::new(&model, LinterOptions::default());

    assert!(session.is_dynamic_literal_initializer(lib_lit));
    assert!(!session.is_dynamic_literal_initializer(local_lit));
}

#[test]
fn nested_literal_inherits_context_from_enclosing_literal() {
    let mut f = Fixture::new();
    let lib = f.lib_class("sdk/widgets.d.ts", "Widget");

    let inner = f.obj(f.file, vec![]);
    let prop = f.prop_init(f.file, "f", inner);
    let outer = f.obj(f.file, vec![prop]);
    f.b.set_contextual_type(outer, lib.ty);

    let model = f.finish();
    let session = CheckSession::new(&model, LinterOptions::default());

    assert!(session.is_dynamic_literal_initializer(inner));
}

#[test]
fn literal_argument_to_library_call_is_dynamic() {
    let mut f = Fixture::new();
    let (fn_symbol, callee) = f.lib_function("sdk/api.d.ts", "configure");
    let callee_ty = f.b.add_type(TypeRow {
        flags: TypeFlags::OBJECT,
        object_flags: arklint_sema::ObjectFlags::ANONYMOUS,
        symbol: Some(fn_symbol),
        ..TypeRow::default()
    });
    f.b.set_node_type(callee, callee_ty);

    let lit = f.obj(f.file, vec![]);
    let call_span = f.span(20);
    f.b.call_expr(f.file, call_span, callee, vec![lit]);

    let model = f.finish();
    let session = CheckSession::new(&model, LinterOptions::default());

    assert!(session.is_dynamic_literal_initializer(lit));
}

#[test]
fn literal_written_onto_library_object_is_dynamic() {
    let mut f = Fixture::new();
    let lib = f.lib_class("sdk/widgets.d.ts", "Widget");

    let obj_span = f.span(3);
    let obj_ident = f.b.ident(f.file, obj_span, "w");
    f.b.set_node_type(obj_ident, lib.ty);
    let name_span = f.span(1);
    let access_span = f.span(5);
    let access = f.b.property_access(f.file, access_span, obj_ident, "f", name_span);

    let lit = f.obj(f.file, vec![]);
    let op_span = f.span(1);
    let assign_span = f.span(12);
    f.b.binary_expr(
        f.file,
        assign_span,
        access,
        arklint_sema::BinaryOp::Assign,
        op_span,
        lit,
    );

    let model = f.finish();
    let session = CheckSession::new(&model, LinterOptions::default());

    assert!(session.is_dynamic_literal_initializer(lit));
}

#[test]
fn non_literal_expressions_are_never_dynamic_initializers() {
    let mut f = Fixture::new();
    let span = f.span(1);
    let ident = f.b.ident(f.file, span, "x");
    let model = f.finish();
    let session = CheckSession::new(&model, LinterOptions::default());

    assert!(!session.is_dynamic_literal_initializer(ident));
}

#[test]
fn test_mode_admits_plain_ts_sources_as_static() {
    let mut f = Fixture::new();
    let ts_file = f.add_file("src/fixture.ts", false);
    let helper = f.class_in(
        ts_file,
        "Helper",
        arklint_sema::ModifierFlags::empty(),
        &[],
        Vec::new(),
        &[],
    );
    let model = f.finish();

    let strict = CheckSession::new(&model, LinterOptions::default());
    assert!(strict.is_library_type(helper.ty));

    let relaxed = CheckSession::new(
        &model,
        LinterOptions {
            test_mode: true,
            ..LinterOptions::default()
        },
    );
    assert!(!relaxed.is_library_type(helper.ty));
}

#[test]
fn ignore_listed_directories_are_third_party_even_with_ets_extension() {
    let mut f = Fixture::new();
    let vendored = f.add_file("node_modules/widgets/index.ets", false);
    let widget = f.class_in(
        vendored,
        "Widget",
        arklint_sema::ModifierFlags::empty(),
        &[],
        Vec::new(),
        &[],
    );
    let model = f.finish();
    let session = CheckSession::new(&model, LinterOptions::default());

    assert!(session.is_library_type(widget.ty));
}

#[test]
fn const_enum_symbol_flags_are_exact() {
    let mut f = Fixture::new();
    let const_enum = f.b.symbol("Mode", SymbolFlags::CONST_ENUM);
    let plain_enum = f.b.symbol("Color", SymbolFlags::ENUM);
    let const_ty = f.b.enum_type(const_enum);
    let plain_ty = f.b.enum_type(plain_enum);
    let model = f.finish();
    let session = CheckSession::new(&model, LinterOptions::default());

    assert!(session.is_shareable_type(const_ty));
    assert!(session.is_enum_type(plain_ty));
    assert!(!session.is_shareable_type(plain_ty));
}
