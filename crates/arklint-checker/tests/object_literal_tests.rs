//! Object-literal assignability.

use arklint_checker::{CheckSession, LinterOptions};
use arklint_sema::fixtures::Fixture;
use arklint_sema::{ModifierFlags, TypeId};

#[test]
fn plain_data_class_accepts_matching_literal() {
    let mut f = Fixture::new();
    let x = f.property_member(f.file, "x", TypeId::NUMBER, ModifierFlags::empty());
    let a = f.class("A", &[x]);
    let prop = f.prop_num(f.file, "x", 1.0);
    let literal = f.obj(f.file, vec![prop]);
    let model = f.finish();
    let session = CheckSession::new(&model, LinterOptions::default());

    assert!(session.is_object_literal_assignable(Some(a.ty), literal));
}

#[test]
fn abstract_class_rejects_literal_even_when_fields_match() {
    let mut f = Fixture::new();
    let x = f.property_member(f.file, "x", TypeId::NUMBER, ModifierFlags::empty());
    let a = f.class_in(
        f.file,
        "A",
        ModifierFlags::ABSTRACT,
        &[],
        Vec::new(),
        &[x],
    );
    let prop = f.prop_num(f.file, "x", 1.0);
    let literal = f.obj(f.file, vec![prop]);
    let model = f.finish();
    let session = CheckSession::new(&model, LinterOptions::default());

    assert!(!session.is_object_literal_assignable(Some(a.ty), literal));
}

#[test]
fn readonly_field_rejects_literal() {
    let mut f = Fixture::new();
    let x = f.property_member(f.file, "x", TypeId::NUMBER, ModifierFlags::READONLY);
    let a = f.class("A", &[x]);
    let prop = f.prop_num(f.file, "x", 1.0);
    let literal = f.obj(f.file, vec![prop]);
    let model = f.finish();
    let session = CheckSession::new(&model, LinterOptions::default());

    assert!(!session.is_object_literal_assignable(Some(a.ty), literal));
}

#[test]
fn class_with_methods_rejects_literal() {
    let mut f = Fixture::new();
    let x = f.property_member(f.file, "x", TypeId::NUMBER, ModifierFlags::empty());
    let m = f.method_member(f.file, "run");
    let a = f.class("A", &[x, m]);
    let prop = f.prop_num(f.file, "x", 1.0);
    let literal = f.obj(f.file, vec![prop]);
    let model = f.finish();
    let session = CheckSession::new(&model, LinterOptions::default());

    assert!(!session.is_object_literal_assignable(Some(a.ty), literal));
}

#[test]
fn parameterized_constructor_rejects_literal() {
    let mut f = Fixture::new();
    let x = f.property_member(f.file, "x", TypeId::NUMBER, ModifierFlags::empty());
    let ctor = f.constructor_member(f.file, 1);
    let a = f.class("A", &[x, ctor]);
    let prop = f.prop_num(f.file, "x", 1.0);
    let literal = f.obj(f.file, vec![prop]);
    let model = f.finish();
    let session = CheckSession::new(&model, LinterOptions::default());

    assert!(!session.is_object_literal_assignable(Some(a.ty), literal));
}

#[test]
fn explicit_empty_constructor_accepts_literal() {
    let mut f = Fixture::new();
    let x = f.property_member(f.file, "x", TypeId::NUMBER, ModifierFlags::empty());
    let ctor = f.constructor_member(f.file, 0);
    let a = f.class("A", &[x, ctor]);
    let prop = f.prop_num(f.file, "x", 1.0);
    let literal = f.obj(f.file, vec![prop]);
    let model = f.finish();
    let session = CheckSession::new(&model, LinterOptions::default());

    assert!(session.is_object_literal_assignable(Some(a.ty), literal));
}

#[test]
fn property_without_target_field_rejects_literal() {
    let mut f = Fixture::new();
    let x = f.property_member(f.file, "x", TypeId::NUMBER, ModifierFlags::empty());
    let a = f.class("A", &[x]);
    let prop_x = f.prop_num(f.file, "x", 1.0);
    let prop_y = f.prop_num(f.file, "y", 2.0);
    let literal = f.obj(f.file, vec![prop_x, prop_y]);
    let model = f.finish();
    let session = CheckSession::new(&model, LinterOptions::default());

    assert!(!session.is_object_literal_assignable(Some(a.ty), literal));
}

#[test]
fn nested_literal_recurses_into_field_type() {
    let mut f = Fixture::new();
    let bx = f.property_member(f.file, "x", TypeId::NUMBER, ModifierFlags::empty());
    let b = f.class("B", &[bx]);
    let ab = f.property_member(f.file, "b", b.ty, ModifierFlags::empty());
    let a = f.class("A", &[ab]);

    let inner_prop = f.prop_num(f.file, "x", 1.0);
    let inner = f.obj(f.file, vec![inner_prop]);
    let outer_prop = f.prop_init(f.file, "b", inner);
    let outer = f.obj(f.file, vec![outer_prop]);

    let bad_inner_prop = f.prop_num(f.file, "nope", 1.0);
    let bad_inner = f.obj(f.file, vec![bad_inner_prop]);
    let bad_outer_prop = f.prop_init(f.file, "b", bad_inner);
    let bad_outer = f.obj(f.file, vec![bad_outer_prop]);

    let model = f.finish();
    let session = CheckSession::new(&model, LinterOptions::default());

    assert!(session.is_object_literal_assignable(Some(a.ty), outer));
    assert!(!session.is_object_literal_assignable(Some(a.ty), bad_outer));
}

#[test]
fn any_and_library_targets_accept_anything() {
    let mut f = Fixture::new();
    let lib = f.lib_class("sdk/widgets.d.ts", "Widget");
    let prop = f.prop_num(f.file, "whatever", 1.0);
    let literal = f.obj(f.file, vec![prop]);
    let model = f.finish();
    let session = CheckSession::new(&model, LinterOptions::default());

    assert!(session.is_object_literal_assignable(Some(TypeId::ANY), literal));
    assert!(session.is_object_literal_assignable(Some(lib.ty), literal));
}

#[test]
fn union_target_accepts_when_any_member_accepts() {
    let mut f = Fixture::new();
    let ax = f.property_member(f.file, "x", TypeId::NUMBER, ModifierFlags::empty());
    let a = f.class_in(f.file, "A", ModifierFlags::ABSTRACT, &[], Vec::new(), &[ax]);
    let bx = f.property_member(f.file, "x", TypeId::NUMBER, ModifierFlags::empty());
    let b = f.class("B", &[bx]);
    let union = f.b.union(vec![a.ty, b.ty]);
    let prop = f.prop_num(f.file, "x", 1.0);
    let literal = f.obj(f.file, vec![prop]);
    let model = f.finish();
    let session = CheckSession::new(&model, LinterOptions::default());

    assert!(session.is_object_literal_assignable(Some(union), literal));
}

#[test]
fn wrapper_alias_unwraps_to_its_argument() {
    let mut f = Fixture::new();
    let x = f.property_member(f.file, "x", TypeId::NUMBER, ModifierFlags::empty());
    let b = f.class("B", &[x]);
    let partial = f.std_alias_symbol("Partial");
    let partial_b = f.wrapper_alias_type(partial, b.ty);
    let prop = f.prop_num(f.file, "x", 1.0);
    let literal = f.obj(f.file, vec![prop]);
    let model = f.finish();
    let session = CheckSession::new(&model, LinterOptions::default());

    assert!(session.is_object_literal_assignable(Some(partial_b), literal));
}

#[test]
fn wrapper_alias_with_wrong_arity_rejects() {
    let mut f = Fixture::new();
    let partial = f.std_alias_symbol("Partial");
    let no_args = f.b.alias_type(
        partial,
        Vec::new(),
        arklint_sema::TypeFlags::OBJECT,
        arklint_sema::ObjectFlags::ANONYMOUS,
        arklint_sema::TypeData::Object {
            call_signatures: Default::default(),
            type_param_count: 0,
        },
    );
    let prop = f.prop_num(f.file, "x", 1.0);
    let literal = f.obj(f.file, vec![prop]);
    let model = f.finish();
    let session = CheckSession::new(&model, LinterOptions::default());

    assert!(!session.is_object_literal_assignable(Some(no_args), literal));
}

#[test]
fn record_target_validates_keys_not_fields() {
    let mut f = Fixture::new();
    let record = f.std_alias_symbol("Record");
    let record_ty = f.record_type(record);

    let by_string_key = f.prop_str_key(f.file, "a", 1.0);
    let by_computed_str = f.prop_computed_str(f.file, "b", 2.0);
    let good = f.obj(f.file, vec![by_string_key, by_computed_str]);

    let by_identifier = f.prop_num(f.file, "c", 3.0);
    let identifier_keyed = f.obj(f.file, vec![by_identifier]);

    let fn_init_span = f.span(8);
    let fn_init = f.b.ident(f.file, fn_init_span, "fn");
    let by_iterator = f.prop_computed_symbol_iterator(f.file, fn_init);
    let bad = f.obj(f.file, vec![by_iterator]);

    let model = f.finish();
    let session = CheckSession::new(&model, LinterOptions::default());

    assert!(session.is_object_literal_assignable(Some(record_ty), good));
    // Symbol.iterator is not a literal key: rejected in Record mode.
    assert!(!session.is_object_literal_assignable(Some(record_ty), bad));
    // Identifier keys are not literal keys either.
    assert!(!session.is_object_literal_assignable(Some(record_ty), identifier_keyed));
}

#[test]
fn symbol_iterator_is_valid_outside_record_mode() {
    let mut f = Fixture::new();
    let fn_init_span = f.span(8);
    let fn_init = f.b.ident(f.file, fn_init_span, "fn");
    let by_iterator = f.prop_computed_symbol_iterator(f.file, fn_init);
    let model = f.finish();
    let session = CheckSession::new(&model, LinterOptions::default());

    let name = model
        .arena()
        .property_assignment(by_iterator)
        .expect("property assignment")
        .name;
    assert!(session.is_valid_computed_property_name(name, false));
    assert!(!session.is_valid_computed_property_name(name, true));
}

#[test]
fn nullable_target_checks_against_non_nullable_variant() {
    let mut f = Fixture::new();
    let x = f.property_member(f.file, "x", TypeId::NUMBER, ModifierFlags::empty());
    let a = f.class("A", &[x]);
    let nullable = f.b.union(vec![a.ty, TypeId::UNDEFINED]);
    let prop = f.prop_num(f.file, "x", 1.0);
    let literal = f.obj(f.file, vec![prop]);
    let model = f.finish();
    let session = CheckSession::new(&model, LinterOptions::default());

    assert!(session.is_object_literal_assignable(Some(nullable), literal));
}

#[test]
fn missing_target_type_rejects() {
    let mut f = Fixture::new();
    let prop = f.prop_num(f.file, "x", 1.0);
    let literal = f.obj(f.file, vec![prop]);
    let model = f.finish();
    let session = CheckSession::new(&model, LinterOptions::default());

    assert!(!session.is_object_literal_assignable(None, literal));
}
