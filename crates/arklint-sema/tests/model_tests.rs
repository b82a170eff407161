//! Semantic model queries.

use arklint_sema::fixtures::Fixture;
use arklint_sema::{ModifierFlags, SymbolFlags, TypeId};

#[test]
fn properties_include_inherited_members() {
    let mut f = Fixture::new();
    let base_prop = f.property_member(f.file, "base", TypeId::NUMBER, ModifierFlags::empty());
    let base = f.class("Base", &[base_prop]);
    let own_prop = f.property_member(f.file, "own", TypeId::STRING, ModifierFlags::empty());
    let clause = f.extends_clause(f.file, &base);
    let derived = f.class_in(
        f.file,
        "Derived",
        ModifierFlags::empty(),
        &[],
        vec![clause],
        &[own_prop],
    );
    let model = f.finish();

    let props = model.properties_of_type(derived.ty);
    assert_eq!(props.len(), 2);
    assert!(props.contains(&own_prop.symbol));
    assert!(props.contains(&base_prop.symbol));
}

#[test]
fn derived_members_shadow_base_members_of_the_same_name() {
    let mut f = Fixture::new();
    let base_x = f.property_member(f.file, "x", TypeId::NUMBER, ModifierFlags::empty());
    let base = f.class("Base", &[base_x]);
    let derived_x = f.property_member(f.file, "x", TypeId::STRING, ModifierFlags::empty());
    let clause = f.extends_clause(f.file, &base);
    let derived = f.class_in(
        f.file,
        "Derived",
        ModifierFlags::empty(),
        &[],
        vec![clause],
        &[derived_x],
    );
    let model = f.finish();

    let props = model.properties_of_type(derived.ty);
    assert_eq!(props, vec![derived_x.symbol]);
}

#[test]
fn non_nullable_strips_only_nullable_members() {
    let mut f = Fixture::new();
    let a = f.class("A", &[]);
    let nullable = f.b.union(vec![a.ty, TypeId::UNDEFINED, TypeId::NULL]);
    let clean = f.b.union(vec![a.ty, TypeId::NUMBER]);
    let model = f.finish();

    assert_eq!(model.non_nullable(nullable), a.ty);
    assert_eq!(model.non_nullable(clean), clean);
    assert_eq!(model.non_nullable(TypeId::NUMBER), TypeId::NUMBER);
}

#[test]
fn non_nullable_unions_have_stable_identity() {
    let mut f = Fixture::new();
    let a = f.class("A", &[]);
    let b = f.class("B", &[]);
    let u1 = f.b.union(vec![a.ty, b.ty, TypeId::UNDEFINED]);
    let u2 = f.b.union(vec![a.ty, b.ty, TypeId::NULL]);
    let model = f.finish();

    // Both strip to the same member list and must intern to one type.
    assert_eq!(model.non_nullable(u1), model.non_nullable(u2));
}

#[test]
fn qualified_names_walk_the_parent_chain() {
    let mut f = Fixture::new();
    let lang = f.b.symbol("lang", SymbolFlags::MODULE);
    let marker = f.b.symbol("ISendable", SymbolFlags::INTERFACE);
    f.b.set_symbol_parent(marker, lang);
    let global = f.b.symbol("Array", SymbolFlags::INTERFACE);
    let model = f.finish();

    assert_eq!(model.fully_qualified_name(marker), "lang.ISendable");
    assert_eq!(model.parent_symbol_name(marker).as_deref(), Some("lang"));
    assert_eq!(model.fully_qualified_name(global), "Array");
    assert_eq!(model.parent_symbol_name(global), None);
}

#[test]
fn alias_chains_resolve_to_the_end() {
    let mut f = Fixture::new();
    let target = f.b.symbol("Widget", SymbolFlags::CLASS);
    let middle = f.b.symbol("Mid", SymbolFlags::ALIAS);
    let outer = f.b.symbol("W", SymbolFlags::ALIAS);
    f.b.set_alias_target(middle, target);
    f.b.set_alias_target(outer, middle);
    let model = f.finish();

    assert_eq!(model.aliased_symbol(outer), target);
    assert_eq!(model.aliased_symbol(target), target);
}

#[test]
fn unresolved_nodes_answer_unknown_type() {
    let mut f = Fixture::new();
    let span = f.span(1);
    let ident = f.b.ident(f.file, span, "x");
    let model = f.finish();

    assert_eq!(model.type_at_location(ident), TypeId::UNKNOWN);
}

#[test]
fn parent_links_are_wired_by_adoption() {
    let mut f = Fixture::new();
    let prop = f.prop_num(f.file, "x", 1.0);
    let literal = f.obj(f.file, vec![prop]);
    let model = f.finish();

    assert_eq!(model.arena().parent(prop), Some(literal));
    let assignment = model
        .arena()
        .property_assignment(prop)
        .expect("property assignment");
    assert_eq!(model.arena().parent(assignment.name), Some(prop));
    assert_eq!(model.arena().parent(assignment.initializer), Some(prop));
}
