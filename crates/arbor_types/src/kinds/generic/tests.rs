use super::*;
use crate::refs::{generic, generic_bound, int, int_range, record, text, tuple, var, Field};
use crate::TypeFlags;
use arbor_ir::ShortId;
use pretty_assertions::assert_eq;

fn generic_kind(ty: &SharedType) -> &GenericType {
    match ty.kind() {
        TypeKind::Generic(g) => g,
        other => panic!("expected a generic, got {other:?}"),
    }
}

#[test]
fn symbols() {
    assert_eq!(TypeVar { index: 0, depth: 0 }.symbol(), "A");
    assert_eq!(TypeVar { index: 1, depth: 1 }.symbol(), "B¹");
    assert_eq!(TypeVar { index: 0, depth: 2 }.symbol(), "A²");
    assert_eq!(TypeVar { index: 25, depth: 0 }.symbol(), "Z");
    assert_eq!(TypeVar { index: 27, depth: 12 }.symbol(), "B1¹²");
}

#[test]
fn instantiate_replaces_innermost_variables() {
    let inner = tuple(vec![var(0, 0), var(1, 0), int()]);
    let result = instantiate(&inner, &[text(), int_range(0, 3)]).unwrap();
    assert_eq!(result, tuple(vec![text(), int_range(0, 3), int()]));
}

#[test]
fn instantiate_leaves_nested_bindings_alone() {
    // The nested generic binds its own `var(0, 0)`; its `var(0, 1)` refers
    // to the generic being instantiated.
    let inner = tuple(vec![var(0, 0), generic(tuple(vec![var(0, 0), var(0, 1)]), 1)]);
    let result = instantiate(&inner, &[text()]).unwrap();
    assert_eq!(
        result,
        tuple(vec![text(), generic(tuple(vec![var(0, 0), text()]), 1)])
    );
}

#[test]
fn instantiate_lowers_outer_variables() {
    let result = instantiate(&tuple(vec![var(0, 1), var(2, 3)]), &[int()]).unwrap();
    assert_eq!(result, tuple(vec![var(0, 0), var(2, 2)]));
}

#[test]
fn instantiate_shifts_open_bindings_under_binders() {
    // A binding that is itself a variable must keep pointing outward once
    // it is placed under the nested generic.
    let inner = generic(var(0, 1), 1);
    let result = instantiate(&inner, &[var(3, 0)]).unwrap();
    assert_eq!(result, generic(var(3, 1), 1));
}

#[test]
fn instantiate_missing_binding() {
    let err = instantiate(&var(2, 0), &[int()]).unwrap_err();
    assert_eq!(err, TypeError::UnresolvedGenericVariable { index: 2, depth: 0 });
}

#[test]
fn names() {
    let ts = TypeSystem::with_builtins();
    let inner = record([Field::required("x", var(0, 0))]);
    let unbound = ts.resolve(&generic(inner.clone(), 1)).unwrap();
    assert_eq!(unbound.name(), "∀A. Record{x: A}");

    let bound = ts
        .resolve(&generic_bound(inner, 1, vec![int_range(0, 10)]))
        .unwrap();
    assert_eq!(bound.name(), "Record{x: A}[A := Int[0..10]]");

    let two = ts.resolve(&generic(tuple(vec![var(0, 0), var(1, 0)]), 2)).unwrap();
    assert_eq!(two.name(), "∀A, B. (A, B)");
}

#[test]
fn free_depth_and_flags() {
    let ts = TypeSystem::with_builtins();
    let v = ts.resolve(&var(0, 0)).unwrap();
    assert_eq!(v.free_depth(), Some(0));
    assert!(v.flags().contains(TypeFlags::IS_VAR | TypeFlags::HAS_VAR));

    let closed = ts.resolve(&generic(var(0, 0), 1)).unwrap();
    assert_eq!(closed.free_depth(), None);
    assert!(closed.flags().contains(TypeFlags::IS_GENERIC));
    assert!(!closed.flags().has_var());
    assert!(!closed.flags().contains(TypeFlags::IS_INHABITED));

    let open = ts.resolve(&generic(var(0, 1), 1)).unwrap();
    assert_eq!(open.free_depth(), Some(0));
    assert!(open.flags().has_var());

    let bound = ts.resolve(&generic_bound(var(0, 0), 1, vec![int()])).unwrap();
    assert!(bound.flags().contains(TypeFlags::IS_INHABITED));
}

#[test]
fn bound_generic_value_instantiates_inner() {
    let ts = TypeSystem::with_builtins();
    let inner = record([Field::required("x", var(0, 0))]);
    let ty = ts
        .resolve(&generic_bound(inner, 1, vec![int_range(0, 10)]))
        .unwrap();
    let value = ty.create_value(&ts).unwrap();
    let generic = value.as_generic().unwrap();
    assert_eq!(generic.bindings, vec![int_range(0, 10)]);

    let child = ty.child(&value, 0).unwrap();
    assert_eq!(child.step, PathStep::Index(0));
    let instance = ts.resolve(&child.type_ref).unwrap();
    let TypeKind::Record(rec) = instance.kind() else {
        panic!("expected a record instance");
    };
    let x = rec.field(ShortId::new("x")).unwrap();
    assert!(SharedType::ptr_eq(&x.ty, &ts.resolve(&int_range(0, 10)).unwrap()));
    assert!(ty.is_valid_value(&ts, &value));
}

#[test]
fn unbound_generic_has_no_default() {
    let ts = TypeSystem::with_builtins();
    let err = ts.create_value(&generic(var(0, 0), 1)).unwrap_err();
    assert_eq!(err, TypeError::UnresolvedGenericVariable { index: 0, depth: 0 });
}

#[test]
fn open_bindings_are_rejected() {
    let ts = TypeSystem::with_builtins();
    let err = ts
        .create_value(&generic_bound(var(0, 0), 1, vec![var(0, 0)]))
        .unwrap_err();
    assert!(matches!(err, TypeError::UnresolvedGenericVariable { .. }));
}

#[test]
fn binding_count_must_match() {
    let ts = TypeSystem::with_builtins();
    let err = ts
        .resolve(&generic_bound(tuple(vec![var(0, 0), var(1, 0)]), 2, vec![int()]))
        .unwrap_err();
    assert!(matches!(err, TypeError::ValueArgs { .. }));
}

#[test]
fn bind_variable_keeps_inner_when_still_valid() {
    let ts = TypeSystem::with_builtins();
    let ty = ts
        .resolve(&generic_bound(var(0, 0), 1, vec![int_range(0, 10)]))
        .unwrap();
    let g = generic_kind(&ty);
    let value = ty.with_child(&ty.create_value(&ts).unwrap(), 0, Value::Int(7)).unwrap();

    let widened = g.bind_variable(&ts, ty.name(), &value, 0, int()).unwrap();
    assert_eq!(widened.as_generic().unwrap().inner, Value::Int(7));
    assert_eq!(widened.as_generic().unwrap().bindings, vec![int()]);

    let narrowed = g
        .bind_variable(&ts, ty.name(), &value, 0, int_range(-5, 5))
        .unwrap();
    assert_eq!(narrowed.as_generic().unwrap().inner, Value::Int(0));

    let retyped = g.bind_variable(&ts, ty.name(), &value, 0, text()).unwrap();
    assert_eq!(retyped.as_generic().unwrap().inner, Value::text(""));
    assert!(ty.is_valid_value(&ts, &retyped));
}

#[test]
fn bind_variable_rejects_bad_index() {
    let ts = TypeSystem::with_builtins();
    let ty = ts.resolve(&generic_bound(var(0, 0), 1, vec![int()])).unwrap();
    let value = ty.create_value(&ts).unwrap();
    assert!(generic_kind(&ty)
        .bind_variable(&ts, ty.name(), &value, 1, int())
        .is_err());
}

#[test]
fn bound_generic_compares_as_its_instance() {
    let ts = TypeSystem::with_builtins();
    let bound = generic_bound(var(0, 0), 1, vec![int_range(0, 10)]);
    assert_eq!(
        ts.compare_subtype(&bound, &int_range(0, 10)).unwrap(),
        SubtypeOrder::IsEquivalent
    );
    assert_eq!(
        ts.compare_subtype(&int(), &bound).unwrap(),
        SubtypeOrder::IsSupertype
    );
}

#[test]
fn unbound_generics_compare_by_body() {
    let ts = TypeSystem::with_builtins();
    let a = generic(tuple(vec![var(0, 0), int_range(0, 5)]), 1);
    let b = generic(tuple(vec![var(0, 0), int()]), 1);
    assert_eq!(ts.compare_subtype(&a, &b).unwrap(), SubtypeOrder::IsSubtype);
    let c = generic(tuple(vec![var(0, 0), int()]), 2);
    assert_eq!(ts.compare_subtype(&a, &c).unwrap(), SubtypeOrder::IsUnrelated);
}
