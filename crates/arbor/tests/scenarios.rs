//! End-to-end scenarios across identifiers, values, types and trees.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use std::hash::{Hash, Hasher};

use arbor::refs::{array, generic, generic_bound, int, int_range, record, text, var, Field};
use arbor::{
    core_ids, Path, SharedType, SharedTypeSystem, SubtypeOrder, TypeError, TypeSystem, Value,
    ValueHolder, ValueTree,
};
use pretty_assertions::assert_eq;
use rustc_hash::FxHasher;

fn hash_of(value: &impl Hash) -> u64 {
    let mut hasher = FxHasher::default();
    value.hash(&mut hasher);
    hasher.finish()
}

fn p(text: &str) -> Path {
    text.parse().unwrap()
}

#[test]
fn constructed_types_are_canonical_across_threads() {
    let ts = SharedTypeSystem::new(TypeSystem::with_builtins());
    let range = || (Vec::new(), vec![Value::Int(0), Value::Int(10)]);

    let handles: Vec<SharedType> = std::thread::scope(|scope| {
        let workers: Vec<_> = (0..4)
            .map(|_| {
                let ts = ts.clone();
                scope.spawn(move || {
                    let (types, values) = range();
                    ts.get_or_construct(core_ids().int_range, types, values).unwrap()
                })
            })
            .collect();
        workers.into_iter().map(|w| w.join().unwrap()).collect()
    });

    let direct = ts.resolve(&int_range(0, 10)).unwrap();
    for handle in &handles {
        assert!(SharedType::ptr_eq(handle, &direct));
    }
}

#[test]
fn range_subtyping() {
    let ts = TypeSystem::with_builtins();
    assert_eq!(
        ts.compare_subtype(&int_range(0, 10), &int_range(-100, 100)).unwrap(),
        SubtypeOrder::IsSubtype
    );
    assert_eq!(
        ts.compare_subtype(&int_range(0, 10), &int_range(20, 30)).unwrap(),
        SubtypeOrder::IsUnrelated
    );
    assert_eq!(
        ts.compare_subtype(&int_range(20, 30), &int_range(0, 10)).unwrap(),
        SubtypeOrder::IsUnrelated
    );
}

#[test]
fn comparisons_across_type_systems_stay_exact() {
    let ts = TypeSystem::with_builtins();
    let small = ts.resolve(&int_range(0, 10)).unwrap();

    for round in 0..500 {
        let other = TypeSystem::with_builtins();
        let (range, expected) = if round % 2 == 0 {
            (int_range(-100, 100), SubtypeOrder::IsSupertype)
        } else {
            (int_range(20, 30), SubtypeOrder::IsUnrelated)
        };
        let foreign = other.resolve(&range).unwrap();
        assert_eq!(ts.compare_types(&foreign, &small), expected);
        assert_eq!(ts.compare_types(&small, &foreign), expected.reverse());
    }
}

#[test]
fn record_width_subtyping() {
    let ts = TypeSystem::with_builtins();
    let wide = record([Field::required("a", int()), Field::required("b", text())]);
    let narrow = record([Field::required("a", int())]);
    assert!(ts.is_subtype(&wide, &narrow).unwrap());
    assert!(!ts.is_subtype(&narrow, &wide).unwrap());
}

#[test]
fn holder_copies_are_isolated() {
    let original = Value::array(vec![Value::Int(1), Value::Int(2)]);
    let h1 = ValueHolder::new(original.clone());
    let before = hash_of(&h1);

    let mut h2 = h1.clone();
    h2.make_mut().as_array_mut().unwrap().push(Value::Int(3));

    assert_eq!(h1.get(), &original);
    assert_eq!(hash_of(&h1), before);
    assert_eq!(h2.get().as_array().unwrap().len(), 3);
}

#[test]
fn array_bounds_are_enforced() {
    let ts = TypeSystem::with_builtins();
    let ty = ts.resolve(&array(int(), 2, 4, 4)).unwrap();
    let mut tree = ValueTree::with_default(&ts, ty).unwrap();
    for i in 0..4 {
        tree.set_value(&Path::root().child(arbor::PathStep::Index(i)), Value::Int(i.into()))
            .unwrap();
    }

    let err = tree.resize_array(&Path::root(), 5).unwrap_err();
    assert_eq!(
        err,
        arbor::TreeError::Type(TypeError::SizeOutOfRange {
            requested: 5,
            min: 2,
            max: 4,
        })
    );
    assert_eq!(tree.root().get().as_array().unwrap().len(), 4);

    tree.resize_array(&Path::root(), 2).unwrap();
    assert_eq!(
        tree.root_value(),
        &Value::array(vec![Value::Int(0), Value::Int(1)])
    );
}

#[test]
fn generic_binding_scenario() {
    let ts = TypeSystem::with_builtins();
    let body = record([Field::required("x", var(0, 0))]);

    let unbound = ts.resolve(&generic(body.clone(), 1)).unwrap();
    assert_eq!(
        unbound.create_value(&ts).unwrap_err(),
        TypeError::UnresolvedGenericVariable { index: 0, depth: 0 }
    );

    let bound = ts
        .resolve(&generic_bound(body, 1, vec![int_range(0, 10)]))
        .unwrap();
    let tree = ValueTree::with_default(&ts, bound).unwrap();
    let x = tree.resolve_type(&p("[0].x")).unwrap();
    assert!(SharedType::ptr_eq(&x, &ts.resolve(&int_range(0, 10)).unwrap()));
    assert_eq!(tree.value_at(&p("[0].x")).unwrap(), Value::Int(0));
}

#[test]
fn undo_by_snapshot() {
    let ts = TypeSystem::with_builtins();
    let ty = record([
        Field::required("name", text()),
        Field::required("tags", array(text(), 0, 8, 0)),
    ]);
    let mut tree = ValueTree::for_type_ref(&ts, &ty).unwrap();
    let checkpoint = tree.snapshot();

    tree.set_value(&p("name"), Value::text("draft")).unwrap();
    tree.resize_array(&p("tags"), 2).unwrap();
    tree.set_value(&p("tags[1]"), Value::text("wip")).unwrap();
    assert_eq!(tree.value_at(&p("tags[1]")).unwrap(), Value::text("wip"));

    tree.replace_root(checkpoint.clone()).unwrap();
    assert!(ValueHolder::ptr_eq(tree.root(), &checkpoint));
    assert_eq!(tree.value_at(&p("name")).unwrap(), Value::text(""));
    assert!(tree.node(&p("tags[0]")).is_err());
    assert_eq!(tree.generation(), 4);
}

#[test]
fn type_system_from_env_has_builtins() {
    let ts = arbor::type_system_from_env().unwrap();
    assert_eq!(ts.resolve(&int()).unwrap().name(), "Int");
    arbor::init_tracing();
    arbor::init_tracing();
}
