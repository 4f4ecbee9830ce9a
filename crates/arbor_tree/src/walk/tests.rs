use crate::{TreeError, ValueTree};
use arbor_types::refs::{array, boolean, int, record, sum, text, Field};
use arbor_types::TypeSystem;
use arbor_value::{Path, Value};
use pretty_assertions::assert_eq;

fn paths(tree: &ValueTree<'_>) -> Vec<String> {
    tree.walk()
        .map(|node| node.map(|n| n.path().to_string()))
        .collect::<Result<Vec<_>, TreeError>>()
        .unwrap()
}

#[test]
fn visits_parents_before_children_in_order() {
    let ts = TypeSystem::with_builtins();
    let ty = record([
        Field::required("a", int()),
        Field::required("b", array(boolean(), 2, 2, 2)),
        Field::required("c", text()),
    ]);
    let tree = ValueTree::for_type_ref(&ts, &ty).unwrap();
    assert_eq!(paths(&tree), vec!["", "a", "b", "b[0]", "b[1]", "c"]);
}

#[test]
fn scalar_root_is_a_single_node() {
    let ts = TypeSystem::with_builtins();
    let tree = ValueTree::for_type_ref(&ts, &int()).unwrap();
    let nodes: Vec<_> = tree.walk().collect::<Result<_, _>>().unwrap();
    assert_eq!(nodes.len(), 1);
    assert_eq!(nodes[0].value(), &Value::Int(0));
    assert!(nodes[0].path().is_root());
}

#[test]
fn follows_current_shape() {
    let ts = TypeSystem::with_builtins();
    let ty = sum(vec![int(), array(int(), 0, 4, 1)], 0);
    let mut tree = ValueTree::for_type_ref(&ts, &ty).unwrap();
    assert_eq!(paths(&tree), vec!["", "[0]"]);

    tree.select_summand(&Path::root(), 1).unwrap();
    assert_eq!(paths(&tree), vec!["", "[1]", "[1][0]"]);
    assert!(tree.walk().all(|node| node.is_ok_and(|n| !n.is_stale(&tree))));
}
