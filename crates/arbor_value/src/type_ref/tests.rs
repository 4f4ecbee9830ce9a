use super::*;
use crate::{MediumId, ShortId};
use pretty_assertions::assert_eq;

fn core(local: &str) -> LongId {
    LongId::new(MediumId::new("core"), ShortId::new(local))
}

fn int_range(min: i64, max: i64) -> TypeRef {
    TypeRef::constructed(core("int_range"), vec![], vec![Value::Int(min), Value::Int(max)])
}

#[test]
fn equality_is_structural() {
    assert_eq!(int_range(0, 10), int_range(0, 10));
    assert_ne!(int_range(0, 10), int_range(0, 11));
    assert_ne!(TypeRef::primitive(core("int")), TypeRef::primitive(core("text")));
}

#[test]
fn primitive_has_no_arguments() {
    let int = TypeRef::primitive(core("int"));
    assert!(int.is_primitive());
    assert!(int.type_args().is_empty());
    assert!(int.value_args().is_empty());
    assert_eq!(int.constructor_id(), None);
    assert_eq!(int.id(), core("int"));
}

#[test]
fn fallback_name_reconstructs_arguments() {
    let array = TypeRef::constructed(
        core("array"),
        vec![int_range(0, 10)],
        vec![Value::Int(0), Value::Int(4), Value::Int(2)],
    );
    assert_eq!(
        array.fallback_name(),
        "core.array<core.int_range<; 0, 10>; 0, 4, 2>"
    );
    let tuple = TypeRef::constructed(
        core("tuple"),
        vec![TypeRef::primitive(core("int")), TypeRef::primitive(core("text"))],
        vec![],
    );
    assert_eq!(tuple.to_string(), "core.tuple<core.int, core.text>");
}

#[test]
fn with_type_args_keeps_value_args() {
    let array = TypeRef::constructed(core("array"), vec![TypeRef::primitive(core("int"))], vec![Value::Int(1)]);
    let swapped = array.with_type_args(vec![TypeRef::primitive(core("text"))]);
    assert_eq!(swapped.constructor_id(), Some(core("array")));
    assert_eq!(swapped.value_args(), &[Value::Int(1)]);
    assert_eq!(swapped.type_args(), &[TypeRef::primitive(core("text"))]);
}

#[test]
fn serializes_as_constructor_with_nested_lists() {
    let tr = int_range(0, 10);
    let json = serde_json::to_value(&tr).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "constructed": {
                "constructor": "core.int_range",
                "types": [],
                "values": [{"int": 0}, {"int": 10}]
            }
        })
    );
    let back: TypeRef = serde_json::from_value(json).unwrap();
    assert_eq!(back, tr);

    let prim: TypeRef = serde_json::from_str(r#"{"primitive":"core.bool"}"#).unwrap();
    assert_eq!(prim, TypeRef::primitive(core("bool")));
}
