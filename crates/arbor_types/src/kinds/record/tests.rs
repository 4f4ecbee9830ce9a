use super::*;
use crate::refs::{int, int_range, record, text, Field};
use crate::TypeKind;
use pretty_assertions::assert_eq;

fn record_kind(ty: &SharedType) -> &RecordType {
    match ty.kind() {
        TypeKind::Record(r) => r,
        other => panic!("expected a record, got {other:?}"),
    }
}

fn id(text: &str) -> ShortId {
    ShortId::new(text)
}

fn person() -> arbor_value::TypeRef {
    record([
        Field::required("name", text()),
        Field::required("age", int_range(0, 150)),
        Field::optional("nickname", text()),
    ])
}

#[test]
fn default_leaves_optional_fields_inactive() {
    let ts = TypeSystem::with_builtins();
    let ty = ts.resolve(&person()).unwrap();
    let value = ty.create_value(&ts).unwrap();
    let rec = value.as_record().unwrap();
    assert_eq!(rec.get(id("name")), Some(&Value::text("")));
    assert_eq!(rec.get(id("age")), Some(&Value::Int(0)));
    assert!(!rec.is_active(id("nickname")));
    assert_eq!(ty.num_children(&value), 2);
    assert!(ty.is_valid_value(&ts, &value));
}

#[test]
fn name_lists_fields_with_types() {
    let ts = TypeSystem::with_builtins();
    let ty = ts.resolve(&person()).unwrap();
    assert_eq!(ty.name(), "Record{name: Text, age: Int[0..150], nickname: Text}");
}

#[test]
fn validation_rejects_inactive_required_and_bad_children() {
    let ts = TypeSystem::with_builtins();
    let ty = ts.resolve(&person()).unwrap();
    let missing = Value::record(RecordValue::new(vec![
        (id("name"), Some(Value::text("ann"))),
        (id("age"), None),
        (id("nickname"), None),
    ]));
    assert!(ty.validate(&ts, &missing).is_err());

    let too_old = Value::record(RecordValue::new(vec![
        (id("name"), Some(Value::text("ann"))),
        (id("age"), Some(Value::Int(200))),
        (id("nickname"), None),
    ]));
    assert!(matches!(
        ty.validate(&ts, &too_old),
        Err(TypeError::InvalidValue { .. })
    ));

    let reordered = Value::record(RecordValue::new(vec![
        (id("age"), Some(Value::Int(1))),
        (id("name"), Some(Value::text("ann"))),
        (id("nickname"), None),
    ]));
    assert!(ty.validate(&ts, &reordered).is_err());
}

#[test]
fn activation_round_trip_discards_previous_value() {
    let ts = TypeSystem::with_builtins();
    let ty = ts.resolve(&person()).unwrap();
    let rec = record_kind(&ty);
    let value = ty.create_value(&ts).unwrap();

    let on = rec
        .set_field_active(&ts, ty.name(), &value, id("nickname"), true)
        .unwrap();
    assert_eq!(on.as_record().unwrap().get(id("nickname")), Some(&Value::text("")));

    let index = ty.child_index(&on, PathStep::Field(id("nickname"))).unwrap();
    let edited = ty.with_child(&on, index, Value::text("annie")).unwrap();
    let off = rec
        .set_field_active(&ts, ty.name(), &edited, id("nickname"), false)
        .unwrap();
    let on_again = rec
        .set_field_active(&ts, ty.name(), &off, id("nickname"), true)
        .unwrap();
    assert_eq!(
        on_again.as_record().unwrap().get(id("nickname")),
        Some(&Value::text(""))
    );
}

#[test]
fn required_fields_cannot_be_deactivated() {
    let ts = TypeSystem::with_builtins();
    let ty = ts.resolve(&person()).unwrap();
    let value = ty.create_value(&ts).unwrap();
    let result = record_kind(&ty).set_field_active(&ts, ty.name(), &value, id("name"), false);
    assert!(result.is_err());
}

#[test]
fn children_skip_inactive_fields() {
    let ts = TypeSystem::with_builtins();
    let ty = ts.resolve(&person()).unwrap();
    let value = ty.create_value(&ts).unwrap();
    let children = ty.children(&value);
    let steps: Vec<_> = children.iter().map(|c| c.step).collect();
    assert_eq!(
        steps,
        vec![PathStep::Field(id("name")), PathStep::Field(id("age"))]
    );
    assert_eq!(children[1].type_ref, int_range(0, 150));
    assert_eq!(ty.child_index(&value, PathStep::Field(id("nickname"))), None);
}

#[test]
fn width_subtyping() {
    let ts = TypeSystem::with_builtins();
    let wide = record([Field::required("a", int()), Field::required("b", text())]);
    let narrow = record([Field::required("a", int())]);
    assert_eq!(ts.compare_subtype(&wide, &narrow).unwrap(), SubtypeOrder::IsSubtype);
    assert_eq!(ts.compare_subtype(&narrow, &wide).unwrap(), SubtypeOrder::IsSupertype);
}

#[test]
fn optional_fields_may_be_absent_in_subtype() {
    let ts = TypeSystem::with_builtins();
    let with_optional = record([Field::required("a", int()), Field::optional("b", text())]);
    let without = record([Field::required("a", int())]);
    // Each side's values fit the other: `b` is optional in one and absent
    // in the other.
    assert_eq!(
        ts.compare_subtype(&without, &with_optional).unwrap(),
        SubtypeOrder::IsEquivalent
    );
}

#[test]
fn optional_field_does_not_satisfy_required() {
    let ts = TypeSystem::with_builtins();
    let optional = record([Field::optional("a", int())]);
    let required = record([Field::required("a", int())]);
    assert_eq!(
        ts.compare_subtype(&required, &optional).unwrap(),
        SubtypeOrder::IsSubtype
    );
}

#[test]
fn format_uses_field_names() {
    let ts = TypeSystem::with_builtins();
    let ty = ts.resolve(&person()).unwrap();
    let value = ty.create_value(&ts).unwrap();
    assert_eq!(ty.format_value(&ts, &value), r#"{name: "", age: 0}"#);
}

#[test]
fn duplicate_field_ids_fail_to_construct() {
    let ts = TypeSystem::with_builtins();
    let dup = record([Field::required("a", int()), Field::required("a", text())]);
    assert!(matches!(ts.resolve(&dup), Err(TypeError::ValueArgs { .. })));
}
