use super::*;
use crate::refs::{int, int_range, rational, text, VariantBuilder};
use crate::TypeKind;
use arbor_value::TypeRef;
use pretty_assertions::assert_eq;

fn variant_kind(ty: &SharedType) -> &VariantType {
    match ty.kind() {
        TypeKind::Variant(v) => v,
        other => panic!("expected a variant record, got {other:?}"),
    }
}

fn no_fields() -> Vec<(&'static str, TypeRef)> {
    Vec::new()
}

fn id(text: &str) -> ShortId {
    ShortId::new(text)
}

/// `circle{radius, label} | square{side, label}`, with `label` shared.
fn shape() -> TypeRef {
    VariantBuilder::new()
        .tag("circle", [("radius", int_range(1, 100)), ("label", text())])
        .tag("square", [("side", int()), ("label", text())])
        .build()
}

#[test]
fn default_uses_default_tag() {
    let ts = TypeSystem::with_builtins();
    let ty = ts.resolve(&shape()).unwrap();
    assert_eq!(ty.name(), "Variant{circle|square}");
    let value = ty.create_value(&ts).unwrap();
    let variant = value.as_variant().unwrap();
    assert_eq!(variant.tag, id("circle"));
    assert_eq!(variant.get(id("radius")), Some(&Value::Int(1)));
    assert_eq!(ty.num_children(&value), 2);

    let other_default = VariantBuilder::new()
        .tag("a", no_fields())
        .tag("b", [("x", int())])
        .default_tag("b")
        .build();
    let ty = ts.resolve(&other_default).unwrap();
    let value = ty.create_value(&ts).unwrap();
    assert_eq!(value.as_variant().unwrap().tag, id("b"));
}

#[test]
fn switching_tags_keeps_shared_fields() {
    let ts = TypeSystem::with_builtins();
    let ty = ts.resolve(&shape()).unwrap();
    let v = variant_kind(&ty);
    let value = ty.create_value(&ts).unwrap();
    let label = ty.child_index(&value, PathStep::field("label")).unwrap();
    let value = ty.with_child(&value, label, Value::text("wheel")).unwrap();
    let radius = ty.child_index(&value, PathStep::field("radius")).unwrap();
    let value = ty.with_child(&value, radius, Value::Int(7)).unwrap();

    let square = v.select_tag(&ts, ty.name(), &value, id("square")).unwrap();
    let sq = square.as_variant().unwrap();
    assert_eq!(sq.tag, id("square"));
    assert_eq!(sq.get(id("label")), Some(&Value::text("wheel")));
    assert_eq!(sq.get(id("side")), Some(&Value::Int(0)));
    assert_eq!(sq.get(id("radius")), None);

    // Exclusive fields were discarded on the way out.
    let back = v.select_tag(&ts, ty.name(), &square, id("circle")).unwrap();
    assert_eq!(back.as_variant().unwrap().get(id("radius")), Some(&Value::Int(1)));
    assert!(ty.is_valid_value(&ts, &back));
}

#[test]
fn reselecting_keeps_value() {
    let ts = TypeSystem::with_builtins();
    let ty = ts.resolve(&shape()).unwrap();
    let value = ty.create_value(&ts).unwrap();
    let value = ty.with_child(&value, 0, Value::Int(9)).unwrap();
    let same = variant_kind(&ty)
        .select_tag(&ts, ty.name(), &value, id("circle"))
        .unwrap();
    assert_eq!(same, value);
}

#[test]
fn unknown_tag_fails() {
    let ts = TypeSystem::with_builtins();
    let ty = ts.resolve(&shape()).unwrap();
    let value = ty.create_value(&ts).unwrap();
    assert!(variant_kind(&ty)
        .select_tag(&ts, ty.name(), &value, id("triangle"))
        .is_err());
}

#[test]
fn validation_checks_tag_layout() {
    let ts = TypeSystem::with_builtins();
    let ty = ts.resolve(&shape()).unwrap();
    let wrong_fields = Value::variant(VariantValue::new(
        id("square"),
        vec![(id("radius"), Value::Int(1)), (id("label"), Value::text(""))],
    ));
    assert!(!ty.is_valid_value(&ts, &wrong_fields));
    let unknown = Value::variant(VariantValue::new(id("blob"), Vec::new()));
    assert!(!ty.is_valid_value(&ts, &unknown));
}

#[test]
fn format_shows_tag_and_fields() {
    let ts = TypeSystem::with_builtins();
    let ty = ts.resolve(&shape()).unwrap();
    let value = ty.create_value(&ts).unwrap();
    assert_eq!(ty.format_value(&ts, &value), r#"circle{radius: 1, label: ""}"#);
}

#[test]
fn subtyping_needs_equal_tag_sets() {
    let ts = TypeSystem::with_builtins();
    let wide = VariantBuilder::new()
        .tag("on", [("level", int())])
        .tag("off", no_fields())
        .build();
    let narrow = VariantBuilder::new()
        .tag("on", [("level", int_range(0, 10))])
        .tag("off", no_fields())
        .build();
    assert_eq!(ts.compare_subtype(&narrow, &wide).unwrap(), SubtypeOrder::IsSubtype);

    let extra = VariantBuilder::new()
        .tag("on", [("level", int())])
        .tag("off", no_fields())
        .tag("dim", [("level", rational())])
        .build();
    assert_eq!(ts.compare_subtype(&extra, &wide).unwrap(), SubtypeOrder::IsUnrelated);
}

#[test]
fn malformed_declarations_fail_to_construct() {
    let ts = TypeSystem::with_builtins();
    let no_tags = VariantBuilder::new().build();
    assert!(matches!(ts.resolve(&no_tags), Err(TypeError::ValueArgs { .. })));
    let dup = VariantBuilder::new().tag("a", no_fields()).tag("a", no_fields()).build();
    assert!(matches!(ts.resolve(&dup), Err(TypeError::ValueArgs { .. })));
}
