use super::*;
use crate::builtins::core_id;
use crate::TypeSystem;
use arbor_value::{TypeRef, Value};
use pretty_assertions::assert_eq;

fn render(template: &str, type_refs: &[TypeRef], values: &[Value]) -> String {
    let ts = TypeSystem::with_builtins();
    let types: Vec<_> = type_refs.iter().map(|r| ts.resolve(r).unwrap()).collect();
    let args = ConstructorArgs {
        constructor: core_id("test"),
        type_refs,
        types: &types,
        values,
    };
    NameTemplate::new(template).render(&args)
}

fn int() -> TypeRef {
    crate::builtins::int()
}

fn text() -> TypeRef {
    crate::builtins::text()
}

#[test]
fn indexed_placeholders() {
    assert_eq!(
        render("Array<{t0}>[{v0}..{v1}]", &[int()], &[Value::Int(2), Value::Int(4)]),
        "Array<Int>[2..4]"
    );
}

#[test]
fn variadic_join() {
    assert_eq!(render("({t*:, })", &[int(), text(), int()], &[]), "(Int, Text, Int)");
    assert_eq!(render("{t*: | }", &[int(), text()], &[]), "Int | Text");
    assert_eq!(render("({t*:, })", &[], &[]), "()");
}

#[test]
fn items_and_zip_over_array_value() {
    let ids = Value::array(vec![Value::ident("a"), Value::ident("b")]);
    assert_eq!(
        render("Record{{{v0~t:, }}}", &[int(), text()], &[ids.clone()]),
        "Record{a: Int, b: Text}"
    );
    assert_eq!(render("Enum{{{v0*:|}}}", &[], &[ids]), "Enum{a|b}");
}

#[test]
fn missing_arguments_render_as_question_marks() {
    assert_eq!(render("{t0}/{v3}", &[], &[]), "?/?");
}

#[test]
fn unknown_placeholders_stay_literal() {
    assert_eq!(render("x{bogus}y{", &[], &[]), "x{bogus}y{");
    assert_eq!(NameTemplate::new("{t0}").source(), "{t0}");
}
