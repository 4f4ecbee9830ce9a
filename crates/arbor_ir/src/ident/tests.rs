use super::*;
use pretty_assertions::assert_eq;

#[test]
fn short_ids_intern_by_text() {
    let a = ShortId::new("x");
    let b = ShortId::new("x");
    assert_eq!(a, b);
    assert_eq!(a.as_str(), "x");
    assert_eq!(a.to_string(), "x");
}

#[test]
fn scopes_do_not_mix_types_but_share_text() {
    let short = ShortId::new("core");
    let medium = MediumId::new("core");
    assert_eq!(short.name(), medium.name());
}

#[test]
fn try_new_rejects_reserved_text() {
    assert_eq!(ShortId::try_new(""), Err(IdError::Empty));
    assert_eq!(
        ShortId::try_new("a.b"),
        Err(IdError::Reserved {
            text: "a.b".to_owned(),
            found: '.'
        })
    );
    assert!(matches!(
        MediumId::try_new("x[0]"),
        Err(IdError::Reserved { found: '[', .. })
    ));
    assert!(ShortId::try_new("plain_name").is_ok());
}

#[test]
fn long_id_renders_namespace_and_local() {
    let id = LongId::new(MediumId::new("core"), ShortId::new("int"));
    assert_eq!(id.to_string(), "core.int");
    assert_eq!(LongId::parse("core.int"), Ok(id));
}

#[test]
fn long_id_requires_namespace() {
    assert_eq!(
        LongId::parse("int"),
        Err(IdError::MissingNamespace("int".to_owned()))
    );
}

#[test]
fn ids_serialize_as_text() {
    let id = LongId::new(MediumId::new("plugin"), ShortId::new("curve"));
    let json = serde_json::to_string(&id).unwrap();
    assert_eq!(json, "\"plugin.curve\"");
    let back: LongId = serde_json::from_str(&json).unwrap();
    assert_eq!(back, id);

    let field: ShortId = serde_json::from_str("\"speed\"").unwrap();
    assert_eq!(field, ShortId::new("speed"));
    assert!(serde_json::from_str::<ShortId>("\"\"").is_err());
}
